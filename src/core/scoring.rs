use crate::domain::model::{
    ApplicantAnswers, EligibilityResult, ExperienceLevel, FreeTime, HousingType, TriState, Verdict,
};
use crate::utils::error::{AdoptError, Result};
use crate::utils::validation::Validate;

/// Lowest score that needs a manual review instead of a rejection.
pub const REVIEW_MIN: i32 = 4;
/// Lowest score considered eligible outright.
pub const ELIGIBLE_MIN: i32 = 7;
/// Score reported when the landlord veto fires.
pub const VETO_SCORE: i32 = -1;
pub const NETTING_BONUS: i32 = 2;
/// Bound on any configurable weight, positive or negative.
pub const MAX_WEIGHT: i32 = 100;

/// What happens when the landlord has refused pets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LandlordRule {
    /// Stop scoring and reject with `VETO_SCORE`.
    Veto,
    /// Add the given amount and keep scoring.
    Penalty(i32),
}

/// The rule variant in force: thresholds, netting weight and landlord policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringPolicy {
    pub review_min: i32,
    pub eligible_min: i32,
    pub netting_bonus: i32,
    pub landlord_rule: LandlordRule,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            review_min: REVIEW_MIN,
            eligible_min: ELIGIBLE_MIN,
            netting_bonus: NETTING_BONUS,
            landlord_rule: LandlordRule::Veto,
        }
    }
}

impl ScoringPolicy {
    pub fn classify(&self, answers: &ApplicantAnswers) -> EligibilityResult {
        let start = match (answers.landlord_permission, self.landlord_rule) {
            (TriState::No, LandlordRule::Veto) => {
                tracing::debug!("Landlord veto applied");
                return EligibilityResult {
                    score: VETO_SCORE,
                    verdict: Verdict::NotEligible,
                };
            }
            (TriState::No, LandlordRule::Penalty(penalty)) => penalty,
            _ => 0,
        };

        let score = [
            age_points(answers.age),
            free_time_points(answers.free_time),
            self.netting_points(answers.safety_netting),
            experience_points(answers.experience),
            housing_points(answers.housing),
        ]
        .into_iter()
        .fold(start, i32::saturating_add);

        EligibilityResult {
            score,
            verdict: self.verdict_for(score),
        }
    }

    /// Maps a score to its band; every band is inclusive on its lower bound.
    pub fn verdict_for(&self, score: i32) -> Verdict {
        if score >= self.eligible_min {
            Verdict::Eligible
        } else if score >= self.review_min {
            Verdict::NeedsReview
        } else {
            Verdict::NotEligible
        }
    }

    fn netting_points(&self, netting: TriState) -> i32 {
        match netting {
            TriState::Yes => self.netting_bonus,
            _ => 0,
        }
    }
}

impl Validate for ScoringPolicy {
    fn validate(&self) -> Result<()> {
        if self.review_min > self.eligible_min {
            return Err(AdoptError::InvalidConfigValueError {
                field: "scoring.review_min".to_string(),
                value: self.review_min.to_string(),
                reason: format!(
                    "must not exceed scoring.eligible_min ({})",
                    self.eligible_min
                ),
            });
        }

        validate_weight("scoring.netting_bonus", self.netting_bonus)?;
        if let LandlordRule::Penalty(penalty) = self.landlord_rule {
            validate_weight("scoring.landlord_penalty", penalty)?;
        }
        Ok(())
    }
}

fn validate_weight(field: &str, weight: i32) -> Result<()> {
    if !(-MAX_WEIGHT..=MAX_WEIGHT).contains(&weight) {
        return Err(AdoptError::InvalidConfigValueError {
            field: field.to_string(),
            value: weight.to_string(),
            reason: format!("must be between -{} and {}", MAX_WEIGHT, MAX_WEIGHT),
        });
    }
    Ok(())
}

/// Classifies with the default policy.
pub fn classify(answers: &ApplicantAnswers) -> EligibilityResult {
    ScoringPolicy::default().classify(answers)
}

fn age_points(age: u8) -> i32 {
    match age {
        0..=24 => 1,
        25..=44 => 2,
        45..=60 => 1,
        _ => -1,
    }
}

fn free_time_points(free_time: FreeTime) -> i32 {
    match free_time {
        FreeTime::MoreThanFiveHours => 2,
        FreeTime::TwoToFiveHours => 1,
        FreeTime::UpToTwoHours | FreeTime::Unrecognized => 0,
    }
}

fn experience_points(level: ExperienceLevel) -> i32 {
    match level {
        ExperienceLevel::High => 2,
        ExperienceLevel::Medium => 1,
        ExperienceLevel::Low | ExperienceLevel::Unrecognized => 0,
    }
}

fn housing_points(housing: HousingType) -> i32 {
    match housing {
        HousingType::House | HousingType::AtticPenthouse => 2,
        HousingType::Flat => 1,
        HousingType::SharedHousing | HousingType::Other | HousingType::Unrecognized => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FREE_TIMES: [FreeTime; 4] = [
        FreeTime::UpToTwoHours,
        FreeTime::TwoToFiveHours,
        FreeTime::MoreThanFiveHours,
        FreeTime::Unrecognized,
    ];
    const TRI_STATES: [TriState; 4] = [
        TriState::Yes,
        TriState::No,
        TriState::NotApplicable,
        TriState::Unrecognized,
    ];
    const LEVELS: [ExperienceLevel; 4] = [
        ExperienceLevel::Low,
        ExperienceLevel::Medium,
        ExperienceLevel::High,
        ExperienceLevel::Unrecognized,
    ];
    const HOUSINGS: [HousingType; 6] = [
        HousingType::Flat,
        HousingType::House,
        HousingType::AtticPenthouse,
        HousingType::SharedHousing,
        HousingType::Other,
        HousingType::Unrecognized,
    ];

    fn answers(age: u8) -> ApplicantAnswers {
        ApplicantAnswers {
            age,
            free_time: FreeTime::MoreThanFiveHours,
            safety_netting: TriState::Yes,
            experience: ExperienceLevel::High,
            housing: HousingType::House,
            landlord_permission: TriState::Yes,
        }
    }

    #[test]
    fn test_strong_applicant_is_eligible() {
        let result = classify(&answers(30));
        assert_eq!(result.score, 10);
        assert_eq!(result.verdict, Verdict::Eligible);
    }

    #[test]
    fn test_landlord_refusal_vetoes() {
        let applicant = ApplicantAnswers {
            age: 70,
            free_time: FreeTime::UpToTwoHours,
            safety_netting: TriState::No,
            experience: ExperienceLevel::Low,
            housing: HousingType::Other,
            landlord_permission: TriState::No,
        };

        let result = classify(&applicant);
        assert_eq!(result.score, VETO_SCORE);
        assert_eq!(result.verdict, Verdict::NotEligible);
    }

    #[test]
    fn test_veto_ignores_every_other_answer() {
        for free_time in FREE_TIMES {
            for netting in TRI_STATES {
                for experience in LEVELS {
                    for housing in HOUSINGS {
                        for age in [18, 30, 50, 80] {
                            let applicant = ApplicantAnswers {
                                age,
                                free_time,
                                safety_netting: netting,
                                experience,
                                housing,
                                landlord_permission: TriState::No,
                            };
                            assert_eq!(
                                classify(&applicant),
                                EligibilityResult {
                                    score: VETO_SCORE,
                                    verdict: Verdict::NotEligible,
                                }
                            );
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_penalty_rule_keeps_scoring() {
        let policy = ScoringPolicy {
            landlord_rule: LandlordRule::Penalty(-1),
            ..ScoringPolicy::default()
        };
        let applicant = ApplicantAnswers {
            landlord_permission: TriState::No,
            ..answers(30)
        };

        let result = policy.classify(&applicant);
        assert_eq!(result.score, 9);
        assert_eq!(result.verdict, Verdict::Eligible);
    }

    #[test]
    fn test_not_applicable_permission_scores_normally() {
        let applicant = ApplicantAnswers {
            landlord_permission: TriState::NotApplicable,
            ..answers(30)
        };
        assert_eq!(classify(&applicant).score, 10);
    }

    #[test]
    fn test_age_bands_cover_the_whole_domain() {
        assert_eq!(age_points(18), 1);
        assert_eq!(age_points(24), 1);
        assert_eq!(age_points(25), 2);
        assert_eq!(age_points(44), 2);
        assert_eq!(age_points(45), 1);
        assert_eq!(age_points(60), 1);
        assert_eq!(age_points(61), -1);
        assert_eq!(age_points(80), -1);
        for age in 0..=u8::MAX {
            assert!([-1, 1, 2].contains(&age_points(age)));
        }
    }

    #[test]
    fn test_unrecognized_answers_score_zero() {
        let applicant = ApplicantAnswers {
            age: 30,
            free_time: FreeTime::Unrecognized,
            safety_netting: TriState::Unrecognized,
            experience: ExperienceLevel::Unrecognized,
            housing: HousingType::Unrecognized,
            landlord_permission: TriState::Unrecognized,
        };

        let result = classify(&applicant);
        assert_eq!(result.score, 2);
        assert_eq!(result.verdict, Verdict::NotEligible);
    }

    #[test]
    fn test_verdict_boundaries() {
        let policy = ScoringPolicy::default();
        assert_eq!(policy.verdict_for(i32::MIN), Verdict::NotEligible);
        assert_eq!(policy.verdict_for(-1), Verdict::NotEligible);
        assert_eq!(policy.verdict_for(REVIEW_MIN - 1), Verdict::NotEligible);
        assert_eq!(policy.verdict_for(REVIEW_MIN), Verdict::NeedsReview);
        assert_eq!(policy.verdict_for(ELIGIBLE_MIN - 1), Verdict::NeedsReview);
        assert_eq!(policy.verdict_for(ELIGIBLE_MIN), Verdict::Eligible);
        assert_eq!(policy.verdict_for(i32::MAX), Verdict::Eligible);
    }

    #[test]
    fn test_bands_are_monotonic() {
        let policy = ScoringPolicy::default();
        let rank = |v: Verdict| match v {
            Verdict::NotEligible => 0,
            Verdict::NeedsReview => 1,
            Verdict::Eligible => 2,
        };
        for score in -20..20 {
            assert!(rank(policy.verdict_for(score)) <= rank(policy.verdict_for(score + 1)));
        }
    }

    #[test]
    fn test_classify_is_deterministic() {
        for housing in HOUSINGS {
            let applicant = ApplicantAnswers {
                housing,
                ..answers(47)
            };
            assert_eq!(classify(&applicant), classify(&applicant));
        }
    }

    #[test]
    fn test_netting_bonus_follows_policy() {
        let policy = ScoringPolicy {
            netting_bonus: 1,
            ..ScoringPolicy::default()
        };
        assert_eq!(policy.classify(&answers(30)).score, 9);
    }

    #[test]
    fn test_extreme_weights_saturate_instead_of_overflowing() {
        let generous = ScoringPolicy {
            netting_bonus: i32::MAX,
            ..ScoringPolicy::default()
        };
        let result = generous.classify(&answers(30));
        assert_eq!(result.score, i32::MAX);
        assert_eq!(result.verdict, Verdict::Eligible);

        let harsh = ScoringPolicy {
            landlord_rule: LandlordRule::Penalty(i32::MIN),
            ..ScoringPolicy::default()
        };
        let applicant = ApplicantAnswers {
            landlord_permission: TriState::No,
            ..answers(70)
        };
        let result = harsh.classify(&applicant);
        assert_eq!(result.verdict, Verdict::NotEligible);
        assert!(result.score < 0);
    }

    #[test]
    fn test_out_of_bounds_weights_are_rejected() {
        let bonus = ScoringPolicy {
            netting_bonus: i32::MAX,
            ..ScoringPolicy::default()
        };
        assert!(bonus.validate().is_err());

        let penalty = ScoringPolicy {
            landlord_rule: LandlordRule::Penalty(-(MAX_WEIGHT + 1)),
            ..ScoringPolicy::default()
        };
        assert!(penalty.validate().is_err());

        let at_bound = ScoringPolicy {
            netting_bonus: MAX_WEIGHT,
            landlord_rule: LandlordRule::Penalty(-MAX_WEIGHT),
            ..ScoringPolicy::default()
        };
        assert!(at_bound.validate().is_ok());
    }

    #[test]
    fn test_inverted_thresholds_are_rejected() {
        let policy = ScoringPolicy {
            review_min: 8,
            eligible_min: 7,
            ..ScoringPolicy::default()
        };
        assert!(policy.validate().is_err());
        assert!(ScoringPolicy::default().validate().is_ok());
    }
}
