use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

pub const MIN_AGE: u8 = 18;
pub const MAX_AGE: u8 = 80;

/// Shown under every verdict.
pub const PRELIMINARY_NOTICE: &str =
    "Note: this evaluation is preliminary and does not replace the judgment of the shelter staff.";

fn normalize_label(label: &str) -> String {
    label.trim().to_lowercase().replace([' ', '-'], "_")
}

/// Declares a categorical answer. Parsing is infallible: unknown labels land
/// in `Unrecognized`, which every scoring rule treats as zero.
macro_rules! answer_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $variant:ident => $canonical:literal $(| $alias:literal)* ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case", from = "String")]
        pub enum $name {
            $( $variant, )+
            Unrecognized,
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $canonical, )+
                    $name::Unrecognized => "unrecognized",
                }
            }
        }

        impl FromStr for $name {
            type Err = Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let label = normalize_label(s);
                Ok(match label.as_str() {
                    $( $canonical $(| $alias)* => $name::$variant, )+
                    _ => $name::Unrecognized,
                })
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                match s.parse() {
                    Ok(value) => value,
                    Err(never) => match never {},
                }
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                s.as_str().into()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

answer_enum! {
    /// Daily time the applicant can dedicate to the animal.
    FreeTime {
        UpToTwoHours => "up_to_two_hours" | "<=2h" | "≤2h" | "0_2h" | "<1_hora" | "1_3_horas",
        TwoToFiveHours => "two_to_five_hours" | "2_5h" | "2–5h" | "3_5_horas",
        MoreThanFiveHours => "more_than_five_hours" | ">5h" | ">5_horas",
    }
}

answer_enum! {
    /// Yes / No / NotApplicable answers (safety netting, landlord permission).
    TriState {
        Yes => "yes" | "y" | "si" | "sí",
        No => "no" | "n",
        NotApplicable => "not_applicable" | "n/a" | "na" | "no_aplica" | "no_aplica_(no_tengo_gatos)",
    }
}

answer_enum! {
    ExperienceLevel {
        Low => "low" | "none" | "baja" | "ninguna" | "no",
        Medium => "medium" | "some" | "media",
        High => "high" | "alta" | "yes" | "si" | "sí",
    }
}

answer_enum! {
    HousingType {
        Flat => "flat" | "apartment" | "piso",
        House => "house" | "casa",
        AtticPenthouse => "attic_penthouse" | "attic" | "penthouse" | "atico" | "ático",
        SharedHousing => "shared_housing" | "shared" | "piso_compartido",
        Other => "other" | "otro",
    }
}

/// One applicant's answers, constructed once per submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicantAnswers {
    pub age: u8,
    pub free_time: FreeTime,
    pub safety_netting: TriState,
    pub experience: ExperienceLevel,
    pub housing: HousingType,
    pub landlord_permission: TriState,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicantIdentity {
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub animal_name: String,
}

/// Everything the form shell hands over for one submission.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Application {
    #[serde(flatten)]
    pub identity: ApplicantIdentity,
    #[serde(flatten)]
    pub answers: ApplicantAnswers,
    #[serde(default)]
    pub consent: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Eligible,
    NeedsReview,
    NotEligible,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Eligible => "eligible",
            Verdict::NeedsReview => "needs_review",
            Verdict::NotEligible => "not_eligible",
        }
    }

    /// Guidance shown to shelter staff alongside the verdict.
    pub fn guidance(&self) -> &'static str {
        match self {
            Verdict::Eligible => {
                "High likelihood of a responsible adopter. Proceeding to the interview is recommended."
            }
            Verdict::NeedsReview => "Intermediate profile. Additional manual evaluation is required.",
            Verdict::NotEligible => {
                "Low initial fit. Reviewing the applicant's motivation and conditions is recommended."
            }
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityResult {
    pub score: i32,
    pub verdict: Verdict,
}

/// Flat payload describing one applicant, sent to the recipient once.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionRecord {
    pub submitted_at: DateTime<Utc>,
    #[serde(flatten)]
    pub identity: ApplicantIdentity,
    #[serde(flatten)]
    pub answers: ApplicantAnswers,
    #[serde(flatten)]
    pub result: EligibilityResult,
    pub recipient: Option<String>,
}

impl SubmissionRecord {
    pub fn new(
        identity: ApplicantIdentity,
        answers: ApplicantAnswers,
        result: EligibilityResult,
        recipient: Option<String>,
    ) -> Self {
        Self::at(Utc::now(), identity, answers, result, recipient)
    }

    pub fn at(
        submitted_at: DateTime<Utc>,
        identity: ApplicantIdentity,
        answers: ApplicantAnswers,
        result: EligibilityResult,
        recipient: Option<String>,
    ) -> Self {
        Self {
            submitted_at,
            identity,
            answers,
            result,
            recipient,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum OutcomeKind {
    Delivered { status: u16 },
    EndpointUnset,
    Rejected { status: u16 },
    TransportFailed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionOutcome {
    pub ok: bool,
    pub message: String,
    pub kind: OutcomeKind,
}

impl SubmissionOutcome {
    pub fn delivered(status: u16) -> Self {
        Self {
            ok: true,
            message: format!("Summary delivered (HTTP {})", status),
            kind: OutcomeKind::Delivered { status },
        }
    }

    pub fn endpoint_unset() -> Self {
        Self {
            ok: false,
            message: "Webhook destination is not configured; summary was not sent".to_string(),
            kind: OutcomeKind::EndpointUnset,
        }
    }

    pub fn rejected(status: u16) -> Self {
        Self {
            ok: false,
            message: format!("Recipient rejected the summary (HTTP {})", status),
            kind: OutcomeKind::Rejected { status },
        }
    }

    pub fn transport_failed(reason: impl fmt::Display) -> Self {
        Self {
            ok: false,
            message: format!("Could not reach the recipient: {}", reason),
            kind: OutcomeKind::TransportFailed,
        }
    }
}
