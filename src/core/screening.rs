use crate::adapters::http::ReqwestTransport;
use crate::core::scoring::ScoringPolicy;
use crate::core::submitter::Submitter;
use crate::domain::model::{
    Application, EligibilityResult, SubmissionOutcome, SubmissionRecord, MAX_AGE, MIN_AGE,
    PRELIMINARY_NOTICE,
};
use crate::domain::ports::{ConfigProvider, WebhookTransport};
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_range, Validate};
use serde::Serialize;

impl Validate for Application {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("name", &self.identity.name)?;
        validate_range("age", self.answers.age, MIN_AGE, MAX_AGE)?;
        Ok(())
    }
}

/// What the shell renders after one submission. `outcome` is `None` when
/// the applicant did not consent and nothing was sent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScreeningReport {
    pub result: EligibilityResult,
    pub outcome: Option<SubmissionOutcome>,
}

impl ScreeningReport {
    /// Plain-text rendering for terminals.
    pub fn render(&self) -> String {
        let delivery = match &self.outcome {
            Some(outcome) if outcome.ok => format!("✅ {}", outcome.message),
            Some(outcome) => format!("⚠️ {}", outcome.message),
            None => "Summary not sent: the applicant did not consent".to_string(),
        };

        [
            format!("Score: {}", self.result.score),
            format!("Verdict: {}", self.result.verdict),
            self.result.verdict.guidance().to_string(),
            PRELIMINARY_NOTICE.to_string(),
            delivery,
        ]
        .join("\n")
    }
}

pub struct ScreeningEngine<T: WebhookTransport> {
    policy: ScoringPolicy,
    submitter: Submitter<T>,
    recipient: Option<String>,
}

impl ScreeningEngine<ReqwestTransport> {
    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let policy = config.scoring_policy();
        policy.validate()?;

        Ok(Self::new(
            policy,
            Submitter::from_config(config)?,
            config.recipient_identifier().map(str::to_string),
        ))
    }
}

impl<T: WebhookTransport> ScreeningEngine<T> {
    pub fn new(policy: ScoringPolicy, submitter: Submitter<T>, recipient: Option<String>) -> Self {
        let recipient = recipient.filter(|r| !r.trim().is_empty());
        Self {
            policy,
            submitter,
            recipient,
        }
    }

    pub async fn screen(&self, application: &Application) -> Result<ScreeningReport> {
        application.validate()?;

        let result = self.policy.classify(&application.answers);
        tracing::info!(
            "Applicant '{}' scored {} ({})",
            application.identity.name,
            result.score,
            result.verdict
        );

        if !application.consent {
            tracing::info!("No consent given, summary will not be sent");
            return Ok(ScreeningReport {
                result,
                outcome: None,
            });
        }

        let record = SubmissionRecord::new(
            application.identity.clone(),
            application.answers.clone(),
            result,
            self.recipient.clone(),
        );
        let outcome = self.submitter.submit(&record).await;

        Ok(ScreeningReport {
            result,
            outcome: Some(outcome),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{
        ApplicantAnswers, ApplicantIdentity, ExperienceLevel, FreeTime, HousingType, OutcomeKind,
        TriState, Verdict,
    };
    use crate::utils::error::AdoptError;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct RecordingTransport {
        bodies: Arc<Mutex<Vec<serde_json::Value>>>,
    }

    #[async_trait]
    impl WebhookTransport for RecordingTransport {
        async fn post_json(&self, _url: &str, body: &serde_json::Value) -> Result<u16> {
            self.bodies.lock().unwrap().push(body.clone());
            Ok(200)
        }
    }

    fn application(consent: bool) -> Application {
        Application {
            identity: ApplicantIdentity {
                name: "Luis Gómez".to_string(),
                phone: "611222333".to_string(),
                animal_name: "Tofu".to_string(),
            },
            answers: ApplicantAnswers {
                age: 50,
                free_time: FreeTime::TwoToFiveHours,
                safety_netting: TriState::NotApplicable,
                experience: ExperienceLevel::Medium,
                housing: HousingType::Flat,
                landlord_permission: TriState::Yes,
            },
            consent,
        }
    }

    fn engine(transport: RecordingTransport) -> ScreeningEngine<RecordingTransport> {
        ScreeningEngine::new(
            ScoringPolicy::default(),
            Submitter::new(transport, Some("https://hooks.example.org/in".to_string())),
            Some("adopciones@protectora.example".to_string()),
        )
    }

    #[tokio::test]
    async fn test_no_consent_means_no_submission() {
        let transport = RecordingTransport::default();
        let report = engine(transport.clone())
            .screen(&application(false))
            .await
            .unwrap();

        assert_eq!(report.result.score, 4);
        assert_eq!(report.result.verdict, Verdict::NeedsReview);
        assert!(report.outcome.is_none());
        assert!(transport.bodies.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_consent_sends_record_with_recipient() {
        let transport = RecordingTransport::default();
        let report = engine(transport.clone())
            .screen(&application(true))
            .await
            .unwrap();

        let outcome = report.outcome.unwrap();
        assert!(outcome.ok);
        assert_eq!(outcome.kind, OutcomeKind::Delivered { status: 200 });

        let bodies = transport.bodies.lock().unwrap();
        assert_eq!(bodies.len(), 1);
        assert_eq!(bodies[0]["recipient"], "adopciones@protectora.example");
        assert_eq!(bodies[0]["verdict"], "needs_review");
        assert_eq!(bodies[0]["animal_name"], "Tofu");
    }

    #[tokio::test]
    async fn test_render_ends_verdict_with_preliminary_notice() {
        let report = engine(RecordingTransport::default())
            .screen(&application(false))
            .await
            .unwrap();

        let lines: Vec<String> = report.render().lines().map(str::to_string).collect();
        assert_eq!(lines[1], "Verdict: needs_review");
        assert_eq!(lines[2], Verdict::NeedsReview.guidance());
        assert_eq!(lines[3], PRELIMINARY_NOTICE);
        assert!(lines[4].contains("did not consent"));
    }

    #[tokio::test]
    async fn test_out_of_range_age_is_rejected() {
        let mut app = application(true);
        app.answers.age = 17;

        let transport = RecordingTransport::default();
        let err = engine(transport.clone()).screen(&app).await.unwrap_err();

        assert!(matches!(err, AdoptError::ValidationError { ref field, .. } if field == "age"));
        assert!(transport.bodies.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_blank_name_is_rejected() {
        let mut app = application(false);
        app.identity.name = "  ".to_string();

        let err = engine(RecordingTransport::default())
            .screen(&app)
            .await
            .unwrap_err();
        assert!(matches!(err, AdoptError::ValidationError { .. }));
    }

    #[tokio::test]
    async fn test_blank_recipient_is_sent_as_null() {
        let transport = RecordingTransport::default();
        let engine = ScreeningEngine::new(
            ScoringPolicy::default(),
            Submitter::new(
                transport.clone(),
                Some("https://hooks.example.org/in".to_string()),
            ),
            Some(String::new()),
        );

        engine.screen(&application(true)).await.unwrap();

        let bodies = transport.bodies.lock().unwrap();
        assert!(bodies[0]["recipient"].is_null());
    }
}
