pub mod scoring;
pub mod screening;
pub mod submitter;

pub use crate::domain::model::{ApplicantAnswers, EligibilityResult, SubmissionRecord, Verdict};
pub use crate::domain::ports::{ConfigProvider, WebhookTransport};
pub use crate::utils::error::Result;
