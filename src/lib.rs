pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::http::ReqwestTransport;
pub use config::{env_config::EnvConfig, toml_config::TomlConfig};
pub use core::scoring::{classify, ScoringPolicy};
pub use core::screening::{ScreeningEngine, ScreeningReport};
pub use core::submitter::Submitter;
pub use domain::model::{
    ApplicantAnswers, ApplicantIdentity, Application, EligibilityResult, SubmissionOutcome,
    SubmissionRecord, Verdict,
};
pub use utils::error::{AdoptError, Result};
