use crate::domain::model::{ApplicantAnswers, ApplicantIdentity, Application};
use crate::utils::error::{AdoptError, Result};
use clap::Parser;
use std::path::Path;

#[derive(Debug, Clone, Parser)]
#[command(name = "adopt-screen")]
#[command(about = "Pre-screens adoption applications and forwards a summary to the shelter")]
pub struct CliConfig {
    /// Path to a TOML configuration file (defaults to environment variables)
    #[arg(short, long)]
    pub config: Option<String>,

    /// JSON file with the applicant's identity, answers and consent
    #[arg(long, conflicts_with_all = ["name", "age"])]
    pub answers: Option<String>,

    #[arg(long, required_unless_present = "answers")]
    pub name: Option<String>,

    #[arg(long, default_value = "")]
    pub phone: String,

    #[arg(long, default_value = "")]
    pub animal_name: String,

    #[arg(long, required_unless_present = "answers")]
    pub age: Option<u8>,

    /// up_to_two_hours, two_to_five_hours, more_than_five_hours
    #[arg(long, default_value = "")]
    pub free_time: String,

    /// yes, no, not_applicable
    #[arg(long, default_value = "")]
    pub safety_netting: String,

    /// low, medium, high
    #[arg(long, default_value = "")]
    pub experience: String,

    /// flat, house, attic_penthouse, shared_housing, other
    #[arg(long, default_value = "")]
    pub housing: String,

    /// yes, no, not_applicable
    #[arg(long, default_value = "")]
    pub landlord_permission: String,

    /// The applicant agrees to have the summary forwarded
    #[arg(long)]
    pub consent: bool,

    /// Overrides the configured webhook URL
    #[arg(long)]
    pub webhook_url: Option<String>,

    /// Overrides the configured recipient identifier
    #[arg(long)]
    pub recipient: Option<String>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    pub fn application(&self) -> Result<Application> {
        if let Some(path) = &self.answers {
            let mut application = read_application_file(path)?;
            application.consent |= self.consent;
            return Ok(application);
        }

        let name = self.name.clone().ok_or_else(|| AdoptError::ValidationError {
            field: "name".to_string(),
            message: "required when --answers is not given".to_string(),
        })?;
        let age = self.age.ok_or_else(|| AdoptError::ValidationError {
            field: "age".to_string(),
            message: "required when --answers is not given".to_string(),
        })?;

        Ok(Application {
            identity: ApplicantIdentity {
                name,
                phone: self.phone.clone(),
                animal_name: self.animal_name.clone(),
            },
            answers: ApplicantAnswers {
                age,
                free_time: self.free_time.as_str().into(),
                safety_netting: self.safety_netting.as_str().into(),
                experience: self.experience.as_str().into(),
                housing: self.housing.as_str().into(),
                landlord_permission: self.landlord_permission.as_str().into(),
            },
            consent: self.consent,
        })
    }
}

pub fn read_application_file<P: AsRef<Path>>(path: P) -> Result<Application> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
