use crate::adapters::http::DEFAULT_TIMEOUT;
use crate::core::scoring::{LandlordRule, ScoringPolicy, ELIGIBLE_MIN, NETTING_BONUS, REVIEW_MIN};
use crate::core::ConfigProvider;
use crate::utils::error::{AdoptError, Result};
use crate::utils::validation::{validate_positive_number, validate_url, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;

const DEFAULT_LANDLORD_PENALTY: i32 = -1;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub webhook: Option<WebhookConfig>,
    pub scoring: Option<ScoringConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WebhookConfig {
    pub url: Option<String>,
    pub recipient: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LandlordRuleName {
    Veto,
    Penalty,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub review_min: Option<i32>,
    pub eligible_min: Option<i32>,
    pub netting_bonus: Option<i32>,
    pub landlord_rule: Option<LandlordRuleName>,
    pub landlord_penalty: Option<i32>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AdoptError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| AdoptError::ConfigParseError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the variable's value; unset variables become
    /// empty, which the accessors treat as "not configured".
    fn substitute_env_vars(content: &str) -> String {
        static ENV_VAR: OnceLock<Regex> = OnceLock::new();
        let re = ENV_VAR.get_or_init(|| {
            Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("env var pattern is valid")
        });

        re.replace_all(content, |caps: &regex::Captures| {
            std::env::var(&caps[1]).unwrap_or_default()
        })
        .into_owned()
    }

    fn webhook_section(&self) -> Option<&WebhookConfig> {
        self.webhook.as_ref()
    }

    pub fn validate_config(&self) -> Result<()> {
        if let Some(url) = self.webhook_url() {
            validate_url("webhook.url", url)?;
        }

        if let Some(seconds) = self.webhook_section().and_then(|w| w.timeout_seconds) {
            validate_positive_number("webhook.timeout_seconds", seconds, 1)?;
        }

        self.scoring_policy().validate()
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

impl ConfigProvider for TomlConfig {
    fn webhook_url(&self) -> Option<&str> {
        self.webhook_section().and_then(|w| non_blank(&w.url))
    }

    fn recipient_identifier(&self) -> Option<&str> {
        self.webhook_section().and_then(|w| non_blank(&w.recipient))
    }

    fn request_timeout(&self) -> Duration {
        self.webhook_section()
            .and_then(|w| w.timeout_seconds)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT)
    }

    fn scoring_policy(&self) -> ScoringPolicy {
        let Some(scoring) = &self.scoring else {
            return ScoringPolicy::default();
        };

        let landlord_rule = match scoring.landlord_rule.unwrap_or(LandlordRuleName::Veto) {
            LandlordRuleName::Veto => LandlordRule::Veto,
            LandlordRuleName::Penalty => LandlordRule::Penalty(
                scoring.landlord_penalty.unwrap_or(DEFAULT_LANDLORD_PENALTY),
            ),
        };

        ScoringPolicy {
            review_min: scoring.review_min.unwrap_or(REVIEW_MIN),
            eligible_min: scoring.eligible_min.unwrap_or(ELIGIBLE_MIN),
            netting_bonus: scoring.netting_bonus.unwrap_or(NETTING_BONUS),
            landlord_rule,
        }
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
