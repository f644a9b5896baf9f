use crate::adapters::http::DEFAULT_TIMEOUT;
use crate::core::scoring::ScoringPolicy;
use crate::core::ConfigProvider;
use crate::utils::error::{AdoptError, Result};
use crate::utils::validation::{validate_positive_number, validate_url, Validate};
use std::env;
use std::time::Duration;

pub const WEBHOOK_URL_VAR: &str = "WEBHOOK_URL";
pub const RECIPIENT_VAR: &str = "RECIPIENT_IDENTIFIER";
pub const TIMEOUT_VAR: &str = "WEBHOOK_TIMEOUT_SECONDS";

/// Settings read once from the process environment at startup. Blank
/// variables count as unset.
#[derive(Debug, Clone, PartialEq)]
pub struct EnvConfig {
    pub webhook_url: Option<String>,
    pub recipient: Option<String>,
    pub timeout: Duration,
    pub policy: ScoringPolicy,
}

impl EnvConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let timeout = match non_blank(TIMEOUT_VAR) {
            Some(raw) => {
                let seconds: u64 =
                    raw.trim()
                        .parse()
                        .map_err(|_| AdoptError::InvalidConfigValueError {
                            field: TIMEOUT_VAR.to_string(),
                            value: raw.clone(),
                            reason: "expected a whole number of seconds".to_string(),
                        })?;
                validate_positive_number(TIMEOUT_VAR, seconds, 1)?;
                Duration::from_secs(seconds)
            }
            None => DEFAULT_TIMEOUT,
        };

        Ok(Self {
            webhook_url: non_blank(WEBHOOK_URL_VAR),
            recipient: non_blank(RECIPIENT_VAR),
            timeout,
            policy: ScoringPolicy::default(),
        })
    }
}

impl ConfigProvider for EnvConfig {
    fn webhook_url(&self) -> Option<&str> {
        self.webhook_url.as_deref()
    }

    fn recipient_identifier(&self) -> Option<&str> {
        self.recipient.as_deref()
    }

    fn request_timeout(&self) -> Duration {
        self.timeout
    }

    fn scoring_policy(&self) -> ScoringPolicy {
        self.policy
    }
}

impl Validate for EnvConfig {
    fn validate(&self) -> Result<()> {
        if let Some(url) = &self.webhook_url {
            validate_url(WEBHOOK_URL_VAR, url)?;
        }
        self.policy.validate()
    }
}
