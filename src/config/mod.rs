#[cfg(feature = "cli")]
pub mod cli;
pub mod env_config;
pub mod toml_config;

use crate::core::scoring::ScoringPolicy;
use crate::core::ConfigProvider;
use std::time::Duration;

#[cfg(feature = "cli")]
pub use cli::CliConfig;

/// Layers command-line overrides on top of another configuration source.
#[derive(Debug, Clone)]
pub struct WithOverrides<'a, C: ConfigProvider> {
    base: &'a C,
    webhook_url: Option<String>,
    recipient: Option<String>,
}

impl<'a, C: ConfigProvider> WithOverrides<'a, C> {
    pub fn new(base: &'a C, webhook_url: Option<String>, recipient: Option<String>) -> Self {
        Self {
            base,
            webhook_url,
            recipient,
        }
    }
}

impl<C: ConfigProvider> ConfigProvider for WithOverrides<'_, C> {
    fn webhook_url(&self) -> Option<&str> {
        self.webhook_url
            .as_deref()
            .or_else(|| self.base.webhook_url())
    }

    fn recipient_identifier(&self) -> Option<&str> {
        self.recipient
            .as_deref()
            .or_else(|| self.base.recipient_identifier())
    }

    fn request_timeout(&self) -> Duration {
        self.base.request_timeout()
    }

    fn scoring_policy(&self) -> ScoringPolicy {
        self.base.scoring_policy()
    }
}
