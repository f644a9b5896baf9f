use crate::core::scoring::ScoringPolicy;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Outbound HTTP seam used by the submitter. Returns the response status
/// code; transport-level failures come back as `Err`.
#[async_trait]
pub trait WebhookTransport: Send + Sync {
    async fn post_json(&self, url: &str, body: &serde_json::Value) -> Result<u16>;
}

pub trait ConfigProvider: Send + Sync {
    fn webhook_url(&self) -> Option<&str>;
    fn recipient_identifier(&self) -> Option<&str>;
    fn request_timeout(&self) -> Duration;
    fn scoring_policy(&self) -> ScoringPolicy;
}
