use crate::adapters::http::ReqwestTransport;
use crate::domain::model::{SubmissionOutcome, SubmissionRecord};
use crate::domain::ports::{ConfigProvider, WebhookTransport};
use crate::utils::error::Result;
use crate::utils::validation::validate_url;

/// Sends one summary record to the configured webhook, at most once.
pub struct Submitter<T: WebhookTransport> {
    transport: T,
    endpoint: Option<String>,
}

impl Submitter<ReqwestTransport> {
    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let transport = ReqwestTransport::with_timeout(config.request_timeout())?;
        Ok(Self::new(transport, config.webhook_url().map(str::to_string)))
    }
}

impl<T: WebhookTransport> Submitter<T> {
    pub fn new(transport: T, endpoint: Option<String>) -> Self {
        let endpoint = endpoint.filter(|url| !url.trim().is_empty());
        Self {
            transport,
            endpoint,
        }
    }

    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    pub async fn submit(&self, record: &SubmissionRecord) -> SubmissionOutcome {
        let Some(endpoint) = self.endpoint.as_deref() else {
            tracing::info!("No webhook configured, skipping submission");
            return SubmissionOutcome::endpoint_unset();
        };

        if let Err(e) = validate_url("webhook_url", endpoint) {
            tracing::warn!("Webhook URL rejected: {}", e);
            return SubmissionOutcome::transport_failed(e);
        }

        let body = match serde_json::to_value(record) {
            Ok(body) => body,
            Err(e) => return SubmissionOutcome::transport_failed(e),
        };

        tracing::debug!("Posting submission record to: {}", endpoint);
        match self.transport.post_json(endpoint, &body).await {
            Ok(status) if (200..=299).contains(&status) => {
                tracing::info!("Submission delivered (HTTP {})", status);
                SubmissionOutcome::delivered(status)
            }
            Ok(status) => {
                tracing::warn!("Webhook answered HTTP {}", status);
                SubmissionOutcome::rejected(status)
            }
            Err(e) => {
                tracing::warn!("Webhook request failed: {}", e);
                SubmissionOutcome::transport_failed(e)
            }
        }
    }
}
