//! Webhook delivery for announcement embeds.

use url::Url;

use crate::embed::Embed;
use crate::error::NotifyError;

const DELIVERY_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(10);

/// Where announcement embeds go. The daemon treats delivery as
/// best-effort: a failed post is logged, never retried, and never
/// stalls the seeding loop.
pub trait NotifySink {
    /// Whether any destination is configured. When this is false the
    /// daemon skips building embeds entirely.
    fn is_configured(&self) -> bool;

    async fn post(&self, embed: &Embed) -> Result<(), NotifyError>;
}

/// Posts embeds to a set of Discord-compatible webhook URLs.
pub struct WebhookSink {
    http: reqwest::Client,
    urls: Vec<Url>,
}

impl WebhookSink {
    pub fn new(urls: Vec<Url>) -> Result<Self, NotifyError> {
        let http = reqwest::Client::builder()
            .timeout(DELIVERY_TIMEOUT)
            .build()
            .map_err(NotifyError::Client)?;
        Ok(Self { http, urls })
    }
}

impl NotifySink for WebhookSink {
    fn is_configured(&self) -> bool {
        !self.urls.is_empty()
    }

    async fn post(&self, embed: &Embed) -> Result<(), NotifyError> {
        let payload = serde_json::json!({ "embeds": [embed] });
        let mut failed = 0usize;

        for url in &self.urls {
            match self.http.post(url.clone()).json(&payload).send().await {
                Ok(response) if response.status().is_success() => {}
                Ok(response) => {
                    failed += 1;
                    tracing::warn!(
                        %url,
                        status = %response.status(),
                        "webhook rejected announcement"
                    );
                }
                Err(error) => {
                    failed += 1;
                    tracing::warn!(%url, %error, "webhook delivery failed");
                }
            }
        }

        if failed > 0 {
            return Err(NotifyError::Delivery {
                failed,
                total: self.urls.len(),
            });
        }
        Ok(())
    }
}
