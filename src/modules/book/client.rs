use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use isbn_kernel::settings::OpenLibrarySettings;

use super::error::LookupError;

/// Outbound HTTP seam. The lookup only needs the body text of a GET.
#[async_trait]
pub trait UpstreamClient: Send + Sync {
    async fn get_text(&self, url: &str) -> Result<String, LookupError>;
}

/// `reqwest`-backed client with the per-request timeout baked in.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: reqwest::Client,
}

impl HttpClient {
    pub fn from_settings(settings: &OpenLibrarySettings) -> anyhow::Result<Self> {
        let inner = reqwest::Client::builder()
            .timeout(Duration::from_millis(settings.timeout_ms))
            .user_agent(settings.user_agent.as_str())
            .build()
            .context("failed to build Open Library HTTP client")?;

        Ok(Self { inner })
    }
}

#[async_trait]
impl UpstreamClient for HttpClient {
    async fn get_text(&self, url: &str) -> Result<String, LookupError> {
        // Upstream status is not inspected; a non-JSON error page fails at parse time.
        let response = self
            .inner
            .get(url)
            .send()
            .await
            .map_err(LookupError::network)?;

        tracing::debug!(status = %response.status(), "upstream responded");

        response.text().await.map_err(LookupError::network)
    }
}
