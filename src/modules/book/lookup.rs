use std::sync::Arc;

use serde_json::Value;

use super::client::UpstreamClient;
use super::error::LookupError;
use super::models::{BookRecord, EditionData};

/// Response key Open Library uses for an ISBN bibkey.
pub fn bibkey(isbn: &str) -> String {
    format!("ISBN:{}", isbn)
}

/// Resolves an ISBN into a [`BookRecord`] with one upstream request.
///
/// Holds no per-request state; cloning shares the underlying client.
#[derive(Clone)]
pub struct BookLookup {
    client: Arc<dyn UpstreamClient>,
    base_url: String,
}

impl BookLookup {
    pub fn new(client: Arc<dyn UpstreamClient>, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The ISBN is interpolated verbatim; no normalisation or validation.
    pub fn upstream_url(&self, isbn: &str) -> String {
        format!(
            "{}?bibkeys={}&format=json&jscmd=data",
            self.base_url,
            bibkey(isbn)
        )
    }

    pub async fn lookup(&self, isbn: &str) -> Result<BookRecord, LookupError> {
        let url = self.upstream_url(isbn);
        tracing::info!(isbn, "looking up book");
        tracing::debug!(%url, "requesting upstream");

        let result = self.fetch(&url, isbn).await;
        if let Err(err) = &result {
            if !err.is_not_found() {
                tracing::warn!(isbn, error = %err, "book lookup failed");
            }
        }
        result
    }

    async fn fetch(&self, url: &str, isbn: &str) -> Result<BookRecord, LookupError> {
        let body = self.client.get_text(url).await?;
        let data: Value = serde_json::from_str(&body).map_err(LookupError::Parse)?;

        let entry = match data {
            Value::Object(mut map) => map.remove(&bibkey(isbn)),
            _ => None,
        }
        .ok_or(LookupError::NotFound)?;

        let edition: EditionData = serde_json::from_value(entry).map_err(LookupError::Shape)?;
        Ok(BookRecord::from(edition))
    }
}
