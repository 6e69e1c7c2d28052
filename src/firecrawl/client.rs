use reqwest::Client;
use tracing::{debug, info, warn};

use super::{
    config::FirecrawlConfig,
    error::SearchError,
    mapper::{extract_results, map_results},
    types::{CleanedResult, SearchEnvelope, SearchRequest},
};

/// Number of hits requested per search.
pub const DEFAULT_LIMIT: u32 = 5;

#[derive(Clone)]
pub struct FirecrawlClient {
    config: FirecrawlConfig,
    http: Client,
}

impl FirecrawlClient {
    pub fn new(config: FirecrawlConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    pub async fn search(&self, query: &str, limit: u32) -> Result<SearchEnvelope, SearchError> {
        let endpoint = format!("{}/v2/search", self.config.base_url);
        let request = SearchRequest::markdown(query, limit);

        debug!(query = %query, limit, endpoint = %endpoint, "Sending search request to Firecrawl");

        let response = self
            .http
            .post(&endpoint)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::Provider(format!(
                "status {}: {}",
                status.as_u16(),
                body.trim()
            )));
        }

        let envelope = response.json::<SearchEnvelope>().await?;
        if envelope.success == Some(false) {
            let reason = envelope
                .error
                .unwrap_or_else(|| "request was not successful".to_string());
            return Err(SearchError::Provider(reason));
        }
        if let Some(warning) = &envelope.warning {
            warn!(query = %query, warning = %warning, "Firecrawl returned a warning");
        }

        Ok(envelope)
    }

    /// Searches for `query` and returns every classifiable hit, cleaned, in
    /// provider order. `Ok` may hold an empty list when every hit was skipped.
    pub async fn search_and_clean(&self, query: &str) -> Result<Vec<CleanedResult>, SearchError> {
        let envelope = self.search(query, DEFAULT_LIMIT).await?;
        let raw_results = extract_results(envelope)?;
        let returned = raw_results.len();
        let cleaned = map_results(raw_results);

        info!(
            query = %query,
            returned,
            kept = cleaned.len(),
            "Firecrawl search completed"
        );

        Ok(cleaned)
    }
}
