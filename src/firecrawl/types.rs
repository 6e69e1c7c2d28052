use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const NO_TITLE: &str = "No Title";
pub const NO_URL: &str = "No URL";
pub const SUMMARY_PLACEHOLDER: &str = "Full content not scraped (Result is SearchResultWeb).";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CleanedResult {
    pub title: String,
    pub url: String,
    pub markdown: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchRequest {
    pub query: String,
    pub limit: u32,
    #[serde(rename = "scrapeOptions")]
    pub scrape_options: ScrapeOptions,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScrapeOptions {
    pub formats: Vec<String>,
}

impl SearchRequest {
    pub fn markdown(query: &str, limit: u32) -> Self {
        Self {
            query: query.to_string(),
            limit,
            scrape_options: ScrapeOptions {
                formats: vec!["markdown".to_string()],
            },
        }
    }
}

/// Top-level body returned by `/search`. `data` stays loosely typed because
/// its layout differs between API versions; see `mapper::extract_results`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchEnvelope {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub warning: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RawResult {
    Document(DocumentResult),
    Summary(SummaryResult),
}

/// Scraped hit: title and url live in `metadata`, full text in `markdown`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DocumentResult {
    pub metadata: DocumentMetadata,
    #[serde(default)]
    pub markdown: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DocumentMetadata {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, rename = "sourceURL")]
    pub source_url: Option<String>,
}

impl DocumentMetadata {
    pub fn resolved_url(&self) -> Option<&str> {
        self.url
            .as_deref()
            .filter(|value| !value.trim().is_empty())
            .or(self.source_url.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SummaryResult {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}
