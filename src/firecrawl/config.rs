use std::fmt;

use anyhow::{Result, bail};

pub const DEFAULT_BASE_URL: &str = "https://api.firecrawl.dev";

#[derive(Clone)]
pub struct FirecrawlConfig {
    pub api_key: String,
    pub base_url: String,
}

impl FirecrawlConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl AsRef<str>) -> Self {
        self.base_url = base_url.as_ref().trim().trim_end_matches('/').to_string();
        self
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from `FIRECRAWL_API_KEY` and the optional
    /// `FIRECRAWL_API_URL`; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let Some(api_key) = non_blank(lookup("FIRECRAWL_API_KEY")) else {
            bail!("FIRECRAWL_API_KEY is required")
        };
        let config = Self::new(api_key);
        Ok(match non_blank(lookup("FIRECRAWL_API_URL")) {
            Some(base_url) => config.with_base_url(base_url),
            None => config,
        })
    }
}

impl fmt::Debug for FirecrawlConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FirecrawlConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
