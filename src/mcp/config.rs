use anyhow::Result;

use crate::firecrawl::{FirecrawlConfig, config::non_blank};

const DEFAULT_BIND: &str = "127.0.0.1:8000";

#[derive(Debug, Clone)]
pub struct McpConfig {
    pub bind: String,
    pub auth_token: Option<String>,
    pub firecrawl: FirecrawlConfig,
}

impl McpConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let bind = non_blank(lookup("MCP_BIND")).unwrap_or_else(|| DEFAULT_BIND.to_string());
        let auth_token = non_blank(lookup("MCP_AUTH_TOKEN"));
        let firecrawl = FirecrawlConfig::from_lookup(&lookup)?;

        Ok(Self {
            bind,
            auth_token,
            firecrawl,
        })
    }
}
