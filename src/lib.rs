//! Firecrawl web search that hands back cleaned, agent-friendly results.
//!
//! - `firecrawl`: API client, envelope unwrapping and text cleaning
//! - `mcp`: the `web_search` tool served over streamable HTTP

pub mod firecrawl;
pub mod mcp;
