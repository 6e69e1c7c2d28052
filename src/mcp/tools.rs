use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::firecrawl::{CleanedResult, FirecrawlClient, SearchError};

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct WebSearchParams {
    /// Free-text search query.
    pub query: String,
}

/// Tool output. `error` carries a human-readable reason whenever `results`
/// is empty for a known cause; `success` is false only for real failures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WebSearchResponse {
    pub query: String,
    pub success: bool,
    pub results: Vec<CleanedResult>,
    pub error: Option<String>,
}

impl WebSearchResponse {
    fn from_outcome(query: String, outcome: Result<Vec<CleanedResult>, SearchError>) -> Self {
        match outcome {
            Ok(results) => Self {
                query,
                success: true,
                results,
                error: None,
            },
            Err(err) => Self {
                query,
                success: err.is_empty_outcome(),
                results: Vec::new(),
                error: Some(err.to_string()),
            },
        }
    }
}

#[derive(Clone)]
pub struct WebSearchTools {
    client: FirecrawlClient,
    tool_router: ToolRouter<Self>,
}

impl WebSearchTools {
    pub fn new(client: FirecrawlClient) -> Self {
        Self {
            client,
            tool_router: Self::tool_router(),
        }
    }

    async fn run_web_search(&self, query: String) -> WebSearchResponse {
        let trimmed = query.trim().to_string();
        if trimmed.is_empty() {
            return WebSearchResponse {
                query: trimmed,
                success: false,
                results: Vec::new(),
                error: Some("query must not be empty".to_string()),
            };
        }

        let outcome = self.client.search_and_clean(&trimmed).await;
        if let Err(err) = &outcome {
            if !err.is_empty_outcome() {
                warn!(query = %trimmed, error = %err, "Web search failed");
            }
        }
        WebSearchResponse::from_outcome(trimmed, outcome)
    }

    fn response_to_result(response: WebSearchResponse) -> CallToolResult {
        match serde_json::to_value(&response) {
            Ok(value) => CallToolResult::structured(value),
            Err(err) => {
                let fallback = serde_json::json!({
                    "query": response.query,
                    "success": false,
                    "results": [],
                    "error": response
                        .error
                        .unwrap_or_else(|| format!("structured serialization failed: {err}")),
                });
                CallToolResult::success(vec![Content::text(fallback.to_string())])
            }
        }
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for WebSearchTools {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "Web search backed by Firecrawl. The web_search tool returns up to 5 results \
                 with title, url and cleaned markdown content."
                    .to_string(),
            ),
            ..Default::default()
        }
    }
}

#[tool_router]
impl WebSearchTools {
    #[tool(
        name = "web_search",
        description = "Web Search Tool. Searches the web for the query and returns up to 5 results, each with a title, a url and the page content as markdown with links and URLs stripped. Cite the url of any result you use."
    )]
    async fn web_search(
        &self,
        params: Parameters<WebSearchParams>,
    ) -> Result<CallToolResult, McpError> {
        let response = self.run_web_search(params.0.query).await;
        Ok(Self::response_to_result(response))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path},
    };

    use super::*;
    use crate::firecrawl::FirecrawlConfig;

    fn tools_for(server: &MockServer) -> WebSearchTools {
        let config = FirecrawlConfig::new("fc-test").with_base_url(server.uri());
        WebSearchTools::new(FirecrawlClient::new(config))
    }

    #[tokio::test]
    async fn blank_query_is_rejected_without_calling_provider() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&server)
            .await;

        let response = tools_for(&server).run_web_search("   ".to_string()).await;
        assert!(!response.success);
        assert_eq!(response.error.as_deref(), Some("query must not be empty"));
    }

    #[tokio::test]
    async fn results_are_returned_for_trimmed_query() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v2/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": {"web": [{"title": "Rust", "url": "https://www.rust-lang.org"}]},
            })))
            .mount(&server)
            .await;

        let response = tools_for(&server)
            .run_web_search("  rust  ".to_string())
            .await;
        assert_eq!(response.query, "rust");
        assert!(response.success);
        assert_eq!(response.error, None);
        assert_eq!(response.results.len(), 1);
        assert_eq!(response.results[0].url, "https://www.rust-lang.org");
    }

    #[tokio::test]
    async fn empty_outcome_is_successful_with_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"success": true, "data": {"web": []}})),
            )
            .mount(&server)
            .await;

        let response = tools_for(&server).run_web_search("nothing".to_string()).await;
        assert!(response.success);
        assert!(response.results.is_empty());
        assert_eq!(
            response.error.as_deref(),
            Some("Search completed, but the extracted list of results was empty.")
        );
    }

    #[tokio::test]
    async fn provider_failure_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
            .mount(&server)
            .await;

        let response = tools_for(&server).run_web_search("rust".to_string()).await;
        assert!(!response.success);
        let error = response.error.unwrap();
        assert!(error.starts_with("Error during Firecrawl search:"));
        assert!(error.contains("Unauthorized"));
    }

    #[test]
    fn structured_result_carries_the_response() {
        let response = WebSearchResponse {
            query: "q".to_string(),
            success: true,
            results: Vec::new(),
            error: None,
        };
        let result = WebSearchTools::response_to_result(response);
        let structured = result.structured_content.unwrap();
        assert_eq!(structured["query"], "q");
        assert_eq!(structured["success"], true);
    }
}
