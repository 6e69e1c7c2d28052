use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{Router, middleware, routing::get};
use rmcp::transport::streamable_http_server::{
    StreamableHttpServerConfig, StreamableHttpService, session::local::LocalSessionManager,
};
use tokio_util::sync::CancellationToken;

use super::{
    auth::{BearerAuth, require_bearer},
    config::McpConfig,
    tools::WebSearchTools,
};
use crate::firecrawl::FirecrawlClient;

async fn health_check() -> &'static str {
    "OK"
}

pub fn router(client: FirecrawlClient, auth: BearerAuth, ct: &CancellationToken) -> Router {
    let auth = Arc::new(auth);

    let mcp_service: StreamableHttpService<WebSearchTools, LocalSessionManager> =
        StreamableHttpService::new(
            move || Ok(WebSearchTools::new(client.clone())),
            LocalSessionManager::default().into(),
            StreamableHttpServerConfig {
                cancellation_token: ct.child_token(),
                ..Default::default()
            },
        );

    let mut mcp_router = Router::new().nest_service("/mcp", mcp_service);
    if auth.enabled() {
        mcp_router = mcp_router.layer(middleware::from_fn_with_state(auth, require_bearer));
    }

    Router::new()
        .route("/health", get(health_check))
        .merge(mcp_router)
}

pub async fn serve(config: McpConfig) -> Result<()> {
    let auth = BearerAuth::new(config.auth_token);
    if !auth.enabled() {
        tracing::warn!("MCP_AUTH_TOKEN is not set, /mcp is unauthenticated");
    }
    let client = FirecrawlClient::new(config.firecrawl);
    let ct = CancellationToken::new();
    let app = router(client, auth, &ct);

    let listener = tokio::net::TcpListener::bind(&config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;
    tracing::info!("MCP server listening on {}", config.bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            tokio::signal::ctrl_c().await.ok();
            ct.cancel();
        })
        .await
        .context("MCP server terminated with an error")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;

    use super::*;
    use crate::firecrawl::FirecrawlConfig;

    async fn spawn_app(token: Option<&str>) -> (String, CancellationToken) {
        let client = FirecrawlClient::new(FirecrawlConfig::new("fc-test"));
        let ct = CancellationToken::new();
        let app = router(client, BearerAuth::new(token.map(str::to_string)), &ct);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let shutdown = ct.clone();
        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move { shutdown.cancelled().await })
                .await
                .ok();
        });
        (format!("http://{addr}"), ct)
    }

    async fn post_mcp(base: &str, bearer: Option<&str>) -> StatusCode {
        let mut request = reqwest::Client::new()
            .post(format!("{base}/mcp"))
            .header("Accept", "application/json, text/event-stream")
            .json(&serde_json::json!({"jsonrpc": "2.0", "id": 1, "method": "ping"}));
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }
        request.send().await.unwrap().status()
    }

    #[tokio::test]
    async fn health_is_open_when_auth_is_enabled() {
        let (base, ct) = spawn_app(Some("s3cret")).await;

        let response = reqwest::get(format!("{base}/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.text().await.unwrap(), "OK");
        ct.cancel();
    }

    #[tokio::test]
    async fn mcp_requires_the_configured_token() {
        let (base, ct) = spawn_app(Some("s3cret")).await;

        assert_eq!(post_mcp(&base, None).await, StatusCode::UNAUTHORIZED);
        assert_eq!(post_mcp(&base, Some("wrong")).await, StatusCode::UNAUTHORIZED);
        assert_ne!(post_mcp(&base, Some("s3cret")).await, StatusCode::UNAUTHORIZED);
        ct.cancel();
    }

    #[tokio::test]
    async fn mcp_is_open_without_a_token() {
        let (base, ct) = spawn_app(None).await;

        assert_ne!(post_mcp(&base, None).await, StatusCode::UNAUTHORIZED);
        ct.cancel();
    }
}
