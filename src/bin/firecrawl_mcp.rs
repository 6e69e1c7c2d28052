use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use firecrawl_search::mcp::{config::McpConfig, server};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".to_string().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = McpConfig::from_env()?;
    tracing::debug!(
        bind = %config.bind,
        firecrawl_url = %config.firecrawl.base_url,
        auth = config.auth_token.is_some(),
        "Loaded configuration"
    );
    server::serve(config).await
}
