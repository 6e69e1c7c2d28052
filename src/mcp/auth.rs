use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, Request, StatusCode, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};
use tracing::warn;

/// Optional shared bearer token guarding the `/mcp` endpoint.
#[derive(Clone, Debug)]
pub struct BearerAuth {
    token: Option<String>,
}

impl BearerAuth {
    pub fn new(token: Option<String>) -> Self {
        Self { token }
    }

    pub fn enabled(&self) -> bool {
        self.token.is_some()
    }

    pub fn authorize(&self, headers: &HeaderMap) -> bool {
        let Some(expected) = &self.token else {
            return true;
        };
        bearer_token(headers).is_some_and(|presented| presented == expected.as_str())
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
}

pub async fn require_bearer(
    State(auth): State<Arc<BearerAuth>>,
    headers: HeaderMap,
    request: Request<axum::body::Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    if auth.authorize(&headers) {
        Ok(next.run(request).await)
    } else {
        warn!(path = %request.uri().path(), "Rejected MCP request with missing or invalid token");
        Err(StatusCode::UNAUTHORIZED)
    }
}
