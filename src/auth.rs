//! Bearer-token authentication for bridge connections

use axum::{
    body::Body,
    extract::{Query, State},
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use std::sync::Arc;

/// Authentication configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Shared secret bridges must present (None = auth disabled)
    pub bridge_token: Option<String>,
}

impl AuthConfig {
    /// Load auth config from environment variables
    pub fn from_env() -> Self {
        let bridge_token = std::env::var("BRIDGE_TOKEN")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        if bridge_token.is_some() {
            tracing::info!("Bridge authentication enabled");
        } else {
            tracing::warn!("Bridge authentication DISABLED - anyone can drive the bot!");
        }
        Self { bridge_token }
    }

    /// Check if authentication is enabled
    pub fn is_enabled(&self) -> bool {
        self.bridge_token.is_some()
    }

    /// Validate a presented token
    pub fn validate(&self, presented: &str) -> bool {
        match &self.bridge_token {
            Some(expected) => constant_time_eq(expected.as_bytes(), presented.as_bytes()),
            None => true,
        }
    }
}

/// Constant-time byte comparison to prevent timing attacks
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}

#[derive(Debug, Deserialize)]
struct TokenQuery {
    token: Option<String>,
}

/// Token from `Authorization: Bearer …`, falling back to `?token=`
fn presented_token(request: &Request<Body>) -> Option<String> {
    let bearer = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "));
    if let Some(token) = bearer {
        return Some(token.to_string());
    }

    Query::<TokenQuery>::try_from_uri(request.uri())
        .ok()
        .and_then(|Query(query)| query.token)
}

/// Middleware requiring the bridge token on gateway routes
pub async fn bridge_auth_middleware(
    State(auth_config): State<Arc<AuthConfig>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if !auth_config.is_enabled() {
        return next.run(request).await;
    }

    let authorized = presented_token(&request).is_some_and(|token| auth_config.validate(&token));
    if authorized {
        return next.run(request).await;
    }

    tracing::warn!(
        "Rejected unauthenticated bridge request to {}",
        request.uri().path()
    );
    (
        StatusCode::UNAUTHORIZED,
        [(header::WWW_AUTHENTICATE, "Bearer")],
        "Unauthorized",
    )
        .into_response()
}
