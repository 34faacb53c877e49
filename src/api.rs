//! HTTP API endpoints
//!
//! Read-only view of running battles for dashboards and debugging.

use axum::{extract::State, Json};

use crate::types::SessionInfo;
use crate::Gateway;

/// List active battles.
///
/// GET /api/sessions
///
/// Answers are never included.
pub async fn list_sessions(State(gateway): State<Gateway>) -> Json<Vec<SessionInfo>> {
    Json(gateway.state.list_sessions().await)
}
