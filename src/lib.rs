// Public API for integration tests and potential library usage

pub mod announce;
pub mod api;
pub mod auth;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod protocol;
pub mod scheduler;
pub mod state;
pub mod types;
pub mod words;
pub mod ws;

use std::sync::Arc;

/// Router state shared by the bridge gateway routes
#[derive(Clone)]
pub struct Gateway {
    pub state: Arc<state::AppState>,
    pub bridge: announce::BroadcastAnnouncer,
}
