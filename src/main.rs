use axum::{middleware, routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wordbattle::{
    announce::BroadcastAnnouncer, api, auth, config::GameConfig, dispatch, state::AppState,
    words::WordList, ws, Gateway,
};

#[tokio::main]
async fn main() {
    // Load .env file if present (before any env var reads)
    if let Err(e) = dotenvy::dotenv() {
        if !matches!(e, dotenvy::Error::Io(_)) {
            eprintln!("Warning: Failed to load .env file: {}", e);
        }
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wordbattle=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Word Battle...");

    let config = GameConfig::from_env();
    let auth_config = Arc::new(auth::AuthConfig::from_env());

    let words = match &config.dictionary_path {
        Some(path) => WordList::from_file(path),
        None => WordList::builtin(),
    };
    let words = match words {
        Ok(words) => {
            tracing::info!("Loaded {} playable words", words.len());
            words
        }
        Err(e) => {
            tracing::error!("Cannot start without a dictionary: {}", e);
            std::process::exit(1);
        }
    };

    let bridge = BroadcastAnnouncer::new(256);
    let port = config.port;
    let state = Arc::new(AppState::new(config, words, Arc::new(bridge.clone())));

    // Fired round timeouts and auto-starts come back through here
    dispatch::spawn_timer_dispatcher(state.clone());

    let gateway = Gateway { state, bridge };

    let app = Router::new()
        .route("/ws", get(ws::ws_handler))
        .route("/api/sessions", get(api::list_sessions))
        .layer(middleware::from_fn_with_state(
            auth_config,
            auth::bridge_auth_middleware,
        ))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(gateway);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on http://{}", addr);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server error: {}", e);
    }
}
