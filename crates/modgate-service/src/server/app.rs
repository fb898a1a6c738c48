use crate::models::ServiceConfig;
use crate::server::routes;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

/// Build the Axum application over existing state
pub fn build_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health
        .route("/health", get(routes::health))
        // Configuration
        .route("/config", get(routes::get_config))
        // Policies
        .route("/policies", get(routes::list_policies))
        .route("/policies/reload", post(routes::reload_policies))
        // Blacklist
        .route(
            "/blacklist",
            get(routes::list_blacklist)
                .post(routes::add_blacklist_keyword)
                .delete(routes::remove_blacklist_keyword),
        )
        // Content
        .route("/content/submit", post(routes::submit_content))
        .route("/content/:id", get(routes::get_content))
        // Review
        .route("/review/queue", get(routes::get_review_queue))
        .route("/review/:id", post(routes::review_content))
        .layer(cors)
        .with_state(state)
}

/// Build state from configuration, loading policies when a path is set
pub fn build_state(config: ServiceConfig) -> anyhow::Result<AppState> {
    let state = AppState::new(config.clone());
    if let Some(path) = &config.policy_path {
        state.engine.load_from_file(path)?;
    }
    Ok(state)
}

/// Run the server
pub async fn run_server(config: ServiceConfig, addr: SocketAddr) -> anyhow::Result<()> {
    let state = build_state(config)?;
    let app = build_app(state);

    info!("Starting modgate server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
