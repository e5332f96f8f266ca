//! TruthGuard Web Server
//!
//! Axum-based analysis endpoint, liveness check and static front-end.

pub mod error;
pub mod routes;
pub mod state;

use axum::{
    routing::{get, post},
    Router,
};
use std::path::Path;
use tg_core::ServerConfig;
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use state::AppState;

/// Create the application router.
///
/// With `static_dir` set, unmatched requests are served from that directory
/// and fall back to its `index.html`.
pub fn create_router(state: AppState, static_dir: Option<&Path>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route(
            "/analyze",
            post(routes::analyze::analyze).fallback(routes::analyze::method_not_allowed),
        )
        .route("/health", get(routes::health::health))
        .with_state(state);

    let mut app = Router::new().nest("/api", api_routes);

    if let Some(dir) = static_dir {
        let spa = ServeDir::new(dir).fallback(ServeFile::new(dir.join("index.html")));
        app = app.fallback_service(spa);
    }

    app.layer(TraceLayer::new_for_http()).layer(cors)
}

/// Run the web server.
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    let state = AppState::from_config(&config);
    let app = create_router(state, config.static_dir.as_deref());

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Web server listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
