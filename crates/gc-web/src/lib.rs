//! Ground Control Web Server
//!
//! Axum-based server exposing the graph over HTTP.

pub mod graphql;
pub mod routes;
pub mod state;

use std::sync::Arc;

use anyhow::Context as _;
use axum::{routing::get, Router};
use gc_core::AppContext;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/graphql",
            get(routes::graphql::graphiql).post(routes::graphql::graphql_handler),
        )
        .route("/schema.graphql", get(routes::graphql::schema_sdl))
        .route("/health", get(routes::health::health))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

/// Run the web server.
pub async fn run_server(ctx: Arc<AppContext>, host: &str, port: u16) -> anyhow::Result<()> {
    let state = AppState::new(ctx);
    let app = create_router(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("GraphQL server listening on http://{}/graphql", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
