//! Great-circle distance service.
//!
//! Run the server with
//! ```not_rust
//! cargo run
//! ```
//!
//! and query it with
//! ```not_rust
//! curl "http://localhost:4000/distance?lat1=50.45&lon1=30.52&lat2=49.84&lon2=24.03"
//! ```

mod config;
mod models;
mod handlers;

use axum::{routing::get, Router, Server};
use tower_http::trace::{DefaultMakeSpan, TraceLayer};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use crate::config::CONFIG;
use crate::handlers::distance::distance_handler;
use crate::models::error::ErrorWithMessage;

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "distance_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run().await {
        error!("{}", e);
        std::process::exit(1);
    }
}

pub fn app() -> Router {
    Router::new()
        .route("/distance", get(distance_handler))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
}

async fn run() -> Result<(), ErrorWithMessage> {
    let config = CONFIG.as_ref().map_err(|e| ErrorWithMessage::new(e.to_string()))?;
    let addr = config.socket_addr()?;

    let server = Server::try_bind(&addr)
        .map_err(|e| ErrorWithMessage::new(format!("Unable to bind {}: {}", addr, e)))?;

    info!("Starting server on http://{}:{}", config.host, config.port);
    server
        .serve(app().into_make_service())
        .await
        .map_err(|e| ErrorWithMessage::new(format!("Server error: {}", e)))
}
