//! HTTP service behind the birthday greeting pages.
//!
//! # Endpoints
//! - `POST /api/greetings` multipart form with `recipientName`, `recipientAge`
//!   and 2 to 12 `photos`; responds with the stored greeting
//! - `GET /api/greetings/{id}` the greeting, or 404
//! - `GET /uploads/{file}` stored photos
//!
//! When `static_dir` is configured the built client is served as well, with
//! unknown paths answered by its `index.html` so `/wish/{id}` links work on
//! a fresh load.
//!
//! # Running
//! ```sh
//! RUST_LOG=info PORT=5000 cargo run -p greeting-server
//! ```

use std::{sync::Arc, time::Duration};

use axum::{
    extract::DefaultBodyLimit,
    http::{header::CONTENT_TYPE, Method},
    routing::{get, post},
    Router,
};
use greeting_core::validation::{MAX_PHOTOS, MAX_PHOTO_BYTES};
use log::{error, info};
use tokio::{net::TcpListener, signal::ctrl_c};
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
};

pub mod config;
pub mod database;
pub mod error;
pub mod routes;
pub mod state;
pub mod store;
pub mod upload;

use config::Config;
use error::AppError;
use routes::{create_greeting_handler, get_greeting_handler};
use state::AppState;

/// Every photo at its size limit plus room for the text fields and framing
const MAX_BODY_BYTES: usize = MAX_PHOTOS * MAX_PHOTO_BYTES + 1024 * 1024;

pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    let app = Router::new()
        .route("/api/greetings", post(create_greeting_handler))
        .route("/api/greetings/{id}", get(get_greeting_handler))
        .nest_service("/uploads", ServeDir::new(state.photos.dir()))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(cors)
        .with_state(state.clone());

    match &state.config.static_dir {
        Some(dir) => {
            info!("Serving client from {}", dir.display());
            let index = ServeFile::new(dir.join("index.html"));
            app.fallback_service(ServeDir::new(dir).fallback(index))
        }
        None => app,
    }
}

pub async fn start_server(config: Config) -> Result<(), AppError> {
    info!("Initializing state...");
    let state = AppState::new(config).await?;

    let address = state.config.address();
    info!("Binding to {address}");
    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
