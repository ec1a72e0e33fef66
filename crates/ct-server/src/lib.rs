//! ct-server - HTTP front end for comment-thread
//!
//! Serves a post's comment thread as a root/reply forest and accepts new
//! comments.
//!
//! # Routes
//! - `GET /health`
//! - `GET /posts/{post_id}/comments` returns `{"comments": [...], "summary": {...}}`
//! - `POST /posts/{post_id}/comments` takes `{"parent_id", "author", "text"}`
//!
//! Errors come back as `{"error": "..."}` with status 400 for bad input
//! and 500 when the store fails.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{header::CONTENT_TYPE, Method},
    routing::get,
    Router,
};
use ct_core::config::Config;
use ct_core::store::CommentStore;
use tokio::{net::TcpListener, signal};
use tower_http::cors::CorsLayer;
use tracing::{error, info};

pub mod error;
pub mod routes;
pub mod state;

use routes::{create_comment_handler, get_comments_handler, health_handler};
use state::AppState;

/// Build the application router
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/posts/{post_id}/comments",
            get(get_comments_handler).post(create_comment_handler),
        )
        .layer(cors)
        .with_state(state)
}

/// Bind and serve until Ctrl+C or SIGTERM
pub async fn start_server(store: Arc<dyn CommentStore>, config: Config) -> ct_core::Result<()> {
    let address = config.server.address();
    let state = AppState::new(store, &config);
    let app = router(state);

    info!("Binding to {address}");
    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal as unix_signal, SignalKind};

        match unix_signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
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
