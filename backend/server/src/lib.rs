//! Backend of a personal portfolio site.
//!
//!
//!
//! # General Infrastructure
//! - The page is a static document with client-side behavior, served from `STATIC_DIR`
//! - The only dynamic route is the contact relay, which forwards the contact form to email
//! - Each request is independent, nothing is persisted and no state is shared between requests
//!
//!
//!
//! # Routes
//! - `POST /api/contact`: validate `{ name, email, subject, message }`, send one email, answer `{ success, message }`
//! - `GET /health`: liveness check
//! - `GET /`: `index.html` from the static directory, every other path falls through to the same directory
//!
//!
//!
//! # Notes
//!
//! ## Mail provider
//! The send is the only suspending step of a request. It is bounded by `MAIL_TIMEOUT_SECS` so a hung
//! provider cannot pin connections forever. Failures are logged and answered with a generic 500, the
//! provider's error never reaches the client.
//!
//!
//!
//! # Setup
//!
//! Run locally.
//! ```sh
//! GMAIL_USER=me@gmail.com GMAIL_PASS=app-password RUST_LOG=info cargo run -p portfolio-backend
//! ```
//!
//! Send a test submission to the running server.
//! ```sh
//! cargo run -p tester -- --name Jo --email jo@example.com --subject "hi there" --message "hello world!"
//! ```
use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    routing::{get, post},
};

use contact::CONTACT_ENDPOINT;
use signal::{
    ctrl_c,
    unix::{SignalKind, signal},
};
use tokio::{net::TcpListener, signal};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

pub mod config;
pub mod error;
pub mod mailer;
pub mod routes;
pub mod state;
pub mod utils;

use routes::{contact_handler, health_handler};
use state::State;

pub async fn start_server() -> anyhow::Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Initializing state...");
    let state = State::new()?;

    info!("Starting server...");

    let address = format!("0.0.0.0:{}", state.config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await?;
    info!("Portfolio server running on http://localhost:{}", state.config.port);
    info!(
        "Contact form endpoint: http://localhost:{}{CONTACT_ENDPOINT}",
        state.config.port
    );

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutting down portfolio server...");
    Ok(())
}

pub fn app(state: Arc<State>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    let assets = ServeDir::new(&state.config.static_dir);

    Router::new()
        .route(CONTACT_ENDPOINT, post(contact_handler))
        .route("/health", get(health_handler))
        .fallback_service(assets)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal(SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
