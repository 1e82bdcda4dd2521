//! Industrial Catalog Server
//!
//! HTTP backend for the company website: the product catalog and the
//! contact-inquiry intake. Runs against SQLite, an in-memory store, or with
//! no store at all, in which case the built-in sample catalog is served.

mod error;
mod handlers;
mod services;
mod settings;
mod storage;

use anyhow::{Context, Result};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use services::{CatalogService, Diagnostics, InquiryIntake};
use settings::Settings;
use storage::DocumentStore;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogService>,
    pub intake: Arc<InquiryIntake>,
    pub diagnostics: Arc<Diagnostics>,
}

impl AppState {
    /// Wire every service to the same store; `None` selects fallback mode
    pub fn new(store: Option<Arc<dyn DocumentStore>>, url_configured: bool) -> Self {
        Self {
            catalog: Arc::new(CatalogService::new(store.clone())),
            intake: Arc::new(InquiryIntake::new(store.clone())),
            diagnostics: Arc::new(Diagnostics::new(store, url_configured)),
        }
    }
}

#[tokio::main]
async fn main() {
    std::panic::set_hook(Box::new(|info| {
        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()));
        let payload = if let Some(s) = info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };
        eprintln!("[PANIC] at {:?}: {}", location, payload);
        tracing::error!("PANIC at {:?}: {}", location, payload);
    }));

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("catalog_server=info,tower_http=info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("[FATAL] Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    info!("Starting Catalog Server v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run_server().await {
        error!("Server failed: {:#}", e);
        std::process::exit(1);
    }
}

async fn run_server() -> Result<()> {
    let settings = Settings::from_env().context("Failed to load configuration")?;

    let store = open_store(settings.database_url.as_deref()).await;
    let state = AppState::new(store, settings.database_url.is_some());
    if state.catalog.is_fallback() {
        warn!("No document store, serving the built-in sample catalog");
    }
    let app = build_router(state);

    let addr = settings.bind_address().await?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

/// Open the configured store; any failure leaves the server in fallback mode
async fn open_store(url: Option<&str>) -> Option<Arc<dyn DocumentStore>> {
    let Some(url) = url else {
        info!("DATABASE_URL not set");
        return None;
    };

    match storage::connect(url).await {
        Ok(store) => {
            info!("Document store ready: {}", store.name());
            Some(store)
        }
        Err(e) => {
            error!("Failed to open document store: {:#}", e);
            None
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::health::root))
        .route("/test", get(handlers::health::diagnostics))
        .route("/products", get(handlers::products::list))
        .route("/products/:slug", get(handlers::products::get))
        .route("/contact", post(handlers::inquiries::submit))
        .route("/submit-inquiry", post(handlers::inquiries::submit))
        .layer(
            CorsLayer::new()
                .allow_origin(AllowOrigin::mirror_request())
                .allow_methods(AllowMethods::mirror_request())
                .allow_headers(AllowHeaders::mirror_request())
                .allow_credentials(true),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Resolves on SIGINT, or SIGTERM on Unix
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to register SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
