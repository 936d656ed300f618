//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use dreams_common::{AppConfig, AppError, JwtService};
use dreams_db::open_database;
use dreams_service::{ServiceContextBuilder, TaskScheduler};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::middleware::apply_middleware;
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let config = state.config();
    let router = apply_middleware(
        create_router(),
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    );

    router.merge(health_routes()).with_state(state)
}

/// Open the document store and build the AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    let db = open_database(&config.storage);

    let jwt_service = Arc::new(JwtService::new(&config.jwt.secret, config.jwt.session_expiry));

    let service_context = ServiceContextBuilder::new()
        .db(db)
        .jwt_service(jwt_service)
        .scheduler(TaskScheduler::new())
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config))
}

/// Run the HTTP server until Ctrl-C or SIGTERM
///
/// Pending timers are cancelled on shutdown. Standup windows stay in the
/// document and are flushed by the next `start` on the same channel; later
/// sends that have not been delivered are dropped.
pub async fn run_server(
    app: Router,
    addr: SocketAddr,
    scheduler: TaskScheduler,
) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    let pending = scheduler.pending();
    if pending > 0 {
        warn!(pending, "Cancelling pending timers");
    }
    scheduler.cancel_all();

    info!("Server stopped");
    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr: SocketAddr = config
        .api
        .address()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid listen address: {e}")))?;

    let state = create_app_state(config).await?;
    let scheduler = state.service_context().scheduler().clone();
    let app = create_app(state);

    run_server(app, addr, scheduler).await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received");
}
