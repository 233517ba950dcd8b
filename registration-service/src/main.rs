use registration_service::{
    AppState, build_router,
    config::RegistrationConfig,
    services::{BackendClient, RegistrationService, SupabaseClient},
};
use service_core::middleware::rate_limit::create_ip_rate_limiter;
use service_core::observability::logging::{ServiceIdentity, init_tracing};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;

#[tokio::main]
async fn main() -> Result<(), service_core::error::AppError> {
    // Load configuration - fail fast if invalid
    let config = RegistrationConfig::from_env()?;

    init_tracing(
        &ServiceIdentity {
            name: &config.service_name,
            version: &config.service_version,
            environment: config.environment.as_str(),
        },
        &config.log_level,
        &config.otlp_endpoint,
    )?;

    registration_service::services::metrics::init_metrics();

    tracing::info!(
        service = %config.service_name,
        version = %config.service_version,
        environment = ?config.environment,
        "Starting registration service"
    );

    // Initialize the backend client
    let backend: Arc<dyn BackendClient> = Arc::new(SupabaseClient::new(&config.backend)?);
    tracing::info!(url = %config.backend.url, "Backend client initialized");

    let registration = RegistrationService::new(backend.clone());

    // Initialize rate limiters using shared logic
    let register_rate_limiter = create_ip_rate_limiter(
        config.rate_limit.register_attempts,
        config.rate_limit.register_window_seconds,
    );
    let ip_rate_limiter = create_ip_rate_limiter(
        config.rate_limit.global_ip_limit,
        config.rate_limit.global_ip_window_seconds,
    );
    tracing::info!("Rate limiters initialized: Register and Global IP");

    // Create application state
    let state = AppState {
        config: config.clone(),
        backend,
        registration,
        register_rate_limiter,
        ip_rate_limiter,
    };

    // Build application router
    let app = build_router(state).await?;

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));

    let service_span = tracing::info_span!(
        "service",
        service = %config.service_name,
        version = %config.service_version,
        environment = ?config.environment,
    );
    let _guard = service_span.enter();

    tracing::info!(address = %addr, "Listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;

    service_core::axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Service shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received SIGINT, starting graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        },
    }

    // Give in-flight requests a moment to complete
    tokio::time::sleep(tokio::time::Duration::from_secs(5)).await;
}
