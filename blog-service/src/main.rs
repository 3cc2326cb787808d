use blog_service::config::{BlogConfig, SERVICE_NAME};
use blog_service::services::init_metrics;
use blog_service::startup::Application;
use service_core::observability::init_tracing;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let config = BlogConfig::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::io::Error::other(format!("Configuration error: {}", e))
    })?;

    init_tracing(SERVICE_NAME, &config.log_level, config.otlp_endpoint.as_deref());

    // Must be installed before any metrics are recorded.
    init_metrics().map_err(|e| {
        tracing::error!("Failed to initialize metrics: {}", e);
        std::io::Error::other(format!("Metrics error: {}", e))
    })?;

    let service_span = tracing::info_span!(
        "service",
        service = SERVICE_NAME,
        version = env!("CARGO_PKG_VERSION"),
        environment = ?config.environment,
        store = ?config.store.backend,
    );
    let _guard = service_span.enter();

    let app = Application::build(config).await.map_err(|e| {
        tracing::error!("Failed to build application: {}", e);
        std::io::Error::other(format!("Startup error: {}", e))
    })?;

    app.run_until_stopped().await?;

    tracing::info!("Service shutdown complete");
    Ok(())
}
