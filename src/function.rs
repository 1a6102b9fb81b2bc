use std::sync::Arc;

use instance_report::gcp::build_http_client;
use instance_report::server::{create_router, AppState};
use instance_report::utils::{logger, validation::Validate};
use instance_report::FunctionConfig;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logger::init_function_logger();

    let config = FunctionConfig::from_env()?;
    config.validate()?;

    tracing::info!(
        project_id = %config.settings.project_id,
        zone = %config.settings.zone,
        bucket = %config.settings.reports_bucket,
        "Starting instance report function"
    );

    let port = config.port;
    let state = Arc::new(AppState::new(config, build_http_client()?));
    let app = create_router(state);

    let listener = TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!("HTTP server listening on 0.0.0.0:{}", port);
    axum::serve(listener, app).await?;

    Ok(())
}
