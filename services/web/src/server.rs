use crate::cli::ServeArgs;
use crate::infra::{AppState, ListingServices};
use crate::routes::{app_router, metrics_endpoint};
use axum::routing::get;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use home_listing::config::AppConfig;
use home_listing::error::AppError;
use home_listing::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        listings: ListingServices::from_config(&config.api),
        api_url: config.api.host_url.clone(),
    };

    let app = app_router(app_state)
        .route("/metrics", get(metrics_endpoint))
        .layer(Extension(Arc::new(prometheus_handle)))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, api = %config.api.host_url, "home listing service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
