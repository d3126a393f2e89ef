use crate::cli::ServeArgs;
use crate::infra::{load_form_config, seed_ads, AppState};
use crate::routes::with_ad_routes;
use ad_wall::ads::{AdService, InMemoryAdStore};
use ad_wall::config::AppConfig;
use ad_wall::error::AppError;
use ad_wall::telemetry;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
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
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let form = load_form_config(&config.forms)?;
    let store = Arc::new(InMemoryAdStore::with_ads(seed_ads()));
    let ad_service = Arc::new(AdService::new(store, form));

    let app = with_ad_routes(ad_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "ad wall ready");

    axum::serve(listener, app).await?;
    Ok(())
}
