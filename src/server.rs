use crate::cli::{ServeArgs, StorageArgs};
use crate::routes::{operational_routes, AppState};
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use listings::api::{api_routes, with_visit_tracking};
use listings::clock::{Clock, SystemClock};
use listings::config::{AppConfig, StorageBackend};
use listings::error::AppError;
use listings::seed::load_sample_catalog;
use listings::storage::{MemoryStore, SqliteStore, Storage};
use listings::telemetry;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    args.storage.apply(&mut config);

    telemetry::init(&config.telemetry)?;

    match config.storage.backend {
        StorageBackend::Memory => {
            serve(config, Arc::new(MemoryStore::new()), shutdown_signal()).await
        }
        StorageBackend::Sqlite => {
            let store = Arc::new(SqliteStore::connect(&config.storage.database_url).await?);
            serve_then_close(config, store, shutdown_signal()).await
        }
    }
}

/// Serves until `shutdown` resolves, then closes the pool whether or not serving succeeded.
async fn serve_then_close<F>(
    config: AppConfig,
    store: Arc<SqliteStore>,
    shutdown: F,
) -> Result<(), AppError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let served = serve(config, store.clone(), shutdown).await;
    store.close().await;
    info!("sqlite store closed");
    served
}

async fn serve<S, F>(config: AppConfig, store: Arc<S>, shutdown: F) -> Result<(), AppError>
where
    S: Storage,
    F: Future<Output = ()> + Send + 'static,
{
    if config.storage.seed_sample_data {
        load_sample_catalog(store.as_ref()).await?;
    }

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let routes = api_routes(store.clone(), clock.clone())
        .merge(operational_routes())
        .layer(Extension(app_state));
    let app = with_visit_tracking(routes, store, clock).layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        storage = config.storage.backend.label(),
        "listings service ready"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    info!("listings service stopped");
    Ok(())
}

pub(crate) async fn seed(args: StorageArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;
    args.apply(&mut config);
    telemetry::init(&config.telemetry)?;

    let summary = match config.storage.backend {
        StorageBackend::Memory => {
            warn!("memory storage does not persist; the sample catalog is discarded on exit");
            load_sample_catalog(&MemoryStore::new()).await?
        }
        StorageBackend::Sqlite => {
            let store = SqliteStore::connect(&config.storage.database_url).await?;
            let summary = load_sample_catalog(&store).await?;
            store.close().await;
            summary
        }
    };

    match summary {
        Some(summary) => println!(
            "Loaded {} properties and {} blog posts into {} storage",
            summary.properties,
            summary.posts,
            config.storage.backend.label()
        ),
        None => println!("Catalog already has listings; nothing to seed"),
    }
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
