mod api;
mod middleware;
mod og;
mod pages;
mod scheduler;

use std::sync::Arc;

use storefront_catalog::CatalogService;
use tracing_subscriber::EnvFilter;

use crate::api::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Arc::new(storefront_core::load_app_config_from_env()?);
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let catalog = Arc::new(CatalogService::from_config(&config)?);

    // Warm the cache so the first shopper does not wait on the catalog API.
    match catalog.refresh().await {
        Ok(count) => tracing::info!(count, "catalog cache warmed"),
        Err(e) => tracing::warn!(error = %e, "catalog warm-up failed; serving on demand"),
    }

    let _scheduler =
        scheduler::build_scheduler(Arc::clone(&catalog), &config.cache_refresh_cron).await?;

    let app = build_app(AppState {
        catalog,
        config: Arc::clone(&config),
    });

    tracing::info!(
        env = %config.env,
        bind_addr = %config.bind_addr,
        catalog = %config.catalog_base_url,
        "storefront listening"
    );
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
