//! Background job scheduler.
//!
//! The only recurring job re-fetches the catalog so cached listings never
//! age past the refresh interval, even on a quiet storefront.

use std::sync::Arc;

use storefront_catalog::CatalogService;
use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

/// Builds and starts the background job scheduler.
///
/// Returns the running [`JobScheduler`] handle, which must be kept alive for
/// the lifetime of the process. Dropping it shuts down all scheduled jobs.
///
/// # Errors
///
/// Returns [`JobSchedulerError`] if the scheduler cannot be initialised, the
/// cron expression is invalid, or the scheduler fails to start.
pub async fn build_scheduler(
    catalog: Arc<CatalogService>,
    cron: &str,
) -> Result<JobScheduler, JobSchedulerError> {
    let scheduler = JobScheduler::new().await?;
    register_catalog_refresh_job(&scheduler, catalog, cron).await?;
    scheduler.start().await?;
    Ok(scheduler)
}

async fn register_catalog_refresh_job(
    scheduler: &JobScheduler,
    catalog: Arc<CatalogService>,
    cron: &str,
) -> Result<(), JobSchedulerError> {
    let job = Job::new_async(cron, move |_uuid, _lock| {
        let catalog = Arc::clone(&catalog);

        Box::pin(async move {
            match catalog.refresh().await {
                Ok(count) => tracing::info!(count, "scheduler: catalog cache refreshed"),
                Err(e) => {
                    tracing::warn!(error = %e, "scheduler: catalog refresh failed; keeping cached data");
                }
            }
        })
    })?;

    scheduler.add(job).await?;
    tracing::info!(cron = %cron, "scheduler: registered catalog refresh job");
    Ok(())
}
