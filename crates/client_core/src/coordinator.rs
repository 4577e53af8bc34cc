use std::{
    collections::HashSet,
    fmt,
    future::Future,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use futures::future::join_all;
use shared::{
    domain::{Job, JobId},
    protocol::JobPayload,
};
use tokio::sync::{broadcast, RwLock, RwLockReadGuard};
use tracing::{error, info, warn};

use crate::{
    api::JobBoardApi,
    error::BoardError,
    filter::FilterState,
    store::JobStore,
    view::project,
};

const SCRAPE_FALLBACK_MESSAGE: &str = "Scraping done.";

/// Identifies a mutation for the in-flight guard. A second request with the
/// same key is rejected until the first settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationKey {
    Create,
    Update(JobId),
    Delete(JobId),
    DeleteAll,
    Scrape,
}

impl fmt::Display for MutationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MutationKey::Create => f.write_str("create job"),
            MutationKey::Update(job_id) => write!(f, "update of job {job_id}"),
            MutationKey::Delete(job_id) => write!(f, "delete of job {job_id}"),
            MutationKey::DeleteAll => f.write_str("delete all jobs"),
            MutationKey::Scrape => f.write_str("scrape"),
        }
    }
}

/// User-facing reports. `Notice` and `Error` are what a UI would show in a
/// blocking acknowledgment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardEvent {
    Notice(String),
    Error(String),
    StoreRefreshed { jobs: usize },
}

#[derive(Debug)]
pub struct DeleteOutcome {
    pub job_id: JobId,
    pub result: Result<(), BoardError>,
}

/// Per-job results of a best-effort bulk delete.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<DeleteOutcome>,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    pub fn failed_ids(&self) -> Vec<JobId> {
        self.outcomes
            .iter()
            .filter(|o| o.result.is_err())
            .map(|o| o.job_id)
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.outcomes.iter().all(|o| o.result.is_ok())
    }
}

/// Bridges user actions to backend calls and owns the job store they
/// invalidate. Every successful mutation refetches the job list after its
/// own response has been observed.
pub struct MutationCoordinator {
    api: Arc<dyn JobBoardApi>,
    store: RwLock<JobStore>,
    inflight: Mutex<HashSet<MutationKey>>,
    events: broadcast::Sender<BoardEvent>,
}

impl MutationCoordinator {
    pub fn new(api: Arc<dyn JobBoardApi>) -> Self {
        let (events, _) = broadcast::channel(64);
        Self {
            api,
            store: RwLock::new(JobStore::new()),
            inflight: Mutex::new(HashSet::new()),
            events,
        }
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<BoardEvent> {
        self.events.subscribe()
    }

    pub async fn store(&self) -> RwLockReadGuard<'_, JobStore> {
        self.store.read().await
    }

    /// Projects the current store through `filters`.
    pub async fn view(&self, filters: &FilterState) -> Vec<Job> {
        let store = self.store.read().await;
        project(store.jobs(), filters.criteria(), filters.sort_order())
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn is_busy(&self, key: MutationKey) -> bool {
        lock_inflight(&self.inflight).contains(&key)
    }

    /// Initial fetch of jobs, locations and tags. Each read degrades on its
    /// own: a failed fetch leaves that part of the store as it was.
    pub async fn load(&self) {
        let (jobs, locations, tags) = futures::join!(
            self.api.list_jobs(),
            self.api.list_locations(),
            self.api.list_tags()
        );

        let mut store = self.store.write().await;
        match jobs {
            Ok(jobs) => {
                info!(jobs = jobs.len(), "board: fetched jobs");
                store.replace_jobs(jobs);
                let _ = self.events.send(BoardEvent::StoreRefreshed {
                    jobs: store.jobs().len(),
                });
            }
            Err(err) => warn!(error = %err, "board: error fetching jobs"),
        }
        match locations {
            Ok(locations) => store.replace_locations(locations),
            Err(err) => warn!(error = %err, "board: error fetching locations"),
        }
        match tags {
            Ok(tags) => store.replace_tags(tags),
            Err(err) => warn!(error = %err, "board: error fetching tags"),
        }
    }

    /// Refetches the job list. On failure the previous contents stay.
    pub async fn refresh_jobs(&self) -> Result<usize, BoardError> {
        let jobs = self.api.list_jobs().await?;
        let count = jobs.len();
        self.store.write().await.replace_jobs(jobs);
        info!(jobs = count, "board: job store refreshed");
        let _ = self.events.send(BoardEvent::StoreRefreshed { jobs: count });
        Ok(count)
    }

    pub async fn fetch_job(&self, job_id: JobId) -> Result<Job, BoardError> {
        self.api.get_job(job_id).await.inspect_err(|err| {
            error!(job_id = job_id.0, error = %err, "board: failed to load job");
            self.report_error("Failed to load job");
        })
    }

    pub async fn create(&self, payload: &JobPayload) -> Result<Job, BoardError> {
        self.guarded(MutationKey::Create, async {
            match self.api.create_job(payload).await {
                Ok(job) => {
                    info!(job_id = job.id.0, title = %job.title, "board: job created");
                    self.notify("Job posted successfully!");
                    self.refresh_after_mutation().await;
                    Ok(job)
                }
                Err(err) => {
                    error!(error = %err, "board: error creating job");
                    self.report_error("Error creating job");
                    Err(err)
                }
            }
        })
        .await
    }

    pub async fn update(&self, job_id: JobId, payload: &JobPayload) -> Result<Job, BoardError> {
        self.guarded(MutationKey::Update(job_id), async {
            match self.api.update_job(job_id, payload).await {
                Ok(job) => {
                    info!(job_id = job_id.0, "board: job updated");
                    self.notify("Job updated!");
                    self.refresh_after_mutation().await;
                    Ok(job)
                }
                Err(err) => {
                    error!(job_id = job_id.0, error = %err, "board: update failed");
                    self.report_error("Failed to update job");
                    Err(err)
                }
            }
        })
        .await
    }

    /// Deletes one job. A failure leaves the store untouched, so the stale
    /// entry stays visible.
    pub async fn delete(&self, job_id: JobId) -> Result<(), BoardError> {
        self.guarded(MutationKey::Delete(job_id), async {
            match self.api.delete_job(job_id).await {
                Ok(()) => {
                    info!(job_id = job_id.0, "board: job deleted");
                    self.refresh_after_mutation().await;
                    Ok(())
                }
                Err(err) => {
                    error!(job_id = job_id.0, error = %err, "board: failed to delete job");
                    self.report_error("Failed to delete job");
                    Err(err)
                }
            }
        })
        .await
    }

    /// Deletes every currently loaded job concurrently, waits for all of them
    /// to settle, then refetches whatever is left. Failed deletions are
    /// logged and not retried; the report carries each outcome.
    pub async fn delete_all(&self) -> Result<BatchReport, BoardError> {
        self.guarded(MutationKey::DeleteAll, async {
            let job_ids = self.store.read().await.job_ids();
            let api = &self.api;
            let outcomes = join_all(job_ids.into_iter().map(|job_id| async move {
                DeleteOutcome {
                    job_id,
                    result: api.delete_job(job_id).await,
                }
            }))
            .await;

            let report = BatchReport { outcomes };
            for outcome in &report.outcomes {
                if let Err(err) = &outcome.result {
                    warn!(
                        job_id = outcome.job_id.0,
                        error = %err,
                        "board: failed to delete job during bulk delete"
                    );
                }
            }
            info!(
                requested = report.outcomes.len(),
                succeeded = report.succeeded(),
                "board: bulk delete settled"
            );

            self.refresh_after_mutation().await;
            Ok(report)
        })
        .await
    }

    /// Triggers the external scraper and reloads jobs once it reports back.
    /// `is_busy(MutationKey::Scrape)` stays true until the request settles.
    pub async fn scrape(&self) -> Result<String, BoardError> {
        self.guarded(MutationKey::Scrape, async {
            match self.api.trigger_scrape().await {
                Ok(response) => {
                    let message = response
                        .message
                        .filter(|m| !m.is_empty())
                        .unwrap_or_else(|| SCRAPE_FALLBACK_MESSAGE.to_string());
                    info!(%message, "board: scrape finished");
                    self.notify(message.clone());
                    self.refresh_after_mutation().await;
                    Ok(message)
                }
                Err(err) => {
                    error!(error = %err, "board: scrape error");
                    self.report_error("Scraping failed. Check console for details.");
                    Err(err)
                }
            }
        })
        .await
    }

    async fn guarded<T, F>(&self, key: MutationKey, operation: F) -> Result<T, BoardError>
    where
        F: Future<Output = Result<T, BoardError>>,
    {
        let Some(_inflight) = InflightGuard::acquire(&self.inflight, key) else {
            warn!(operation = %key, "board: duplicate request suppressed");
            return Err(BoardError::Busy(key));
        };
        operation.await
    }

    async fn refresh_after_mutation(&self) {
        if let Err(err) = self.refresh_jobs().await {
            warn!(
                error = %err,
                "board: refetch after mutation failed; keeping previous jobs"
            );
        }
    }

    fn notify(&self, message: impl Into<String>) {
        let _ = self.events.send(BoardEvent::Notice(message.into()));
    }

    fn report_error(&self, message: impl Into<String>) {
        let _ = self.events.send(BoardEvent::Error(message.into()));
    }
}

fn lock_inflight(
    inflight: &Mutex<HashSet<MutationKey>>,
) -> MutexGuard<'_, HashSet<MutationKey>> {
    inflight.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Holds a mutation key for as long as its request runs. Dropping it, even
/// when the request future is cancelled mid-flight, frees the key.
struct InflightGuard<'a> {
    inflight: &'a Mutex<HashSet<MutationKey>>,
    key: MutationKey,
}

impl<'a> InflightGuard<'a> {
    fn acquire(inflight: &'a Mutex<HashSet<MutationKey>>, key: MutationKey) -> Option<Self> {
        if !lock_inflight(inflight).insert(key) {
            return None;
        }
        Some(Self { inflight, key })
    }
}

impl Drop for InflightGuard<'_> {
    fn drop(&mut self) {
        lock_inflight(self.inflight).remove(&self.key);
    }
}

#[cfg(test)]
#[path = "tests/coordinator_tests.rs"]
mod tests;
