//! In-memory stand-in for the job-board backend, normalizing payloads the
//! same way the real service does (comma split with no trimming, distinct
//! locations, trimmed and sorted tag list).

use std::{
    collections::{BTreeSet, HashSet},
    sync::Arc,
};

use async_trait::async_trait;
use shared::{
    domain::{Job, JobId, JobType},
    protocol::{JobPayload, ScrapeResponse},
};
use tokio::sync::{Barrier, Mutex, Notify};

use crate::{
    api::JobBoardApi,
    error::{BoardError, Operation},
};

pub(crate) fn job(
    id: i64,
    title: &str,
    company: &str,
    job_type: &str,
    location: &str,
    tags: &[&str],
) -> Job {
    Job {
        id: JobId(id),
        title: title.to_string(),
        company: company.to_string(),
        location: location.to_string(),
        job_type: JobType::from(job_type),
        tags: tags.iter().map(|tag| tag.to_string()).collect(),
        posting_date: None,
    }
}

pub(crate) fn payload(title: &str, company: &str, location: &str, tags: &str) -> JobPayload {
    JobPayload {
        title: title.to_string(),
        company: company.to_string(),
        location: location.to_string(),
        job_type: JobType::FullTime,
        tags: tags.to_string(),
    }
}

#[derive(Default)]
struct FakeState {
    jobs: Vec<Job>,
    next_id: i64,
    calls: Vec<String>,
    failing: HashSet<Operation>,
    failing_deletes: HashSet<JobId>,
    scrape_message: Option<String>,
    scraped: Vec<JobPayload>,
}

impl FakeState {
    fn check(&mut self, operation: Operation, call: String) -> Result<(), BoardError> {
        self.calls.push(call);
        if self.failing.contains(&operation) {
            return Err(BoardError::network(operation, "HTTP 500 Internal Server Error"));
        }
        Ok(())
    }

    fn insert(&mut self, payload: &JobPayload) -> Job {
        let job = Job {
            id: JobId(self.next_id),
            title: payload.title.clone(),
            company: payload.company.clone(),
            location: payload.location.clone(),
            job_type: payload.job_type.clone(),
            tags: payload.tag_items(),
            posting_date: None,
        };
        self.next_id += 1;
        self.jobs.push(job.clone());
        job
    }
}

fn not_found(operation: Operation) -> BoardError {
    BoardError::network(operation, "HTTP 404 Not Found: Job not found")
}

pub(crate) struct FakeBoard {
    state: Mutex<FakeState>,
    scrape_gate: Option<Arc<Notify>>,
    delete_gate: Option<Arc<Barrier>>,
}

impl FakeBoard {
    pub(crate) fn with_jobs(jobs: Vec<Job>) -> Self {
        let next_id = jobs.iter().map(|job| job.id.0).max().unwrap_or(0) + 1;
        Self {
            state: Mutex::new(FakeState {
                jobs,
                next_id,
                ..FakeState::default()
            }),
            scrape_gate: None,
            delete_gate: None,
        }
    }

    pub(crate) fn failing(mut self, operation: Operation) -> Self {
        self.state.get_mut().failing.insert(operation);
        self
    }

    pub(crate) fn failing_delete(mut self, job_id: JobId) -> Self {
        self.state.get_mut().failing_deletes.insert(job_id);
        self
    }

    pub(crate) fn with_scrape_message(mut self, message: Option<&str>) -> Self {
        self.state.get_mut().scrape_message = message.map(str::to_string);
        self
    }

    pub(crate) fn with_scraped_jobs(mut self, scraped: Vec<JobPayload>) -> Self {
        self.state.get_mut().scraped = scraped;
        self
    }

    /// Holds every scrape request until `gate` is notified.
    pub(crate) fn gated_scrape(mut self, gate: Arc<Notify>) -> Self {
        self.scrape_gate = Some(gate);
        self
    }

    /// Every delete waits on `gate` before it touches the store.
    pub(crate) fn gated_deletes(mut self, gate: Arc<Barrier>) -> Self {
        self.delete_gate = Some(gate);
        self
    }

    pub(crate) async fn calls(&self) -> Vec<String> {
        self.state.lock().await.calls.clone()
    }

    pub(crate) async fn server_jobs(&self) -> Vec<Job> {
        self.state.lock().await.jobs.clone()
    }

    pub(crate) async fn fail(&self, operation: Operation) {
        self.state.lock().await.failing.insert(operation);
    }
}

#[async_trait]
impl JobBoardApi for FakeBoard {
    async fn list_jobs(&self) -> Result<Vec<Job>, BoardError> {
        let mut state = self.state.lock().await;
        state.check(Operation::ListJobs, "GET /jobs".to_string())?;
        Ok(state.jobs.clone())
    }

    async fn get_job(&self, job_id: JobId) -> Result<Job, BoardError> {
        let mut state = self.state.lock().await;
        state.check(Operation::GetJob, format!("GET /jobs/{job_id}"))?;
        state
            .jobs
            .iter()
            .find(|job| job.id == job_id)
            .cloned()
            .ok_or_else(|| not_found(Operation::GetJob))
    }

    async fn create_job(&self, payload: &JobPayload) -> Result<Job, BoardError> {
        let mut state = self.state.lock().await;
        state.check(Operation::CreateJob, "POST /jobs".to_string())?;
        Ok(state.insert(payload))
    }

    async fn update_job(&self, job_id: JobId, payload: &JobPayload) -> Result<Job, BoardError> {
        let mut state = self.state.lock().await;
        state.check(Operation::UpdateJob, format!("PUT /jobs/{job_id}"))?;
        let job = state
            .jobs
            .iter_mut()
            .find(|job| job.id == job_id)
            .ok_or_else(|| not_found(Operation::UpdateJob))?;
        job.title = payload.title.clone();
        job.company = payload.company.clone();
        job.location = payload.location.clone();
        job.job_type = payload.job_type.clone();
        job.tags = payload.tag_items();
        Ok(job.clone())
    }

    async fn delete_job(&self, job_id: JobId) -> Result<(), BoardError> {
        if let Some(gate) = &self.delete_gate {
            gate.wait().await;
        }
        let mut state = self.state.lock().await;
        state.check(Operation::DeleteJob, format!("DELETE /jobs/{job_id}"))?;
        if state.failing_deletes.contains(&job_id) {
            return Err(BoardError::network(
                Operation::DeleteJob,
                "HTTP 500 Internal Server Error: Failed to delete job",
            ));
        }
        let before = state.jobs.len();
        state.jobs.retain(|job| job.id != job_id);
        if state.jobs.len() == before {
            return Err(not_found(Operation::DeleteJob));
        }
        Ok(())
    }

    async fn list_locations(&self) -> Result<Vec<String>, BoardError> {
        let mut state = self.state.lock().await;
        state.check(Operation::ListLocations, "GET /locations".to_string())?;
        let mut seen = HashSet::new();
        Ok(state
            .jobs
            .iter()
            .filter(|job| seen.insert(job.location.clone()))
            .map(|job| job.location.clone())
            .collect())
    }

    async fn list_tags(&self) -> Result<Vec<String>, BoardError> {
        let mut state = self.state.lock().await;
        state.check(Operation::ListTags, "GET /tags".to_string())?;
        let tags: BTreeSet<String> = state
            .jobs
            .iter()
            .flat_map(|job| job.tags.iter())
            .map(|tag| tag.trim().to_string())
            .filter(|tag| !tag.is_empty())
            .collect();
        Ok(tags.into_iter().collect())
    }

    async fn trigger_scrape(&self) -> Result<ScrapeResponse, BoardError> {
        self.state
            .lock()
            .await
            .check(Operation::Scrape, "POST /scrape".to_string())?;
        if let Some(gate) = &self.scrape_gate {
            gate.notified().await;
        }
        let mut state = self.state.lock().await;
        let scraped = std::mem::take(&mut state.scraped);
        for payload in &scraped {
            state.insert(payload);
        }
        Ok(ScrapeResponse {
            message: state.scrape_message.clone(),
        })
    }
}
