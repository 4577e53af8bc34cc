use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use shared::{
    domain::{Job, JobId},
    error::ApiError,
    protocol::{JobPayload, ScrapeResponse},
};
use tracing::debug;
use url::Url;

use crate::error::{BoardError, Operation};

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// REST surface of the job-board backend.
#[async_trait]
pub trait JobBoardApi: Send + Sync {
    async fn list_jobs(&self) -> Result<Vec<Job>, BoardError>;
    async fn get_job(&self, job_id: JobId) -> Result<Job, BoardError>;
    async fn create_job(&self, payload: &JobPayload) -> Result<Job, BoardError>;
    async fn update_job(&self, job_id: JobId, payload: &JobPayload) -> Result<Job, BoardError>;
    async fn delete_job(&self, job_id: JobId) -> Result<(), BoardError>;
    async fn list_locations(&self) -> Result<Vec<String>, BoardError>;
    async fn list_tags(&self) -> Result<Vec<String>, BoardError>;
    async fn trigger_scrape(&self) -> Result<ScrapeResponse, BoardError>;
}

pub struct HttpJobBoard {
    http: Client,
    server_url: String,
}

impl HttpJobBoard {
    pub fn new(server_url: &Url) -> Result<Self, BoardError> {
        Self::with_timeout(server_url, DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn with_timeout(server_url: &Url, timeout: Duration) -> Result<Self, BoardError> {
        if server_url.cannot_be_a_base() {
            return Err(BoardError::Configuration(format!(
                "server url '{server_url}' cannot be used as a base url"
            )));
        }
        let http = Client::builder().timeout(timeout).build().map_err(|e| {
            BoardError::Configuration(format!("failed to build http client: {e}"))
        })?;
        Ok(Self {
            http,
            server_url: server_url.as_str().trim_end_matches('/').to_string(),
        })
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    async fn send(
        &self,
        operation: Operation,
        request: RequestBuilder,
    ) -> Result<Response, BoardError> {
        let response = request
            .send()
            .await
            .map_err(|e| BoardError::network(operation, e))?;

        let status = response.status();
        if status.is_success() {
            debug!(%operation, %status, "board api: request completed");
            return Ok(response);
        }

        let message = match response.json::<ApiError>().await {
            Ok(body) => format!("HTTP {status}: {}", body.summary()),
            Err(_) => format!("HTTP {status}"),
        };
        Err(BoardError::NetworkFailure { operation, message })
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        operation: Operation,
        request: RequestBuilder,
    ) -> Result<T, BoardError> {
        self.send(operation, request)
            .await?
            .json::<T>()
            .await
            .map_err(|e| BoardError::network(operation, e))
    }
}

#[async_trait]
impl JobBoardApi for HttpJobBoard {
    async fn list_jobs(&self) -> Result<Vec<Job>, BoardError> {
        let request = self.http.get(format!("{}/jobs", self.server_url));
        self.send_json(Operation::ListJobs, request).await
    }

    async fn get_job(&self, job_id: JobId) -> Result<Job, BoardError> {
        let request = self.http.get(format!("{}/jobs/{}", self.server_url, job_id.0));
        self.send_json(Operation::GetJob, request).await
    }

    async fn create_job(&self, payload: &JobPayload) -> Result<Job, BoardError> {
        let request = self
            .http
            .post(format!("{}/jobs", self.server_url))
            .json(payload);
        self.send_json(Operation::CreateJob, request).await
    }

    async fn update_job(&self, job_id: JobId, payload: &JobPayload) -> Result<Job, BoardError> {
        let request = self
            .http
            .put(format!("{}/jobs/{}", self.server_url, job_id.0))
            .json(payload);
        self.send_json(Operation::UpdateJob, request).await
    }

    async fn delete_job(&self, job_id: JobId) -> Result<(), BoardError> {
        let request = self.http.delete(format!("{}/jobs/{}", self.server_url, job_id.0));
        self.send(Operation::DeleteJob, request).await?;
        Ok(())
    }

    async fn list_locations(&self) -> Result<Vec<String>, BoardError> {
        let request = self.http.get(format!("{}/locations", self.server_url));
        self.send_json(Operation::ListLocations, request).await
    }

    async fn list_tags(&self) -> Result<Vec<String>, BoardError> {
        let request = self.http.get(format!("{}/tags", self.server_url));
        self.send_json(Operation::ListTags, request).await
    }

    async fn trigger_scrape(&self) -> Result<ScrapeResponse, BoardError> {
        let request = self.http.post(format!("{}/scrape", self.server_url));
        self.send_json(Operation::Scrape, request).await
    }
}

#[cfg(test)]
#[path = "tests/api_tests.rs"]
mod tests;
