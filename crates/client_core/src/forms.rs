//! Input-state holders for the create and edit screens.

use shared::{
    domain::{Job, JobId, JobType},
    protocol::JobPayload,
};

use crate::{
    coordinator::MutationCoordinator,
    error::{BoardError, FormError},
};

pub const REQUIRED_FIELDS: [&str; 3] = ["title", "company", "location"];

/// Editable job fields. Tags are kept as the comma-separated string the user
/// types and are sent to the backend unmodified.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JobForm {
    pub title: String,
    pub company: String,
    pub location: String,
    pub job_type: JobType,
    pub tags: String,
}

impl JobForm {
    pub fn from_job(job: &Job) -> Self {
        Self {
            title: job.title.clone(),
            company: job.company.clone(),
            location: job.location.clone(),
            job_type: job.job_type.clone(),
            tags: job.display_tags().collect::<Vec<_>>().join(", "),
        }
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        match name {
            "title" => Some(&self.title),
            "company" => Some(&self.company),
            "location" => Some(&self.location),
            "job_type" => Some(self.job_type.as_str()),
            "tags" => Some(&self.tags),
            _ => None,
        }
    }

    pub fn set_field(&mut self, name: &str, value: impl Into<String>) -> Result<(), FormError> {
        let value = value.into();
        match name {
            "title" => self.title = value,
            "company" => self.company = value,
            "location" => self.location = value,
            "job_type" => self.job_type = JobType::from(value),
            "tags" => self.tags = value,
            other => return Err(FormError::UnknownField(other.to_string())),
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), FormError> {
        let missing: Vec<&'static str> = REQUIRED_FIELDS
            .into_iter()
            .filter(|name| self.field(name).is_some_and(|v| v.trim().is_empty()))
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(FormError::MissingFields(missing))
        }
    }

    pub fn to_payload(&self) -> JobPayload {
        JobPayload {
            title: self.title.clone(),
            company: self.company.clone(),
            location: self.location.clone(),
            job_type: self.job_type.clone(),
            tags: self.tags.clone(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CreateJobForm {
    form: JobForm,
}

impl CreateJobForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form(&self) -> &JobForm {
        &self.form
    }

    pub fn set_field(&mut self, name: &str, value: impl Into<String>) -> Result<(), FormError> {
        self.form.set_field(name, value)
    }

    /// Posts the form. The form keeps its values on failure so the user can
    /// retry.
    pub async fn submit(&self, coordinator: &MutationCoordinator) -> Result<Job, BoardError> {
        self.form.validate()?;
        coordinator.create(&self.form.to_payload()).await
    }
}

/// Edit screen state. Starts out loading; edits and submits are refused
/// until [`EditJobForm::load`] has run once.
#[derive(Debug, Clone)]
pub struct EditJobForm {
    job_id: JobId,
    form: JobForm,
    loading: bool,
}

impl EditJobForm {
    pub fn new(job_id: JobId) -> Self {
        Self {
            job_id,
            form: JobForm::default(),
            loading: true,
        }
    }

    pub fn job_id(&self) -> JobId {
        self.job_id
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn form(&self) -> &JobForm {
        &self.form
    }

    /// Fetches the job and fills the fields. Runs once; later calls are
    /// no-ops. A failed fetch still ends the loading phase, leaving the
    /// default fields in place.
    pub async fn load(&mut self, coordinator: &MutationCoordinator) -> Result<(), BoardError> {
        if !self.loading {
            return Ok(());
        }
        let fetched = coordinator.fetch_job(self.job_id).await;
        self.loading = false;
        self.form = JobForm::from_job(&fetched?);
        Ok(())
    }

    pub fn set_field(&mut self, name: &str, value: impl Into<String>) -> Result<(), BoardError> {
        if self.loading {
            return Err(BoardError::FormLoading);
        }
        self.form.set_field(name, value)?;
        Ok(())
    }

    pub async fn submit(&self, coordinator: &MutationCoordinator) -> Result<Job, BoardError> {
        if self.loading {
            return Err(BoardError::FormLoading);
        }
        self.form.validate()?;
        coordinator
            .update(self.job_id, &self.form.to_payload())
            .await
    }
}

#[cfg(test)]
#[path = "tests/forms_tests.rs"]
mod tests;
