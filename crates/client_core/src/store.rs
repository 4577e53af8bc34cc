use shared::domain::{Job, JobId};

use crate::filter::ALL;

/// Last-fetched server data. Holds no derived state; only fetch results
/// write to it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobStore {
    jobs: Vec<Job>,
    locations: Vec<String>,
    tags: Vec<String>,
}

impl JobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn locations(&self) -> &[String] {
        &self.locations
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn job(&self, job_id: JobId) -> Option<&Job> {
        self.jobs.iter().find(|job| job.id == job_id)
    }

    pub fn job_ids(&self) -> Vec<JobId> {
        self.jobs.iter().map(|job| job.id).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Location choices for a picker, led by the "All" sentinel.
    pub fn location_options(&self) -> Vec<&str> {
        std::iter::once(ALL)
            .chain(self.locations.iter().map(String::as_str))
            .collect()
    }

    pub(crate) fn replace_jobs(&mut self, jobs: Vec<Job>) {
        self.jobs = jobs;
    }

    pub(crate) fn replace_locations(&mut self, locations: Vec<String>) {
        self.locations = locations;
    }

    pub(crate) fn replace_tags(&mut self, tags: Vec<String>) {
        self.tags = tags;
    }
}
