use serde::{Deserialize, Serialize};

use crate::domain::JobType;

/// Body of `POST /jobs` and `PUT /jobs/{id}`.
///
/// Tags travel as a single comma-separated string here even though jobs come
/// back with a tag sequence; the backend does the splitting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPayload {
    pub title: String,
    pub company: String,
    pub location: String,
    pub job_type: JobType,
    pub tags: String,
}

impl JobPayload {
    /// Splits the tag string the way the backend stores it: on commas, with
    /// no trimming.
    pub fn tag_items(&self) -> Vec<String> {
        if self.tags.is_empty() {
            return Vec::new();
        }
        self.tags.split(',').map(str::to_string).collect()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScrapeResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
