use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error body the backend sends with non-success statuses.
#[derive(Debug, Clone, Serialize, Deserialize, Error)]
#[error("{error}")]
pub struct ApiError {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn summary(&self) -> String {
        match &self.details {
            Some(details) if !details.is_empty() => format!("{}: {details}", self.error),
            _ => self.error.clone(),
        }
    }
}
