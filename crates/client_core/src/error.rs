use std::fmt;

use thiserror::Error;

use crate::coordinator::MutationKey;

/// Backend call a failure is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    ListJobs,
    GetJob,
    CreateJob,
    UpdateJob,
    DeleteJob,
    ListLocations,
    ListTags,
    Scrape,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::ListJobs => "list jobs",
            Operation::GetJob => "get job",
            Operation::CreateJob => "create job",
            Operation::UpdateJob => "update job",
            Operation::DeleteJob => "delete job",
            Operation::ListLocations => "list locations",
            Operation::ListTags => "list tags",
            Operation::Scrape => "trigger scrape",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum BoardError {
    /// The request did not complete, returned a non-success status, or came
    /// back with a body that could not be decoded. These are not told apart.
    #[error("{operation} failed: {message}")]
    NetworkFailure {
        operation: Operation,
        message: String,
    },
    #[error("{0} is already in progress")]
    Busy(MutationKey),
    #[error("job form is still loading")]
    FormLoading,
    #[error("invalid job form: {0}")]
    InvalidForm(#[from] FormError),
    #[error("invalid client configuration: {0}")]
    Configuration(String),
}

impl BoardError {
    pub fn network(operation: Operation, err: impl fmt::Display) -> Self {
        Self::NetworkFailure {
            operation,
            message: err.to_string(),
        }
    }

    pub fn is_network_failure(&self) -> bool {
        matches!(self, Self::NetworkFailure { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("missing fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
    #[error("unknown form field '{0}'")]
    UnknownField(String),
}
