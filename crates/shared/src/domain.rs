use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct JobId(pub i64);

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Employment type of a posting.
///
/// The backend stores job types as free-form, nullable strings, so anything
/// outside the four known labels is kept verbatim in `Other` and compared
/// exactly. A null type stays `Unspecified` and is written back as null.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum JobType {
    #[default]
    FullTime,
    PartTime,
    Internship,
    Contract,
    Other(String),
    Unspecified,
}

impl JobType {
    pub const KNOWN: [JobType; 4] = [
        JobType::FullTime,
        JobType::PartTime,
        JobType::Internship,
        JobType::Contract,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            JobType::FullTime => "Full-time",
            JobType::PartTime => "Part-time",
            JobType::Internship => "Internship",
            JobType::Contract => "Contract",
            JobType::Other(raw) => raw,
            JobType::Unspecified => "",
        }
    }

    pub fn is_unspecified(&self) -> bool {
        matches!(self, JobType::Unspecified)
    }
}

impl From<String> for JobType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Full-time" => JobType::FullTime,
            "Part-time" => JobType::PartTime,
            "Internship" => JobType::Internship,
            "Contract" => JobType::Contract,
            _ => JobType::Other(value),
        }
    }
}

impl From<&str> for JobType {
    fn from(value: &str) -> Self {
        JobType::from(value.to_string())
    }
}

impl From<Option<String>> for JobType {
    fn from(value: Option<String>) -> Self {
        value.map_or(JobType::Unspecified, JobType::from)
    }
}

impl From<JobType> for Option<String> {
    fn from(value: JobType) -> Self {
        match value {
            JobType::Unspecified => None,
            JobType::Other(raw) => Some(raw),
            known => Some(known.as_str().to_string()),
        }
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A posting as served by `GET /jobs` and `GET /jobs/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub title: String,
    pub company: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(default = "unspecified_job_type")]
    pub job_type: JobType,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub posting_date: Option<NaiveDateTime>,
}

impl Job {
    /// Tags with the whitespace left over from comma splitting removed.
    pub fn display_tags(&self) -> impl Iterator<Item = &str> {
        self.tags
            .iter()
            .map(|tag| tag.trim())
            .filter(|tag| !tag.is_empty())
    }
}

fn unspecified_job_type() -> JobType {
    JobType::Unspecified
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
