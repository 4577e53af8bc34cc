use std::{collections::BTreeSet, fmt};

use shared::domain::JobType;

/// Sentinel accepted for the job type and location pickers.
pub const ALL: &str = "All";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum JobTypeFilter {
    #[default]
    All,
    Only(JobType),
}

impl JobTypeFilter {
    pub fn matches(&self, job_type: &JobType) -> bool {
        match self {
            JobTypeFilter::All => true,
            JobTypeFilter::Only(selected) => selected == job_type,
        }
    }
}

impl From<&str> for JobTypeFilter {
    fn from(value: &str) -> Self {
        if value == ALL {
            JobTypeFilter::All
        } else {
            JobTypeFilter::Only(JobType::from(value))
        }
    }
}

impl From<String> for JobTypeFilter {
    fn from(value: String) -> Self {
        JobTypeFilter::from(value.as_str())
    }
}

impl From<JobType> for JobTypeFilter {
    fn from(value: JobType) -> Self {
        JobTypeFilter::Only(value)
    }
}

impl fmt::Display for JobTypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobTypeFilter::All => f.write_str(ALL),
            JobTypeFilter::Only(job_type) => f.write_str(job_type.as_str()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LocationFilter {
    #[default]
    All,
    Only(String),
}

impl LocationFilter {
    pub fn matches(&self, location: &str) -> bool {
        match self {
            LocationFilter::All => true,
            LocationFilter::Only(selected) => selected == location,
        }
    }
}

impl From<&str> for LocationFilter {
    fn from(value: &str) -> Self {
        if value == ALL {
            LocationFilter::All
        } else {
            LocationFilter::Only(value.to_string())
        }
    }
}

impl From<String> for LocationFilter {
    fn from(value: String) -> Self {
        if value == ALL {
            LocationFilter::All
        } else {
            LocationFilter::Only(value)
        }
    }
}

impl fmt::Display for LocationFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationFilter::All => f.write_str(ALL),
            LocationFilter::Only(location) => f.write_str(location),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Keep fetch order.
    #[default]
    Default,
    Title,
    Company,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Default => "default",
            SortOrder::Title => "title",
            SortOrder::Company => "company",
        }
    }
}

/// Unrecognised names fall back to fetch order rather than failing.
impl From<&str> for SortOrder {
    fn from(value: &str) -> Self {
        match value {
            "title" => SortOrder::Title,
            "company" => SortOrder::Company,
            "default" => SortOrder::Default,
            other => {
                tracing::debug!(
                    sort_order = other,
                    "filter: unknown sort order, keeping fetch order"
                );
                SortOrder::Default
            }
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterCriteria {
    pub keyword: String,
    pub job_type: JobTypeFilter,
    pub location: LocationFilter,
    /// Selected tags, compared case-insensitively against job tags. Empty
    /// means no tag filtering.
    pub tags: BTreeSet<String>,
}

/// User-controlled criteria plus sort order. Updating it never recomputes
/// anything; callers project the view again after each change.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    criteria: FilterCriteria,
    sort_order: SortOrder,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    pub fn set_keyword(&mut self, keyword: impl Into<String>) {
        self.criteria.keyword = keyword.into();
    }

    pub fn set_job_type(&mut self, job_type: impl Into<JobTypeFilter>) {
        self.criteria.job_type = job_type.into();
    }

    pub fn set_location(&mut self, location: impl Into<LocationFilter>) {
        self.criteria.location = location.into();
    }

    /// Flips a tag's inclusion and reports whether it is now selected.
    pub fn toggle_tag(&mut self, tag: &str) -> bool {
        if self.criteria.tags.remove(tag) {
            false
        } else {
            self.criteria.tags.insert(tag.to_string());
            true
        }
    }

    pub fn set_tag(&mut self, tag: &str, selected: bool) {
        if selected {
            self.criteria.tags.insert(tag.to_string());
        } else {
            self.criteria.tags.remove(tag);
        }
    }

    pub fn set_sort_order(&mut self, sort_order: impl Into<SortOrder>) {
        self.sort_order = sort_order.into();
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
#[path = "tests/filter_tests.rs"]
mod tests;
