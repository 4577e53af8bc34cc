//! Derives the rendered job list from the store and the filter state.

use std::cmp::Ordering;

use shared::domain::Job;
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

use crate::filter::{FilterCriteria, JobTypeFilter, LocationFilter, SortOrder};

/// Filters `jobs` by `criteria`, then orders the survivors by `sort_order`.
///
/// The result borrows from `jobs` and is always a subsequence of it. Sorting
/// is stable, so jobs with equal keys keep their fetch order.
pub fn project<'a>(
    jobs: &'a [Job],
    criteria: &FilterCriteria,
    sort_order: SortOrder,
) -> Vec<&'a Job> {
    let predicate = Predicate::new(criteria);
    let filtered: Vec<&Job> = jobs.iter().filter(|job| predicate.matches(job)).collect();
    sorted(&filtered, sort_order)
}

/// Whether a single job passes every criterion.
pub fn matches(job: &Job, criteria: &FilterCriteria) -> bool {
    Predicate::new(criteria).matches(job)
}

/// Locale-style string ordering. Base letters compare first with accents and
/// case ignored, so `École` sorts among the `e`s. Ties are broken by accents
/// (unaccented first), then by case (lowercase first).
pub fn collate(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(&base_letters(b))
        .then_with(|| accented(a).cmp(&accented(b)))
        .then_with(|| a.nfd().map(case_rank).cmp(b.nfd().map(case_rank)))
        .then_with(|| a.cmp(b))
}

fn base_letters(s: &str) -> Vec<char> {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

fn accented(s: &str) -> Vec<char> {
    s.nfd().flat_map(char::to_lowercase).collect()
}

fn case_rank(c: char) -> u8 {
    u8::from(c.is_uppercase())
}

fn sorted<'a>(filtered: &[&'a Job], sort_order: SortOrder) -> Vec<&'a Job> {
    let mut ordered = filtered.to_vec();
    match sort_order {
        SortOrder::Default => {}
        SortOrder::Title => ordered.sort_by(|a, b| collate(&a.title, &b.title)),
        SortOrder::Company => ordered.sort_by(|a, b| collate(&a.company, &b.company)),
    }
    ordered
}

struct Predicate<'c> {
    keyword: String,
    job_type: &'c JobTypeFilter,
    location: &'c LocationFilter,
    tags: Vec<String>,
}

impl<'c> Predicate<'c> {
    fn new(criteria: &'c FilterCriteria) -> Self {
        Self {
            keyword: criteria.keyword.to_lowercase(),
            job_type: &criteria.job_type,
            location: &criteria.location,
            tags: criteria
                .tags
                .iter()
                .map(|tag| tag.trim().to_lowercase())
                .collect(),
        }
    }

    fn matches(&self, job: &Job) -> bool {
        self.keyword_matches(job)
            && self.job_type.matches(&job.job_type)
            && self.location.matches(&job.location)
            && self.tags_match(job)
    }

    fn keyword_matches(&self, job: &Job) -> bool {
        self.keyword.is_empty()
            || job.title.to_lowercase().contains(&self.keyword)
            || job.company.to_lowercase().contains(&self.keyword)
    }

    // Every selected tag must be present.
    fn tags_match(&self, job: &Job) -> bool {
        if self.tags.is_empty() {
            return true;
        }
        let job_tags: Vec<String> = job
            .tags
            .iter()
            .map(|tag| tag.trim().to_lowercase())
            .collect();
        self.tags.iter().all(|tag| job_tags.contains(tag))
    }
}

#[cfg(test)]
#[path = "tests/view_tests.rs"]
mod tests;
