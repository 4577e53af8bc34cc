//! Plain-text rendering of jobs for the terminal.

use std::fmt::Write;

use shared::domain::Job;

pub const EMPTY_VIEW: &str = "No matching jobs found.";

pub fn job_card(job: &Job) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "[{}] {}", job.id, job.title);
    let _ = writeln!(out, "    {} — {}", job.company, job.location);
    if !job.job_type.is_unspecified() {
        let _ = writeln!(out, "    {}", job.job_type);
    }
    let tags: Vec<String> = job.display_tags().map(|tag| format!("#{tag}")).collect();
    if !tags.is_empty() {
        let _ = writeln!(out, "    {}", tags.join(" "));
    }
    if let Some(posted) = job.posting_date {
        let _ = writeln!(out, "    posted {}", posted.format("%Y-%m-%d %H:%M"));
    }
    out
}

pub fn job_list(jobs: &[Job]) -> String {
    if jobs.is_empty() {
        return format!("{EMPTY_VIEW}\n");
    }
    jobs.iter()
        .map(job_card)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn bullet_list<S: AsRef<str>>(items: &[S]) -> String {
    items
        .iter()
        .map(|item| format!("- {}\n", item.as_ref()))
        .collect()
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
