mod config;
mod render;

use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
    sync::Arc,
};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use client_core::{
    BoardEvent, CreateJobForm, EditJobForm, FilterState, HttpJobBoard, MutationCoordinator,
};
use shared::domain::{Job, JobId};
use tokio::sync::broadcast;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "jobboard", about = "Browse and manage job board postings")]
struct Cli {
    /// Backend base url; overrides the config file and environment.
    #[arg(long)]
    server_url: Option<String>,
    #[arg(long)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List jobs after filtering and sorting.
    List {
        #[arg(long, default_value = "")]
        keyword: String,
        #[arg(long, default_value = "All")]
        job_type: String,
        #[arg(long, default_value = "All")]
        location: String,
        /// Repeat to require several tags.
        #[arg(long = "tag")]
        tags: Vec<String>,
        /// default, title or company.
        #[arg(long, default_value = "default")]
        sort: String,
    },
    Show {
        id: i64,
    },
    Locations,
    Tags,
    Create {
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        company: Option<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long, default_value = "Full-time")]
        job_type: String,
        /// Comma-separated, sent as typed.
        #[arg(long, default_value = "")]
        tags: String,
    },
    Edit {
        id: i64,
        #[command(flatten)]
        edits: JobEdits,
    },
    Delete {
        id: i64,
        #[arg(long)]
        yes: bool,
    },
    DeleteAll {
        #[arg(long)]
        yes: bool,
    },
    Scrape {
        #[arg(long)]
        yes: bool,
    },
}

/// Fields to change on an existing job; anything left out keeps its stored
/// value.
#[derive(Args, Debug, Default)]
struct JobEdits {
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    company: Option<String>,
    #[arg(long)]
    location: Option<String>,
    #[arg(long)]
    job_type: Option<String>,
    #[arg(long)]
    tags: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut settings = config::load_settings(cli.config.as_deref())?;
    if let Some(server_url) = cli.server_url {
        settings.server_url = server_url;
    }

    tracing_subscriber::fmt()
        .with_env_filter(settings.log_filter.as_str())
        .with_writer(io::stderr)
        .init();

    let server_url = settings.server_url()?;
    let board = HttpJobBoard::with_timeout(&server_url, settings.request_timeout())
        .context("failed to build backend client")?;
    debug!(server_url = %board.server_url(), "board: using backend");

    let coordinator = MutationCoordinator::new(Arc::new(board));
    let mut events = coordinator.subscribe_events();
    let result = run(cli.command, &coordinator).await;
    print_events(&mut events);
    result
}

async fn run(command: Command, coordinator: &MutationCoordinator) -> Result<()> {
    match command {
        Command::List {
            keyword,
            job_type,
            location,
            tags,
            sort,
        } => {
            coordinator.load().await;
            let mut filters = FilterState::new();
            filters.set_keyword(keyword);
            filters.set_job_type(job_type);
            filters.set_location(location);
            for tag in &tags {
                filters.set_tag(tag, true);
            }
            filters.set_sort_order(sort.as_str());
            let view = coordinator.view(&filters).await;
            print!("{}", render::job_list(&view));
        }
        Command::Show { id } => {
            let job = coordinator
                .fetch_job(JobId(id))
                .await
                .with_context(|| format!("failed to load job {id}"))?;
            print!("{}", render::job_card(&job));
        }
        Command::Locations => {
            coordinator.load().await;
            print!("{}", render::bullet_list(coordinator.store().await.locations()));
        }
        Command::Tags => {
            coordinator.load().await;
            print!("{}", render::bullet_list(coordinator.store().await.tags()));
        }
        Command::Create {
            title,
            company,
            location,
            job_type,
            tags,
        } => {
            let mut form = CreateJobForm::new();
            form.set_field("title", title.unwrap_or_default())?;
            form.set_field("company", company.unwrap_or_default())?;
            form.set_field("location", location.unwrap_or_default())?;
            form.set_field("job_type", job_type)?;
            form.set_field("tags", tags)?;
            let job = form
                .submit(coordinator)
                .await
                .context("failed to create job")?;
            print!("{}", render::job_card(&job));
        }
        Command::Edit { id, edits } => {
            let job = edit_job(coordinator, JobId(id), edits).await?;
            print!("{}", render::job_card(&job));
        }
        Command::Delete { id, yes } => {
            if yes || confirm("Are you sure you want to delete this job?")? {
                coordinator
                    .delete(JobId(id))
                    .await
                    .with_context(|| format!("failed to delete job {id}"))?;
                println!("Deleted job {id}.");
            }
        }
        Command::DeleteAll { yes } => {
            coordinator.load().await;
            if coordinator.store().await.is_empty() {
                println!("{}", render::EMPTY_VIEW);
                return Ok(());
            }
            if yes || confirm("This will permanently delete all job listings. Continue?")? {
                let report = coordinator.delete_all().await?;
                println!(
                    "Deleted {} of {} jobs.",
                    report.succeeded(),
                    report.outcomes.len()
                );
                for job_id in report.failed_ids() {
                    eprintln!("Could not delete job {job_id}.");
                }
            }
        }
        Command::Scrape { yes } => {
            if yes || confirm("Run scraper to fetch new job listings?")? {
                println!("Scraping...");
                coordinator.scrape().await.context("scrape failed")?;
            }
        }
    }
    Ok(())
}

/// Loads the stored job and applies `edits` on top of it. Nothing is sent
/// when the load fails, so unspecified fields are never overwritten with
/// form defaults.
async fn edit_job(
    coordinator: &MutationCoordinator,
    job_id: JobId,
    edits: JobEdits,
) -> Result<Job> {
    let mut form = EditJobForm::new(job_id);
    form.load(coordinator)
        .await
        .with_context(|| format!("failed to load job {job_id} for editing"))?;

    let changes = [
        ("title", edits.title),
        ("company", edits.company),
        ("location", edits.location),
        ("job_type", edits.job_type),
        ("tags", edits.tags),
    ];
    for (name, value) in changes {
        if let Some(value) = value {
            form.set_field(name, value)?;
        }
    }
    form.submit(coordinator)
        .await
        .with_context(|| format!("failed to update job {job_id}"))
}

fn confirm(question: &str) -> Result<bool> {
    print!("{question} [y/N] ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

fn print_events(events: &mut broadcast::Receiver<BoardEvent>) {
    while let Ok(event) = events.try_recv() {
        match event {
            BoardEvent::Notice(message) => println!("{message}"),
            BoardEvent::Error(message) => eprintln!("{message}"),
            BoardEvent::StoreRefreshed { jobs } => debug!(jobs, "board: store refreshed"),
        }
    }
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
