mod buckets;
mod config;
mod db;
mod dedup;
mod error;
mod keywords;
mod models;
mod pipeline;
mod scoring;
mod sources;
mod store;

use chrono::Utc;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::buckets::{bucket_jobs, JobView, BUCKET_LABELS};
use crate::config::{Command, Config};
use crate::models::job::Job;
use crate::pipeline::{run_pipeline, RunOptions};
use crate::store::JobStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("jobscout=info")),
        )
        .init();

    let config = Config::parse();

    let pool = db::create_pool(&config.database_path).await?;
    db::run_migrations(&pool).await?;
    let store = JobStore::new(pool);

    match config.resolved_command() {
        Command::Run {
            source,
            dry_run,
            min_score,
        } => {
            let client = sources::http_client()?;
            let adapters =
                sources::build_sources(&client, &config.credentials(), source.as_deref());
            let options = RunOptions {
                dry_run,
                min_score,
                ..Default::default()
            };
            let outcome = run_pipeline(&store, &adapters, &options).await?;
            let label = if dry_run { "Dry run" } else { "New postings" };
            print_bucketed_summary(&outcome.new_jobs, label);
            tracing::info!(
                "Run complete: {} found, {} new across {} sources",
                outcome.stats.total_found,
                outcome.stats.new_jobs,
                outcome.stats.sources_queried
            );
        }
        Command::History { limit } => {
            for run in store.recent_runs(limit).await? {
                println!(
                    "{}  found={:<4} new={:<4} {}",
                    run.timestamp.format("%Y-%m-%d %H:%M"),
                    run.total_found,
                    run.new_jobs,
                    run.per_source
                );
            }
        }
        Command::Purge { days } => {
            let purged = store.purge_older_than(days).await?;
            println!("Purged {purged} postings older than {days} days");
        }
    }

    store.close().await;
    Ok(())
}

/// Console rendering of one run's results, grouped by recency tier.
fn print_bucketed_summary(jobs: &[Job], label: &str) {
    if jobs.is_empty() {
        println!("\njobscout: no new postings this run.\n");
        return;
    }
    let views: Vec<JobView> = jobs.iter().map(JobView::from).collect();
    let buckets = bucket_jobs(views, 0, Utc::now());

    println!("\n{}", "=".repeat(60));
    println!("jobscout {label}: {} postings", jobs.len());
    println!("{}", "=".repeat(60));
    for (idx, bucket) in buckets.iter().enumerate() {
        if bucket.is_empty() {
            continue;
        }
        println!("\n  {} ({} postings):", BUCKET_LABELS[idx], bucket.len());
        for (i, view) in bucket.iter().enumerate() {
            let visa = if view.visa_flag { " [VISA]" } else { "" };
            let salary = match (view.salary_min, view.salary_max) {
                (Some(lo), Some(hi)) => format!(" | {:.0}-{:.0}", lo, hi),
                _ => String::new(),
            };
            println!(
                "    {}. [{}] {} @ {}{salary}{visa} [{}]",
                i + 1,
                view.match_score,
                view.title,
                view.company,
                view.source
            );
        }
    }
    println!("{}\n", "=".repeat(60));
}
