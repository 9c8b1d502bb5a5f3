use std::collections::BTreeMap;
use std::time::Duration;

use futures::future::join_all;

use crate::dedup::deduplicate;
use crate::error::AppError;
use crate::models::job::Job;
use crate::models::run_log::RunStats;
use crate::scoring::{check_visa_flag, detect_experience_level, score_job};
use crate::sources::JobSource;
use crate::store::JobStore;

/// Rows older than this are purged at the start of every non-dry run.
pub const RETENTION_DAYS: i64 = 30;

pub const DEFAULT_MIN_SCORE: i32 = 30;
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub dry_run: bool,
    pub min_score: i32,
    pub fetch_timeout: Duration,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            min_score: DEFAULT_MIN_SCORE,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }
}

/// What one run produced: the persisted stats plus the postings that were
/// actually new this run (already scored, deduplicated, sorted best-first).
#[derive(Debug)]
pub struct PipelineOutcome {
    pub stats: RunStats,
    pub new_jobs: Vec<Job>,
}

/// Execute one full aggregation run: purge expired rows, fetch every source
/// concurrently, score, collapse cross-source duplicates, drop weak matches,
/// persist the identities never seen before, and log the run.
///
/// The source list must already be filtered; an empty list is a
/// configuration error, not an empty fetch.
pub async fn run_pipeline(
    store: &JobStore,
    sources: &[Box<dyn JobSource>],
    options: &RunOptions,
) -> Result<PipelineOutcome, AppError> {
    if sources.is_empty() {
        return Err(AppError::Config(
            "No sources matched the requested filter".to_string(),
        ));
    }

    if !options.dry_run {
        let purged = store.purge_older_than(RETENTION_DAYS).await?;
        if purged > 0 {
            tracing::info!("Purged {purged} postings older than {RETENTION_DAYS} days");
        }
    }

    let (mut all_jobs, per_source) = fetch_all(sources, options.fetch_timeout).await;
    tracing::info!("Total raw postings: {}", all_jobs.len());

    // Derived fields are set exactly once, here.
    for job in &mut all_jobs {
        job.match_score = score_job(job);
        job.visa_flag = check_visa_flag(job);
        job.experience_level = detect_experience_level(&job.title);
    }

    let total_found = all_jobs.len();
    let unique = deduplicate(all_jobs);
    tracing::info!("After dedup: {} unique postings", unique.len());

    let mut candidates: Vec<Job> = unique
        .into_iter()
        .filter(|j| j.match_score >= options.min_score)
        .collect();
    tracing::info!(
        "After score filter (>= {}): {} postings",
        options.min_score,
        candidates.len()
    );

    let mut stats = RunStats {
        total_found,
        new_jobs: 0,
        sources_queried: sources.len(),
        per_source,
    };

    if options.dry_run {
        candidates.sort_by(|a, b| b.match_score.cmp(&a.match_score));
        stats.new_jobs = candidates.len();
        tracing::info!("Dry run: {} candidates, nothing persisted", stats.new_jobs);
        return Ok(PipelineOutcome {
            stats,
            new_jobs: candidates,
        });
    }

    let mut new_jobs = Vec::new();
    for job in candidates {
        if !store.is_seen(&job.identity_key()).await? {
            store.insert_job(&job).await?;
            new_jobs.push(job);
        }
    }
    new_jobs.sort_by(|a, b| b.match_score.cmp(&a.match_score));
    stats.new_jobs = new_jobs.len();
    tracing::info!("New postings this run: {}", stats.new_jobs);

    store.record_run(&stats).await?;

    Ok(PipelineOutcome { stats, new_jobs })
}

/// Fan out to every source at once. Each fetch is boxed in its own timeout;
/// a slow or broken source costs only its own postings, and the merge waits
/// for all fetches to settle. Returns the merged batch and a per-source
/// count map that includes zeros, so silent failures stay visible.
async fn fetch_all(
    sources: &[Box<dyn JobSource>],
    timeout: Duration,
) -> (Vec<Job>, BTreeMap<String, usize>) {
    let fetches = sources.iter().map(|source| async move {
        match tokio::time::timeout(timeout, source.fetch()).await {
            Ok(Ok(jobs)) => jobs,
            Ok(Err(e)) => {
                tracing::error!("Source {} failed: {e}", source.name());
                Vec::new()
            }
            Err(_) => {
                tracing::warn!("Source {} timed out", source.name());
                Vec::new()
            }
        }
    });
    let results = join_all(fetches).await;

    let mut all_jobs = Vec::new();
    let mut per_source = BTreeMap::new();
    for (source, jobs) in sources.iter().zip(results) {
        tracing::info!("  {}: {} postings", source.name(), jobs.len());
        per_source.insert(source.name().to_string(), jobs.len());
        all_jobs.extend(jobs);
    }
    (all_jobs, per_source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;

    use crate::db;
    use crate::models::job::RawJob;

    struct StaticSource {
        name: &'static str,
        jobs: Vec<Job>,
    }

    #[async_trait]
    impl JobSource for StaticSource {
        fn name(&self) -> &'static str {
            self.name
        }
        async fn fetch(&self) -> Result<Vec<Job>, AppError> {
            Ok(self.jobs.clone())
        }
    }

    struct FailingSource;

    #[async_trait]
    impl JobSource for FailingSource {
        fn name(&self) -> &'static str {
            "broken"
        }
        async fn fetch(&self) -> Result<Vec<Job>, AppError> {
            Err(AppError::Source("connection refused".to_string()))
        }
    }

    struct HangingSource;

    #[async_trait]
    impl JobSource for HangingSource {
        fn name(&self) -> &'static str {
            "hanging"
        }
        async fn fetch(&self) -> Result<Vec<Job>, AppError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(Vec::new())
        }
    }

    fn sample_job(source: &str) -> Job {
        Job::from_raw(RawJob {
            title: "AI Engineer".to_string(),
            company: "DeepMind".to_string(),
            location: "London, UK".to_string(),
            description: "Python PyTorch LLM RAG LangChain NLP Deep Learning".to_string(),
            apply_url: "https://example.com/1".to_string(),
            source: source.to_string(),
            date_found: Utc::now().to_rfc3339(),
            ..Default::default()
        })
    }

    async fn test_store() -> JobStore {
        let pool = db::create_pool(":memory:").await.unwrap();
        db::run_migrations(&pool).await.unwrap();
        JobStore::new(pool)
    }

    #[tokio::test]
    async fn empty_source_set_is_a_config_error() {
        let store = test_store().await;
        let err = run_pipeline(&store, &[], &RunOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[tokio::test]
    async fn failing_source_does_not_abort_run() {
        let store = test_store().await;
        let sources: Vec<Box<dyn JobSource>> = vec![
            Box::new(FailingSource),
            Box::new(StaticSource {
                name: "good",
                jobs: vec![sample_job("good")],
            }),
        ];
        let outcome = run_pipeline(&store, &sources, &RunOptions::default())
            .await
            .unwrap();
        assert_eq!(outcome.stats.total_found, 1);
        assert_eq!(outcome.stats.new_jobs, 1);
        assert_eq!(outcome.stats.per_source.get("broken"), Some(&0));
        assert_eq!(outcome.stats.per_source.get("good"), Some(&1));
    }

    #[tokio::test]
    async fn slow_source_only_costs_itself() {
        let store = test_store().await;
        let sources: Vec<Box<dyn JobSource>> = vec![
            Box::new(HangingSource),
            Box::new(StaticSource {
                name: "fast",
                jobs: vec![sample_job("fast")],
            }),
        ];
        let options = RunOptions {
            fetch_timeout: Duration::from_millis(100),
            ..Default::default()
        };
        let started = std::time::Instant::now();
        let outcome = run_pipeline(&store, &sources, &options).await.unwrap();
        assert!(started.elapsed() < Duration::from_secs(5));
        assert_eq!(outcome.stats.per_source.get("hanging"), Some(&0));
        assert_eq!(outcome.stats.new_jobs, 1);
    }

    #[tokio::test]
    async fn dry_run_writes_nothing() {
        let store = test_store().await;
        let sources: Vec<Box<dyn JobSource>> = vec![Box::new(StaticSource {
            name: "one",
            jobs: vec![sample_job("one")],
        })];
        let options = RunOptions {
            dry_run: true,
            ..Default::default()
        };
        let outcome = run_pipeline(&store, &sources, &options).await.unwrap();
        assert_eq!(outcome.stats.new_jobs, 1);
        assert_eq!(store.count_jobs().await.unwrap(), 0);
        assert!(store.recent_runs(10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn second_run_reports_nothing_new() {
        let store = test_store().await;
        let sources: Vec<Box<dyn JobSource>> = vec![Box::new(StaticSource {
            name: "one",
            jobs: vec![sample_job("one")],
        })];
        let first = run_pipeline(&store, &sources, &RunOptions::default())
            .await
            .unwrap();
        assert_eq!(first.stats.new_jobs, 1);
        let second = run_pipeline(&store, &sources, &RunOptions::default())
            .await
            .unwrap();
        assert_eq!(second.stats.new_jobs, 0);
        assert_eq!(store.count_jobs().await.unwrap(), 1);
        assert_eq!(store.recent_runs(10).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn cross_source_duplicate_keeps_best_copy() {
        let store = test_store().await;
        // Same opening from two providers: one rich copy with salary, one
        // sparse copy under a title variant.
        let rich = Job::from_raw(RawJob {
            title: "AI Engineer".to_string(),
            company: "DeepMind".to_string(),
            location: "London, UK".to_string(),
            salary_min: Some(70_000.0),
            salary_max: Some(90_000.0),
            description:
                "Python PyTorch TensorFlow LangChain RAG LLM NLP Deep Learning Computer Vision"
                    .to_string(),
            apply_url: "https://a.example/1".to_string(),
            source: "alpha".to_string(),
            date_found: Utc::now().to_rfc3339(),
        });
        let sparse = Job::from_raw(RawJob {
            title: "Senior AI Engineer".to_string(),
            company: "DeepMind Ltd".to_string(),
            location: "London".to_string(),
            description: "Python role".to_string(),
            apply_url: "https://b.example/2".to_string(),
            source: "beta".to_string(),
            date_found: Utc::now().to_rfc3339(),
            ..Default::default()
        });
        let sources: Vec<Box<dyn JobSource>> = vec![
            Box::new(StaticSource {
                name: "alpha",
                jobs: vec![rich],
            }),
            Box::new(StaticSource {
                name: "beta",
                jobs: vec![sparse],
            }),
        ];

        let outcome = run_pipeline(&store, &sources, &RunOptions::default())
            .await
            .unwrap();
        assert_eq!(outcome.stats.total_found, 2);
        assert_eq!(outcome.stats.new_jobs, 1);
        let kept = &outcome.new_jobs[0];
        assert_eq!(kept.source, "alpha");
        assert_eq!(kept.salary_min, Some(70_000.0));

        // Same two adapter outputs again: identity already seen.
        let again = run_pipeline(&store, &sources, &RunOptions::default())
            .await
            .unwrap();
        assert_eq!(again.stats.new_jobs, 0);
    }

    #[tokio::test]
    async fn low_scores_are_dropped() {
        let store = test_store().await;
        let weak = Job::from_raw(RawJob {
            title: "Warehouse Operative".to_string(),
            company: "Acme".to_string(),
            apply_url: "https://example.com/2".to_string(),
            source: "one".to_string(),
            ..Default::default()
        });
        let sources: Vec<Box<dyn JobSource>> = vec![Box::new(StaticSource {
            name: "one",
            jobs: vec![sample_job("one"), weak],
        })];
        let outcome = run_pipeline(&store, &sources, &RunOptions::default())
            .await
            .unwrap();
        assert_eq!(outcome.stats.total_found, 2);
        assert_eq!(outcome.stats.new_jobs, 1);
        assert_eq!(outcome.new_jobs[0].title, "AI Engineer");
    }
}
