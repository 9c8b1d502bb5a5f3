use chrono::{Duration, Utc};
use sqlx::SqlitePool;

use crate::error::AppError;
use crate::models::job::{IdentityKey, Job, StoredJob};
use crate::models::run_log::{RunLogEntry, RunStats};

/// Sole arbiter of "new vs. already seen" across runs. The deduplicator only
/// handles duplicates within one batch; anything surviving it comes here.
#[derive(Clone)]
pub struct JobStore {
    pool: SqlitePool,
}

impl JobStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn is_seen(&self, key: &IdentityKey) -> Result<bool, AppError> {
        let row: Option<(i64,)> = sqlx::query_as(
            "SELECT 1 FROM postings WHERE normalized_company = $1 AND normalized_title = $2",
        )
        .bind(&key.company)
        .bind(&key.title)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.is_some())
    }

    /// Record the first sighting of an identity key. No-op when the key
    /// already exists: the UNIQUE constraint plus OR IGNORE make repeated or
    /// racing inserts harmless.
    pub async fn insert_job(&self, job: &Job) -> Result<(), AppError> {
        let key = job.identity_key();
        sqlx::query(
            "INSERT OR IGNORE INTO postings
             (title, company, location, salary_min, salary_max, description,
              apply_url, source, date_found, match_score, visa_flag,
              normalized_company, normalized_title, first_seen)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)",
        )
        .bind(&job.title)
        .bind(&job.company)
        .bind(&job.location)
        .bind(job.salary_min)
        .bind(job.salary_max)
        .bind(&job.description)
        .bind(&job.apply_url)
        .bind(&job.source)
        .bind(&job.date_found)
        .bind(job.match_score)
        .bind(job.visa_flag)
        .bind(&key.company)
        .bind(&key.title)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Drop rows first seen before the retention horizon, regardless of
    /// score. Returns the number purged.
    pub async fn purge_older_than(&self, days: i64) -> Result<u64, AppError> {
        let cutoff = Utc::now() - Duration::days(days);
        let result = sqlx::query("DELETE FROM postings WHERE first_seen < $1")
            .bind(cutoff)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn record_run(&self, stats: &RunStats) -> Result<(), AppError> {
        let per_source = serde_json::to_string(&stats.per_source)
            .unwrap_or_else(|_| "{}".to_string());
        sqlx::query(
            "INSERT INTO run_log (timestamp, total_found, new_jobs, per_source) VALUES ($1, $2, $3, $4)",
        )
        .bind(Utc::now())
        .bind(stats.total_found as i64)
        .bind(stats.new_jobs as i64)
        .bind(per_source)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn recent_runs(&self, limit: i64) -> Result<Vec<RunLogEntry>, AppError> {
        let runs = sqlx::query_as::<_, RunLogEntry>(
            "SELECT * FROM run_log ORDER BY id DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(runs)
    }

    /// Rows first seen within the last N hours, best score first. Feeds the
    /// presentation layer (notification digests, console summaries).
    pub async fn new_jobs_since(&self, hours: i64) -> Result<Vec<StoredJob>, AppError> {
        let cutoff = Utc::now() - Duration::hours(hours);
        let rows = sqlx::query_as::<_, StoredJob>(
            "SELECT * FROM postings WHERE first_seen >= $1 ORDER BY match_score DESC",
        )
        .bind(cutoff)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn count_jobs(&self) -> Result<i64, AppError> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM postings")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.0)
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}
