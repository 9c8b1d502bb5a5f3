use std::path::Path;

use sqlx::SqlitePool;

use crate::error::AppError;

/// Open (creating if needed) the SQLite database at the given path.
pub async fn create_pool(database_path: &str) -> Result<SqlitePool, AppError> {
    if database_path != ":memory:" {
        if let Some(parent) = Path::new(database_path).parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| AppError::Config(format!("Cannot create data dir: {e}")))?;
            }
        }
    }
    let url = format!("sqlite:{database_path}?mode=rwc");
    let pool = SqlitePool::connect(&url).await?;
    Ok(pool)
}

/// Create the schema if it does not exist yet. The UNIQUE constraint on
/// (normalized_company, normalized_title) is what makes inserts idempotent;
/// it must live here, not in application logic.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), AppError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS postings (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            company TEXT NOT NULL,
            location TEXT NOT NULL DEFAULT '',
            salary_min REAL,
            salary_max REAL,
            description TEXT NOT NULL DEFAULT '',
            apply_url TEXT NOT NULL,
            source TEXT NOT NULL,
            date_found TEXT NOT NULL,
            match_score INTEGER NOT NULL DEFAULT 0,
            visa_flag BOOLEAN NOT NULL DEFAULT FALSE,
            normalized_company TEXT NOT NULL,
            normalized_title TEXT NOT NULL,
            first_seen TEXT NOT NULL,
            UNIQUE(normalized_company, normalized_title)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS run_log (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            timestamp TEXT NOT NULL,
            total_found INTEGER NOT NULL DEFAULT 0,
            new_jobs INTEGER NOT NULL DEFAULT 0,
            per_source TEXT NOT NULL DEFAULT '{}'
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
