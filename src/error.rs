/// Pipeline error taxonomy. Source failures are recovered locally by the
/// orchestrator and never surface here; Database and Config errors are fatal
/// for the invocation.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Source error: {0}")]
    Source(String),
}
