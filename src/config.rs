use clap::Parser;

use crate::pipeline::DEFAULT_MIN_SCORE;
use crate::sources::SourceCredentials;

#[derive(Parser, Debug, Clone)]
#[command(name = "jobscout", about = "Multi-source job posting aggregator")]
pub struct Config {
    /// SQLite database path
    #[arg(long, env = "JOBSCOUT_DB", default_value = "data/jobs.db")]
    pub database_path: String,

    /// Reed.co.uk API key; the reed source skips itself without one
    #[arg(long, env = "REED_API_KEY", hide_env_values = true)]
    pub reed_api_key: Option<String>,

    /// Adzuna application id
    #[arg(long, env = "ADZUNA_APP_ID", hide_env_values = true)]
    pub adzuna_app_id: Option<String>,

    /// Adzuna application key
    #[arg(long, env = "ADZUNA_APP_KEY", hide_env_values = true)]
    pub adzuna_app_key: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(clap::Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the aggregation pipeline (default when no subcommand given)
    Run {
        /// Query a single source by name instead of all of them
        #[arg(long)]
        source: Option<String>,

        /// Fetch, score and dedupe without writing to the store
        #[arg(long)]
        dry_run: bool,

        /// Drop postings scoring below this
        #[arg(long, default_value_t = DEFAULT_MIN_SCORE)]
        min_score: i32,
    },
    /// Show recent run statistics
    History {
        #[arg(long, default_value_t = 10)]
        limit: i64,
    },
    /// Delete postings first seen more than N days ago
    Purge {
        #[arg(long, default_value_t = 30)]
        days: i64,
    },
}

impl Config {
    /// Resolve the command, defaulting to a full Run if none specified.
    pub fn resolved_command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Run {
            source: None,
            dry_run: false,
            min_score: DEFAULT_MIN_SCORE,
        })
    }

    pub fn credentials(&self) -> SourceCredentials {
        SourceCredentials {
            reed_api_key: self.reed_api_key.clone(),
            adzuna_app_id: self.adzuna_app_id.clone(),
            adzuna_app_key: self.adzuna_app_key.clone(),
        }
    }
}
