use async_trait::async_trait;
use chrono::Utc;

use crate::error::AppError;
use crate::models::job::{Job, RawJob};
use crate::sources::{get_json, is_relevant, str_field, JobSource};

/// Free job-board API, no credentials required. Broad feed, so postings are
/// pre-filtered for domain relevance before translation.
pub struct Arbeitnow {
    client: reqwest::Client,
}

impl Arbeitnow {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl JobSource for Arbeitnow {
    fn name(&self) -> &'static str {
        "arbeitnow"
    }

    async fn fetch(&self) -> Result<Vec<Job>, AppError> {
        let Some(data) = get_json(
            &self.client,
            self.name(),
            "https://www.arbeitnow.com/api/job-board-api",
            &[],
            &[],
        )
        .await
        else {
            return Ok(Vec::new());
        };

        let mut jobs = Vec::new();
        let items = data.get("data").and_then(|v| v.as_array());
        for item in items.into_iter().flatten() {
            let title = str_field(item, "title");
            let description = str_field(item, "description");
            let tags = item
                .get("tags")
                .and_then(|v| v.as_array())
                .map(|tags| {
                    tags.iter()
                        .filter_map(|t| t.as_str())
                        .collect::<Vec<_>>()
                        .join(" ")
                })
                .unwrap_or_default();
            if !is_relevant(&format!("{title} {description} {tags}")) {
                continue;
            }
            // created_at is a Unix timestamp in this feed.
            let date_found = item
                .get("created_at")
                .and_then(|v| v.as_i64())
                .and_then(|secs| chrono::DateTime::from_timestamp(secs, 0))
                .map(|dt| dt.to_rfc3339())
                .unwrap_or_else(|| Utc::now().to_rfc3339());
            jobs.push(Job::from_raw(RawJob {
                title,
                company: str_field(item, "company_name"),
                location: str_field(item, "location"),
                description,
                apply_url: str_field(item, "url"),
                source: self.name().to_string(),
                date_found,
                ..Default::default()
            }));
        }
        tracing::info!("Arbeitnow: {} relevant jobs", jobs.len());
        Ok(jobs)
    }
}
