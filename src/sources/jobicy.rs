use async_trait::async_trait;
use chrono::Utc;

use crate::error::AppError;
use crate::models::job::{Job, RawJob};
use crate::sources::{get_json, str_field, JobSource};

/// Remote job API queried by tag, so no extra relevance filtering needed.
/// Gives no posting date; date_found is synthesized as fetch time.
pub struct Jobicy {
    client: reqwest::Client,
}

impl Jobicy {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl JobSource for Jobicy {
    fn name(&self) -> &'static str {
        "jobicy"
    }

    async fn fetch(&self) -> Result<Vec<Job>, AppError> {
        let Some(data) = get_json(
            &self.client,
            self.name(),
            "https://jobicy.com/api/v2/remote-jobs",
            &[
                ("count", "50"),
                ("tag", "ai,machine-learning,python,data-science"),
            ],
            &[],
        )
        .await
        else {
            return Ok(Vec::new());
        };

        let mut jobs = Vec::new();
        let items = data.get("jobs").and_then(|v| v.as_array());
        for item in items.into_iter().flatten() {
            jobs.push(Job::from_raw(RawJob {
                title: str_field(item, "jobTitle"),
                company: str_field(item, "companyName"),
                location: str_field(item, "jobGeo"),
                salary_min: item.get("annualSalaryMin").and_then(|v| v.as_f64()),
                salary_max: item.get("annualSalaryMax").and_then(|v| v.as_f64()),
                description: str_field(item, "jobExcerpt"),
                apply_url: str_field(item, "url"),
                source: self.name().to_string(),
                date_found: Utc::now().to_rfc3339(),
            }));
        }
        tracing::info!("Jobicy: {} jobs", jobs.len());
        Ok(jobs)
    }
}
