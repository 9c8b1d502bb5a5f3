use async_trait::async_trait;
use chrono::Utc;

use crate::error::AppError;
use crate::keywords::JOB_TITLES;
use crate::models::job::{Job, RawJob};
use crate::sources::{get_json, str_field, JobSource};

/// Adzuna GB search API. Needs an app id/key pair; without both the adapter
/// reports itself skipped and contributes nothing.
pub struct Adzuna {
    client: reqwest::Client,
    app_id: Option<String>,
    app_key: Option<String>,
}

impl Adzuna {
    pub fn new(
        client: reqwest::Client,
        app_id: Option<String>,
        app_key: Option<String>,
    ) -> Self {
        Self {
            client,
            app_id: app_id.filter(|v| !v.is_empty()),
            app_key: app_key.filter(|v| !v.is_empty()),
        }
    }
}

#[async_trait]
impl JobSource for Adzuna {
    fn name(&self) -> &'static str {
        "adzuna"
    }

    async fn fetch(&self) -> Result<Vec<Job>, AppError> {
        let (Some(app_id), Some(app_key)) = (&self.app_id, &self.app_key) else {
            tracing::info!("Adzuna: no API keys, skipping");
            return Ok(Vec::new());
        };

        let mut jobs = Vec::new();
        for &query in JOB_TITLES {
            let Some(data) = get_json(
                &self.client,
                self.name(),
                "https://api.adzuna.com/v1/api/jobs/gb/search/1",
                &[
                    ("app_id", app_id.as_str()),
                    ("app_key", app_key.as_str()),
                    ("what", query),
                    ("results_per_page", "50"),
                    ("max_days_old", "14"),
                    ("content-type", "application/json"),
                ],
                &[],
            )
            .await
            else {
                continue;
            };
            let items = data.get("results").and_then(|v| v.as_array());
            for item in items.into_iter().flatten() {
                let company = item
                    .get("company")
                    .and_then(|v| v.get("display_name"))
                    .and_then(|v| v.as_str())
                    .unwrap_or_default()
                    .to_string();
                let location = item
                    .get("location")
                    .and_then(|v| v.get("display_name"))
                    .and_then(|v| v.as_str())
                    .unwrap_or_default()
                    .to_string();
                let date_found = match str_field(item, "created") {
                    s if s.is_empty() => Utc::now().to_rfc3339(),
                    s => s,
                };
                jobs.push(Job::from_raw(RawJob {
                    title: str_field(item, "title"),
                    company,
                    location,
                    salary_min: item.get("salary_min").and_then(|v| v.as_f64()),
                    salary_max: item.get("salary_max").and_then(|v| v.as_f64()),
                    description: str_field(item, "description"),
                    apply_url: str_field(item, "redirect_url"),
                    source: self.name().to_string(),
                    date_found,
                }));
            }
        }
        tracing::info!("Adzuna: {} jobs", jobs.len());
        Ok(jobs)
    }
}
