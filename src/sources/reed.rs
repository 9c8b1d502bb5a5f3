use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::Utc;

use crate::error::AppError;
use crate::keywords::JOB_TITLES;
use crate::models::job::{Job, RawJob};
use crate::sources::{get_json, str_field, JobSource};

/// Reed.co.uk search API. Needs an API key (basic auth, key as username);
/// without one the adapter reports itself skipped and contributes nothing.
/// The API gives no posting date, so date_found is synthesized as fetch time.
pub struct Reed {
    client: reqwest::Client,
    api_key: Option<String>,
}

impl Reed {
    pub fn new(client: reqwest::Client, api_key: Option<String>) -> Self {
        let api_key = api_key.filter(|k| !k.is_empty());
        Self { client, api_key }
    }
}

#[async_trait]
impl JobSource for Reed {
    fn name(&self) -> &'static str {
        "reed"
    }

    async fn fetch(&self) -> Result<Vec<Job>, AppError> {
        let Some(api_key) = &self.api_key else {
            tracing::info!("Reed: no API key, skipping");
            return Ok(Vec::new());
        };
        let auth = format!("Basic {}", BASE64.encode(format!("{api_key}:")));

        let mut jobs = Vec::new();
        for &query in JOB_TITLES.iter().take(5) {
            for location in ["London", "UK", "Remote"] {
                let Some(data) = get_json(
                    &self.client,
                    self.name(),
                    "https://www.reed.co.uk/api/1.0/search",
                    &[
                        ("keywords", query),
                        ("locationName", location),
                        ("resultsToTake", "50"),
                    ],
                    &[("Authorization", auth.as_str())],
                )
                .await
                else {
                    continue;
                };
                let items = data.get("results").and_then(|v| v.as_array());
                for item in items.into_iter().flatten() {
                    let job_id = item
                        .get("jobId")
                        .and_then(|v| v.as_i64())
                        .map(|id| id.to_string())
                        .unwrap_or_default();
                    jobs.push(Job::from_raw(RawJob {
                        title: str_field(item, "jobTitle"),
                        company: str_field(item, "employerName"),
                        location: str_field(item, "locationName"),
                        salary_min: item.get("minimumSalary").and_then(|v| v.as_f64()),
                        salary_max: item.get("maximumSalary").and_then(|v| v.as_f64()),
                        description: str_field(item, "jobDescription"),
                        apply_url: format!("https://www.reed.co.uk/jobs/{job_id}"),
                        source: self.name().to_string(),
                        date_found: Utc::now().to_rfc3339(),
                    }));
                }
            }
        }
        tracing::info!("Reed: {} jobs", jobs.len());
        Ok(jobs)
    }
}
