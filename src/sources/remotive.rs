use async_trait::async_trait;
use chrono::Utc;

use crate::error::AppError;
use crate::models::job::{Job, RawJob};
use crate::sources::{get_json, is_relevant, str_field, JobSource};

const MAX_DESCRIPTION_LEN: usize = 5000;

/// Remote-work job API, no credentials required.
pub struct Remotive {
    client: reqwest::Client,
}

impl Remotive {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl JobSource for Remotive {
    fn name(&self) -> &'static str {
        "remotive"
    }

    async fn fetch(&self) -> Result<Vec<Job>, AppError> {
        let Some(data) = get_json(
            &self.client,
            self.name(),
            "https://remotive.com/api/remote-jobs",
            &[("category", "software-dev"), ("limit", "100")],
            &[],
        )
        .await
        else {
            return Ok(Vec::new());
        };

        let mut jobs = Vec::new();
        let items = data.get("jobs").and_then(|v| v.as_array());
        for item in items.into_iter().flatten() {
            let title = str_field(item, "title");
            let mut description = str_field(item, "description");
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
            if description.len() > MAX_DESCRIPTION_LEN {
                let mut cut = MAX_DESCRIPTION_LEN;
                while !description.is_char_boundary(cut) {
                    cut -= 1;
                }
                description.truncate(cut);
            }
            let (salary_min, salary_max) = parse_salary_range(&str_field(item, "salary"));
            let date_found = match str_field(item, "publication_date") {
                s if s.is_empty() => Utc::now().to_rfc3339(),
                s => s,
            };
            jobs.push(Job::from_raw(RawJob {
                title,
                company: str_field(item, "company_name"),
                location: str_field(item, "candidate_required_location"),
                salary_min,
                salary_max,
                description,
                apply_url: str_field(item, "url"),
                source: self.name().to_string(),
                date_found,
            }));
        }
        tracing::info!("Remotive: {} relevant jobs", jobs.len());
        Ok(jobs)
    }
}

/// Remotive reports salary as free text like "£60,000 - £80,000".
fn parse_salary_range(salary: &str) -> (Option<f64>, Option<f64>) {
    let cleaned: String = salary
        .chars()
        .filter(|c| !matches!(c, ',' | '$' | '£' | '€'))
        .collect();
    let mut parts = cleaned.splitn(2, '-');
    let min = parts.next().and_then(|p| p.trim().parse::<f64>().ok());
    let max = parts.next().and_then(|p| p.trim().parse::<f64>().ok());
    match (min, max) {
        (Some(lo), Some(hi)) => (Some(lo), Some(hi)),
        _ => (None, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn salary_range_parsing() {
        assert_eq!(
            parse_salary_range("£60,000 - £80,000"),
            (Some(60_000.0), Some(80_000.0))
        );
        assert_eq!(parse_salary_range("Competitive"), (None, None));
        assert_eq!(parse_salary_range(""), (None, None));
        assert_eq!(parse_salary_range("$90000-$120000"), (Some(90_000.0), Some(120_000.0)));
    }
}
