// Source adapters. Each one translates a single provider's API into Job
// records; network and HTTP failures are absorbed locally so a broken
// provider only ever costs the run its own postings.

mod adzuna;
mod arbeitnow;
mod jobicy;
mod reed;
mod remotive;

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::AppError;
use crate::keywords::RELEVANCE_KEYWORDS;
use crate::models::job::Job;

pub use adzuna::Adzuna;
pub use arbeitnow::Arbeitnow;
pub use jobicy::Jobicy;
pub use reed::Reed;
pub use remotive::Remotive;

const MAX_RETRIES: u32 = 3;
const RETRY_BACKOFF_SECS: [u64; 3] = [1, 2, 4];
const REQUEST_TIMEOUT_SECS: u64 = 30;
pub const USER_AGENT: &str = "jobscout/0.1 (job search aggregator)";

/// Trait all source adapters implement. `fetch` must not error for ordinary
/// network/HTTP conditions; adapters wrap those and return what they got
/// (possibly nothing). Missing credentials mean an empty result, not an error.
#[async_trait]
pub trait JobSource: Send + Sync {
    /// Stable name used for the --source filter and per-source run counts.
    fn name(&self) -> &'static str;

    async fn fetch(&self) -> Result<Vec<Job>, AppError>;
}

/// Credentials for keyed providers, absent entries make those adapters
/// self-report empty.
#[derive(Debug, Clone, Default)]
pub struct SourceCredentials {
    pub reed_api_key: Option<String>,
    pub adzuna_app_id: Option<String>,
    pub adzuna_app_key: Option<String>,
}

/// Build the configured adapter set, optionally narrowed to one source name.
pub fn build_sources(
    client: &reqwest::Client,
    creds: &SourceCredentials,
    filter: Option<&str>,
) -> Vec<Box<dyn JobSource>> {
    let all: Vec<Box<dyn JobSource>> = vec![
        Box::new(Reed::new(client.clone(), creds.reed_api_key.clone())),
        Box::new(Adzuna::new(
            client.clone(),
            creds.adzuna_app_id.clone(),
            creds.adzuna_app_key.clone(),
        )),
        Box::new(Arbeitnow::new(client.clone())),
        Box::new(Remotive::new(client.clone())),
        Box::new(Jobicy::new(client.clone())),
    ];
    match filter {
        Some(name) => all.into_iter().filter(|s| s.name() == name).collect(),
        None => all,
    }
}

pub fn http_client() -> Result<reqwest::Client, AppError> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()
        .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {e}")))
}

/// GET a JSON payload with bounded retries and increasing backoff.
/// Auth/not-found statuses and exhausted retries all resolve to None; the
/// caller treats None as "no data from this provider".
pub(crate) async fn get_json(
    client: &reqwest::Client,
    source: &str,
    url: &str,
    query: &[(&str, &str)],
    headers: &[(&str, &str)],
) -> Option<Value> {
    for attempt in 0..MAX_RETRIES {
        let mut request = client.get(url).query(query);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        match request.send().await {
            Ok(resp) => {
                let status = resp.status();
                if matches!(status.as_u16(), 401 | 403 | 404) {
                    tracing::debug!("[{source}] HTTP {status} from {url}");
                    return None;
                }
                if status.is_client_error() || status.is_server_error() {
                    tracing::warn!("[{source}] HTTP {status} from {url}");
                } else {
                    match resp.json::<Value>().await {
                        Ok(value) => return Some(value),
                        Err(e) => {
                            tracing::warn!("[{source}] Malformed JSON from {url}: {e}");
                            return None;
                        }
                    }
                }
            }
            Err(e) => {
                tracing::warn!("[{source}] Request error: {e}");
            }
        }
        if attempt + 1 < MAX_RETRIES {
            tokio::time::sleep(Duration::from_secs(
                RETRY_BACKOFF_SECS[attempt as usize],
            ))
            .await;
        }
    }
    None
}

/// Pre-filter for broad feeds: keep a posting only if it mentions at least
/// one domain keyword anywhere in the given text.
pub(crate) fn is_relevant(text: &str) -> bool {
    let lower = text.to_lowercase();
    RELEVANCE_KEYWORDS.iter().any(|kw| lower.contains(kw))
}

/// Best-effort string field access on a provider payload.
pub(crate) fn str_field(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_narrows_registry() {
        let client = reqwest::Client::new();
        let creds = SourceCredentials::default();
        assert_eq!(build_sources(&client, &creds, None).len(), 5);
        let one = build_sources(&client, &creds, Some("arbeitnow"));
        assert_eq!(one.len(), 1);
        assert_eq!(one[0].name(), "arbeitnow");
        assert!(build_sources(&client, &creds, Some("nosuch")).is_empty());
    }

    #[test]
    fn relevance_filter() {
        assert!(is_relevant("Backend role using PyTorch and LLM serving"));
        assert!(!is_relevant("Forklift operator needed in warehouse"));
    }
}
