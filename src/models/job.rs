use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

static COMPANY_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\s+(ltd|limited|inc|plc|corporation|corp|group|llc|gmbh|ag|sa|co|company|holdings|solutions|technologies|services|systems|pty)\.?\s*$",
    )
    .unwrap()
});

// Trailing requisition codes like "- REQ-12345" or "- 4411".
static TITLE_JOB_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s*[-–]\s*(?:req|ref|job|id)?[-#]?\d+[\w-]*\s*$").unwrap()
});

// Trailing parenthetical location/tags like "(London)" or "(Remote, UK)".
static TITLE_PARENTHETICAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\([^)]*\)\s*$").unwrap());

static TITLE_SENIORITY_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:(?:senior|snr|sr\.?|junior|jnr|jr\.?|lead|principal|staff|graduate|trainee|associate|chief|mid[- ]?level|head\s+of)\s+)+",
    )
    .unwrap()
});

/// Normalized (company, title) pair identifying one real-world opening
/// across providers and across runs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdentityKey {
    pub company: String,
    pub title: String,
}

/// Untranslated posting as an adapter hands it over. Adapters build these
/// straight from provider payloads; all cleanup happens in `Job::from_raw`.
#[derive(Debug, Clone, Default)]
pub struct RawJob {
    pub title: String,
    pub company: String,
    pub location: String,
    pub salary_min: Option<f64>,
    pub salary_max: Option<f64>,
    pub description: String,
    pub apply_url: String,
    pub source: String,
    pub date_found: String,
}

/// A normalized job posting. Immutable after creation except for the derived
/// scoring fields, which the pipeline sets exactly once per run.
#[derive(Debug, Clone, Serialize)]
pub struct Job {
    pub title: String,
    pub company: String,
    pub location: String,
    pub salary_min: Option<f64>,
    pub salary_max: Option<f64>,
    pub description: String,
    pub apply_url: String,
    pub source: String,
    /// Provider-claimed posting timestamp, kept raw; adapters without a real
    /// timestamp synthesize "now", so treat recency derived from this with
    /// suspicion.
    pub date_found: String,
    pub match_score: i32,
    pub visa_flag: bool,
    pub experience_level: String,
}

/// Salary below this is hourly-rate magnitude, not an annual figure.
const SALARY_FLOOR: f64 = 10_000.0;
/// Salary above this is almost certainly a non-GBP currency.
const SALARY_CEILING: f64 = 500_000.0;

impl Job {
    pub fn from_raw(raw: RawJob) -> Job {
        let title = html_escape::decode_html_entities(&raw.title).into_owned();
        let company = clean_company(&html_escape::decode_html_entities(&raw.company));
        let salary_min = raw.salary_min.filter(|&v| v >= SALARY_FLOOR);
        let salary_max = raw.salary_max.filter(|&v| v <= SALARY_CEILING);
        Job {
            title,
            company,
            location: raw.location,
            salary_min,
            salary_max,
            description: raw.description,
            apply_url: raw.apply_url,
            source: raw.source,
            date_found: raw.date_found,
            match_score: 0,
            visa_flag: false,
            experience_level: String::new(),
        }
    }

    pub fn identity_key(&self) -> IdentityKey {
        IdentityKey {
            company: normalize_company(&self.company),
            title: normalize_title(&self.title),
        }
    }
}

fn clean_company(name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty()
        || matches!(
            trimmed.to_lowercase().as_str(),
            "nan" | "none" | "n/a" | "null" | "unknown"
        )
    {
        return "Unknown".to_string();
    }
    trimmed.to_string()
}

pub fn normalize_company(company: &str) -> String {
    COMPANY_SUFFIX.replace(company, "").trim().to_lowercase()
}

pub fn normalize_title(title: &str) -> String {
    let stripped = TITLE_JOB_CODE.replace(title, "");
    let stripped = TITLE_PARENTHETICAL.replace(&stripped, "");
    let stripped = TITLE_SENIORITY_PREFIX.replace(&stripped, "");
    let normalized = stripped.trim().to_lowercase();
    if normalized.is_empty() {
        // Titles that are all prefix ("Senior") keep their un-stripped form
        // so the identity key never goes empty.
        return title.trim().to_lowercase();
    }
    normalized
}

/// Persisted form of a first-sighted posting, one row per distinct
/// identity key ever seen.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct StoredJob {
    pub id: i64,
    pub title: String,
    pub company: String,
    pub location: String,
    pub salary_min: Option<f64>,
    pub salary_max: Option<f64>,
    pub description: String,
    pub apply_url: String,
    pub source: String,
    pub date_found: String,
    pub match_score: i32,
    pub visa_flag: bool,
    pub normalized_company: String,
    pub normalized_title: String,
    pub first_seen: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(title: &str, company: &str) -> RawJob {
        RawJob {
            title: title.to_string(),
            company: company.to_string(),
            apply_url: "https://example.com".to_string(),
            source: "test".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn decodes_html_entities() {
        let job = Job::from_raw(raw("AI &amp; ML Engineer", "Smith &amp; Co"));
        assert_eq!(job.title, "AI & ML Engineer");
        assert_eq!(job.company, "Smith & Co");
    }

    #[test]
    fn placeholder_company_becomes_unknown() {
        for name in ["", "  ", "nan", "None", "N/A", "null", "UNKNOWN"] {
            let job = Job::from_raw(raw("AI Engineer", name));
            assert_eq!(job.company, "Unknown", "for input {name:?}");
        }
    }

    #[test]
    fn salary_sanity_bounds() {
        let mut r = raw("AI Engineer", "DeepMind");
        r.salary_min = Some(12.5);
        r.salary_max = Some(900_000.0);
        let job = Job::from_raw(r);
        assert_eq!(job.salary_min, None);
        assert_eq!(job.salary_max, None);

        let mut r = raw("AI Engineer", "DeepMind");
        r.salary_min = Some(60_000.0);
        r.salary_max = Some(80_000.0);
        let job = Job::from_raw(r);
        assert_eq!(job.salary_min, Some(60_000.0));
        assert_eq!(job.salary_max, Some(80_000.0));
    }

    #[test]
    fn company_suffixes_stripped() {
        assert_eq!(normalize_company("DeepMind Ltd"), "deepmind");
        assert_eq!(normalize_company("deepmind"), "deepmind");
        assert_eq!(normalize_company("Acme Solutions"), "acme");
        assert_eq!(normalize_company("Siemens AG"), "siemens");
        assert_eq!(normalize_company("Initech Inc."), "initech");
    }

    #[test]
    fn title_variants_collapse() {
        assert_eq!(normalize_title("Senior ML Engineer"), "ml engineer");
        assert_eq!(normalize_title("ML Engineer"), "ml engineer");
        assert_eq!(normalize_title("AI Engineer - REQ-12345"), "ai engineer");
        assert_eq!(normalize_title("AI Engineer (London)"), "ai engineer");
        assert_eq!(normalize_title("Head of AI"), "ai");
        assert_eq!(normalize_title("Lead Staff Data Scientist"), "data scientist");
    }

    #[test]
    fn distinct_roles_stay_distinct() {
        assert_ne!(normalize_title("AI Engineer"), normalize_title("Data Scientist"));
    }

    #[test]
    fn all_prefix_title_keeps_original() {
        assert_eq!(normalize_title("Senior"), "senior");
    }

    #[test]
    fn same_opening_same_key() {
        let a = Job::from_raw(raw("Senior ML Engineer", "DeepMind Ltd"));
        let b = Job::from_raw(raw("ML Engineer", "deepmind"));
        assert_eq!(a.identity_key(), b.identity_key());
    }
}
