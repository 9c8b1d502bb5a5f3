use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::models::job::{Job, StoredJob};

/// Display labels for the four recency tiers.
pub const BUCKET_LABELS: [&str; 4] = ["Last 24 Hours", "24 - 48 Hours", "48 - 72 Hours", "3 - 7 Days"];

const BUCKET_MAX_HOURS: [f64; 4] = [24.0, 48.0, 72.0, 168.0];

/// Age assigned to postings whose claimed and first-seen times are both
/// unparseable; above every bucket cutoff, so such postings bucket nowhere.
pub const UNKNOWN_AGE_HOURS: f64 = 999.0;

/// Parse a provider-claimed date in any of the formats seen in the wild.
/// Naive values are assumed UTC. Returns None rather than erroring.
pub fn parse_date_safe(date_str: &str) -> Option<DateTime<Utc>> {
    let s = date_str.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%z", "%Y-%m-%dT%H:%M:%S%.f%z"] {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt.with_timezone(&Utc));
        }
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    for fmt in ["%Y-%m-%d", "%d/%m/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?));
        }
    }
    None
}

/// Age in hours, preferring the provider-claimed time and falling back to
/// the store's first-seen time. Unknown ages get the out-of-bucket sentinel.
pub fn job_age_hours(date_found: &str, first_seen: &str, now: DateTime<Utc>) -> f64 {
    let parsed = parse_date_safe(date_found).or_else(|| parse_date_safe(first_seen));
    match parsed {
        Some(dt) => ((now - dt).num_seconds() as f64 / 3600.0).max(0.0),
        None => UNKNOWN_AGE_HOURS,
    }
}

/// Bucket index 0-3 for the age, or None beyond 7 days.
pub fn assign_bucket(age_hours: f64) -> Option<usize> {
    BUCKET_MAX_HOURS.iter().position(|&max| age_hours <= max)
}

/// Presentation-only view of a posting, detached from the canonical Job so
/// display grouping never touches scoring or dedup state.
#[derive(Debug, Clone)]
pub struct JobView {
    pub title: String,
    pub company: String,
    pub location: String,
    pub salary_min: Option<f64>,
    pub salary_max: Option<f64>,
    pub apply_url: String,
    pub source: String,
    pub date_found: String,
    pub first_seen: String,
    pub match_score: i32,
    pub visa_flag: bool,
}

impl From<&Job> for JobView {
    fn from(job: &Job) -> Self {
        JobView {
            title: job.title.clone(),
            company: job.company.clone(),
            location: job.location.clone(),
            salary_min: job.salary_min,
            salary_max: job.salary_max,
            apply_url: job.apply_url.clone(),
            source: job.source.clone(),
            date_found: job.date_found.clone(),
            first_seen: String::new(),
            match_score: job.match_score,
            visa_flag: job.visa_flag,
        }
    }
}

impl From<&StoredJob> for JobView {
    fn from(row: &StoredJob) -> Self {
        JobView {
            title: row.title.clone(),
            company: row.company.clone(),
            location: row.location.clone(),
            salary_min: row.salary_min,
            salary_max: row.salary_max,
            apply_url: row.apply_url.clone(),
            source: row.source.clone(),
            date_found: row.date_found.clone(),
            first_seen: row.first_seen.to_rfc3339(),
            match_score: row.match_score,
            visa_flag: row.visa_flag,
        }
    }
}

/// Group views into the four recency buckets, dropping anything below
/// min_score or older than 7 days, each bucket sorted by score descending.
pub fn bucket_jobs(views: Vec<JobView>, min_score: i32, now: DateTime<Utc>) -> [Vec<JobView>; 4] {
    let mut buckets: [Vec<JobView>; 4] = Default::default();
    for view in views {
        if view.match_score < min_score {
            continue;
        }
        let age = job_age_hours(&view.date_found, &view.first_seen, now);
        if let Some(idx) = assign_bucket(age) {
            buckets[idx].push(view);
        }
    }
    for bucket in &mut buckets {
        bucket.sort_by(|a, b| b.match_score.cmp(&a.match_score));
    }
    buckets
}
