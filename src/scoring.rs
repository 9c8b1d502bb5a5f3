use chrono::{DateTime, Utc};

use crate::buckets::parse_date_safe;
use crate::keywords::{
    FOREIGN_LOCATIONS, JOB_TITLES, NEGATIVE_TITLE_KEYWORDS, PRIMARY_SKILLS, REMOTE_TERMS,
    SECONDARY_SKILLS, TARGET_LOCATIONS, TERTIARY_SKILLS, TITLE_SIGNAL_WORDS, VISA_KEYWORDS,
};
use crate::models::job::Job;

// Component weights, totalling 100 before penalties.
const TITLE_WEIGHT: i32 = 40;
const SKILL_WEIGHT: i32 = 40;
const LOCATION_WEIGHT: i32 = 10;
const RECENCY_WEIGHT: i32 = 10;

const PRIMARY_POINTS: i32 = 3;
const SECONDARY_POINTS: i32 = 2;
const TERTIARY_POINTS: i32 = 1;

const NEGATIVE_TITLE_PENALTY: i32 = 30;
const FOREIGN_LOCATION_PENALTY: i32 = 15;

/// Relevance score in [0, 100]. Pure: same posting and clock, same score.
pub fn score_job(job: &Job) -> i32 {
    score_job_at(job, Utc::now())
}

pub fn score_job_at(job: &Job, now: DateTime<Utc>) -> i32 {
    let title_lower = job.title.to_lowercase();
    let text_lower = format!("{} {}", job.title, job.description).to_lowercase();
    let loc_lower = job.location.to_lowercase();

    let mut total = title_score(&title_lower)
        + skill_score(&text_lower)
        + location_score(&loc_lower)
        + recency_score_at(&job.date_found, now);

    if NEGATIVE_TITLE_KEYWORDS
        .iter()
        .any(|kw| title_lower.contains(kw))
    {
        total -= NEGATIVE_TITLE_PENALTY;
    }
    if is_foreign_location(&loc_lower) {
        total -= FOREIGN_LOCATION_PENALTY;
    }

    total.clamp(0, 100)
}

/// True iff title+description mentions any visa/sponsorship phrase.
/// Deliberately plain substring containment, unlike skill matching.
pub fn check_visa_flag(job: &Job) -> bool {
    let text = format!("{} {}", job.title, job.description).to_lowercase();
    VISA_KEYWORDS.iter().any(|kw| text.contains(&kw.to_lowercase()))
}

/// Rough seniority tag derived from the title.
pub fn detect_experience_level(title: &str) -> String {
    let t = title.to_lowercase();
    if ["senior", "lead", "principal", "staff", "head"]
        .iter()
        .any(|kw| t.contains(kw))
    {
        "Senior".to_string()
    } else if ["junior", "graduate", "trainee", "intern"]
        .iter()
        .any(|kw| t.contains(kw))
    {
        "Junior".to_string()
    } else {
        "Mid".to_string()
    }
}

fn title_score(title_lower: &str) -> i32 {
    for target in JOB_TITLES {
        let target_lower = target.to_lowercase();
        if target_lower == title_lower {
            return TITLE_WEIGHT;
        }
        if title_lower.contains(&target_lower) || target_lower.contains(title_lower) {
            return TITLE_WEIGHT / 2;
        }
    }
    // Partial credit: 5 points per distinct domain-signal word in the title.
    let words: std::collections::HashSet<&str> = title_lower
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();
    let overlap = TITLE_SIGNAL_WORDS
        .iter()
        .filter(|sig| words.contains(**sig))
        .count() as i32;
    (overlap * 5).min(TITLE_WEIGHT / 2)
}

fn skill_score(text_lower: &str) -> i32 {
    let mut points = 0;
    for skill in PRIMARY_SKILLS {
        if contains_word(text_lower, &skill.to_lowercase()) {
            points += PRIMARY_POINTS;
        }
    }
    for skill in SECONDARY_SKILLS {
        if contains_word(text_lower, &skill.to_lowercase()) {
            points += SECONDARY_POINTS;
        }
    }
    for skill in TERTIARY_SKILLS {
        if contains_word(text_lower, &skill.to_lowercase()) {
            points += TERTIARY_POINTS;
        }
    }
    points.min(SKILL_WEIGHT)
}

/// Whole-word containment: every occurrence of `needle` must not butt up
/// against an alphanumeric neighbor, so "ml" never matches inside "html"
/// and "ai" never matches inside "fair". Both strings must be lowercased.
fn contains_word(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }
    for (idx, _) in haystack.match_indices(needle) {
        let before_ok = haystack[..idx]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_ascii_alphanumeric());
        let after_ok = haystack[idx + needle.len()..]
            .chars()
            .next()
            .map_or(true, |c| !c.is_ascii_alphanumeric());
        if before_ok && after_ok {
            return true;
        }
    }
    false
}

fn location_score(loc_lower: &str) -> i32 {
    if TARGET_LOCATIONS
        .iter()
        .any(|t| loc_lower.contains(&t.to_lowercase()))
    {
        return LOCATION_WEIGHT;
    }
    if REMOTE_TERMS.iter().any(|t| loc_lower.contains(t)) {
        return LOCATION_WEIGHT - 2;
    }
    0
}

fn is_foreign_location(loc_lower: &str) -> bool {
    if loc_lower.trim().is_empty() {
        return false;
    }
    let names_foreign = FOREIGN_LOCATIONS.iter().any(|t| loc_lower.contains(t));
    let names_target = TARGET_LOCATIONS
        .iter()
        .any(|t| loc_lower.contains(&t.to_lowercase()))
        || REMOTE_TERMS.iter().any(|t| loc_lower.contains(t));
    names_foreign && !names_target
}

fn recency_score_at(date_found: &str, now: DateTime<Utc>) -> i32 {
    let Some(posted) = parse_date_safe(date_found) else {
        return 0;
    };
    let days_old = (now - posted).num_days();
    if days_old <= 1 {
        RECENCY_WEIGHT
    } else if days_old <= 3 {
        8
    } else if days_old <= 5 {
        6
    } else if days_old <= 7 {
        4
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use crate::models::job::RawJob;

    fn job(title: &str, location: &str, description: &str) -> Job {
        Job::from_raw(RawJob {
            title: title.to_string(),
            company: "Test Co".to_string(),
            location: location.to_string(),
            description: description.to_string(),
            apply_url: "https://example.com".to_string(),
            source: "test".to_string(),
            date_found: Utc::now().to_rfc3339(),
            ..Default::default()
        })
    }

    const RICH_DESCRIPTION: &str =
        "We need an engineer skilled in Python, PyTorch, TensorFlow, LangChain, \
         RAG pipelines, LLM fine-tuning, NLP, Deep Learning, Neural Networks, \
         Computer Vision, Hugging Face Transformers, Prompt Engineering, OpenAI, \
         Generative AI, AWS SageMaker, Docker, Kubernetes, FastAPI, ChromaDB.";

    #[test]
    fn score_stays_in_range() {
        let cases = [
            job("AI Engineer", "London, UK", RICH_DESCRIPTION),
            job("Marketing Manager", "New York, US", "SEO and social media."),
            job("", "", ""),
            job("Python AI LLM RAG", "Remote", &RICH_DESCRIPTION.repeat(20)),
        ];
        for j in &cases {
            let score = score_job(j);
            assert!((0..=100).contains(&score), "score {score} out of range");
        }
    }

    #[test]
    fn saturated_components_reach_100() {
        let j = job("AI Engineer", "London, UK", RICH_DESCRIPTION);
        assert_eq!(score_job(&j), 100);
    }

    #[test]
    fn negative_title_costs_30() {
        let clean = job("AI Engineer", "London, UK", "Python role");
        let mut tainted = clean.clone();
        tainted.title = "AI Engineer / Sales Engineer".to_string();
        let diff = score_job(&clean) - score_job(&tainted);
        assert!(diff >= 30, "expected >= 30 point drop, got {diff}");
    }

    #[test]
    fn foreign_location_penalized() {
        let uk = job("Developer", "London, UK", "Python developer");
        let us = job("Developer", "San Francisco, USA", "Python developer");
        let unknown = job("Developer", "", "Python developer");
        assert!(score_job(&uk) > score_job(&us));
        // Unknown location loses the location component but takes no penalty.
        assert!(score_job(&unknown) > score_job(&us));
    }

    #[test]
    fn remote_scores_slightly_below_target_region() {
        let remote = job("Developer", "Remote", "Python developer");
        let uk = job("Developer", "London", "Python developer");
        let us = job("Developer", "Austin", "Python developer");
        assert!(score_job(&uk) > score_job(&remote));
        assert!(score_job(&remote) > score_job(&us));
    }

    #[test]
    fn word_boundary_matching() {
        assert!(contains_word("ml engineer", "ml"));
        assert!(!contains_word("html developer", "ml"));
        assert!(contains_word("ai research", "ai"));
        assert!(!contains_word("fair research", "ai"));
        assert!(contains_word("knows ci/cd well", "ci/cd"));
        assert!(contains_word("scikit-learn and keras", "scikit-learn"));
    }

    #[test]
    fn recency_tiers() {
        let now = Utc::now();
        let cases = [
            (0, 10),
            (1, 10),
            (2, 8),
            (3, 8),
            (4, 6),
            (5, 6),
            (6, 4),
            (7, 4),
            (8, 0),
        ];
        for (days, expected) in cases {
            let posted = (now - Duration::days(days)).to_rfc3339();
            assert_eq!(
                recency_score_at(&posted, now),
                expected,
                "age {days} days"
            );
        }
        assert_eq!(recency_score_at("not a date", now), 0);
        assert_eq!(recency_score_at("", now), 0);
    }

    #[test]
    fn visa_flag_detection() {
        assert!(check_visa_flag(&job("AI Engineer", "", "We offer visa sponsorship.")));
        assert!(check_visa_flag(&job("AI Engineer", "", "Must have the right to work in the UK.")));
        assert!(!check_visa_flag(&job("AI Engineer", "", "Standard Python role.")));
    }

    #[test]
    fn experience_level_from_title() {
        assert_eq!(detect_experience_level("Senior ML Engineer"), "Senior");
        assert_eq!(detect_experience_level("Graduate Data Scientist"), "Junior");
        assert_eq!(detect_experience_level("ML Engineer"), "Mid");
    }

    #[test]
    fn more_skills_score_higher() {
        let few = job("Developer", "", "Python developer role");
        let many = job(
            "Developer",
            "",
            "Python PyTorch TensorFlow LangChain RAG LLM NLP Docker AWS",
        );
        assert!(score_job(&many) > score_job(&few));
    }
}
