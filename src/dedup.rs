use std::collections::HashMap;

use crate::models::job::{IdentityKey, Job};

/// Tie-breaker when two copies of the same opening carry equal scores:
/// prefer the copy with salary bounds, a location, and the longer writeup.
fn completeness(job: &Job) -> usize {
    let mut score = 0;
    if job.salary_min.is_some() {
        score += 1;
    }
    if job.salary_max.is_some() {
        score += 1;
    }
    if !job.location.is_empty() {
        score += 1;
    }
    score + job.description.len()
}

/// Collapse postings sharing an identity key down to one representative
/// each: highest match_score wins, completeness breaks ties. Single pass to
/// group plus one pass per group; output order is unspecified.
pub fn deduplicate(jobs: Vec<Job>) -> Vec<Job> {
    let mut groups: HashMap<IdentityKey, Job> = HashMap::with_capacity(jobs.len());
    for job in jobs {
        let key = job.identity_key();
        match groups.entry(key) {
            std::collections::hash_map::Entry::Vacant(slot) => {
                slot.insert(job);
            }
            std::collections::hash_map::Entry::Occupied(mut slot) => {
                let kept = slot.get();
                if (job.match_score, completeness(&job))
                    > (kept.match_score, completeness(kept))
                {
                    slot.insert(job);
                }
            }
        }
    }
    groups.into_values().collect()
}
