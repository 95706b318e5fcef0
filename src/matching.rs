//! Company and title matching for company job searches.
//!
//! Search results for "<title> <company>" include plenty of jobs at other
//! employers, so every card is checked against what was asked for.

use strsim::jaro_winkler;

/// Legal-form suffixes that differ between listings of the same employer.
const LEGAL_SUFFIXES: &[&str] = &["inc", "llc", "corp", "ltd", "co"];
const FUZZY_THRESHOLD: f64 = 0.92;

pub fn normalize_company_name(name: &str) -> String {
    name.to_lowercase()
        .replace([',', '.'], "")
        .split_whitespace()
        .filter(|word| !LEGAL_SUFFIXES.contains(word))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Whether a listing's company is the one searched for. Containment either
/// way counts; otherwise the normalized names must be near-identical.
pub fn is_company_match(job_company: &str, target: &str) -> bool {
    let job = normalize_company_name(job_company);
    let target = normalize_company_name(target);
    if job.is_empty() || target.is_empty() {
        return false;
    }
    if job.contains(&target) || target.contains(&job) {
        return true;
    }
    jaro_winkler(&job, &target) >= FUZZY_THRESHOLD
}

/// Every word of `target` appears somewhere in the job title.
pub fn is_title_match(job_title: &str, target: &str) -> bool {
    let title = job_title.to_lowercase();
    let target = target.to_lowercase();
    let mut words = target.split_whitespace().peekable();
    if title.trim().is_empty() || words.peek().is_none() {
        return false;
    }
    words.all(|word| title.contains(word))
}
