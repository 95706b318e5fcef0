use scraper::ElementRef;
use tracing::debug;

use super::{clean_tracking_url, field};
use crate::catalog::{self, Entity, Field};
use crate::models::{Job, JobCard};
use crate::resolve::{resolve, resolve_all, resolve_where, Resolution};

const UNKNOWN_TITLE: &str = "Unknown Title";
const UNKNOWN_COMPANY: &str = "Unknown Company";
const UNKNOWN_LOCATION: &str = "Unknown Location";

/// Build a job from a search result card. The card is dropped when it has
/// no link to a job page.
pub fn assemble_job_card(scope: ElementRef<'_>, company_hint: Option<&str>) -> Option<JobCard> {
    let href = match resolve_where(scope, catalog::lookup(Entity::JobCard, Field::Url), |href| {
        href.contains("/jobs/view/")
    }) {
        Resolution::Accepted(href) => href,
        _ => {
            debug!(target: "harvest.assemble", "Skipping job card without a job link");
            return None;
        }
    };
    let linkedin_url = clean_tracking_url(&href)?;

    let company = field(scope, Entity::JobCard, Field::Company)
        .or_else(|| company_hint.map(str::to_string).filter(|c| !c.is_empty()))
        .unwrap_or_else(|| UNKNOWN_COMPANY.to_string());

    Some(JobCard {
        linkedin_url,
        title: field(scope, Entity::JobCard, Field::Title).unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
        company,
        location: field(scope, Entity::JobCard, Field::Location)
            .unwrap_or_else(|| UNKNOWN_LOCATION.to_string()),
        listed_date: field(scope, Entity::JobCard, Field::Date),
    })
}

/// Parts of the "Location · 2 weeks ago · 87 applicants" line under the
/// job title.
#[derive(Debug, Default, PartialEq)]
struct TopCardInsights {
    location: Option<String>,
    posted: Option<String>,
    applicants: Option<String>,
}

fn top_card_insights(root: ElementRef<'_>) -> TopCardInsights {
    let Some(line) = field(root, Entity::JobDetail, Field::TopCardInsights) else {
        return TopCardInsights::default();
    };
    let mut insights = TopCardInsights::default();
    for part in line.split(['·', '•', '\n']).map(str::trim).filter(|p| !p.is_empty()) {
        let lower = part.to_lowercase();
        if lower.contains("applicant") || lower.contains("clicked apply") {
            insights.applicants.get_or_insert_with(|| part.to_string());
        } else if lower.contains("ago") || lower.starts_with("reposted") || lower.starts_with("posted") {
            insights.posted.get_or_insert_with(|| part.to_string());
        } else if insights.location.is_none() && insights.posted.is_none() {
            insights.location = Some(part.to_string());
        }
    }
    insights
}

const EMPLOYMENT_TYPES: &[&str] = &["full-time", "part-time", "contract", "temporary", "internship", "volunteer"];
const SENIORITY_LEVELS: &[&str] = &["internship", "entry level", "associate", "mid-senior", "director", "executive"];

/// Employment type and seniority from the job criteria list.
fn criteria(root: ElementRef<'_>) -> (Option<String>, Option<String>) {
    let mut employment = None;
    let mut seniority = None;
    for item in resolve_all(root, catalog::lookup(Entity::JobDetail, Field::Criteria)) {
        let Some(value) = resolve(item, catalog::lookup(Entity::JobDetail, Field::Value)) else {
            continue;
        };
        let label = resolve(item, catalog::lookup(Entity::JobDetail, Field::Label))
            .unwrap_or_default()
            .to_lowercase();
        let lower = value.to_lowercase();

        if label.contains("employment") {
            employment.get_or_insert(value);
        } else if label.contains("seniority") || label.contains("experience") {
            seniority.get_or_insert(value);
        } else if label.is_empty() && EMPLOYMENT_TYPES.iter().any(|t| lower.contains(t)) && employment.is_none() {
            employment = Some(value);
        } else if label.is_empty() && SENIORITY_LEVELS.iter().any(|t| lower.contains(t)) {
            seniority.get_or_insert(value);
        }
    }
    (employment, seniority)
}

/// Build a job from its detail page. Values missing on the page fall back
/// to the search card the job was found through, if any.
pub fn assemble_job_detail(root: ElementRef<'_>, url: &str, card: Option<&JobCard>) -> Job {
    let insights = top_card_insights(root);
    let (employment_type, seniority_level) = criteria(root);
    let from_card = |get: fn(&JobCard) -> &str, default: &str| {
        card.map(|c| get(c).to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| default.to_string())
    };

    Job {
        linkedin_url: clean_tracking_url(url).unwrap_or_else(|| url.to_string()),
        title: field(root, Entity::JobDetail, Field::Title)
            .unwrap_or_else(|| from_card(|c| &c.title, UNKNOWN_TITLE)),
        company: field(root, Entity::JobDetail, Field::Company)
            .unwrap_or_else(|| from_card(|c| &c.company, UNKNOWN_COMPANY)),
        company_url: field(root, Entity::JobDetail, Field::CompanyUrl)
            .and_then(|href| clean_tracking_url(&href)),
        location: field(root, Entity::JobDetail, Field::Location)
            .or(insights.location)
            .unwrap_or_else(|| from_card(|c| &c.location, UNKNOWN_LOCATION)),
        posted_date: field(root, Entity::JobDetail, Field::Posted)
            .or(insights.posted)
            .or_else(|| card.and_then(|c| c.listed_date.clone()))
            .unwrap_or_default(),
        applicant_count: field(root, Entity::JobDetail, Field::Applicants)
            .or(insights.applicants)
            .unwrap_or_default(),
        description: field(root, Entity::JobDetail, Field::Description).unwrap_or_default(),
        benefits: field(root, Entity::JobDetail, Field::Benefits),
        employment_type,
        seniority_level,
    }
}
