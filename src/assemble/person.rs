//! Profile pages: top card, experience and education detail lists, and
//! the contact-info overlay.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use scraper::ElementRef;
use tracing::debug;

use super::{absolute_url, element_children, field};
use crate::catalog::{self, Entity, Field};
use crate::models::{Accomplishment, Education, Experience, Person};
use crate::resolve::{inner_text, resolve, resolve_all, resolve_element};

static YEAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b(19|20)\d{2}\b").expect("year pattern is valid"));

/// Fields read from the top of the main profile page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TopCard {
    pub name: String,
    pub headline: String,
    pub location: Option<String>,
    pub about: Option<String>,
    pub open_to_work: bool,
}

pub fn top_card(root: ElementRef<'_>) -> Option<TopCard> {
    let name = field(root, Entity::Profile, Field::Name)?;
    let open_to_work = field(root, Entity::Profile, Field::OpenToWork)
        .map(|badge| {
            let lower = badge.to_lowercase();
            lower.contains("#open_to_work") || lower.contains("open to work")
        })
        .unwrap_or(false);

    Some(TopCard {
        name,
        headline: field(root, Entity::Profile, Field::Headline).unwrap_or_default(),
        location: field(root, Entity::Profile, Field::Location),
        about: field(root, Entity::Profile, Field::About),
        open_to_work,
    })
}

/// Split "Jan 2020 - Present · 5 yrs 2 mos" into the date range and the
/// duration.
fn split_work_times(work_times: &str) -> (String, Option<String>) {
    let mut parts = work_times.splitn(2, '·').map(str::trim);
    let times = parts.next().unwrap_or_default().to_string();
    let duration = parts.next().filter(|d| !d.is_empty()).map(str::to_string);
    (times, duration)
}

/// Split "Jan 2020 - Present" into its two ends. A single date yields an
/// empty end.
fn split_date_range(times: &str) -> (String, String) {
    match times.split_once(['-', '–']) {
        Some((from, to)) => (from.trim().to_string(), to.trim().to_string()),
        None => (times.trim().to_string(), String::new()),
    }
}

/// "Acme · Full-time" names the company "Acme".
fn company_name(line: &str) -> String {
    line.split('·').next().unwrap_or_default().trim().to_string()
}

fn visible_lines(scope: ElementRef<'_>, entity: Entity) -> Vec<String> {
    resolve_all(scope, catalog::lookup(entity, Field::Value))
        .into_iter()
        .map(inner_text)
        .filter(|t| !t.is_empty())
        .collect()
}

/// The parts of a detail-list entity block: a logo link and the details
/// column, which itself holds a summary and an optional body.
struct EntityBlock<'a> {
    logo: Option<ElementRef<'a>>,
    summary: ElementRef<'a>,
    body: Option<ElementRef<'a>>,
}

fn entity_block<'a>(item: ElementRef<'a>, entity: Entity) -> Option<EntityBlock<'a>> {
    let block = resolve_element(item, catalog::lookup(entity, Field::Entity))?;
    let columns = element_children(block);
    if columns.len() < 2 {
        return None;
    }
    let details = element_children(columns[1]);
    let summary = *details.first()?;
    Some(EntityBlock {
        logo: Some(columns[0]),
        summary,
        body: details.get(1).copied(),
    })
}

struct Role {
    title: String,
    work_times: String,
    location: Option<String>,
}

/// Interpret the summary lines of an experience entry. Single-role entries
/// read title, company, dates, location; grouped entries read company,
/// total duration, location.
fn summary_layout(lines: &[String]) -> (Role, String) {
    let get = |i: usize| lines.get(i).cloned().unwrap_or_default();
    match lines.len() {
        n if n >= 4 => (
            Role {
                title: get(0),
                work_times: get(2),
                location: Some(get(3)),
            },
            get(1),
        ),
        3 if lines[2].contains('·') || YEAR.is_match(&lines[2]) => (
            Role {
                title: get(0),
                work_times: get(2),
                location: None,
            },
            get(1),
        ),
        3 => (
            Role {
                title: String::new(),
                work_times: get(1),
                location: Some(get(2)),
            },
            get(0),
        ),
        _ => (
            Role {
                title: String::new(),
                work_times: get(1),
                location: None,
            },
            get(0),
        ),
    }
}

fn experience_from(role: Role, company: &str, company_url: Option<String>, description: String) -> Experience {
    let (times, duration) = split_work_times(&role.work_times);
    let (from_date, to_date) = split_date_range(&times);
    Experience {
        position_title: role.title,
        institution_name: company_name(company),
        linkedin_url: company_url,
        description,
        from_date,
        to_date,
        duration,
        location: role.location.filter(|l| !l.is_empty()),
    }
}

/// Roles listed under one company in a grouped experience entry. Each
/// role's header link holds title, dates and location; anything else in
/// the item is its description.
fn nested_roles(body: ElementRef<'_>) -> Vec<(Role, String)> {
    let mut roles = Vec::new();
    for item in resolve_all(body, catalog::lookup(Entity::Experience, Field::Nested)) {
        let all = visible_lines(item, Entity::Experience);
        let header = resolve_element(item, catalog::lookup(Entity::Experience, Field::Summary))
            .map(|h| visible_lines(h, Entity::Experience))
            .filter(|lines| !lines.is_empty())
            .unwrap_or_else(|| all.iter().take(1).cloned().collect());
        let Some(title) = header.first().cloned() else {
            continue;
        };

        let times_at = header.iter().skip(1).position(|l| YEAR.is_match(l)).map(|i| i + 1);
        let role = Role {
            title,
            work_times: times_at.map(|i| header[i].clone()).unwrap_or_default(),
            location: times_at.and_then(|i| header.get(i + 1)).cloned(),
        };
        let description = all
            .into_iter()
            .filter(|line| !header.contains(line))
            .collect::<Vec<_>>()
            .join("\n");
        roles.push((role, description));
    }
    roles
}

/// Drop items nested inside other items of the same list.
fn top_level(items: Vec<ElementRef<'_>>) -> Vec<ElementRef<'_>> {
    let ids: Vec<_> = items.iter().map(|item| item.id()).collect();
    items
        .into_iter()
        .filter(|item| !item.ancestors().any(|a| ids.contains(&a.id())))
        .collect()
}

/// Experiences from the `details/experience` page.
pub fn experiences(root: ElementRef<'_>) -> Vec<Experience> {
    let mut found = Vec::new();
    let items = resolve_all(root, catalog::lookup(Entity::Experience, Field::Container));
    for item in top_level(items) {
        let Some(block) = entity_block(item, Entity::Experience) else {
            continue;
        };
        let company_url = block
            .logo
            .and_then(|logo| resolve(logo, catalog::lookup(Entity::Experience, Field::CompanyUrl)))
            .and_then(|href| absolute_url(&href));
        let lines = visible_lines(block.summary, Entity::Experience);
        if lines.is_empty() {
            continue;
        }
        let (role, company) = summary_layout(&lines);

        let nested = block.body.map(nested_roles).unwrap_or_default();
        if nested.len() > 1 {
            for (nested_role, description) in nested {
                found.push(experience_from(nested_role, &company, company_url.clone(), description));
            }
            continue;
        }

        let description = field(item, Entity::Experience, Field::Description)
            .or_else(|| block.body.map(|body| visible_lines(body, Entity::Experience).join("\n")))
            .unwrap_or_default();
        found.push(experience_from(role, &company, company_url, description));
    }
    debug!(target: "harvest.assemble", count = found.len(), "Parsed experiences");
    found
}

/// Educations from the `details/education` page.
pub fn educations(root: ElementRef<'_>) -> Vec<Education> {
    let mut found = Vec::new();
    let items = resolve_all(root, catalog::lookup(Entity::Education, Field::Container));
    for item in top_level(items) {
        let Some(block) = entity_block(item, Entity::Education) else {
            continue;
        };
        let lines = visible_lines(block.summary, Entity::Education);
        let Some(institution_name) = lines.first().cloned() else {
            continue;
        };

        let dates = lines.iter().skip(1).find(|l| YEAR.is_match(l));
        let degree = lines
            .get(1)
            .filter(|l| Some(*l) != dates)
            .cloned();
        let (from_date, to_date) = match dates {
            Some(range) => {
                let (from, to) = split_date_range(range);
                (Some(from).filter(|f| !f.is_empty()), Some(to).filter(|t| !t.is_empty()))
            }
            None => (None, None),
        };

        found.push(Education {
            institution_name,
            degree,
            linkedin_url: block
                .logo
                .and_then(|logo| resolve(logo, catalog::lookup(Entity::Education, Field::Url)))
                .and_then(|href| absolute_url(&href)),
            description: block
                .body
                .map(|body| visible_lines(body, Entity::Education).join("\n"))
                .unwrap_or_default(),
            from_date,
            to_date,
        });
    }
    found
}

/// Contact type to value, from the contact-info overlay.
pub fn contacts(root: ElementRef<'_>) -> BTreeMap<String, String> {
    let mut found = BTreeMap::new();
    for section in resolve_all(root, catalog::lookup(Entity::Contact, Field::Container)) {
        let Some(label) = field(section, Entity::Contact, Field::Label) else {
            continue;
        };
        let Some(value) = field(section, Entity::Contact, Field::Value) else {
            continue;
        };
        found.entry(label).or_insert(value);
    }
    found
}

/// Interest names from the main profile page, first occurrence kept.
pub fn interests(root: ElementRef<'_>) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    for item in resolve_all(root, catalog::lookup(Entity::Interest, Field::Container)) {
        if let Some(name) = field(item, Entity::Interest, Field::Title) {
            if !found.contains(&name) {
                found.push(name);
            }
        }
    }
    found
}

/// One entry per listed item of each accomplishments block, tagged with the
/// block's heading.
pub fn accomplishments(root: ElementRef<'_>) -> Vec<Accomplishment> {
    let mut found = Vec::new();
    for block in resolve_all(root, catalog::lookup(Entity::Accomplishment, Field::Container)) {
        let Some(category) = field(block, Entity::Accomplishment, Field::Label) else {
            continue;
        };
        for item in resolve_all(block, catalog::lookup(Entity::Accomplishment, Field::Value)) {
            let title = inner_text(item);
            if title.is_empty() {
                continue;
            }
            found.push(Accomplishment {
                category: category.clone(),
                title,
            });
        }
    }
    found
}

/// Snapshots that make up one person.
#[derive(Default, Clone, Copy)]
pub struct ProfilePages<'a> {
    pub main: Option<ElementRef<'a>>,
    pub experience: Option<ElementRef<'a>>,
    pub education: Option<ElementRef<'a>>,
    pub contact: Option<ElementRef<'a>>,
}

/// Build a person. Without a readable name there is no person.
pub fn assemble_person(linkedin_url: &str, pages: ProfilePages<'_>) -> Option<Person> {
    let main = pages.main?;
    let card = top_card(main)?;
    Some(Person {
        linkedin_url: linkedin_url.to_string(),
        name: card.name,
        headline: card.headline,
        location: card.location,
        about: card.about,
        open_to_work: card.open_to_work,
        experiences: pages.experience.map(experiences).unwrap_or_default(),
        educations: pages.education.map(educations).unwrap_or_default(),
        contacts: pages.contact.map(contacts).unwrap_or_default(),
        interests: interests(main),
        accomplishments: accomplishments(main),
    })
}
