//! Report documents and the files they are written to.
//!
//! Every run produces a JSON document and a text rendering of the same
//! fields side by side.

use std::collections::BTreeMap;
use std::fmt::Display;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use serde::Serialize;
use textwrap::Options;
use tracing::info;
use url::Url;

use crate::catalog::CATALOG_REVISION;
use crate::models::{Comment, Education, Experience, Job, Person, Post, Reaction};

const WRAP_WIDTH: usize = 100;
const RULE: usize = 50;

/// Human-readable rendering of a record or document.
pub trait Render {
    fn render(&self, out: &mut String);
}

/// Metadata plus an ordered list of records of one kind.
#[derive(Debug, Clone, Serialize)]
pub struct Report<T> {
    pub target: String,
    pub scraped_at: DateTime<Local>,
    pub catalog_revision: String,
    pub kind: String,
    pub parameters: BTreeMap<String, String>,
    pub total: usize,
    pub records: Vec<T>,
}

impl<T> Report<T> {
    pub fn new(kind: &str, target: &str, records: Vec<T>) -> Self {
        Report {
            target: target.to_string(),
            scraped_at: Local::now(),
            catalog_revision: CATALOG_REVISION.to_string(),
            kind: kind.to_string(),
            parameters: BTreeMap::new(),
            total: records.len(),
            records,
        }
    }

    pub fn with_param(mut self, name: &str, value: impl Display) -> Self {
        self.parameters.insert(name.to_string(), value.to_string());
        self
    }
}

/// Singular label for one record of `kind` ("comments" -> "Comment").
fn record_label(kind: &str) -> String {
    let singular = kind.strip_suffix('s').unwrap_or(kind);
    let mut chars = singular.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => "Record".to_string(),
    }
}

impl<T: Render> Render for Report<T> {
    fn render(&self, out: &mut String) {
        let _ = writeln!(out, "LinkedIn {} Scrape Results", title_case(&self.kind));
        let _ = writeln!(out, "{}", "=".repeat(RULE));
        let _ = writeln!(out, "Target: {}", self.target);
        let _ = writeln!(out, "Scrape Date: {}", self.scraped_at.format("%Y-%m-%d %H:%M:%S"));
        for (name, value) in &self.parameters {
            let _ = writeln!(out, "{}: {}", title_case(name), value);
        }
        let _ = writeln!(out, "Total: {}\n", self.total);

        if self.records.is_empty() {
            let _ = writeln!(out, "No {} found.", self.kind.replace('_', " "));
            return;
        }
        let label = record_label(&self.kind);
        for (i, record) in self.records.iter().enumerate() {
            let _ = writeln!(out, "{} {}:", label, i + 1);
            record.render(out);
            let _ = writeln!(out, "{}\n", "-".repeat(40));
        }
    }
}

fn title_case(s: &str) -> String {
    s.split(['_', ' '])
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// `label:` on its own line followed by `text` wrapped and indented.
fn wrapped(out: &mut String, label: &str, text: &str) {
    if text.trim().is_empty() {
        return;
    }
    let options = Options::new(WRAP_WIDTH)
        .initial_indent("  ")
        .subsequent_indent("  ");
    let _ = writeln!(out, "{}:", label);
    for paragraph in text.lines().filter(|l| !l.trim().is_empty()) {
        let _ = writeln!(out, "{}", textwrap::fill(paragraph, &options));
    }
}

fn line(out: &mut String, label: &str, value: &str) {
    if !value.is_empty() {
        let _ = writeln!(out, "{}: {}", label, value);
    }
}

impl Render for Post {
    fn render(&self, out: &mut String) {
        wrapped(out, "Content", &self.content);
        line(out, "Posted", &self.posted_date);
        let _ = writeln!(
            out,
            "Engagement: {} likes, {} comments, {} shares",
            self.likes_count, self.comments_count, self.shares_count
        );
        let _ = writeln!(out, "Media: {}", self.media_type);
        line(out, "Author", &self.author_name);
        line(out, "Post URL", &self.post_url);
    }
}

impl Render for Comment {
    fn render(&self, out: &mut String) {
        wrapped(out, "Content", &self.content);
        line(out, "Commented", &self.commented_date);
        let _ = writeln!(out, "Engagement: {} likes, {} replies", self.likes_count, self.replies_count);
        line(out, "Original Post by", &self.post_author);
        line(out, "Post Preview", &self.post_content_preview);
        line(out, "Comment URL", &self.comment_url);
        line(out, "Post URL", &self.post_url);
        let _ = writeln!(out, "Commenter: {} ({})", self.commenter_name, self.commenter_url);
    }
}

impl Render for Reaction {
    fn render(&self, out: &mut String) {
        let _ = writeln!(out, "Reaction: {}", self.reaction_type);
        line(out, "Reacted", &self.reacted_date);
        line(out, "Post Author", &self.post_author);
        wrapped(out, "Post Preview", &self.post_preview);
        line(out, "Post URL", &self.post_url);
        let _ = writeln!(out, "Reactor: {} ({})", self.reactor_name, self.reactor_url);
    }
}

impl Render for Job {
    fn render(&self, out: &mut String) {
        let _ = writeln!(out, "{} at {}", self.title, self.company);
        line(out, "Location", &self.location);
        line(out, "Posted", &self.posted_date);
        line(out, "Applicants", &self.applicant_count);
        if let Some(kind) = &self.employment_type {
            line(out, "Employment Type", kind);
        }
        if let Some(level) = &self.seniority_level {
            line(out, "Seniority", level);
        }
        if let Some(benefits) = &self.benefits {
            line(out, "Benefits", benefits);
        }
        line(out, "URL", &self.linkedin_url);
        wrapped(out, "Description", &self.description);
    }
}

impl Render for Experience {
    fn render(&self, out: &mut String) {
        let _ = writeln!(out, "- {} at {}", self.position_title, self.institution_name);
        let dates = [self.from_date.as_str(), self.to_date.as_str()]
            .iter()
            .filter(|d| !d.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" - ");
        let span = match &self.duration {
            Some(duration) if !dates.is_empty() => format!("{} ({})", dates, duration),
            Some(duration) => duration.clone(),
            None => dates,
        };
        if !span.is_empty() {
            let _ = writeln!(out, "  {}", span);
        }
        if let Some(location) = &self.location {
            let _ = writeln!(out, "  {}", location);
        }
        wrapped(out, "  Description", &self.description);
    }
}

impl Render for Education {
    fn render(&self, out: &mut String) {
        match &self.degree {
            Some(degree) => {
                let _ = writeln!(out, "- {}, {}", self.institution_name, degree);
            }
            None => {
                let _ = writeln!(out, "- {}", self.institution_name);
            }
        }
        if let (Some(from), Some(to)) = (&self.from_date, &self.to_date) {
            let _ = writeln!(out, "  {} - {}", from, to);
        }
    }
}

impl Render for Person {
    fn render(&self, out: &mut String) {
        let _ = writeln!(out, "Name: {}", self.name);
        line(out, "Headline", &self.headline);
        if let Some(location) = &self.location {
            line(out, "Location", location);
        }
        if self.open_to_work {
            let _ = writeln!(out, "Open to work: yes");
        }
        if let Some(about) = &self.about {
            wrapped(out, "About", about);
        }
        if !self.experiences.is_empty() {
            let _ = writeln!(out, "\nExperience ({}):", self.experiences.len());
            self.experiences.iter().for_each(|e| e.render(out));
        }
        if !self.educations.is_empty() {
            let _ = writeln!(out, "\nEducation ({}):", self.educations.len());
            self.educations.iter().for_each(|e| e.render(out));
        }
        if !self.contacts.is_empty() {
            let _ = writeln!(out, "\nContact:");
            for (kind, value) in &self.contacts {
                let _ = writeln!(out, "  {}: {}", kind, value);
            }
        }
        if !self.interests.is_empty() {
            let _ = writeln!(out, "\nInterests: {}", self.interests.join(", "));
        }
        if !self.accomplishments.is_empty() {
            let _ = writeln!(out, "\nAccomplishments:");
            for accomplishment in &self.accomplishments {
                let _ = writeln!(out, "  {}: {}", accomplishment.category, accomplishment.title);
            }
        }
    }
}

/// Everything collected about one profile in a single run.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileReport {
    pub profile_url: String,
    pub scraped_at: DateTime<Local>,
    pub catalog_revision: String,
    pub person: Option<Person>,
    pub company: Option<String>,
    pub job_title: Option<String>,
    pub recent_posts: Vec<Post>,
    pub recent_comments: Vec<Comment>,
    pub recent_reactions: Vec<Reaction>,
    /// Section name to "success" or "error: <reason>".
    pub scraping_status: BTreeMap<String, String>,
}

impl ProfileReport {
    pub fn new(profile_url: &str) -> Self {
        ProfileReport {
            profile_url: profile_url.to_string(),
            scraped_at: Local::now(),
            catalog_revision: CATALOG_REVISION.to_string(),
            person: None,
            company: None,
            job_title: None,
            recent_posts: Vec::new(),
            recent_comments: Vec::new(),
            recent_reactions: Vec::new(),
            scraping_status: BTreeMap::new(),
        }
    }

    /// Record the outcome of one section and hand back its value, if any.
    pub fn record<T, E: Display>(&mut self, section: &str, result: Result<T, E>) -> Option<T> {
        match result {
            Ok(value) => {
                self.scraping_status.insert(section.to_string(), "success".to_string());
                Some(value)
            }
            Err(e) => {
                self.scraping_status.insert(section.to_string(), format!("error: {}", e));
                None
            }
        }
    }
}

fn section<T: Render>(out: &mut String, title: &str, records: &[T]) {
    let _ = writeln!(out, "\n{} ({}):", title, records.len());
    let _ = writeln!(out, "{}", "=".repeat(RULE));
    for (i, record) in records.iter().enumerate() {
        let _ = writeln!(out, "#{}", i + 1);
        record.render(out);
        let _ = writeln!(out);
    }
}

impl Render for ProfileReport {
    fn render(&self, out: &mut String) {
        let _ = writeln!(out, "LinkedIn Profile Report");
        let _ = writeln!(out, "{}", "=".repeat(RULE));
        let _ = writeln!(out, "Profile: {}", self.profile_url);
        let _ = writeln!(out, "Scrape Date: {}", self.scraped_at.format("%Y-%m-%d %H:%M:%S"));
        for (name, status) in &self.scraping_status {
            let _ = writeln!(out, "  {}: {}", name, status);
        }
        let _ = writeln!(out);
        match &self.person {
            Some(person) => person.render(out),
            None => {
                let _ = writeln!(out, "Profile details not available.");
            }
        }
        section(out, "Recent Posts", &self.recent_posts);
        section(out, "Recent Comments", &self.recent_comments);
        section(out, "Recent Reactions", &self.recent_reactions);
    }
}

pub fn render_text<D: Render + ?Sized>(doc: &D) -> String {
    let mut out = String::new();
    doc.render(&mut out);
    out
}

fn timestamp(at: DateTime<Local>) -> String {
    at.format("%Y%m%d_%H%M%S").to_string()
}

fn slug(s: &str) -> String {
    let words: Vec<String> = s
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect();
    if words.is_empty() {
        "unknown".to_string()
    } else {
        words.join("_")
    }
}

/// `linkedin_<kind>_<YYYYmmdd_HHMMSS>`
pub fn file_stem(kind: &str, at: DateTime<Local>) -> String {
    format!("linkedin_{}_{}", kind, timestamp(at))
}

/// `jobs_<company>_<title>_<YYYYmmdd_HHMMSS>`
pub fn jobs_file_stem(company: &str, title: &str, at: DateTime<Local>) -> String {
    format!("jobs_{}_{}_{}", slug(company), slug(title), timestamp(at))
}

/// Public identifier of a profile URL: the segment after `/in/`.
pub fn profile_slug(profile_url: &str) -> String {
    let identifier = Url::parse(profile_url).ok().and_then(|url| {
        let segments: Vec<String> = url.path_segments()?.map(str::to_string).collect();
        let at = segments.iter().position(|s| s == "in")?;
        segments.get(at + 1).filter(|s| !s.is_empty()).cloned()
    });
    identifier.unwrap_or_else(|| "profile".to_string())
}

/// `comprehensive_linkedin_data_<profile>_<YYYYmmdd_HHMMSS>`
pub fn profile_file_stem(profile_url: &str, at: DateTime<Local>) -> String {
    format!("comprehensive_linkedin_data_{}_{}", profile_slug(profile_url), timestamp(at))
}

/// Where a report went.
#[derive(Debug, Clone, PartialEq)]
pub struct Written {
    pub json: PathBuf,
    pub text: PathBuf,
}

/// Write `doc` as `<stem>.json` and `<stem>.txt` under `dir`.
pub fn write_report<D: Serialize + Render>(dir: &Path, stem: &str, doc: &D) -> Result<Written> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
    let written = Written {
        json: dir.join(format!("{}.json", stem)),
        text: dir.join(format!("{}.txt", stem)),
    };

    let json = serde_json::to_string_pretty(doc).context("Failed to serialize report")?;
    fs::write(&written.json, json)
        .with_context(|| format!("Failed to write {}", written.json.display()))?;
    fs::write(&written.text, render_text(doc))
        .with_context(|| format!("Failed to write {}", written.text.display()))?;

    info!(target: "harvest.output", json = %written.json.display(), text = %written.text.display(), "Report written");
    Ok(written)
}

/// Write only the JSON document to an explicit path.
pub fn write_json<D: Serialize>(path: &Path, doc: &D) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(doc).context("Failed to serialize report")?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    info!(target: "harvest.output", path = %path.display(), "Report written");
    Ok(())
}
