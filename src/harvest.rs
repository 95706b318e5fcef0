//! Scrape flows: navigate, scroll, snapshot, assemble.
//!
//! The [`Harvester`] is the only place that drives the browser. Every flow
//! ends by parsing a page-source snapshot and handing element scopes to the
//! assemblers, so what is extracted never depends on live element handles.

use std::collections::HashSet;
use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::Rng;
use scraper::{ElementRef, Html};
use tracing::{debug, info, warn};
use url::Url;

use crate::assemble::comment::assemble_comment;
use crate::assemble::job::{assemble_job_card, assemble_job_detail};
use crate::assemble::person::{assemble_person, top_card, ProfilePages};
use crate::assemble::post::assemble_post;
use crate::assemble::reaction::assemble_reaction;
use crate::browser::Page;
use crate::catalog::{self, Entity, Field, EMPTY_ACTIVITY_MARKERS};
use crate::config::{Activity, Settings};
use crate::error::{SessionError, SessionResult};
use crate::matching::{is_company_match, is_title_match};
use crate::models::{Comment, Job, JobCard, Owner, Person, Post, Reaction};
use crate::output::ProfileReport;
use crate::resolve::{analyze_page, dump_page_source, resolve_all};
use crate::scroll::{load_incrementally, ScrollReport, StopReason, Target};
use crate::temporal::{hours_ago, within_window};

pub const JOB_SEARCH_URL: &str = "https://www.linkedin.com/jobs/search/";
const JOB_SEARCH_LOCATION: &str = "Worldwide";

/// Which activity items to keep, newest first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Selection {
    /// The first `n` items on the page.
    Latest(usize),
    /// Items stamped at or after `cutoff`, optionally capped. Collection
    /// stops at the first item older than the cutoff.
    Since {
        cutoff: DateTime<Utc>,
        cap: Option<usize>,
    },
}

impl Selection {
    pub fn within_hours(hours: u32) -> Self {
        Selection::Since {
            cutoff: hours_ago(hours),
            cap: None,
        }
    }

    fn cap(&self) -> Option<usize> {
        match self {
            Selection::Latest(n) => Some(*n),
            Selection::Since { cap, .. } => *cap,
        }
    }

    fn admits(&self, raw_date: &str, now: DateTime<Utc>) -> bool {
        match self {
            Selection::Latest(_) => true,
            Selection::Since { cutoff, .. } => within_window(Some(raw_date), *cutoff, now),
        }
    }
}

/// Activity records carry the raw date they were stamped with.
trait Dated {
    fn raw_date(&self) -> &str;
}

impl Dated for Post {
    fn raw_date(&self) -> &str {
        &self.posted_date
    }
}

impl Dated for Comment {
    fn raw_date(&self) -> &str {
        &self.commented_date
    }
}

impl Dated for Reaction {
    fn raw_date(&self) -> &str {
        &self.reacted_date
    }
}

/// One of the profile's recent-activity tabs.
struct Feed {
    label: &'static str,
    path: &'static str,
    entity: Entity,
    activity: Activity,
    /// Class name counted in debug dumps.
    marker: &'static str,
}

const POSTS_FEED: Feed = Feed {
    label: "posts",
    path: "all",
    entity: Entity::Post,
    activity: Activity::Posts,
    marker: "feed-shared-update-v2",
};

const COMMENTS_FEED: Feed = Feed {
    label: "comments",
    path: "comments",
    entity: Entity::Comment,
    activity: Activity::Comments,
    marker: "comments-comment-entity",
};

const REACTIONS_FEED: Feed = Feed {
    label: "reactions",
    path: "reactions",
    entity: Entity::Reaction,
    activity: Activity::Reactions,
    marker: "feed-shared-update-v2",
};

/// Profile URL without query, fragment or trailing slash.
pub fn profile_base(url: &str) -> String {
    let without_query = url.split(['?', '#']).next().unwrap_or(url);
    without_query.trim_end_matches('/').to_string()
}

pub fn activity_url(profile_url: &str, path: &str) -> String {
    format!("{}/recent-activity/{}/", profile_base(profile_url), path)
}

pub fn job_search_url(keywords: &str) -> SessionResult<String> {
    Url::parse_with_params(
        JOB_SEARCH_URL,
        &[("keywords", keywords), ("location", JOB_SEARCH_LOCATION)],
    )
    .map(String::from)
    .map_err(|e| SessionError::Navigation {
        url: JOB_SEARCH_URL.to_string(),
        reason: e.to_string(),
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct JobQuery {
    pub company: String,
    pub title: String,
    pub max_results: usize,
    /// Visit each matching job's page for the full description.
    pub detailed: bool,
}

impl JobQuery {
    /// Keyword variants tried in turn; results are merged.
    fn keyword_variants(&self) -> [String; 3] {
        [
            format!("{} {}", self.title, self.company),
            self.title.clone(),
            format!("{} {}", self.company, self.title),
        ]
    }
}

struct Snapshot {
    html: String,
    doc: Html,
}

pub struct Harvester<'a, P: Page + ?Sized> {
    page: &'a mut P,
    settings: &'a Settings,
}

impl<'a, P: Page + ?Sized> Harvester<'a, P> {
    pub fn new(page: &'a mut P, settings: &'a Settings) -> Self {
        Harvester { page, settings }
    }

    /// Navigate and wait for any of `ready`. A page that never shows them is
    /// still captured; the assemblers decide what it holds.
    fn open(&mut self, url: &str, ready: &[&str]) -> SessionResult<()> {
        self.page.goto(url)?;
        if !ready.is_empty() && !self.page.wait_for_any(ready, self.settings.element_timeout)? {
            warn!(target: "harvest.flow", %url, "Expected content did not appear, reading page as is");
        }
        Ok(())
    }

    fn capture(&mut self) -> SessionResult<Snapshot> {
        let html = self.page.source()?;
        let doc = Html::parse_document(&html);
        Ok(Snapshot { html, doc })
    }

    fn load(&mut self, activity: Activity, target: Option<Target<'_>>) -> ScrollReport {
        let policy = self.settings.scroll_policy(activity);
        load_incrementally(&mut *self.page, &policy, target)
    }

    /// Pause between requests: the configured delay plus random jitter.
    fn throttle(&mut self) {
        let jitter_ms = self.settings.request_jitter.as_millis() as u64;
        let jitter = if jitter_ms > 0 {
            Duration::from_millis(rand::thread_rng().gen_range(0..=jitter_ms))
        } else {
            Duration::ZERO
        };
        let delay = self.settings.request_delay + jitter;
        if !delay.is_zero() {
            debug!(target: "harvest.flow", delay_ms = delay.as_millis() as u64, "Throttling");
            self.page.pause(delay);
        }
    }

    fn expand_sections(&mut self) -> SessionResult<usize> {
        self.page.click_all(&catalog::css_list(Entity::Page, Field::ShowMore))
    }

    /// Log (and, when enabled, save) a page that yielded no containers.
    fn report_empty(&self, label: &str, html: &str, marker: &str) {
        match &self.settings.debug_dir {
            Some(dir) => {
                if let Err(e) = dump_page_source(dir, label, html, marker, EMPTY_ACTIVITY_MARKERS) {
                    warn!(target: "harvest.flow", error = %e, "Failed to save page source");
                }
            }
            None => {
                let analysis = analyze_page(html, marker, EMPTY_ACTIVITY_MARKERS);
                warn!(target: "harvest.flow", label, ?analysis, "No containers found");
            }
        }
    }

    /// The profile at `url` as an activity owner. The name is empty when the
    /// top card cannot be read.
    pub fn owner(&mut self, url: &str) -> SessionResult<Owner> {
        let main_url = format!("{}/", profile_base(url));
        self.open(&main_url, &catalog::css_list(Entity::Profile, Field::Name))?;
        let snapshot = self.capture()?;
        let name = top_card(snapshot.doc.root_element())
            .map(|card| card.name)
            .unwrap_or_default();
        Ok(Owner { name, url: main_url })
    }

    fn detail_page(&mut self, url: &str, section: &str) -> SessionResult<Snapshot> {
        let detail_url = format!("{}/details/{}/", profile_base(url), section);
        self.open(&detail_url, &catalog::css_list(Entity::Experience, Field::Container))?;
        self.load(Activity::ProfileDetails, None);
        self.expand_sections()?;
        self.capture()
    }

    /// Person at `url` with experience, education and contact details.
    /// `None` when the profile's name cannot be read.
    pub fn profile(&mut self, url: &str) -> SessionResult<Option<Person>> {
        let main_url = format!("{}/", profile_base(url));
        info!(target: "harvest.flow", url = %main_url, "Scraping profile");

        self.open(&main_url, &catalog::css_list(Entity::Profile, Field::Name))?;
        self.expand_sections()?;
        let main = self.capture()?;

        let experience = self.detail_page(url, "experience")?;
        let education = self.detail_page(url, "education")?;

        let contact_url = format!("{}/overlay/contact-info/", profile_base(url));
        self.open(&contact_url, &catalog::css_list(Entity::Contact, Field::Container))?;
        let contact = self.capture()?;

        let pages = ProfilePages {
            main: Some(main.doc.root_element()),
            experience: Some(experience.doc.root_element()),
            education: Some(education.doc.root_element()),
            contact: Some(contact.doc.root_element()),
        };
        let person = assemble_person(&main_url, pages);
        match &person {
            Some(p) => info!(
                target: "harvest.flow",
                name = %p.name,
                experiences = p.experiences.len(),
                educations = p.educations.len(),
                "Profile assembled"
            ),
            None => self.report_empty("profile", &main.html, "pv-top-card"),
        }
        Ok(person)
    }

    fn collect<T, A>(&mut self, owner: &Owner, feed: &Feed, selection: &Selection, assemble: A) -> SessionResult<Vec<T>>
    where
        T: Dated,
        A: Fn(ElementRef<'_>) -> Option<T>,
    {
        let url = activity_url(&owner.url, feed.path);
        info!(target: "harvest.flow", %url, feed = feed.label, ?selection, "Scraping activity");

        let containers = catalog::css_list(feed.entity, Field::Container);
        self.open(&url, &containers)?;
        let target = match (containers.first().copied(), selection.cap()) {
            (Some(selector), Some(count)) => Some(Target { selector, count }),
            _ => None,
        };
        let scroll = self.load(feed.activity, target);
        if scroll.reason == StopReason::Stalled {
            warn!(target: "harvest.flow", feed = feed.label, scrolls = scroll.scrolls, "Scrolling stalled, extracting what loaded");
        }

        let snapshot = self.capture()?;
        let scopes = resolve_all(snapshot.doc.root_element(), catalog::lookup(feed.entity, Field::Container));
        if scopes.is_empty() {
            self.report_empty(feed.label, &snapshot.html, feed.marker);
            return Ok(Vec::new());
        }

        let now = Utc::now();
        let mut records = Vec::new();
        let mut skipped = 0;
        for scope in scopes {
            if selection.cap().is_some_and(|cap| records.len() >= cap) {
                break;
            }
            let Some(record) = assemble(scope) else {
                skipped += 1;
                continue;
            };
            if !selection.admits(record.raw_date(), now) {
                debug!(target: "harvest.flow", date = record.raw_date(), "Reached activity outside the window");
                break;
            }
            records.push(record);
        }

        info!(target: "harvest.flow", feed = feed.label, kept = records.len(), skipped, "Activity collected");
        Ok(records)
    }

    pub fn posts(&mut self, owner: &Owner, selection: &Selection) -> SessionResult<Vec<Post>> {
        self.collect(owner, &POSTS_FEED, selection, |scope| assemble_post(scope, owner))
    }

    pub fn comments(&mut self, owner: &Owner, selection: &Selection) -> SessionResult<Vec<Comment>> {
        let policy = self.settings.misclassified;
        self.collect(owner, &COMMENTS_FEED, selection, |scope| assemble_comment(scope, owner, policy))
    }

    pub fn reactions(&mut self, owner: &Owner, limit: usize) -> SessionResult<Vec<Reaction>> {
        self.collect(owner, &REACTIONS_FEED, &Selection::Latest(limit), |scope| {
            assemble_reaction(scope, owner)
        })
    }

    fn search_cards(&mut self, keywords: &str, company_hint: &str) -> SessionResult<Vec<JobCard>> {
        let url = job_search_url(keywords)?;
        info!(target: "harvest.flow", %keywords, "Searching jobs");
        self.open(&url, &catalog::css_list(Entity::JobCard, Field::Ready))?;
        self.load(Activity::JobSearch, None);

        let snapshot = self.capture()?;
        let scopes = resolve_all(snapshot.doc.root_element(), catalog::lookup(Entity::JobCard, Field::Container));
        if scopes.is_empty() {
            self.report_empty("jobs", &snapshot.html, "jobs-search");
            return Ok(Vec::new());
        }
        Ok(scopes
            .into_iter()
            .filter_map(|scope| assemble_job_card(scope, Some(company_hint)))
            .collect())
    }

    /// Jobs at `query.company` whose title contains every word of
    /// `query.title`. A failed search variant is skipped; a failed detail
    /// fetch keeps the search-card data.
    pub fn search_jobs(&mut self, query: &JobQuery) -> SessionResult<Vec<Job>> {
        let mut seen = HashSet::new();
        let mut cards = Vec::new();
        for keywords in query.keyword_variants() {
            match self.search_cards(&keywords, &query.company) {
                Ok(found) => {
                    debug!(target: "harvest.flow", %keywords, found = found.len(), "Search returned cards");
                    for card in found {
                        if seen.insert(card.linkedin_url.clone()) {
                            cards.push(card);
                        }
                    }
                }
                Err(e) => warn!(target: "harvest.flow", %keywords, error = %e, "Job search failed"),
            }
        }
        info!(target: "harvest.flow", unique = cards.len(), "Collected job cards");

        let mut jobs = Vec::new();
        for card in cards.into_iter().take(query.max_results) {
            if !is_company_match(&card.company, &query.company) || !is_title_match(&card.title, &query.title) {
                continue;
            }
            info!(target: "harvest.flow", title = %card.title, company = %card.company, "Match found");
            let job = if query.detailed {
                self.throttle();
                match self.job(&card.linkedin_url, Some(&card)) {
                    Ok(job) => job,
                    Err(e) => {
                        warn!(target: "harvest.flow", url = %card.linkedin_url, error = %e, "Job details unavailable, keeping search data");
                        Job::from(card)
                    }
                }
            } else {
                Job::from(card)
            };
            jobs.push(job);
            if jobs.len() >= query.max_results {
                break;
            }
        }
        Ok(jobs)
    }

    /// One job page, with the description expanded. Values missing from
    /// the page come from `card` when given.
    pub fn job(&mut self, url: &str, card: Option<&JobCard>) -> SessionResult<Job> {
        self.open(url, &catalog::css_list(Entity::JobDetail, Field::Ready))?;
        if self.page.click_first(&catalog::css_list(Entity::JobDetail, Field::ShowMore))? {
            debug!(target: "harvest.flow", "Expanded job description");
        }
        let snapshot = self.capture()?;
        Ok(assemble_job_detail(snapshot.doc.root_element(), url, card))
    }

    /// Profile plus recent posts, comments and reactions. A failing section
    /// is recorded in the report and the next one still runs.
    pub fn comprehensive(&mut self, url: &str, activity_limit: usize, hours: u32) -> ProfileReport {
        let mut report = ProfileReport::new(url);

        let person = report.record("profile", self.profile(url)).flatten();
        let owner = Owner {
            name: person.as_ref().map(|p| p.name.clone()).unwrap_or_default(),
            url: format!("{}/", profile_base(url)),
        };
        report.company = person.as_ref().and_then(Person::company).map(str::to_string);
        report.job_title = person.as_ref().and_then(Person::job_title).map(str::to_string);
        report.person = person;

        let recent = Selection::Since {
            cutoff: hours_ago(hours),
            cap: Some(activity_limit),
        };
        report.recent_posts = report.record("posts", self.posts(&owner, &recent)).unwrap_or_default();
        report.recent_comments = report
            .record("comments", self.comments(&owner, &recent))
            .unwrap_or_default();
        report.recent_reactions = report
            .record("reactions", self.reactions(&owner, activity_limit))
            .unwrap_or_default();
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::testing::FixturePage;
    use crate::classify::is_genuine_comment;

    const PROFILE: &str = "https://www.linkedin.com/in/jane-doe/";

    fn owner() -> Owner {
        Owner {
            name: "Jane Doe".to_string(),
            url: PROFILE.to_string(),
        }
    }

    fn comment_block(date: &str, text: &str) -> String {
        format!(
            r#"<article class="comments-comment-entity"><time>{}</time>
                 <div class="comments-comment-item__main-content">{}</div></article>"#,
            date, text
        )
    }

    fn comments_page(blocks: &[String]) -> String {
        format!(
            r#"<main><div class="feed-shared-update-v2">
                 <a href="/feed/update/urn:li:activity:9/">post</a>
                 <span class="feed-shared-actor__name">Sam Poster</span>
                 <div class="feed-shared-text">Release notes for the new crawler.</div>
                 {}
               </div></main>"#,
            blocks.concat()
        )
    }

    #[test]
    fn test_activity_urls() {
        assert_eq!(
            activity_url("https://www.linkedin.com/in/jane-doe/?trk=x", "comments"),
            "https://www.linkedin.com/in/jane-doe/recent-activity/comments/"
        );
        assert_eq!(profile_base("https://www.linkedin.com/in/jane-doe"), "https://www.linkedin.com/in/jane-doe");
        let url = job_search_url("Rust Engineer Acme").unwrap();
        assert!(url.starts_with(JOB_SEARCH_URL));
        assert!(url.contains("keywords=Rust+Engineer+Acme"));
        assert!(url.contains("location=Worldwide"));
    }

    #[test]
    fn test_comments_skip_post_shaped_containers() {
        let blocks = vec![
            comment_block("1h ago", "Great insights! Thanks for sharing."),
            comment_block("2h ago", "We're Hiring: Senior Rust Engineers, apply through our careers page"),
            comment_block("3h ago", "Congrats on the launch, well deserved."),
            comment_block("4h ago", "This matches what we saw in production too."),
            comment_block("5h ago", "🚀 Exploring new opportunities in DFIR and incident response"),
            comment_block("6h ago", "Interesting approach to the problem."),
            comment_block("7h ago", "Could you share the benchmark setup?"),
        ];
        let mut page = FixturePage::new().with_page(
            &activity_url(PROFILE, "comments"),
            &comments_page(&blocks),
        );
        let settings = Settings::instant();
        let comments = Harvester::new(&mut page, &settings)
            .comments(&owner(), &Selection::Latest(10))
            .unwrap();

        assert_eq!(comments.len(), 5);
        for comment in &comments {
            assert!(is_genuine_comment(&comment.content), "{}", comment.content);
            let lower = comment.content.to_lowercase();
            assert!(!lower.contains("hiring"));
            assert!(!lower.contains("exploring"));
            assert_eq!(comment.commenter_name, "Jane Doe");
            assert_eq!(comment.post_author, "Sam Poster");
        }
        assert_eq!(comments[0].content, "Great insights! Thanks for sharing.");
        assert_eq!(comments[4].content, "Could you share the benchmark setup?");
    }

    #[test]
    fn test_comments_latest_caps_results() {
        let blocks: Vec<String> = (1..=4)
            .map(|i| comment_block(&format!("{}h ago", i), &format!("Comment number {} here", i)))
            .collect();
        let mut page = FixturePage::new().with_page(
            &activity_url(PROFILE, "comments"),
            &comments_page(&blocks),
        );
        let settings = Settings::instant();
        let comments = Harvester::new(&mut page, &settings)
            .comments(&owner(), &Selection::Latest(2))
            .unwrap();
        assert_eq!(comments.len(), 2);
        // Target already on the page, so no scrolling happened.
        assert!(page.pauses.is_empty());
    }

    #[test]
    fn test_comments_window_stops_at_first_old_item() {
        let blocks = vec![
            comment_block("1h ago", "Fresh comment one"),
            comment_block("3h ago", "Fresh comment two"),
            comment_block("3d ago", "Old comment"),
            comment_block("2h ago", "Out of order comment"),
        ];
        let mut page = FixturePage::new().with_page(
            &activity_url(PROFILE, "comments"),
            &comments_page(&blocks),
        );
        let settings = Settings::instant();
        let comments = Harvester::new(&mut page, &settings)
            .comments(&owner(), &Selection::within_hours(24))
            .unwrap();
        let contents: Vec<&str> = comments.iter().map(|c| c.content.as_str()).collect();
        assert_eq!(contents, vec!["Fresh comment one", "Fresh comment two"]);
    }

    #[test]
    fn test_empty_activity_page_is_dumped() {
        let dir = std::env::temp_dir().join(format!("harvest-flow-{}", std::process::id()));
        let mut page = FixturePage::new().with_page(
            &activity_url(PROFILE, "all"),
            "<main><p>Jane hasn't posted yet</p></main>",
        );
        let settings = Settings {
            debug_dir: Some(dir.clone()),
            ..Settings::instant()
        };
        let posts = Harvester::new(&mut page, &settings)
            .posts(&owner(), &Selection::Latest(5))
            .unwrap();
        assert!(posts.is_empty());

        let dumped: Vec<_> = std::fs::read_dir(&dir).unwrap().collect();
        assert_eq!(dumped.len(), 1);
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_posts_and_reactions() {
        let posts_html = r#"<main>
            <div class="feed-shared-update-v2" data-urn="urn:li:activity:1">
              <time>2h ago</time><div class="feed-shared-text">Shipping today.</div>
              <a href="/posts/jane-doe_ship-activity-1">link</a></div>
            <div class="feed-shared-update-v2" data-urn="urn:li:activity:2">
              <time>5d ago</time><div class="feed-shared-text">Older thoughts.</div></div>
          </main>"#;
        let reactions_html = r#"<main>
            <div class="feed-shared-update-v2"><span class="feed-shared-actor__name">Alex</span>
              <div class="feed-shared-text">First reacted post.</div><img class="reaction-icon" alt="love"></div>
            <div class="feed-shared-update-v2"><div class="feed-shared-text">Second reacted post.</div></div>
            <div class="feed-shared-update-v2"><div class="feed-shared-text">Third reacted post.</div></div>
          </main>"#;
        let mut page = FixturePage::new()
            .with_page(&activity_url(PROFILE, "all"), posts_html)
            .with_page(&activity_url(PROFILE, "reactions"), reactions_html);
        let settings = Settings::instant();
        let mut harvester = Harvester::new(&mut page, &settings);

        let posts = harvester.posts(&owner(), &Selection::within_hours(24)).unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].author_name, "Jane Doe");
        assert_eq!(posts[0].post_url, "https://www.linkedin.com/posts/jane-doe_ship-activity-1");

        let reactions = harvester.reactions(&owner(), 2).unwrap();
        assert_eq!(reactions.len(), 2);
        assert_eq!(reactions[0].post_author, "Alex");
        assert_eq!(reactions[0].reactor_url, PROFILE);
    }

    #[test]
    fn test_posts_scroll_until_height_settles() {
        let posts_html = r#"<main>
            <div class="feed-shared-update-v2" data-urn="urn:li:activity:1">
              <time>1h ago</time><div class="feed-shared-text">Fresh post.</div></div>
          </main>"#;
        let pause = Duration::from_millis(7);
        let settings = Settings {
            scroll_pause: Some(pause),
            ..Settings::instant()
        };

        // Grows twice, then stays put: the third scroll sees no growth.
        let mut page = FixturePage::new()
            .with_page(&activity_url(PROFILE, "all"), posts_html)
            .with_heights(vec![1000, 1600, 2200, 2200]);
        let posts = Harvester::new(&mut page, &settings)
            .posts(&owner(), &Selection::within_hours(24))
            .unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(page.pauses, vec![pause; 3]);

        // Never settles: the scroll ceiling ends it.
        let mut page = FixturePage::new()
            .with_page(&activity_url(PROFILE, "all"), posts_html)
            .with_heights((1..=20).map(|i| i * 500).collect());
        let capped = Settings {
            max_scrolls: Some(4),
            ..settings.clone()
        };
        let posts = Harvester::new(&mut page, &capped)
            .posts(&owner(), &Selection::within_hours(24))
            .unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(page.pauses, vec![pause; 4]);
    }

    fn card(href: &str, title: &str, company: &str) -> String {
        format!(
            r#"<li><div class="base-search-card"><a class="base-card__full-link" href="{}"></a>
                 <h3 class="base-search-card__title">{}</h3>
                 <h4 class="base-search-card__subtitle"><a>{}</a></h4>
                 <span class="job-search-card__location">Remote</span></div></li>"#,
            href, title, company
        )
    }

    fn results(cards: &[String]) -> String {
        format!(r#"<main><ul class="jobs-search__results-list">{}</ul></main>"#, cards.concat())
    }

    fn job_search_site() -> FixturePage {
        let query = JobQuery {
            company: "Acme".to_string(),
            title: "Rust Engineer".to_string(),
            max_results: 10,
            detailed: false,
        };
        let [first, second, _third] = query.keyword_variants();
        FixturePage::new()
            .with_page(
                &job_search_url(&first).unwrap(),
                &results(&[
                    card("/jobs/view/1?trk=a", "Rust Engineer", "Acme"),
                    card("/jobs/view/2", "Rust Engineer", "Globex"),
                    card("/jobs/view/3", "Sales Manager", "Acme"),
                ]),
            )
            .with_page(
                &job_search_url(&second).unwrap(),
                &results(&[
                    card("/jobs/view/1?trk=b", "Rust Engineer", "Acme"),
                    card("/jobs/view/4", "Senior Rust Engineer", "Acme Inc."),
                ]),
            )
    }

    #[test]
    fn test_search_jobs_filters_and_dedupes() {
        let mut page = job_search_site();
        let settings = Settings::instant();
        let query = JobQuery {
            company: "Acme".to_string(),
            title: "Rust Engineer".to_string(),
            max_results: 10,
            detailed: false,
        };
        let jobs = Harvester::new(&mut page, &settings).search_jobs(&query).unwrap();
        let urls: Vec<&str> = jobs.iter().map(|j| j.linkedin_url.as_str()).collect();
        assert_eq!(
            urls,
            vec!["https://www.linkedin.com/jobs/view/1", "https://www.linkedin.com/jobs/view/4"]
        );
        // The third variant has no page; the search still succeeds.
        assert_eq!(page.visited.len(), 3);
    }

    #[test]
    fn test_search_jobs_detailed_falls_back_to_card() {
        let detail = r#"<main><h1 class="job-details-jobs-unified-top-card__job-title">Rust Engineer</h1>
            <div class="jobs-description__content"><p>Build crawlers.</p></div>
            <button class="show-more-less-html__button">Show more</button></main>"#;
        let mut page = job_search_site().with_page("https://www.linkedin.com/jobs/view/1", detail);
        let settings = Settings {
            request_delay: Duration::from_secs(2),
            ..Settings::instant()
        };
        let query = JobQuery {
            company: "Acme".to_string(),
            title: "Rust Engineer".to_string(),
            max_results: 10,
            detailed: true,
        };
        let jobs = Harvester::new(&mut page, &settings).search_jobs(&query).unwrap();
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].description, "Build crawlers.");
        assert_eq!(jobs[0].company, "Acme");
        assert!(jobs[1].description.is_empty());
        assert_eq!(jobs[1].title, "Senior Rust Engineer");

        assert!(page.clicked.iter().any(|s| s == "button.show-more-less-html__button"));
        assert_eq!(page.pauses.iter().filter(|d| **d == Duration::from_secs(2)).count(), 2);
    }

    #[test]
    fn test_search_jobs_respects_max_results() {
        let mut page = job_search_site();
        let settings = Settings::instant();
        let query = JobQuery {
            company: "Acme".to_string(),
            title: "Rust Engineer".to_string(),
            max_results: 1,
            detailed: false,
        };
        let jobs = Harvester::new(&mut page, &settings).search_jobs(&query).unwrap();
        assert_eq!(jobs.len(), 1);
    }

    const MAIN: &str = r#"<main>
        <div class="mt2 relative"><h1>Jane Doe</h1>
          <div class="text-body-medium break-words">Engineer at Initech</div></div>
        <button class="inline-show-more-text__button">see more</button>
      </main>"#;

    const EXPERIENCE: &str = r#"<main><ul><li class="pvs-list__paged-list-item"><div data-view-name="profile-component-entity">
        <div><a href="/company/initech/"><img></a></div>
        <div><div><div><span aria-hidden="true">Engineer</span></div><div><span aria-hidden="true">Initech · Full-time</span></div><div><span aria-hidden="true">Jun 2015 - Feb 2019 · 3 yrs 9 mos</span></div><div><span aria-hidden="true">Austin, TX</span></div></div></div>
      </div></li></ul></main>"#;

    fn profile_site() -> FixturePage {
        FixturePage::new()
            .with_page(PROFILE, MAIN)
            .with_page("https://www.linkedin.com/in/jane-doe/details/experience/", EXPERIENCE)
            .with_page("https://www.linkedin.com/in/jane-doe/details/education/", "<main></main>")
            .with_page(
                "https://www.linkedin.com/in/jane-doe/overlay/contact-info/",
                r#"<section class="pv-contact-info__contact-type"><h3>Email</h3><a>jane@example.com</a></section>"#,
            )
    }

    #[test]
    fn test_profile_visits_every_section() {
        let mut page = profile_site();
        let settings = Settings::instant();
        let person = Harvester::new(&mut page, &settings)
            .profile("https://www.linkedin.com/in/jane-doe")
            .unwrap()
            .unwrap();

        assert_eq!(person.linkedin_url, PROFILE);
        assert_eq!(person.name, "Jane Doe");
        assert_eq!(person.company(), Some("Initech"));
        assert_eq!(person.job_title(), Some("Engineer"));
        assert!(person.educations.is_empty());
        assert_eq!(person.contacts.get("Email").map(String::as_str), Some("jane@example.com"));
        assert_eq!(page.visited.len(), 4);
        assert!(page.clicked.iter().any(|s| s == "button.inline-show-more-text__button"));
    }

    #[test]
    fn test_owner_reads_name() {
        let mut page = profile_site();
        let settings = Settings::instant();
        let owner = Harvester::new(&mut page, &settings).owner(PROFILE).unwrap();
        assert_eq!(
            owner,
            Owner {
                name: "Jane Doe".to_string(),
                url: PROFILE.to_string(),
            }
        );
    }

    #[test]
    fn test_comprehensive_records_failed_sections() {
        let blocks = vec![comment_block("1h ago", "Nice write-up, thanks!")];
        let mut page = profile_site().with_page(&activity_url(PROFILE, "comments"), &comments_page(&blocks));
        let settings = Settings::instant();
        let report = Harvester::new(&mut page, &settings).comprehensive(PROFILE, 5, 24);

        assert_eq!(report.scraping_status["profile"], "success");
        assert_eq!(report.scraping_status["comments"], "success");
        assert!(report.scraping_status["posts"].starts_with("error: Navigation to"));
        assert!(report.scraping_status["reactions"].starts_with("error:"));

        assert_eq!(report.company.as_deref(), Some("Initech"));
        assert_eq!(report.job_title.as_deref(), Some("Engineer"));
        assert_eq!(report.recent_comments.len(), 1);
        assert_eq!(report.recent_comments[0].commenter_name, "Jane Doe");
        assert!(report.recent_posts.is_empty());
    }

    #[test]
    fn test_throttle_uses_request_delay() {
        let mut page = FixturePage::new();
        let settings = Settings {
            request_delay: Duration::from_secs(2),
            ..Settings::instant()
        };
        Harvester::new(&mut page, &settings).throttle();
        assert_eq!(page.pauses, vec![Duration::from_secs(2)]);
    }
}
