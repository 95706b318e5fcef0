use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Experience {
    pub position_title: String,
    pub institution_name: String,
    pub linkedin_url: Option<String>, // company page
    pub description: String,
    pub from_date: String,
    pub to_date: String,
    pub duration: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Education {
    pub institution_name: String,
    pub degree: Option<String>,
    pub linkedin_url: Option<String>,
    pub description: String,
    pub from_date: Option<String>,
    pub to_date: Option<String>,
}

/// One line of a profile's accomplishments card ("Honors & awards": "Dean's List").
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Accomplishment {
    pub category: String,
    pub title: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Person {
    pub linkedin_url: String,
    pub name: String,
    pub headline: String,
    pub location: Option<String>,
    pub about: Option<String>,
    pub open_to_work: bool,
    pub experiences: Vec<Experience>,
    pub educations: Vec<Education>,
    pub contacts: BTreeMap<String, String>, // contact type -> value
    pub interests: Vec<String>,
    pub accomplishments: Vec<Accomplishment>,
}

impl Person {
    /// Employer of the most recent position.
    pub fn company(&self) -> Option<&str> {
        self.experiences
            .first()
            .map(|e| e.institution_name.as_str())
            .filter(|s| !s.is_empty())
    }

    pub fn job_title(&self) -> Option<&str> {
        self.experiences
            .first()
            .map(|e| e.position_title.as_str())
            .filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    #[default]
    Text,
    Image,
    Video,
    Document,
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MediaType::Text => "text",
            MediaType::Image => "image",
            MediaType::Video => "video",
            MediaType::Document => "document",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Post {
    pub content: String,
    pub posted_date: String, // raw, as shown on the page
    pub likes_count: u64,
    pub comments_count: u64,
    pub shares_count: u64,
    pub media_type: MediaType,
    pub author_name: String,
    pub author_url: String,
    pub post_url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Comment {
    pub content: String,
    pub commented_date: String,
    pub likes_count: u64,
    pub replies_count: u64,
    pub comment_url: String,
    pub post_url: String,
    pub post_author: String,
    pub post_content_preview: String, // at most 100 chars
    pub commenter_name: String,
    pub commenter_url: String,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReactionType {
    #[default]
    Like,
    Love,
    Celebrate,
    Support,
    Insightful,
    Funny,
}

impl fmt::Display for ReactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReactionType::Like => "like",
            ReactionType::Love => "love",
            ReactionType::Celebrate => "celebrate",
            ReactionType::Support => "support",
            ReactionType::Insightful => "insightful",
            ReactionType::Funny => "funny",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Reaction {
    pub post_preview: String, // at most 200 chars
    pub post_author: String,
    pub post_url: String,
    pub reacted_date: String,
    pub reaction_type: ReactionType,
    pub reactor_name: String,
    pub reactor_url: String,
}

/// A job as it appears in a search result list.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct JobCard {
    pub linkedin_url: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub listed_date: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Job {
    pub linkedin_url: String,
    pub title: String,
    pub company: String,
    pub company_url: Option<String>,
    pub location: String,
    pub posted_date: String,
    pub applicant_count: String,
    pub description: String,
    pub benefits: Option<String>,
    pub employment_type: Option<String>,
    pub seniority_level: Option<String>,
}

impl From<JobCard> for Job {
    fn from(card: JobCard) -> Self {
        Job {
            linkedin_url: card.linkedin_url,
            title: card.title,
            company: card.company,
            location: card.location,
            posted_date: card.listed_date.unwrap_or_default(),
            ..Job::default()
        }
    }
}

/// The profile whose activity is being collected.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Owner {
    pub name: String,
    pub url: String,
}
