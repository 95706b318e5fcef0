//! Heuristics for telling genuine user text apart from feed chrome.
//!
//! Comment containers on activity pages often also hold the parent post,
//! hiring banners and "reacted to this" headers. These checks decide what
//! counts as the comment itself.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::ReactionType;

/// Phrases that only appear in posts, banners and activity headers.
/// Matched case-insensitively as substrings.
const DENYLIST: &[&str] = &[
    "we're hiring",
    "🚀 exploring",
    "your next dfir teammate",
    "what's stopping you from",
    "feed post number",
    "post by",
    "shared a post",
    "posted this",
    "• view profile",
    "connect with",
    "follow",
    "ago • edited",
    "reacted to this",
    "liked this",
    "commented on this",
];

const MIN_COMMENT_CHARS: usize = 3;
const MAX_COMMENT_CHARS: usize = 1000;

/// Words marking a line as metadata or an action button.
const CHROME_WORDS: &[&str] = &["ago", "like", "reply", "view profile", "connect"];

/// Leading emoji used as post hooks.
const HOOK_EMOJI: &[char] = &['🚀', '🔥', '📢', '👉', '✨'];

pub fn is_genuine_comment(text: &str) -> bool {
    let trimmed = text.trim();
    let chars = trimmed.chars().count();
    if chars < MIN_COMMENT_CHARS {
        return false;
    }

    let lower = trimmed.to_lowercase();
    if DENYLIST.iter().any(|phrase| lower.contains(phrase)) {
        return false;
    }

    chars <= MAX_COMMENT_CHARS
}

fn looks_like_post(line: &str) -> bool {
    line.starts_with(HOOK_EMOJI) || line.starts_with("We're Hiring") || line.contains("DFIR")
}

/// Best guess at the comment inside a container's full text.
///
/// Returns the first line of moderate length that is not metadata or
/// post-like, else the first short line, else an empty string.
pub fn extract_comment_from_noisy_text(full_text: &str) -> String {
    let lines: Vec<&str> = full_text.lines().map(str::trim).collect();

    let preferred = lines.iter().find(|line| {
        let len = line.chars().count();
        if len <= 10 || len >= 500 {
            return false;
        }
        let lower = line.to_lowercase();
        !CHROME_WORDS.iter().any(|w| lower.contains(w)) && !looks_like_post(line)
    });
    if let Some(line) = preferred {
        return line.to_string();
    }

    lines
        .iter()
        .find(|line| {
            let len = line.chars().count();
            len > 5 && len < 200
        })
        .map(|line| line.to_string())
        .unwrap_or_default()
}

static COUNT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*([km])?\b").expect("count pattern is valid")
});

/// First number in an engagement label ("1,234 reactions", "1.2K"), 0 if
/// there is none.
pub fn extract_count(text: &str) -> u64 {
    let cleaned = text.replace(',', "");
    let Some(caps) = COUNT_RE.captures(&cleaned) else {
        return 0;
    };
    let value: f64 = caps[1].parse().unwrap_or(0.0);
    let scale = match caps.get(2).map(|m| m.as_str().to_ascii_lowercase()) {
        Some(s) if s == "k" => 1_000.0,
        Some(s) if s == "m" => 1_000_000.0,
        _ => 1.0,
    };
    (value * scale).round() as u64
}

/// Reaction type named by any of the given labels, `Like` if none does.
pub fn reaction_type_from_labels<I, S>(labels: I) -> ReactionType
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    for label in labels {
        let lower = label.as_ref().to_lowercase();
        let found = if lower.contains("love") {
            Some(ReactionType::Love)
        } else if lower.contains("celebrate") {
            Some(ReactionType::Celebrate)
        } else if lower.contains("support") {
            Some(ReactionType::Support)
        } else if lower.contains("insightful") {
            Some(ReactionType::Insightful)
        } else if lower.contains("funny") {
            Some(ReactionType::Funny)
        } else {
            None
        };
        if let Some(kind) = found {
            return kind;
        }
    }
    ReactionType::Like
}

/// First line longer than 10 chars that is not a timestamp.
pub fn first_meaningful_line(text: &str) -> Option<&str> {
    text.lines()
        .map(str::trim)
        .find(|line| line.chars().count() > 10 && !line.ends_with("ago"))
}

/// Shorten to at most `max` chars, marking the cut with "...".
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let keep = max.saturating_sub(3);
    let mut out: String = s.chars().take(keep).collect();
    out.push_str("...");
    out
}
