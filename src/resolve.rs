//! Fallback resolution of catalog candidates against a page snapshot.
//!
//! Candidates are tried strictly in order and the first non-empty value
//! wins. Misses are silent; callers decide what a total miss means.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use scraper::node::Node;
use scraper::{ElementRef, Selector};
use tracing::{debug, info, trace, warn};

use crate::catalog::{Candidate, Extract, Query};

/// Outcome of [`resolve_where`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Accepted(String),
    /// Some candidate produced text, but none of it was accepted.
    Rejected,
    Missing,
}

fn parse(selector: &str) -> Option<Selector> {
    match Selector::parse(selector) {
        Ok(parsed) => Some(parsed),
        Err(err) => {
            trace!(target: "harvest.resolve", %selector, error = ?err, "Unparsable selector");
            None
        }
    }
}

fn select_first<'a>(scope: ElementRef<'a>, selector: &str) -> Option<ElementRef<'a>> {
    let parsed = parse(selector)?;
    scope.select(&parsed).next()
}

fn locate<'a>(scope: ElementRef<'a>, query: &Query) -> Option<ElementRef<'a>> {
    match *query {
        Query::Css(selector) => select_first(scope, selector),
        Query::Ancestor(fragment) => scope.ancestors().filter_map(ElementRef::wrap).find(|el| {
            el.value()
                .attr("class")
                .is_some_and(|class| class.contains(fragment))
        }),
        Query::Sibling { anchor, then } => {
            let anchor = select_first(scope, anchor)?;
            let parent = anchor.parent().and_then(ElementRef::wrap)?;
            select_first(parent, then)
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn extract(element: ElementRef<'_>, how: &Extract) -> Option<String> {
    match *how {
        Extract::Text => non_empty(Some(&inner_text(element))),
        Extract::Attr(name) => non_empty(element.value().attr(name)),
        Extract::AttrOrText(name) => {
            non_empty(element.value().attr(name)).or_else(|| non_empty(Some(&inner_text(element))))
        }
        Extract::TextOrAttr(name) => {
            non_empty(Some(&inner_text(element))).or_else(|| non_empty(element.value().attr(name)))
        }
    }
}

/// Value of the first candidate that yields a non-empty string.
pub fn resolve(scope: ElementRef<'_>, candidates: &[Candidate]) -> Option<String> {
    for candidate in candidates {
        if let Some(value) = locate(scope, &candidate.query).and_then(|el| extract(el, &candidate.extract)) {
            trace!(target: "harvest.resolve", query = ?candidate.query, "Candidate matched");
            return Some(value);
        }
    }
    None
}

/// Like [`resolve`], but a value only counts if `accept` approves it.
/// Rejected values move on to the next candidate.
pub fn resolve_where<F>(scope: ElementRef<'_>, candidates: &[Candidate], accept: F) -> Resolution
where
    F: Fn(&str) -> bool,
{
    let mut saw_text = false;
    for candidate in candidates {
        let Some(value) = locate(scope, &candidate.query).and_then(|el| extract(el, &candidate.extract)) else {
            continue;
        };
        if accept(&value) {
            return Resolution::Accepted(value);
        }
        debug!(target: "harvest.resolve", query = ?candidate.query, "Candidate text rejected");
        saw_text = true;
    }
    if saw_text { Resolution::Rejected } else { Resolution::Missing }
}

/// First element located by any candidate.
pub fn resolve_element<'a>(scope: ElementRef<'a>, candidates: &[Candidate]) -> Option<ElementRef<'a>> {
    candidates.iter().find_map(|c| locate(scope, &c.query))
}

/// All matches of the first CSS candidate that matches anything.
pub fn resolve_all<'a>(scope: ElementRef<'a>, candidates: &[Candidate]) -> Vec<ElementRef<'a>> {
    for candidate in candidates {
        let Some(selector) = candidate.css() else {
            continue;
        };
        let Some(parsed) = parse(selector) else {
            continue;
        };
        let found: Vec<ElementRef<'a>> = scope.select(&parsed).collect();
        if !found.is_empty() {
            debug!(target: "harvest.resolve", %selector, count = found.len(), "Found containers");
            return found;
        }
    }
    Vec::new()
}

/// Values from every element matched by any candidate, in candidate order.
pub fn resolve_each(scope: ElementRef<'_>, candidates: &[Candidate]) -> Vec<String> {
    let mut values = Vec::new();
    for candidate in candidates {
        let Some(parsed) = candidate.css().and_then(parse) else {
            continue;
        };
        values.extend(scope.select(&parsed).filter_map(|el| extract(el, &candidate.extract)));
    }
    values
}

/// Whether any candidate locates an element.
pub fn present(scope: ElementRef<'_>, candidates: &[Candidate]) -> bool {
    resolve_element(scope, candidates).is_some()
}

const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "dd", "div", "dl", "dt", "fieldset", "figcaption",
    "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "main",
    "nav", "ol", "p", "pre", "section", "table", "tr", "ul",
];
const SKIPPED_TAGS: &[&str] = &["script", "style", "noscript", "template"];

fn push_text(element: ElementRef<'_>, out: &mut String) {
    let name = element.value().name();
    if SKIPPED_TAGS.contains(&name) {
        return;
    }
    let block = BLOCK_TAGS.contains(&name);
    if block {
        out.push('\n');
    }
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) if el.name() == "br" => out.push('\n'),
            Node::Element(_) => {
                if let Some(child) = ElementRef::wrap(child) {
                    push_text(child, out);
                }
            }
            _ => {}
        }
    }
    if block {
        out.push('\n');
    }
}

/// Rendered text of an element, one line per block, whitespace collapsed
/// and blank lines dropped.
pub fn inner_text(element: ElementRef<'_>) -> String {
    let mut raw = String::new();
    push_text(element, &mut raw);
    raw.lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Rough breakdown of a page that yielded nothing, for the logs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageAnalysis {
    pub comment_mentions: usize,
    pub activity_mentions: usize,
    pub container_mentions: usize,
    pub empty_marker: Option<&'static str>,
}

pub fn analyze_page(html: &str, container_class: &str, empty_markers: &[&'static str]) -> PageAnalysis {
    let lower = html.to_lowercase();
    PageAnalysis {
        comment_mentions: lower.matches("comment").count(),
        activity_mentions: lower.matches("activity").count(),
        container_mentions: html.matches(container_class).count(),
        empty_marker: empty_markers.iter().copied().find(|m| html.contains(m)),
    }
}

/// Write `html` to `dir` for offline inspection and log what it contains.
pub fn dump_page_source(
    dir: &Path,
    label: &str,
    html: &str,
    container_class: &str,
    empty_markers: &[&'static str],
) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create debug directory {}", dir.display()))?;
    let path = dir.join(format!(
        "scraper_page_source_{}_{}.html",
        label,
        Local::now().format("%Y%m%d_%H%M%S")
    ));
    fs::write(&path, html).with_context(|| format!("Failed to write {}", path.display()))?;

    let analysis = analyze_page(html, container_class, empty_markers);
    warn!(
        target: "harvest.resolve",
        path = %path.display(),
        comment_mentions = analysis.comment_mentions,
        activity_mentions = analysis.activity_mentions,
        container_mentions = analysis.container_mentions,
        "No containers found, page source saved"
    );
    if let Some(marker) = analysis.empty_marker {
        info!(target: "harvest.resolve", marker, "Page reports no activity");
    }
    Ok(path)
}
