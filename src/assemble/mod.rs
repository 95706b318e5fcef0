//! Record assemblers: page snapshot scopes in, typed records out.
//!
//! Each assembler applies per-field defaults and returns `None` only when
//! the record's identity cannot be established.

pub mod comment;
pub mod job;
pub mod person;
pub mod post;
pub mod reaction;

use scraper::ElementRef;
use url::Url;

use crate::catalog::{self, Entity, Field};
use crate::classify::extract_count;
use crate::resolve::resolve;

pub const SITE_ROOT: &str = "https://www.linkedin.com";

pub(crate) fn field(scope: ElementRef<'_>, entity: Entity, field: Field) -> Option<String> {
    resolve(scope, catalog::lookup(entity, field))
}

pub(crate) fn count(scope: ElementRef<'_>, entity: Entity, f: Field) -> u64 {
    field(scope, entity, f).map(|text| extract_count(&text)).unwrap_or(0)
}

/// Resolve `href` against the site root. Absolute links pass through.
pub fn absolute_url(href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }
    let base = Url::parse(SITE_ROOT).ok()?;
    base.join(href).ok().map(String::from)
}

/// Absolute URL with query string and fragment removed; job links carry
/// tracking parameters that change on every page load.
pub fn clean_tracking_url(href: &str) -> Option<String> {
    let absolute = absolute_url(href)?;
    let mut url = Url::parse(&absolute).ok()?;
    url.set_query(None);
    url.set_fragment(None);
    Some(url.to_string())
}

/// Element children of `element`, skipping text and comments.
pub(crate) fn element_children(element: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    element.children().filter_map(ElementRef::wrap).collect()
}
