use scraper::ElementRef;

use super::{absolute_url, field};
use crate::catalog::{self, Entity, Field};
use crate::classify::{first_meaningful_line, reaction_type_from_labels, truncate};
use crate::models::{Owner, Reaction};
use crate::resolve::{inner_text, resolve_each};

pub const PREVIEW_PLACEHOLDER: &str = "[Content not available]";
const PREVIEW_CHARS: usize = 200;

fn preview(scope: ElementRef<'_>) -> Option<String> {
    field(scope, Entity::Reaction, Field::Content)
        .or_else(|| first_meaningful_line(&inner_text(scope)).map(str::to_string))
}

/// Build a reaction from one activity container. Containers with neither a
/// readable post nor a post link are dropped.
pub fn assemble_reaction(scope: ElementRef<'_>, owner: &Owner) -> Option<Reaction> {
    let post_url = field(scope, Entity::Reaction, Field::Url)
        .and_then(|href| absolute_url(&href))
        .unwrap_or_default();
    let post_preview = preview(scope);
    if post_preview.is_none() && post_url.is_empty() {
        return None;
    }

    let labels = resolve_each(scope, catalog::lookup(Entity::Reaction, Field::ReactionIcon));

    Some(Reaction {
        post_preview: truncate(
            post_preview.as_deref().unwrap_or(PREVIEW_PLACEHOLDER),
            PREVIEW_CHARS,
        ),
        post_author: field(scope, Entity::Reaction, Field::Author).unwrap_or_default(),
        post_url,
        reacted_date: field(scope, Entity::Reaction, Field::Date).unwrap_or_default(),
        reaction_type: reaction_type_from_labels(labels),
        reactor_name: owner.name.clone(),
        reactor_url: owner.url.clone(),
    })
}
