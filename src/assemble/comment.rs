use scraper::ElementRef;
use tracing::debug;

use super::{absolute_url, count, field};
use crate::catalog::{self, Entity, Field};
use crate::classify::{extract_comment_from_noisy_text, is_genuine_comment, truncate};
use crate::config::Misclassified;
use crate::models::{Comment, Owner};
use crate::resolve::{inner_text, resolve_element, resolve_where, Resolution};

pub const CONTENT_PLACEHOLDER: &str = "[Comment content not available]";
const PREVIEW_CHARS: usize = 100;

/// Comment text for a container, or `None` when the container does not
/// hold a genuine comment.
fn comment_content(scope: ElementRef<'_>, policy: Misclassified) -> Option<String> {
    match resolve_where(scope, catalog::lookup(Entity::Comment, Field::Content), is_genuine_comment) {
        Resolution::Accepted(text) => Some(text),
        Resolution::Rejected => {
            debug!(target: "harvest.assemble", "Comment container holds post content, skipping");
            None
        }
        Resolution::Missing => {
            let guess = extract_comment_from_noisy_text(&inner_text(scope));
            if is_genuine_comment(&guess) {
                return Some(guess);
            }
            match policy {
                Misclassified::Discard => {
                    debug!(target: "harvest.assemble", "No genuine comment text found, skipping");
                    None
                }
                Misclassified::Placeholder => Some(CONTENT_PLACEHOLDER.to_string()),
            }
        }
    }
}

struct ParentPost {
    url: String,
    author: String,
    preview: String,
}

fn parent_post(scope: ElementRef<'_>) -> ParentPost {
    let Some(post) = resolve_element(scope, catalog::lookup(Entity::Comment, Field::ParentPost)) else {
        return ParentPost {
            url: String::new(),
            author: String::new(),
            preview: String::new(),
        };
    };
    ParentPost {
        url: field(post, Entity::Comment, Field::PostUrl)
            .and_then(|href| absolute_url(&href))
            .unwrap_or_default(),
        author: field(post, Entity::Comment, Field::PostAuthor).unwrap_or_default(),
        preview: field(post, Entity::Comment, Field::PostContent)
            .map(|text| truncate(&text, PREVIEW_CHARS))
            .unwrap_or_default(),
    }
}

/// Build a comment from one comment container. The commenter is the
/// profile owner whose activity page is being read.
pub fn assemble_comment(scope: ElementRef<'_>, owner: &Owner, policy: Misclassified) -> Option<Comment> {
    let content = comment_content(scope, policy)?;
    let parent = parent_post(scope);

    Some(Comment {
        content,
        commented_date: field(scope, Entity::Comment, Field::Date).unwrap_or_default(),
        likes_count: count(scope, Entity::Comment, Field::Likes),
        replies_count: count(scope, Entity::Comment, Field::Replies),
        comment_url: field(scope, Entity::Comment, Field::Url)
            .and_then(|href| absolute_url(&href))
            .unwrap_or_default(),
        post_url: parent.url,
        post_author: parent.author,
        post_content_preview: parent.preview,
        commenter_name: owner.name.clone(),
        commenter_url: owner.url.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::resolve_all;
    use scraper::Html;

    const PAGE: &str = r#"
      <main>
        <div class="feed-shared-update-v2">
          <a href="/feed/update/urn:li:activity:100/">post</a>
          <span class="feed-shared-actor__name">Sam Poster</span>
          <div class="feed-shared-text">We're Hiring: Senior Rust engineers who love debugging distributed systems at scale across many regions. Apply today through the careers page.</div>
          <article class="comments-comment-entity">
            <time datetime="2025-06-15T09:00:00Z">3h</time>
            <div class="comments-comment-item__main-content">Great insights! Thanks for sharing.</div>
            <button aria-label="4 reactions"></button>
            <span class="social-counts-comments__count">2</span>
            <a href="/feed/update/urn:li:activity:100/?commentUrn=c1">permalink</a>
          </article>
          <article class="comments-comment-entity">
            <div class="comments-comment-item__main-content">We're Hiring: join our team</div>
          </article>
          <article class="comments-comment-entity">
            <div><span>Jane Smith</span><p>2d ago</p><p>Interesting approach to the problem.</p></div>
          </article>
          <article class="comments-comment-entity">
            <div><p>Follow</p><p>ok</p></div>
          </article>
        </div>
      </main>
    "#;

    fn owner() -> Owner {
        Owner {
            name: "Jane Smith".to_string(),
            url: "https://www.linkedin.com/in/jane-smith/".to_string(),
        }
    }

    fn containers(doc: &Html) -> Vec<ElementRef<'_>> {
        resolve_all(doc.root_element(), catalog::lookup(Entity::Comment, Field::Container))
    }

    #[test]
    fn test_assemble_comment_with_parent_post() {
        let doc = Html::parse_document(PAGE);
        let found = containers(&doc);
        assert_eq!(found.len(), 4);

        let comment = assemble_comment(found[0], &owner(), Misclassified::Discard).unwrap();
        assert_eq!(comment.content, "Great insights! Thanks for sharing.");
        assert_eq!(comment.commented_date, "2025-06-15T09:00:00Z");
        assert_eq!(comment.likes_count, 4);
        assert_eq!(comment.replies_count, 2);
        assert_eq!(
            comment.comment_url,
            "https://www.linkedin.com/feed/update/urn:li:activity:100/?commentUrn=c1"
        );
        assert_eq!(comment.post_url, "https://www.linkedin.com/feed/update/urn:li:activity:100/");
        assert_eq!(comment.post_author, "Sam Poster");
        assert!(comment.post_content_preview.chars().count() <= 100);
        assert!(comment.post_content_preview.ends_with("..."));
        assert_eq!(comment.commenter_name, "Jane Smith");
    }

    #[test]
    fn test_rejected_content_discards_container() {
        let doc = Html::parse_document(PAGE);
        let found = containers(&doc);
        assert!(assemble_comment(found[1], &owner(), Misclassified::Discard).is_none());
        assert!(assemble_comment(found[1], &owner(), Misclassified::Placeholder).is_none());
    }

    #[test]
    fn test_noisy_text_fallback() {
        let doc = Html::parse_document(PAGE);
        let found = containers(&doc);
        let comment = assemble_comment(found[2], &owner(), Misclassified::Discard).unwrap();
        assert_eq!(comment.content, "Interesting approach to the problem.");
    }

    #[test]
    fn test_unusable_container_policy() {
        let doc = Html::parse_document(PAGE);
        let found = containers(&doc);
        assert!(assemble_comment(found[3], &owner(), Misclassified::Discard).is_none());
        let kept = assemble_comment(found[3], &owner(), Misclassified::Placeholder).unwrap();
        assert_eq!(kept.content, CONTENT_PLACEHOLDER);
    }

    #[test]
    fn test_comment_without_parent_post() {
        let doc = Html::parse_fragment(
            r#"<div class="comments-comment-item"><span class="comments-comment-item-content-body">Nice one, congrats!</span></div>"#,
        );
        let found = containers(&doc);
        let comment = assemble_comment(found[0], &owner(), Misclassified::Discard).unwrap();
        assert_eq!(comment.content, "Nice one, congrats!");
        assert!(comment.post_url.is_empty());
        assert!(comment.post_author.is_empty());
    }
}
