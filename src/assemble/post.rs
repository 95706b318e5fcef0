use scraper::ElementRef;
use tracing::debug;

use super::{absolute_url, count, field};
use crate::catalog::{self, Entity, Field};
use crate::models::{MediaType, Owner, Post};
use crate::resolve::present;

fn media_type(scope: ElementRef<'_>) -> MediaType {
    let has = |f| present(scope, catalog::lookup(Entity::Post, f));
    if has(Field::ImageMedia) {
        MediaType::Image
    } else if has(Field::VideoMedia) {
        MediaType::Video
    } else if has(Field::DocumentMedia) {
        MediaType::Document
    } else {
        MediaType::Text
    }
}

/// Build a post from one feed container. Posts with neither text nor a
/// permalink are dropped.
pub fn assemble_post(scope: ElementRef<'_>, owner: &Owner) -> Option<Post> {
    let content = field(scope, Entity::Post, Field::Content).unwrap_or_default();
    let post_url = field(scope, Entity::Post, Field::Url)
        .and_then(|href| absolute_url(&href))
        .unwrap_or_default();
    if content.is_empty() && post_url.is_empty() {
        debug!(target: "harvest.assemble", "Skipping post without content or link");
        return None;
    }

    let author_name = field(scope, Entity::Post, Field::Author)
        .or_else(|| Some(owner.name.clone()).filter(|n| !n.is_empty()))
        .unwrap_or_else(|| "Unknown".to_string());
    let author_url = field(scope, Entity::Post, Field::AuthorUrl)
        .and_then(|href| absolute_url(&href))
        .unwrap_or_else(|| owner.url.clone());

    Some(Post {
        content,
        posted_date: field(scope, Entity::Post, Field::Date).unwrap_or_default(),
        likes_count: count(scope, Entity::Post, Field::Likes),
        comments_count: count(scope, Entity::Post, Field::Comments),
        shares_count: count(scope, Entity::Post, Field::Shares),
        media_type: media_type(scope),
        author_name,
        author_url,
        post_url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::resolve_all;
    use scraper::Html;

    const POSTS: &str = r#"
        <div class="feed-shared-update-v2" data-urn="urn:li:activity:1">
          <a class="feed-shared-actor__container-link" href="/in/jane-doe/">
            <span class="feed-shared-actor__name">Jane Doe</span>
          </a>
          <time datetime="2025-06-15T08:00:00Z">4h</time>
          <div class="feed-shared-text">Shipping our new release today.</div>
          <div class="feed-shared-image"><img src="x.png"></div>
          <span class="social-counts-reactions__count">1,204</span>
          <button aria-label="37 comments"></button>
          <span class="social-counts-reposts">5 reposts</span>
          <a href="https://www.linkedin.com/posts/jane-doe_release-activity-1">link</a>
        </div>
        <div class="feed-shared-update-v2" data-urn="urn:li:activity:2">
          <span>2d ago</span>
          <div class="feed-shared-text">Plain thoughts.</div>
        </div>
        <div class="feed-shared-update-v2" data-urn="urn:li:activity:3"><span>empty</span></div>
    "#;

    fn owner() -> Owner {
        Owner {
            name: "Jane Owner".to_string(),
            url: "https://www.linkedin.com/in/owner/".to_string(),
        }
    }

    #[test]
    fn test_assemble_post_fields() {
        let doc = Html::parse_document(POSTS);
        let containers = resolve_all(doc.root_element(), catalog::lookup(Entity::Post, Field::Container));
        assert_eq!(containers.len(), 3);

        let post = assemble_post(containers[0], &owner()).unwrap();
        assert_eq!(post.content, "Shipping our new release today.");
        assert_eq!(post.posted_date, "2025-06-15T08:00:00Z");
        assert_eq!(post.likes_count, 1204);
        assert_eq!(post.comments_count, 37);
        assert_eq!(post.shares_count, 5);
        assert_eq!(post.media_type, MediaType::Image);
        assert_eq!(post.author_name, "Jane Doe");
        assert_eq!(post.author_url, "https://www.linkedin.com/in/jane-doe/");
        assert_eq!(post.post_url, "https://www.linkedin.com/posts/jane-doe_release-activity-1");
    }

    #[test]
    fn test_assemble_post_defaults() {
        let doc = Html::parse_document(POSTS);
        let containers = resolve_all(doc.root_element(), catalog::lookup(Entity::Post, Field::Container));

        let post = assemble_post(containers[1], &owner()).unwrap();
        assert_eq!(post.media_type, MediaType::Text);
        assert_eq!(post.likes_count, 0);
        assert_eq!(post.author_name, "Jane Owner");
        assert_eq!(post.author_url, "https://www.linkedin.com/in/owner/");
        assert!(post.post_url.is_empty());

        assert!(assemble_post(containers[2], &owner()).is_none());
    }

    #[test]
    fn test_unknown_author_without_owner_name() {
        let doc = Html::parse_document(POSTS);
        let containers = resolve_all(doc.root_element(), catalog::lookup(Entity::Post, Field::Container));
        let post = assemble_post(containers[1], &Owner::default()).unwrap();
        assert_eq!(post.author_name, "Unknown");
    }
}
