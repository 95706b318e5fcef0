//! Selector catalog.
//!
//! Every place the scraper looks for something on a page is listed here,
//! keyed by `(Entity, Field)`, with candidates in priority order. Markup
//! changes on the site are absorbed by editing this table. Bump
//! [`CATALOG_REVISION`] when it changes so reports can be traced back to the
//! selectors that produced them.

pub const CATALOG_REVISION: &str = "2025.10-1";

/// How a candidate locates its element relative to the search scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Query {
    /// First descendant matching a CSS selector.
    Css(&'static str),
    /// Nearest ancestor whose `class` attribute contains the fragment.
    Ancestor(&'static str),
    /// Find `anchor`, step up to its parent, then search `then` inside it.
    Sibling {
        anchor: &'static str,
        then: &'static str,
    },
}

/// What to read off the located element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extract {
    Text,
    Attr(&'static str),
    /// Attribute if present and non-empty, else text.
    AttrOrText(&'static str),
    /// Text if non-empty, else attribute.
    TextOrAttr(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub query: Query,
    pub extract: Extract,
}

impl Candidate {
    /// The CSS selector, for candidates that can be handed to a live browser.
    pub fn css(&self) -> Option<&'static str> {
        match self.query {
            Query::Css(selector) => Some(selector),
            _ => None,
        }
    }
}

const fn text(selector: &'static str) -> Candidate {
    Candidate {
        query: Query::Css(selector),
        extract: Extract::Text,
    }
}

const fn attr(selector: &'static str, name: &'static str) -> Candidate {
    Candidate {
        query: Query::Css(selector),
        extract: Extract::Attr(name),
    }
}

const fn attr_or_text(selector: &'static str, name: &'static str) -> Candidate {
    Candidate {
        query: Query::Css(selector),
        extract: Extract::AttrOrText(name),
    }
}

const fn text_or_attr(selector: &'static str, name: &'static str) -> Candidate {
    Candidate {
        query: Query::Css(selector),
        extract: Extract::TextOrAttr(name),
    }
}

const fn ancestor(class_fragment: &'static str) -> Candidate {
    Candidate {
        query: Query::Ancestor(class_fragment),
        extract: Extract::Text,
    }
}

const fn sibling(anchor: &'static str, then: &'static str) -> Candidate {
    Candidate {
        query: Query::Sibling { anchor, then },
        extract: Extract::Text,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    Page,
    Profile,
    Experience,
    Education,
    Contact,
    Interest,
    Accomplishment,
    Post,
    Comment,
    Reaction,
    JobCard,
    JobDetail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Repeating element that holds one record.
    Container,
    /// Entity block inside a container (profile detail lists).
    Entity,
    /// Nested list of sub-records (grouped positions).
    Nested,
    /// Header link of a nested sub-record.
    Summary,
    Name,
    Headline,
    Location,
    About,
    OpenToWork,
    Title,
    Label,
    Value,
    Content,
    Date,
    Likes,
    Comments,
    Replies,
    Shares,
    Url,
    Author,
    AuthorUrl,
    ImageMedia,
    VideoMedia,
    DocumentMedia,
    ParentPost,
    PostUrl,
    PostAuthor,
    PostContent,
    ReactionIcon,
    Company,
    CompanyUrl,
    Posted,
    Applicants,
    TopCardInsights,
    Description,
    ShowMore,
    Benefits,
    Criteria,
    /// Anything indicating the page has rendered its main content.
    Ready,
}

// Page-level checks.
static PAGE_MAIN: &[Candidate] = &[text("main"), text("body")];
static PAGE_SHOW_MORE: &[Candidate] = &[
    text("button.inline-show-more-text__button"),
    text("button[aria-label*='Show more']"),
    text("button[aria-label*='see more']"),
    text("button.pvs-profile-section__see-more-inline"),
];

// Profile top card.
static PROFILE_NAME: &[Candidate] = &[
    text("div.mt2.relative h1"),
    text("h1.text-heading-xlarge"),
    text(".pv-top-card h1"),
    text("main h1"),
];
static PROFILE_HEADLINE: &[Candidate] = &[
    text("div.mt2.relative div.text-body-medium.break-words"),
    text(".pv-top-card .text-body-medium"),
    text("div.text-body-medium"),
];
static PROFILE_LOCATION: &[Candidate] = &[
    text("span.text-body-small.inline.t-black--light.break-words"),
    text("div.mt2.relative span.text-body-small"),
    text(".pv-top-card--list-bullet li"),
];
static PROFILE_ABOUT: &[Candidate] = &[
    sibling("#about", ".display-flex span[aria-hidden='true']"),
    sibling("#about", ".display-flex"),
    text(".pv-about__summary-text"),
    text("section.pv-about-section p"),
];
static PROFILE_OPEN_TO_WORK: &[Candidate] = &[
    attr(".pv-top-card-profile-picture img", "title"),
    attr("img.pv-top-card-profile-picture__image", "alt"),
];

// Profile detail pages (details/experience, details/education).
static DETAIL_ITEMS: &[Candidate] = &[
    text("main .pvs-list__container li.pvs-list__paged-list-item"),
    text("main li.pvs-list__paged-list-item"),
    text("main li.artdeco-list__item"),
];
static DETAIL_ENTITY: &[Candidate] = &[
    text("div[data-view-name='profile-component-entity']"),
    text("div.pvs-entity"),
    text("div.pvs-entity--padded"),
];
static DETAIL_NESTED: &[Candidate] = &[
    text(".pvs-list__container li.pvs-list__paged-list-item"),
    text(".pvs-entity__sub-components li"),
];
static DETAIL_NESTED_HEADER: &[Candidate] = &[text("a"), text("div.display-flex")];
static DETAIL_VISIBLE_TEXT: &[Candidate] = &[
    text("span[aria-hidden='true']"),
    text("span.visually-hidden"),
];
static EXPERIENCE_COMPANY_URL: &[Candidate] = &[
    attr("a[href*='/company/']", "href"),
    attr("a.optional-action-target-wrapper", "href"),
    attr("a", "href"),
];
static EXPERIENCE_DESCRIPTION: &[Candidate] = &[
    text(".pvs-entity__sub-components .inline-show-more-text span[aria-hidden='true']"),
    text(".pvs-entity__sub-components span[aria-hidden='true']"),
    text(".inline-show-more-text"),
];
static EDUCATION_URL: &[Candidate] = &[
    attr("a[href*='/school/']", "href"),
    attr("a[href*='/company/']", "href"),
    attr("a", "href"),
];

// Contact-info overlay.
static CONTACT_SECTION: &[Candidate] = &[
    text("section.pv-contact-info__contact-type"),
    text(".pv-profile-section__section-info section"),
    text(".artdeco-modal__content section"),
];
static CONTACT_LABEL: &[Candidate] = &[text("h3.pv-contact-info__header"), text("h3")];
static CONTACT_VALUE: &[Candidate] = &[
    text("a.pv-contact-info__contact-link"),
    text("a"),
    text("span.pv-contact-info__contact-item"),
    text("ul li span"),
    text("div span"),
];

// Interests and accomplishments cards on the main profile page.
static INTEREST_ITEMS: &[Candidate] = &[
    text(".pv-interests-section .pv-interest-entity"),
    text("#interests ~ div li.pvs-list__paged-list-item"),
    text("#interests ~ div li.artdeco-list__item"),
];
static INTEREST_TITLE: &[Candidate] = &[
    text("h3"),
    text(".t-bold span[aria-hidden='true']"),
    text("span[aria-hidden='true']"),
];
static ACCOMPLISHMENT_BLOCKS: &[Candidate] = &[
    text(".pv-accomplishments-section .pv-accomplishments-block__content"),
    text(".pv-accomplishments-block__content"),
];
static ACCOMPLISHMENT_CATEGORY: &[Candidate] = &[text("h3"), text("h2")];
static ACCOMPLISHMENT_ITEMS: &[Candidate] = &[text("ul li"), text("li")];

// Posts on the activity/all page.
static POST_CONTAINER: &[Candidate] = &[
    text("[data-urn*='urn:li:activity']"),
    text(".feed-shared-update-v2"),
    text("article[data-urn]"),
];
static POST_CONTENT: &[Candidate] = &[
    text(".feed-shared-text"),
    text(".feed-shared-update-v2__description"),
    text(".update-components-text"),
    text(".feed-shared-inline-show-more-text"),
];
static POST_DATE: &[Candidate] = &[
    attr_or_text("time", "datetime"),
    attr_or_text(".feed-shared-actor__sub-description time", "datetime"),
    text(".update-components-actor__sub-description"),
    text_or_attr("[aria-label*='ago']", "aria-label"),
];
static POST_LIKES: &[Candidate] = &[
    text_or_attr(".social-counts-reactions__count", "aria-label"),
    text_or_attr("[aria-label*='reaction']", "aria-label"),
];
static POST_COMMENTS: &[Candidate] = &[
    text_or_attr(".social-counts-comments", "aria-label"),
    text_or_attr("[aria-label*='comment']", "aria-label"),
];
static POST_SHARES: &[Candidate] = &[
    text_or_attr(".social-counts-reposts", "aria-label"),
    text_or_attr("[aria-label*='repost']", "aria-label"),
];
static POST_URL: &[Candidate] = &[
    attr("a[href*='/posts/']", "href"),
    attr("a[href*='/activity/']", "href"),
    attr("a[href*='/feed/update/']", "href"),
];
static ACTOR_NAME: &[Candidate] = &[
    text(".feed-shared-actor__name"),
    text(".update-components-actor__name span[aria-hidden='true']"),
    text(".update-components-actor__name"),
    text(".feed-shared-actor__title"),
];
static ACTOR_URL: &[Candidate] = &[
    attr(".feed-shared-actor__container-link", "href"),
    attr(".update-components-actor__meta-link", "href"),
];
static POST_IMAGE: &[Candidate] = &[
    text(".feed-shared-image"),
    text(".update-components-image"),
    text("img.feed-shared-image__image"),
];
static POST_VIDEO: &[Candidate] = &[
    text("video"),
    text(".feed-shared-video"),
    text(".update-components-linkedin-video"),
];
static POST_DOCUMENT: &[Candidate] = &[
    text(".feed-shared-document"),
    text(".update-components-document"),
];

// Comments on the activity/comments page.
static COMMENT_CONTAINER: &[Candidate] = &[
    text(".comments-comment-entity"),
    text("article.comments-comment-entity"),
    text(".comments-comment-item"),
    text("[data-id*='comment']"),
    text(".feed-shared-update-v2 .comments-comment-entity"),
    text(".comments-comments-list .comments-comment-entity"),
    text(".comments-comment-list__container .comments-comment-entity"),
];
static COMMENT_CONTENT: &[Candidate] = &[
    text(".comments-comment-item__main-content"),
    text(".comments-comment-item__main-content .update-components-text"),
    text(".feed-shared-main-content--comment"),
    text(".comments-comment-entity__content .update-components-text"),
    text(".feed-shared-inline-show-more-text .update-components-text"),
    text(".comments-comment-item-content-body"),
    text(".comment-item__main-content"),
    text(".feed-shared-comment__main-content"),
    text(".comments-comment-item .feed-shared-inline-show-more-text"),
    text(".activity-item__commentary"),
];
static ACTIVITY_DATE: &[Candidate] = &[
    attr_or_text("time", "datetime"),
    attr_or_text(".feed-shared-actor__sub-description time", "datetime"),
    attr_or_text("[data-test-id='feed-shared-actor__sub-description'] time", "datetime"),
    text(".feed-shared-actor__sub-description"),
    text_or_attr("[aria-label*='ago']", "aria-label"),
];
static COMMENT_LIKES: &[Candidate] = &[
    text_or_attr(".social-counts-reactions__count", "aria-label"),
    text_or_attr(".feed-shared-social-action-bar__reaction-count", "aria-label"),
    text_or_attr("[aria-label*='reaction']", "aria-label"),
    text_or_attr("[aria-label*='like']", "aria-label"),
    text_or_attr(".social-action-bar__reaction-count", "aria-label"),
    text_or_attr(".feed-shared-social-counts__num-likes", "aria-label"),
];
static COMMENT_REPLIES: &[Candidate] = &[
    text_or_attr(".feed-shared-social-action-bar__comment-count", "aria-label"),
    text_or_attr(".social-counts-comments__count", "aria-label"),
    text_or_attr("[aria-label*='comment']", "aria-label"),
    text_or_attr("[aria-label*='repl']", "aria-label"),
    text_or_attr(".social-action-bar__comment-count", "aria-label"),
    text_or_attr(".feed-shared-social-counts__num-comments", "aria-label"),
];
static COMMENT_URL: &[Candidate] = &[attr("a[href*='/feed/update/']", "href")];
static COMMENT_PARENT: &[Candidate] = &[ancestor("feed-shared-update-v2")];
static PARENT_POST_URL: &[Candidate] = &[
    attr("a[href*='/posts/']", "href"),
    attr("a[href*='/feed/update/']", "href"),
];
static PARENT_POST_AUTHOR: &[Candidate] = &[
    text(".feed-shared-actor__name"),
    text(".feed-shared-actor__title"),
    text(".update-components-actor__name"),
];
static PARENT_POST_CONTENT: &[Candidate] = &[
    text(".feed-shared-text"),
    text(".attributed-text-segment-list__content"),
    text(".feed-shared-update-v2__description"),
];

// Reactions on the activity/reactions page.
static REACTION_CONTAINER: &[Candidate] = &[
    text(".feed-shared-update-v2"),
    text(".activity-item"),
    text("[data-urn*='activity']"),
    text(".feed-shared-mini-update-v2"),
    text("article[data-urn]"),
    text(".feed-shared-activity"),
];
static REACTION_CONTENT: &[Candidate] = &[
    text(".feed-shared-inline-show-more-text"),
    text(".feed-shared-text"),
    text(".feed-shared-update-v2__description"),
    text(".feed-shared-actor__description"),
    text(".activity-item__description"),
];
static REACTION_AUTHOR: &[Candidate] = &[
    text(".feed-shared-actor__name"),
    text(".feed-shared-actor__title"),
    text("[data-test-id='feed-shared-actor__name']"),
    text(".feed-shared-update-v2__actor-name"),
];
static REACTION_URL: &[Candidate] = &[
    attr("a[href*='/posts/']", "href"),
    attr("a[href*='/feed/update/']", "href"),
];
static REACTION_ICON: &[Candidate] = &[
    attr("[aria-label*='reaction']", "aria-label"),
    attr_or_text(".reaction-icon", "alt"),
    attr("[data-test-id*='reaction']", "aria-label"),
];

// Job search result cards.
static JOB_CARD_CONTAINER: &[Candidate] = &[
    text(".jobs-search__results-list li"),
    text("li.jobs-search-results__list-item"),
    text(".job-card-container"),
    text("[data-job-id]"),
];
static JOB_CARD_URL: &[Candidate] = &[
    attr("a.base-card__full-link", "href"),
    attr("a[href*='/jobs/view/']", "href"),
    attr(".base-search-card a", "href"),
    attr("a[data-tracking-id]", "href"),
];
static JOB_CARD_TITLE: &[Candidate] = &[
    attr("h3.base-search-card__title a span[title]", "title"),
    text("h3.base-search-card__title a"),
    text("h3.base-search-card__title"),
    text("h3 a span"),
    text(".job-card-list__title"),
];
static JOB_CARD_COMPANY: &[Candidate] = &[
    text("h4.base-search-card__subtitle a"),
    text("h4 a"),
    text("h4.base-search-card__subtitle"),
    text(".job-card-container__primary-description"),
    text(".artdeco-entity-lockup__subtitle"),
];
static JOB_CARD_LOCATION: &[Candidate] = &[
    text(".job-search-card__location"),
    text(".base-search-card__metadata span"),
    text(".job-card-container__metadata-item"),
];
static JOB_CARD_DATE: &[Candidate] = &[
    attr_or_text("time.job-search-card__listdate", "datetime"),
    attr_or_text("time.job-search-card__listdate--new", "datetime"),
    attr_or_text("time", "datetime"),
];
static JOB_SEARCH_READY: &[Candidate] = &[
    text(".jobs-search__results-list"),
    text(".jobs-search-results__list"),
    text("[data-job-id]"),
    text(".job-card-container"),
];

// Job detail page.
static JOB_TITLE: &[Candidate] = &[
    text(".job-details-jobs-unified-top-card__job-title"),
    text(".jobs-unified-top-card__job-title"),
    text("h1.top-card-layout__title"),
    text("h1.t-24"),
    text("h1"),
];
static JOB_COMPANY: &[Candidate] = &[
    text(".job-details-jobs-unified-top-card__company-name"),
    text(".jobs-unified-top-card__company-name"),
    text("a.topcard__org-name-link"),
    text(".topcard__flavor"),
];
static JOB_COMPANY_URL: &[Candidate] = &[
    attr(".job-details-jobs-unified-top-card__company-name a", "href"),
    attr(".jobs-unified-top-card__company-name a", "href"),
    attr("a.topcard__org-name-link", "href"),
];
static JOB_LOCATION: &[Candidate] = &[
    text(".topcard__flavor--bullet"),
    text(".jobs-unified-top-card__bullet"),
];
static JOB_POSTED: &[Candidate] = &[
    text(".posted-time-ago__text"),
    text(".jobs-unified-top-card__posted-date"),
    text(".job-posted-date"),
];
static JOB_APPLICANTS: &[Candidate] = &[
    text(".jobs-unified-top-card__applicant-count"),
    text(".num-applicants__caption"),
];
static JOB_TOP_CARD_INSIGHTS: &[Candidate] = &[
    text(".job-details-jobs-unified-top-card__tertiary-description-container"),
    text(".job-details-jobs-unified-top-card__primary-description-container"),
    text(".jobs-unified-top-card__primary-description"),
];
static JOB_DESCRIPTION: &[Candidate] = &[
    text(".jobs-description__content"),
    text(".jobs-box__html-content"),
    text(".show-more-less-html__markup"),
    text(".description__text"),
    text("div.jobs-description-content__text"),
    text("#job-details"),
    text("article.jobs-description"),
];
static JOB_SHOW_MORE: &[Candidate] = &[
    text("button.show-more-less-html__button"),
    text("button.show-more-less-html__button--more"),
    text(".jobs-description__footer-button"),
    text("button[aria-label*='Show more']"),
    text("button[aria-label*='See more']"),
];
static JOB_BENEFITS: &[Candidate] = &[
    text(".jobs-unified-description__salary-main-rail-card"),
    text("#SALARY"),
    text(".salary.compensation__salary"),
];
static JOB_CRITERIA: &[Candidate] = &[
    text(".description__job-criteria-item"),
    text(".description__job-criteria-list li"),
];
static JOB_CRITERIA_LABEL: &[Candidate] = &[text(".description__job-criteria-subheader"), text("h3")];
static JOB_CRITERIA_VALUE: &[Candidate] = &[text(".description__job-criteria-text"), text("span")];
static JOB_DETAIL_READY: &[Candidate] = &[
    text(".job-details-jobs-unified-top-card__job-title"),
    text(".top-card-layout__title"),
    text(".jobs-description"),
    text("h1"),
];

static EMPTY: &[Candidate] = &[];

/// Candidates for `(entity, field)` in priority order. Combinations that
/// are not catalogued return an empty list, which resolves to nothing.
pub fn lookup(entity: Entity, field: Field) -> &'static [Candidate] {
    use Entity as E;
    use Field as F;

    match (entity, field) {
        (E::Page, F::Ready) => PAGE_MAIN,
        (E::Page, F::ShowMore) => PAGE_SHOW_MORE,

        (E::Profile, F::Name) => PROFILE_NAME,
        (E::Profile, F::Headline) => PROFILE_HEADLINE,
        (E::Profile, F::Location) => PROFILE_LOCATION,
        (E::Profile, F::About) => PROFILE_ABOUT,
        (E::Profile, F::OpenToWork) => PROFILE_OPEN_TO_WORK,

        (E::Experience | E::Education, F::Container) => DETAIL_ITEMS,
        (E::Experience | E::Education, F::Entity) => DETAIL_ENTITY,
        (E::Experience | E::Education, F::Value) => DETAIL_VISIBLE_TEXT,
        (E::Experience, F::Nested) => DETAIL_NESTED,
        (E::Experience, F::Summary) => DETAIL_NESTED_HEADER,
        (E::Experience, F::CompanyUrl) => EXPERIENCE_COMPANY_URL,
        (E::Experience, F::Description) => EXPERIENCE_DESCRIPTION,
        (E::Education, F::Url) => EDUCATION_URL,

        (E::Contact, F::Container) => CONTACT_SECTION,
        (E::Contact, F::Label) => CONTACT_LABEL,
        (E::Contact, F::Value) => CONTACT_VALUE,

        (E::Interest, F::Container) => INTEREST_ITEMS,
        (E::Interest, F::Title) => INTEREST_TITLE,
        (E::Accomplishment, F::Container) => ACCOMPLISHMENT_BLOCKS,
        (E::Accomplishment, F::Label) => ACCOMPLISHMENT_CATEGORY,
        (E::Accomplishment, F::Value) => ACCOMPLISHMENT_ITEMS,

        (E::Post, F::Container) => POST_CONTAINER,
        (E::Post, F::Content) => POST_CONTENT,
        (E::Post, F::Date) => POST_DATE,
        (E::Post, F::Likes) => POST_LIKES,
        (E::Post, F::Comments) => POST_COMMENTS,
        (E::Post, F::Shares) => POST_SHARES,
        (E::Post, F::Url) => POST_URL,
        (E::Post, F::Author) => ACTOR_NAME,
        (E::Post, F::AuthorUrl) => ACTOR_URL,
        (E::Post, F::ImageMedia) => POST_IMAGE,
        (E::Post, F::VideoMedia) => POST_VIDEO,
        (E::Post, F::DocumentMedia) => POST_DOCUMENT,

        (E::Comment, F::Container) => COMMENT_CONTAINER,
        (E::Comment, F::Content) => COMMENT_CONTENT,
        (E::Comment, F::Date) => ACTIVITY_DATE,
        (E::Comment, F::Likes) => COMMENT_LIKES,
        (E::Comment, F::Replies) => COMMENT_REPLIES,
        (E::Comment, F::Url) => COMMENT_URL,
        (E::Comment, F::ParentPost) => COMMENT_PARENT,
        (E::Comment, F::PostUrl) => PARENT_POST_URL,
        (E::Comment, F::PostAuthor) => PARENT_POST_AUTHOR,
        (E::Comment, F::PostContent) => PARENT_POST_CONTENT,

        (E::Reaction, F::Container) => REACTION_CONTAINER,
        (E::Reaction, F::Content) => REACTION_CONTENT,
        (E::Reaction, F::Date) => ACTIVITY_DATE,
        (E::Reaction, F::Author) => REACTION_AUTHOR,
        (E::Reaction, F::Url) => REACTION_URL,
        (E::Reaction, F::ReactionIcon) => REACTION_ICON,

        (E::JobCard, F::Container) => JOB_CARD_CONTAINER,
        (E::JobCard, F::Url) => JOB_CARD_URL,
        (E::JobCard, F::Title) => JOB_CARD_TITLE,
        (E::JobCard, F::Company) => JOB_CARD_COMPANY,
        (E::JobCard, F::Location) => JOB_CARD_LOCATION,
        (E::JobCard, F::Date) => JOB_CARD_DATE,
        (E::JobCard, F::Ready) => JOB_SEARCH_READY,

        (E::JobDetail, F::Title) => JOB_TITLE,
        (E::JobDetail, F::Company) => JOB_COMPANY,
        (E::JobDetail, F::CompanyUrl) => JOB_COMPANY_URL,
        (E::JobDetail, F::Location) => JOB_LOCATION,
        (E::JobDetail, F::Posted) => JOB_POSTED,
        (E::JobDetail, F::Applicants) => JOB_APPLICANTS,
        (E::JobDetail, F::TopCardInsights) => JOB_TOP_CARD_INSIGHTS,
        (E::JobDetail, F::Description) => JOB_DESCRIPTION,
        (E::JobDetail, F::ShowMore) => JOB_SHOW_MORE,
        (E::JobDetail, F::Benefits) => JOB_BENEFITS,
        (E::JobDetail, F::Criteria) => JOB_CRITERIA,
        (E::JobDetail, F::Label) => JOB_CRITERIA_LABEL,
        (E::JobDetail, F::Value) => JOB_CRITERIA_VALUE,
        (E::JobDetail, F::Ready) => JOB_DETAIL_READY,

        _ => EMPTY,
    }
}

/// CSS selectors of `(entity, field)`, for live browser calls.
pub fn css_list(entity: Entity, field: Field) -> Vec<&'static str> {
    lookup(entity, field).iter().filter_map(Candidate::css).collect()
}

/// Page text markers meaning a profile has no activity of the requested kind.
pub const EMPTY_ACTIVITY_MARKERS: &[&str] = &["No activity yet", "hasn't shared anything", "hasn't posted"];

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Selector;

    const ENTRIES: &[(Entity, Field)] = &[
        (Entity::Page, Field::Ready),
        (Entity::Page, Field::ShowMore),
        (Entity::Profile, Field::Name),
        (Entity::Profile, Field::Headline),
        (Entity::Profile, Field::Location),
        (Entity::Profile, Field::About),
        (Entity::Profile, Field::OpenToWork),
        (Entity::Experience, Field::Container),
        (Entity::Experience, Field::Entity),
        (Entity::Experience, Field::Value),
        (Entity::Experience, Field::Nested),
        (Entity::Experience, Field::Summary),
        (Entity::Experience, Field::CompanyUrl),
        (Entity::Experience, Field::Description),
        (Entity::Education, Field::Container),
        (Entity::Education, Field::Url),
        (Entity::Contact, Field::Container),
        (Entity::Contact, Field::Label),
        (Entity::Contact, Field::Value),
        (Entity::Interest, Field::Container),
        (Entity::Interest, Field::Title),
        (Entity::Accomplishment, Field::Container),
        (Entity::Accomplishment, Field::Label),
        (Entity::Accomplishment, Field::Value),
        (Entity::Post, Field::Container),
        (Entity::Post, Field::Content),
        (Entity::Post, Field::Date),
        (Entity::Post, Field::Likes),
        (Entity::Post, Field::Comments),
        (Entity::Post, Field::Shares),
        (Entity::Post, Field::Url),
        (Entity::Post, Field::Author),
        (Entity::Post, Field::AuthorUrl),
        (Entity::Post, Field::ImageMedia),
        (Entity::Post, Field::VideoMedia),
        (Entity::Post, Field::DocumentMedia),
        (Entity::Comment, Field::Container),
        (Entity::Comment, Field::Content),
        (Entity::Comment, Field::Date),
        (Entity::Comment, Field::Likes),
        (Entity::Comment, Field::Replies),
        (Entity::Comment, Field::Url),
        (Entity::Comment, Field::ParentPost),
        (Entity::Comment, Field::PostUrl),
        (Entity::Comment, Field::PostAuthor),
        (Entity::Comment, Field::PostContent),
        (Entity::Reaction, Field::Container),
        (Entity::Reaction, Field::Content),
        (Entity::Reaction, Field::Date),
        (Entity::Reaction, Field::Author),
        (Entity::Reaction, Field::Url),
        (Entity::Reaction, Field::ReactionIcon),
        (Entity::JobCard, Field::Container),
        (Entity::JobCard, Field::Url),
        (Entity::JobCard, Field::Title),
        (Entity::JobCard, Field::Company),
        (Entity::JobCard, Field::Location),
        (Entity::JobCard, Field::Date),
        (Entity::JobCard, Field::Ready),
        (Entity::JobDetail, Field::Title),
        (Entity::JobDetail, Field::Company),
        (Entity::JobDetail, Field::CompanyUrl),
        (Entity::JobDetail, Field::Location),
        (Entity::JobDetail, Field::Posted),
        (Entity::JobDetail, Field::Applicants),
        (Entity::JobDetail, Field::TopCardInsights),
        (Entity::JobDetail, Field::Description),
        (Entity::JobDetail, Field::ShowMore),
        (Entity::JobDetail, Field::Benefits),
        (Entity::JobDetail, Field::Criteria),
        (Entity::JobDetail, Field::Label),
        (Entity::JobDetail, Field::Value),
        (Entity::JobDetail, Field::Ready),
    ];

    #[test]
    fn test_every_catalogued_selector_parses() {
        for &(entity, field) in ENTRIES {
            let candidates = lookup(entity, field);
            assert!(!candidates.is_empty(), "{:?}/{:?} has no candidates", entity, field);
            for candidate in candidates {
                let selectors: Vec<&str> = match candidate.query {
                    Query::Css(s) => vec![s],
                    Query::Ancestor(_) => vec![],
                    Query::Sibling { anchor, then } => vec![anchor, then],
                };
                for s in selectors {
                    assert!(Selector::parse(s).is_ok(), "{:?}/{:?}: bad selector {}", entity, field, s);
                }
            }
        }
    }

    #[test]
    fn test_uncatalogued_pair_is_empty() {
        assert!(lookup(Entity::Post, Field::Benefits).is_empty());
    }

    #[test]
    fn test_comment_candidates_keep_priority_order() {
        let list = css_list(Entity::Comment, Field::Container);
        assert_eq!(list[0], ".comments-comment-entity");
        assert_eq!(list.len(), 7);
    }

    #[test]
    fn test_css_list_skips_structural_queries() {
        assert!(css_list(Entity::Comment, Field::ParentPost).is_empty());
    }
}
