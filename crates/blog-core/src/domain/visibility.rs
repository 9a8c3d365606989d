//! Public visibility of posts.
//!
//! A post is visible when it is not a draft, has a publish time, and that
//! time has passed. The rule exists once, as the clause list returned by
//! [`listing_filter`]. Repositories translate the clauses into their query
//! language and [`is_visible`] evaluates the same clauses in memory, so a
//! listed post and a post fetched by id are judged identically.

use chrono::{DateTime, Utc};

use super::post::{Post, Publication};
use crate::error::DomainError;

/// One comparison against a post's stored publication fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clause {
    /// `is_draft = value`
    DraftIs(bool),
    /// `published_at IS NOT NULL`
    PublishedAtIsSet,
    /// `published_at <= instant`. A missing publish time never matches.
    PublishedAtOrBefore(DateTime<Utc>),
}

impl Clause {
    pub fn matches(self, publication: Publication) -> bool {
        match self {
            Self::DraftIs(flag) => publication.is_draft == flag,
            Self::PublishedAtIsSet => publication.published_at.is_some(),
            Self::PublishedAtOrBefore(instant) => {
                publication.published_at.is_some_and(|at| at <= instant)
            }
        }
    }
}

/// Conjunction of clauses selecting the publicly visible posts at an instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingFilter {
    now: DateTime<Utc>,
    clauses: [Clause; 3],
}

impl ListingFilter {
    /// The instant the filter was built for.
    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    /// Clauses to be combined with AND.
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn matches(&self, publication: Publication) -> bool {
        self.clauses.iter().all(|clause| clause.matches(publication))
    }
}

/// Build the visibility predicate for `now`.
pub fn listing_filter(now: DateTime<Utc>) -> ListingFilter {
    ListingFilter {
        now,
        clauses: [
            Clause::DraftIs(false),
            Clause::PublishedAtIsSet,
            Clause::PublishedAtOrBefore(now),
        ],
    }
}

/// Whether a post is publicly readable at `now`.
pub fn is_visible(publication: Publication, now: DateTime<Utc>) -> bool {
    listing_filter(now).matches(publication)
}

/// Pass a visible post through, or report it as missing.
///
/// Hidden posts produce the same error as ids that do not exist.
pub fn ensure_visible(post: Post, now: DateTime<Utc>) -> Result<Post, DomainError> {
    if is_visible(post.publication(), now) {
        Ok(post)
    } else {
        Err(DomainError::NotFound {
            entity_type: "Post",
            id: post.id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NewPost, PostStatus};
    use chrono::{TimeDelta, TimeZone};
    use uuid::Uuid;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    fn publication(is_draft: bool, published_at: Option<DateTime<Utc>>) -> Publication {
        Publication {
            is_draft,
            published_at,
        }
    }

    /// Every publish time the rules care about, relative to `now()`.
    fn sample_times() -> Vec<Option<DateTime<Utc>>> {
        vec![
            None,
            Some(now() - TimeDelta::days(365)),
            Some(now() - TimeDelta::days(1)),
            Some(now() - TimeDelta::nanoseconds(1)),
            Some(now()),
            Some(now() + TimeDelta::nanoseconds(1)),
            Some(now() + TimeDelta::days(1)),
        ]
    }

    fn sample_publications() -> Vec<Publication> {
        [true, false]
            .into_iter()
            .flat_map(|is_draft| {
                sample_times()
                    .into_iter()
                    .map(move |at| publication(is_draft, at))
            })
            .collect()
    }

    #[test]
    fn test_drafts_are_never_visible() {
        for at in sample_times() {
            assert!(!is_visible(publication(true, at), now()), "{at:?}");
        }
    }

    #[test]
    fn test_non_draft_without_publish_time_is_not_visible() {
        assert!(!is_visible(publication(false, None), now()));
        assert_eq!(
            PostStatus::of(publication(false, None), now()),
            PostStatus::Unpublished
        );
    }

    #[test]
    fn test_past_or_present_publish_time_is_visible() {
        assert!(is_visible(
            publication(false, Some(now() - TimeDelta::days(1))),
            now()
        ));
        assert!(is_visible(publication(false, Some(now())), now()));
    }

    #[test]
    fn test_future_publish_time_is_not_visible() {
        assert!(!is_visible(
            publication(false, Some(now() + TimeDelta::nanoseconds(1))),
            now()
        ));
        assert!(!is_visible(
            publication(false, Some(now() + TimeDelta::days(1))),
            now()
        ));
    }

    #[test]
    fn test_visibility_agrees_with_published_status() {
        for p in sample_publications() {
            assert_eq!(
                is_visible(p, now()),
                PostStatus::of(p, now()) == PostStatus::Published,
                "{p:?}"
            );
        }
    }

    #[test]
    fn test_listing_filter_has_the_three_visibility_clauses() {
        let filter = listing_filter(now());

        assert_eq!(filter.now(), now());
        assert_eq!(
            filter.clauses(),
            &[
                Clause::DraftIs(false),
                Clause::PublishedAtIsSet,
                Clause::PublishedAtOrBefore(now()),
            ]
        );
    }

    #[test]
    fn test_listing_filter_selects_exactly_the_visible_posts() {
        let filter = listing_filter(now());
        let posts = sample_publications();

        let listed: Vec<_> = posts.iter().filter(|p| filter.matches(**p)).collect();
        let visible: Vec<_> = posts.iter().filter(|p| is_visible(**p, now())).collect();

        assert_eq!(listed, visible);
        assert_eq!(listed.len(), 4);
    }

    #[test]
    fn test_missing_publish_time_fails_the_comparison_clause() {
        let clause = Clause::PublishedAtOrBefore(now());

        assert!(!clause.matches(publication(false, None)));
    }

    #[test]
    fn test_ensure_visible_hides_scheduled_post_as_not_found() {
        let post = Post::new(
            Uuid::new_v4(),
            NewPost {
                title: "Soon".to_string(),
                content: "Body".to_string(),
                is_draft: Some(false),
                published_at: Some(now() + TimeDelta::days(1)),
            },
            now(),
        );
        let id = post.id;

        let err = ensure_visible(post, now()).unwrap_err();

        assert!(matches!(
            err,
            DomainError::NotFound { entity_type: "Post", id: hidden } if hidden == id
        ));
    }

    #[test]
    fn test_ensure_visible_passes_published_post_through() {
        let post = Post::new(
            Uuid::new_v4(),
            NewPost {
                title: "Out".to_string(),
                content: "Body".to_string(),
                is_draft: Some(false),
                published_at: Some(now() - TimeDelta::days(1)),
            },
            now(),
        );

        let shown = ensure_visible(post.clone(), now()).unwrap();

        assert_eq!(shown, post);
    }
}
