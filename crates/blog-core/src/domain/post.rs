use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Draft flag applied when the author does not say otherwise.
pub const DEFAULT_IS_DRAFT: bool = true;

/// Post entity - represents a blog post owned by a single user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    /// Owner. Set once in [`Post::new`] and never reassigned.
    pub user_id: Uuid,
    pub title: String,
    pub content: String,
    pub is_draft: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The two stored fields that decide whether a post is public.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Publication {
    pub is_draft: bool,
    pub published_at: Option<DateTime<Utc>>,
}

/// Author-supplied fields for a new post.
///
/// `is_draft` is optional so the draft default is applied here and not by
/// each caller.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub is_draft: Option<bool>,
    pub published_at: Option<DateTime<Utc>>,
}

/// Changes an owner may apply to an existing post.
///
/// `None` leaves a field untouched. `published_at: Some(None)` clears the
/// publish time.
#[derive(Debug, Clone, Default)]
pub struct PostChanges {
    pub title: Option<String>,
    pub content: Option<String>,
    pub is_draft: Option<bool>,
    pub published_at: Option<Option<DateTime<Utc>>>,
}

/// Derived lifecycle state. Never stored; recomputed against a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostStatus {
    Draft,
    Scheduled,
    Published,
    /// Not a draft but without a publish time. Legal, never visible.
    Unpublished,
}

impl Post {
    /// Create a new post owned by `user_id`.
    pub fn new(user_id: Uuid, new_post: NewPost, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            title: new_post.title,
            content: new_post.content,
            is_draft: new_post.is_draft.unwrap_or(DEFAULT_IS_DRAFT),
            published_at: new_post.published_at,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn publication(&self) -> Publication {
        Publication {
            is_draft: self.is_draft,
            published_at: self.published_at,
        }
    }

    pub fn status(&self, now: DateTime<Utc>) -> PostStatus {
        PostStatus::of(self.publication(), now)
    }

    /// Apply owner edits. Ownership and creation time are not editable.
    pub fn apply(&mut self, changes: PostChanges, now: DateTime<Utc>) {
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(content) = changes.content {
            self.content = content;
        }
        if let Some(is_draft) = changes.is_draft {
            self.is_draft = is_draft;
        }
        if let Some(published_at) = changes.published_at {
            self.published_at = published_at;
        }
        self.updated_at = now;
    }
}

impl PostStatus {
    /// Wire name, identical to the serde representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Scheduled => "scheduled",
            Self::Published => "published",
            Self::Unpublished => "unpublished",
        }
    }

    pub fn of(publication: Publication, now: DateTime<Utc>) -> Self {
        match (publication.is_draft, publication.published_at) {
            (true, _) => Self::Draft,
            (false, None) => Self::Unpublished,
            (false, Some(at)) if at <= now => Self::Published,
            (false, Some(_)) => Self::Scheduled,
        }
    }
}
