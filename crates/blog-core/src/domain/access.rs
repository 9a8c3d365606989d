//! Authorship rules for mutating posts.

use uuid::Uuid;

use super::post::Post;
use crate::error::DomainError;

/// Whether `actor` may edit, update or delete a record owned by `owner`.
///
/// Anonymous actors (`None`) never match.
pub fn can_modify(owner: Uuid, actor: Option<Uuid>) -> bool {
    actor.is_some_and(|actor| actor == owner)
}

/// Require that `actor` owns `post`.
pub fn ensure_can_modify(post: &Post, actor: Option<Uuid>) -> Result<(), DomainError> {
    if can_modify(post.user_id, actor) {
        return Ok(());
    }

    match actor {
        None => Err(DomainError::Unauthorized),
        Some(_) => Err(DomainError::Forbidden {
            entity_type: "Post",
            id: post.id,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NewPost;
    use chrono::{TimeDelta, Utc};

    fn post_owned_by(owner: Uuid, is_draft: bool, offset: Option<TimeDelta>) -> Post {
        let now = Utc::now();
        Post::new(
            owner,
            NewPost {
                title: "Title".to_string(),
                content: "Body".to_string(),
                is_draft: Some(is_draft),
                published_at: offset.map(|d| now + d),
            },
            now,
        )
    }

    #[test]
    fn test_owner_can_modify() {
        let owner = Uuid::new_v4();
        assert!(can_modify(owner, Some(owner)));
    }

    #[test]
    fn test_other_user_cannot_modify() {
        assert!(!can_modify(Uuid::new_v4(), Some(Uuid::new_v4())));
    }

    #[test]
    fn test_anonymous_cannot_modify() {
        assert!(!can_modify(Uuid::new_v4(), None));
        assert!(!can_modify(Uuid::nil(), None));
    }

    #[test]
    fn test_ownership_ignores_publication_state() {
        let owner = Uuid::new_v4();
        let stranger = Uuid::new_v4();
        let posts = [
            post_owned_by(owner, true, None),
            post_owned_by(owner, false, None),
            post_owned_by(owner, false, Some(TimeDelta::days(1))),
            post_owned_by(owner, false, Some(TimeDelta::days(-1))),
        ];

        for post in &posts {
            assert!(ensure_can_modify(post, Some(owner)).is_ok());
            assert!(ensure_can_modify(post, Some(stranger)).is_err());
        }
    }

    #[test]
    fn test_ensure_can_modify_distinguishes_anonymous_from_stranger() {
        let post = post_owned_by(Uuid::new_v4(), true, None);

        assert!(matches!(
            ensure_can_modify(&post, None),
            Err(DomainError::Unauthorized)
        ));
        assert!(matches!(
            ensure_can_modify(&post, Some(Uuid::new_v4())),
            Err(DomainError::Forbidden { entity_type: "Post", id }) if id == post.id
        ));
    }
}
