use std::collections::BTreeMap;

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{DatabaseBackend, EntityTrait, MockDatabase, QueryFilter, QueryTrait, Value};
use uuid::Uuid;

use blog_core::domain::{PageRequest, Post, listing_filter};
use blog_core::error::RepoError;
use blog_core::ports::{BaseRepository, PostRepository, UserRepository};

use crate::database::entity::post::{self, Entity as PostEntity};
use crate::database::entity::user;
use crate::database::listing::listing_condition;
use crate::database::postgres_repo::{PostgresPostRepository, PostgresUserRepository};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
}

fn published_model(title: &str, published_at: DateTime<Utc>) -> post::Model {
    post::Model {
        id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
        title: title.to_owned(),
        content: "Content".to_owned(),
        is_draft: false,
        published_at: Some(published_at.into()),
        created_at: now().into(),
        updated_at: now().into(),
    }
}

#[tokio::test]
async fn test_find_post_by_id() {
    let post_id = Uuid::new_v4();
    let user_id = Uuid::new_v4();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![post::Model {
            id: post_id,
            user_id,
            title: "Test Post".to_owned(),
            content: "Content".to_owned(),
            is_draft: true,
            published_at: None,
            created_at: now().into(),
            updated_at: now().into(),
        }]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let post: Post = repo.find_by_id(post_id).await.unwrap().unwrap();

    assert_eq!(post.id, post_id);
    assert_eq!(post.user_id, user_id);
    assert_eq!(post.title, "Test Post");
    assert!(post.is_draft);
    assert_eq!(post.published_at, None);
    assert_eq!(post.created_at, now());
}

#[tokio::test]
async fn test_find_missing_post_returns_none() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<post::Model>::new()])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result: Option<Post> = repo.find_by_id(Uuid::new_v4()).await.unwrap();

    assert!(result.is_none());
}

#[test]
fn test_listing_condition_binds_false_and_the_filter_instant() {
    let stmt = PostEntity::find()
        .filter(listing_condition(&listing_filter(now())))
        .build(DatabaseBackend::Postgres);

    assert!(stmt.sql.contains(r#""posts"."is_draft" = $1"#), "{}", stmt.sql);
    assert!(
        stmt.sql.contains(r#""posts"."published_at" IS NOT NULL"#),
        "{}",
        stmt.sql
    );
    assert!(
        stmt.sql.contains(r#""posts"."published_at" <= $2"#),
        "{}",
        stmt.sql
    );
    assert_eq!(stmt.sql.matches(" AND ").count(), 2, "{}", stmt.sql);

    let values = stmt.values.map(|v| v.0).unwrap_or_default();
    assert_eq!(
        values,
        vec![
            Value::from(false),
            Value::from(DateTimeWithTimeZone::from(now())),
        ]
    );
}

#[test]
fn test_listing_condition_moves_with_the_instant() {
    let later = now() + TimeDelta::days(1);
    let stmt = PostEntity::find()
        .filter(listing_condition(&listing_filter(later)))
        .build(DatabaseBackend::Postgres);

    let values = stmt.values.map(|v| v.0).unwrap_or_default();
    assert_eq!(
        values.last(),
        Some(&Value::from(DateTimeWithTimeZone::from(later)))
    );
}

#[tokio::test]
async fn test_list_visible_reports_total_and_page() {
    let newer = published_model("Newer", now() - TimeDelta::days(1));
    let older = published_model("Older", now() - TimeDelta::days(2));
    let count_row = BTreeMap::from([("num_items", Value::BigInt(Some(25)))]);

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[count_row]])
        .append_query_results([vec![newer, older]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let page = repo
        .list_visible(&listing_filter(now()), PageRequest::default())
        .await
        .unwrap();

    assert_eq!(page.total, 25);
    assert_eq!(page.page, 1);
    assert_eq!(page.per_page, 20);
    assert_eq!(page.last_page(), 2);
    let titles: Vec<_> = page.items.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, ["Newer", "Older"]);
}

#[tokio::test]
async fn test_delete_missing_post_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([sea_orm::MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result = BaseRepository::<Post, Uuid>::delete(&repo, Uuid::new_v4()).await;

    assert!(matches!(result, Err(RepoError::NotFound)));
}

#[tokio::test]
async fn test_list_visible_past_the_last_page_skips_the_fetch() {
    let count_row = BTreeMap::from([("num_items", Value::BigInt(Some(25)))]);

    // Only the count is queued; a page query would find no result and fail.
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[count_row]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let page = repo
        .list_visible(&listing_filter(now()), PageRequest::new(u64::MAX, 20))
        .await
        .unwrap();

    assert!(page.items.is_empty());
    assert_eq!(page.total, 25);
    assert_eq!(page.page, u64::MAX);
}

#[tokio::test]
async fn test_find_users_by_ids() {
    let id = Uuid::new_v4();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![user::Model {
            id,
            email: "alice@example.com".to_owned(),
            password_hash: "hash".to_owned(),
            created_at: now().into(),
            updated_at: now().into(),
        }]])
        .into_connection();

    let repo = PostgresUserRepository::new(db);

    let users = repo.find_by_ids(&[id]).await.unwrap();

    assert_eq!(users.len(), 1);
    assert_eq!(users[0].email, "alice@example.com");
}

#[tokio::test]
async fn test_find_users_by_no_ids_does_not_query() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

    let repo = PostgresUserRepository::new(db);

    assert!(repo.find_by_ids(&[]).await.unwrap().is_empty());
}
