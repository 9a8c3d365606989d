//! Post handlers.
//!
//! Reads go through the visibility rule; writes go through the ownership
//! check. Editing is deliberately not visibility-gated, so an owner can still
//! reach a draft or scheduled post.

use std::collections::HashMap;

use actix_web::{HttpResponse, http::header, web};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use blog_core::domain::{
    DEFAULT_IS_DRAFT, DEFAULT_PER_PAGE, NewPost, PageRequest, Post, PostChanges, User,
    ensure_can_modify, ensure_visible, listing_filter,
};
use blog_core::ports::{BaseRepository, PostRepository, UserRepository};
use blog_shared::Validate;
use blog_shared::dto::{
    CreatePostRequest, ListPostsQuery, PostFormResponse, PostListResponse, PostResponse,
    UpdatePostRequest,
};

use super::user_response;
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn post_response(post: Post, author: Option<User>, now: DateTime<Utc>) -> PostResponse {
    PostResponse {
        status: post.status(now).as_str().to_string(),
        id: post.id,
        user_id: post.user_id,
        title: post.title,
        content: post.content,
        is_draft: post.is_draft,
        published_at: post.published_at,
        created_at: post.created_at,
        updated_at: post.updated_at,
        user: author.map(user_response),
    }
}

/// Single post with its author loaded.
async fn authored_response(
    state: &AppState,
    post: Post,
    now: DateTime<Utc>,
) -> AppResult<PostResponse> {
    let author = state.users.find_by_id(post.user_id).await?;
    Ok(post_response(post, author, now))
}

async fn find_post(state: &AppState, id: Uuid) -> AppResult<Post> {
    state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))
}

/// GET /api/posts?page=N
pub async fn index(
    state: web::Data<AppState>,
    query: web::Query<ListPostsQuery>,
) -> AppResult<HttpResponse> {
    let now = state.clock.now();
    let request = PageRequest::new(query.page.unwrap_or(1), DEFAULT_PER_PAGE);

    let page = state
        .posts
        .list_visible(&listing_filter(now), request)
        .await?;
    let last_page = page.last_page();

    let mut author_ids: Vec<Uuid> = page.items.iter().map(|post| post.user_id).collect();
    author_ids.sort_unstable();
    author_ids.dedup();
    let authors: HashMap<Uuid, User> = state
        .users
        .find_by_ids(&author_ids)
        .await?
        .into_iter()
        .map(|user| (user.id, user))
        .collect();

    let page = page.map(|post| {
        let author = authors.get(&post.user_id).cloned();
        post_response(post, author, now)
    });

    Ok(HttpResponse::Ok().json(PostListResponse {
        data: page.items,
        current_page: page.page,
        per_page: page.per_page,
        total: page.total,
        last_page,
    }))
}

/// GET /api/posts/create
pub async fn create_form(_identity: Identity) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(PostFormResponse {
        form: "posts.create".to_string(),
        default_is_draft: DEFAULT_IS_DRAFT,
        post: None,
    }))
}

/// POST /api/posts
pub async fn store(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate().map_err(AppError::Validation)?;

    let now = state.clock.now();
    let post = Post::new(
        identity.user_id,
        NewPost {
            title: req.title,
            content: req.content,
            is_draft: req.is_draft,
            published_at: req.published_at,
        },
        now,
    );
    let post = state.posts.create(post).await?;

    tracing::info!(post_id = %post.id, user_id = %identity.user_id, "Post created");

    let location = format!("/api/posts/{}", post.id);
    let body = authored_response(&state, post, now).await?;

    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, location))
        .json(body))
}

/// GET /api/posts/{id}
///
/// Hidden posts answer exactly like missing ones, for every caller.
pub async fn show(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let now = state.clock.now();
    let post = find_post(&state, path.into_inner()).await?;
    let post = ensure_visible(post, now)?;

    Ok(HttpResponse::Ok().json(authored_response(&state, post, now).await?))
}

/// GET /api/posts/{id}/edit
pub async fn edit(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = find_post(&state, path.into_inner()).await?;
    ensure_can_modify(&post, Some(identity.user_id))?;

    Ok(HttpResponse::Ok().json(PostFormResponse {
        form: "posts.edit".to_string(),
        default_is_draft: DEFAULT_IS_DRAFT,
        post: Some(authored_response(&state, post, state.clock.now()).await?),
    }))
}

/// PUT /api/posts/{id}
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let mut post = find_post(&state, path.into_inner()).await?;
    ensure_can_modify(&post, Some(identity.user_id))?;

    let req = body.into_inner();
    req.validate().map_err(AppError::Validation)?;

    let now = state.clock.now();
    post.apply(
        PostChanges {
            title: Some(req.title),
            content: Some(req.content),
            is_draft: req.is_draft,
            published_at: req.published_at,
        },
        now,
    );
    let post = state.posts.update(post).await?;

    tracing::info!(post_id = %post.id, status = ?post.status(now), "Post updated");

    Ok(HttpResponse::Ok().json(authored_response(&state, post, now).await?))
}

/// DELETE /api/posts/{id}
pub async fn destroy(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = find_post(&state, path.into_inner()).await?;
    ensure_can_modify(&post, Some(identity.user_id))?;

    state.posts.delete(post.id).await?;

    tracing::info!(post_id = %post.id, "Post deleted");

    Ok(HttpResponse::NoContent().finish())
}
