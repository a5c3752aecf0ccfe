use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Redirect},
    routing::{get, post},
    Extension, Json, Router,
};
use validator::Validate;

use crate::{
    middleware::{user_from_headers, CurrentUser},
    models::posts::{
        CategoryPage, CreateCommentDto, CreatePostDto, PostPage, UpdateCommentDto, UpdatePostDto,
    },
    models::query::PageQuery,
    AppState, Result,
};

/// Read-only listings and the detail page. No session required.
pub fn blog_handler() -> Router {
    Router::new()
        .route("/", get(index))
        .route("/category/{slug}/", get(category_posts))
        .route("/posts/{id}/", get(post_detail))
}

/// Everything that writes. The caller must already carry a session; the
/// router is wrapped with the auth middleware in `create_router`.
pub fn posts_mutations_handler() -> Router {
    Router::new()
        .route("/posts/create/", post(create_post))
        .route("/posts/{id}/edit/", post(update_post))
        .route("/posts/{id}/delete/", post(delete_post))
        .route("/posts/{id}/comment/", post(create_comment))
        .route("/posts/{id}/comment/{comment_id}/edit/", post(update_comment))
        .route(
            "/posts/{id}/comment/{comment_id}/delete/",
            post(delete_comment),
        )
}

async fn index(
    Extension(app_state): Extension<Arc<AppState>>,
    Query(page_query): Query<PageQuery>,
) -> Result<impl IntoResponse> {
    let page_size = app_state.config.page_size;
    let (page, offset) = page_query.offset(page_size);

    let posts = app_state.posts_service.index(page_size, offset).await?;

    Ok((
        StatusCode::OK,
        Json(PostPage {
            posts,
            page,
            page_size,
        }),
    ))
}

async fn category_posts(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(slug): Path<String>,
    Query(page_query): Query<PageQuery>,
) -> Result<impl IntoResponse> {
    let page_size = app_state.config.page_size;
    let (page, offset) = page_query.offset(page_size);

    let (category, posts) = app_state
        .posts_service
        .category_posts(&slug, page_size, offset)
        .await?;

    Ok((
        StatusCode::OK,
        Json(CategoryPage {
            category,
            posts,
            page,
            page_size,
        }),
    ))
}

/// Identity is resolved once per request and picks the read mode: authors
/// see their own drafts, everyone else only what is publicly visible.
async fn post_detail(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(post_id): Path<i64>,
    headers: HeaderMap,
) -> Result<impl IntoResponse> {
    let viewer = user_from_headers(&app_state, &headers).await.map(|u| u.id);

    let detail = app_state.posts_service.detail(post_id, viewer).await?;

    Ok((StatusCode::OK, Json(detail)))
}

async fn create_post(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(new_post): Json<CreatePostDto>,
) -> Result<impl IntoResponse> {
    new_post.validate()?;

    app_state.posts_service.create(&user, new_post).await?;

    Ok(Redirect::to(&format!("/profile/{}/", user.username)))
}

async fn update_post(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(post_id): Path<i64>,
    Json(update): Json<UpdatePostDto>,
) -> Result<impl IntoResponse> {
    update.validate()?;

    app_state
        .posts_service
        .update(&user, post_id, update)
        .await?;

    Ok(Redirect::to(&format!("/posts/{post_id}/")))
}

async fn delete_post(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(post_id): Path<i64>,
) -> Result<impl IntoResponse> {
    app_state.posts_service.delete(&user, post_id).await?;

    Ok(Redirect::to("/"))
}

async fn create_comment(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(post_id): Path<i64>,
    Json(comment): Json<CreateCommentDto>,
) -> Result<impl IntoResponse> {
    comment.validate()?;

    app_state
        .posts_service
        .add_comment(&user, post_id, comment)
        .await?;

    Ok(Redirect::to(&format!("/posts/{post_id}/")))
}

async fn update_comment(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path((post_id, comment_id)): Path<(i64, i64)>,
    Json(update): Json<UpdateCommentDto>,
) -> Result<impl IntoResponse> {
    update.validate()?;

    app_state
        .posts_service
        .update_comment(&user, post_id, comment_id, update)
        .await?;

    Ok(Redirect::to(&format!("/posts/{post_id}/")))
}

async fn delete_comment(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path((post_id, comment_id)): Path<(i64, i64)>,
) -> Result<impl IntoResponse> {
    app_state
        .posts_service
        .delete_comment(&user, post_id, comment_id)
        .await?;

    Ok(Redirect::to(&format!("/posts/{post_id}/")))
}
