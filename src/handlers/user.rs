use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::{IntoResponse, Redirect},
    routing::{get, post},
    Extension, Json, Router,
};
use validator::Validate;

use crate::{
    middleware::CurrentUser,
    models::posts::ProfilePage,
    models::query::PageQuery,
    models::users::{ProfileDto, UpdateProfileDto},
    AppState, Result,
};

pub fn profile_handler() -> Router {
    Router::new().route("/profile/{username}/", get(profile))
}

pub fn profile_mutations_handler() -> Router {
    Router::new().route("/profile/edit/", post(update_profile))
}

/// The profile page lists all of the user's posts, drafts included, to any
/// viewer; the detail page is where the visibility filter applies.
async fn profile(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(username): Path<String>,
    Query(page_query): Query<PageQuery>,
) -> Result<impl IntoResponse> {
    let page_size = app_state.config.page_size;
    let (page, offset) = page_query.offset(page_size);

    let user = app_state
        .users_service
        .get_user_by_username(&username)
        .await?;
    let posts = app_state
        .posts_service
        .author_posts(user.id, page_size, offset)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ProfilePage {
            profile: ProfileDto::from_user(&user),
            posts,
            page,
            page_size,
        }),
    ))
}

async fn update_profile(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(update): Json<UpdateProfileDto>,
) -> Result<impl IntoResponse> {
    update.validate()?;

    let updated = app_state
        .users_service
        .update_profile(user.id, update)
        .await?;

    Ok(Redirect::to(&format!("/profile/{}/", updated.username)))
}
