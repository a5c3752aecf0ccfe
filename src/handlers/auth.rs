use std::sync::Arc;

use axum::{
    http::{header, HeaderMap},
    response::{IntoResponse, Redirect},
    routing::post,
    Extension, Json, Router,
};
use tower_cookies::Cookie;
use tower_http::cors::{Any, CorsLayer};
use validator::Validate;

use crate::{
    models::users::{LoginUserDto, RegisterUserDto, UserLoginResponseDto},
    AppState, Error, Result,
};

pub fn auth_handler() -> Router {
    Router::new()
        .route("/registration/", post(register))
        .route("/login/", post(login))
}

pub fn configure_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any)
}

fn session_cookie(token: &str, maxage_minutes: i64) -> Cookie<'static> {
    Cookie::build(("token", token.to_string()))
        .path("/")
        .max_age(time::Duration::minutes(maxage_minutes))
        .http_only(true)
        .build()
}

/// Creates the account and logs the new user straight in: the session
/// cookie rides along with the redirect to the index.
pub async fn register(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(new_user): Json<RegisterUserDto>,
) -> Result<impl IntoResponse> {
    new_user.validate()?;

    let user = app_state.auth_service.register(new_user).await?;
    let token = app_state.auth_service.generate_token(user.id)?;

    let cookie = session_cookie(&token, app_state.config.jwt_maxage);
    let mut headers = HeaderMap::new();
    headers.append(
        header::SET_COOKIE,
        cookie
            .to_string()
            .parse()
            .map_err(|_| Error::InternalServerError)?,
    );

    let mut response = Redirect::to("/").into_response();
    response.headers_mut().extend(headers);

    Ok(response)
}

pub async fn login(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(user): Json<LoginUserDto>,
) -> Result<impl IntoResponse> {
    user.validate()?;

    let (_user, token) = app_state
        .auth_service
        .login(&user.username, &user.password)
        .await?;

    let cookie = session_cookie(&token, app_state.config.jwt_maxage);

    let response = Json(UserLoginResponseDto {
        status: "success".to_string(),
        token: token.clone(),
    });

    let mut headers = HeaderMap::new();
    headers.append(
        header::SET_COOKIE,
        cookie
            .to_string()
            .parse()
            .map_err(|_| Error::InternalServerError)?,
    );

    let mut response = response.into_response();
    response.headers_mut().extend(headers);

    Ok(response)
}
