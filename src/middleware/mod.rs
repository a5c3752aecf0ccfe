use std::sync::Arc;

use axum::{
    extract::Request,
    http::{header, HeaderMap},
    middleware::Next,
    response::IntoResponse,
};
use axum_extra::extract::CookieJar;

use crate::{models::users::User, AppState, Error, Result};

/// The authenticated user for the current request, inserted by
/// [`require_auth`] and read by handlers through `Extension`.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Single token-to-user resolution path: token from the `token` cookie or a
/// `Bearer` header, decoded and looked up. Both the strict middleware and
/// the optional identification on the detail view go through here.
pub async fn user_from_headers(app_state: &AppState, headers: &HeaderMap) -> Option<User> {
    let cookies = CookieJar::from_headers(headers);

    let token = cookies
        .get("token")
        .map(|c| c.value().to_string())
        .or_else(|| {
            headers
                .get(header::AUTHORIZATION)
                .and_then(|auth_header| auth_header.to_str().ok())
                .and_then(|auth_value| {
                    auth_value
                        .strip_prefix("Bearer ")
                        .map(|stripped| stripped.to_string())
                })
        })?;

    let user_id = app_state.auth_service.decode_token(token).ok()?;

    app_state.users_service.get_user(user_id).await.ok()
}

/// Guards every mutating route. A request without a valid session never
/// reaches the authorship check; it is sent to the login flow instead.
pub async fn require_auth(mut req: Request, next: Next) -> Result<impl IntoResponse> {
    let app_state = req
        .extensions()
        .get::<Arc<AppState>>()
        .cloned()
        .ok_or(Error::InternalServerError)?;

    let user = user_from_headers(&app_state, req.headers())
        .await
        .ok_or(Error::Unauthenticated)?;

    req.extensions_mut().insert(CurrentUser(user));

    Ok(next.run(req).await)
}
