use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde_json::json;
use tracing::error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    NotFound,
    /// The requester is not the author of the entity it tried to mutate.
    /// Rendered as a redirect to the owning post's detail page instead of
    /// a permission error, so the user never lands on a dead-end.
    NotAuthor { post_id: i64 },
    /// No valid session on a mutating route. Rendered as a redirect to the
    /// login flow.
    Unauthenticated,
    /// Wrong username or password on the login endpoint itself. A plain 401,
    /// never a redirect, so a failed login does not bounce back to itself.
    InvalidCredentials,
    BadRequest(String),
    InternalServerError,
    DatabaseError(sqlx::Error),
    InvalidHashFormat(argon2::password_hash::Error),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::NotFound => (StatusCode::NOT_FOUND, "Resource not found".to_string()),
            Self::NotAuthor { post_id } => {
                return Redirect::to(&format!("/posts/{post_id}/")).into_response();
            }
            Self::Unauthenticated => {
                return Redirect::to("/auth/login/").into_response();
            }
            Self::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "Invalid username or password".to_string(),
            ),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::InternalServerError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
            Self::DatabaseError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Database error".to_string(),
            ),
            Self::InvalidHashFormat(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Invalid hash format".to_string(),
            ),
        };

        let body = Json(json!({ "error": message }));
        (status, body).into_response()
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound => write!(f, "resource not found"),
            Self::NotAuthor { post_id } => write!(f, "not the author of post {post_id}"),
            Self::Unauthenticated => write!(f, "no valid session"),
            Self::InvalidCredentials => write!(f, "invalid username or password"),
            Self::BadRequest(msg) => write!(f, "{msg}"),
            Self::InternalServerError => write!(f, "internal server error"),
            Self::DatabaseError(err) => write!(f, "database error: {err}"),
            Self::InvalidHashFormat(err) => write!(f, "invalid hash format: {err}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Self::NotFound,
            err => {
                error!("Database error: {:?}", err);
                Self::DatabaseError(err)
            }
        }
    }
}

impl From<argon2::password_hash::Error> for Error {
    fn from(err: argon2::password_hash::Error) -> Self {
        error!("Invalid hash format");
        Self::InvalidHashFormat(err)
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::BadRequest(err.to_string())
    }
}
