use std::sync::Arc;

use axum::{middleware::from_fn, Extension, Router};
use tower_http::trace::TraceLayer;

use crate::{
    handlers::{
        auth::auth_handler,
        posts::{blog_handler, posts_mutations_handler},
        user::{profile_handler, profile_mutations_handler},
    },
    middleware::require_auth,
    AppState,
};

/// Builds the whole routing table once at startup. Mutating routes sit
/// behind the auth middleware; listings and the detail page stay open.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    let mutations = Router::new()
        .merge(posts_mutations_handler())
        .merge(profile_mutations_handler())
        .layer(from_fn(require_auth));

    Router::new()
        .merge(blog_handler())
        .merge(profile_handler())
        .merge(mutations)
        .nest("/auth", auth_handler())
        .layer(TraceLayer::new_for_http())
        .layer(Extension(app_state))
}
