#![allow(dead_code)]

use std::{str::FromStr, sync::Arc};

use backend_blogicum::{config::Config, routes::create_router, AppState};
use chrono::{DateTime, Utc};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};

/// One shared in-memory database per test. A single connection keeps every
/// query on the same memory instance.
pub async fn test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .unwrap()
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("failed to open in-memory database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("migrations failed");

    pool
}

pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: "test-secret".to_string(),
        jwt_maxage: 60,
        page_size: 10,
    }
}

/// Serves the full router on a random local port and returns the base URL.
pub async fn spawn_app(pool: SqlitePool) -> String {
    let app_state = Arc::new(AppState::new(pool, test_config()));
    let app = create_router(app_state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("could not bind a test port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}

/// A client that records cookies but never follows redirects, so the tests
/// can assert on Location headers directly.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .cookie_store(true)
        .build()
        .unwrap()
}

pub async fn seed_user(pool: &SqlitePool, username: &str) -> i64 {
    sqlx::query_scalar(
        r#"
        INSERT INTO users (username, email, password, created_at)
        VALUES ($1, $2, 'not-a-real-hash', $3)
        RETURNING id
        "#,
    )
    .bind(username)
    .bind(format!("{username}@example.com"))
    .bind(Utc::now())
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn seed_category(pool: &SqlitePool, slug: &str, is_published: bool) -> i64 {
    sqlx::query_scalar(
        r#"
        INSERT INTO categories (title, description, slug, is_published, created_at)
        VALUES ($1, '', $2, $3, $4)
        RETURNING id
        "#,
    )
    .bind(format!("Category {slug}"))
    .bind(slug)
    .bind(is_published)
    .bind(Utc::now())
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn seed_post(
    pool: &SqlitePool,
    author_id: i64,
    category_id: Option<i64>,
    is_published: bool,
    pub_date: DateTime<Utc>,
) -> i64 {
    sqlx::query_scalar(
        r#"
        INSERT INTO posts (title, text, pub_date, is_published, created_at, author_id, category_id)
        VALUES ($1, 'body', $2, $3, $4, $5, $6)
        RETURNING id
        "#,
    )
    .bind(format!("Post by {author_id}"))
    .bind(pub_date)
    .bind(is_published)
    .bind(Utc::now())
    .bind(author_id)
    .bind(category_id)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn seed_comment(pool: &SqlitePool, post_id: i64, author_id: i64) -> i64 {
    sqlx::query_scalar(
        r#"
        INSERT INTO comments (text, created_at, post_id, author_id)
        VALUES ('a comment', $1, $2, $3)
        RETURNING id
        "#,
    )
    .bind(Utc::now())
    .bind(post_id)
    .bind(author_id)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn post_count(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM posts")
        .fetch_one(pool)
        .await
        .unwrap()
}
