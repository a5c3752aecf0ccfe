use std::str::FromStr;

use config::Config;
use repositories::SqliteRepo;
use services::{auth::AuthService, posts::PostsService, user::UsersService};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};

pub use self::errors::{Error, Result};

pub mod config;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

#[derive(Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub config: Config,
    pub auth_service: AuthService,
    pub posts_service: PostsService,
    pub users_service: UsersService,
}

impl AppState {
    pub fn new(pool: SqlitePool, config: Config) -> Self {
        let repo = SqliteRepo::new(pool.clone());

        AppState {
            db_pool: pool,
            auth_service: AuthService::new(
                repo.clone(),
                config.jwt_secret.clone(),
                config.jwt_maxage,
            ),
            posts_service: PostsService::new(repo.clone()),
            users_service: UsersService::new(repo),
            config,
        }
    }
}

/// Opens the pool and brings the schema up to date. Foreign keys are opt-in
/// per connection in SQLite, and comment cascade relies on them.
pub async fn init_db(database_url: &str, max_connections: u32) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(sqlx::Error::from)?;

    Ok(pool)
}
