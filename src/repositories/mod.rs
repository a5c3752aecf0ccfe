use sqlx::SqlitePool;

pub mod category_repo;
pub mod posts_repo;
pub mod user_repo;

#[derive(Clone)]
pub struct SqliteRepo {
    pool: SqlitePool,
}

impl SqliteRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}
