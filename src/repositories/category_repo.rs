use async_trait::async_trait;

use crate::{models::posts::Category, Result};

use super::SqliteRepo;

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Resolves a category by slug, restricted to published ones. Listing a
    /// hidden category behaves exactly like a missing one.
    async fn published_category_by_slug(&self, slug: &str) -> Result<Option<Category>>;
}

#[async_trait]
impl CategoryRepository for SqliteRepo {
    async fn published_category_by_slug(&self, slug: &str) -> Result<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, title, description, slug, is_published, created_at
            FROM categories
            WHERE slug = $1 AND is_published = 1
            "#,
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }
}
