use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::{
    models::posts::{Comment, CommentWithAuthor, CreatePostDto, PostWithMeta, UpdatePostDto},
    Error, Result,
};

use super::SqliteRepo;

/// Base projection shared by every post query: the post row joined with its
/// author, category and location, annotated with the comment count. The
/// visibility clause and ordering are appended per variant so the policy has
/// a single source of truth.
const POST_QUERY: &str = r#"
    SELECT p.id           AS "id",
           p.title        AS "title",
           p.text         AS "text",
           p.image_url    AS "image_url",
           p.pub_date     AS "pub_date",
           p.is_published AS "is_published",
           p.created_at   AS "created_at",
           p.author_id    AS "author_id",
           u.username     AS "author_username",
           p.category_id  AS "category_id",
           c.title        AS "category_title",
           c.slug         AS "category_slug",
           l.name         AS "location_name",
           (SELECT COUNT(*)
            FROM comments cm
            WHERE cm.post_id = p.id) AS "comment_count"
    FROM posts p
         JOIN users u ON u.id = p.author_id
         LEFT JOIN categories c ON c.id = p.category_id
         LEFT JOIN locations l ON l.id = p.location_id
"#;

/// Publicly visible means: the post is published, its category exists and is
/// published, and the publish date is not in the future (inclusive of now).
/// Posts without a category never pass (c.is_published is NULL).
const VISIBLE_CLAUSE: &str = r#"
    p.is_published = 1
    AND c.is_published = 1
    AND datetime(p.pub_date) <= datetime($1)
"#;

const ORDER_CLAUSE: &str = "ORDER BY datetime(p.pub_date) DESC";

#[async_trait]
pub trait PostsRepository: Sync + Send {
    async fn visible_posts(
        &self,
        now: DateTime<Utc>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<PostWithMeta>>;
    async fn visible_posts_in_category(
        &self,
        category_id: i64,
        now: DateTime<Utc>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<PostWithMeta>>;
    async fn visible_post_by_id(
        &self,
        post_id: i64,
        now: DateTime<Utc>,
    ) -> Result<Option<PostWithMeta>>;
    async fn post_by_id(&self, post_id: i64) -> Result<Option<PostWithMeta>>;
    async fn posts_by_author(
        &self,
        author_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<PostWithMeta>>;
    async fn create_post(&self, author_id: i64, post: &CreatePostDto) -> Result<PostWithMeta>;
    async fn update_post(&self, post_id: i64, update: &UpdatePostDto) -> Result<()>;
    async fn delete_post(&self, post_id: i64) -> Result<()>;

    async fn comments_for_post(&self, post_id: i64) -> Result<Vec<CommentWithAuthor>>;
    async fn comment_by_id(&self, comment_id: i64) -> Result<Option<Comment>>;
    async fn create_comment(&self, post_id: i64, author_id: i64, text: &str) -> Result<Comment>;
    async fn update_comment(&self, comment_id: i64, text: Option<&str>) -> Result<()>;
    async fn delete_comment(&self, comment_id: i64) -> Result<()>;
}

#[async_trait]
impl PostsRepository for SqliteRepo {
    async fn visible_posts(
        &self,
        now: DateTime<Utc>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<PostWithMeta>> {
        let sql =
            format!("{POST_QUERY} WHERE {VISIBLE_CLAUSE} {ORDER_CLAUSE} LIMIT $2 OFFSET $3");
        let posts = sqlx::query_as::<_, PostWithMeta>(&sql)
            .bind(now)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;
        Ok(posts)
    }

    async fn visible_posts_in_category(
        &self,
        category_id: i64,
        now: DateTime<Utc>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<PostWithMeta>> {
        let sql = format!(
            "{POST_QUERY} WHERE {VISIBLE_CLAUSE} AND p.category_id = $2 {ORDER_CLAUSE} LIMIT $3 OFFSET $4"
        );
        let posts = sqlx::query_as::<_, PostWithMeta>(&sql)
            .bind(now)
            .bind(category_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;
        Ok(posts)
    }

    async fn visible_post_by_id(
        &self,
        post_id: i64,
        now: DateTime<Utc>,
    ) -> Result<Option<PostWithMeta>> {
        let sql = format!("{POST_QUERY} WHERE {VISIBLE_CLAUSE} AND p.id = $2");
        let post = sqlx::query_as::<_, PostWithMeta>(&sql)
            .bind(now)
            .bind(post_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(post)
    }

    async fn post_by_id(&self, post_id: i64) -> Result<Option<PostWithMeta>> {
        let sql = format!("{POST_QUERY} WHERE p.id = $1");
        let post = sqlx::query_as::<_, PostWithMeta>(&sql)
            .bind(post_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(post)
    }

    async fn posts_by_author(
        &self,
        author_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<PostWithMeta>> {
        let sql = format!("{POST_QUERY} WHERE p.author_id = $1 {ORDER_CLAUSE} LIMIT $2 OFFSET $3");
        let posts = sqlx::query_as::<_, PostWithMeta>(&sql)
            .bind(author_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;
        Ok(posts)
    }

    async fn create_post(&self, author_id: i64, post: &CreatePostDto) -> Result<PostWithMeta> {
        let now = Utc::now();
        let pub_date = post.pub_date.unwrap_or(now);

        let post_id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO posts (title, text, image_url, pub_date, is_published,
                               created_at, author_id, category_id, location_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id
            "#,
        )
        .bind(&post.title)
        .bind(&post.text)
        .bind(post.image_url.as_deref())
        .bind(pub_date)
        .bind(post.is_published)
        .bind(now)
        .bind(author_id)
        .bind(post.category_id)
        .bind(post.location_id)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(post_id, author_id, "post created");

        let created = self.post_by_id(post_id).await?;
        created.ok_or(Error::NotFound)
    }

    async fn update_post(&self, post_id: i64, update: &UpdatePostDto) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE posts
            SET title = COALESCE($2, title),
                text = COALESCE($3, text),
                image_url = COALESCE($4, image_url),
                pub_date = COALESCE($5, pub_date),
                is_published = COALESCE($6, is_published),
                category_id = COALESCE($7, category_id),
                location_id = COALESCE($8, location_id)
            WHERE id = $1
            "#,
        )
        .bind(post_id)
        .bind(update.title.as_deref())
        .bind(update.text.as_deref())
        .bind(update.image_url.as_deref())
        .bind(update.pub_date)
        .bind(update.is_published)
        .bind(update.category_id)
        .bind(update.location_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete_post(&self, post_id: i64) -> Result<()> {
        sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(post_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn comments_for_post(&self, post_id: i64) -> Result<Vec<CommentWithAuthor>> {
        let comments = sqlx::query_as::<_, CommentWithAuthor>(
            r#"
            SELECT cm.id         AS "id",
                   cm.text       AS "text",
                   cm.post_id    AS "post_id",
                   cm.author_id  AS "author_id",
                   u.username    AS "author_username",
                   cm.created_at AS "created_at"
            FROM comments cm
                 JOIN users u ON u.id = cm.author_id
            WHERE cm.post_id = $1
            ORDER BY datetime(cm.created_at) ASC
            "#,
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(comments)
    }

    async fn comment_by_id(&self, comment_id: i64) -> Result<Option<Comment>> {
        let comment = sqlx::query_as::<_, Comment>(
            "SELECT id, text, post_id, author_id, created_at FROM comments WHERE id = $1",
        )
        .bind(comment_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(comment)
    }

    async fn create_comment(&self, post_id: i64, author_id: i64, text: &str) -> Result<Comment> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO comments (text, created_at, post_id, author_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, text, post_id, author_id, created_at
            "#,
        )
        .bind(text)
        .bind(Utc::now())
        .bind(post_id)
        .bind(author_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(comment)
    }

    async fn update_comment(&self, comment_id: i64, text: Option<&str>) -> Result<()> {
        sqlx::query("UPDATE comments SET text = COALESCE($2, text) WHERE id = $1")
            .bind(comment_id)
            .bind(text)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn delete_comment(&self, comment_id: i64) -> Result<()> {
        sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(comment_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
