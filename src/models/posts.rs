use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::users::ProfileDto;

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct Category {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub slug: String,
    #[serde(rename = "isPublished")]
    pub is_published: bool,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct Location {
    pub id: i64,
    pub name: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// A post row joined with its author, category and location plus the
/// comment-count annotation. One row per post, no follow-up lookups.
#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct PostWithMeta {
    pub id: i64,
    pub title: String,
    pub text: String,
    #[serde(rename = "imageUrl")]
    pub image_url: Option<String>,
    #[serde(rename = "pubDate")]
    pub pub_date: DateTime<Utc>,
    #[serde(rename = "isPublished")]
    pub is_published: bool,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "authorId")]
    pub author_id: i64,
    #[serde(rename = "authorUsername")]
    pub author_username: String,
    #[serde(rename = "categoryId")]
    pub category_id: Option<i64>,
    #[serde(rename = "categoryTitle")]
    pub category_title: Option<String>,
    #[serde(rename = "categorySlug")]
    pub category_slug: Option<String>,
    #[serde(rename = "locationName")]
    pub location_name: Option<String>,
    #[serde(rename = "commentCount")]
    pub comment_count: i64,
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct CommentWithAuthor {
    pub id: i64,
    pub text: String,
    #[serde(rename = "postId")]
    pub post_id: i64,
    #[serde(rename = "authorId")]
    pub author_id: i64,
    #[serde(rename = "authorUsername")]
    pub author_username: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct Comment {
    pub id: i64,
    pub text: String,
    #[serde(rename = "postId")]
    pub post_id: i64,
    #[serde(rename = "authorId")]
    pub author_id: i64,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PostDetail {
    #[serde(flatten)]
    pub post: PostWithMeta,
    pub comments: Vec<CommentWithAuthor>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PostPage {
    pub posts: Vec<PostWithMeta>,
    pub page: i64,
    #[serde(rename = "pageSize")]
    pub page_size: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CategoryPage {
    pub category: Category,
    pub posts: Vec<PostWithMeta>,
    pub page: i64,
    #[serde(rename = "pageSize")]
    pub page_size: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProfilePage {
    pub profile: ProfileDto,
    pub posts: Vec<PostWithMeta>,
    pub page: i64,
    #[serde(rename = "pageSize")]
    pub page_size: i64,
}

fn default_published() -> bool {
    true
}

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostDto {
    #[validate(length(min = 1, max = 256, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Text is required"))]
    pub text: String,
    #[serde(rename = "imageUrl")]
    pub image_url: Option<String>,
    #[serde(rename = "pubDate")]
    pub pub_date: Option<DateTime<Utc>>,
    #[serde(rename = "isPublished", default = "default_published")]
    pub is_published: bool,
    #[serde(rename = "categoryId")]
    pub category_id: Option<i64>,
    #[serde(rename = "locationId")]
    pub location_id: Option<i64>,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct UpdatePostDto {
    #[validate(length(min = 1, max = 256, message = "Title is required"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "Text is required"))]
    pub text: Option<String>,
    #[serde(rename = "imageUrl")]
    pub image_url: Option<String>,
    #[serde(rename = "pubDate")]
    pub pub_date: Option<DateTime<Utc>>,
    #[serde(rename = "isPublished")]
    pub is_published: Option<bool>,
    #[serde(rename = "categoryId")]
    pub category_id: Option<i64>,
    #[serde(rename = "locationId")]
    pub location_id: Option<i64>,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct CreateCommentDto {
    #[validate(length(min = 1, message = "Text is required"))]
    pub text: String,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct UpdateCommentDto {
    #[validate(length(min = 1, message = "Text is required"))]
    pub text: Option<String>,
}
