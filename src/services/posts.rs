use chrono::Utc;

use crate::{
    models::posts::{
        Category, CreateCommentDto, CreatePostDto, PostDetail, PostWithMeta, UpdateCommentDto,
        UpdatePostDto,
    },
    models::users::User,
    repositories::{category_repo::CategoryRepository, posts_repo::PostsRepository, SqliteRepo},
    Error, Result,
};

use super::ensure_author;

#[derive(Clone)]
pub struct PostsService {
    repo: SqliteRepo,
}

impl PostsService {
    pub fn new(repo: SqliteRepo) -> Self {
        Self { repo }
    }

    /// Index listing: publicly visible posts, most recent first. The "now"
    /// cutoff is taken per request, never cached.
    pub async fn index(&self, limit: i64, offset: i64) -> Result<Vec<PostWithMeta>> {
        self.repo.visible_posts(Utc::now(), limit, offset).await
    }

    /// Category listing. An unknown or unpublished category is a 404 even
    /// when it still holds published posts.
    pub async fn category_posts(
        &self,
        slug: &str,
        limit: i64,
        offset: i64,
    ) -> Result<(Category, Vec<PostWithMeta>)> {
        let category = self
            .repo
            .published_category_by_slug(slug)
            .await?
            .ok_or(Error::NotFound)?;
        let posts = self
            .repo
            .visible_posts_in_category(category.id, Utc::now(), limit, offset)
            .await?;
        Ok((category, posts))
    }

    /// Profile listing: every post by the user, drafts and future posts
    /// included, annotated and ordered like the index.
    pub async fn author_posts(
        &self,
        author_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<PostWithMeta>> {
        self.repo.posts_by_author(author_id, limit, offset).await
    }

    /// Dual-mode detail read. The author sees their own post whatever its
    /// publish state; everyone else goes through the visibility filter and
    /// gets a 404 when the post is not publicly visible.
    pub async fn detail(&self, post_id: i64, viewer: Option<i64>) -> Result<PostDetail> {
        let post = self.repo.post_by_id(post_id).await?.ok_or(Error::NotFound)?;

        let post = if viewer == Some(post.author_id) {
            post
        } else {
            self.repo
                .visible_post_by_id(post_id, Utc::now())
                .await?
                .ok_or(Error::NotFound)?
        };

        let comments = self.repo.comments_for_post(post_id).await?;

        Ok(PostDetail { post, comments })
    }

    /// The author is stamped server-side; nothing in the request body can
    /// set it.
    pub async fn create(&self, author: &User, post: CreatePostDto) -> Result<PostWithMeta> {
        self.repo.create_post(author.id, &post).await
    }

    pub async fn update(&self, actor: &User, post_id: i64, update: UpdatePostDto) -> Result<()> {
        let post = self.repo.post_by_id(post_id).await?.ok_or(Error::NotFound)?;
        ensure_author(actor.id, post.author_id, post_id)?;
        self.repo.update_post(post_id, &update).await
    }

    pub async fn delete(&self, actor: &User, post_id: i64) -> Result<()> {
        let post = self.repo.post_by_id(post_id).await?.ok_or(Error::NotFound)?;
        ensure_author(actor.id, post.author_id, post_id)?;
        self.repo.delete_post(post_id).await
    }

    pub async fn add_comment(
        &self,
        actor: &User,
        post_id: i64,
        comment: CreateCommentDto,
    ) -> Result<()> {
        // The owning post must exist before a comment can attach to it.
        self.repo.post_by_id(post_id).await?.ok_or(Error::NotFound)?;
        self.repo
            .create_comment(post_id, actor.id, &comment.text)
            .await?;
        Ok(())
    }

    /// The post id comes from the URL and is only used for the deny
    /// redirect; the comment itself is resolved by its own id.
    pub async fn update_comment(
        &self,
        actor: &User,
        post_id: i64,
        comment_id: i64,
        update: UpdateCommentDto,
    ) -> Result<()> {
        let comment = self
            .repo
            .comment_by_id(comment_id)
            .await?
            .ok_or(Error::NotFound)?;
        ensure_author(actor.id, comment.author_id, post_id)?;
        self.repo
            .update_comment(comment_id, update.text.as_deref())
            .await
    }

    pub async fn delete_comment(&self, actor: &User, post_id: i64, comment_id: i64) -> Result<()> {
        let comment = self
            .repo
            .comment_by_id(comment_id)
            .await?
            .ok_or(Error::NotFound)?;
        ensure_author(actor.id, comment.author_id, post_id)?;
        self.repo.delete_comment(comment_id).await
    }
}
