mod common;

use anyhow::Result;
use backend_blogicum::repositories::{posts_repo::PostsRepository, SqliteRepo};
use chrono::{Duration, Utc};
use common::{seed_category, seed_comment, seed_post, seed_user, test_pool};

#[tokio::test]
async fn only_published_past_posts_in_published_categories_are_visible() -> Result<()> {
    let pool = test_pool().await;
    let repo = SqliteRepo::new(pool.clone());

    let author = seed_user(&pool, "author").await;
    let published_cat = seed_category(&pool, "tech", true).await;
    let hidden_cat = seed_category(&pool, "hidden", false).await;

    let now = Utc::now();
    let visible = seed_post(&pool, author, Some(published_cat), true, now - Duration::hours(1)).await;
    let draft = seed_post(&pool, author, Some(published_cat), false, now - Duration::hours(1)).await;
    let future = seed_post(&pool, author, Some(published_cat), true, now + Duration::hours(1)).await;
    let in_hidden = seed_post(&pool, author, Some(hidden_cat), true, now - Duration::hours(1)).await;
    let no_category = seed_post(&pool, author, None, true, now - Duration::hours(1)).await;

    let posts = repo.visible_posts(now, 50, 0).await?;
    let ids: Vec<i64> = posts.iter().map(|p| p.id).collect();

    assert_eq!(ids, vec![visible]);
    for excluded in [draft, future, in_hidden, no_category] {
        assert!(!ids.contains(&excluded));
    }

    Ok(())
}

#[tokio::test]
async fn pub_date_equal_to_now_is_included() -> Result<()> {
    let pool = test_pool().await;
    let repo = SqliteRepo::new(pool.clone());

    let author = seed_user(&pool, "author").await;
    let category = seed_category(&pool, "tech", true).await;

    let now = Utc::now();
    let post = seed_post(&pool, author, Some(category), true, now).await;

    let posts = repo.visible_posts(now, 50, 0).await?;
    assert!(posts.iter().any(|p| p.id == post));

    Ok(())
}

#[tokio::test]
async fn posts_are_ordered_most_recent_first_with_comment_counts() -> Result<()> {
    let pool = test_pool().await;
    let repo = SqliteRepo::new(pool.clone());

    let author = seed_user(&pool, "author").await;
    let commenter = seed_user(&pool, "commenter").await;
    let category = seed_category(&pool, "tech", true).await;

    let now = Utc::now();
    let older = seed_post(&pool, author, Some(category), true, now - Duration::days(2)).await;
    let newer = seed_post(&pool, author, Some(category), true, now - Duration::days(1)).await;

    seed_comment(&pool, older, commenter).await;
    seed_comment(&pool, older, author).await;

    let posts = repo.visible_posts(now, 50, 0).await?;
    let ids: Vec<i64> = posts.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![newer, older]);

    let older_post = posts.iter().find(|p| p.id == older).unwrap();
    assert_eq!(older_post.comment_count, 2);
    let newer_post = posts.iter().find(|p| p.id == newer).unwrap();
    assert_eq!(newer_post.comment_count, 0);

    Ok(())
}

#[tokio::test]
async fn visibility_is_reevaluated_when_a_category_is_unpublished() -> Result<()> {
    let pool = test_pool().await;
    let repo = SqliteRepo::new(pool.clone());

    let author = seed_user(&pool, "author").await;
    let category = seed_category(&pool, "tech", true).await;
    let now = Utc::now();
    let post = seed_post(&pool, author, Some(category), true, now - Duration::hours(1)).await;

    assert!(repo.visible_post_by_id(post, now).await?.is_some());

    sqlx::query("UPDATE categories SET is_published = 0 WHERE id = $1")
        .bind(category)
        .execute(&pool)
        .await?;

    assert!(repo.visible_post_by_id(post, Utc::now()).await?.is_none());

    Ok(())
}

#[tokio::test]
async fn author_listing_includes_drafts_and_future_posts() -> Result<()> {
    let pool = test_pool().await;
    let repo = SqliteRepo::new(pool.clone());

    let author = seed_user(&pool, "author").await;
    let other = seed_user(&pool, "other").await;
    let category = seed_category(&pool, "tech", true).await;

    let now = Utc::now();
    let draft = seed_post(&pool, author, Some(category), false, now - Duration::hours(1)).await;
    let future = seed_post(&pool, author, Some(category), true, now + Duration::days(1)).await;
    seed_post(&pool, other, Some(category), true, now - Duration::hours(1)).await;

    let posts = repo.posts_by_author(author, 50, 0).await?;
    let ids: Vec<i64> = posts.iter().map(|p| p.id).collect();

    assert_eq!(ids, vec![future, draft]);

    Ok(())
}

#[tokio::test]
async fn pagination_limits_and_offsets_the_listing() -> Result<()> {
    let pool = test_pool().await;
    let repo = SqliteRepo::new(pool.clone());

    let author = seed_user(&pool, "author").await;
    let category = seed_category(&pool, "tech", true).await;

    let now = Utc::now();
    let mut expected = Vec::new();
    for i in 0..5 {
        let id = seed_post(
            &pool,
            author,
            Some(category),
            true,
            now - Duration::hours(i + 1),
        )
        .await;
        expected.push(id);
    }

    let first_page = repo.visible_posts(now, 2, 0).await?;
    let second_page = repo.visible_posts(now, 2, 2).await?;

    assert_eq!(
        first_page.iter().map(|p| p.id).collect::<Vec<_>>(),
        &expected[0..2]
    );
    assert_eq!(
        second_page.iter().map(|p| p.id).collect::<Vec<_>>(),
        &expected[2..4]
    );

    Ok(())
}
