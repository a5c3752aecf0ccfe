use crate::{Error, Result};

pub mod auth;
pub mod posts;
pub mod user;

/// The one authorization rule of the whole application: only the author of a
/// post or comment may mutate it. A failed check does not error; it becomes
/// a redirect to the owning post's detail page.
pub fn ensure_author(actor_id: i64, author_id: i64, post_id: i64) -> Result<()> {
    if actor_id == author_id {
        Ok(())
    } else {
        Err(Error::NotAuthor { post_id })
    }
}
