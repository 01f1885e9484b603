//! Post composition: validation, date stamping, and the write.

use avospace_common::model::{
    Id,
    date::PostDate,
    post::{NewPost, Post},
    user::UserMarker,
};
use avospace_store::store::{PostStore, StoreError};
use thiserror::Error;
use time::Date;
use tracing::debug;

#[derive(Clone, Eq, PartialEq, Debug, Error)]
pub enum ComposeError {
    /// The text was empty or whitespace-only after trimming.
    #[error("A post needs some text")]
    EmptyText,
    #[error("Failed to store the post")]
    Store(#[from] StoreError),
}

pub type Result<T, E = ComposeError> = std::result::Result<T, E>;

/// Validates and stores a new post, returning it as the store now holds it.
/// The text is trimmed, the creation date is stamped from `today`, and likes
/// start at zero.
pub async fn submit_post<P: PostStore>(
    posts: &P,
    author: &Id<UserMarker>,
    text: &str,
    today: Date,
) -> Result<Post> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ComposeError::EmptyText);
    }

    let new_post = NewPost {
        author: author.clone(),
        text: text.to_owned(),
        created_at: PostDate::from_date(today),
        likes: 0,
    };
    let id = posts.insert_post(&new_post).await?;
    debug!(%id, %author, "Stored a new post");
    Ok(new_post.into_post(id))
}
