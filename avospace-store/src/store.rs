use avospace_common::model::{
    Id,
    post::{NewPost, Post, PostMarker},
    user::{UserMarker, UserProfile},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type Result<T, E = StoreError> = std::result::Result<T, E>;

#[derive(Clone, Eq, PartialEq, Debug, Error)]
pub enum StoreError {
    /// The referenced document does not exist. Callers usually map this to
    /// an empty or default value rather than failing.
    #[error("Referenced document was not found")]
    NotFound,
    /// Transport or backend failure. Terminal for this attempt; nothing
    /// retries.
    #[error("The backing store is unavailable: {0}")]
    Unavailable(String),
}

/// An opaque position in the store's native newest-first post ordering.
/// Callers only ever obtain one from a fetched post and hand it back
/// unchanged.
#[derive(Clone, Eq, PartialEq, Debug, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageMarker(Id<PostMarker>);

impl PageMarker {
    #[must_use]
    pub fn of(post: &Post) -> Self {
        Self(post.id.clone())
    }

    #[must_use]
    pub fn get(&self) -> &Id<PostMarker> {
        &self.0
    }
}

impl From<Id<PostMarker>> for PageMarker {
    fn from(value: Id<PostMarker>) -> Self {
        Self(value)
    }
}

/// A window into the store's native newest-first ordering. At most one of
/// `start_after` and `end_before` is set; `end_before` takes the `limit`
/// posts immediately preceding the marker.
#[derive(Clone, Debug, Default)]
pub struct PageRequest {
    pub limit: usize,
    pub start_after: Option<PageMarker>,
    pub end_before: Option<PageMarker>,
}

/// User profile documents. Set mutations are atomic per document only; there
/// is no cross-document atomicity.
pub trait AccountStore {
    async fn fetch_profile(&self, user: &Id<UserMarker>) -> Result<Option<UserProfile>>;

    /// Full replace; also creates the document.
    async fn set_profile(&self, user: &Id<UserMarker>, profile: &UserProfile) -> Result<()>;

    /// Adds `friend` to the user's friend set. Adding a present member is a
    /// no-op; mutating an absent document is `NotFound`.
    async fn add_friend(&self, user: &Id<UserMarker>, friend: &Id<UserMarker>) -> Result<()>;

    /// Removes `friend` from the user's friend set. Removing an absent
    /// member is a no-op; mutating an absent document is `NotFound`.
    async fn remove_friend(&self, user: &Id<UserMarker>, friend: &Id<UserMarker>) -> Result<()>;
}

/// Flat post records. The store assigns ids and answers equality and range
/// queries; it never mutates a post.
pub trait PostStore {
    async fn insert_post(&self, post: &NewPost) -> Result<Id<PostMarker>>;

    async fn fetch_post(&self, post: &Id<PostMarker>) -> Result<Option<Post>>;

    /// Equality query on the author; no ordering guarantee.
    async fn posts_by_author(&self, author: &Id<UserMarker>) -> Result<Vec<Post>>;

    /// One window of the store's native newest-first ordering.
    async fn post_page(&self, request: &PageRequest) -> Result<Vec<Post>>;
}
