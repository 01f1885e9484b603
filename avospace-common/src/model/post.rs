use crate::model::{Id, date::PostDate, user::UserMarker};
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct PostMarker;

/// One user-authored update. Immutable once created; there is no edit or
/// delete path.
#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Serialize, Deserialize)]
pub struct Post {
    pub id: Id<PostMarker>,
    /// Empty for anonymous or legacy records.
    pub author: Id<UserMarker>,
    pub text: String,
    pub created_at: PostDate,
    pub likes: u32,
}

/// A post as handed to the store for insertion; the store assigns the id.
#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Serialize, Deserialize)]
pub struct NewPost {
    pub author: Id<UserMarker>,
    pub text: String,
    pub created_at: PostDate,
    pub likes: u32,
}

impl NewPost {
    #[must_use]
    pub fn into_post(self, id: Id<PostMarker>) -> Post {
        Post {
            id,
            author: self.author,
            text: self.text,
            created_at: self.created_at,
            likes: self.likes,
        }
    }
}
