//! Read access to the social graph: who a user's friends are, and their
//! profiles for display.

use avospace_common::model::{
    Id,
    user::{UserMarker, UserProfile},
};
use avospace_store::store::{AccountStore, Result, StoreError};
use futures::future::join_all;
use tracing::warn;

/// Reads friend lists and hydrates them into profiles. Borrowing the store
/// keeps the reader free to construct per call site.
#[derive(Copy, Clone, Debug)]
pub struct SocialGraphReader<'a, A> {
    accounts: &'a A,
}

impl<'a, A: AccountStore> SocialGraphReader<'a, A> {
    pub fn new(accounts: &'a A) -> Self {
        Self { accounts }
    }

    /// The user's friend ids. A missing profile is `NotFound` here; callers
    /// that want to treat an absent user as friendless map it themselves.
    pub async fn friends_of(&self, user: &Id<UserMarker>) -> Result<Vec<Id<UserMarker>>> {
        let profile = self
            .accounts
            .fetch_profile(user)
            .await?
            .ok_or(StoreError::NotFound)?;
        Ok(profile.friends)
    }

    /// The user's friends with their profiles, fetched concurrently.
    /// Friends whose profile is missing or fails to load are skipped so one
    /// broken entry never empties the list.
    pub async fn hydrated_friends(
        &self,
        user: &Id<UserMarker>,
    ) -> Result<Vec<(Id<UserMarker>, UserProfile)>> {
        let friends = self.friends_of(user).await?;
        let fetches = friends
            .iter()
            .map(|friend| self.accounts.fetch_profile(friend));

        let mut hydrated = Vec::with_capacity(friends.len());
        for (friend, fetched) in friends.iter().zip(join_all(fetches).await) {
            match fetched {
                Ok(Some(profile)) => hydrated.push((friend.clone(), profile)),
                Ok(None) => warn!(%friend, "Friend list references a missing profile"),
                Err(err) => warn!(%friend, %err, "Failed to load a friend's profile"),
            }
        }
        Ok(hydrated)
    }
}

#[cfg(test)]
mod tests {
    use super::SocialGraphReader;
    use avospace_common::model::{Id, user::UserProfile};
    use avospace_store::{
        memory::MemoryStore,
        store::{AccountStore, StoreError},
    };

    #[tokio::test]
    async fn friends_of_an_unknown_user_is_not_found() {
        let store = MemoryStore::new();
        let reader = SocialGraphReader::new(&store);
        assert_eq!(
            reader.friends_of(&Id::new("ghost")).await,
            Err(StoreError::NotFound)
        );
    }

    #[tokio::test]
    async fn hydration_skips_dangling_friend_entries() {
        let store = MemoryStore::new();
        store
            .set_profile(&Id::new("a"), &UserProfile::default())
            .await
            .unwrap();
        store
            .set_profile(&Id::new("b"), &UserProfile::default())
            .await
            .unwrap();
        store.add_friend(&Id::new("a"), &Id::new("b")).await.unwrap();
        store
            .add_friend(&Id::new("a"), &Id::new("deleted"))
            .await
            .unwrap();

        let reader = SocialGraphReader::new(&store);
        let hydrated = reader.hydrated_friends(&Id::new("a")).await.unwrap();
        assert_eq!(hydrated.len(), 1);
        assert_eq!(hydrated[0].0, Id::new("b"));
    }
}
