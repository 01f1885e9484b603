//! Symmetric friendships. A friendship is stored as two entries, one in each
//! user's friend set, written one after the other. There is no cross-document
//! transaction, so a failure between the writes leaves the two sets
//! disagreeing until the next successful toggle repairs them.

use avospace_common::model::{Id, user::UserMarker};
use avospace_store::store::{AccountStore, StoreError};
use thiserror::Error;
use tracing::debug;

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum FriendshipState {
    Present,
    Absent,
}

impl FriendshipState {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Present => Self::Absent,
            Self::Absent => Self::Present,
        }
    }
}

#[derive(Clone, Eq, PartialEq, Debug, Error)]
pub enum FriendshipError {
    #[error("A user cannot friend themselves")]
    SelfFriendship,
    /// One of the two writes failed. The UI should show `rollback_to`; the
    /// stores may still disagree if the first write went through.
    #[error("Failed to update the friendship")]
    Mutation {
        rollback_to: FriendshipState,
        source: StoreError,
    },
}

pub type Result<T, E = FriendshipError> = std::result::Result<T, E>;

/// Whether `other` is in `viewer`'s friend set. A missing viewer profile
/// reads as no friendship.
pub async fn is_friend<A: AccountStore>(
    accounts: &A,
    viewer: &Id<UserMarker>,
    other: &Id<UserMarker>,
) -> std::result::Result<bool, StoreError> {
    Ok(accounts
        .fetch_profile(viewer)
        .await?
        .is_some_and(|profile| profile.is_friend(other)))
}

/// Drives the friendship between `viewer` and `other` to `desired`, updating
/// the viewer's set first and then the other user's. Both writes are
/// idempotent, so re-running after a partial failure converges.
pub async fn set_friendship<A: AccountStore>(
    accounts: &A,
    viewer: &Id<UserMarker>,
    other: &Id<UserMarker>,
    desired: FriendshipState,
) -> Result<()> {
    if viewer == other {
        return Err(FriendshipError::SelfFriendship);
    }

    let mutation_failed = |source: StoreError| FriendshipError::Mutation {
        rollback_to: desired.toggled(),
        source,
    };

    for (user, friend) in [(viewer, other), (other, viewer)] {
        match desired {
            FriendshipState::Present => accounts.add_friend(user, friend).await,
            FriendshipState::Absent => accounts.remove_friend(user, friend).await,
        }
        .map_err(mutation_failed)?;
    }

    debug!(%viewer, %other, ?desired, "Updated friendship");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{FriendshipError, FriendshipState, is_friend, set_friendship};
    use avospace_common::model::{
        Id,
        user::{UserMarker, UserProfile},
    };
    use avospace_store::{
        memory::MemoryStore,
        store::{AccountStore, Result as StoreResult, StoreError},
    };

    async fn seed(store: &MemoryStore, users: &[&str]) {
        for user in users {
            store
                .set_profile(&Id::new(*user), &UserProfile::default())
                .await
                .unwrap();
        }
    }

    #[tokio::test]
    async fn friendships_are_written_to_both_sides() {
        let store = MemoryStore::new();
        seed(&store, &["a", "b"]).await;

        set_friendship(&store, &Id::new("a"), &Id::new("b"), FriendshipState::Present)
            .await
            .unwrap();
        assert!(is_friend(&store, &Id::new("a"), &Id::new("b")).await.unwrap());
        assert!(is_friend(&store, &Id::new("b"), &Id::new("a")).await.unwrap());

        set_friendship(&store, &Id::new("a"), &Id::new("b"), FriendshipState::Absent)
            .await
            .unwrap();
        assert!(!is_friend(&store, &Id::new("a"), &Id::new("b")).await.unwrap());
        assert!(!is_friend(&store, &Id::new("b"), &Id::new("a")).await.unwrap());
    }

    #[tokio::test]
    async fn repeating_a_toggle_converges() {
        let store = MemoryStore::new();
        seed(&store, &["a", "b"]).await;

        for _ in 0..2 {
            set_friendship(&store, &Id::new("a"), &Id::new("b"), FriendshipState::Present)
                .await
                .unwrap();
        }
        let profile = store.fetch_profile(&Id::new("a")).await.unwrap().unwrap();
        assert_eq!(profile.friends, vec![Id::new("b")]);
    }

    #[tokio::test]
    async fn self_friendship_is_rejected() {
        let store = MemoryStore::new();
        seed(&store, &["a"]).await;

        let result =
            set_friendship(&store, &Id::new("a"), &Id::new("a"), FriendshipState::Present).await;
        assert_eq!(result, Err(FriendshipError::SelfFriendship));
    }

    /// Account store whose friend mutations fail for one user's document.
    struct FailingDocument<'a> {
        inner: &'a MemoryStore,
        fail_for: Id<UserMarker>,
    }

    impl FailingDocument<'_> {
        fn check(&self, user: &Id<UserMarker>) -> StoreResult<()> {
            if *user == self.fail_for {
                return Err(StoreError::Unavailable("simulated outage".to_owned()));
            }
            Ok(())
        }
    }

    impl AccountStore for FailingDocument<'_> {
        async fn fetch_profile(&self, user: &Id<UserMarker>) -> StoreResult<Option<UserProfile>> {
            self.inner.fetch_profile(user).await
        }

        async fn set_profile(
            &self,
            user: &Id<UserMarker>,
            profile: &UserProfile,
        ) -> StoreResult<()> {
            self.inner.set_profile(user, profile).await
        }

        async fn add_friend(
            &self,
            user: &Id<UserMarker>,
            friend: &Id<UserMarker>,
        ) -> StoreResult<()> {
            self.check(user)?;
            self.inner.add_friend(user, friend).await
        }

        async fn remove_friend(
            &self,
            user: &Id<UserMarker>,
            friend: &Id<UserMarker>,
        ) -> StoreResult<()> {
            self.check(user)?;
            self.inner.remove_friend(user, friend).await
        }
    }

    #[tokio::test]
    async fn a_failed_second_write_reports_the_rollback_state() {
        let store = MemoryStore::new();
        seed(&store, &["a", "b"]).await;
        let failing = FailingDocument {
            inner: &store,
            fail_for: Id::new("b"),
        };

        let result =
            set_friendship(&failing, &Id::new("a"), &Id::new("b"), FriendshipState::Present).await;
        match result {
            Err(FriendshipError::Mutation { rollback_to, .. }) => {
                assert_eq!(rollback_to, FriendshipState::Absent);
            }
            other => panic!("expected a mutation error, got {other:?}"),
        }

        // The first write went through; the sets now disagree until the next
        // successful toggle.
        assert!(is_friend(&store, &Id::new("a"), &Id::new("b")).await.unwrap());
        assert!(!is_friend(&store, &Id::new("b"), &Id::new("a")).await.unwrap());

        set_friendship(&store, &Id::new("a"), &Id::new("b"), FriendshipState::Present)
            .await
            .unwrap();
        assert!(is_friend(&store, &Id::new("b"), &Id::new("a")).await.unwrap());
    }
}
