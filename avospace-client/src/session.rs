//! Observes the identity provider. The session never resolves credentials
//! itself; it mirrors whatever the provider currently reports.

use avospace_common::model::{Id, user::UserMarker};
use avospace_store::auth::AuthProvider;
use thiserror::Error;
use tokio::sync::watch;

#[derive(Clone, Eq, PartialEq, Debug, Default, Error)]
#[error("The identity provider has shut down")]
pub struct SessionClosedError;

/// The signed-in state as the UI sees it. Cloning is cheap; every clone
/// observes the same provider.
#[derive(Clone, Debug)]
pub struct Session {
    identity: watch::Receiver<Option<Id<UserMarker>>>,
}

impl Session {
    pub fn subscribe(provider: &impl AuthProvider) -> Self {
        Self {
            identity: provider.subscribe(),
        }
    }

    /// The currently signed-in user, if any.
    #[must_use]
    pub fn current(&self) -> Option<Id<UserMarker>> {
        self.identity.borrow().clone()
    }

    /// Waits for the next sign-in or sign-out and returns the new identity.
    pub async fn changed(&mut self) -> Result<Option<Id<UserMarker>>, SessionClosedError> {
        self.identity
            .changed()
            .await
            .map_err(|_| SessionClosedError)?;
        Ok(self.identity.borrow_and_update().clone())
    }
}
