//! The identity provider boundary. The provider owns credentials and the
//! signed-in state; the application only ever sees an opaque user id.

use avospace_common::model::{Id, user::UserMarker};
use rand::distr::{Alphanumeric, SampleString};
use std::collections::HashMap;
use tokio::sync::{RwLock, watch};

const TOKEN_LEN: usize = 32;

/// Sessions and bearer tokens. Sign-in and sign-out happen out of band
/// (the provider's own UI flow); the application observes the result.
pub trait AuthProvider {
    /// The currently signed-in user, if any.
    fn current_identity(&self) -> Option<Id<UserMarker>>;

    /// A receiver that yields the identity after every sign-in and sign-out.
    fn subscribe(&self) -> watch::Receiver<Option<Id<UserMarker>>>;

    /// Resolves a bearer token to the user it was issued for.
    async fn resolve_token(&self, token: &str) -> Option<Id<UserMarker>>;
}

/// In-memory provider for tests and the dev server. Registration assigns a
/// random user id and immediately signs the new user in, like the hosted
/// provider does.
#[derive(Debug)]
pub struct MemoryAuthProvider {
    identity: watch::Sender<Option<Id<UserMarker>>>,
    tokens: RwLock<HashMap<String, Id<UserMarker>>>,
}

impl MemoryAuthProvider {
    #[must_use]
    pub fn new() -> Self {
        Self {
            identity: watch::Sender::new(None),
            tokens: RwLock::new(HashMap::new()),
        }
    }

    /// Registers a new user and signs them in. Returns the assigned id and
    /// a bearer token for it.
    pub async fn register(&self) -> (Id<UserMarker>, String) {
        let user = Id::new(Alphanumeric.sample_string(&mut rand::rng(), 28));
        let token = self.issue_token(&user).await;
        self.sign_in(user.clone());
        (user, token)
    }

    /// Issues a fresh bearer token for an existing user.
    pub async fn issue_token(&self, user: &Id<UserMarker>) -> String {
        let token = Alphanumeric.sample_string(&mut rand::rng(), TOKEN_LEN);
        let mut tokens = self.tokens.write().await;
        tokens.insert(token.clone(), user.clone());
        token
    }

    pub fn sign_in(&self, user: Id<UserMarker>) {
        self.identity.send_replace(Some(user));
    }

    pub fn sign_out(&self) {
        self.identity.send_replace(None);
    }
}

impl Default for MemoryAuthProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthProvider for MemoryAuthProvider {
    fn current_identity(&self) -> Option<Id<UserMarker>> {
        self.identity.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<Option<Id<UserMarker>>> {
        self.identity.subscribe()
    }

    async fn resolve_token(&self, token: &str) -> Option<Id<UserMarker>> {
        let tokens = self.tokens.read().await;
        tokens.get(token).cloned()
    }
}
