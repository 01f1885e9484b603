use crate::server::ServerError;
use avospace_common::model::{Id, user::UserMarker};
use avospace_store::auth::{AuthProvider, MemoryAuthProvider};
use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::TypedHeader;
use headers::{Authorization, authorization::Bearer};
use std::sync::Arc;

type AuthorizationHeader = TypedHeader<Authorization<Bearer>>;

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash)]
pub struct AuthenticatedUser {
    id: Id<UserMarker>,
}

impl AuthenticatedUser {
    #[must_use]
    pub fn user_id(&self) -> &Id<UserMarker> {
        &self.id
    }
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    Arc<MemoryAuthProvider>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let header = AuthorizationHeader::from_request_parts(parts, state)
            .await
            .map_err(ServerError::InvalidAuthorizationHeader)?;

        let id = Arc::<MemoryAuthProvider>::from_ref(state)
            .resolve_token(header.token())
            .await
            .ok_or(ServerError::InvalidToken)?;

        Ok(Self { id })
    }
}
