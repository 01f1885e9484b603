use crate::server::{Result, ServerError, ServerRouter, auth::AuthenticatedUser, json::Json};
use avospace_client::{
    friendship::{FriendshipState, set_friendship},
    graph::SocialGraphReader,
    merge::sort_newest_first,
};
use avospace_common::model::{
    Id,
    kaomoji::{Accessory, Cheek, Kaomoji, LeftEye, LeftSide, Mouth, RightEye, RightSide},
    post::Post,
    user::{BgColor, UserMarker, UserProfile, Username},
};
use avospace_store::{
    auth::MemoryAuthProvider,
    memory::MemoryStore,
    store::{AccountStore, PostStore},
};
use axum::{extract::State, http::StatusCode};
use axum_extra::routing::{RouterExt, TypedPath};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub fn routes() -> ServerRouter {
    ServerRouter::new()
        .typed_post(signup)
        .typed_get(get_user)
        .typed_get(get_user_posts)
        .typed_get(get_user_friends)
        .typed_put(put_profile)
        .typed_put(put_friend)
        .typed_delete(delete_friend)
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/signup", rejection(ServerError))]
struct SignupPath();

#[derive(Serialize)]
struct SignupResponse {
    user: Id<UserMarker>,
    token: String,
    profile: UserProfile,
}

/// Creates an account with the default profile and signs it in, mirroring
/// what the web client writes on registration.
async fn signup(
    SignupPath(): SignupPath,
    State(store): State<Arc<MemoryStore>>,
    State(auth): State<Arc<MemoryAuthProvider>>,
) -> Result<(StatusCode, Json<SignupResponse>)> {
    let (user, token) = auth.register().await;
    let profile = UserProfile::default();
    store.set_profile(&user, &profile).await?;

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            user,
            token,
            profile,
        }),
    ))
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/users/{id}", rejection(ServerError))]
struct GetUserPath {
    id: Id<UserMarker>,
}

async fn get_user(
    GetUserPath { id }: GetUserPath,
    State(store): State<Arc<MemoryStore>>,
) -> Result<Json<UserProfile>> {
    let profile = store
        .fetch_profile(&id)
        .await?
        .ok_or(ServerError::UserByIdNotFound(id))?;

    Ok(Json(profile))
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/users/{id}/posts", rejection(ServerError))]
struct GetUserPostsPath {
    id: Id<UserMarker>,
}

async fn get_user_posts(
    GetUserPostsPath { id }: GetUserPostsPath,
    State(store): State<Arc<MemoryStore>>,
) -> Result<Json<Vec<Post>>> {
    store
        .fetch_profile(&id)
        .await?
        .ok_or_else(|| ServerError::UserByIdNotFound(id.clone()))?;

    let mut posts = store.posts_by_author(&id).await?;
    sort_newest_first(&mut posts);

    Ok(Json(posts))
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/users/{id}/friends", rejection(ServerError))]
struct GetUserFriendsPath {
    id: Id<UserMarker>,
}

#[derive(Serialize)]
struct Friend {
    id: Id<UserMarker>,
    profile: UserProfile,
}

async fn get_user_friends(
    GetUserFriendsPath { id }: GetUserFriendsPath,
    State(store): State<Arc<MemoryStore>>,
) -> Result<Json<Vec<Friend>>> {
    let friends = SocialGraphReader::new(store.as_ref())
        .hydrated_friends(&id)
        .await?
        .into_iter()
        .map(|(id, profile)| Friend { id, profile })
        .collect();

    Ok(Json(friends))
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/profile", rejection(ServerError))]
struct ProfilePath();

/// The editable part of a profile. Parts and username validate during
/// deserialization, so an out-of-set glyph never reaches the store.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProfileUpdate {
    username: Username,
    bg_color: BgColor,
    accessory: Accessory,
    left_side: LeftSide,
    left_cheek: Cheek,
    left_eye: LeftEye,
    mouth: Mouth,
    right_eye: RightEye,
    right_cheek: Cheek,
    right_side: RightSide,
}

async fn put_profile(
    ProfilePath(): ProfilePath,
    State(store): State<Arc<MemoryStore>>,
    user: AuthenticatedUser,
    Json(update): Json<ProfileUpdate>,
) -> Result<Json<UserProfile>> {
    // The friend set is not editable here; carry the stored one over.
    let friends = store
        .fetch_profile(user.user_id())
        .await?
        .map(|profile| profile.friends)
        .unwrap_or_default();

    let profile = UserProfile {
        username: update.username,
        kaomoji: Kaomoji {
            accessory: update.accessory,
            left_side: update.left_side,
            left_cheek: update.left_cheek,
            left_eye: update.left_eye,
            mouth: update.mouth,
            right_eye: update.right_eye,
            right_cheek: update.right_cheek,
            right_side: update.right_side,
        },
        bg_color: update.bg_color,
        friends,
    };
    store.set_profile(user.user_id(), &profile).await?;

    Ok(Json(profile))
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/users/{id}/friend", rejection(ServerError))]
struct FriendPath {
    id: Id<UserMarker>,
}

#[derive(Serialize)]
struct FriendshipResponse {
    friends: bool,
}

async fn put_friend(
    FriendPath { id }: FriendPath,
    State(store): State<Arc<MemoryStore>>,
    user: AuthenticatedUser,
) -> Result<Json<FriendshipResponse>> {
    set_friendship(store.as_ref(), user.user_id(), &id, FriendshipState::Present).await?;

    Ok(Json(FriendshipResponse { friends: true }))
}

async fn delete_friend(
    FriendPath { id }: FriendPath,
    State(store): State<Arc<MemoryStore>>,
    user: AuthenticatedUser,
) -> Result<Json<FriendshipResponse>> {
    set_friendship(store.as_ref(), user.user_id(), &id, FriendshipState::Absent).await?;

    Ok(Json(FriendshipResponse { friends: false }))
}
