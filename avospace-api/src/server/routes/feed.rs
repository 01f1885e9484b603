use crate::server::{Result, ServerError, ServerRouter, auth::AuthenticatedUser, json::Json};
use avospace_client::feed::{PAGE_SIZE, friend_circle_posts, page_after};
use avospace_common::model::{Id, post::{Post, PostMarker}};
use avospace_store::{memory::MemoryStore, store::PageMarker};
use axum::extract::{Query, State};
use axum_extra::routing::{RouterExt, TypedPath};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub fn routes() -> ServerRouter {
    ServerRouter::new()
        .typed_get(get_feed)
        .typed_get(get_friend_feed)
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/feed", rejection(ServerError))]
struct FeedPath();

#[derive(Deserialize)]
struct FeedQuery {
    after: Option<Id<PostMarker>>,
}

#[derive(Serialize)]
struct FeedResponse {
    posts: Vec<Post>,
    has_next: bool,
    /// Boundary cursors of this page; `last` is what the caller hands back
    /// as `after` for the next page. Absent for an empty page.
    first: Option<PageMarker>,
    last: Option<PageMarker>,
}

async fn get_feed(
    FeedPath(): FeedPath,
    State(store): State<Arc<MemoryStore>>,
    Query(query): Query<FeedQuery>,
) -> Result<Json<FeedResponse>> {
    let page = page_after(
        store.as_ref(),
        PAGE_SIZE,
        query.after.map(PageMarker::from),
    )
    .await?;

    let bounds = page.bounds();
    Ok(Json(FeedResponse {
        first: bounds.as_ref().map(|bounds| bounds.first.clone()),
        last: bounds.map(|bounds| bounds.last),
        posts: page.posts,
        has_next: page.has_next,
    }))
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/feed/friends", rejection(ServerError))]
struct FriendFeedPath();

async fn get_friend_feed(
    FriendFeedPath(): FriendFeedPath,
    State(store): State<Arc<MemoryStore>>,
    user: AuthenticatedUser,
) -> Result<Json<Vec<Post>>> {
    let posts = friend_circle_posts(store.as_ref(), store.as_ref(), user.user_id()).await?;

    Ok(Json(posts))
}
