use crate::server::{Result, ServerError, ServerRouter, auth::AuthenticatedUser, json::Json};
use avospace_client::compose::submit_post;
use avospace_common::model::{
    Id,
    post::{Post, PostMarker},
};
use avospace_store::{memory::MemoryStore, store::PostStore};
use axum::{extract::State, http::StatusCode};
use axum_extra::routing::{RouterExt, TypedPath};
use serde::Deserialize;
use std::sync::Arc;
use time::UtcDateTime;

pub fn routes() -> ServerRouter {
    ServerRouter::new()
        .typed_get(get_post)
        .typed_post(create_post)
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/posts/{id}", rejection(ServerError))]
struct GetPostPath {
    id: Id<PostMarker>,
}

async fn get_post(
    GetPostPath { id }: GetPostPath,
    State(store): State<Arc<MemoryStore>>,
) -> Result<Json<Post>> {
    let post = store
        .fetch_post(&id)
        .await?
        .ok_or(ServerError::PostByIdNotFound(id))?;

    Ok(Json(post))
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/posts", rejection(ServerError))]
struct CreatePostPath();

#[derive(Deserialize)]
struct CreatePost {
    text: String,
}

async fn create_post(
    CreatePostPath(): CreatePostPath,
    State(store): State<Arc<MemoryStore>>,
    user: AuthenticatedUser,
    Json(body): Json<CreatePost>,
) -> Result<(StatusCode, Json<Post>)> {
    let post = submit_post(
        store.as_ref(),
        user.user_id(),
        &body.text,
        UtcDateTime::now().date(),
    )
    .await?;

    Ok((StatusCode::CREATED, Json(post)))
}
