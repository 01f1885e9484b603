use crate::server::ServerRouter;
use axum::Router;

mod feed;
mod posts;
mod users;

pub fn routes() -> ServerRouter {
    Router::new()
        .merge(feed::routes())
        .merge(posts::routes())
        .merge(users::routes())
}
