//! In-memory double for the hosted backend, used by tests and the dev
//! server. Its native post ordering is newest-first by parsed date, with
//! insertion order preserved on ties and unparseable dates last; its page
//! cursors are the stable post ids.

use crate::{
    document::{PostDocument, UserDocument},
    store::{AccountStore, PageRequest, PostStore, Result, StoreError},
};
use avospace_common::model::{
    Id,
    post::{NewPost, Post, PostMarker},
    user::{UserMarker, UserProfile},
};
use rand::distr::{Alphanumeric, SampleString};
use std::collections::HashMap;
use tokio::sync::RwLock;

const ASSIGNED_ID_LEN: usize = 20;

fn assign_id() -> String {
    Alphanumeric.sample_string(&mut rand::rng(), ASSIGNED_ID_LEN)
}

#[derive(Debug, Default)]
struct Collections {
    users: HashMap<String, UserDocument>,
    /// Insertion order preserved; it is the tiebreaker of the native order.
    posts: Vec<(Id<PostMarker>, PostDocument)>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<Collections>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All posts in the store's native newest-first ordering.
    async fn ordered_posts(&self) -> Vec<Post> {
        let collections = self.collections.read().await;
        let mut posts: Vec<Post> = collections
            .posts
            .iter()
            .map(|(id, document)| document.clone().into_post(id.clone()))
            .collect();
        posts.sort_by(|a, b| a.created_at.cmp_newest_first(&b.created_at));
        posts
    }
}

impl AccountStore for MemoryStore {
    async fn fetch_profile(&self, user: &Id<UserMarker>) -> Result<Option<UserProfile>> {
        let collections = self.collections.read().await;
        Ok(collections
            .users
            .get(user.get())
            .cloned()
            .map(UserProfile::from))
    }

    async fn set_profile(&self, user: &Id<UserMarker>, profile: &UserProfile) -> Result<()> {
        let mut collections = self.collections.write().await;
        collections
            .users
            .insert(user.get().to_owned(), UserDocument::from(profile));
        Ok(())
    }

    async fn add_friend(&self, user: &Id<UserMarker>, friend: &Id<UserMarker>) -> Result<()> {
        let mut collections = self.collections.write().await;
        let document = collections
            .users
            .get_mut(user.get())
            .ok_or(StoreError::NotFound)?;

        let friends = document.friends.get_or_insert_default();
        if !friends.iter().any(|member| member == friend.get()) {
            friends.push(friend.get().to_owned());
        }
        Ok(())
    }

    async fn remove_friend(&self, user: &Id<UserMarker>, friend: &Id<UserMarker>) -> Result<()> {
        let mut collections = self.collections.write().await;
        let document = collections
            .users
            .get_mut(user.get())
            .ok_or(StoreError::NotFound)?;

        if let Some(friends) = document.friends.as_mut() {
            friends.retain(|member| member != friend.get());
        }
        Ok(())
    }
}

impl PostStore for MemoryStore {
    async fn insert_post(&self, post: &NewPost) -> Result<Id<PostMarker>> {
        let id = Id::new(assign_id());
        let mut collections = self.collections.write().await;
        collections.posts.push((id.clone(), PostDocument::from(post)));
        Ok(id)
    }

    async fn fetch_post(&self, post: &Id<PostMarker>) -> Result<Option<Post>> {
        let collections = self.collections.read().await;
        Ok(collections
            .posts
            .iter()
            .find(|(id, _)| id == post)
            .map(|(id, document)| document.clone().into_post(id.clone())))
    }

    async fn posts_by_author(&self, author: &Id<UserMarker>) -> Result<Vec<Post>> {
        let collections = self.collections.read().await;
        Ok(collections
            .posts
            .iter()
            .filter(|(_, document)| document.uid.as_deref() == Some(author.get()))
            .map(|(id, document)| document.clone().into_post(id.clone()))
            .collect())
    }

    async fn post_page(&self, request: &PageRequest) -> Result<Vec<Post>> {
        let ordered = self.ordered_posts().await;

        if let Some(end_before) = &request.end_before {
            let index = ordered
                .iter()
                .position(|post| &post.id == end_before.get())
                .ok_or(StoreError::NotFound)?;
            let start = index.saturating_sub(request.limit);
            return Ok(ordered[start..index].to_vec());
        }

        let skip = match &request.start_after {
            Some(start_after) => {
                ordered
                    .iter()
                    .position(|post| &post.id == start_after.get())
                    .ok_or(StoreError::NotFound)?
                    + 1
            }
            None => 0,
        };

        Ok(ordered
            .into_iter()
            .skip(skip)
            .take(request.limit)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryStore;
    use crate::store::{AccountStore, PageMarker, PageRequest, PostStore, StoreError};
    use avospace_common::model::{
        Id,
        date::PostDate,
        post::NewPost,
        user::{UserMarker, UserProfile},
    };

    fn user(id: &str) -> Id<UserMarker> {
        Id::new(id)
    }

    async fn seed_post(store: &MemoryStore, author: &str, date: &str) {
        store
            .insert_post(&NewPost {
                author: Id::new(author),
                text: format!("post from {date}"),
                created_at: PostDate::new(date),
                likes: 0,
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn profiles_round_trip() {
        let store = MemoryStore::new();
        assert_eq!(store.fetch_profile(&user("u1")).await.unwrap(), None);

        store
            .set_profile(&user("u1"), &UserProfile::default())
            .await
            .unwrap();
        assert_eq!(
            store.fetch_profile(&user("u1")).await.unwrap(),
            Some(UserProfile::default())
        );
    }

    #[tokio::test]
    async fn friend_set_mutations_are_idempotent() {
        let store = MemoryStore::new();
        store
            .set_profile(&user("a"), &UserProfile::default())
            .await
            .unwrap();

        store.add_friend(&user("a"), &user("b")).await.unwrap();
        store.add_friend(&user("a"), &user("b")).await.unwrap();

        let profile = store.fetch_profile(&user("a")).await.unwrap().unwrap();
        assert_eq!(profile.friends, vec![user("b")]);

        store.remove_friend(&user("a"), &user("b")).await.unwrap();
        store.remove_friend(&user("a"), &user("b")).await.unwrap();
        let profile = store.fetch_profile(&user("a")).await.unwrap().unwrap();
        assert!(profile.friends.is_empty());
    }

    #[tokio::test]
    async fn mutating_an_absent_document_is_not_found() {
        let store = MemoryStore::new();
        assert_eq!(
            store.add_friend(&user("ghost"), &user("b")).await,
            Err(StoreError::NotFound)
        );
    }

    #[tokio::test]
    async fn author_query_returns_only_that_authors_posts() {
        let store = MemoryStore::new();
        seed_post(&store, "a", "1/1/2025").await;
        seed_post(&store, "b", "1/2/2025").await;
        seed_post(&store, "a", "1/3/2025").await;

        let posts = store.posts_by_author(&user("a")).await.unwrap();
        assert_eq!(posts.len(), 2);
        assert!(posts.iter().all(|post| post.author == user("a")));
    }

    #[tokio::test]
    async fn native_order_is_newest_first_with_invalid_dates_last() {
        let store = MemoryStore::new();
        seed_post(&store, "a", "1/1/2025").await;
        seed_post(&store, "a", "not a date").await;
        seed_post(&store, "a", "3/1/2025").await;

        let page = store
            .post_page(&PageRequest {
                limit: 10,
                ..PageRequest::default()
            })
            .await
            .unwrap();

        let dates: Vec<&str> = page.iter().map(|post| post.created_at.get()).collect();
        assert_eq!(dates, vec!["3/1/2025", "1/1/2025", "not a date"]);
    }

    #[tokio::test]
    async fn cursors_window_the_native_order() {
        let store = MemoryStore::new();
        for day in 1..=5 {
            seed_post(&store, "a", &format!("1/{day}/2025")).await;
        }

        let first = store
            .post_page(&PageRequest {
                limit: 2,
                ..PageRequest::default()
            })
            .await
            .unwrap();
        assert_eq!(first.len(), 2);
        assert_eq!(first[0].created_at.get(), "1/5/2025");

        let after = PageMarker::of(&first[1]);
        let second = store
            .post_page(&PageRequest {
                limit: 2,
                start_after: Some(after),
                ..PageRequest::default()
            })
            .await
            .unwrap();
        assert_eq!(second[0].created_at.get(), "1/3/2025");
        assert_eq!(second[1].created_at.get(), "1/2/2025");

        let before = PageMarker::of(&second[0]);
        let back = store
            .post_page(&PageRequest {
                limit: 2,
                end_before: Some(before),
                ..PageRequest::default()
            })
            .await
            .unwrap();
        let ids: Vec<_> = back.iter().map(|post| post.id.clone()).collect();
        let expected: Vec<_> = first.iter().map(|post| post.id.clone()).collect();
        assert_eq!(ids, expected);
    }

    #[tokio::test]
    async fn unknown_cursor_is_not_found() {
        let store = MemoryStore::new();
        seed_post(&store, "a", "1/1/2025").await;

        let result = store
            .post_page(&PageRequest {
                limit: 2,
                start_after: Some(PageMarker::from(Id::new("missing"))),
                ..PageRequest::default()
            })
            .await;
        assert_eq!(result, Err(StoreError::NotFound));
    }
}
