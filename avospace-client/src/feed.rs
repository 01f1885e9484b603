//! The two post feeds: the global feed pages through every post in the
//! store's native order, and the friend feed aggregates per-friend queries
//! client-side.

use crate::{graph::SocialGraphReader, merge::merge_newest_first};
use avospace_common::model::{Id, post::Post, user::UserMarker};
use avospace_store::store::{AccountStore, PageMarker, PageRequest, PostStore, Result, StoreError};
use futures::future::join_all;
use tracing::{debug, warn};

pub const PAGE_SIZE: usize = 10;

/// The first and last post of a fetched page, as cursors for the adjacent
/// pages.
#[derive(Clone, Debug)]
pub struct PageBounds {
    pub first: PageMarker,
    pub last: PageMarker,
}

fn bounds_of(posts: &[Post]) -> Option<PageBounds> {
    Some(PageBounds {
        first: PageMarker::of(posts.first()?),
        last: PageMarker::of(posts.last()?),
    })
}

#[derive(Clone, Debug)]
pub struct FeedPage {
    pub posts: Vec<Post>,
    pub has_next: bool,
}

impl FeedPage {
    /// Cursors for the adjacent pages; `None` for an empty page.
    #[must_use]
    pub fn bounds(&self) -> Option<PageBounds> {
        bounds_of(&self.posts)
    }
}

/// One page of the store's native newest-first ordering, starting after the
/// given cursor. `has_next` is decided by probing for a single post past the
/// page, never by the page being full.
pub async fn page_after<P: PostStore>(
    posts: &P,
    limit: usize,
    start_after: Option<PageMarker>,
) -> Result<FeedPage> {
    let page = posts
        .post_page(&PageRequest {
            limit,
            start_after,
            ..PageRequest::default()
        })
        .await?;

    let has_next = match page.last() {
        Some(last) => {
            let probe = posts
                .post_page(&PageRequest {
                    limit: 1,
                    start_after: Some(PageMarker::of(last)),
                    ..PageRequest::default()
                })
                .await?;
            !probe.is_empty()
        }
        None => false,
    };

    Ok(FeedPage { posts: page, has_next })
}

/// The paged view over every post. Holds one page of posts plus the cursor
/// bookkeeping to move in either direction; page numbers start at 1.
#[derive(Debug)]
pub struct GlobalFeed<'a, P> {
    posts_store: &'a P,
    window: Vec<Post>,
    bounds: Vec<PageBounds>,
    page_number: usize,
    has_next: bool,
}

impl<'a, P: PostStore> GlobalFeed<'a, P> {
    pub fn new(posts_store: &'a P) -> Self {
        Self {
            posts_store,
            window: Vec::new(),
            bounds: Vec::new(),
            page_number: 1,
            has_next: false,
        }
    }

    #[must_use]
    pub fn posts(&self) -> &[Post] {
        &self.window
    }

    #[must_use]
    pub fn page_number(&self) -> usize {
        self.page_number
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.has_next
    }

    #[must_use]
    pub fn has_prev(&self) -> bool {
        self.page_number > 1
    }

    fn remember_window_bounds(&mut self) {
        self.bounds.truncate(self.page_number - 1);
        if let Some(bounds) = bounds_of(&self.window) {
            self.bounds.push(bounds);
        }
    }

    pub async fn load_first(&mut self) -> Result<()> {
        let page = page_after(self.posts_store, PAGE_SIZE, None).await?;
        self.window = page.posts;
        self.has_next = page.has_next;
        self.page_number = 1;
        self.remember_window_bounds();
        Ok(())
    }

    /// Advances one page. A no-op when the probe already said there is no
    /// next page.
    pub async fn next_page(&mut self) -> Result<()> {
        if !self.has_next {
            return Ok(());
        }
        let Some(current) = self.bounds.last() else {
            return Ok(());
        };

        let page = page_after(self.posts_store, PAGE_SIZE, Some(current.last.clone())).await?;
        if page.posts.is_empty() {
            // The post past the boundary disappeared between the probe and
            // this fetch. Stay put.
            self.has_next = false;
            return Ok(());
        }

        self.window = page.posts;
        self.has_next = page.has_next;
        self.page_number += 1;
        self.remember_window_bounds();
        Ok(())
    }

    /// Steps back one page by re-fetching the posts immediately preceding
    /// the current page's first post. Going back always leaves a next page.
    pub async fn prev_page(&mut self) -> Result<()> {
        if self.page_number <= 1 {
            return Ok(());
        }
        let Some(current) = self.bounds.last() else {
            return Ok(());
        };

        let window = self
            .posts_store
            .post_page(&PageRequest {
                limit: PAGE_SIZE,
                end_before: Some(current.first.clone()),
                ..PageRequest::default()
            })
            .await?;

        self.page_number -= 1;
        self.window = window;
        self.remember_window_bounds();
        self.has_next = true;
        Ok(())
    }

    /// Re-fetches the currently displayed page, keeping the page number.
    /// Called when the signed-in identity or friend state changes; on the
    /// first page this is a plain reload.
    pub async fn refresh(&mut self) -> Result<()> {
        if self.page_number == 1 {
            return self.load_first().await;
        }
        // The current page starts right after the previous page's last post.
        let Some(previous) = self.bounds.get(self.page_number - 2) else {
            return self.load_first().await;
        };

        let page = page_after(self.posts_store, PAGE_SIZE, Some(previous.last.clone())).await?;
        if page.posts.is_empty() {
            // Everything past the previous page is gone; start over.
            return self.load_first().await;
        }

        self.window = page.posts;
        self.has_next = page.has_next;
        self.remember_window_bounds();
        Ok(())
    }

    /// Shows a freshly submitted post at the top of the first page without a
    /// round trip. Only applies while the first page is visible.
    pub fn prepend(&mut self, post: Post) {
        if self.page_number != 1 {
            return;
        }
        self.window.insert(0, post);
        if self.window.len() > PAGE_SIZE {
            self.window.truncate(PAGE_SIZE);
            self.has_next = true;
        }
        self.remember_window_bounds();
    }
}

/// Everything the user's friends have posted, merged newest first. A viewer
/// without a profile or without friends sees an empty feed; a friend whose
/// query fails is skipped rather than failing the whole feed.
pub async fn friend_circle_posts<A: AccountStore, P: PostStore>(
    accounts: &A,
    posts: &P,
    viewer: &Id<UserMarker>,
) -> Result<Vec<Post>> {
    let friends = match SocialGraphReader::new(accounts).friends_of(viewer).await {
        Ok(friends) => friends,
        Err(StoreError::NotFound) => {
            debug!(%viewer, "Viewer has no profile, friend feed is empty");
            return Ok(Vec::new());
        }
        Err(err) => return Err(err),
    };
    if friends.is_empty() {
        return Ok(Vec::new());
    }

    let fetches = friends.iter().map(|friend| posts.posts_by_author(friend));

    let mut batches = Vec::with_capacity(friends.len());
    for (friend, fetched) in friends.iter().zip(join_all(fetches).await) {
        match fetched {
            Ok(batch) => batches.push(batch),
            Err(err) => warn!(%friend, %err, "Skipping a friend whose posts failed to load"),
        }
    }
    Ok(merge_newest_first(batches))
}

/// A ticket for one in-flight friend feed fetch. Only the newest ticket may
/// apply its result.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct FetchToken(u64);

/// The friend feed's presentation state. Refreshes are raced deliberately:
/// starting a new fetch invalidates every older one, so a slow response can
/// never overwrite a newer feed.
#[derive(Debug, Default)]
pub struct FriendFeed {
    generation: u64,
    posts: Vec<Post>,
}

impl FriendFeed {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    /// Starts a refresh, invalidating every earlier token.
    pub fn begin_refresh(&mut self) -> FetchToken {
        self.generation += 1;
        FetchToken(self.generation)
    }

    /// Applies a fetched result. Returns `false` and discards the posts if a
    /// newer refresh has started since the token was issued.
    pub fn apply(&mut self, token: FetchToken, posts: Vec<Post>) -> bool {
        if token.0 != self.generation {
            debug!("Discarding a superseded friend feed fetch");
            return false;
        }
        self.posts = posts;
        true
    }

    /// Fetches the viewer's friend feed and applies it, unless a concurrent
    /// refresh supersedes this one first.
    pub async fn refresh<A: AccountStore, P: PostStore>(
        &mut self,
        accounts: &A,
        posts: &P,
        viewer: &Id<UserMarker>,
    ) -> Result<()> {
        let token = self.begin_refresh();
        let fetched = friend_circle_posts(accounts, posts, viewer).await?;
        self.apply(token, fetched);
        Ok(())
    }

    /// Shows a just-seen post at the top without a full refresh, but only
    /// after re-reading the viewer's profile to confirm the author is
    /// currently a friend. The viewer's own posts and authorless legacy
    /// posts never enter the friend feed.
    pub async fn maybe_prepend<A: AccountStore>(
        &mut self,
        accounts: &A,
        viewer: &Id<UserMarker>,
        post: Post,
    ) -> Result<()> {
        if post.author.is_empty() || post.author == *viewer {
            return Ok(());
        }
        let Some(profile) = accounts.fetch_profile(viewer).await? else {
            return Ok(());
        };
        if profile.is_friend(&post.author) {
            self.posts.insert(0, post);
        }
        Ok(())
    }
}
