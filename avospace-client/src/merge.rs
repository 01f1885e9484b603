//! Client-side reordering of posts fetched from the store.
//!
//! Per-author queries come back without an ordering guarantee, so every
//! aggregated view re-sorts before display. The sorts are stable: posts
//! with equal (or equally unparseable) dates keep their arrival order.

use avospace_common::model::post::Post;

/// Sorts posts newest first in place. Unparseable dates sink to the end and
/// keep their relative order.
pub fn sort_newest_first(posts: &mut [Post]) {
    posts.sort_by(|a, b| a.created_at.cmp_newest_first(&b.created_at));
}

/// Flattens per-author result sets into one newest-first list.
#[must_use]
pub fn merge_newest_first(batches: Vec<Vec<Post>>) -> Vec<Post> {
    let mut merged: Vec<Post> = batches.into_iter().flatten().collect();
    sort_newest_first(&mut merged);
    merged
}

#[cfg(test)]
mod tests {
    use super::{merge_newest_first, sort_newest_first};
    use avospace_common::model::{Id, date::PostDate, post::Post};

    fn post(id: &str, date: &str) -> Post {
        Post {
            id: Id::new(id),
            author: Id::new("a"),
            text: String::new(),
            created_at: PostDate::new(date),
            likes: 0,
        }
    }

    fn ids(posts: &[Post]) -> Vec<&str> {
        posts.iter().map(|post| post.id.get()).collect()
    }

    #[test]
    fn sorts_newest_first_with_invalid_dates_last() {
        let mut posts = vec![
            post("old", "1/1/2024"),
            post("junk1", "not a date"),
            post("new", "8/3/2025"),
            post("junk2", ""),
        ];
        sort_newest_first(&mut posts);
        assert_eq!(ids(&posts), vec!["new", "old", "junk1", "junk2"]);
    }

    #[test]
    fn equal_dates_keep_arrival_order() {
        let mut posts = vec![
            post("first", "5/5/2025"),
            post("second", "5/5/2025"),
            post("third", "5/5/2025"),
        ];
        sort_newest_first(&mut posts);
        assert_eq!(ids(&posts), vec!["first", "second", "third"]);
    }

    #[test]
    fn identical_unparseable_dates_keep_arrival_order() {
        let mut posts = vec![
            post("first", "gibberish"),
            post("second", "gibberish"),
            post("dated", "1/1/2025"),
        ];
        sort_newest_first(&mut posts);
        assert_eq!(ids(&posts), vec!["dated", "first", "second"]);
    }

    #[test]
    fn merge_interleaves_batches_by_date() {
        let merged = merge_newest_first(vec![
            vec![post("a1", "3/1/2025"), post("a2", "1/1/2025")],
            vec![post("b1", "2/1/2025")],
            vec![],
        ]);
        assert_eq!(ids(&merged), vec!["a1", "b1", "a2"]);
    }
}
