//! The application core: everything the UI calls when the user acts.
//!
//! All state here is presentation state rebuilt from the stores on demand.
//! The stores behind [`avospace_store`]'s traits are the single source of
//! truth; nothing in this crate caches across a sign-out.

pub mod compose;
pub mod feed;
pub mod friendship;
pub mod graph;
pub mod merge;
pub mod session;
