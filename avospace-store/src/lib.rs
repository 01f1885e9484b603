//! The boundary to the hosted document store and identity provider.
//!
//! Everything behind these traits is an external collaborator: the
//! application owns no persistence. Documents cross the boundary in their
//! shape-free wire form and are defaulted into strict models exactly once,
//! here.

pub mod auth;
pub mod document;
pub mod memory;
pub mod store;
