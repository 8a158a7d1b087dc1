//! Data-access hooks composed by every page
//!
//! Queries (`use_get`) keep failures in their state; mutations
//! (`use_post`, `use_put`, `use_delete`) toast and return them.

mod query;
mod use_get;
mod use_mutation;

pub use query::{QueryState, RequestGeneration};
pub use use_get::{use_get, UseGet};
pub use use_mutation::{use_delete, use_post, use_put, UseMutation};
