//! Content module.
//!
//! This module provides:
//! - ContentResource: load, access-check, mutate, and save content items
//! - ResourceProfile: per-route rules (node vs. blog)
//! - ContentStore: persistence seam, with PostgreSQL and in-memory backends
//! - Authorizer: permission checks for each operation
//! - FailureLog: where persistence failures are reported

mod authorizer;
mod error;
mod failure_log;
pub mod fields;
mod memory_store;
mod pg_store;
pub mod profile;
mod resource;
mod store;

pub use authorizer::{
    ACCESS_CONTENT, Authorizer, CREATE_CONTENT, PermissionAuthorizer, VIEW_OWN_UNPUBLISHED,
};
pub use error::ContentError;
pub use failure_log::{FailureLog, TracingFailureLog};
pub use memory_store::MemoryContentStore;
pub use pg_store::PgContentStore;
pub use profile::{BLOG_BUNDLE, BLOG_PROFILE, NODE_PROFILE, ResourceProfile};
pub use resource::{
    ContentResource, DEFAULT_PER_PAGE, ListQuery, MAX_PER_PAGE, Payload, UpdateOutcome,
};
pub use store::ContentStore;
