//! Content storage backends.
//!
//! Provides the persistence trait consumed by content resources.

use anyhow::Result;
use async_trait::async_trait;

use crate::models::{ContentFilter, ContentItem, ContentSort, FieldChanges, NewContent};

/// Content storage backend trait.
///
/// Implementations own id assignment, timestamps, and isolation between
/// concurrent writers. Ids must never be reused after deletion.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Load an item by ID.
    async fn load(&self, id: i64) -> Result<Option<ContentItem>>;

    /// Persist a new item, assigning `id`, `created` and `changed`.
    async fn create(&self, input: NewContent) -> Result<ContentItem>;

    /// Apply a change set in one write. Returns `None` if the item is gone.
    ///
    /// An empty change set is still a save call but leaves the item untouched.
    async fn update(&self, id: i64, changes: &FieldChanges) -> Result<Option<ContentItem>>;

    /// Hard-delete an item. Returns false if nothing was deleted.
    async fn delete(&self, id: i64) -> Result<bool>;

    /// Query items matching a filter.
    async fn query(&self, filter: &ContentFilter, sort: ContentSort) -> Result<Vec<ContentItem>>;

    /// Check if the backend is reachable.
    async fn is_healthy(&self) -> bool;

    /// Get the backend name (e.g., "postgres", "memory").
    fn backend(&self) -> &'static str;
}
