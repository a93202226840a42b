//! In-process content store.
//!
//! Used when no `DATABASE_URL` is configured, and by tests. Enforces the
//! same title constraint as the PostgreSQL schema so that constraint
//! violations surface identically.

use std::sync::atomic::{AtomicI64, Ordering};

use anyhow::{Result, bail};
use async_trait::async_trait;
use dashmap::DashMap;
use tracing::debug;

use super::store::ContentStore;
use crate::models::{
    ContentFilter, ContentItem, ContentSort, FieldChanges, MAX_TITLE_LENGTH, NewContent,
};

/// DashMap-backed content store with a monotonic id counter.
pub struct MemoryContentStore {
    items: DashMap<i64, ContentItem>,
    next_id: AtomicI64,
}

impl MemoryContentStore {
    /// Create an empty store. The first id handed out is 1.
    pub fn new() -> Self {
        Self {
            items: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }

    /// Number of stored items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the store holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for MemoryContentStore {
    fn default() -> Self {
        Self::new()
    }
}

fn check_title(title: &str) -> Result<()> {
    let len = title.chars().count();
    if len > MAX_TITLE_LENGTH {
        bail!("value too long for title ({len} > {MAX_TITLE_LENGTH} characters)");
    }
    Ok(())
}

#[async_trait]
impl ContentStore for MemoryContentStore {
    async fn load(&self, id: i64) -> Result<Option<ContentItem>> {
        Ok(self.items.get(&id).map(|entry| entry.value().clone()))
    }

    async fn create(&self, input: NewContent) -> Result<ContentItem> {
        check_title(&input.title)?;

        let now = chrono::Utc::now().timestamp();
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let (body, body_format) = match input.body {
            Some(text) => (Some(text.value), text.format),
            None => (None, None),
        };

        let item = ContentItem {
            id,
            bundle: input.bundle,
            title: input.title,
            body,
            body_format,
            status: input.status,
            author_id: input.author_id,
            created: now,
            changed: now,
        };
        self.items.insert(id, item.clone());

        debug!(item_id = id, "content item stored");
        Ok(item)
    }

    async fn update(&self, id: i64, changes: &FieldChanges) -> Result<Option<ContentItem>> {
        if let Some(title) = &changes.title {
            check_title(title)?;
        }

        let Some(mut entry) = self.items.get_mut(&id) else {
            return Ok(None);
        };
        changes.apply_to(entry.value_mut(), chrono::Utc::now().timestamp());

        Ok(Some(entry.value().clone()))
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        Ok(self.items.remove(&id).is_some())
    }

    async fn query(&self, filter: &ContentFilter, sort: ContentSort) -> Result<Vec<ContentItem>> {
        let mut items: Vec<ContentItem> = self
            .items
            .iter()
            .filter(|entry| filter.matches(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();

        match sort {
            ContentSort::CreatedDesc => {
                items.sort_by(|a, b| b.created.cmp(&a.created).then(b.id.cmp(&a.id)));
            }
        }

        let offset = usize::try_from(filter.offset).unwrap_or(0);
        let limit = usize::try_from(filter.limit).unwrap_or(0);
        Ok(items.into_iter().skip(offset).take(limit).collect())
    }

    async fn is_healthy(&self) -> bool {
        true
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

impl std::fmt::Debug for MemoryContentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryContentStore")
            .field("items", &self.items.len())
            .finish()
    }
}
