//! Content item model.
//!
//! Items are the content records served by the API (like nodes in Drupal).
//! Both the generic node resource and the blog resource read and write
//! the same record shape; the bundle discriminates between them.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum title length accepted by every store.
pub const MAX_TITLE_LENGTH: usize = 255;

/// Content item record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ContentItem {
    /// Store-assigned identifier. Never reused after deletion.
    pub id: i64,

    /// Bundle (content type machine name). Fixed at creation.
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub bundle: String,

    /// Item title.
    pub title: String,

    /// Body text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,

    /// Text format of the body (e.g. "basic_html").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_format: Option<String>,

    /// Published flag.
    pub status: bool,

    /// Actor that created the item.
    pub author_id: Uuid,

    /// Unix timestamp when created.
    pub created: i64,

    /// Unix timestamp of the last effective update.
    pub changed: i64,
}

impl ContentItem {
    /// Check if this item is published.
    pub fn is_published(&self) -> bool {
        self.status
    }

    /// Check if the given actor id authored this item.
    pub fn is_authored_by(&self, actor_id: Uuid) -> bool {
        self.author_id == actor_id
    }
}

/// Body text with an optional format tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextValue {
    pub value: String,
    pub format: Option<String>,
}

/// Input for creating a new item.
#[derive(Debug, Clone)]
pub struct NewContent {
    pub bundle: String,
    pub title: String,
    pub body: Option<TextValue>,
    pub status: bool,
    pub author_id: Uuid,
}

/// Recognised field values to apply in a single update.
///
/// `None` means "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldChanges {
    pub title: Option<String>,
    pub body: Option<TextValue>,
    pub status: Option<bool>,
}

impl FieldChanges {
    /// True when no field would be touched.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.body.is_none() && self.status.is_none()
    }

    /// Apply the changes to an item in place.
    ///
    /// `changed` is only bumped when at least one field is set.
    pub fn apply_to(&self, item: &mut ContentItem, now: i64) {
        if self.is_empty() {
            return;
        }
        if let Some(title) = &self.title {
            item.title.clone_from(title);
        }
        if let Some(body) = &self.body {
            item.body = Some(body.value.clone());
            item.body_format.clone_from(&body.format);
        }
        if let Some(status) = self.status {
            item.status = status;
        }
        item.changed = now;
    }
}

/// Sort orders supported by store queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ContentSort {
    /// Newest first; ties broken by id, highest first.
    #[default]
    CreatedDesc,
}

/// Filter for store queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentFilter {
    pub bundle: Option<String>,
    pub published_only: bool,
    pub limit: i64,
    pub offset: i64,
}

impl ContentFilter {
    /// Check whether an item satisfies the filter (ignores paging).
    pub fn matches(&self, item: &ContentItem) -> bool {
        if self.published_only && !item.status {
            return false;
        }
        match &self.bundle {
            Some(bundle) => &item.bundle == bundle,
            None => true,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn sample() -> ContentItem {
        ContentItem {
            id: 7,
            bundle: "blog".to_string(),
            title: "Hello".to_string(),
            body: Some("World".to_string()),
            body_format: None,
            status: true,
            author_id: Uuid::nil(),
            created: 100,
            changed: 100,
        }
    }

    #[test]
    fn serializes_bundle_as_type_and_skips_missing_format() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["type"], "blog");
        assert_eq!(json["body"], "World");
        assert!(json.get("body_format").is_none());
        assert!(json.get("bundle").is_none());
    }

    #[test]
    fn apply_changes_only_touches_present_fields() {
        let mut item = sample();
        let changes = FieldChanges {
            title: Some("New".to_string()),
            ..Default::default()
        };
        changes.apply_to(&mut item, 200);

        assert_eq!(item.title, "New");
        assert_eq!(item.body.as_deref(), Some("World"));
        assert_eq!(item.changed, 200);
        assert_eq!(item.created, 100);
    }

    #[test]
    fn empty_changes_leave_item_untouched() {
        let mut item = sample();
        FieldChanges::default().apply_to(&mut item, 500);
        assert_eq!(item, sample());
    }

    #[test]
    fn filter_matches_bundle_and_status() {
        let filter = ContentFilter {
            bundle: Some("blog".to_string()),
            published_only: true,
            limit: 10,
            offset: 0,
        };
        let mut item = sample();
        assert!(filter.matches(&item));

        item.status = false;
        assert!(!filter.matches(&item));

        item.status = true;
        item.bundle = "page".to_string();
        assert!(!filter.matches(&item));
    }
}
