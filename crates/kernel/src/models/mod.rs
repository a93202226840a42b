//! Data models.

pub mod item;

pub use item::{
    ContentFilter, ContentItem, ContentSort, FieldChanges, MAX_TITLE_LENGTH, NewContent, TextValue,
};
