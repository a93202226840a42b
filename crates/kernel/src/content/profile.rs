//! Resource profiles.
//!
//! A profile fixes the variant-specific rules of a content resource: which
//! bundle it serves, which fields it accepts, how creation is gated, and
//! what an update without recognised fields means.

use super::fields::{BODY, FieldSpec, STATUS, TITLE};

/// Bundle served by the blog resource.
pub const BLOG_BUNDLE: &str = "blog";

/// How the create operation is gated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateAccess {
    /// Delegate to `Authorizer::can_create`.
    Authorizer,
    /// Any authenticated actor may create.
    Authenticated,
}

/// What an update with no recognised fields does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyUpdate {
    /// Report `NoChange` without touching the store.
    NoChange,
    /// Perform the save anyway; it has no visible effect.
    Save,
}

/// Variant rules for a content resource.
#[derive(Debug)]
pub struct ResourceProfile {
    /// Machine name, also used as the failure log channel.
    pub name: &'static str,
    /// Human label used in messages ("Blog post not found").
    pub label: &'static str,
    /// Lower-case noun used in failure messages ("Error creating blog post").
    pub noun: &'static str,
    /// Bundle this resource is limited to. `None` serves every bundle.
    pub bundle: Option<&'static str>,
    /// Recognised mutable fields.
    pub fields: &'static [FieldSpec],
    pub create_access: CreateAccess,
    /// Whether creation requires a non-empty body.
    pub require_body: bool,
    /// Whether creation forces `status = true`.
    pub force_published: bool,
    /// Whether `get` hides unpublished items as not found.
    pub published_reads_only: bool,
    pub empty_update: EmptyUpdate,
    /// Message accompanying listings.
    pub list_message: &'static str,
}

const NODE_FIELDS: &[FieldSpec] = &[TITLE, BODY, STATUS];
const BLOG_FIELDS: &[FieldSpec] = &[TITLE, BODY];

/// Generic node resource: any bundle, dynamic recognised-field updates.
pub static NODE_PROFILE: ResourceProfile = ResourceProfile {
    name: "node",
    label: "Node",
    noun: "node",
    bundle: None,
    fields: NODE_FIELDS,
    create_access: CreateAccess::Authorizer,
    require_body: false,
    force_published: false,
    published_reads_only: false,
    empty_update: EmptyUpdate::Save,
    list_message: "List of content",
};

/// Blog post resource: published blog items, title/body updates only.
pub static BLOG_PROFILE: ResourceProfile = ResourceProfile {
    name: "blog",
    label: "Blog post",
    noun: "blog post",
    bundle: Some(BLOG_BUNDLE),
    fields: BLOG_FIELDS,
    create_access: CreateAccess::Authenticated,
    require_body: true,
    force_published: true,
    published_reads_only: true,
    empty_update: EmptyUpdate::NoChange,
    list_message: "List of blogs",
};

impl ResourceProfile {
    /// Check if an item of `bundle` is within this resource's scope.
    pub fn serves(&self, bundle: &str) -> bool {
        self.bundle.is_none_or(|own| own == bundle)
    }
}
