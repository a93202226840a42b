//! Content resource: load, check access, mutate, save.
//!
//! A [`ContentResource`] is the CRUD façade behind one set of routes. The
//! variant-specific rules come from its [`ResourceProfile`]; persistence,
//! permission checks, and failure logging are injected collaborators.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, info};

use super::authorizer::Authorizer;
use super::error::ContentError;
use super::failure_log::FailureLog;
use super::fields::{collect_changes, parse_body, parse_status, parse_title};
use super::profile::{CreateAccess, EmptyUpdate, ResourceProfile};
use super::store::ContentStore;
use crate::actor::Actor;
use crate::models::{ContentFilter, ContentItem, ContentSort, NewContent};

/// Default page size for listings.
pub const DEFAULT_PER_PAGE: i64 = 20;

/// Largest accepted page size.
pub const MAX_PER_PAGE: i64 = 100;

/// Longest accepted bundle machine name.
const MAX_BUNDLE_LENGTH: usize = 32;

/// Decoded request payload. Anything but a JSON object is invalid.
#[derive(Debug, Clone, Default)]
pub struct Payload(Option<Map<String, Value>>);

impl Payload {
    /// Decode a raw request body.
    pub fn from_slice(bytes: &[u8]) -> Self {
        match serde_json::from_slice::<Value>(bytes) {
            Ok(value) => Self::from_value(value),
            Err(_) => Self(None),
        }
    }

    /// Wrap an already decoded value.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(Some(map)),
            _ => Self(None),
        }
    }

    fn fields(&self) -> Result<&Map<String, Value>, ContentError> {
        self.0
            .as_ref()
            .ok_or_else(|| ContentError::invalid("Invalid data provided"))
    }
}

/// Listing parameters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    /// Bundle filter; ignored by bundle-scoped resources.
    #[serde(rename = "type")]
    pub bundle: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// Result of an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The item after the save.
    Updated(ContentItem),
    /// No recognised field was present; nothing was written.
    NoChange,
}

/// CRUD façade over content items.
///
/// Wrapped in Arc internally so Clone is cheap.
#[derive(Clone)]
pub struct ContentResource {
    inner: Arc<ContentResourceInner>,
}

struct ContentResourceInner {
    profile: &'static ResourceProfile,
    store: Arc<dyn ContentStore>,
    authorizer: Arc<dyn Authorizer>,
    failures: Arc<dyn FailureLog>,
    default_format: String,
}

impl ContentResource {
    /// Create a resource over the given collaborators.
    pub fn new(
        profile: &'static ResourceProfile,
        store: Arc<dyn ContentStore>,
        authorizer: Arc<dyn Authorizer>,
        failures: Arc<dyn FailureLog>,
        default_format: impl Into<String>,
    ) -> Self {
        Self {
            inner: Arc::new(ContentResourceInner {
                profile,
                store,
                authorizer,
                failures,
                default_format: default_format.into(),
            }),
        }
    }

    /// Get the profile this resource enforces.
    pub fn profile(&self) -> &'static ResourceProfile {
        self.inner.profile
    }

    fn not_found(&self) -> ContentError {
        ContentError::NotFound(self.inner.profile.label)
    }

    fn persistence(&self, operation: &'static str, source: anyhow::Error) -> ContentError {
        self.inner.failures.persistence_failed(operation, &source);
        ContentError::Persistence {
            operation,
            label: self.inner.profile.noun,
            source,
        }
    }

    /// Load an item that exists and belongs to this resource's bundle.
    ///
    /// Published-only resources treat drafts as absent for every operation.
    async fn load_scoped(&self, id: i64) -> Result<ContentItem, ContentError> {
        let item = self
            .inner
            .store
            .load(id)
            .await
            .map_err(|e| self.persistence("loading", e))?;

        match item {
            Some(item)
                if self.inner.profile.serves(&item.bundle)
                    && (item.is_published() || !self.inner.profile.published_reads_only) =>
            {
                Ok(item)
            }
            _ => Err(self.not_found()),
        }
    }

    /// Get a single item.
    pub async fn get(&self, id: i64, actor: &Actor) -> Result<ContentItem, ContentError> {
        let item = self.load_scoped(id).await?;

        if !self.inner.authorizer.can_view(actor, &item) {
            return Err(ContentError::Forbidden);
        }

        Ok(item)
    }

    /// List published items, newest first. Items the actor cannot view are
    /// left out.
    ///
    /// Paging happens in the store before the view check, so a page may hold
    /// fewer than `per_page` items (or none) while later pages still have
    /// visible ones. A short page does not mark the end of the listing.
    pub async fn list(
        &self,
        actor: &Actor,
        query: &ListQuery,
    ) -> Result<Vec<ContentItem>, ContentError> {
        let bundle = match self.inner.profile.bundle {
            Some(own) => Some(own.to_string()),
            None => query.bundle.clone().filter(|b| !b.is_empty()),
        };
        let per_page = query
            .per_page
            .unwrap_or(DEFAULT_PER_PAGE)
            .clamp(1, MAX_PER_PAGE);
        let page = query.page.unwrap_or(1).max(1);

        let filter = ContentFilter {
            bundle,
            published_only: true,
            limit: per_page,
            offset: (page - 1).saturating_mul(per_page),
        };

        let items = self
            .inner
            .store
            .query(&filter, ContentSort::CreatedDesc)
            .await
            .map_err(|e| self.persistence("listing", e))?;

        Ok(items
            .into_iter()
            .filter(|item| self.inner.authorizer.can_view(actor, item))
            .collect())
    }

    /// Create an item. Permission is checked before the payload is looked at.
    pub async fn create(
        &self,
        payload: &Payload,
        actor: &Actor,
    ) -> Result<ContentItem, ContentError> {
        let profile = self.inner.profile;

        let permitted = match profile.create_access {
            CreateAccess::Authorizer => self.inner.authorizer.can_create(actor),
            CreateAccess::Authenticated => actor.authenticated,
        };
        if !permitted {
            return Err(ContentError::Forbidden);
        }

        let fields = payload.fields()?;

        let title = match fields.get("title") {
            Some(value) => parse_title(value)?,
            None => return Err(ContentError::invalid("title is required")),
        };

        let bundle = match profile.bundle {
            Some(own) => own.to_string(),
            None => parse_bundle(fields.get("type"))?,
        };

        let body = match fields.get("body") {
            None | Some(Value::Null) => None,
            Some(value) => Some(parse_body(value, &self.inner.default_format)?),
        };
        if profile.require_body && body.as_ref().is_none_or(|b| b.value.trim().is_empty()) {
            return Err(ContentError::invalid("body is required"));
        }

        let status = match fields.get("status") {
            _ if profile.force_published => true,
            Some(value) => parse_status(value)?,
            None => true,
        };

        let item = self
            .inner
            .store
            .create(NewContent {
                bundle,
                title,
                body,
                status,
                author_id: actor.id,
            })
            .await
            .map_err(|e| self.persistence("creating", e))?;

        info!(
            item_id = item.id,
            bundle = %item.bundle,
            resource = profile.name,
            "content created"
        );
        Ok(item)
    }

    /// Apply the recognised fields of `payload` to an existing item.
    pub async fn update(
        &self,
        id: i64,
        payload: &Payload,
        actor: &Actor,
    ) -> Result<UpdateOutcome, ContentError> {
        let profile = self.inner.profile;
        let fields = payload.fields()?;

        let item = self.load_scoped(id).await?;
        if !self.inner.authorizer.can_update(actor, &item) {
            return Err(ContentError::Forbidden);
        }

        let changes = collect_changes(profile.fields, fields, &self.inner.default_format)?;
        if profile.require_body
            && changes
                .body
                .as_ref()
                .is_some_and(|b| b.value.trim().is_empty())
        {
            return Err(ContentError::invalid("body must not be empty"));
        }

        if changes.is_empty() && profile.empty_update == EmptyUpdate::NoChange {
            debug!(item_id = id, resource = profile.name, "update carried no changes");
            return Ok(UpdateOutcome::NoChange);
        }

        let updated = self
            .inner
            .store
            .update(id, &changes)
            .await
            .map_err(|e| self.persistence("updating", e))?
            .ok_or_else(|| self.not_found())?;

        info!(item_id = id, resource = profile.name, "content updated");
        Ok(UpdateOutcome::Updated(updated))
    }

    /// Hard-delete an item.
    pub async fn delete(&self, id: i64, actor: &Actor) -> Result<(), ContentError> {
        let item = self.load_scoped(id).await?;
        if !self.inner.authorizer.can_delete(actor, &item) {
            return Err(ContentError::Forbidden);
        }

        let deleted = self
            .inner
            .store
            .delete(id)
            .await
            .map_err(|e| self.persistence("deleting", e))?;
        if !deleted {
            return Err(self.not_found());
        }

        info!(item_id = id, resource = self.inner.profile.name, "content deleted");
        Ok(())
    }
}

/// Parse the bundle of a new item: a lower-case machine name.
fn parse_bundle(value: Option<&Value>) -> Result<String, ContentError> {
    let Some(value) = value else {
        return Err(ContentError::invalid("type is required"));
    };
    let Some(bundle) = value.as_str() else {
        return Err(ContentError::invalid("type must be a string"));
    };

    let valid = !bundle.is_empty()
        && bundle.len() <= MAX_BUNDLE_LENGTH
        && bundle
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
    if !valid {
        return Err(ContentError::invalid(
            "type must be a machine name (lower-case letters, digits, underscores)",
        ));
    }

    Ok(bundle.to_string())
}
