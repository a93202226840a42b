//! Application state shared across all handlers.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::config::Config;
use crate::content::{
    BLOG_PROFILE, ContentResource, ContentStore, MemoryContentStore, NODE_PROFILE,
    PermissionAuthorizer, PgContentStore, TracingFailureLog,
};
use crate::db;
use crate::permissions::{AccessPolicy, PermissionService};

/// Shared application state.
///
/// Wrapped in Arc internally so Clone is cheap.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Content persistence backend.
    store: Arc<dyn ContentStore>,

    /// Actor resolution from the access policy.
    permissions: PermissionService,

    /// Resource behind `/api/node`.
    nodes: ContentResource,

    /// Resource behind `/api/blogs`.
    blogs: ContentResource,
}

impl AppState {
    /// Create application state from configuration.
    ///
    /// Connects to PostgreSQL and applies migrations when `DATABASE_URL` is
    /// set; otherwise content lives in memory for the life of the process.
    pub async fn new(config: &Config) -> Result<Self> {
        let store: Arc<dyn ContentStore> = match &config.database_url {
            Some(url) => {
                let pool = db::create_pool(url, config.database_max_connections)
                    .await
                    .context("failed to create database pool")?;
                db::run_migrations(&pool)
                    .await
                    .context("failed to run migrations")?;
                Arc::new(PgContentStore::new(pool))
            }
            None => {
                info!("DATABASE_URL not set, content is kept in memory");
                Arc::new(MemoryContentStore::new())
            }
        };

        let policy = AccessPolicy::load(&config.access_policy_path)
            .await
            .context("failed to load access policy")?;

        Ok(Self::with_store(
            store,
            PermissionService::new(&policy),
            &config.default_text_format,
        ))
    }

    /// Assemble state around an existing store.
    pub fn with_store(
        store: Arc<dyn ContentStore>,
        permissions: PermissionService,
        default_text_format: &str,
    ) -> Self {
        let authorizer = Arc::new(PermissionAuthorizer);

        let nodes = ContentResource::new(
            &NODE_PROFILE,
            store.clone(),
            authorizer.clone(),
            Arc::new(TracingFailureLog::new("content.node")),
            default_text_format,
        );
        let blogs = ContentResource::new(
            &BLOG_PROFILE,
            store.clone(),
            authorizer,
            Arc::new(TracingFailureLog::new("content.blog")),
            default_text_format,
        );

        info!(
            store = store.backend(),
            accounts = permissions.account_count(),
            "application state ready"
        );

        Self {
            inner: Arc::new(AppStateInner {
                store,
                permissions,
                nodes,
                blogs,
            }),
        }
    }

    /// Get the content store.
    pub fn store(&self) -> &Arc<dyn ContentStore> {
        &self.inner.store
    }

    /// Get the permission service.
    pub fn permissions(&self) -> &PermissionService {
        &self.inner.permissions
    }

    /// Get the node resource.
    pub fn nodes(&self) -> &ContentResource {
        &self.inner.nodes
    }

    /// Get the blog resource.
    pub fn blogs(&self) -> &ContentResource {
        &self.inner.blogs
    }

    /// Check if the content store is reachable.
    pub async fn store_healthy(&self) -> bool {
        self.inner.store.is_healthy().await
    }
}
