//! HTTP route handlers.

pub mod content;
pub mod health;

use axum::Router;

use crate::middleware::resolve_actor;
use crate::state::AppState;

/// Base path of the generic content API.
pub const NODE_BASE: &str = "/api/node";

/// Base path of the blog API.
pub const BLOG_BASE: &str = "/api/blogs";

/// Build the application router.
///
/// Actor resolution covers the content APIs only; `/health` ignores
/// credentials. Cross-cutting layers such as tracing and CORS are added by
/// the binary.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(content::router(NODE_BASE, state.nodes().clone()))
        .merge(content::router(BLOG_BASE, state.blogs().clone()))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            resolve_actor,
        ))
        .merge(health::router())
        .with_state(state)
}
