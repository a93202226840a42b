//! Actor resolution middleware.
//!
//! Checks for `Authorization: Bearer <token>` headers and places the
//! resolved [`Actor`] in request extensions.

use axum::{
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::error::AppError;
use crate::state::AppState;

/// Middleware that resolves the request's actor.
///
/// - No `Authorization` header -> anonymous actor
/// - Bearer token held by an account -> that account's actor
/// - Any other credentials -> 401 JSON error
pub async fn resolve_actor(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .map(|v| v.to_str().unwrap_or_default());

    let actor = match auth_header {
        None => state.permissions().anonymous(),
        Some(value) => {
            let Some(token) = value.strip_prefix("Bearer ").map(str::trim) else {
                debug!("unsupported authorization scheme");
                return AppError::Unauthorized.into_response();
            };
            match state.permissions().authenticate(token) {
                Some(actor) => actor,
                None => {
                    debug!("unknown bearer token");
                    return AppError::Unauthorized.into_response();
                }
            }
        }
    };

    request.extensions_mut().insert(actor);
    next.run(request).await
}
