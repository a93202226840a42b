//! Content CRUD route handlers.
//!
//! One router per [`ContentResource`]; the node and blog APIs differ only
//! in the base path and the resource's profile.

use axum::{
    Extension, Json, Router,
    body::Bytes,
    extract::{
        Path, Query, State,
        rejection::{PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use serde_json::json;

use crate::actor::Actor;
use crate::content::{ContentResource, ListQuery, Payload, UpdateOutcome};
use crate::error::{AppError, AppResult};
use crate::models::ContentItem;

/// Listing response.
#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub message: &'static str,
    pub items: Vec<ContentItem>,
}

/// Create the router for one resource mounted at `base`.
pub fn router<S>(base: &str, resource: ContentResource) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route(base, get(list_items).post(create_item))
        .route(
            &format!("{base}/{{id}}"),
            get(get_item).patch(update_item).delete(delete_item),
        )
        .with_state(resource)
}

fn item_id(path: Result<Path<i64>, PathRejection>) -> AppResult<i64> {
    match path {
        Ok(Path(id)) => Ok(id),
        Err(_) => Err(AppError::BadRequest("Invalid id".to_string())),
    }
}

/// GET {base}
async fn list_items(
    State(resource): State<ContentResource>,
    Extension(actor): Extension<Actor>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> AppResult<Json<ListResponse>> {
    let Ok(Query(query)) = query else {
        return Err(AppError::BadRequest("Invalid query parameters".to_string()));
    };

    let items = resource.list(&actor, &query).await?;

    Ok(Json(ListResponse {
        message: resource.profile().list_message,
        items,
    }))
}

/// POST {base}
async fn create_item(
    State(resource): State<ContentResource>,
    Extension(actor): Extension<Actor>,
    body: Bytes,
) -> AppResult<(StatusCode, Json<ContentItem>)> {
    let item = resource.create(&Payload::from_slice(&body), &actor).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// GET {base}/{id}
async fn get_item(
    State(resource): State<ContentResource>,
    Extension(actor): Extension<Actor>,
    path: Result<Path<i64>, PathRejection>,
) -> AppResult<Json<ContentItem>> {
    let id = item_id(path)?;
    Ok(Json(resource.get(id, &actor).await?))
}

/// PATCH {base}/{id}
async fn update_item(
    State(resource): State<ContentResource>,
    Extension(actor): Extension<Actor>,
    path: Result<Path<i64>, PathRejection>,
    body: Bytes,
) -> AppResult<Response> {
    let id = item_id(path)?;

    let response = match resource
        .update(id, &Payload::from_slice(&body), &actor)
        .await?
    {
        UpdateOutcome::Updated(item) => Json(item).into_response(),
        UpdateOutcome::NoChange => Json(json!({ "message": "No changes specified" })).into_response(),
    };
    Ok(response)
}

/// DELETE {base}/{id}
async fn delete_item(
    State(resource): State<ContentResource>,
    Extension(actor): Extension<Actor>,
    path: Result<Path<i64>, PathRejection>,
) -> AppResult<StatusCode> {
    let id = item_id(path)?;
    resource.delete(id, &actor).await?;
    Ok(StatusCode::NO_CONTENT)
}
