pub mod model;

use crate::AppState;
use crate::domain::Tag;
use crate::error::ApiError;
use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use model::{TagPayload, TagResponse};

pub fn tags_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_tags_handler).post(create_tag_handler))
        .route(
            "/{id}",
            get(get_tag_handler)
                .put(update_tag_handler)
                .delete(delete_tag_handler),
        )
}

async fn list_tags_handler(State(state): State<AppState>) -> Result<Json<Vec<TagResponse>>, ApiError> {
    let tags = state.repo.get_all_tags().await?;

    let mut responses = Vec::with_capacity(tags.len());
    for tag in tags {
        let products = state.repo.get_products_for_tag(tag.id).await?;
        responses.push(TagResponse::new(tag, products));
    }

    Ok(Json(responses))
}

async fn get_tag_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<TagResponse>, ApiError> {
    let tag = state
        .repo
        .get_tag_by_id(id)
        .await?
        .ok_or(ApiError::NotFound { entity: "tag", id })?;

    let products = state.repo.get_products_for_tag(id).await?;

    Ok(Json(TagResponse::new(tag, products)))
}

async fn create_tag_handler(
    State(state): State<AppState>,
    Json(payload): Json<TagPayload>,
) -> Result<Json<Tag>, ApiError> {
    if payload.tag_name.trim().is_empty() {
        return Err(ApiError::BadRequest("tag_name must not be empty".to_string()));
    }

    let tag = state.repo.create_tag(&payload.tag_name).await?;

    Ok(Json(tag))
}

async fn update_tag_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<TagPayload>,
) -> Result<Json<String>, ApiError> {
    if payload.tag_name.trim().is_empty() {
        return Err(ApiError::BadRequest("tag_name must not be empty".to_string()));
    }

    let rows_affected = state.repo.update_tag(id, &payload.tag_name).await?;

    if rows_affected == 0 {
        return Err(ApiError::NotFound { entity: "tag", id });
    }

    Ok(Json(format!(
        "The tag at ID {} has been updated to {}.",
        id, payload.tag_name
    )))
}

async fn delete_tag_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<String>, ApiError> {
    // pairings referencing this tag are orphaned, consistent with category deletes
    let rows_affected = state.repo.delete_tag(id).await?;

    if rows_affected == 0 {
        return Err(ApiError::NotFound { entity: "tag", id });
    }

    Ok(Json(format!("The tag with ID {} has been deleted.", id)))
}
