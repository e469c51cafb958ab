pub mod model;

use crate::AppState;
use crate::domain::Category;
use crate::error::ApiError;
use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use model::{CategoryPayload, CategoryResponse};

pub fn categories_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_categories_handler).post(create_category_handler))
        .route(
            "/{id}",
            get(get_category_handler)
                .put(update_category_handler)
                .delete(delete_category_handler),
        )
}

async fn list_categories_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoryResponse>>, ApiError> {
    let categories = state.repo.get_all_categories().await?;

    let mut responses = Vec::with_capacity(categories.len());
    for category in categories {
        let products = state.repo.get_products_for_category(category.id).await?;
        responses.push(CategoryResponse::new(category, products));
    }

    Ok(Json(responses))
}

async fn get_category_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<CategoryResponse>, ApiError> {
    let category = state
        .repo
        .get_category_by_id(id)
        .await?
        .ok_or(ApiError::NotFound {
            entity: "category",
            id,
        })?;

    let products = state.repo.get_products_for_category(id).await?;

    Ok(Json(CategoryResponse::new(category, products)))
}

async fn create_category_handler(
    State(state): State<AppState>,
    Json(payload): Json<CategoryPayload>,
) -> Result<Json<Category>, ApiError> {
    if payload.category_name.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "category_name must not be empty".to_string(),
        ));
    }

    let category = state.repo.create_category(&payload.category_name).await?;

    Ok(Json(category))
}

async fn update_category_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<CategoryPayload>,
) -> Result<Json<String>, ApiError> {
    if payload.category_name.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "category_name must not be empty".to_string(),
        ));
    }

    let rows_affected = state
        .repo
        .update_category(id, &payload.category_name)
        .await?;

    if rows_affected == 0 {
        return Err(ApiError::NotFound {
            entity: "category",
            id,
        });
    }

    Ok(Json(format!(
        "The category at ID {} has been updated to {}.",
        id, payload.category_name
    )))
}

async fn delete_category_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<String>, ApiError> {
    // owned products are orphaned, never deleted
    let rows_affected = state.repo.delete_category(id).await?;

    if rows_affected == 0 {
        return Err(ApiError::NotFound {
            entity: "category",
            id,
        });
    }

    Ok(Json(format!("The category with ID {} has been deleted.", id)))
}
