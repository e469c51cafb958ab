pub mod model;

use crate::AppState;
use crate::domain::Product;
use crate::error::ApiError;
use crate::services::tag_sync::TagSyncReport;
use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use model::{ProductPayload, ProductResponse};

pub fn products_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products_handler).post(create_product_handler))
        .route(
            "/{id}",
            get(get_product_handler)
                .put(update_product_handler)
                .delete(delete_product_handler),
        )
}

async fn list_products_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProductResponse>>, ApiError> {
    let products = state.repo.get_all_products().await?;

    let mut responses = Vec::with_capacity(products.len());
    for product in products {
        responses.push(build_product_response(&state, product).await?);
    }

    Ok(Json(responses))
}

async fn get_product_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ProductResponse>, ApiError> {
    let product = state
        .repo
        .get_product_by_id(id)
        .await?
        .ok_or(ApiError::NotFound {
            entity: "product",
            id,
        })?;

    Ok(Json(build_product_response(&state, product).await?))
}

async fn create_product_handler(
    State(state): State<AppState>,
    Json(payload): Json<ProductPayload>,
) -> Result<Json<ProductResponse>, ApiError> {
    let draft = payload.to_draft()?;
    let product = state.repo.create_product(&draft).await?;

    // a brand new product has no pairings, so syncing degenerates to a bulk
    // create of one row per requested tag
    if let Some(tag_ids) = &payload.tag_ids {
        if !tag_ids.is_empty() {
            state.tag_sync.sync_product_tags(product.id, tag_ids).await?;
        }
    }

    Ok(Json(build_product_response(&state, product).await?))
}

async fn update_product_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<ProductPayload>,
) -> Result<Json<TagSyncReport>, ApiError> {
    let draft = payload.to_draft()?;

    let rows_affected = state.repo.update_product(id, &draft).await?;
    if rows_affected == 0 {
        return Err(ApiError::NotFound {
            entity: "product",
            id,
        });
    }

    // no tag_ids in the body means "leave the pairings alone"
    let report = match &payload.tag_ids {
        Some(tag_ids) => state.tag_sync.sync_product_tags(id, tag_ids).await?,
        None => TagSyncReport::default(),
    };

    Ok(Json(report))
}

async fn delete_product_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<String>, ApiError> {
    let rows_affected = state.repo.delete_product(id).await?;

    if rows_affected == 0 {
        return Err(ApiError::NotFound {
            entity: "product",
            id,
        });
    }

    Ok(Json(format!("The product with ID {} has been deleted.", id)))
}

// attach the category and tag projections a bare product row is missing
async fn build_product_response(
    state: &AppState,
    product: Product,
) -> Result<ProductResponse, ApiError> {
    let category = match product.category_id {
        Some(category_id) => state
            .repo
            .get_category_by_id(category_id)
            .await?
            .map(Into::into),
        // either never categorized, or orphaned by a category delete
        None => None,
    };

    let tags = state
        .repo
        .get_tags_for_product(product.id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(ProductResponse {
        id: product.id,
        product_name: product.product_name,
        price: product.price,
        stock: product.stock,
        category_id: product.category_id,
        category,
        tags,
    })
}
