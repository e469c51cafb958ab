use crate::AppState;
use crate::config::QhatuConfig;
use crate::database::CatalogRepository;
use crate::domain::ProductDraft;
use crate::features::categories::categories_router;
use crate::features::products::products_router;
use crate::features::tags::tags_router;
use crate::services::tag_sync::TagSyncService;
use crate::tests::integration_tag_sync_service::MockCatalogRepository;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use std::sync::Arc;
use tower::ServiceExt;

// helper to prepare API state backed by the mock repository
fn setup_api_test_state() -> (MockCatalogRepository, AppState) {
    let mock = MockCatalogRepository::new();
    let repo: Arc<dyn CatalogRepository> = Arc::new(mock.clone());

    let config = Arc::new(QhatuConfig {
        database_url: "".into(),
        max_connections: 1,
        bind_addr: "".into(),
    });

    let state = AppState {
        repo: repo.clone(),
        tag_sync: Arc::new(TagSyncService::new(repo)),
        config,
    };

    (mock, state)
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

// list categories and check the nested minimal product projection
#[tokio::test]
async fn test_list_categories_with_nested_products() {
    let (mock, state) = setup_api_test_state();

    let category = mock.create_category("Shoes").await.unwrap();
    mock.create_product(&ProductDraft {
        product_name: "Runners".into(),
        price: 90.0,
        stock: 4,
        category_id: Some(category.id),
    })
    .await
    .unwrap();

    let app = categories_router().with_state(state);
    let response = app.oneshot(get_request("/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;

    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["category_name"], "Shoes");
    // the nested projection renames id to product_id
    assert_eq!(json[0]["products"][0]["product_name"], "Runners");
    assert!(json[0]["products"][0]["product_id"].is_i64());
    assert!(json[0]["products"][0].get("price").is_none());
}

// ensure the API correctly returns 404 for rows that don't exist
#[tokio::test]
async fn test_get_category_not_found() {
    let (_mock, state) = setup_api_test_state();
    let app = categories_router().with_state(state);

    let response = app.oneshot(get_request("/999")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = response_json(response).await;
    assert_eq!(json["kind"], "not_found");
}

#[tokio::test]
async fn test_create_category() {
    let (_mock, state) = setup_api_test_state();
    let app = categories_router().with_state(state);

    let response = app
        .oneshot(json_request(
            "POST",
            "/",
            serde_json::json!({ "category_name": "Hats" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["category_name"], "Hats");
    assert!(json["id"].is_i64());
}

#[tokio::test]
async fn test_update_category_returns_confirmation() {
    let (mock, state) = setup_api_test_state();
    let category = mock.create_category("Hats").await.unwrap();

    let app = categories_router().with_state(state);
    let response = app
        .oneshot(json_request(
            "PUT",
            &format!("/{}", category.id),
            serde_json::json!({ "category_name": "Caps" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert!(json.as_str().unwrap().contains("Caps"));

    let updated = mock.get_category_by_id(category.id).await.unwrap().unwrap();
    assert_eq!(updated.category_name, "Caps");
}

#[tokio::test]
async fn test_delete_missing_category_is_404() {
    let (_mock, state) = setup_api_test_state();
    let app = categories_router().with_state(state);

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/42")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// deleting a category must not touch the products it owned
#[tokio::test]
async fn test_delete_category_orphans_products() {
    let (mock, state) = setup_api_test_state();

    let category = mock.create_category("Shoes").await.unwrap();
    let product = mock
        .create_product(&ProductDraft {
            product_name: "Runners".into(),
            price: 90.0,
            stock: 4,
            category_id: Some(category.id),
        })
        .await
        .unwrap();

    let app = categories_router().with_state(state);
    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/{}", category.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // product row survives with its category_id intact
    let survivor = mock.get_product_by_id(product.id).await.unwrap().unwrap();
    assert_eq!(survivor.category_id, Some(category.id));
}

// product create with tag_ids pairs the new product with each tag
#[tokio::test]
async fn test_create_product_with_tags() {
    let (mock, state) = setup_api_test_state();

    let tag_a = mock.create_tag("summer").await.unwrap();
    let tag_b = mock.create_tag("sale").await.unwrap();

    let app = products_router().with_state(state);
    let response = app
        .oneshot(json_request(
            "POST",
            "/",
            serde_json::json!({
                "product_name": "Basketball",
                "price": 200.0,
                "stock": 3,
                "tag_ids": [tag_a.id, tag_b.id],
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;

    assert_eq!(json["product_name"], "Basketball");
    let tags = json["tags"].as_array().unwrap();
    assert_eq!(tags.len(), 2);
    assert_eq!(tags[0]["tag_name"], "summer");
    assert_eq!(mock.pairing_count(), 2);
}

// omitted tag_ids means zero pairings and no error
#[tokio::test]
async fn test_create_product_without_tags() {
    let (mock, state) = setup_api_test_state();

    let app = products_router().with_state(state);
    let response = app
        .oneshot(json_request(
            "POST",
            "/",
            serde_json::json!({ "product_name": "Plain", "price": 5.0 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["stock"], 0);
    assert_eq!(json["tags"].as_array().unwrap().len(), 0);
    assert_eq!(mock.pairing_count(), 0);
}

// negative price is rejected at the boundary, before any storage call
#[tokio::test]
async fn test_create_product_negative_price_is_400() {
    let (mock, state) = setup_api_test_state();

    let app = products_router().with_state(state);
    let response = app
        .oneshot(json_request(
            "POST",
            "/",
            serde_json::json!({ "product_name": "Broken", "price": -1.0 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = response_json(response).await;
    assert_eq!(json["kind"], "bad_request");
    assert!(mock.get_all_products().await.unwrap().is_empty());
}

// product update returns the synchronizer's applied changes
#[tokio::test]
async fn test_update_product_returns_sync_report() {
    let (mock, state) = setup_api_test_state();

    let product = mock
        .create_product(&ProductDraft {
            product_name: "Basketball".into(),
            price: 200.0,
            stock: 3,
            category_id: None,
        })
        .await
        .unwrap();
    mock.seed_pairing(product.id, 1);
    mock.seed_pairing(product.id, 2);

    let app = products_router().with_state(state);
    let response = app
        .oneshot(json_request(
            "PUT",
            &format!("/{}", product.id),
            serde_json::json!({
                "product_name": "Basketball",
                "price": 180.0,
                "stock": 3,
                "tag_ids": [2, 3],
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;

    assert_eq!(json["deleted_pairing_ids"].as_array().unwrap().len(), 1);
    let created = json["created_pairings"].as_array().unwrap();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0]["tag_id"], 3);

    let updated = mock.get_product_by_id(product.id).await.unwrap().unwrap();
    assert_eq!(updated.price, 180.0);
}

// update without tag_ids leaves pairings alone and reports nothing
#[tokio::test]
async fn test_update_product_without_tag_ids_keeps_pairings() {
    let (mock, state) = setup_api_test_state();

    let product = mock
        .create_product(&ProductDraft {
            product_name: "Basketball".into(),
            price: 200.0,
            stock: 3,
            category_id: None,
        })
        .await
        .unwrap();
    mock.seed_pairing(product.id, 1);

    let app = products_router().with_state(state);
    let response = app
        .oneshot(json_request(
            "PUT",
            &format!("/{}", product.id),
            serde_json::json!({ "product_name": "Basketball", "price": 150.0, "stock": 3 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["deleted_pairing_ids"].as_array().unwrap().len(), 0);
    assert_eq!(json["created_pairings"].as_array().unwrap().len(), 0);
    assert_eq!(mock.pairing_count(), 1);
}

// a partial reconciliation failure surfaces with its own error kind
#[tokio::test]
async fn test_update_product_partial_sync_is_distinct_error() {
    let (mock, state) = setup_api_test_state();

    let product = mock
        .create_product(&ProductDraft {
            product_name: "Basketball".into(),
            price: 200.0,
            stock: 3,
            category_id: None,
        })
        .await
        .unwrap();
    mock.seed_pairing(product.id, 1);
    *mock.fail_create_pairings.lock().unwrap() = true;

    let app = products_router().with_state(state);
    let response = app
        .oneshot(json_request(
            "PUT",
            &format!("/{}", product.id),
            serde_json::json!({
                "product_name": "Basketball",
                "price": 200.0,
                "stock": 3,
                "tag_ids": [2],
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = response_json(response).await;
    assert_eq!(json["kind"], "partial_reconciliation");
}

// tags list includes the products wearing each tag
#[tokio::test]
async fn test_list_tags_with_nested_products() {
    let (mock, state) = setup_api_test_state();

    let tag = mock.create_tag("summer").await.unwrap();
    let product = mock
        .create_product(&ProductDraft {
            product_name: "Sandals".into(),
            price: 30.0,
            stock: 10,
            category_id: None,
        })
        .await
        .unwrap();
    mock.seed_pairing(product.id, tag.id);

    let app = tags_router().with_state(state);
    let response = app.oneshot(get_request("/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;

    assert_eq!(json[0]["tag_name"], "summer");
    assert_eq!(json[0]["products"][0]["product_name"], "Sandals");
    assert_eq!(json[0]["products"][0]["product_id"], product.id);
}

#[tokio::test]
async fn test_delete_tag_returns_confirmation() {
    let (mock, state) = setup_api_test_state();
    let tag = mock.create_tag("clearance").await.unwrap();

    let app = tags_router().with_state(state);
    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/{}", tag.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(mock.get_tag_by_id(tag.id).await.unwrap().is_none());
}
