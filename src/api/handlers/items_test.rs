//! Integration tests for Item API endpoints and DTO shapes.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use super::ItemResponse;
use crate::api::{AppState, routes};
use crate::db::{Database, Item, SqliteDatabase};

/// Create a test app with an in-memory database
async fn test_app() -> axum::Router {
    let db = SqliteDatabase::in_memory().await.unwrap();
    db.migrate().await.unwrap();
    routes::create_router(AppState::new(db))
}

/// Helper to parse JSON response body
async fn json_body(response: axum::response::Response) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

/// Helper to POST a JSON payload to /items
async fn post_item(app: &axum::Router, payload: Value) -> axum::response::Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/items")
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&payload).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn get(app: &axum::Router, uri: &str) -> axum::response::Response {
    app.clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

// =============================================================================
// Create
// =============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn create_item_roundtrips_fields() {
    let app = test_app().await;

    let response = post_item(&app, json!({"name": "Widget", "description": "A widget"})).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = json_body(response).await;
    assert_eq!(body["id"], 1);
    assert_eq!(body["name"], "Widget");
    assert_eq!(body["description"], "A widget");
}

#[tokio::test(flavor = "multi_thread")]
async fn create_item_without_description_returns_null() {
    let app = test_app().await;

    let response = post_item(&app, json!({"name": "Widget"})).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = json_body(response).await;
    assert!(body["description"].is_null());

    // The stored row reports the same explicit null.
    let body = json_body(get(&app, "/items/1").await).await;
    assert!(body["description"].is_null());
}

#[tokio::test(flavor = "multi_thread")]
async fn create_item_missing_name_reports_the_field() {
    let app = test_app().await;

    let response = post_item(&app, json!({"description": "nameless"})).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = json_body(response).await;
    assert_eq!(body["fields"][0]["field"], "name");

    // Nothing was persisted.
    let body = json_body(get(&app, "/items").await).await;
    assert!(body.as_array().unwrap().is_empty());
}

// =============================================================================
// List and get
// =============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn list_items_returns_created_items_in_order() {
    let app = test_app().await;

    let response = get(&app, "/items").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(json_body(response).await.as_array().unwrap().is_empty());

    post_item(&app, json!({"name": "Widget"})).await;
    post_item(&app, json!({"name": "Gadget", "description": "x"})).await;

    let body = json_body(get(&app, "/items").await).await;
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["name"], "Widget");
    assert_eq!(items[1]["name"], "Gadget");
}

#[tokio::test(flavor = "multi_thread")]
async fn get_unknown_item_is_404() {
    let app = test_app().await;

    let response = get(&app, "/items/999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = json_body(response).await;
    assert_eq!(body["error"], "Item '999' not found");
}

// =============================================================================
// Update
// =============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn update_item_replaces_fields() {
    let app = test_app().await;
    post_item(&app, json!({"name": "Widget", "description": "old"})).await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/items/1")
                .header("content-type", "application/json")
                .body(Body::from(
                    serde_json::to_vec(&json!({"name": "Gadget", "description": null})).unwrap(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["name"], "Gadget");
    assert!(body["description"].is_null());

    // The replacement is visible on a subsequent read.
    let body = json_body(get(&app, "/items/1").await).await;
    assert_eq!(body["name"], "Gadget");
    assert!(body["description"].is_null());
}

#[tokio::test(flavor = "multi_thread")]
async fn update_missing_name_reports_the_field() {
    let app = test_app().await;
    post_item(&app, json!({"name": "Widget"})).await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/items/1")
                .header("content-type", "application/json")
                .body(Body::from(
                    serde_json::to_vec(&json!({"description": "only"})).unwrap(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = json_body(response).await;
    assert_eq!(body["fields"][0]["field"], "name");
}

#[tokio::test(flavor = "multi_thread")]
async fn update_unknown_item_is_404() {
    let app = test_app().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/items/999")
                .header("content-type", "application/json")
                .body(Body::from(
                    serde_json::to_vec(&json!({"name": "Widget"})).unwrap(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// =============================================================================
// Delete
// =============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn delete_item_then_get_is_404() {
    let app = test_app().await;
    post_item(&app, json!({"name": "Widget"})).await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/items/1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(&app, "/items/1").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_unknown_item_is_404() {
    let app = test_app().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/items/999")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// =============================================================================
// Output shape construction
// =============================================================================

#[test]
fn response_from_entity_serializes_expected_mapping() {
    let response = ItemResponse::from(Item {
        id: 1,
        name: "Widget".to_string(),
        description: None,
    });

    let value = serde_json::to_value(&response).unwrap();
    assert_eq!(value, json!({"id": 1, "name": "Widget", "description": null}));
}

#[test]
fn response_from_mapping_matches_response_from_entity() {
    let mapping = json!({"id": 2, "name": "Gadget", "description": "x"});
    let from_mapping = ItemResponse::from_mapping(mapping.as_object().unwrap()).unwrap();

    let from_entity = ItemResponse::from(Item {
        id: 2,
        name: "Gadget".to_string(),
        description: Some("x".to_string()),
    });

    assert_eq!(from_mapping, from_entity);
}

#[test]
fn response_from_mapping_treats_null_description_as_none() {
    let mapping = json!({"id": 3, "name": "Gizmo", "description": null});
    let response = ItemResponse::from_mapping(mapping.as_object().unwrap()).unwrap();
    assert_eq!(response.description, None);
}

#[test]
fn response_from_mapping_missing_name_reports_the_field() {
    let mapping = json!({"id": 4});
    let errors = ItemResponse::from_mapping(mapping.as_object().unwrap()).unwrap_err();
    assert!(errors.iter().any(|e| e.field == "name"));
}
