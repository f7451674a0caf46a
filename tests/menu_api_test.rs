mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::TestApp;

#[tokio::test]
async fn menu_lists_catalog_in_order() {
    let app = TestApp::new().await;

    let (status, body) = app.request_json(Method::GET, "/api/menu", None).await;

    assert_eq!(status, StatusCode::OK);
    let items = body.as_array().expect("menu should be an array");
    assert_eq!(items.len(), 6);
    assert_eq!(items[0]["id"], "espresso");
    assert!(items.iter().all(|item| item["imgUrl"].is_string()));
}

#[tokio::test]
async fn menu_item_lookup() {
    let app = TestApp::new().await;

    let (status, body) = app.request_json(Method::GET, "/api/menu/latte", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Latte");
    assert_eq!(body["price"].as_f64(), Some(4.0));

    let (status, body) = app.request_json(Method::GET, "/api/menu/matcha", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "No coffee found.");
}

#[tokio::test]
async fn quick_order_creates_single_item_order() {
    let app = TestApp::new().await;

    let (status, body) = app
        .request_json(
            Method::POST,
            "/api/menu/cappuccino/order",
            Some(json!({"name": "Alice", "address": "1 Main St"})),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Order saved successfully!");

    let order = &body["order"];
    assert_eq!(order["items"].as_array().map(Vec::len), Some(1));
    assert_eq!(order["items"][0]["name"], "Cappuccino");
    assert_eq!(order["items"][0]["quantity"], 1);
    assert_eq!(order["totalPrice"].as_f64(), Some(4.5));

    let orders = app.list_orders().await;
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0]["_id"], order["_id"]);
}

#[tokio::test]
async fn quick_order_validation() {
    let app = TestApp::new().await;

    let (status, body) = app
        .request_json(
            Method::POST,
            "/api/menu/cappuccino/order",
            Some(json!({"name": "Alice", "address": ""})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Missing required fields.");

    let (status, body) = app
        .request_json(
            Method::POST,
            "/api/menu/matcha/order",
            Some(json!({"name": "Alice", "address": "1 Main St"})),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "No coffee found.");

    assert!(app.list_orders().await.is_empty());
}

#[tokio::test]
async fn health_endpoints_report_up() {
    let app = TestApp::new().await;

    let (status, body) = app.request_json(Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "up");

    let (status, body) = app.request_json(Method::GET, "/health/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["details"]["database"]["status"], "up");
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app = TestApp::new().await;

    let (status, body) = app
        .request_json(Method::GET, "/api-docs/openapi.json", None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/orders"].is_object());
    assert!(body["paths"]["/api/menu/{id}/order"].is_object());
}
