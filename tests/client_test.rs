mod common;

use assert_matches::assert_matches;
use coffee_shop_api::{
    app_router,
    client::{ClientError, OrdersClient},
    entities::OrderChanges,
};
use rust_decimal::Decimal;

use common::TestApp;

/// Serves the test application on an ephemeral port and returns its base URL.
async fn serve(app: &TestApp) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    let router = app_router(app.state.clone());

    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("server error");
    });

    format!("http://{addr}")
}

#[tokio::test]
async fn client_drives_the_order_lifecycle() {
    let app = TestApp::new().await;
    let client = OrdersClient::new(serve(&app).await).unwrap();

    let menu = client.list_menu().await.unwrap();
    assert!(menu.iter().any(|item| item.id == "latte"));

    let order = client
        .quick_order("latte", "Alice", "1 Main St")
        .await
        .unwrap();
    assert_eq!(order.total_price, Decimal::new(4, 0));

    let updated = client
        .update_order(
            &order.id.to_string(),
            OrderChanges {
                total_price: Some(Decimal::new(75, 1)),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.id, order.id);
    assert_eq!(updated.total_price, Decimal::new(75, 1));

    let listed = client.list_orders().await.unwrap();
    assert_eq!(listed.len(), 1);

    let deleted = client.delete_order(&order.id.to_string()).await.unwrap();
    assert_eq!(deleted.id, order.id);
    assert!(client.list_orders().await.unwrap().is_empty());
}

#[tokio::test]
async fn client_surfaces_api_errors() {
    let app = TestApp::new().await;
    let client = OrdersClient::new(serve(&app).await).unwrap();

    let err = client
        .delete_order(&uuid::Uuid::new_v4().to_string())
        .await
        .unwrap_err();
    assert_matches!(
        err,
        ClientError::Api { status: 404, ref message } if message == "Order not found."
    );

    let err = client
        .quick_order("matcha", "Alice", "1 Main St")
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(404));
}
