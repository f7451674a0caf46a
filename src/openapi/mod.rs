use axum::{response::IntoResponse, Json};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Coffee Shop API",
        version = "0.1.0",
        description = r#"
# Coffee Shop Orders API

Order intake and administration for the coffee storefront.

- `/api/orders` serves list, create, update and delete, selected by HTTP method.
  Update and delete take the order id in the JSON body.
- `/api/menu` exposes the coffee catalog and a one-click order per menu item.

Every non-2xx response carries `{error, message, request_id, timestamp}`.
        "#,
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development")
    ),
    tags(
        (name = "orders", description = "Order management endpoints"),
        (name = "menu", description = "Coffee catalog endpoints"),
        (name = "health", description = "Health check endpoints")
    ),
    paths(
        crate::handlers::orders::list_orders,
        crate::handlers::orders::create_order,
        crate::handlers::orders::update_order,
        crate::handlers::orders::delete_order,
        crate::handlers::menu::list_menu,
        crate::handlers::menu::get_menu_item,
        crate::handlers::menu::quick_order,
        crate::health::simple_health_check,
        crate::health::readiness_check,
    ),
    components(
        schemas(
            crate::entities::order::Model,
            crate::entities::LineItem,
            crate::entities::LineItems,
            crate::entities::OrderChanges,
            crate::handlers::orders::CreateOrderRequest,
            crate::handlers::orders::UpdateOrderRequest,
            crate::handlers::orders::DeleteOrderRequest,
            crate::handlers::orders::OrderCreatedResponse,
            crate::handlers::orders::OrderUpdatedResponse,
            crate::handlers::orders::OrderDeletedResponse,
            crate::handlers::menu::QuickOrderRequest,
            crate::menu::MenuItem,
            crate::health::HealthInfo,
            crate::errors::ErrorResponse
        )
    )
)]
pub struct ApiDoc;

/// Serves the generated OpenAPI document
pub async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}
