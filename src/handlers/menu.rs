use crate::{
    errors::{ErrorResponse, ServiceError},
    handlers::{
        common::{created_response, non_empty, parse_json_body, success_response},
        orders::{OrderCreatedResponse, ORDER_SAVED},
    },
    menu::MenuItem,
    AppState,
};
use axum::{
    body::Bytes,
    extract::{Path, State},
    response::Response,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

/// Body of `POST /api/menu/{id}/order`
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct QuickOrderRequest {
    #[schema(example = "Alice")]
    pub name: Option<String>,
    #[schema(example = "1 Main St")]
    pub address: Option<String>,
}

fn lookup<'a>(state: &'a AppState, id: &str) -> Result<&'a MenuItem, ServiceError> {
    state
        .menu
        .find(id)
        .ok_or_else(|| ServiceError::NotFound("No coffee found.".to_string()))
}

/// List the menu
#[utoipa::path(
    get,
    path = "/api/menu",
    summary = "List menu",
    responses((status = 200, description = "Menu in catalog order", body = [MenuItem])),
    tag = "menu"
)]
pub async fn list_menu(State(state): State<AppState>) -> Response {
    success_response(state.menu.all())
}

/// Fetch a single menu item
#[utoipa::path(
    get,
    path = "/api/menu/{id}",
    summary = "Get menu item",
    params(("id" = String, Path, description = "Menu item id")),
    responses(
        (status = 200, description = "Menu item", body = MenuItem),
        (status = 404, description = "No coffee found", body = ErrorResponse),
    ),
    tag = "menu"
)]
pub async fn get_menu_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ServiceError> {
    Ok(success_response(lookup(&state, &id)?))
}

/// Order one of a menu item
#[utoipa::path(
    post,
    path = "/api/menu/{id}/order",
    summary = "Quick order",
    description = "Create an order for a single unit of the menu item, billed at its menu price",
    params(("id" = String, Path, description = "Menu item id")),
    request_body = QuickOrderRequest,
    responses(
        (status = 201, description = "Order created", body = OrderCreatedResponse),
        (status = 400, description = "Missing required fields or malformed body", body = ErrorResponse),
        (status = 404, description = "No coffee found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "menu"
)]
pub async fn quick_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Response, ServiceError> {
    let item = lookup(&state, &id)?;

    let request: QuickOrderRequest = parse_json_body(&body)?;
    let name = non_empty(request.name).ok_or(ServiceError::MissingFields)?;
    let address = non_empty(request.address).ok_or(ServiceError::MissingFields)?;

    let order = state
        .orders
        .create(item.single_item_order(name, address))
        .await?;
    info!(order_id = %order.id, menu_item = %item.id, "Quick order created");

    Ok(created_response(OrderCreatedResponse {
        message: ORDER_SAVED.to_string(),
        order,
    }))
}
