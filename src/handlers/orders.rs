use crate::{
    entities::{LineItem, NewOrder, OrderChanges, OrderModel},
    errors::{ErrorResponse, ServiceError},
    handlers::common::{
        created_response, non_empty, parse_json_body, submitted_id, success_response,
    },
    AppState,
};
use axum::{
    body::Bytes,
    extract::State,
    http::Method,
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;
use utoipa::ToSchema;

pub const ORDER_SAVED: &str = "Order saved successfully!";
pub const ORDER_UPDATED: &str = "Order updated successfully!";
pub const ORDER_DELETED: &str = "Order deleted successfully!";

/// Body of `POST /api/orders`.
///
/// Every field is optional at the wire level so that absence can be reported
/// as a missing field instead of a malformed body.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    #[schema(example = "Alice")]
    pub name: Option<String>,
    #[schema(example = "1 Main St")]
    pub address: Option<String>,
    pub items: Option<Vec<LineItem>>,
    #[schema(value_type = Option<f64>, example = 4.0)]
    pub total_price: Option<SubmittedTotal>,
}

/// `totalPrice` as it arrived: a JSON number, or the text the admin form posts.
///
/// Only the number `0` and the empty string are falsy; the text `"0"` is a
/// real total.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum SubmittedTotal {
    Number(serde_json::Number),
    Text(String),
}

impl SubmittedTotal {
    fn into_decimal(self) -> Result<Option<Decimal>, ServiceError> {
        match self {
            Self::Number(n) => {
                let total = <Decimal as Deserialize>::deserialize(Value::Number(n))
                    .map_err(|e| ServiceError::MalformedBody(e.to_string()))?;
                Ok(Some(total).filter(|t| !t.is_zero()))
            }
            Self::Text(text) if text.is_empty() => Ok(None),
            Self::Text(text) => text
                .trim()
                .parse::<Decimal>()
                .map(Some)
                .map_err(|e| ServiceError::MalformedBody(format!("totalPrice `{text}`: {e}"))),
        }
    }
}

impl CreateOrderRequest {
    /// Rejects absent or falsy fields: blank strings, an empty item list, a numeric zero total.
    pub fn into_new_order(self) -> Result<NewOrder, ServiceError> {
        let name = non_empty(self.name).ok_or(ServiceError::MissingFields)?;
        let address = non_empty(self.address).ok_or(ServiceError::MissingFields)?;
        let items = self
            .items
            .filter(|items| !items.is_empty())
            .ok_or(ServiceError::MissingFields)?;
        let total_price = match self.total_price {
            Some(total) => total.into_decimal()?,
            None => None,
        }
        .ok_or(ServiceError::MissingFields)?;

        Ok(NewOrder {
            name,
            address,
            items,
            total_price,
        })
    }
}

/// Body of `PUT /api/orders`
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct UpdateOrderRequest {
    #[schema(value_type = Option<String>)]
    pub id: Option<Value>,
    pub updates: Option<OrderChanges>,
}

/// Body of `DELETE /api/orders`
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct DeleteOrderRequest {
    #[schema(value_type = Option<String>)]
    pub id: Option<Value>,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct OrderCreatedResponse {
    #[schema(example = "Order saved successfully!")]
    pub message: String,
    pub order: OrderModel,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderUpdatedResponse {
    #[schema(example = "Order updated successfully!")]
    pub message: String,
    pub updated_order: OrderModel,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderDeletedResponse {
    #[schema(example = "Order deleted successfully!")]
    pub message: String,
    pub deleted_order: OrderModel,
}

/// List every order
#[utoipa::path(
    get,
    path = "/api/orders",
    summary = "List orders",
    description = "Return every stored order, unfiltered and unpaginated",
    responses(
        (status = 200, description = "All orders", body = [OrderModel],
            headers(("X-Request-Id" = String, description = "Unique request id"))
        ),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "orders"
)]
pub async fn list_orders(State(state): State<AppState>) -> Result<Response, ServiceError> {
    let orders = state.orders.list_all().await?;
    Ok(success_response(orders))
}

/// Create an order
#[utoipa::path(
    post,
    path = "/api/orders",
    summary = "Create order",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created", body = OrderCreatedResponse),
        (status = 400, description = "Missing required fields or malformed body", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "orders"
)]
pub async fn create_order(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, ServiceError> {
    let request: CreateOrderRequest = parse_json_body(&body)?;
    let new_order = request.into_new_order()?;

    let order = state.orders.create(new_order).await?;
    info!(order_id = %order.id, "Order created");

    Ok(created_response(OrderCreatedResponse {
        message: ORDER_SAVED.to_string(),
        order,
    }))
}

/// Partially update an order
#[utoipa::path(
    put,
    path = "/api/orders",
    summary = "Update order",
    description = "Apply `updates` to the order with `id`; only name, address, items and totalPrice are honored",
    request_body = UpdateOrderRequest,
    responses(
        (status = 200, description = "Order updated", body = OrderUpdatedResponse),
        (status = 400, description = "Missing required fields or malformed body", body = ErrorResponse),
        (status = 404, description = "Order not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "orders"
)]
pub async fn update_order(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, ServiceError> {
    let request: UpdateOrderRequest = parse_json_body(&body)?;
    let id = submitted_id(request.id).ok_or(ServiceError::MissingFields)?;
    let updates = request.updates.ok_or(ServiceError::MissingFields)?;

    let updated_order = state
        .orders
        .update(&id, updates)
        .await?
        .ok_or_else(ServiceError::order_not_found)?;
    info!(order_id = %updated_order.id, "Order updated");

    Ok(success_response(OrderUpdatedResponse {
        message: ORDER_UPDATED.to_string(),
        updated_order,
    }))
}

/// Delete an order
#[utoipa::path(
    delete,
    path = "/api/orders",
    summary = "Delete order",
    request_body = DeleteOrderRequest,
    responses(
        (status = 200, description = "Order deleted", body = OrderDeletedResponse),
        (status = 400, description = "Order ID is required", body = ErrorResponse),
        (status = 404, description = "Order not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "orders"
)]
pub async fn delete_order(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, ServiceError> {
    let request: DeleteOrderRequest = parse_json_body(&body)?;
    let id = submitted_id(request.id).ok_or(ServiceError::MissingOrderId)?;

    let deleted_order = state
        .orders
        .delete(&id)
        .await?
        .ok_or_else(ServiceError::order_not_found)?;
    info!(order_id = %deleted_order.id, "Order deleted");

    Ok(success_response(OrderDeletedResponse {
        message: ORDER_DELETED.to_string(),
        deleted_order,
    }))
}

/// Any verb the orders endpoint does not serve
pub async fn method_not_allowed(method: Method) -> impl IntoResponse {
    ServiceError::MethodNotAllowed(method)
}
