//! HTTP client for the orders API, used by the `orders-cli` admin tool.

use crate::entities::{OrderChanges, OrderModel};
use crate::errors::ErrorResponse;
use crate::handlers::menu::QuickOrderRequest;
use crate::handlers::orders::{
    DeleteOrderRequest, OrderCreatedResponse, OrderDeletedResponse, OrderUpdatedResponse,
    UpdateOrderRequest,
};
use crate::menu::MenuItem;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned {status}: {message}")]
    Api { status: u16, message: String },
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Http(e) => e.status().map(|s| s.as_u16()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct OrdersClient {
    client: Client,
    base_url: String,
}

impl OrdersClient {
    /// Build a client with a default reqwest client and request timeout.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;
        Ok(Self::with_client(base_url, client))
    }

    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!(%method, %url, "Sending request");
        self.client.request(method, url)
    }

    async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.request(method, path).json(body).send().await?;
        decode(response).await
    }

    pub async fn list_menu(&self) -> Result<Vec<MenuItem>, ClientError> {
        let response = self.request(Method::GET, "/api/menu").send().await?;
        decode(response).await
    }

    pub async fn list_orders(&self) -> Result<Vec<OrderModel>, ClientError> {
        let response = self.request(Method::GET, "/api/orders").send().await?;
        decode(response).await
    }

    /// Order one unit of a menu item for the given customer.
    pub async fn quick_order(
        &self,
        menu_id: &str,
        name: &str,
        address: &str,
    ) -> Result<OrderModel, ClientError> {
        let body = QuickOrderRequest {
            name: Some(name.to_string()),
            address: Some(address.to_string()),
        };
        let created: OrderCreatedResponse = self
            .send_json(Method::POST, &format!("/api/menu/{menu_id}/order"), &body)
            .await?;
        Ok(created.order)
    }

    pub async fn update_order(
        &self,
        id: &str,
        changes: OrderChanges,
    ) -> Result<OrderModel, ClientError> {
        let body = UpdateOrderRequest {
            id: Some(id.into()),
            updates: Some(changes),
        };
        let updated: OrderUpdatedResponse =
            self.send_json(Method::PUT, "/api/orders", &body).await?;
        Ok(updated.updated_order)
    }

    pub async fn delete_order(&self, id: &str) -> Result<OrderModel, ClientError> {
        let body = DeleteOrderRequest {
            id: Some(id.into()),
        };
        let deleted: OrderDeletedResponse =
            self.send_json(Method::DELETE, "/api/orders", &body).await?;
        Ok(deleted.deleted_order)
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }

    let text = response.text().await?;
    let message = serde_json::from_str::<ErrorResponse>(&text)
        .map(|body| body.message)
        .unwrap_or_else(|_| text.trim().to_string());

    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = OrdersClient::new("http://localhost:9000/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:9000");
    }

    #[test]
    fn api_errors_expose_status() {
        let err = ClientError::Api {
            status: 404,
            message: "Order not found.".into(),
        };
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.to_string(), "server returned 404: Order not found.");
    }
}
