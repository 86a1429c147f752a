//! HTTP client for the ordering API.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use super::error::GatewayError;
use super::response;
use crate::models::{MenuItem, OrderStatus};

/// Fixed client-side timeout for every gateway call. One attempt per
/// call, no retry - callers fall back to local state instead.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// One order line as the ordering API expects it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewOrderItem {
    #[serde(rename = "menuid")]
    pub menu_id: u32,
    #[serde(rename = "qty")]
    pub quantity: u32,
}

#[derive(Debug, Serialize)]
struct NewOrderRequest<'a> {
    items: &'a [NewOrderItem],
    #[serde(rename = "totalPrice")]
    total_price: f64,
}

#[derive(Debug, Serialize)]
struct StatusUpdateRequest {
    status: OrderStatus,
}

/// The remote ordering API, seen as a fallible best-effort channel.
///
/// `create_order` and `fetch_order` return the raw response body;
/// identifier and payload extraction stay with the caller because the
/// response shapes vary by endpoint and backend version.
#[async_trait]
pub trait OrderGateway {
    async fn fetch_menu(&self) -> Result<Vec<MenuItem>, GatewayError>;

    async fn fetch_menu_item(&self, menu_id: u32) -> Result<MenuItem, GatewayError>;

    async fn create_order(
        &self,
        items: &[NewOrderItem],
        total_price: f64,
    ) -> Result<Value, GatewayError>;

    async fn fetch_order(&self, order_id: &str) -> Result<Value, GatewayError>;

    async fn update_order_status(
        &self,
        order_id: &str,
        status: OrderStatus,
    ) -> Result<(), GatewayError>;
}

/// reqwest-backed gateway against a configured API base URL.
#[derive(Debug, Clone)]
pub struct HttpOrderGateway {
    base_url: String,
    client: reqwest::Client,
}

impl HttpOrderGateway {
    /// Creates a gateway for the given base URL
    /// (e.g. `http://localhost:7777/api`).
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            base_url: base_url.into(),
            client,
        }
    }

    /// Returns the configured base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds a full URL for a given path.
    fn build_url(&self, path: &str) -> String {
        let base = if !self.base_url.starts_with("http://")
            && !self.base_url.starts_with("https://")
        {
            format!("http://{}", self.base_url)
        } else {
            self.base_url.clone()
        };

        format!("{}{}", base.trim_end_matches('/'), path)
    }

    async fn get_json(&self, path: &str) -> Result<Value, GatewayError> {
        let response = self
            .client
            .get(self.build_url(path))
            .send()
            .await
            .map_err(|e| GatewayError::Http(e.to_string()))?;
        Self::json_body(response).await
    }

    async fn json_body(response: reqwest::Response) -> Result<Value, GatewayError> {
        if !response.status().is_success() {
            return Err(GatewayError::BadStatus(response.status().as_u16()));
        }
        response
            .json()
            .await
            .map_err(|e| GatewayError::Decode(e.to_string()))
    }
}

#[async_trait]
impl OrderGateway for HttpOrderGateway {
    async fn fetch_menu(&self) -> Result<Vec<MenuItem>, GatewayError> {
        let body = self.get_json("/menu").await?;
        Ok(response::extract_menu_items(&body))
    }

    async fn fetch_menu_item(&self, menu_id: u32) -> Result<MenuItem, GatewayError> {
        let body = self.get_json(&format!("/menu/{}", menu_id)).await?;
        response::extract_menu_item(&body).ok_or_else(|| {
            GatewayError::Decode(format!("no readable menu item for id {}", menu_id))
        })
    }

    async fn create_order(
        &self,
        items: &[NewOrderItem],
        total_price: f64,
    ) -> Result<Value, GatewayError> {
        let request = NewOrderRequest { items, total_price };
        let response = self
            .client
            .post(self.build_url("/order"))
            .json(&request)
            .send()
            .await
            .map_err(|e| GatewayError::Http(e.to_string()))?;
        Self::json_body(response).await
    }

    async fn fetch_order(&self, order_id: &str) -> Result<Value, GatewayError> {
        self.get_json(&format!("/order/{}", order_id)).await
    }

    async fn update_order_status(
        &self,
        order_id: &str,
        status: OrderStatus,
    ) -> Result<(), GatewayError> {
        let response = self
            .client
            .patch(self.build_url(&format!("/order/{}", order_id)))
            .json(&StatusUpdateRequest { status })
            .send()
            .await
            .map_err(|e| GatewayError::Http(e.to_string()))?;

        if !response.status().is_success() {
            return Err(GatewayError::BadStatus(response.status().as_u16()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url() {
        let gateway = HttpOrderGateway::new("http://localhost:7777/api");
        assert_eq!(gateway.build_url("/menu"), "http://localhost:7777/api/menu");

        let gateway = HttpOrderGateway::new("http://localhost:7777/api/");
        assert_eq!(gateway.build_url("/menu"), "http://localhost:7777/api/menu");

        let gateway = HttpOrderGateway::new("https://cafe.example.com/api");
        assert_eq!(
            gateway.build_url("/order/SC-1"),
            "https://cafe.example.com/api/order/SC-1"
        );

        let gateway = HttpOrderGateway::new("localhost:7777/api");
        assert_eq!(gateway.build_url("/menu"), "http://localhost:7777/api/menu");
    }

    #[test]
    fn test_new_order_request_wire_names() {
        let items = vec![
            NewOrderItem {
                menu_id: 1,
                quantity: 2,
            },
            NewOrderItem {
                menu_id: 5,
                quantity: 1,
            },
        ];
        let request = NewOrderRequest {
            items: &items,
            total_price: 135.0,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["items"][0]["menuid"], 1);
        assert_eq!(json["items"][0]["qty"], 2);
        assert_eq!(json["totalPrice"], 135.0);
    }

    #[test]
    fn test_status_update_request_body() {
        let json = serde_json::to_value(StatusUpdateRequest {
            status: OrderStatus::Ready,
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({ "status": "ready" }));
    }

    #[test]
    fn test_base_url_accessor() {
        let gateway = HttpOrderGateway::new("http://localhost:7777/api");
        assert_eq!(gateway.base_url(), "http://localhost:7777/api");
    }
}
