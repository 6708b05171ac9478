//! Ordering API REST client
//!
//! HTTP client for the Menu Catalog and Order Submission endpoints.

use super::dto::{ItemLookupBody, OrderReceipt, OrderResponseBody};
use super::error::{TransportError, TransportResult};
use super::{MenuSource, OrderGateway};
use crate::cart::OrderSubmission;
use crate::config::ApiConfig;
use crate::menu::{Menu, MenuItem};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use std::time::Duration;

/// Header carrying a per-request correlation id
pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// Shown when a failed menu request carries no readable reason
const FALLBACK_MENU_MESSAGE: &str = "The menu could not be loaded, please try again";

/// REST client for the ordering API
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for `base_url` (e.g. "http://localhost:8000")
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> TransportResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self { client, base_url })
    }

    /// Create a client from the `[api]` config section
    pub fn from_config(config: &ApiConfig) -> TransportResult<Self> {
        Self::new(
            config.base_url.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch a single item, `None` if the catalog does not know the id
    pub async fn fetch_item(&self, id: &str) -> TransportResult<Option<MenuItem>> {
        let url = format!(
            "{}/api/menu/item/{}",
            self.base_url,
            urlencoding::encode(id)
        );

        let response = self.send(self.client.get(&url)).await?;
        let response = Self::ensure_success(response).await?;
        let body: ItemLookupBody = Self::decode(response).await?;

        Ok(match body {
            ItemLookupBody::Found(item) => Some(item),
            ItemLookupBody::Missing { .. } => None,
        })
    }

    /// Attach a request id and send
    async fn send(&self, request: RequestBuilder) -> TransportResult<Response> {
        let request_id = uuid::Uuid::new_v4().to_string();

        let response = request
            .header(REQUEST_ID_HEADER, &request_id)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(request_id = %request_id, error = %e, "Request failed");
                TransportError::classify(e)
            })?;

        tracing::debug!(
            request_id = %request_id,
            status = response.status().as_u16(),
            url = %response.url(),
            "Response received"
        );
        Ok(response)
    }

    async fn ensure_success(response: Response) -> TransportResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let bytes = response.bytes().await.map_err(TransportError::classify)?;
        Err(Self::rejection(status, &bytes, FALLBACK_MENU_MESSAGE))
    }

    /// Build `Rejected` from an error body: `detail`/`message` if it has one,
    /// else the raw text, else `fallback`
    fn rejection(status: StatusCode, bytes: &[u8], fallback: &str) -> TransportError {
        let message = serde_json::from_slice::<OrderResponseBody>(bytes)
            .ok()
            .and_then(|body| body.reason())
            .or_else(|| {
                let text = String::from_utf8_lossy(bytes).trim().to_string();
                (!text.is_empty()).then_some(text)
            })
            .unwrap_or_else(|| fallback.to_string());

        tracing::warn!(status = status.as_u16(), message = %message, "Request rejected");
        TransportError::Rejected {
            status: status.as_u16(),
            message,
        }
    }

    async fn decode<T: serde::de::DeserializeOwned>(response: Response) -> TransportResult<T> {
        let bytes = response.bytes().await.map_err(TransportError::classify)?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl MenuSource for ApiClient {
    async fn fetch_menu(&self) -> TransportResult<Menu> {
        let url = format!("{}/api/menu/", self.base_url);

        let response = self.send(self.client.get(&url)).await?;
        let response = Self::ensure_success(response).await?;
        let menu: Menu = Self::decode(response).await?;

        tracing::info!(items = menu.len(), "Menu loaded");
        Ok(menu)
    }
}

#[async_trait]
impl OrderGateway for ApiClient {
    async fn submit_order(&self, order: &OrderSubmission) -> TransportResult<OrderReceipt> {
        let url = format!("{}/api/orders/", self.base_url);

        tracing::info!(
            lines = order.items().len(),
            total = order.total_amount(),
            pickup = %order.pickup_method(),
            "Submitting order"
        );

        let response = self.send(self.client.post(&url).json(order)).await?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(TransportError::classify)?;

        let body: OrderResponseBody = match serde_json::from_slice(&bytes) {
            Ok(body) => body,
            Err(e) if status.is_success() => return Err(e.into()),
            Err(_) => {
                return Err(Self::rejection(
                    status,
                    &bytes,
                    super::dto::FALLBACK_FAILURE_MESSAGE,
                ));
            }
        };

        match (status.is_success() && body.success, body.order_number.as_deref()) {
            (true, Some(order_number)) => {
                tracing::info!(order_number = %order_number, "Order accepted");
                Ok(OrderReceipt::new(
                    order_number,
                    body.message.clone().unwrap_or_default(),
                ))
            }
            (true, None) => Err(TransportError::Decode(
                "success response without order number".to_string(),
            )),
            (false, _) => {
                let message = body.failure_message();
                tracing::warn!(status = status.as_u16(), message = %message, "Order rejected");
                Err(TransportError::Rejected {
                    status: status.as_u16(),
                    message,
                })
            }
        }
    }
}
