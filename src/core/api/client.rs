use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, instrument, warn};
use url::Url;

use super::envelope;
use super::error::{ApiError, Result};
use super::LaunchApi;
use crate::core::models::{
    Campaign, CampaignUpdate, ChatReply, GenerateCampaignRequest, Product, ProductInfo,
    SkipResponse,
};

/// Production backend origin.
pub const DEFAULT_BASE_URL: &str = "https://launchos-backend.onrender.com";

/// reqwest-backed [`LaunchApi`].
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl ApiClient {
    /// Create a client for `base_url` with transport defaults.
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, None)
    }

    /// Create a client with an optional whole-request timeout.
    pub fn with_timeout(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            base_url: Url::parse(base_url)?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        Ok(self.http.request(method, self.url(path)?))
    }

    /// Send and turn any non-success status into [`ApiError::Status`].
    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .ok()
            .and_then(|b| b.message.or(b.error));
        warn!(status = status.as_u16(), body = %text, "Backend returned error status");
        Err(ApiError::status(status.as_u16(), message))
    }

    async fn send_json(&self, request: RequestBuilder) -> Result<Value> {
        let response = self.send(request).await?;
        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl LaunchApi for ApiClient {
    #[instrument(skip(self))]
    async fn get_products(&self) -> Result<Vec<Product>> {
        let body = self.send_json(self.request(Method::GET, "/api/products")?).await?;
        let products = envelope::product_list(body)?;
        debug!(count = products.len(), "Fetched products");
        Ok(products)
    }

    #[instrument(skip(self))]
    async fn get_product(&self, product_id: &str) -> Result<Product> {
        let path = format!("/api/products/{product_id}");
        let body = self.send_json(self.request(Method::GET, &path)?).await?;
        envelope::product("GET /api/products/{id}", body)
    }

    #[instrument(skip(self, info), fields(brand = %info.brand_name))]
    async fn create_product(&self, info: &ProductInfo) -> Result<Product> {
        let request = self.request(Method::POST, "/api/products")?.json(info);
        let body = self.send_json(request).await?;
        let product = envelope::product("POST /api/products", body)?;
        debug!(product_id = %product.id, "Created product");
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn delete_product(&self, product_id: &str) -> Result<()> {
        let path = format!("/api/products/{product_id}");
        self.send(self.request(Method::DELETE, &path)?).await?;
        Ok(())
    }

    #[instrument(skip(self, user_input), fields(len = user_input.len()))]
    async fn send_message(&self, product_id: &str, user_input: &str) -> Result<ChatReply> {
        let path = format!("/api/products/chat/{product_id}");
        let request = self
            .request(Method::POST, &path)?
            .json(&json!({ "userInput": user_input }));
        let body = self.send_json(request).await?;
        Ok(serde_json::from_value(body)?)
    }

    #[instrument(skip(self))]
    async fn skip_chat(&self, product_id: &str) -> Result<SkipResponse> {
        let path = format!("/api/products/chat/skip/{product_id}");
        let body = self.send_json(self.request(Method::GET, &path)?).await?;
        Ok(serde_json::from_value(body)?)
    }

    #[instrument(skip(self))]
    async fn get_campaigns(&self) -> Result<Vec<Campaign>> {
        let body = self.send_json(self.request(Method::GET, "/api/campaigns")?).await?;
        let campaigns = envelope::campaign_list(body)?;
        debug!(count = campaigns.len(), "Fetched campaigns");
        Ok(campaigns)
    }

    #[instrument(skip(self))]
    async fn get_campaign(&self, campaign_id: &str) -> Result<Campaign> {
        let path = format!("/api/campaigns/{campaign_id}");
        let body = self.send_json(self.request(Method::GET, &path)?).await?;
        envelope::campaign("GET /api/campaigns/{id}", body)
    }

    #[instrument(skip(self))]
    async fn delete_campaign(&self, campaign_id: &str) -> Result<()> {
        let path = format!("/api/campaigns/{campaign_id}");
        self.send(self.request(Method::DELETE, &path)?).await?;
        Ok(())
    }

    #[instrument(skip(self, update))]
    async fn update_campaign(
        &self,
        campaign_id: &str,
        update: &CampaignUpdate,
    ) -> Result<Campaign> {
        let path = format!("/api/campaigns/{campaign_id}");
        let request = self.request(Method::PUT, &path)?.json(update);
        let body = self.send_json(request).await?;
        envelope::campaign("PUT /api/campaigns/{id}", body)
    }

    #[instrument(skip(self, request), fields(launch_type = %request.launch_type))]
    async fn generate_campaign(
        &self,
        product_id: &str,
        request: &GenerateCampaignRequest,
    ) -> Result<Campaign> {
        let path = format!("/api/campaigns/{product_id}");
        let builder = self.request(Method::POST, &path)?.json(request);
        let body = self.send_json(builder).await?;
        let campaign = envelope::campaign("POST /api/campaigns/{productId}", body)?;
        debug!(campaign_id = %campaign.id, "Generated campaign");
        Ok(campaign)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_join_keeps_origin() {
        let client = ApiClient::new("https://example.com").unwrap();
        let url = client.url("/api/products/abc").unwrap();
        assert_eq!(url.as_str(), "https://example.com/api/products/abc");
    }

    #[test]
    fn test_invalid_base_url() {
        let err = ApiClient::new("not a url").unwrap_err();
        assert!(matches!(err, ApiError::InvalidUrl(_)));
    }

    #[test]
    fn test_default_base_url_parses() {
        let client = ApiClient::new(DEFAULT_BASE_URL).unwrap();
        assert_eq!(client.base_url().scheme(), "https");
    }
}
