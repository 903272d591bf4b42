//! Launch backend client.
//!
//! [`LaunchApi`] is the seam every view talks through: one async call per
//! backend capability, no retries, no caching. [`ApiClient`] is the reqwest
//! implementation; tests drive views and flows through the mockall-generated
//! `MockLaunchApi`.

mod client;
mod envelope;
mod error;

pub use client::{ApiClient, DEFAULT_BASE_URL};
pub use error::{ApiError, Result};

use async_trait::async_trait;

use crate::core::models::{
    Campaign, CampaignUpdate, ChatReply, GenerateCampaignRequest, Product, ProductInfo,
    SkipResponse,
};

/// Backend operations consumed by the client.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LaunchApi: Send + Sync {
    /// `GET /api/products`
    async fn get_products(&self) -> Result<Vec<Product>>;

    /// `GET /api/products/{id}`, including the chat transcript.
    async fn get_product(&self, product_id: &str) -> Result<Product>;

    /// `POST /api/products`
    async fn create_product(&self, info: &ProductInfo) -> Result<Product>;

    /// `DELETE /api/products/{id}`
    async fn delete_product(&self, product_id: &str) -> Result<()>;

    /// `POST /api/products/chat/{id}` with `{userInput}`.
    async fn send_message(&self, product_id: &str, user_input: &str) -> Result<ChatReply>;

    /// `GET /api/products/chat/skip/{id}`
    async fn skip_chat(&self, product_id: &str) -> Result<SkipResponse>;

    /// `GET /api/campaigns`
    async fn get_campaigns(&self) -> Result<Vec<Campaign>>;

    /// `GET /api/campaigns/{id}`
    async fn get_campaign(&self, campaign_id: &str) -> Result<Campaign>;

    /// `DELETE /api/campaigns/{id}`
    async fn delete_campaign(&self, campaign_id: &str) -> Result<()>;

    /// `PUT /api/campaigns/{id}` with `{name, description}`.
    async fn update_campaign(&self, campaign_id: &str, update: &CampaignUpdate)
        -> Result<Campaign>;

    /// `POST /api/campaigns/{productId}`
    async fn generate_campaign(
        &self,
        product_id: &str,
        request: &GenerateCampaignRequest,
    ) -> Result<Campaign>;
}
