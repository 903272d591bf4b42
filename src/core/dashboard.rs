//! Home view data: products and campaigns fetched together.

use crate::core::api::{LaunchApi, Result};
use crate::core::models::{Campaign, Product};
use crate::core::onboarding::OnboardingState;

#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    pub products: Vec<Product>,
    pub campaigns: Vec<Campaign>,
}

impl Dashboard {
    pub fn onboarding(&self) -> OnboardingState {
        OnboardingState::derive(self.products.len(), self.campaigns.len())
    }

    pub fn first_product_id(&self) -> Option<&str> {
        self.products.first().map(|p| p.id.as_str())
    }
}

/// Fetch both lists concurrently and wait for both.
///
/// Each half fails independently so one failing list does not hide the other.
pub async fn load_dashboard(api: &dyn LaunchApi) -> (Result<Vec<Product>>, Result<Vec<Campaign>>) {
    let (products, campaigns) = tokio::join!(api.get_products(), api.get_campaigns());
    if let Err(e) = &products {
        tracing::error!(error = %e, "Failed to load products");
    }
    if let Err(e) = &campaigns {
        tracing::error!(error = %e, "Failed to load campaigns");
    }
    (products, campaigns)
}
