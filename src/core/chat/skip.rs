//! Skipping the enrichment chat.

use crate::core::api::{ApiError, LaunchApi};
use crate::core::models::Product;

/// The only skip response message treated as success.
pub const SKIP_SUCCESS_MESSAGE: &str = "Chat skipped successfully";

pub const SKIP_NOT_FOUND_MESSAGE: &str =
    "We couldn't find this product. It may have been deleted.";
pub const SKIP_TOO_EARLY_MESSAGE: &str =
    "This chat can't be skipped yet. Please answer a few more questions first.";
pub const SKIP_FALLBACK_MESSAGE: &str = "Sorry, we couldn't skip the chat. Please try again.";

#[derive(Debug, Clone, PartialEq)]
pub enum SkipOutcome {
    /// The chat is complete; carries the product as returned, if any.
    Skipped(Option<Box<Product>>),
    /// Message to append to the chat.
    Failed(String),
}

/// Ask the backend to skip the chat for `product_id`.
pub async fn skip(api: &dyn LaunchApi, product_id: &str) -> SkipOutcome {
    match api.skip_chat(product_id).await {
        Ok(response) if response.message == SKIP_SUCCESS_MESSAGE => {
            tracing::info!(product_id, "Chat skipped");
            let product = response.product.map(|mut p| {
                p.mark_completed();
                Box::new(p)
            });
            SkipOutcome::Skipped(product)
        }
        Ok(response) => {
            tracing::warn!(product_id, message = %response.message, "Skip not confirmed");
            SkipOutcome::Failed(SKIP_FALLBACK_MESSAGE.to_string())
        }
        Err(e) => {
            tracing::error!(product_id, error = %e, "Skip chat failed");
            SkipOutcome::Failed(failure_message(&e))
        }
    }
}

/// User-facing text for a failed skip request.
pub fn failure_message(error: &ApiError) -> String {
    match error.status_code() {
        Some(404) => SKIP_NOT_FOUND_MESSAGE.to_string(),
        Some(400) => SKIP_TOO_EARLY_MESSAGE.to_string(),
        _ => error
            .server_message()
            .unwrap_or(SKIP_FALLBACK_MESSAGE)
            .to_string(),
    }
}
