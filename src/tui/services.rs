use std::sync::Arc;

use tokio::sync::mpsc;

use crate::config::{AppConfig, DisplayConfig};
use crate::core::api::{ApiClient, LaunchApi};

use super::events::{AppEvent, Notification, NotificationLevel};

/// Centralized handle to backend services.
///
/// Created once at startup and passed by reference to views. Views clone
/// the `api` handle into the tasks they spawn.
#[derive(Clone)]
pub struct Services {
    pub api: Arc<dyn LaunchApi>,
    pub display: DisplayConfig,
    pub event_tx: mpsc::UnboundedSender<AppEvent>,
}

impl Services {
    /// Build the HTTP client from config.
    pub fn init(
        config: &AppConfig,
        event_tx: mpsc::UnboundedSender<AppEvent>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let client = ApiClient::with_timeout(&config.api.base_url, config.api.timeout())?;
        log::info!("API client targeting {}", client.base_url());

        Ok(Self::with_api(Arc::new(client), config.display.clone(), event_tx))
    }

    pub fn with_api(
        api: Arc<dyn LaunchApi>,
        display: DisplayConfig,
        event_tx: mpsc::UnboundedSender<AppEvent>,
    ) -> Self {
        Self {
            api,
            display,
            event_tx,
        }
    }

    /// Queue a notification for the overlay.
    pub fn notify(&self, message: impl Into<String>, level: NotificationLevel) {
        let _ = self
            .event_tx
            .send(AppEvent::Notification(Notification::new(message, level)));
    }
}
