//! Application state shared across handlers.

use std::sync::Arc;

use crate::api::AdminClient;
use crate::config::AdminConfig;
use crate::services::notifications::NotificationsService;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    api: AdminClient,
    notifications: NotificationsService,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: AdminConfig) -> Self {
        let api = AdminClient::new(config.commerce_api_url.clone());
        Self {
            inner: Arc::new(AppStateInner {
                config,
                api,
                notifications: NotificationsService::new(),
            }),
        }
    }

    /// Get a reference to the admin configuration.
    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    /// Get a reference to the Commerce API client.
    #[must_use]
    pub fn api(&self) -> &AdminClient {
        &self.inner.api
    }

    /// Get a reference to the notifications service.
    #[must_use]
    pub fn notifications(&self) -> &NotificationsService {
        &self.inner.notifications
    }
}
