//! Optimistic notification mark-as-read with reconciling re-fetch.
//!
//! Marking a notification read is an explicit two-phase update:
//!
//! 1. the read flag is applied to the locally cached copy, so the UI can
//!    show the change immediately;
//! 2. the mutation is sent upstream;
//! 3. a confirmed re-fetch reconciles the cache on success AND failure, so
//!    a rejected mutation rolls the overlay back to server truth.
//!
//! The backend is a trait seam; the reconciliation logic is tested against
//! a stub without any network.

use tokio::sync::RwLock;
use tracing::{instrument, warn};

use glowella_core::types::NotificationId;

use crate::api::{AdminClient, ApiError, types::Notification};

/// Where notifications come from and where the read flag goes.
pub trait NotificationsBackend {
    /// Fetch the full notification list, newest first.
    fn fetch(&self) -> impl Future<Output = Result<Vec<Notification>, ApiError>> + Send;

    /// Persist the read flag for one notification.
    fn mark_read(&self, id: &NotificationId)
    -> impl Future<Output = Result<(), ApiError>> + Send;
}

/// The Commerce API backend used by the routes.
pub struct CommerceNotifications<'a> {
    pub client: &'a AdminClient,
    pub token: &'a str,
}

impl NotificationsBackend for CommerceNotifications<'_> {
    async fn fetch(&self) -> Result<Vec<Notification>, ApiError> {
        self.client.list_notifications(self.token).await
    }

    async fn mark_read(&self, id: &NotificationId) -> Result<(), ApiError> {
        self.client.mark_notification_read(self.token, id).await
    }
}

/// Cached notification list with optimistic mark-as-read.
pub struct NotificationsService {
    cache: RwLock<Vec<Notification>>,
}

impl Default for NotificationsService {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationsService {
    /// Create a service with an empty cache.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cache: RwLock::const_new(Vec::new()),
        }
    }

    /// Fetch the notification list and refresh the cache.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` when the backend fetch fails; the stale cache is
    /// left untouched in that case.
    pub async fn list<B: NotificationsBackend>(
        &self,
        backend: &B,
    ) -> Result<Vec<Notification>, ApiError> {
        let fresh = backend.fetch().await?;
        self.cache.write().await.clone_from(&fresh);
        Ok(fresh)
    }

    /// The current cached list, without touching the backend.
    pub async fn cached(&self) -> Vec<Notification> {
        self.cache.read().await.clone()
    }

    /// Count of unread notifications in the cache.
    pub async fn unread_count(&self) -> usize {
        self.cache.read().await.iter().filter(|n| !n.read).count()
    }

    /// Mark a notification as read, optimistically.
    ///
    /// Returns the reconciled list. The mutation error, if any, is surfaced
    /// after reconciliation so the caller still reports the failure while
    /// the cache already reflects server truth.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` when the upstream mutation fails.
    #[instrument(skip(self, backend))]
    pub async fn mark_read<B: NotificationsBackend>(
        &self,
        backend: &B,
        id: &NotificationId,
    ) -> Result<Vec<Notification>, ApiError> {
        // Phase 1: local overlay.
        {
            let mut cache = self.cache.write().await;
            if let Some(notification) = cache.iter_mut().find(|n| &n.id == id) {
                notification.read = true;
            }
        }

        // Phase 2: the mutation itself.
        let mutation = backend.mark_read(id).await;

        // Phase 3: reconcile with a confirmed re-fetch either way. A failed
        // mutation must roll the overlay back to what the server holds.
        match backend.fetch().await {
            Ok(fresh) => {
                self.cache.write().await.clone_from(&fresh);
            }
            Err(e) => {
                warn!(%id, error = %e, "reconcile re-fetch failed; keeping local overlay");
            }
        }

        mutation?;
        Ok(self.cached().await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::sync::Mutex;

    struct StubBackend {
        /// Server-side truth the stub serves on fetch.
        server: Mutex<Vec<Notification>>,
        /// Whether mark_read mutations succeed.
        accept_mutations: bool,
        /// Whether fetches succeed.
        accept_fetches: bool,
    }

    impl StubBackend {
        fn new(server: Vec<Notification>) -> Self {
            Self {
                server: Mutex::new(server),
                accept_mutations: true,
                accept_fetches: true,
            }
        }
    }

    impl NotificationsBackend for StubBackend {
        async fn fetch(&self) -> Result<Vec<Notification>, ApiError> {
            if !self.accept_fetches {
                return Err(ApiError::Api {
                    code: 500,
                    message: "fetch down".to_string(),
                });
            }
            Ok(self.server.lock().expect("lock").clone())
        }

        async fn mark_read(&self, id: &NotificationId) -> Result<(), ApiError> {
            if !self.accept_mutations {
                return Err(ApiError::Api {
                    code: 500,
                    message: "mutation rejected".to_string(),
                });
            }
            let mut server = self.server.lock().expect("lock");
            if let Some(n) = server.iter_mut().find(|n| &n.id == id) {
                n.read = true;
            }
            Ok(())
        }
    }

    fn notification(id: &str, read: bool) -> Notification {
        Notification {
            id: NotificationId::new(id),
            title: "New order".to_string(),
            message: "Order was placed".to_string(),
            read,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_list_refreshes_cache() {
        let backend = StubBackend::new(vec![notification("n1", false)]);
        let service = NotificationsService::new();

        let listed = service.list(&backend).await.expect("fetches");
        assert_eq!(listed.len(), 1);
        assert_eq!(service.unread_count().await, 1);
    }

    #[tokio::test]
    async fn test_mark_read_success_confirms_upstream() {
        let backend = StubBackend::new(vec![notification("n1", false), notification("n2", false)]);
        let service = NotificationsService::new();
        service.list(&backend).await.expect("seed cache");

        let after = service
            .mark_read(&backend, &NotificationId::new("n1"))
            .await
            .expect("mutation succeeds");

        let n1 = after.iter().find(|n| n.id.as_str() == "n1").expect("n1");
        assert!(n1.read);
        assert_eq!(service.unread_count().await, 1);
    }

    #[tokio::test]
    async fn test_mark_read_failure_rolls_back_overlay() {
        let mut backend = StubBackend::new(vec![notification("n1", false)]);
        backend.accept_mutations = false;
        let service = NotificationsService::new();
        service.list(&backend).await.expect("seed cache");

        let result = service
            .mark_read(&backend, &NotificationId::new("n1"))
            .await;
        assert!(result.is_err());

        // The reconcile re-fetch restored server truth: still unread.
        let cached = service.cached().await;
        let n1 = cached.iter().find(|n| n.id.as_str() == "n1").expect("n1");
        assert!(!n1.read);
    }

    #[tokio::test]
    async fn test_mark_read_keeps_overlay_when_reconcile_unavailable() {
        let mut backend = StubBackend::new(vec![notification("n1", false)]);
        backend.accept_fetches = false;
        let service = NotificationsService::new();
        // Seed the cache directly since fetch is down.
        service
            .cache
            .write()
            .await
            .push(notification("n1", false));

        let after = service
            .mark_read(&backend, &NotificationId::new("n1"))
            .await
            .expect("mutation still succeeds");

        // No server truth available; the optimistic overlay stands.
        let n1 = after.iter().find(|n| n.id.as_str() == "n1").expect("n1");
        assert!(n1.read);
    }

    #[tokio::test]
    async fn test_mark_read_unknown_id_is_a_noop_locally() {
        let backend = StubBackend::new(vec![notification("n1", true)]);
        let service = NotificationsService::new();
        service.list(&backend).await.expect("seed cache");

        let after = service
            .mark_read(&backend, &NotificationId::new("missing"))
            .await
            .expect("backend tolerates unknown ids");
        assert_eq!(after.len(), 1);
    }
}
