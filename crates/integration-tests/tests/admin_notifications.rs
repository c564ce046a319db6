//! Optimistic notification mark-as-read against a stub backend.

use std::sync::Mutex;

use chrono::Utc;

use glowella_admin::api::ApiError;
use glowella_admin::api::types::Notification;
use glowella_admin::services::notifications::{NotificationsBackend, NotificationsService};
use glowella_core::types::NotificationId;

/// Stub standing in for the Commerce API notification endpoints.
struct StubBackend {
    server: Mutex<Vec<Notification>>,
    accept_mutations: bool,
}

impl StubBackend {
    fn seeded(ids: &[&str]) -> Self {
        let server = ids
            .iter()
            .map(|id| Notification {
                id: NotificationId::new(*id),
                title: "New order".to_string(),
                message: format!("order for {id}"),
                read: false,
                created_at: Utc::now(),
            })
            .collect();
        Self {
            server: Mutex::new(server),
            accept_mutations: true,
        }
    }
}

impl NotificationsBackend for StubBackend {
    async fn fetch(&self) -> Result<Vec<Notification>, ApiError> {
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

#[tokio::test]
async fn successful_mark_read_lands_upstream_and_in_cache() {
    let backend = StubBackend::seeded(&["n1", "n2"]);
    let service = NotificationsService::new();
    service.list(&backend).await.expect("seed");
    assert_eq!(service.unread_count().await, 2);

    let after = service
        .mark_read(&backend, &NotificationId::new("n1"))
        .await
        .expect("succeeds");

    assert!(after.iter().find(|n| n.id.as_str() == "n1").expect("n1").read);
    assert_eq!(service.unread_count().await, 1);
    // Upstream copy agrees.
    let upstream = backend.fetch().await.expect("fetch");
    assert!(upstream.iter().find(|n| n.id.as_str() == "n1").expect("n1").read);
}

#[tokio::test]
async fn rejected_mutation_reconciles_back_to_server_truth() {
    let mut backend = StubBackend::seeded(&["n1"]);
    backend.accept_mutations = false;
    let service = NotificationsService::new();
    service.list(&backend).await.expect("seed");

    let result = service
        .mark_read(&backend, &NotificationId::new("n1"))
        .await;
    assert!(result.is_err());

    // The optimistic overlay was rolled back by the reconciling re-fetch.
    let cached = service.cached().await;
    assert!(!cached.iter().find(|n| n.id.as_str() == "n1").expect("n1").read);
    assert_eq!(service.unread_count().await, 1);
}

#[tokio::test]
async fn list_replaces_stale_cache_wholesale() {
    let backend = StubBackend::seeded(&["n1"]);
    let service = NotificationsService::new();
    service.list(&backend).await.expect("first fetch");

    backend
        .server
        .lock()
        .expect("lock")
        .push(Notification {
            id: NotificationId::new("n2"),
            title: "Low stock".to_string(),
            message: "Glow Serum below threshold".to_string(),
            read: false,
            created_at: Utc::now(),
        });

    let listed = service.list(&backend).await.expect("second fetch");
    assert_eq!(listed.len(), 2);
    assert_eq!(service.unread_count().await, 2);
}
