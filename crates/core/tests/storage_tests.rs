// ═══════════════════════════════════════════════════════════════════
// Storage Tests: InMemoryStore semantics, RestStore error mapping
// ═══════════════════════════════════════════════════════════════════

mod common;

use common::{request_line, CannedServer};
use crypto_tracker_core::errors::CoreError;
use crypto_tracker_core::models::alert::{AlertType, NewAlert};
use crypto_tracker_core::models::portfolio::{EntryUpdate, PortfolioEntry};
use crypto_tracker_core::models::user::NewUser;
use crypto_tracker_core::storage::memory::InMemoryStore;
use crypto_tracker_core::storage::rest::RestStore;
use crypto_tracker_core::storage::traits::HoldingsStore;

fn new_user(email: &str) -> NewUser {
    NewUser {
        email: email.to_string(),
        password_hash: Some("pw".to_string()),
    }
}

fn new_alert(user_id: &str, coin_id: &str, alert_type: AlertType) -> NewAlert {
    NewAlert {
        user_id: user_id.to_string(),
        coin_id: coin_id.to_string(),
        target_price: 100.0,
        alert_type,
    }
}

// ── Users ───────────────────────────────────────────────────────────

mod users {
    use super::*;

    #[tokio::test]
    async fn insert_assigns_distinct_ids() {
        let store = InMemoryStore::new();
        let a = store.insert_user(new_user("a@x.com")).await.unwrap();
        let b = store.insert_user(new_user("b@x.com")).await.unwrap();
        assert_ne!(a.id, b.id);
        assert!(a.created_at.is_some());
        assert_eq!(store.user_count(), 2);
    }

    #[tokio::test]
    async fn find_by_email() {
        let store = InMemoryStore::new();
        let created = store.insert_user(new_user("a@x.com")).await.unwrap();
        let found = store.find_user_by_email("a@x.com").await.unwrap();
        assert_eq!(found, Some(created));
        assert_eq!(store.find_user_by_email("nobody@x.com").await.unwrap(), None);
    }

    #[tokio::test]
    async fn duplicate_email_is_store_error() {
        let store = InMemoryStore::new();
        store.insert_user(new_user("a@x.com")).await.unwrap();
        let err = store.insert_user(new_user("a@x.com")).await.unwrap_err();
        assert!(matches!(err, CoreError::Store(_)));
        assert_eq!(store.user_count(), 1);
    }
}

// ── Portfolio ───────────────────────────────────────────────────────

mod portfolio {
    use super::*;

    #[tokio::test]
    async fn list_preserves_insertion_order_and_filters_by_user() {
        let store = InMemoryStore::new();
        for coin in ["solana", "bitcoin", "ethereum"] {
            store
                .insert_entry(PortfolioEntry::new("u-1", coin, coin, 1.0, 1.0))
                .await
                .unwrap();
        }
        store
            .insert_entry(PortfolioEntry::new("u-2", "bitcoin", "Bitcoin", 1.0, 1.0))
            .await
            .unwrap();

        let coins: Vec<String> = store
            .list_entries("u-1")
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.coin_id)
            .collect();
        assert_eq!(coins, vec!["solana", "bitcoin", "ethereum"]);
    }

    #[tokio::test]
    async fn duplicate_user_coin_pair_is_store_error() {
        let store = InMemoryStore::new();
        let entry = PortfolioEntry::new("u-1", "bitcoin", "Bitcoin", 1.0, 1.0);
        store.insert_entry(entry.clone()).await.unwrap();
        let err = store.insert_entry(entry).await.unwrap_err();
        assert!(matches!(err, CoreError::Store(_)));
        assert_eq!(store.entry_count(), 1);
    }

    #[tokio::test]
    async fn update_replaces_amount_and_buy_price_only() {
        let store = InMemoryStore::new();
        store
            .insert_entry(PortfolioEntry::new("u-1", "bitcoin", "Bitcoin", 1.0, 20000.0))
            .await
            .unwrap();
        let updated = store
            .update_entry("u-1", "bitcoin", EntryUpdate { amount: 2.5, buy_price: 25000.0 })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.amount, 2.5);
        assert_eq!(updated.buy_price, 25000.0);
        assert_eq!(updated.coin_name, "Bitcoin");
        assert_eq!(store.list_entries("u-1").await.unwrap(), vec![updated]);
    }

    #[tokio::test]
    async fn update_of_missing_entry_is_none() {
        let store = InMemoryStore::new();
        let result = store
            .update_entry("u-1", "bitcoin", EntryUpdate { amount: 1.0, buy_price: 1.0 })
            .await
            .unwrap();
        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn delete_returns_removed_entry_then_none() {
        let store = InMemoryStore::new();
        store
            .insert_entry(PortfolioEntry::new("u-1", "bitcoin", "Bitcoin", 1.0, 1.0))
            .await
            .unwrap();
        let removed = store.delete_entry("u-1", "bitcoin").await.unwrap();
        assert_eq!(removed.map(|e| e.coin_id), Some("bitcoin".to_string()));
        assert_eq!(store.delete_entry("u-1", "bitcoin").await.unwrap(), None);
        assert_eq!(store.entry_count(), 0);
    }

    #[tokio::test]
    async fn delete_only_touches_matching_user() {
        let store = InMemoryStore::new();
        store
            .insert_entry(PortfolioEntry::new("u-1", "bitcoin", "Bitcoin", 1.0, 1.0))
            .await
            .unwrap();
        assert_eq!(store.delete_entry("u-2", "bitcoin").await.unwrap(), None);
        assert_eq!(store.entry_count(), 1);
    }
}

// ── Alerts ──────────────────────────────────────────────────────────

mod alerts {
    use super::*;

    #[tokio::test]
    async fn insert_list_delete() {
        let store = InMemoryStore::new();
        let a = store
            .insert_alert(new_alert("u-1", "bitcoin", AlertType::Above))
            .await
            .unwrap();
        let b = store
            .insert_alert(new_alert("u-1", "ethereum", AlertType::Below))
            .await
            .unwrap();
        store
            .insert_alert(new_alert("u-2", "bitcoin", AlertType::Below))
            .await
            .unwrap();

        assert_eq!(store.list_alerts("u-1").await.unwrap(), vec![a.clone(), b.clone()]);

        let removed = store.delete_alert(&a.id).await.unwrap();
        assert_eq!(removed, Some(a));
        assert_eq!(store.list_alerts("u-1").await.unwrap(), vec![b]);
        assert_eq!(store.alert_count(), 2);
    }

    #[tokio::test]
    async fn delete_unknown_id_is_none() {
        let store = InMemoryStore::new();
        assert_eq!(store.delete_alert("missing").await.unwrap(), None);
    }
}

// ── RestStore ───────────────────────────────────────────────────────

mod rest {
    use super::*;

    fn store_at(server: &CannedServer) -> RestStore {
        RestStore::with_timeout(&server.base_url, "anon-key", 5)
    }

    #[tokio::test]
    async fn select_sends_eq_filters_and_both_auth_headers() {
        let server = CannedServer::start(
            200,
            r#"[{"id":1,"user_id":"u-1","coin_id":"bitcoin","coin_name":"Bitcoin","amount":0.5,"buy_price":30000}]"#,
        )
        .await;
        let store = store_at(&server);

        let entries = store.list_entries("u-1").await.unwrap();
        assert_eq!(entries, vec![PortfolioEntry::new("u-1", "bitcoin", "Bitcoin", 0.5, 30000.0)]);

        let raw = server.received().await;
        assert_eq!(
            request_line(&raw),
            "GET /rest/v1/portfolio?select=*&user_id=eq.u-1 HTTP/1.1"
        );
        let headers = raw.to_lowercase();
        assert!(headers.contains("apikey: anon-key"));
        assert!(headers.contains("authorization: bearer anon-key"));
    }

    #[tokio::test]
    async fn find_user_encodes_email_filter() {
        let server = CannedServer::start(200, r#"[{"id":3,"email":"a@x.com"}]"#).await;
        let store = store_at(&server);

        let user = store.find_user_by_email("a@x.com").await.unwrap().unwrap();
        assert_eq!(user.id, "3");

        let raw = server.received().await;
        assert_eq!(
            request_line(&raw),
            "GET /rest/v1/users?select=*&email=eq.a%40x.com HTTP/1.1"
        );
    }

    #[tokio::test]
    async fn insert_asks_for_representation_and_returns_row() {
        let server = CannedServer::start(
            201,
            r#"[{"id":7,"user_id":"u-1","coin_id":"bitcoin","target_price":35000,"alert_type":"above"}]"#,
        )
        .await;
        let store = store_at(&server);

        let alert = store
            .insert_alert(new_alert("u-1", "bitcoin", AlertType::Above))
            .await
            .unwrap();
        assert_eq!(alert.id, "7");
        assert_eq!(alert.alert_type, AlertType::Above);

        let raw = server.received().await;
        assert_eq!(request_line(&raw), "POST /rest/v1/alerts HTTP/1.1");
        assert!(raw.to_lowercase().contains("prefer: return=representation"));
        assert!(raw.contains(r#""alert_type":"above""#));
        assert!(raw.contains(r#""user_id":"u-1""#));
    }

    #[tokio::test]
    async fn update_filters_on_user_and_coin() {
        let server = CannedServer::start(200, "[]").await;
        let store = store_at(&server);

        let updated = store
            .update_entry(
                "u-1",
                "bitcoin",
                EntryUpdate {
                    amount: 2.0,
                    buy_price: 80.0,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated, None);

        let raw = server.received().await;
        assert_eq!(
            request_line(&raw),
            "PATCH /rest/v1/portfolio?user_id=eq.u-1&coin_id=eq.bitcoin HTTP/1.1"
        );
        assert!(raw.to_lowercase().contains("prefer: return=representation"));
        assert!(raw.contains(r#"{"amount":2.0,"buy_price":80.0}"#));
    }

    #[tokio::test]
    async fn delete_alert_filters_on_id() {
        let server = CannedServer::start(200, "[]").await;
        let store = store_at(&server);

        assert_eq!(store.delete_alert("7").await.unwrap(), None);

        let raw = server.received().await;
        assert_eq!(request_line(&raw), "DELETE /rest/v1/alerts?id=eq.7 HTTP/1.1");
    }

    #[tokio::test]
    async fn non_success_status_is_store_error() {
        let server = CannedServer::start(409, r#"{"message":"duplicate key"}"#).await;
        let store = store_at(&server);

        let err = store.insert_user(new_user("a@x.com")).await.unwrap_err();
        match err {
            CoreError::Store(message) => {
                assert!(message.contains("409"), "{message}");
                assert!(message.contains("duplicate key"), "{message}");
            }
            other => panic!("expected Store, got {other:?}"),
        }
        server.received().await;
    }

    #[tokio::test]
    async fn insert_without_returned_row_is_store_error() {
        let server = CannedServer::start(201, "[]").await;
        let store = store_at(&server);

        let err = store
            .insert_entry(PortfolioEntry::new("u-1", "bitcoin", "Bitcoin", 1.0, 1.0))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Store(ref m) if m.contains("returned no rows")));
        server.received().await;
    }

    #[tokio::test]
    async fn undecodable_body_is_store_error() {
        let server = CannedServer::start(200, r#"{"not":"a list"}"#).await;
        let store = store_at(&server);

        let err = store.list_alerts("u-1").await.unwrap_err();
        assert!(matches!(err, CoreError::Store(ref m) if m.contains("unreadable body")));
        server.received().await;
    }

    #[tokio::test]
    async fn unreachable_store_is_store_error() {
        let store = RestStore::with_timeout("http://127.0.0.1:9", "key", 2);
        let err = store.find_user_by_email("a@x.com").await.unwrap_err();
        assert!(matches!(err, CoreError::Store(_)));
    }

    #[tokio::test]
    async fn store_errors_do_not_leak_filters() {
        let store = RestStore::with_timeout("http://127.0.0.1:9", "key", 2);
        let err = store.list_entries("secret-user-id").await.unwrap_err();
        assert!(!err.to_string().contains("secret-user-id"));
    }
}
