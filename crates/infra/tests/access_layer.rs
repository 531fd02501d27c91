//! The access layer wired to the core services against a mock backend

use std::sync::Arc;

use mizan_core::crud::{CategorySchema, CustomerSchema};
use mizan_core::{
    AuthService, Backend, CrudController, DashboardService, KeyValueStorage, ListQuery,
    SessionStore, ViewScope,
};
use mizan_domain::constants::{MSG_NAME_TAKEN, STORAGE_KEY_TOKEN, STORAGE_KEY_USER_NAME};
use mizan_domain::{Category, FailureCategory};
use mizan_infra::{ApiClient, FileStorage, MemoryStorage};
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn backend_with(server: &MockServer, storage: Arc<dyn KeyValueStorage>) -> Backend {
    let client = ApiClient::builder().base_url(format!("{}/api", server.uri())).build().unwrap();
    let session = SessionStore::load(storage).unwrap();
    Backend::new(Arc::new(client), Arc::new(session))
}

fn signed_in(server: &MockServer, token: &str) -> Backend {
    let storage = MemoryStorage::new();
    storage.set_item(STORAGE_KEY_TOKEN, token).unwrap();
    storage.set_item(STORAGE_KEY_USER_NAME, "Admin").unwrap();
    backend_with(server, Arc::new(storage))
}

#[tokio::test]
async fn login_persists_the_session_to_disk() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login-web"))
        .and(body_json(json!({ "email": "admin@example.com", "password": "secret1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": true,
            "token": "tok123",
            "user": { "name": "Huda" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let file = dir.path().join("storage.json");
    let backend = backend_with(&server, Arc::new(FileStorage::open(&file).unwrap()));

    let scope = ViewScope::new();
    let auth = AuthService::new(backend, &scope);
    let session = auth.login("admin@example.com", "secret1").await.expect("login");
    assert_eq!(session.user_name, "Huda");

    let requests = server.received_requests().await.unwrap();
    assert!(!requests[0].headers.contains_key("authorization"));

    let reopened = SessionStore::load(Arc::new(FileStorage::open(&file).unwrap())).unwrap();
    assert_eq!(reopened.token().as_deref(), Some("tok123"));
    assert_eq!(reopened.user_name().as_deref(), Some("Huda"));
}

#[tokio::test]
async fn list_sends_filters_and_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/customers"))
        .and(query_param("name", "Ali"))
        .and(header("Authorization", "Bearer tok123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": true,
            "customers": [{ "id": 1, "name": "Ali", "slug": "ali" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let scope = ViewScope::new();
    let controller = CrudController::<CustomerSchema>::new(signed_in(&server, "tok123"), &scope);
    let page = controller
        .list(&ListQuery::new().filter("name", "Ali").filter("phone", ""))
        .await
        .expect("list");

    assert_eq!(page.items[0].name.as_deref(), Some("Ali"));
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.query(), Some("name=Ali"));
}

#[tokio::test]
async fn create_probes_then_posts_then_refetches() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/categories/new-name"))
        .respond_with(ResponseTemplate::new(404).set_body_string("<html>Not Found</html>"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/admin/categories"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "status": true,
            "message": "created"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/admin/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "name": "New Name", "slug": "new-name" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let scope = ViewScope::new();
    let controller = CrudController::<CategorySchema>::new(signed_in(&server, "tok"), &scope);
    let record = Category { name: Some("New Name".into()), ..Category::default() };

    let outcome = controller.create(&record, &ListQuery::new()).await.expect("create");
    assert_eq!(outcome.response["message"], "created");
    assert_eq!(outcome.refreshed.expect("re-fetch").items[0].slug.as_deref(), Some("new-name"));
}

#[tokio::test]
async fn create_with_taken_name_never_posts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/categories/snacks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "category": { "slug": "snacks" } })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let scope = ViewScope::new();
    let controller = CrudController::<CategorySchema>::new(signed_in(&server, "tok"), &scope);
    let record = Category { name: Some("Snacks".into()), ..Category::default() };

    let err = controller.create(&record, &ListQuery::new()).await.unwrap_err();
    assert_eq!(err.field("name"), [MSG_NAME_TAKEN]);
}

#[tokio::test]
async fn backend_validation_errors_reach_the_form() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/categories/snacks"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/admin/categories"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "message": "The given data was invalid.",
            "errors": { "name": ["The name has already been taken."] }
        })))
        .mount(&server)
        .await;

    let scope = ViewScope::new();
    let controller = CrudController::<CategorySchema>::new(signed_in(&server, "tok"), &scope);
    let record = Category { name: Some("Snacks".into()), ..Category::default() };

    let err = controller.create(&record, &ListQuery::new()).await.unwrap_err();
    assert_eq!(err.category(), FailureCategory::Validation);
    assert_eq!(err.message, "The given data was invalid.");
    assert_eq!(err.field("name"), ["The name has already been taken."]);
}

#[tokio::test]
async fn delete_returns_the_backend_body() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/admin/customers/abc-slug"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "status": true, "message": "deleted" })),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/admin/customers"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "message": "Server Error" })))
        .mount(&server)
        .await;

    let scope = ViewScope::new();
    let controller = CrudController::<CustomerSchema>::new(signed_in(&server, "tok"), &scope);
    let outcome = controller.delete("abc-slug", &ListQuery::new()).await.expect("delete");

    assert_eq!(outcome.response, json!({ "status": true, "message": "deleted" }));
    assert_eq!(outcome.refreshed.unwrap_err().status, Some(500));
}

#[tokio::test]
async fn signed_out_calls_never_reach_the_network() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let scope = ViewScope::new();
    let dashboard =
        DashboardService::new(backend_with(&server, Arc::new(MemoryStorage::new())), &scope);
    let err = dashboard.stats().await.unwrap_err();
    assert_eq!(err.category(), FailureCategory::AuthenticationAbsent);
}

#[tokio::test]
async fn closing_the_view_cancels_the_pending_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/dashboard"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "dashboard": { "orders_count": 1 } }))
                .set_delay(std::time::Duration::from_secs(30)),
        )
        .mount(&server)
        .await;

    let scope = ViewScope::new();
    let dashboard = DashboardService::new(signed_in(&server, "tok"), &scope);
    let pending = tokio::spawn(async move { dashboard.stats().await });

    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    drop(scope);

    let err = pending.await.unwrap().unwrap_err();
    assert!(err.is_cancelled());
}
