#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Common test utilities for integration tests.
//!
//! [`TestApp`] wraps the REAL kernel router and state over an in-memory
//! store, so every test gets an isolated, empty content set.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use folio_kernel::content::MemoryContentStore;
use folio_kernel::permissions::{AccessPolicy, PermissionService};
use folio_kernel::routes;
use folio_kernel::state::AppState;
use folio_test_utils::{TestAccount, TestPolicy, test_account};

/// Response status plus decoded JSON body (Null when empty).
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

/// Test application wrapper using the REAL kernel routes and state.
pub struct TestApp {
    router: Router,
    pub state: AppState,
    pub store: Arc<MemoryContentStore>,
    /// `administer site`.
    pub admin: TestAccount,
    /// `create content` and `{edit,delete} any` on blog and page content.
    pub editor: TestAccount,
    /// `{edit,delete} own blog content` and `view own unpublished content`.
    pub writer: TestAccount,
    /// Authenticated, no extra roles.
    pub member: TestAccount,
}

impl TestApp {
    /// Create a test application with the standard accounts.
    pub fn new() -> Self {
        let admin = test_account("admin", "admin-token").with_role("admin");
        let editor = test_account("editor", "editor-token").with_role("editor");
        let writer = test_account("writer", "writer-token").with_role("writer");
        let member = test_account("member", "member-token");

        let policy = TestPolicy::readable()
            .with_role("admin", &["administer site"])
            .with_role(
                "editor",
                &[
                    "create content",
                    "edit any blog content",
                    "delete any blog content",
                    "edit any page content",
                    "delete any page content",
                ],
            )
            .with_role(
                "writer",
                &[
                    "edit own blog content",
                    "delete own blog content",
                    "view own unpublished content",
                ],
            )
            .with_account(admin.clone())
            .with_account(editor.clone())
            .with_account(writer.clone())
            .with_account(member.clone());

        Self::with_policy(&policy.to_toml(), admin, editor, writer, member)
    }

    fn with_policy(
        policy: &str,
        admin: TestAccount,
        editor: TestAccount,
        writer: TestAccount,
        member: TestAccount,
    ) -> Self {
        let policy = AccessPolicy::from_toml(policy).expect("test policy must parse");
        let store = Arc::new(MemoryContentStore::new());
        let state = AppState::with_store(
            store.clone(),
            PermissionService::new(&policy),
            "basic_html",
        );
        let router = routes::build_router(state.clone());

        Self {
            router,
            state,
            store,
            admin,
            editor,
            writer,
            member,
        }
    }

    /// Make a raw request to the app.
    pub async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body collects")
            .to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("response body is JSON")
        };

        TestResponse { status, body }
    }

    /// Send `method path` with an optional account and raw body.
    pub async fn send_raw(
        &self,
        method: Method,
        path: &str,
        account: Option<&TestAccount>,
        body: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(account) = account {
            builder = builder.header(header::AUTHORIZATION, account.bearer());
        }
        let body = match body {
            Some(body) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(body.to_string())
            }
            None => Body::empty(),
        };

        self.request(builder.body(body).unwrap()).await
    }

    /// Send `method path` with an optional account and JSON body.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        account: Option<&TestAccount>,
        body: Option<Value>,
    ) -> TestResponse {
        let body = body.map(|b| b.to_string());
        self.send_raw(method, path, account, body.as_deref()).await
    }

    pub async fn get(&self, path: &str, account: Option<&TestAccount>) -> TestResponse {
        self.send(Method::GET, path, account, None).await
    }

    pub async fn post(&self, path: &str, account: Option<&TestAccount>, body: Value) -> TestResponse {
        self.send(Method::POST, path, account, Some(body)).await
    }

    pub async fn patch(
        &self,
        path: &str,
        account: Option<&TestAccount>,
        body: Value,
    ) -> TestResponse {
        self.send(Method::PATCH, path, account, Some(body)).await
    }

    pub async fn delete(&self, path: &str, account: Option<&TestAccount>) -> TestResponse {
        self.send(Method::DELETE, path, account, None).await
    }

    /// Create an item through the API and return its id.
    pub async fn create(&self, path: &str, account: &TestAccount, body: Value) -> i64 {
        let response = self.post(path, Some(account), body).await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "create failed: {}",
            response.body
        );
        response.body["id"].as_i64().expect("created item has an id")
    }
}
