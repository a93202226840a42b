//! Folio test utilities.
//!
//! Helpers for integration testing: access policy fixtures, request payload
//! builders, and assertion utilities for the content API.

use serde_json::{Value as JsonValue, json};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// SHA-256 hex of a raw token, as stored in the access policy file.
pub fn token_hash(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

/// Create a test account holding `token`.
pub fn test_account(name: &str, token: &str) -> TestAccount {
    TestAccount {
        id: Uuid::now_v7(),
        name: name.to_string(),
        token: token.to_string(),
        roles: Vec::new(),
    }
}

/// A test account builder.
#[derive(Debug, Clone)]
pub struct TestAccount {
    pub id: Uuid,
    pub name: String,
    pub token: String,
    pub roles: Vec<String>,
}

impl TestAccount {
    /// Set a custom ID.
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    /// Add a role.
    pub fn with_role(mut self, role: &str) -> Self {
        self.roles.push(role.to_string());
        self
    }

    /// The `Authorization` header value for this account.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

/// Access policy builder; renders the TOML the kernel loads.
#[derive(Debug, Clone, Default)]
pub struct TestPolicy {
    roles: Vec<(String, Vec<String>)>,
    accounts: Vec<TestAccount>,
}

impl TestPolicy {
    /// Empty policy: no roles, no accounts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Policy where everyone may read published content.
    pub fn readable() -> Self {
        Self::new()
            .with_role("anonymous", &["access content"])
            .with_role("authenticated", &["access content"])
    }

    /// Add a role with its permissions.
    pub fn with_role(mut self, name: &str, permissions: &[&str]) -> Self {
        self.roles.push((
            name.to_string(),
            permissions.iter().map(|p| p.to_string()).collect(),
        ));
        self
    }

    /// Add an account.
    pub fn with_account(mut self, account: TestAccount) -> Self {
        self.accounts.push(account);
        self
    }

    /// Render the policy as TOML.
    pub fn to_toml(&self) -> String {
        let mut roles = toml::Table::new();
        for (name, permissions) in &self.roles {
            roles.insert(
                name.clone(),
                toml::Value::Array(
                    permissions
                        .iter()
                        .map(|p| toml::Value::String(p.clone()))
                        .collect(),
                ),
            );
        }

        let accounts = self
            .accounts
            .iter()
            .map(|account| {
                let mut table = toml::Table::new();
                table.insert("id".into(), toml::Value::String(account.id.to_string()));
                table.insert("name".into(), toml::Value::String(account.name.clone()));
                table.insert(
                    "token_sha256".into(),
                    toml::Value::String(token_hash(&account.token)),
                );
                table.insert(
                    "roles".into(),
                    toml::Value::Array(
                        account
                            .roles
                            .iter()
                            .map(|r| toml::Value::String(r.clone()))
                            .collect(),
                    ),
                );
                toml::Value::Table(table)
            })
            .collect();

        let mut document = toml::Table::new();
        document.insert("roles".into(), toml::Value::Table(roles));
        document.insert("accounts".into(), toml::Value::Array(accounts));
        toml::to_string(&document).unwrap_or_default()
    }
}

/// Blog post payload with a plain body.
pub fn blog_payload(title: &str, body: &str) -> JsonValue {
    json!({ "title": title, "body": body })
}

/// Node payload of the given bundle.
pub fn node_payload(bundle: &str, title: &str) -> JsonValue {
    json!({ "type": bundle, "title": title })
}

/// Formatted text value.
pub fn text_value(value: &str, format: &str) -> JsonValue {
    json!({ "value": value, "format": format })
}

/// Assertion helpers for JSON content.
pub mod assert {
    use serde_json::Value;

    /// Assert that a JSON value has a specific key.
    pub fn has_key(value: &Value, key: &str) {
        assert!(
            value.get(key).is_some(),
            "Expected JSON to have key '{key}', got: {value}"
        );
    }

    /// Assert that a JSON value lacks a specific key.
    pub fn lacks_key(value: &Value, key: &str) {
        assert!(
            value.get(key).is_none(),
            "Expected JSON to NOT have key '{key}', got: {value}"
        );
    }

    /// Assert that a JSON value equals expected.
    pub fn json_eq(actual: &Value, expected: &Value) {
        assert_eq!(
            actual,
            expected,
            "JSON mismatch:\nactual: {}\nexpected: {}",
            serde_json::to_string_pretty(actual).unwrap_or_default(),
            serde_json::to_string_pretty(expected).unwrap_or_default()
        );
    }

    /// Assert that an error body carries the expected message.
    pub fn message(value: &Value, expected: &str) {
        assert_eq!(
            value.get("message").and_then(Value::as_str),
            Some(expected),
            "Unexpected message in: {value}"
        );
    }

    /// Assert that a string contains a substring.
    pub fn contains(haystack: &str, needle: &str) {
        assert!(
            haystack.contains(needle),
            "Expected string to contain '{needle}'\nActual: {haystack}"
        );
    }

    /// Titles of the `items` array of a listing response, in order.
    pub fn listed_titles(value: &Value) -> Vec<String> {
        value
            .get("items")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| item.get("title").and_then(Value::as_str))
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }
}
