//! Access policy and actor resolution.
//!
//! Roles, their permissions, and API-token accounts are declared in a TOML
//! policy file:
//!
//! ```toml
//! [roles]
//! anonymous = ["access content"]
//! authenticated = ["access content", "view own unpublished content"]
//! editor = ["create content", "edit any blog content"]
//!
//! [[accounts]]
//! id = "01925f7c-3b9a-7c3e-8f00-000000000001"
//! name = "alice"
//! token_sha256 = "<output of `folio hash-token <token>`>"
//! roles = ["editor"]
//! ```

use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use tracing::{info, warn};
use uuid::Uuid;

use crate::actor::Actor;
use crate::content::ACCESS_CONTENT;

/// Role applied to requests without credentials.
pub const ANONYMOUS_ROLE: &str = "anonymous";

/// Role added to every account.
pub const AUTHENTICATED_ROLE: &str = "authenticated";

/// Parsed access policy file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AccessPolicy {
    #[serde(default)]
    pub roles: HashMap<String, Vec<String>>,
    #[serde(default)]
    pub accounts: Vec<AccountEntry>,
}

/// One account that may authenticate with an API token.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AccountEntry {
    pub id: Uuid,
    pub name: String,
    /// Lower-case hex SHA-256 of the raw token.
    pub token_sha256: String,
    #[serde(default)]
    pub roles: Vec<String>,
}

impl Default for AccessPolicy {
    /// Read-only policy: everyone may view published content; no accounts.
    fn default() -> Self {
        let read = vec![ACCESS_CONTENT.to_string()];
        Self {
            roles: HashMap::from([
                (ANONYMOUS_ROLE.to_string(), read.clone()),
                (AUTHENTICATED_ROLE.to_string(), read),
            ]),
            accounts: Vec::new(),
        }
    }
}

impl AccessPolicy {
    /// Parse and validate a policy document.
    pub fn from_toml(source: &str) -> Result<Self> {
        let mut policy: Self = toml::from_str(source).context("invalid access policy")?;

        let mut seen = BTreeSet::new();
        for account in &mut policy.accounts {
            account.token_sha256 = account.token_sha256.trim().to_ascii_lowercase();
            let hash = &account.token_sha256;

            if hash.len() != 64 || !hash.chars().all(|c| c.is_ascii_hexdigit()) {
                bail!(
                    "account '{}': token_sha256 must be 64 hex characters",
                    account.name
                );
            }
            if !seen.insert(hash.clone()) {
                bail!("account '{}': token_sha256 is already in use", account.name);
            }
            for role in &account.roles {
                if role != AUTHENTICATED_ROLE && !policy.roles.contains_key(role) {
                    bail!("account '{}': unknown role '{role}'", account.name);
                }
            }
        }

        Ok(policy)
    }

    /// Load the policy file, falling back to the default policy when the
    /// file does not exist.
    pub async fn load(path: &Path) -> Result<Self> {
        match tokio::fs::read_to_string(path).await {
            Ok(source) => {
                let policy = Self::from_toml(&source)
                    .with_context(|| format!("failed to load {}", path.display()))?;
                info!(
                    path = %path.display(),
                    roles = policy.roles.len(),
                    accounts = policy.accounts.len(),
                    "loaded access policy"
                );
                Ok(policy)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(
                    path = %path.display(),
                    "access policy not found, using read-only default"
                );
                Ok(Self::default())
            }
            Err(e) => {
                Err(e).with_context(|| format!("failed to read access policy {}", path.display()))
            }
        }
    }

    fn role_permissions(&self, roles: &[&str]) -> Vec<String> {
        let permissions: BTreeSet<&String> = roles
            .iter()
            .filter_map(|role| self.roles.get(*role))
            .flatten()
            .collect();
        permissions.into_iter().cloned().collect()
    }
}

/// SHA-256 hash a raw API token for comparison with the policy file.
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

/// Resolves request credentials to actors.
///
/// Wrapped in Arc internally so Clone is cheap.
#[derive(Clone)]
pub struct PermissionService {
    inner: Arc<PermissionServiceInner>,
}

struct PermissionServiceInner {
    /// Actor used for requests without credentials.
    anonymous: Actor,

    /// token hash -> resolved actor.
    accounts: HashMap<String, Actor>,
}

impl PermissionService {
    /// Resolve every account of the policy up front.
    pub fn new(policy: &AccessPolicy) -> Self {
        let anonymous = Actor::anonymous(policy.role_permissions(&[ANONYMOUS_ROLE]));

        let accounts = policy
            .accounts
            .iter()
            .map(|account| {
                let mut roles: Vec<&str> = account.roles.iter().map(String::as_str).collect();
                roles.push(AUTHENTICATED_ROLE);
                let actor = Actor::authenticated(
                    account.id,
                    account.name.clone(),
                    policy.role_permissions(&roles),
                );
                (account.token_sha256.clone(), actor)
            })
            .collect();

        Self {
            inner: Arc::new(PermissionServiceInner {
                anonymous,
                accounts,
            }),
        }
    }

    /// The actor for requests without credentials.
    pub fn anonymous(&self) -> Actor {
        self.inner.anonymous.clone()
    }

    /// Resolve a raw bearer token. None if no account holds it.
    pub fn authenticate(&self, raw_token: &str) -> Option<Actor> {
        self.inner.accounts.get(&hash_token(raw_token)).cloned()
    }

    /// Number of accounts that can authenticate.
    pub fn account_count(&self) -> usize {
        self.inner.accounts.len()
    }
}

impl std::fmt::Debug for PermissionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PermissionService")
            .field("accounts", &self.inner.accounts.len())
            .finish()
    }
}
