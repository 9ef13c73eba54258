// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! This module defines the response data structures served by the JSON API
//! and consumed by the dashboard. All types derive `Serialize` and `ToSchema`
//! for automatic JSON handling and OpenAPI documentation.
//!
//! Every value here is built per request by [`crate::snapshot`] and never
//! mutated afterwards.
//!
//! ## Model Categories
//!
//! - **Secrets**: Vault-synced values, masked where they are passwords
//! - **Cluster**: Kubernetes metadata about the running pod
//! - **Status**: Load counts and health classification

use serde::{Serialize, Serializer};
use utoipa::ToSchema;

// =============================================================================
// Secret Values
// =============================================================================

/// Sentinel rendered for a secret whose environment variable is absent.
pub const NOT_FOUND: &str = "Not found";

/// Placeholder rendered for a password that is present.
pub const MASKED: &str = "***";

/// A single secret as it is allowed to leave the process.
///
/// Serializes as a plain JSON string: the value itself, `"***"` or
/// `"Not found"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecretValue {
    /// Non-password value, shown as-is.
    Visible(String),
    /// Password that is set; the real value is never carried.
    Masked,
    /// Variable not provided.
    NotFound,
}

impl SecretValue {
    pub fn as_str(&self) -> &str {
        match self {
            SecretValue::Visible(value) => value,
            SecretValue::Masked => MASKED,
            SecretValue::NotFound => NOT_FOUND,
        }
    }

    /// Whether the secret counts as loaded, i.e. does not render as
    /// `"Not found"`. A variable literally set to `Not found` is not counted.
    pub fn is_loaded(&self) -> bool {
        self.as_str() != NOT_FOUND
    }
}

impl std::fmt::Display for SecretValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for SecretValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

// =============================================================================
// Secret Snapshot
// =============================================================================

/// Secrets from Vault path `secret/myapp`.
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq, Eq)]
pub struct MyAppSecrets {
    #[schema(value_type = String, example = "alice")]
    pub username: SecretValue,
    #[schema(value_type = String, example = "***")]
    pub password: SecretValue,
    #[schema(value_type = String, example = "Not found")]
    pub api_key: SecretValue,
}

impl MyAppSecrets {
    pub const EXPECTED: usize = 3;

    pub fn loaded(&self) -> usize {
        [&self.username, &self.password, &self.api_key]
            .into_iter()
            .filter(|value| value.is_loaded())
            .count()
    }
}

/// Secrets from Vault path `secret/database`.
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq, Eq)]
pub struct DatabaseSecrets {
    #[schema(value_type = String, example = "postgres.default.svc")]
    pub host: SecretValue,
    #[schema(value_type = String, example = "5432")]
    pub port: SecretValue,
    #[schema(value_type = String, example = "app")]
    pub username: SecretValue,
    #[schema(value_type = String, example = "***")]
    pub password: SecretValue,
}

impl DatabaseSecrets {
    pub const EXPECTED: usize = 4;

    pub fn loaded(&self) -> usize {
        [&self.host, &self.port, &self.username, &self.password]
            .into_iter()
            .filter(|value| value.is_loaded())
            .count()
    }
}

/// Point-in-time view of every Vault-synced secret.
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq, Eq)]
pub struct SecretSnapshot {
    pub myapp: MyAppSecrets,
    pub database: DatabaseSecrets,
    /// Capture time, formatted `YYYY-MM-DD HH:MM:SS UTC`.
    #[schema(example = "2026-10-19 08:30:00 UTC")]
    pub last_updated: String,
}

// =============================================================================
// Cluster Context
// =============================================================================

/// Kubernetes metadata for the pod serving the request.
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq, Eq)]
pub struct ClusterContext {
    pub namespace: String,
    pub pod_name: String,
    pub node_name: String,
    pub service_account: String,
}

// =============================================================================
// Status Models
// =============================================================================

/// Overall secret synchronisation state.
#[derive(Debug, Clone, Copy, Serialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VaultHealth {
    /// Every expected secret is present.
    Healthy,
    /// Some, but not all, secrets are present.
    Partial,
    /// No secret is present.
    Failed,
}

impl VaultHealth {
    pub fn as_str(&self) -> &'static str {
        match self {
            VaultHealth::Healthy => "healthy",
            VaultHealth::Partial => "partial",
            VaultHealth::Failed => "failed",
        }
    }
}

/// Response for `GET /api/vault-status`.
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq, Eq)]
pub struct VaultStatus {
    pub status: VaultHealth,
    pub secrets_loaded: usize,
    pub secrets_expected: usize,
    pub myapp_secrets: usize,
    pub database_secrets: usize,
    /// Check time in ISO 8601.
    #[schema(example = "2026-10-19T08:30:00.000000Z")]
    pub last_check: String,
}

/// Response for `GET /api/health`.
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq, Eq)]
pub struct HealthResponse {
    /// Always `"healthy"` while the process answers.
    #[schema(example = "healthy")]
    pub status: String,
    /// Response time in ISO 8601.
    pub timestamp: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secret_value_serializes_as_plain_string() {
        let values = vec![
            SecretValue::Visible("alice".into()),
            SecretValue::Masked,
            SecretValue::NotFound,
        ];
        let json = serde_json::to_string(&values).unwrap();
        assert_eq!(json, r#"["alice","***","Not found"]"#);
    }

    #[test]
    fn loaded_means_not_rendered_as_not_found() {
        assert!(SecretValue::Visible(String::new()).is_loaded());
        assert!(SecretValue::Masked.is_loaded());
        assert!(!SecretValue::NotFound.is_loaded());
        assert!(!SecretValue::Visible("Not found".into()).is_loaded());
    }

    #[test]
    fn vault_health_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&VaultHealth::Partial).unwrap(),
            r#""partial""#
        );
        assert_eq!(VaultHealth::Failed.as_str(), "failed");
    }

    #[test]
    fn group_loaded_counts() {
        let myapp = MyAppSecrets {
            username: SecretValue::Visible("alice".into()),
            password: SecretValue::Masked,
            api_key: SecretValue::NotFound,
        };
        assert_eq!(myapp.loaded(), 2);

        let database = DatabaseSecrets {
            host: SecretValue::NotFound,
            port: SecretValue::NotFound,
            username: SecretValue::NotFound,
            password: SecretValue::NotFound,
        };
        assert_eq!(database.loaded(), 0);
    }
}
