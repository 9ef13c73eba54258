// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Status Reporter
//!
//! Turns the startup [`Config`](crate::config::Config) into the per-request
//! views served by the API:
//!
//! - [`secret_snapshot`]: secrets with passwords masked and missing values
//!   replaced by `"Not found"`
//! - [`cluster_context`]: pod metadata with `"Unknown"`/`"default"` fallbacks
//! - [`vault_status`]: how many of the seven expected secrets are loaded
//!
//! All functions are pure: they take the configuration and the current time
//! explicitly and never fail. A missing variable is data, not an error.

use chrono::{DateTime, SecondsFormat, Utc};
use secrecy::{ExposeSecret, SecretString};

use crate::config::{ClusterConfig, SecretsConfig, DEFAULT_SERVICE_ACCOUNT, UNKNOWN};
use crate::models::{
    ClusterContext, DatabaseSecrets, MyAppSecrets, SecretSnapshot, SecretValue, VaultHealth,
    VaultStatus,
};

/// Number of secrets the Vault integration is expected to provide.
pub const SECRETS_EXPECTED: usize = MyAppSecrets::EXPECTED + DatabaseSecrets::EXPECTED;

/// Format used for `last_updated` on the dashboard and `/api/secrets`.
const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// `2026-10-19 08:30:00 UTC`
pub fn display_timestamp(now: DateTime<Utc>) -> String {
    now.format(DISPLAY_FORMAT).to_string()
}

/// ISO 8601 / RFC 3339 with microseconds, e.g. `2026-10-19T08:30:00.000000Z`.
pub fn iso_timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn visible(value: &Option<SecretString>) -> SecretValue {
    match value {
        Some(secret) => SecretValue::Visible(secret.expose_secret().to_string()),
        None => SecretValue::NotFound,
    }
}

fn masked(value: &Option<SecretString>) -> SecretValue {
    match value {
        Some(secret) if !secret.expose_secret().is_empty() => SecretValue::Masked,
        _ => SecretValue::NotFound,
    }
}

fn or_default(value: &Option<String>, default: &str) -> String {
    value.clone().unwrap_or_else(|| default.to_string())
}

/// Capture the current secret values.
pub fn secret_snapshot(secrets: &SecretsConfig, now: DateTime<Utc>) -> SecretSnapshot {
    SecretSnapshot {
        myapp: MyAppSecrets {
            username: visible(&secrets.myapp_username),
            password: masked(&secrets.myapp_password),
            api_key: visible(&secrets.myapp_api_key),
        },
        database: DatabaseSecrets {
            host: visible(&secrets.database_host),
            port: visible(&secrets.database_port),
            username: visible(&secrets.database_username),
            password: masked(&secrets.database_password),
        },
        last_updated: display_timestamp(now),
    }
}

pub fn cluster_context(cluster: &ClusterConfig) -> ClusterContext {
    ClusterContext {
        namespace: or_default(&cluster.namespace, UNKNOWN),
        pod_name: or_default(&cluster.pod_name, UNKNOWN),
        node_name: or_default(&cluster.node_name, UNKNOWN),
        service_account: or_default(&cluster.service_account, DEFAULT_SERVICE_ACCOUNT),
    }
}

/// Classify a load count against [`SECRETS_EXPECTED`].
pub fn classify(loaded: usize) -> VaultHealth {
    match loaded {
        0 => VaultHealth::Failed,
        n if n == SECRETS_EXPECTED => VaultHealth::Healthy,
        _ => VaultHealth::Partial,
    }
}

/// Summarise how completely the secrets were synchronised.
pub fn vault_status(secrets: &SecretsConfig, now: DateTime<Utc>) -> VaultStatus {
    let snapshot = secret_snapshot(secrets, now);
    let myapp_secrets = snapshot.myapp.loaded();
    let database_secrets = snapshot.database.loaded();
    let secrets_loaded = myapp_secrets + database_secrets;

    VaultStatus {
        status: classify(secrets_loaded),
        secrets_loaded,
        secrets_expected: SECRETS_EXPECTED,
        myapp_secrets,
        database_secrets,
        last_check: iso_timestamp(now),
    }
}
