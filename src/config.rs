// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! This module defines environment variable names, default values and the
//! [`Config`] struct built from them. The environment is read exactly once at
//! startup; handlers only ever see the resulting immutable `Config`.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `MYAPP_USERNAME` | Application username (Vault `secret/myapp`) | absent |
//! | `MYAPP_PASSWORD` | Application password (Vault `secret/myapp`) | absent |
//! | `MYAPP_API_KEY` | Application API key (Vault `secret/myapp`) | absent |
//! | `DATABASE_HOST` | Database host (Vault `secret/database`) | absent |
//! | `DATABASE_PORT` | Database port (Vault `secret/database`) | absent |
//! | `DATABASE_USERNAME` | Database user (Vault `secret/database`) | absent |
//! | `DATABASE_PASSWORD` | Database password (Vault `secret/database`) | absent |
//! | `POD_NAMESPACE` | Kubernetes namespace (downward API) | `Unknown` |
//! | `POD_NAME` | Pod name (downward API) | `Unknown` |
//! | `NODE_NAME` | Node name (downward API) | `Unknown` |
//! | `SERVICE_ACCOUNT` | Pod service account | `default` |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use secrecy::SecretString;

pub const MYAPP_USERNAME_ENV: &str = "MYAPP_USERNAME";
pub const MYAPP_PASSWORD_ENV: &str = "MYAPP_PASSWORD";
pub const MYAPP_API_KEY_ENV: &str = "MYAPP_API_KEY";
pub const DATABASE_HOST_ENV: &str = "DATABASE_HOST";
pub const DATABASE_PORT_ENV: &str = "DATABASE_PORT";
pub const DATABASE_USERNAME_ENV: &str = "DATABASE_USERNAME";
pub const DATABASE_PASSWORD_ENV: &str = "DATABASE_PASSWORD";

pub const POD_NAMESPACE_ENV: &str = "POD_NAMESPACE";
pub const POD_NAME_ENV: &str = "POD_NAME";
pub const NODE_NAME_ENV: &str = "NODE_NAME";
pub const SERVICE_ACCOUNT_ENV: &str = "SERVICE_ACCOUNT";

pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";

/// Environment variable selecting the log output format.
///
/// Read by [`crate::telemetry`] before the rest of the configuration so
/// that config loading itself can log.
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;

/// Fallback for cluster metadata that the downward API did not provide.
pub const UNKNOWN: &str = "Unknown";
pub const DEFAULT_SERVICE_ACCOUNT: &str = "default";

/// Secret values synced from Vault into the pod environment.
///
/// `None` means the variable was not set at all. An empty string is kept as
/// `Some("")`; the masking rules in [`crate::snapshot`] decide what that
/// means per field. Values stay wrapped in [`SecretString`] so they never
/// show up in `Debug` output or logs.
#[derive(Debug, Clone, Default)]
pub struct SecretsConfig {
    pub myapp_username: Option<SecretString>,
    pub myapp_password: Option<SecretString>,
    pub myapp_api_key: Option<SecretString>,
    pub database_host: Option<SecretString>,
    pub database_port: Option<SecretString>,
    pub database_username: Option<SecretString>,
    pub database_password: Option<SecretString>,
}

impl SecretsConfig {
    fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Self {
        let secret = |name: &str| lookup(name).map(SecretString::from);

        Self {
            myapp_username: secret(MYAPP_USERNAME_ENV),
            myapp_password: secret(MYAPP_PASSWORD_ENV),
            myapp_api_key: secret(MYAPP_API_KEY_ENV),
            database_host: secret(DATABASE_HOST_ENV),
            database_port: secret(DATABASE_PORT_ENV),
            database_username: secret(DATABASE_USERNAME_ENV),
            database_password: secret(DATABASE_PASSWORD_ENV),
        }
    }
}

/// Kubernetes metadata injected through the downward API.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClusterConfig {
    pub namespace: Option<String>,
    pub pod_name: Option<String>,
    pub node_name: Option<String>,
    pub service_account: Option<String>,
}

impl ClusterConfig {
    fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Self {
        Self {
            namespace: lookup(POD_NAMESPACE_ENV),
            pod_name: lookup(POD_NAME_ENV),
            node_name: lookup(NODE_NAME_ENV),
            service_account: lookup(SERVICE_ACCOUNT_ENV),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Self {
        let host = lookup(HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match lookup(PORT_ENV) {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!(
                    value = %raw,
                    default = DEFAULT_PORT,
                    "Invalid PORT, using default"
                );
                DEFAULT_PORT
            }),
            None => DEFAULT_PORT,
        };

        Self { host, port }
    }

    /// `host:port` string suitable for `SocketAddr` parsing.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Complete service configuration, loaded once at startup.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub secrets: SecretsConfig,
    pub cluster: ClusterConfig,
    pub server: ServerConfig,
}

impl Config {
    /// Read the configuration from the process environment.
    ///
    /// Variables that are set but not valid UTF-8 are treated as absent.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let config = Config::from_lookup(|name| match name {
    ///     "MYAPP_USERNAME" => Some("alice".to_string()),
    ///     _ => None,
    /// });
    /// ```
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            secrets: SecretsConfig::from_lookup(&lookup),
            cluster: ClusterConfig::from_lookup(&lookup),
            server: ServerConfig::from_lookup(&lookup),
        }
    }
}
