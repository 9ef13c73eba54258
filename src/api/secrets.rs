// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Secret endpoints.

use axum::{extract::State, Json};
use chrono::Utc;

use crate::{
    models::{SecretSnapshot, VaultStatus},
    snapshot,
    state::AppState,
};

/// Current secrets, passwords masked.
#[utoipa::path(
    get,
    path = "/api/secrets",
    tag = "Secrets",
    responses(
        (status = 200, description = "Secret snapshot", body = SecretSnapshot)
    )
)]
pub async fn get_secrets(State(state): State<AppState>) -> Json<SecretSnapshot> {
    Json(snapshot::secret_snapshot(&state.config.secrets, Utc::now()))
}

/// How many of the expected secrets were synced from Vault.
///
/// Returns 200 for every outcome; `status` carries the classification.
#[utoipa::path(
    get,
    path = "/api/vault-status",
    tag = "Secrets",
    responses(
        (status = 200, description = "Secret load summary", body = VaultStatus)
    )
)]
pub async fn vault_status(State(state): State<AppState>) -> Json<VaultStatus> {
    let status = snapshot::vault_status(&state.config.secrets, Utc::now());
    tracing::debug!(
        status = status.status.as_str(),
        loaded = status.secrets_loaded,
        expected = status.secrets_expected,
        "Vault status checked"
    );
    Json(status)
}
