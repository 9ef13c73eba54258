// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::Json;
use chrono::Utc;

use crate::models::HealthResponse;
use crate::snapshot::iso_timestamp;

/// Liveness probe handler.
///
/// Always returns 200 if the process is running.
/// Does not look at the secrets - use `/api/vault-status` for that.
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is alive", body = HealthResponse)
    )
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: iso_timestamp(Utc::now()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    #[tokio::test]
    async fn health_is_always_healthy() {
        let Json(response) = health().await;
        assert_eq!(response.status, "healthy");
        assert!(DateTime::parse_from_rfc3339(&response.timestamp).is_ok());
    }
}
