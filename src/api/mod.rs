// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    error::route_not_found,
    models::{
        ClusterContext, DatabaseSecrets, HealthResponse, MyAppSecrets, SecretSnapshot,
        VaultHealth, VaultStatus,
    },
    state::AppState,
};

pub mod dashboard;
pub mod health;
pub mod secrets;

pub fn router(state: AppState) -> Router {
    let routes = Router::new()
        .route("/", get(dashboard::index))
        .route("/api/secrets", get(secrets::get_secrets))
        .route("/api/health", get(health::health))
        .route("/api/vault-status", get(secrets::vault_status))
        .with_state(state);

    Router::new()
        .merge(routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .fallback(route_not_found)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
        .layer(CorsLayer::permissive())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        dashboard::index,
        secrets::get_secrets,
        secrets::vault_status,
        health::health
    ),
    components(
        schemas(
            SecretSnapshot,
            MyAppSecrets,
            DatabaseSecrets,
            ClusterContext,
            VaultStatus,
            VaultHealth,
            HealthResponse
        )
    ),
    tags(
        (name = "Dashboard", description = "HTML status page"),
        (name = "Secrets", description = "Vault-synced secrets and load status"),
        (name = "Health", description = "Liveness probe")
    )
)]
struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::config::Config;

    fn app_with(vars: &[(&str, &str)]) -> Router {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        router(AppState::new(Config::from_lookup(|name| vars.get(name).cloned())))
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, headers, body.to_vec())
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let (status, _, body) = get(app, uri).await;
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn health_returns_ok() {
        let (status, body) = get_json(app_with(&[]), "/api/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn secrets_with_empty_environment() {
        let (status, body) = get_json(app_with(&[]), "/api/secrets").await;
        assert_eq!(status, StatusCode::OK);
        for field in ["username", "password", "api_key"] {
            assert_eq!(body["myapp"][field], "Not found");
        }
        for field in ["host", "port", "username", "password"] {
            assert_eq!(body["database"][field], "Not found");
        }
        assert!(body["last_updated"].as_str().unwrap().ends_with(" UTC"));
    }

    #[tokio::test]
    async fn secrets_never_expose_passwords() {
        let app = app_with(&[
            ("MYAPP_PASSWORD", "hunter2"),
            ("DATABASE_PASSWORD", "dbpw"),
        ]);
        let (_, _, body) = get(app, "/api/secrets").await;
        let text = String::from_utf8(body).unwrap();
        assert!(!text.contains("hunter2"));
        assert!(!text.contains("dbpw"));
        assert!(text.contains(r#""password":"***""#));
    }

    #[tokio::test]
    async fn vault_status_failed_with_nothing_set() {
        let (status, body) = get_json(app_with(&[]), "/api/vault-status").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "failed");
        assert_eq!(body["secrets_loaded"], 0);
        assert_eq!(body["secrets_expected"], 7);
    }

    #[tokio::test]
    async fn vault_status_healthy_with_everything_set() {
        let app = app_with(&[
            ("MYAPP_USERNAME", "alice"),
            ("MYAPP_PASSWORD", "secret"),
            ("MYAPP_API_KEY", "key"),
            ("DATABASE_HOST", "db"),
            ("DATABASE_PORT", "5432"),
            ("DATABASE_USERNAME", "app"),
            ("DATABASE_PASSWORD", "pw"),
        ]);
        let (_, body) = get_json(app, "/api/vault-status").await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["secrets_loaded"], 7);
        assert_eq!(body["myapp_secrets"], 3);
        assert_eq!(body["database_secrets"], 4);
    }

    #[tokio::test]
    async fn vault_status_partial_example() {
        let app = app_with(&[("MYAPP_USERNAME", "alice"), ("MYAPP_PASSWORD", "secret")]);
        let (_, body) = get_json(app, "/api/vault-status").await;
        assert_eq!(body["status"], "partial");
        assert_eq!(body["secrets_loaded"], 2);
        assert_eq!(body["secrets_expected"], 7);
        assert_eq!(body["myapp_secrets"], 2);
        assert_eq!(body["database_secrets"], 0);
        assert!(body["last_check"].is_string());
    }

    #[tokio::test]
    async fn empty_database_password_is_not_found_and_not_counted() {
        let vars = [("DATABASE_PASSWORD", ""), ("MYAPP_USERNAME", "alice")];

        let (_, secrets) = get_json(app_with(&vars), "/api/secrets").await;
        assert_eq!(secrets["database"]["password"], "Not found");
        assert_eq!(secrets["myapp"]["username"], "alice");

        let (_, status) = get_json(app_with(&vars), "/api/vault-status").await;
        assert_eq!(status["database_secrets"], 0);
        assert_eq!(status["myapp_secrets"], 1);
        assert_eq!(status["secrets_loaded"], 1);
        assert_eq!(status["status"], "partial");
    }

    #[tokio::test]
    async fn dashboard_is_html() {
        let app = app_with(&[("POD_NAME", "demo-pod"), ("MYAPP_PASSWORD", "hunter2")]);
        let (status, headers, body) = get(app, "/").await;
        assert_eq!(status, StatusCode::OK);
        let content_type = headers[header::CONTENT_TYPE].to_str().unwrap();
        assert!(content_type.starts_with("text/html"));

        let page = String::from_utf8(body).unwrap();
        assert!(page.contains("demo-pod"));
        assert!(!page.contains("hunter2"));
    }

    #[tokio::test]
    async fn unknown_route_returns_json_404() {
        let (status, body) = get_json(app_with(&[]), "/api/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "No route for /api/nope");
    }

    #[tokio::test]
    async fn request_id_is_propagated() {
        let (_, headers, _) = get(app_with(&[]), "/api/health").await;
        assert!(headers.contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn openapi_document_lists_endpoints() {
        let (status, body) = get_json(app_with(&[]), "/api-doc/openapi.json").await;
        assert_eq!(status, StatusCode::OK);
        for path in ["/", "/api/secrets", "/api/health", "/api/vault-status"] {
            assert!(body["paths"].get(path).is_some(), "missing {path}");
        }
    }
}
