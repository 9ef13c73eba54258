// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Dashboard
//!
//! Server-rendered HTML page showing the secret snapshot, the load summary
//! and the pod's Kubernetes metadata. Every interpolated value passes through
//! [`escape_html`]; passwords only ever reach this module already masked.

use axum::{extract::State, response::Html};
use chrono::Utc;

use crate::{
    models::{ClusterContext, SecretSnapshot, SecretValue, VaultStatus},
    snapshot,
    state::AppState,
};

const DASHBOARD_CSS: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Vault Secrets Demo</title>
<style>
body{font-family:-apple-system,BlinkMacSystemFont,"Segoe UI",Roboto,sans-serif;background:#f5f6f8;color:#1f2328;margin:0}
header{background:#000;color:#ffd814;padding:20px 32px}
header h1{margin:0;font-size:22px}
header p{margin:4px 0 0;color:#d0d0d0;font-size:14px}
main{max-width:960px;margin:24px auto;padding:0 16px;display:grid;gap:20px}
.card{background:#fff;border:1px solid #d8dee4;border-radius:8px;padding:20px}
.card h2{margin:0 0 12px;font-size:17px}
table{width:100%;border-collapse:collapse;font-size:14px}
td{padding:8px 6px;border-top:1px solid #eaeef2}
td.key{color:#57606a;width:40%}
td.value{font-family:ui-monospace,SFMono-Regular,Menlo,monospace}
.missing{color:#cf222e}
.masked{color:#8250df}
.badge{display:inline-block;padding:3px 10px;border-radius:12px;font-size:13px;font-weight:600}
.badge.healthy{background:#dafbe1;color:#1a7f37}
.badge.partial{background:#fff8c5;color:#9a6700}
.badge.failed{background:#ffebe9;color:#cf222e}
footer{text-align:center;color:#57606a;font-size:13px;padding:16px}
footer a{color:#0969da;margin:0 6px}
</style>
</head>
"#;

/// Main dashboard showing all secrets and pod information.
#[utoipa::path(
    get,
    path = "/",
    tag = "Dashboard",
    responses(
        (status = 200, description = "HTML dashboard", body = String, content_type = "text/html")
    )
)]
pub async fn index(State(state): State<AppState>) -> Html<String> {
    let now = Utc::now();
    let secrets = snapshot::secret_snapshot(&state.config.secrets, now);
    let status = snapshot::vault_status(&state.config.secrets, now);
    let cluster = snapshot::cluster_context(&state.config.cluster);

    Html(render(&secrets, &status, &cluster))
}

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn plain_row(html: &mut String, key: &str, value: &str) {
    html.push_str("<tr><td class=\"key\">");
    html.push_str(key);
    html.push_str("</td><td class=\"value\">");
    html.push_str(&escape_html(value));
    html.push_str("</td></tr>");
}

fn secret_row(html: &mut String, key: &str, value: &SecretValue) {
    let class = match value {
        SecretValue::Visible(_) => "value",
        SecretValue::Masked => "value masked",
        SecretValue::NotFound => "value missing",
    };
    html.push_str("<tr><td class=\"key\">");
    html.push_str(key);
    html.push_str("</td><td class=\"");
    html.push_str(class);
    html.push_str("\">");
    html.push_str(&escape_html(value.as_str()));
    html.push_str("</td></tr>");
}

/// Render the full page.
pub fn render(secrets: &SecretSnapshot, status: &VaultStatus, cluster: &ClusterContext) -> String {
    let mut html = String::with_capacity(8192);
    html.push_str(DASHBOARD_CSS);
    html.push_str("<body>\n");

    html.push_str("<header><h1>Vault Secrets Demo</h1>");
    html.push_str("<p>Secrets synced from HashiCorp Vault by the Vault Secrets Operator</p></header>\n");
    html.push_str("<main>\n");

    // Sync status
    let badge = status.status.as_str();
    html.push_str("<section class=\"card\"><h2>Vault Status <span class=\"badge ");
    html.push_str(badge);
    html.push_str("\">");
    html.push_str(badge);
    html.push_str("</span></h2><table>");
    plain_row(
        &mut html,
        "Secrets loaded",
        &format!("{} / {}", status.secrets_loaded, status.secrets_expected),
    );
    plain_row(&mut html, "Last updated", &secrets.last_updated);
    html.push_str("</table></section>\n");

    // secret/myapp
    html.push_str("<section class=\"card\"><h2>Application Secrets <small>secret/myapp</small></h2><table>");
    secret_row(&mut html, "Username", &secrets.myapp.username);
    secret_row(&mut html, "Password", &secrets.myapp.password);
    secret_row(&mut html, "API Key", &secrets.myapp.api_key);
    html.push_str("</table></section>\n");

    // secret/database
    html.push_str("<section class=\"card\"><h2>Database Secrets <small>secret/database</small></h2><table>");
    secret_row(&mut html, "Host", &secrets.database.host);
    secret_row(&mut html, "Port", &secrets.database.port);
    secret_row(&mut html, "Username", &secrets.database.username);
    secret_row(&mut html, "Password", &secrets.database.password);
    html.push_str("</table></section>\n");

    // Pod metadata
    html.push_str("<section class=\"card\"><h2>Kubernetes</h2><table>");
    plain_row(&mut html, "Namespace", &cluster.namespace);
    plain_row(&mut html, "Pod", &cluster.pod_name);
    plain_row(&mut html, "Node", &cluster.node_name);
    plain_row(&mut html, "Service Account", &cluster.service_account);
    html.push_str("</table></section>\n");

    html.push_str("</main>\n");
    html.push_str(
        r#"<footer><a href="/api/secrets">/api/secrets</a><a href="/api/vault-status">/api/vault-status</a><a href="/api/health">/api/health</a><a href="/docs">API docs</a></footer>"#,
    );
    html.push_str("\n</body>\n</html>\n");
    html
}
