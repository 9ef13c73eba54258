// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Vault Secrets Demo - Secret Synchronisation Status Service
//!
//! This crate serves a dashboard and a small JSON API showing which secrets
//! the Vault Secrets Operator has synced into the pod environment. Password
//! values never leave the process; they are reported as `***`.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers and dashboard (Axum)
//! - `config` - Environment configuration, read once at startup
//! - `error` - JSON API errors and fatal startup errors
//! - `models` - Response types shared by the API and dashboard
//! - `snapshot` - Builds the per-request secret, cluster and status views
//! - `state` - Shared application state handed to handlers
//! - `telemetry` - Tracing subscriber setup

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod snapshot;
pub mod state;
pub mod telemetry;
