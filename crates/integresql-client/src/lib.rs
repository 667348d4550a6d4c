// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Typed HTTP client for the IntegreSQL pooling service.
//!
//! The pooling service owns template storage, arbitrates concurrent creation
//! requests and clones finalized templates. This crate consumes its HTTP API:
//!
//! | Operation | Request | Outcomes |
//! |---|---|---|
//! | create | `POST /api/v1/templates` | `200` connection, `423` already exists |
//! | finalize | `PUT /api/v1/templates/{hash}` | `204` done, `404` unknown template |
//! | clone | `GET /api/v1/templates/{hash}/tests` | `200` connection, `404` unknown template |
//!
//! Any other status, a transport failure or an undecodable payload is a
//! [`Defect`]. Nothing is retried.
//!
//! # Example
//!
//! ```ignore
//! use integresql_client::{IntegreSqlClient, TemplatePool};
//! use integresql_core::TemplateId;
//!
//! let client = IntegreSqlClient::builder()
//!     .host("localhost")
//!     .port(5000)
//!     .build()?;
//!
//! let id = TemplateId::new("schema-v1");
//! if let Some(template) = client.create_template(&id).await? {
//!     // run migrations against `template`...
//!     client.finalize_template(&id).await?;
//! }
//! let clone = client.get_clone(&id).await?;
//! ```

mod api;
mod client;
mod config;
mod error;
mod http;
mod pool;

pub use client::{IntegreSqlClient, IntegreSqlClientBuilder};
pub use config::{ClientConfig, ConfigError, DEFAULT_HOST, DEFAULT_PORT};
pub use error::{Defect, FinalizeError, Operation};
pub use http::user_agent;
pub use pool::TemplatePool;

pub use integresql_core::{DatabaseConfig, TemplateId};
