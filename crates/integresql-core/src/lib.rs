// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core types for IntegreSQL template provisioning.
//!
//! This crate holds the plain data shared between the pooling service client
//! and the provisioning coordinator:
//!
//! - [`TemplateId`]: the lookup key of a template database
//! - [`DatabaseConfig`]: connection settings for one ready-to-use database
//! - [`Password`] and [`ConnectionUrl`]: credentials that mask themselves in logs

pub mod database;
pub mod password;
pub mod template;

pub use database::{ConnectionUrl, DatabaseConfig};
pub use password::Password;
pub use template::TemplateId;
