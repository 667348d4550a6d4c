// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Wire types of the pooling service API.

use integresql_core::DatabaseConfig;
use serde::{Deserialize, Serialize};

/// Request payload for creating a template.
#[derive(Debug, Serialize)]
pub(crate) struct CreateTemplateRequest<'a> {
	pub hash: &'a str,
}

/// Response carrying a database, returned by both create and clone.
///
/// Clone responses also carry a numeric `id` and create responses a
/// `templateHash`; neither is needed here.
#[derive(Debug, Deserialize)]
pub(crate) struct DatabaseResponse {
	pub database: DatabaseEnvelope,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DatabaseEnvelope {
	pub config: DatabaseConfig,
}

impl DatabaseResponse {
	pub fn into_config(self) -> DatabaseConfig {
		self.database.config
	}
}
