// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Template identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lookup key of a template database in the pooling service.
///
/// Equal identifiers must describe the same intended schema and fixtures. The
/// pooling service trusts the caller on this and so does the coordinator, so no
/// validation happens on construction. Identifiers are usually derived from a
/// content hash of migration files, but any stable string works:
///
/// ```
/// use integresql_core::TemplateId;
///
/// let id = TemplateId::new("schema-v3");
/// assert_eq!(id.as_str(), "schema-v3");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateId(String);

impl TemplateId {
	/// Wraps a caller-chosen identifier.
	pub fn new(id: impl Into<String>) -> Self {
		Self(id.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	pub fn into_inner(self) -> String {
		self.0
	}
}

impl fmt::Display for TemplateId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl AsRef<str> for TemplateId {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
