// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for template provisioning.

use std::path::PathBuf;

use integresql_client::Defect;
use thiserror::Error;

/// Errors that can occur while deriving a template id from files.
#[derive(Debug, Error)]
pub enum TemplateIdError {
	/// No file matched any of the patterns. Carries the patterns resolved
	/// against the base directory.
	#[error("no files matching the provided glob patterns: {patterns:?}")]
	NoMatchingFiles { patterns: Vec<PathBuf> },

	#[error("invalid glob pattern {pattern}: {source}")]
	InvalidPattern {
		pattern: String,
		#[source]
		source: glob::PatternError,
	},

	#[error("failed to read {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	/// The blocking task hashing the files panicked or was cancelled.
	#[error("template id derivation task failed: {0}")]
	Task(String),
}

/// Failure of [`get_connection`](crate::get_connection).
///
/// `E` is the error type of the caller's initializer and is handed back
/// unchanged in [`GetConnectionError::Initialize`].
#[derive(Debug, Error)]
pub enum GetConnectionError<E> {
	#[error(transparent)]
	TemplateId(#[from] TemplateIdError),

	/// The initializer failed. The template is left created but not finalized.
	#[error("template initialization failed: {0}")]
	Initialize(E),

	/// Unrecoverable: infrastructure fault or protocol violation.
	#[error(transparent)]
	Defect(#[from] Defect),
}

impl<E> GetConnectionError<E> {
	pub fn is_defect(&self) -> bool {
		matches!(self, Self::Defect(_))
	}

	pub fn defect(&self) -> Option<&Defect> {
		match self {
			Self::Defect(defect) => Some(defect),
			_ => None,
		}
	}

	/// Returns the initializer's own error value, if that is what failed.
	pub fn into_initialize(self) -> Option<E> {
		match self {
			Self::Initialize(e) => Some(e),
			_ => None,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use integresql_core::TemplateId;

	#[test]
	fn initializer_error_is_returned_unchanged() {
		let err: GetConnectionError<&str> = GetConnectionError::Initialize("relation already exists");

		assert!(!err.is_defect());
		assert_eq!(err.to_string(), "template initialization failed: relation already exists");
		assert_eq!(err.into_initialize(), Some("relation already exists"));
	}

	#[test]
	fn defects_are_flagged() {
		let err: GetConnectionError<&str> = Defect::MissingClone {
			template_id: TemplateId::new("abc"),
			after_finalize: true,
		}
		.into();

		assert!(err.is_defect());
		assert_eq!(err.defect().map(|d| d.template_id().as_str()), Some("abc"));
		assert!(err.into_initialize().is_none());
	}

	#[test]
	fn no_matching_files_lists_patterns() {
		let err = TemplateIdError::NoMatchingFiles {
			patterns: vec![PathBuf::from("/work/migrations/*.sql")],
		};
		assert!(err.to_string().contains("/work/migrations/*.sql"));
	}
}
