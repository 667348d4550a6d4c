// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Template ids derived from file contents.
//!
//! The id changes whenever any byte of any matched file changes, so pointing
//! the patterns at migrations and seed data yields a fresh template exactly
//! when the schema does.

use std::collections::HashSet;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use glob::MatchOptions;
use integresql_core::TemplateId;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::error::TemplateIdError;

/// Derives a template id from the files matching `patterns`, resolved
/// against the current working directory.
///
/// ```ignore
/// let id = integresql::template_id_from_files(&["migrations/**/*.sql"])?;
/// ```
pub fn template_id_from_files<S: AsRef<str>>(patterns: &[S]) -> Result<TemplateId, TemplateIdError> {
	let base = std::env::current_dir().map_err(|source| TemplateIdError::Io {
		path: PathBuf::from("."),
		source,
	})?;
	template_id_from_files_in(&base, patterns)
}

/// Derives a template id from the files matching `patterns`, resolved
/// against `base`.
///
/// Matches are hashed in pattern order, and within a pattern in the order the
/// glob expands. A file matched by several patterns counts once. Each file is
/// hashed with SHA-256; the concatenated hex digests are hashed again into
/// the id.
pub fn template_id_from_files_in<S: AsRef<str>>(
	base: &Path,
	patterns: &[S],
) -> Result<TemplateId, TemplateIdError> {
	let files = resolve(base, patterns)?;

	let mut digests = String::with_capacity(files.len() * 64);
	for file in &files {
		digests.push_str(&hash_file(file)?);
	}

	let id = hex::encode(Sha256::digest(digests.as_bytes()));
	debug!(files = files.len(), template_id = %id, "derived template id from files");

	Ok(TemplateId::new(id))
}

/// Wildcards never match hidden files such as editor swap files or
/// `.gitkeep`; a hidden file is only hashed when a pattern names it literally.
const MATCH_OPTIONS: MatchOptions = MatchOptions {
	case_sensitive: true,
	require_literal_separator: false,
	require_literal_leading_dot: true,
};

fn resolve<S: AsRef<str>>(base: &Path, patterns: &[S]) -> Result<Vec<PathBuf>, TemplateIdError> {
	let escaped_base = glob::Pattern::escape(&base.to_string_lossy());
	let mut seen = HashSet::new();
	let mut files = Vec::new();

	for pattern in patterns {
		let pattern = pattern.as_ref();
		// Escape the base so directory names containing glob characters match literally.
		let full_pattern = if Path::new(pattern).is_absolute() {
			pattern.to_string()
		} else if escaped_base.ends_with('/') || escaped_base.ends_with('\\') {
			format!("{escaped_base}{pattern}")
		} else {
			format!("{escaped_base}/{pattern}")
		};

		let paths = glob::glob_with(&full_pattern, MATCH_OPTIONS).map_err(|source| TemplateIdError::InvalidPattern {
			pattern: pattern.to_string(),
			source,
		})?;

		for entry in paths {
			let path = entry.map_err(|e| TemplateIdError::Io {
				path: e.path().to_path_buf(),
				source: e.into_error(),
			})?;
			if path.is_file() && seen.insert(path.clone()) {
				files.push(path);
			}
		}
	}

	if files.is_empty() {
		return Err(TemplateIdError::NoMatchingFiles {
			patterns: patterns.iter().map(|p| base.join(p.as_ref())).collect(),
		});
	}

	Ok(files)
}

fn hash_file(path: &Path) -> Result<String, TemplateIdError> {
	let io_error = |source| TemplateIdError::Io {
		path: path.to_path_buf(),
		source,
	};

	let mut file = File::open(path).map_err(io_error)?;
	let mut hasher = Sha256::new();
	io::copy(&mut file, &mut hasher).map_err(io_error)?;

	Ok(hex::encode(hasher.finalize()))
}
