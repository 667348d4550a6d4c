// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The pooling service seam.

use async_trait::async_trait;
use integresql_core::{DatabaseConfig, TemplateId};

use crate::error::{Defect, FinalizeError};

/// Remote authority over template lifecycle: `Absent -> Created -> Finalized`.
///
/// Implementations hold the only copy of template state. Callers infer it from
/// the results of these three operations and keep nothing locally.
#[async_trait]
pub trait TemplatePool: Send + Sync {
	/// Creates the template if it does not exist yet.
	///
	/// `Some` means this caller won the creation race and must initialize the
	/// returned database, then finalize it. `None` means the template already
	/// exists, whether finalized or still being initialized by someone else.
	async fn create_template(&self, template_id: &TemplateId) -> Result<Option<DatabaseConfig>, Defect>;

	/// Marks the template ready for cloning. Finalizing twice succeeds.
	async fn finalize_template(&self, template_id: &TemplateId) -> Result<(), FinalizeError>;

	/// Hands out a fresh clone of the template.
	///
	/// Blocks until the template is finalized if it is still pending. `None`
	/// means the template does not exist.
	async fn get_clone(&self, template_id: &TemplateId) -> Result<Option<DatabaseConfig>, Defect>;
}
