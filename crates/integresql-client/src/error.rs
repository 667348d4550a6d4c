// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for pooling service calls.

use std::fmt;

use integresql_core::TemplateId;
use thiserror::Error;

/// Remote operation a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
	CreateTemplate,
	FinalizeTemplate,
	GetClone,
}

impl fmt::Display for Operation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::CreateTemplate => write!(f, "create template"),
			Self::FinalizeTemplate => write!(f, "finalize template"),
			Self::GetClone => write!(f, "get clone"),
		}
	}
}

/// Unrecoverable failure: broken infrastructure or a violated protocol invariant.
///
/// Defects are never retried and never folded into an "absent" result. They
/// carry the offending identifier and, where there was a response, its status
/// and body.
#[derive(Debug, Error)]
pub enum Defect {
	/// The request never produced a response.
	#[error("{operation} request for template {template_id} failed: {source}")]
	Transport {
		operation: Operation,
		template_id: TemplateId,
		#[source]
		source: reqwest::Error,
	},

	/// The service answered with a status outside the operation's contract.
	#[error("{operation} for template {template_id} returned unexpected status {status}: {body}")]
	UnexpectedStatus {
		operation: Operation,
		template_id: TemplateId,
		status: u16,
		body: String,
	},

	/// The status was expected but the body could not be decoded.
	#[error("{operation} for template {template_id} returned a malformed payload: {message}")]
	MalformedPayload {
		operation: Operation,
		template_id: TemplateId,
		message: String,
	},

	/// The identifier cannot be placed in a request path without changing
	/// which endpoint is addressed. No request was sent.
	#[error("{operation} for template '{template_id}' refused: id is not a routable path segment")]
	UnaddressableTemplateId {
		operation: Operation,
		template_id: TemplateId,
	},

	/// Finalize reported an unknown template right after this caller created it.
	#[error("template {template_id} disappeared before it could be finalized")]
	TemplateVanished { template_id: TemplateId },

	/// No clone was available for a template that must exist.
	#[error("no clone available for template {template_id} (after finalize: {after_finalize})")]
	MissingClone {
		template_id: TemplateId,
		after_finalize: bool,
	},
}

impl Defect {
	pub fn template_id(&self) -> &TemplateId {
		match self {
			Self::Transport { template_id, .. }
			| Self::UnexpectedStatus { template_id, .. }
			| Self::MalformedPayload { template_id, .. }
			| Self::UnaddressableTemplateId { template_id, .. }
			| Self::TemplateVanished { template_id }
			| Self::MissingClone { template_id, .. } => template_id,
		}
	}
}

/// Failure of the finalize operation.
#[derive(Debug, Error)]
pub enum FinalizeError {
	/// The service does not know this identifier.
	#[error("no such template: {0}")]
	NoSuchTemplate(TemplateId),

	#[error(transparent)]
	Defect(#[from] Defect),
}
