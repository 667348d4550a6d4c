// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! IntegreSQL HTTP client implementation.

use std::time::Duration;

use async_trait::async_trait;
use integresql_core::{DatabaseConfig, TemplateId};
use reqwest::{Client, Response, StatusCode};
use tracing::{debug, error, info, instrument};
use url::Url;

use crate::api::{CreateTemplateRequest, DatabaseResponse};
use crate::config::{ClientConfig, ConfigError};
use crate::error::{Defect, FinalizeError, Operation};
use crate::pool::TemplatePool;

/// Builder for constructing an [`IntegreSqlClient`].
#[derive(Debug, Default)]
pub struct IntegreSqlClientBuilder {
	config: ClientConfig,
	base_url: Option<String>,
}

impl IntegreSqlClientBuilder {
	/// Creates a new builder pointing at `localhost:5000`.
	pub fn new() -> Self {
		Self::default()
	}

	/// Starts from an existing configuration.
	pub fn config(mut self, config: ClientConfig) -> Self {
		self.config = config;
		self
	}

	pub fn host(mut self, host: impl Into<String>) -> Self {
		self.config.host = host.into();
		self
	}

	pub fn port(mut self, port: u16) -> Self {
		self.config.port = port;
		self
	}

	/// Overrides host and port with a full base URL (useful for testing).
	///
	/// Example: `http://127.0.0.1:49153`
	pub fn base_url(mut self, url: impl Into<String>) -> Self {
		self.base_url = Some(url.into());
		self
	}

	/// Sets a per-request timeout.
	///
	/// This also bounds how long a clone request may wait for another caller
	/// to finalize the template.
	pub fn request_timeout(mut self, timeout: Duration) -> Self {
		self.config.request_timeout = Some(timeout);
		self
	}

	pub fn build(self) -> Result<IntegreSqlClient, ConfigError> {
		let raw = self.base_url.unwrap_or_else(|| self.config.base_url());
		let base_url = Url::parse(raw.trim_end_matches('/')).map_err(|source| ConfigError::InvalidBaseUrl {
			url: raw.clone(),
			source,
		})?;

		if base_url.cannot_be_a_base() {
			return Err(ConfigError::invalid_value("base_url", format!("{raw} cannot be a base URL")));
		}

		let mut http = crate::http::builder();
		if let Some(timeout) = self.config.request_timeout {
			http = http.timeout(timeout);
		}
		let http_client = http.build()?;

		info!(base_url = %base_url, "IntegreSQL client initialized");

		Ok(IntegreSqlClient {
			http_client,
			base_url,
		})
	}
}

/// Client for the IntegreSQL pooling service.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct IntegreSqlClient {
	http_client: Client,
	base_url: Url,
}

impl IntegreSqlClient {
	pub fn builder() -> IntegreSqlClientBuilder {
		IntegreSqlClientBuilder::new()
	}

	pub fn from_config(config: &ClientConfig) -> Result<Self, ConfigError> {
		IntegreSqlClientBuilder::new().config(config.clone()).build()
	}

	pub fn base_url(&self) -> &Url {
		&self.base_url
	}

	fn endpoint(&self, parts: &[&str]) -> Url {
		let mut url = self.base_url.clone();
		// build() rejects cannot-be-a-base URLs, so segments are always editable.
		if let Ok(mut segments) = url.path_segments_mut() {
			segments.pop_if_empty().extend(parts);
		}
		url
	}

	/// URL of `/api/v1/templates/{id}` followed by `tail`.
	fn template_endpoint(&self, operation: Operation, template_id: &TemplateId, tail: &[&str]) -> Result<Url, Defect> {
		ensure_addressable(operation, template_id)?;

		let mut parts = vec!["api", "v1", "templates", template_id.as_str()];
		parts.extend_from_slice(tail);
		Ok(self.endpoint(&parts))
	}
}

/// What a response status means for an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
	Database,
	Exists,
	Finalized,
	Unknown,
	Unexpected,
}

fn outcome(operation: Operation, status: StatusCode) -> Outcome {
	match (operation, status) {
		(Operation::CreateTemplate, StatusCode::OK) => Outcome::Database,
		(Operation::CreateTemplate, StatusCode::LOCKED) => Outcome::Exists,
		(Operation::FinalizeTemplate, StatusCode::NO_CONTENT) => Outcome::Finalized,
		(Operation::FinalizeTemplate | Operation::GetClone, StatusCode::NOT_FOUND) => Outcome::Unknown,
		(Operation::GetClone, StatusCode::OK) => Outcome::Database,
		_ => Outcome::Unexpected,
	}
}

/// URL parsing folds `.` and `..` segments away and an empty id leaves an
/// empty segment, so these ids would reach a different endpoint.
fn ensure_addressable(operation: Operation, template_id: &TemplateId) -> Result<(), Defect> {
	match template_id.as_str() {
		"" | "." | ".." => {
			error!(operation = %operation, "Template id cannot be used as a path segment");
			Err(Defect::UnaddressableTemplateId {
				operation,
				template_id: template_id.clone(),
			})
		}
		_ => Ok(()),
	}
}

#[async_trait]
impl TemplatePool for IntegreSqlClient {
	#[instrument(skip_all, fields(template_id = %template_id))]
	async fn create_template(&self, template_id: &TemplateId) -> Result<Option<DatabaseConfig>, Defect> {
		let operation = Operation::CreateTemplate;
		// Checked up front so no template is created that finalize cannot reach.
		ensure_addressable(operation, template_id)?;
		let url = self.endpoint(&["api", "v1", "templates"]);

		debug!(url = %url, "Creating template");

		let response = self
			.http_client
			.post(url)
			.json(&CreateTemplateRequest {
				hash: template_id.as_str(),
			})
			.send()
			.await
			.map_err(|e| transport(operation, template_id, e))?;

		let status = response.status();
		debug!(status = %status, "Received create template response");

		match outcome(operation, status) {
			Outcome::Database => {
				let config = decode(operation, template_id, response).await?;
				info!(database = %config.database, "Template created, caller must initialize it");
				Ok(Some(config))
			}
			Outcome::Exists => {
				debug!("Template already exists");
				Ok(None)
			}
			_ => Err(unexpected_status(operation, template_id, response).await),
		}
	}

	#[instrument(skip_all, fields(template_id = %template_id))]
	async fn finalize_template(&self, template_id: &TemplateId) -> Result<(), FinalizeError> {
		let operation = Operation::FinalizeTemplate;
		let url = self.template_endpoint(operation, template_id, &[])?;

		debug!(url = %url, "Finalizing template");

		let response = self
			.http_client
			.put(url)
			.send()
			.await
			.map_err(|e| transport(operation, template_id, e))?;

		let status = response.status();
		debug!(status = %status, "Received finalize template response");

		match outcome(operation, status) {
			Outcome::Finalized => {
				info!("Template finalized");
				Ok(())
			}
			Outcome::Unknown => Err(FinalizeError::NoSuchTemplate(template_id.clone())),
			_ => Err(unexpected_status(operation, template_id, response).await.into()),
		}
	}

	#[instrument(skip_all, fields(template_id = %template_id))]
	async fn get_clone(&self, template_id: &TemplateId) -> Result<Option<DatabaseConfig>, Defect> {
		let operation = Operation::GetClone;
		let url = self.template_endpoint(operation, template_id, &["tests"])?;

		debug!(url = %url, "Requesting test database");

		let response = self
			.http_client
			.get(url)
			.send()
			.await
			.map_err(|e| transport(operation, template_id, e))?;

		let status = response.status();
		debug!(status = %status, "Received test database response");

		match outcome(operation, status) {
			Outcome::Database => {
				let config = decode(operation, template_id, response).await?;
				debug!(database = %config.database, "Received test database");
				Ok(Some(config))
			}
			Outcome::Unknown => Ok(None),
			_ => Err(unexpected_status(operation, template_id, response).await),
		}
	}
}

fn transport(operation: Operation, template_id: &TemplateId, source: reqwest::Error) -> Defect {
	error!(operation = %operation, error = %source, "IntegreSQL request failed");
	Defect::Transport {
		operation,
		template_id: template_id.clone(),
		source,
	}
}

async fn unexpected_status(operation: Operation, template_id: &TemplateId, response: Response) -> Defect {
	let status = response.status().as_u16();
	let body = response.text().await.unwrap_or_default();
	error!(operation = %operation, status, body = %body, "Unexpected IntegreSQL response");
	Defect::UnexpectedStatus {
		operation,
		template_id: template_id.clone(),
		status,
		body,
	}
}

async fn decode(
	operation: Operation,
	template_id: &TemplateId,
	response: Response,
) -> Result<DatabaseConfig, Defect> {
	let body = response
		.text()
		.await
		.map_err(|e| transport(operation, template_id, e))?;

	let parsed: DatabaseResponse = serde_json::from_str(&body).map_err(|e| {
		error!(operation = %operation, error = %e, "Failed to parse IntegreSQL response");
		Defect::MalformedPayload {
			operation,
			template_id: template_id.clone(),
			message: format!("JSON parse error: {e}"),
		}
	})?;

	Ok(parsed.into_config())
}
