// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Pooling service connection settings.

use std::env;
use std::time::Duration;

use thiserror::Error;
use tracing::debug;

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 5000;

const ENV_HOST: &str = "INTEGRESQL_HOST";
const ENV_PORT: &str = "INTEGRESQL_PORT";
const ENV_REQUEST_TIMEOUT_SECS: &str = "INTEGRESQL_REQUEST_TIMEOUT_SECS";

/// Errors that can occur while loading or applying client configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("Invalid value for {field}: {message}")]
	InvalidValue { field: String, message: String },

	#[error("Invalid base URL {url}: {source}")]
	InvalidBaseUrl {
		url: String,
		#[source]
		source: url::ParseError,
	},

	#[error("Failed to build HTTP client: {0}")]
	HttpClient(#[from] reqwest::Error),
}

impl ConfigError {
	pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
		Self::InvalidValue {
			field: field.into(),
			message: message.into(),
		}
	}
}

/// Where the pooling service lives and how to talk to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
	pub host: String,
	pub port: u16,
	/// Per-request timeout. `None` by default because clone requests block
	/// until another caller finalizes the template.
	pub request_timeout: Option<Duration>,
}

impl Default for ClientConfig {
	fn default() -> Self {
		Self {
			host: DEFAULT_HOST.to_string(),
			port: DEFAULT_PORT,
			request_timeout: None,
		}
	}
}

impl ClientConfig {
	/// Loads settings from `INTEGRESQL_HOST`, `INTEGRESQL_PORT` and
	/// `INTEGRESQL_REQUEST_TIMEOUT_SECS`, keeping defaults for unset variables.
	pub fn from_env() -> Result<Self, ConfigError> {
		Self::from_lookup(|key| env::var(key).ok())
	}

	/// Same as [`ClientConfig::from_env`] with an injectable variable source.
	pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let mut config = Self::default();

		if let Some(host) = lookup(ENV_HOST) {
			let host = host.trim();
			if host.is_empty() {
				return Err(ConfigError::invalid_value(ENV_HOST, "must not be empty"));
			}
			config.host = host.to_string();
		}

		if let Some(port) = lookup(ENV_PORT) {
			config.port = port
				.trim()
				.parse()
				.map_err(|e| ConfigError::invalid_value(ENV_PORT, format!("{e}")))?;
		}

		if let Some(secs) = lookup(ENV_REQUEST_TIMEOUT_SECS) {
			let secs: u64 = secs
				.trim()
				.parse()
				.map_err(|e| ConfigError::invalid_value(ENV_REQUEST_TIMEOUT_SECS, format!("{e}")))?;
			config.request_timeout = Some(Duration::from_secs(secs));
		}

		debug!(
			host = %config.host,
			port = config.port,
			request_timeout = ?config.request_timeout,
			"loaded IntegreSQL client config"
		);

		Ok(config)
	}

	/// Base URL of the pooling service API, e.g. `http://localhost:5000`.
	pub fn base_url(&self) -> String {
		format!("http://{}:{}", self.host, self.port)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::HashMap;

	fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
		let vars: HashMap<String, String> = vars
			.iter()
			.map(|(k, v)| (k.to_string(), v.to_string()))
			.collect();
		move |key| vars.get(key).cloned()
	}

	#[test]
	fn defaults_point_at_local_service() {
		let config = ClientConfig::default();
		assert_eq!(config.base_url(), "http://localhost:5000");
		assert!(config.request_timeout.is_none());
	}

	#[test]
	fn unset_variables_keep_defaults() {
		let config = ClientConfig::from_lookup(lookup_from(&[])).unwrap();
		assert_eq!(config, ClientConfig::default());
	}

	#[test]
	fn reads_all_variables() {
		let config = ClientConfig::from_lookup(lookup_from(&[
			("INTEGRESQL_HOST", "integresql.internal"),
			("INTEGRESQL_PORT", "5050"),
			("INTEGRESQL_REQUEST_TIMEOUT_SECS", "90"),
		]))
		.unwrap();

		assert_eq!(config.host, "integresql.internal");
		assert_eq!(config.port, 5050);
		assert_eq!(config.request_timeout, Some(Duration::from_secs(90)));
		assert_eq!(config.base_url(), "http://integresql.internal:5050");
	}

	#[test]
	fn rejects_non_numeric_port() {
		let result = ClientConfig::from_lookup(lookup_from(&[("INTEGRESQL_PORT", "five")]));
		assert!(matches!(
			result,
			Err(ConfigError::InvalidValue { ref field, .. }) if field == "INTEGRESQL_PORT"
		));
	}

	#[test]
	fn rejects_empty_host() {
		let result = ClientConfig::from_lookup(lookup_from(&[("INTEGRESQL_HOST", "  ")]));
		assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
	}
}
