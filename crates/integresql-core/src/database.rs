// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Connection settings for databases handed out by the pooling service.

use std::fmt;
use std::net::Ipv6Addr;

use serde::Deserialize;
use url::Url;
use zeroize::Zeroizing;

use crate::password::{Password, MASK};

/// Connection settings for one ready-to-use database.
///
/// Values of this type are only ever produced by the pooling service: either
/// the template database a caller must initialize, or a fresh clone of a
/// finalized template. Two configs for the same template with a different
/// `database` are distinct clones.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DatabaseConfig {
	pub host: String,
	pub port: u16,
	pub username: String,
	pub password: Password,
	pub database: String,
}

impl DatabaseConfig {
	/// Renders a `postgres://` connection URL for handing to a database driver.
	///
	/// Userinfo and database name are percent-encoded and IPv6 hosts are
	/// bracketed.
	pub fn connection_url(&self) -> Result<ConnectionUrl, url::ParseError> {
		let mut url = Url::parse("postgres://localhost")?;

		let host = match self.host.parse::<Ipv6Addr>() {
			Ok(_) => format!("[{}]", self.host),
			Err(_) => self.host.clone(),
		};
		url.set_host(Some(&host))?;
		url.set_port(Some(self.port)).map_err(|()| url::ParseError::InvalidPort)?;

		// Only fails for URLs without a host, which set_host above rules out.
		let _ = url.set_username(&self.username);

		url.path_segments_mut()
			.map_err(|()| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
			.clear()
			.push(&self.database);

		if !self.password.expose().is_empty() {
			let _ = url.set_password(Some(MASK));
		}
		let masked = url.to_string();
		let _ = url.set_password(Some(self.password.expose()));

		Ok(ConnectionUrl {
			url: Zeroizing::new(url.into()),
			masked,
		})
	}
}

/// A `postgres://` URL with the password embedded.
///
/// `Debug` and `Display` show the URL with the password masked.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionUrl {
	url: Zeroizing<String>,
	masked: String,
}

impl ConnectionUrl {
	/// The full URL including the password.
	pub fn expose(&self) -> &str {
		&self.url
	}
}

impl fmt::Display for ConnectionUrl {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.masked)
	}
}

impl fmt::Debug for ConnectionUrl {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("ConnectionUrl").field(&self.masked).finish()
	}
}
