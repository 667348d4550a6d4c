// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Database passwords handed out by the pooling service.
//!
//! Every [`DatabaseConfig`](crate::DatabaseConfig) carries one, and configs end
//! up in assertion messages, panic output and `tracing` fields. [`Password`]
//! masks itself in `Debug` and zeroes its buffer on drop:
//!
//! ```
//! use integresql_core::Password;
//!
//! let password = Password::new("hunter2");
//!
//! assert_eq!(format!("{:?}", password), "Password(********)");
//! assert_eq!(password.expose(), "hunter2");
//! ```

use std::fmt;

use serde::{Deserialize, Deserializer};
use zeroize::Zeroizing;

/// Placeholder printed wherever a password would appear.
pub const MASK: &str = "********";

/// Password of a template or test database.
///
/// Has no `Display` and no `Serialize`: the only way to the plain text is
/// [`Password::expose`], usually through
/// [`DatabaseConfig::connection_url`](crate::DatabaseConfig::connection_url).
#[derive(Clone, PartialEq, Eq)]
pub struct Password(Zeroizing<String>);

impl Password {
	pub fn new(password: impl Into<String>) -> Self {
		Self(Zeroizing::new(password.into()))
	}

	pub fn expose(&self) -> &str {
		&self.0
	}
}

impl fmt::Debug for Password {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Password({MASK})")
	}
}

impl<'de> Deserialize<'de> for Password {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		String::deserialize(deserializer).map(Self::new)
	}
}

impl From<String> for Password {
	fn from(password: String) -> Self {
		Self::new(password)
	}
}

impl From<&str> for Password {
	fn from(password: &str) -> Self {
		Self::new(password)
	}
}
