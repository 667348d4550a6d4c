// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! HTTP client construction with a consistent User-Agent header.

use reqwest::ClientBuilder;

const SDK_NAME: &str = "integresql-rs";
const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Creates an HTTP client builder with the standard User-Agent header.
///
/// No timeout is set: clone requests block on the server until the template is
/// finalized, for as long as that takes.
pub(crate) fn builder() -> ClientBuilder {
	reqwest::Client::builder().user_agent(user_agent())
}

/// Returns the User-Agent sent with every request.
///
/// Format: `integresql-rs/{version}`
pub fn user_agent() -> String {
	format!("{SDK_NAME}/{SDK_VERSION}")
}
