// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Isolated, pre-initialized test databases from IntegreSQL templates.
//!
//! Each test asks for a database with [`get_connection`]. The first caller
//! for a template id creates the template and runs the initializer (schema
//! migrations, seed data); every caller, including that one, then receives
//! its own fresh clone. The initializer runs at most once per id no matter
//! how many tests, processes or machines ask concurrently.
//!
//! # Example
//!
//! ```ignore
//! use integresql::{get_connection, template_id_from_files, ClientConfig, IntegreSqlClient};
//!
//! #[tokio::test]
//! async fn creates_user() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = IntegreSqlClient::from_config(&ClientConfig::from_env()?)?;
//!     let template_id = template_id_from_files(&["migrations/**/*.sql"])?;
//!
//!     let db = get_connection(&client, &template_id, |template| async move {
//!         migrate(template.connection_url()?.expose()).await
//!     })
//!     .await?;
//!
//!     // connect to `db` and run the test...
//!     Ok(())
//! }
//! ```

mod connection;
mod error;
mod files;

pub use connection::{get_connection, get_connection_for_files};
pub use error::{GetConnectionError, TemplateIdError};
pub use files::{template_id_from_files, template_id_from_files_in};

// Re-export client and core types for convenience
pub use integresql_client::{
	ClientConfig, ConfigError, Defect, FinalizeError, IntegreSqlClient, IntegreSqlClientBuilder, Operation,
	TemplatePool,
};
pub use integresql_core::{ConnectionUrl, DatabaseConfig, Password, TemplateId};
