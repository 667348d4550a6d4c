// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Provisioning coordinator.
//!
//! Decides per template id whether this caller initializes the template, and
//! always hands back a fresh clone. Race arbitration belongs to the pooling
//! service: there are no locks, caches or retries in this process, so callers
//! in other processes with the same id are coordinated too.

use std::future::Future;

use integresql_client::{Defect, FinalizeError, TemplatePool};
use integresql_core::{DatabaseConfig, TemplateId};
use tracing::{debug, info, instrument};

use crate::error::{GetConnectionError, TemplateIdError};
use crate::files::template_id_from_files;

/// Returns a fresh clone of the template `template_id`, initializing the
/// template first if this caller is the one that created it.
///
/// `initialize` runs at most once per template id across all concurrent
/// callers of the same pooling service. It receives the template database
/// and should apply migrations and fixtures to it. Its error is returned
/// unchanged as [`GetConnectionError::Initialize`]; the template is then left
/// created but never finalized.
///
/// Callers that lose the creation race wait, inside the clone request, for
/// the winner to finalize. Nothing here times out: wrap the call in
/// `tokio::time::timeout` to bound the wait. Dropping the future mid
/// initialization performs no remote rollback.
///
/// ```ignore
/// let client = IntegreSqlClient::builder().build()?;
/// let id = template_id_from_files(&["migrations/*.sql"])?;
///
/// let db = get_connection(&client, &id, |template| async move {
///     run_migrations(&template).await
/// })
/// .await?;
/// ```
#[instrument(skip_all, fields(template_id = %template_id))]
pub async fn get_connection<P, F, Fut, E>(
	pool: &P,
	template_id: &TemplateId,
	initialize: F,
) -> Result<DatabaseConfig, GetConnectionError<E>>
where
	P: TemplatePool + ?Sized,
	F: FnOnce(DatabaseConfig) -> Fut,
	Fut: Future<Output = Result<(), E>>,
{
	match pool.create_template(template_id).await? {
		Some(template) => {
			info!(database = %template.database, "Won template creation, initializing template");

			initialize(template).await.map_err(GetConnectionError::Initialize)?;

			pool.finalize_template(template_id).await.map_err(|e| match e {
				FinalizeError::NoSuchTemplate(template_id) => Defect::TemplateVanished { template_id },
				FinalizeError::Defect(defect) => defect,
			})?;

			clone_of(pool, template_id, true).await
		}
		None => {
			debug!("Template already exists, waiting for a clone");
			clone_of(pool, template_id, false).await
		}
	}
}

/// Same as [`get_connection`], with the template id derived from the files
/// matching `patterns` (relative to the current working directory).
///
/// Files are globbed and hashed on Tokio's blocking pool before the first
/// request is sent, so this must be called from within a Tokio runtime.
pub async fn get_connection_for_files<P, S, F, Fut, E>(
	pool: &P,
	patterns: &[S],
	initialize: F,
) -> Result<DatabaseConfig, GetConnectionError<E>>
where
	P: TemplatePool + ?Sized,
	S: AsRef<str>,
	F: FnOnce(DatabaseConfig) -> Fut,
	Fut: Future<Output = Result<(), E>>,
{
	let patterns: Vec<String> = patterns.iter().map(|p| p.as_ref().to_owned()).collect();
	let template_id = tokio::task::spawn_blocking(move || template_id_from_files(&patterns))
		.await
		.map_err(|e| TemplateIdError::Task(e.to_string()))
		.and_then(|r| r)?;

	get_connection(pool, &template_id, initialize).await
}

async fn clone_of<P, E>(
	pool: &P,
	template_id: &TemplateId,
	after_finalize: bool,
) -> Result<DatabaseConfig, GetConnectionError<E>>
where
	P: TemplatePool + ?Sized,
{
	let clone = pool
		.get_clone(template_id)
		.await?
		.ok_or_else(|| Defect::MissingClone {
			template_id: template_id.clone(),
			after_finalize,
		})?;

	debug!(database = %clone.database, "Received test database");
	Ok(clone)
}
