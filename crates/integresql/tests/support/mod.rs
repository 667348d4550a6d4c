// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Shared fixtures for provisioning tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use futures::future::BoxFuture;
use futures::FutureExt;
use integresql::{DatabaseConfig, Defect, FinalizeError, Operation, Password, TemplateId, TemplatePool};
use tokio::sync::Notify;

pub fn init_tracing() {
	let _ = tracing_subscriber::fmt()
		.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
		.with_test_writer()
		.try_init();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TemplateState {
	Created,
	Finalized,
}

/// In-memory pooling service.
///
/// Arbitrates creation races under a mutex and parks clone requests for
/// pending templates until they are finalized, like the real service does.
#[derive(Default)]
pub struct FakePool {
	templates: Mutex<HashMap<TemplateId, TemplateState>>,
	finalized: Notify,
	clones: AtomicUsize,
	create_calls: AtomicUsize,
	vanish_on_finalize: bool,
	withhold_clones: bool,
	fail_create_with: Option<u16>,
}

impl FakePool {
	pub fn new() -> Self {
		Self::default()
	}

	/// Finalize forgets the template and reports it unknown.
	pub fn vanishing_templates() -> Self {
		Self {
			vanish_on_finalize: true,
			..Self::default()
		}
	}

	/// Clone requests for finalized templates come back empty.
	pub fn withholding_clones() -> Self {
		Self {
			withhold_clones: true,
			..Self::default()
		}
	}

	/// Create answers with an out-of-contract status.
	pub fn failing_create(status: u16) -> Self {
		Self {
			fail_create_with: Some(status),
			..Self::default()
		}
	}

	pub fn create_calls(&self) -> usize {
		self.create_calls.load(Ordering::SeqCst)
	}

	pub fn is_finalized(&self, template_id: &TemplateId) -> bool {
		self.templates.lock().unwrap().get(template_id) == Some(&TemplateState::Finalized)
	}

	pub fn exists(&self, template_id: &TemplateId) -> bool {
		self.templates.lock().unwrap().contains_key(template_id)
	}

	fn config(database: String) -> DatabaseConfig {
		DatabaseConfig {
			host: "127.0.0.1".to_string(),
			port: 5432,
			username: "integresql".to_string(),
			password: Password::from("integresql"),
			database,
		}
	}
}

#[async_trait]
impl TemplatePool for FakePool {
	async fn create_template(&self, template_id: &TemplateId) -> Result<Option<DatabaseConfig>, Defect> {
		self.create_calls.fetch_add(1, Ordering::SeqCst);

		if let Some(status) = self.fail_create_with {
			return Err(Defect::UnexpectedStatus {
				operation: Operation::CreateTemplate,
				template_id: template_id.clone(),
				status,
				body: "injected failure".to_string(),
			});
		}

		let mut templates = self.templates.lock().unwrap();
		if templates.contains_key(template_id) {
			return Ok(None);
		}
		templates.insert(template_id.clone(), TemplateState::Created);

		Ok(Some(Self::config(format!("integresql_template_{template_id}"))))
	}

	async fn finalize_template(&self, template_id: &TemplateId) -> Result<(), FinalizeError> {
		{
			let mut templates = self.templates.lock().unwrap();
			if self.vanish_on_finalize {
				templates.remove(template_id);
			}
			match templates.get_mut(template_id) {
				Some(state) => *state = TemplateState::Finalized,
				None => return Err(FinalizeError::NoSuchTemplate(template_id.clone())),
			}
		}

		self.finalized.notify_waiters();
		Ok(())
	}

	async fn get_clone(&self, template_id: &TemplateId) -> Result<Option<DatabaseConfig>, Defect> {
		loop {
			// Registered before the state check so a finalize in between is not missed.
			let finalized = self.finalized.notified();

			{
				let templates = self.templates.lock().unwrap();
				match templates.get(template_id) {
					None => return Ok(None),
					Some(TemplateState::Finalized) if self.withhold_clones => return Ok(None),
					Some(TemplateState::Finalized) => {
						let n = self.clones.fetch_add(1, Ordering::SeqCst);
						return Ok(Some(Self::config(format!("integresql_test_{template_id}_{n:03}"))));
					}
					Some(TemplateState::Created) => {}
				}
			}

			finalized.await;
		}
	}
}

/// Initializer spy counting its invocations.
#[derive(Clone, Default)]
pub struct InitializerSpy {
	calls: Arc<AtomicUsize>,
	seen: Arc<Mutex<Vec<String>>>,
	delay: Duration,
}

impl InitializerSpy {
	pub fn new() -> Self {
		Self::default()
	}

	/// Initialization takes `delay` before succeeding.
	pub fn slow(delay: Duration) -> Self {
		Self {
			delay,
			..Self::default()
		}
	}

	pub fn calls(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}

	/// Databases the initializer was handed, in call order.
	pub fn seen(&self) -> Vec<String> {
		self.seen.lock().unwrap().clone()
	}

	pub fn initializer(&self) -> impl FnOnce(DatabaseConfig) -> BoxFuture<'static, Result<(), Infallible>> {
		let spy = self.clone();
		move |template| {
			async move {
				spy.calls.fetch_add(1, Ordering::SeqCst);
				spy.seen.lock().unwrap().push(template.database.clone());
				if !spy.delay.is_zero() {
					tokio::time::sleep(spy.delay).await;
				}
				Ok(())
			}
			.boxed()
		}
	}
}
