//! Navigation guard capability and one-shot step resolution.
//!
//! A guard is an async gate a navigation must pass before it is committed.
//! It receives the target and source [`Location`]s plus a [`Proceed`]
//! handle; the guard step resolves the first time either `proceed()` is
//! called or the guard's own future completes. Double resolution is a
//! no-op, never an error.

use crate::location::Location;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::future::Future;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Notify;

/// A guard declined the transition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("navigation guard rejected the transition: {reason}")]
pub struct GuardRejection {
	reason: String,
}

impl GuardRejection {
	/// Creates a rejection with a human-readable reason.
	pub fn new(reason: impl Into<String>) -> Self {
		Self {
			reason: reason.into(),
		}
	}

	/// Returns the rejection reason.
	pub fn reason(&self) -> &str {
		&self.reason
	}
}

/// An async gate a navigation must pass before committing.
///
/// Returning `Ok(())` resolves the step (an implicit proceed); calling
/// [`Proceed::proceed`] resolves it early. Returning an error aborts the
/// whole pipeline before anything is committed.
#[async_trait]
pub trait NavigationGuard: Send + Sync {
	/// Checks the transition from `from` to `to`.
	async fn check(
		&self,
		to: &Location,
		from: &Location,
		proceed: Proceed,
	) -> Result<(), GuardRejection>;
}

/// One-shot resolution cell for a single guard step.
///
/// The first call to [`ResolutionCell::resolve`] wins; later calls are
/// ignored. Waiters registered through [`ResolutionCell::wait`] observe
/// the first outcome.
#[derive(Debug, Default)]
pub struct ResolutionCell {
	outcome: Mutex<Option<Result<(), GuardRejection>>>,
	notify: Notify,
}

impl ResolutionCell {
	/// Creates an unresolved cell.
	pub fn new() -> Self {
		Self::default()
	}

	/// Records the outcome if the cell is still unresolved.
	///
	/// Returns `true` when this call resolved the cell, `false` when the
	/// cell had already been resolved (the outcome is dropped).
	pub fn resolve(&self, outcome: Result<(), GuardRejection>) -> bool {
		let mut slot = self.outcome.lock();
		if slot.is_some() {
			return false;
		}
		*slot = Some(outcome);
		self.notify.notify_waiters();
		true
	}

	/// Returns whether the cell has been resolved.
	pub fn is_resolved(&self) -> bool {
		self.outcome.lock().is_some()
	}

	/// Waits until the cell is resolved and returns the recorded outcome.
	pub async fn wait(&self) -> Result<(), GuardRejection> {
		loop {
			// Register before checking so a resolve between the check and
			// the await cannot be missed.
			let notified = self.notify.notified();
			if let Some(outcome) = self.outcome.lock().clone() {
				return outcome;
			}
			notified.await;
		}
	}
}

/// Handle given to a guard for resolving its step early.
#[derive(Clone)]
pub struct Proceed {
	cell: Arc<ResolutionCell>,
}

impl Proceed {
	/// Creates a handle resolving into the given cell.
	pub fn new(cell: Arc<ResolutionCell>) -> Self {
		Self { cell }
	}

	/// Resolves the guard step as passed.
	///
	/// A no-op when the step has already been resolved.
	pub fn proceed(&self) {
		self.cell.resolve(Ok(()));
	}
}

impl std::fmt::Debug for Proceed {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Proceed")
			.field("resolved", &self.cell.is_resolved())
			.finish()
	}
}

/// Guard backed by a plain async closure.
struct FnGuard<F> {
	f: F,
}

#[async_trait]
impl<F, Fut> NavigationGuard for FnGuard<F>
where
	F: Fn(Location, Location, Proceed) -> Fut + Send + Sync + 'static,
	Fut: Future<Output = Result<(), GuardRejection>> + Send + 'static,
{
	async fn check(
		&self,
		to: &Location,
		from: &Location,
		proceed: Proceed,
	) -> Result<(), GuardRejection> {
		(self.f)(to.clone(), from.clone(), proceed).await
	}
}

/// Wraps an async closure as a [`NavigationGuard`].
pub fn guard_fn<F, Fut>(f: F) -> Arc<dyn NavigationGuard>
where
	F: Fn(Location, Location, Proceed) -> Fut + Send + Sync + 'static,
	Fut: Future<Output = Result<(), GuardRejection>> + Send + 'static,
{
	Arc::new(FnGuard { f })
}
