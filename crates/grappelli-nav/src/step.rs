//! Drives a single guard step to resolution.

use crate::error::NavigationError;
use grappelli_matcher::{Location, NavigationGuard, Proceed, ResolutionCell};
use std::sync::Arc;
use std::time::Duration;

/// Runs one guard step and waits for its one-shot resolution.
///
/// The step resolves the first time either the guard calls `proceed()` or
/// the guard's own future completes (completion is an implicit proceed,
/// rejection aborts). If `proceed()` resolves the step while the guard
/// future is still pending, the future is dropped. A step that does
/// neither within the configured timeout fails the whole pipeline.
pub(crate) async fn run_guard_step(
	guard: &Arc<dyn NavigationGuard>,
	to: &Location,
	from: &Location,
	timeout: Option<Duration>,
) -> Result<(), NavigationError> {
	let cell = Arc::new(ResolutionCell::new());
	let proceed = Proceed::new(Arc::clone(&cell));
	let drive = async {
		let mut check = guard.check(to, from, proceed);
		tokio::select! {
			outcome = &mut check => {
				// First resolution wins: if the guard already proceeded,
				// its return value is dropped.
				cell.resolve(outcome);
			}
			outcome = cell.wait() => return outcome,
		}
		cell.wait().await
	};
	let outcome = match timeout {
		Some(limit) => tokio::time::timeout(limit, drive)
			.await
			.map_err(|_| NavigationError::GuardTimeout(limit))?,
		None => drive.await,
	};
	outcome.map_err(NavigationError::from)
}
