//! The navigation-guard pipeline.

use crate::error::NavigationError;
use crate::step::run_guard_step;
use grappelli_matcher::{LifecycleKind, Location, NavigationGuard, RouteRecord};
use std::sync::Arc;
use std::time::Duration;

/// The matched records partitioned by how a transition affects them.
///
/// The three sequences are disjoint by path identity and each preserves
/// the root-to-leaf order of the chain it came from.
#[derive(Debug, Default)]
pub struct ChangedRecords {
	/// Records only `from` matches: their views are being torn down.
	pub leaving: Vec<Arc<RouteRecord>>,
	/// Records both chains match: their views stay mounted.
	pub updating: Vec<Arc<RouteRecord>>,
	/// Records only `to` matches: their views are being constructed.
	pub entering: Vec<Arc<RouteRecord>>,
}

/// Sequences the guard phases of one navigation attempt.
///
/// Each phase drains fully (every step in it resolves) before the next
/// phase starts; a rejecting or timed-out step aborts the pipeline and no
/// later phase runs. Canonical phase order:
///
/// 1. leaving records' leave guards, leaf to root (teardown unwinds
///    innermost-first);
/// 2. global before-each guards, registration order;
/// 3. updating records' update guards, root to leaf;
/// 4. route-configuration enter guards for every record of `to`, root to
///    leaf;
/// 5. entering records' enter guards, root to leaf (construction
///    initializes outermost-first);
/// 6. global before-resolve guards, registration order.
#[derive(Debug, Clone, Copy, Default)]
pub struct GuardPipeline {
	timeout: Option<Duration>,
}

impl GuardPipeline {
	/// Creates a pipeline with an optional per-step timeout.
	pub fn new(timeout: Option<Duration>) -> Self {
		Self { timeout }
	}

	/// Partitions the union of both matched chains by path identity.
	pub fn extract_change_records(to: &Location, from: &Location) -> ChangedRecords {
		let mut changed = ChangedRecords::default();
		let len = to.matched().len().max(from.matched().len());
		for i in 0..len {
			if let Some(record_from) = from.matched().get(i) {
				if to
					.matched()
					.iter()
					.any(|record| record.path == record_from.path)
				{
					changed.updating.push(Arc::clone(record_from));
				} else {
					changed.leaving.push(Arc::clone(record_from));
				}
			}
			if let Some(record_to) = to.matched().get(i) {
				if !from
					.matched()
					.iter()
					.any(|record| record.path == record_to.path)
				{
					changed.entering.push(Arc::clone(record_to));
				}
			}
		}
		changed
	}

	/// Collects the lifecycle guards of the given kind, in record order.
	pub fn extract_component_guards(
		records: &[Arc<RouteRecord>],
		kind: LifecycleKind,
	) -> Vec<Arc<dyn NavigationGuard>> {
		records
			.iter()
			.filter_map(|record| record.views.lifecycle_guard(kind))
			.collect()
	}

	/// Drains all six phases for the transition from `from` to `to`.
	pub async fn run(
		&self,
		to: &Location,
		from: &Location,
		before_each: &[Arc<dyn NavigationGuard>],
		before_resolve: &[Arc<dyn NavigationGuard>],
	) -> Result<(), NavigationError> {
		let changed = Self::extract_change_records(to, from);

		let mut leaving = changed.leaving.clone();
		leaving.reverse();
		self.drain(
			"leave",
			&Self::extract_component_guards(&leaving, LifecycleKind::Leave),
			to,
			from,
		)
		.await?;

		self.drain("before_each", before_each, to, from).await?;

		self.drain(
			"update",
			&Self::extract_component_guards(&changed.updating, LifecycleKind::Update),
			to,
			from,
		)
		.await?;

		let enter_config: Vec<Arc<dyn NavigationGuard>> = to
			.matched()
			.iter()
			.filter_map(|record| record.before_enter.clone())
			.collect();
		self.drain("before_enter", &enter_config, to, from).await?;

		self.drain(
			"enter",
			&Self::extract_component_guards(&changed.entering, LifecycleKind::Enter),
			to,
			from,
		)
		.await?;

		self.drain("before_resolve", before_resolve, to, from)
			.await?;

		Ok(())
	}

	/// Resolves every step of one phase, strictly in order.
	async fn drain(
		&self,
		phase: &'static str,
		guards: &[Arc<dyn NavigationGuard>],
		to: &Location,
		from: &Location,
	) -> Result<(), NavigationError> {
		if guards.is_empty() {
			return Ok(());
		}
		tracing::trace!(phase, steps = guards.len(), "draining guard phase");
		for guard in guards {
			run_guard_step(guard, to, from, self.timeout).await?;
		}
		Ok(())
	}
}
