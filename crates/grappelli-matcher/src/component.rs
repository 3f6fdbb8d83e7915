//! View component handles and their lifecycle-guard capabilities.
//!
//! A matched record carries an opaque handle to the view it renders. The
//! hosting environment may attach navigation guards to a view's lifecycle;
//! those are discovered through explicit capability methods rather than
//! reflection-style property probing.

use crate::guard::NavigationGuard;
use std::sync::Arc;

/// Opaque handle to a view, carrying optional lifecycle guards.
///
/// All methods default to `None`; implementors override only the
/// lifecycle points they participate in.
pub trait ViewComponent: Send + Sync {
	/// Guard run when the view is about to be entered.
	fn before_route_enter(&self) -> Option<Arc<dyn NavigationGuard>> {
		None
	}

	/// Guard run when the view stays matched while the location changes.
	fn before_route_update(&self) -> Option<Arc<dyn NavigationGuard>> {
		None
	}

	/// Guard run when the view is about to be left.
	fn before_route_leave(&self) -> Option<Arc<dyn NavigationGuard>> {
		None
	}
}

/// Lifecycle points a view component can guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleKind {
	/// The view is entering the matched chain.
	Enter,
	/// The view stays in the chain while the location changes.
	Update,
	/// The view is leaving the matched chain.
	Leave,
}

/// Named views of a record.
///
/// Normalization wraps a record's raw component as the `default` view.
#[derive(Clone, Default)]
pub struct RecordViews {
	/// The default view, if the record renders one.
	pub default: Option<Arc<dyn ViewComponent>>,
}

impl RecordViews {
	/// Wraps a raw component handle as the default view.
	pub fn wrap(component: Option<Arc<dyn ViewComponent>>) -> Self {
		Self { default: component }
	}

	/// Looks up the lifecycle guard of the given kind on the default view.
	pub fn lifecycle_guard(&self, kind: LifecycleKind) -> Option<Arc<dyn NavigationGuard>> {
		let component = self.default.as_ref()?;
		match kind {
			LifecycleKind::Enter => component.before_route_enter(),
			LifecycleKind::Update => component.before_route_update(),
			LifecycleKind::Leave => component.before_route_leave(),
		}
	}
}

impl std::fmt::Debug for RecordViews {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("RecordViews")
			.field("has_default", &self.default.is_some())
			.finish()
	}
}
