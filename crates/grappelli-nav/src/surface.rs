//! The surface handed to rendering collaborators.
//!
//! Attaching a router yields a plain context object instead of a global
//! registration: the router handle, a reactive projection of the current
//! location, and the two UI primitives a rendering layer binds (link
//! activation and depth-keyed nested view slots).

use crate::error::NavigationError;
use crate::observable::Observable;
use crate::router::Router;
use grappelli_matcher::{Location, RouteRecord};
use std::sync::Arc;

/// Everything a rendering collaborator needs, returned by
/// [`Router::attach`].
#[derive(Debug, Clone)]
pub struct AttachedRouter {
	router: Router,
}

impl AttachedRouter {
	pub(crate) fn new(router: Router) -> Self {
		Self { router }
	}

	/// The router handle: navigation and guard registration.
	pub fn router(&self) -> &Router {
		&self.router
	}

	/// Reactive projection of the current location.
	pub fn route(&self) -> Observable<Location> {
		self.router.current()
	}

	/// Creates a link primitive targeting the given path.
	pub fn link(&self, to: impl Into<String>) -> NavLink {
		NavLink {
			router: self.router.clone(),
			to: to.into(),
			replace: false,
		}
	}

	/// Creates the root view slot (depth 0).
	pub fn outlet(&self) -> ViewOutlet {
		ViewOutlet {
			route: self.router.current(),
			depth: 0,
		}
	}
}

/// Link-activation primitive: a target path whose activation triggers a
/// navigation.
#[derive(Clone)]
pub struct NavLink {
	router: Router,
	to: String,
	replace: bool,
}

impl NavLink {
	/// Makes activation commit via replace instead of push.
	pub fn with_replace(mut self) -> Self {
		self.replace = true;
		self
	}

	/// The link's target path.
	pub fn target(&self) -> &str {
		&self.to
	}

	/// Runs the navigation this link stands for.
	pub async fn activate(&self) -> Result<(), NavigationError> {
		if self.replace {
			self.router.replace(&self.to).await
		} else {
			self.router.push(&self.to).await
		}
	}
}

impl std::fmt::Debug for NavLink {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("NavLink")
			.field("to", &self.to)
			.field("replace", &self.replace)
			.finish()
	}
}

/// Nested-view render slot, keyed by a depth counter that increments once
/// per nesting level.
///
/// The slot at depth `n` renders `matched[n]` of the current location; a
/// nested slot is obtained with [`ViewOutlet::child`]. An empty matched
/// chain (the "not found" contract) yields `None` at every depth; what
/// to render then is the collaborator's decision.
#[derive(Debug, Clone)]
pub struct ViewOutlet {
	route: Observable<Location>,
	depth: usize,
}

impl ViewOutlet {
	/// This slot's nesting depth.
	pub fn depth(&self) -> usize {
		self.depth
	}

	/// The record this slot currently renders, if the chain is deep
	/// enough.
	pub fn record(&self) -> Option<Arc<RouteRecord>> {
		self.route.get().record_at(self.depth).cloned()
	}

	/// The slot one nesting level deeper.
	pub fn child(&self) -> ViewOutlet {
		ViewOutlet {
			route: self.route.clone(),
			depth: self.depth + 1,
		}
	}
}
