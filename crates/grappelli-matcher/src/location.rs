//! Resolved locations.

use crate::record::RouteRecord;
use std::sync::Arc;

/// A path plus its root-to-leaf chain of matched records.
///
/// The distinguished start location (`path == "/"`, empty chain) represents
/// "no navigation has occurred yet"; the router uses it to detect the first
/// navigation and commit it via replace instead of push.
#[derive(Clone)]
pub struct Location {
	path: String,
	matched: Vec<Arc<RouteRecord>>,
	start: bool,
}

impl Location {
	/// Creates a resolved location.
	pub fn new(path: impl Into<String>, matched: Vec<Arc<RouteRecord>>) -> Self {
		Self {
			path: path.into(),
			matched,
			start: false,
		}
	}

	/// The sentinel start location.
	pub fn start() -> Self {
		Self {
			path: "/".to_string(),
			matched: Vec::new(),
			start: true,
		}
	}

	/// Returns whether this is the sentinel start location.
	pub fn is_start(&self) -> bool {
		self.start
	}

	/// Returns the location's path.
	pub fn path(&self) -> &str {
		&self.path
	}

	/// Returns the matched record chain, root first.
	pub fn matched(&self) -> &[Arc<RouteRecord>] {
		&self.matched
	}

	/// Returns the matched record at the given nesting depth, if any.
	pub fn record_at(&self, depth: usize) -> Option<&Arc<RouteRecord>> {
		self.matched.get(depth)
	}
}

impl std::fmt::Debug for Location {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Location")
			.field("path", &self.path)
			.field(
				"matched",
				&self.matched.iter().map(|r| r.path.as_str()).collect::<Vec<_>>(),
			)
			.field("start", &self.start)
			.finish()
	}
}
