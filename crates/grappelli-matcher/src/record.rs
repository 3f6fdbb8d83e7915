//! Route definitions and normalized records.

use crate::component::{RecordViews, ViewComponent};
use crate::guard::NavigationGuard;
use serde_json::{Map, Value};
use std::sync::Arc;

/// A raw route definition, as written by the application.
///
/// Definitions nest: a child's `path` is relative and is prefixed with its
/// parent's absolute path during normalization.
#[derive(Clone)]
pub struct RouteDefinition {
	path: String,
	name: Option<String>,
	meta: Option<Map<String, Value>>,
	before_enter: Option<Arc<dyn NavigationGuard>>,
	component: Option<Arc<dyn ViewComponent>>,
	children: Vec<RouteDefinition>,
}

impl RouteDefinition {
	/// Creates a definition for the given path.
	pub fn new(path: impl Into<String>) -> Self {
		Self {
			path: path.into(),
			name: None,
			meta: None,
			before_enter: None,
			component: None,
			children: Vec::new(),
		}
	}

	/// Sets the route name for name-based lookups.
	pub fn with_name(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());
		self
	}

	/// Sets the opaque meta bag.
	pub fn with_meta(mut self, meta: Map<String, Value>) -> Self {
		self.meta = Some(meta);
		self
	}

	/// Adds a single meta entry.
	pub fn with_meta_entry(mut self, key: impl Into<String>, value: Value) -> Self {
		self.meta
			.get_or_insert_with(Map::new)
			.insert(key.into(), value);
		self
	}

	/// Sets the per-route enter guard.
	pub fn with_before_enter(mut self, guard: Arc<dyn NavigationGuard>) -> Self {
		self.before_enter = Some(guard);
		self
	}

	/// Sets the view component rendered for this route.
	pub fn with_component(mut self, component: Arc<dyn ViewComponent>) -> Self {
		self.component = Some(component);
		self
	}

	/// Appends a child definition.
	pub fn with_child(mut self, child: RouteDefinition) -> Self {
		self.children.push(child);
		self
	}

	/// Returns the definition's (relative) path.
	pub fn path(&self) -> &str {
		&self.path
	}

	/// Returns the child definitions.
	pub fn children(&self) -> &[RouteDefinition] {
		&self.children
	}

	/// Normalizes into a [`RouteRecord`].
	///
	/// Missing `meta` becomes an empty map, the component is wrapped as the
	/// default view, and the path is prefixed with the parent's absolute
	/// path when one exists. The absolute path is computed here, once, and
	/// never recomputed.
	pub(crate) fn normalize(&self, parent_path: Option<&str>) -> RouteRecord {
		let path = match parent_path {
			Some(prefix) => format!("{}{}", prefix, self.path),
			None => self.path.clone(),
		};
		RouteRecord {
			path,
			name: self.name.clone(),
			meta: self.meta.clone().unwrap_or_default(),
			before_enter: self.before_enter.clone(),
			views: RecordViews::wrap(self.component.clone()),
			children: self.children.clone(),
		}
	}
}

impl std::fmt::Debug for RouteDefinition {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("RouteDefinition")
			.field("path", &self.path)
			.field("name", &self.name)
			.field("has_before_enter", &self.before_enter.is_some())
			.field("has_component", &self.component.is_some())
			.field("children", &self.children.len())
			.finish()
	}
}

/// A normalized route record.
///
/// `path` is absolute: the concatenation of every ancestor prefix with the
/// definition's own path. Records are shared via `Arc` between the matcher
/// tree and resolved [`crate::Location`] chains.
pub struct RouteRecord {
	/// Absolute path.
	pub path: String,
	/// Optional identifier for name-based lookups.
	pub name: Option<String>,
	/// Opaque key/value bag, empty by default.
	pub meta: Map<String, Value>,
	/// Route-configuration enter guard.
	pub before_enter: Option<Arc<dyn NavigationGuard>>,
	/// Named views, the raw component wrapped as `default`.
	pub views: RecordViews,
	/// Child definitions, empty by default.
	pub children: Vec<RouteDefinition>,
}

impl std::fmt::Debug for RouteRecord {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("RouteRecord")
			.field("path", &self.path)
			.field("name", &self.name)
			.field("meta", &self.meta)
			.field("has_before_enter", &self.before_enter.is_some())
			.field("views", &self.views)
			.field("children", &self.children.len())
			.finish()
	}
}
