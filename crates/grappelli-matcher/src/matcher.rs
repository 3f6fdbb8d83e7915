//! The matcher tree and flat lookup registry.

use crate::location::Location;
use crate::record::{RouteDefinition, RouteRecord};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::{Arc, Weak};

/// One node of the matcher tree.
///
/// Holds the normalized record, a weak back-reference to its parent (lookup
/// only, never ownership) and the forward list of child nodes. Nodes are
/// created once at router construction and are immutable thereafter.
pub struct MatcherNode {
	path: String,
	record: Arc<RouteRecord>,
	parent: Weak<MatcherNode>,
	children: RwLock<Vec<Arc<MatcherNode>>>,
}

impl MatcherNode {
	/// Returns the node's absolute path.
	pub fn path(&self) -> &str {
		&self.path
	}

	/// Returns the normalized record.
	pub fn record(&self) -> &Arc<RouteRecord> {
		&self.record
	}

	/// Returns the parent node, if this node is nested.
	pub fn parent(&self) -> Option<Arc<MatcherNode>> {
		self.parent.upgrade()
	}

	/// Returns the child nodes, in definition order.
	pub fn children(&self) -> Vec<Arc<MatcherNode>> {
		self.children.read().clone()
	}
}

impl std::fmt::Debug for MatcherNode {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("MatcherNode")
			.field("path", &self.path)
			.field("has_parent", &self.parent.upgrade().is_some())
			.field("children", &self.children.read().len())
			.finish()
	}
}

/// Builds the path tree from static route definitions and resolves paths
/// into root-to-leaf record chains.
#[derive(Debug)]
pub struct RouterMatcher {
	/// Flat lookup registry, in leaf-first (post-order) registration order:
	/// children register before their parent, subtrees in definition order.
	registry: Vec<Arc<MatcherNode>>,
	/// Name index; the first registration of a name wins.
	names: HashMap<String, Arc<MatcherNode>>,
}

impl RouterMatcher {
	/// Builds the tree from top-level definitions.
	pub fn new(routes: Vec<RouteDefinition>) -> Self {
		let mut matcher = Self {
			registry: Vec::new(),
			names: HashMap::new(),
		};
		for route in routes {
			matcher.add_route(route, None);
		}
		matcher
	}

	/// Normalizes a definition under `parent` and registers it and all of
	/// its children.
	pub fn add_route(&mut self, definition: RouteDefinition, parent: Option<&Arc<MatcherNode>>) {
		let record = Arc::new(definition.normalize(parent.map(|p| p.path())));
		let node = Arc::new(MatcherNode {
			path: record.path.clone(),
			record: Arc::clone(&record),
			parent: parent.map(Arc::downgrade).unwrap_or_default(),
			children: RwLock::new(Vec::new()),
		});
		if let Some(parent) = parent {
			parent.children.write().push(Arc::clone(&node));
		}
		for child in record.children.clone() {
			self.add_route(child, Some(&node));
		}
		// Post-order registration: the subtree is in the registry before
		// the node itself, which fixes the tie-break for duplicate paths.
		if let Some(name) = record.name.clone() {
			self.names.entry(name).or_insert_with(|| Arc::clone(&node));
		}
		self.registry.push(node);
	}

	/// Resolves a path into a [`Location`].
	///
	/// Lookup is first-exact-match on the full path string: no pattern
	/// matching, no trailing-slash normalization, no parameter extraction.
	/// An unmatched path yields an empty chain, not an error. On a hit the
	/// parent chain is walked to the root so `matched` is ordered root to
	/// leaf.
	pub fn resolve(&self, path: &str) -> Location {
		let mut matched = Vec::new();
		let mut cursor = self
			.registry
			.iter()
			.find(|node| node.path == path)
			.cloned();
		while let Some(node) = cursor {
			matched.push(Arc::clone(&node.record));
			cursor = node.parent.upgrade();
		}
		matched.reverse();
		Location::new(path, matched)
	}

	/// Looks a record up by route name.
	pub fn record_by_name(&self, name: &str) -> Option<Arc<RouteRecord>> {
		self.names.get(name).map(|node| Arc::clone(&node.record))
	}

	/// Returns whether a route name is registered.
	pub fn has_route(&self, name: &str) -> bool {
		self.names.contains_key(name)
	}

	/// Returns the number of registered nodes.
	pub fn route_count(&self) -> usize {
		self.registry.len()
	}
}
