//! History entry state committed into the log.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A captured scroll offset pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollOffset {
	/// Horizontal offset.
	pub left: f64,
	/// Vertical offset.
	pub top: f64,
}

impl ScrollOffset {
	/// Creates an offset pair.
	pub fn new(left: f64, top: f64) -> Self {
		Self { left, top }
	}
}

impl Default for ScrollOffset {
	fn default() -> Self {
		Self::new(0.0, 0.0)
	}
}

/// The state stored in one history-log slot.
///
/// `back` and `forward` reference the neighboring entries' paths (`None`
/// at the ends of the log). `position` is a monotonically adjusted counter
/// used solely to classify a traversal as backward (position decreases) or
/// forward (position increases). `scroll` is populated lazily, right
/// before the entry is left, so that a later back-navigation can restore
/// it. Caller-supplied opaque payloads are merged into `data` and cannot
/// clobber the structural fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
	/// Path of the previous entry, if any.
	pub back: Option<String>,
	/// Path of this entry.
	pub current: String,
	/// Path of the next entry, if any.
	pub forward: Option<String>,
	/// Whether this entry was committed via replace.
	pub replace: bool,
	/// Scroll offsets captured when this entry was last left.
	pub scroll: Option<ScrollOffset>,
	/// Monotonic position in the log.
	pub position: i64,
	/// Opaque caller-supplied payload.
	#[serde(default, skip_serializing_if = "Map::is_empty")]
	pub data: Map<String, Value>,
}

impl HistoryEntry {
	/// Builds an entry with an empty payload.
	pub fn new(
		back: Option<String>,
		current: impl Into<String>,
		forward: Option<String>,
		replace: bool,
		position: i64,
	) -> Self {
		Self {
			back,
			current: current.into(),
			forward,
			replace,
			scroll: None,
			position,
			data: Map::new(),
		}
	}

	/// Merges a caller-supplied payload into the entry.
	pub fn merge_data(&mut self, data: Map<String, Value>) {
		self.data.extend(data);
	}
}
