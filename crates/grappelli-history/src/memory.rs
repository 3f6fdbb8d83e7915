//! Deterministic in-memory history environment.

use crate::environment::{HistoryEnvironment, PopEvent, PopHandler};
use crate::error::HistoryError;
use crate::state::{HistoryEntry, ScrollOffset};
use parking_lot::RwLock;

/// One slot of the in-memory log.
#[derive(Debug, Clone)]
struct Slot {
	path: String,
	state: Option<HistoryEntry>,
}

#[derive(Debug)]
struct MemoryLog {
	slots: Vec<Slot>,
	index: usize,
}

/// In-memory history log with explicit back/forward traversal.
///
/// Mirrors the session-log behavior the navigation core depends on: one
/// initial slot with no stored state, replace overwriting in place, push
/// dropping all forward slots, and [`MemoryEnvironment::travel`] replaying
/// the pointer movement a back/forward button would cause. Deterministic,
/// so tests and host-side rendering can drive it directly.
pub struct MemoryEnvironment {
	log: RwLock<MemoryLog>,
	scroll: RwLock<ScrollOffset>,
	handler: RwLock<Option<PopHandler>>,
}

impl MemoryEnvironment {
	/// Creates a log with a single unwritten slot at `/`.
	pub fn new() -> Self {
		Self::with_start_path("/")
	}

	/// Creates a log whose initial slot sits at the given path.
	pub fn with_start_path(path: impl Into<String>) -> Self {
		Self {
			log: RwLock::new(MemoryLog {
				slots: vec![Slot {
					path: path.into(),
					state: None,
				}],
				index: 0,
			}),
			scroll: RwLock::new(ScrollOffset::default()),
			handler: RwLock::new(None),
		}
	}

	/// Simulates the user scrolling the page.
	pub fn set_scroll(&self, offset: ScrollOffset) {
		*self.scroll.write() = offset;
	}

	/// Moves the log pointer by `delta` slots and delivers the traversal,
	/// like a back (`delta < 0`) or forward (`delta > 0`) button press.
	///
	/// Out-of-range deltas are ignored. Slots never written by the
	/// adapter carry no state and are not delivered; the position-based
	/// back/forward classification needs a recorded position to compare
	/// against.
	pub async fn travel(&self, delta: i64) {
		let event = {
			let mut log = self.log.write();
			let target = log.index as i64 + delta;
			if target < 0 || target >= log.slots.len() as i64 {
				return;
			}
			log.index = target as usize;
			let slot = &log.slots[log.index];
			slot.state.as_ref().map(|state| PopEvent {
				path: slot.path.clone(),
				state: state.clone(),
			})
		};
		let Some(event) = event else {
			return;
		};
		let handler = self.handler.read().clone();
		if let Some(handler) = handler {
			handler(event).await;
		}
	}

	/// Returns the state stored in the given slot.
	pub fn slot_state(&self, index: usize) -> Option<HistoryEntry> {
		self.log.read().slots.get(index).and_then(|slot| slot.state.clone())
	}

	/// Returns the active slot index.
	pub fn active_index(&self) -> usize {
		self.log.read().index
	}
}

impl Default for MemoryEnvironment {
	fn default() -> Self {
		Self::new()
	}
}

impl std::fmt::Debug for MemoryEnvironment {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let log = self.log.read();
		f.debug_struct("MemoryEnvironment")
			.field("slots", &log.slots.len())
			.field("index", &log.index)
			.finish()
	}
}

impl HistoryEnvironment for MemoryEnvironment {
	fn current_path(&self) -> String {
		let log = self.log.read();
		log.slots[log.index].path.clone()
	}

	fn log_length(&self) -> usize {
		self.log.read().slots.len()
	}

	fn state(&self) -> Option<HistoryEntry> {
		let log = self.log.read();
		log.slots[log.index].state.clone()
	}

	fn commit(&self, path: &str, state: &HistoryEntry, replace: bool) -> Result<(), HistoryError> {
		let mut log = self.log.write();
		let slot = Slot {
			path: path.to_string(),
			state: Some(state.clone()),
		};
		if replace {
			let index = log.index;
			log.slots[index] = slot;
		} else {
			let index = log.index;
			log.slots.truncate(index + 1);
			log.slots.push(slot);
			log.index += 1;
		}
		Ok(())
	}

	fn scroll_offset(&self) -> ScrollOffset {
		*self.scroll.read()
	}

	fn set_pop_handler(&self, handler: PopHandler) {
		*self.handler.write() = Some(handler);
	}
}
