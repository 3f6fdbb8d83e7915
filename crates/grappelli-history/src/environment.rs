//! The environment seam behind the session history.

use crate::error::HistoryError;
use crate::state::{HistoryEntry, ScrollOffset};
use futures::future::BoxFuture;
use std::sync::Arc;

/// A back/forward traversal delivered by the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct PopEvent {
	/// Path of the slot the log pointer moved to.
	pub path: String,
	/// State stored in that slot.
	pub state: HistoryEntry,
}

/// Async handler invoked on every back/forward traversal.
pub type PopHandler = Arc<dyn Fn(PopEvent) -> BoxFuture<'static, ()> + Send + Sync>;

/// The session-log environment: URL source, log slots and traversal
/// signals.
///
/// [`SessionHistory`](crate::SessionHistory) is the only intended caller;
/// it owns the current location/state projections and treats this trait
/// purely as the storage and signal source underneath them.
pub trait HistoryEnvironment: Send + Sync {
	/// The environment's current URL path (including any base prefix).
	fn current_path(&self) -> String;

	/// Number of slots in the log.
	fn log_length(&self) -> usize;

	/// State stored in the active slot, if any has been written.
	fn state(&self) -> Option<HistoryEntry>;

	/// Writes an entry: `replace` overwrites the active slot in place,
	/// otherwise a new slot is appended (dropping any forward slots) and
	/// the pointer moves onto it.
	fn commit(&self, path: &str, state: &HistoryEntry, replace: bool) -> Result<(), HistoryError>;

	/// The current scroll offsets, for lazy capture before leaving an
	/// entry.
	fn scroll_offset(&self) -> ScrollOffset;

	/// Registers the handler invoked on back/forward traversal. A single
	/// handler is kept; registering again replaces it.
	fn set_pop_handler(&self, handler: PopHandler);
}
