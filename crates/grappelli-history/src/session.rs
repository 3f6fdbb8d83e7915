//! The session-history state machine.

use crate::environment::{HistoryEnvironment, PopEvent};
use crate::error::HistoryError;
use crate::state::HistoryEntry;
use futures::FutureExt;
use futures::future::BoxFuture;
use parking_lot::RwLock;
use serde_json::{Map, Value};
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

/// Traversal classification delivered to listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopInfo {
	/// `true` when the traversal moved to a lower position.
	pub is_back: bool,
}

type Listener = Arc<dyn Fn(String, String, PopInfo) -> BoxFuture<'static, ()> + Send + Sync>;

/// The mutable cells of the state machine, owned here exclusively.
///
/// `location` and `state` are exposed only as cloned read-only
/// projections; nothing outside this module mutates them.
struct HistoryCells {
	location: RwLock<String>,
	state: RwLock<HistoryEntry>,
	listeners: RwLock<Vec<Listener>>,
}

/// Wraps the environment's history log behind the contract the router
/// consumes: current location/state, `push`, `replace` and `listen`.
///
/// ## State machine
///
/// - **Bootstrap** derives the current location from the environment URL
///   (base prefix stripped) and, when the environment carries no prior
///   state, synthesizes the initial entry and commits it via replace:
///   the freshly loaded page must not add a stack slot a back button
///   could exit past.
/// - **push** commits twice: first it patches the entry being left
///   (forward pointer + captured scroll offsets, via replace), then it
///   appends the new entry with `position + 1`.
/// - **replace** reuses the active entry's neighbors and position and
///   overwrites the slot in place.
/// - **Traversal** delivered by the environment updates the cells and
///   fans out to listeners in registration order, classifying the move
///   by comparing positions.
#[derive(Clone)]
pub struct SessionHistory {
	env: Arc<dyn HistoryEnvironment>,
	cells: Arc<HistoryCells>,
}

impl SessionHistory {
	/// Creates a session history over the environment, with no base
	/// prefix.
	pub fn new(env: Arc<dyn HistoryEnvironment>) -> Result<Self, HistoryError> {
		Self::with_base(env, "")
	}

	/// Creates a session history whose URLs sit under a base prefix; the
	/// prefix is stripped when deriving the current location.
	pub fn with_base(
		env: Arc<dyn HistoryEnvironment>,
		base: impl AsRef<str>,
	) -> Result<Self, HistoryError> {
		let current = strip_base(&env.current_path(), base.as_ref());
		let (initial, synthesized) = match env.state() {
			Some(state) => (state, false),
			None => {
				let position = env.log_length() as i64 - 1;
				(
					HistoryEntry::new(None, current.clone(), None, true, position),
					true,
				)
			}
		};
		if synthesized {
			env.commit(&current, &initial, true)?;
			tracing::debug!(location = %current, position = initial.position, "synthesized initial history entry");
		}

		let cells = Arc::new(HistoryCells {
			location: RwLock::new(current),
			state: RwLock::new(initial),
			listeners: RwLock::new(Vec::new()),
		});

		let handler_cells = Arc::clone(&cells);
		env.set_pop_handler(Arc::new(move |event: PopEvent| {
			let cells = Arc::clone(&handler_cells);
			Box::pin(async move {
				deliver(cells, event).await;
			})
		}));

		Ok(Self { env, cells })
	}

	/// Read-only projection of the current location.
	pub fn location(&self) -> String {
		self.cells.location.read().clone()
	}

	/// Read-only projection of the current entry state.
	pub fn state(&self) -> HistoryEntry {
		self.cells.state.read().clone()
	}

	/// Pushes a new entry onto the log.
	///
	/// The entry being left is first re-committed with its forward
	/// pointer and the scroll offsets captured at this moment; that is
	/// what makes scroll restoration possible when the user later
	/// navigates back onto it.
	pub fn push(&self, to: &str, data: Option<Map<String, Value>>) -> Result<(), HistoryError> {
		let mut leaving = self.state();
		leaving.forward = Some(to.to_string());
		leaving.scroll = Some(self.env.scroll_offset());
		let leaving_path = leaving.current.clone();
		self.commit(&leaving_path, leaving, true)?;

		let previous = self.state();
		let mut entry = HistoryEntry::new(
			Some(previous.current.clone()),
			to,
			None,
			false,
			previous.position + 1,
		);
		if let Some(data) = data {
			entry.merge_data(data);
		}
		self.commit(to, entry, false)?;
		*self.cells.location.write() = to.to_string();
		Ok(())
	}

	/// Replaces the active entry in place.
	///
	/// The neighbors and the position are reused; only the current path
	/// (and any merged payload) changes. Stack depth is unchanged.
	pub fn replace(&self, to: &str, data: Option<Map<String, Value>>) -> Result<(), HistoryError> {
		let previous = self.state();
		let mut entry = HistoryEntry::new(
			previous.back.clone(),
			to,
			previous.forward.clone(),
			true,
			previous.position,
		);
		if let Some(data) = data {
			entry.merge_data(data);
		}
		self.commit(to, entry, true)?;
		*self.cells.location.write() = to.to_string();
		Ok(())
	}

	/// Registers a traversal listener, invoked as `(to, from, info)` in
	/// registration order.
	///
	/// There is no unsubscribe; listeners live as long as the session.
	pub fn listen<F, Fut>(&self, callback: F)
	where
		F: Fn(String, String, PopInfo) -> Fut + Send + Sync + 'static,
		Fut: Future<Output = ()> + Send + 'static,
	{
		let listener: Listener = Arc::new(move |to, from, info| Box::pin(callback(to, from, info)));
		self.cells.listeners.write().push(listener);
	}

	fn commit(&self, path: &str, state: HistoryEntry, replace: bool) -> Result<(), HistoryError> {
		self.env.commit(path, &state, replace)?;
		*self.cells.state.write() = state;
		Ok(())
	}
}

impl std::fmt::Debug for SessionHistory {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("SessionHistory")
			.field("location", &*self.cells.location.read())
			.field("position", &self.cells.state.read().position)
			.field("listeners", &self.cells.listeners.read().len())
			.finish()
	}
}

/// Applies a delivered traversal to the cells and fans it out.
///
/// A panicking listener must not suppress delivery to the listeners
/// registered after it; each invocation is isolated.
async fn deliver(cells: Arc<HistoryCells>, event: PopEvent) {
	let to = event.path.clone();
	let (from, previous_position) = {
		let from = cells.location.read().clone();
		let position = cells.state.read().position;
		(from, position)
	};
	*cells.location.write() = to.clone();
	*cells.state.write() = event.state.clone();

	let info = PopInfo {
		is_back: event.state.position - previous_position < 0,
	};
	let listeners = cells.listeners.read().clone();
	for listener in listeners {
		let outcome = AssertUnwindSafe(listener(to.clone(), from.clone(), info))
			.catch_unwind()
			.await;
		if outcome.is_err() {
			tracing::warn!(to = %to, from = %from, "history listener panicked; continuing delivery");
		}
	}
}

fn strip_base(path: &str, base: &str) -> String {
	if base.is_empty() {
		return path.to_string();
	}
	match path.strip_prefix(base) {
		Some("") => "/".to_string(),
		Some(rest) => rest.to_string(),
		None => path.to_string(),
	}
}
