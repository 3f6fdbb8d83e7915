//! Error types for history operations.

use thiserror::Error;

/// Errors surfaced by the history environment.
///
/// A failed write is reported to the router as a commit failure, distinct
/// from a guard rejection: the guard pipeline already passed when the
/// write was attempted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HistoryError {
	/// The environment refused to write the entry.
	#[error("history write rejected for {path}: {reason}")]
	WriteRejected {
		/// Path whose commit was refused.
		path: String,
		/// Environment-provided reason.
		reason: String,
	},
}
