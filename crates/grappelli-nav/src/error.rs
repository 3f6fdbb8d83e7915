//! Error types for navigation attempts.

use grappelli_history::HistoryError;
use grappelli_matcher::GuardRejection;
use std::time::Duration;
use thiserror::Error;

/// Why a navigation attempt did not commit.
///
/// Guard failures abort before COMMIT and leave the current location and
/// the history log untouched. A commit failure means the pipeline passed
/// but the environment refused the write; callers that retry should
/// treat the two differently.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NavigationError {
	/// A guard rejected the transition.
	#[error(transparent)]
	Guard(#[from] GuardRejection),
	/// A guard step neither resolved nor rejected within the configured
	/// timeout.
	#[error("navigation guard timed out after {0:?}")]
	GuardTimeout(Duration),
	/// The history environment refused the commit.
	#[error("history commit failed: {0}")]
	Commit(#[from] HistoryError),
	/// A newer navigation attempt started while this one was draining its
	/// guards; the commit was abandoned.
	#[error("navigation superseded by a newer attempt")]
	Superseded,
}
