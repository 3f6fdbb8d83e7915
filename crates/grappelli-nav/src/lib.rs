//! # Grappelli Nav
//!
//! Guard pipeline and router orchestration for the grappelli navigation
//! core.
//!
//! ## Overview
//!
//! Every navigation runs the same state machine:
//!
//! ```text
//! RESOLVE(to) → GUARD_PIPELINE(to, from) → COMMIT → NOTIFY
//! ```
//!
//! [`GuardPipeline`] partitions the matched chains of `to` and `from` into
//! leaving/updating/entering records and drains six guard phases in a fixed
//! canonical order, each phase fully resolving before the next starts. A
//! rejecting (or timed-out) guard aborts the pipeline before anything is
//! committed.
//!
//! [`Router`] orchestrates the cycle, commits through the session history
//! (replace for the first navigation and for back/forward replay, push
//! otherwise), publishes the committed location through an [`Observable`]
//! cell, and replays the same pipeline when the environment delivers a
//! back/forward traversal.

mod error;
mod observable;
mod pipeline;
mod router;
mod step;
mod surface;

pub use error::NavigationError;
pub use observable::Observable;
pub use pipeline::{ChangedRecords, GuardPipeline};
pub use router::{Router, RouterBuilder};
pub use surface::{AttachedRouter, NavLink, ViewOutlet};
