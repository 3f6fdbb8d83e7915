//! # Grappelli History
//!
//! The session history state machine for the grappelli navigation core.
//!
//! ## Overview
//!
//! [`SessionHistory`] wraps an environment-owned history log behind the
//! contract the router consumes: a read-only current location and state,
//! `push`, `replace`, and a `listen` subscription for back/forward
//! traversal. Every log slot carries a [`HistoryEntry`] recording its
//! neighbors, a monotonic position, and lazily captured scroll offsets,
//! which together make back/forward replay and scroll restoration
//! possible.
//!
//! The environment itself (the URL source, the log and its traversal
//! events) sits behind the [`HistoryEnvironment`] trait.
//! [`MemoryEnvironment`] is the deterministic in-memory implementation
//! used for tests and host-side rendering; a browser binding is an
//! external collaborator.

mod environment;
mod error;
mod memory;
mod session;
mod state;

pub use environment::{HistoryEnvironment, PopEvent, PopHandler};
pub use error::HistoryError;
pub use memory::MemoryEnvironment;
pub use session::{PopInfo, SessionHistory};
pub use state::{HistoryEntry, ScrollOffset};
