//! # Grappelli
//!
//! A client-side navigation core for single-page applications.
//!
//! Grappelli maps URL-like paths to an ordered chain of nested view records,
//! keeps that mapping synchronized with a session history log (back/forward
//! replay, scroll restoration), and runs an ordered pipeline of asynchronous
//! guards before any navigation is committed.
//!
//! ## Core Principles
//!
//! - **Composition over Inheritance**: view lifecycle hooks are explicit
//!   capability traits, not reflection-style property probing
//! - **Type Safety**: guard phases, history entries and resolved locations
//!   are concrete types checked at compile time
//! - **Async-First**: guards are async and drained strictly in order, with
//!   abort semantics and a configurable timeout
//! - **Deterministic**: the in-memory history environment replays
//!   back/forward traversal exactly, making navigation fully testable
//!
//! ## Architecture
//!
//! ```text
//! push(path) → RouterMatcher::resolve → GuardPipeline → COMMIT → NOTIFY
//!                                                         ↓
//!                                                  SessionHistory
//!                                                  (push/replace/listen)
//! ```
//!
//! The workspace is split leaf-first: [`grappelli_matcher`] resolves paths
//! into matched record chains, [`grappelli_history`] owns the history state
//! machine, and [`grappelli_nav`] orchestrates the two behind the guard
//! pipeline.
//!
//! ## Quick Example
//!
//! ```rust,ignore
//! use grappelli::prelude::*;
//! use std::sync::Arc;
//!
//! let env = Arc::new(MemoryEnvironment::new());
//! let history = SessionHistory::new(env)?;
//!
//! let router = Router::builder(history)
//!     .route(RouteDefinition::new("/").with_child(RouteDefinition::new("one")))
//!     .route(RouteDefinition::new("/about"))
//!     .build();
//!
//! router.before_each(guard_fn(|to, _from, proceed| async move {
//!     tracing::debug!(path = %to.path(), "navigating");
//!     proceed.proceed();
//!     Ok(())
//! }));
//!
//! let attached = router.attach().await?;
//! attached.router().push("/one").await?;
//! assert_eq!(attached.route().get().path(), "/one");
//! ```

pub use grappelli_history as history;
pub use grappelli_matcher as matcher;
pub use grappelli_nav as nav;

pub use grappelli_history::{
	HistoryEntry, HistoryEnvironment, HistoryError, MemoryEnvironment, PopEvent, PopHandler,
	PopInfo, ScrollOffset, SessionHistory,
};
pub use grappelli_matcher::{
	GuardRejection, LifecycleKind, Location, MatcherNode, NavigationGuard, Proceed, RecordViews,
	RouteDefinition, RouteRecord, RouterMatcher, ViewComponent, guard_fn,
};
pub use grappelli_nav::{
	AttachedRouter, ChangedRecords, GuardPipeline, NavLink, NavigationError, Observable, Router,
	RouterBuilder, ViewOutlet,
};

/// Commonly used items for building and driving a router.
pub mod prelude {
	pub use grappelli_history::{
		HistoryEntry, HistoryEnvironment, HistoryError, MemoryEnvironment, ScrollOffset,
		SessionHistory,
	};
	pub use grappelli_matcher::{
		GuardRejection, Location, NavigationGuard, Proceed, RouteDefinition, RouteRecord,
		ViewComponent, guard_fn,
	};
	pub use grappelli_nav::{AttachedRouter, NavigationError, Router, RouterBuilder};
}
