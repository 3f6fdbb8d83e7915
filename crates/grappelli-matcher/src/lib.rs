//! # Grappelli Matcher
//!
//! Route records, the matcher tree and path resolution for the grappelli
//! navigation core.
//!
//! ## Overview
//!
//! A router is configured from a nested list of [`RouteDefinition`]s. Each
//! definition is normalized into a [`RouteRecord`] whose `path` is the
//! concatenation of all ancestor prefixes, evaluated once at construction.
//! [`RouterMatcher::resolve`] looks a path up by exact string equality and
//! walks the parent chain of the matched node, producing a [`Location`]
//! whose `matched` chain is ordered root to leaf.
//!
//! An unmatched path resolves to an empty chain. That is the defined
//! "not found" contract, not an error; deciding what to render for an
//! empty chain belongs to the view layer.
//!
//! This crate is also the home of the capability seams carried by records:
//! the [`NavigationGuard`] trait with its one-shot [`ResolutionCell`], and
//! the [`ViewComponent`] lifecycle-capability trait.

mod component;
mod guard;
mod location;
mod matcher;
mod record;

pub use component::{LifecycleKind, RecordViews, ViewComponent};
pub use guard::{GuardRejection, NavigationGuard, Proceed, ResolutionCell, guard_fn};
pub use location::Location;
pub use matcher::{MatcherNode, RouterMatcher};
pub use record::{RouteDefinition, RouteRecord};
