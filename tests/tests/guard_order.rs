//! Guard phase ordering across full navigation cycles.
//!
//! The canonical order is leave → before_each → update → before_enter →
//! enter → before_resolve, with leave draining leaf to root and the
//! other record-bound phases root to leaf, regardless of how many
//! records change.

use grappelli::{HistoryEnvironment, MemoryEnvironment, RouteDefinition, Router, SessionHistory};
use grappelli_integration_tests::harness::{EventLog, TrackingView, rejecting_guard, tracking_guard};
use std::sync::Arc;

fn instrumented_router(log: &EventLog, env: &Arc<MemoryEnvironment>) -> Router {
	let history = SessionHistory::new(Arc::clone(env) as Arc<dyn HistoryEnvironment>).unwrap();
	let router = Router::builder(history)
		.route(
			RouteDefinition::new("/")
				.with_component(TrackingView::new("root", log))
				.with_before_enter(tracking_guard(log, "config:root"))
				.with_child(RouteDefinition::new("one").with_component(TrackingView::new("one", log)))
				.with_child(
					RouteDefinition::new("two")
						.with_component(TrackingView::new("two", log))
						.with_before_enter(tracking_guard(log, "config:two")),
				),
		)
		.route(RouteDefinition::new("/about").with_component(TrackingView::new("about", log)))
		.build();
	router.before_each(tracking_guard(log, "before_each"));
	router.before_resolve(tracking_guard(log, "before_resolve"));
	let after = log.clone();
	router.after_each(move |_to, _from| after.record("after"));
	router
}

#[tokio::test]
async fn first_navigation_enters_root_first() {
	let log = EventLog::new();
	let env = Arc::new(MemoryEnvironment::new());
	let router = instrumented_router(&log, &env);

	router.push("/one").await.unwrap();
	assert_eq!(
		log.snapshot(),
		vec![
			"before_each",
			"config:root",
			"enter:root",
			"enter:one",
			"before_resolve",
			"after",
		]
	);
}

#[tokio::test]
async fn sibling_swap_runs_every_phase_in_order() {
	let log = EventLog::new();
	let env = Arc::new(MemoryEnvironment::new());
	let router = instrumented_router(&log, &env);
	router.push("/one").await.unwrap();
	log.clear();

	router.push("/two").await.unwrap();
	assert_eq!(
		log.snapshot(),
		vec![
			"leave:one",
			"before_each",
			"update:root",
			"config:root",
			"config:two",
			"enter:two",
			"before_resolve",
			"after",
		]
	);
}

#[tokio::test]
async fn leave_drains_leaf_to_root() {
	let log = EventLog::new();
	let env = Arc::new(MemoryEnvironment::new());
	let history = SessionHistory::new(Arc::clone(&env) as Arc<dyn HistoryEnvironment>).unwrap();
	let router = Router::builder(history)
		.route(
			RouteDefinition::new("/")
				.with_component(TrackingView::new("root", &log))
				.with_child(
					RouteDefinition::new("settings")
						.with_component(TrackingView::new("settings", &log))
						.with_child(
							RouteDefinition::new("/profile")
								.with_component(TrackingView::new("profile", &log)),
						),
				),
		)
		.route(RouteDefinition::new("/about").with_component(TrackingView::new("about", &log)))
		.build();

	router.push("/settings/profile").await.unwrap();
	assert_eq!(
		log.snapshot(),
		vec!["enter:root", "enter:settings", "enter:profile"]
	);
	log.clear();

	// The whole chain unwinds; teardown must be innermost-first.
	router.push("/about").await.unwrap();
	assert_eq!(
		log.snapshot(),
		vec![
			"leave:profile",
			"leave:settings",
			"leave:root",
			"enter:about",
		]
	);
}

#[tokio::test]
async fn rejection_stops_all_later_phases() {
	let log = EventLog::new();
	let env = Arc::new(MemoryEnvironment::new());
	let router = instrumented_router(&log, &env);
	router.push("/one").await.unwrap();
	log.clear();

	router.before_each(rejecting_guard(&log, "gatekeeper"));
	let result = router.push("/two").await;
	assert!(result.is_err());

	// The leave phase ran, the first before_each guard ran, the rejecting
	// guard fired, and nothing after it.
	assert_eq!(
		log.snapshot(),
		vec!["leave:one", "before_each", "gatekeeper:rejected"]
	);
	assert_eq!(router.current().get().path(), "/one");
}
