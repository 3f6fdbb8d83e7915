//! Back/forward replay, scroll restoration and guard hardening.

use grappelli::{
	GuardRejection, HistoryEntry, HistoryEnvironment, HistoryError, MemoryEnvironment,
	NavigationError, PopHandler, RouteDefinition, Router, ScrollOffset, SessionHistory, guard_fn,
};
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

fn flat_router(env: &Arc<MemoryEnvironment>) -> (Router, SessionHistory) {
	let history = SessionHistory::new(Arc::clone(env) as Arc<dyn HistoryEnvironment>).unwrap();
	let router = Router::builder(history.clone())
		.route(RouteDefinition::new("/"))
		.route(RouteDefinition::new("/a"))
		.route(RouteDefinition::new("/b"))
		.build();
	(router, history)
}

#[tokio::test]
async fn back_traversal_replays_and_restores_scroll() {
	let env = Arc::new(MemoryEnvironment::new());
	let (router, history) = flat_router(&env);

	// Observe deliveries before the router arms its own subscription so
	// the probe sees the delivered entry before the replay re-commits.
	let seen: Arc<Mutex<Vec<(String, String, bool, Option<ScrollOffset>)>>> =
		Arc::new(Mutex::new(Vec::new()));
	let sink = Arc::clone(&seen);
	let probe = history.clone();
	history.listen(move |to, from, info| {
		let sink = Arc::clone(&sink);
		let scroll = probe.state().scroll;
		async move {
			sink.lock().push((to, from, info.is_back, scroll));
		}
	});

	router.attach().await.unwrap();
	router.push("/a").await.unwrap();
	// The user scrolls on /a, then leaves it: the offsets are captured
	// against /a's entry at the moment push("/b") is issued.
	env.set_scroll(ScrollOffset::new(0.0, 420.0));
	router.push("/b").await.unwrap();
	assert_eq!(env.log_length(), 3);

	env.travel(-1).await;

	let events = seen.lock();
	assert_eq!(events.len(), 1);
	let (to, from, is_back, scroll) = &events[0];
	assert_eq!(to, "/a");
	assert_eq!(from, "/b");
	assert!(*is_back);
	assert_eq!(*scroll, Some(ScrollOffset::new(0.0, 420.0)));
	drop(events);

	// The router mirrored the traversal via replace: same stack depth,
	// pointer on /a, full pipeline run.
	assert_eq!(router.current().get().path(), "/a");
	assert_eq!(env.log_length(), 3);
	assert_eq!(env.active_index(), 1);
	assert_eq!(history.state().position, 1);
}

#[tokio::test]
async fn forward_traversal_is_classified_as_forward() {
	let env = Arc::new(MemoryEnvironment::new());
	let (router, history) = flat_router(&env);

	let seen: Arc<Mutex<Vec<bool>>> = Arc::new(Mutex::new(Vec::new()));
	let sink = Arc::clone(&seen);
	history.listen(move |_to, _from, info| {
		let sink = Arc::clone(&sink);
		async move {
			sink.lock().push(info.is_back);
		}
	});

	router.attach().await.unwrap();
	router.push("/a").await.unwrap();
	env.travel(-1).await;
	env.travel(1).await;

	assert_eq!(*seen.lock(), vec![true, false]);
	assert_eq!(router.current().get().path(), "/a");
}

#[tokio::test]
async fn rejected_replay_leaves_the_router_location_alone() {
	let env = Arc::new(MemoryEnvironment::new());
	let (router, history) = flat_router(&env);
	router.attach().await.unwrap();
	router.push("/a").await.unwrap();
	router.push("/b").await.unwrap();

	router.before_each(guard_fn(|_to, _from, _proceed| async move {
		Err(GuardRejection::new("locked"))
	}));

	env.travel(-1).await;

	// The environment's pointer moved and the session mirrors it, but the
	// router refused the replayed navigation and did not commit.
	assert_eq!(env.active_index(), 1);
	assert_eq!(history.location(), "/a");
	assert_eq!(router.current().get().path(), "/b");
}

#[tokio::test(start_paused = true)]
async fn hanging_guard_times_out_and_blocks_commit() {
	let env = Arc::new(MemoryEnvironment::new());
	let history = SessionHistory::new(Arc::clone(&env) as Arc<dyn HistoryEnvironment>).unwrap();
	let router = Router::builder(history)
		.route(RouteDefinition::new("/"))
		.route(RouteDefinition::new("/a"))
		.guard_timeout(Duration::from_secs(2))
		.build();

	router.before_each(guard_fn(|_to, _from, _proceed| async move {
		// Neither proceeds nor completes.
		std::future::pending::<()>().await;
		Ok(())
	}));

	let result = router.push("/a").await;
	assert_eq!(
		result,
		Err(NavigationError::GuardTimeout(Duration::from_secs(2)))
	);
	assert!(router.current().get().is_start());
	assert_eq!(env.log_length(), 1);
}

/// Environment that can be flipped into refusing every write.
struct RefusingEnvironment {
	inner: MemoryEnvironment,
	refuse: AtomicBool,
}

impl RefusingEnvironment {
	fn new() -> Self {
		Self {
			inner: MemoryEnvironment::new(),
			refuse: AtomicBool::new(false),
		}
	}
}

impl HistoryEnvironment for RefusingEnvironment {
	fn current_path(&self) -> String {
		self.inner.current_path()
	}

	fn log_length(&self) -> usize {
		self.inner.log_length()
	}

	fn state(&self) -> Option<HistoryEntry> {
		self.inner.state()
	}

	fn commit(&self, path: &str, state: &HistoryEntry, replace: bool) -> Result<(), HistoryError> {
		if self.refuse.load(Ordering::SeqCst) {
			return Err(HistoryError::WriteRejected {
				path: path.to_string(),
				reason: "log quota exhausted".to_string(),
			});
		}
		self.inner.commit(path, state, replace)
	}

	fn scroll_offset(&self) -> ScrollOffset {
		self.inner.scroll_offset()
	}

	fn set_pop_handler(&self, handler: PopHandler) {
		self.inner.set_pop_handler(handler)
	}
}

#[tokio::test]
async fn refused_write_surfaces_as_a_commit_failure() {
	let env = Arc::new(RefusingEnvironment::new());
	let history = SessionHistory::new(Arc::clone(&env) as Arc<dyn HistoryEnvironment>).unwrap();
	let router = Router::builder(history.clone())
		.route(RouteDefinition::new("/"))
		.route(RouteDefinition::new("/a"))
		.route(RouteDefinition::new("/b"))
		.build();
	router.push("/a").await.unwrap();

	env.refuse.store(true, Ordering::SeqCst);
	let result = router.push("/b").await;
	// Distinct from a guard failure: the pipeline passed, the write did
	// not. The router state stays on the last committed location.
	assert!(matches!(result, Err(NavigationError::Commit(_))));
	assert_eq!(router.current().get().path(), "/a");
	assert_eq!(history.location(), "/a");
}

#[tokio::test]
async fn positions_round_trip_over_push_and_replace() {
	let env = Arc::new(MemoryEnvironment::new());
	let (router, history) = flat_router(&env);
	router.attach().await.unwrap();

	let mut position = history.state().position;
	for path in ["/a", "/b"] {
		router.push(path).await.unwrap();
		assert_eq!(history.state().position, position + 1);
		position += 1;
	}
	router.replace("/a").await.unwrap();
	assert_eq!(history.state().position, position);
	router.push("/b").await.unwrap();
	assert_eq!(history.state().position, position + 1);
}
