//! Router orchestration: resolve → guard pipeline → commit → notify.

use crate::error::NavigationError;
use crate::observable::Observable;
use crate::pipeline::GuardPipeline;
use crate::surface::AttachedRouter;
use grappelli_history::SessionHistory;
use grappelli_matcher::{Location, NavigationGuard, RouteDefinition, RouterMatcher};
use parking_lot::RwLock;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

type AfterEachHook = Arc<dyn Fn(&Location, &Location) + Send + Sync>;

struct RouterInner {
	matcher: RouterMatcher,
	history: SessionHistory,
	current: Observable<Location>,
	before_each: RwLock<Vec<Arc<dyn NavigationGuard>>>,
	before_resolve: RwLock<Vec<Arc<dyn NavigationGuard>>>,
	after_each: RwLock<Vec<AfterEachHook>>,
	/// Readiness flag: arms the back/forward subscription exactly once.
	ready: AtomicBool,
	/// Single-flight generation counter; a pipeline observing a stale
	/// generation at commit time abandons its own commit.
	generation: AtomicU64,
	guard_timeout: Option<Duration>,
}

/// The navigation orchestrator.
///
/// Clones share the same router; the handle is cheap to pass to guards
/// and rendering collaborators. All navigation entry points run the full
/// cycle: resolve the target, drain the guard pipeline, commit through
/// the session history, then notify the after-hooks.
///
/// The current location is only ever mutated inside COMMIT.
#[derive(Clone)]
pub struct Router {
	inner: Arc<RouterInner>,
}

impl Router {
	/// Starts building a router over the given session history.
	pub fn builder(history: SessionHistory) -> RouterBuilder {
		RouterBuilder {
			routes: Vec::new(),
			history,
			guard_timeout: None,
		}
	}

	/// Resolves a path against the route tree.
	pub fn resolve(&self, path: &str) -> Location {
		self.inner.matcher.resolve(path)
	}

	/// The observable current location.
	pub fn current(&self) -> Observable<Location> {
		self.inner.current.clone()
	}

	/// The underlying session history.
	pub fn history(&self) -> &SessionHistory {
		&self.inner.history
	}

	/// The route matcher.
	pub fn matcher(&self) -> &RouterMatcher {
		&self.inner.matcher
	}

	/// Registers a global guard run before every navigation.
	pub fn before_each(&self, guard: Arc<dyn NavigationGuard>) {
		self.inner.before_each.write().push(guard);
	}

	/// Registers a global guard run after enter guards, last before
	/// commit.
	pub fn before_resolve(&self, guard: Arc<dyn NavigationGuard>) {
		self.inner.before_resolve.write().push(guard);
	}

	/// Registers a hook invoked with `(to, from)` strictly after commit.
	pub fn after_each(&self, hook: impl Fn(&Location, &Location) + Send + Sync + 'static) {
		self.inner.after_each.write().push(Arc::new(hook));
	}

	/// Navigates to a path, committing via push.
	pub async fn push(&self, to: &str) -> Result<(), NavigationError> {
		let target = self.resolve(to);
		let from = self.inner.current.get();
		self.navigate(target, from, false).await
	}

	/// Navigates to a path, committing via replace.
	pub async fn replace(&self, to: &str) -> Result<(), NavigationError> {
		let target = self.resolve(to);
		let from = self.inner.current.get();
		self.navigate(target, from, true).await
	}

	/// Attaches the router to its consuming environment.
	///
	/// The first attach, while the current location is still the sentinel,
	/// issues one synthetic push to whatever the session history reports,
	/// guaranteeing exactly one real navigation cycle fires before
	/// anything is considered ready. Returns the surface a rendering
	/// collaborator needs.
	pub async fn attach(&self) -> Result<AttachedRouter, NavigationError> {
		if self.inner.current.get().is_start() {
			let location = self.inner.history.location();
			self.push(&location).await?;
		}
		Ok(AttachedRouter::new(self.clone()))
	}

	async fn navigate(
		&self,
		to: Location,
		from: Location,
		force_replace: bool,
	) -> Result<(), NavigationError> {
		let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
		tracing::debug!(to = %to.path(), from = %from.path(), generation, "navigation started");

		let before_each = self.inner.before_each.read().clone();
		let before_resolve = self.inner.before_resolve.read().clone();
		let pipeline = GuardPipeline::new(self.inner.guard_timeout);
		pipeline.run(&to, &from, &before_each, &before_resolve).await?;

		if self.inner.generation.load(Ordering::SeqCst) != generation {
			tracing::debug!(to = %to.path(), generation, "navigation superseded; abandoning commit");
			return Err(NavigationError::Superseded);
		}

		self.finalize(&to, &from, force_replace)?;
		self.notify(&to, &from);
		Ok(())
	}

	/// COMMIT: write the history log, publish the location, arm the
	/// back/forward subscription.
	fn finalize(
		&self,
		to: &Location,
		from: &Location,
		force_replace: bool,
	) -> Result<(), NavigationError> {
		if from.is_start() || force_replace {
			self.inner.history.replace(to.path(), None)?;
		} else {
			self.inner.history.push(to.path(), None)?;
		}
		self.inner.current.set(to.clone());
		self.mark_as_ready();
		tracing::debug!(to = %to.path(), "navigation committed");
		Ok(())
	}

	/// NOTIFY: after-hooks run strictly after commit.
	fn notify(&self, to: &Location, from: &Location) {
		let hooks = self.inner.after_each.read().clone();
		for hook in hooks {
			hook(to, from);
		}
	}

	fn mark_as_ready(&self) {
		if self.inner.ready.swap(true, Ordering::SeqCst) {
			return;
		}
		let weak = Arc::downgrade(&self.inner);
		self.inner.history.listen(move |to, _from, _info| {
			let weak = weak.clone();
			async move {
				let Some(inner) = weak.upgrade() else {
					return;
				};
				Router { inner }.replay(to).await;
			}
		});
	}

	/// Replays a back/forward traversal through the full pipeline.
	///
	/// The environment already moved its log pointer, so the commit is
	/// forced to replace; the router only mirrors it. There is no caller
	/// to propagate a failure to; an aborted replay is logged and the
	/// observable location is left unchanged.
	async fn replay(&self, to: String) {
		let target = self.resolve(&to);
		let from = self.inner.current.get();
		if let Err(error) = self.navigate(target, from, true).await {
			tracing::warn!(to = %to, error = %error, "back/forward replay aborted");
		}
	}
}

impl std::fmt::Debug for Router {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Router")
			.field("routes", &self.inner.matcher.route_count())
			.field("location", &self.inner.current.get().path())
			.field("ready", &self.inner.ready.load(Ordering::SeqCst))
			.finish()
	}
}

/// Builder for [`Router`].
#[derive(Debug)]
pub struct RouterBuilder {
	routes: Vec<RouteDefinition>,
	history: SessionHistory,
	guard_timeout: Option<Duration>,
}

impl RouterBuilder {
	/// Adds a top-level route definition.
	pub fn route(mut self, definition: RouteDefinition) -> Self {
		self.routes.push(definition);
		self
	}

	/// Adds several top-level route definitions.
	pub fn routes(mut self, definitions: impl IntoIterator<Item = RouteDefinition>) -> Self {
		self.routes.extend(definitions);
		self
	}

	/// Sets the per-guard-step timeout. Unset by default: a hanging guard
	/// then blocks its navigation forever.
	pub fn guard_timeout(mut self, timeout: Duration) -> Self {
		self.guard_timeout = Some(timeout);
		self
	}

	/// Builds the router; the current location starts at the sentinel.
	pub fn build(self) -> Router {
		Router {
			inner: Arc::new(RouterInner {
				matcher: RouterMatcher::new(self.routes),
				history: self.history,
				current: Observable::new(Location::start()),
				before_each: RwLock::new(Vec::new()),
				before_resolve: RwLock::new(Vec::new()),
				after_each: RwLock::new(Vec::new()),
				ready: AtomicBool::new(false),
				generation: AtomicU64::new(0),
				guard_timeout: self.guard_timeout,
			}),
		}
	}
}
