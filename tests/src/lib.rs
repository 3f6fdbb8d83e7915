//! Shared harness for the end-to-end navigation tests.

pub mod harness {
	use grappelli::{GuardRejection, NavigationGuard, ViewComponent, guard_fn};
	use parking_lot::Mutex;
	use std::sync::Arc;

	/// Ordered record of instrumented guard invocations.
	#[derive(Clone, Default)]
	pub struct EventLog {
		events: Arc<Mutex<Vec<String>>>,
	}

	impl EventLog {
		pub fn new() -> Self {
			Self::default()
		}

		pub fn record(&self, event: impl Into<String>) {
			self.events.lock().push(event.into());
		}

		pub fn snapshot(&self) -> Vec<String> {
			self.events.lock().clone()
		}

		pub fn clear(&self) {
			self.events.lock().clear();
		}
	}

	/// A guard that logs its label and proceeds.
	pub fn tracking_guard(log: &EventLog, label: impl Into<String>) -> Arc<dyn NavigationGuard> {
		let log = log.clone();
		let label = label.into();
		guard_fn(move |_to, _from, proceed| {
			let log = log.clone();
			let label = label.clone();
			async move {
				log.record(label);
				proceed.proceed();
				Ok(())
			}
		})
	}

	/// A guard that logs its label and rejects.
	pub fn rejecting_guard(log: &EventLog, label: impl Into<String>) -> Arc<dyn NavigationGuard> {
		let log = log.clone();
		let label = label.into();
		guard_fn(move |_to, _from, _proceed| {
			let log = log.clone();
			let label = label.clone();
			async move {
				log.record(format!("{label}:rejected"));
				Err(GuardRejection::new(label.clone()))
			}
		})
	}

	/// A view whose three lifecycle guards log `<kind>:<label>`.
	pub struct TrackingView {
		label: String,
		log: EventLog,
	}

	impl TrackingView {
		pub fn new(label: impl Into<String>, log: &EventLog) -> Arc<Self> {
			Arc::new(Self {
				label: label.into(),
				log: log.clone(),
			})
		}
	}

	impl ViewComponent for TrackingView {
		fn before_route_enter(&self) -> Option<Arc<dyn NavigationGuard>> {
			Some(tracking_guard(&self.log, format!("enter:{}", self.label)))
		}

		fn before_route_update(&self) -> Option<Arc<dyn NavigationGuard>> {
			Some(tracking_guard(&self.log, format!("update:{}", self.label)))
		}

		fn before_route_leave(&self) -> Option<Arc<dyn NavigationGuard>> {
			Some(tracking_guard(&self.log, format!("leave:{}", self.label)))
		}
	}
}
