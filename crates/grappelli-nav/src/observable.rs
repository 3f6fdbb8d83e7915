//! A thread-safe reactive value cell.

use parking_lot::RwLock;
use std::sync::Arc;

type Subscriber<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Inner<T> {
	value: RwLock<T>,
	subscribers: RwLock<Vec<Subscriber<T>>>,
}

/// A value that notifies subscribers on every change.
///
/// The router publishes the committed [`Location`](grappelli_matcher::Location)
/// through one of these; rendering collaborators subscribe to re-render.
/// Clones share the same underlying cell. Subscribers are invoked
/// synchronously, in registration order, with no locks held.
pub struct Observable<T> {
	inner: Arc<Inner<T>>,
}

impl<T: Clone> Observable<T> {
	/// Creates a cell holding the initial value.
	pub fn new(value: T) -> Self {
		Self {
			inner: Arc::new(Inner {
				value: RwLock::new(value),
				subscribers: RwLock::new(Vec::new()),
			}),
		}
	}

	/// Returns a clone of the current value.
	pub fn get(&self) -> T {
		self.inner.value.read().clone()
	}

	/// Replaces the value and notifies subscribers.
	pub fn set(&self, value: T) {
		*self.inner.value.write() = value;
		self.notify();
	}

	/// Mutates the value in place and notifies subscribers.
	pub fn update(&self, f: impl FnOnce(&mut T)) {
		f(&mut self.inner.value.write());
		self.notify();
	}

	/// Registers a subscriber invoked on every change.
	pub fn subscribe(&self, subscriber: impl Fn(&T) + Send + Sync + 'static) {
		self.inner.subscribers.write().push(Arc::new(subscriber));
	}

	fn notify(&self) {
		let subscribers = self.inner.subscribers.read().clone();
		let value = self.inner.value.read().clone();
		for subscriber in subscribers {
			subscriber(&value);
		}
	}
}

impl<T> Clone for Observable<T> {
	fn clone(&self) -> Self {
		Self {
			inner: Arc::clone(&self.inner),
		}
	}
}

impl<T: std::fmt::Debug> std::fmt::Debug for Observable<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Observable")
			.field("value", &*self.inner.value.read())
			.field("subscribers", &self.inner.subscribers.read().len())
			.finish()
	}
}
