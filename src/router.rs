//! The navigation adapter: platform history plus derived location.
//!
//! [`Router`] wraps a [`HistorySource`]/[`WindowSource`] pair. Its `push`
//! and `replace` mutate the platform entry and then synthesize one
//! navigation-changed dispatch so every observer re-derives the location;
//! `go`/`back`/`forward` delegate to the platform, which emits its own
//! notification.
//!
//! The current [`Location`] is recomputed from the platform's source of
//! truth inside the notification handler, never tracked independently, so
//! external history mutations cannot cause drift. Because the router's own
//! sync listener registers before any subscriber, a subscriber always
//! observes the already-refreshed location.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::NavigationError;
use crate::history::{HistorySource, Subscription, WindowSource};
use crate::location::Location;

struct RouterInner {
	history: Rc<dyn HistorySource>,
	window: Rc<dyn WindowSource>,
	location: Rc<RefCell<Location>>,
	// Keeps the location-sync listener registered for the router's lifetime.
	_sync: Subscription,
}

/// A handle onto one platform history. Cheap to clone.
#[derive(Clone)]
pub struct Router {
	inner: Rc<RouterInner>,
}

impl Router {
	/// Binds a router to a platform capability pair.
	///
	/// The current location is computed eagerly here, so a navigation
	/// performed immediately after construction (before any notification
	/// has fired) is observed correctly.
	pub fn new(history: Rc<dyn HistorySource>, window: Rc<dyn WindowSource>) -> Self {
		let location = Rc::new(RefCell::new(Location::from_href(&window.href())));

		let sync = {
			let location = Rc::clone(&location);
			let weak = Rc::downgrade(&window);
			let id = window.add_listener(Rc::new(move || {
				if let Some(window) = weak.upgrade() {
					*location.borrow_mut() = Location::from_href(&window.href());
				}
			}));
			Subscription::new(Rc::clone(&window), id)
		};

		Self {
			inner: Rc::new(RouterInner {
				history,
				window,
				location,
				_sync: sync,
			}),
		}
	}

	/// Binds a router to the real browser window and history.
	///
	/// # Errors
	///
	/// Fails fast with [`NavigationError::WindowUnavailable`] outside a
	/// browsing context.
	#[cfg(target_arch = "wasm32")]
	pub fn browser() -> Result<Self, NavigationError> {
		use crate::history::browser::{BrowserHistory, BrowserWindow};

		let window = web_sys::window().ok_or(NavigationError::WindowUnavailable)?;
		let history = window
			.history()
			.map_err(|_| NavigationError::WindowUnavailable)?;
		Ok(Self::new(
			Rc::new(BrowserHistory::new(history)),
			Rc::new(BrowserWindow::new(window)),
		))
	}

	/// Appends a history entry and notifies observers.
	pub fn push(&self, url: &str) -> Result<(), NavigationError> {
		self.inner.history.push_state(url)?;
		self.inner.window.dispatch();
		Ok(())
	}

	/// Replaces the current history entry and notifies observers.
	pub fn replace(&self, url: &str) -> Result<(), NavigationError> {
		self.inner.history.replace_state(url)?;
		self.inner.window.dispatch();
		Ok(())
	}

	/// Moves the cursor by `delta` entries. Platform-delegated.
	pub fn go(&self, delta: i32) {
		self.inner.history.go(delta);
	}

	/// Moves back one entry.
	pub fn back(&self) {
		self.inner.history.back();
	}

	/// Moves forward one entry.
	pub fn forward(&self) {
		self.inner.history.forward();
	}

	/// The current location snapshot.
	pub fn location(&self) -> Location {
		self.inner.location.borrow().clone()
	}

	/// Registers an observer for navigation changes.
	///
	/// The observer runs after the location store has been refreshed.
	/// Dropping the returned [`Subscription`] deregisters it.
	pub fn subscribe(&self, observer: impl Fn() + 'static) -> Subscription {
		let id = self.inner.window.add_listener(Rc::new(observer));
		Subscription::new(Rc::clone(&self.inner.window), id)
	}
}

impl std::fmt::Debug for Router {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Router")
			.field("location", &self.location())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::history::memory::MemoryHistory;
	use std::cell::Cell;

	fn router_over(entries: &[&str]) -> (Router, MemoryHistory) {
		let history = MemoryHistory::new(entries);
		let router = Router::new(Rc::new(history.clone()), Rc::new(history.clone()));
		(router, history)
	}

	#[test]
	fn test_initial_location_computed_eagerly() {
		let (router, _) = router_over(&["/a/1?x=1"]);
		assert_eq!(router.location().pathname(), "/a/1");
		assert_eq!(router.location().search(), "x=1");
	}

	#[test]
	fn test_push_grows_history_and_updates_location() {
		let (router, history) = router_over(&["/a"]);
		router.push("/b?x=2").unwrap();
		assert_eq!(history.len(), 2);
		assert_eq!(router.location().pathname(), "/b");
		assert_eq!(router.location().search(), "x=2");
	}

	#[test]
	fn test_push_truncates_forward_entries() {
		let (router, history) = router_over(&["/a", "/b", "/c"]);
		router.push("/d").unwrap();
		assert_eq!(history.len(), 2);
		assert_eq!(history.entry_at(1), Some("http://localhost/d".to_string()));
	}

	#[test]
	fn test_replace_keeps_history_length() {
		let (router, history) = router_over(&["/a", "/b"]);
		router.replace("/z").unwrap();
		assert_eq!(history.len(), 2);
		assert_eq!(router.location().pathname(), "/z");
	}

	#[test]
	fn test_go_back_forward_follow_platform_notifications() {
		let (router, _) = router_over(&["/a/1", "/b/2", "/c/3", "/d/4", "/e/5", "/f/6"]);
		router.forward();
		assert_eq!(router.location().pathname(), "/b/2");
		router.back();
		assert_eq!(router.location().pathname(), "/a/1");
		router.go(3);
		assert_eq!(router.location().pathname(), "/d/4");
	}

	#[test]
	fn test_subscriber_sees_refreshed_location() {
		let (router, _) = router_over(&["/a"]);
		let seen = Rc::new(RefCell::new(Vec::new()));
		let observer = {
			let seen = Rc::clone(&seen);
			let router = router.clone();
			move || seen.borrow_mut().push(router.location().pathname().to_string())
		};
		let sub = router.subscribe(observer);
		router.push("/b").unwrap();
		router.replace("/c").unwrap();
		assert_eq!(*seen.borrow(), vec!["/b".to_string(), "/c".to_string()]);
		drop(sub);
	}

	#[test]
	fn test_dropped_subscription_stops_observing() {
		let (router, _) = router_over(&["/a"]);
		let fired = Rc::new(Cell::new(0));
		let sub = {
			let fired = Rc::clone(&fired);
			router.subscribe(move || fired.set(fired.get() + 1))
		};
		router.push("/b").unwrap();
		drop(sub);
		router.push("/c").unwrap();
		assert_eq!(fired.get(), 1);
	}

	#[test]
	fn test_external_mutation_observed_on_next_notification() {
		// Another actor mutates the same platform history directly; the
		// router re-derives from the source of truth once notified.
		let (router, history) = router_over(&["/a"]);
		use crate::history::HistorySource;
		history.push_state("/external").unwrap();
		assert_eq!(router.location().pathname(), "/a");
		use crate::history::WindowSource;
		history.dispatch();
		assert_eq!(router.location().pathname(), "/external");
	}
}
