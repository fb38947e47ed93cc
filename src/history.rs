//! Platform history and window capabilities.
//!
//! The navigation core never references a concrete global. It is written
//! against two minimal capability traits, so tests and non-browser
//! embeddings can substitute their own platform:
//!
//! - [`HistorySource`]: the mutating subset of a platform history object.
//! - [`WindowSource`]: the current URL plus a single notification channel
//!   ("navigation changed") observers subscribe to.
//!
//! Both objects are process-wide singletons on a real platform; other code
//! may mutate the same history concurrently, so derived state must always
//! be recomputed from [`WindowSource::href`] rather than tracked
//! independently.

#[cfg(target_arch = "wasm32")]
pub mod browser;
pub mod memory;

use std::rc::Rc;

use crate::error::NavigationError;

/// Identifier of a registered navigation listener.
pub type ListenerId = u64;

/// A registered navigation-changed observer.
pub type NavigationListener = Rc<dyn Fn()>;

/// The mutating subset of a platform history object.
pub trait HistorySource {
	/// Appends a new entry at the cursor, truncating any forward entries.
	///
	/// URLs are not validated; a malformed URL propagates whatever error
	/// the platform raises.
	fn push_state(&self, url: &str) -> Result<(), NavigationError>;

	/// Replaces the entry at the cursor. Length and cursor are unchanged.
	fn replace_state(&self, url: &str) -> Result<(), NavigationError>;

	/// Moves the cursor by `delta` entries.
	///
	/// Out-of-range deltas are platform-delegated; browsers treat them as
	/// a no-op. The platform emits its own navigation notification
	/// asynchronously or synchronously as it sees fit.
	fn go(&self, delta: i32);

	/// Moves the cursor back one entry.
	fn back(&self);

	/// Moves the cursor forward one entry.
	fn forward(&self);
}

/// The observing subset of a platform window object.
pub trait WindowSource {
	/// The full URL of the current entry.
	fn href(&self) -> String;

	/// Registers a navigation-changed listener.
	///
	/// Listeners fire in registration order.
	fn add_listener(&self, listener: NavigationListener) -> ListenerId;

	/// Deregisters a previously added listener.
	fn remove_listener(&self, id: ListenerId);

	/// Fires the navigation-changed notification on all listeners.
	fn dispatch(&self);
}

/// A scoped listener registration.
///
/// Deregisters the listener when dropped, so observers cannot outlive the
/// scope that registered them.
#[must_use = "dropping a Subscription deregisters its listener"]
pub struct Subscription {
	window: Rc<dyn WindowSource>,
	id: ListenerId,
}

impl Subscription {
	/// Wraps a listener id registered on `window`.
	pub fn new(window: Rc<dyn WindowSource>, id: ListenerId) -> Self {
		Self { window, id }
	}
}

impl Drop for Subscription {
	fn drop(&mut self) {
		self.window.remove_listener(self.id);
	}
}

impl std::fmt::Debug for Subscription {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Subscription").field("id", &self.id).finish()
	}
}
