//! In-memory history backend.
//!
//! [`MemoryHistory`] implements both platform capabilities over one shared
//! entry list and cursor. It backs the test suite and non-browser
//! embeddings.
//!
//! Semantics mirror the browser: `push_state`/`replace_state` mutate the
//! entry list without notifying (the router synthesizes that notification),
//! while `go`/`back`/`forward` fire the native-style notification
//! themselves. Out-of-range `go` deltas are ignored.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::error::NavigationError;
use crate::history::{HistorySource, ListenerId, NavigationListener, WindowSource};

const DEFAULT_BASE: &str = "http://localhost";

struct MemoryHistoryInner {
	base: String,
	entries: RefCell<Vec<String>>,
	index: Cell<usize>,
	listeners: RefCell<Vec<(ListenerId, NavigationListener)>>,
	next_id: Cell<ListenerId>,
}

/// An in-memory platform history plus window, sharing one entry list.
///
/// Cloning yields another handle onto the same history, so the same value
/// can serve as both the [`HistorySource`] and the [`WindowSource`] of a
/// router.
#[derive(Clone)]
pub struct MemoryHistory {
	inner: Rc<MemoryHistoryInner>,
}

impl MemoryHistory {
	/// Creates a history seeded with the given entries, cursor at the
	/// first one. With no entries, starts at `/`.
	pub fn new(entries: &[&str]) -> Self {
		Self::with_base(DEFAULT_BASE, entries)
	}

	/// Creates a history resolving relative entries against `base`.
	pub fn with_base(base: &str, entries: &[&str]) -> Self {
		let base = base.trim_end_matches('/').to_string();
		let seeded: Vec<String> = if entries.is_empty() {
			vec![format!("{}/", base)]
		} else {
			entries
				.iter()
				.map(|url| Self::resolve_against(&base, url))
				.collect()
		};
		Self {
			inner: Rc::new(MemoryHistoryInner {
				base,
				entries: RefCell::new(seeded),
				index: Cell::new(0),
				listeners: RefCell::new(Vec::new()),
				next_id: Cell::new(0),
			}),
		}
	}

	/// Number of entries currently in the history.
	pub fn len(&self) -> usize {
		self.inner.entries.borrow().len()
	}

	/// Whether the history holds no entries. Always false in practice.
	pub fn is_empty(&self) -> bool {
		self.inner.entries.borrow().is_empty()
	}

	/// Current cursor position. Invariant: `index < len`.
	pub fn index(&self) -> usize {
		self.inner.index.get()
	}

	/// The full URL of the entry at `index`, if any.
	pub fn entry_at(&self, index: usize) -> Option<String> {
		self.inner.entries.borrow().get(index).cloned()
	}

	fn resolve_against(base: &str, url: &str) -> String {
		if url.contains("://") {
			url.to_string()
		} else {
			format!("{}{}", base, url)
		}
	}

	fn resolve(&self, url: &str) -> String {
		Self::resolve_against(&self.inner.base, url)
	}

	fn notify(&self) {
		// Snapshot first: listeners may register or deregister re-entrantly.
		let listeners: Vec<NavigationListener> = self
			.inner
			.listeners
			.borrow()
			.iter()
			.map(|(_, l)| Rc::clone(l))
			.collect();
		for listener in listeners {
			listener();
		}
	}
}

impl HistorySource for MemoryHistory {
	fn push_state(&self, url: &str) -> Result<(), NavigationError> {
		let href = self.resolve(url);
		let mut entries = self.inner.entries.borrow_mut();
		let index = self.inner.index.get();
		entries.truncate(index + 1);
		entries.push(href);
		self.inner.index.set(index + 1);
		Ok(())
	}

	fn replace_state(&self, url: &str) -> Result<(), NavigationError> {
		let href = self.resolve(url);
		let index = self.inner.index.get();
		self.inner.entries.borrow_mut()[index] = href;
		Ok(())
	}

	fn go(&self, delta: i32) {
		let target = self.inner.index.get() as i64 + delta as i64;
		let len = self.inner.entries.borrow().len() as i64;
		if target < 0 || target >= len {
			// Browsers ignore out-of-range traversals.
			return;
		}
		self.inner.index.set(target as usize);
		self.notify();
	}

	fn back(&self) {
		self.go(-1);
	}

	fn forward(&self) {
		self.go(1);
	}
}

impl WindowSource for MemoryHistory {
	fn href(&self) -> String {
		let index = self.inner.index.get();
		self.inner.entries.borrow()[index].clone()
	}

	fn add_listener(&self, listener: NavigationListener) -> ListenerId {
		let id = self.inner.next_id.get();
		self.inner.next_id.set(id + 1);
		self.inner.listeners.borrow_mut().push((id, listener));
		id
	}

	fn remove_listener(&self, id: ListenerId) {
		self.inner.listeners.borrow_mut().retain(|(l, _)| *l != id);
	}

	fn dispatch(&self) {
		self.notify();
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_seeds_entries_with_base() {
		let history = MemoryHistory::new(&["/a/1", "/b/2"]);
		assert_eq!(history.len(), 2);
		assert_eq!(history.index(), 0);
		assert_eq!(history.href(), "http://localhost/a/1");
	}

	#[test]
	fn test_empty_seed_defaults_to_root() {
		let history = MemoryHistory::new(&[]);
		assert_eq!(history.len(), 1);
		assert_eq!(history.href(), "http://localhost/");
	}

	#[test]
	fn test_push_appends_and_advances() {
		let history = MemoryHistory::new(&["/a"]);
		history.push_state("/b").unwrap();
		assert_eq!(history.len(), 2);
		assert_eq!(history.index(), 1);
		assert_eq!(history.href(), "http://localhost/b");
	}

	#[test]
	fn test_push_truncates_forward_entries() {
		let history = MemoryHistory::new(&["/a", "/b", "/c"]);
		history.go(1);
		assert_eq!(history.index(), 1);
		history.push_state("/d").unwrap();
		assert_eq!(history.len(), 3);
		assert_eq!(history.entry_at(2), Some("http://localhost/d".to_string()));
	}

	#[test]
	fn test_replace_keeps_length_and_cursor() {
		let history = MemoryHistory::new(&["/a", "/b"]);
		history.replace_state("/z").unwrap();
		assert_eq!(history.len(), 2);
		assert_eq!(history.index(), 0);
		assert_eq!(history.href(), "http://localhost/z");
	}

	#[test]
	fn test_go_notifies_listeners() {
		let history = MemoryHistory::new(&["/a", "/b"]);
		let fired = Rc::new(Cell::new(0));
		let observed = Rc::clone(&fired);
		history.add_listener(Rc::new(move || observed.set(observed.get() + 1)));
		history.go(1);
		assert_eq!(fired.get(), 1);
		history.back();
		assert_eq!(fired.get(), 2);
	}

	#[test]
	fn test_push_and_replace_do_not_notify() {
		let history = MemoryHistory::new(&["/a"]);
		let fired = Rc::new(Cell::new(0));
		let observed = Rc::clone(&fired);
		history.add_listener(Rc::new(move || observed.set(observed.get() + 1)));
		history.push_state("/b").unwrap();
		history.replace_state("/c").unwrap();
		assert_eq!(fired.get(), 0);
	}

	#[test]
	fn test_out_of_range_go_is_ignored() {
		let history = MemoryHistory::new(&["/a", "/b"]);
		history.go(5);
		assert_eq!(history.index(), 0);
		history.go(-1);
		assert_eq!(history.index(), 0);
	}

	#[test]
	fn test_removed_listener_stops_firing() {
		let history = MemoryHistory::new(&["/a", "/b"]);
		let fired = Rc::new(Cell::new(0));
		let observed = Rc::clone(&fired);
		let id = history.add_listener(Rc::new(move || observed.set(observed.get() + 1)));
		history.go(1);
		history.remove_listener(id);
		history.go(-1);
		assert_eq!(fired.get(), 1);
	}

	#[test]
	fn test_absolute_entry_bypasses_base() {
		let history = MemoryHistory::new(&["https://example.com/x"]);
		assert_eq!(history.href(), "https://example.com/x");
	}
}
