//! Timer capability for deferred work.
//!
//! The debounced write-back in [`crate::state`] is written against
//! [`TimerSource`] only. [`BrowserTimers`] maps onto `setTimeout`/
//! `clearTimeout`; [`ManualTimers`] is a deterministic clock for tests and
//! non-browser embeddings.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// A scheduled callback. Cancels on drop.
#[must_use = "dropping a TimerHandle cancels the scheduled callback"]
pub struct TimerHandle {
	cancel: Option<Box<dyn FnOnce()>>,
}

impl TimerHandle {
	/// Wraps a cancellation action.
	pub fn new(cancel: impl FnOnce() + 'static) -> Self {
		Self {
			cancel: Some(Box::new(cancel)),
		}
	}

	/// Cancels the scheduled callback explicitly.
	pub fn cancel(mut self) {
		if let Some(cancel) = self.cancel.take() {
			cancel();
		}
	}
}

impl Drop for TimerHandle {
	fn drop(&mut self) {
		if let Some(cancel) = self.cancel.take() {
			cancel();
		}
	}
}

impl std::fmt::Debug for TimerHandle {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("TimerHandle")
			.field("pending", &self.cancel.is_some())
			.finish()
	}
}

/// Capability for scheduling a one-shot deferred callback.
pub trait TimerSource {
	/// Runs `callback` once after `delay_ms`, unless the returned handle is
	/// cancelled (or dropped) first.
	fn schedule(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> TimerHandle;
}

struct QueuedTimer {
	id: u64,
	due: u64,
	callback: Box<dyn FnOnce()>,
}

#[derive(Default)]
struct ManualTimersInner {
	now: u64,
	next_id: u64,
	queue: Vec<QueuedTimer>,
}

/// A deterministic timer source driven by explicit [`advance`](Self::advance)
/// calls.
#[derive(Clone, Default)]
pub struct ManualTimers {
	inner: Rc<RefCell<ManualTimersInner>>,
}

impl ManualTimers {
	/// Creates a clock at time zero with no pending timers.
	pub fn new() -> Self {
		Self::default()
	}

	/// Advances the clock by `ms`, firing due callbacks in schedule order.
	pub fn advance(&self, ms: u32) {
		let due: Vec<QueuedTimer> = {
			let mut inner = self.inner.borrow_mut();
			inner.now += u64::from(ms);
			let now = inner.now;
			let mut fired = Vec::new();
			let mut remaining = Vec::new();
			for timer in inner.queue.drain(..) {
				if timer.due <= now {
					fired.push(timer);
				} else {
					remaining.push(timer);
				}
			}
			inner.queue = remaining;
			fired
		};
		// Run outside the borrow: callbacks may schedule or cancel timers.
		for timer in due {
			(timer.callback)();
		}
	}

	/// Number of callbacks still scheduled.
	pub fn pending(&self) -> usize {
		self.inner.borrow().queue.len()
	}
}

impl TimerSource for ManualTimers {
	fn schedule(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> TimerHandle {
		let id = {
			let mut inner = self.inner.borrow_mut();
			let id = inner.next_id;
			inner.next_id += 1;
			let due = inner.now + u64::from(delay_ms);
			inner.queue.push(QueuedTimer { id, due, callback });
			id
		};
		let weak: Weak<RefCell<ManualTimersInner>> = Rc::downgrade(&self.inner);
		TimerHandle::new(move || {
			if let Some(inner) = weak.upgrade() {
				inner.borrow_mut().queue.retain(|t| t.id != id);
			}
		})
	}
}

/// Timer source over the browser's `setTimeout`/`clearTimeout`.
#[cfg(target_arch = "wasm32")]
pub struct BrowserTimers {
	window: web_sys::Window,
}

#[cfg(target_arch = "wasm32")]
impl BrowserTimers {
	/// Wraps a platform window object.
	pub fn new(window: web_sys::Window) -> Self {
		Self { window }
	}
}

#[cfg(target_arch = "wasm32")]
impl TimerSource for BrowserTimers {
	fn schedule(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> TimerHandle {
		use wasm_bindgen::JsCast;
		use wasm_bindgen::closure::Closure;

		let closure = Closure::once(callback);
		let id = self
			.window
			.set_timeout_with_callback_and_timeout_and_arguments_0(
				closure.as_ref().unchecked_ref(),
				delay_ms as i32,
			)
			.unwrap_or(-1);
		let window = self.window.clone();
		// The closure is kept alive inside the cancel action; clearing an
		// already-fired timeout id is harmless.
		TimerHandle::new(move || {
			window.clear_timeout_with_handle(id);
			drop(closure);
		})
	}
}
