//! Browser history backend over `web-sys`.
//!
//! [`BrowserHistory`] and [`BrowserWindow`] adapt the real `History` and
//! `Window` globals to the capability traits. The notification channel is
//! the platform's own `popstate` event: the router's synthetic dispatch and
//! the browser's native back/forward events arrive through the same
//! listeners.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;

use crate::error::NavigationError;
use crate::history::{HistorySource, ListenerId, NavigationListener, WindowSource};

const NAVIGATION_EVENT: &str = "popstate";

fn write_error(err: JsValue) -> NavigationError {
	NavigationError::HistoryWrite(
		err.as_string()
			.unwrap_or_else(|| format!("{:?}", err)),
	)
}

/// [`HistorySource`] over `web_sys::History`.
pub struct BrowserHistory {
	history: web_sys::History,
}

impl BrowserHistory {
	/// Wraps a platform history object.
	pub fn new(history: web_sys::History) -> Self {
		Self { history }
	}
}

impl HistorySource for BrowserHistory {
	fn push_state(&self, url: &str) -> Result<(), NavigationError> {
		self.history
			.push_state_with_url(&JsValue::NULL, "", Some(url))
			.map_err(write_error)
	}

	fn replace_state(&self, url: &str) -> Result<(), NavigationError> {
		self.history
			.replace_state_with_url(&JsValue::NULL, "", Some(url))
			.map_err(write_error)
	}

	fn go(&self, delta: i32) {
		let _ = self.history.go_with_delta(delta);
	}

	fn back(&self) {
		let _ = self.history.back();
	}

	fn forward(&self) {
		let _ = self.history.forward();
	}
}

/// [`WindowSource`] over `web_sys::Window`, listening on `popstate`.
pub struct BrowserWindow {
	window: web_sys::Window,
	listeners: RefCell<HashMap<ListenerId, Closure<dyn FnMut()>>>,
	next_id: Cell<ListenerId>,
}

impl BrowserWindow {
	/// Wraps a platform window object.
	pub fn new(window: web_sys::Window) -> Self {
		Self {
			window,
			listeners: RefCell::new(HashMap::new()),
			next_id: Cell::new(0),
		}
	}
}

impl WindowSource for BrowserWindow {
	fn href(&self) -> String {
		self.window.location().href().unwrap_or_default()
	}

	fn add_listener(&self, listener: NavigationListener) -> ListenerId {
		let closure = Closure::<dyn FnMut()>::new(move || listener());
		if let Err(err) = self
			.window
			.add_event_listener_with_callback(NAVIGATION_EVENT, closure.as_ref().unchecked_ref())
		{
			crate::error_log!("failed to register popstate listener: {:?}", err);
		}
		let id = self.next_id.get();
		self.next_id.set(id + 1);
		self.listeners.borrow_mut().insert(id, closure);
		id
	}

	fn remove_listener(&self, id: ListenerId) {
		if let Some(closure) = self.listeners.borrow_mut().remove(&id) {
			let _ = self.window.remove_event_listener_with_callback(
				NAVIGATION_EVENT,
				closure.as_ref().unchecked_ref(),
			);
		}
	}

	fn dispatch(&self) {
		match web_sys::PopStateEvent::new(NAVIGATION_EVENT) {
			Ok(event) => {
				let _ = self.window.dispatch_event(&event);
			}
			Err(err) => {
				crate::error_log!("failed to synthesize popstate event: {:?}", err);
			}
		}
	}
}
