//! Cloneable callback wrapper.
//!
//! [`Callback`] wraps a function in an `Rc`, making it cheaply cloneable
//! while keeping a stable reference that can be handed to UI trigger
//! events. The navigation core is single-threaded (UI-thread cooperative
//! scheduling), so no `Send`/`Sync` bounds are required.

use std::rc::Rc;

/// A cloneable, type-safe callback.
pub struct Callback<Args = (), Ret = ()> {
	inner: Rc<dyn Fn(Args) -> Ret>,
}

impl<Args, Ret> Callback<Args, Ret> {
	/// Wraps a function or closure.
	pub fn new<F>(f: F) -> Self
	where
		F: Fn(Args) -> Ret + 'static,
	{
		Self { inner: Rc::new(f) }
	}

	/// Calls the callback.
	pub fn call(&self, args: Args) -> Ret {
		(self.inner)(args)
	}
}

impl<Ret> Callback<(), Ret> {
	/// Calls a zero-argument callback.
	pub fn invoke(&self) -> Ret {
		self.call(())
	}
}

impl<Args, Ret> Clone for Callback<Args, Ret> {
	fn clone(&self) -> Self {
		Self {
			inner: Rc::clone(&self.inner),
		}
	}
}

impl<Args, Ret> std::fmt::Debug for Callback<Args, Ret> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Callback").finish()
	}
}
