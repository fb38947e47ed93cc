//! Typed navigation facade.
//!
//! [`Nav`] binds a [`Router`] to a [`PathCodec`] (and optionally a
//! [`QueryCodec`]) and exposes the four convenience operations:
//!
//! - [`to`](Nav::to): build the URL string
//! - [`go`](Nav::go): build and `push`
//! - [`set`](Nav::set): build and `replace` (non-history-growing, e.g. for
//!   filter-state updates)
//! - [`on`](Nav::on): a zero-argument [`Callback`] performing the push,
//!   for binding to UI trigger events
//!
//! All four are pure functions of their arguments plus the bound codecs;
//! the only state is the router handle.

use std::rc::Rc;

use crate::callback::Callback;
use crate::codec::{PathArgs, PathCodec, QueryCodec, QueryValues};
use crate::error::NavigationError;
use crate::query::Query;
use crate::router::Router;

/// A typed navigator for one path (and optional query) codec.
pub struct Nav<P: PathCodec, Q: QueryCodec = Query> {
	router: Router,
	path: Rc<P>,
	query: Option<Rc<Q>>,
}

impl<P: PathCodec> Nav<P> {
	/// Binds a navigator to a path codec only.
	pub fn new(router: Router, path: P) -> Self {
		Self {
			router,
			path: Rc::new(path),
			query: None,
		}
	}
}

impl<P: PathCodec, Q: QueryCodec> Nav<P, Q> {
	/// Binds a navigator to a path codec and a query codec.
	pub fn with_query(router: Router, path: P, query: Q) -> Self {
		Self {
			router,
			path: Rc::new(path),
			query: Some(Rc::new(query)),
		}
	}

	/// Builds the URL for the given parameters.
	///
	/// The query suffix is appended iff this navigator has a query codec
	/// *and* query parameters were supplied.
	pub fn to(&self, params: &PathArgs, query: Option<&QueryValues>) -> Result<String, NavigationError> {
		let mut url = self.path.build(params)?;
		if let (Some(codec), Some(values)) = (&self.query, query) {
			url.push('?');
			url.push_str(&codec.build(values));
		}
		Ok(url)
	}

	/// Navigates to the given parameters with a history push.
	pub fn go(&self, params: &PathArgs, query: Option<&QueryValues>) -> Result<(), NavigationError> {
		let url = self.to(params, query)?;
		self.router.push(&url)
	}

	/// Navigates to the given parameters with a history replace.
	pub fn set(&self, params: &PathArgs, query: Option<&QueryValues>) -> Result<(), NavigationError> {
		let url = self.to(params, query)?;
		self.router.replace(&url)
	}

	/// Returns a callback that performs [`go`](Self::go) when invoked.
	///
	/// The URL is built eagerly, so codec failures surface here rather
	/// than at invocation time. A push failure inside the callback is
	/// logged, not propagated.
	pub fn on(&self, params: &PathArgs, query: Option<&QueryValues>) -> Result<Callback, NavigationError> {
		let url = self.to(params, query)?;
		let router = self.router.clone();
		Ok(Callback::new(move |()| {
			if let Err(err) = router.push(&url) {
				crate::error_log!("navigation to `{}` failed: {}", url, err);
			}
		}))
	}
}
