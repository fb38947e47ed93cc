//! Query-string state: identity-stable reads and debounced write-back.
//!
//! [`QueryParams`] reads the current search string through a
//! [`StableParser`] and writes updates back with an immediate history
//! replace, merging over the raw query map so keys unknown to the codec
//! round-trip untouched.
//!
//! [`QueryState`] layers local, synchronously-updated state on top.
//! Reads are always instantaneous; writes update local state immediately
//! and schedule the history replace on a trailing-edge debounce. Browsers
//! rate-limit `replaceState` calls, so rapid interactions (slider drags)
//! coalesce into a single replacement carrying the last-written values,
//! and the URL converges shortly after interaction pauses.

use std::cell::RefCell;
use std::rc::Rc;

use crate::codec::{QueryCodec, QueryValues};
use crate::error::{NavigationError, QueryError};
use crate::location::Location;
use crate::query::RawQueryMap;
use crate::query::cache::StableParser;
use crate::router::Router;
use crate::timers::{TimerHandle, TimerSource};

/// Identity-stable query reads plus immediate replace write-back.
pub struct QueryParams<C: QueryCodec> {
	router: Router,
	parser: StableParser<C>,
}

impl<C: QueryCodec> QueryParams<C> {
	/// Binds a codec to a router.
	pub fn new(router: Router, codec: C) -> Self {
		Self {
			router,
			parser: StableParser::new(codec),
		}
	}

	/// The router this instance writes through.
	pub fn router(&self) -> &Router {
		&self.router
	}

	/// Decodes the current search string.
	///
	/// Values whose raw substring is unchanged since the previous read
	/// keep their `Rc` identity (see [`StableParser`]).
	pub fn read(&self) -> Result<QueryValues, QueryError> {
		self.parser.parse(self.router.location().search())
	}

	/// Writes `values` into the URL with a history replace.
	///
	/// Encoded values are merged over the current raw query map: keys not
	/// mentioned (including keys unknown to the codec) are preserved, and
	/// keys mapped to an empty sequence are removed.
	pub fn write(&self, values: &QueryValues) -> Result<(), NavigationError> {
		let location = self.router.location();
		let mut raw = RawQueryMap::parse(location.search());
		raw.merge(self.parser.codec().encode(values));
		let url = Location::compose(location.pathname(), &raw.build(), location.hash());
		self.router.replace(&url)
	}
}

/// Configuration for [`QueryState`].
#[derive(Debug, Clone, Copy)]
pub struct QueryStateOptions {
	/// Trailing-edge debounce window for the history write-back.
	pub debounce_ms: u32,
}

impl Default for QueryStateOptions {
	fn default() -> Self {
		Self { debounce_ms: 250 }
	}
}

/// Local query state with a debounced history write-back.
///
/// Dropping the instance cancels any pending write-back timer together
/// with its captured state.
pub struct QueryState<C: QueryCodec> {
	params: Rc<QueryParams<C>>,
	state: RefCell<QueryValues>,
	pending: Rc<RefCell<QueryValues>>,
	timers: Rc<dyn TimerSource>,
	debounce_ms: u32,
	flush_timer: RefCell<Option<TimerHandle>>,
}

impl<C: QueryCodec + 'static> QueryState<C> {
	/// Creates state seeded from the current search string.
	///
	/// # Errors
	///
	/// Returns [`NavigationError::Query`] when the current search string
	/// fails to decode through the codec.
	pub fn new(
		router: Router,
		codec: C,
		timers: Rc<dyn TimerSource>,
	) -> Result<Self, NavigationError> {
		Self::with_options(router, codec, timers, QueryStateOptions::default())
	}

	/// Creates state with an explicit debounce window.
	pub fn with_options(
		router: Router,
		codec: C,
		timers: Rc<dyn TimerSource>,
		options: QueryStateOptions,
	) -> Result<Self, NavigationError> {
		let params = QueryParams::new(router, codec);
		let state = params.read()?;
		Ok(Self {
			params: Rc::new(params),
			state: RefCell::new(state),
			pending: Rc::new(RefCell::new(QueryValues::new())),
			timers,
			debounce_ms: options.debounce_ms,
			flush_timer: RefCell::new(None),
		})
	}

	/// The current local state. Never waits on the debounce.
	pub fn get(&self) -> QueryValues {
		self.state.borrow().clone()
	}

	/// Merges `values` into local state immediately and schedules the
	/// debounced history write-back.
	///
	/// Writes within the window coalesce: the eventual replace carries the
	/// last-written values merged over prior pending ones.
	pub fn set(&self, values: QueryValues) {
		{
			let mut state = self.state.borrow_mut();
			let mut pending = self.pending.borrow_mut();
			for (key, sequence) in values {
				state.insert(key.clone(), sequence.clone());
				pending.insert(key, sequence);
			}
		}

		let params = Rc::clone(&self.params);
		let pending = Rc::clone(&self.pending);
		let handle = self.timers.schedule(
			self.debounce_ms,
			Box::new(move || {
				let values = pending.replace(QueryValues::new());
				if let Err(err) = params.write(&values) {
					crate::warn_log!("query write-back failed: {}", err);
				}
			}),
		);
		// Supersedes (and thereby cancels) any earlier pending flush.
		*self.flush_timer.borrow_mut() = Some(handle);
	}

	/// Performs any pending write-back now instead of waiting out the
	/// debounce window.
	pub fn flush(&self) -> Result<(), NavigationError> {
		if let Some(handle) = self.flush_timer.borrow_mut().take() {
			handle.cancel();
		}
		let values = self.pending.replace(QueryValues::new());
		if values.is_empty() {
			return Ok(());
		}
		self.params.write(&values)
	}
}
