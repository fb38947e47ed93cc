//! # Waypoint
//!
//! Client-side navigation for single-page WebAssembly applications.
//!
//! Waypoint normalizes the platform history API behind a small capability
//! surface and layers typed, identity-stable URL state on top:
//!
//! - [`Router`]: push/replace/back/forward/go over a [`HistorySource`] and
//!   [`WindowSource`] pair, with a derived [`Location`] store that is
//!   recomputed from the platform on every navigation notification.
//! - [`Path`]: `{name}` placeholder patterns with typed parameters, URL
//!   building, decoding, and closest-match [`distance`](codec::PathCodec::distance)
//!   scoring.
//! - [`Query`] and [`StableParser`]: typed query parameters whose decoded
//!   values keep their `Rc` identity across parses as long as the backing
//!   raw substring is unchanged, so memoized consumers see stable inputs.
//! - [`Nav`]: a typed facade binding a router to codecs, with `to`/`go`/
//!   `set`/`on` operations.
//! - [`QueryParams`] and [`QueryState`]: query write-back with raw-map
//!   merging (unknown keys round-trip) and a trailing-edge debounce for
//!   high-frequency updates.
//!
//! Everything platform-facing goes through traits, so the whole crate runs
//! unchanged against [`MemoryHistory`](history::memory::MemoryHistory) and
//! [`ManualTimers`] in native tests.
//!
//! ## Example
//!
//! ```ignore
//! use waypoint::{Nav, ParamKind, Path, Router};
//!
//! let router = Router::browser()?;
//! let profile = Path::new("/users/{id}")?.param("id", ParamKind::Int);
//! let nav = Nav::new(router, profile);
//! nav.go(&args, None)?;
//! ```

#![warn(missing_docs)]

pub mod callback;
pub mod codec;
pub mod error;
pub mod history;
pub mod location;
pub mod logging;
pub mod nav;
pub mod paths;
pub mod query;
pub mod router;
pub mod state;
pub mod timers;

pub use callback::Callback;
pub use codec::{ParamKind, ParamValue, PathArgs, PathCodec, QueryCodec, QueryValues};
pub use error::{DecodeError, NavigationError, PathError, QueryError};
pub use history::{HistorySource, Subscription, WindowSource};
pub use location::Location;
pub use nav::Nav;
pub use paths::Path;
pub use query::cache::StableParser;
pub use query::{Query, RawQueryMap};
pub use router::Router;
pub use state::{QueryParams, QueryState, QueryStateOptions};
pub use timers::{TimerHandle, TimerSource};
