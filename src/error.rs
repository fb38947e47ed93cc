//! Error types for navigation, path and query codecs.
//!
//! Decode failures are propagated to the caller unchanged, never swallowed:
//! callers decide whether to render a not-found state or crash.

use thiserror::Error;

/// Failure to decode a single raw parameter substring into a typed value.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("cannot decode `{raw}` as {kind}: {reason}")]
pub struct DecodeError {
	/// Name of the target type (e.g. `"i64"`).
	pub kind: &'static str,
	/// The raw substring that failed to decode.
	pub raw: String,
	/// Human-readable parse failure.
	pub reason: String,
}

/// Error type for path pattern compilation, matching and codec operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PathError {
	/// The pattern string could not be compiled.
	#[error("invalid path pattern `{pattern}`: {reason}")]
	InvalidPattern {
		/// The offending pattern string.
		pattern: String,
		/// Why compilation failed.
		reason: String,
	},
	/// A parameter required by the pattern was not supplied.
	#[error("missing path parameter `{0}`")]
	MissingParameter(String),
	/// A path parameter failed to decode.
	#[error("failed to decode path parameter `{name}`")]
	Decode {
		/// Parameter name from the pattern.
		name: String,
		/// The underlying decode failure.
		#[source]
		source: DecodeError,
	},
}

/// Error type for query codec operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryError {
	/// A query parameter occurrence failed to decode.
	#[error("failed to decode query parameter `{key}` at position {index}")]
	Decode {
		/// Parameter key.
		key: String,
		/// Zero-based occurrence index within the key's value sequence.
		index: usize,
		/// The underlying decode failure.
		#[source]
		source: DecodeError,
	},
}

/// Error type for history mutations and router construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NavigationError {
	/// A path codec failed while building or decoding a URL.
	#[error(transparent)]
	Path(#[from] PathError),
	/// A query codec failed while building or decoding a search string.
	#[error(transparent)]
	Query(#[from] QueryError),
	/// The underlying platform rejected a `pushState`/`replaceState` call.
	///
	/// URLs are not validated by this crate; whatever the platform raises
	/// for a malformed URL surfaces here.
	#[error("history mutation failed: {0}")]
	HistoryWrite(String),
	/// No platform window/history pair is available.
	///
	/// Raised at construction time, before any navigation is attempted.
	/// This is a configuration error, not a recoverable runtime condition.
	#[error("no platform window available")]
	WindowUnavailable,
}
