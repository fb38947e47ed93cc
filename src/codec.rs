//! Codec capabilities: typed parameter values and the path/query codec traits.
//!
//! A codec pairs an encode and a decode function for a typed value against
//! its string representation. The navigation core only ever talks to the
//! [`PathCodec`] and [`QueryCodec`] traits; [`ParamKind`] and the
//! implementations in [`crate::paths`] and [`crate::query`] are the bundled
//! defaults.

use std::collections::HashMap;
use std::rc::Rc;

use crate::error::{DecodeError, PathError, QueryError};
use crate::query::RawQueryMap;

/// A decoded parameter value.
///
/// Query decoding hands these out as `Rc<ParamValue>` so consumers can
/// observe identity stability via [`Rc::ptr_eq`].
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
	/// A percent-decoded string.
	Text(String),
	/// A signed integer.
	Int(i64),
	/// A floating point number.
	Float(f64),
	/// A boolean flag.
	Bool(bool),
}

impl ParamValue {
	/// Shorthand for a shared text value.
	pub fn text(value: impl Into<String>) -> Rc<Self> {
		Rc::new(Self::Text(value.into()))
	}

	/// Shorthand for a shared integer value.
	pub fn int(value: i64) -> Rc<Self> {
		Rc::new(Self::Int(value))
	}

	/// Shorthand for a shared float value.
	pub fn float(value: f64) -> Rc<Self> {
		Rc::new(Self::Float(value))
	}

	/// Shorthand for a shared boolean value.
	pub fn bool(value: bool) -> Rc<Self> {
		Rc::new(Self::Bool(value))
	}

	/// Returns the inner string for `Text` values.
	pub fn as_text(&self) -> Option<&str> {
		match self {
			Self::Text(s) => Some(s),
			_ => None,
		}
	}

	/// Returns the inner integer for `Int` values.
	pub fn as_int(&self) -> Option<i64> {
		match self {
			Self::Int(n) => Some(*n),
			_ => None,
		}
	}

	/// Returns the inner float for `Float` values.
	pub fn as_float(&self) -> Option<f64> {
		match self {
			Self::Float(n) => Some(*n),
			_ => None,
		}
	}

	/// Returns the inner boolean for `Bool` values.
	pub fn as_bool(&self) -> Option<bool> {
		match self {
			Self::Bool(b) => Some(*b),
			_ => None,
		}
	}

	/// Encodes this value back into a raw URL-safe substring.
	///
	/// Text is percent-encoded; numbers and booleans use their canonical
	/// string form.
	pub fn encode(&self) -> String {
		match self {
			Self::Text(s) => urlencoding::encode(s).into_owned(),
			Self::Int(n) => n.to_string(),
			Self::Float(n) => n.to_string(),
			Self::Bool(b) => b.to_string(),
		}
	}
}

/// The bundled single-parameter codecs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
	/// Percent-encoded string.
	Text,
	/// `i64`.
	Int,
	/// `f64`.
	Float,
	/// `bool` (`true`/`false`).
	Bool,
}

impl ParamKind {
	/// Name of the decoded type, for error messages.
	pub fn type_name(&self) -> &'static str {
		match self {
			Self::Text => "text",
			Self::Int => "i64",
			Self::Float => "f64",
			Self::Bool => "bool",
		}
	}

	/// Decodes one raw substring into a typed value.
	pub fn decode(&self, raw: &str) -> Result<ParamValue, DecodeError> {
		let fail = |reason: String| DecodeError {
			kind: self.type_name(),
			raw: raw.to_string(),
			reason,
		};
		match self {
			Self::Text => urlencoding::decode(raw)
				.map(|s| ParamValue::Text(s.into_owned()))
				.map_err(|e| fail(e.to_string())),
			Self::Int => raw
				.parse::<i64>()
				.map(ParamValue::Int)
				.map_err(|e| fail(e.to_string())),
			Self::Float => raw
				.parse::<f64>()
				.map(ParamValue::Float)
				.map_err(|e| fail(e.to_string())),
			Self::Bool => raw
				.parse::<bool>()
				.map(ParamValue::Bool)
				.map_err(|e| fail(e.to_string())),
		}
	}
}

/// Path parameters passed to [`PathCodec::build`].
pub type PathArgs = HashMap<String, ParamValue>;

/// Decoded multi-valued query parameters.
///
/// Every key declared by the codec is present; keys absent from the raw
/// query string map to an empty sequence.
pub type QueryValues = HashMap<String, Vec<Rc<ParamValue>>>;

/// Capability for building, decoding and matching typed URL paths.
pub trait PathCodec {
	/// Builds a pathname from typed parameters.
	fn build(&self, params: &PathArgs) -> Result<String, PathError>;

	/// Decodes raw captured segments into typed parameters.
	fn decode(&self, raw: &HashMap<String, String>) -> Result<PathArgs, PathError>;

	/// Measures how far a pathname is from this codec's pattern.
	///
	/// `None` means no match, `Some(0)` an exact match, and `Some(n)` a
	/// prefix match with `n` extra unmatched trailing segments.
	fn distance(&self, pathname: &str) -> Option<usize>;
}

/// Capability for decoding and building typed multi-valued query strings.
pub trait QueryCodec {
	/// Decodes a search string (no leading `?`) into typed values.
	///
	/// Keys not declared by the codec are dropped; declared keys missing
	/// from the input decode to an empty sequence.
	fn parse(&self, search: &str) -> Result<QueryValues, QueryError>;

	/// Builds a search string (no leading `?`) from typed values.
	fn build(&self, values: &QueryValues) -> String;

	/// Encodes typed values into a raw map without joining into a string.
	///
	/// Keys mapped to an empty sequence act as removal markers when the
	/// result is merged over an existing raw map.
	fn encode(&self, values: &QueryValues) -> RawQueryMap;
}
