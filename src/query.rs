//! Query string handling: raw maps and the bundled [`Query`] codec.
//!
//! A query string is read twice: once into a [`RawQueryMap`] (no decoding,
//! order preserved, unknown keys kept for round-tripping) and once through a
//! [`QueryCodec`] into typed values. The identity-stable layer on top lives
//! in [`cache`].

pub mod cache;

use std::rc::Rc;

use crate::codec::{ParamKind, QueryCodec, QueryValues};
use crate::error::QueryError;

/// An order-preserving map from parameter key to raw, undecoded substrings.
///
/// Duplicate keys are merged into one ordered sequence. Building the map
/// back into a string preserves first-seen key order, so keys unknown to a
/// codec survive a parse/build round trip untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawQueryMap {
	entries: Vec<(String, Vec<String>)>,
}

impl RawQueryMap {
	/// Creates an empty map.
	pub fn new() -> Self {
		Self::default()
	}

	/// Parses a search string (leading `?` tolerated) without decoding values.
	///
	/// Keys are percent-decoded for lookup; values are kept byte-for-byte.
	/// A bare key with no `=` maps to one empty substring.
	pub fn parse(search: &str) -> Self {
		let search = search.strip_prefix('?').unwrap_or(search);
		let mut map = Self::new();
		for pair in search.split('&') {
			if pair.is_empty() {
				continue;
			}
			let (key, value) = match pair.split_once('=') {
				Some((key, value)) => (key, value),
				None => (pair, ""),
			};
			let key = urlencoding::decode(key)
				.map(|k| k.into_owned())
				.unwrap_or_else(|_| key.to_string());
			map.push(&key, value.to_string());
		}
		map
	}

	/// Appends one raw value to a key's sequence.
	pub fn push(&mut self, key: &str, value: String) {
		if let Some((_, values)) = self.entries.iter_mut().find(|(k, _)| k == key) {
			values.push(value);
		} else {
			self.entries.push((key.to_string(), vec![value]));
		}
	}

	/// Replaces a key's sequence in place, or appends the key.
	pub fn insert(&mut self, key: &str, values: Vec<String>) {
		if let Some((_, existing)) = self.entries.iter_mut().find(|(k, _)| k == key) {
			*existing = values;
		} else {
			self.entries.push((key.to_string(), values));
		}
	}

	/// Removes a key and its sequence.
	pub fn remove(&mut self, key: &str) {
		self.entries.retain(|(k, _)| k != key);
	}

	/// Returns the raw sequence for a key.
	pub fn get(&self, key: &str) -> Option<&[String]> {
		self.entries
			.iter()
			.find(|(k, _)| k == key)
			.map(|(_, values)| values.as_slice())
	}

	/// Overlays `other` onto this map.
	///
	/// Keys present in `other` replace the sequence in place (keeping their
	/// original position); empty sequences remove the key entirely.
	pub fn merge(&mut self, other: RawQueryMap) {
		for (key, values) in other.entries {
			if values.is_empty() {
				self.remove(&key);
			} else {
				self.insert(&key, values);
			}
		}
	}

	/// Joins the map back into a search string (no leading `?`).
	///
	/// Keys with multiple values are repeated; keys with no values are
	/// skipped.
	pub fn build(&self) -> String {
		let mut pairs = Vec::new();
		for (key, values) in &self.entries {
			let key = urlencoding::encode(key);
			for value in values {
				pairs.push(format!("{}={}", key, value));
			}
		}
		pairs.join("&")
	}

	/// Number of keys in the map.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Whether the map holds no keys.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Iterates keys and their raw sequences in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
		self.entries
			.iter()
			.map(|(k, v)| (k.as_str(), v.as_slice()))
	}
}

/// The bundled [`QueryCodec`]: an ordered list of `(key, kind)` declarations.
///
/// Declaration order determines build order, so URLs stay deterministic.
///
/// # Example
///
/// ```ignore
/// let query = Query::new()
///     .param("word", ParamKind::Text)
///     .param("number", ParamKind::Float);
/// let values = query.parse("word=foo&number=2&number=3")?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct Query {
	params: Vec<(String, ParamKind)>,
}

impl Query {
	/// Creates an empty codec.
	pub fn new() -> Self {
		Self::default()
	}

	/// Declares a parameter key with its value codec.
	pub fn param(mut self, key: impl Into<String>, kind: ParamKind) -> Self {
		self.params.push((key.into(), kind));
		self
	}

	/// Returns the declared keys in declaration order.
	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.params.iter().map(|(k, _)| k.as_str())
	}
}

impl QueryCodec for Query {
	fn parse(&self, search: &str) -> Result<QueryValues, QueryError> {
		let raw = RawQueryMap::parse(search);
		let mut out = QueryValues::new();
		for (key, kind) in &self.params {
			let mut decoded = Vec::new();
			if let Some(values) = raw.get(key) {
				for (index, value) in values.iter().enumerate() {
					let typed = kind.decode(value).map_err(|source| QueryError::Decode {
						key: key.clone(),
						index,
						source,
					})?;
					decoded.push(Rc::new(typed));
				}
			}
			out.insert(key.clone(), decoded);
		}
		Ok(out)
	}

	fn build(&self, values: &QueryValues) -> String {
		self.encode(values).build()
	}

	fn encode(&self, values: &QueryValues) -> RawQueryMap {
		let mut raw = RawQueryMap::new();
		for (key, _) in &self.params {
			if let Some(sequence) = values.get(key) {
				raw.insert(key, sequence.iter().map(|v| v.encode()).collect());
			}
		}
		raw
	}
}
