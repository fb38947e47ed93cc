//! Identity-stable query parsing.
//!
//! [`StableParser`] wraps a [`QueryCodec`] so that repeated parses of
//! drifting search strings hand back the *same* `Rc` for every position
//! whose raw substring did not change. Downstream memoization and change
//! detection then see unchanged values as unchanged.
//!
//! Comparison is positional, never value-keyed: the same raw substring at a
//! different array position is a different value. This keeps each parse
//! O(total values) with no hashing of decoded values, and matches ordered
//! multi-value parameters bound into ordered UI lists.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::codec::{ParamValue, QueryCodec, QueryValues};
use crate::error::QueryError;
use crate::query::RawQueryMap;

/// One remembered position: the raw substring and the value decoded from it.
#[derive(Debug)]
struct CacheSlot {
	source: String,
	value: Rc<ParamValue>,
}

/// A query parser that maximizes `Rc` identity reuse across calls.
///
/// The cache is owned exclusively by this parser and lives as long as it
/// does; it is mutated only by [`parse`](Self::parse).
///
/// # Example
///
/// ```ignore
/// let parser = StableParser::new(
///     Query::new().param("number", ParamKind::Float),
/// );
/// let first = parser.parse("number=2&number=3")?;
/// let second = parser.parse("number=2&number=9")?;
/// // number[0] kept its identity, number[1] was re-decoded.
/// assert!(Rc::ptr_eq(&first["number"][0], &second["number"][0]));
/// assert!(!Rc::ptr_eq(&first["number"][1], &second["number"][1]));
/// ```
pub struct StableParser<C: QueryCodec> {
	codec: C,
	slots: RefCell<HashMap<String, Vec<CacheSlot>>>,
}

impl<C: QueryCodec> StableParser<C> {
	/// Creates a parser bound to one codec, with an empty cache.
	pub fn new(codec: C) -> Self {
		Self {
			codec,
			slots: RefCell::new(HashMap::new()),
		}
	}

	/// The codec this parser is bound to.
	pub fn codec(&self) -> &C {
		&self.codec
	}

	/// Decodes a search string, reusing previously returned values wherever
	/// the backing raw substring is unchanged at the same (key, index).
	///
	/// Per key, positions beyond the current sequence length are forgotten
	/// on every call: a value that disappears and later reappears is
	/// decoded afresh, never served stale.
	pub fn parse(&self, search: &str) -> Result<QueryValues, QueryError> {
		let raw = RawQueryMap::parse(search);
		let mut decoded = self.codec.parse(search)?;
		let mut slots = self.slots.borrow_mut();

		for (key, output) in decoded.iter_mut() {
			let cache = slots.entry(key.clone()).or_default();
			if let Some(sources) = raw.get(key) {
				for (index, value) in output.iter_mut().enumerate() {
					let Some(source) = sources.get(index) else {
						continue;
					};
					match cache.get_mut(index) {
						Some(prev) if prev.source == *source => {
							*value = Rc::clone(&prev.value);
						}
						Some(prev) => {
							*prev = CacheSlot {
								source: source.clone(),
								value: Rc::clone(value),
							};
						}
						None => {
							cache.push(CacheSlot {
								source: source.clone(),
								value: Rc::clone(value),
							});
						}
					}
				}
			}
			cache.truncate(output.len());
		}

		Ok(decoded)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::codec::ParamKind;
	use crate::query::Query;

	fn parser() -> StableParser<Query> {
		StableParser::new(
			Query::new()
				.param("word", ParamKind::Text)
				.param("number", ParamKind::Float),
		)
	}

	#[test]
	fn test_returns_decoded_values() {
		let parse = parser();
		let values = parse.parse("word=foo&number=2&number=3").unwrap();
		assert_eq!(values["word"][0].as_text(), Some("foo"));
		assert_eq!(values["number"][0].as_float(), Some(2.0));
		assert_eq!(values["number"][1].as_float(), Some(3.0));
	}

	#[test]
	fn test_keeps_reference_when_substring_unchanged() {
		let parse = parser();
		let first = parse.parse("number=100000000").unwrap();
		let second = parse.parse("number=100000000").unwrap();
		assert!(Rc::ptr_eq(&first["number"][0], &second["number"][0]));
	}

	#[test]
	fn test_new_reference_when_substring_changed() {
		let parse = parser();
		let first = parse.parse("number=100000000").unwrap();
		let second = parse.parse("number=200000000").unwrap();
		assert!(!Rc::ptr_eq(&first["number"][0], &second["number"][0]));
	}

	#[test]
	fn test_changed_position_does_not_disturb_others() {
		let parse = parser();
		let first = parse.parse("word=foo&number=2&number=3").unwrap();
		let second = parse.parse("word=foo&number=2&number=9").unwrap();
		assert!(Rc::ptr_eq(&first["word"][0], &second["word"][0]));
		assert!(Rc::ptr_eq(&first["number"][0], &second["number"][0]));
		assert!(!Rc::ptr_eq(&first["number"][1], &second["number"][1]));
		assert_eq!(second["number"][1].as_float(), Some(9.0));
	}

	#[test]
	fn test_forgets_positions_beyond_current_length() {
		let parse = parser();
		let first = parse.parse("number=100000000&number=350000000").unwrap();
		let second = parse.parse("number=200000000").unwrap();
		let third = parse.parse("number=100000000&number=350000000").unwrap();
		// Position 0 changed in between, position 1 was truncated away:
		// nothing survives from the first parse.
		assert!(!Rc::ptr_eq(&first["number"][0], &second["number"][0]));
		assert!(!Rc::ptr_eq(&first["number"][0], &third["number"][0]));
		assert!(!Rc::ptr_eq(&second["number"][0], &third["number"][0]));
		assert!(!Rc::ptr_eq(&first["number"][1], &third["number"][1]));
	}

	#[test]
	fn test_key_removed_then_reintroduced_is_fresh() {
		let parse = parser();
		let first = parse.parse("word=foo").unwrap();
		let gone = parse.parse("").unwrap();
		assert!(gone["word"].is_empty());
		let back = parse.parse("word=foo").unwrap();
		assert!(!Rc::ptr_eq(&first["word"][0], &back["word"][0]));
	}

	#[test]
	fn test_same_substring_at_new_position_is_not_reused() {
		// Positional, not content-addressed: "5" moving from index 1 to
		// index 0 does not carry its identity along.
		let parse = parser();
		let first = parse.parse("number=4&number=5").unwrap();
		let second = parse.parse("number=5").unwrap();
		assert!(!Rc::ptr_eq(&first["number"][1], &second["number"][0]));
	}

	#[test]
	fn test_unknown_keys_are_never_cached() {
		let parse = parser();
		let first = parse.parse("random=x&word=foo").unwrap();
		assert!(first.get("random").is_none());
		let second = parse.parse("random=y&word=foo").unwrap();
		assert!(Rc::ptr_eq(&first["word"][0], &second["word"][0]));
	}
}
