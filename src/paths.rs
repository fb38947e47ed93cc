//! Typed path patterns: the bundled [`PathCodec`] implementation.
//!
//! Patterns use `{name}` placeholders compiled to a regex:
//!
//! - `/users/` — exact match
//! - `/users/{id}/` — single path parameter
//! - `/users/{id}/posts/{post_id}/` — multiple parameters
//!
//! Each parameter can be declared with a [`ParamKind`]; undeclared
//! parameters default to [`ParamKind::Text`].

use std::collections::HashMap;

use crate::codec::{ParamKind, PathArgs, PathCodec};
use crate::error::PathError;

/// Maximum allowed length for a pattern string in bytes.
const MAX_PATTERN_LENGTH: usize = 1024;

/// Maximum allowed number of path segments in a pattern.
const MAX_PATH_SEGMENTS: usize = 32;

/// Maximum allowed size for the compiled regex (in bytes).
const MAX_REGEX_SIZE: usize = 1 << 20; // 1 MiB

/// A compiled path pattern with typed parameters.
#[derive(Debug, Clone)]
pub struct Path {
	pattern: String,
	regex: regex::Regex,
	param_names: Vec<String>,
	kinds: HashMap<String, ParamKind>,
}

impl Path {
	/// Compiles a `{name}`-style pattern.
	///
	/// # Errors
	///
	/// Returns [`PathError::InvalidPattern`] if the pattern exceeds the
	/// length or segment limits, or compiles to an invalid regex.
	pub fn new(pattern: &str) -> Result<Self, PathError> {
		let invalid = |reason: String| PathError::InvalidPattern {
			pattern: pattern.to_string(),
			reason,
		};

		if pattern.len() > MAX_PATTERN_LENGTH {
			return Err(invalid(format!(
				"length {} exceeds maximum of {} bytes",
				pattern.len(),
				MAX_PATTERN_LENGTH
			)));
		}
		let segment_count = pattern.split('/').count();
		if segment_count > MAX_PATH_SEGMENTS {
			return Err(invalid(format!(
				"{} path segments exceed maximum of {}",
				segment_count, MAX_PATH_SEGMENTS
			)));
		}

		let (regex_str, param_names) = Self::compile_pattern(pattern);
		let regex = regex::RegexBuilder::new(&regex_str)
			.size_limit(MAX_REGEX_SIZE)
			.build()
			.map_err(|e| invalid(e.to_string()))?;

		Ok(Self {
			pattern: pattern.to_string(),
			regex,
			param_names,
			kinds: HashMap::new(),
		})
	}

	/// Declares the codec for one parameter name.
	pub fn param(mut self, name: impl Into<String>, kind: ParamKind) -> Self {
		self.kinds.insert(name.into(), kind);
		self
	}

	/// Compiles a pattern string into a regex and extracts parameter names.
	fn compile_pattern(pattern: &str) -> (String, Vec<String>) {
		let mut regex_str = String::from("^");
		let mut param_names = Vec::new();
		let mut chars = pattern.chars().peekable();

		while let Some(c) = chars.next() {
			match c {
				'{' => {
					let mut param = String::new();
					for next in chars.by_ref() {
						if next == '}' {
							break;
						}
						param.push(next);
					}
					// Parameters match a single segment.
					regex_str.push_str(&format!("(?P<{}>[^/]+)", param));
					param_names.push(param);
				}
				'/' | '.' | '+' | '*' | '?' | '(' | ')' | '[' | ']' | '^' | '$' | '|' | '\\' => {
					regex_str.push('\\');
					regex_str.push(c);
				}
				_ => {
					regex_str.push(c);
				}
			}
		}

		regex_str.push('$');
		(regex_str, param_names)
	}

	/// Returns the original pattern string.
	pub fn pattern(&self) -> &str {
		&self.pattern
	}

	/// Returns the parameter names in pattern order.
	pub fn param_names(&self) -> &[String] {
		&self.param_names
	}

	/// Extracts raw (undecoded) parameter segments from an exactly matching
	/// pathname.
	pub fn matches(&self, pathname: &str) -> Option<HashMap<String, String>> {
		self.regex.captures(pathname).map(|caps| {
			self.param_names
				.iter()
				.filter_map(|name| {
					caps.name(name)
						.map(|m| (name.clone(), m.as_str().to_string()))
				})
				.collect()
		})
	}

	fn kind_of(&self, name: &str) -> ParamKind {
		self.kinds.get(name).copied().unwrap_or(ParamKind::Text)
	}
}

impl PathCodec for Path {
	fn build(&self, params: &PathArgs) -> Result<String, PathError> {
		let mut result = self.pattern.clone();
		for name in &self.param_names {
			let value = params
				.get(name)
				.ok_or_else(|| PathError::MissingParameter(name.clone()))?;
			let placeholder = format!("{{{}}}", name);
			result = result.replace(&placeholder, &value.encode());
		}
		Ok(result)
	}

	fn decode(&self, raw: &HashMap<String, String>) -> Result<PathArgs, PathError> {
		let mut out = PathArgs::new();
		for name in &self.param_names {
			let value = raw
				.get(name)
				.ok_or_else(|| PathError::MissingParameter(name.clone()))?;
			let typed = self
				.kind_of(name)
				.decode(value)
				.map_err(|source| PathError::Decode {
					name: name.clone(),
					source,
				})?;
			out.insert(name.clone(), typed);
		}
		Ok(out)
	}

	fn distance(&self, pathname: &str) -> Option<usize> {
		if self.regex.is_match(pathname) {
			return Some(0);
		}

		// Drop trailing segments one at a time and count how many it takes
		// for the remainder to match.
		let mut current = pathname.strip_suffix('/').unwrap_or(pathname);
		let mut extra = 0usize;
		while let Some(idx) = current.rfind('/') {
			current = &current[..idx];
			extra += 1;
			if current.is_empty() {
				if self.regex.is_match("/") {
					return Some(extra);
				}
				break;
			}
			if self.regex.is_match(current) || self.regex.is_match(&format!("{}/", current)) {
				return Some(extra);
			}
		}
		None
	}
}

impl PartialEq for Path {
	fn eq(&self, other: &Self) -> bool {
		self.pattern == other.pattern
	}
}

impl Eq for Path {}

impl std::fmt::Display for Path {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.pattern)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::codec::ParamValue;

	fn typed_path() -> Path {
		Path::new("/my/path/{word}/{number}")
			.unwrap()
			.param("word", ParamKind::Text)
			.param("number", ParamKind::Float)
	}

	#[test]
	fn test_exact_pattern() {
		let path = Path::new("/users/").unwrap();
		assert!(path.matches("/users/").is_some());
		assert!(path.matches("/users").is_none());
		assert!(path.matches("/users/123/").is_none());
	}

	#[test]
	fn test_single_param() {
		let path = Path::new("/users/{id}/").unwrap();
		let params = path.matches("/users/42/").unwrap();
		assert_eq!(params.get("id"), Some(&"42".to_string()));
		assert!(path.matches("/users/").is_none());
	}

	#[test]
	fn test_multiple_params() {
		let path = Path::new("/users/{user_id}/posts/{post_id}/").unwrap();
		let params = path.matches("/users/42/posts/123/").unwrap();
		assert_eq!(params.get("user_id"), Some(&"42".to_string()));
		assert_eq!(params.get("post_id"), Some(&"123".to_string()));
	}

	#[test]
	fn test_build_with_typed_params() {
		let path = typed_path();
		let mut args = PathArgs::new();
		args.insert("word".to_string(), ParamValue::Text("foo".to_string()));
		args.insert("number".to_string(), ParamValue::Float(3.0));
		assert_eq!(path.build(&args).unwrap(), "/my/path/foo/3");
	}

	#[test]
	fn test_build_percent_encodes_text() {
		let path = Path::new("/search/{term}").unwrap();
		let mut args = PathArgs::new();
		args.insert("term".to_string(), ParamValue::Text("a b".to_string()));
		assert_eq!(path.build(&args).unwrap(), "/search/a%20b");
	}

	#[test]
	fn test_build_missing_param() {
		let path = typed_path();
		let result = path.build(&PathArgs::new());
		assert!(matches!(result, Err(PathError::MissingParameter(_))));
	}

	#[test]
	fn test_decode_typed_params() {
		let path = typed_path();
		let raw = path.matches("/my/path/foo/3").unwrap();
		let args = path.decode(&raw).unwrap();
		assert_eq!(args["word"], ParamValue::Text("foo".to_string()));
		assert_eq!(args["number"], ParamValue::Float(3.0));
	}

	#[test]
	fn test_decode_failure_propagates() {
		let path = typed_path();
		let raw = path.matches("/my/path/foo/nan3x").unwrap();
		let result = path.decode(&raw);
		match result {
			Err(PathError::Decode { name, .. }) => assert_eq!(name, "number"),
			other => panic!("expected decode error, got {:?}", other),
		}
	}

	#[test]
	fn test_distance_exact() {
		let path = Path::new("/users/{id}/").unwrap();
		assert_eq!(path.distance("/users/42/"), Some(0));
	}

	#[test]
	fn test_distance_prefix() {
		let path = Path::new("/users/").unwrap();
		assert_eq!(path.distance("/users/42/extra"), Some(2));
		assert_eq!(path.distance("/users/42"), Some(1));
	}

	#[test]
	fn test_distance_no_match() {
		let path = Path::new("/users/").unwrap();
		assert_eq!(path.distance("/posts/42"), None);
	}

	#[test]
	fn test_special_chars_escaped() {
		let path = Path::new("/api/v1.0/").unwrap();
		assert!(path.matches("/api/v1.0/").is_some());
		assert!(path.matches("/api/v1X0/").is_none());
	}

	#[test]
	fn test_pattern_rejects_excessive_length() {
		let long_pattern = "/".to_string() + &"a".repeat(1025);
		let result = Path::new(&long_pattern);
		assert!(matches!(result, Err(PathError::InvalidPattern { .. })));
	}

	#[test]
	fn test_pattern_rejects_excessive_segments() {
		let segments: Vec<&str> = (0..35).map(|_| "seg").collect();
		let pattern = format!("/{}/", segments.join("/"));
		let result = Path::new(&pattern);
		assert!(matches!(result, Err(PathError::InvalidPattern { .. })));
	}

	#[test]
	fn test_pattern_display_and_equality() {
		let p1 = Path::new("/users/{id}/").unwrap();
		let p2 = Path::new("/users/{id}/").unwrap();
		let p3 = Path::new("/users/{user_id}/").unwrap();
		assert_eq!(format!("{}", p1), "/users/{id}/");
		assert_eq!(p1, p2);
		assert_ne!(p1, p3);
	}
}
