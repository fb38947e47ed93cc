//! Current-location value type.
//!
//! A [`Location`] is an immutable snapshot derived from a full URL. The
//! router replaces it wholesale on every navigation event; it is never
//! mutated in place.

/// An immutable decoded URL snapshot.
///
/// `search` and `hash` are stored without their `?`/`#` sigils. Parsing
/// tolerates both absolute URLs (`https://host/a/b?x=1#top`) and bare
/// paths (`/a/b?x=1`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
	href: String,
	pathname: String,
	search: String,
	hash: String,
}

impl Location {
	/// Derives a location from a full URL or a bare path.
	pub fn from_href(href: &str) -> Self {
		let (rest, hash) = match href.split_once('#') {
			Some((rest, hash)) => (rest, hash),
			None => (href, ""),
		};
		let (rest, search) = match rest.split_once('?') {
			Some((rest, search)) => (rest, search),
			None => (rest, ""),
		};

		let pathname = match rest.find("://") {
			Some(scheme_end) => {
				let authority = &rest[scheme_end + 3..];
				match authority.find('/') {
					Some(idx) => &authority[idx..],
					None => "/",
				}
			}
			None => rest,
		};
		let pathname = if pathname.is_empty() { "/" } else { pathname };

		Self {
			href: href.to_string(),
			pathname: pathname.to_string(),
			search: search.to_string(),
			hash: hash.to_string(),
		}
	}

	/// The full URL this location was derived from.
	pub fn href(&self) -> &str {
		&self.href
	}

	/// The path portion, always starting with `/`.
	pub fn pathname(&self) -> &str {
		&self.pathname
	}

	/// The query string without the leading `?`; empty when absent.
	pub fn search(&self) -> &str {
		&self.search
	}

	/// The fragment without the leading `#`; empty when absent.
	pub fn hash(&self) -> &str {
		&self.hash
	}

	/// Rebuilds a relative URL from `pathname`, a search string and `hash`.
	///
	/// Empty components are omitted together with their sigils.
	pub fn compose(pathname: &str, search: &str, hash: &str) -> String {
		let mut url = pathname.to_string();
		if !search.is_empty() {
			url.push('?');
			url.push_str(search);
		}
		if !hash.is_empty() {
			url.push('#');
			url.push_str(hash);
		}
		url
	}
}
