//! Browser-style locations.

use std::fmt;

use crate::search::SearchParams;

/// A parsed location: path, query and fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
	/// The path, always starting with `/`.
	pub pathname: String,
	/// The decoded query string.
	pub search: SearchParams,
	/// The fragment without the leading `#`.
	pub hash: String,
}

impl Default for Location {
	fn default() -> Self {
		Self {
			pathname: "/".to_string(),
			search: SearchParams::new(),
			hash: String::new(),
		}
	}
}

impl Location {
	/// Parses an href such as `/items/1?tab=info#top`.
	///
	/// Only the path, query and fragment are considered; an empty path
	/// becomes `/`.
	pub fn parse(href: &str) -> Self {
		let (rest, hash) = match href.split_once('#') {
			Some((rest, hash)) => (rest, hash.to_string()),
			None => (href, String::new()),
		};
		let (path, query) = match rest.split_once('?') {
			Some((path, query)) => (path, query),
			None => (rest, ""),
		};

		let pathname = if path.is_empty() {
			"/".to_string()
		} else if path.starts_with('/') {
			path.to_string()
		} else {
			format!("/{}", path)
		};

		Self {
			pathname,
			search: SearchParams::parse(query),
			hash,
		}
	}

	/// Returns a copy of this location with a different query.
	pub fn with_search(&self, search: SearchParams) -> Self {
		Self {
			pathname: self.pathname.clone(),
			search,
			hash: self.hash.clone(),
		}
	}

	/// Re-assembles the href, omitting an empty query or fragment.
	pub fn href(&self) -> String {
		self.to_string()
	}
}

impl fmt::Display for Location {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.pathname)?;
		if !self.search.is_empty() {
			write!(f, "?{}", self.search)?;
		}
		if !self.hash.is_empty() {
			write!(f, "#{}", self.hash)?;
		}
		Ok(())
	}
}

impl From<&str> for Location {
	fn from(href: &str) -> Self {
		Self::parse(href)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_parse_full_href() {
		let location = Location::parse("/items/1?tab=info&x=2#top");

		assert_eq!(location.pathname, "/items/1");
		assert_eq!(location.search.get("tab"), Some("info"));
		assert_eq!(location.hash, "top");
	}

	#[rstest]
	#[case("", "/")]
	#[case("?a=1", "/")]
	#[case("items", "/items")]
	#[case("/items#frag", "/items")]
	fn test_parse_pathname(#[case] href: &str, #[case] expected: &str) {
		assert_eq!(Location::parse(href).pathname, expected);
	}

	#[rstest]
	#[case("/items")]
	#[case("/items?a=1")]
	#[case("/items?a=1#h")]
	#[case("/#h")]
	fn test_href_round_trip(#[case] href: &str) {
		assert_eq!(Location::parse(href).href(), href);
	}

	#[rstest]
	fn test_with_search_keeps_path_and_hash() {
		let location = Location::parse("/a?x=1#h");
		let updated = location.with_search(SearchParams::from([("y", "2")]));

		assert_eq!(updated.href(), "/a?y=2#h");
	}
}
