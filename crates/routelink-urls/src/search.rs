//! Query string handling.
//!
//! [`SearchParams`] is an ordered multimap of query pairs that serializes to
//! `application/x-www-form-urlencoded` text, the format browsers use for
//! `location.search`.
//!
//! ```
//! use routelink_urls::SearchParams;
//!
//! let mut search = SearchParams::parse("?q=rust&tag=a&tag=b");
//! assert_eq!(search.get("q"), Some("rust"));
//! assert_eq!(search.get_all("tag"), vec!["a", "b"]);
//!
//! search.set("q", "routing");
//! assert_eq!(search.to_string(), "q=routing&tag=a&tag=b");
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// An ordered collection of query-string pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchParams {
	pairs: Vec<(String, String)>,
}

impl SearchParams {
	/// Creates an empty set of search params.
	pub fn new() -> Self {
		Self::default()
	}

	/// Parses a query string. A leading `?` is optional.
	///
	/// Malformed input yields an empty set; form decoding itself is lenient,
	/// so this only happens for byte sequences that are not valid UTF-8
	/// after percent-decoding.
	pub fn parse(query: &str) -> Self {
		let query = query.strip_prefix('?').unwrap_or(query);
		if query.is_empty() {
			return Self::new();
		}

		match serde_urlencoded::from_str::<Vec<(String, String)>>(query) {
			Ok(pairs) => Self { pairs },
			Err(e) => {
				tracing::warn!(query, error = %e, "discarding unparsable query string");
				Self::new()
			}
		}
	}

	/// Builds search params from a flat serializable structure.
	///
	/// # Errors
	///
	/// Returns an error if `value` is not a flat map or struct of scalars.
	pub fn from_serialize<T: Serialize>(value: &T) -> Result<Self, serde_urlencoded::ser::Error> {
		let encoded = serde_urlencoded::to_string(value)?;
		Ok(Self::parse(&encoded))
	}

	/// Deserializes the params into a flat structure.
	///
	/// Values are coerced to the target field types (`"42"` into `i64` and
	/// so on).
	///
	/// # Errors
	///
	/// Returns an error if a field is missing or cannot be parsed.
	pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, serde_urlencoded::de::Error> {
		serde_urlencoded::from_str(&self.to_string())
	}

	/// Appends a pair, keeping existing values for the same key.
	pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
		self.pairs.push((key.into(), value.into()));
	}

	/// Sets a key to a single value.
	///
	/// The first existing pair for the key keeps its position and any other
	/// pairs for the key are removed. Unknown keys are appended.
	pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
		let key = key.into();
		let value = value.into();

		match self.pairs.iter().position(|(k, _)| *k == key) {
			Some(first) => {
				self.pairs[first].1 = value;
				let mut index = 0;
				self.pairs.retain(|(k, _)| {
					let keep = *k != key || index == first;
					index += 1;
					keep
				});
			}
			None => self.pairs.push((key, value)),
		}
	}

	/// Returns the first value for a key.
	pub fn get(&self, key: &str) -> Option<&str> {
		self.pairs
			.iter()
			.find(|(k, _)| k == key)
			.map(|(_, v)| v.as_str())
	}

	/// Returns every value for a key in order.
	pub fn get_all(&self, key: &str) -> Vec<&str> {
		self.pairs
			.iter()
			.filter(|(k, _)| k == key)
			.map(|(_, v)| v.as_str())
			.collect()
	}

	/// Removes every pair for a key.
	pub fn remove(&mut self, key: &str) {
		self.pairs.retain(|(k, _)| k != key);
	}

	/// Returns whether the key is present.
	pub fn contains_key(&self, key: &str) -> bool {
		self.pairs.iter().any(|(k, _)| k == key)
	}

	/// Returns the distinct keys in first-seen order.
	pub fn keys(&self) -> Vec<&str> {
		let mut keys: Vec<&str> = Vec::new();
		for (key, _) in &self.pairs {
			if !keys.contains(&key.as_str()) {
				keys.push(key);
			}
		}
		keys
	}

	/// Iterates over all pairs in order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
	}

	/// Returns the number of pairs.
	pub fn len(&self) -> usize {
		self.pairs.len()
	}

	/// Returns whether there are no pairs.
	pub fn is_empty(&self) -> bool {
		self.pairs.is_empty()
	}

	/// Sorts pairs by key. Values of the same key keep their relative order.
	pub fn sort(&mut self) {
		self.pairs.sort_by(|(a, _), (b, _)| a.cmp(b));
	}
}

impl fmt::Display for SearchParams {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let encoded = serde_urlencoded::to_string(&self.pairs).map_err(|_| fmt::Error)?;
		f.write_str(&encoded)
	}
}

impl From<&str> for SearchParams {
	fn from(query: &str) -> Self {
		Self::parse(query)
	}
}

impl From<String> for SearchParams {
	fn from(query: String) -> Self {
		Self::parse(&query)
	}
}

impl<K: Into<String>, V: Into<String>> From<Vec<(K, V)>> for SearchParams {
	fn from(pairs: Vec<(K, V)>) -> Self {
		pairs.into_iter().collect()
	}
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for SearchParams {
	fn from(pairs: [(K, V); N]) -> Self {
		pairs.into_iter().collect()
	}
}

impl From<HashMap<String, String>> for SearchParams {
	/// Keys are sorted so the output does not depend on hash order.
	fn from(map: HashMap<String, String>) -> Self {
		let mut params: Self = map.into_iter().collect();
		params.sort();
		params
	}
}

impl From<BTreeMap<String, String>> for SearchParams {
	fn from(map: BTreeMap<String, String>) -> Self {
		map.into_iter().collect()
	}
}

impl From<BTreeMap<String, Vec<String>>> for SearchParams {
	/// Each value of a key becomes its own pair.
	fn from(map: BTreeMap<String, Vec<String>>) -> Self {
		map.into_iter()
			.flat_map(|(key, values)| values.into_iter().map(move |v| (key.clone(), v)))
			.collect()
	}
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SearchParams {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self {
			pairs: iter
				.into_iter()
				.map(|(k, v)| (k.into(), v.into()))
				.collect(),
		}
	}
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for SearchParams {
	fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
		self.pairs
			.extend(iter.into_iter().map(|(k, v)| (k.into(), v.into())));
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde::Deserialize;

	#[rstest]
	#[case("", 0)]
	#[case("?", 0)]
	#[case("?a=1", 1)]
	#[case("a=1&b=2&a=3", 3)]
	fn test_parse_len(#[case] query: &str, #[case] expected: usize) {
		assert_eq!(SearchParams::parse(query).len(), expected);
	}

	#[rstest]
	fn test_parse_decodes_form_encoding() {
		let search = SearchParams::parse("?q=hello+world&path=%2Fa%2Fb");
		assert_eq!(search.get("q"), Some("hello world"));
		assert_eq!(search.get("path"), Some("/a/b"));
	}

	#[rstest]
	fn test_display_encodes() {
		let search = SearchParams::from([("q", "a b"), ("amp", "x&y")]);
		assert_eq!(search.to_string(), "q=a+b&amp=x%26y");
	}

	#[rstest]
	fn test_multi_values() {
		let search = SearchParams::parse("tag=a&x=1&tag=b");

		assert_eq!(search.get("tag"), Some("a"));
		assert_eq!(search.get_all("tag"), vec!["a", "b"]);
		assert_eq!(search.keys(), vec!["tag", "x"]);
	}

	#[rstest]
	fn test_set_keeps_first_position() {
		let mut search = SearchParams::parse("a=1&b=2&a=3");

		search.set("a", "9");
		assert_eq!(search.to_string(), "a=9&b=2");

		search.set("c", "4");
		assert_eq!(search.to_string(), "a=9&b=2&c=4");
	}

	#[rstest]
	fn test_remove_and_contains() {
		let mut search = SearchParams::parse("a=1&b=2&a=3");

		search.remove("a");
		assert!(!search.contains_key("a"));
		assert!(search.contains_key("b"));
		assert_eq!(search.len(), 1);
	}

	#[rstest]
	fn test_from_hash_map_is_sorted() {
		let mut map = HashMap::new();
		map.insert("z".to_string(), "1".to_string());
		map.insert("a".to_string(), "2".to_string());

		assert_eq!(SearchParams::from(map).to_string(), "a=2&z=1");
	}

	#[rstest]
	fn test_from_multi_value_map() {
		let mut map = BTreeMap::new();
		map.insert("tag".to_string(), vec!["a".to_string(), "b".to_string()]);

		assert_eq!(SearchParams::from(map).to_string(), "tag=a&tag=b");
	}

	#[derive(Debug, PartialEq, Serialize, Deserialize)]
	struct Filter {
		page: u32,
		q: String,
	}

	#[rstest]
	fn test_serde_conversions() {
		// Arrange
		let filter = Filter {
			page: 2,
			q: "rust lang".to_string(),
		};

		// Act
		let search = SearchParams::from_serialize(&filter).unwrap();
		let back: Filter = search.deserialize().unwrap();

		// Assert
		assert_eq!(search.to_string(), "page=2&q=rust+lang");
		assert_eq!(back, filter);
	}

	#[rstest]
	fn test_deserialize_reports_missing_field() {
		let search = SearchParams::parse("q=x");
		assert!(search.deserialize::<Filter>().is_err());
	}
}
