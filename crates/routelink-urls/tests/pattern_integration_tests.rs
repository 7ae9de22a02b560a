//! Integration tests for path patterns, search params and locations
//!
//! These tests verify the primitives through the public API:
//! 1. Generation and matching agree with each other
//! 2. Locations carry queries produced by SearchParams
//! 3. Match options loaded from configuration

use proptest::prelude::*;
use routelink_urls::{Location, MatchOptions, PathPattern, SearchParams};
use rstest::rstest;
use std::collections::BTreeMap;

#[rstest]
fn test_match_location_pathname() {
	// Arrange
	let pattern = PathPattern::new("/orders/:order_id/lines/:line").unwrap();
	let location = Location::parse("/orders/17/lines/3?expand=true#summary");

	// Act
	let matched = pattern.matches(&location.pathname).unwrap();

	// Assert
	assert_eq!(matched.param("order_id"), Some("17"));
	assert_eq!(matched.param("line"), Some("3"));
	assert_eq!(location.search.get("expand"), Some("true"));
}

#[rstest]
fn test_generate_then_attach_search() {
	// Arrange
	let pattern = PathPattern::new("/search").unwrap();
	let search = SearchParams::from([("q", "typed routes"), ("page", "2")]);

	// Act
	let path = pattern.generate(&BTreeMap::new()).unwrap();
	let location = Location::parse(&path).with_search(search);

	// Assert
	assert_eq!(location.href(), "/search?q=typed+routes&page=2");
}

#[rstest]
fn test_match_options_defaults_from_partial_config() {
	let options: MatchOptions = serde_json::from_str(r#"{"end": false}"#).unwrap();

	assert_eq!(options, MatchOptions::prefix());
	assert!(!options.case_sensitive);
}

proptest! {
	#[test]
	fn generated_paths_match_their_pattern(
		id in "[^/]{1,16}",
		rest in proptest::collection::vec("[a-zA-Z0-9 %?#&=._-]{1,8}", 0..4),
	) {
		let pattern = PathPattern::new("/items/:id/*").unwrap();
		let mut params = BTreeMap::new();
		params.insert("id".to_string(), id.clone());
		params.insert("*".to_string(), rest.join("/"));

		let path = pattern.generate(&params).unwrap();
		let matched = pattern.matches(&path).unwrap();

		prop_assert_eq!(matched.param("id"), Some(id.as_str()));
		let joined = rest.join("/");
		prop_assert_eq!(matched.splat(), Some(joined.as_str()));
	}
}
