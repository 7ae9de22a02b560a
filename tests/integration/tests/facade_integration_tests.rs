//! Integration tests for the routelink facade
//!
//! Routes declared through the prelude only, as a downstream application
//! would use them.

use routelink::prelude::*;
use routelink_integration_tests::{MapQuery, MapView, map_route};
use rstest::rstest;

#[rstest]
fn test_json_and_array_query_round_trip() {
	// Arrange
	let route = map_route().unwrap();
	let query = MapQuery {
		view: Some(MapView {
			lat: 35.5,
			lng: 139.25,
			zoom: 9,
		}),
		layers: Some(vec!["roads".to_string(), "rail".to_string()]),
		filter: Some([("kind".to_string(), "park".to_string())].into_iter().collect()),
	};

	// Act
	let href = route.search_link(&query).unwrap();
	let navigator = MemoryNavigator::new(&href);
	let (decoded, _) = use_query_params::<MapQuery, _>(&navigator);

	// Assert
	assert!(href.starts_with("/map?filter=kind-park&layers=roads&layers=rail&view="));
	assert_eq!(decoded.unwrap(), query);
}

#[rstest]
fn test_primitives_through_facade() {
	let pattern = routelink::urls::PathPattern::new("/a/:b?").unwrap();

	assert!(pattern.is_match("/a"));
	assert!(pattern.is_match("/a/x"));
	assert_eq!(routelink::generate_path("/a/:b?", &Default::default()).unwrap(), "/a");
}

#[rstest]
fn test_route_display_for_router_config() {
	let routes = [
		Route::new("/").unwrap(),
		Route::new("/items/:id").unwrap(),
		Route::new("/files/*").unwrap(),
	];

	let table: Vec<String> = routes.iter().map(ToString::to_string).collect();

	assert_eq!(table, vec!["/", "/items/:id", "/files/*"]);
}
