//! Shared fixtures for the routelink integration tests.

use routelink::prelude::*;
use serde::{Deserialize, Serialize};

/// Map viewport carried as JSON in the query string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapView {
	pub lat: f64,
	pub lng: f64,
	pub zoom: u8,
}

define_params! {
	/// Query of the map page.
	#[derive(Debug, Clone, PartialEq)]
	pub struct MapQuery {
		pub view: Optional<JsonParam<MapView>>,
		pub layers: Optional<ArrayParam>,
		pub filter: Optional<ObjectParam>,
	}
}

/// Route of the map page: no path parameters, typed query.
pub fn map_route() -> Result<Route<(), MapQuery>, routelink::PatternError> {
	Route::typed("/map")
}
