//! Typed route descriptors.
//!
//! This crate builds on the primitives of `routelink-urls`. A [`Route`]
//! ties a path pattern to typed path and query parameter sets, so one
//! declaration produces links, matches and the current parameters of a
//! page:
//!
//! - [`codec`]: converts single values to URL text and back
//! - [`params`]: parameter sets declared with [`define_params!`]
//! - [`navigator`]: the current location, passed explicitly
//! - [`query`]: reading and writing typed query parameters
//! - [`route`]: the descriptor itself
//!
//! ## Example
//!
//! ```
//! use routelink_pages::prelude::*;
//!
//! define_params! {
//!     pub struct ItemParams {
//!         pub id: Required<IntParam>,
//!     }
//! }
//!
//! define_params! {
//!     pub struct ItemQuery {
//!         pub tab: Optional<StringParam>,
//!     }
//! }
//!
//! let item = Route::<ItemParams, ItemQuery>::typed("/items/:id").unwrap();
//! let navigator = MemoryNavigator::new("/items/7?tab=specs");
//!
//! let params = item.params(&navigator);
//! assert_eq!(params.path.unwrap().id, 7);
//! assert_eq!(params.query.unwrap().tab.as_deref(), Some("specs"));
//!
//! params
//!     .set_query
//!     .set(&ItemQuery { tab: None }, UpdateType::Push)
//!     .unwrap();
//! assert_eq!(navigator.href(), "/items/7");
//! ```

pub mod codec;
pub mod error;
pub mod navigator;
pub mod params;
pub mod query;
pub mod route;

pub use codec::{Encoded, ParamCodec};
pub use error::{CodecError, ParamError, RouteError};
pub use navigator::{MemoryNavigator, NavigateMode, Navigator, Subscription};
pub use params::{Optional, ParamField, ParamSet, RawParams, Required};
pub use query::{QuerySetter, UpdateType, use_query_params};
pub use route::{Route, RouteMatch, RouteParams};

/// Everything needed to declare and use routes.
pub mod prelude {
	pub use crate::codec::{
		ArrayParam, BooleanParam, CommaArrayParam, DefaultParam, DelimitedArrayParam,
		DelimitedNumericArrayParam, Encoded, FromStrParam, IntParam, JsonParam, NumberParam,
		NumericArrayParam, ObjectParam, ParamCodec, StringParam,
	};
	#[cfg(feature = "chrono")]
	pub use crate::codec::{DateParam, DateTimeParam};
	pub use crate::define_params;
	pub use crate::error::{CodecError, ParamError, RouteError};
	pub use crate::navigator::{MemoryNavigator, NavigateMode, Navigator};
	pub use crate::params::{Optional, ParamSet, Required};
	pub use crate::query::{QuerySetter, UpdateType, use_query_params};
	pub use crate::route::{Route, RouteMatch, RouteParams};
	pub use routelink_urls::{Location, MatchOptions, SearchParams};
}
