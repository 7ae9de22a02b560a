//! # routelink
//!
//! Strongly-typed route descriptors for client-side routing.
//!
//! Declare a route once, with typed path and query parameters, and derive
//! everything else from it: links, matchers, the current parameters of a
//! page and a setter for its query string.
//!
//! ## Feature Flags
//!
//! - `urls` - Router primitives: path patterns, search params, locations
//! - `pages` - Typed routes, parameter codecs, navigator context
//! - `chrono` - Date and date-time codecs
//! - `full` (default) - All of the above
//!
//! ## Quick Example
//!
//! ```rust
//! use routelink::prelude::*;
//!
//! define_params! {
//!     pub struct ArticleParams {
//!         pub slug: Required<StringParam>,
//!     }
//! }
//!
//! define_params! {
//!     pub struct ArticleQuery {
//!         pub page: Optional<IntParam>,
//!     }
//! }
//!
//! let article = Route::<ArticleParams, ArticleQuery>::typed("/articles/:slug").unwrap();
//!
//! let href = article
//!     .link_with_search(
//!         &ArticleParams { slug: "hello world".to_string() },
//!         &ArticleQuery { page: Some(2) },
//!     )
//!     .unwrap();
//! assert_eq!(href, "/articles/hello%20world?page=2");
//!
//! let matched = article.match_path("/articles/hello%20world").unwrap().unwrap();
//! assert_eq!(matched.params.slug, "hello world");
//! ```

#[cfg(feature = "pages")]
pub mod pages;
#[cfg(feature = "urls")]
pub mod urls;

#[cfg(feature = "urls")]
pub use routelink_urls::{
	GenerateError, Location, MatchOptions, PathMatch, PathPattern, PatternError, SearchParams,
	generate_path, match_path,
};

#[cfg(feature = "pages")]
pub use routelink_pages::{
	CodecError, Encoded, MemoryNavigator, NavigateMode, Navigator, ParamCodec, ParamError,
	ParamSet, QuerySetter, Route, RouteError, RouteMatch, RouteParams, UpdateType, define_params,
	use_query_params,
};

/// Convenience re-exports of commonly used types.
pub mod prelude {
	#[cfg(feature = "urls")]
	pub use crate::{Location, MatchOptions, PathPattern, SearchParams};

	#[cfg(feature = "pages")]
	pub use routelink_pages::prelude::*;
}
