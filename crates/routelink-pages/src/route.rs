//! Typed route descriptors.
//!
//! A [`Route`] wraps one path pattern together with the parameter sets of
//! its path (`P`) and query (`Q`). From it an application derives links,
//! matches and the current parameters without repeating the pattern or
//! hand-writing the string conversions.
//!
//! ```
//! use routelink_pages::codec::IntParam;
//! use routelink_pages::define_params;
//! use routelink_pages::params::Required;
//! use routelink_pages::route::Route;
//!
//! define_params! {
//!     #[derive(Debug, PartialEq)]
//!     pub struct ItemParams {
//!         pub id: Required<IntParam>,
//!     }
//! }
//!
//! let item = Route::<ItemParams, ()>::typed("/items/:id").unwrap();
//!
//! assert_eq!(item.link(&ItemParams { id: 123 }).unwrap(), "/items/123");
//! let matched = item.match_path("/items/123").unwrap().unwrap();
//! assert_eq!(matched.params, ItemParams { id: 123 });
//! assert_eq!(item.route(), "/items/:id");
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;

use routelink_urls::{MatchOptions, PathMatch, PathPattern, PatternError, SearchParams};

use crate::error::{ParamError, RouteError};
use crate::navigator::Navigator;
use crate::params::{ParamSet, RawParams, path_from_raw, raw_from_path};
use crate::query::QuerySetter;

/// A route descriptor.
///
/// `P` is the path parameter set and `Q` the query parameter set. The
/// untyped defaults pass raw strings through unchanged.
pub struct Route<P = BTreeMap<String, String>, Q = SearchParams> {
	pattern: PathPattern,
	_params: PhantomData<fn() -> (P, Q)>,
}

/// A successful match of a path against a [`Route`].
#[derive(Debug, Clone, PartialEq)]
pub struct RouteMatch<P> {
	/// Decoded path parameters.
	pub params: P,
	/// The portion of the path that was matched.
	pub pathname: String,
	/// The matched portion before the splat.
	pub pathname_base: String,
	/// The pattern that matched.
	pub pattern: String,
}

/// The parameters of a route at the navigator's current location.
///
/// Path and query are decoded independently; a failure of one leaves the
/// other intact.
pub struct RouteParams<P, Q, N> {
	/// Path parameters decoded from the current pathname. When the pathname
	/// does not match the route, this decodes an empty set.
	pub path: Result<P, ParamError>,
	/// Query parameters decoded from the current search.
	pub query: Result<Q, ParamError>,
	/// Writes query parameters back to the navigator.
	pub set_query: QuerySetter<Q, N>,
}

impl Route {
	/// Creates an untyped route.
	///
	/// # Errors
	///
	/// Returns [`PatternError`] if the pattern does not compile.
	pub fn new(pattern: &str) -> Result<Self, PatternError> {
		Self::typed(pattern)
	}
}

impl<P: ParamSet, Q: ParamSet> Route<P, Q> {
	/// Creates a route with the parameter sets given as type arguments.
	///
	/// Path parameter names that do not appear in the pattern are logged
	/// as a warning and otherwise ignored.
	///
	/// # Errors
	///
	/// Returns [`PatternError`] if the pattern does not compile.
	pub fn typed(pattern: &str) -> Result<Self, PatternError> {
		Self::compiled(PathPattern::new(pattern)?)
	}

	fn compiled(pattern: PathPattern) -> Result<Self, PatternError> {
		warn_unknown_params::<P>(&pattern);
		Ok(Self {
			pattern,
			_params: PhantomData,
		})
	}

	/// Replaces the path parameter set.
	pub fn with_path_params<P2: ParamSet>(self) -> Route<P2, Q> {
		warn_unknown_params::<P2>(&self.pattern);
		Route {
			pattern: self.pattern,
			_params: PhantomData,
		}
	}

	/// Replaces the query parameter set.
	pub fn with_query_params<Q2: ParamSet>(self) -> Route<P, Q2> {
		Route {
			pattern: self.pattern,
			_params: PhantomData,
		}
	}

	/// Recompiles the pattern with different match options.
	///
	/// # Errors
	///
	/// Returns [`PatternError`] if the pattern does not compile with the
	/// new options.
	pub fn with_options(self, options: MatchOptions) -> Result<Self, PatternError> {
		Self::compiled(PathPattern::with_options(self.pattern.as_str(), options)?)
	}

	/// Returns the pattern string, for registering with a router.
	pub fn pattern(&self) -> &str {
		self.pattern.as_str()
	}

	/// Same as [`Route::pattern`].
	pub fn route(&self) -> &str {
		self.pattern.as_str()
	}

	/// Returns the compiled pattern.
	pub fn path_pattern(&self) -> &PathPattern {
		&self.pattern
	}

	/// Returns the names of `P` that are not placeholders of the pattern.
	///
	/// These are ignored when generating links and logged as a warning
	/// when the route is built.
	pub fn unknown_path_params(&self) -> Vec<&'static str> {
		unknown_params::<P>(&self.pattern)
	}

	/// Builds the path for `params`.
	///
	/// # Errors
	///
	/// Returns [`RouteError::Param`] if a value does not encode and
	/// [`RouteError::Generate`] if a required placeholder has no value.
	pub fn link(&self, params: &P) -> Result<String, RouteError> {
		let raw = params.encode_params()?;
		let path = self.pattern.generate(&path_from_raw(&raw))?;
		tracing::debug!(pattern = %self.pattern, %path, "generated link");
		Ok(path)
	}

	/// Builds the path for `params` followed by the encoded `query`.
	///
	/// The `?` is left out when the query is empty.
	///
	/// # Errors
	///
	/// Same as [`Route::link`], plus [`RouteError::Param`] if the query
	/// does not encode.
	pub fn link_with_search(&self, params: &P, query: &Q) -> Result<String, RouteError> {
		let path = self.link(params)?;
		Ok(with_query(path, &query.encode_search()?))
	}

	/// Builds a link with no path parameters, carrying only `query`.
	///
	/// # Errors
	///
	/// Returns [`RouteError::Generate`] if the pattern has a required
	/// placeholder.
	pub fn search_link(&self, query: &Q) -> Result<String, RouteError> {
		let path = self.pattern.generate(&BTreeMap::new())?;
		let href = with_query(path, &query.encode_search()?);
		tracing::debug!(pattern = %self.pattern, %href, "generated search link");
		Ok(href)
	}

	/// Matches a path against the route and decodes its parameters.
	///
	/// Anything after `?` or `#` is ignored. Returns `Ok(None)` when the
	/// path does not match.
	///
	/// # Errors
	///
	/// Returns [`RouteError::Param`] when the path matches but a parameter
	/// does not decode.
	pub fn match_path(&self, path: &str) -> Result<Option<RouteMatch<P>>, RouteError> {
		let pathname = path.split(['?', '#']).next().unwrap_or(path);
		match self.pattern.matches(pathname) {
			Some(matched) => Ok(Some(decode_match(matched)?)),
			None => Ok(None),
		}
	}

	/// Matches the navigator's current pathname.
	///
	/// # Errors
	///
	/// Same as [`Route::match_path`].
	pub fn match_location<N: Navigator>(
		&self,
		navigator: N,
	) -> Result<Option<RouteMatch<P>>, RouteError> {
		self.match_path(&navigator.location().pathname)
	}

	/// Reads the route's path and query parameters at the navigator's
	/// current location.
	pub fn params<N: Navigator>(&self, navigator: N) -> RouteParams<P, Q, N> {
		let location = navigator.location();
		let raw = match self.pattern.matches(&location.pathname) {
			Some(matched) => raw_from_path(&matched.params),
			None => RawParams::new(),
		};

		RouteParams {
			path: P::decode_params(&raw),
			query: Q::decode_search(&location.search),
			set_query: QuerySetter::new(navigator),
		}
	}
}

impl<P, Q> Clone for Route<P, Q> {
	fn clone(&self) -> Self {
		Self {
			pattern: self.pattern.clone(),
			_params: PhantomData,
		}
	}
}

impl<P, Q> fmt::Debug for Route<P, Q> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Route")
			.field("pattern", &self.pattern.as_str())
			.field("options", &self.pattern.options())
			.finish()
	}
}

impl<P, Q> fmt::Display for Route<P, Q> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.pattern)
	}
}

impl<P, Q> PartialEq for Route<P, Q> {
	fn eq(&self, other: &Self) -> bool {
		self.pattern == other.pattern
	}
}

impl<P, Q, N: fmt::Debug> fmt::Debug for RouteParams<P, Q, N>
where
	P: fmt::Debug,
	Q: fmt::Debug,
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("RouteParams")
			.field("path", &self.path)
			.field("query", &self.query)
			.field("set_query", &self.set_query)
			.finish()
	}
}

fn decode_match<P: ParamSet>(matched: PathMatch) -> Result<RouteMatch<P>, ParamError> {
	Ok(RouteMatch {
		params: P::decode_params(&raw_from_path(&matched.params))?,
		pathname: matched.pathname,
		pathname_base: matched.pathname_base,
		pattern: matched.pattern,
	})
}

fn with_query(mut path: String, search: &SearchParams) -> String {
	if !search.is_empty() {
		path.push('?');
		path.push_str(&search.to_string());
	}
	path
}

fn unknown_params<P: ParamSet>(pattern: &PathPattern) -> Vec<&'static str> {
	P::param_names()
		.into_iter()
		.filter(|name| !pattern.param_names().iter().any(|known| known == name))
		.collect()
}

fn warn_unknown_params<P: ParamSet>(pattern: &PathPattern) {
	let unknown = unknown_params::<P>(pattern);
	if !unknown.is_empty() {
		tracing::warn!(
			pattern = %pattern,
			params = ?unknown,
			"path params are not placeholders of the pattern and will be ignored"
		);
	}
}
