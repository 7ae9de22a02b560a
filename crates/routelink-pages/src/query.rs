//! Query-string state.
//!
//! [`use_query_params`] decodes the navigator's current query through a
//! [`ParamSet`] and hands back a [`QuerySetter`] that writes typed values
//! back into the URL.

use std::fmt;
use std::marker::PhantomData;

use routelink_urls::SearchParams;

use crate::error::{ParamError, RouteError};
use crate::navigator::{NavigateMode, Navigator};
use crate::params::{ParamSet, merge_into_search};

/// How a query update is applied to the URL.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum UpdateType {
	/// Merge into the current query, replacing the history entry.
	#[default]
	ReplaceIn,
	/// Replace the whole query and the history entry.
	Replace,
	/// Merge into the current query, adding a history entry.
	PushIn,
	/// Replace the whole query, adding a history entry.
	Push,
}

impl UpdateType {
	/// Returns the navigation mode this update uses.
	pub fn mode(self) -> NavigateMode {
		match self {
			Self::ReplaceIn | Self::Replace => NavigateMode::Replace,
			Self::PushIn | Self::Push => NavigateMode::Push,
		}
	}

	/// Returns whether untouched keys of the current query are kept.
	pub fn merges(self) -> bool {
		matches!(self, Self::ReplaceIn | Self::PushIn)
	}
}

/// Writes typed query parameters through a navigator.
///
/// The pathname and hash of the current location are kept.
pub struct QuerySetter<Q, N> {
	navigator: N,
	_query: PhantomData<fn(Q)>,
}

impl<Q: ParamSet, N: Navigator> QuerySetter<Q, N> {
	/// Creates a setter bound to `navigator`.
	pub fn new(navigator: N) -> Self {
		Self {
			navigator,
			_query: PhantomData,
		}
	}

	/// Returns the navigator this setter writes through.
	pub fn navigator(&self) -> &N {
		&self.navigator
	}

	/// Decodes the current query.
	pub fn current(&self) -> Result<Q, ParamError> {
		Q::decode_search(&self.navigator.location().search)
	}

	/// Encodes `query` and navigates to the updated location.
	///
	/// With a merging update type, keys encoded as absent are removed and
	/// other keys of the current query are kept. Otherwise the encoded query
	/// replaces the current one.
	///
	/// # Errors
	///
	/// Returns [`RouteError::Param`] if encoding fails and
	/// [`RouteError::NavigationFailed`] if the navigator rejects the URL.
	pub fn set(&self, query: &Q, update: UpdateType) -> Result<(), RouteError> {
		let location = self.navigator.location();
		let search = if update.merges() {
			let mut search = location.search.clone();
			merge_into_search(&mut search, &query.encode_params()?);
			search
		} else {
			query.encode_search()?
		};

		let href = location.with_search(search).href();
		tracing::debug!(%href, ?update, "set query params");
		self.navigator.navigate(&href, update.mode())
	}

	/// Decodes the current query, applies `f` and writes the result.
	///
	/// # Errors
	///
	/// Returns [`RouteError::Param`] if the current query does not decode
	/// or the new one does not encode.
	pub fn update<F>(&self, f: F, update: UpdateType) -> Result<(), RouteError>
	where
		F: FnOnce(Q) -> Q,
	{
		let next = f(self.current()?);
		self.set(&next, update)
	}

	/// Removes every query parameter.
	pub fn clear(&self, update: UpdateType) -> Result<(), RouteError> {
		let location = self.navigator.location();
		let href = location.with_search(SearchParams::new()).href();
		self.navigator.navigate(&href, update.mode())
	}
}

impl<Q, N: Clone> Clone for QuerySetter<Q, N> {
	fn clone(&self) -> Self {
		Self {
			navigator: self.navigator.clone(),
			_query: PhantomData,
		}
	}
}

impl<Q, N: fmt::Debug> fmt::Debug for QuerySetter<Q, N> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("QuerySetter")
			.field("navigator", &self.navigator)
			.finish()
	}
}

/// Reads the current query as `Q` and returns a setter for it.
///
/// # Example
///
/// ```
/// use routelink_pages::codec::IntParam;
/// use routelink_pages::define_params;
/// use routelink_pages::navigator::MemoryNavigator;
/// use routelink_pages::params::Optional;
/// use routelink_pages::query::{UpdateType, use_query_params};
///
/// define_params! {
///     struct Paging {
///         page: Optional<IntParam>,
///     }
/// }
///
/// let navigator = MemoryNavigator::new("/list?page=1&sort=name");
/// let (paging, set_paging) = use_query_params::<Paging, _>(navigator.clone());
///
/// assert_eq!(paging.unwrap().page, Some(1));
/// set_paging.set(&Paging { page: Some(2) }, UpdateType::ReplaceIn).unwrap();
/// assert_eq!(navigator.href(), "/list?page=2&sort=name");
/// ```
pub fn use_query_params<Q: ParamSet, N: Navigator>(
	navigator: N,
) -> (Result<Q, ParamError>, QuerySetter<Q, N>) {
	let setter = QuerySetter::new(navigator);
	(setter.current(), setter)
}
