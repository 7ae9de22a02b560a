//! Typed parameter sets.
//!
//! A parameter set is a struct whose fields are each bound to a
//! [`ParamCodec`]. Routes use one for their path parameters and one for
//! their query parameters. Sets are declared with [`define_params!`]:
//!
//! ```
//! use routelink_pages::codec::{IntParam, StringParam};
//! use routelink_pages::define_params;
//! use routelink_pages::params::{Optional, ParamSet, Required};
//!
//! define_params! {
//!     #[derive(Debug, PartialEq)]
//!     pub struct ItemParams {
//!         pub id: Required<IntParam>,
//!         pub tab as "t": Optional<StringParam>,
//!     }
//! }
//!
//! let params = ItemParams { id: 7, tab: None };
//! let raw = params.encode_params().unwrap();
//! assert_eq!(ItemParams::decode_params(&raw).unwrap(), params);
//! assert_eq!(ItemParams::param_names(), vec!["id", "t"]);
//! ```
//!
//! Untyped routes use the passthrough sets: `BTreeMap<String, String>` and
//! `HashMap<String, String>` for paths, [`SearchParams`] for queries.

use std::collections::{BTreeMap, HashMap};
use std::marker::PhantomData;

use routelink_urls::SearchParams;

use crate::codec::{Encoded, ParamCodec};
use crate::error::ParamError;

/// Encoded parameters keyed by name.
pub type RawParams = BTreeMap<String, Encoded>;

static ABSENT: Encoded = Encoded::Absent;

/// A set of named parameters that can be encoded to [`RawParams`] and back.
pub trait ParamSet: Sized {
	/// Names this set reads and writes. Empty means any name.
	fn param_names() -> Vec<&'static str> {
		Vec::new()
	}

	/// Encodes every field.
	///
	/// # Errors
	///
	/// Returns [`ParamError::Invalid`] if a field's codec fails.
	fn encode_params(&self) -> Result<RawParams, ParamError>;

	/// Decodes a set from raw parameters.
	///
	/// # Errors
	///
	/// Returns [`ParamError::Missing`] for an absent required field and
	/// [`ParamError::Invalid`] for a malformed required one.
	fn decode_params(raw: &RawParams) -> Result<Self, ParamError>;

	/// Encodes the set as a query.
	fn encode_search(&self) -> Result<SearchParams, ParamError> {
		Ok(search_from_raw(&self.encode_params()?))
	}

	/// Decodes the set from a query.
	fn decode_search(search: &SearchParams) -> Result<Self, ParamError> {
		Self::decode_params(&raw_from_search(search))
	}
}

/// Binds a codec to a field of a parameter set.
///
/// Implemented by [`Required`] and [`Optional`]; [`define_params!`] uses
/// `<Kind as ParamField>::Output` as the field type.
pub trait ParamField {
	/// The field's Rust type.
	type Output;

	/// Encodes a field value under `key`.
	fn encode_field(key: &str, value: &Self::Output) -> Result<Encoded, ParamError>;

	/// Decodes a field value under `key`.
	fn decode_field(key: &str, encoded: &Encoded) -> Result<Self::Output, ParamError>;
}

/// A field that must be present. Its type is the codec's value type.
pub struct Required<C>(PhantomData<fn() -> C>);

/// A field that may be missing. Its type is `Option` of the codec's value
/// type; `None` encodes as [`Encoded::Absent`].
///
/// A malformed value decodes to `None` with a warning, so one bad key in a
/// user-edited URL does not discard the rest of the set.
pub struct Optional<C>(PhantomData<fn() -> C>);

impl<C: ParamCodec + Default> ParamField for Required<C> {
	type Output = C::Value;

	fn encode_field(key: &str, value: &C::Value) -> Result<Encoded, ParamError> {
		C::default().encode(value).map_err(|source| invalid(key, source))
	}

	fn decode_field(key: &str, encoded: &Encoded) -> Result<C::Value, ParamError> {
		C::default()
			.decode(encoded)
			.map_err(|source| invalid(key, source))?
			.ok_or_else(|| ParamError::Missing(key.to_string()))
	}
}

impl<C: ParamCodec + Default> ParamField for Optional<C> {
	type Output = Option<C::Value>;

	fn encode_field(key: &str, value: &Option<C::Value>) -> Result<Encoded, ParamError> {
		match value {
			Some(value) => C::default().encode(value).map_err(|source| invalid(key, source)),
			None => Ok(Encoded::Absent),
		}
	}

	fn decode_field(key: &str, encoded: &Encoded) -> Result<Option<C::Value>, ParamError> {
		match C::default().decode(encoded) {
			Ok(value) => Ok(value),
			Err(error) => {
				tracing::warn!(key, %error, "ignoring malformed optional parameter");
				Ok(None)
			}
		}
	}
}

fn invalid(key: &str, source: crate::error::CodecError) -> ParamError {
	ParamError::Invalid {
		key: key.to_string(),
		source,
	}
}

/// Returns the wire name of a field: the rename if one is given, otherwise
/// the field name.
#[doc(hidden)]
pub fn param_name<const N: usize>(field: &'static str, rename: [&'static str; N]) -> &'static str {
	rename.first().copied().unwrap_or(field)
}

/// Looks up a raw value, treating a missing key as [`Encoded::Absent`].
pub fn raw_value<'a>(raw: &'a RawParams, key: &str) -> &'a Encoded {
	raw.get(key).unwrap_or(&ABSENT)
}

/// Declares a typed parameter set.
///
/// Each field is written `name: Required<Codec>` or
/// `name: Optional<Codec>`; `name as "wire-name": ...` uses a different
/// key in the URL. The generated struct has plain Rust field types and
/// implements [`ParamSet`].
#[macro_export]
macro_rules! define_params {
	(
		$(#[$meta:meta])*
		$vis:vis struct $name:ident {
			$(
				$(#[$field_meta:meta])*
				$field_vis:vis $field:ident $(as $rename:literal)? : $kind:ty
			),* $(,)?
		}
	) => {
		$(#[$meta])*
		$vis struct $name {
			$(
				$(#[$field_meta])*
				$field_vis $field: <$kind as $crate::params::ParamField>::Output,
			)*
		}

		impl $crate::params::ParamSet for $name {
			fn param_names() -> ::std::vec::Vec<&'static str> {
				::std::vec![
					$($crate::params::param_name(::core::stringify!($field), [$($rename)?])),*
				]
			}

			fn encode_params(
				&self,
			) -> ::core::result::Result<$crate::params::RawParams, $crate::error::ParamError> {
				#[allow(unused_mut)]
				let mut raw = $crate::params::RawParams::new();
				$(
					let key = $crate::params::param_name(::core::stringify!($field), [$($rename)?]);
					let encoded =
						<$kind as $crate::params::ParamField>::encode_field(key, &self.$field)?;
					raw.insert(::std::string::String::from(key), encoded);
				)*
				::core::result::Result::Ok(raw)
			}

			#[allow(unused_variables)]
			fn decode_params(
				raw: &$crate::params::RawParams,
			) -> ::core::result::Result<Self, $crate::error::ParamError> {
				::core::result::Result::Ok(Self {
					$(
						$field: {
							let key =
								$crate::params::param_name(::core::stringify!($field), [$($rename)?]);
							<$kind as $crate::params::ParamField>::decode_field(
								key,
								$crate::params::raw_value(raw, key),
							)?
						},
					)*
				})
			}
		}
	};
}

impl ParamSet for () {
	fn encode_params(&self) -> Result<RawParams, ParamError> {
		Ok(RawParams::new())
	}

	fn decode_params(_raw: &RawParams) -> Result<Self, ParamError> {
		Ok(())
	}
}

impl ParamSet for RawParams {
	fn encode_params(&self) -> Result<RawParams, ParamError> {
		Ok(self.clone())
	}

	fn decode_params(raw: &RawParams) -> Result<Self, ParamError> {
		Ok(raw.clone())
	}
}

impl ParamSet for BTreeMap<String, String> {
	fn encode_params(&self) -> Result<RawParams, ParamError> {
		Ok(self
			.iter()
			.map(|(key, value)| (key.clone(), Encoded::One(value.clone())))
			.collect())
	}

	fn decode_params(raw: &RawParams) -> Result<Self, ParamError> {
		Ok(path_from_raw(raw))
	}
}

impl ParamSet for HashMap<String, String> {
	fn encode_params(&self) -> Result<RawParams, ParamError> {
		Ok(self
			.iter()
			.map(|(key, value)| (key.clone(), Encoded::One(value.clone())))
			.collect())
	}

	fn decode_params(raw: &RawParams) -> Result<Self, ParamError> {
		Ok(path_from_raw(raw).into_iter().collect())
	}
}

impl ParamSet for SearchParams {
	fn encode_params(&self) -> Result<RawParams, ParamError> {
		Ok(raw_from_search(self))
	}

	fn decode_params(raw: &RawParams) -> Result<Self, ParamError> {
		Ok(search_from_raw(raw))
	}

	fn encode_search(&self) -> Result<SearchParams, ParamError> {
		Ok(self.clone())
	}

	fn decode_search(search: &SearchParams) -> Result<Self, ParamError> {
		Ok(search.clone())
	}
}

/// Wraps matched path values as raw parameters.
pub fn raw_from_path(params: &BTreeMap<String, String>) -> RawParams {
	params
		.iter()
		.map(|(key, value)| (key.clone(), Encoded::One(value.clone())))
		.collect()
}

/// Flattens raw parameters into path values.
///
/// Several values are joined with `/`, so an array fills a splat.
/// `Absent` and `Null` entries are left out.
pub fn path_from_raw(raw: &RawParams) -> BTreeMap<String, String> {
	raw.iter()
		.filter_map(|(key, encoded)| match encoded {
			Encoded::One(value) => Some((key.clone(), value.clone())),
			Encoded::Many(values) => Some((key.clone(), values.join("/"))),
			Encoded::Absent | Encoded::Null => None,
		})
		.collect()
}

/// Groups a query into raw parameters. Repeated keys become
/// [`Encoded::Many`].
pub fn raw_from_search(search: &SearchParams) -> RawParams {
	search
		.keys()
		.into_iter()
		.map(|key| {
			let mut values = search.get_all(key);
			let encoded = if values.len() == 1 {
				Encoded::One(values.remove(0).to_string())
			} else {
				Encoded::Many(values.into_iter().map(str::to_string).collect())
			};
			(key.to_string(), encoded)
		})
		.collect()
}

/// Writes raw parameters into an existing query.
///
/// Keys not mentioned in `raw` are kept. `Absent`, `Null` and an empty
/// `Many` remove the key.
pub fn merge_into_search(search: &mut SearchParams, raw: &RawParams) {
	for (key, encoded) in raw {
		match encoded {
			Encoded::One(value) => search.set(key.as_str(), value.as_str()),
			Encoded::Many(values) => match values.split_first() {
				Some((first, rest)) => {
					search.set(key.as_str(), first.as_str());
					for value in rest {
						search.append(key.as_str(), value.as_str());
					}
				}
				None => search.remove(key),
			},
			Encoded::Absent | Encoded::Null => search.remove(key),
		}
	}
}

/// Builds a fresh query from raw parameters.
pub fn search_from_raw(raw: &RawParams) -> SearchParams {
	let mut search = SearchParams::new();
	merge_into_search(&mut search, raw);
	search
}
