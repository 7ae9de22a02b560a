//! Parameter codecs.
//!
//! A codec turns a typed value into its URL-safe [`Encoded`] form and back.
//! The built-in codecs use the wire formats SPA query-param libraries have
//! settled on, so links stay readable and interoperable:
//!
//! | Codec | Value | Wire format |
//! |-------|-------|-------------|
//! | [`StringParam`] | `String` | as-is |
//! | [`IntParam`], [`NumberParam`], [`FromStrParam<T>`] | `T: FromStr + Display` | `Display` text |
//! | [`BooleanParam`] | `bool` | `1` / `0` |
//! | [`ArrayParam`], [`NumericArrayParam`] | `Vec<_>` | repeated keys |
//! | [`DelimitedArrayParam`], [`CommaArrayParam`], [`DelimitedNumericArrayParam`] | `Vec<_>` | one joined value |
//! | [`ObjectParam`] | `BTreeMap<String, String>` | `k-v_k2-v2` |
//! | [`JsonParam<T>`] | `T: Serialize + DeserializeOwned` | JSON text |
//! | `DateParam`, `DateTimeParam` (feature `chrono`) | `NaiveDate`, `DateTime<Utc>` | ISO 8601 |
//!
//! Every built-in codec satisfies `decode(encode(x)) == Some(x)`.

use std::collections::BTreeMap;
use std::fmt::Display;
use std::marker::PhantomData;
use std::str::FromStr;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::CodecError;

/// The URL-safe form of a single parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Encoded {
	/// The parameter is not present.
	#[default]
	Absent,
	/// The parameter is explicitly cleared.
	Null,
	/// A single value.
	One(String),
	/// Several values, one per repeated query key.
	Many(Vec<String>),
}

impl Encoded {
	/// Returns the first value, if any.
	pub fn first(&self) -> Option<&str> {
		match self {
			Self::One(value) => Some(value),
			Self::Many(values) => values.first().map(String::as_str),
			Self::Absent | Self::Null => None,
		}
	}

	/// Returns every value in order.
	pub fn values(&self) -> Vec<&str> {
		match self {
			Self::One(value) => vec![value.as_str()],
			Self::Many(values) => values.iter().map(String::as_str).collect(),
			Self::Absent | Self::Null => Vec::new(),
		}
	}

	/// Returns whether there is no value (`Absent` or `Null`).
	pub fn is_empty(&self) -> bool {
		matches!(self, Self::Absent | Self::Null)
	}
}

impl From<&str> for Encoded {
	fn from(value: &str) -> Self {
		Self::One(value.to_string())
	}
}

impl From<String> for Encoded {
	fn from(value: String) -> Self {
		Self::One(value)
	}
}

/// Converts a typed parameter value to and from its [`Encoded`] form.
pub trait ParamCodec {
	/// The decoded value type.
	type Value;

	/// Encodes a value.
	///
	/// # Errors
	///
	/// Returns [`CodecError::Encode`] if the value cannot be serialized.
	fn encode(&self, value: &Self::Value) -> Result<Encoded, CodecError>;

	/// Decodes a value. `Absent` and `Null` decode to `None`.
	///
	/// # Errors
	///
	/// Returns [`CodecError::Parse`] if the raw value is malformed.
	fn decode(&self, encoded: &Encoded) -> Result<Option<Self::Value>, CodecError>;
}

/// Plain string parameter. Repeated keys decode to the first value.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringParam;

impl ParamCodec for StringParam {
	type Value = String;

	fn encode(&self, value: &String) -> Result<Encoded, CodecError> {
		Ok(Encoded::One(value.clone()))
	}

	fn decode(&self, encoded: &Encoded) -> Result<Option<String>, CodecError> {
		Ok(encoded.first().map(str::to_string))
	}
}

/// Any type with `FromStr` and `Display` impls.
///
/// An empty raw value decodes to `None`.
pub struct FromStrParam<T>(PhantomData<fn() -> T>);

impl<T> Default for FromStrParam<T> {
	fn default() -> Self {
		Self(PhantomData)
	}
}

impl<T> Clone for FromStrParam<T> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<T> Copy for FromStrParam<T> {}

impl<T> std::fmt::Debug for FromStrParam<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "FromStrParam<{}>", std::any::type_name::<T>())
	}
}

impl<T> ParamCodec for FromStrParam<T>
where
	T: FromStr + Display,
	T::Err: Display,
{
	type Value = T;

	fn encode(&self, value: &T) -> Result<Encoded, CodecError> {
		Ok(Encoded::One(value.to_string()))
	}

	fn decode(&self, encoded: &Encoded) -> Result<Option<T>, CodecError> {
		match encoded.first() {
			None | Some("") => Ok(None),
			Some(raw) => parse_value(raw).map(Some),
		}
	}
}

/// Integer parameter (`i64`).
pub type IntParam = FromStrParam<i64>;

/// Floating point parameter (`f64`).
pub type NumberParam = FromStrParam<f64>;

/// Boolean parameter encoded as `1` / `0`.
///
/// Decoding also accepts `true` / `false`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanParam;

impl ParamCodec for BooleanParam {
	type Value = bool;

	fn encode(&self, value: &bool) -> Result<Encoded, CodecError> {
		Ok(Encoded::One(if *value { "1" } else { "0" }.to_string()))
	}

	fn decode(&self, encoded: &Encoded) -> Result<Option<bool>, CodecError> {
		match encoded.first() {
			None | Some("") => Ok(None),
			Some("1") | Some("true") => Ok(Some(true)),
			Some("0") | Some("false") => Ok(Some(false)),
			Some(raw) => Err(CodecError::Parse {
				type_name: "bool",
				raw: raw.to_string(),
				reason: "expected 1, 0, true or false".to_string(),
			}),
		}
	}
}

/// String array encoded as repeated query keys (`?tag=a&tag=b`).
#[derive(Debug, Clone, Copy, Default)]
pub struct ArrayParam;

impl ParamCodec for ArrayParam {
	type Value = Vec<String>;

	fn encode(&self, value: &Vec<String>) -> Result<Encoded, CodecError> {
		Ok(Encoded::Many(value.clone()))
	}

	fn decode(&self, encoded: &Encoded) -> Result<Option<Vec<String>>, CodecError> {
		if encoded.is_empty() {
			return Ok(None);
		}
		Ok(Some(encoded.values().into_iter().map(str::to_string).collect()))
	}
}

/// Numeric array encoded as repeated query keys.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumericArrayParam;

impl ParamCodec for NumericArrayParam {
	type Value = Vec<f64>;

	fn encode(&self, value: &Vec<f64>) -> Result<Encoded, CodecError> {
		Ok(Encoded::Many(value.iter().map(f64::to_string).collect()))
	}

	fn decode(&self, encoded: &Encoded) -> Result<Option<Vec<f64>>, CodecError> {
		if encoded.is_empty() {
			return Ok(None);
		}
		encoded
			.values()
			.into_iter()
			.map(parse_value)
			.collect::<Result<Vec<_>, _>>()
			.map(Some)
	}
}

/// String array joined into one value with `SEP` (`_` by default).
///
/// Entries must not contain the separator. An empty array encodes to an
/// empty string, so `vec![""]` and `vec![]` share that encoding and both
/// decode to an empty array.
#[derive(Debug, Clone, Copy, Default)]
pub struct DelimitedArrayParam<const SEP: char = '_'>;

/// String array joined with `,`.
pub type CommaArrayParam = DelimitedArrayParam<','>;

impl<const SEP: char> ParamCodec for DelimitedArrayParam<SEP> {
	type Value = Vec<String>;

	fn encode(&self, value: &Vec<String>) -> Result<Encoded, CodecError> {
		Ok(Encoded::One(value.join(SEP.to_string().as_str())))
	}

	fn decode(&self, encoded: &Encoded) -> Result<Option<Vec<String>>, CodecError> {
		Ok(encoded.first().map(|raw| split_entries(raw, SEP).map(str::to_string).collect()))
	}
}

/// Numeric array joined into one value with `SEP` (`_` by default).
#[derive(Debug, Clone, Copy, Default)]
pub struct DelimitedNumericArrayParam<const SEP: char = '_'>;

impl<const SEP: char> ParamCodec for DelimitedNumericArrayParam<SEP> {
	type Value = Vec<f64>;

	fn encode(&self, value: &Vec<f64>) -> Result<Encoded, CodecError> {
		let entries: Vec<String> = value.iter().map(f64::to_string).collect();
		Ok(Encoded::One(entries.join(SEP.to_string().as_str())))
	}

	fn decode(&self, encoded: &Encoded) -> Result<Option<Vec<f64>>, CodecError> {
		match encoded.first() {
			None => Ok(None),
			Some(raw) => split_entries(raw, SEP)
				.map(parse_value)
				.collect::<Result<Vec<_>, _>>()
				.map(Some),
		}
	}
}

/// Flat string map encoded as `key-value` entries joined with `_`.
///
/// Keys and values must not contain `-` or `_`. An entry without `-`
/// decodes to an empty value.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectParam;

impl ParamCodec for ObjectParam {
	type Value = BTreeMap<String, String>;

	fn encode(&self, value: &BTreeMap<String, String>) -> Result<Encoded, CodecError> {
		let entries: Vec<String> = value.iter().map(|(k, v)| format!("{}-{}", k, v)).collect();
		Ok(Encoded::One(entries.join("_")))
	}

	fn decode(&self, encoded: &Encoded) -> Result<Option<BTreeMap<String, String>>, CodecError> {
		Ok(encoded.first().map(|raw| {
			split_entries(raw, '_')
				.map(|entry| match entry.split_once('-') {
					Some((key, value)) => (key.to_string(), value.to_string()),
					None => (entry.to_string(), String::new()),
				})
				.collect()
		}))
	}
}

/// Any serde type, encoded as JSON text.
pub struct JsonParam<T>(PhantomData<fn() -> T>);

impl<T> Default for JsonParam<T> {
	fn default() -> Self {
		Self(PhantomData)
	}
}

impl<T> std::fmt::Debug for JsonParam<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "JsonParam<{}>", std::any::type_name::<T>())
	}
}

impl<T: Serialize + DeserializeOwned> ParamCodec for JsonParam<T> {
	type Value = T;

	fn encode(&self, value: &T) -> Result<Encoded, CodecError> {
		serde_json::to_string(value)
			.map(Encoded::One)
			.map_err(|e| CodecError::Encode {
				type_name: std::any::type_name::<T>(),
				reason: e.to_string(),
			})
	}

	fn decode(&self, encoded: &Encoded) -> Result<Option<T>, CodecError> {
		match encoded.first() {
			None | Some("") => Ok(None),
			Some(raw) => serde_json::from_str(raw)
				.map(Some)
				.map_err(|e| CodecError::Parse {
					type_name: std::any::type_name::<T>(),
					raw: raw.to_string(),
					reason: e.to_string(),
				}),
		}
	}
}

/// Wraps a codec so that a missing value decodes to `Default::default()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultParam<C>(pub C);

impl<C> ParamCodec for DefaultParam<C>
where
	C: ParamCodec,
	C::Value: Default,
{
	type Value = C::Value;

	fn encode(&self, value: &C::Value) -> Result<Encoded, CodecError> {
		self.0.encode(value)
	}

	fn decode(&self, encoded: &Encoded) -> Result<Option<C::Value>, CodecError> {
		Ok(Some(self.0.decode(encoded)?.unwrap_or_default()))
	}
}

#[cfg(feature = "chrono")]
mod dates {
	use super::{CodecError, Encoded, ParamCodec};
	use chrono::{DateTime, NaiveDate, Utc};

	/// Calendar date encoded as `YYYY-MM-DD`.
	#[derive(Debug, Clone, Copy, Default)]
	pub struct DateParam;

	impl ParamCodec for DateParam {
		type Value = NaiveDate;

		fn encode(&self, value: &NaiveDate) -> Result<Encoded, CodecError> {
			Ok(Encoded::One(value.format("%Y-%m-%d").to_string()))
		}

		fn decode(&self, encoded: &Encoded) -> Result<Option<NaiveDate>, CodecError> {
			match encoded.first() {
				None | Some("") => Ok(None),
				Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
					.map(Some)
					.map_err(|e| CodecError::Parse {
						type_name: "chrono::NaiveDate",
						raw: raw.to_string(),
						reason: e.to_string(),
					}),
			}
		}
	}

	/// UTC timestamp encoded as RFC 3339.
	#[derive(Debug, Clone, Copy, Default)]
	pub struct DateTimeParam;

	impl ParamCodec for DateTimeParam {
		type Value = DateTime<Utc>;

		fn encode(&self, value: &DateTime<Utc>) -> Result<Encoded, CodecError> {
			Ok(Encoded::One(value.to_rfc3339()))
		}

		fn decode(&self, encoded: &Encoded) -> Result<Option<DateTime<Utc>>, CodecError> {
			match encoded.first() {
				None | Some("") => Ok(None),
				Some(raw) => DateTime::parse_from_rfc3339(raw)
					.map(|dt| Some(dt.with_timezone(&Utc)))
					.map_err(|e| CodecError::Parse {
						type_name: "chrono::DateTime<Utc>",
						raw: raw.to_string(),
						reason: e.to_string(),
					}),
			}
		}
	}
}

#[cfg(feature = "chrono")]
pub use dates::{DateParam, DateTimeParam};

fn parse_value<T>(raw: &str) -> Result<T, CodecError>
where
	T: FromStr,
	T::Err: Display,
{
	raw.parse::<T>().map_err(|e| CodecError::Parse {
		type_name: std::any::type_name::<T>(),
		raw: raw.to_string(),
		reason: e.to_string(),
	})
}

/// Splits a joined value, treating an empty string as no entries.
fn split_entries(raw: &str, separator: char) -> impl Iterator<Item = &str> {
	raw.split(separator).filter(move |_| !raw.is_empty())
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde::Deserialize;

	fn one(value: &str) -> Encoded {
		Encoded::One(value.to_string())
	}

	#[rstest]
	fn test_string_param() {
		let codec = StringParam;

		assert_eq!(codec.encode(&"a b".to_string()).unwrap(), one("a b"));
		assert_eq!(codec.decode(&one("")).unwrap(), Some(String::new()));
		assert_eq!(
			codec
				.decode(&Encoded::Many(vec!["x".to_string(), "y".to_string()]))
				.unwrap(),
			Some("x".to_string())
		);
		assert_eq!(codec.decode(&Encoded::Absent).unwrap(), None);
		assert_eq!(codec.decode(&Encoded::Null).unwrap(), None);
	}

	#[rstest]
	#[case("123", Some(123))]
	#[case("-7", Some(-7))]
	#[case("", None)]
	fn test_int_param_decode(#[case] raw: &str, #[case] expected: Option<i64>) {
		assert_eq!(IntParam::default().decode(&one(raw)).unwrap(), expected);
	}

	#[rstest]
	fn test_int_param_parse_error() {
		let err = IntParam::default().decode(&one("abc")).unwrap_err();

		match err {
			CodecError::Parse { type_name, raw, .. } => {
				assert_eq!(type_name, "i64");
				assert_eq!(raw, "abc");
			}
			_ => panic!("Expected Parse error"),
		}
	}

	#[rstest]
	fn test_number_param_encodes_whole_numbers_without_fraction() {
		assert_eq!(NumberParam::default().encode(&123.0).unwrap(), one("123"));
		assert_eq!(NumberParam::default().encode(&1.5).unwrap(), one("1.5"));
	}

	#[rstest]
	#[case("1", Some(true))]
	#[case("true", Some(true))]
	#[case("0", Some(false))]
	#[case("false", Some(false))]
	#[case("", None)]
	fn test_boolean_param_decode(#[case] raw: &str, #[case] expected: Option<bool>) {
		assert_eq!(BooleanParam.decode(&one(raw)).unwrap(), expected);
	}

	#[rstest]
	fn test_boolean_param_encode_and_reject() {
		assert_eq!(BooleanParam.encode(&true).unwrap(), one("1"));
		assert_eq!(BooleanParam.encode(&false).unwrap(), one("0"));
		assert!(BooleanParam.decode(&one("yes")).is_err());
	}

	#[rstest]
	fn test_array_param_accepts_single_value() {
		assert_eq!(
			ArrayParam.decode(&one("a")).unwrap(),
			Some(vec!["a".to_string()])
		);
		assert_eq!(
			ArrayParam
				.encode(&vec!["a".to_string(), "b".to_string()])
				.unwrap(),
			Encoded::Many(vec!["a".to_string(), "b".to_string()])
		);
	}

	#[rstest]
	fn test_numeric_array_param_rejects_bad_entry() {
		let encoded = Encoded::Many(vec!["1".to_string(), "x".to_string()]);
		assert!(NumericArrayParam.decode(&encoded).is_err());
	}

	#[rstest]
	fn test_delimited_array_params() {
		let underscore: DelimitedArrayParam = DelimitedArrayParam;
		let tags = vec!["a".to_string(), "b".to_string()];

		assert_eq!(underscore.encode(&tags).unwrap(), one("a_b"));
		assert_eq!(CommaArrayParam::default().encode(&tags).unwrap(), one("a,b"));
		assert_eq!(
			CommaArrayParam::default().decode(&one("a,b")).unwrap(),
			Some(tags)
		);
		assert_eq!(underscore.decode(&one("")).unwrap(), Some(Vec::new()));
	}

	#[rstest]
	fn test_delimited_array_single_empty_entry_decodes_empty() {
		let codec = CommaArrayParam::default();

		let encoded = codec.encode(&vec![String::new()]).unwrap();

		assert_eq!(encoded, one(""));
		assert_eq!(codec.decode(&encoded).unwrap(), Some(Vec::new()));
	}

	#[rstest]
	fn test_delimited_numeric_array_param() {
		let codec: DelimitedNumericArrayParam = DelimitedNumericArrayParam;

		assert_eq!(codec.encode(&vec![1.0, 2.5]).unwrap(), one("1_2.5"));
		assert_eq!(codec.decode(&one("1_2.5")).unwrap(), Some(vec![1.0, 2.5]));
	}

	#[rstest]
	fn test_object_param() {
		let mut map = BTreeMap::new();
		map.insert("color".to_string(), "red".to_string());
		map.insert("size".to_string(), "xl".to_string());

		assert_eq!(ObjectParam.encode(&map).unwrap(), one("color-red_size-xl"));
		assert_eq!(ObjectParam.decode(&one("color-red_size-xl")).unwrap(), Some(map));
	}

	#[derive(Debug, PartialEq, Serialize, Deserialize)]
	struct Viewport {
		x: i32,
		y: i32,
	}

	#[rstest]
	fn test_json_param() {
		let codec = JsonParam::<Viewport>::default();
		let viewport = Viewport { x: 1, y: -2 };

		assert_eq!(codec.encode(&viewport).unwrap(), one(r#"{"x":1,"y":-2}"#));
		assert_eq!(
			codec.decode(&one(r#"{"x":1,"y":-2}"#)).unwrap(),
			Some(viewport)
		);
		assert!(codec.decode(&one("{")).is_err());
	}

	#[rstest]
	fn test_default_param() {
		let codec = DefaultParam(IntParam::default());

		assert_eq!(codec.decode(&Encoded::Absent).unwrap(), Some(0));
		assert_eq!(codec.decode(&one("5")).unwrap(), Some(5));
	}

	#[rstest]
	#[cfg(feature = "chrono")]
	fn test_date_param() {
		use chrono::NaiveDate;

		let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
		assert_eq!(DateParam.encode(&date).unwrap(), one("2024-01-15"));
		assert_eq!(DateParam.decode(&one("2024-01-15")).unwrap(), Some(date));
		assert!(DateParam.decode(&one("not-a-date")).is_err());
	}

	#[rstest]
	#[cfg(feature = "chrono")]
	fn test_date_time_param() {
		use chrono::{TimeZone, Utc};

		let instant = Utc.with_ymd_and_hms(2024, 1, 15, 8, 30, 0).unwrap();
		let encoded = DateTimeParam.encode(&instant).unwrap();

		assert_eq!(encoded, one("2024-01-15T08:30:00+00:00"));
		assert_eq!(DateTimeParam.decode(&encoded).unwrap(), Some(instant));
	}
}


#[cfg(all(test, feature = "chrono"))]
mod date_proptests {
	use super::*;
	use chrono::{DateTime, NaiveDate};
	use proptest::prelude::*;

	proptest! {
		#[test]
		fn date_param_decodes_what_it_encodes(year in 1i32..9999, ordinal in 1u32..=365) {
			let date = NaiveDate::from_yo_opt(year, ordinal).unwrap();
			let encoded = DateParam.encode(&date).unwrap();
			prop_assert_eq!(DateParam.decode(&encoded).unwrap(), Some(date));
		}

		#[test]
		fn date_time_param_decodes_what_it_encodes(
			seconds in 0i64..4_000_000_000,
			nanos in 0u32..1_000_000_000,
		) {
			let instant = DateTime::from_timestamp(seconds, nanos).unwrap();
			let encoded = DateTimeParam.encode(&instant).unwrap();
			prop_assert_eq!(DateTimeParam.decode(&encoded).unwrap(), Some(instant));
		}
	}
}
