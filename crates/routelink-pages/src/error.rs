//! Error types for typed routes.

use routelink_urls::{GenerateError, PatternError};

/// Failure of a single codec while encoding or decoding a value.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
	/// The raw value could not be parsed as the codec's type.
	#[error("cannot parse '{raw}' as {type_name}: {reason}")]
	Parse {
		/// Expected type name.
		type_name: &'static str,
		/// Raw string value that failed to parse.
		raw: String,
		/// Error message from parsing.
		reason: String,
	},
	/// The value could not be serialized.
	#[error("cannot encode {type_name}: {reason}")]
	Encode {
		type_name: &'static str,
		reason: String,
	},
}

/// Failure of a parameter set while encoding or decoding.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParamError {
	#[error("Missing required parameter '{0}'")]
	Missing(String),

	#[error("Invalid parameter '{key}': {source}")]
	Invalid {
		key: String,
		#[source]
		source: CodecError,
	},
}

impl ParamError {
	/// Returns the name of the parameter this error is about.
	pub fn key(&self) -> &str {
		match self {
			Self::Missing(key) | Self::Invalid { key, .. } => key,
		}
	}
}

/// Error type for route descriptor operations.
///
/// Every variant wraps the failure of a lower layer unchanged.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
	#[error(transparent)]
	Pattern(#[from] PatternError),

	#[error(transparent)]
	Generate(#[from] GenerateError),

	#[error(transparent)]
	Param(#[from] ParamError),

	#[error("Navigation failed: {0}")]
	NavigationFailed(String),
}
