//! Error types for pattern compilation and path generation.

/// Error returned when a path pattern cannot be compiled.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
	#[error("Pattern cannot be empty")]
	Empty,

	#[error("Pattern length {length} exceeds maximum allowed length of {max} bytes")]
	TooLong { length: usize, max: usize },

	#[error("Pattern has {count} path segments, exceeding maximum of {max}")]
	TooManySegments { count: usize, max: usize },

	/// A `*` appeared anywhere other than as the whole final segment.
	#[error("Splat '*' is only allowed as the last segment of a pattern: '{0}'")]
	MisplacedSplat(String),

	#[error("Parameter ':{0}' appears more than once in the pattern")]
	DuplicateParameter(String),

	#[error("Invalid parameter name in segment '{0}'")]
	InvalidParameterName(String),

	#[error("Failed to compile pattern regex: {0}")]
	Regex(String),
}

/// Error returned when a path cannot be generated from a pattern.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerateError {
	#[error("Missing \":{0}\" param")]
	MissingParameter(String),

	#[error(transparent)]
	Pattern(#[from] PatternError),
}
