//! Path pattern compilation, matching and generation.
//!
//! Patterns use the segment syntax common to client-side routers:
//!
//! - `/users` - static segments, matched case-insensitively by default
//! - `/users/:id` - dynamic segment captured as `id`
//! - `/users/:id?` - optional dynamic segment
//! - `/users/edit?` - optional static segment
//! - `/files/*` - trailing splat, captured under the name `*`
//!
//! A pattern is compiled once into an anchored regex. Matching tolerates
//! trailing slashes on the path, and captured values are percent-decoded.
//! Generation is the inverse: values are percent-encoded per segment, so a
//! generated path always matches its own pattern.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use serde::Deserialize;

use crate::error::{GenerateError, PatternError};

/// Parameter name under which the trailing splat is captured.
pub const SPLAT: &str = "*";

/// Maximum allowed length for a pattern string in bytes.
const MAX_PATTERN_LENGTH: usize = 1024;

/// Maximum allowed number of path segments in a pattern.
const MAX_PATH_SEGMENTS: usize = 32;

/// Maximum allowed size for a compiled pattern regex (in bytes).
const MAX_REGEX_SIZE: usize = 1 << 20; // 1 MiB

/// Options controlling how a pattern matches paths.
///
/// Deserializable so it can live in an application's settings file:
///
/// ```toml
/// [routing]
/// case_sensitive = true
/// end = false
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MatchOptions {
	/// Match static segments case-sensitively. Defaults to `false`.
	pub case_sensitive: bool,
	/// Require the pattern to consume the whole path. Defaults to `true`;
	/// `false` turns the pattern into a prefix match.
	pub end: bool,
}

impl Default for MatchOptions {
	fn default() -> Self {
		Self {
			case_sensitive: false,
			end: true,
		}
	}
}

impl MatchOptions {
	/// Options for a prefix match (`end = false`).
	pub fn prefix() -> Self {
		Self {
			end: false,
			..Self::default()
		}
	}

	/// Sets case sensitivity.
	pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
		self.case_sensitive = case_sensitive;
		self
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
	Static { value: String, optional: bool },
	Dynamic { name: String, optional: bool },
	Splat,
}

/// The result of matching a path against a [`PathPattern`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathMatch {
	/// Percent-decoded parameter values keyed by placeholder name.
	///
	/// A splat is stored under [`SPLAT`]; optional placeholders that did not
	/// participate in the match are absent.
	pub params: BTreeMap<String, String>,
	/// The portion of the path that was matched.
	pub pathname: String,
	/// The matched portion before the splat, without trailing slashes.
	pub pathname_base: String,
	/// The pattern string that produced this match.
	pub pattern: String,
}

impl PathMatch {
	/// Returns a captured parameter value.
	pub fn param(&self, name: &str) -> Option<&str> {
		self.params.get(name).map(String::as_str)
	}

	/// Returns the splat value, if the pattern has one.
	pub fn splat(&self) -> Option<&str> {
		self.param(SPLAT)
	}
}

/// A compiled path pattern.
#[derive(Debug, Clone)]
pub struct PathPattern {
	/// The original pattern string.
	pattern: String,
	options: MatchOptions,
	segments: Vec<Segment>,
	regex: regex::Regex,
	/// Parameter names in capture order.
	param_names: Vec<String>,
}

impl PathPattern {
	/// Compiles a pattern with default [`MatchOptions`].
	///
	/// # Errors
	///
	/// Returns [`PatternError`] if the pattern is empty, too long, has too
	/// many segments, places `*` anywhere but the final segment, repeats or
	/// malforms a parameter name, or fails to compile.
	pub fn new(pattern: &str) -> Result<Self, PatternError> {
		Self::with_options(pattern, MatchOptions::default())
	}

	/// Compiles a pattern with explicit [`MatchOptions`].
	pub fn with_options(pattern: &str, options: MatchOptions) -> Result<Self, PatternError> {
		if pattern.is_empty() {
			return Err(PatternError::Empty);
		}

		// Reject patterns exceeding the maximum length to prevent ReDoS
		if pattern.len() > MAX_PATTERN_LENGTH {
			return Err(PatternError::TooLong {
				length: pattern.len(),
				max: MAX_PATTERN_LENGTH,
			});
		}

		let segment_count = pattern.split('/').count();
		if segment_count > MAX_PATH_SEGMENTS {
			return Err(PatternError::TooManySegments {
				count: segment_count,
				max: MAX_PATH_SEGMENTS,
			});
		}

		let segments = Self::parse_segments(pattern)?;
		let regex_str = Self::compile_segments(&segments, options);

		let regex = regex::RegexBuilder::new(&regex_str)
			.case_insensitive(!options.case_sensitive)
			.size_limit(MAX_REGEX_SIZE)
			.build()
			.map_err(|e| PatternError::Regex(e.to_string()))?;

		let param_names = segments
			.iter()
			.filter_map(|segment| match segment {
				Segment::Dynamic { name, .. } => Some(name.clone()),
				Segment::Splat => Some(SPLAT.to_string()),
				Segment::Static { .. } => None,
			})
			.collect();

		tracing::trace!(pattern, regex = %regex_str, "compiled path pattern");

		Ok(Self {
			pattern: pattern.to_string(),
			options,
			segments,
			regex,
			param_names,
		})
	}

	fn parse_segments(pattern: &str) -> Result<Vec<Segment>, PatternError> {
		let raw: Vec<&str> = pattern.split('/').filter(|s| !s.is_empty()).collect();
		let last = raw.len().saturating_sub(1);
		let mut seen = HashSet::new();
		let mut segments = Vec::with_capacity(raw.len());

		for (index, raw_segment) in raw.iter().enumerate() {
			if *raw_segment == SPLAT {
				if index != last {
					return Err(PatternError::MisplacedSplat(pattern.to_string()));
				}
				segments.push(Segment::Splat);
				continue;
			}
			if raw_segment.contains('*') {
				return Err(PatternError::MisplacedSplat(pattern.to_string()));
			}

			let (body, optional) = match raw_segment.strip_suffix('?') {
				Some(body) => (body, true),
				None => (*raw_segment, false),
			};

			match body.strip_prefix(':') {
				Some(name) => {
					if !is_valid_param_name(name) {
						return Err(PatternError::InvalidParameterName(raw_segment.to_string()));
					}
					if !seen.insert(name) {
						return Err(PatternError::DuplicateParameter(name.to_string()));
					}
					segments.push(Segment::Dynamic {
						name: name.to_string(),
						optional,
					});
				}
				None => segments.push(Segment::Static {
					value: body.to_string(),
					optional,
				}),
			}
		}

		Ok(segments)
	}

	fn compile_segments(segments: &[Segment], options: MatchOptions) -> String {
		let mut regex_str = String::from("^");

		for segment in segments {
			match segment {
				Segment::Static {
					value,
					optional: false,
				} => {
					regex_str.push('/');
					regex_str.push_str(&regex::escape(value));
				}
				Segment::Static {
					value,
					optional: true,
				} => {
					regex_str.push_str(&format!("(?:/{})?", regex::escape(value)));
				}
				Segment::Dynamic {
					optional: false, ..
				} => regex_str.push_str("/([^/]+)"),
				Segment::Dynamic { optional: true, .. } => regex_str.push_str("(?:/([^/]+))?"),
				Segment::Splat => {}
			}
		}

		match segments.last() {
			// A bare splat matches everything below the root
			Some(Segment::Splat) if segments.len() == 1 => regex_str.push_str("/(.*)$"),
			Some(Segment::Splat) => regex_str.push_str("(?:/(.+)|/*)$"),
			_ if options.end => {
				if segments.is_empty() {
					regex_str.push('/');
				}
				regex_str.push_str("/*$");
			}
			_ => regex_str.push_str("(?:/|$)"),
		}

		regex_str
	}

	/// Returns the original pattern string.
	pub fn as_str(&self) -> &str {
		&self.pattern
	}

	/// Returns the match options the pattern was compiled with.
	pub fn options(&self) -> MatchOptions {
		self.options
	}

	/// Returns the parameter names in the order they appear in the pattern.
	pub fn param_names(&self) -> &[String] {
		&self.param_names
	}

	/// Returns whether the pattern has any `:name` placeholder.
	pub fn has_placeholders(&self) -> bool {
		self.segments
			.iter()
			.any(|segment| matches!(segment, Segment::Dynamic { .. }))
	}

	/// Returns whether the pattern ends with a splat.
	pub fn has_splat(&self) -> bool {
		matches!(self.segments.last(), Some(Segment::Splat))
	}

	/// Checks if this pattern would match the given path.
	pub fn is_match(&self, path: &str) -> bool {
		self.regex.is_match(path)
	}

	/// Attempts to match a path against this pattern.
	pub fn matches(&self, path: &str) -> Option<PathMatch> {
		let Some(captures) = self.regex.captures(path) else {
			tracing::trace!(pattern = %self.pattern, path, "path did not match");
			return None;
		};
		let whole = captures.get(0)?;

		let mut params = BTreeMap::new();
		let mut base_end = whole.end();
		for (index, name) in self.param_names.iter().enumerate() {
			match captures.get(index + 1) {
				Some(value) => {
					if name == SPLAT {
						base_end = value.start();
					}
					params.insert(name.clone(), decode_value(value.as_str()));
				}
				None if name == SPLAT => {
					params.insert(name.clone(), String::new());
				}
				None => {}
			}
		}

		let mut pathname = whole.as_str();
		if !self.options.end && !self.has_splat() && pathname.len() > 1 {
			// Prefix matches consume the separating slash; drop it again
			pathname = pathname.strip_suffix('/').unwrap_or(pathname);
		}
		let base = &path[whole.start()..base_end.min(whole.start() + pathname.len())];

		Some(PathMatch {
			params,
			pathname: pathname.to_string(),
			pathname_base: trim_trailing_slashes(base),
			pattern: self.pattern.clone(),
		})
	}

	/// Generates a path from this pattern with the given parameters.
	///
	/// Values are percent-encoded per segment. Optional placeholders without a
	/// value are dropped, optional static segments are always emitted, and an
	/// unfilled splat disappears. A trailing slash in the pattern is kept.
	///
	/// # Errors
	///
	/// Returns [`GenerateError::MissingParameter`] if a required placeholder
	/// has no value. Keys that are not placeholders are ignored.
	pub fn generate(&self, params: &BTreeMap<String, String>) -> Result<String, GenerateError> {
		let mut parts: Vec<String> = Vec::with_capacity(self.segments.len());

		for segment in &self.segments {
			match segment {
				Segment::Static { value, .. } => parts.push(value.clone()),
				Segment::Dynamic { name, optional } => match params.get(name) {
					Some(value) => parts.push(urlencoding::encode(value).into_owned()),
					None if *optional => {}
					None => return Err(GenerateError::MissingParameter(name.clone())),
				},
				Segment::Splat => {
					if let Some(value) = params.get(SPLAT) {
						parts.push(encode_splat(value));
					}
				}
			}
		}

		parts.retain(|part| !part.is_empty());

		let mut path = String::with_capacity(self.pattern.len());
		if self.pattern.starts_with('/') {
			path.push('/');
		}
		path.push_str(&parts.join("/"));
		if self.pattern.ends_with('/') && !path.ends_with('/') {
			path.push('/');
		}

		Ok(path)
	}
}

impl PartialEq for PathPattern {
	fn eq(&self, other: &Self) -> bool {
		self.pattern == other.pattern && self.options == other.options
	}
}

impl Eq for PathPattern {}

impl fmt::Display for PathPattern {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.pattern)
	}
}

/// Compiles `pattern` and matches `path` against it in one step.
///
/// # Errors
///
/// Returns [`PatternError`] if the pattern does not compile.
pub fn match_path(pattern: &str, path: &str) -> Result<Option<PathMatch>, PatternError> {
	Ok(PathPattern::new(pattern)?.matches(path))
}

/// Compiles `pattern` and generates a path from it in one step.
///
/// # Errors
///
/// Returns [`GenerateError::Pattern`] if the pattern does not compile and
/// [`GenerateError::MissingParameter`] if a required value is missing.
pub fn generate_path(pattern: &str, params: &BTreeMap<String, String>) -> Result<String, GenerateError> {
	PathPattern::new(pattern)?.generate(params)
}

fn is_valid_param_name(name: &str) -> bool {
	!name.is_empty()
		&& name
			.chars()
			.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

fn decode_value(raw: &str) -> String {
	match urlencoding::decode(raw) {
		Ok(decoded) => decoded.into_owned(),
		Err(e) => {
			tracing::warn!(value = raw, error = %e, "keeping undecodable path parameter as captured");
			raw.to_string()
		}
	}
}

fn encode_splat(value: &str) -> String {
	value
		.split('/')
		.filter(|piece| !piece.is_empty())
		.map(|piece| urlencoding::encode(piece).into_owned())
		.collect::<Vec<_>>()
		.join("/")
}

fn trim_trailing_slashes(value: &str) -> String {
	let trimmed = value.trim_end_matches('/');
	if trimmed.is_empty() {
		value.get(..1).unwrap_or_default().to_string()
	} else {
		trimmed.to_string()
	}
}
