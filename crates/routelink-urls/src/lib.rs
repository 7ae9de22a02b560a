//! Router primitives for routelink.
//!
//! This crate holds the pieces a client-side router normally provides and
//! that typed route descriptors are built on:
//!
//! - [`PathPattern`]: compiles `/items/:id` style patterns, matches paths
//!   against them and generates paths from parameter maps
//! - [`SearchParams`]: ordered, form-encoded query strings
//! - [`Location`]: a parsed `pathname?search#hash`
//!
//! There is no route table or dispatch here; every operation works on a
//! single pattern.
//!
//! ## Example
//!
//! ```
//! use std::collections::BTreeMap;
//! use routelink_urls::PathPattern;
//!
//! let pattern = PathPattern::new("/items/:id").unwrap();
//!
//! let mut params = BTreeMap::new();
//! params.insert("id".to_string(), "42".to_string());
//! assert_eq!(pattern.generate(&params).unwrap(), "/items/42");
//!
//! let matched = pattern.matches("/items/42").unwrap();
//! assert_eq!(matched.param("id"), Some("42"));
//! ```

pub mod error;
pub mod location;
pub mod pattern;
pub mod search;

pub use error::{GenerateError, PatternError};
pub use location::Location;
pub use pattern::{MatchOptions, PathMatch, PathPattern, SPLAT, generate_path, match_path};
pub use search::SearchParams;
