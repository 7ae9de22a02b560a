//! Router primitives
//!
//! This module provides access to routelink-urls: path patterns that match
//! and generate paths, form-encoded search params and parsed locations.
//!
//! ## Example
//!
//! ```rust
//! use routelink::urls::{PathPattern, match_path};
//!
//! let pattern = PathPattern::new("/docs/*").unwrap();
//! assert!(pattern.is_match("/docs/guide/intro"));
//!
//! let matched = match_path("/teams/:team", "/teams/core").unwrap().unwrap();
//! assert_eq!(matched.param("team"), Some("core"));
//! ```

pub use routelink_urls::*;
