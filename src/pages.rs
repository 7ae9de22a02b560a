//! Typed route descriptors
//!
//! This module provides access to routelink-pages:
//!
//! - **Codecs**: single values to URL text and back
//! - **Parameter sets**: structs declared with `define_params!`
//! - **Navigator**: the current location, passed explicitly
//! - **Query state**: typed reads and writes of the query string
//!
//! ## Example
//!
//! ```rust
//! use routelink::pages::prelude::*;
//!
//! let files = Route::new("/files/*").unwrap();
//! assert_eq!(files.link(&Default::default()).unwrap(), "/files");
//! ```

pub use routelink_pages::*;
