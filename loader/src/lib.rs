//! Resource loading-context assembly from classpath entries.
//!
//! A classpath string is a platform-separator–delimited list of locations
//! from which the migration engine may load changelogs and drivers. Plain
//! directories and archive files pass through as-is; web archives
//! (`.war`) and enterprise archives (`.ear`) are containers whose inner
//! library archives must be extracted before they can be loaded, possibly
//! recursively (an `.ear` may hold `.war` files which in turn hold
//! `.jar` libraries).
//!
//! [`build_loading_context`] resolves the whole list into an ordered
//! [`LoadingContext`] of [`Resource`] locators. Extracted libraries live
//! in a temporary directory owned by the context; dropping the context
//! removes them.
//!
//! ```no_run
//! use changerun_loader::build_loading_context;
//!
//! let context = build_loading_context(Some("lib/drivers:app.war"), true)?;
//! for resource in context.resources() {
//!     println!("{resource}");
//! }
//! # Ok::<(), changerun_loader::LoaderError>(())
//! ```

mod classpath;
mod error;
mod expand;

pub use classpath::{split_classpath, LoadingContext, Resource, CLASSPATH_SEPARATOR};
pub use error::{LoaderError, Result};
pub use expand::build_loading_context;
