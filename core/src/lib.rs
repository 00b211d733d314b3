//! Core argument and configuration resolution for the changerun front end.
//!
//! This crate turns a raw argument vector plus optional defaults files into a
//! fully resolved invocation:
//!
//! - [`normalize_args`] — repairs the shell artifact that splits
//!   `--key=value` into two tokens.
//! - [`Command`] — the closed vocabulary of recognized operations, with
//!   alias resolution and derived attributes.
//! - [`parse_arguments`] — partitions the normalized token stream into the
//!   command, global options, named substitution parameters, and leftover
//!   command parameters.
//! - [`ConfigBuilder`] / [`Configuration`] — named configuration slots with
//!   structural precedence enforcement: the CLI pass overwrites, the
//!   properties passes only fill slots that are still unset.
//! - [`properties`] — the defaults-file layer (`liquibase.properties` and
//!   its `.local` sibling).
//!
//! # Example
//!
//! ```
//! use changerun_core::{parse_arguments, Command};
//!
//! let args: Vec<String> = ["--url=jdbc:h2:mem:test", "--changeLogFile=db.xml", "update"]
//!     .iter().map(|s| s.to_string()).collect();
//! let invocation = parse_arguments(&args).unwrap();
//!
//! assert_eq!(invocation.command, Some(Command::Update));
//! assert_eq!(invocation.options.url(), Some("jdbc:h2:mem:test"));
//! assert_eq!(invocation.options.changelog_file(), Some("db.xml"));
//! ```

mod command;
mod config;
mod error;
mod normalize;
mod parse;
pub mod properties;

pub use command::Command;
pub use config::{ConfigBuilder, Configuration, NamedParameters, DEFAULT_DEFAULTS_FILE};
pub use error::{ParseError, Result};
pub use normalize::normalize_args;
pub use parse::{parse_arguments, Invocation};
