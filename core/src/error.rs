//! Error types for argument and configuration parsing.

use thiserror::Error;

/// Errors raised while resolving the command line and defaults files.
///
/// Every variant carries the exact text shown to the user; the top-level
/// driver prints the message together with usage help and exits without
/// running any command.
#[derive(Debug, Error)]
pub enum ParseError {
    /// A token that should carry a `name=value` assignment has no `=`.
    #[error("Could not parse '{0}'")]
    UnparsableArgument(String),

    /// An option or properties key that matches no configuration slot.
    #[error("Unknown parameter: '{0}'")]
    UnknownParameter(String),

    /// A bare token appeared before the command.
    #[error("Unexpected value {0}: parameters must start with a '--'")]
    UnexpectedValue(String),

    /// A boolean slot received something other than `true`/`false`.
    #[error("invalid boolean value for '{name}': '{value}' (expected true or false)")]
    InvalidBoolean { name: String, value: String },

    /// A defaults file exists but could not be read.
    #[error("could not read defaults file '{path}': {source}")]
    DefaultsFileRead {
        path: String,
        source: std::io::Error,
    },
}

/// Convenience alias for results with [`ParseError`].
pub type Result<T> = std::result::Result<T, ParseError>;
