//! Setup validation: preconditions checked once before dispatch.
//!
//! Problems are collected as a list and reported together with usage
//! text, so a user missing both the URL and the changelog sees both
//! messages in one run.

use changerun_core::{Command, ConfigBuilder};
use thiserror::Error;

/// A single failed setup precondition.
///
/// The `Display` text is exactly what the user sees in the error list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SetupError {
    /// No token in the argument stream named a command.
    #[error("Command not passed")]
    CommandNotPassed,
    /// `--url` was not set by any configuration source.
    #[error("--url is required")]
    UrlRequired,
    /// The command needs a changelog and `--changeLogFile` is unset.
    #[error("--changeLog is required")]
    ChangeLogRequired,
}

/// Checks the global preconditions for `command` against the resolved
/// options.
///
/// A missing command short-circuits: the remaining checks would only
/// produce noise when the user has not said what to run.
///
/// # Examples
///
/// ```ignore
/// let messages = check_setup(Some(Command::Update), &options);
/// assert_eq!(messages, vec![SetupError::UrlRequired, SetupError::ChangeLogRequired]);
/// ```
pub fn check_setup(command: Option<Command>, options: &ConfigBuilder) -> Vec<SetupError> {
    let Some(command) = command else {
        return vec![SetupError::CommandNotPassed];
    };

    let mut messages = Vec::new();
    if options.url().is_none() {
        messages.push(SetupError::UrlRequired);
    }
    if command.requires_changelog() && options.changelog_file().is_none() {
        messages.push(SetupError::ChangeLogRequired);
    }
    messages
}
