//! Token partitioning: command, global options, named parameters.
//!
//! After normalization the token stream is scanned left to right. The
//! first token matching the command vocabulary selects the command; every
//! token before it must be a `--name=value` global option, and every
//! token after it is either a `-Dname=value` substitution parameter or an
//! opaque command parameter interpreted by dispatch.

use crate::command::Command;
use crate::config::{ConfigBuilder, NamedParameters};
use crate::error::{ParseError, Result};
use crate::normalize::normalize_args;

/// The partitioned result of a parsed argument vector.
///
/// `command` stays `None` when no vocabulary token appeared; setup
/// validation turns that into its "Command not passed" message so the
/// failure is reported alongside the other setup problems.
#[derive(Debug)]
pub struct Invocation {
    /// The selected operation, if any token named one.
    pub command: Option<Command>,
    /// Global option slots collected from tokens before the command.
    pub options: ConfigBuilder,
    /// Leftover tokens after the command, ordered as given.
    pub command_params: Vec<String>,
    /// `-Dname=value` substitution parameters (last write wins).
    pub parameters: NamedParameters,
}

/// Normalizes and partitions a raw argument vector.
///
/// # Errors
///
/// - [`ParseError::UnexpectedValue`] for a bare token before the command
/// - [`ParseError::UnparsableArgument`] for an option or `-D` token
///   without an `=` assignment
/// - [`ParseError::UnknownParameter`] for an option that matches no slot
/// - [`ParseError::InvalidBoolean`] for a malformed boolean slot value
///
/// # Examples
///
/// ```
/// use changerun_core::{parse_arguments, Command};
///
/// let args: Vec<String> =
///     ["--url=jdbc:x", "rollback", "release-1.4", "-Downer=app"]
///         .iter().map(|s| s.to_string()).collect();
/// let invocation = parse_arguments(&args).unwrap();
///
/// assert_eq!(invocation.command, Some(Command::Rollback));
/// assert_eq!(invocation.command_params, vec!["release-1.4"]);
/// assert_eq!(invocation.parameters["owner"], "app");
/// ```
pub fn parse_arguments(args: &[String]) -> Result<Invocation> {
    let args = normalize_args(args);

    let mut command = None;
    let mut options = ConfigBuilder::new();
    let mut command_params = Vec::new();
    let mut parameters = NamedParameters::new();

    for arg in &args {
        if command.is_none() {
            if let Some(recognized) = Command::recognize(arg) {
                command = Some(recognized);
                continue;
            }
        }

        if command.is_some() {
            if arg.starts_with("-D") {
                let (name, value) = split_assignment(arg, "-D")?;
                parameters.insert(name.to_string(), value.to_string());
            } else {
                // Everything after the command — including tokens that
                // happen to name another command — is a command parameter.
                command_params.push(arg.clone());
            }
        } else if arg.starts_with("--") {
            let (name, value) = split_assignment(arg, "--")?;
            options.set(name, value)?;
        } else {
            return Err(ParseError::UnexpectedValue(arg.clone()));
        }
    }

    Ok(Invocation {
        command,
        options,
        command_params,
        parameters,
    })
}

/// Splits a `<prefix>name=value` token at the first `=`.
///
/// The value is everything after that first `=`, so values may legally
/// contain further `=` signs.
fn split_assignment<'a>(arg: &'a str, prefix: &str) -> Result<(&'a str, &'a str)> {
    let body = &arg[prefix.len()..];
    match body.split_once('=') {
        Some((name, value)) => Ok((name, value)),
        None => Err(ParseError::UnparsableArgument(arg.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn partitions_options_command_and_params() {
        let invocation =
            parse_arguments(&args(&["--url=jdbc:x", "--changeLogFile=a.xml", "update"])).unwrap();
        assert_eq!(invocation.command, Some(Command::Update));
        assert_eq!(invocation.options.url(), Some("jdbc:x"));
        assert_eq!(invocation.options.changelog_file(), Some("a.xml"));
        assert!(invocation.command_params.is_empty());
        assert!(invocation.parameters.is_empty());
    }

    #[test]
    fn alias_is_rewritten_at_recognition_time() {
        let invocation = parse_arguments(&args(&["migrate"])).unwrap();
        assert_eq!(invocation.command, Some(Command::Update));
    }

    #[test]
    fn split_tokens_are_repaired_before_partitioning() {
        let invocation =
            parse_arguments(&args(&["--url", "jdbc:x", "update"])).unwrap();
        assert_eq!(invocation.options.url(), Some("jdbc:x"));
        assert_eq!(invocation.command, Some(Command::Update));
    }

    #[test]
    fn first_vocabulary_token_wins() {
        // Later vocabulary tokens fall through to the command-params
        // bucket; only the first is the command.
        let invocation = parse_arguments(&args(&["update", "status"])).unwrap();
        assert_eq!(invocation.command, Some(Command::Update));
        assert_eq!(invocation.command_params, vec!["status"]);
    }

    #[test]
    fn named_parameters_after_command_bypass_slot_lookup() {
        let invocation =
            parse_arguments(&args(&["update", "-Dtable.owner=app", "-Dregion=eu"])).unwrap();
        assert_eq!(invocation.parameters["table.owner"], "app");
        assert_eq!(invocation.parameters["region"], "eu");
    }

    #[test]
    fn last_named_parameter_wins_within_the_cli_pass() {
        let invocation =
            parse_arguments(&args(&["update", "-Downer=first", "-Downer=second"])).unwrap();
        assert_eq!(invocation.parameters["owner"], "second");
    }

    #[test]
    fn named_parameter_before_command_is_rejected() {
        let err = parse_arguments(&args(&["-Downer=app", "update"])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unexpected value -Downer=app: parameters must start with a '--'"
        );
    }

    #[test]
    fn bare_token_before_command_is_rejected() {
        let err = parse_arguments(&args(&["sometag", "update"])).unwrap_err();
        assert!(err.to_string().starts_with("Unexpected value sometag"));
    }

    #[test]
    fn option_without_assignment_is_unparsable() {
        let err = parse_arguments(&args(&["--url", "update"])).unwrap_err();
        assert_eq!(err.to_string(), "Could not parse '--url'");
    }

    #[test]
    fn dangling_named_parameter_after_command_is_unparsable() {
        let err = parse_arguments(&args(&["update", "-Downer"])).unwrap_err();
        assert_eq!(err.to_string(), "Could not parse '-Downer'");
    }

    #[test]
    fn unknown_option_is_rejected() {
        let err = parse_arguments(&args(&["--nope=1", "update"])).unwrap_err();
        assert_eq!(err.to_string(), "Unknown parameter: 'nope'");
    }

    #[test]
    fn option_values_may_contain_equals_signs() {
        let invocation =
            parse_arguments(&args(&["--url=jdbc:h2:mem:test;MODE=Oracle", "update"])).unwrap();
        assert_eq!(invocation.options.url(), Some("jdbc:h2:mem:test;MODE=Oracle"));
    }

    #[test]
    fn post_command_option_like_tokens_become_params() {
        let invocation =
            parse_arguments(&args(&["status", "--verbose"])).unwrap();
        assert_eq!(invocation.command, Some(Command::Status));
        assert_eq!(invocation.command_params, vec!["--verbose"]);
    }

    #[test]
    fn no_vocabulary_token_leaves_command_unset() {
        let invocation = parse_arguments(&args(&["--url=jdbc:x"])).unwrap();
        assert!(invocation.command.is_none());
    }
}
