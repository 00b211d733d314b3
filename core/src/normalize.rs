//! Argument normalization.
//!
//! Some shells split `--key=value` into two tokens at the `=` before the
//! process ever sees them. [`normalize_args`] is the inverse transform: it
//! re-joins a long-option or `-D` token with the following token, unless
//! that token is itself another option or a recognized command name.

use crate::command::Command;

/// Repairs `=`-split option tokens in a raw argument vector.
///
/// A token starting with `--` or `-D` that carries no `=` is merged with
/// the token that follows it (`["--url", "jdbc:x"]` becomes
/// `["--url=jdbc:x"]`). The follower is left alone when it looks like
/// another long option or names a command; a dangling option at
/// end-of-input is also left unmerged and fails later at option parsing.
///
/// The function is pure and idempotent: already-merged input passes
/// through unchanged.
///
/// # Examples
///
/// ```
/// use changerun_core::normalize_args;
///
/// let raw: Vec<String> = ["--url", "jdbc:h2:mem:test", "update"]
///     .iter().map(|s| s.to_string()).collect();
/// assert_eq!(normalize_args(&raw), vec!["--url=jdbc:h2:mem:test", "update"]);
/// ```
pub fn normalize_args(args: &[String]) -> Vec<String> {
    let mut fixed = Vec::with_capacity(args.len());
    let mut i = 0;
    while i < args.len() {
        let arg = &args[i];
        if (arg.starts_with("--") || arg.starts_with("-D")) && !arg.contains('=') {
            if let Some(next) = args.get(i + 1) {
                if !next.starts_with("--") && !Command::is_vocabulary(next) {
                    fixed.push(format!("{arg}={next}"));
                    i += 2;
                    continue;
                }
            }
        }
        fixed.push(arg.clone());
        i += 1;
    }
    fixed
}

#[cfg(test)]
mod tests {
    use super::normalize_args;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn merges_split_long_option_with_value() {
        let fixed = normalize_args(&args(&["--url", "jdbc:h2:mem:test", "update"]));
        assert_eq!(fixed, vec!["--url=jdbc:h2:mem:test", "update"]);
    }

    #[test]
    fn merges_split_named_parameter_token() {
        let fixed = normalize_args(&args(&["update", "-Dschema.owner", "app"]));
        assert_eq!(fixed, vec!["update", "-Dschema.owner=app"]);
    }

    #[test]
    fn leaves_option_followed_by_another_option_alone() {
        let fixed = normalize_args(&args(&["--url", "--changeLogFile=db.xml"]));
        assert_eq!(fixed, vec!["--url", "--changeLogFile=db.xml"]);
    }

    #[test]
    fn leaves_option_followed_by_command_alone() {
        let fixed = normalize_args(&args(&["--contexts", "update"]));
        assert_eq!(fixed, vec!["--contexts", "update"]);
    }

    #[test]
    fn command_recognition_covers_aliases() {
        let fixed = normalize_args(&args(&["--contexts", "migrate"]));
        assert_eq!(fixed, vec!["--contexts", "migrate"]);
    }

    #[test]
    fn leaves_trailing_option_alone() {
        let fixed = normalize_args(&args(&["update", "--logLevel"]));
        assert_eq!(fixed, vec!["update", "--logLevel"]);
    }

    #[test]
    fn idempotent_on_already_merged_input() {
        let merged = normalize_args(&args(&["--url", "jdbc:x", "-Dk", "v", "update"]));
        assert_eq!(normalize_args(&merged), merged);
    }

    #[test]
    fn plain_tokens_pass_through() {
        let fixed = normalize_args(&args(&["update", "sometag", "--verbose"]));
        assert_eq!(fixed, vec!["update", "sometag", "--verbose"]);
    }
}
