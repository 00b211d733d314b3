//! The defaults-file layer.
//!
//! Default values for configuration slots can be stored in a properties
//! file (`liquibase.properties` unless `--defaultsFile` says otherwise).
//! A sibling "local" overrides file — the same name with `.local` inserted
//! before the final extension — is applied first, so anything it sets wins
//! over the shared file. Both passes use
//! [`ConfigBuilder::set_if_unset`], which is what keeps command-line
//! values untouchable from files.
//!
//! The dialect is the familiar one: `#` and `!` start comments, keys are
//! separated from values by the first `=` or `:`, and keys/values are
//! trimmed. Keys prefixed with `parameter.` are substitution parameters,
//! not slots.

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use crate::config::{ConfigBuilder, NamedParameters};
use crate::error::{ParseError, Result};

/// Prefix marking a properties key as a named substitution parameter.
const PARAMETER_PREFIX: &str = "parameter.";

/// A key accepted (and ignored) for compatibility with old defaults files.
const LEGACY_PROMPT_KEY: &str = "promptOnNonLocalDatabase";

/// Derives the "local" sibling of a defaults-file name.
///
/// Inserts `.local` before the final extension:
/// `liquibase.properties` → `liquibase.local.properties`. A name without
/// an extension has no distinct sibling and is returned unchanged.
///
/// # Examples
///
/// ```
/// use changerun_core::properties::local_defaults_file;
///
/// assert_eq!(local_defaults_file("liquibase.properties"), "liquibase.local.properties");
/// assert_eq!(local_defaults_file("conf/db.props"), "conf/db.local.props");
/// assert_eq!(local_defaults_file("defaults"), "defaults");
/// ```
pub fn local_defaults_file(name: &str) -> String {
    static EXTENSION: OnceLock<Regex> = OnceLock::new();
    let extension = EXTENSION.get_or_init(|| {
        Regex::new(r"(\.[^.]+)$").expect("static extension pattern")
    });
    extension.replace(name, ".local$1").into_owned()
}

/// Reads one defaults file and applies it beneath the current state.
///
/// # Errors
///
/// [`ParseError::DefaultsFileRead`] when the file cannot be read, plus
/// everything [`apply_properties`] can return.
pub fn apply_defaults_file(
    path: &Path,
    options: &mut ConfigBuilder,
    parameters: &mut NamedParameters,
) -> Result<()> {
    let text = std::fs::read_to_string(path).map_err(|source| ParseError::DefaultsFileRead {
        path: path.display().to_string(),
        source,
    })?;
    apply_properties(&text, options, parameters)
}

/// Applies a parsed properties stream to the builder.
///
/// Slot entries go through [`ConfigBuilder::set_if_unset`] — a slot
/// already set by a higher-precedence source is left alone.
/// `parameter.`-prefixed entries are inserted into `parameters`
/// unconditionally (named parameters carry no precedence rule). The
/// legacy `promptOnNonLocalDatabase` key is skipped.
///
/// # Errors
///
/// [`ParseError::UnknownParameter`] for a key matching no slot,
/// [`ParseError::InvalidBoolean`] for a malformed boolean value.
pub fn apply_properties(
    text: &str,
    options: &mut ConfigBuilder,
    parameters: &mut NamedParameters,
) -> Result<()> {
    for raw_line in text.lines() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            continue;
        }

        let (key, value) = match line.find(['=', ':']) {
            Some(at) => (line[..at].trim_end(), line[at + 1..].trim()),
            None => (line, ""),
        };

        if key == LEGACY_PROMPT_KEY {
            continue;
        }
        if let Some(name) = key.strip_prefix(PARAMETER_PREFIX) {
            parameters.insert(name.to_string(), value.to_string());
        } else {
            options.set_if_unset(key, value)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_name_inserts_before_final_extension() {
        assert_eq!(
            local_defaults_file("liquibase.properties"),
            "liquibase.local.properties"
        );
        assert_eq!(
            local_defaults_file("some.dir/defaults.properties"),
            "some.dir/defaults.local.properties"
        );
    }

    #[test]
    fn extensionless_name_has_no_distinct_sibling() {
        assert_eq!(local_defaults_file("defaults"), "defaults");
    }

    #[test]
    fn slot_entries_fill_unset_slots() {
        let mut options = ConfigBuilder::new();
        let mut parameters = NamedParameters::new();
        apply_properties(
            "url=jdbc:h2:mem:test\nchangeLogFile: db/changelog.xml\n",
            &mut options,
            &mut parameters,
        )
        .unwrap();
        assert_eq!(options.url(), Some("jdbc:h2:mem:test"));
        assert_eq!(options.changelog_file(), Some("db/changelog.xml"));
    }

    #[test]
    fn cli_value_survives_both_file_passes() {
        let mut options = ConfigBuilder::new();
        let mut parameters = NamedParameters::new();
        options.set("url", "jdbc:from-cli").unwrap();

        // Local overrides file first, then the shared defaults file.
        apply_properties("url=jdbc:from-local\ncontexts=local\n", &mut options, &mut parameters)
            .unwrap();
        apply_properties(
            "url=jdbc:from-base\ncontexts=base\nusername=shared\n",
            &mut options,
            &mut parameters,
        )
        .unwrap();

        let config = options.build();
        assert_eq!(config.url.as_deref(), Some("jdbc:from-cli"));
        assert_eq!(config.contexts.as_deref(), Some("local"));
        assert_eq!(config.username.as_deref(), Some("shared"));
    }

    #[test]
    fn parameter_entries_bypass_slot_lookup() {
        let mut options = ConfigBuilder::new();
        let mut parameters = NamedParameters::new();
        apply_properties(
            "parameter.table.owner=app\nparameter.region=eu\n",
            &mut options,
            &mut parameters,
        )
        .unwrap();
        assert_eq!(parameters["table.owner"], "app");
        assert_eq!(parameters["region"], "eu");
    }

    #[test]
    fn unknown_key_is_a_hard_error() {
        let mut options = ConfigBuilder::new();
        let mut parameters = NamedParameters::new();
        let err =
            apply_properties("jdbcUrl=x\n", &mut options, &mut parameters).unwrap_err();
        assert_eq!(err.to_string(), "Unknown parameter: 'jdbcUrl'");
    }

    #[test]
    fn legacy_prompt_key_is_ignored() {
        let mut options = ConfigBuilder::new();
        let mut parameters = NamedParameters::new();
        apply_properties(
            "promptOnNonLocalDatabase=whatever\nurl=jdbc:x\n",
            &mut options,
            &mut parameters,
        )
        .unwrap();
        assert_eq!(options.url(), Some("jdbc:x"));
    }

    #[test]
    fn comments_and_blank_lines_are_skipped() {
        let mut options = ConfigBuilder::new();
        let mut parameters = NamedParameters::new();
        apply_properties(
            "# shared defaults\n\n! note the bang comment\nurl=jdbc:x\n",
            &mut options,
            &mut parameters,
        )
        .unwrap();
        assert_eq!(options.url(), Some("jdbc:x"));
    }

    #[test]
    fn values_may_contain_separator_characters() {
        let mut options = ConfigBuilder::new();
        let mut parameters = NamedParameters::new();
        apply_properties(
            "url=jdbc:postgresql://db.example.com/app?opt=1\n",
            &mut options,
            &mut parameters,
        )
        .unwrap();
        assert_eq!(options.url(), Some("jdbc:postgresql://db.example.com/app?opt=1"));
    }

    #[test]
    fn boolean_slots_are_validated_when_actually_set() {
        let mut options = ConfigBuilder::new();
        let mut parameters = NamedParameters::new();
        let err = apply_properties(
            "includeSystemClasspath=maybe\n",
            &mut options,
            &mut parameters,
        )
        .unwrap_err();
        assert!(err.to_string().contains("includeSystemClasspath"));
    }
}
