//! Configuration slots and the precedence-enforcing builder.
//!
//! A slot is a single named configuration value with a fixed type: text or
//! a tri-state boolean (unset until some source sets it). Slots are bound
//! by name through an explicit registry — there is no dynamic field
//! lookup, and an unrecognized name is a hard error.
//!
//! Precedence across the three sources (CLI flags, the `.local` overrides
//! file, the shared defaults file) is enforced structurally: the CLI pass
//! uses [`ConfigBuilder::set`], which overwrites, while the properties
//! passes use [`ConfigBuilder::set_if_unset`], which never touches a slot
//! that already has a value. Since the CLI pass runs first, a slot set on
//! the command line can never be changed by either file.

use std::collections::BTreeMap;

use crate::error::{ParseError, Result};

/// Name of the defaults properties file read from the working directory
/// when `--defaultsFile` is not given.
pub const DEFAULT_DEFAULTS_FILE: &str = "liquibase.properties";

/// Free-form substitution parameters destined for changelog evaluation.
///
/// Keyed by name with the `parameter.`/`-D` marker stripped. These bypass
/// slot lookup entirely and carry no cross-source precedence: the last
/// write for a key wins.
pub type NamedParameters = BTreeMap<String, String>;

/// A mutable reference to one registered slot, tagged with its type.
enum SlotRef<'a> {
    Text(&'a mut Option<String>),
    Toggle(&'a mut Option<bool>),
}

/// Accumulates configuration slots from layered sources.
///
/// Create with [`ConfigBuilder::new`], fill via [`set`](Self::set) /
/// [`set_if_unset`](Self::set_if_unset), and finish with
/// [`build`](Self::build), which applies the hard defaults and freezes the
/// result into a [`Configuration`].
///
/// # Examples
///
/// ```
/// use changerun_core::ConfigBuilder;
///
/// let mut options = ConfigBuilder::new();
/// options.set("url", "jdbc:h2:mem:test").unwrap();
/// // A later, lower-precedence source cannot change a set slot.
/// options.set_if_unset("url", "jdbc:h2:mem:other").unwrap();
/// assert_eq!(options.url(), Some("jdbc:h2:mem:test"));
///
/// assert!(options.set("noSuchSlot", "x").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    driver: Option<String>,
    username: Option<String>,
    password: Option<String>,
    url: Option<String>,
    database_class: Option<String>,
    default_schema_name: Option<String>,
    changelog_file: Option<String>,
    classpath: Option<String>,
    contexts: Option<String>,
    driver_properties_file: Option<String>,
    prompt_for_non_local_database: Option<bool>,
    include_system_classpath: Option<bool>,
    defaults_file: Option<String>,
    diff_types: Option<String>,
    change_set_author: Option<String>,
    change_set_context: Option<String>,
    data_dir: Option<String>,
    reference_driver: Option<String>,
    reference_url: Option<String>,
    reference_username: Option<String>,
    reference_password: Option<String>,
    current_date_time_function: Option<String>,
    log_level: Option<String>,
    log_file: Option<String>,
}

impl ConfigBuilder {
    /// Creates a builder with `defaultsFile` pre-seeded so the defaults
    /// file can be located before any properties pass runs.
    pub fn new() -> Self {
        Self {
            defaults_file: Some(DEFAULT_DEFAULTS_FILE.to_string()),
            ..Self::default()
        }
    }

    /// Looks a slot up by its exact, case-sensitive registered name.
    fn slot(&mut self, name: &str) -> Option<SlotRef<'_>> {
        let slot = match name {
            "driver" => SlotRef::Text(&mut self.driver),
            "username" => SlotRef::Text(&mut self.username),
            "password" => SlotRef::Text(&mut self.password),
            "url" => SlotRef::Text(&mut self.url),
            "databaseClass" => SlotRef::Text(&mut self.database_class),
            "defaultSchemaName" => SlotRef::Text(&mut self.default_schema_name),
            "changeLogFile" => SlotRef::Text(&mut self.changelog_file),
            "classpath" => SlotRef::Text(&mut self.classpath),
            "contexts" => SlotRef::Text(&mut self.contexts),
            "driverPropertiesFile" => SlotRef::Text(&mut self.driver_properties_file),
            "promptForNonLocalDatabase" => {
                SlotRef::Toggle(&mut self.prompt_for_non_local_database)
            }
            "includeSystemClasspath" => SlotRef::Toggle(&mut self.include_system_classpath),
            "defaultsFile" => SlotRef::Text(&mut self.defaults_file),
            "diffTypes" => SlotRef::Text(&mut self.diff_types),
            "changeSetAuthor" => SlotRef::Text(&mut self.change_set_author),
            "changeSetContext" => SlotRef::Text(&mut self.change_set_context),
            "dataDir" => SlotRef::Text(&mut self.data_dir),
            "referenceDriver" => SlotRef::Text(&mut self.reference_driver),
            "referenceUrl" => SlotRef::Text(&mut self.reference_url),
            "referenceUsername" => SlotRef::Text(&mut self.reference_username),
            "referencePassword" => SlotRef::Text(&mut self.reference_password),
            "currentDateTimeFunction" => SlotRef::Text(&mut self.current_date_time_function),
            "logLevel" => SlotRef::Text(&mut self.log_level),
            "logFile" => SlotRef::Text(&mut self.log_file),
            _ => return None,
        };
        Some(slot)
    }

    /// Assigns a slot by name, overwriting any earlier value.
    ///
    /// Used by the CLI pass, where the last occurrence of a flag wins.
    ///
    /// # Errors
    ///
    /// [`ParseError::UnknownParameter`] for an unregistered name,
    /// [`ParseError::InvalidBoolean`] when a boolean slot receives
    /// anything but `true`/`false` (case-insensitive).
    pub fn set(&mut self, name: &str, value: &str) -> Result<()> {
        match self.slot(name) {
            None => Err(ParseError::UnknownParameter(name.to_string())),
            Some(SlotRef::Text(slot)) => {
                *slot = Some(value.to_string());
                Ok(())
            }
            Some(SlotRef::Toggle(slot)) => {
                *slot = Some(parse_bool(name, value)?);
                Ok(())
            }
        }
    }

    /// Assigns a slot by name only when it has no value yet.
    ///
    /// Used by the properties passes; a slot already set by a
    /// higher-precedence source is left untouched (the value is not even
    /// inspected in that case).
    ///
    /// # Errors
    ///
    /// Same as [`set`](Self::set).
    pub fn set_if_unset(&mut self, name: &str, value: &str) -> Result<()> {
        match self.slot(name) {
            None => Err(ParseError::UnknownParameter(name.to_string())),
            Some(SlotRef::Text(slot)) => {
                if slot.is_none() {
                    *slot = Some(value.to_string());
                }
                Ok(())
            }
            Some(SlotRef::Toggle(slot)) => {
                if slot.is_none() {
                    *slot = Some(parse_bool(name, value)?);
                }
                Ok(())
            }
        }
    }

    /// The database connection URL, if set.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// The changelog file path, if set.
    pub fn changelog_file(&self) -> Option<&str> {
        self.changelog_file.as_deref()
    }

    /// The defaults-file name (always present; pre-seeded at construction).
    pub fn defaults_file(&self) -> &str {
        self.defaults_file.as_deref().unwrap_or(DEFAULT_DEFAULTS_FILE)
    }

    /// Freezes the builder, applying the hard defaults for slots no source
    /// touched.
    pub fn build(self) -> Configuration {
        Configuration {
            driver: self.driver,
            username: self.username,
            password: self.password,
            url: self.url,
            database_class: self.database_class,
            default_schema_name: self.default_schema_name,
            changelog_file: self.changelog_file,
            classpath: self.classpath,
            contexts: self.contexts,
            driver_properties_file: self.driver_properties_file,
            prompt_for_non_local_database: self.prompt_for_non_local_database.unwrap_or(false),
            include_system_classpath: self.include_system_classpath.unwrap_or(true),
            defaults_file: self
                .defaults_file
                .unwrap_or_else(|| DEFAULT_DEFAULTS_FILE.to_string()),
            diff_types: self.diff_types,
            change_set_author: self.change_set_author,
            change_set_context: self.change_set_context,
            data_dir: self.data_dir,
            reference_driver: self.reference_driver,
            reference_url: self.reference_url,
            reference_username: self.reference_username,
            reference_password: self.reference_password,
            current_date_time_function: self.current_date_time_function,
            log_level: self.log_level.unwrap_or_else(|| "info".to_string()),
            log_file: self.log_file,
        }
    }
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    if value.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if value.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(ParseError::InvalidBoolean {
            name: name.to_string(),
            value: value.to_string(),
        })
    }
}

/// The fully resolved configuration, immutable after build.
///
/// Consulted read-only for the rest of the invocation; never persisted.
#[derive(Debug, Clone)]
pub struct Configuration {
    pub driver: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub url: Option<String>,
    pub database_class: Option<String>,
    pub default_schema_name: Option<String>,
    pub changelog_file: Option<String>,
    pub classpath: Option<String>,
    pub contexts: Option<String>,
    pub driver_properties_file: Option<String>,
    pub prompt_for_non_local_database: bool,
    pub include_system_classpath: bool,
    pub defaults_file: String,
    pub diff_types: Option<String>,
    pub change_set_author: Option<String>,
    pub change_set_context: Option<String>,
    pub data_dir: Option<String>,
    pub reference_driver: Option<String>,
    pub reference_url: Option<String>,
    pub reference_username: Option<String>,
    pub reference_password: Option<String>,
    pub current_date_time_function: Option<String>,
    pub log_level: String,
    pub log_file: Option<String>,
}
