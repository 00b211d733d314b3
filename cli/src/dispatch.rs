//! Two-phase command dispatch.
//!
//! Dispatch first *plans*: per-command parameters (tags, counts, dates,
//! reference-database overrides) are validated into a typed
//! [`Operation`] before any connection is opened, so a malformed date
//! never touches the database. It then opens a session, *executes* the
//! one operation, and releases the session — rollback, then close — on
//! every exit path. Only a release failure is downgraded to a warning.

use std::io::Write;

use chrono::NaiveDateTime;
use thiserror::Error;
use tracing::warn;

use changerun_core::{Command, Configuration, NamedParameters};
use changerun_engine::{
    ConnectionProfile, Engine, EngineError, GenerateOptions, ReferenceProfile, Session,
    SessionRequest,
};
use changerun_loader::LoadingContext;

/// Literal date format accepted by the date-taking rollback commands.
const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Errors specific to one command's parameter contract or execution.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// A command that takes a parameter got none.
    #[error("{command} requires {what}")]
    MissingParameter {
        command: &'static str,
        what: &'static str,
    },

    /// A count-taking command got a non-numeric parameter.
    #[error("{command} requires a numeric count, got '{value}'")]
    InvalidCount {
        command: &'static str,
        value: String,
    },

    /// A date-taking command got a malformed date. The underlying parser's
    /// own message is deliberately hidden behind this normalized text.
    #[error("Unexpected date/time format. Use 'yyyy-MM-dd'T'HH:mm:ss'")]
    InvalidDateFormat,

    /// A diff-family command has no reference URL from any source.
    #[error("referenceUrl parameter missing")]
    MissingReferenceUrl,

    /// A command parameter that should be a `name=value` assignment has
    /// no `=`.
    #[error("Could not parse '{0}'")]
    UnparsableParameter(String),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// One fully validated operation, ready to run against a session.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Operation {
    Update,
    UpdateSql,
    UpdateCount(u32),
    UpdateCountSql(u32),
    UpdateTestingRollback,
    RollbackToTag(String),
    RollbackToTagSql(String),
    RollbackToDate(NaiveDateTime),
    RollbackToDateSql(NaiveDateTime),
    RollbackCount(u32),
    RollbackCountSql(u32),
    FutureRollbackSql,
    Tag(String),
    ListLocks,
    ReleaseLocks,
    DropAll,
    Status { verbose: bool },
    Validate,
    ClearCheckSums,
    DbDoc { output_directory: String },
    ChangelogSync,
    ChangelogSyncSql,
    MarkNextChangeSetRan,
    MarkNextChangeSetRanSql,
    Diff(ReferenceProfile),
    DiffChangeLog(ReferenceProfile),
    GenerateChangeLog(GenerateOptions),
}

/// Plans and executes `command` against `engine`.
///
/// `help` renders usage without opening a session. Everything else goes
/// through [`plan`], one `Engine::open`, [`execute`], and the scoped
/// session release.
pub fn dispatch(
    engine: &dyn Engine,
    command: Command,
    config: &Configuration,
    command_params: &[String],
    parameters: &NamedParameters,
    resources: &LoadingContext,
    out: &mut dyn Write,
) -> Result<(), DispatchError> {
    if command == Command::Help {
        crate::help::print_usage(out)?;
        return Ok(());
    }

    let operation = plan(command, command_params, config)?;

    let request = SessionRequest {
        connection: connection_profile(config),
        changelog: config.changelog_file.clone(),
        resources,
        current_date_time_function: config.current_date_time_function.clone(),
        parameters,
    };
    let mut session = engine.open(request)?;

    let result = execute(session.as_mut(), &operation, config, out);

    if let Err(err) = session.rollback_connection().and_then(|()| session.close()) {
        warn!("problem closing connection: {err}");
    }

    result
}

/// Validates per-command parameters into a typed [`Operation`].
///
/// Pure: no connection is opened and nothing is executed here.
pub(crate) fn plan(
    command: Command,
    params: &[String],
    config: &Configuration,
) -> Result<Operation, DispatchError> {
    let operation = match command {
        Command::Update => Operation::Update,
        Command::UpdateSql => Operation::UpdateSql,
        Command::UpdateCount => {
            Operation::UpdateCount(required_count(command, params, "a change count")?)
        }
        Command::UpdateCountSql => {
            Operation::UpdateCountSql(required_count(command, params, "a change count")?)
        }
        Command::UpdateTestingRollback => Operation::UpdateTestingRollback,
        Command::Rollback => {
            Operation::RollbackToTag(required_param(command, params, "a rollback tag")?)
        }
        Command::RollbackSql => {
            Operation::RollbackToTagSql(required_param(command, params, "a rollback tag")?)
        }
        Command::RollbackToDate => {
            Operation::RollbackToDate(required_date(command, params, "a rollback date")?)
        }
        Command::RollbackToDateSql => {
            Operation::RollbackToDateSql(required_date(command, params, "a rollback date")?)
        }
        Command::RollbackCount => {
            Operation::RollbackCount(required_count(command, params, "a rollback count")?)
        }
        Command::RollbackCountSql => {
            Operation::RollbackCountSql(required_count(command, params, "a rollback count")?)
        }
        Command::FutureRollbackSql => Operation::FutureRollbackSql,
        Command::Tag => Operation::Tag(required_param(command, params, "a tag string")?),
        Command::ListLocks => Operation::ListLocks,
        Command::ReleaseLocks => Operation::ReleaseLocks,
        Command::DropAll => Operation::DropAll,
        Command::Status => Operation::Status {
            verbose: params.iter().any(|param| param == "--verbose"),
        },
        Command::Validate => Operation::Validate,
        Command::ClearCheckSums => Operation::ClearCheckSums,
        Command::DbDoc => {
            let output_directory = required_param(command, params, "an output directory")?;
            if config.changelog_file.is_none() {
                return Err(DispatchError::MissingParameter {
                    command: command.canonical_name(),
                    what: "a changeLog parameter",
                });
            }
            Operation::DbDoc { output_directory }
        }
        Command::ChangelogSync => Operation::ChangelogSync,
        Command::ChangelogSyncSql => Operation::ChangelogSyncSql,
        Command::MarkNextChangeSetRan => Operation::MarkNextChangeSetRan,
        Command::MarkNextChangeSetRanSql => Operation::MarkNextChangeSetRanSql,
        Command::Diff => Operation::Diff(reference_profile(config, params)?),
        Command::DiffChangeLog => Operation::DiffChangeLog(reference_profile(config, params)?),
        Command::GenerateChangeLog => Operation::GenerateChangeLog(GenerateOptions {
            diff_types: trim_to_none(&config.diff_types),
            change_set_author: trim_to_none(&config.change_set_author),
            change_set_context: trim_to_none(&config.change_set_context),
            data_dir: trim_to_none(&config.data_dir),
        }),
        // Handled before planning; no session is opened for it.
        Command::Help => unreachable!("help is rendered without a plan"),
    };
    Ok(operation)
}

fn execute(
    session: &mut dyn Session,
    operation: &Operation,
    config: &Configuration,
    out: &mut dyn Write,
) -> Result<(), DispatchError> {
    let contexts = config.contexts.as_deref();
    match operation {
        Operation::Update => session.update(contexts)?,
        Operation::UpdateSql => session.update_sql(contexts, out)?,
        Operation::UpdateCount(changes) => session.update_count(*changes, contexts)?,
        Operation::UpdateCountSql(changes) => session.update_count_sql(*changes, contexts, out)?,
        Operation::UpdateTestingRollback => session.update_testing_rollback(contexts)?,
        Operation::RollbackToTag(tag) => session.rollback_to_tag(tag, contexts)?,
        Operation::RollbackToTagSql(tag) => session.rollback_to_tag_sql(tag, contexts, out)?,
        Operation::RollbackToDate(target) => session.rollback_to_date(*target, contexts)?,
        Operation::RollbackToDateSql(target) => {
            session.rollback_to_date_sql(*target, contexts, out)?
        }
        Operation::RollbackCount(changes) => session.rollback_count(*changes, contexts)?,
        Operation::RollbackCountSql(changes) => {
            session.rollback_count_sql(*changes, contexts, out)?
        }
        Operation::FutureRollbackSql => session.future_rollback_sql(contexts, out)?,
        Operation::Tag(name) => {
            session.tag(name)?;
            writeln!(out, "Successfully tagged '{name}'")?;
        }
        Operation::ListLocks => session.list_locks(out)?,
        Operation::ReleaseLocks => {
            session.release_locks()?;
            writeln!(out, "Successfully released all database change log locks")?;
        }
        Operation::DropAll => {
            session.drop_all()?;
            writeln!(out, "All database objects dropped")?;
        }
        Operation::Status { verbose } => session.status(*verbose, contexts, out)?,
        Operation::Validate => {
            session.validate()?;
            writeln!(out, "No validation errors found")?;
        }
        Operation::ClearCheckSums => session.clear_checksums()?,
        Operation::DbDoc { output_directory } => {
            session.generate_docs(output_directory, contexts)?
        }
        Operation::ChangelogSync => session.changelog_sync(contexts)?,
        Operation::ChangelogSyncSql => session.changelog_sync_sql(contexts, out)?,
        Operation::MarkNextChangeSetRan => session.mark_next_changeset_ran(contexts)?,
        Operation::MarkNextChangeSetRanSql => {
            session.mark_next_changeset_ran_sql(contexts, out)?
        }
        Operation::Diff(reference) => session.diff(reference, out)?,
        Operation::DiffChangeLog(reference) => session.diff_changelog(reference)?,
        Operation::GenerateChangeLog(options) => session.generate_changelog(options)?,
    }
    Ok(())
}

fn connection_profile(config: &Configuration) -> ConnectionProfile {
    ConnectionProfile {
        url: config.url.clone(),
        username: config.username.clone(),
        password: config.password.clone(),
        driver: config.driver.clone(),
        database_class: config.database_class.clone(),
        default_schema_name: config.default_schema_name.clone(),
        driver_properties_file: config.driver_properties_file.clone(),
    }
}

/// Builds the reference-database profile for the diff family.
///
/// Starts from the `reference*` configuration slots, then applies
/// case-insensitive `name=value` overrides from the command parameters.
/// Unrecognized override names are ignored.
fn reference_profile(
    config: &Configuration,
    params: &[String],
) -> Result<ReferenceProfile, DispatchError> {
    let mut driver = config.reference_driver.clone();
    let mut url = config.reference_url.clone();
    let mut username = config.reference_username.clone();
    let mut password = config.reference_password.clone();
    let mut default_schema_name = config.default_schema_name.clone();
    let mut data_output_directory = None;

    for param in params {
        let (name, value) = split_param(param)?;
        match name.to_ascii_lowercase().as_str() {
            "referencedriver" => driver = Some(value.to_string()),
            "referenceurl" => url = Some(value.to_string()),
            "referenceusername" => username = Some(value.to_string()),
            "referencepassword" => password = Some(value.to_string()),
            "referencedefaultschemaname" => default_schema_name = Some(value.to_string()),
            "dataoutputdirectory" => data_output_directory = Some(value.to_string()),
            _ => {}
        }
    }

    let Some(url) = url else {
        return Err(DispatchError::MissingReferenceUrl);
    };

    Ok(ReferenceProfile {
        connection: ConnectionProfile {
            url: Some(url),
            username,
            password,
            driver,
            database_class: None,
            default_schema_name,
            driver_properties_file: None,
        },
        data_output_directory,
    })
}

/// Splits a `--name=value` (or `name=value`) command parameter.
fn split_param(param: &str) -> Result<(&str, &str), DispatchError> {
    match param.split_once('=') {
        Some((name, value)) => Ok((name.strip_prefix("--").unwrap_or(name), value)),
        None => Err(DispatchError::UnparsableParameter(param.to_string())),
    }
}

fn required_param(
    command: Command,
    params: &[String],
    what: &'static str,
) -> Result<String, DispatchError> {
    params
        .first()
        .cloned()
        .ok_or(DispatchError::MissingParameter {
            command: command.canonical_name(),
            what,
        })
}

fn required_count(
    command: Command,
    params: &[String],
    what: &'static str,
) -> Result<u32, DispatchError> {
    let raw = required_param(command, params, what)?;
    raw.parse().map_err(|_| DispatchError::InvalidCount {
        command: command.canonical_name(),
        value: raw,
    })
}

fn required_date(
    command: Command,
    params: &[String],
    what: &'static str,
) -> Result<NaiveDateTime, DispatchError> {
    let raw = required_param(command, params, what)?;
    NaiveDateTime::parse_from_str(&raw, DATE_FORMAT).map_err(|_| DispatchError::InvalidDateFormat)
}

fn trim_to_none(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|trimmed| !trimmed.is_empty())
        .map(str::to_string)
}
