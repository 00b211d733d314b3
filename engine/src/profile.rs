//! Connection profiles and per-session request data.

use changerun_loader::LoadingContext;

use std::collections::BTreeMap;

/// Everything an engine needs to reach one database.
///
/// Mirrors the connection slots of the resolved configuration; the engine
/// enforces its own connectivity requirements (a missing username, say)
/// when the connection is actually opened.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionProfile {
    pub url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub driver: Option<String>,
    pub database_class: Option<String>,
    pub default_schema_name: Option<String>,
    pub driver_properties_file: Option<String>,
}

/// The second database of a diff-family command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceProfile {
    pub connection: ConnectionProfile,
    /// Where to dump table data as CSV, when requested.
    pub data_output_directory: Option<String>,
}

/// Options for changelog generation from an existing database.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateOptions {
    pub diff_types: Option<String>,
    pub change_set_author: Option<String>,
    pub change_set_context: Option<String>,
    pub data_dir: Option<String>,
}

/// Everything handed to [`Engine::open`](crate::Engine::open) for one
/// invocation: the connection, the changelog, the resolved loading
/// context, and the changelog evaluation knobs.
#[derive(Debug)]
pub struct SessionRequest<'a> {
    pub connection: ConnectionProfile,
    pub changelog: Option<String>,
    pub resources: &'a LoadingContext,
    pub current_date_time_function: Option<String>,
    pub parameters: &'a BTreeMap<String, String>,
}
