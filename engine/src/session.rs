//! The engine and session traits.

use std::io::Write;

use chrono::NaiveDateTime;

use crate::error::Result;
use crate::profile::{GenerateOptions, ReferenceProfile, SessionRequest};

/// Opens sessions against one kind of migration engine.
pub trait Engine {
    /// Establishes the database connection and prepares the changelog
    /// evaluation state for one invocation.
    fn open(&self, request: SessionRequest<'_>) -> Result<Box<dyn Session>>;
}

/// One open engine session: a database connection plus changelog state.
///
/// The front end invokes exactly one operation per session, then releases
/// the session with [`rollback_connection`](Self::rollback_connection)
/// followed by [`close`](Self::close) on every exit path, success or
/// failure. The `*_sql` variants write the statements they would have run
/// to `out` instead of executing them.
pub trait Session {
    fn update(&mut self, contexts: Option<&str>) -> Result<()>;
    fn update_sql(&mut self, contexts: Option<&str>, out: &mut dyn Write) -> Result<()>;
    fn update_count(&mut self, changes: u32, contexts: Option<&str>) -> Result<()>;
    fn update_count_sql(
        &mut self,
        changes: u32,
        contexts: Option<&str>,
        out: &mut dyn Write,
    ) -> Result<()>;
    /// Updates, rolls the changes back, then updates again.
    fn update_testing_rollback(&mut self, contexts: Option<&str>) -> Result<()>;

    fn rollback_to_tag(&mut self, tag: &str, contexts: Option<&str>) -> Result<()>;
    fn rollback_to_tag_sql(
        &mut self,
        tag: &str,
        contexts: Option<&str>,
        out: &mut dyn Write,
    ) -> Result<()>;
    fn rollback_to_date(&mut self, target: NaiveDateTime, contexts: Option<&str>) -> Result<()>;
    fn rollback_to_date_sql(
        &mut self,
        target: NaiveDateTime,
        contexts: Option<&str>,
        out: &mut dyn Write,
    ) -> Result<()>;
    fn rollback_count(&mut self, changes: u32, contexts: Option<&str>) -> Result<()>;
    fn rollback_count_sql(
        &mut self,
        changes: u32,
        contexts: Option<&str>,
        out: &mut dyn Write,
    ) -> Result<()>;
    /// SQL to roll back changes not yet applied, once they are.
    fn future_rollback_sql(&mut self, contexts: Option<&str>, out: &mut dyn Write) -> Result<()>;

    /// Tags the current database state for future rollback.
    fn tag(&mut self, name: &str) -> Result<()>;
    fn list_locks(&mut self, out: &mut dyn Write) -> Result<()>;
    fn release_locks(&mut self) -> Result<()>;
    fn drop_all(&mut self) -> Result<()>;
    fn status(&mut self, verbose: bool, contexts: Option<&str>, out: &mut dyn Write) -> Result<()>;
    /// Checks the changelog for errors; failures carry a
    /// [`ValidationReport`](crate::ValidationReport).
    fn validate(&mut self) -> Result<()>;
    fn clear_checksums(&mut self) -> Result<()>;
    fn generate_docs(&mut self, output_directory: &str, contexts: Option<&str>) -> Result<()>;
    fn changelog_sync(&mut self, contexts: Option<&str>) -> Result<()>;
    fn changelog_sync_sql(&mut self, contexts: Option<&str>, out: &mut dyn Write) -> Result<()>;
    fn mark_next_changeset_ran(&mut self, contexts: Option<&str>) -> Result<()>;
    fn mark_next_changeset_ran_sql(
        &mut self,
        contexts: Option<&str>,
        out: &mut dyn Write,
    ) -> Result<()>;

    fn diff(&mut self, reference: &ReferenceProfile, out: &mut dyn Write) -> Result<()>;
    fn diff_changelog(&mut self, reference: &ReferenceProfile) -> Result<()>;
    fn generate_changelog(&mut self, options: &GenerateOptions) -> Result<()>;

    /// Rolls back the underlying connection's open transaction.
    fn rollback_connection(&mut self) -> Result<()>;
    /// Closes the underlying connection.
    fn close(&mut self) -> Result<()>;
}
