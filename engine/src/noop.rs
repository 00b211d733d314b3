//! A stand-in engine that accepts every operation and does nothing.
//!
//! The shipped binary wires this implementation so the whole front end —
//! parsing, layered configuration, classpath assembly, dispatch, banners,
//! exit codes, resource lifecycle — can be exercised end to end before a
//! real engine is linked in. Every operation logs what it was asked to do
//! and succeeds; SQL variants write nothing.

use std::io::Write;

use chrono::NaiveDateTime;
use tracing::debug;

use crate::error::Result;
use crate::profile::{GenerateOptions, ReferenceProfile, SessionRequest};
use crate::session::{Engine, Session};

/// Engine whose sessions accept every operation without touching anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEngine;

impl Engine for NoopEngine {
    fn open(&self, request: SessionRequest<'_>) -> Result<Box<dyn Session>> {
        debug!(
            url = request.connection.url.as_deref().unwrap_or("<unset>"),
            changelog = request.changelog.as_deref().unwrap_or("<none>"),
            resources = request.resources.resources().len(),
            "opening no-op session"
        );
        Ok(Box::new(NoopSession))
    }
}

struct NoopSession;

impl NoopSession {
    fn accept(&self, operation: &str) -> Result<()> {
        debug!(operation, "no-op session accepted operation");
        Ok(())
    }
}

impl Session for NoopSession {
    fn update(&mut self, _contexts: Option<&str>) -> Result<()> {
        self.accept("update")
    }

    fn update_sql(&mut self, _contexts: Option<&str>, _out: &mut dyn Write) -> Result<()> {
        self.accept("updateSQL")
    }

    fn update_count(&mut self, _changes: u32, _contexts: Option<&str>) -> Result<()> {
        self.accept("updateCount")
    }

    fn update_count_sql(
        &mut self,
        _changes: u32,
        _contexts: Option<&str>,
        _out: &mut dyn Write,
    ) -> Result<()> {
        self.accept("updateCountSQL")
    }

    fn update_testing_rollback(&mut self, _contexts: Option<&str>) -> Result<()> {
        self.accept("updateTestingRollback")
    }

    fn rollback_to_tag(&mut self, _tag: &str, _contexts: Option<&str>) -> Result<()> {
        self.accept("rollback")
    }

    fn rollback_to_tag_sql(
        &mut self,
        _tag: &str,
        _contexts: Option<&str>,
        _out: &mut dyn Write,
    ) -> Result<()> {
        self.accept("rollbackSQL")
    }

    fn rollback_to_date(&mut self, _target: NaiveDateTime, _contexts: Option<&str>) -> Result<()> {
        self.accept("rollbackToDate")
    }

    fn rollback_to_date_sql(
        &mut self,
        _target: NaiveDateTime,
        _contexts: Option<&str>,
        _out: &mut dyn Write,
    ) -> Result<()> {
        self.accept("rollbackToDateSQL")
    }

    fn rollback_count(&mut self, _changes: u32, _contexts: Option<&str>) -> Result<()> {
        self.accept("rollbackCount")
    }

    fn rollback_count_sql(
        &mut self,
        _changes: u32,
        _contexts: Option<&str>,
        _out: &mut dyn Write,
    ) -> Result<()> {
        self.accept("rollbackCountSQL")
    }

    fn future_rollback_sql(&mut self, _contexts: Option<&str>, _out: &mut dyn Write) -> Result<()> {
        self.accept("futureRollbackSQL")
    }

    fn tag(&mut self, _name: &str) -> Result<()> {
        self.accept("tag")
    }

    fn list_locks(&mut self, _out: &mut dyn Write) -> Result<()> {
        self.accept("listLocks")
    }

    fn release_locks(&mut self) -> Result<()> {
        self.accept("releaseLocks")
    }

    fn drop_all(&mut self) -> Result<()> {
        self.accept("dropAll")
    }

    fn status(
        &mut self,
        _verbose: bool,
        _contexts: Option<&str>,
        _out: &mut dyn Write,
    ) -> Result<()> {
        self.accept("status")
    }

    fn validate(&mut self) -> Result<()> {
        self.accept("validate")
    }

    fn clear_checksums(&mut self) -> Result<()> {
        self.accept("clearCheckSums")
    }

    fn generate_docs(&mut self, _output_directory: &str, _contexts: Option<&str>) -> Result<()> {
        self.accept("dbDoc")
    }

    fn changelog_sync(&mut self, _contexts: Option<&str>) -> Result<()> {
        self.accept("changelogSync")
    }

    fn changelog_sync_sql(&mut self, _contexts: Option<&str>, _out: &mut dyn Write) -> Result<()> {
        self.accept("changelogSyncSQL")
    }

    fn mark_next_changeset_ran(&mut self, _contexts: Option<&str>) -> Result<()> {
        self.accept("markNextChangeSetRan")
    }

    fn mark_next_changeset_ran_sql(
        &mut self,
        _contexts: Option<&str>,
        _out: &mut dyn Write,
    ) -> Result<()> {
        self.accept("markNextChangeSetRanSQL")
    }

    fn diff(&mut self, _reference: &ReferenceProfile, _out: &mut dyn Write) -> Result<()> {
        self.accept("diff")
    }

    fn diff_changelog(&mut self, _reference: &ReferenceProfile) -> Result<()> {
        self.accept("diffChangeLog")
    }

    fn generate_changelog(&mut self, _options: &GenerateOptions) -> Result<()> {
        self.accept("generateChangeLog")
    }

    fn rollback_connection(&mut self) -> Result<()> {
        self.accept("rollback-connection")
    }

    fn close(&mut self) -> Result<()> {
        self.accept("close")
    }
}
