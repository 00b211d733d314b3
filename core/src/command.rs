//! The closed vocabulary of recognized commands.
//!
//! Exactly one token of an invocation names the operation to run. Matching
//! is case-insensitive, and two legacy aliases (`migrate`, `migrateSQL`)
//! resolve to their canonical members at recognition time.

/// One operation from the closed command vocabulary.
///
/// Each member carries derived attributes used during setup validation and
/// dispatch: whether it needs a changelog, and whether it writes SQL to a
/// stream instead of executing against the database.
///
/// # Examples
///
/// ```
/// use changerun_core::Command;
///
/// assert_eq!(Command::recognize("UPDATE"), Some(Command::Update));
/// assert_eq!(Command::recognize("migrate"), Some(Command::Update));
/// assert_eq!(Command::recognize("not-a-command"), None);
///
/// assert!(Command::RollbackToDate.requires_changelog());
/// assert!(Command::UpdateSql.produces_sql());
/// assert!(!Command::Tag.produces_sql());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Update,
    UpdateSql,
    UpdateCount,
    UpdateCountSql,
    UpdateTestingRollback,
    Rollback,
    RollbackSql,
    RollbackToDate,
    RollbackToDateSql,
    RollbackCount,
    RollbackCountSql,
    FutureRollbackSql,
    Tag,
    ListLocks,
    ReleaseLocks,
    DropAll,
    Status,
    Validate,
    Help,
    Diff,
    DiffChangeLog,
    GenerateChangeLog,
    ClearCheckSums,
    DbDoc,
    ChangelogSync,
    ChangelogSyncSql,
    MarkNextChangeSetRan,
    MarkNextChangeSetRanSql,
}

impl Command {
    /// Resolves a token against the vocabulary, case-insensitively.
    ///
    /// The aliases `migrate` and `migrateSQL` are rewritten to
    /// [`Command::Update`] and [`Command::UpdateSql`]; every other member
    /// resolves to itself. Returns `None` for tokens outside the
    /// vocabulary.
    pub fn recognize(token: &str) -> Option<Self> {
        let command = match token.to_ascii_lowercase().as_str() {
            "update" | "migrate" => Self::Update,
            "updatesql" | "migratesql" => Self::UpdateSql,
            "updatecount" => Self::UpdateCount,
            "updatecountsql" => Self::UpdateCountSql,
            "updatetestingrollback" => Self::UpdateTestingRollback,
            "rollback" => Self::Rollback,
            "rollbacksql" => Self::RollbackSql,
            "rollbacktodate" => Self::RollbackToDate,
            "rollbacktodatesql" => Self::RollbackToDateSql,
            "rollbackcount" => Self::RollbackCount,
            "rollbackcountsql" => Self::RollbackCountSql,
            "futurerollbacksql" => Self::FutureRollbackSql,
            "tag" => Self::Tag,
            "listlocks" => Self::ListLocks,
            "releaselocks" => Self::ReleaseLocks,
            "dropall" => Self::DropAll,
            "status" => Self::Status,
            "validate" => Self::Validate,
            "help" => Self::Help,
            "diff" => Self::Diff,
            "diffchangelog" => Self::DiffChangeLog,
            "generatechangelog" => Self::GenerateChangeLog,
            "clearchecksums" => Self::ClearCheckSums,
            "dbdoc" => Self::DbDoc,
            "changelogsync" => Self::ChangelogSync,
            "changelogsyncsql" => Self::ChangelogSyncSql,
            "marknextchangesetran" => Self::MarkNextChangeSetRan,
            "marknextchangesetransql" => Self::MarkNextChangeSetRanSql,
            _ => return None,
        };
        Some(command)
    }

    /// Returns `true` if the token names a vocabulary member (or alias).
    pub fn is_vocabulary(token: &str) -> bool {
        Self::recognize(token).is_some()
    }

    /// The canonical spelling used in help text and messages.
    pub fn canonical_name(self) -> &'static str {
        match self {
            Self::Update => "update",
            Self::UpdateSql => "updateSQL",
            Self::UpdateCount => "updateCount",
            Self::UpdateCountSql => "updateCountSQL",
            Self::UpdateTestingRollback => "updateTestingRollback",
            Self::Rollback => "rollback",
            Self::RollbackSql => "rollbackSQL",
            Self::RollbackToDate => "rollbackToDate",
            Self::RollbackToDateSql => "rollbackToDateSQL",
            Self::RollbackCount => "rollbackCount",
            Self::RollbackCountSql => "rollbackCountSQL",
            Self::FutureRollbackSql => "futureRollbackSQL",
            Self::Tag => "tag",
            Self::ListLocks => "listLocks",
            Self::ReleaseLocks => "releaseLocks",
            Self::DropAll => "dropAll",
            Self::Status => "status",
            Self::Validate => "validate",
            Self::Help => "help",
            Self::Diff => "diff",
            Self::DiffChangeLog => "diffChangeLog",
            Self::GenerateChangeLog => "generateChangeLog",
            Self::ClearCheckSums => "clearCheckSums",
            Self::DbDoc => "dbDoc",
            Self::ChangelogSync => "changelogSync",
            Self::ChangelogSyncSql => "changelogSyncSQL",
            Self::MarkNextChangeSetRan => "markNextChangeSetRan",
            Self::MarkNextChangeSetRanSql => "markNextChangeSetRanSQL",
        }
    }

    /// Whether the command's semantics require `--changeLogFile`.
    ///
    /// Covers the apply-changes, roll-back, and validate families; the
    /// remaining commands operate on the database state alone.
    pub fn requires_changelog(self) -> bool {
        matches!(
            self,
            Self::Update
                | Self::UpdateSql
                | Self::UpdateCount
                | Self::UpdateCountSql
                | Self::UpdateTestingRollback
                | Self::Rollback
                | Self::RollbackSql
                | Self::RollbackToDate
                | Self::RollbackToDateSql
                | Self::RollbackCount
                | Self::RollbackCountSql
                | Self::FutureRollbackSql
                | Self::Validate
        )
    }

    /// Whether the command writes SQL to an output stream instead of
    /// executing it.
    pub fn produces_sql(self) -> bool {
        self.canonical_name().ends_with("SQL")
    }

    /// Whether the command is in the roll-back family (used for the
    /// success banner).
    pub fn is_rollback(self) -> bool {
        self.canonical_name().starts_with("rollback")
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.canonical_name())
    }
}

#[cfg(test)]
mod tests {
    use super::Command;

    #[test]
    fn recognize_is_case_insensitive() {
        assert_eq!(Command::recognize("rollbackTODATE"), Some(Command::RollbackToDate));
        assert_eq!(Command::recognize("DROPALL"), Some(Command::DropAll));
        assert_eq!(Command::recognize("dbdoc"), Some(Command::DbDoc));
    }

    #[test]
    fn aliases_resolve_to_canonical_members() {
        assert_eq!(Command::recognize("migrate"), Some(Command::Update));
        assert_eq!(Command::recognize("MIGRATE"), Some(Command::Update));
        assert_eq!(Command::recognize("migrateSQL"), Some(Command::UpdateSql));
    }

    #[test]
    fn non_aliased_members_resolve_to_themselves() {
        for name in [
            "update",
            "updateSQL",
            "rollbackCount",
            "tag",
            "listLocks",
            "diffChangeLog",
            "markNextChangeSetRanSQL",
        ] {
            let command = Command::recognize(name).unwrap();
            assert_eq!(command.canonical_name(), name);
        }
    }

    #[test]
    fn unknown_tokens_are_rejected() {
        assert_eq!(Command::recognize("upgrade"), None);
        assert_eq!(Command::recognize("--update"), None);
        assert_eq!(Command::recognize(""), None);
    }

    #[test]
    fn changelog_requirement_follows_command_family() {
        assert!(Command::Update.requires_changelog());
        assert!(Command::UpdateTestingRollback.requires_changelog());
        assert!(Command::RollbackCountSql.requires_changelog());
        assert!(Command::FutureRollbackSql.requires_changelog());
        assert!(Command::Validate.requires_changelog());

        assert!(!Command::Tag.requires_changelog());
        assert!(!Command::Status.requires_changelog());
        assert!(!Command::Diff.requires_changelog());
        assert!(!Command::DropAll.requires_changelog());
    }

    #[test]
    fn sql_commands_are_identified_by_name() {
        assert!(Command::UpdateSql.produces_sql());
        assert!(Command::FutureRollbackSql.produces_sql());
        assert!(Command::ChangelogSyncSql.produces_sql());
        assert!(!Command::Update.produces_sql());
        assert!(!Command::Status.produces_sql());
    }
}
