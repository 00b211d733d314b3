//! Usage and error-list rendering.

use std::io::{self, Write};

/// Prints the collected error messages followed by usage text.
pub fn print_errors(out: &mut dyn Write, messages: &[String]) -> io::Result<()> {
    writeln!(out, "Errors:")?;
    for message in messages {
        writeln!(out, "  {message}")?;
    }
    writeln!(out)?;
    print_usage(out)
}

/// Prints the command and option summary.
pub fn print_usage(out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "Usage: changerun [options] [command] [command parameters]")?;
    writeln!(out)?;
    writeln!(out, "Standard commands:")?;
    writeln!(out, "  update                        Apply all unrun changesets")?;
    writeln!(out, "  updateSQL                     Write the SQL update would run to stdout")?;
    writeln!(out, "  updateCount <num>             Apply the next <num> changesets")?;
    writeln!(out, "  updateCountSQL <num>          Write the SQL updateCount would run")?;
    writeln!(out, "  updateTestingRollback         Update, roll back, update again")?;
    writeln!(out, "  rollback <tag>                Roll back to the tagged state")?;
    writeln!(out, "  rollbackSQL <tag>             Write the SQL rollback would run")?;
    writeln!(out, "  rollbackToDate <date>         Roll back to a date/time")?;
    writeln!(out, "                                (format: yyyy-MM-dd'T'HH:mm:ss)")?;
    writeln!(out, "  rollbackToDateSQL <date>      Write the SQL rollbackToDate would run")?;
    writeln!(out, "  rollbackCount <num>           Roll back the last <num> changesets")?;
    writeln!(out, "  rollbackCountSQL <num>        Write the SQL rollbackCount would run")?;
    writeln!(out, "  futureRollbackSQL             SQL to roll back not-yet-applied changes")?;
    writeln!(out, "  generateChangeLog             Write a changelog describing the database")?;
    writeln!(out)?;
    writeln!(out, "Diff commands:")?;
    writeln!(out, "  diff [diff parameters]        Describe differences between two databases")?;
    writeln!(out, "  diffChangeLog [diff parameters]  Write a changelog to align them")?;
    writeln!(out)?;
    writeln!(out, "Documentation commands:")?;
    writeln!(out, "  dbDoc <outputDirectory>       Generate changelog documentation")?;
    writeln!(out)?;
    writeln!(out, "Maintenance commands:")?;
    writeln!(out, "  tag <tag string>              Tag the current database state")?;
    writeln!(out, "  status [--verbose]            Count (or list) unrun changesets")?;
    writeln!(out, "  validate                      Check the changelog for errors")?;
    writeln!(out, "  clearCheckSums                Remove saved changeset checksums")?;
    writeln!(out, "  changelogSync                 Mark all changesets as executed")?;
    writeln!(out, "  changelogSyncSQL              Write the SQL changelogSync would run")?;
    writeln!(out, "  markNextChangeSetRan          Mark the next changeset as executed")?;
    writeln!(out, "  markNextChangeSetRanSQL       Write the SQL for markNextChangeSetRan")?;
    writeln!(out, "  listLocks                     List changelog lock holders")?;
    writeln!(out, "  releaseLocks                  Release all changelog locks")?;
    writeln!(out, "  dropAll                       Drop all owned database objects")?;
    writeln!(out)?;
    writeln!(out, "Required parameters:")?;
    writeln!(out, "  --url=<value>                              Database URL")?;
    writeln!(out, "  --changeLogFile=<path>                     Changelog file")?;
    writeln!(out, "  --username=<value>                         Database username")?;
    writeln!(out, "  --password=<value>                         Database password")?;
    writeln!(out)?;
    writeln!(out, "Optional parameters:")?;
    writeln!(out, "  --classpath=<value>                        Locations holding changelogs")?;
    writeln!(out, "                                             and database drivers")?;
    writeln!(out, "  --driver=<driver.ClassName>                Database driver class name")?;
    writeln!(out, "  --databaseClass=<database.ClassName>       Custom database implementation")?;
    writeln!(out, "  --defaultSchemaName=<name>                 Default database schema")?;
    writeln!(out, "  --contexts=<value>                         Changeset contexts to execute")?;
    writeln!(out, "  --defaultsFile=<path>                      File with default option values")?;
    writeln!(out, "                                             (default: ./liquibase.properties)")?;
    writeln!(out, "  --driverPropertiesFile=<path>              Custom connection properties")?;
    writeln!(out, "  --includeSystemClasspath=<true|false>      Also search the system")?;
    writeln!(out, "                                             classpath (default: true)")?;
    writeln!(out, "  --promptForNonLocalDatabase=<true|false>   Confirm before touching")?;
    writeln!(out, "                                             non-localhost databases")?;
    writeln!(out, "                                             (default: false)")?;
    writeln!(out, "  --logLevel=<level>                         debug, info, warning,")?;
    writeln!(out, "                                             severe, or off")?;
    writeln!(out, "  --logFile=<file>                           Log file")?;
    writeln!(out, "  --currentDateTimeFunction=<value>          Override the SQL current")?;
    writeln!(out, "                                             date/time function")?;
    writeln!(out, "  --help                                     Print this message")?;
    writeln!(out, "  --version                                  Print version information")?;
    writeln!(out)?;
    writeln!(out, "Required diff parameters:")?;
    writeln!(out, "  --referenceUrl=<value>                     Reference database URL")?;
    writeln!(out, "  --referenceUsername=<value>                Reference database username")?;
    writeln!(out, "  --referencePassword=<value>                Reference database password")?;
    writeln!(out)?;
    writeln!(out, "Optional diff parameters:")?;
    writeln!(out, "  --referenceDriver=<driver.ClassName>       Reference driver class name")?;
    writeln!(out, "  --dataOutputDirectory=DIR                  Dump table data as CSV into DIR")?;
    writeln!(out)?;
    writeln!(out, "Changelog properties:")?;
    writeln!(out, "  -D<name>=<value>                           Substitution parameter for")?;
    writeln!(out, "                                             the changelog(s)")?;
    writeln!(out)?;
    writeln!(
        out,
        "Default values for parameters can be stored in a properties file"
    )?;
    writeln!(
        out,
        "(default: ./liquibase.properties); a sibling '.local' file is read"
    )?;
    writeln!(out, "first and wins for any value it sets.")?;
    Ok(())
}
