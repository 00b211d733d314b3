//! Classpath splitting and the resolved loading context.

use std::fmt;
use std::path::PathBuf;

use tempfile::TempDir;

/// Separator between classpath entries: `;` on Windows, `:` elsewhere.
pub const CLASSPATH_SEPARATOR: char = if cfg!(windows) { ';' } else { ':' };

/// Splits a classpath string into its non-empty entries.
///
/// # Examples
///
/// ```
/// use changerun_loader::split_classpath;
///
/// # #[cfg(not(windows))]
/// assert_eq!(split_classpath("lib:drivers.jar:"), vec!["lib", "drivers.jar"]);
/// ```
pub fn split_classpath(classpath: &str) -> Vec<&str> {
    classpath
        .split(CLASSPATH_SEPARATOR)
        .filter(|entry| !entry.is_empty())
        .collect()
}

/// One resolved location the engine may load resources from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource {
    /// A plain directory or archive file, used as-is.
    Path(PathBuf),
    /// A location inside an archive container. An empty `subpath`
    /// addresses the archive root (an extracted library archive); a
    /// non-empty one addresses a directory within the container (a web
    /// archive's classes directory).
    Archive { file: PathBuf, subpath: String },
}

impl Resource {
    /// The synthetic locator string for this resource
    /// (`path` or `archive!/subpath`).
    pub fn locator(&self) -> String {
        match self {
            Self::Path(path) => path.display().to_string(),
            Self::Archive { file, subpath } => format!("{}!/{}", file.display(), subpath),
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.locator())
    }
}

/// The resolved, ordered set of loadable locations for one invocation.
///
/// Owns the temporary directory holding extracted library archives;
/// dropping the context deletes every extracted file. The context is
/// passed by argument to the engine rather than installed as ambient
/// process state.
#[derive(Debug)]
pub struct LoadingContext {
    resources: Vec<Resource>,
    include_system_classpath: bool,
    scratch: Option<TempDir>,
}

impl LoadingContext {
    pub(crate) fn new(
        resources: Vec<Resource>,
        include_system_classpath: bool,
        scratch: Option<TempDir>,
    ) -> Self {
        Self {
            resources,
            include_system_classpath,
            scratch,
        }
    }

    /// The resolved locators, in classpath order.
    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    /// Whether the engine should also search the ambient process-wide
    /// locations (default true).
    pub fn includes_system_classpath(&self) -> bool {
        self.include_system_classpath
    }

    /// Directory holding extracted libraries, while any exist.
    pub fn scratch_dir(&self) -> Option<&std::path::Path> {
        self.scratch.as_ref().map(TempDir::path)
    }
}
