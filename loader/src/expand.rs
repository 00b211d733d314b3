//! Recursive archive expansion.
//!
//! Web archives contribute their embedded classes directory plus every
//! library under `WEB-INF/lib`; enterprise archives contribute every
//! contained library archive and recurse into contained web archives.
//! Extracted entries are byte-for-byte copies placed in a scratch
//! directory owned by the resulting [`LoadingContext`].

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use tracing::debug;
use zip::ZipArchive;

use crate::classpath::{split_classpath, LoadingContext, Resource};
use crate::error::{LoaderError, Result};

/// Directory inside a web archive holding loadable classes.
const WAR_CLASSES_DIR: &str = "WEB-INF/classes/";
/// Directory inside a web archive holding embedded libraries.
const WAR_LIB_DIR: &str = "WEB-INF/lib";

/// Resolves a classpath string into a [`LoadingContext`].
///
/// Every entry must exist on disk. Entries ending in `.war`/`.ear`
/// (case-insensitive) are expanded per the container rules; everything
/// else becomes a direct path locator. `include_system_classpath` is
/// recorded on the context for the engine's resource resolution.
///
/// # Errors
///
/// [`LoaderError::PathDoesNotExist`] for a missing entry,
/// [`LoaderError::Archive`] for an unreadable container, and
/// [`LoaderError::Io`] for extraction failures. All abort context
/// construction; there are no silent skips.
pub fn build_loading_context(
    classpath: Option<&str>,
    include_system_classpath: bool,
) -> Result<LoadingContext> {
    let mut expander = ArchiveExpander::default();
    if let Some(classpath) = classpath {
        for entry in split_classpath(classpath) {
            expander.add_entry(entry)?;
        }
    }
    Ok(expander.finish(include_system_classpath))
}

/// Accumulates resources while extracting nested libraries to scratch
/// storage.
#[derive(Default)]
struct ArchiveExpander {
    resources: Vec<Resource>,
    scratch: Option<tempfile::TempDir>,
    extracted: usize,
}

impl ArchiveExpander {
    fn add_entry(&mut self, entry: &str) -> Result<()> {
        let path = Path::new(entry);
        if !path.exists() {
            let shown = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
            return Err(LoaderError::PathDoesNotExist(shown));
        }

        let lower = entry.to_ascii_lowercase();
        if lower.ends_with(".war") {
            self.add_web_archive(path)
        } else if lower.ends_with(".ear") {
            self.add_enterprise_archive(path)
        } else {
            self.resources.push(Resource::Path(path.to_path_buf()));
            Ok(())
        }
    }

    /// One locator for the classes directory, one per embedded library.
    fn add_web_archive(&mut self, war: &Path) -> Result<()> {
        self.resources.push(Resource::Archive {
            file: war.to_path_buf(),
            subpath: WAR_CLASSES_DIR.to_string(),
        });

        let mut archive = open_archive(war)?;
        for index in 0..archive.len() {
            let mut entry = archive.by_index(index).map_err(|source| {
                LoaderError::Archive {
                    path: war.to_path_buf(),
                    source,
                }
            })?;
            if !entry.is_file() {
                continue;
            }
            let name = entry.name().to_string();
            if name.starts_with(WAR_LIB_DIR) && name.to_ascii_lowercase().ends_with(".jar") {
                let library = self.extract(&mut entry, &name)?;
                self.resources.push(Resource::Archive {
                    file: library,
                    subpath: String::new(),
                });
            }
        }
        Ok(())
    }

    /// Every contained library directly; contained web archives recurse.
    fn add_enterprise_archive(&mut self, ear: &Path) -> Result<()> {
        let mut archive = open_archive(ear)?;
        for index in 0..archive.len() {
            let mut entry = archive.by_index(index).map_err(|source| {
                LoaderError::Archive {
                    path: ear.to_path_buf(),
                    source,
                }
            })?;
            if !entry.is_file() {
                continue;
            }
            let name = entry.name().to_string();
            let lower = name.to_ascii_lowercase();
            if lower.ends_with(".jar") {
                let library = self.extract(&mut entry, &name)?;
                self.resources.push(Resource::Archive {
                    file: library,
                    subpath: String::new(),
                });
            } else if lower.ends_with(".war") {
                let war = self.extract(&mut entry, &name)?;
                drop(entry);
                self.add_web_archive(&war)?;
            }
        }
        Ok(())
    }

    /// Copies one container entry byte-for-byte into scratch storage.
    fn extract(&mut self, entry: &mut impl std::io::Read, name: &str) -> Result<PathBuf> {
        let scratch = match &self.scratch {
            Some(dir) => dir.path().to_path_buf(),
            None => {
                let dir = tempfile::Builder::new().prefix("changerun-lib").tempdir()?;
                let path = dir.path().to_path_buf();
                self.scratch = Some(dir);
                path
            }
        };

        let file_name = name.rsplit('/').next().unwrap_or(name);
        let destination = scratch.join(format!("{:04}-{file_name}", self.extracted));
        self.extracted += 1;

        let mut out = File::create(&destination)?;
        std::io::copy(entry, &mut out)?;
        debug!(entry = name, destination = %destination.display(), "extracted nested library");
        Ok(destination)
    }

    fn finish(self, include_system_classpath: bool) -> LoadingContext {
        LoadingContext::new(self.resources, include_system_classpath, self.scratch)
    }
}

fn open_archive(path: &Path) -> Result<ZipArchive<BufReader<File>>> {
    let file = File::open(path)?;
    ZipArchive::new(BufReader::new(file)).map_err(|source| LoaderError::Archive {
        path: path.to_path_buf(),
        source,
    })
}
