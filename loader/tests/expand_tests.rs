use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use changerun_loader::{build_loading_context, LoaderError, Resource};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Helper to create a temp directory that is cleaned up on drop.
struct TempDir {
    path: PathBuf,
}

impl TempDir {
    fn new(name: &str) -> Self {
        let path =
            std::env::temp_dir().join(format!("changerun_loader_test_{name}_{}", std::process::id()));
        let _ = fs::remove_dir_all(&path);
        fs::create_dir_all(&path).expect("failed to create temp dir");
        Self { path }
    }

    fn join(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

/// Writes a zip container with the given (entry name, contents) pairs.
fn write_archive(path: &Path, entries: &[(&str, &[u8])]) {
    let file = fs::File::create(path).expect("failed to create archive");
    let mut writer = ZipWriter::new(file);
    for (name, contents) in entries {
        writer
            .start_file(*name, SimpleFileOptions::default())
            .expect("failed to start entry");
        writer.write_all(contents).expect("failed to write entry");
    }
    writer.finish().expect("failed to finish archive");
}

fn classpath(entries: &[&Path]) -> String {
    let parts: Vec<String> = entries.iter().map(|p| p.display().to_string()).collect();
    parts.join(&changerun_loader::CLASSPATH_SEPARATOR.to_string())
}

#[test]
fn plain_directories_and_archives_pass_through() {
    let dir = TempDir::new("plain");
    let lib_dir = dir.join("lib");
    fs::create_dir_all(&lib_dir).unwrap();
    let jar = dir.join("driver.jar");
    write_archive(&jar, &[("com/Driver.class", b"class bytes")]);

    let context = build_loading_context(Some(&classpath(&[&lib_dir, &jar])), true).unwrap();

    assert_eq!(
        context.resources(),
        &[
            Resource::Path(lib_dir.clone()),
            Resource::Path(jar.clone()),
        ]
    );
    assert!(context.includes_system_classpath());
    assert!(context.scratch_dir().is_none());
}

#[test]
fn missing_entry_fails_construction() {
    let dir = TempDir::new("missing");
    let ghost = dir.join("no-such-thing.jar");

    let err = build_loading_context(Some(&classpath(&[&ghost])), true).unwrap_err();
    match err {
        LoaderError::PathDoesNotExist(path) => {
            assert!(path.display().to_string().contains("no-such-thing.jar"));
        }
        other => panic!("expected PathDoesNotExist, got: {other}"),
    }
}

#[test]
fn web_archive_yields_classes_dir_plus_extracted_libraries() {
    let dir = TempDir::new("war");
    let war = dir.join("app.war");
    write_archive(
        &war,
        &[
            ("WEB-INF/web.xml", b"<web-app/>"),
            ("WEB-INF/classes/com/App.class", b"app class"),
            ("WEB-INF/lib/first.jar", b"first library bytes"),
            ("WEB-INF/lib/second.jar", b"second library bytes"),
            ("WEB-INF/lib/readme.txt", b"not a library"),
            ("static/logo.png", b"image"),
        ],
    );

    let context = build_loading_context(Some(&classpath(&[&war])), true).unwrap();
    let resources = context.resources();

    // One locator for the classes directory, one per embedded .jar.
    assert_eq!(resources.len(), 3);
    assert_eq!(
        resources[0],
        Resource::Archive {
            file: war.clone(),
            subpath: "WEB-INF/classes/".to_string(),
        }
    );

    let extracted: Vec<&Resource> = resources[1..].iter().collect();
    let contents: Vec<Vec<u8>> = extracted
        .iter()
        .map(|resource| match resource {
            Resource::Archive { file, subpath } => {
                assert!(subpath.is_empty());
                fs::read(file).unwrap()
            }
            other => panic!("expected extracted archive, got: {other}"),
        })
        .collect();

    // Byte-for-byte copies, in container order.
    assert_eq!(contents[0], b"first library bytes");
    assert_eq!(contents[1], b"second library bytes");
}

#[test]
fn enterprise_archive_recurses_into_contained_web_archives() {
    let dir = TempDir::new("ear");

    // Build an inner war in memory first, then embed it in the ear.
    let inner_war_path = dir.join("inner.war");
    write_archive(
        &inner_war_path,
        &[("WEB-INF/lib/nested.jar", b"nested library bytes")],
    );
    let inner_war_bytes = fs::read(&inner_war_path).unwrap();

    let ear = dir.join("app.ear");
    write_archive(
        &ear,
        &[
            ("lib/shared.jar", b"shared library bytes"),
            ("web/inner.war", &inner_war_bytes),
            ("META-INF/application.xml", b"<application/>"),
        ],
    );

    let context = build_loading_context(Some(&classpath(&[&ear])), true).unwrap();
    let resources = context.resources();

    // shared.jar, then the extracted war's classes dir, then nested.jar.
    assert_eq!(resources.len(), 3);

    match &resources[0] {
        Resource::Archive { file, subpath } => {
            assert!(subpath.is_empty());
            assert_eq!(fs::read(file).unwrap(), b"shared library bytes");
        }
        other => panic!("expected extracted library, got: {other}"),
    }

    match &resources[1] {
        Resource::Archive { file, subpath } => {
            assert_eq!(subpath, "WEB-INF/classes/");
            // The war itself was extracted to scratch storage.
            assert!(file.starts_with(context.scratch_dir().unwrap()));
        }
        other => panic!("expected war classes locator, got: {other}"),
    }

    match &resources[2] {
        Resource::Archive { file, subpath } => {
            assert!(subpath.is_empty());
            assert_eq!(fs::read(file).unwrap(), b"nested library bytes");
        }
        other => panic!("expected nested library, got: {other}"),
    }
}

#[test]
fn extracted_files_are_removed_when_context_drops() {
    let dir = TempDir::new("cleanup");
    let war = dir.join("app.war");
    write_archive(&war, &[("WEB-INF/lib/only.jar", b"library bytes")]);

    let extracted_path;
    {
        let context = build_loading_context(Some(&classpath(&[&war])), true).unwrap();
        extracted_path = match &context.resources()[1] {
            Resource::Archive { file, .. } => file.clone(),
            other => panic!("expected extracted library, got: {other}"),
        };
        assert!(extracted_path.exists());
    }
    assert!(!extracted_path.exists());
}

#[test]
fn corrupt_container_is_a_hard_error() {
    let dir = TempDir::new("corrupt");
    let war = dir.join("broken.war");
    fs::write(&war, b"this is not a zip container").unwrap();

    let err = build_loading_context(Some(&classpath(&[&war])), true).unwrap_err();
    assert!(matches!(err, LoaderError::Archive { .. }));
}

#[test]
fn empty_classpath_yields_empty_context() {
    let context = build_loading_context(None, false).unwrap();
    assert!(context.resources().is_empty());
    assert!(!context.includes_system_classpath());
}
