//! Capability-scoped file access for instance files and run reports.
//!
//! Paths are UTF-8 ([`camino`]) and every operation goes through a
//! [`cap_std`] directory handle. Absolute paths are resolved from their
//! root (or drive prefix); relative paths from the working directory.
//! Components that climb out of the anchor (`..`) are refused by the
//! capability sandbox.
#![forbid(unsafe_code)]

use std::io::{self, Read, Write};

use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};

/// Read the whole file at `path` into a string.
///
/// # Errors
/// Returns the underlying IO error when the file cannot be opened or is not
/// valid UTF-8.
pub fn read_to_string(path: &Utf8Path) -> io::Result<String> {
    let mut file = fs_utf8::File::open_ambient(path, ambient_authority())?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Whether `path` names an existing regular file.
///
/// A missing file or a missing parent directory yields `Ok(false)`.
///
/// # Errors
/// Returns IO errors other than [`io::ErrorKind::NotFound`].
pub fn is_regular_file(path: &Utf8Path) -> io::Result<bool> {
    let (dir, name) = match containing_dir(path) {
        Ok(found) => found,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(err) => return Err(err),
    };
    match dir.metadata(name.as_str()) {
        Ok(meta) => Ok(meta.is_file()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(err),
    }
}

/// Create `path` and every missing directory above it.
///
/// # Errors
/// Returns the underlying IO error when a directory cannot be created.
pub fn create_dir_all(path: &Utf8Path) -> io::Result<()> {
    let (anchor, relative) = anchored(path)?;
    if relative.as_str().is_empty() {
        return Ok(());
    }
    anchor.create_dir_all(&relative)
}

/// Write `contents` to `path`, creating parent directories as needed and
/// replacing any existing file.
///
/// # Errors
/// Returns the underlying IO error when the directories or the file cannot
/// be created or written.
pub fn write_file(path: &Utf8Path, contents: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        create_dir_all(parent)?;
    }
    let (dir, name) = containing_dir(path)?;
    let mut file = dir.create(name.as_str())?;
    file.write_all(contents)?;
    file.flush()
}

/// Open the directory holding `path` and return it with the file name.
fn containing_dir(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, String)> {
    let name = path.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{path} does not name a file"),
        )
    })?;
    let parent = path
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, name.to_owned()))
}

/// Split `path` into an ambient directory handle for its anchor and the
/// remaining relative components.
fn anchored(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, Utf8PathBuf)> {
    let is_anchor = |component: &Utf8Component<'_>| {
        matches!(component, Utf8Component::Prefix(_) | Utf8Component::RootDir)
    };
    let root: Utf8PathBuf = path.components().take_while(is_anchor).collect();
    let relative: Utf8PathBuf = path
        .components()
        .skip_while(is_anchor)
        .filter(|component| !matches!(component, Utf8Component::CurDir))
        .collect();
    let anchor = if root.as_str().is_empty() {
        Utf8PathBuf::from(".")
    } else {
        root
    };
    let dir = fs_utf8::Dir::open_ambient_dir(&anchor, ambient_authority())?;
    Ok((dir, relative))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    #[fixture]
    fn scratch() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn utf8(dir: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("temp dir is UTF-8")
    }

    #[rstest]
    fn write_creates_missing_parents(scratch: TempDir) {
        let target = utf8(&scratch).join("runs/c101/report.json");
        write_file(&target, b"{}").expect("write report");
        assert_eq!(read_to_string(&target).expect("read back"), "{}");
    }

    #[rstest]
    fn write_replaces_existing_contents(scratch: TempDir) {
        let target = utf8(&scratch).join("report.json");
        write_file(&target, b"first run").expect("first write");
        write_file(&target, b"second").expect("second write");
        assert_eq!(read_to_string(&target).expect("read back"), "second");
    }

    #[rstest]
    fn regular_file_detection(scratch: TempDir) {
        let root = utf8(&scratch);
        let file = root.join("instance.txt");
        write_file(&file, b"C101").expect("write instance");
        assert!(is_regular_file(&file).expect("probe file"));
        assert!(!is_regular_file(&root).expect("probe directory"));
        assert!(!is_regular_file(&root.join("missing.txt")).expect("probe missing"));
        assert!(!is_regular_file(&root.join("absent/missing.txt")).expect("probe missing parent"));
    }

    #[rstest]
    fn create_dir_all_is_idempotent(scratch: TempDir) {
        let nested = utf8(&scratch).join("a/b/c");
        create_dir_all(&nested).expect("first create");
        create_dir_all(&nested).expect("second create");
        assert!(nested.as_std_path().is_dir());
    }

    #[rstest]
    fn reading_a_missing_file_reports_not_found(scratch: TempDir) {
        let err = read_to_string(&utf8(&scratch).join("nope.txt")).expect_err("file is absent");
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
