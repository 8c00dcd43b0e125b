//! Capability-based file access for the maraude command-line tools.
//!
//! Request files are read and report files written through `cap-std`
//! directory handles opened with ambient authority; paths are `camino`
//! UTF-8 paths throughout.
#![forbid(unsafe_code)]

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};
use std::io;
use std::path::Component;

/// Open a request file for reading.
pub fn open_utf8_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    fs_utf8::File::open_ambient(path, ambient_authority())
}

/// Open the directory holding `path` and return it with the file name.
pub fn open_dir_and_file(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, String)> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::other(format!("{path} does not name a file")))?
        .to_owned();
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, file_name))
}

/// Whether `path` exists and is a regular file.
///
/// A missing file or parent directory surfaces as
/// [`io::ErrorKind::NotFound`].
pub fn file_is_file(path: &Utf8Path) -> io::Result<bool> {
    let (dir, name) = open_dir_and_file(path)?;
    dir.metadata(name.as_str()).map(|meta| meta.is_file())
}

/// Create (or truncate) the report file at `path`, creating missing parent
/// directories first.
pub fn create_utf8_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    ensure_parent_dir(path)?;
    let (dir, name) = open_dir_and_file(path)?;
    dir.create(name.as_str())
}

/// Create every missing directory above `path`.
pub fn ensure_parent_dir(path: &Utf8Path) -> io::Result<()> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    if parent.as_str().is_empty() || parent == Utf8Path::new("/") {
        return Ok(());
    }
    let (base, relative) = split_anchor(parent)?;
    if relative.as_str().is_empty() {
        return Ok(());
    }
    let dir = fs_utf8::Dir::open_ambient_dir(&base, ambient_authority())?;
    dir.create_dir_all(&relative)
}

/// Split `parent` into the directory cap-std can open ambiently (the
/// filesystem root, a Windows prefix root or `.`) and the remainder.
fn split_anchor(parent: &Utf8Path) -> io::Result<(Utf8PathBuf, Utf8PathBuf)> {
    let std_parent = parent.as_std_path();
    let base = match std_parent.components().next() {
        Some(Component::Prefix(prefix)) => {
            let prefix = prefix
                .as_os_str()
                .to_str()
                .ok_or_else(|| io::Error::other("non-UTF-8 path prefix"))?;
            Utf8PathBuf::from(prefix).join(std::path::MAIN_SEPARATOR.to_string())
        }
        Some(Component::RootDir) => Utf8PathBuf::from(std::path::MAIN_SEPARATOR.to_string()),
        _ => return Ok((Utf8PathBuf::from("."), parent.to_path_buf())),
    };
    let relative = parent
        .strip_prefix(&base)
        .or_else(|_| parent.strip_prefix(base.as_str().trim_end_matches(['/', '\\'])))
        .map_err(|_| io::Error::other(format!("cannot strip {base} from {parent}")))?
        .to_path_buf();
    Ok((base, relative))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::{Read, Write};
    use tempfile::TempDir;

    fn workspace() -> (TempDir, Utf8PathBuf) {
        let tmp = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 tempdir");
        (tmp, root)
    }

    #[rstest]
    fn created_reports_can_be_read_back() {
        let (_tmp, root) = workspace();
        let path = root.join("reports").join("2024").join("plan.json");
        let mut file = create_utf8_file(&path).expect("create report");
        file.write_all(b"{}").expect("write report");

        let mut contents = String::new();
        open_utf8_file(&path)
            .expect("open report")
            .read_to_string(&mut contents)
            .expect("read report");
        assert_eq!(contents, "{}");
        assert!(file_is_file(&path).expect("inspect report"));
    }

    #[rstest]
    fn directories_are_not_files() {
        let (_tmp, root) = workspace();
        std::fs::create_dir(root.join("request.json")).expect("create directory");
        assert!(!file_is_file(&root.join("request.json")).expect("inspect"));
    }

    #[rstest]
    fn missing_files_report_not_found() {
        let (_tmp, root) = workspace();
        let err = file_is_file(&root.join("absent.json")).expect_err("missing");
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[rstest]
    #[case("plan.json", ".", "plan.json")]
    #[case("out/plan.json", ".", "out/plan.json")]
    fn relative_parents_anchor_at_current_dir(
        #[case] parent: &str,
        #[case] base: &str,
        #[case] relative: &str,
    ) {
        let (found_base, found_relative) = split_anchor(Utf8Path::new(parent)).expect("split");
        assert_eq!(found_base, Utf8PathBuf::from(base));
        assert_eq!(found_relative, Utf8PathBuf::from(relative));
    }

    #[cfg(unix)]
    #[rstest]
    fn absolute_parents_anchor_at_root() {
        let (base, relative) = split_anchor(Utf8Path::new("/var/tmp")).expect("split");
        assert_eq!(base, Utf8PathBuf::from("/"));
        assert_eq!(relative, Utf8PathBuf::from("var/tmp"));
    }
}
