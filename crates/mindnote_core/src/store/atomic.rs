use super::{StoreError, StoreResult};
use log::debug;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Replaces `path` with `contents` via a synced sibling temp file and rename.
///
/// # Errors
/// - Returns `StoreError::Write` when the temp file cannot be written or
///   renamed; the temp file is removed and the target is left untouched.
pub fn write_atomically(path: &Path, contents: &str) -> StoreResult<()> {
    let temp_path = temp_sibling(path);

    if let Err(source) = write_and_sync(&temp_path, contents) {
        let _ = fs::remove_file(&temp_path);
        return Err(StoreError::Write {
            path: path.to_path_buf(),
            source,
        });
    }
    if let Err(source) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(StoreError::Write {
            path: path.to_path_buf(),
            source,
        });
    }

    debug!(
        "event=document_write module=store status=ok path={} bytes={}",
        path.display(),
        contents.len()
    );
    Ok(())
}

fn write_and_sync(path: &Path, contents: &str) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(contents.as_bytes())?;
    file.flush()?;
    file.sync_all()
}

fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(path.file_name().unwrap_or_default());
    name.push(format!(".{}.tmp", Uuid::new_v4().simple()));
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::{temp_sibling, write_atomically};
    use crate::store::StoreError;
    use std::fs;

    #[test]
    fn replaces_existing_file_without_leftovers() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let target = dir.path().join("config.md");
        fs::write(&target, "old").expect("fixture file should be written");

        write_atomically(&target, "new").expect("atomic write should succeed");

        let text = fs::read_to_string(&target).expect("target should be readable after rename");
        assert_eq!(text, "new");
        let entries = fs::read_dir(dir.path()).expect("temp dir should be listable");
        assert_eq!(entries.count(), 1);
    }

    #[test]
    fn missing_parent_directory_is_reported_with_target_path() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let target = dir.path().join("missing").join("config.md");

        let err = write_atomically(&target, "text")
            .expect_err("write into a missing directory should fail");

        assert!(matches!(err, StoreError::Write { .. }));
        assert_eq!(err.path(), &target);
        assert!(!target.exists());
    }

    #[test]
    fn temp_file_is_hidden_sibling() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let target = dir.path().join("config.md");
        let temp = temp_sibling(&target);

        assert_eq!(temp.parent(), target.parent());
        let name = temp
            .file_name()
            .expect("temp sibling should have a file name")
            .to_string_lossy()
            .into_owned();
        assert!(name.starts_with(".config.md."));
        assert!(name.ends_with(".tmp"));
    }
}
