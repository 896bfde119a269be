//! Storage location (knowledge repository) descriptor.
//!
//! # Invariants
//! - `path` is the stable identity used as the key in `Configuration`.
//! - `file` is set only in `LocationMode::File`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the subdirectory that marks a MindNote-structured location.
pub const DIRNAME_MEMORY: &str = "memory";
/// Name of the subdirectory holding forgotten (trashed) notebooks.
pub const DIRNAME_LIMBO: &str = "limbo";

/// Structure of the storage location contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationKind {
    /// Directory with a `memory/` subdirectory and metadata-enriched notebooks.
    MindNote,
    /// Any directory tree (or file) of plain Markdown.
    Markdown,
}

/// Whether the whole location or a single file is managed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationMode {
    Repository,
    File,
}

/// One known storage location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Full path as written in the configuration document.
    pub path: String,
    /// Directory part; equals `path` in repository mode.
    pub dir: PathBuf,
    /// File name in single-file mode.
    pub file: Option<String>,
    pub kind: LocationKind,
    pub mode: LocationMode,
    pub read_only: bool,
}

impl Location {
    /// Creates a repository-mode location rooted at `path`.
    pub fn repository(path: impl Into<String>, kind: LocationKind) -> Self {
        let path = path.into();
        Self {
            dir: PathBuf::from(path.as_str()),
            path,
            file: None,
            kind,
            mode: LocationMode::Repository,
            read_only: false,
        }
    }

    /// Creates a single-file location for `dir`/`file`.
    pub fn single_file(dir: impl Into<PathBuf>, file: impl Into<String>, kind: LocationKind) -> Self {
        let dir = dir.into();
        let file = file.into();
        let path = dir.join(file.as_str()).to_string_lossy().into_owned();
        Self {
            path,
            dir,
            file: Some(file),
            kind,
            mode: LocationMode::File,
            read_only: false,
        }
    }

    /// Returns whether this location keeps its own repository configuration.
    pub fn has_repository_configuration(&self) -> bool {
        self.kind == LocationKind::MindNote && self.mode == LocationMode::Repository
    }

    pub fn memory_path(&self) -> PathBuf {
        self.dir.join(DIRNAME_MEMORY)
    }

    pub fn limbo_path(&self) -> PathBuf {
        self.dir.join(DIRNAME_LIMBO)
    }

    pub fn dir(&self) -> &Path {
        self.dir.as_path()
    }
}

#[cfg(test)]
mod tests {
    use super::{Location, LocationKind, LocationMode};
    use std::path::PathBuf;

    #[test]
    fn single_file_location_keys_by_full_path() {
        let location = Location::single_file("/tmp", "notes.md", LocationKind::Markdown);
        assert_eq!(location.path, "/tmp/notes.md");
        assert_eq!(location.dir, PathBuf::from("/tmp"));
        assert_eq!(location.mode, LocationMode::File);
        assert!(!location.has_repository_configuration());
    }

    #[test]
    fn only_mindnote_repositories_keep_repository_configuration() {
        assert!(Location::repository("/kb", LocationKind::MindNote).has_repository_configuration());
        assert!(!Location::repository("/md", LocationKind::Markdown).has_repository_configuration());
    }

    #[test]
    fn serializes_with_snake_case_tags() {
        let location = Location::repository("/kb", LocationKind::MindNote);
        let value = serde_json::to_value(&location).expect("value should serialize");
        assert_eq!(value["kind"], "mind_note");
        assert_eq!(value["mode"], "repository");
        assert_eq!(value["dir"], "/kb");
    }
}
