//! Storage location resolution seam.
//!
//! # Responsibility
//! - Turn a configured path into a typed `Location`.
//! - Classify locations by content (MindNote structure vs plain Markdown).
//!
//! # Invariants
//! - Non-existent paths never resolve.
//! - Resolution does not create anything on disk.

use super::env::expand_home;
use crate::model::location::{Location, LocationKind, DIRNAME_MEMORY};
use std::path::{Path, PathBuf};

/// Resolves configured paths to locations.
pub trait LocationResolver {
    fn resolve(&self, path: &str) -> Option<Location>;
}

/// Filesystem-backed resolver.
#[derive(Debug, Clone, Default)]
pub struct FsLocationResolver {
    home: Option<PathBuf>,
}

impl FsLocationResolver {
    pub fn new(home: Option<PathBuf>) -> Self {
        Self { home }
    }
}

impl LocationResolver for FsLocationResolver {
    fn resolve(&self, path: &str) -> Option<Location> {
        let trimmed = path.trim();
        if trimmed.is_empty() {
            return None;
        }
        let expanded = expand_home(trimmed, self.home.as_deref());
        if expanded.is_dir() {
            let kind = if is_mindnote_repository(&expanded) {
                LocationKind::MindNote
            } else {
                LocationKind::Markdown
            };
            return Some(Location::repository(
                expanded.to_string_lossy().into_owned(),
                kind,
            ));
        }
        if expanded.is_file() {
            let dir = expanded
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default();
            let file = expanded.file_name()?.to_string_lossy().into_owned();
            // Kind of a single file is only known after its metadata is parsed.
            return Some(Location::single_file(dir, file, LocationKind::MindNote));
        }
        None
    }
}

/// Returns whether `directory` has the MindNote `memory/` structure.
pub fn is_mindnote_repository(directory: &Path) -> bool {
    directory.join(DIRNAME_MEMORY).is_dir()
}
