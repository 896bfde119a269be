//! Configuration document store contracts and filesystem implementation.
//!
//! # Responsibility
//! - Map document paths to parsed models and models to written documents.
//! - Keep I/O details out of the service facade.
//!
//! # Invariants
//! - `NotFound` on read maps to `Ok(false)` / `Ok(None)`, never an error.
//! - Every write goes through `write_atomically`.

use super::{write_atomically, StoreError, StoreResult};
use crate::config::configuration::Configuration;
use crate::config::location_resolver::LocationResolver;
use crate::config::repository_configuration::RepositoryConfiguration;
use crate::document::{read_document, Section};
use crate::markdown::{
    parse_configuration, parse_repository_configuration, render_configuration,
    render_repository_configuration,
};
use log::info;
use std::io;
use std::path::Path;

/// Persistence contract for configuration documents.
pub trait ConfigStore {
    /// Parses the global document at `path` into `config`.
    ///
    /// Returns `Ok(false)` (leaving `config` untouched) when the file is missing.
    fn load_configuration(
        &self,
        path: &Path,
        config: &mut Configuration,
        resolver: &dyn LocationResolver,
    ) -> StoreResult<bool>;

    /// Writes the global document; `None` writes compiled-in defaults.
    fn save_configuration(&self, path: &Path, config: Option<&Configuration>) -> StoreResult<()>;

    /// Parses the repository document at `path`; `Ok(None)` when missing.
    fn load_repository_configuration(
        &self,
        path: &Path,
        key_directory: &Path,
    ) -> StoreResult<Option<RepositoryConfiguration>>;

    /// Writes the repository document; `None` writes the default organizer.
    fn save_repository_configuration(
        &self,
        path: &Path,
        config: Option<&RepositoryConfiguration>,
    ) -> StoreResult<()>;
}

/// Filesystem-backed store.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsConfigStore;

impl FsConfigStore {
    pub fn new() -> Self {
        Self
    }
}

impl ConfigStore for FsConfigStore {
    fn load_configuration(
        &self,
        path: &Path,
        config: &mut Configuration,
        resolver: &dyn LocationResolver,
    ) -> StoreResult<bool> {
        let Some(sections) = read_sections(path)? else {
            return Ok(false);
        };
        parse_configuration(sections, config, resolver);
        info!(
            "event=config_load module=store status=ok path={} locations={}",
            path.display(),
            config.locations().len()
        );
        Ok(true)
    }

    fn save_configuration(&self, path: &Path, config: Option<&Configuration>) -> StoreResult<()> {
        write_atomically(path, &render_configuration(config))?;
        info!(
            "event=config_save module=store status=ok path={} defaults={}",
            path.display(),
            config.is_none()
        );
        Ok(())
    }

    fn load_repository_configuration(
        &self,
        path: &Path,
        key_directory: &Path,
    ) -> StoreResult<Option<RepositoryConfiguration>> {
        let Some(sections) = read_sections(path)? else {
            return Ok(None);
        };
        let config = parse_repository_configuration(sections, key_directory);
        info!(
            "event=repository_config_load module=store status=ok path={} organizers={}",
            path.display(),
            config.len()
        );
        Ok(Some(config))
    }

    fn save_repository_configuration(
        &self,
        path: &Path,
        config: Option<&RepositoryConfiguration>,
    ) -> StoreResult<()> {
        write_atomically(path, &render_repository_configuration(config))?;
        info!(
            "event=repository_config_save module=store status=ok path={}",
            path.display()
        );
        Ok(())
    }
}

fn read_sections(path: &Path) -> StoreResult<Option<Vec<Section>>> {
    match read_document(path) {
        Ok(sections) => Ok(Some(sections)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            info!(
                "event=document_read module=store status=missing path={}",
                path.display()
            );
            Ok(None)
        }
        Err(source) => Err(StoreError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}
