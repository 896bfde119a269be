//! Configuration use-case service.
//!
//! # Responsibility
//! - Provide load/save entry points that never fail the caller.
//! - Apply startup overrides and pick the active storage location.
//!
//! # Invariants
//! - Store errors are logged here and never propagated.
//! - The repository document is touched only for an active MindNote
//!   repository-mode location.
//! - Active location precedence: explicit location, configuration file,
//!   `MINDNOTE_REPOSITORY`, then `~/mindnote-repository` when it exists.

use crate::config::configuration::Configuration;
use crate::config::env::{self, DEFAULT_REPOSITORY_PATH};
use crate::config::location_resolver::{FsLocationResolver, LocationResolver};
use crate::config::repository_configuration::RepositoryConfiguration;
use crate::config::settings::UiTheme;
use crate::store::{ConfigStore, FsConfigStore};
use log::{error, info, warn};
use std::path::{Path, PathBuf};

/// Values supplied on the command line, applied around `load`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StartupOverrides {
    /// Configuration file to use instead of `$HOME/.mindnote.md`.
    pub config_path: Option<PathBuf>,
    /// Location that becomes active regardless of the configuration file.
    pub location: Option<String>,
    /// Theme for this session; persisted only if the caller saves.
    pub theme: Option<UiTheme>,
}

/// Use-case service over a document store and a location resolver.
pub struct ConfigService<S: ConfigStore, R: LocationResolver> {
    store: S,
    resolver: R,
    repository_from_env: Option<String>,
}

impl ConfigService<FsConfigStore, FsLocationResolver> {
    /// Filesystem service configured from `HOME` and `MINDNOTE_REPOSITORY`.
    pub fn from_env() -> Self {
        Self::new(FsConfigStore::new(), FsLocationResolver::new(env::user_home()))
            .with_repository_from_env(env::repository_from_env())
    }
}

impl<S: ConfigStore, R: LocationResolver> ConfigService<S, R> {
    pub fn new(store: S, resolver: R) -> Self {
        Self {
            store,
            resolver,
            repository_from_env: None,
        }
    }

    /// Sets the location used when neither CLI nor file name an active one.
    pub fn with_repository_from_env(mut self, path: Option<String>) -> Self {
        self.repository_from_env = path;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Loads the global document (and the active repository document).
    ///
    /// Returns `true` when the global document existed and was parsed.
    /// Otherwise `config` keeps compiled-in defaults.
    pub fn load(&self, config: &mut Configuration) -> bool {
        let path = config.config_file_path().to_path_buf();
        match self.store.load_configuration(&path, config, &self.resolver) {
            Ok(true) => {
                self.load_repository_configuration(config);
                true
            }
            Ok(false) => {
                info!(
                    "event=config_load module=service status=defaults reason=missing path={}",
                    path.display()
                );
                false
            }
            Err(err) => {
                error!(
                    "event=config_load module=service status=error path={} error={}",
                    path.display(),
                    err
                );
                false
            }
        }
    }

    /// Reloads organizers of the active location.
    ///
    /// A repository without its document gets the default organizer.
    pub fn load_repository_configuration(&self, config: &mut Configuration) {
        let (Some(path), Some(memory_path)) =
            (config.repository_config_file_path(), config.memory_path())
        else {
            config.set_repository_configuration(RepositoryConfiguration::new());
            return;
        };

        let repository_configuration =
            match self.store.load_repository_configuration(&path, &memory_path) {
                Ok(Some(loaded)) => loaded,
                Ok(None) => {
                    info!(
                        "event=repository_config_load module=service status=defaults reason=missing path={}",
                        path.display()
                    );
                    RepositoryConfiguration::with_default_organizer()
                }
                Err(err) => {
                    error!(
                        "event=repository_config_load module=service status=error path={} error={}",
                        path.display(),
                        err
                    );
                    RepositoryConfiguration::with_default_organizer()
                }
            };
        config.set_repository_configuration(repository_configuration);
    }

    /// Writes the global document and, when applicable, the repository document.
    pub fn save(&self, config: &Configuration) {
        self.save_to(config.config_file_path(), Some(config));

        if let Some(path) = config.repository_config_file_path() {
            if let Err(err) = self
                .store
                .save_repository_configuration(&path, Some(config.repository_configuration()))
            {
                error!(
                    "event=repository_config_save module=service status=error path={} error={}",
                    path.display(),
                    err
                );
            }
        }
    }

    /// Writes the global document to `path`; `None` writes the factory document.
    pub fn save_to(&self, path: &Path, config: Option<&Configuration>) {
        if let Err(err) = self.store.save_configuration(path, config) {
            error!(
                "event=config_save module=service status=error path={} error={}",
                path.display(),
                err
            );
        }
    }

    /// Applies overrides, loads, and selects the active location.
    ///
    /// Returns the result of `load`.
    pub fn startup(&self, config: &mut Configuration, overrides: &StartupOverrides) -> bool {
        if let Some(path) = &overrides.config_path {
            config.set_config_file_path(path.clone());
        }

        let loaded = self.load(config);

        if let Some(theme) = overrides.theme {
            config.app.ui_theme = theme;
        }

        let before = config.active_location_key().map(str::to_string);
        let selected = self.find_or_create_default_location(config, overrides.location.as_deref());
        if selected != before {
            self.load_repository_configuration(config);
        }

        loaded
    }

    /// Makes the best available location active and returns its key.
    ///
    /// Only existing directories or files are adopted; nothing is created.
    pub fn find_or_create_default_location(
        &self,
        config: &mut Configuration,
        explicit: Option<&str>,
    ) -> Option<String> {
        if let Some(path) = explicit {
            if let Some(key) = self.activate(config, path, "cli") {
                return Some(key);
            }
        }
        if let Some(key) = config.active_location_key() {
            return Some(key.to_string());
        }
        if let Some(path) = self.repository_from_env.as_deref() {
            if let Some(key) = self.activate(config, path, "env") {
                return Some(key);
            }
        }
        if let Some(key) = self.activate(config, DEFAULT_REPOSITORY_PATH, "default") {
            return Some(key);
        }

        info!("event=location_select module=service status=none");
        None
    }

    fn activate(&self, config: &mut Configuration, path: &str, source: &str) -> Option<String> {
        let Some(location) = self.resolver.resolve(path) else {
            if source != "default" {
                warn!(
                    "event=location_select module=service status=skip source={} reason=not_found path={}",
                    source, path
                );
            }
            return None;
        };
        let key = config.add_location(location);
        if let Err(err) = config.set_active_location(&key) {
            error!(
                "event=location_select module=service status=error source={} error={}",
                source, err
            );
            return None;
        }
        info!(
            "event=location_select module=service status=ok source={} path={}",
            source, key
        );
        Some(key)
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigService, StartupOverrides};
    use crate::config::configuration::Configuration;
    use crate::config::location_resolver::LocationResolver;
    use crate::config::settings::UiTheme;
    use crate::model::location::{Location, LocationKind};
    use crate::store::FsConfigStore;

    struct KnownPaths(Vec<&'static str>);

    impl LocationResolver for KnownPaths {
        fn resolve(&self, path: &str) -> Option<Location> {
            self.0
                .iter()
                .any(|known| *known == path)
                .then(|| Location::repository(path, LocationKind::Markdown))
        }
    }

    fn service(known: Vec<&'static str>) -> ConfigService<FsConfigStore, KnownPaths> {
        ConfigService::new(FsConfigStore::new(), KnownPaths(known))
    }

    #[test]
    fn explicit_location_wins_over_environment() {
        let service = service(vec!["/cli", "/env"]).with_repository_from_env(Some("/env".into()));
        let mut config = Configuration::with_home(None);
        let key = service.find_or_create_default_location(&mut config, Some("/cli"));
        assert_eq!(key.as_deref(), Some("/cli"));
    }

    #[test]
    fn unresolved_explicit_location_falls_back_to_environment() {
        let service = service(vec!["/env"]).with_repository_from_env(Some("/env".into()));
        let mut config = Configuration::with_home(None);
        let key = service.find_or_create_default_location(&mut config, Some("/gone"));
        assert_eq!(key.as_deref(), Some("/env"));
    }

    #[test]
    fn default_repository_is_last_resort() {
        let service = service(vec!["~/mindnote-repository"]);
        let mut config = Configuration::with_home(None);
        let key = service.find_or_create_default_location(&mut config, None);
        assert_eq!(key.as_deref(), Some("~/mindnote-repository"));
    }

    #[test]
    fn nothing_resolvable_leaves_no_active_location() {
        let service = service(vec![]).with_repository_from_env(Some("/env".into()));
        let mut config = Configuration::with_home(None);
        assert_eq!(service.find_or_create_default_location(&mut config, None), None);
        assert!(!config.has_active_location());
    }

    #[test]
    fn startup_applies_config_path_and_theme() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let path = dir.path().join("custom.md");
        let service = service(vec![]);
        let mut config = Configuration::with_home(None);
        let overrides = StartupOverrides {
            config_path: Some(path.clone()),
            location: None,
            theme: Some(UiTheme::Black),
        };

        let loaded = service.startup(&mut config, &overrides);

        assert!(!loaded);
        assert_eq!(config.config_file_path(), path.as_path());
        assert_eq!(config.app.ui_theme, UiTheme::Black);
    }
}
