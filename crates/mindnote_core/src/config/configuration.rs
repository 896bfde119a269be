//! Global configuration context.
//!
//! # Responsibility
//! - Aggregate scalar settings, known storage locations and the active one.
//! - Own the repository configuration of the active location.
//! - Derive paths (config file, memory, limbo, repository document).
//!
//! # Invariants
//! - `active_location`, when set, is a key of `locations`.
//! - Changing the active location replaces the repository configuration.
//! - `clear()` restores every persisted value to its compiled-in default.

use super::env::{self, FILENAME_REPOSITORY_CONFIGURATION};
use super::repository_configuration::RepositoryConfiguration;
use super::settings::{ApplicationSettings, MindSettings, MindState};
use super::ConfigError;
use crate::model::location::Location;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    /// Persisted in the `Mind` section.
    pub mind: MindSettings,
    /// Persisted in the `Application` section.
    pub app: ApplicationSettings,
    config_file_path: PathBuf,
    user_home: Option<PathBuf>,
    editor_from_env: Option<String>,
    mind_state: MindState,
    locations: BTreeMap<String, Location>,
    active_location: Option<String>,
    repository_configuration: RepositoryConfiguration,
}

impl Configuration {
    /// Creates a configuration with compiled-in defaults and paths from `HOME`.
    pub fn new() -> Self {
        let mut config = Self::with_home(env::user_home());
        config.editor_from_env = env::editor_from_env();
        config
    }

    /// Creates a configuration with compiled-in defaults for a given home.
    pub fn with_home(user_home: Option<PathBuf>) -> Self {
        Self {
            mind: MindSettings::default(),
            app: ApplicationSettings::default(),
            config_file_path: env::default_config_file_path(user_home.as_deref()),
            user_home,
            editor_from_env: None,
            mind_state: MindState::Sleeping,
            locations: BTreeMap::new(),
            active_location: None,
            repository_configuration: RepositoryConfiguration::new(),
        }
    }

    /// Resets persisted values and releases all locations.
    ///
    /// Runtime values (config file path, home, current mind state) are kept.
    pub fn clear(&mut self) {
        self.mind = MindSettings::default();
        self.app = ApplicationSettings::default();
        self.locations.clear();
        self.active_location = None;
        self.repository_configuration = RepositoryConfiguration::new();
    }

    pub fn config_file_path(&self) -> &Path {
        self.config_file_path.as_path()
    }

    pub fn set_config_file_path(&mut self, path: impl Into<PathBuf>) {
        self.config_file_path = path.into();
    }

    pub fn user_home(&self) -> Option<&Path> {
        self.user_home.as_deref()
    }

    /// Editor command from `MINDNOTE_EDITOR`, if any.
    pub fn editor_from_env(&self) -> Option<&str> {
        self.editor_from_env.as_deref()
    }

    /// Editor to launch: configured command first, then the environment.
    pub fn external_editor(&self) -> Option<&str> {
        if self.app.editor_external_command.is_empty() {
            self.editor_from_env()
        } else {
            Some(self.app.editor_external_command.as_str())
        }
    }

    /// Current (runtime) mind state; not persisted.
    pub fn mind_state(&self) -> MindState {
        self.mind_state
    }

    pub fn set_mind_state(&mut self, state: MindState) {
        self.mind_state = state;
    }

    /// Registers a location (replacing one with the same path) and returns its key.
    pub fn add_location(&mut self, location: Location) -> String {
        let key = location.path.clone();
        self.locations.insert(key.clone(), location);
        key
    }

    /// Forgets a location; clears the active one when it is removed.
    pub fn remove_location(&mut self, key: &str) -> Option<Location> {
        let removed = self.locations.remove(key)?;
        if self.active_location.as_deref() == Some(key) {
            self.clear_active_location();
        }
        Some(removed)
    }

    pub fn locations(&self) -> &BTreeMap<String, Location> {
        &self.locations
    }

    pub fn location(&self, key: &str) -> Option<&Location> {
        self.locations.get(key)
    }

    /// Marks a registered location as active.
    ///
    /// # Errors
    /// - Returns `UnknownLocation` when `key` is not registered.
    pub fn set_active_location(&mut self, key: &str) -> Result<(), ConfigError> {
        if !self.locations.contains_key(key) {
            return Err(ConfigError::UnknownLocation(key.to_string()));
        }
        if self.active_location.as_deref() != Some(key) {
            self.active_location = Some(key.to_string());
            self.repository_configuration = RepositoryConfiguration::new();
        }
        Ok(())
    }

    /// Restores the "no active location" state.
    pub fn clear_active_location(&mut self) {
        self.active_location = None;
        self.repository_configuration = RepositoryConfiguration::new();
    }

    pub fn active_location(&self) -> Option<&Location> {
        self.active_location
            .as_deref()
            .and_then(|key| self.locations.get(key))
    }

    pub fn active_location_key(&self) -> Option<&str> {
        self.active_location.as_deref()
    }

    pub fn has_active_location(&self) -> bool {
        self.active_location.is_some()
    }

    /// `memory/` directory of the active location.
    pub fn memory_path(&self) -> Option<PathBuf> {
        self.active_location().map(Location::memory_path)
    }

    /// `limbo/` directory of the active location.
    pub fn limbo_path(&self) -> Option<PathBuf> {
        self.active_location().map(Location::limbo_path)
    }

    /// Returns whether the active location keeps a repository configuration.
    pub fn has_repository_configuration(&self) -> bool {
        self.active_location()
            .map(Location::has_repository_configuration)
            .unwrap_or(false)
    }

    /// Repository document path; `None` unless the active location persists one.
    pub fn repository_config_file_path(&self) -> Option<PathBuf> {
        self.active_location()
            .filter(|location| location.has_repository_configuration())
            .map(|location| location.dir.join(FILENAME_REPOSITORY_CONFIGURATION))
    }

    pub fn repository_configuration(&self) -> &RepositoryConfiguration {
        &self.repository_configuration
    }

    pub fn repository_configuration_mut(&mut self) -> &mut RepositoryConfiguration {
        &mut self.repository_configuration
    }

    /// Replaces the repository configuration wholesale.
    pub fn set_repository_configuration(&mut self, config: RepositoryConfiguration) {
        self.repository_configuration = config;
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::Configuration;
    use crate::config::settings::UiTheme;
    use crate::config::ConfigError;
    use crate::model::location::{Location, LocationKind};
    use crate::model::organizer::Organizer;
    use std::path::{Path, PathBuf};

    fn config() -> Configuration {
        Configuration::with_home(Some(PathBuf::from("/home/ada")))
    }

    #[test]
    fn active_location_must_be_registered() {
        let mut config = config();
        let err = config
            .set_active_location("/kb")
            .expect_err("unregistered key cannot become active");
        assert_eq!(err, ConfigError::UnknownLocation("/kb".to_string()));

        let key = config.add_location(Location::repository("/kb", LocationKind::MindNote));
        config.set_active_location(&key).expect("registered location should be activatable");
        assert_eq!(config.active_location().expect("a location should be active").path, "/kb");
        assert_eq!(config.memory_path(), Some(PathBuf::from("/kb/memory")));
        assert_eq!(
            config.repository_config_file_path(),
            Some(PathBuf::from("/kb/repository-configuration.md"))
        );
    }

    #[test]
    fn switching_active_location_replaces_repository_configuration() {
        let mut config = config();
        let first = config.add_location(Location::repository("/a", LocationKind::MindNote));
        let second = config.add_location(Location::repository("/b", LocationKind::MindNote));
        config.set_active_location(&first).expect("registered location should be activatable");
        config
            .repository_configuration_mut()
            .add_organizer(Organizer::eisenhower_matrix())
            .expect("empty configuration accepts the default organizer");

        config.set_active_location(&first).expect("registered location should be activatable");
        assert_eq!(config.repository_configuration().len(), 1);

        config.set_active_location(&second).expect("registered location should be activatable");
        assert!(config.repository_configuration().is_empty());
    }

    #[test]
    fn markdown_locations_have_no_repository_document() {
        let mut config = config();
        let key = config.add_location(Location::repository("/md", LocationKind::Markdown));
        config.set_active_location(&key).expect("registered location should be activatable");
        assert!(!config.has_repository_configuration());
        assert_eq!(config.repository_config_file_path(), None);
    }

    #[test]
    fn clear_resets_settings_and_locations_but_keeps_paths() {
        let mut config = config();
        config.set_config_file_path("/tmp/custom.md");
        config.app.ui_theme = UiTheme::Light;
        let key = config.add_location(Location::repository("/kb", LocationKind::MindNote));
        config.set_active_location(&key).expect("registered location should be activatable");

        config.clear();

        assert_eq!(config.app.ui_theme, UiTheme::Dark);
        assert!(config.locations().is_empty());
        assert!(!config.has_active_location());
        assert_eq!(config.config_file_path(), Path::new("/tmp/custom.md"));
    }

    #[test]
    fn removing_active_location_clears_it() {
        let mut config = config();
        let key = config.add_location(Location::repository("/kb", LocationKind::MindNote));
        config.set_active_location(&key).expect("registered location should be activatable");
        assert!(config.remove_location(&key).is_some());
        assert!(config.active_location().is_none());
    }

    #[test]
    fn external_editor_prefers_configured_command() {
        let mut config = config();
        assert_eq!(config.external_editor(), None);
        config.app.editor_external_command = "vim".to_string();
        assert_eq!(config.external_editor(), Some("vim"));
    }
}
