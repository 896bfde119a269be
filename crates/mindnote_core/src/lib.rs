//! Core configuration persistence for MindNote.
//!
//! Transcodes the Markdown-hosted configuration DSL to and from typed models:
//! the global `~/.mindnote.md` document and the per-repository organizer
//! document.

pub mod config;
pub mod document;
pub mod logging;
pub mod markdown;
pub mod model;
pub mod service;
pub mod store;

pub use config::configuration::Configuration;
pub use config::location_resolver::{FsLocationResolver, LocationResolver};
pub use config::repository_configuration::RepositoryConfiguration;
pub use config::ConfigError;
pub use logging::{default_log_level, init_logging, init_logging_with, logging_status};
pub use markdown::{
    parse_configuration, parse_repository_configuration, render_configuration,
    render_repository_configuration, OrganizerValidator,
};
pub use model::location::{Location, LocationKind, LocationMode};
pub use model::organizer::{Organizer, OrganizerValidationError, Quadrant};
pub use model::time_scope::TimeScope;
pub use service::config_service::{ConfigService, StartupOverrides};
pub use store::{ConfigStore, FsConfigStore, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
