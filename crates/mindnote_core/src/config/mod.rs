//! Configuration context objects and environment integration.
//!
//! # Responsibility
//! - Hold the typed in-memory configuration (`Configuration`,
//!   `RepositoryConfiguration`).
//! - Resolve configured storage paths into locations.
//! - Expose environment-derived defaults (home, default repository, editor).
//!
//! # Invariants
//! - Parsers and writers never read the environment; callers apply
//!   environment and CLI overrides before or after loading.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod configuration;
pub mod env;
pub mod location_resolver;
pub mod repository_configuration;
pub mod settings;

/// Configuration context invariant violations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Active location must be one of the registered locations.
    UnknownLocation(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownLocation(path) => {
                write!(f, "location is not registered in configuration: {path}")
            }
        }
    }
}

impl Error for ConfigError {}
