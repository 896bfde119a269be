//! Markdown-hosted DSL transcoders for configuration documents.
//!
//! # Responsibility
//! - Parse lexed sections into `Configuration` / `RepositoryConfiguration`.
//! - Render canonical, self-documenting documents from the model.
//!
//! # Invariants
//! - Parsing never fails: unknown sections and lines are ignored, malformed
//!   values fall back to defaults, invalid organizers are dropped.
//! - Rendering is deterministic and independent of the previous file.

pub mod config_parser;
pub mod config_writer;
pub mod repository_config_parser;
pub mod repository_config_writer;
pub mod setting;
pub mod template;

pub const SECTION_MIND: &str = "Mind";
pub const SECTION_APPLICATION: &str = "Application";
pub const SECTION_REPOSITORIES: &str = "Repositories";
pub const SECTION_ORGANIZERS: &str = "Organizers";

pub use config_parser::parse_configuration;
pub use config_writer::render_configuration;
pub use repository_config_parser::{parse_repository_configuration, OrganizerValidator};
pub use repository_config_writer::render_repository_configuration;
