//! Global configuration document writer.
//!
//! # Responsibility
//! - Render the full settings template, section by section, with help lines.
//! - Render the factory document when no configuration is supplied.
//!
//! # Invariants
//! - Output order comes from the template, never from what is customized.
//! - `parse(render(c))` reproduces every scalar setting of `c`.

use super::config_parser::{LABEL_ACTIVE_REPOSITORY, LABEL_REPOSITORY};
use super::setting::{setting_line, Setting};
use super::template::{APPLICATION_SETTINGS, MIND_SETTINGS};
use super::{SECTION_APPLICATION, SECTION_MIND, SECTION_REPOSITORIES};
use crate::config::configuration::Configuration;
use crate::config::env::DEFAULT_REPOSITORY_PATH;

const DOCUMENT_TITLE: &str = "MindNote Configuration";

/// Renders `config`, or compiled-in defaults when `None`.
pub fn render_configuration(config: Option<&Configuration>) -> String {
    let defaults;
    let source = match config {
        Some(config) => config,
        None => {
            defaults = Configuration::with_home(None);
            &defaults
        }
    };

    let mut out = String::with_capacity(8 * 1024);
    out.push_str(&format!("# {DOCUMENT_TITLE}\n\n"));
    out.push_str("This is MindNote configuration file (Markdown hosted DSL).\n");
    out.push_str("See documentation for configuration options details.\n\n");

    render_section(
        &mut out,
        SECTION_MIND,
        &["Mind-related settings:"],
        MIND_SETTINGS,
        source,
    );
    render_section(
        &mut out,
        SECTION_APPLICATION,
        &["Application settings:"],
        APPLICATION_SETTINGS,
        source,
    );

    out.push_str(&format!("# {SECTION_REPOSITORIES}\n"));
    out.push_str("If MindNote detects MindNote repository structure, then the directory is\n");
    out.push_str("treated as knowledge base, else it's used as a Markdown directory (e.g. metadata\n");
    out.push_str("are not stored to Markdown files).\n\n");
    match config {
        Some(config) => {
            if let Some(active) = config.active_location_key() {
                out.push_str(&setting_line(LABEL_ACTIVE_REPOSITORY, active));
            }
            for path in config.locations().keys() {
                out.push_str(&setting_line(LABEL_REPOSITORY, path));
            }
        }
        None => {
            out.push_str(&setting_line(LABEL_ACTIVE_REPOSITORY, DEFAULT_REPOSITORY_PATH));
            out.push_str(&setting_line(LABEL_REPOSITORY, DEFAULT_REPOSITORY_PATH));
        }
    }
    out.push('\n');

    out
}

fn render_section(
    out: &mut String,
    title: &str,
    description: &[&str],
    settings: &[Setting],
    config: &Configuration,
) {
    out.push_str(&format!("# {title}\n"));
    for line in description {
        out.push_str(line);
        out.push('\n');
    }
    out.push('\n');
    for setting in settings {
        out.push_str(&setting.encode(&(setting.get)(config)));
    }
    out.push('\n');
}
