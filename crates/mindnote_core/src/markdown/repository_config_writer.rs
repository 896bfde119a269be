//! Repository configuration document writer.
//!
//! # Invariants
//! - Organizers are rendered in stored order, fields in a fixed order.
//! - Every rendered organizer parses back to an equal organizer.

use super::repository_config_parser::{
    LABEL_FILTER_BY, LABEL_KEY, LABEL_OUTLINE_SCOPE, LABEL_SORT_BY, MARKER_ORGANIZER_NAME,
    QUADRANT_LABELS,
};
use super::setting::setting_line;
use super::SECTION_ORGANIZERS;
use crate::config::repository_configuration::RepositoryConfiguration;
use crate::model::organizer::{tags_to_string, Organizer};

const DOCUMENT_TITLE: &str = "MindNote Repository Configuration";

/// Renders `config`, or a document with the default organizer when `None`.
pub fn render_repository_configuration(config: Option<&RepositoryConfiguration>) -> String {
    let defaults;
    let source = match config {
        Some(config) => config,
        None => {
            defaults = RepositoryConfiguration::with_default_organizer();
            &defaults
        }
    };

    let mut out = String::with_capacity(2 * 1024);
    out.push_str(&format!("# {DOCUMENT_TITLE}\n\n"));
    out.push_str("This is MindNote repository configuration file (Markdown hosted DSL).\n");
    out.push_str("It is stored in the repository and shared by all its users.\n\n");

    out.push_str(&format!("# {SECTION_ORGANIZERS}\n"));
    out.push_str("Organizers are Eisenhower-matrix-like views of Outlines and Notes\n");
    out.push_str("where each quadrant is defined by a set of tags.\n\n");
    for organizer in source.organizers() {
        render_organizer(&mut out, organizer);
    }

    out
}

fn render_organizer(out: &mut String, organizer: &Organizer) {
    let name = organizer.name.replace(['\n', '\r'], " ");
    out.push_str(&format!("{MARKER_ORGANIZER_NAME}: {name}\n"));
    out.push_str(&setting_line(LABEL_KEY, &organizer.key));
    for (quadrant, label) in QUADRANT_LABELS {
        out.push_str(&setting_line(label, &tags_to_string(organizer.tags(quadrant))));
    }
    out.push_str(&setting_line(LABEL_SORT_BY, organizer.sort_by.as_str()));
    out.push_str(&setting_line(LABEL_FILTER_BY, organizer.filter_by.as_str()));
    out.push_str(&setting_line(LABEL_OUTLINE_SCOPE, organizer.outline_scope()));
    out.push('\n');
}
