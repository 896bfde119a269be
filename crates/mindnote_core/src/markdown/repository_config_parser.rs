//! Repository configuration parser (organizer block scanner).
//!
//! # Responsibility
//! - Split the `Organizers` section body into organizer blocks.
//! - Finalize each block through `OrganizerValidator` before adding it.
//!
//! # Invariants
//! - A block starts at an `Organizer name:` marker and ends at the next
//!   marker or the end of the section body.
//! - Organizer keys are unique across the whole document; the first
//!   occurrence wins.
//! - Organizers with an empty quadrant are dropped.
//!
//! Example block:
//!
//! ```text
//! Organizer name: My Organizer
//! * Key: my-organizer
//! * Upper right tag: important
//! * Lower right tag: urgent
//! * Lower left tag: later
//! * Upper left tag: cool,,fun
//! * Sort by: importance
//! * Filter by: outlines and notes
//! * Outline scope:
//! ```

use super::setting::{strip_label, strip_setting_label};
use super::SECTION_ORGANIZERS;
use crate::config::repository_configuration::RepositoryConfiguration;
use crate::document::Section;
use crate::model::organizer::{
    create_organizer_key, next_organizer_id, tags_from_string, FilterBy, Organizer,
    OrganizerValidationError, Quadrant, SortBy, DEFAULT_ORGANIZER_NAME,
};
use log::{debug, warn};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Marker that opens an organizer block (no bullet).
pub const MARKER_ORGANIZER_NAME: &str = "Organizer name";
pub const LABEL_KEY: &str = "Key";
pub const LABEL_UPPER_RIGHT_TAG: &str = "Upper right tag";
pub const LABEL_LOWER_RIGHT_TAG: &str = "Lower right tag";
pub const LABEL_LOWER_LEFT_TAG: &str = "Lower left tag";
pub const LABEL_UPPER_LEFT_TAG: &str = "Upper left tag";
pub const LABEL_SORT_BY: &str = "Sort by";
pub const LABEL_FILTER_BY: &str = "Filter by";
pub const LABEL_OUTLINE_SCOPE: &str = "Outline scope";

/// Quadrant tag labels in document order.
pub const QUADRANT_LABELS: [(Quadrant, &str); 4] = [
    (Quadrant::UpperRight, LABEL_UPPER_RIGHT_TAG),
    (Quadrant::LowerRight, LABEL_LOWER_RIGHT_TAG),
    (Quadrant::LowerLeft, LABEL_LOWER_LEFT_TAG),
    (Quadrant::UpperLeft, LABEL_UPPER_LEFT_TAG),
];

/// Finalizes organizers: key defaulting, key uniqueness and completeness.
#[derive(Debug, Clone)]
pub struct OrganizerValidator {
    seen_keys: BTreeSet<String>,
    key_directory: PathBuf,
}

impl OrganizerValidator {
    /// `key_directory` prefixes synthesized keys (the memory directory).
    pub fn new(key_directory: impl Into<PathBuf>) -> Self {
        Self {
            seen_keys: BTreeSet::new(),
            key_directory: key_directory.into(),
        }
    }

    /// Returns the organizer when it may be added, or why it was rejected.
    ///
    /// Accepted keys are remembered for subsequent collision checks.
    pub fn finalize(&mut self, mut organizer: Organizer) -> Result<Organizer, OrganizerValidationError> {
        if organizer.key.trim().is_empty() {
            organizer.key =
                create_organizer_key(&self.seen_keys, &self.key_directory, next_organizer_id());
        }
        if self.seen_keys.contains(&organizer.key) {
            return Err(OrganizerValidationError::DuplicateKey(organizer.key));
        }
        organizer.validate()?;

        self.seen_keys.insert(organizer.key.clone());
        Ok(organizer)
    }

    pub fn seen_keys(&self) -> &BTreeSet<String> {
        &self.seen_keys
    }
}

enum ScanState {
    Idle,
    Accumulating(Organizer),
}

/// Parses `sections` into a fresh repository configuration.
pub fn parse_repository_configuration(
    sections: Vec<Section>,
    key_directory: &Path,
) -> RepositoryConfiguration {
    let mut config = RepositoryConfiguration::new();
    let mut validator = OrganizerValidator::new(key_directory);

    for section in sections {
        if section.has_title(SECTION_ORGANIZERS) {
            parse_organizers(&section.body, &mut validator, &mut config);
        } else if let Some(title) = section.title.as_deref() {
            debug!(
                "event=repository_config_parse module=markdown status=skip section={}",
                title
            );
        }
    }

    config
}

/// Scans one `Organizers` section body.
pub fn parse_organizers(
    body: &[String],
    validator: &mut OrganizerValidator,
    config: &mut RepositoryConfiguration,
) {
    let mut state = ScanState::Idle;

    for line in body {
        if let Some(name) = strip_label(line, MARKER_ORGANIZER_NAME) {
            if let ScanState::Accumulating(current) = state {
                add_finalized(current, validator, config);
            }
            // Verbatim; only a blank name takes the default.
            let name = if name.trim().is_empty() {
                DEFAULT_ORGANIZER_NAME
            } else {
                name
            };
            state = ScanState::Accumulating(Organizer::new(name));
            continue;
        }

        if let ScanState::Accumulating(current) = &mut state {
            apply_field(line, current);
        }
    }

    if let ScanState::Accumulating(current) = state {
        add_finalized(current, validator, config);
    }
}

fn apply_field(line: &str, organizer: &mut Organizer) {
    if let Some(key) = strip_setting_label(line, LABEL_KEY) {
        organizer.key = key.trim().to_string();
        return;
    }
    for (quadrant, label) in QUADRANT_LABELS {
        if let Some(tags) = strip_setting_label(line, label) {
            organizer.set_tags(quadrant, tags_from_string(tags));
            return;
        }
    }
    if let Some(sort_by) = strip_setting_label(line, LABEL_SORT_BY) {
        organizer.sort_by = SortBy::from_config_value(sort_by);
    } else if let Some(filter_by) = strip_setting_label(line, LABEL_FILTER_BY) {
        organizer.filter_by = FilterBy::from_config_value(filter_by);
    } else if let Some(scope) = strip_setting_label(line, LABEL_OUTLINE_SCOPE) {
        // Outline existence is checked when the organizer is opened.
        organizer.set_outline_scope(scope);
    }
}

fn add_finalized(
    organizer: Organizer,
    validator: &mut OrganizerValidator,
    config: &mut RepositoryConfiguration,
) {
    let name = organizer.name.clone();
    match validator
        .finalize(organizer)
        .and_then(|organizer| config.add_organizer(organizer))
    {
        Ok(()) => debug!(
            "event=organizer_add module=markdown status=ok name={}",
            name
        ),
        Err(err) => warn!(
            "event=organizer_add module=markdown status=skip name={} reason={}",
            name, err
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_repository_configuration, OrganizerValidator};
    use crate::document::lex_sections;
    use crate::model::organizer::{
        FilterBy, Organizer, OrganizerValidationError, Quadrant, SortBy, DEFAULT_ORGANIZER_NAME,
    };
    use std::path::Path;

    fn parse(text: &str) -> crate::config::repository_configuration::RepositoryConfiguration {
        parse_repository_configuration(lex_sections(text), Path::new("/kb/memory"))
    }

    const FULL_BLOCK: &str = "Organizer name: First\n* Key: org-1\n* Upper right tag: a\n* Lower right tag: b\n* Lower left tag: c\n* Upper left tag: d\n";

    #[test]
    fn parses_all_fields() {
        let config = parse(
            "# Organizers\nOrganizer name: Plan\n* Key: plan\n* Upper right tag: a,,b\n* Lower right tag: c\n* Lower left tag: d\n* Upper left tag: e\n* Sort by: urgency\n* Filter by: notes\n* Outline scope: /kb/memory/plan.md\n",
        );
        assert_eq!(config.len(), 1);
        let organizer = &config.organizers()[0];
        assert_eq!(organizer.name, "Plan");
        assert_eq!(organizer.key, "plan");
        assert_eq!(organizer.tags(Quadrant::UpperRight).len(), 2);
        assert_eq!(organizer.sort_by, SortBy::Urgency);
        assert_eq!(organizer.filter_by, FilterBy::Notes);
        assert_eq!(organizer.outline_scope(), "/kb/memory/plan.md");
    }

    #[test]
    fn marker_splits_blocks_and_incomplete_block_is_dropped() {
        let text = format!(
            "# Organizers\n{FULL_BLOCK}Organizer name: Second\n* Key: org-2\n* Upper right tag: a\n* Lower right tag: b\n* Upper left tag: d\n"
        );
        let config = parse(&text);
        assert_eq!(config.len(), 1);
        assert_eq!(config.organizers()[0].key, "org-1");
    }

    #[test]
    fn duplicate_key_keeps_first_occurrence() {
        let text = format!(
            "# Organizers\n{FULL_BLOCK}{}",
            FULL_BLOCK.replace("First", "Second")
        );
        let config = parse(&text);
        assert_eq!(config.len(), 1);
        assert_eq!(config.organizers()[0].name, "First");
    }

    #[test]
    fn blank_key_is_synthesized_and_name_defaulted() {
        let config = parse(
            "# Organizers\nOrganizer name: \n* Upper right tag: a\n* Lower right tag: b\n* Lower left tag: c\n* Upper left tag: d\n",
        );
        let organizer = &config.organizers()[0];
        assert_eq!(organizer.name, DEFAULT_ORGANIZER_NAME);
        assert!(organizer.key.starts_with("/kb/memory/mindnote/organizers/"));
        assert!(organizer.key.ends_with('_'));
    }

    #[test]
    fn lines_before_first_marker_and_unknown_lines_are_ignored() {
        let text = format!(
            "# Organizers\n* Key: orphan\nsome description\n{}* Color: red\n",
            FULL_BLOCK.replace("* Lower right tag: b\n", "* Lower right tag: b\n* Priority: high\n")
        );
        let config = parse(&text);
        assert_eq!(config.len(), 1);
        assert_eq!(config.organizers()[0].key, "org-1");
        assert_eq!(config.organizers()[0].tags(Quadrant::LowerLeft).len(), 1);
    }

    #[test]
    fn other_sections_are_ignored() {
        let config = parse(&format!("# Kanbans\n{FULL_BLOCK}"));
        assert!(config.is_empty());
    }

    #[test]
    fn validator_remembers_only_accepted_keys() {
        let mut validator = OrganizerValidator::new("/kb/memory");
        let mut incomplete = Organizer::new("incomplete");
        incomplete.key = "k".to_string();
        assert_eq!(
            validator
                .finalize(incomplete)
                .expect_err("incomplete organizer should be refused"),
            OrganizerValidationError::EmptyQuadrant(Quadrant::UpperRight)
        );
        assert!(validator.seen_keys().is_empty());

        let mut complete = Organizer::eisenhower_matrix();
        complete.key = "k".to_string();
        assert!(validator.finalize(complete.clone()).is_ok());
        assert_eq!(
            validator
                .finalize(complete)
                .expect_err("second use of a key should be refused"),
            OrganizerValidationError::DuplicateKey("k".to_string())
        );
    }
}
