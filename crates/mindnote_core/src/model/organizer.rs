//! Organizer domain model.
//!
//! # Responsibility
//! - Describe one 2x2 prioritization matrix over four quadrant tag sets.
//! - Provide the tag list text codec shared by the repository document.
//! - Synthesize stable keys for organizers declared without one.
//!
//! # Invariants
//! - A valid organizer has a non-empty tag set in every quadrant.
//! - `key` is unique within its owning `RepositoryConfiguration`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

/// Delimiter between tags in the text form; a single comma may be part of a tag.
pub const TAG_DELIMITER: &str = ",,";
/// Name used when the marker line carries no name.
pub const DEFAULT_ORGANIZER_NAME: &str = "Custom Organizer";
/// Key of the built-in Eisenhower matrix organizer.
pub const KEY_EISENHOWER_MATRIX: &str = "/mindnote/organizers/eisenhower-matrix";

static NEXT_ORGANIZER_ID: AtomicU64 = AtomicU64::new(1);

/// Quadrant ordering criterion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    #[default]
    Importance,
    Urgency,
}

impl SortBy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Importance => "importance",
            Self::Urgency => "urgency",
        }
    }

    /// Maps a configuration value; unknown values fall back to the default.
    pub fn from_config_value(value: &str) -> Self {
        match value.trim() {
            "urgency" => Self::Urgency,
            _ => Self::Importance,
        }
    }
}

/// Which things are placed into quadrants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterBy {
    Outlines,
    Notes,
    #[default]
    OutlinesAndNotes,
}

impl FilterBy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Outlines => "outlines",
            Self::Notes => "notes",
            Self::OutlinesAndNotes => "outlines and notes",
        }
    }

    /// Maps a configuration value; unknown values fall back to the default.
    pub fn from_config_value(value: &str) -> Self {
        match value.trim() {
            "outlines" => Self::Outlines,
            "notes" => Self::Notes,
            _ => Self::OutlinesAndNotes,
        }
    }
}

/// One of the four matrix slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quadrant {
    UpperRight,
    LowerRight,
    LowerLeft,
    UpperLeft,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [
        Quadrant::UpperRight,
        Quadrant::LowerRight,
        Quadrant::LowerLeft,
        Quadrant::UpperLeft,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::UpperRight => "upper right",
            Self::LowerRight => "lower right",
            Self::LowerLeft => "lower left",
            Self::UpperLeft => "upper left",
        }
    }
}

/// Saved prioritization matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organizer {
    /// Stable identifier; blank until finalized by the repository parser.
    pub key: String,
    pub name: String,
    pub upper_right: BTreeSet<String>,
    pub lower_right: BTreeSet<String>,
    pub lower_left: BTreeSet<String>,
    pub upper_left: BTreeSet<String>,
    pub sort_by: SortBy,
    pub filter_by: FilterBy,
    /// Outline the matrix is restricted to; `None` means all outlines.
    pub scope_outline_id: Option<String>,
}

impl Organizer {
    /// Creates an organizer with empty quadrants and default modes.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            key: String::new(),
            name: name.into(),
            upper_right: BTreeSet::new(),
            lower_right: BTreeSet::new(),
            lower_left: BTreeSet::new(),
            upper_left: BTreeSet::new(),
            sort_by: SortBy::default(),
            filter_by: FilterBy::default(),
            scope_outline_id: None,
        }
    }

    /// Builds the Eisenhower matrix seeded into new repositories.
    pub fn eisenhower_matrix() -> Self {
        let mut organizer = Self::new("Eisenhower Matrix");
        organizer.key = KEY_EISENHOWER_MATRIX.to_string();
        organizer.upper_right = single_tag("important");
        organizer.lower_right = single_tag("urgent");
        organizer.lower_left = single_tag("later");
        organizer.upper_left = single_tag("cool");
        organizer
    }

    pub fn tags(&self, quadrant: Quadrant) -> &BTreeSet<String> {
        match quadrant {
            Quadrant::UpperRight => &self.upper_right,
            Quadrant::LowerRight => &self.lower_right,
            Quadrant::LowerLeft => &self.lower_left,
            Quadrant::UpperLeft => &self.upper_left,
        }
    }

    pub fn set_tags(&mut self, quadrant: Quadrant, tags: BTreeSet<String>) {
        match quadrant {
            Quadrant::UpperRight => self.upper_right = tags,
            Quadrant::LowerRight => self.lower_right = tags,
            Quadrant::LowerLeft => self.lower_left = tags,
            Quadrant::UpperLeft => self.upper_left = tags,
        }
    }

    /// Returns the outline scope as written to the document (empty when global).
    pub fn outline_scope(&self) -> &str {
        self.scope_outline_id.as_deref().unwrap_or("")
    }

    /// Sets the outline scope; blank input clears it.
    pub fn set_outline_scope(&mut self, outline_id: &str) {
        let trimmed = outline_id.trim();
        self.scope_outline_id = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
    }

    /// Checks that every quadrant has at least one tag.
    pub fn validate(&self) -> Result<(), OrganizerValidationError> {
        for quadrant in Quadrant::ALL {
            if self.tags(quadrant).is_empty() {
                return Err(OrganizerValidationError::EmptyQuadrant(quadrant));
            }
        }
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

/// Organizer integrity violations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrganizerValidationError {
    EmptyQuadrant(Quadrant),
    DuplicateKey(String),
}

impl Display for OrganizerValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyQuadrant(quadrant) => {
                write!(f, "organizer defines no tags for {} quadrant", quadrant.as_str())
            }
            Self::DuplicateKey(key) => {
                write!(f, "another organizer with key `{key}` is already defined")
            }
        }
    }
}

impl Error for OrganizerValidationError {}

/// Renders tags joined with `TAG_DELIMITER` (sorted, as stored).
///
/// The encoding is lossy for tags that start or end with `,`: the extra comma
/// merges into a neighbouring delimiter and `tags_from_string` splits there.
pub fn tags_to_string(tags: &BTreeSet<String>) -> String {
    tags.iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(TAG_DELIMITER)
}

/// Parses a `TAG_DELIMITER`-separated list; empty fragments are ignored.
pub fn tags_from_string(value: &str) -> BTreeSet<String> {
    value
        .split(TAG_DELIMITER)
        .filter(|tag| !tag.trim().is_empty())
        .map(str::to_string)
        .collect()
}

/// Returns the next process-wide organizer id.
pub fn next_organizer_id() -> u64 {
    NEXT_ORGANIZER_ID.fetch_add(1, Ordering::Relaxed)
}

/// Synthesizes a key not contained in `taken`.
///
/// Shape: `{directory}/mindnote/organizers/{id}` plus one or more `_`.
pub fn create_organizer_key(taken: &BTreeSet<String>, directory: &Path, id: u64) -> String {
    let base = directory
        .join("mindnote")
        .join("organizers")
        .join(id.to_string())
        .to_string_lossy()
        .into_owned();
    let mut key = base;
    loop {
        key.push('_');
        if !taken.contains(&key) {
            return key;
        }
    }
}

fn single_tag(tag: &str) -> BTreeSet<String> {
    let mut tags = BTreeSet::new();
    tags.insert(tag.to_string());
    tags
}
