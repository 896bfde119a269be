//! Per-location configuration holding the organizer list.
//!
//! # Invariants
//! - Organizer keys are unique within one instance.
//! - List order is insertion order until `sort_organizers` is called.

use crate::model::organizer::{Organizer, OrganizerValidationError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryConfiguration {
    organizers: Vec<Organizer>,
}

impl RepositoryConfiguration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration seeded with the built-in Eisenhower matrix.
    pub fn with_default_organizer() -> Self {
        Self {
            organizers: vec![Organizer::eisenhower_matrix()],
        }
    }

    /// Drops every organizer.
    pub fn clear(&mut self) {
        self.organizers.clear();
    }

    /// Appends one organizer.
    ///
    /// # Errors
    /// - Returns `DuplicateKey` when an organizer with the same key exists.
    pub fn add_organizer(&mut self, organizer: Organizer) -> Result<(), OrganizerValidationError> {
        if self.organizer(organizer.key.as_str()).is_some() {
            return Err(OrganizerValidationError::DuplicateKey(organizer.key));
        }
        self.organizers.push(organizer);
        Ok(())
    }

    /// Removes and returns the organizer with `key`.
    pub fn remove_organizer(&mut self, key: &str) -> Option<Organizer> {
        let index = self.organizers.iter().position(|o| o.key == key)?;
        Some(self.organizers.remove(index))
    }

    pub fn organizers(&self) -> &[Organizer] {
        &self.organizers
    }

    pub fn organizer(&self, key: &str) -> Option<&Organizer> {
        self.organizers.iter().find(|o| o.key == key)
    }

    pub fn organizer_mut(&mut self, key: &str) -> Option<&mut Organizer> {
        self.organizers.iter_mut().find(|o| o.key == key)
    }

    /// Orders organizers by name, then key.
    pub fn sort_organizers(&mut self) {
        self.organizers
            .sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.key.cmp(&b.key)));
    }

    pub fn len(&self) -> usize {
        self.organizers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.organizers.is_empty()
    }
}
