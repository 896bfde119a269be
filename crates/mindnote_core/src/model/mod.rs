//! Domain model shared by configuration parsing and rendering.
//!
//! # Responsibility
//! - Define organizers, storage locations and time scopes.
//! - Keep text codecs for values that have a canonical string form.
//!
//! # Invariants
//! - Model types do no I/O.

pub mod location;
pub mod organizer;
pub mod time_scope;
