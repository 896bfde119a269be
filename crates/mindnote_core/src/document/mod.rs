//! Section-level document model for Markdown-hosted configuration files.
//!
//! # Responsibility
//! - Split a configuration document into titled sections with raw body lines.
//! - Read documents from disk with a scoped, fully consumed file handle.
//!
//! # Invariants
//! - Only the first section may be untitled (the preamble).
//! - Body lines are kept verbatim, without line terminators.
//! - Section order matches document order.

mod lexer;

pub use lexer::{lex_sections, read_document};

/// One `# Title` section and the lines that follow it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// `None` for the preamble (text before the first heading).
    pub title: Option<String>,
    pub body: Vec<String>,
}

impl Section {
    pub fn titled(title: impl Into<String>, body: Vec<String>) -> Self {
        Self {
            title: Some(title.into()),
            body,
        }
    }

    pub fn preamble(body: Vec<String>) -> Self {
        Self { title: None, body }
    }

    pub fn is_preamble(&self) -> bool {
        self.title.is_none()
    }

    /// Returns true when this section's title equals `title` exactly.
    pub fn has_title(&self, title: &str) -> bool {
        self.title.as_deref() == Some(title)
    }
}
