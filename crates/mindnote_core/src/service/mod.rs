//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store and resolver calls into load/save entry points.
//! - Keep CLI and GUI callers decoupled from document and file details.

pub mod config_service;
