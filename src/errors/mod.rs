// src/errors/mod.rs
//! Structured error reporting for smlgen.
//!
//! Engine errors are plain `thiserror` enums that also implement miette's
//! `Diagnostic`, so the binary can render them with codes and help text.
//!
//! Error codes:
//! - G0xxx: generator construction and invocation errors
//! - P0xxx: batch profile errors

pub mod generation;
pub mod profile;
pub mod report;

pub use generation::GenError;
pub use profile::ProfileError;
pub use report::{render_to_stderr, render_to_string};

/// Result alias used throughout the generation engine.
pub type Result<T, E = GenError> = std::result::Result<T, E>;
