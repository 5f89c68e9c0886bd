// src/errors/profile.rs
//! Batch profile errors (P0xxx).

#![allow(unused_assignments)] // False positives from thiserror derive

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum ProfileError {
    #[error("unknown profile '{name}', available profiles: {available}")]
    #[diagnostic(
        code(P0001),
        help("pass an embedded profile name or a path ending in .toml")
    )]
    Unknown { name: String, available: String },

    #[error("failed to read profile file '{path}'")]
    #[diagnostic(code(P0002))]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse profile '{name}'")]
    #[diagnostic(code(P0003))]
    Parse {
        name: String,
        #[source]
        source: toml::de::Error,
    },
}
