// src/lib.rs
//! Randomized Standard ML program generator.
//!
//! Small generator combinators ([`generator`]) are composed into the SML
//! grammar ([`sml`]), which [`program`] assembles into whole programs of a
//! chosen complexity under a character budget.

pub mod errors;
pub mod generator;
pub mod manifest;
pub mod profile;
pub mod program;
pub mod sml;

pub use errors::{GenError, ProfileError, Result};
pub use generator::{Gen, GenContext, GenerationConfig, Generator};
pub use profile::Profile;
pub use program::{
    BatchSelector, Fixture, ProgramComplexity, ProgramConfig, generate, generate_batch,
    generate_test_suite,
};
