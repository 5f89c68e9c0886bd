//! Whole-program synthesis.
//!
//! [`structure`] composes grammar rules into one program shape per
//! [`ProgramComplexity`] tier; [`driver`] runs those shapes under a length
//! budget, stepping down tiers until the output fits.

pub mod driver;
pub mod structure;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::generator::GenerationConfig;

pub use driver::{
    BatchSelector, Fixture, MAX_ATTEMPTS, generate, generate_batch, generate_complex,
    generate_extreme, generate_medium, generate_minimal, generate_simple, generate_test_suite,
};

/// Complexity tier, ordered from smallest to largest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgramComplexity {
    /// A single declaration or expression.
    Minimal,
    /// One or two declarations.
    Simple,
    /// A declaration sequence with an optional trailing expression.
    Medium,
    /// Adds type preambles and exceptions.
    Complex,
    /// Deepest nesting, fixity and local preambles, obscure constructs.
    Extreme,
}

impl ProgramComplexity {
    /// All tiers, lowest first.
    pub const ALL: [ProgramComplexity; 5] = [
        ProgramComplexity::Minimal,
        ProgramComplexity::Simple,
        ProgramComplexity::Medium,
        ProgramComplexity::Complex,
        ProgramComplexity::Extreme,
    ];

    /// Recursion and repetition bounds for this tier.
    pub fn generation_config(self) -> GenerationConfig {
        match self {
            ProgramComplexity::Minimal => GenerationConfig::new(2, 1),
            ProgramComplexity::Simple => GenerationConfig::new(3, 2),
            ProgramComplexity::Medium => GenerationConfig::new(5, 3),
            ProgramComplexity::Complex => GenerationConfig::new(7, 4),
            ProgramComplexity::Extreme => GenerationConfig::new(10, 5),
        }
    }

    /// Length budget used by batch generation when no profile overrides it.
    pub fn default_max_length(self) -> usize {
        match self {
            ProgramComplexity::Minimal => 50,
            ProgramComplexity::Simple => 150,
            ProgramComplexity::Medium => 400,
            ProgramComplexity::Complex => 800,
            ProgramComplexity::Extreme => 1500,
        }
    }

    /// The next tier down, or `None` for [`Minimal`](Self::Minimal).
    pub fn degrade(self) -> Option<ProgramComplexity> {
        match self {
            ProgramComplexity::Minimal => None,
            ProgramComplexity::Simple => Some(ProgramComplexity::Minimal),
            ProgramComplexity::Medium => Some(ProgramComplexity::Simple),
            ProgramComplexity::Complex => Some(ProgramComplexity::Medium),
            ProgramComplexity::Extreme => Some(ProgramComplexity::Complex),
        }
    }

    /// Round-robin tier for a batch index.
    pub fn cycled(index: usize) -> ProgramComplexity {
        Self::ALL[index % Self::ALL.len()]
    }

    pub fn name(self) -> &'static str {
        match self {
            ProgramComplexity::Minimal => "minimal",
            ProgramComplexity::Simple => "simple",
            ProgramComplexity::Medium => "medium",
            ProgramComplexity::Complex => "complex",
            ProgramComplexity::Extreme => "extreme",
        }
    }
}

impl fmt::Display for ProgramComplexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One synthesis request. Fully determines the output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramConfig {
    /// Budget in characters. Met by every attempt except the final fallback.
    pub max_length: usize,
    pub complexity: ProgramComplexity,
    pub seed: i64,
    pub include_comments: bool,
    pub include_obscure_features: bool,
}

impl ProgramConfig {
    /// Config with comments and obscure features enabled.
    pub fn new(max_length: usize, complexity: ProgramComplexity, seed: i64) -> Self {
        Self {
            max_length,
            complexity,
            seed,
            include_comments: true,
            include_obscure_features: true,
        }
    }

    pub fn with_comments(mut self, include: bool) -> Self {
        self.include_comments = include;
        self
    }

    pub fn with_obscure_features(mut self, include: bool) -> Self {
        self.include_obscure_features = include;
        self
    }
}
