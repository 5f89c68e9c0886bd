//! Budgeted synthesis with tier degradation.

use std::fmt;

use tracing::{debug, trace};

use crate::errors::Result;
use crate::generator::GenContext;
use crate::profile::Profile;

use super::structure::program;
use super::{ProgramComplexity, ProgramConfig};

/// Upper bound on budgeted attempts before the unconditional fallback.
pub const MAX_ATTEMPTS: usize = 10;

/// Produce one program for `config`.
///
/// Each attempt uses a fresh context seeded with `seed + attempt`. An attempt
/// whose output exceeds `max_length` characters is retried one tier lower.
/// Once Minimal has also failed, a Minimal program seeded with `seed` is
/// returned whatever its length.
pub fn generate(config: &ProgramConfig) -> Result<String> {
    let mut tier = config.complexity;
    for attempt in 0..MAX_ATTEMPTS {
        let seed = config.seed.wrapping_add(attempt as i64);
        let text = generate_once(config, tier, seed)?;
        let len = text.chars().count();
        trace!(attempt, %tier, seed, len, "attempt");
        if len <= config.max_length {
            return Ok(text);
        }
        match tier.degrade() {
            Some(lower) => {
                debug!(
                    from = %tier,
                    to = %lower,
                    len,
                    max_length = config.max_length,
                    "over budget, degrading"
                );
                tier = lower;
            }
            None => break,
        }
    }
    debug!(seed = config.seed, "budget not met, using minimal fallback");
    generate_once(config, ProgramComplexity::Minimal, config.seed)
}

fn generate_once(config: &ProgramConfig, tier: ProgramComplexity, seed: i64) -> Result<String> {
    let mut ctx = GenContext::new(seed as u64, tier.generation_config());
    program(config, tier)?.generate(&mut ctx)
}

// ---------------------------------------------------------------------------
// Conveniences
// ---------------------------------------------------------------------------

pub fn generate_minimal(max_length: usize, seed: i64) -> Result<String> {
    generate(&ProgramConfig::new(max_length, ProgramComplexity::Minimal, seed))
}

pub fn generate_simple(max_length: usize, seed: i64) -> Result<String> {
    generate(&ProgramConfig::new(max_length, ProgramComplexity::Simple, seed))
}

pub fn generate_medium(max_length: usize, seed: i64) -> Result<String> {
    generate(&ProgramConfig::new(max_length, ProgramComplexity::Medium, seed))
}

pub fn generate_complex(max_length: usize, seed: i64) -> Result<String> {
    generate(&ProgramConfig::new(max_length, ProgramComplexity::Complex, seed))
}

/// Extreme tier with obscure features.
pub fn generate_extreme(max_length: usize, seed: i64) -> Result<String> {
    let config = ProgramConfig::new(max_length, ProgramComplexity::Extreme, seed)
        .with_obscure_features(true);
    generate(&config)
}

/// `count` programs cycling through the tiers.
///
/// Program `i` uses tier `i % 5` and seed `seed + i`; comments are left out
/// of every third program and obscure features of every odd one.
pub fn generate_test_suite(count: usize, max_length: usize, seed: i64) -> Result<Vec<String>> {
    (0..count)
        .map(|i| {
            let config = ProgramConfig::new(
                max_length,
                ProgramComplexity::cycled(i),
                seed.wrapping_add(i as i64),
            )
            .with_comments(i % 3 != 0)
            .with_obscure_features(i % 2 == 0);
            generate(&config)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Batches
// ---------------------------------------------------------------------------

/// Which tiers a batch covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchSelector {
    /// Round-robin over all tiers by index.
    Mixed,
    Single(ProgramComplexity),
}

impl BatchSelector {
    pub fn tier_for(self, index: usize) -> ProgramComplexity {
        match self {
            BatchSelector::Mixed => ProgramComplexity::cycled(index),
            BatchSelector::Single(tier) => tier,
        }
    }
}

impl fmt::Display for BatchSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatchSelector::Mixed => f.write_str("mixed"),
            BatchSelector::Single(tier) => write!(f, "{tier}"),
        }
    }
}

/// One generated program of a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fixture {
    pub index: usize,
    pub tier: ProgramComplexity,
    pub seed: i64,
    pub text: String,
}

impl Fixture {
    /// Length in characters.
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// `count` fixtures seeded `seed + index`, budgets and flags from `profile`.
///
/// Obscure features are only ever enabled for Extreme fixtures.
pub fn generate_batch(
    count: usize,
    seed: i64,
    selector: BatchSelector,
    profile: &Profile,
) -> Result<Vec<Fixture>> {
    let mut fixtures = Vec::with_capacity(count);
    for index in 0..count {
        let tier = selector.tier_for(index);
        let fixture_seed = seed.wrapping_add(index as i64);
        let config = ProgramConfig::new(profile.max_length(tier), tier, fixture_seed)
            .with_comments(profile.include_comments)
            .with_obscure_features(
                profile.obscure_features && tier == ProgramComplexity::Extreme,
            );
        let text = generate(&config)?;
        debug!(index, %tier, seed = fixture_seed, len = text.chars().count(), "fixture");
        fixtures.push(Fixture {
            index,
            tier,
            seed: fixture_seed,
            text,
        });
    }
    Ok(fixtures)
}
