//! Per-generation state: the RNG, the tier configuration and the recursion
//! depth counter.
//!
//! A [`GenContext`] is owned by exactly one generation call. It is the only
//! source of randomness a generator may use, so a fixed seed always yields
//! the same text.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Bounds applied to one generation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationConfig {
    /// Recursion depth at which only terminal productions are reachable.
    pub max_depth: usize,
    /// Upper bound (inclusive) for repetition combinators.
    pub max_repeat: usize,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_depth: 10,
            max_repeat: 5,
        }
    }
}

impl GenerationConfig {
    pub fn new(max_depth: usize, max_repeat: usize) -> Self {
        Self {
            max_depth,
            max_repeat,
        }
    }
}

/// Mutable state threaded through every generator invocation.
///
/// `depth` is only changed through [`deeper`](GenContext::deeper), which
/// restores it on every exit path.
pub struct GenContext {
    rng: StdRng,
    config: GenerationConfig,
    depth: usize,
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

impl GenContext {
    /// Create a context whose RNG is seeded from `seed`.
    pub fn new(seed: u64, config: GenerationConfig) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed), config)
    }

    /// Create a context around an existing RNG.
    pub fn with_rng(rng: StdRng, config: GenerationConfig) -> Self {
        Self {
            rng,
            config,
            depth: 0,
        }
    }

    pub fn config(&self) -> GenerationConfig {
        self.config
    }

    pub fn depth(&self) -> usize {
        self.depth
    }
}

// ---------------------------------------------------------------------------
// Recursion control
// ---------------------------------------------------------------------------

impl GenContext {
    pub fn is_at_max_depth(&self) -> bool {
        self.depth >= self.config.max_depth
    }

    /// Probability of taking a recursive production at the current depth.
    ///
    /// Decays quadratically from 1.0 at depth 0 to 0.0 at `max_depth`, and
    /// is 0.0 whenever `max_depth` is 0.
    pub fn recursive_probability(&self) -> f64 {
        if self.config.max_depth == 0 || self.is_at_max_depth() {
            return 0.0;
        }
        let ratio = self.depth as f64 / self.config.max_depth as f64;
        (1.0 - ratio).powi(2)
    }

    /// Run `f` one level deeper, restoring the depth afterwards.
    ///
    /// The depth is decremented whether `f` returns `Ok` or `Err`.
    pub fn deeper<T, E, F>(&mut self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut Self) -> Result<T, E>,
    {
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }
}

// ---------------------------------------------------------------------------
// RNG convenience methods
// ---------------------------------------------------------------------------

impl GenContext {
    /// Return `true` with probability `prob` (clamped to 0.0..=1.0).
    pub fn gen_bool(&mut self, prob: f64) -> bool {
        self.rng.gen_bool(prob.clamp(0.0, 1.0))
    }

    /// Fair coin flip.
    pub fn coin(&mut self) -> bool {
        self.gen_bool(0.5)
    }

    /// Generate a random `usize` in `range`; an empty range yields its start.
    pub fn gen_range(&mut self, range: std::ops::Range<usize>) -> usize {
        if range.is_empty() {
            return range.start;
        }
        self.rng.gen_range(range)
    }

    /// Generate a random `usize` in the inclusive range `[min, max]`.
    pub fn random_in(&mut self, min: usize, max: usize) -> usize {
        if min >= max {
            return min;
        }
        self.rng.gen_range(min..=max)
    }

    /// Uniform draw from `[0, 1)`.
    pub fn unit_f64(&mut self) -> f64 {
        self.rng.gen_range(0.0..1.0)
    }

    /// Pick a uniformly random element of a non-empty slice.
    ///
    /// Returns `None` only for an empty slice.
    pub fn pick<'s, T>(&mut self, items: &'s [T]) -> Option<&'s T> {
        if items.is_empty() {
            return None;
        }
        let idx = self.gen_range(0..items.len());
        items.get(idx)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
