//! Probabilistic text-generator combinators.
//!
//! A [`Generator`] is a pure function from a [`GenContext`] to a string. The
//! [`Gen`] handle wraps one behind an `Arc` so grammar rules can share and
//! recombine generators freely; the free functions in [`combinators`] build
//! new generators out of existing ones.
//!
//! Grammar rules never reference each other eagerly: recursive references go
//! through [`lazy`], which builds the referenced rule only when it runs.

pub mod combinators;
pub mod context;

use std::fmt;
use std::sync::Arc;

use crate::errors::Result;

pub use combinators::{
    choice, count, depth_choice, depth_choice_among, empty, lazy, literal, many, many1, one_of,
    optional, sep_by, sep_by1, seq, space, weighted_choice,
};
pub use context::{GenContext, GenerationConfig};

// ---------------------------------------------------------------------------
// Generator trait
// ---------------------------------------------------------------------------

/// Something that can produce text from a generation context.
///
/// Implementations must draw all randomness from `ctx` and must not keep
/// state between calls.
pub trait Generator: Send + Sync {
    fn generate(&self, ctx: &mut GenContext) -> Result<String>;
}

impl<F> Generator for F
where
    F: Fn(&mut GenContext) -> Result<String> + Send + Sync,
{
    fn generate(&self, ctx: &mut GenContext) -> Result<String> {
        self(ctx)
    }
}

// ---------------------------------------------------------------------------
// Gen handle
// ---------------------------------------------------------------------------

/// Shared, immutable handle to a generator.
#[derive(Clone)]
pub struct Gen(Arc<dyn Generator>);

impl fmt::Debug for Gen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Gen(..)")
    }
}

impl Gen {
    /// Wrap any [`Generator`] implementation.
    pub fn new(generator: impl Generator + 'static) -> Self {
        Self(Arc::new(generator))
    }

    /// Build a generator from a closure.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&mut GenContext) -> Result<String> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Run the generator once.
    pub fn generate(&self, ctx: &mut GenContext) -> Result<String> {
        self.0.generate(ctx)
    }

    /// Sequence: this generator's output followed by `next`'s.
    pub fn then(self, next: impl Into<Gen>) -> Gen {
        seq([self, next.into()])
    }

    /// Uniform choice between this generator and `other`.
    pub fn or(self, other: impl Into<Gen>) -> Gen {
        let alternatives = [self, other.into()];
        Gen::from_fn(move |ctx| {
            let idx = ctx.gen_range(0..alternatives.len());
            alternatives[idx].generate(ctx)
        })
    }

    /// Post-process the produced text.
    pub fn map<F>(self, f: F) -> Gen
    where
        F: Fn(String) -> String + Send + Sync + 'static,
    {
        Gen::from_fn(move |ctx| self.generate(ctx).map(&f))
    }

    /// Surround the produced text with the outputs of `before` and `after`.
    pub fn between(self, before: impl Into<Gen>, after: impl Into<Gen>) -> Gen {
        seq([before.into(), self, after.into()])
    }

    /// `(text)`
    pub fn wrap_parens(self) -> Gen {
        self.map(|s| format!("({s})"))
    }

    /// `[text]`
    pub fn wrap_brackets(self) -> Gen {
        self.map(|s| format!("[{s}]"))
    }

    /// `{ text }`
    pub fn wrap_braces(self) -> Gen {
        self.map(|s| format!("{{ {s} }}"))
    }
}

impl From<&'static str> for Gen {
    fn from(s: &'static str) -> Self {
        literal(s)
    }
}

impl From<String> for Gen {
    fn from(s: String) -> Self {
        literal(s)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
