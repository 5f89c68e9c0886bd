//! Primitive and compound generators.
//!
//! Construction-time checks (empty option lists, non-positive weights) are
//! reported when the combinator is built. [`count`] is the one exception: its
//! argument is validated when the generator runs.

use crate::errors::{GenError, Result};

use super::{Gen, GenContext};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Always produces `s`.
pub fn literal(s: impl Into<String>) -> Gen {
    let s = s.into();
    Gen::from_fn(move |_| Ok(s.clone()))
}

/// Always produces the empty string.
pub fn empty() -> Gen {
    Gen::from_fn(|_| Ok(String::new()))
}

/// Always produces a single space.
pub fn space() -> Gen {
    literal(" ")
}

/// Uniform pick among fixed strings.
pub fn one_of(items: &'static [&'static str]) -> Result<Gen> {
    if items.is_empty() {
        return Err(GenError::EmptyChoice);
    }
    Ok(Gen::from_fn(move |ctx| {
        let idx = ctx.gen_range(0..items.len());
        Ok(items[idx].to_string())
    }))
}

// ---------------------------------------------------------------------------
// Sequencing and choice
// ---------------------------------------------------------------------------

/// Concatenate outputs in order. No generators yields `""`.
pub fn seq(gens: impl IntoIterator<Item = Gen>) -> Gen {
    let gens: Vec<Gen> = gens.into_iter().collect();
    Gen::from_fn(move |ctx| {
        let mut out = String::new();
        for g in &gens {
            out.push_str(&g.generate(ctx)?);
        }
        Ok(out)
    })
}

/// Uniform pick among generators.
pub fn choice(gens: impl IntoIterator<Item = Gen>) -> Result<Gen> {
    let gens: Vec<Gen> = gens.into_iter().collect();
    if gens.is_empty() {
        return Err(GenError::EmptyChoice);
    }
    Ok(Gen::from_fn(move |ctx| {
        let idx = ctx.gen_range(0..gens.len());
        gens[idx].generate(ctx)
    }))
}

/// Pick a generator with probability proportional to its weight.
///
/// Draws `r` uniformly from `[0, total)` and walks the options subtracting
/// weights until `r <= 0`. If rounding keeps `r` positive past the end, the
/// last option is used.
pub fn weighted_choice(options: impl IntoIterator<Item = (f64, Gen)>) -> Result<Gen> {
    let options: Vec<(f64, Gen)> = options.into_iter().collect();
    if options.is_empty() {
        return Err(GenError::EmptyOptions);
    }
    let total: f64 = options.iter().map(|(w, _)| *w).sum();
    // `!(total > 0.0)` also rejects NaN.
    if !(total > 0.0) {
        return Err(GenError::NonPositiveWeight { total });
    }
    Ok(Gen::from_fn(move |ctx| {
        let idx = weighted_index(&options, total, ctx.unit_f64());
        options[idx].1.generate(ctx)
    }))
}

/// Index selected by a roll in `[0, 1)` scaled to `total`.
fn weighted_index(options: &[(f64, Gen)], total: f64, unit_roll: f64) -> usize {
    let mut roll = unit_roll * total;
    for (idx, (weight, _)) in options.iter().enumerate() {
        roll -= weight;
        if *weight > 0.0 && roll <= 0.0 {
            return idx;
        }
    }
    options.len() - 1
}

// ---------------------------------------------------------------------------
// Depth-gated choice
// ---------------------------------------------------------------------------

/// Terminal at max depth; otherwise recursive with the context's decay
/// probability, evaluated one level deeper.
pub fn depth_choice(terminal: Gen, recursive: Gen) -> Gen {
    Gen::from_fn(move |ctx| {
        if ctx.is_at_max_depth() {
            return terminal.generate(ctx);
        }
        let p = ctx.recursive_probability();
        if ctx.unit_f64() < p {
            ctx.deeper(|ctx| recursive.generate(ctx))
        } else {
            terminal.generate(ctx)
        }
    })
}

/// List form of [`depth_choice`]: uniform pick within whichever list wins.
pub fn depth_choice_among(terminals: Vec<Gen>, recursives: Vec<Gen>) -> Result<Gen> {
    if terminals.is_empty() {
        return Err(GenError::NoTerminals);
    }
    if recursives.is_empty() {
        return Err(GenError::NoRecursives);
    }
    Ok(Gen::from_fn(move |ctx| {
        if ctx.is_at_max_depth() {
            let idx = ctx.gen_range(0..terminals.len());
            return terminals[idx].generate(ctx);
        }
        let p = ctx.recursive_probability();
        if ctx.unit_f64() < p {
            ctx.deeper(|ctx| {
                let idx = ctx.gen_range(0..recursives.len());
                recursives[idx].generate(ctx)
            })
        } else {
            let idx = ctx.gen_range(0..terminals.len());
            terminals[idx].generate(ctx)
        }
    }))
}

// ---------------------------------------------------------------------------
// Repetition
// ---------------------------------------------------------------------------

fn repeat_into(inner: &Gen, n: usize, ctx: &mut GenContext) -> Result<String> {
    let mut out = String::new();
    for _ in 0..n {
        out.push_str(&inner.generate(ctx)?);
    }
    Ok(out)
}

/// `0..=max_repeat` repetitions.
pub fn many(inner: Gen) -> Gen {
    Gen::from_fn(move |ctx| {
        let n = ctx.random_in(0, ctx.config().max_repeat);
        repeat_into(&inner, n, ctx)
    })
}

/// `1..=max_repeat` repetitions (at least one even when `max_repeat` is 0).
pub fn many1(inner: Gen) -> Gen {
    Gen::from_fn(move |ctx| {
        let n = ctx.random_in(1, ctx.config().max_repeat);
        repeat_into(&inner, n, ctx)
    })
}

/// Exactly `n` repetitions. `n == 0` is rejected when the generator runs.
pub fn count(n: usize, inner: Gen) -> Gen {
    Gen::from_fn(move |ctx| {
        if n == 0 {
            return Err(GenError::NonPositiveCount { n });
        }
        repeat_into(&inner, n, ctx)
    })
}

/// Coin flip between `""` and `inner`.
pub fn optional(inner: Gen) -> Gen {
    Gen::from_fn(move |ctx| {
        if ctx.coin() {
            inner.generate(ctx)
        } else {
            Ok(String::new())
        }
    })
}

fn interleave(inner: &Gen, sep: &Gen, n: usize, ctx: &mut GenContext) -> Result<String> {
    let mut out = String::new();
    for i in 0..n {
        if i > 0 {
            out.push_str(&sep.generate(ctx)?);
        }
        out.push_str(&inner.generate(ctx)?);
    }
    Ok(out)
}

/// `0..=max_repeat` occurrences of `inner` separated by `sep`.
pub fn sep_by(inner: Gen, sep: Gen) -> Gen {
    Gen::from_fn(move |ctx| {
        let n = ctx.random_in(0, ctx.config().max_repeat);
        interleave(&inner, &sep, n, ctx)
    })
}

/// `1..=max_repeat` occurrences of `inner` separated by `sep`.
pub fn sep_by1(inner: Gen, sep: Gen) -> Gen {
    Gen::from_fn(move |ctx| {
        let n = ctx.random_in(1, ctx.config().max_repeat);
        interleave(&inner, &sep, n, ctx)
    })
}

// ---------------------------------------------------------------------------
// Deferred construction
// ---------------------------------------------------------------------------

/// Build the wrapped generator on every invocation.
///
/// Lets mutually recursive rules refer to each other without building an
/// infinite generator graph up front. Construction errors of the supplied
/// rule surface as invocation errors.
pub fn lazy<F>(supplier: F) -> Gen
where
    F: Fn() -> Result<Gen> + Send + Sync + 'static,
{
    Gen::from_fn(move |ctx| supplier()?.generate(ctx))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
