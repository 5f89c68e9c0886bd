//! Pattern grammar.
//!
//! `atomic_pattern` and `pattern` are depth-gated: once the context reaches
//! its depth limit only the non-recursive atoms remain reachable.

use crate::errors::Result;
use crate::generator::{
    Gen, depth_choice, lazy, literal, optional, sep_by, sep_by1, seq, weighted_choice,
};

use super::lexical::{
    builtin_value_id, label, opt_ws, pattern_constant, req_ws, struct_id, value_id,
};
use super::types::ty;

// ---------------------------------------------------------------------------
// Atoms
// ---------------------------------------------------------------------------

pub fn wildcard() -> Gen {
    literal("_")
}

pub fn unit_pattern() -> Gen {
    literal("()")
}

pub fn nil_pattern() -> Gen {
    literal("[]")
}

/// Non-recursive atom: variable, `_`, constant, `()` or `[]`.
pub fn simple_atomic_pattern() -> Result<Gen> {
    weighted_choice([
        (0.35, value_id()),
        (0.25, wildcard()),
        (0.25, pattern_constant()?),
        (0.10, unit_pattern()),
        (0.05, nil_pattern()),
    ])
}

// ---------------------------------------------------------------------------
// Constructed patterns
// ---------------------------------------------------------------------------

fn comma() -> Gen {
    seq([literal(","), opt_ws()])
}

/// `label = pat`, a punned label, or `...`.
fn pattern_row() -> Result<Gen> {
    let full = seq([label()?, opt_ws(), literal("="), opt_ws(), lazy(pattern)]);
    weighted_choice([
        (0.7, full),
        (0.2, value_id()),
        (0.1, literal("...")),
    ])
}

pub fn record_pattern() -> Result<Gen> {
    Ok(seq([opt_ws(), sep_by1(lazy(pattern_row), comma()), opt_ws()]).wrap_braces())
}

/// At least two components.
pub fn tuple_pattern() -> Result<Gen> {
    Ok(seq([
        opt_ws(),
        lazy(pattern),
        comma(),
        sep_by1(lazy(pattern), comma()),
        opt_ws(),
    ])
    .wrap_parens())
}

pub fn list_pattern() -> Result<Gen> {
    Ok(seq([opt_ws(), sep_by(lazy(pattern), comma()), opt_ws()]).wrap_brackets())
}

/// `atpat :: pat`
pub fn cons_pattern() -> Result<Gen> {
    Ok(seq([
        lazy(atomic_pattern),
        opt_ws(),
        literal("::"),
        opt_ws(),
        lazy(pattern),
    ]))
}

/// Nullary builtin constructor, `SOME atpat`, or `Con atpat`.
pub fn constructor_pattern() -> Result<Gen> {
    weighted_choice([
        (0.4, builtin_value_id()?),
        (0.3, seq([literal("SOME"), req_ws(), lazy(atomic_pattern)])),
        (0.3, seq([struct_id(), req_ws(), lazy(atomic_pattern)])),
    ])
}

/// `atpat : ty`
pub fn typed_pattern() -> Result<Gen> {
    Ok(seq([
        lazy(atomic_pattern),
        opt_ws(),
        literal(":"),
        opt_ws(),
        lazy(ty),
    ]))
}

/// `id as pat`
pub fn layered_pattern() -> Result<Gen> {
    Ok(seq([
        value_id(),
        req_ws(),
        literal("as"),
        req_ws(),
        lazy(pattern),
    ]))
}

pub fn paren_pattern() -> Result<Gen> {
    Ok(seq([opt_ws(), lazy(pattern), opt_ws()]).wrap_parens())
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Pattern usable as a function argument or constructor operand.
pub fn atomic_pattern() -> Result<Gen> {
    let recursive = weighted_choice([
        (0.40, simple_atomic_pattern()?),
        (0.20, lazy(record_pattern)),
        (0.15, lazy(tuple_pattern)),
        (0.15, lazy(list_pattern)),
        (0.10, lazy(paren_pattern)),
    ])?;
    Ok(depth_choice(simple_atomic_pattern()?, recursive))
}

pub fn pattern() -> Result<Gen> {
    let recursive = weighted_choice([
        (0.35, simple_atomic_pattern()?),
        (0.15, lazy(cons_pattern)),
        (0.10, lazy(constructor_pattern)),
        (0.10, lazy(typed_pattern)),
        (0.10, lazy(tuple_pattern)),
        (0.08, lazy(list_pattern)),
        (0.07, lazy(record_pattern)),
        (0.05, lazy(layered_pattern)),
    ])?;
    Ok(depth_choice(simple_atomic_pattern()?, recursive))
}

/// Space-separated atomic patterns of a `fun` clause.
pub fn fun_arg_pats() -> Result<Gen> {
    Ok(sep_by1(lazy(atomic_pattern), req_ws()))
}

/// Optional `: ty` suffix.
pub fn opt_type_annotation() -> Result<Gen> {
    Ok(optional(seq([opt_ws(), literal(":"), opt_ws(), lazy(ty)])))
}
