//! Program shapes, one per complexity tier.

use crate::errors::Result;
use crate::generator::{Gen, empty, lazy, literal, many, optional, seq, weighted_choice};
use crate::sml::declarations::{
    datatype_dec, declaration, declarations, exception_dec, fun_dec, infix_dec, type_dec,
    val_dec,
};
use crate::sml::edge_cases::{
    obscure_constant, obscure_declaration, obscure_expression, obscure_pattern_binding,
};
use crate::sml::expressions::{expression, let_expression, simple_expression};
use crate::sml::lexical::{
    comment, constant, opt_newline, opt_ws, req_ws, struct_id, tycon_id,
};
use crate::sml::types::{ty, ty_var_seq};

use super::{ProgramComplexity, ProgramConfig};

/// Shape for `config` at `tier`.
pub fn program(config: &ProgramConfig, tier: ProgramComplexity) -> Result<Gen> {
    match tier {
        ProgramComplexity::Minimal => minimal_program(),
        ProgramComplexity::Simple => simple_program(),
        ProgramComplexity::Medium => medium_program(config),
        ProgramComplexity::Complex => complex_program(config),
        ProgramComplexity::Extreme => extreme_program(config),
    }
}

/// `inner` when comments are enabled, nothing otherwise.
fn if_comments(config: &ProgramConfig, inner: Gen) -> Gen {
    if config.include_comments { inner } else { empty() }
}

/// `; <expression>`
fn trailing(inner: Gen) -> Gen {
    seq([literal(";"), opt_ws(), inner])
}

// ---------------------------------------------------------------------------
// Tier shapes
// ---------------------------------------------------------------------------

pub fn minimal_program() -> Result<Gen> {
    weighted_choice([
        (0.4, val_dec()?),
        (0.3, simple_expression()?),
        (0.2, constant()?),
        (0.1, literal("()")),
    ])
}

pub fn simple_program() -> Result<Gen> {
    let two_vals = seq([lazy(val_dec), literal(";"), opt_ws(), lazy(val_dec)]);
    weighted_choice([
        (0.5, lazy(val_dec)),
        (0.3, lazy(fun_dec)),
        (0.1, lazy(type_dec)),
        (0.1, two_vals),
    ])
}

pub fn medium_program(config: &ProgramConfig) -> Result<Gen> {
    Ok(seq([
        if_comments(config, optional(comment())),
        opt_newline()?,
        lazy(declarations),
        opt_newline()?,
        optional(seq([opt_ws(), trailing(lazy(expression))])),
    ]))
}

pub fn complex_program(config: &ProgramConfig) -> Result<Gen> {
    let type_preamble = weighted_choice([(0.6, lazy(datatype_dec)), (0.4, lazy(type_dec))])?;
    Ok(seq([
        if_comments(config, optional(comment())),
        opt_newline()?,
        optional(seq([type_preamble, req_ws()])),
        lazy(declarations),
        opt_newline()?,
        optional(seq([req_ws(), lazy(exception_dec)])),
        opt_newline()?,
        optional(trailing(lazy(expression))),
        if_comments(config, optional(comment())),
    ]))
}

/// `datatype 'a t = A of ty | B | ...` built constructor by constructor.
fn extreme_datatype() -> Result<Gen> {
    let payload = || optional(seq([literal(" of "), lazy(ty)]));
    Ok(seq([
        literal("datatype "),
        ty_var_seq()?,
        tycon_id(),
        literal(" = "),
        struct_id(),
        payload(),
        many(seq([literal(" | "), struct_id(), payload()])),
        req_ws(),
    ]))
}

/// `local <dec> in <dec> end`
fn extreme_local_block() -> Gen {
    seq([
        literal("local"),
        req_ws(),
        lazy(declaration),
        req_ws(),
        literal("in"),
        req_ws(),
        lazy(declaration),
        req_ws(),
        literal("end"),
        req_ws(),
    ])
}

pub fn extreme_program(config: &ProgramConfig) -> Result<Gen> {
    let elements = if config.include_obscure_features {
        many(seq([literal(";"), opt_ws(), program_element(config)?]))
    } else {
        empty()
    };
    Ok(seq([
        if_comments(config, comment()),
        opt_newline()?,
        optional(seq([lazy(infix_dec), req_ws()])),
        optional(extreme_datatype()?),
        optional(seq([lazy(exception_dec), req_ws()])),
        optional(extreme_local_block()),
        lazy(declarations),
        elements,
        opt_newline()?,
        optional(trailing(lazy(let_expression))),
        if_comments(config, optional(seq([opt_ws(), comment()]))),
    ]))
}

// ---------------------------------------------------------------------------
// Top-level items
// ---------------------------------------------------------------------------

/// One top-level item: declaration, expression, comment or nothing. The
/// comment arm is empty unless comments are enabled. With obscure features
/// enabled, catalog entries are mixed in at low weight.
pub fn program_element(config: &ProgramConfig) -> Result<Gen> {
    let base = weighted_choice([
        (0.5, lazy(declaration)),
        (0.3, lazy(expression)),
        (0.1, if_comments(config, comment())),
        (0.1, empty()),
    ])?;
    if !config.include_obscure_features {
        return Ok(base);
    }
    weighted_choice([
        (0.70, base),
        (0.10, lazy(obscure_declaration)),
        (0.10, lazy(obscure_expression)),
        (0.05, lazy(obscure_pattern_binding)),
        (0.05, lazy(obscure_constant)),
    ])
}
