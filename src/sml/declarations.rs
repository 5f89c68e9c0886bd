//! Declaration grammar.

use crate::errors::Result;
use crate::generator::{
    Gen, depth_choice, empty, lazy, literal, optional, sep_by1, seq, weighted_choice,
};

use super::expressions::{fn_expression, simple_expression};
use super::lexical::{
    long_tycon_id, long_value_id, newline, opt_ws, precedence, req_ws, struct_id, symbolic_id,
    tycon_id, value_id,
};
use super::patterns::{fun_arg_pats, opt_type_annotation, pattern};
use super::types::{ty, ty_var_seq};

/// ` and ` between bindings.
fn and() -> Gen {
    seq([req_ws(), literal("and"), req_ws()])
}

fn bar() -> Gen {
    seq([opt_ws(), literal("|"), opt_ws()])
}

fn equals() -> Gen {
    seq([opt_ws(), literal("="), opt_ws()])
}

// ---------------------------------------------------------------------------
// Values and functions
// ---------------------------------------------------------------------------

fn val_bind() -> Result<Gen> {
    Ok(seq([lazy(pattern), equals(), lazy(simple_expression)]))
}

/// `val pat = exp [and ...]`
pub fn val_dec() -> Result<Gen> {
    Ok(seq([literal("val"), req_ws(), sep_by1(lazy(val_bind), and())]))
}

/// `val rec f = fn ... [and ...]`
pub fn val_rec_dec() -> Result<Gen> {
    let bind = seq([value_id(), equals(), lazy(fn_expression)]);
    Ok(seq([
        literal("val"),
        req_ws(),
        literal("rec"),
        req_ws(),
        sep_by1(bind, and()),
    ]))
}

fn fun_clause() -> Result<Gen> {
    Ok(seq([
        value_id(),
        req_ws(),
        lazy(fun_arg_pats),
        opt_type_annotation()?,
        equals(),
        lazy(simple_expression),
    ]))
}

/// `fun f p1 [: ty] = e1 | f p2 = e2 [and g ...]`
pub fn fun_dec() -> Result<Gen> {
    let bind = sep_by1(lazy(fun_clause), bar());
    Ok(seq([literal("fun"), req_ws(), sep_by1(bind, and())]))
}

// ---------------------------------------------------------------------------
// Types and datatypes
// ---------------------------------------------------------------------------

fn type_bind() -> Result<Gen> {
    Ok(seq([ty_var_seq()?, tycon_id(), equals(), lazy(ty)]))
}

pub fn type_dec() -> Result<Gen> {
    Ok(seq([literal("type"), req_ws(), sep_by1(lazy(type_bind), and())]))
}

/// `Con` or `Con of ty`.
fn con_bind() -> Result<Gen> {
    let with_arg = seq([struct_id(), req_ws(), literal("of"), req_ws(), lazy(ty)]);
    weighted_choice([(0.5, struct_id()), (0.5, with_arg)])
}

fn data_bind() -> Result<Gen> {
    Ok(seq([
        ty_var_seq()?,
        tycon_id(),
        equals(),
        sep_by1(lazy(con_bind), bar()),
    ]))
}

fn with_type() -> Gen {
    optional(seq([
        req_ws(),
        literal("withtype"),
        req_ws(),
        sep_by1(lazy(type_bind), and()),
    ]))
}

pub fn datatype_dec() -> Result<Gen> {
    Ok(seq([
        literal("datatype"),
        req_ws(),
        sep_by1(lazy(data_bind), and()),
        with_type(),
    ]))
}

/// `datatype t = datatype S.u`
pub fn datatype_replication_dec() -> Result<Gen> {
    Ok(seq([
        literal("datatype"),
        req_ws(),
        tycon_id(),
        equals(),
        literal("datatype"),
        req_ws(),
        long_tycon_id()?,
    ]))
}

// ---------------------------------------------------------------------------
// Exceptions, scoping, fixity
// ---------------------------------------------------------------------------

fn exn_bind() -> Result<Gen> {
    let with_arg = seq([value_id(), req_ws(), literal("of"), req_ws(), lazy(ty)]);
    let alias = seq([value_id(), equals(), long_value_id()?]);
    weighted_choice([(0.4, value_id()), (0.4, with_arg), (0.2, alias)])
}

pub fn exception_dec() -> Result<Gen> {
    Ok(seq([
        literal("exception"),
        req_ws(),
        sep_by1(lazy(exn_bind), and()),
    ]))
}

/// `local decs in decs end`
pub fn local_dec() -> Result<Gen> {
    Ok(seq([
        literal("local"),
        req_ws(),
        lazy(declarations),
        req_ws(),
        literal("in"),
        req_ws(),
        lazy(declarations),
        req_ws(),
        literal("end"),
    ]))
}

/// Fixity operands are always followed by whitespace, `;` or a newline, so a
/// symbolic operand ending in `*` never meets a `)`.
fn fixity(keyword: &'static str) -> Result<Gen> {
    let operand = weighted_choice([(0.8, value_id()), (0.2, symbolic_id())])?;
    Ok(seq([
        literal(keyword),
        optional(seq([req_ws(), precedence()])),
        req_ws(),
        sep_by1(operand, req_ws()),
    ]))
}

/// `infix [d] id ...`
pub fn infix_dec() -> Result<Gen> {
    fixity("infix")
}

/// `infixr [d] id ...`
pub fn infixr_dec() -> Result<Gen> {
    fixity("infixr")
}

pub fn nonfix_dec() -> Result<Gen> {
    Ok(seq([literal("nonfix"), req_ws(), sep_by1(value_id(), req_ws())]))
}

pub fn open_dec() -> Result<Gen> {
    Ok(seq([literal("open"), req_ws(), sep_by1(struct_id(), req_ws())]))
}

/// The empty declaration.
pub fn empty_dec() -> Gen {
    empty()
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Non-recursive declaration forms used at the depth limit.
pub fn simple_declaration() -> Result<Gen> {
    weighted_choice([
        (0.50, lazy(val_dec)),
        (0.30, lazy(type_dec)),
        (0.10, lazy(exception_dec)),
        (0.05, infix_dec()?),
        (0.05, nonfix_dec()?),
    ])
}

pub fn declaration() -> Result<Gen> {
    let recursive = weighted_choice([
        (0.24, lazy(val_dec)),
        (0.25, lazy(fun_dec)),
        (0.15, lazy(datatype_dec)),
        (0.10, lazy(type_dec)),
        (0.08, lazy(exception_dec)),
        (0.05, lazy(local_dec)),
        (0.03, lazy(infix_dec)),
        (0.02, lazy(infixr_dec)),
        (0.02, lazy(nonfix_dec)),
        (0.02, lazy(val_rec_dec)),
        (0.02, lazy(open_dec)),
        (0.02, lazy(datatype_replication_dec)),
    ])?;
    Ok(depth_choice(simple_declaration()?, recursive))
}

/// One or more declarations separated by whitespace, `;` or newlines.
pub fn declarations() -> Result<Gen> {
    let separator = weighted_choice([
        (0.5, req_ws()),
        (0.3, seq([literal(";"), opt_ws()])),
        (0.2, seq([newline(), opt_ws()])),
    ])?;
    Ok(sep_by1(lazy(declaration), separator))
}
