//! Type-expression grammar.

use crate::errors::Result;
use crate::generator::{
    Gen, choice, depth_choice, lazy, literal, sep_by1, seq, weighted_choice,
};

use super::lexical::{any_type_var, builtin_type_id, label, long_tycon_id, opt_ws, req_ws};

pub fn ty_var() -> Result<Gen> {
    any_type_var()
}

/// Builtin type name or a possibly qualified type constructor.
pub fn ty_const() -> Result<Gen> {
    weighted_choice([(0.7, builtin_type_id()?), (0.3, long_tycon_id()?)])
}

pub fn simple_type() -> Result<Gen> {
    weighted_choice([(0.4, ty_var()?), (0.6, ty_const()?)])
}

fn comma() -> Gen {
    seq([literal(","), opt_ws()])
}

fn star() -> Gen {
    seq([opt_ws(), literal("*"), opt_ws()])
}

fn ty_row() -> Result<Gen> {
    Ok(seq([label()?, opt_ws(), literal(":"), opt_ws(), lazy(ty)]))
}

pub fn record_type() -> Result<Gen> {
    Ok(seq([opt_ws(), sep_by1(lazy(ty_row), comma()), opt_ws()]).wrap_braces())
}

/// `atty * atty [* atty ...]`
pub fn tuple_type() -> Result<Gen> {
    Ok(seq([lazy(atomic_type), star(), sep_by1(lazy(atomic_type), star())]))
}

pub fn function_type() -> Result<Gen> {
    Ok(seq([
        lazy(atomic_type),
        opt_ws(),
        literal("->"),
        opt_ws(),
        lazy(ty),
    ]))
}

/// `atty tycon` or `(ty, ...) tycon`.
pub fn ty_con_app() -> Result<Gen> {
    let unary = seq([lazy(atomic_type), req_ws(), ty_const()?]);
    let nary = seq([sep_by1(lazy(ty), comma()).wrap_parens(), req_ws(), ty_const()?]);
    weighted_choice([(0.6, unary), (0.4, nary)])
}

pub fn paren_type() -> Result<Gen> {
    Ok(seq([opt_ws(), lazy(ty), opt_ws()]).wrap_parens())
}

pub fn atomic_type() -> Result<Gen> {
    let recursive = weighted_choice([
        (0.50, simple_type()?),
        (0.20, lazy(record_type)),
        (0.15, lazy(paren_type)),
        (0.15, lazy(ty_con_app)),
    ])?;
    Ok(depth_choice(simple_type()?, recursive))
}

/// Full type expression.
pub fn ty() -> Result<Gen> {
    let recursive = weighted_choice([
        (0.35, simple_type()?),
        (0.25, lazy(function_type)),
        (0.15, lazy(tuple_type)),
        (0.10, lazy(record_type)),
        (0.10, lazy(ty_con_app)),
        (0.05, lazy(paren_type)),
    ])?;
    Ok(depth_choice(simple_type()?, recursive))
}

/// Type parameters of a `type`/`datatype` binding, with trailing space.
pub fn ty_var_seq() -> Result<Gen> {
    let many = seq([sep_by1(ty_var()?, comma()).wrap_parens(), req_ws()]);
    weighted_choice([
        (0.5, literal("")),
        (0.3, seq([ty_var()?, req_ws()])),
        (0.2, many),
    ])
}

pub fn list_type() -> Result<Gen> {
    Ok(seq([lazy(atomic_type), req_ws(), literal("list")]))
}

pub fn option_type() -> Result<Gen> {
    Ok(seq([lazy(atomic_type), req_ws(), literal("option")]))
}

pub fn ref_type() -> Result<Gen> {
    Ok(seq([lazy(atomic_type), req_ws(), literal("ref")]))
}

/// Builtin, `t list`, or `t option`.
pub fn common_type() -> Result<Gen> {
    choice([builtin_type_id()?, list_type()?, option_type()?])
}
