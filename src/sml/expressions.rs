//! Expression grammar.
//!
//! Three depth-gated entry points: [`atomic_expression`] for operands,
//! [`expression`] for the full language and [`simple_expression`] for the
//! right-hand sides of bindings, which keeps declarations compact.

use crate::errors::Result;
use crate::generator::{
    Gen, depth_choice, lazy, literal, many1, sep_by, sep_by1, seq, weighted_choice,
};

use super::declarations::declarations;
use super::lexical::{
    builtin_value_id, constant, infix_op, label, long_value_id, opt_ws, prefix_op, req_ws,
};
use super::patterns::pattern;
use super::types::ty;

fn comma() -> Gen {
    seq([literal(","), opt_ws()])
}

fn bar() -> Gen {
    seq([opt_ws(), literal("|"), opt_ws()])
}

// ---------------------------------------------------------------------------
// Atoms
// ---------------------------------------------------------------------------

/// `op <infix>`. A trailing `*` is followed by a space so that a closing
/// parenthesis can never turn it into `*)`.
pub fn op_expression() -> Result<Gen> {
    Ok(seq([literal("op"), req_ws(), infix_op()?]).map(|s| {
        if s.ends_with('*') { s + " " } else { s }
    }))
}

pub fn unit_expression() -> Gen {
    literal("()")
}

/// Constant, variable, builtin value, `()` or `op` identifier.
pub fn simple_atomic_expression() -> Result<Gen> {
    weighted_choice([
        (0.35, constant()?),
        (0.35, long_value_id()?),
        (0.15, builtin_value_id()?),
        (0.10, unit_expression()),
        (0.05, op_expression()?),
    ])
}

// ---------------------------------------------------------------------------
// Compound expressions
// ---------------------------------------------------------------------------

fn exp_row() -> Result<Gen> {
    Ok(seq([label()?, opt_ws(), literal("="), opt_ws(), lazy(expression)]))
}

pub fn record_expression() -> Result<Gen> {
    Ok(seq([opt_ws(), sep_by1(lazy(exp_row), comma()), opt_ws()]).wrap_braces())
}

/// `#label`
pub fn selector_expression() -> Result<Gen> {
    Ok(seq([literal("#"), label()?]))
}

/// At least two components.
pub fn tuple_expression() -> Result<Gen> {
    Ok(seq([
        opt_ws(),
        lazy(expression),
        comma(),
        sep_by1(lazy(expression), comma()),
        opt_ws(),
    ])
    .wrap_parens())
}

pub fn list_expression() -> Result<Gen> {
    Ok(seq([opt_ws(), sep_by(lazy(expression), comma()), opt_ws()]).wrap_brackets())
}

/// `(e1; e2; ...)` with at least two expressions.
pub fn sequence_expression() -> Result<Gen> {
    let semi = seq([literal(";"), opt_ws()]);
    Ok(seq([
        opt_ws(),
        lazy(expression),
        semi.clone(),
        sep_by1(lazy(expression), semi),
        opt_ws(),
    ])
    .wrap_parens())
}

pub fn paren_expression() -> Result<Gen> {
    Ok(seq([opt_ws(), lazy(expression), opt_ws()]).wrap_parens())
}

// ---------------------------------------------------------------------------
// Control flow
// ---------------------------------------------------------------------------

pub fn if_expression() -> Result<Gen> {
    Ok(seq([
        literal("if"),
        req_ws(),
        lazy(expression),
        req_ws(),
        literal("then"),
        req_ws(),
        lazy(expression),
        req_ws(),
        literal("else"),
        req_ws(),
        lazy(expression),
    ]))
}

pub fn while_expression() -> Result<Gen> {
    Ok(seq([
        literal("while"),
        req_ws(),
        lazy(expression),
        req_ws(),
        literal("do"),
        req_ws(),
        lazy(expression),
    ]))
}

/// `pat => exp`
pub fn match_rule() -> Result<Gen> {
    Ok(seq([
        lazy(pattern),
        opt_ws(),
        literal("=>"),
        opt_ws(),
        lazy(expression),
    ]))
}

fn match_rules() -> Gen {
    sep_by1(lazy(match_rule), bar())
}

pub fn case_expression() -> Result<Gen> {
    Ok(seq([
        literal("case"),
        req_ws(),
        lazy(expression),
        req_ws(),
        literal("of"),
        req_ws(),
        match_rules(),
    ]))
}

pub fn fn_expression() -> Result<Gen> {
    Ok(seq([literal("fn"), req_ws(), match_rules()]))
}

// ---------------------------------------------------------------------------
// Operators and application
// ---------------------------------------------------------------------------

pub fn infix_expression() -> Result<Gen> {
    Ok(seq([
        lazy(atomic_expression),
        req_ws(),
        infix_op()?,
        req_ws(),
        lazy(expression),
    ]))
}

pub fn cons_expression() -> Result<Gen> {
    Ok(seq([
        lazy(atomic_expression),
        opt_ws(),
        literal("::"),
        opt_ws(),
        lazy(expression),
    ]))
}

fn keyword_infix(keyword: &'static str) -> Gen {
    seq([
        lazy(atomic_expression),
        req_ws(),
        literal(keyword),
        req_ws(),
        lazy(expression),
    ])
}

pub fn andalso_expression() -> Result<Gen> {
    Ok(keyword_infix("andalso"))
}

pub fn orelse_expression() -> Result<Gen> {
    Ok(keyword_infix("orelse"))
}

/// `f x`
pub fn app_expression() -> Result<Gen> {
    Ok(seq([lazy(atomic_expression), req_ws(), lazy(atomic_expression)]))
}

/// `f x y ...`
pub fn multi_app_expression() -> Result<Gen> {
    Ok(seq([
        lazy(atomic_expression),
        many1(seq([req_ws(), lazy(atomic_expression)])),
    ]))
}

/// `not x`, `~ x`, `! r`, ...
pub fn prefix_app_expression() -> Result<Gen> {
    Ok(seq([prefix_op()?, req_ws(), lazy(atomic_expression)]))
}

// ---------------------------------------------------------------------------
// Types, exceptions, let
// ---------------------------------------------------------------------------

pub fn typed_expression() -> Result<Gen> {
    Ok(seq([
        lazy(atomic_expression),
        opt_ws(),
        literal(":"),
        opt_ws(),
        lazy(ty),
    ]))
}

pub fn raise_expression() -> Result<Gen> {
    Ok(seq([literal("raise"), req_ws(), lazy(expression)]))
}

pub fn handle_expression() -> Result<Gen> {
    Ok(seq([
        lazy(atomic_expression),
        req_ws(),
        literal("handle"),
        req_ws(),
        match_rules(),
    ]))
}

/// `let decs in e1; ...; en end`
pub fn let_expression() -> Result<Gen> {
    let body = sep_by1(lazy(expression), seq([opt_ws(), literal(";"), opt_ws()]));
    Ok(seq([
        literal("let"),
        req_ws(),
        lazy(declarations),
        req_ws(),
        literal("in"),
        req_ws(),
        body,
        req_ws(),
        literal("end"),
    ]))
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Operand position: atoms and self-delimiting forms only.
pub fn atomic_expression() -> Result<Gen> {
    let recursive = weighted_choice([
        (0.40, simple_atomic_expression()?),
        (0.15, lazy(record_expression)),
        (0.15, lazy(tuple_expression)),
        (0.15, lazy(list_expression)),
        (0.10, lazy(paren_expression)),
        (0.05, lazy(selector_expression)),
    ])?;
    Ok(depth_choice(simple_atomic_expression()?, recursive))
}

pub fn expression() -> Result<Gen> {
    let recursive = weighted_choice([
        (0.18, simple_atomic_expression()?),
        (0.11, lazy(app_expression)),
        (0.10, lazy(infix_expression)),
        (0.10, lazy(if_expression)),
        (0.08, lazy(fn_expression)),
        (0.08, lazy(let_expression)),
        (0.07, lazy(case_expression)),
        (0.05, lazy(tuple_expression)),
        (0.05, lazy(list_expression)),
        (0.04, lazy(cons_expression)),
        (0.03, lazy(andalso_expression)),
        (0.03, lazy(orelse_expression)),
        (0.02, lazy(typed_expression)),
        (0.02, lazy(handle_expression)),
        (0.02, lazy(raise_expression)),
        (0.02, lazy(while_expression)),
        (0.02, lazy(sequence_expression)),
        (0.02, lazy(multi_app_expression)),
        (0.02, lazy(prefix_app_expression)),
    ])?;
    Ok(depth_choice(simple_atomic_expression()?, recursive))
}

/// Smaller expression language for binding right-hand sides.
pub fn simple_expression() -> Result<Gen> {
    let recursive = weighted_choice([
        (0.40, simple_atomic_expression()?),
        (0.20, lazy(app_expression)),
        (0.15, lazy(infix_expression)),
        (0.10, lazy(tuple_expression)),
        (0.10, lazy(list_expression)),
        (0.05, lazy(fn_expression)),
    ])?;
    Ok(depth_choice(simple_atomic_expression()?, recursive))
}
