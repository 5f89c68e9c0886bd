// src/errors/generation.rs
//! Generator errors (G0xxx).
//!
//! Construction errors fire when a combinator is built with an invalid
//! option list. Invocation errors fire when a generator is run with an
//! argument that was only checked lazily (see [`count`](crate::generator::count)).

#![allow(unused_assignments)] // False positives from thiserror derive

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic, Clone, PartialEq)]
pub enum GenError {
    #[error("choice requires at least one alternative")]
    #[diagnostic(code(G0001))]
    EmptyChoice,

    #[error("weighted choice requires at least one option")]
    #[diagnostic(code(G0002))]
    EmptyOptions,

    #[error("total weight must be positive, got {total}")]
    #[diagnostic(code(G0003), help("give at least one option a weight above zero"))]
    NonPositiveWeight { total: f64 },

    #[error("depth choice requires at least one terminal production")]
    #[diagnostic(code(G0004))]
    NoTerminals,

    #[error("depth choice requires at least one recursive production")]
    #[diagnostic(code(G0005))]
    NoRecursives,

    #[error("repetition count must be positive, got {n}")]
    #[diagnostic(
        code(G0006),
        help("use `many` or `optional` when zero repetitions are acceptable")
    )]
    NonPositiveCount { n: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_value() {
        let err = GenError::NonPositiveWeight { total: -1.5 };
        assert_eq!(err.to_string(), "total weight must be positive, got -1.5");

        let err = GenError::NonPositiveCount { n: 0 };
        assert_eq!(err.to_string(), "repetition count must be positive, got 0");
    }

    #[test]
    fn every_variant_has_a_code() {
        let all = [
            GenError::EmptyChoice,
            GenError::EmptyOptions,
            GenError::NonPositiveWeight { total: 0.0 },
            GenError::NoTerminals,
            GenError::NoRecursives,
            GenError::NonPositiveCount { n: 0 },
        ];
        for err in all {
            let code = err.code().map(|c| c.to_string());
            assert!(
                code.as_deref().is_some_and(|c| c.starts_with("G0")),
                "missing code for {err:?}"
            );
        }
    }
}
