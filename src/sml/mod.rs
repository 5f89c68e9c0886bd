//! Standard ML grammar rules.
//!
//! Layered bottom-up: [`lexical`] tokens feed [`patterns`] and [`types`],
//! which feed [`expressions`] and [`declarations`]. [`edge_cases`] holds the
//! fixed catalog of unusual fragments.
//!
//! Every rule is a function that builds a fresh [`Gen`](crate::generator::Gen).
//! References to rules that can reach back to the caller go through
//! [`lazy`](crate::generator::lazy), so building a rule never recurses.

pub mod declarations;
pub mod edge_cases;
pub mod expressions;
pub mod lexical;
pub mod patterns;
pub mod types;
