//! IR optimization passes for the Mica compiler.
//!
//! This crate provides:
//!
//! - **Reaching definitions** ([`compute_reaching`]) — forward worklist
//!   analysis mapping every statement line to each variable's possible
//!   definition sites.
//! - **Liveness** ([`compute_liveness`]) — backward may-read analysis
//!   per statement line.
//! - **Neededness** ([`compute_needed`]) — liveness refined with effect
//!   tracking; the analysis that drives dead-code elimination.
//! - **Constant folding** ([`fold_stmt`], [`fold_expr`]) — pure
//!   evaluation of literal `Binary`/`Unary` expressions.
//! - **Dead-code elimination** ([`sweep_block`]) — removal of
//!   assignments whose target is needed nowhere.
//! - **The driver** ([`optimize_program`]) — alternates folding and
//!   sweeping to a fixed point, per function body.
//! - **Validation** ([`validate_program`]) — explicit structural checks
//!   for callers that do not trust the lowering front end.
//!
//! # Pipeline Position
//!
//! ```text
//! Source → Lex → Parse → Type Check → Lower → **Optimize** → Codegen
//! ```
//!
//! The optimizer is a library pass: no configuration, no I/O, no
//! persistent state. It treats input IR as immutable and returns fresh
//! IR; annotation payloads are preserved verbatim on every rewritten
//! node.

mod graph;

pub mod const_fold;
pub mod dce;
pub mod liveness;
pub mod needed;
pub mod optimize;
pub mod reaching;
pub mod validate;

#[cfg(test)]
mod test_helpers;

pub use const_fold::{fold_expr, fold_stmt};
pub use dce::sweep_block;
pub use liveness::{compute_liveness, LivenessMap};
pub use needed::{compute_needed, NeededMap};
pub use optimize::optimize_program;
pub use reaching::{compute_reaching, DefSites, ReachingDefs};
pub use validate::{validate_program, ValidateError};
