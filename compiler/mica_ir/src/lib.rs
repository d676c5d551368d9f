//! Block-structured IR for the Mica compiler.
//!
//! This crate defines the lowered intermediate representation shared by
//! the optimizer (`mica_opt`) and the code generator: tagged sum types
//! for values, expressions and statements, basic blocks addressed by
//! label, and the [`Line`] statement address used as the key of every
//! analysis map.
//!
//! The IR is operand-atomic (A-normal form): expression children are
//! always [`Value`]s. Every node carries an opaque annotation payload
//! `A` supplied by the lowering front end and preserved verbatim by all
//! rewrites.

mod display;
mod ir;
mod ops;

pub use ir::{
    BasicBlock, ClassDef, Expr, ExprKind, FunDef, Line, NameSet, Program, Stmt, StmtKind, Value,
    ValueKind, VarInit,
};
pub use ops::{BinOp, UnOp};
