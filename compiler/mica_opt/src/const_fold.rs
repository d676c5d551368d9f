//! Constant folding over pure IR expressions.
//!
//! Rewrites `Binary`/`Unary` expressions whose operands are all literal
//! into a single literal value. Folding is purely syntactic: identifiers
//! are never inlined (constant propagation is a separate concern this
//! pass does not have), and an expression that cannot be evaluated
//! safely at compile time is left for the runtime.
//!
//! Returns `None` for "no change" so the driver can count rewrites.
//!
//! # Deferred to runtime
//!
//! - Division or modulo with a literal zero divisor — folding would
//!   erase the trap.
//! - Mixed-type arithmetic and comparisons the type checker would have
//!   rejected anyway.
//!
//! The folded literal inherits the annotation of the left (binary) or
//! only (unary) operand; the enclosing expression keeps its own.

use num_traits::Zero;

use mica_ir::{BinOp, Expr, ExprKind, Stmt, StmtKind, UnOp, Value, ValueKind};

/// Fold the expression inside a statement, if it has one and it folds.
///
/// Only `Assign` and `Expr` statements own expressions; operand positions
/// of the other statement kinds hold values, which are already atomic.
pub fn fold_stmt<A: Clone>(stmt: &Stmt<A>) -> Option<Stmt<A>> {
    match &stmt.kind {
        StmtKind::Assign { name, value } => {
            let folded = fold_expr(value)?;
            Some(Stmt::new(
                StmtKind::Assign {
                    name: name.clone(),
                    value: folded,
                },
                stmt.ann.clone(),
            ))
        }
        StmtKind::Expr(e) => {
            let folded = fold_expr(e)?;
            Some(Stmt::new(StmtKind::Expr(folded), stmt.ann.clone()))
        }
        _ => None,
    }
}

/// Try to fold one expression to a literal value.
pub fn fold_expr<A: Clone>(expr: &Expr<A>) -> Option<Expr<A>> {
    match &expr.kind {
        ExprKind::Binary { op, left, right }
            if left.kind.is_literal() && right.kind.is_literal() =>
        {
            let folded = fold_binary(*op, &left.kind, &right.kind)?;
            Some(Expr::new(
                ExprKind::Value(Value::new(folded, left.ann.clone())),
                expr.ann.clone(),
            ))
        }
        ExprKind::Unary { op, operand }
            if matches!(operand.kind, ValueKind::Num(_) | ValueKind::Bool(_)) =>
        {
            let folded = fold_unary(*op, &operand.kind)?;
            Some(Expr::new(
                ExprKind::Value(Value::new(folded, operand.ann.clone())),
                expr.ann.clone(),
            ))
        }
        _ => None,
    }
}

/// Evaluate a binary operation on two literal operands.
///
/// `None` means "leave it for the runtime". Integer arithmetic is
/// arbitrary precision, so overflow cannot occur; the quotient and
/// remainder truncate as a consistent pair (`a == (a // b) * b + a % b`).
fn fold_binary(op: BinOp, left: &ValueKind, right: &ValueKind) -> Option<ValueKind> {
    use ValueKind::{Bool, None as NoneLit, Num};

    match (op, left, right) {
        // A literal `None` operand decides equality outright; the lowering
        // only emits such comparisons against `None`-typed operands, and
        // `None == None` is true by definition.
        (BinOp::Eq, NoneLit, _) | (BinOp::Eq, _, NoneLit) => Some(Bool(true)),
        (BinOp::NotEq, NoneLit, _) | (BinOp::NotEq, _, NoneLit) => Some(Bool(false)),

        // Integer arithmetic.
        (BinOp::Add, Num(a), Num(b)) => Some(Num(a + b)),
        (BinOp::Sub, Num(a), Num(b)) => Some(Num(a - b)),
        (BinOp::Mul, Num(a), Num(b)) => Some(Num(a * b)),
        // Literal zero divisor: defer so the runtime traps.
        (BinOp::FloorDiv | BinOp::Mod, Num(_), Num(b)) if b.is_zero() => None,
        (BinOp::FloorDiv, Num(a), Num(b)) => Some(Num(a / b)),
        (BinOp::Mod, Num(a), Num(b)) => Some(Num(a % b)),

        // Integer comparisons.
        (BinOp::Eq, Num(a), Num(b)) => Some(Bool(a == b)),
        (BinOp::NotEq, Num(a), Num(b)) => Some(Bool(a != b)),
        (BinOp::Lt, Num(a), Num(b)) => Some(Bool(a < b)),
        (BinOp::LtEq, Num(a), Num(b)) => Some(Bool(a <= b)),
        (BinOp::Gt, Num(a), Num(b)) => Some(Bool(a > b)),
        (BinOp::GtEq, Num(a), Num(b)) => Some(Bool(a >= b)),

        // Boolean equality and logic.
        (BinOp::Eq, Bool(a), Bool(b)) => Some(Bool(a == b)),
        (BinOp::NotEq, Bool(a), Bool(b)) => Some(Bool(a != b)),
        (BinOp::And, Bool(a), Bool(b)) => Some(Bool(*a && *b)),
        (BinOp::Or, Bool(a), Bool(b)) => Some(Bool(*a || *b)),

        // Unmatched type combinations — can't fold.
        _ => None,
    }
}

/// Evaluate a unary operation on a literal operand.
fn fold_unary(op: UnOp, operand: &ValueKind) -> Option<ValueKind> {
    match (op, operand) {
        (UnOp::Neg, ValueKind::Num(n)) => Some(ValueKind::Num(-n)),
        (UnOp::Not, ValueKind::Bool(b)) => Some(ValueKind::Bool(!b)),
        _ => None,
    }
}
