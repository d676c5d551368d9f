//! Shared test factories for the pass tests.
//!
//! All helpers build IR with a unit annotation. Only compiled in test
//! builds.

use num_bigint::BigInt;

use mica_ir::{
    BasicBlock, BinOp, Expr, ExprKind, Stmt, StmtKind, UnOp, Value, ValueKind, VarInit,
};

pub(crate) fn num(n: i64) -> Value<()> {
    Value::new(ValueKind::Num(BigInt::from(n)), ())
}

pub(crate) fn boolean(b: bool) -> Value<()> {
    Value::new(ValueKind::Bool(b), ())
}

pub(crate) fn none() -> Value<()> {
    Value::new(ValueKind::None, ())
}

pub(crate) fn id(name: &str) -> Value<()> {
    Value::new(ValueKind::Id(name.to_owned()), ())
}

pub(crate) fn value_expr(v: Value<()>) -> Expr<()> {
    Expr::new(ExprKind::Value(v), ())
}

pub(crate) fn bin(op: BinOp, left: Value<()>, right: Value<()>) -> Expr<()> {
    Expr::new(ExprKind::Binary { op, left, right }, ())
}

pub(crate) fn un(op: UnOp, operand: Value<()>) -> Expr<()> {
    Expr::new(ExprKind::Unary { op, operand }, ())
}

pub(crate) fn call(func: &str, args: Vec<Value<()>>) -> Expr<()> {
    Expr::new(
        ExprKind::Call {
            func: func.to_owned(),
            args,
        },
        (),
    )
}

pub(crate) fn assign(name: &str, value: Expr<()>) -> Stmt<()> {
    Stmt::new(
        StmtKind::Assign {
            name: name.to_owned(),
            value,
        },
        (),
    )
}

pub(crate) fn expr_stmt(e: Expr<()>) -> Stmt<()> {
    Stmt::new(StmtKind::Expr(e), ())
}

pub(crate) fn ret(v: Value<()>) -> Stmt<()> {
    Stmt::new(StmtKind::Return(v), ())
}

pub(crate) fn br(cond: Value<()>, then_label: &str, else_label: &str) -> Stmt<()> {
    Stmt::new(
        StmtKind::CondJump {
            cond,
            then_label: then_label.to_owned(),
            else_label: else_label.to_owned(),
        },
        (),
    )
}

pub(crate) fn jmp(target: &str) -> Stmt<()> {
    Stmt::new(
        StmtKind::Jump {
            target: target.to_owned(),
        },
        (),
    )
}

pub(crate) fn store(base: Value<()>, offset: Value<()>, value: Value<()>) -> Stmt<()> {
    Stmt::new(
        StmtKind::Store {
            base,
            offset,
            value,
        },
        (),
    )
}

pub(crate) fn pass() -> Stmt<()> {
    Stmt::new(StmtKind::Pass, ())
}

pub(crate) fn block(label: &str, stmts: Vec<Stmt<()>>) -> BasicBlock<()> {
    BasicBlock::new(label, stmts)
}

pub(crate) fn init(name: &str, value: Value<()>) -> VarInit<()> {
    VarInit {
        name: name.to_owned(),
        value,
        ann: (),
    }
}
