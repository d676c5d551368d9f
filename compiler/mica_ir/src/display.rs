//! Textual rendering of the IR.
//!
//! Annotations are never printed — the dump shows structure only, which
//! keeps it stable across front-end changes.

use std::fmt;

use crate::ir::{BasicBlock, Expr, ExprKind, FunDef, Line, Program, Stmt, StmtKind, Value, ValueKind};

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.block, self.index)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Num(n) => write!(f, "{n}"),
            ValueKind::Bool(true) => write!(f, "True"),
            ValueKind::Bool(false) => write!(f, "False"),
            ValueKind::None => write!(f, "None"),
            ValueKind::Id(name) => write!(f, "{name}"),
        }
    }
}

impl<A> fmt::Display for Value<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.kind.fmt(f)
    }
}

impl<A> fmt::Display for Expr<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::Value(v) => v.fmt(f),
            ExprKind::Binary { op, left, right } => {
                write!(f, "{left} {} {right}", op.as_symbol())
            }
            ExprKind::Unary { op, operand } => write!(f, "{} {operand}", op.as_symbol()),
            ExprKind::Call { func, args } => {
                write!(f, "{func}(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    arg.fmt(f)?;
                }
                write!(f, ")")
            }
            ExprKind::Alloc { amount } => write!(f, "alloc {amount}"),
            ExprKind::Load { base, offset } => write!(f, "load {base}[{offset}]"),
        }
    }
}

impl<A> fmt::Display for Stmt<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            StmtKind::Assign { name, value } => write!(f, "{name} = {value}"),
            StmtKind::Expr(e) => e.fmt(f),
            StmtKind::Return(v) => write!(f, "return {v}"),
            StmtKind::CondJump {
                cond,
                then_label,
                else_label,
            } => write!(f, "br {cond} {then_label} {else_label}"),
            StmtKind::Jump { target } => write!(f, "jmp {target}"),
            StmtKind::Store {
                base,
                offset,
                value,
            } => write!(f, "store {base}[{offset}] = {value}"),
            StmtKind::Pass => write!(f, "pass"),
        }
    }
}

impl<A> fmt::Display for BasicBlock<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}:", self.label)?;
        for stmt in &self.stmts {
            writeln!(f, "  {stmt}")?;
        }
        Ok(())
    }
}

impl<A> fmt::Display for FunDef<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "def {}({}):", self.name, self.params.join(", "))?;
        for init in &self.inits {
            writeln!(f, "  init {} = {}", init.name, init.value)?;
        }
        for block in &self.blocks {
            block.fmt(f)?;
        }
        Ok(())
    }
}

impl<A> fmt::Display for Program<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for init in &self.inits {
            writeln!(f, "init {} = {}", init.name, init.value)?;
        }
        for fun in &self.funs {
            fun.fmt(f)?;
        }
        for class in &self.classes {
            writeln!(f, "class {}:", class.name)?;
            for method in &class.methods {
                method.fmt(f)?;
            }
        }
        for block in &self.body {
            block.fmt(f)?;
        }
        Ok(())
    }
}
