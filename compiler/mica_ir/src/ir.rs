//! Mica IR — block-structured intermediate representation.
//!
//! The optimizer and the code generator both operate on this IR. It is
//! lowered from the typed AST in A-normal form: every operand position
//! holds a [`Value`], never a nested expression.
//!
//! # Architecture
//!
//! - **[`Program`]** — top-level initializers, functions, classes, body
//! - **[`FunDef`]** — a function body: parameters, initializers, blocks
//! - **[`BasicBlock`]** — a labeled straight-line statement sequence
//! - **[`Stmt`]** / **[`Expr`]** / **[`Value`]** — tagged statement,
//!   expression and operand nodes
//!
//! Every node carries an annotation payload `A` (type + source location,
//! produced by the front end). The payload is opaque here: passes only
//! ever clone it onto rewritten nodes.
//!
//! Control flow is by block label. A block ends with a terminator
//! (`Return`, `Jump`, `CondJump`) or falls through to the next block in
//! textual order.

use num_bigint::BigInt;
use rustc_hash::FxHashSet;

use crate::ops::{BinOp, UnOp};

/// Set of variable names, as used by the dataflow analyses.
pub type NameSet = FxHashSet<String>;

// ── Statement addresses ─────────────────────────────────────────────

/// The address of a statement: block label plus statement index.
///
/// `(label, 0)` is the entry of `label`. Analysis maps are keyed by
/// `Line`; a structured key avoids the ambiguity of concatenating block
/// names (which may themselves end in digits) with indices.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Line {
    /// Label of the containing block.
    pub block: String,
    /// Zero-based statement index within the block.
    pub index: usize,
}

impl Line {
    pub fn new(block: impl Into<String>, index: usize) -> Self {
        Line {
            block: block.into(),
            index,
        }
    }

    /// The entry line of a block.
    pub fn entry(block: impl Into<String>) -> Self {
        Line::new(block, 0)
    }

    /// The synthetic line that "defines" variable initializers.
    ///
    /// `$` is not a valid identifier character in Mica, so this label
    /// cannot collide with a real block.
    pub fn var_init() -> Self {
        Line::new("$varInit", 0)
    }
}

// ── Values ──────────────────────────────────────────────────────────

/// An operand. Values never own subexpressions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValueKind {
    /// Integer literal. Mica integers are arbitrary precision.
    Num(BigInt),
    /// Boolean literal.
    Bool(bool),
    /// The `None` literal.
    None,
    /// Variable reference.
    Id(String),
}

impl ValueKind {
    /// The referenced variable name, if this is an `Id`.
    pub fn as_id(&self) -> Option<&str> {
        match self {
            ValueKind::Id(name) => Some(name),
            _ => None,
        }
    }

    /// Returns `true` for literal operands (`Num`, `Bool`, `None`).
    pub fn is_literal(&self) -> bool {
        !matches!(self, ValueKind::Id(_))
    }
}

/// An operand together with its annotation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Value<A> {
    pub kind: ValueKind,
    pub ann: A,
}

impl<A> Value<A> {
    pub fn new(kind: ValueKind, ann: A) -> Self {
        Value { kind, ann }
    }

    /// The referenced variable name, if this is an `Id`.
    pub fn as_id(&self) -> Option<&str> {
        self.kind.as_id()
    }

    fn collect_uses(&self, out: &mut NameSet) {
        if let Some(name) = self.as_id() {
            out.insert(name.to_owned());
        }
    }
}

// ── Expressions ─────────────────────────────────────────────────────

/// Expression kinds. Operand-atomic: children are always [`Value`]s.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExprKind<A> {
    /// A bare value.
    Value(Value<A>),
    /// Binary operation on two operands.
    Binary {
        op: BinOp,
        left: Value<A>,
        right: Value<A>,
    },
    /// Unary operation.
    Unary { op: UnOp, operand: Value<A> },
    /// Direct call: `func(args...)`.
    Call { func: String, args: Vec<Value<A>> },
    /// Heap allocation of `amount` cells.
    Alloc { amount: Value<A> },
    /// Heap read: `base[offset]`.
    Load { base: Value<A>, offset: Value<A> },
}

/// An expression together with its annotation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expr<A> {
    pub kind: ExprKind<A>,
    pub ann: A,
}

impl<A> Expr<A> {
    pub fn new(kind: ExprKind<A>, ann: A) -> Self {
        Expr { kind, ann }
    }

    /// Collect every variable name read by this expression.
    pub fn used_names(&self, out: &mut NameSet) {
        match &self.kind {
            ExprKind::Value(v) => v.collect_uses(out),
            ExprKind::Binary { left, right, .. } => {
                left.collect_uses(out);
                right.collect_uses(out);
            }
            ExprKind::Unary { operand, .. } => operand.collect_uses(out),
            ExprKind::Call { args, .. } => {
                for arg in args {
                    arg.collect_uses(out);
                }
            }
            ExprKind::Alloc { amount } => amount.collect_uses(out),
            ExprKind::Load { base, offset } => {
                base.collect_uses(out);
                offset.collect_uses(out);
            }
        }
    }
}

// ── Statements ──────────────────────────────────────────────────────

/// Statement kinds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StmtKind<A> {
    /// Bind the result of an expression: `name = value`.
    Assign { name: String, value: Expr<A> },
    /// Evaluate an expression for effect.
    Expr(Expr<A>),
    /// Return a value from the enclosing body.
    Return(Value<A>),
    /// Conditional branch to one of two block labels.
    CondJump {
        cond: Value<A>,
        then_label: String,
        else_label: String,
    },
    /// Unconditional jump to a block label.
    Jump { target: String },
    /// Heap write: `base[offset] = value`.
    Store {
        base: Value<A>,
        offset: Value<A>,
        value: Value<A>,
    },
    /// No-op.
    Pass,
}

/// A statement together with its annotation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Stmt<A> {
    pub kind: StmtKind<A>,
    pub ann: A,
}

impl<A> Stmt<A> {
    pub fn new(kind: StmtKind<A>, ann: A) -> Self {
        Stmt { kind, ann }
    }

    /// The variable written by this statement, if any.
    ///
    /// Only `Assign` defines a name; `Store` writes through a pointer and
    /// defines nothing.
    pub fn defined_name(&self) -> Option<&str> {
        match &self.kind {
            StmtKind::Assign { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Collect every variable name read by this statement.
    pub fn used_names(&self, out: &mut NameSet) {
        match &self.kind {
            StmtKind::Assign { value, .. } => value.used_names(out),
            StmtKind::Expr(e) => e.used_names(out),
            StmtKind::Return(v) | StmtKind::CondJump { cond: v, .. } => v.collect_uses(out),
            StmtKind::Jump { .. } | StmtKind::Pass => {}
            StmtKind::Store {
                base,
                offset,
                value,
            } => {
                base.collect_uses(out);
                offset.collect_uses(out);
                value.collect_uses(out);
            }
        }
    }

    /// Returns `true` if this statement ends a basic block.
    pub fn is_terminator(&self) -> bool {
        matches!(
            self.kind,
            StmtKind::Return(_) | StmtKind::Jump { .. } | StmtKind::CondJump { .. }
        )
    }
}

// ── Blocks and bodies ───────────────────────────────────────────────

/// A labeled basic block. Labels are unique within a body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BasicBlock<A> {
    pub label: String,
    pub stmts: Vec<Stmt<A>>,
}

impl<A> BasicBlock<A> {
    pub fn new(label: impl Into<String>, stmts: Vec<Stmt<A>>) -> Self {
        BasicBlock {
            label: label.into(),
            stmts,
        }
    }
}

/// An initial variable binding at the start of a body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VarInit<A> {
    pub name: String,
    pub value: Value<A>,
    pub ann: A,
}

/// A function definition: parameters, initializers, body blocks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunDef<A> {
    pub name: String,
    pub params: Vec<String>,
    pub inits: Vec<VarInit<A>>,
    pub blocks: Vec<BasicBlock<A>>,
}

/// A class definition. Methods are ordinary functions; the receiver is
/// their first parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassDef<A> {
    pub name: String,
    pub methods: Vec<FunDef<A>>,
}

/// A whole lowered program.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Program<A> {
    pub inits: Vec<VarInit<A>>,
    pub funs: Vec<FunDef<A>>,
    pub classes: Vec<ClassDef<A>>,
    pub body: Vec<BasicBlock<A>>,
}

// ── Tests ───────────────────────────────────────────────────────────
