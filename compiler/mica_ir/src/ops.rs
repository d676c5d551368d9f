//! Binary and unary operators.
//!
//! Operand types are not encoded here — the type checker has already
//! guaranteed that operands fit the operator by the time the IR exists.

/// Binary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    FloorDiv,
    Mod,

    // Comparison
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Logical
    And,
    Or,
}

impl BinOp {
    /// Returns the source-level symbol for this operator.
    ///
    /// Used in the textual IR dump and in error messages.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            // Arithmetic
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::FloorDiv => "//",
            Self::Mod => "%",
            // Comparison
            Self::Eq => "==",
            Self::NotEq => "!=",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            // Logical
            Self::And => "and",
            Self::Or => "or",
        }
    }

    /// Returns `true` for integer division and modulo — the operators
    /// whose evaluation can trap at runtime (divisor of zero).
    pub const fn may_trap(self) -> bool {
        matches!(self, Self::FloorDiv | Self::Mod)
    }
}

/// Unary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum UnOp {
    Neg,
    Not,
}

impl UnOp {
    /// Returns the source-level symbol for this operator.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Neg => "-",
            Self::Not => "not",
        }
    }
}
