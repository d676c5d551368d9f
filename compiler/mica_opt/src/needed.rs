//! Backward neededness analysis.
//!
//! A refinement of liveness that tracks which variables are required to
//! compute the program's *observable* behavior — return values, calls,
//! heap writes, branch conditions, and operations that can trap. A
//! variable that is merely read by a dead assignment chain is live but
//! not needed; dead-code elimination runs on neededness for exactly that
//! reason.
//!
//! Three rules (after the classical formulation in the CMU 15-411
//! lecture notes):
//!
//! - **R1** — a variable whose value participates in a side effect or a
//!   control-flow observation at `l` is needed at `l`.
//! - **R2** — a variable needed at a successor of `l` is needed at `l`,
//!   unless `l` assigns it.
//! - **R3** — if `l` is `name = e` and `name` is needed at a successor,
//!   every variable read by `e` is needed at `l`.
//!
//! The saturation loop has the same shape as [`crate::liveness`].

use rustc_hash::FxHashMap;

use mica_ir::{BasicBlock, Expr, ExprKind, Line, NameSet, Stmt, StmtKind, Value};

use crate::graph::LineTable;

/// Saturated neededness information for one body.
///
/// Absent lines have an empty needed set.
pub struct NeededMap {
    map: FxHashMap<Line, NameSet>,
}

impl NeededMap {
    /// Names needed on entry to `line`.
    pub fn needed_at(&self, line: &Line) -> Option<&NameSet> {
        self.map.get(line)
    }

    /// Returns `true` if `name` is needed at some line of the body.
    ///
    /// Dead-code elimination consults this in addition to the local set:
    /// the assigned name is erased from its own line by R2, so a purely
    /// local check would drop definitions that feed later uses.
    pub fn is_needed_anywhere(&self, name: &str) -> bool {
        self.map.values().any(|set| set.contains(name))
    }

    /// All `(line, needed-in)` pairs, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&Line, &NameSet)> {
        self.map.iter()
    }
}

/// Compute neededness for one body.
pub fn compute_needed<A>(blocks: &[BasicBlock<A>]) -> NeededMap {
    let table = LineTable::new(blocks);
    let mut needed: Vec<NameSet> = (0..table.len()).map(|_| NameSet::default()).collect();

    let mut sweeps = 0u32;
    loop {
        sweeps += 1;
        let mut changed = false;

        for idx in (0..table.len()).rev() {
            let mut succ_needed = NameSet::default();
            for s in table.successors(idx) {
                succ_needed.extend(needed[s].iter().cloned());
            }
            let new_needed = transfer(table.stmt(idx), succ_needed);
            if new_needed != needed[idx] {
                needed[idx] = new_needed;
                changed = true;
            }
        }

        if !changed {
            break;
        }
    }

    tracing::debug!(lines = table.len(), sweeps, "neededness converged");

    let map = table
        .iter()
        .enumerate()
        .map(|(idx, (line, _))| (line.clone(), std::mem::take(&mut needed[idx])))
        .collect();
    NeededMap { map }
}

/// Per-statement transfer function: successor needed-set in, needed-in out.
fn transfer<A>(stmt: &Stmt<A>, mut succ: NameSet) -> NameSet {
    match &stmt.kind {
        StmtKind::Assign { name, value } => {
            let target_needed = succ.remove(name); // R2
            if target_needed {
                value.used_names(&mut succ); // R3
            }
            necessity(value, &mut succ); // R1
            succ
        }
        StmtKind::Expr(e) => {
            // Evaluated for effect: everything it reads is needed.
            e.used_names(&mut succ);
            succ
        }
        StmtKind::Return(v) => {
            let mut out = NameSet::default();
            add_id(v, &mut out);
            out
        }
        StmtKind::CondJump { cond, .. } => {
            add_id(cond, &mut succ);
            succ
        }
        StmtKind::Jump { .. } | StmtKind::Pass => succ,
        StmtKind::Store {
            base,
            offset,
            value,
        } => {
            // Stores are observable: all three operands are necessary.
            add_id(base, &mut succ);
            add_id(offset, &mut succ);
            add_id(value, &mut succ);
            succ
        }
    }
}

/// R1 for expressions: operands that participate in a side effect.
///
/// Integer division and modulo can trap, so both operands count. Calls
/// may do anything, so every argument counts. An allocation's size is
/// observable through the heap layout. A load's offset can fault; its
/// base is a type-checked reference and reading through it is effect-free.
fn necessity<A>(expr: &Expr<A>, out: &mut NameSet) {
    match &expr.kind {
        ExprKind::Binary { op, left, right } if op.may_trap() => {
            add_id(left, out);
            add_id(right, out);
        }
        ExprKind::Value(_) | ExprKind::Binary { .. } | ExprKind::Unary { .. } => {}
        ExprKind::Call { args, .. } => {
            for arg in args {
                add_id(arg, out);
            }
        }
        ExprKind::Alloc { amount } => add_id(amount, out),
        ExprKind::Load { offset, .. } => add_id(offset, out),
    }
}

fn add_id<A>(value: &Value<A>, out: &mut NameSet) {
    if let Some(name) = value.as_id() {
        out.insert(name.to_owned());
    }
}
