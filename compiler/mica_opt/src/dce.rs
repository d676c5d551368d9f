//! Neededness-based dead-code elimination.
//!
//! Drops `Assign` statements whose target is not needed and whose
//! right-hand side has no observable effect. All other statement kinds
//! pass through untouched, in order — this pass only ever deletes
//! assignments.
//!
//! An assignment survives when any of:
//!
//! - its name is needed at its own line (a self-referential assignment
//!   like `x = x + 1` keeps `x` in its own needed-in set);
//! - its name is needed at *any* line of the body — the assigned name is
//!   erased from its own line by rule R2, so the definition that feeds a
//!   later use is only visible globally;
//! - its right-hand side is a call, or a division/modulo whose divisor
//!   is not a nonzero numeric literal. Calls are effectful; division can
//!   trap, and dropping the statement would drop the trap.

use num_traits::Zero;

use mica_ir::{BasicBlock, Expr, ExprKind, Line, StmtKind, ValueKind};

use crate::needed::NeededMap;

/// Remove dead assignments from one block.
///
/// Returns the rewritten block, or `None` if nothing was removed.
pub fn sweep_block<A: Clone>(block: &BasicBlock<A>, needed: &NeededMap) -> Option<BasicBlock<A>> {
    let mut kept = Vec::with_capacity(block.stmts.len());
    let mut removed = 0usize;

    for (index, stmt) in block.stmts.iter().enumerate() {
        if let StmtKind::Assign { name, value } = &stmt.kind {
            let line = Line::new(block.label.clone(), index);
            let needed_here = needed
                .needed_at(&line)
                .is_some_and(|set| set.contains(name.as_str()));
            if !needed_here && !needed.is_needed_anywhere(name) && is_removable(value) {
                removed += 1;
                continue;
            }
        }
        kept.push(stmt.clone());
    }

    if removed == 0 {
        return None;
    }
    tracing::debug!(block = %block.label, removed, "dead assignments removed");
    Some(BasicBlock::new(block.label.clone(), kept))
}

/// Whether evaluating this right-hand side is unobservable.
fn is_removable<A>(expr: &Expr<A>) -> bool {
    match &expr.kind {
        ExprKind::Call { .. } => false,
        ExprKind::Binary { op, right, .. } if op.may_trap() => {
            matches!(&right.kind, ValueKind::Num(n) if !n.is_zero())
        }
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use mica_ir::{BinOp, StmtKind};

    use crate::needed::compute_needed;
    use crate::test_helpers::{
        assign, bin, block, call, id, num, ret, store, value_expr,
    };

    use super::sweep_block;

    #[test]
    fn removes_dead_pure_assign() {
        // entry: a = 1; return 0
        let blocks = vec![block(
            "entry",
            vec![assign("a", value_expr(num(1))), ret(num(0))],
        )];
        let needed = compute_needed(&blocks);

        let swept = sweep_block(&blocks[0], &needed)
            .unwrap_or_else(|| panic!("expected a removal"));
        assert_eq!(swept.stmts.len(), 1);
        assert!(matches!(swept.stmts[0].kind, StmtKind::Return(_)));
    }

    #[test]
    fn keeps_assign_feeding_a_later_use() {
        // entry: a = 1; b = a; return b
        let blocks = vec![block(
            "entry",
            vec![
                assign("a", value_expr(num(1))),
                assign("b", value_expr(id("a"))),
                ret(id("b")),
            ],
        )];
        let needed = compute_needed(&blocks);

        assert!(sweep_block(&blocks[0], &needed).is_none());
    }

    #[test]
    fn removes_whole_dead_chain() {
        // entry: a = 1; b = a; return 0 — neither a nor b is needed
        // anywhere, so both go in a single sweep.
        let blocks = vec![block(
            "entry",
            vec![
                assign("a", value_expr(num(1))),
                assign("b", value_expr(id("a"))),
                ret(num(0)),
            ],
        )];
        let needed = compute_needed(&blocks);

        let swept = sweep_block(&blocks[0], &needed)
            .unwrap_or_else(|| panic!("expected removals"));
        assert_eq!(swept.stmts.len(), 1);
    }

    #[test]
    fn keeps_call_assign() {
        // entry: x = read(); return 0 — x is dead but the call is not.
        let blocks = vec![block(
            "entry",
            vec![assign("x", call("read", vec![])), ret(num(0))],
        )];
        let needed = compute_needed(&blocks);

        assert!(sweep_block(&blocks[0], &needed).is_none());
    }

    #[test]
    fn keeps_possibly_trapping_division() {
        // entry: z = a // b; return 0 — b could be zero at runtime.
        let blocks = vec![block(
            "entry",
            vec![
                assign("z", bin(BinOp::FloorDiv, id("a"), id("b"))),
                ret(num(0)),
            ],
        )];
        let needed = compute_needed(&blocks);

        assert!(sweep_block(&blocks[0], &needed).is_none());
    }

    #[test]
    fn removes_division_by_nonzero_literal() {
        // entry: z = a // 5; return 0 — cannot trap, z is dead.
        let blocks = vec![block(
            "entry",
            vec![
                assign("z", bin(BinOp::FloorDiv, id("a"), num(5))),
                ret(num(0)),
            ],
        )];
        let needed = compute_needed(&blocks);

        let swept = sweep_block(&blocks[0], &needed)
            .unwrap_or_else(|| panic!("expected a removal"));
        assert_eq!(swept.stmts.len(), 1);
    }

    #[test]
    fn keeps_division_by_zero_literal() {
        // entry: z = a // 0; return 0 — the trap is the program's
        // observable behavior.
        let blocks = vec![block(
            "entry",
            vec![
                assign("z", bin(BinOp::FloorDiv, id("a"), num(0))),
                ret(num(0)),
            ],
        )];
        let needed = compute_needed(&blocks);

        assert!(sweep_block(&blocks[0], &needed).is_none());
    }

    #[test]
    fn non_assign_statements_pass_through_in_order() {
        // entry: store p[0] = x; a = 1; print(y); return 0
        let blocks = vec![block(
            "entry",
            vec![
                store(id("p"), num(0), id("x")),
                assign("a", value_expr(num(1))),
                crate::test_helpers::expr_stmt(call("print", vec![id("y")])),
                ret(num(0)),
            ],
        )];
        let needed = compute_needed(&blocks);

        let swept = sweep_block(&blocks[0], &needed)
            .unwrap_or_else(|| panic!("expected a removal"));
        assert_eq!(swept.stmts.len(), 3);
        assert!(matches!(swept.stmts[0].kind, StmtKind::Store { .. }));
        assert!(matches!(swept.stmts[1].kind, StmtKind::Expr(_)));
        assert!(matches!(swept.stmts[2].kind, StmtKind::Return(_)));
    }
}
