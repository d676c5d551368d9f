//! Backward liveness analysis.
//!
//! Computes, for every statement line, the set of variable names whose
//! values may still be read on some path from that point. Statement
//! granularity (rather than block boundaries) because the consumers of
//! these maps address single lines.
//!
//! # Algorithm
//!
//! Standard backward dataflow with fixed-point iteration: sweep the
//! flattened line table in reverse program order, recomputing
//!
//! ```text
//! live_in(l) = transfer(stmt(l), ∪ live_in(s) for s in succ(l))
//! ```
//!
//! until no set changes. Reverse order converges quickly on reducible
//! control flow; back edges just cost extra sweeps.
//!
//! Liveness is not consumed by the rewriter — dead-code elimination runs
//! on [neededness](crate::needed), which refines liveness with effect
//! tracking. It is computed and exposed as an independent analysis.

use rustc_hash::FxHashMap;

use mica_ir::{BasicBlock, Line, NameSet, Stmt, StmtKind};

use crate::graph::LineTable;

/// Saturated liveness information for one body.
///
/// Absent lines have an empty live set.
pub struct LivenessMap {
    map: FxHashMap<Line, NameSet>,
}

impl LivenessMap {
    /// Names live on entry to `line`.
    pub fn live_at(&self, line: &Line) -> Option<&NameSet> {
        self.map.get(line)
    }

    /// All `(line, live-in)` pairs, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&Line, &NameSet)> {
        self.map.iter()
    }
}

/// Compute liveness for one body.
pub fn compute_liveness<A>(blocks: &[BasicBlock<A>]) -> LivenessMap {
    let table = LineTable::new(blocks);
    let mut live: Vec<NameSet> = (0..table.len()).map(|_| NameSet::default()).collect();

    let mut sweeps = 0u32;
    loop {
        sweeps += 1;
        let mut changed = false;

        for idx in (0..table.len()).rev() {
            let mut succ_live = NameSet::default();
            for s in table.successors(idx) {
                succ_live.extend(live[s].iter().cloned());
            }
            let new_live = transfer(table.stmt(idx), succ_live);
            if new_live != live[idx] {
                live[idx] = new_live;
                changed = true;
            }
        }

        if !changed {
            break;
        }
    }

    tracing::debug!(lines = table.len(), sweeps, "liveness converged");

    let map = table
        .iter()
        .enumerate()
        .map(|(idx, (line, _))| (line.clone(), std::mem::take(&mut live[idx])))
        .collect();
    LivenessMap { map }
}

/// Per-statement transfer function: successor live-set in, live-in out.
fn transfer<A>(stmt: &Stmt<A>, mut succ: NameSet) -> NameSet {
    match &stmt.kind {
        StmtKind::Assign { name, value } => {
            succ.remove(name);
            value.used_names(&mut succ);
            succ
        }
        StmtKind::Return(_) => {
            // No fall-through: only the returned value is live.
            let mut out = NameSet::default();
            stmt.used_names(&mut out);
            out
        }
        StmtKind::Expr(_) | StmtKind::CondJump { .. } | StmtKind::Store { .. } => {
            stmt.used_names(&mut succ);
            succ
        }
        StmtKind::Jump { .. } | StmtKind::Pass => succ,
    }
}

#[cfg(test)]
mod tests {
    use mica_ir::Line;

    use crate::test_helpers::{
        assign, bin, block, br, call, expr_stmt, id, jmp, num, ret, value_expr,
    };

    use super::compute_liveness;

    #[test]
    fn straight_line_chain() {
        // entry:
        //   a = 1        -- live_in = {}
        //   b = a        -- live_in = {a}
        //   return b     -- live_in = {b}
        let blocks = vec![block(
            "entry",
            vec![
                assign("a", value_expr(num(1))),
                assign("b", value_expr(id("a"))),
                ret(id("b")),
            ],
        )];

        let result = compute_liveness(&blocks);
        let live_at = |i| {
            result
                .live_at(&Line::new("entry", i))
                .unwrap_or_else(|| panic!("line missing"))
        };

        assert!(live_at(0).is_empty());
        assert_eq!(live_at(1).len(), 1);
        assert!(live_at(1).contains("a"));
        assert!(live_at(2).contains("b"));
    }

    #[test]
    fn dead_definition_is_not_live() {
        // entry:
        //   a = 1        -- a is never read
        //   return 0
        let blocks = vec![block(
            "entry",
            vec![assign("a", value_expr(num(1))), ret(num(0))],
        )];

        let result = compute_liveness(&blocks);
        for (_, set) in result.iter() {
            assert!(!set.contains("a"));
        }
    }

    #[test]
    fn branch_unions_both_targets() {
        // entry: br c then else   -- live_in = {c, x, y}
        // then:  return x
        // else:  return y
        let blocks = vec![
            block("entry", vec![br(id("c"), "then", "else")]),
            block("then", vec![ret(id("x"))]),
            block("else", vec![ret(id("y"))]),
        ];

        let result = compute_liveness(&blocks);
        let at_branch = result
            .live_at(&Line::new("entry", 0))
            .unwrap_or_else(|| panic!("line missing"));

        assert!(at_branch.contains("c"));
        assert!(at_branch.contains("x"));
        assert!(at_branch.contains("y"));
    }

    #[test]
    fn loop_keeps_variable_live_across_body() {
        // entry: i = 0; jmp head
        // head:  br c body exit
        // body:  i = i + 1; jmp head
        // exit:  return i
        let blocks = vec![
            block("entry", vec![assign("i", value_expr(num(0))), jmp("head")]),
            block("head", vec![br(id("c"), "body", "exit")]),
            block(
                "body",
                vec![
                    assign("i", bin(mica_ir::BinOp::Add, id("i"), num(1))),
                    jmp("head"),
                ],
            ),
            block("exit", vec![ret(id("i"))]),
        ];

        let result = compute_liveness(&blocks);

        // i is live at the loop header (read in body and exit).
        let at_head = result
            .live_at(&Line::new("head", 0))
            .unwrap_or_else(|| panic!("line missing"));
        assert!(at_head.contains("i"));

        // i is live entering the body's own assignment (it reads i).
        let at_body = result
            .live_at(&Line::new("body", 0))
            .unwrap_or_else(|| panic!("line missing"));
        assert!(at_body.contains("i"));
    }

    #[test]
    fn expr_statement_unions_successor() {
        // entry:
        //   print(x)     -- live_in = {x, y}
        //   return y
        let blocks = vec![block(
            "entry",
            vec![expr_stmt(call("print", vec![id("x")])), ret(id("y"))],
        )];

        let result = compute_liveness(&blocks);
        let at_call = result
            .live_at(&Line::new("entry", 0))
            .unwrap_or_else(|| panic!("line missing"));

        assert!(at_call.contains("x"));
        assert!(at_call.contains("y"));
    }
}
