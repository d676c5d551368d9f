//! The fixed-point optimization driver.
//!
//! One iteration folds every statement, recomputes neededness on the
//! folded IR, and sweeps dead assignments from every block — for the
//! top-level body, every function and every class method independently
//! (the pass is intra-procedural). Folding reveals new dead assignments
//! and removal exposes new folding opportunities, so the driver repeats
//! until an iteration changes nothing.
//!
//! Termination: each fold strictly shrinks an expression and each sweep
//! strictly shrinks a statement list, and both are bounded below on the
//! finite IR.
//!
//! The change flag is threaded through return values; there is no
//! ambient pass state. Reaching definitions are computed per iteration
//! for the `trace`-level dump only — disabling the subscriber does not
//! affect the output IR.

use mica_ir::{BasicBlock, Program, VarInit};

use crate::const_fold::fold_stmt;
use crate::dce::sweep_block;
use crate::needed::compute_needed;
use crate::reaching::compute_reaching;

/// Optimize a whole program to a fixed point.
///
/// The input is never mutated; the result shares no nodes with it.
pub fn optimize_program<A: Clone>(program: &Program<A>) -> Program<A> {
    let mut current = program.clone();
    let mut iteration = 0u32;

    loop {
        iteration += 1;
        let mut changed = false;

        let (body, body_changed) = optimize_body(&current.inits, &current.body);
        current.body = body;
        changed |= body_changed;

        for fun in &mut current.funs {
            let (blocks, fun_changed) = optimize_body(&fun.inits, &fun.blocks);
            fun.blocks = blocks;
            changed |= fun_changed;
        }

        for class in &mut current.classes {
            for method in &mut class.methods {
                let (blocks, method_changed) = optimize_body(&method.inits, &method.blocks);
                method.blocks = blocks;
                changed |= method_changed;
            }
        }

        tracing::debug!(iteration, changed, "optimizer iteration");
        if !changed {
            break;
        }
    }

    current
}

/// One fold-then-sweep round over a single body.
///
/// Returns the rewritten blocks and whether anything changed.
fn optimize_body<A: Clone>(
    inits: &[VarInit<A>],
    blocks: &[BasicBlock<A>],
) -> (Vec<BasicBlock<A>>, bool) {
    let reaching = compute_reaching(inits, blocks);
    tracing::trace!("reaching definitions:\n{}", reaching.dump());

    let mut changed = false;

    let mut folded = Vec::with_capacity(blocks.len());
    for block in blocks {
        let mut stmts = Vec::with_capacity(block.stmts.len());
        for stmt in &block.stmts {
            if let Some(new_stmt) = fold_stmt(stmt) {
                changed = true;
                stmts.push(new_stmt);
            } else {
                stmts.push(stmt.clone());
            }
        }
        folded.push(BasicBlock::new(block.label.clone(), stmts));
    }

    let needed = compute_needed(&folded);
    let mut out = Vec::with_capacity(folded.len());
    for block in folded {
        if let Some(swept) = sweep_block(&block, &needed) {
            changed = true;
            out.push(swept);
        } else {
            out.push(block);
        }
    }

    (out, changed)
}
