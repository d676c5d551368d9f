//! Forward reaching-definitions analysis.
//!
//! For every program point, records for each variable the set of [`Line`]s
//! whose assignment could have produced the variable's current value
//! (may-reach). Variable initializers are modeled as definitions at the
//! synthetic `$varInit` line — but only when the initial value is not
//! `None`, so an empty set still means "not yet definitely defined".
//!
//! # Algorithm
//!
//! Classic worklist iteration over the flattened line table:
//!
//! 1. Seed entry 0 with the initializer bindings, push it.
//! 2. Pop the most recently pushed index (LIFO). An `Assign` redefines
//!    its name to the current line; every other binding propagates
//!    unchanged.
//! 3. Union the propagated map into each successor; re-push a successor
//!    whose map grew.
//!
//! Joins are monotone unions over a finite lattice (subsets of the
//! body's lines per variable), so the iteration terminates.
//!
//! The result is consumed by the driver for diagnostic tracing only; it
//! is kept saturated and exposed for future passes (e.g. sparse constant
//! propagation would be built directly on it).

use std::fmt::Write as _;

use rustc_hash::{FxHashMap, FxHashSet};

use mica_ir::{BasicBlock, Line, ValueKind, VarInit};

use crate::graph::LineTable;

/// Per-variable definition sites at one program point.
pub type DefSites = FxHashMap<String, FxHashSet<Line>>;

/// Saturated reaching-definitions information for one body.
///
/// One entry per statement, in program order.
pub struct ReachingDefs {
    entries: Vec<(Line, DefSites)>,
}

impl ReachingDefs {
    /// The definition sites visible at `line`, if `line` addresses a
    /// statement of the analyzed body.
    pub fn reaching_at(&self, line: &Line) -> Option<&DefSites> {
        self.entries
            .iter()
            .find(|(l, _)| l == line)
            .map(|(_, sites)| sites)
    }

    /// All entries, in program order.
    pub fn entries(&self) -> impl Iterator<Item = &(Line, DefSites)> {
        self.entries.iter()
    }

    /// Render the analysis result as text, one paragraph per line.
    ///
    /// Variables and definition sites are sorted so the dump is stable
    /// across runs; the driver emits it at `trace` level.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        for (line, sites) in &self.entries {
            let _ = writeln!(out, "{line}");
            let mut names: Vec<&String> = sites.keys().collect();
            names.sort();
            for name in names {
                let mut defs: Vec<&Line> = sites[name].iter().collect();
                defs.sort_by(|a, b| (&a.block, a.index).cmp(&(&b.block, b.index)));
                let rendered: Vec<String> = defs.iter().map(|l| l.to_string()).collect();
                let _ = writeln!(out, "  {name}: ({})", rendered.join(", "));
            }
        }
        out
    }
}

/// Compute reaching definitions for one body.
pub fn compute_reaching<A>(inits: &[VarInit<A>], blocks: &[BasicBlock<A>]) -> ReachingDefs {
    let table = LineTable::new(blocks);
    let mut maps: Vec<DefSites> = (0..table.len()).map(|_| DefSites::default()).collect();

    if table.is_empty() {
        return ReachingDefs { entries: vec![] };
    }

    for init in inits {
        let sites = if matches!(init.value.kind, ValueKind::None) {
            FxHashSet::default()
        } else {
            let mut s = FxHashSet::default();
            s.insert(Line::var_init());
            s
        };
        maps[0].insert(init.name.clone(), sites);
    }

    let mut worklist = vec![0usize];
    let mut iterations = 0u32;

    while let Some(idx) = worklist.pop() {
        iterations += 1;

        // The map flowing out of `idx`: an assignment redefines its own
        // name to the current line, everything else passes through.
        let mut out = maps[idx].clone();
        if let Some(name) = table.stmt(idx).defined_name() {
            let mut site = FxHashSet::default();
            site.insert(table.line(idx).clone());
            out.insert(name.to_owned(), site);
        }

        for succ in table.successors(idx) {
            let mut grew = false;
            for (name, sites) in &out {
                let dst = maps[succ].entry(name.clone()).or_default();
                if !sites.is_subset(dst) {
                    dst.extend(sites.iter().cloned());
                    grew = true;
                }
            }
            if grew {
                worklist.push(succ);
            }
        }
    }

    tracing::debug!(lines = table.len(), iterations, "reaching definitions converged");

    let entries = table
        .iter()
        .enumerate()
        .map(|(idx, (line, _))| (line.clone(), std::mem::take(&mut maps[idx])))
        .collect();
    ReachingDefs { entries }
}
