//! Shared control-flow utilities for the optimization passes.
//!
//! [`LineTable`] flattens one body's blocks into a program-order sequence
//! of addressed statements and resolves each statement's CFG successors.
//! It lives here rather than in a specific pass module so that passes do
//! not import from each other — all passes depend on `graph`, none depend
//! on another pass.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use mica_ir::{BasicBlock, Line, Stmt, StmtKind};

/// Program-order view of a body's statements, addressed by [`Line`].
///
/// Successor resolution follows the block structure: a terminator jumps
/// to block entries, everything else falls through to the next entry in
/// program order (which for the last statement of a block is the entry
/// of the textually following block).
pub(crate) struct LineTable<'a, A> {
    entries: Vec<(Line, &'a Stmt<A>)>,
    line_index: FxHashMap<Line, usize>,
}

impl<'a, A> LineTable<'a, A> {
    pub(crate) fn new(blocks: &'a [BasicBlock<A>]) -> Self {
        let mut entries = Vec::new();
        let mut line_index = FxHashMap::default();

        for block in blocks {
            for (index, stmt) in block.stmts.iter().enumerate() {
                let line = Line::new(block.label.clone(), index);
                line_index.insert(line.clone(), entries.len());
                entries.push((line, stmt));
            }
        }

        LineTable {
            entries,
            line_index,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn line(&self, idx: usize) -> &Line {
        &self.entries[idx].0
    }

    pub(crate) fn stmt(&self, idx: usize) -> &'a Stmt<A> {
        self.entries[idx].1
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &(Line, &'a Stmt<A>)> {
        self.entries.iter()
    }

    /// Index of the entry line of a block, if the block exists and is
    /// non-empty.
    pub(crate) fn entry_of(&self, label: &str) -> Option<usize> {
        self.index_of(&Line::entry(label))
    }

    /// CFG successor indices of the statement at `idx`.
    ///
    /// `Return` has none; `CondJump` has up to two; `Jump` up to one;
    /// every other statement falls through to the next program-order
    /// entry when one exists.
    pub(crate) fn successors(&self, idx: usize) -> SmallVec<[usize; 2]> {
        let mut succs = SmallVec::new();
        match &self.stmt(idx).kind {
            StmtKind::Return(_) => {}
            StmtKind::CondJump {
                then_label,
                else_label,
                ..
            } => {
                if let Some(n) = self.entry_of(then_label) {
                    succs.push(n);
                }
                if let Some(n) = self.entry_of(else_label) {
                    succs.push(n);
                }
            }
            StmtKind::Jump { target } => {
                if let Some(n) = self.entry_of(target) {
                    succs.push(n);
                }
            }
            _ => {
                if idx + 1 < self.len() {
                    succs.push(idx + 1);
                }
            }
        }
        succs
    }

    pub(crate) fn index_of(&self, line: &Line) -> Option<usize> {
        self.line_index.get(line).copied()
    }
}
