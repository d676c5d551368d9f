//! Structural validation of input IR.
//!
//! The optimizer is a total function on *well-formed* IR; on malformed
//! IR its behavior is undefined. Callers that do not trust the lowering
//! front end run [`validate_program`] first and get an explicit error
//! instead of a silent miscompile.
//!
//! Checked per body:
//! - block labels are unique;
//! - every `Jump`/`CondJump` targets an existing block;
//! - no block is empty (an empty block has no entry line and cannot be
//!   jumped to);
//! - no statement follows a terminator within a block.

use rustc_hash::FxHashSet;

use mica_ir::{BasicBlock, Line, Program, StmtKind};

/// A structural defect in input IR.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidateError {
    #[error("duplicate block label `{0}`")]
    DuplicateLabel(String),

    #[error("jump to unknown block `{target}` at {line}")]
    UnknownLabel { target: String, line: Line },

    #[error("block `{0}` has no statements")]
    EmptyBlock(String),

    #[error("statement after terminator at {0}")]
    StmtAfterTerminator(Line),
}

/// Validate every body of a program. The first defect found is returned.
pub fn validate_program<A>(program: &Program<A>) -> Result<(), ValidateError> {
    validate_body(&program.body)?;
    for fun in &program.funs {
        validate_body(&fun.blocks)?;
    }
    for class in &program.classes {
        for method in &class.methods {
            validate_body(&method.blocks)?;
        }
    }
    Ok(())
}

/// Validate one body's block list.
pub fn validate_body<A>(blocks: &[BasicBlock<A>]) -> Result<(), ValidateError> {
    let mut labels = FxHashSet::default();
    for block in blocks {
        if !labels.insert(block.label.as_str()) {
            return Err(ValidateError::DuplicateLabel(block.label.clone()));
        }
        if block.stmts.is_empty() {
            return Err(ValidateError::EmptyBlock(block.label.clone()));
        }
    }

    for block in blocks {
        for (index, stmt) in block.stmts.iter().enumerate() {
            if stmt.is_terminator() && index + 1 < block.stmts.len() {
                return Err(ValidateError::StmtAfterTerminator(Line::new(
                    block.label.clone(),
                    index,
                )));
            }
            let check = |target: &str| {
                if labels.contains(target) {
                    Ok(())
                } else {
                    Err(ValidateError::UnknownLabel {
                        target: target.to_owned(),
                        line: Line::new(block.label.clone(), index),
                    })
                }
            };
            match &stmt.kind {
                StmtKind::Jump { target } => check(target)?,
                StmtKind::CondJump {
                    then_label,
                    else_label,
                    ..
                } => {
                    check(then_label)?;
                    check(else_label)?;
                }
                _ => {}
            }
        }
    }

    Ok(())
}
