//! Error types for the encoder crate.

use quack_ir::IrError;
use thiserror::Error;

/// Errors that can occur while encoding a graph.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CompileError {
    /// Error from the IR crate (duplicate coupling, bad spin index, ...).
    #[error("IR error: {0}")]
    Ir(#[from] IrError),

    /// Coloring needs at least one color.
    #[error("Color count must be at least 1, got {0}")]
    InvalidColorCount(u32),

    /// Encoder parameter outside its domain.
    #[error("Invalid parameter {name} = {value}: {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Rejected value.
        value: f64,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// `vertices * colors` does not fit the spin index type.
    #[error("{vertices} vertices x {colors} colors exceeds the spin index range")]
    SpinCountOverflow {
        /// Number of vertices.
        vertices: u32,
        /// Number of colors.
        colors: u32,
    },
}

impl CompileError {
    /// True for conflicts in the encoding itself, as opposed to a bad
    /// parameter or a malformed graph.
    pub fn is_encoding_conflict(&self) -> bool {
        matches!(
            self,
            CompileError::Ir(IrError::DuplicateInteraction { .. } | IrError::DuplicateField(_))
                | CompileError::InvalidColorCount(_)
                | CompileError::SpinCountOverflow { .. }
        )
    }
}

/// Result type for encoding operations.
pub type CompileResult<T> = Result<T, CompileError>;
