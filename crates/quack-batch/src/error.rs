//! Error handling for the batch pipeline.

use std::path::PathBuf;

use quack_compile::CompileError;
use quack_ir::IrError;
use thiserror::Error;

/// Result type for batch operations.
pub type BatchResult<T> = Result<T, BatchError>;

/// Errors that can occur while compiling a batch.
///
/// Per-instance errors (`Io`, `Parse`, `Invalid`, `Encode`) are carried in
/// that instance's result and never abort the batch. `StageFailed` and
/// `Incomplete` concern the pipeline as a whole.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum BatchError {
    /// Input could not be read.
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        /// The file that failed.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Input was read but is not a graph.
    #[error("Failed to parse graph: {0}")]
    Parse(#[source] IrError),

    /// Graph failed structural validation.
    #[error("Invalid graph: {0}")]
    Invalid(#[source] IrError),

    /// Encoder rejected the graph.
    #[error("Encoding failed: {0}")]
    Encode(#[from] CompileError),

    /// A pipeline stage panicked or was cancelled.
    #[error("Pipeline stage '{0}' terminated abnormally")]
    StageFailed(&'static str),

    /// Fewer results than instances reached the collector.
    #[error("Pipeline finished with {received} of {expected} results")]
    Incomplete {
        /// Instances submitted.
        expected: usize,
        /// Results collected.
        received: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BatchError::Invalid(IrError::SelfLoop { vertex: 3 });
        assert_eq!(
            err.to_string(),
            "Invalid graph: Loops are not allowed: edge (3, 3)"
        );

        let err = BatchError::Io {
            path: PathBuf::from("missing.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(err.to_string(), "Failed to read missing.json: not found");

        let err = BatchError::Incomplete {
            expected: 3,
            received: 2,
        };
        assert_eq!(err.to_string(), "Pipeline finished with 2 of 3 results");
    }
}
