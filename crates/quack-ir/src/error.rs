//! Error types for the IR crate.

use crate::spin::SpinId;
use thiserror::Error;

/// Errors that can occur while building or checking graphs and Ising models.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Graph has no vertices.
    #[error("Graph must have at least one vertex, got {0}")]
    InvalidVertexCount(u32),

    /// Edge references a vertex outside `0..vertex_count`.
    #[error("Edge {edge:?} references a vertex outside 0..{vertex_count}")]
    InvalidEdgeEndpoint {
        /// The offending edge.
        edge: (u32, u32),
        /// Number of vertices in the graph.
        vertex_count: u32,
    },

    /// Edge connects a vertex to itself.
    #[error("Loops are not allowed: edge ({vertex}, {vertex})")]
    SelfLoop {
        /// The looped vertex.
        vertex: u32,
    },

    /// Parallel weight array does not line up with the edge list.
    #[error("Graph has {edges} edges but {weights} weights")]
    WeightCountMismatch {
        /// Number of edges.
        edges: usize,
        /// Number of weights supplied.
        weights: usize,
    },

    /// Keyed weight names a vertex pair that is not an edge.
    #[error("Weight given for {edge:?}, which is not an edge of the graph")]
    UnknownWeightedEdge {
        /// The vertex pair from the weight key.
        edge: (u32, u32),
    },

    /// Keyed weights name the same vertex pair twice.
    #[error("Weight given twice for edge {edge:?}")]
    DuplicateWeight {
        /// The vertex pair, lower index first.
        edge: (u32, u32),
    },

    /// Edge weight is NaN or infinite.
    #[error("Edge {edge:?} has non-finite weight {weight}")]
    NonFiniteWeight {
        /// The weighted edge.
        edge: (u32, u32),
        /// The rejected weight.
        weight: f64,
    },

    /// A coupling was written twice for the same canonical spin pair.
    #[error("Duplicate interaction between spins {low} and {high}")]
    DuplicateInteraction {
        /// Lower spin of the pair.
        low: SpinId,
        /// Higher spin of the pair.
        high: SpinId,
    },

    /// A field was written twice for the same spin.
    #[error("Duplicate field on spin {0}")]
    DuplicateField(SpinId),

    /// Spin index is not below the model's spin count.
    #[error("Spin {spin} out of range for model with {num_spins} spins")]
    SpinOutOfRange {
        /// The offending spin.
        spin: SpinId,
        /// Number of spins in the model.
        num_spins: u32,
    },

    /// A spin cannot couple to itself.
    #[error("Spin {0} cannot interact with itself")]
    SelfInteraction(SpinId),

    /// Malformed key in the coefficient or weight wire format.
    #[error("Invalid coefficient key '{key}': {reason}")]
    InvalidCoefficientKey {
        /// The key as it appeared on the wire.
        key: String,
        /// What is wrong with it.
        reason: &'static str,
    },

    /// Coefficient value is NaN or infinite.
    #[error("Coefficient '{key}' is not finite: {value}")]
    NonFiniteCoefficient {
        /// Wire key of the coefficient.
        key: String,
        /// The rejected value.
        value: f64,
    },

    /// JSON (de)serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl IrError {
    /// True for malformed-graph errors reported by validation.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            IrError::InvalidVertexCount(_)
                | IrError::InvalidEdgeEndpoint { .. }
                | IrError::SelfLoop { .. }
                | IrError::WeightCountMismatch { .. }
                | IrError::UnknownWeightedEdge { .. }
                | IrError::DuplicateWeight { .. }
                | IrError::NonFiniteWeight { .. }
        )
    }
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
