//! Structural validation of problem graphs.
//!
//! Validation must run before encoding. It is a pure check and never
//! rewrites the graph; in particular it does not deduplicate edges, so
//! encoders still report duplicate pairs themselves.

use crate::error::{IrError, IrResult};
use crate::graph::Graph;

/// Check that a graph is well-formed.
///
/// Fails on the first problem found, in this order:
/// - no vertices ([`IrError::InvalidVertexCount`])
/// - an edge endpoint outside `0..vertex_count` ([`IrError::InvalidEdgeEndpoint`])
/// - an edge from a vertex to itself ([`IrError::SelfLoop`])
/// - a weight array not parallel to the edges ([`IrError::WeightCountMismatch`])
/// - a NaN or infinite weight ([`IrError::NonFiniteWeight`])
pub fn validate(graph: &Graph) -> IrResult<()> {
    let n = graph.vertex_count();
    if n == 0 {
        return Err(IrError::InvalidVertexCount(n));
    }

    for &(a, b) in graph.edges() {
        if a >= n || b >= n {
            return Err(IrError::InvalidEdgeEndpoint {
                edge: (a, b),
                vertex_count: n,
            });
        }
        if a == b {
            return Err(IrError::SelfLoop { vertex: a });
        }
    }

    if let Some(weights) = graph.weights() {
        if weights.len() != graph.num_edges() {
            return Err(IrError::WeightCountMismatch {
                edges: graph.num_edges(),
                weights: weights.len(),
            });
        }
        for (a, b, w) in graph.weighted_edges() {
            if !w.is_finite() {
                return Err(IrError::NonFiniteWeight {
                    edge: (a, b),
                    weight: w,
                });
            }
        }
    }

    Ok(())
}

impl Graph {
    /// See [`validate`].
    pub fn validate(&self) -> IrResult<()> {
        validate(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_cycle() {
        assert!(validate(&Graph::cycle(4)).is_ok());
    }

    #[test]
    fn test_accepts_edgeless_graph() {
        assert!(validate(&Graph::new(3, [])).is_ok());
    }

    #[test]
    fn test_rejects_empty_graph() {
        assert!(matches!(
            validate(&Graph::new(0, [])),
            Err(IrError::InvalidVertexCount(0))
        ));
    }

    #[test]
    fn test_rejects_out_of_range_endpoint() {
        let err = validate(&Graph::new(3, [(0, 1), (1, 3)])).unwrap_err();
        assert!(matches!(
            err,
            IrError::InvalidEdgeEndpoint {
                edge: (1, 3),
                vertex_count: 3
            }
        ));
    }

    #[test]
    fn test_rejects_self_loop() {
        let err = validate(&Graph::new(3, [(0, 1), (2, 2)])).unwrap_err();
        assert!(matches!(err, IrError::SelfLoop { vertex: 2 }));
    }

    #[test]
    fn test_does_not_reject_duplicate_edges() {
        assert!(validate(&Graph::new(2, [(0, 1), (1, 0)])).is_ok());
    }

    #[test]
    fn test_rejects_weight_mismatch() {
        let g = Graph::new(3, [(0, 1), (1, 2)]).with_weights(vec![1.0]);
        assert!(matches!(
            validate(&g),
            Err(IrError::WeightCountMismatch {
                edges: 2,
                weights: 1
            })
        ));
    }

    #[test]
    fn test_rejects_nan_weight() {
        let g = Graph::weighted(2, [(0, 1, f64::NAN)]);
        assert!(matches!(
            validate(&g),
            Err(IrError::NonFiniteWeight { edge: (0, 1), .. })
        ));
    }
}
