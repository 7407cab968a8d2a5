//! Maximum Independent Set encoding.

use tracing::debug;

use quack_ir::{Graph, IsingModel, IsingModelBuilder};

use crate::encoder::{Encoder, Problem};
use crate::error::CompileResult;

/// Encodes Maximum Independent Set.
///
/// One spin per vertex. Every spin gets the field `h` (negative values bias
/// spins toward the selected +1 state) and every edge gets the coupling `J`
/// (positive values penalize selecting both endpoints). For the ground
/// state to be an independent set, `J` must outweigh `|h|`.
///
/// A repeated edge, in either orientation, is rejected with
/// `IrError::DuplicateInteraction`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MisEncoder {
    field: f64,
    coupling: f64,
}

impl MisEncoder {
    /// Create an encoder with field `h` and coupling `J`.
    pub fn new(field: f64, coupling: f64) -> Self {
        Self { field, coupling }
    }

    /// The per-vertex field.
    pub fn field(&self) -> f64 {
        self.field
    }

    /// The per-edge coupling.
    pub fn coupling(&self) -> f64 {
        self.coupling
    }
}

impl Default for MisEncoder {
    fn default() -> Self {
        Self::new(-1.0, 2.0)
    }
}

impl Encoder for MisEncoder {
    fn name(&self) -> &'static str {
        "mis"
    }

    fn problem(&self) -> Problem {
        Problem::Mis
    }

    fn encode(&self, graph: &Graph) -> CompileResult<IsingModel> {
        let mut builder = IsingModelBuilder::new(graph.vertex_count());

        for v in 0..graph.vertex_count() {
            builder.set_field(v, self.field)?;
        }
        for &(a, b) in graph.edges() {
            builder.set_interaction(a, b, self.coupling)?;
        }

        let model = builder.build();
        debug!(
            spins = model.num_spins(),
            couplings = model.num_interactions(),
            "Encoded MIS"
        );
        Ok(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CompileError;
    use quack_ir::IrError;

    #[test]
    fn test_four_cycle() {
        let model = MisEncoder::new(-1.0, 2.0).encode(&Graph::cycle(4)).unwrap();

        assert_eq!(model.num_spins(), 4);
        for v in 0..4 {
            assert_eq!(model.field(v), Some(-1.0));
        }
        assert_eq!(model.num_interactions(), 4);
        for (a, b) in [(0, 1), (1, 2), (2, 3), (0, 3)] {
            assert_eq!(model.interaction(a, b), Some(2.0));
        }
    }

    #[test]
    fn test_duplicate_edge_rejected() {
        let graph = Graph::new(3, [(0, 1), (1, 2), (0, 1)]);
        let err = MisEncoder::default().encode(&graph).unwrap_err();
        assert!(matches!(err, CompileError::Ir(IrError::DuplicateInteraction { .. })));
        assert!(err.is_encoding_conflict());
    }

    #[test]
    fn test_reversed_duplicate_edge_rejected() {
        let graph = Graph::new(2, [(0, 1), (1, 0)]);
        assert!(MisEncoder::default().encode(&graph).is_err());
    }

    #[test]
    fn test_edgeless_graph() {
        let model = MisEncoder::default().encode(&Graph::new(3, [])).unwrap();
        assert_eq!(model.num_fields(), 3);
        assert_eq!(model.num_interactions(), 0);
    }

    #[test]
    fn test_unvalidated_graph_errors_instead_of_panicking() {
        let graph = Graph::new(2, [(0, 5)]);
        assert!(matches!(
            MisEncoder::default().encode(&graph),
            Err(CompileError::Ir(IrError::SpinOutOfRange { .. }))
        ));
    }
}
