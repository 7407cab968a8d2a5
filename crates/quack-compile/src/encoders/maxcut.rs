//! Max-Cut encoding.

use tracing::debug;

use quack_ir::{Graph, IsingModel, IsingModelBuilder};

use crate::encoder::{Encoder, Problem};
use crate::error::CompileResult;

/// Encodes weighted Max-Cut.
///
/// One spin per vertex, no fields, and `J_ij = -w_ij` for every edge.
/// Unweighted graphs use unit weights.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaxCutEncoder;

impl MaxCutEncoder {
    /// Create the encoder.
    pub fn new() -> Self {
        Self
    }
}

impl Encoder for MaxCutEncoder {
    fn name(&self) -> &'static str {
        "max_cut"
    }

    fn problem(&self) -> Problem {
        Problem::MaxCut
    }

    fn encode(&self, graph: &Graph) -> CompileResult<IsingModel> {
        let mut builder = IsingModelBuilder::new(graph.vertex_count());

        for (a, b, w) in graph.weighted_edges() {
            builder.set_interaction(a, b, -w)?;
        }

        let model = builder.build();
        debug!(
            spins = model.num_spins(),
            couplings = model.num_interactions(),
            weighted = graph.is_weighted(),
            "Encoded Max-Cut"
        );
        Ok(model)
    }
}
