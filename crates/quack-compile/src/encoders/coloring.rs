//! Graph k-coloring encoding.
//!
//! One spin per (vertex, color) pair, indexed `vertex * colors + color`.
//! Two penalty families share the coupling map and accumulate by addition:
//!
//! - one-hot: distinct colors `c1 < c2` on the same vertex
//! - adjacency: the same color on both endpoints of an edge
//!
//! Every spin also gets a negative field biasing it toward selection.

use rustc_hash::FxHashSet;
use tracing::debug;

use quack_ir::{Graph, IrError, IsingModel, IsingModelBuilder, SpinId};

use crate::encoder::{Encoder, Problem};
use crate::error::{CompileError, CompileResult};

/// Spin index of `(vertex, color)` for a `colors`-coloring.
///
/// `None` when `color` is not below `colors` or the index overflows.
pub fn color_spin(vertex: u32, color: u32, colors: u32) -> Option<SpinId> {
    if color >= colors {
        return None;
    }
    vertex
        .checked_mul(colors)
        .and_then(|base| base.checked_add(color))
        .map(SpinId)
}

/// Inverse of [`color_spin`]: `(vertex, color)` for a spin. `None` when
/// `colors` is zero.
pub fn spin_color(spin: SpinId, colors: u32) -> Option<(u32, u32)> {
    (colors > 0).then(|| (spin.0 / colors, spin.0 % colors))
}

// Callers guarantee `vertex < n`, `color < k` and that `n * k` fits in u32.
fn spin(vertex: u32, color: u32, k: u32) -> SpinId {
    SpinId(vertex * k + color)
}

/// Encodes graph k-coloring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColoringEncoder {
    /// Overrides the graph's own color count when set.
    colors: Option<u32>,
    field: f64,
    onehot_penalty: f64,
    adjacency_penalty: f64,
}

impl ColoringEncoder {
    /// Create an encoder that takes the color count from the graph.
    pub fn new() -> Self {
        Self {
            colors: None,
            field: -1.0,
            onehot_penalty: 2.0,
            adjacency_penalty: 2.0,
        }
    }

    /// Use `colors` regardless of what the graph says.
    #[must_use]
    pub fn with_colors(mut self, colors: u32) -> Self {
        self.colors = Some(colors);
        self
    }

    /// Set the per-spin field.
    #[must_use]
    pub fn with_field(mut self, field: f64) -> Self {
        self.field = field;
        self
    }

    /// Set the one-hot and adjacency penalties.
    #[must_use]
    pub fn with_penalties(mut self, onehot: f64, adjacency: f64) -> Self {
        self.onehot_penalty = onehot;
        self.adjacency_penalty = adjacency;
        self
    }

    /// Color count used for `graph`.
    pub fn colors_for(&self, graph: &Graph) -> CompileResult<u32> {
        match self.colors.or(graph.colors()) {
            Some(k) if k > 0 => Ok(k),
            other => Err(CompileError::InvalidColorCount(other.unwrap_or(0))),
        }
    }
}

impl Default for ColoringEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Encoder for ColoringEncoder {
    fn name(&self) -> &'static str {
        "coloring"
    }

    fn problem(&self) -> Problem {
        Problem::Coloring
    }

    fn encode(&self, graph: &Graph) -> CompileResult<IsingModel> {
        let k = self.colors_for(graph)?;
        let n = graph.vertex_count();
        let num_spins = n
            .checked_mul(k)
            .ok_or(CompileError::SpinCountOverflow {
                vertices: n,
                colors: k,
            })?;

        // Endpoint checks come first: spin indices are computed from them.
        let mut seen: FxHashSet<(u32, u32)> = FxHashSet::default();
        for &(a, b) in graph.edges() {
            if a >= n || b >= n {
                return Err(IrError::InvalidEdgeEndpoint {
                    edge: (a, b),
                    vertex_count: n,
                }
                .into());
            }
            if !seen.insert((a.min(b), a.max(b))) {
                return Err(IrError::DuplicateInteraction {
                    low: spin(a.min(b), 0, k),
                    high: spin(a.max(b), 0, k),
                }
                .into());
            }
        }

        let mut builder = IsingModelBuilder::new(num_spins);

        for s in 0..num_spins {
            builder.set_field(s, self.field)?;
        }

        for v in 0..n {
            for c1 in 0..k {
                for c2 in (c1 + 1)..k {
                    builder.add_interaction(
                        spin(v, c1, k),
                        spin(v, c2, k),
                        self.onehot_penalty,
                    )?;
                }
            }
        }

        for &(a, b) in graph.edges() {
            for c in 0..k {
                builder.add_interaction(
                    spin(a, c, k),
                    spin(b, c, k),
                    self.adjacency_penalty,
                )?;
            }
        }

        let model = builder.build();
        debug!(
            vertices = n,
            colors = k,
            spins = model.num_spins(),
            couplings = model.num_interactions(),
            "Encoded k-coloring"
        );
        Ok(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_edge_two_colors() {
        let graph = Graph::new(2, [(0, 1)]);
        let model = ColoringEncoder::new()
            .with_colors(2)
            .encode(&graph)
            .unwrap();

        assert_eq!(model.num_spins(), 4);
        // one-hot: (v0,c0)-(v0,c1), (v1,c0)-(v1,c1)
        assert_eq!(model.interaction(0, 1), Some(2.0));
        assert_eq!(model.interaction(2, 3), Some(2.0));
        // adjacency: (v0,c0)-(v1,c0), (v0,c1)-(v1,c1)
        assert_eq!(model.interaction(0, 2), Some(2.0));
        assert_eq!(model.interaction(1, 3), Some(2.0));
        assert_eq!(model.num_interactions(), 4);
        assert!(model.fields().values().all(|&h| h < 0.0));
        assert_eq!(model.num_fields(), 4);
    }

    #[test]
    fn test_penalties_are_independent() {
        let graph = Graph::new(2, [(0, 1)]);
        let model = ColoringEncoder::new()
            .with_colors(2)
            .with_penalties(1.0, 5.0)
            .encode(&graph)
            .unwrap();
        assert_eq!(model.interaction(0, 1), Some(1.0));
        assert_eq!(model.interaction(0, 2), Some(5.0));
    }

    #[test]
    fn test_color_count_from_graph() {
        let graph = Graph::cycle(3).with_colors(3);
        let model = ColoringEncoder::new().encode(&graph).unwrap();
        assert_eq!(model.num_spins(), 9);
        // 3 one-hot pairs per vertex + 3 colors per edge
        assert_eq!(model.num_interactions(), 3 * 3 + 3 * 3);
    }

    #[test]
    fn test_missing_or_zero_colors() {
        let graph = Graph::new(2, [(0, 1)]);
        assert!(matches!(
            ColoringEncoder::new().encode(&graph),
            Err(CompileError::InvalidColorCount(0))
        ));
        let err = ColoringEncoder::new()
            .with_colors(0)
            .encode(&graph)
            .unwrap_err();
        assert!(err.is_encoding_conflict());
    }

    #[test]
    fn test_duplicate_edge_rejected() {
        let graph = Graph::new(2, [(0, 1), (1, 0)]).with_colors(2);
        assert!(matches!(
            ColoringEncoder::new().encode(&graph),
            Err(CompileError::Ir(IrError::DuplicateInteraction { .. }))
        ));
    }

    #[test]
    fn test_spin_count_overflow() {
        let graph = Graph::new(u32::MAX, []).with_colors(2);
        assert!(matches!(
            ColoringEncoder::new().encode(&graph),
            Err(CompileError::SpinCountOverflow { .. })
        ));
    }

    #[test]
    fn test_spin_index_roundtrip() {
        for v in 0..4 {
            for c in 0..3 {
                let s = color_spin(v, c, 3).unwrap();
                assert_eq!(spin_color(s, 3), Some((v, c)));
            }
        }
    }

    #[test]
    fn test_spin_index_helpers_reject_bad_input() {
        assert_eq!(color_spin(0, 3, 3), None);
        assert_eq!(color_spin(u32::MAX, 1, 2), None);
        assert_eq!(color_spin(u32::MAX / 2, 1, 2), Some(SpinId(u32::MAX)));
        assert_eq!(spin_color(SpinId(5), 0), None);
    }
}
