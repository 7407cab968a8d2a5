//! Problem-instance graphs and their JSON input format.
//!
//! A [`Graph`] is built once from external input and is not mutated
//! afterwards. Edges are kept in input order; duplicates are kept too, so
//! that encoders can report them instead of silently merging them.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{IrError, IrResult};
use crate::spin::parse_index_pair;

/// An undirected edge between two vertex indices, in the order given.
pub type Edge = (u32, u32);

/// A problem instance: vertices, edges, optional weights and color count.
#[derive(Debug, Clone, PartialEq)]
pub struct Graph {
    vertex_count: u32,
    edges: Vec<Edge>,
    /// Parallel to `edges` when present.
    weights: Option<Vec<f64>>,
    colors: Option<u32>,
}

impl Graph {
    /// Create an unweighted graph.
    pub fn new(vertex_count: u32, edges: impl IntoIterator<Item = Edge>) -> Self {
        Self {
            vertex_count,
            edges: edges.into_iter().collect(),
            weights: None,
            colors: None,
        }
    }

    /// Create a weighted graph from `(a, b, weight)` triples.
    pub fn weighted(vertex_count: u32, edges: impl IntoIterator<Item = (u32, u32, f64)>) -> Self {
        let (edges, weights): (Vec<Edge>, Vec<f64>) =
            edges.into_iter().map(|(a, b, w)| ((a, b), w)).unzip();
        Self {
            vertex_count,
            edges,
            weights: Some(weights),
            colors: None,
        }
    }

    /// Attach a color count for coloring encodings.
    #[must_use]
    pub fn with_colors(mut self, colors: u32) -> Self {
        self.colors = Some(colors);
        self
    }

    /// Attach a weight array parallel to the edge list.
    ///
    /// The lengths are not checked here; see [`crate::validate`].
    #[must_use]
    pub fn with_weights(mut self, weights: Vec<f64>) -> Self {
        self.weights = Some(weights);
        self
    }

    /// Cycle graph `0 - 1 - ... - (n-1) - 0`.
    ///
    /// Below three vertices there is no cycle; `n = 2` gives the single
    /// edge `(0, 1)` and `n < 2` gives no edges.
    pub fn cycle(n: u32) -> Self {
        if n < 3 {
            return Self::new(n, (1..n).map(|i| (i - 1, i)));
        }
        Self::new(n, (0..n).map(|i| (i, (i + 1) % n)))
    }

    /// Complete graph on `n` vertices.
    pub fn complete(n: u32) -> Self {
        Self::new(n, (0..n).flat_map(|i| ((i + 1)..n).map(move |j| (i, j))))
    }

    /// Parse a graph from its JSON input format.
    pub fn from_json(source: &str) -> IrResult<Self> {
        let input: GraphInput = serde_json::from_str(source)?;
        Graph::try_from(input)
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    /// Edges in input order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Number of edges (duplicates included).
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Raw weight array, if one was given.
    pub fn weights(&self) -> Option<&[f64]> {
        self.weights.as_deref()
    }

    /// Color count, if one was given.
    pub fn colors(&self) -> Option<u32> {
        self.colors
    }

    /// True when an explicit weight array is attached.
    pub fn is_weighted(&self) -> bool {
        self.weights.is_some()
    }

    /// Edges paired with their weight. Unweighted graphs yield 1.0 per edge.
    pub fn weighted_edges(&self) -> impl Iterator<Item = (u32, u32, f64)> + '_ {
        self.edges.iter().enumerate().map(|(idx, &(a, b))| {
            let w = self
                .weights
                .as_ref()
                .and_then(|ws| ws.get(idx).copied())
                .unwrap_or(1.0);
            (a, b, w)
        })
    }

    /// Convert back to the JSON input format (weights as a parallel array).
    pub fn to_input(&self) -> GraphInput {
        GraphInput {
            vertices: self.vertex_count,
            edges: self.edges.iter().map(|&(a, b)| [a, b]).collect(),
            weights: self.weights.clone().map(WeightsInput::Parallel),
            colors: self.colors,
        }
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Graph ({} vertices, {} edges",
            self.vertex_count,
            self.edges.len()
        )?;
        if let Some(k) = self.colors {
            write!(f, ", {k} colors")?;
        }
        writeln!(f, "):")?;
        for (a, b, w) in self.weighted_edges() {
            if self.is_weighted() {
                writeln!(f, "  {a} -- {b} (weight: {w:.2})")?;
            } else {
                writeln!(f, "  {a} -- {b}")?;
            }
        }
        Ok(())
    }
}

/// JSON input format for a graph.
///
/// ```json
/// {"vertices": 4, "edges": [[0,1], [1,2], [2,3], [3,0]]}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphInput {
    /// Number of vertices.
    pub vertices: u32,
    /// Edge list as index pairs.
    #[serde(default)]
    pub edges: Vec<[u32; 2]>,
    /// Optional edge weights.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weights: Option<WeightsInput>,
    /// Optional color count for coloring problems.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<u32>,
}

/// Edge weights as either a parallel array or an `"i,j"`-keyed map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WeightsInput {
    /// One weight per edge, in edge order.
    Parallel(Vec<f64>),
    /// Weights keyed by vertex pair; unlisted edges weigh 1.0.
    Keyed(#[serde(with = "crate::wire::entries")] Vec<(String, f64)>),
}

/// Resolves keyed weights onto the edge list.
///
/// A weight key naming no edge ([`IrError::UnknownWeightedEdge`]) or naming
/// the same vertex pair twice ([`IrError::DuplicateWeight`]) is a
/// structural error, reported here because the edge list is needed to
/// detect it.
impl TryFrom<GraphInput> for Graph {
    type Error = IrError;

    fn try_from(input: GraphInput) -> IrResult<Self> {
        let edges: Vec<Edge> = input.edges.iter().map(|&[a, b]| (a, b)).collect();

        let weights = match input.weights {
            None => None,
            Some(WeightsInput::Parallel(ws)) => Some(ws),
            Some(WeightsInput::Keyed(map)) => {
                let mut ws = vec![1.0; edges.len()];
                let mut keyed = FxHashSet::default();
                for (key, weight) in map {
                    let (a, b) = parse_index_pair(&key)?;
                    let pair = (a.min(b), a.max(b));
                    if !keyed.insert(pair) {
                        return Err(IrError::DuplicateWeight { edge: pair });
                    }
                    let mut matched = false;
                    for (slot, &(x, y)) in ws.iter_mut().zip(&edges) {
                        if (x.min(y), x.max(y)) == pair {
                            *slot = weight;
                            matched = true;
                        }
                    }
                    if !matched {
                        return Err(IrError::UnknownWeightedEdge { edge: (a, b) });
                    }
                }
                Some(ws)
            }
        };

        Ok(Self {
            vertex_count: input.vertices,
            edges,
            weights,
            colors: input.colors,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_and_complete() {
        let c4 = Graph::cycle(4);
        assert_eq!(c4.edges(), &[(0, 1), (1, 2), (2, 3), (3, 0)]);
        assert_eq!(Graph::cycle(2).edges(), &[(0, 1)]);
        assert!(Graph::cycle(1).edges().is_empty());
        assert!(Graph::cycle(0).edges().is_empty());

        let k4 = Graph::complete(4);
        assert_eq!(k4.num_edges(), 6);
    }

    #[test]
    fn test_unweighted_edges_default_to_unit_weight() {
        let g = Graph::new(3, [(0, 1), (1, 2)]);
        let ws: Vec<f64> = g.weighted_edges().map(|(_, _, w)| w).collect();
        assert_eq!(ws, vec![1.0, 1.0]);
        assert!(!g.is_weighted());
    }

    #[test]
    fn test_parse_plain_input() {
        let g = Graph::from_json(r#"{"vertices": 4, "edges": [[0,1], [1,2], [2,3], [3,0]]}"#)
            .unwrap();
        assert_eq!(g, Graph::cycle(4));
        assert_eq!(g.colors(), None);
    }

    #[test]
    fn test_parse_parallel_weights_and_colors() {
        let g = Graph::from_json(
            r#"{"vertices": 3, "edges": [[0,1], [1,2]], "weights": [2.5, -1.0], "colors": 3}"#,
        )
        .unwrap();
        assert_eq!(g.weights(), Some(&[2.5, -1.0][..]));
        assert_eq!(g.colors(), Some(3));
    }

    #[test]
    fn test_parse_keyed_weights() {
        let g = Graph::from_json(
            r#"{"vertices": 3, "edges": [[0,1], [2,1]], "weights": {"1,2": 4.0}}"#,
        )
        .unwrap();
        let ws: Vec<_> = g.weighted_edges().collect();
        assert_eq!(ws, vec![(0, 1, 1.0), (2, 1, 4.0)]);
    }

    #[test]
    fn test_keyed_weight_for_missing_edge() {
        let err = Graph::from_json(r#"{"vertices": 3, "edges": [[0,1]], "weights": {"0,2": 1.0}}"#)
            .unwrap_err();
        assert!(matches!(err, IrError::UnknownWeightedEdge { edge: (0, 2) }));
    }

    #[test]
    fn test_repeated_weight_key_rejected() {
        let err = Graph::from_json(
            r#"{"vertices": 2, "edges": [[0,1]], "weights": {"0,1": 1.0, "0,1": 9.0}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, IrError::DuplicateWeight { edge: (0, 1) }));
        assert!(err.is_structural());

        let err = Graph::from_json(
            r#"{"vertices": 2, "edges": [[0,1]], "weights": {"0,1": 1.0, "1,0": 9.0}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, IrError::DuplicateWeight { edge: (0, 1) }));
    }

    #[test]
    fn test_negative_index_rejected_at_parse() {
        let err = Graph::from_json(r#"{"vertices": 3, "edges": [[0,-1]]}"#).unwrap_err();
        assert!(matches!(err, IrError::Json(_)));
    }

    #[test]
    fn test_input_roundtrip() {
        let g = Graph::weighted(3, [(0, 1, 0.5), (1, 2, 2.0)]).with_colors(2);
        let back = Graph::try_from(g.to_input()).unwrap();
        assert_eq!(back, g);
    }
}
