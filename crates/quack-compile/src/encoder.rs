//! Encoder trait and problem families.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use quack_ir::{Graph, IsingModel};

use crate::error::CompileResult;

/// The combinatorial problem an encoder targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Problem {
    /// Maximum Independent Set.
    #[default]
    Mis,
    /// Weighted Max-Cut.
    MaxCut,
    /// Graph k-coloring.
    Coloring,
}

impl Problem {
    /// Canonical short name.
    pub fn as_str(self) -> &'static str {
        match self {
            Problem::Mis => "mis",
            Problem::MaxCut => "max_cut",
            Problem::Coloring => "coloring",
        }
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Problem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mis" | "independent-set" => Ok(Problem::Mis),
            "max_cut" | "max-cut" | "maxcut" => Ok(Problem::MaxCut),
            "coloring" | "colouring" | "k-coloring" => Ok(Problem::Coloring),
            other => Err(format!(
                "Unknown problem: '{other}'. Available: mis, max-cut, coloring"
            )),
        }
    }
}

/// Maps a validated graph to an Ising model.
///
/// Implementations are pure: no shared state, the same input always gives
/// the same model, and on failure no model is produced at all.
pub trait Encoder: Send + Sync {
    /// Get the name of this encoder.
    fn name(&self) -> &str;

    /// The problem family this encoder targets.
    fn problem(&self) -> Problem;

    /// Encode the graph.
    ///
    /// The graph is expected to have passed [`quack_ir::validate`]; an
    /// unvalidated graph yields an error rather than a panic.
    fn encode(&self, graph: &Graph) -> CompileResult<IsingModel>;
}
