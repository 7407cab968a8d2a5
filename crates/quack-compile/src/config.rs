//! Encoder configuration.
//!
//! [`EncoderConfig`] gathers every tunable of every encoder in one
//! serializable struct, so it can come from CLI flags or a YAML file, and
//! turns it into a ready-to-use [`Encoder`].
//!
//! # Example
//!
//! ```
//! use quack_compile::{EncoderConfig, Problem};
//! use quack_ir::Graph;
//!
//! let encoder = EncoderConfig::new(Problem::Mis)
//!     .with_field(-1.0)
//!     .with_coupling(2.0)
//!     .build()
//!     .unwrap();
//!
//! let model = encoder.encode(&Graph::cycle(4)).unwrap();
//! assert_eq!(model.num_interactions(), 4);
//! ```

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::encoder::{Encoder, Problem};
use crate::encoders::{ColoringEncoder, MaxCutEncoder, MisEncoder};
use crate::error::{CompileError, CompileResult};

/// Parameters for building an encoder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EncoderConfig {
    /// Problem family.
    pub problem: Problem,
    /// Field `h` (MIS per-vertex, coloring per-spin).
    pub field: f64,
    /// Coupling `J` (MIS per-edge).
    pub coupling: f64,
    /// Color count for coloring; falls back to the graph's own count.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors: Option<u32>,
    /// Coloring penalty for two colors on one vertex.
    pub onehot_penalty: f64,
    /// Coloring penalty for one color on both ends of an edge.
    pub adjacency_penalty: f64,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            problem: Problem::Mis,
            field: -1.0,
            coupling: 2.0,
            colors: None,
            onehot_penalty: 2.0,
            adjacency_penalty: 2.0,
        }
    }
}

fn finite(name: &'static str, value: f64) -> CompileResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(CompileError::InvalidParameter {
            name,
            value,
            reason: "must be a finite number",
        })
    }
}

fn positive(name: &'static str, value: f64) -> CompileResult<()> {
    finite(name, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(CompileError::InvalidParameter {
            name,
            value,
            reason: "must be positive",
        })
    }
}

impl EncoderConfig {
    /// Default parameters for `problem`.
    pub fn new(problem: Problem) -> Self {
        Self {
            problem,
            ..Self::default()
        }
    }

    /// Set the field `h`.
    #[must_use]
    pub fn with_field(mut self, field: f64) -> Self {
        self.field = field;
        self
    }

    /// Set the coupling `J`.
    #[must_use]
    pub fn with_coupling(mut self, coupling: f64) -> Self {
        self.coupling = coupling;
        self
    }

    /// Set the color count.
    #[must_use]
    pub fn with_colors(mut self, colors: u32) -> Self {
        self.colors = Some(colors);
        self
    }

    /// Set the coloring penalties.
    #[must_use]
    pub fn with_penalties(mut self, onehot: f64, adjacency: f64) -> Self {
        self.onehot_penalty = onehot;
        self.adjacency_penalty = adjacency;
        self
    }

    /// Check the parameters the selected problem uses.
    pub fn validate(&self) -> CompileResult<()> {
        match self.problem {
            Problem::Mis => {
                finite("field", self.field)?;
                positive("coupling", self.coupling)?;
                if self.field >= 0.0 {
                    warn!(field = self.field, "h is typically negative for MIS problems");
                }
                if self.coupling <= self.field.abs() {
                    warn!(
                        field = self.field,
                        coupling = self.coupling,
                        "coupling does not exceed |h|; ground state may not be an independent set"
                    );
                }
            }
            Problem::MaxCut => {}
            Problem::Coloring => {
                finite("field", self.field)?;
                positive("onehot_penalty", self.onehot_penalty)?;
                positive("adjacency_penalty", self.adjacency_penalty)?;
                if self.colors == Some(0) {
                    return Err(CompileError::InvalidColorCount(0));
                }
            }
        }
        Ok(())
    }

    /// Validate and build the encoder.
    pub fn build(&self) -> CompileResult<Box<dyn Encoder>> {
        self.validate()?;
        let encoder: Box<dyn Encoder> = match self.problem {
            Problem::Mis => Box::new(MisEncoder::new(self.field, self.coupling)),
            Problem::MaxCut => Box::new(MaxCutEncoder::new()),
            Problem::Coloring => {
                let mut enc = ColoringEncoder::new()
                    .with_field(self.field)
                    .with_penalties(self.onehot_penalty, self.adjacency_penalty);
                if let Some(k) = self.colors {
                    enc = enc.with_colors(k);
                }
                Box::new(enc)
            }
        };
        Ok(encoder)
    }
}
