//! quack Encoders
//!
//! Pure mappings from a validated [`quack_ir::Graph`] to a
//! [`quack_ir::IsingModel`], one per problem family.
//!
//! # Encoders
//!
//! | Problem | Spins | Fields | Couplings |
//! |---------|-------|--------|-----------|
//! | [`MisEncoder`] | one per vertex | `h` on every vertex | `J` on every edge |
//! | [`MaxCutEncoder`] | one per vertex | none | `-w` on every edge |
//! | [`ColoringEncoder`] | `vertices * colors` | `h` on every spin | one-hot + adjacency penalties |
//!
//! All encoders store couplings under canonical `(min, max)` keys. A graph
//! that lists the same vertex pair twice is an error, never a silent
//! overwrite.
//!
//! # Example
//!
//! ```rust
//! use quack_compile::{Encoder, MisEncoder};
//! use quack_ir::{Graph, validate};
//!
//! let graph = Graph::cycle(4);
//! validate(&graph).unwrap();
//!
//! let model = MisEncoder::new(-1.0, 2.0).encode(&graph).unwrap();
//! assert_eq!(model.num_spins(), 4);
//! assert_eq!(model.field(0), Some(-1.0));
//! assert_eq!(model.interaction(0, 3), Some(2.0));
//! ```
//!
//! # Custom encoders
//!
//! Implement [`Encoder`] to add a problem family:
//!
//! ```rust
//! use quack_compile::{CompileResult, Encoder, Problem};
//! use quack_ir::{Graph, IsingModel};
//!
//! struct Blank;
//!
//! impl Encoder for Blank {
//!     fn name(&self) -> &str { "blank" }
//!     fn problem(&self) -> Problem { Problem::MaxCut }
//!
//!     fn encode(&self, graph: &Graph) -> CompileResult<IsingModel> {
//!         Ok(IsingModel::empty(graph.vertex_count()))
//!     }
//! }
//! ```

pub mod config;
pub mod encoder;
pub mod encoders;
pub mod error;

pub use config::EncoderConfig;
pub use encoder::{Encoder, Problem};
pub use encoders::{ColoringEncoder, MaxCutEncoder, MisEncoder, color_spin, spin_color};
pub use error::{CompileError, CompileResult};
