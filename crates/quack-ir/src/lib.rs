//! quack Intermediate Representation
//!
//! Core data structures for the quack analog compiler: the problem
//! [`Graph`] that comes in, the [`IsingModel`] that goes out, and the
//! structural [`validate`] check that sits in between.
//!
//! # Overview
//!
//! ```text
//! GraphInput (JSON) ──► Graph ──► validate ──► encoder ──► IsingModel ──► coefficient JSON
//! ```
//!
//! Encoders live in `quack-compile`; this crate only defines the models
//! and their invariants:
//!
//! - **Graph**: vertex count, ordered edge list, optional parallel weights,
//!   optional color count. Immutable once built.
//! - **IsingModel**: spin count, sparse fields `h_i`, sparse couplings
//!   `J_ij` keyed by canonical [`SpinPair`]. Built through
//!   [`IsingModelBuilder`], which refuses to overwrite a coupling.
//! - **Wire format**: [`IsingCoefficients`], `{"spins", "h", "J"}`.
//!
//! # Example
//!
//! ```rust
//! use quack_ir::{Graph, IsingModelBuilder, validate};
//!
//! let graph = Graph::cycle(4);
//! validate(&graph).unwrap();
//!
//! let mut builder = IsingModelBuilder::new(graph.vertex_count());
//! for &(a, b) in graph.edges() {
//!     builder.set_interaction(a, b, 2.0).unwrap();
//! }
//! let model = builder.build();
//!
//! assert_eq!(model.interaction(3, 0), Some(2.0));
//! assert!(model.to_json().unwrap().contains("\"0,3\":2.0"));
//! ```

pub mod coefficients;
pub mod error;
pub mod graph;
pub mod ising;
pub mod spin;
pub mod validate;
pub mod wire;

pub use coefficients::IsingCoefficients;
pub use error::{IrError, IrResult};
pub use graph::{Edge, Graph, GraphInput, WeightsInput};
pub use ising::{IsingModel, IsingModelBuilder};
pub use spin::{SpinId, SpinPair};
pub use validate::validate;
