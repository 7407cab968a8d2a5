//! quack Batch Pipeline
//!
//! Compiles many graph instances concurrently without letting one bad
//! instance affect the others.
//!
//! # Overview
//!
//! A [`Pipeline`] wraps one [`quack_compile::Encoder`] and runs three
//! long-lived stages connected by bounded `tokio::sync::mpsc` channels:
//!
//! 1. **enumerate**: tags each [`GraphSource`] with an [`InstanceId`]
//! 2. **read + validate**: loads the graph and checks its structure
//! 3. **encode**: runs the encoder
//!
//! The caller's task collects results. Every instance yields exactly one
//! [`InstanceResult`], successful or not, and the [`BatchReport`] is
//! returned only after all of them have arrived.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use quack_batch::{GraphSource, Pipeline};
//! use quack_compile::MisEncoder;
//! use quack_ir::Graph;
//!
//! let rt = tokio::runtime::Runtime::new().unwrap();
//! let report = rt.block_on(async {
//!     Pipeline::new(Arc::new(MisEncoder::default()))
//!         .run(vec![
//!             GraphSource::graph("square", Graph::cycle(4)),
//!             GraphSource::graph("empty", Graph::new(0, [])),
//!         ])
//!         .await
//!         .unwrap()
//! });
//!
//! assert_eq!(report.len(), 2);
//! assert_eq!(report.num_failed(), 1);
//! assert!(report.get("square").unwrap().is_success());
//! ```

pub mod error;
pub mod pipeline;
pub mod report;
pub mod source;

pub use error::{BatchError, BatchResult};
pub use pipeline::Pipeline;
pub use report::{BatchReport, InstanceId, InstanceResult, Stage};
pub use source::GraphSource;
