//! Batch input sources.

use std::fs;
use std::path::PathBuf;

use quack_ir::{Graph, IrError};

use crate::error::{BatchError, BatchResult};

/// Where one batch instance comes from.
#[derive(Debug, Clone)]
pub enum GraphSource {
    /// A JSON graph file on disk.
    File(PathBuf),
    /// JSON text supplied directly.
    Inline {
        /// Identifier reported with the result.
        label: String,
        /// Graph JSON.
        json: String,
    },
    /// An already-constructed graph.
    Graph {
        /// Identifier reported with the result.
        label: String,
        /// The graph.
        graph: Graph,
    },
}

impl GraphSource {
    /// A file source.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        GraphSource::File(path.into())
    }

    /// An inline JSON source.
    pub fn inline(label: impl Into<String>, json: impl Into<String>) -> Self {
        GraphSource::Inline {
            label: label.into(),
            json: json.into(),
        }
    }

    /// An in-memory graph source.
    pub fn graph(label: impl Into<String>, graph: Graph) -> Self {
        GraphSource::Graph {
            label: label.into(),
            graph,
        }
    }

    /// Identifier used to tag this instance's result.
    pub fn label(&self) -> String {
        match self {
            GraphSource::File(path) => path.display().to_string(),
            GraphSource::Inline { label, .. } | GraphSource::Graph { label, .. } => label.clone(),
        }
    }

    /// Read and parse the graph. Blocking for file sources.
    ///
    /// Structural errors found while resolving the input (such as a weight
    /// keyed to a missing edge) come back as [`BatchError::Invalid`], the
    /// same as errors found by validation.
    pub fn load(self) -> BatchResult<Graph> {
        match self {
            GraphSource::File(path) => {
                let text = fs::read_to_string(&path).map_err(|source| BatchError::Io {
                    path: path.clone(),
                    source,
                })?;
                Graph::from_json(&text).map_err(parse_error)
            }
            GraphSource::Inline { json, .. } => Graph::from_json(&json).map_err(parse_error),
            GraphSource::Graph { graph, .. } => Ok(graph),
        }
    }
}

fn parse_error(e: IrError) -> BatchError {
    if e.is_structural() {
        BatchError::Invalid(e)
    } else {
        BatchError::Parse(e)
    }
}
