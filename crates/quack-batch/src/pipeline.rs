//! Staged concurrent compilation.
//!
//! ```text
//! enumerate ──► read + validate ──► encode ──► collect
//!                      │                          ▲
//!                      └──── failures ────────────┘
//! ```
//!
//! Each stage is a long-lived task consuming one bounded channel and
//! producing to the next. A stage closes its output when its input is
//! exhausted, so the collector terminates once every instance has produced
//! exactly one result. Failures skip the remaining stages and go straight
//! to the collector, so results may arrive out of submission order.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::{self, JoinHandle};
use tracing::{debug, info, instrument, warn};

use quack_compile::Encoder;
use quack_ir::Graph;

use crate::error::{BatchError, BatchResult};
use crate::report::{BatchReport, InstanceId, InstanceResult, Stage};
use crate::source::GraphSource;

/// Compiles many graph instances concurrently with one encoder.
#[derive(Clone)]
pub struct Pipeline {
    encoder: Arc<dyn Encoder>,
    /// Queue bound; defaults to the batch size.
    capacity: Option<usize>,
}

impl Pipeline {
    /// Create a pipeline around an encoder.
    pub fn new(encoder: Arc<dyn Encoder>) -> Self {
        Self {
            encoder,
            capacity: None,
        }
    }

    /// Bound every inter-stage queue to `capacity` instead of the batch
    /// size. Producers block on a full queue.
    #[must_use]
    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity.max(1));
        self
    }

    /// Compile every source and return one result per source.
    pub async fn run(&self, sources: Vec<GraphSource>) -> BatchResult<BatchReport> {
        self.run_with(sources, |_| {}).await
    }

    /// Like [`run`](Self::run), calling `observer` as each result arrives.
    #[instrument(skip_all, fields(encoder = self.encoder.name(), instances = sources.len()))]
    pub async fn run_with<F>(
        &self,
        sources: Vec<GraphSource>,
        mut observer: F,
    ) -> BatchResult<BatchReport>
    where
        F: FnMut(&InstanceResult),
    {
        let expected = sources.len();
        let capacity = self.capacity.unwrap_or(expected).max(1);
        info!(
            "Starting batch of {} instances (queue capacity {})",
            expected, capacity
        );

        let (source_tx, source_rx) = mpsc::channel(capacity);
        let (graph_tx, graph_rx) = mpsc::channel(capacity);
        let (result_tx, mut result_rx) = mpsc::channel(capacity);

        let stages: [(&'static str, JoinHandle<()>); 3] = [
            ("enumerate", tokio::spawn(enumerate(sources, source_tx))),
            (
                "read",
                tokio::spawn(read_and_validate(source_rx, graph_tx, result_tx.clone())),
            ),
            (
                "encode",
                tokio::spawn(encode(Arc::clone(&self.encoder), graph_rx, result_tx)),
            ),
        ];

        let mut results = Vec::with_capacity(expected);
        let mut arrival = Vec::with_capacity(expected);
        while let Some(result) = result_rx.recv().await {
            match &result.outcome {
                Ok(model) => debug!(
                    instance = %result.id,
                    spins = model.num_spins(),
                    "Instance compiled"
                ),
                Err(e) => warn!(
                    instance = %result.id,
                    stage = %result.stage,
                    "Instance failed: {}",
                    e
                ),
            }
            observer(&result);
            arrival.push(result.id.seq);
            results.push(result);
        }

        for (name, handle) in stages {
            if handle.await.is_err() {
                return Err(BatchError::StageFailed(name));
            }
        }

        if results.len() != expected {
            return Err(BatchError::Incomplete {
                expected,
                received: results.len(),
            });
        }

        let report = BatchReport::new(results, arrival);
        info!(
            "Batch completed: {} succeeded, {} failed",
            report.len() - report.num_failed(),
            report.num_failed()
        );
        Ok(report)
    }
}

async fn enumerate(sources: Vec<GraphSource>, tx: mpsc::Sender<(InstanceId, GraphSource)>) {
    for (seq, source) in sources.into_iter().enumerate() {
        let id = InstanceId {
            seq,
            source: source.label(),
        };
        if tx.send((id, source)).await.is_err() {
            break;
        }
    }
}

async fn read_and_validate(
    mut rx: mpsc::Receiver<(InstanceId, GraphSource)>,
    graph_tx: mpsc::Sender<(InstanceId, Graph)>,
    result_tx: mpsc::Sender<InstanceResult>,
) {
    while let Some((id, source)) = rx.recv().await {
        let loaded = match task::spawn_blocking(move || source.load()).await {
            Ok(loaded) => loaded,
            Err(_) => Err(BatchError::StageFailed("read")),
        };

        let graph = match loaded {
            Ok(graph) => graph,
            Err(e) => {
                let stage = match e {
                    BatchError::Invalid(_) => Stage::Validate,
                    _ => Stage::Read,
                };
                let failed = InstanceResult {
                    id,
                    stage,
                    outcome: Err(e),
                };
                if result_tx.send(failed).await.is_err() {
                    break;
                }
                continue;
            }
        };

        if let Err(e) = graph.validate() {
            let failed = InstanceResult {
                id,
                stage: Stage::Validate,
                outcome: Err(BatchError::Invalid(e)),
            };
            if result_tx.send(failed).await.is_err() {
                break;
            }
            continue;
        }

        if graph_tx.send((id, graph)).await.is_err() {
            break;
        }
    }
}

async fn encode(
    encoder: Arc<dyn Encoder>,
    mut rx: mpsc::Receiver<(InstanceId, Graph)>,
    result_tx: mpsc::Sender<InstanceResult>,
) {
    while let Some((id, graph)) = rx.recv().await {
        let encoder = Arc::clone(&encoder);
        let outcome = match task::spawn_blocking(move || encoder.encode(&graph)).await {
            Ok(encoded) => encoded.map_err(BatchError::from),
            Err(_) => Err(BatchError::StageFailed("encode")),
        };
        let result = InstanceResult {
            id,
            stage: Stage::Encode,
            outcome,
        };
        if result_tx.send(result).await.is_err() {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quack_compile::MisEncoder;

    fn pipeline() -> Pipeline {
        Pipeline::new(Arc::new(MisEncoder::default()))
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let report = pipeline().run(vec![]).await.unwrap();
        assert!(report.is_empty());
        assert!(report.is_complete_success());
    }

    #[tokio::test]
    async fn test_all_valid() {
        let sources = (3..7)
            .map(|n| GraphSource::graph(format!("c{n}"), Graph::cycle(n)))
            .collect();
        let report = pipeline().run(sources).await.unwrap();
        assert_eq!(report.len(), 4);
        assert!(report.is_complete_success());
        assert_eq!(report.get("c5").unwrap().model().unwrap().num_spins(), 5);
    }

    #[tokio::test]
    async fn test_failures_are_tagged_with_stage() {
        let sources = vec![
            GraphSource::inline("bad-json", "{"),
            GraphSource::graph("loop", Graph::new(2, [(1, 1)])),
            GraphSource::graph("dup", Graph::new(2, [(0, 1), (1, 0)])),
            GraphSource::inline(
                "stray-weight",
                r#"{"vertices": 3, "edges": [[0,1]], "weights": {"1,2": 4.0}}"#,
            ),
        ];
        let report = pipeline().run(sources).await.unwrap();
        assert_eq!(report.num_failed(), 4);
        assert_eq!(report.get("bad-json").unwrap().stage, Stage::Read);
        assert_eq!(report.get("loop").unwrap().stage, Stage::Validate);
        assert_eq!(report.get("dup").unwrap().stage, Stage::Encode);

        let stray = report.get("stray-weight").unwrap();
        assert_eq!(stray.stage, Stage::Validate);
        assert!(matches!(stray.error(), Some(BatchError::Invalid(_))));
    }

    #[tokio::test]
    async fn test_small_queue_capacity() {
        let sources = (0..20)
            .map(|i| {
                if i % 4 == 0 {
                    GraphSource::graph(format!("g{i}"), Graph::new(0, []))
                } else {
                    GraphSource::graph(format!("g{i}"), Graph::complete(4))
                }
            })
            .collect();
        let report = pipeline()
            .with_queue_capacity(1)
            .run(sources)
            .await
            .unwrap();
        assert_eq!(report.len(), 20);
        assert_eq!(report.num_failed(), 5);
    }

    #[tokio::test]
    async fn test_observer_sees_every_result() {
        let sources = (0..5)
            .map(|i| GraphSource::graph(format!("g{i}"), Graph::cycle(3)))
            .collect();
        let mut seen = 0;
        let report = pipeline().run_with(sources, |_| seen += 1).await.unwrap();
        assert_eq!(seen, 5);
        assert_eq!(report.arrival_order().len(), 5);
    }
}
