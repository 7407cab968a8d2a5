//! Per-instance results and the batch report.

use std::fmt;

use quack_ir::IsingModel;

use crate::error::BatchError;

/// Identifies one instance of a batch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId {
    /// Submission position, starting at 0.
    pub seq: usize,
    /// Source label (file path or caller-chosen name).
    pub source: String,
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}", self.seq, self.source)
    }
}

/// Pipeline stage an instance finished in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Reading and parsing the input.
    Read,
    /// Structural validation.
    Validate,
    /// Encoding to an Ising model.
    Encode,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Read => "read",
            Stage::Validate => "validate",
            Stage::Encode => "encode",
        })
    }
}

/// Outcome of one instance.
#[derive(Debug)]
pub struct InstanceResult {
    /// Which instance.
    pub id: InstanceId,
    /// The last stage the instance reached.
    pub stage: Stage,
    /// The compiled model, or why there is none.
    pub outcome: Result<IsingModel, BatchError>,
}

impl InstanceResult {
    /// True when a model was produced.
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }

    /// The model, if one was produced.
    pub fn model(&self) -> Option<&IsingModel> {
        self.outcome.as_ref().ok()
    }

    /// The error, if the instance failed.
    pub fn error(&self) -> Option<&BatchError> {
        self.outcome.as_ref().err()
    }
}

/// Results of a whole batch, one per submitted instance.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Ordered by submission sequence.
    results: Vec<InstanceResult>,
    /// Sequence numbers in the order results arrived.
    arrival: Vec<usize>,
}

impl BatchReport {
    pub(crate) fn new(mut results: Vec<InstanceResult>, arrival: Vec<usize>) -> Self {
        results.sort_by_key(|r| r.id.seq);
        Self { results, arrival }
    }

    /// Number of results.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// True for an empty batch.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// All results, in submission order.
    pub fn results(&self) -> &[InstanceResult] {
        &self.results
    }

    /// Successful results.
    pub fn successes(&self) -> impl Iterator<Item = &InstanceResult> {
        self.results.iter().filter(|r| r.is_success())
    }

    /// Failed results.
    pub fn failures(&self) -> impl Iterator<Item = &InstanceResult> {
        self.results.iter().filter(|r| !r.is_success())
    }

    /// Number of failed instances.
    pub fn num_failed(&self) -> usize {
        self.failures().count()
    }

    /// True when every instance produced a model.
    pub fn is_complete_success(&self) -> bool {
        self.results.iter().all(InstanceResult::is_success)
    }

    /// First result whose source label matches.
    pub fn get(&self, source: &str) -> Option<&InstanceResult> {
        self.results.iter().find(|r| r.id.source == source)
    }

    /// Sequence numbers in completion order.
    pub fn arrival_order(&self) -> &[usize] {
        &self.arrival
    }
}

impl IntoIterator for BatchReport {
    type Item = InstanceResult;
    type IntoIter = std::vec::IntoIter<InstanceResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.into_iter()
    }
}
