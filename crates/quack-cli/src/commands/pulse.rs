//! Pulse command implementation.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use console::style;
use tracing::info;

use quack_ir::{Graph, IsingModel};
use quack_pulse::{GlobalSweepPolicy, PulseSequence, SequenceBuilder, from_ising};

use super::common::EncoderArgs;

/// What to build the sequence from.
pub enum Source {
    /// A graph or coefficient file.
    File(PathBuf),
    /// The built-in one-qubit example.
    Demo,
}

/// Execute the pulse command.
pub fn execute(
    source: Source,
    encoder_args: &EncoderArgs,
    spacing: f64,
    duration: u32,
    output: Option<&Path>,
) -> Result<()> {
    let sequence = match source {
        Source::Demo => SequenceBuilder::single_qubit_demo().build()?,
        Source::File(path) => {
            let model = load_model(&path, encoder_args)?;
            let policy = GlobalSweepPolicy::new()
                .with_spacing(spacing)
                .with_duration(duration);
            from_ising(&model, &policy)?
        }
    };

    info!(
        qubits = sequence.register().len(),
        pulses = sequence.pulses().len(),
        "Built pulse sequence"
    );
    emit(&sequence, output)
}

/// Read a graph (encoded with the given parameters) or a coefficient set.
///
/// A JSON object with a `vertices` key is treated as a graph.
pub fn load_model(path: &Path, encoder_args: &EncoderArgs) -> Result<IsingModel> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&source)
        .with_context(|| format!("Failed to parse JSON: {}", path.display()))?;

    if value.get("vertices").is_some() {
        let graph = Graph::from_json(&source)?;
        graph.validate()?;
        let encoder = encoder_args.resolve()?.build()?;
        eprintln!(
            "{} Encoding {} as {}",
            style("→").cyan().bold(),
            style(path.display()).green(),
            style(encoder.problem()).yellow()
        );
        Ok(encoder.encode(&graph)?)
    } else {
        IsingModel::from_json(&source)
            .with_context(|| format!("Invalid coefficient file: {}", path.display()))
    }
}

fn emit(sequence: &PulseSequence, output: Option<&Path>) -> Result<()> {
    let json = sequence.to_json_pretty()?;
    match output {
        Some(path) => {
            fs::write(path, &json)
                .with_context(|| format!("Failed to write file: {}", path.display()))?;
            eprintln!(
                "{} Pulse sequence with {} qubits written to {}",
                style("✓").green().bold(),
                sequence.register().len(),
                style(path.display()).green()
            );
        }
        None => println!("{json}"),
    }
    Ok(())
}
