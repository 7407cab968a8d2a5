//! Shared helpers for CLI commands.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use tracing::debug;

use quack_compile::{EncoderConfig, Problem};

/// How compiled models are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable listing.
    Text,
    /// Coefficient JSON.
    Json,
}

/// Encoder parameters shared by `compile` and `pulse`.
///
/// Values given here override those from `--config`.
#[derive(Debug, Clone, Default, Args)]
pub struct EncoderArgs {
    /// Problem family (mis, max-cut, coloring)
    #[arg(short, long)]
    pub problem: Option<Problem>,

    /// Field strength h (typically negative)
    #[arg(long, env = "QUACK_FIELD", allow_negative_numbers = true)]
    pub field: Option<f64>,

    /// Interaction strength J for MIS (must be positive)
    #[arg(long, env = "QUACK_COUPLING", allow_negative_numbers = true)]
    pub coupling: Option<f64>,

    /// Number of colors for coloring problems
    #[arg(long, env = "QUACK_COLORS")]
    pub colors: Option<u32>,

    /// Coloring penalty for two colors on one vertex
    #[arg(long, allow_negative_numbers = true)]
    pub onehot_penalty: Option<f64>,

    /// Coloring penalty for one color on both ends of an edge
    #[arg(long, allow_negative_numbers = true)]
    pub adjacency_penalty: Option<f64>,

    /// YAML file with encoder parameters
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl EncoderArgs {
    /// Merge the config file (if any) with explicit flags and validate.
    pub fn resolve(&self) -> Result<EncoderConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => EncoderConfig::default(),
        };

        if let Some(problem) = self.problem {
            config.problem = problem;
        }
        if let Some(field) = self.field {
            config.field = field;
        }
        if let Some(coupling) = self.coupling {
            config.coupling = coupling;
        }
        if let Some(colors) = self.colors {
            config.colors = Some(colors);
        }
        if let Some(penalty) = self.onehot_penalty {
            config.onehot_penalty = penalty;
        }
        if let Some(penalty) = self.adjacency_penalty {
            config.adjacency_penalty = penalty;
        }

        config.validate()?;
        debug!(?config, "Resolved encoder configuration");
        Ok(config)
    }
}

/// Load an encoder configuration from a YAML file.
pub fn load_config(path: &Path) -> Result<EncoderConfig> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config = serde_yaml_ng::from_str(&source)
        .with_context(|| format!("Invalid config file: {}", path.display()))?;
    debug!("Loaded encoder config from {}", path.display());
    Ok(config)
}

/// File stem used to name outputs derived from `input`.
pub fn output_stem(input: &str) -> String {
    Path::new(input)
        .file_stem()
        .map_or_else(|| "graph".to_string(), |s| s.to_string_lossy().into_owned())
}

/// Output stems for a batch, one per input in order.
///
/// Inputs whose stems collide (`a/g.json` and `b/g.json`) are prefixed
/// with their position in the batch so no output overwrites another.
pub fn batch_output_stems<'a>(inputs: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let stems: Vec<String> = inputs.into_iter().map(output_stem).collect();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for stem in &stems {
        *counts.entry(stem.as_str()).or_default() += 1;
    }
    stems
        .iter()
        .enumerate()
        .map(|(seq, stem)| {
            if counts[stem.as_str()] > 1 {
                format!("{seq}-{stem}")
            } else {
                stem.clone()
            }
        })
        .collect()
}

/// Write `contents` to `dir/<stem>.<suffix>`, creating `dir` if needed.
pub fn write_output(dir: &Path, stem: &str, suffix: &str, contents: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
    let path = dir.join(format!("{stem}.{suffix}"));
    fs::write(&path, contents)
        .with_context(|| format!("Failed to write file: {}", path.display()))?;
    Ok(path)
}
