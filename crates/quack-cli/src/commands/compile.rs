//! Compile command implementation.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use console::{Term, style};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use quack_batch::{GraphSource, InstanceResult, Pipeline};

use super::common::{EncoderArgs, OutputFormat, batch_output_stems, write_output};

/// Execute the compile command.
///
/// Parameter errors fail the command. Per-instance failures are reported
/// on stderr and do not change the exit status.
pub async fn execute(
    inputs: &[PathBuf],
    encoder_args: &EncoderArgs,
    format: OutputFormat,
    output: Option<&Path>,
    queue_capacity: Option<usize>,
) -> Result<()> {
    let config = encoder_args
        .resolve()
        .context("Invalid encoder parameters")?;
    let encoder = config.build()?;

    eprintln!(
        "{} Compiling {} graph(s) as {}",
        style("→").cyan().bold(),
        style(inputs.len()).green(),
        style(config.problem).yellow()
    );

    let mut pipeline = Pipeline::new(Arc::from(encoder));
    if let Some(capacity) = queue_capacity {
        pipeline = pipeline.with_queue_capacity(capacity);
    }

    let progress = if Term::stderr().is_term() {
        let bar = ProgressBar::new(inputs.len() as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.cyan} [{bar:30.cyan/blue}] {pos}/{len} {msg}")?
                .progress_chars("=> "),
        );
        bar
    } else {
        ProgressBar::hidden()
    };

    let sources = inputs.iter().map(GraphSource::file).collect();
    let report = pipeline
        .run_with(sources, |result: &InstanceResult| {
            progress.set_message(result.id.source.clone());
            progress.inc(1);
        })
        .await?;
    progress.finish_and_clear();

    let stems = batch_output_stems(report.results().iter().map(|r| r.id.source.as_str()));
    for (result, stem) in report.results().iter().zip(&stems) {
        let source = &result.id.source;
        match &result.outcome {
            Ok(model) => {
                let rendered = match format {
                    OutputFormat::Text => model.to_string(),
                    OutputFormat::Json => model.to_json_pretty()?,
                };
                println!("Result for {}:\n{}", style(source).green(), rendered);

                if let Some(dir) = output {
                    let json = model.to_json_pretty()?;
                    let path = write_output(dir, stem, "ising.json", &json)?;
                    debug!(instance = %result.id, path = %path.display(), "Wrote coefficients");
                    eprintln!("  Output: {}", style(path.display()).green());
                }
            }
            Err(e) => {
                eprintln!(
                    "{} Error processing {} ({} stage): {}",
                    style("✗").red().bold(),
                    style(source).yellow(),
                    result.stage,
                    e
                );
            }
        }
    }

    let failed = report.num_failed();
    if failed == 0 {
        eprintln!("{} Compilation completed", style("✓").green().bold());
    } else {
        eprintln!(
            "{} Compilation completed: {} succeeded, {} failed",
            style("!").yellow().bold(),
            report.len() - failed,
            failed
        );
    }

    Ok(())
}
