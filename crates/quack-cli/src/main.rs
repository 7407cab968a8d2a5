//! quack Command-Line Interface
//!
//! Compiles graph problems into Ising coefficients for analog
//! neutral-atom hardware.
//!
//! ```text
//! quack compile -i graph1.json -i graph2.json --field -1.0 --coupling 2.0
//! quack compile -i graph.json --problem coloring --colors 3 --format json
//! quack pulse -i coefficients.json -o sequence.json
//! ```
//!
//! Expected graph input:
//!
//! ```text
//! {"vertices": 4, "edges": [[0,1], [1,2], [2,3], [3,0]]}
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::common::{EncoderArgs, OutputFormat};
use commands::{compile, pulse, version};

/// quack - compile graph problems into Ising models for analog quantum hardware
#[derive(Parser)]
#[command(name = "quack")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile one or more graphs into Ising coefficients
    Compile {
        /// Input graph file (JSON); repeat for a batch
        #[arg(short, long = "input", required = true)]
        inputs: Vec<PathBuf>,

        #[command(flatten)]
        encoder: EncoderArgs,

        /// Output format (text, json)
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Directory to write `<name>.ising.json` files into
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Bound on each pipeline queue (defaults to the batch size)
        #[arg(long)]
        queue_capacity: Option<usize>,
    },

    /// Build a pulse sequence from a graph or a coefficient file
    Pulse {
        /// Input file: a graph or an Ising coefficient set (JSON)
        #[arg(short, long, required_unless_present = "demo")]
        input: Option<PathBuf>,

        /// Emit the one-qubit example sequence instead
        #[arg(long, conflicts_with = "input")]
        demo: bool,

        #[command(flatten)]
        encoder: EncoderArgs,

        /// Distance between neighbouring qubits
        #[arg(long, default_value = "5.0")]
        spacing: f64,

        /// Pulse duration in ns
        #[arg(long, default_value = "1000")]
        duration: u32,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    let result = match cli.command {
        Commands::Compile {
            inputs,
            encoder,
            format,
            output,
            queue_capacity,
        } => compile::execute(&inputs, &encoder, format, output.as_deref(), queue_capacity).await,

        Commands::Pulse {
            input,
            demo,
            encoder,
            spacing,
            duration,
            output,
        } => {
            let source = match input {
                Some(path) if !demo => pulse::Source::File(path),
                _ => pulse::Source::Demo,
            };
            pulse::execute(source, &encoder, spacing, duration, output.as_deref())
        }

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
