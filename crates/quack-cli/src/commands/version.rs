//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - graph problems to Ising models for analog quantum hardware",
        style("quack").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  quack-ir       Graphs, Ising models and the coefficient wire format");
    println!("  quack-compile  MIS, Max-Cut and k-coloring encoders");
    println!("  quack-batch    Concurrent multi-instance compilation");
    println!("  quack-pulse    Pulse-sequence description and serializer");
    println!("  quack-cli      Command-line interface");
    println!();
    println!("License:    {}", style("Apache-2.0").dim());
}
