//! Command-line argument parsing for the two-particle simulation

use clap::Parser;

/// Two-particle Lennard-Jones molecular dynamics in a 2D box
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the YAML configuration file (built-in defaults when omitted)
    #[arg(short, long)]
    pub config_file: Option<String>,

    /// Override output file: (default stdout)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Override time step in fs
    #[arg(long)]
    pub time_step: Option<f64>,

    /// Override number of integration steps
    #[arg(long)]
    pub n_steps: Option<usize>,

    /// Override how often (in steps) a snapshot is recorded
    #[arg(long)]
    pub record_interval: Option<usize>,

    /// Override random seed for initial placement
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write the recorded trajectory table to this file
    #[arg(long)]
    pub trajectory: Option<String>,
}
