//! Two-particle MD Command-Line Interface
//!
//! This is the main entry point for running a simulation from a YAML configuration.

use color_eyre::eyre::Result;

mod app;

use app::MdApplication;

fn main() -> Result<()> {
    color_eyre::install()?;
    MdApplication::from_cli()?.run()
}
