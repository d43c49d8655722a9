//! Input/Output operations for two-particle simulations
//!
//! This module handles logging setup and trajectory export.

mod output;

pub use output::{setup_output, write_history};
