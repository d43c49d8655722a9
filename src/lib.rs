// Two-particle Lennard-Jones molecular dynamics in a 2D box

pub mod config;
pub mod errors;
pub mod history;
pub mod init;
pub mod io;
pub mod lj_pot;
pub mod particle;
pub mod report;
pub mod run_md;

pub use errors::{MdError, Result};
pub use history::{DriftQuality, Energies, EnergyStatistics, History, Snapshot, WallCollisions};
pub use lj_pot::{LennardJones, PairPotential};
pub use particle::Particle;
pub use run_md::TwoParticleMD;
