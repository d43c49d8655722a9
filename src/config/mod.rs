//! Configuration management for two-particle simulations
//!
//! This module handles the YAML configuration structures, their defaults and
//! validation, and turns a configuration into a ready-to-run simulation.

mod args;

pub use args::Args;

use crate::errors::{ensure_positive, MdError, Result};
use crate::init::{random_partner, random_positions, Placement};
use crate::lj_pot::LennardJones;
use crate::particle::Particle;
use crate::run_md::TwoParticleMD;
use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

// Argon in kcal/mol, Angstrom, amu and fs
const DEFAULT_EPSILON: f64 = 0.238;
const DEFAULT_SIGMA: f64 = 3.4;
const DEFAULT_MASS: f64 = 39.948;
const DEFAULT_BOX: [f64; 2] = [20.0, 20.0];
const DEFAULT_TIME_STEP: f64 = 1.0;
const DEFAULT_N_STEPS: usize = 5000;
const DEFAULT_RECORD_INTERVAL: usize = 1;
const DEFAULT_SEED: u64 = 42;
const DEFAULT_SEPARATION_FACTOR: f64 = 2.0;
const DEFAULT_MAX_ATTEMPTS: usize = 10_000;

/// Main configuration structure for a two-particle run
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct MdConfig {
    #[serde(default)]
    pub potential: PotentialParams,
    #[serde(default)]
    pub system: SystemParams,
    #[serde(default)]
    pub simulation: SimulationParams,
    #[serde(default)]
    pub output: OutputParams,
}

/// Lennard-Jones parameters
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct PotentialParams {
    pub epsilon: Option<f64>,
    pub sigma: Option<f64>,
}

impl Default for PotentialParams {
    fn default() -> Self {
        PotentialParams {
            epsilon: Some(DEFAULT_EPSILON),
            sigma: Some(DEFAULT_SIGMA),
        }
    }
}

impl PotentialParams {
    /// Apply default values to any missing parameters
    pub fn with_defaults(mut self) -> Self {
        let defaults = Self::default();
        if self.epsilon.is_none() {
            self.epsilon = defaults.epsilon;
        }
        if self.sigma.is_none() {
            self.sigma = defaults.sigma;
        }
        self
    }
}

/// Box geometry and the two particles
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct SystemParams {
    pub box_size: Option<[f64; 2]>,
    pub particle1: Option<ParticleParams>,
    pub particle2: Option<ParticleParams>,
    pub placement: Option<PlacementParams>,
}

impl Default for SystemParams {
    fn default() -> Self {
        SystemParams {
            box_size: Some(DEFAULT_BOX),
            particle1: Some(ParticleParams::first()),
            particle2: Some(ParticleParams::second()),
            placement: Some(PlacementParams::default()),
        }
    }
}

impl SystemParams {
    /// Apply default values to any missing parameters
    pub fn with_defaults(mut self) -> Self {
        if self.box_size.is_none() {
            self.box_size = Some(DEFAULT_BOX);
        }
        self.particle1 = Some(
            self.particle1
                .take()
                .unwrap_or_default()
                .with_defaults(ParticleParams::first()),
        );
        self.particle2 = Some(
            self.particle2
                .take()
                .unwrap_or_default()
                .with_defaults(ParticleParams::second()),
        );
        self.placement = Some(self.placement.take().unwrap_or_default().with_defaults());
        self
    }
}

/// Per-particle initial state. A missing `position` is drawn at random.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct ParticleParams {
    pub position: Option<[f64; 2]>,
    pub velocity: Option<[f64; 2]>,
    pub mass: Option<f64>,
    pub fixed: Option<bool>,
}

impl ParticleParams {
    /// Moving argon atom
    pub fn first() -> Self {
        ParticleParams {
            position: None,
            velocity: Some([0.02, 0.02]),
            mass: Some(DEFAULT_MASS),
            fixed: Some(false),
        }
    }

    /// Stationary argon scattering centre
    pub fn second() -> Self {
        ParticleParams {
            position: None,
            velocity: Some([0.0, 0.0]),
            mass: Some(DEFAULT_MASS),
            fixed: Some(true),
        }
    }

    pub fn with_defaults(mut self, defaults: ParticleParams) -> Self {
        if self.position.is_none() {
            self.position = defaults.position;
        }
        if self.velocity.is_none() {
            self.velocity = defaults.velocity;
        }
        if self.mass.is_none() {
            self.mass = defaults.mass;
        }
        if self.fixed.is_none() {
            self.fixed = defaults.fixed;
        }
        self
    }
}

/// Random placement parameters
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct PlacementParams {
    pub seed: Option<u64>,
    /// Distance kept from the walls (default: sigma)
    pub margin: Option<f64>,
    /// Minimum separation in units of sigma
    pub min_separation_factor: Option<f64>,
    pub max_attempts: Option<usize>,
}

impl Default for PlacementParams {
    fn default() -> Self {
        PlacementParams {
            seed: Some(DEFAULT_SEED),
            margin: None,
            min_separation_factor: Some(DEFAULT_SEPARATION_FACTOR),
            max_attempts: Some(DEFAULT_MAX_ATTEMPTS),
        }
    }
}

impl PlacementParams {
    /// Apply default values to any missing parameters; `margin` stays tied to sigma
    pub fn with_defaults(mut self) -> Self {
        let defaults = Self::default();
        if self.seed.is_none() {
            self.seed = defaults.seed;
        }
        if self.min_separation_factor.is_none() {
            self.min_separation_factor = defaults.min_separation_factor;
        }
        if self.max_attempts.is_none() {
            self.max_attempts = defaults.max_attempts;
        }
        self
    }
}

/// Integration parameters
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct SimulationParams {
    /// Time step in fs
    pub time_step: Option<f64>,
    pub n_steps: Option<usize>,
    pub record_interval: Option<usize>,
}

impl Default for SimulationParams {
    fn default() -> Self {
        SimulationParams {
            time_step: Some(DEFAULT_TIME_STEP),
            n_steps: Some(DEFAULT_N_STEPS),
            record_interval: Some(DEFAULT_RECORD_INTERVAL),
        }
    }
}

impl SimulationParams {
    /// Apply default values to any missing parameters
    pub fn with_defaults(mut self) -> Self {
        let defaults = Self::default();
        if self.time_step.is_none() {
            self.time_step = defaults.time_step;
        }
        if self.n_steps.is_none() {
            self.n_steps = defaults.n_steps;
        }
        if self.record_interval.is_none() {
            self.record_interval = defaults.record_interval;
        }
        self
    }
}

/// Output settings
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct OutputParams {
    /// Trajectory table destination; nothing is written when unset
    pub trajectory: Option<String>,
}

impl MdConfig {
    /// Load, complete and validate a configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| MdError::ConfigFile {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_yaml(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse YAML and fill in defaults without validating
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: MdConfig = serde_yml::from_str(content)?;
        Ok(config.with_defaults())
    }

    /// Save configuration to YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = serde_yml::to_string(self)?;
        fs::write(path, content).map_err(|source| MdError::ConfigFile {
            path: path.display().to_string(),
            source,
        })
    }

    /// Apply defaults to all configuration sections
    pub fn with_defaults(mut self) -> Self {
        self.potential = self.potential.with_defaults();
        self.system = self.system.with_defaults();
        self.simulation = self.simulation.with_defaults();
        self
    }

    /// Command-line values take precedence over the file
    pub fn with_overrides(mut self, args: &Args) -> Self {
        if let Some(dt) = args.time_step {
            info!("Overriding time_step with: {}", dt);
            self.simulation.time_step = Some(dt);
        }
        if let Some(n) = args.n_steps {
            info!("Overriding n_steps with: {}", n);
            self.simulation.n_steps = Some(n);
        }
        if let Some(interval) = args.record_interval {
            info!("Overriding record_interval with: {}", interval);
            self.simulation.record_interval = Some(interval);
        }
        if let Some(seed) = args.seed {
            info!("Overriding seed with: {}", seed);
            self.system
                .placement
                .get_or_insert_with(PlacementParams::default)
                .seed = Some(seed);
        }
        if let Some(ref path) = args.trajectory {
            info!("Overriding trajectory output with: {}", path);
            self.output.trajectory = Some(path.clone());
        }
        self
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        ensure_positive("epsilon", self.epsilon())?;
        ensure_positive("sigma", self.sigma())?;

        let (width, height) = self.box_size();
        ensure_positive("box width", width)?;
        ensure_positive("box height", height)?;
        ensure_positive("time step", self.time_step())?;

        if self.n_steps() == 0 {
            return Err(MdError::Config("Total steps must be positive".to_string()));
        }
        if self.record_interval() == 0 {
            return Err(MdError::Config(
                "Record interval must be positive".to_string(),
            ));
        }

        for index in 0..2 {
            let particle = self.particle(index);
            ensure_positive("mass", particle.mass.unwrap_or(DEFAULT_MASS))?;
            let finite = |v: Option<[f64; 2]>| v.map_or(true, |[x, y]| x.is_finite() && y.is_finite());
            if !finite(particle.position) || !finite(particle.velocity) {
                return Err(MdError::Config(format!(
                    "Particle {} has a non-finite position or velocity",
                    index + 1
                )));
            }
            if let Some([x, y]) = particle.position {
                if !(0.0..=width).contains(&x) || !(0.0..=height).contains(&y) {
                    return Err(MdError::Config(format!(
                        "Particle {} position [{}, {}] lies outside the {} x {} box",
                        index + 1,
                        x,
                        y,
                        width,
                        height
                    )));
                }
            }
        }

        let placement = self.placement();
        if placement.margin.is_nan() || placement.margin < 0.0 {
            return Err(MdError::Config(
                "Placement margin must not be negative".to_string(),
            ));
        }
        ensure_positive("minimum separation", placement.min_separation)?;
        if placement.max_attempts == 0 {
            return Err(MdError::Config(
                "Placement attempts must be positive".to_string(),
            ));
        }

        Ok(())
    }

    pub fn epsilon(&self) -> f64 {
        self.potential.epsilon.unwrap_or(DEFAULT_EPSILON)
    }

    pub fn sigma(&self) -> f64 {
        self.potential.sigma.unwrap_or(DEFAULT_SIGMA)
    }

    pub fn box_size(&self) -> (f64, f64) {
        let [w, h] = self.system.box_size.unwrap_or(DEFAULT_BOX);
        (w, h)
    }

    pub fn time_step(&self) -> f64 {
        self.simulation.time_step.unwrap_or(DEFAULT_TIME_STEP)
    }

    pub fn n_steps(&self) -> usize {
        self.simulation.n_steps.unwrap_or(DEFAULT_N_STEPS)
    }

    pub fn record_interval(&self) -> usize {
        self.simulation
            .record_interval
            .unwrap_or(DEFAULT_RECORD_INTERVAL)
    }

    pub fn seed(&self) -> u64 {
        self.system
            .placement
            .as_ref()
            .and_then(|p| p.seed)
            .unwrap_or(DEFAULT_SEED)
    }

    pub fn trajectory_path(&self) -> Option<&str> {
        self.output.trajectory.as_deref()
    }

    /// Fully resolved parameters of particle `index` (0 or 1)
    pub fn particle(&self, index: usize) -> ParticleParams {
        let (given, defaults) = if index == 0 {
            (&self.system.particle1, ParticleParams::first())
        } else {
            (&self.system.particle2, ParticleParams::second())
        };
        given.clone().unwrap_or_default().with_defaults(defaults)
    }

    pub fn placement(&self) -> Placement {
        let sigma = self.sigma();
        let params = self
            .system
            .placement
            .clone()
            .unwrap_or_default()
            .with_defaults();
        Placement {
            margin: params.margin.unwrap_or(sigma),
            min_separation: params
                .min_separation_factor
                .unwrap_or(DEFAULT_SEPARATION_FACTOR)
                * sigma,
            max_attempts: params.max_attempts.unwrap_or(DEFAULT_MAX_ATTEMPTS),
        }
    }

    pub fn build_potential(&self) -> Result<LennardJones> {
        LennardJones::new(self.epsilon(), self.sigma())
    }

    /// Starting positions: explicit ones are used as given, missing ones come
    /// from a placement seeded with `seed` that keeps clear of any explicit one.
    pub fn generate_positions(&self) -> Result<[Vector2<f64>; 2]> {
        let explicit = [
            self.particle(0).position.map(Vector2::from),
            self.particle(1).position.map(Vector2::from),
        ];
        let mut rng = StdRng::seed_from_u64(self.seed());
        let box_size = self.box_size();
        let placement = self.placement();

        match explicit {
            [Some(a), Some(b)] => Ok([a, b]),
            [Some(a), None] => Ok([a, random_partner(&mut rng, &a, box_size, &placement)?]),
            [None, Some(b)] => Ok([random_partner(&mut rng, &b, box_size, &placement)?, b]),
            [None, None] => random_positions(&mut rng, box_size, &placement),
        }
    }

    pub fn build_particles(&self) -> Result<(Particle, Particle)> {
        let [pos1, pos2] = self.generate_positions()?;
        let make = |index: usize, position: Vector2<f64>| {
            let params = self.particle(index);
            Particle::new(
                position,
                Vector2::from(params.velocity.unwrap_or([0.0, 0.0])),
                params.mass.unwrap_or(DEFAULT_MASS),
                params.fixed.unwrap_or(false),
            )
        };
        Ok((make(0, pos1)?, make(1, pos2)?))
    }

    pub fn build_simulation(&self) -> Result<TwoParticleMD<LennardJones>> {
        let (particle1, particle2) = self.build_particles()?;
        TwoParticleMD::new(
            particle1,
            particle2,
            self.build_potential()?,
            self.box_size(),
            self.time_step(),
        )
    }
}
