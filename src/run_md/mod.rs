// file: `src/run_md/mod.rs`
use crate::errors::{ensure_positive, MdError, Result};
use crate::history::{Energies, EnergyStatistics, History, Snapshot, WallCollisions};
use crate::lj_pot::{LennardJones, PairPotential};
use crate::particle::Particle;
use crate::report::report_run_summary;
use nalgebra::Vector2;
use tracing::{debug, info};


/// Two interacting particles in a rectangular box with reflecting walls,
/// integrated with Velocity Verlet.
///
/// The box spans `[0, width] x [0, height]`. Forces are evaluated on
/// construction so energies are meaningful before the first step.
#[derive(Debug, Clone)]
pub struct TwoParticleMD<P: PairPotential = LennardJones> {
    particle1: Particle,
    particle2: Particle,
    potential: P,
    box_size: Vector2<f64>,
    dt: f64,
    time: f64,
    wall_collisions: WallCollisions,
    history: History,
}

impl<P: PairPotential> TwoParticleMD<P> {
    pub fn new(
        particle1: Particle,
        particle2: Particle,
        potential: P,
        box_size: (f64, f64),
        dt: f64,
    ) -> Result<Self> {
        let width = ensure_positive("box width", box_size.0)?;
        let height = ensure_positive("box height", box_size.1)?;
        let dt = ensure_positive("time step", dt)?;

        let mut md = TwoParticleMD {
            particle1,
            particle2,
            potential,
            box_size: Vector2::new(width, height),
            dt,
            time: 0.0,
            wall_collisions: WallCollisions::default(),
            history: History::new(),
        };
        md.calculate_forces();
        Ok(md)
    }

    pub fn particle1(&self) -> &Particle {
        &self.particle1
    }

    pub fn particle2(&self) -> &Particle {
        &self.particle2
    }

    pub fn potential(&self) -> &P {
        &self.potential
    }

    pub fn box_size(&self) -> (f64, f64) {
        (self.box_size.x, self.box_size.y)
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn wall_collisions(&self) -> WallCollisions {
        self.wall_collisions
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Newton's third law: particle 2 always receives exactly -F.
    fn calculate_forces(&mut self) {
        let r_vec = self.particle1.position - self.particle2.position;
        let force = self.potential.force_vector(&r_vec);
        self.particle1.force = force;
        self.particle2.force = -force;
    }

    /// Advance the system by one time step.
    ///
    /// Positions move first, walls are resolved, forces are re-evaluated at
    /// the new positions and only then are the velocities completed.
    pub fn step(&mut self) {
        let dt = self.dt;

        let old_acc1 = self.particle1.acceleration();
        let old_acc2 = self.particle2.acceleration();

        // r(t+dt) = r(t) + v(t) dt + 1/2 a(t) dt^2
        advance_position(&mut self.particle1, &old_acc1, dt);
        advance_position(&mut self.particle2, &old_acc2, dt);

        self.wall_collisions.particle1 += reflect_at_walls(&mut self.particle1, &self.box_size);
        self.wall_collisions.particle2 += reflect_at_walls(&mut self.particle2, &self.box_size);

        self.calculate_forces();

        // v(t+dt) = v(t) + 1/2 [a(t) + a(t+dt)] dt
        let new_acc1 = self.particle1.acceleration();
        let new_acc2 = self.particle2.acceleration();
        advance_velocity(&mut self.particle1, &old_acc1, &new_acc1, dt);
        advance_velocity(&mut self.particle2, &old_acc2, &new_acc2, dt);

        self.time += dt;
    }

    /// Current energies, recomputed from scratch.
    pub fn get_energies(&self) -> Energies {
        let kinetic = self.particle1.kinetic_energy() + self.particle2.kinetic_energy();
        let distance = (self.particle1.position - self.particle2.position).norm();
        let potential = self.potential.potential(distance);
        Energies {
            kinetic,
            potential,
            total: kinetic + potential,
        }
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            time: self.time,
            positions: [self.particle1.position, self.particle2.position],
            velocities: [self.particle1.velocity, self.particle2.velocity],
            energies: self.get_energies(),
            wall_collisions: self.wall_collisions,
        }
    }

    fn record_state(&mut self) {
        let snapshot = self.snapshot();
        self.history.push(snapshot);
    }

    /// Run `n_steps` steps, recording every `record_interval` steps, and
    /// report how well total energy was conserved.
    ///
    /// The state at the start of the run is recorded first unless it is
    /// already the latest entry of the history (a repeated `run` call).
    pub fn run(&mut self, n_steps: usize, record_interval: usize) -> Result<EnergyStatistics> {
        if record_interval == 0 {
            return Err(MdError::InvalidRecordInterval);
        }

        info!(
            "Starting 2D box simulation for {} steps (dt={} fs)...",
            n_steps, self.dt
        );
        info!("Total simulation time: {:.3} fs", n_steps as f64 * self.dt);
        info!(
            "Box size: {} x {} Angstroms",
            self.box_size.x, self.box_size.y
        );

        if self.history.last().map_or(true, |last| last.time < self.time) {
            self.record_state();
        }

        let progress_stride = n_steps / 10;
        for step in 1..=n_steps {
            self.step();

            if step % record_interval == 0 {
                self.record_state();
            }

            if progress_stride > 0 && step % progress_stride == 0 {
                info!("Progress: {:.0}%", 100.0 * step as f64 / n_steps as f64);
            }
        }
        info!("Simulation complete!");
        debug!("Recorded {} snapshots", self.history.len());

        let current = self.get_energies().total;
        let statistics = self
            .history
            .energy_statistics()
            .unwrap_or_else(|| EnergyStatistics::from_totals(current, current));
        report_run_summary(&self.wall_collisions, &statistics);

        Ok(statistics)
    }
}

fn advance_position(particle: &mut Particle, acc: &Vector2<f64>, dt: f64) {
    if particle.is_fixed {
        return;
    }
    particle.position += particle.velocity * dt + acc * (0.5 * dt * dt);
}

fn advance_velocity(
    particle: &mut Particle,
    old_acc: &Vector2<f64>,
    new_acc: &Vector2<f64>,
    dt: f64,
) {
    if particle.is_fixed {
        return;
    }
    particle.velocity += (old_acc + new_acc) * (0.5 * dt);
}

/// Clamp a particle back into `[0, extent]` and flip the offending velocity
/// component. Each axis is checked on its own, so a corner hit counts twice.
///
/// Returns the number of wall hits.
fn reflect_at_walls(particle: &mut Particle, extent: &Vector2<f64>) -> u64 {
    if particle.is_fixed {
        return 0;
    }

    let mut hits = 0;
    for axis in 0..2 {
        if particle.position[axis] < 0.0 {
            particle.position[axis] = 0.0;
            particle.velocity[axis] = -particle.velocity[axis];
            hits += 1;
        } else if particle.position[axis] > extent[axis] {
            particle.position[axis] = extent[axis];
            particle.velocity[axis] = -particle.velocity[axis];
            hits += 1;
        }
    }
    hits
}
