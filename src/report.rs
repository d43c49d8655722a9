use crate::history::{DriftQuality, EnergyStatistics, WallCollisions};
use crate::lj_pot::LennardJones;
use crate::particle::Particle;
use tracing::{info, warn};

pub fn report_initial_state(particle1: &Particle, particle2: &Particle, lj: &LennardJones) {
    let separation = (particle1.position - particle2.position).norm();
    info!("Lennard-Jones: epsilon = {} kcal/mol, sigma = {} Angstrom", lj.epsilon(), lj.sigma());
    info!("  Particle 1: {}", particle1);
    info!("  Particle 2: {}", particle2);
    info!(
        "  Initial separation: {:.2} Angstrom (equilibrium {:.3} Angstrom)",
        separation,
        lj.equilibrium_distance()
    );
}

pub fn report_run_summary(collisions: &WallCollisions, stats: &EnergyStatistics) {
    info!("Particle 1 wall collisions: {}", collisions.particle1);
    info!("Particle 2 wall collisions: {}", collisions.particle2);

    info!("Energy Statistics:");
    info!("  Initial total energy: {:.6} kcal/mol", stats.initial_total);
    info!("  Final total energy:   {:.6} kcal/mol", stats.final_total);
    info!("  Energy drift:         {:.6e} kcal/mol", stats.drift);
    info!("  Relative drift:       {:.4}%", stats.relative_drift_percent);

    match stats.quality {
        DriftQuality::Excellent => info!("  [OK] Excellent energy conservation!"),
        DriftQuality::Good => info!("  [OK] Good energy conservation"),
        DriftQuality::Warning => {
            warn!("  [WARNING] Significant energy drift. Consider smaller time step.")
        }
    }
}
