// file: `src/particle.rs`
use crate::errors::{ensure_positive, Result};
use nalgebra::Vector2;
use std::fmt;

/// A point particle in the 2D box.
///
/// Units follow the usual MD convention: positions in Angstrom, velocities in
/// Angstrom/fs, mass in amu, forces in kcal/(mol*Angstrom).
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub position: Vector2<f64>,
    pub velocity: Vector2<f64>,
    pub mass: f64,
    /// Force from the last evaluation; overwritten by the simulation every step
    pub force: Vector2<f64>,
    /// Fixed particles never move and carry no kinetic energy
    pub is_fixed: bool,
}

impl Particle {
    pub fn new(
        position: Vector2<f64>,
        velocity: Vector2<f64>,
        mass: f64,
        is_fixed: bool,
    ) -> Result<Self> {
        let mass = ensure_positive("mass", mass)?;
        Ok(Particle {
            position,
            velocity,
            mass,
            force: Vector2::zeros(),
            is_fixed,
        })
    }

    /// A stationary scattering centre.
    pub fn fixed(position: Vector2<f64>, mass: f64) -> Result<Self> {
        Self::new(position, Vector2::zeros(), mass, true)
    }

    /// KE = 1/2 m v^2, or exactly zero for a fixed particle whatever its stored velocity.
    pub fn kinetic_energy(&self) -> f64 {
        if self.is_fixed {
            return 0.0;
        }
        0.5 * self.mass * self.velocity.dot(&self.velocity)
    }

    #[inline]
    pub(crate) fn acceleration(&self) -> Vector2<f64> {
        self.force / self.mass
    }
}

impl fmt::Display for Particle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Particle(pos=[{:.4}, {:.4}], vel=[{:.4}, {:.4}], mass={})",
            self.position.x, self.position.y, self.velocity.x, self.velocity.y, self.mass
        )?;
        if self.is_fixed {
            write!(f, " [FIXED]")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::MdError;
    use approx::assert_relative_eq;

    const ARGON_MASS: f64 = 39.948;

    #[test]
    fn test_particle_initialization() {
        let p = Particle::new(Vector2::new(1.0, 2.0), Vector2::new(0.1, 0.2), ARGON_MASS, false)
            .unwrap();
        assert_eq!(p.position, Vector2::new(1.0, 2.0));
        assert_eq!(p.velocity, Vector2::new(0.1, 0.2));
        assert_eq!(p.mass, ARGON_MASS);
        assert_eq!(p.force, Vector2::zeros());
        assert!(!p.is_fixed);
    }

    #[test]
    fn test_kinetic_energy_moving_particle() {
        let p = Particle::new(Vector2::zeros(), Vector2::new(3.0, 4.0), 2.0, false).unwrap();
        // 0.5 * 2 * 25
        assert_relative_eq!(p.kinetic_energy(), 25.0, epsilon = 1e-12);
    }

    #[test]
    fn test_kinetic_energy_fixed_particle_ignores_velocity() {
        let mut p = Particle::fixed(Vector2::new(5.0, 5.0), ARGON_MASS).unwrap();
        assert_eq!(p.kinetic_energy(), 0.0);

        // Even a corrupted velocity must not leak into the energy
        p.velocity = Vector2::new(10.0, -7.0);
        p.mass = 1e6;
        assert_eq!(p.kinetic_energy(), 0.0);
    }

    #[test]
    fn test_kinetic_energy_stationary_particle() {
        let p = Particle::new(Vector2::new(1.0, 1.0), Vector2::zeros(), ARGON_MASS, false).unwrap();
        assert_eq!(p.kinetic_energy(), 0.0);
    }

    #[test]
    fn test_state_is_mutable() {
        let mut p = Particle::new(Vector2::zeros(), Vector2::zeros(), 1.0, false).unwrap();
        p.position += Vector2::new(1.0, -1.0);
        p.velocity = Vector2::new(0.5, 0.5);
        p.force = Vector2::new(2.0, 0.0);
        assert_eq!(p.position, Vector2::new(1.0, -1.0));
        assert_eq!(p.acceleration(), Vector2::new(2.0, 0.0));
        assert_relative_eq!(p.kinetic_energy(), 0.25, epsilon = 1e-12);
    }

    #[test]
    fn test_invalid_mass_rejected() {
        for mass in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let result = Particle::new(Vector2::zeros(), Vector2::zeros(), mass, false);
            assert!(matches!(
                result,
                Err(MdError::InvalidParameter { name: "mass", .. })
            ));
        }
    }

    #[test]
    fn test_display_marks_fixed() {
        let p = Particle::fixed(Vector2::new(1.0, 2.0), 1.0).unwrap();
        let text = p.to_string();
        assert!(text.starts_with("Particle(pos=[1.0000, 2.0000]"));
        assert!(text.ends_with("[FIXED]"));

        let q = Particle::new(Vector2::zeros(), Vector2::zeros(), 1.0, false).unwrap();
        assert!(!q.to_string().contains("FIXED"));
    }
}
