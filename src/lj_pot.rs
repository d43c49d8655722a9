// file: `src/lj_pot.rs`
use crate::errors::{ensure_positive, Result};
use nalgebra::Vector2;

/// Separations below this are treated as overlapping particles.
pub const MIN_SEPARATION: f64 = 1e-10;

/// Radially symmetric interaction between two particles.
pub trait PairPotential {
    /// Potential energy at separation `r`
    fn potential(&self, r: f64) -> f64;

    /// Radial force -dU/dr at separation `r`; positive is repulsive
    fn force_magnitude(&self, r: f64) -> f64;

    /// Force on the particle at the head of `r_vec = pos_a - pos_b`.
    ///
    /// The reaction on the other particle is the negation of this vector.
    fn force_vector(&self, r_vec: &Vector2<f64>) -> Vector2<f64> {
        let r = r_vec.norm();
        if r < MIN_SEPARATION {
            return Vector2::zeros();
        }
        let r_hat = r_vec / r;
        r_hat * self.force_magnitude(r)
    }
}

impl<P: PairPotential + ?Sized> PairPotential for &P {
    fn potential(&self, r: f64) -> f64 {
        (**self).potential(r)
    }

    fn force_magnitude(&self, r: f64) -> f64 {
        (**self).force_magnitude(r)
    }

    fn force_vector(&self, r_vec: &Vector2<f64>) -> Vector2<f64> {
        (**self).force_vector(r_vec)
    }
}

/// 12-6 Lennard-Jones potential, U(r) = 4ε[(σ/r)^12 - (σ/r)^6].
///
/// At overlapping separations the energy is reported as +inf while the force
/// is clamped to zero, so the integrator never sees a NaN.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LennardJones {
    epsilon: f64,
    sigma: f64,
}

impl LennardJones {
    pub fn new(epsilon: f64, sigma: f64) -> Result<Self> {
        Ok(LennardJones {
            epsilon: ensure_positive("epsilon", epsilon)?,
            sigma: ensure_positive("sigma", sigma)?,
        })
    }

    /// Well depth
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Zero-crossing distance
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Location of the potential minimum, 2^(1/6) σ.
    pub fn equilibrium_distance(&self) -> f64 {
        2f64.powf(1.0 / 6.0) * self.sigma
    }

    #[inline]
    fn sr6(&self, r: f64) -> f64 {
        let sr2 = (self.sigma / r).powi(2);
        sr2 * sr2 * sr2
    }
}

impl Default for LennardJones {
    fn default() -> Self {
        LennardJones {
            epsilon: 1.0,
            sigma: 1.0,
        }
    }
}

impl PairPotential for LennardJones {
    fn potential(&self, r: f64) -> f64 {
        if r < MIN_SEPARATION {
            return f64::INFINITY;
        }
        let sr6 = self.sr6(r);
        4.0 * self.epsilon * (sr6 * sr6 - sr6)
    }

    fn force_magnitude(&self, r: f64) -> f64 {
        if r < MIN_SEPARATION {
            return 0.0;
        }
        let sr6 = self.sr6(r);
        24.0 * self.epsilon / r * (2.0 * sr6 * sr6 - sr6)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::MdError;
    use approx::assert_relative_eq;

    fn argon() -> LennardJones {
        LennardJones::new(0.238, 3.4).unwrap()
    }

    #[test]
    fn test_initialization() {
        let lj = argon();
        assert_eq!(lj.epsilon(), 0.238);
        assert_eq!(lj.sigma(), 3.4);
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(matches!(
            LennardJones::new(0.0, 1.0),
            Err(MdError::InvalidParameter { name: "epsilon", .. })
        ));
        assert!(matches!(
            LennardJones::new(1.0, -3.4),
            Err(MdError::InvalidParameter { name: "sigma", .. })
        ));
    }

    #[test]
    fn test_potential_at_sigma_is_zero() {
        let lj = argon();
        assert_relative_eq!(lj.potential(lj.sigma()), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_potential_minimum_at_equilibrium() {
        let lj = argon();
        let r_eq = lj.equilibrium_distance();
        assert_relative_eq!(r_eq, 3.4 * 1.122462048309373, epsilon = 1e-12);
        assert_relative_eq!(lj.potential(r_eq), -lj.epsilon(), epsilon = 1e-12);

        // Neighbouring points sit higher in the well
        for dr in [-0.05, -0.01, 0.01, 0.05] {
            assert!(lj.potential(r_eq + dr) > lj.potential(r_eq));
        }
    }

    #[test]
    fn test_potential_vanishes_at_long_range() {
        let lj = argon();
        assert!(lj.potential(100.0 * lj.sigma()).abs() < 1e-10);
    }

    #[test]
    fn test_repulsive_and_attractive_ranges() {
        let lj = argon();
        let short = 0.9 * lj.sigma();
        let medium = 1.5 * lj.sigma();
        assert!(lj.potential(short) > 0.0);
        assert!(lj.potential(medium) < 0.0);
        assert!(lj.force_magnitude(short) > 0.0);
        assert!(lj.force_magnitude(medium) < 0.0);
    }

    #[test]
    fn test_force_vanishes_at_equilibrium() {
        let lj = argon();
        assert!(lj.force_magnitude(lj.equilibrium_distance()).abs() < 1e-12);
    }

    #[test]
    fn test_force_matches_numerical_derivative() {
        let lj = argon();
        let h = 1e-6;
        for r in [3.0, 3.8, 4.5, 6.0] {
            let numeric = -(lj.potential(r + h) - lj.potential(r - h)) / (2.0 * h);
            assert_relative_eq!(lj.force_magnitude(r), numeric, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_repulsion_weakens_with_distance() {
        let lj = argon();
        let forces: Vec<f64> = [0.85, 0.9, 0.95, 1.0]
            .iter()
            .map(|f| lj.force_magnitude(f * lj.sigma()))
            .collect();
        for pair in forces.windows(2) {
            assert!(pair[0] > pair[1]);
        }
    }

    #[test]
    fn test_force_vector_direction() {
        let lj = argon();
        // Particle 1 to the right of particle 2, inside the repulsive core
        let r_vec = Vector2::new(3.0, 0.0);
        let f = lj.force_vector(&r_vec);
        assert!(f.x > 0.0);
        assert_eq!(f.y, 0.0);

        // Attractive range pulls particle 1 back towards particle 2
        let f = lj.force_vector(&Vector2::new(5.0, 0.0));
        assert!(f.x < 0.0);
    }

    #[test]
    fn test_force_vector_2d() {
        let lj = argon();
        let r_vec = Vector2::new(3.0, 4.0);
        let f = lj.force_vector(&r_vec);
        assert_relative_eq!(f.norm(), lj.force_magnitude(5.0).abs(), epsilon = 1e-12);
        // Parallel to the separation
        assert_relative_eq!(f.x * r_vec.y - f.y * r_vec.x, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_force_vector_antisymmetry() {
        let lj = argon();
        for r_vec in [
            Vector2::new(3.0, 0.5),
            Vector2::new(-2.2, 4.1),
            Vector2::new(0.0, 7.3),
        ] {
            assert_eq!(lj.force_vector(&r_vec), -lj.force_vector(&-r_vec));
        }
    }

    #[test]
    fn test_overlapping_particles() {
        let lj = argon();
        assert_eq!(lj.potential(0.0), f64::INFINITY);
        assert_eq!(lj.potential(1e-11), f64::INFINITY);
        assert_eq!(lj.force_magnitude(0.0), 0.0);
        assert_eq!(lj.force_magnitude(1e-11), 0.0);
        assert_eq!(lj.force_vector(&Vector2::zeros()), Vector2::zeros());
        assert_eq!(lj.force_vector(&Vector2::new(1e-11, 0.0)), Vector2::zeros());
    }

    #[test]
    fn test_borrowed_potential_delegates() {
        fn energy_and_force<P: PairPotential>(pot: P, r: f64) -> (f64, f64) {
            (pot.potential(r), pot.force_magnitude(r))
        }

        let lj = LennardJones::default();
        assert_eq!(
            energy_and_force(&lj, 1.5),
            (lj.potential(1.5), lj.force_magnitude(1.5))
        );
        assert!(lj.force_magnitude(1.0) > 0.0);
    }
}
