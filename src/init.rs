// file: `src/init.rs`
use crate::errors::{MdError, Result};
use nalgebra::Vector2;
use rand::Rng;

/// Rules for drawing random starting positions inside the box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Keep-out distance from every wall
    pub margin: f64,
    /// Minimum distance between the two particles
    pub min_separation: f64,
    pub max_attempts: usize,
}

impl Placement {
    /// One sigma away from the walls and at least two sigma apart.
    pub fn for_sigma(sigma: f64) -> Self {
        Placement {
            margin: sigma,
            min_separation: 2.0 * sigma,
            max_attempts: 10_000,
        }
    }
}

/// Draw two positions uniformly in `[margin, extent - margin]` on each axis
/// until they are at least `min_separation` apart.
///
/// The generator is passed in so a fixed seed reproduces the same pair.
pub fn random_positions<R: Rng + ?Sized>(
    rng: &mut R,
    box_size: (f64, f64),
    placement: &Placement,
) -> Result<[Vector2<f64>; 2]> {
    let (lo, span) = sampling_region(box_size, placement)?;

    for _ in 0..placement.max_attempts {
        let pos1 = sample_point(rng, &lo, &span);
        let pos2 = sample_point(rng, &lo, &span);
        if (pos1 - pos2).norm() >= placement.min_separation {
            return Ok([pos1, pos2]);
        }
    }

    Err(MdError::PlacementFailed {
        attempts: placement.max_attempts,
        min_separation: placement.min_separation,
    })
}

/// Draw a single position at least `min_separation` away from `anchor`,
/// for when the other particle's position is already known.
pub fn random_partner<R: Rng + ?Sized>(
    rng: &mut R,
    anchor: &Vector2<f64>,
    box_size: (f64, f64),
    placement: &Placement,
) -> Result<Vector2<f64>> {
    let (lo, span) = sampling_region(box_size, placement)?;

    for _ in 0..placement.max_attempts {
        let pos = sample_point(rng, &lo, &span);
        if (pos - anchor).norm() >= placement.min_separation {
            return Ok(pos);
        }
    }

    Err(MdError::PlacementFailed {
        attempts: placement.max_attempts,
        min_separation: placement.min_separation,
    })
}

/// Lower corner and extent of the region left after the wall margin.
fn sampling_region(
    box_size: (f64, f64),
    placement: &Placement,
) -> Result<(Vector2<f64>, Vector2<f64>)> {
    let lo = Vector2::new(placement.margin, placement.margin);
    let span = Vector2::new(
        box_size.0 - 2.0 * placement.margin,
        box_size.1 - 2.0 * placement.margin,
    );
    if placement.margin < 0.0 || span.x <= 0.0 || span.y <= 0.0 {
        return Err(MdError::Config(format!(
            "placement margin {} leaves no room in a {} x {} box",
            placement.margin, box_size.0, box_size.1
        )));
    }
    Ok((lo, span))
}

fn sample_point<R: Rng + ?Sized>(rng: &mut R, lo: &Vector2<f64>, span: &Vector2<f64>) -> Vector2<f64> {
    Vector2::new(
        lo.x + rng.gen::<f64>() * span.x,
        lo.y + rng.gen::<f64>() * span.y,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_same_seed_same_positions() {
        let placement = Placement::for_sigma(3.4);
        let a = random_positions(&mut StdRng::seed_from_u64(42), (20.0, 20.0), &placement).unwrap();
        let b = random_positions(&mut StdRng::seed_from_u64(42), (20.0, 20.0), &placement).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_positions_respect_constraints() {
        let placement = Placement::for_sigma(3.4);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let [p1, p2] = random_positions(&mut rng, (20.0, 30.0), &placement).unwrap();
            assert!((p1 - p2).norm() >= placement.min_separation);
            for p in [p1, p2] {
                assert!(p.x >= 3.4 && p.x <= 20.0 - 3.4);
                assert!(p.y >= 3.4 && p.y <= 30.0 - 3.4);
            }
        }
    }

    #[test]
    fn test_impossible_separation_fails() {
        let placement = Placement {
            margin: 1.0,
            min_separation: 50.0,
            max_attempts: 100,
        };
        let result = random_positions(&mut StdRng::seed_from_u64(1), (10.0, 10.0), &placement);
        assert!(matches!(
            result,
            Err(MdError::PlacementFailed { attempts: 100, .. })
        ));
    }

    #[test]
    fn test_margin_too_large() {
        let placement = Placement::for_sigma(6.0);
        let result = random_positions(&mut StdRng::seed_from_u64(1), (10.0, 40.0), &placement);
        assert!(matches!(result, Err(MdError::Config(_))));
    }

    #[test]
    fn test_partner_keeps_clear_of_anchor() {
        let placement = Placement::for_sigma(3.4);
        let anchor = Vector2::new(10.0, 10.0);
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            let pos = random_partner(&mut rng, &anchor, (20.0, 20.0), &placement).unwrap();
            assert!((pos - anchor).norm() >= placement.min_separation);
            assert!(pos.x >= 3.4 && pos.x <= 20.0 - 3.4);
            assert!(pos.y >= 3.4 && pos.y <= 20.0 - 3.4);
        }
    }

    #[test]
    fn test_partner_with_no_room_fails() {
        let placement = Placement {
            margin: 1.0,
            min_separation: 50.0,
            max_attempts: 20,
        };
        let anchor = Vector2::new(5.0, 5.0);
        let result = random_partner(&mut StdRng::seed_from_u64(1), &anchor, (10.0, 10.0), &placement);
        assert!(matches!(
            result,
            Err(MdError::PlacementFailed { attempts: 20, .. })
        ));
    }
}
