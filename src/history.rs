// file: `src/history.rs`
use nalgebra::Vector2;

/// Kinetic, potential and total energy of the pair, in kcal/mol.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Energies {
    pub kinetic: f64,
    pub potential: f64,
    pub total: f64,
}

impl From<Energies> for (f64, f64, f64) {
    fn from(e: Energies) -> Self {
        (e.kinetic, e.potential, e.total)
    }
}

/// Cumulative wall hits, one counter per particle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallCollisions {
    pub particle1: u64,
    pub particle2: u64,
}

/// State of both particles at one recorded instant.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub time: f64,
    pub positions: [Vector2<f64>; 2],
    pub velocities: [Vector2<f64>; 2],
    pub energies: Energies,
    pub wall_collisions: WallCollisions,
}

impl Snapshot {
    pub fn separation(&self) -> f64 {
        (self.positions[0] - self.positions[1]).norm()
    }
}

/// Append-only trajectory, ordered by time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct History {
    snapshots: Vec<Snapshot>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, snapshot: Snapshot) {
        debug_assert!(
            self.last().map_or(true, |last| last.time < snapshot.time),
            "snapshots must be recorded in increasing time order"
        );
        self.snapshots.push(snapshot);
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn first(&self) -> Option<&Snapshot> {
        self.snapshots.first()
    }

    pub fn last(&self) -> Option<&Snapshot> {
        self.snapshots.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Snapshot> {
        self.snapshots.iter()
    }

    pub fn as_slice(&self) -> &[Snapshot] {
        &self.snapshots
    }

    pub fn times(&self) -> Vec<f64> {
        self.snapshots.iter().map(|s| s.time).collect()
    }

    pub fn totals(&self) -> Vec<f64> {
        self.snapshots.iter().map(|s| s.energies.total).collect()
    }

    /// Inter-particle distance at every snapshot.
    pub fn separations(&self) -> Vec<f64> {
        self.snapshots.iter().map(Snapshot::separation).collect()
    }

    /// Total energy relative to the first snapshot.
    pub fn energy_deviation(&self) -> Vec<f64> {
        match self.first() {
            Some(first) => {
                let e0 = first.energies.total;
                self.snapshots.iter().map(|s| s.energies.total - e0).collect()
            }
            None => Vec::new(),
        }
    }

    /// Drift between the first and last recorded total energies.
    pub fn energy_statistics(&self) -> Option<EnergyStatistics> {
        let first = self.first()?;
        let last = self.last()?;
        Some(EnergyStatistics::from_totals(
            first.energies.total,
            last.energies.total,
        ))
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a Snapshot;
    type IntoIter = std::slice::Iter<'a, Snapshot>;

    fn into_iter(self) -> Self::IntoIter {
        self.snapshots.iter()
    }
}

/// Verdict on how well a run conserved energy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriftQuality {
    /// Relative drift below 0.1%
    Excellent,
    /// Relative drift below 1%
    Good,
    /// Anything else, including NaN; a smaller time step is advised
    Warning,
}

impl DriftQuality {
    pub fn from_relative_drift(percent: f64) -> Self {
        if percent < 0.1 {
            DriftQuality::Excellent
        } else if percent < 1.0 {
            DriftQuality::Good
        } else {
            DriftQuality::Warning
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyStatistics {
    pub initial_total: f64,
    pub final_total: f64,
    /// final - initial
    pub drift: f64,
    /// |drift| / |initial| in percent
    pub relative_drift_percent: f64,
    pub quality: DriftQuality,
}

impl EnergyStatistics {
    pub fn from_totals(initial_total: f64, final_total: f64) -> Self {
        let drift = final_total - initial_total;
        let relative_drift_percent = if initial_total != 0.0 {
            (drift / initial_total).abs() * 100.0
        } else if drift == 0.0 {
            0.0
        } else {
            // No reference scale, any change counts as unbounded drift
            f64::INFINITY
        };
        EnergyStatistics {
            initial_total,
            final_total,
            drift,
            relative_drift_percent,
            quality: DriftQuality::from_relative_drift(relative_drift_percent),
        }
    }
}
