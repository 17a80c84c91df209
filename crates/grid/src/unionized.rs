// internal modules
use crate::memory::reserve;
use crate::error::Result;
use crate::nuclide::NuclideGrid;
use xstools_utils::SliceExt;

// external crates
use log::trace;
use rayon::prelude::*;

/// Every isotope energy on one sorted axis, with exact intervals per isotope
///
/// The index is a flattened `energies.len() x n_isotopes` table. Row `e` holds
/// the interval of every isotope containing `energies[e]`, so a lookup only
/// has to locate the energy once on the shared axis.
///
/// Memory is the cost: the table has `n_isotopes^2 x n_gridpoints` entries.
#[derive(Debug, Clone, PartialEq)]
pub struct UnionizedGrid {
    energies: Vec<f64>,
    index: Vec<usize>,
    n_isotopes: usize,
}

impl UnionizedGrid {
    /// Merge all energies of `grid` and walk the result once
    ///
    /// The axis is a copy of every energy in storage order, sorted. The index
    /// rows are the states of an [IntervalWalk] after each axis point.
    pub fn build(grid: &NuclideGrid) -> Result<Self> {
        let n_isotopes = grid.n_isotopes();

        let mut energies = reserve(grid.len(), "unionized energy array")?;
        energies.extend(grid.points().iter().map(|p| p.energy));
        energies.par_sort_unstable_by(f64::total_cmp);

        let mut index = reserve(energies.len() * n_isotopes, "index grid")?;
        energies
            .iter()
            .fold(IntervalWalk::new(grid), |walk, &energy| {
                let walk = walk.step(grid, energy);
                index.extend_from_slice(walk.intervals());
                walk
            });

        trace!(
            "Unionized grid: {} energies, {} index entries",
            energies.len(),
            index.len()
        );

        Ok(Self {
            energies,
            index,
            n_isotopes,
        })
    }

    /// The sorted unionized energy axis
    pub fn energies(&self) -> &[f64] {
        &self.energies
    }

    /// The flattened index table, row-major by axis position
    pub fn index(&self) -> &[usize] {
        &self.index
    }

    /// Number of points on the axis
    pub fn len(&self) -> usize {
        self.energies.len()
    }

    /// True only if built from an empty grid, which can not happen
    pub fn is_empty(&self) -> bool {
        self.energies.is_empty()
    }

    /// Intervals of every isotope at one axis position
    pub fn row(&self, position: usize) -> &[usize] {
        let start = position * self.n_isotopes;
        &self.index[start..start + self.n_isotopes]
    }

    /// Axis position of `energy`
    ///
    /// The last position with an energy at or below `energy`, or 0 when
    /// `energy` is below the whole axis.
    pub fn position(&self, energy: f64) -> usize {
        self.energies.find_floor_by(energy, |e| *e)
    }

    /// Interval of `isotope` stored at an axis position
    pub fn interval_at(&self, position: usize, isotope: usize) -> usize {
        self.index[position * self.n_isotopes + isotope]
    }

    /// Interval of `isotope` containing `energy`
    ///
    /// Bisects the unionized axis, then reads the index directly.
    pub fn interval(&self, isotope: usize, energy: f64) -> usize {
        self.interval_at(self.position(energy), isotope)
    }
}

/// Per-isotope interval pointers carried along the sorted unionized axis
///
/// Each isotope keeps its current interval and the energy at the top of it.
/// Because the axis is visited in ascending order a pointer only ever moves
/// forward, one interval per axis point at most, and stops on the last
/// interval.
///
/// ```rust
/// # use xstools_grid::{CrossSectionRecord, IntervalWalk, NuclideGrid};
/// let records = [0.1, 0.4, 0.6, 0.9]
///     .iter()
///     .map(|&energy| CrossSectionRecord { energy, ..Default::default() })
///     .collect();
/// let grid = NuclideGrid::from_records(records, 4).unwrap();
///
/// let walk = IntervalWalk::new(&grid);
/// assert_eq!(walk.intervals(), &[0]);
///
/// let walk = walk.step(&grid, 0.2).step(&grid, 0.4);
/// assert_eq!(walk.intervals(), &[1]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct IntervalWalk {
    idx_low: Vec<usize>,
    energy_high: Vec<f64>,
}

impl IntervalWalk {
    /// Every isotope starts on its first interval
    pub fn new(grid: &NuclideGrid) -> Self {
        Self {
            idx_low: vec![0; grid.n_isotopes()],
            energy_high: grid.segments().map(|s| s[1].energy).collect(),
        }
    }

    /// Move every pointer up to `energy`
    ///
    /// An isotope whose upper bound is at or below `energy` advances by one
    /// interval unless it is already on its last.
    pub fn step(mut self, grid: &NuclideGrid, energy: f64) -> Self {
        let last = grid.last_interval();

        for (isotope, (low, high)) in self
            .idx_low
            .iter_mut()
            .zip(self.energy_high.iter_mut())
            .enumerate()
        {
            if energy < *high || *low == last {
                continue;
            }
            *low += 1;
            *high = grid.energy(isotope, *low + 1);
        }

        self
    }

    /// Current interval of every isotope
    pub fn intervals(&self) -> &[usize] {
        &self.idx_low
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nuclide::CrossSectionRecord;
    use xstools_utils::{Lcg, SortExt};

    fn grid_from_energies(energies: &[f64], n_gridpoints: usize) -> NuclideGrid {
        let records = energies
            .iter()
            .map(|&energy| CrossSectionRecord {
                energy,
                ..Default::default()
            })
            .collect();
        NuclideGrid::from_records(records, n_gridpoints).unwrap()
    }

    #[test]
    fn hand_built_axis() {
        // isotope 0: 0.10 0.30 0.50 0.70
        // isotope 1: 0.20 0.25 0.60 0.90
        let grid = grid_from_energies(&[0.1, 0.3, 0.5, 0.7, 0.2, 0.25, 0.6, 0.9], 4);
        let union = UnionizedGrid::build(&grid).unwrap();

        assert_eq!(
            union.energies(),
            &[0.1, 0.2, 0.25, 0.3, 0.5, 0.6, 0.7, 0.9]
        );

        let rows: Vec<Vec<usize>> = (0..union.len()).map(|e| union.row(e).to_vec()).collect();
        assert_eq!(
            rows,
            vec![
                vec![0, 0], // 0.10
                vec![0, 0], // 0.20
                vec![0, 1], // 0.25
                vec![1, 1], // 0.30
                vec![2, 1], // 0.50
                vec![2, 2], // 0.60
                vec![2, 2], // 0.70, isotope 0 clamped
                vec![2, 2], // 0.90, isotope 1 clamped
            ]
        );
    }

    #[test]
    fn walk_pointers_never_move_back() {
        let grid = NuclideGrid::generate(6, 40, &mut Lcg::new(42)).unwrap();
        let mut axis: Vec<f64> = grid.points().iter().map(|p| p.energy).collect();
        axis.sort_by_float_key(|e| *e);

        let mut walk = IntervalWalk::new(&grid);
        let mut previous = walk.intervals().to_vec();
        for energy in axis {
            walk = walk.step(&grid, energy);
            for (before, after) in previous.iter().zip(walk.intervals()) {
                assert!(after >= before);
                assert!(after - before <= 1);
            }
            previous = walk.intervals().to_vec();
        }

        // every isotope's top energy is on the axis, so all finish clamped
        assert!(walk.intervals().iter().all(|k| *k == grid.last_interval()));
    }

    #[test]
    fn index_matches_bisection() {
        let grid = NuclideGrid::generate(4, 25, &mut Lcg::new(42)).unwrap();
        let union = UnionizedGrid::build(&grid).unwrap();

        assert_eq!(union.index().len(), union.len() * 4);
        for (e, &energy) in union.energies().iter().enumerate() {
            for isotope in 0..4 {
                assert_eq!(
                    union.interval_at(e, isotope),
                    grid.interval(isotope, energy)
                );
            }
        }
    }

    #[test]
    fn position_outside_axis() {
        let grid = grid_from_energies(&[0.2, 0.4, 0.6], 3);
        let union = UnionizedGrid::build(&grid).unwrap();

        assert_eq!(union.position(0.0), 0);
        assert_eq!(union.position(0.5), 1);
        assert_eq!(union.position(2.0), 2);
        assert_eq!(union.interval(0, 2.0), 1);
    }
}
