// internal modules
use crate::memory::reserve;
use crate::error::{Error, Result};
use xstools_utils::{f, Lcg, SliceExt, SortExt};

// external crates
use log::trace;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Cross sections of one isotope at one energy
///
/// Every field is synthetic. Records are laid out as an array of structures
/// because a lookup reads the energy and all five channels together.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CrossSectionRecord {
    /// Energy of the grid point
    pub energy: f64,
    /// Total cross section
    pub total_xs: f64,
    /// Elastic scattering cross section
    pub elastic_xs: f64,
    /// Absorption cross section
    pub absorption_xs: f64,
    /// Fission cross section
    pub fission_xs: f64,
    /// Fission cross section weighted by neutron yield
    pub nu_fission_xs: f64,
}

impl CrossSectionRecord {
    /// Draw a record from six consecutive values of the stream
    ///
    /// Field order is fixed: energy, total, elastic, absorption, fission,
    /// nu-fission.
    pub fn sample(rng: &mut Lcg) -> Self {
        Self {
            energy: rng.next_f64(),
            total_xs: rng.next_f64(),
            elastic_xs: rng.next_f64(),
            absorption_xs: rng.next_f64(),
            fission_xs: rng.next_f64(),
            nu_fission_xs: rng.next_f64(),
        }
    }
}

/// Energy-sorted cross section records for every isotope
///
/// Stored flat as `n_isotopes` contiguous segments of `n_gridpoints` records.
/// Each segment is sorted by energy on its own; nothing orders one segment
/// against another.
#[derive(Debug, Clone, PartialEq)]
pub struct NuclideGrid {
    points: Vec<CrossSectionRecord>,
    n_isotopes: usize,
    n_gridpoints: usize,
}

impl NuclideGrid {
    /// Generate random records for every isotope and sort each segment
    ///
    /// Records are drawn strictly in storage order from `rng`, so the result
    /// depends only on the dimensions and the state of the stream. Segments
    /// are then sorted in parallel since they are disjoint.
    pub fn generate(n_isotopes: usize, n_gridpoints: usize, rng: &mut Lcg) -> Result<Self> {
        let length = n_isotopes * n_gridpoints;
        let mut points = reserve(length, "nuclide grid")?;

        trace!("Drawing {length} records from LCG state {}", rng.state());
        points.extend((0..length).map(|_| CrossSectionRecord::sample(rng)));

        Self::from_records(points, n_gridpoints)
    }

    /// Build a grid from existing records
    ///
    /// The number of isotopes is inferred from the number of records. Each
    /// segment is sorted, so the records may be given in any order within
    /// their own segment.
    ///
    /// ```rust
    /// # use xstools_grid::{CrossSectionRecord, NuclideGrid};
    /// let records: Vec<CrossSectionRecord> = [0.3, 0.1, 0.2, 0.9, 0.5, 0.7]
    ///     .iter()
    ///     .map(|&energy| CrossSectionRecord { energy, ..Default::default() })
    ///     .collect();
    ///
    /// let grid = NuclideGrid::from_records(records, 3).unwrap();
    /// assert_eq!(grid.n_isotopes(), 2);
    /// assert_eq!(grid.segment(1)[0].energy, 0.5);
    /// ```
    pub fn from_records(mut points: Vec<CrossSectionRecord>, n_gridpoints: usize) -> Result<Self> {
        if n_gridpoints < 2 {
            return Err(Error::InvalidConfiguration(f!(
                "at least 2 gridpoints per isotope are required (found {n_gridpoints})"
            )));
        }

        if points.is_empty() || points.len() % n_gridpoints != 0 {
            return Err(Error::InvalidConfiguration(f!(
                "{} records do not divide into segments of {n_gridpoints}",
                points.len()
            )));
        }

        points
            .par_chunks_mut(n_gridpoints)
            .for_each(|segment| segment.sort_by_float_key(|p| p.energy));

        Ok(Self {
            n_isotopes: points.len() / n_gridpoints,
            points,
            n_gridpoints,
        })
    }

    /// Number of isotopes
    pub fn n_isotopes(&self) -> usize {
        self.n_isotopes
    }

    /// Number of energy points per isotope
    pub fn n_gridpoints(&self) -> usize {
        self.n_gridpoints
    }

    /// Total number of records across all isotopes
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false for a constructed grid, here for completeness
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Lower index of the highest interval, `n_gridpoints - 2`
    pub fn last_interval(&self) -> usize {
        self.n_gridpoints - 2
    }

    /// All records in storage order
    pub fn points(&self) -> &[CrossSectionRecord] {
        &self.points
    }

    /// Sorted records of a single isotope
    pub fn segment(&self, isotope: usize) -> &[CrossSectionRecord] {
        let start = isotope * self.n_gridpoints;
        &self.points[start..start + self.n_gridpoints]
    }

    /// Iterator over every isotope's segment in order
    pub fn segments(&self) -> std::slice::ChunksExact<'_, CrossSectionRecord> {
        self.points.chunks_exact(self.n_gridpoints)
    }

    /// Energy of point `k` of an isotope
    pub fn energy(&self, isotope: usize, k: usize) -> f64 {
        self.points[isotope * self.n_gridpoints + k].energy
    }

    /// Interval of an isotope's grid containing `energy`, by full bisection
    ///
    /// Energies outside the grid are clamped to the first or last interval.
    pub fn interval(&self, isotope: usize, energy: f64) -> usize {
        self.segment(isotope)
            .find_interval_by(energy, |p| p.energy)
    }
}
