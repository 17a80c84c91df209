// internal modules
use crate::memory::filled;
use crate::error::Result;
use crate::nuclide::NuclideGrid;
use xstools_utils::SliceExt;

// external crates
use log::trace;
use rayon::prelude::*;

/// Interval guesses for uniformly spaced energy bins
///
/// The index is a flattened `hash_bins x n_isotopes` table. Entry `(b, i)` is
/// the interval of isotope `i` containing the bottom edge of bin `b`, which is
/// `b / hash_bins`. Neighbouring entries of the same isotope bound where any
/// energy in the bin can land, so a lookup bisects only that stretch.
#[derive(Debug, Clone, PartialEq)]
pub struct HashGrid {
    index: Vec<usize>,
    hash_bins: usize,
    n_isotopes: usize,
}

/// Interval of `isotope` at the bottom edge of `bin`
///
/// Pure, so every entry of a [HashGrid] can be computed independently.
pub fn hash_interval(grid: &NuclideGrid, bin: usize, isotope: usize, hash_bins: usize) -> usize {
    let du = 1.0 / hash_bins as f64;
    grid.interval(isotope, bin as f64 * du)
}

impl HashGrid {
    /// Fill the index in parallel, one row of isotopes per bin
    pub fn build(grid: &NuclideGrid, hash_bins: usize) -> Result<Self> {
        let n_isotopes = grid.n_isotopes();
        let mut index = filled(hash_bins * n_isotopes, 0, "index grid")?;

        index
            .par_chunks_mut(n_isotopes)
            .enumerate()
            .for_each(|(bin, row)| {
                for (isotope, entry) in row.iter_mut().enumerate() {
                    *entry = hash_interval(grid, bin, isotope, hash_bins);
                }
            });

        trace!("Hash grid: {hash_bins} bins, {} index entries", index.len());

        Ok(Self {
            index,
            hash_bins,
            n_isotopes,
        })
    }

    /// The flattened index table, row-major by bin
    pub fn index(&self) -> &[usize] {
        &self.index
    }

    /// Number of energy bins
    pub fn hash_bins(&self) -> usize {
        self.hash_bins
    }

    /// Bin containing `energy`
    ///
    /// Energies outside `[0, 1)` are clamped to the first or last bin.
    pub fn bin(&self, energy: f64) -> usize {
        let du = 1.0 / self.hash_bins as f64;
        // saturating cast sends negatives and NaN to bin 0
        ((energy / du) as usize).min(self.hash_bins - 1)
    }

    /// Stored interval guess for an isotope in a bin
    pub fn guess(&self, bin: usize, isotope: usize) -> usize {
        self.index[bin * self.n_isotopes + isotope]
    }

    /// Interval of `isotope` containing `energy`
    ///
    /// Bisects between this bin's guess and the next bin's guess. If rounding
    /// put the energy in a neighbouring bin, or the energy is outside the
    /// unit interval, the bracket does not hold and the whole segment is
    /// searched instead. Either way the result matches
    /// [NuclideGrid::interval].
    pub fn interval(&self, grid: &NuclideGrid, isotope: usize, energy: f64) -> usize {
        let segment = grid.segment(isotope);
        let top = segment.len() - 1;
        let bin = self.bin(energy);

        let low = self.guess(bin, isotope);
        let high = if bin + 1 == self.hash_bins {
            top
        } else {
            self.guess(bin + 1, isotope) + 1
        };

        let bracketed = (low == 0 || segment[low].energy <= energy)
            && (high == top || energy < segment[high].energy);

        if bracketed {
            segment.find_interval_within_by(energy, low, high, |p| p.energy)
        } else {
            segment.find_interval_by(energy, |p| p.energy)
        }
    }
}
