//! Isotope membership and concentrations of the benchmark materials
//!
//! The twelve materials are fixed regions of a Hoogenboom-Martin reactor
//! model. Which isotopes make up each material comes from a reference table,
//! only the concentrations are random.

// internal modules
use crate::memory::filled;
use crate::error::Result;
use xstools_utils::Lcg;

/// Number of materials, always 12
pub const NUM_MATERIALS: usize = 12;

/// Isotope id stored in the padding of the material grid
pub const UNUSED_ISOTOPE: i32 = -1;

/// Seed of the concentration stream, separate from the nuclide grid stream
pub const CONCENTRATION_SEED: u64 = 1070 * 7;

/// Isotope count of the small problem, which has a smaller fuel material
pub const SMALL_PROBLEM_ISOTOPES: usize = 68;

/// Fuel isotopes of the large problem
const LARGE_FUEL_COUNT: usize = 321;

/// Fuel isotopes shared by both problem sizes
#[rustfmt::skip]
const FUEL: [usize; 34] = [
    58, 59, 60, 61, 40, 42, 43, 44, 45, 46, 1, 2, 3, 7, 8, 9, 10, 29, 57, 47,
    48, 0, 62, 15, 33, 34, 52, 53, 54, 55, 56, 18, 23, 41,
];

const CLADDING: [usize; 5] = [63, 64, 65, 66, 67];

const BORATED_WATER: [usize; 4] = [24, 41, 4, 5];

#[rustfmt::skip]
const PRESSURE_VESSEL: [usize; 27] = [
    19, 20, 21, 22, 35, 36, 37, 38, 39, 25, 27, 28, 29, 30, 31, 32, 26, 49, 50,
    51, 11, 12, 13, 14, 6, 16, 17,
];

#[rustfmt::skip]
const REFLECTOR: [usize; 21] = [
    24, 41, 4, 5, 19, 20, 21, 22, 35, 36, 37, 38, 39, 25, 49, 50, 51, 11, 12,
    13, 14,
];

const ASSEMBLY_END: [usize; 9] = [24, 41, 4, 5, 63, 64, 65, 66, 67];

/// Reference isotope ids of one material
///
/// Material 0 is fuel. The large problem extends it with every isotope from
/// id 68 upwards. The rest, in order, are cladding, cold and hot borated
/// water, the pressure vessel, the lower radial reflector, top reflector,
/// bottom plate, bottom and top nozzles, and the top and bottom of the fuel
/// assemblies.
fn reference_isotopes(material: usize, n_isotopes: usize) -> Vec<usize> {
    match material {
        0 if n_isotopes == SMALL_PROBLEM_ISOTOPES => FUEL.to_vec(),
        0 => FUEL
            .iter()
            .copied()
            .chain(SMALL_PROBLEM_ISOTOPES..)
            .take(LARGE_FUEL_COUNT)
            .collect(),
        1 => CLADDING.to_vec(),
        2 | 3 => BORATED_WATER.to_vec(),
        4 => PRESSURE_VESSEL.to_vec(),
        5..=9 => REFLECTOR.to_vec(),
        _ => ASSEMBLY_END.to_vec(),
    }
}

/// Isotopes and concentrations of every material
///
/// Stored as two `NUM_MATERIALS x max_num_nucs` grids padded to the widest
/// material. Padding holds [UNUSED_ISOTOPE] and a zero concentration, and is
/// never returned by [MaterialTable::constituents].
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialTable {
    num_nucs: Vec<usize>,
    max_num_nucs: usize,
    mats: Vec<i32>,
    concs: Vec<f64>,
}

impl MaterialTable {
    /// Lay out the reference materials for a problem with `n_isotopes`
    ///
    /// Reference ids beyond the problem's isotopes wrap around modulo
    /// `n_isotopes`, so every stored id refers to a real isotope.
    /// Concentrations are drawn material by material from their own stream.
    ///
    /// ```rust
    /// # use xstools_grid::MaterialTable;
    /// let table = MaterialTable::generate(355).unwrap();
    ///
    /// assert_eq!(table.num_nucs()[0], 321);
    /// assert_eq!(table.max_num_nucs(), 321);
    /// assert_eq!(table.constituents(1).count(), 5);
    /// ```
    pub fn generate(n_isotopes: usize) -> Result<Self> {
        let materials: Vec<Vec<usize>> = (0..NUM_MATERIALS)
            .map(|m| reference_isotopes(m, n_isotopes))
            .collect();

        let num_nucs: Vec<usize> = materials.iter().map(Vec::len).collect();
        let max_num_nucs = num_nucs.iter().copied().max().unwrap_or_default();
        let length = NUM_MATERIALS * max_num_nucs;

        let mut mats = filled(length, UNUSED_ISOTOPE, "material grid")?;
        let mut concs = filled(length, 0.0, "concentration grid")?;

        let mut rng = Lcg::new(CONCENTRATION_SEED);
        for (m, isotopes) in materials.iter().enumerate() {
            let row = m * max_num_nucs;
            for (j, isotope) in isotopes.iter().enumerate() {
                // reference ids stop at 354, well inside i32
                mats[row + j] = (isotope % n_isotopes) as i32;
                concs[row + j] = rng.next_f64();
            }
        }

        Ok(Self {
            num_nucs,
            max_num_nucs,
            mats,
            concs,
        })
    }

    /// Number of isotopes in each material
    pub fn num_nucs(&self) -> &[usize] {
        &self.num_nucs
    }

    /// Width of the padded grids
    pub fn max_num_nucs(&self) -> usize {
        self.max_num_nucs
    }

    /// Padded isotope id grid, row-major by material
    pub fn mats(&self) -> &[i32] {
        &self.mats
    }

    /// Padded concentration grid, row-major by material
    pub fn concs(&self) -> &[f64] {
        &self.concs
    }

    /// Isotope id and concentration of each live constituent of a material
    pub fn constituents(&self, material: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        let start = material * self.max_num_nucs;
        let end = start + self.num_nucs[material];
        self.mats[start..end]
            .iter()
            .zip(&self.concs[start..end])
            .map(|(id, conc)| (*id as usize, *conc))
    }
}
