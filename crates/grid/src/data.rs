// internal modules
use crate::memory::megabytes;
use crate::error::Result;
use crate::hash::HashGrid;
use crate::material::{MaterialTable, NUM_MATERIALS};
use crate::nuclide::{CrossSectionRecord, NuclideGrid};
use crate::params::{GridType, SimulationParameters};
use crate::unionized::UnionizedGrid;
use xstools_utils::{f, Lcg};

// external crates
use log::info;

/// Seed of the nuclide grid stream
pub const NUCLIDE_SEED: u64 = 42;

/// The acceleration structure chosen by [GridType]
#[derive(Debug, Clone, PartialEq)]
pub enum Acceleration {
    /// Nothing built, lookups bisect each isotope's grid
    None,
    /// Unionized energy grid with its exact index
    Unionized(UnionizedGrid),
    /// Uniform energy bins with approximate guesses
    Hash(HashGrid),
}

impl Acceleration {
    /// The [GridType] this structure was built for
    pub fn grid_type(&self) -> GridType {
        match self {
            Self::None => GridType::None,
            Self::Unionized(_) => GridType::Unionized,
            Self::Hash(_) => GridType::Hash,
        }
    }
}

/// Everything a lookup driver needs, fully built and read-only
///
/// Handed over by value from [build()]. Nothing in here is mutated after
/// construction, so it can be shared freely between lookup threads.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationData {
    /// Cross section records of every isotope
    pub nuclide_grid: NuclideGrid,
    /// Optional acceleration structure over the nuclide grid
    pub acceleration: Acceleration,
    /// Isotopes and concentrations of the materials
    pub materials: MaterialTable,
}

impl SimulationData {
    /// Number of records in the nuclide grid
    pub fn length_nuclide_grid(&self) -> usize {
        self.nuclide_grid.len()
    }

    /// Unionized energy axis, empty unless the unionized grid was built
    pub fn unionized_energy_array(&self) -> &[f64] {
        match &self.acceleration {
            Acceleration::Unionized(union) => union.energies(),
            _ => &[],
        }
    }

    /// Number of points on the unionized axis, or 0
    pub fn length_unionized_energy_array(&self) -> usize {
        self.unionized_energy_array().len()
    }

    /// Flattened index table of whichever acceleration structure was built
    pub fn index_grid(&self) -> &[usize] {
        match &self.acceleration {
            Acceleration::None => &[],
            Acceleration::Unionized(union) => union.index(),
            Acceleration::Hash(hash) => hash.index(),
        }
    }

    /// Number of entries in the index table, or 0
    pub fn length_index_grid(&self) -> usize {
        self.index_grid().len()
    }

    /// Number of materials, always 12
    pub fn length_num_nucs(&self) -> usize {
        NUM_MATERIALS
    }

    /// Number of cells in the padded material grid
    pub fn length_mats(&self) -> usize {
        self.materials.mats().len()
    }

    /// Number of cells in the padded concentration grid
    pub fn length_concs(&self) -> usize {
        self.materials.concs().len()
    }

    /// Total bytes held by every array
    pub fn bytes(&self) -> usize {
        use std::mem::size_of;

        self.length_nuclide_grid() * size_of::<CrossSectionRecord>()
            + self.length_unionized_energy_array() * size_of::<f64>()
            + self.length_index_grid() * size_of::<usize>()
            + self.length_num_nucs() * size_of::<usize>()
            + self.length_mats() * size_of::<i32>()
            + self.length_concs() * size_of::<f64>()
    }

    /// Interval of `isotope` containing `energy`
    ///
    /// Uses whichever acceleration structure was built. All three give the
    /// same answer, clamped to `[0, n_gridpoints - 2]`.
    pub fn interval(&self, isotope: usize, energy: f64) -> usize {
        match &self.acceleration {
            Acceleration::None => self.nuclide_grid.interval(isotope, energy),
            Acceleration::Unionized(union) => union.interval(isotope, energy),
            Acceleration::Hash(hash) => hash.interval(&self.nuclide_grid, isotope, energy),
        }
    }

    /// The two records of `isotope` bracketing `energy`, for interpolation
    pub fn bracket(&self, isotope: usize, energy: f64) -> (&CrossSectionRecord, &CrossSectionRecord) {
        let k = self.interval(isotope, energy);
        let segment = self.nuclide_grid.segment(isotope);
        (&segment[k], &segment[k + 1])
    }
}

impl std::fmt::Display for SimulationData {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut s = "SimulationData {\n".to_string();
        s += &f!(
            "    nuclide grid: {} ({}x{})\n",
            self.length_nuclide_grid(),
            self.nuclide_grid.n_isotopes(),
            self.nuclide_grid.n_gridpoints()
        );
        s += &f!("    grid type: {}\n", self.acceleration.grid_type());
        s += &f!(
            "    unionized energies: {}\n",
            self.length_unionized_energy_array()
        );
        s += &f!("    index grid: {}\n", self.length_index_grid());
        s += &f!(
            "    materials: {} (max {} nuclides)\n",
            self.length_num_nucs(),
            self.materials.max_num_nucs()
        );
        s += &f!("    allocated: {:.0} MB\n}}", megabytes(self.bytes()));

        write!(f, "{}", s)
    }
}

/// Build every structure described by `params`
///
/// The nuclide grid and material table are always built, the acceleration
/// structure only if one is selected. The material table does not depend on
/// the grids and is built alongside them.
///
/// Only `rank` 0 reports progress. The data is identical for every rank.
///
/// ```rust
/// # use xstools_grid::{build, GridType, SimulationParameters};
/// let params = SimulationParameters {
///     n_isotopes: 2,
///     n_gridpoints: 4,
///     grid_type: GridType::Unionized,
///     ..Default::default()
/// };
/// let data = build(&params, 0).unwrap();
///
/// assert_eq!(data.length_unionized_energy_array(), 8);
/// assert_eq!(data.length_index_grid(), 16);
/// ```
pub fn build(params: &SimulationParameters, rank: usize) -> Result<SimulationData> {
    params.validate()?;

    let (grids, materials) = rayon::join(
        || build_grids(params, rank),
        || {
            if rank == 0 {
                info!("Initialising material data...");
            }
            MaterialTable::generate(params.n_isotopes)
        },
    );
    let (nuclide_grid, acceleration) = grids?;

    let data = SimulationData {
        nuclide_grid,
        acceleration,
        materials: materials?,
    };

    if rank == 0 {
        info!(
            "Initialisation complete. Allocated {:.0} MB of data.",
            megabytes(data.bytes())
        );
    }

    Ok(data)
}

/// Nuclide grid first, then the acceleration structure over it
fn build_grids(params: &SimulationParameters, rank: usize) -> Result<(NuclideGrid, Acceleration)> {
    if rank == 0 {
        info!("Initialising nuclide grids...");
    }
    let mut rng = Lcg::new(NUCLIDE_SEED);
    let grid = NuclideGrid::generate(params.n_isotopes, params.n_gridpoints, &mut rng)?;

    let acceleration = match params.grid_type {
        GridType::None => Acceleration::None,
        GridType::Unionized => {
            if rank == 0 {
                info!("Initialising unionized grid...");
            }
            Acceleration::Unionized(UnionizedGrid::build(&grid)?)
        }
        GridType::Hash => {
            if rank == 0 {
                info!("Initialising hash grid...");
            }
            Acceleration::Hash(HashGrid::build(&grid, params.hash_bins)?)
        }
    };

    Ok((grid, acceleration))
}
