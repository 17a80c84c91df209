//! Synthetic cross section grids for lookup benchmarks
//!
#![doc = include_str!("../readme.md")]

// Split into subfiles for development, but anything important is re-exported
mod data;
mod error;
mod hash;
mod material;
mod memory;
mod nuclide;
mod params;
mod unionized;

// Inline anything important for a nice public API
#[doc(inline)]
pub use data::{build, Acceleration, SimulationData, NUCLIDE_SEED};

#[doc(inline)]
pub use params::{GridType, SimulationParameters};

#[doc(inline)]
pub use nuclide::{CrossSectionRecord, NuclideGrid};

#[doc(inline)]
pub use unionized::{IntervalWalk, UnionizedGrid};

#[doc(inline)]
pub use hash::{hash_interval, HashGrid};

#[doc(inline)]
pub use material::{
    MaterialTable, CONCENTRATION_SEED, NUM_MATERIALS, SMALL_PROBLEM_ISOTOPES, UNUSED_ISOTOPE,
};

#[doc(inline)]
pub use error::{Error, Result};
