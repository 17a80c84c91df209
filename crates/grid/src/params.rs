// standard library
use std::fmt::Display;
use std::str::FromStr;

// internal modules
use crate::error::{Error, Result};
use xstools_utils::f;

// external crates
use serde::{Deserialize, Serialize};

/// Acceleration structure built on top of the nuclide grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridType {
    /// No acceleration, every lookup bisects the isotope's own grid
    None,
    /// Exact per-isotope intervals for every point of the unionized energy grid
    #[default]
    Unionized,
    /// Approximate per-isotope intervals for uniformly spaced energy bins
    Hash,
}

impl FromStr for GridType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "none" | "nuclide" => Ok(Self::None),
            "unionized" => Ok(Self::Unionized),
            "hash" => Ok(Self::Hash),
            _ => Err(Error::InvalidConfiguration(f!(
                "unknown grid type \"{s}\" (expected none, unionized, or hash)"
            ))),
        }
    }
}

impl Display for GridType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let name = match self {
            Self::None => "none",
            Self::Unionized => "unionized",
            Self::Hash => "hash",
        };
        write!(f, "{name}")
    }
}

/// Problem size and acceleration choice for a build
///
/// The defaults describe the large Hoogenboom-Martin problem with a unionized
/// grid. Missing fields take their default when deserialised, so a config only
/// needs to name what it changes.
///
/// ```rust
/// # use xstools_grid::{GridType, SimulationParameters};
/// let params = SimulationParameters {
///     grid_type: GridType::Hash,
///     ..SimulationParameters::small()
/// };
///
/// assert_eq!(params.n_isotopes, 68);
/// assert!(params.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParameters {
    /// Number of isotopes, each with its own energy grid
    pub n_isotopes: usize,
    /// Number of energy points per isotope
    pub n_gridpoints: usize,
    /// Acceleration structure to build
    pub grid_type: GridType,
    /// Number of uniform energy bins, only used by [GridType::Hash]
    pub hash_bins: usize,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            n_isotopes: 355,
            n_gridpoints: 11303,
            grid_type: GridType::Unionized,
            hash_bins: 10000,
        }
    }
}

impl SimulationParameters {
    /// The small Hoogenboom-Martin problem with 68 isotopes
    pub fn small() -> Self {
        Self {
            n_isotopes: 68,
            ..Default::default()
        }
    }

    /// Check the parameters describe grids that can be built
    ///
    /// Every array length must also be representable, so products that
    /// overflow are rejected here rather than at allocation.
    pub fn validate(&self) -> Result<()> {
        if self.n_isotopes == 0 {
            return Err(Error::InvalidConfiguration(
                "at least one isotope is required".to_string(),
            ));
        }

        if self.n_gridpoints < 2 {
            return Err(Error::InvalidConfiguration(f!(
                "at least 2 gridpoints per isotope are required (found {})",
                self.n_gridpoints
            )));
        }

        if self.grid_type == GridType::Hash && self.hash_bins == 0 {
            return Err(Error::InvalidConfiguration(
                "a hash grid needs at least one bin".to_string(),
            ));
        }

        let overflow = || {
            Error::InvalidConfiguration(f!(
                "grid dimensions overflow ({} isotopes x {} gridpoints)",
                self.n_isotopes,
                self.n_gridpoints
            ))
        };

        let points = self
            .n_isotopes
            .checked_mul(self.n_gridpoints)
            .ok_or_else(overflow)?;

        let index_length = match self.grid_type {
            GridType::Unionized => points.checked_mul(self.n_isotopes),
            GridType::Hash => self.hash_bins.checked_mul(self.n_isotopes),
            GridType::None => Some(0),
        };

        index_length.map(|_| ()).ok_or_else(overflow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_type_names() {
        assert_eq!("Unionized".parse::<GridType>().unwrap(), GridType::Unionized);
        assert_eq!("hash".parse::<GridType>().unwrap(), GridType::Hash);
        assert_eq!("nuclide".parse::<GridType>().unwrap(), GridType::None);
        assert!("double".parse::<GridType>().is_err());

        assert_eq!(GridType::Hash.to_string(), "hash");
    }

    #[test]
    fn partial_config_takes_defaults() {
        let params: SimulationParameters =
            serde_json::from_str(r#"{"n_isotopes": 68, "grid_type": "hash"}"#).unwrap();

        assert_eq!(params.n_isotopes, 68);
        assert_eq!(params.grid_type, GridType::Hash);
        assert_eq!(params.n_gridpoints, 11303);
        assert_eq!(params.hash_bins, 10000);
    }

    #[test]
    fn rejects_invalid_dimensions() {
        let base = SimulationParameters::small();

        let no_isotopes = SimulationParameters {
            n_isotopes: 0,
            ..base.clone()
        };
        assert!(matches!(
            no_isotopes.validate(),
            Err(Error::InvalidConfiguration(_))
        ));

        let one_point = SimulationParameters {
            n_gridpoints: 1,
            ..base.clone()
        };
        assert!(one_point.validate().is_err());

        let no_bins = SimulationParameters {
            grid_type: GridType::Hash,
            hash_bins: 0,
            ..base.clone()
        };
        assert!(no_bins.validate().is_err());

        // bins only matter for the hash grid
        let unused_bins = SimulationParameters {
            grid_type: GridType::None,
            hash_bins: 0,
            ..base.clone()
        };
        assert!(unused_bins.validate().is_ok());

        let huge = SimulationParameters {
            n_isotopes: usize::MAX / 2,
            n_gridpoints: 4,
            ..base
        };
        assert!(huge.validate().is_err());
    }
}
