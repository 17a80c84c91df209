//! Result and Error types for xstools-grid

use std::collections::TryReserveError;

/// Type alias for `Result<T, grid::Error>`
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for `xstools-grid`
///
/// Both variants are fatal to construction. Nothing partially built is
/// returned alongside them.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Storage for one of the arrays could not be reserved
    #[error("failed to allocate {elements} elements for the {structure}")]
    AllocationFailure {
        structure: &'static str,
        elements: usize,
        #[source]
        source: TryReserveError,
    },

    /// Parameters that can not describe a valid set of grids
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}
