// internal modules
use crate::error::{Error, Result};

// external crates
use log::debug;

/// Reserve exactly `elements` slots up front, reporting failure as an error
pub(crate) fn reserve<T>(elements: usize, structure: &'static str) -> Result<Vec<T>> {
    let mut array = Vec::new();
    array
        .try_reserve_exact(elements)
        .map_err(|source| Error::AllocationFailure {
            structure,
            elements,
            source,
        })?;

    debug!(
        "Allocated {:.0} MB for the {structure}",
        megabytes(elements * std::mem::size_of::<T>())
    );
    Ok(array)
}

/// Reserve and fill with `value`
pub(crate) fn filled<T: Clone>(elements: usize, value: T, structure: &'static str) -> Result<Vec<T>> {
    let mut array = reserve(elements, structure)?;
    array.resize(elements, value);
    Ok(array)
}

pub(crate) fn megabytes(bytes: usize) -> f64 {
    bytes as f64 / 1024.0 / 1024.0
}
