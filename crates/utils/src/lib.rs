//! Common supporting utilities shared by the xstools crates
//!
//! These are left public for convenience.
//!
//! The seeded generator, the interval searches, and the float comparators are
//! used by every stage of grid construction and by the point queries, so they
//! live here rather than in any one crate.

// Alias for the format! macro
pub use std::format as f;

// Modules
mod lcg;
mod slice_ext;
mod sort_ext;

// Flatten
pub use lcg::{next_double, Lcg, LCG_INCREMENT, LCG_MULTIPLIER};
pub use slice_ext::SliceExt;
pub use sort_ext::SortExt;
