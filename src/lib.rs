//! `xstools` builds and queries the synthetic data structures of a Monte Carlo
//! cross section lookup benchmark
//!
#![doc = include_str!("../readme.md")]
#![deny(missing_docs, missing_debug_implementations)]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

// Re-exports of toolkit crates.
#[doc(inline)]
pub use xstools_utils as utils;

#[cfg(feature = "grid")]
#[cfg_attr(docsrs, doc(cfg(feature = "grid")))]
#[doc(inline)]
pub use xstools_grid as grid;
