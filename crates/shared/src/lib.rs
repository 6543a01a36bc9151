#![warn(missing_docs)]

//! Shared libraries and utilities for mmcai crates

/// Output messages and the trait used to display them
pub mod output;
/// General utilities
pub mod util;
