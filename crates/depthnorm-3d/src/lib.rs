#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Axis aligned boxes in pixel and depth space.
pub mod bbox;

/// Camera models to move between pixel and camera space.
pub mod camera;

/// Error types for the 3d module.
pub mod error;

/// Joint labels and their normalization transforms.
pub mod label;

pub use crate::error::Error;
