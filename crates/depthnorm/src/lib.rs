#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error type for the composed transforms.
pub mod error;

/// Clip and resize transforms for depth images.
pub mod preprocess;

/// Image and label normalization pipelines.
pub mod normalize;

/// Paired depth image and label samples.
pub mod sample;

pub use crate::error::DepthNormError;

#[doc(inline)]
pub use depthnorm_image as image;

#[doc(inline)]
pub use depthnorm_imgproc as imgproc;

#[doc(inline)]
pub use depthnorm_3d as k3d;
