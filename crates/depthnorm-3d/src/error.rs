/// An error type for the 3d module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum Error {
    /// Error when the max corner of a box lies below its min corner, or is not finite.
    #[error("invalid bounding box: max < min on axis {axis} (min {min}, max {max})")]
    InvalidBoundingBox {
        /// The offending axis (0 = x, 1 = y, 2 = depth).
        axis: usize,
        /// The min corner coordinate.
        min: f32,
        /// The max corner coordinate.
        max: f32,
    },

    /// Error when a box is requested around a point with zero or negative depth.
    #[error("center depth must be positive, got {0}")]
    NonPositiveDepth(f32),

    /// Error when the physical cube size is not a positive number.
    #[error("cube size must be positive, got {0}")]
    InvalidCubeSize(f32),

    /// Error when the focal length is not a positive number.
    #[error("focal length must be positive, got {0}")]
    InvalidFocalLength(f32),

    /// Error when rescaling from a zero sized axis.
    #[error("cannot rescale axis {axis} from a zero size")]
    ZeroScale {
        /// The offending axis (0 = x, 1 = y, 2 = depth).
        axis: usize,
    },

    /// Error when projecting a camera space point that lies on the camera plane.
    #[error("point {0} has zero depth and cannot be projected")]
    ZeroDepth(usize),

    /// Error when the camera intrinsics are not usable.
    #[error("invalid camera intrinsics: {0}")]
    InvalidIntrinsics(String),
}
