use depthnorm_image::ImageError;

/// An error type for the depth normalization transforms.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum DepthNormError {
    /// Error raised by an image operation.
    #[error(transparent)]
    Image(#[from] ImageError),

    /// Error raised by a bounding box, label or camera operation.
    #[error(transparent)]
    Geometry(#[from] depthnorm_3d::Error),

    /// Error when a box covers more pixels than a crop may allocate.
    #[error("bounding box {min:?}..{max:?} covers too many pixels to crop")]
    WindowTooLarge {
        /// The min corner of the box.
        min: [f32; 3],
        /// The max corner of the box.
        max: [f32; 3],
    },
}
