/// An error type for the image module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ImageError {
    /// Error when the data length does not match the image size.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidChannelShape(usize, usize),

    /// Error when an operation receives images of incompatible sizes.
    #[error("Invalid image size ({0}, {1}), expected ({2}, {3})")]
    InvalidImageSize(usize, usize, usize, usize),

    /// Error when the image has no pixels to operate on.
    #[error("Image is empty ({0}x{1})")]
    EmptyImage(usize, usize),

    /// Error when the pixel index is out of bounds.
    #[error("Pixel index ({0}, {1}) out of bounds ({2}, {3})")]
    PixelIndexOutOfBounds(usize, usize, usize, usize),

    /// Error when a depth interval is empty or inverted.
    #[error("Invalid depth range [{0}, {1}]")]
    InvalidDepthRange(f32, f32),

    /// Error reported by the resampling backend.
    #[error("Failed to resize image: {0}")]
    ResizeError(String),
}
