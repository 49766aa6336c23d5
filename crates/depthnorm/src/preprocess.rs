use depthnorm_3d::bbox::{BoundingBox, PixelWindow};
use depthnorm_image::{Image, ImageDtype, ImageSize};
use depthnorm_imgproc::{
    crop::crop_image,
    depth::{clip_depth, normalize_depth_range, scale_depth},
    padding::{spatial_padding, Padding2D},
    resize::resize_fast,
};

use crate::error::DepthNormError;
use crate::normalize::TargetSize;

/// Largest number of pixels the padded image behind a crop window may hold.
pub const MAX_WINDOW_PIXELS: u64 = 1 << 28;

/// Padding needed on each side for `window` to fit in an image of `size`.
///
/// Returns `None` if the padded image would not fit in [`MAX_WINDOW_PIXELS`].
fn window_padding(window: &PixelWindow, size: ImageSize) -> Option<Padding2D> {
    // (low, high, padded length) along one axis
    let axis = |start: i64, end: i64, len: usize| -> Option<(usize, usize, u64)> {
        let len = i64::try_from(len).ok()?;
        let low = start.min(0).checked_neg()?;
        let high = end.checked_sub(len)?.max(0);
        let total = low.checked_add(len)?.checked_add(high)?;
        Some((usize::try_from(low).ok()?, usize::try_from(high).ok()?, total as u64))
    };

    let (left, right, padded_width) = axis(window.x0, window.x1, size.width)?;
    let (top, bottom, padded_height) = axis(window.y0, window.y1, size.height)?;

    if padded_width.checked_mul(padded_height)? > MAX_WINDOW_PIXELS {
        return None;
    }

    Some(Padding2D {
        top,
        bottom,
        left,
        right,
    })
}

/// Crop a depth image to a bounding box and normalize its depth.
///
/// Depth values are clamped to the box depth interval and mapped onto `[-0.5, 0.5]`, with
/// zero at the interval midpoint. The x/y bounds of the box are truncated to pixel indices;
/// where the box reaches outside the image, the image is first padded by replicating its
/// edge pixels.
///
/// # Arguments
///
/// * `image` - The depth image in pixel coordinates.
/// * `bbox` - The box to crop, in (pixel x, pixel y, depth).
///
/// # Returns
///
/// An image of `trunc(max.x) - trunc(min.x)` by `trunc(max.y) - trunc(min.y)` pixels.
///
/// # Errors
///
/// Returns an error if the box is malformed, its depth interval is empty, it reaches
/// outside an empty image, or the padded image would exceed [`MAX_WINDOW_PIXELS`].
///
/// # Example
///
/// ```
/// use depthnorm::image::{Image, ImageSize};
/// use depthnorm::k3d::bbox::BoundingBox;
/// use depthnorm::preprocess::clip_image;
///
/// #[rustfmt::skip]
/// let image = Image::<u16, 1>::new(ImageSize { width: 3, height: 2 }, vec![
///     400, 500, 600,
///     700, 800, 900,
/// ]).unwrap();
///
/// let bbox = BoundingBox::new([1.0, -1.0, 500.0], [4.0, 1.0, 900.0]).unwrap();
/// let clipped = clip_image(&image, &bbox).unwrap();
///
/// #[rustfmt::skip]
/// assert_eq!(clipped.as_slice(), &[
///     -0.5, -0.25, -0.25,
///     -0.5, -0.25, -0.25,
/// ]);
/// ```
pub fn clip_image<T>(image: &Image<T, 1>, bbox: &BoundingBox) -> Result<Image<f32, 1>, DepthNormError>
where
    T: ImageDtype,
{
    bbox.validate()?;

    let window = bbox.pixel_window();
    let padding = window_padding(&window, image.size()).ok_or(DepthNormError::WindowTooLarge {
        min: bbox.min,
        max: bbox.max,
    })?;

    let (min_depth, max_depth) = bbox.depth_range();

    let mut clipped = Image::from_size_val(image.size(), 0.0)?;
    clip_depth(image, &mut clipped, min_depth, max_depth)?;

    let mut normalized = Image::from_size_val(image.size(), 0.0)?;
    normalize_depth_range(&clipped, &mut normalized, min_depth, max_depth)?;

    let padded = if padding.is_zero() {
        normalized
    } else {
        log::debug!("padding {} for window {:?}", image.size(), padding);
        let mut padded = Image::from_size_val(padding.padded_size(normalized.size()), 0.0)?;
        spatial_padding(&normalized, &mut padded, padding)?;
        padded
    };

    // the low side padding moves the window origin inside the padded image
    let x0 = (window.x0 + padding.left as i64) as usize;
    let y0 = (window.y0 + padding.top as i64) as usize;

    let mut cropped = Image::from_size_val(
        ImageSize {
            width: window.width(),
            height: window.height(),
        },
        0.0,
    )?;
    crop_image(&padded, &mut cropped, x0, y0)?;

    Ok(cropped)
}

/// Rescale the depth of a normalized image and resample it to a target resolution.
///
/// Values are multiplied by `size.depth`, then the image is resampled to
/// `size.width` x `size.height` with antialiased bilinear filtering. Values stay in floating
/// point, so a constant image `v` becomes a constant image `v * size.depth`.
///
/// # Errors
///
/// Returns an error if the image or the target size is empty.
///
/// # Example
///
/// ```
/// use depthnorm::image::{Image, ImageSize};
/// use depthnorm::normalize::TargetSize;
/// use depthnorm::preprocess::resize_image;
///
/// let image = Image::<f32, 1>::from_size_val(ImageSize { width: 37, height: 41 }, 0.25).unwrap();
///
/// let resized = resize_image(&image, &TargetSize::new(96, 96, 2.0)).unwrap();
///
/// assert_eq!(resized.size(), ImageSize { width: 96, height: 96 });
/// assert!(resized.as_slice().iter().all(|v| (v - 0.5).abs() < 1e-5));
/// ```
pub fn resize_image(image: &Image<f32, 1>, size: &TargetSize) -> Result<Image<f32, 1>, DepthNormError> {
    let mut scaled = Image::from_size_val(image.size(), 0.0)?;
    scale_depth(image, &mut scaled, size.depth)?;

    let mut resized = Image::from_size_val(size.image_size(), 0.0)?;
    resize_fast(&scaled, &mut resized)?;

    Ok(resized)
}
