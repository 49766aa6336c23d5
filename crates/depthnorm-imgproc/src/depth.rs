//! Depth value range operations.
//!
//! A depth map is cut to the depth interval of a region of interest and then mapped onto
//! `[-0.5, 0.5]`, centered on the midpoint of the interval:
//!
//! ```text
//! normalized = (clamp(depth, min, max) - (min + max) / 2) / (max - min)
//! ```

use depthnorm_image::{Image, ImageDtype, ImageError};

use crate::parallel;

fn check_same_size<T1, const C1: usize, T2, const C2: usize>(
    src: &Image<T1, C1>,
    dst: &Image<T2, C2>,
) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }
    Ok(())
}

/// Clamp every depth value of an image to `[min, max]`, converting it to `f32`.
///
/// # Arguments
///
/// * `src` - The input depth image, e.g. raw `u16` millimeters.
/// * `dst` - The output image of the same size.
/// * `min` - The lower bound of the depth interval.
/// * `max` - The upper bound of the depth interval.
///
/// # Errors
///
/// Returns an error if the images differ in size or `min > max`.
///
/// # Example
///
/// ```
/// use depthnorm_image::{Image, ImageSize};
/// use depthnorm_imgproc::depth::clip_depth;
///
/// let image = Image::<u16, 1>::new(ImageSize { width: 3, height: 1 }, vec![0, 700, 2000]).unwrap();
/// let mut clipped = Image::<f32, 1>::from_size_val(image.size(), 0.0).unwrap();
///
/// clip_depth(&image, &mut clipped, 500.0, 900.0).unwrap();
///
/// assert_eq!(clipped.as_slice(), &[500.0, 700.0, 900.0]);
/// ```
pub fn clip_depth<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<f32, C>,
    min: f32,
    max: f32,
) -> Result<(), ImageError>
where
    T: ImageDtype,
{
    check_same_size(src, dst)?;

    if min.is_nan() || max.is_nan() || min > max {
        return Err(ImageError::InvalidDepthRange(min, max));
    }

    parallel::par_iter_rows_val(src, dst, |&src_val, dst_val| {
        let depth: f32 = src_val.into();
        *dst_val = depth.clamp(min, max);
    });

    Ok(())
}

/// Map the depth interval `[min, max]` onto `[-0.5, 0.5]`.
///
/// The midpoint of the interval maps to zero. Values outside the interval map outside
/// `[-0.5, 0.5]`, so clamp them first with [`clip_depth`].
///
/// # Errors
///
/// Returns an error if the images differ in size or the interval has no width.
///
/// # Example
///
/// ```
/// use depthnorm_image::{Image, ImageSize};
/// use depthnorm_imgproc::depth::normalize_depth_range;
///
/// let image = Image::<f32, 1>::new(ImageSize { width: 3, height: 1 }, vec![500.0, 700.0, 900.0]).unwrap();
/// let mut normalized = Image::<f32, 1>::from_size_val(image.size(), 0.0).unwrap();
///
/// normalize_depth_range(&image, &mut normalized, 500.0, 900.0).unwrap();
///
/// assert_eq!(normalized.as_slice(), &[-0.5, 0.0, 0.5]);
/// ```
pub fn normalize_depth_range<const C: usize>(
    src: &Image<f32, C>,
    dst: &mut Image<f32, C>,
    min: f32,
    max: f32,
) -> Result<(), ImageError> {
    check_same_size(src, dst)?;

    let range = max - min;
    if range <= 0.0 || !range.is_finite() {
        return Err(ImageError::InvalidDepthRange(min, max));
    }

    let midpoint = (max + min) / 2.0;

    parallel::par_iter_rows_val(src, dst, |&src_val, dst_val| {
        *dst_val = (src_val - midpoint) / range;
    });

    Ok(())
}

/// Multiply every value of an image by `scale`.
pub fn scale_depth<const C: usize>(
    src: &Image<f32, C>,
    dst: &mut Image<f32, C>,
    scale: f32,
) -> Result<(), ImageError> {
    check_same_size(src, dst)?;

    parallel::par_iter_rows_val(src, dst, |&src_val, dst_val| {
        *dst_val = src_val * scale;
    });

    Ok(())
}
