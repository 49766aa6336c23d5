//! Normalization of depth crops and their labels into a fixed network input frame.
//!
//! A sample is cut to a [`BoundingBox`] and then resampled to a [`TargetSize`]. Images and
//! labels go through the same two steps so that a label point keeps pointing at the same
//! pixel and depth:
//!
//! * x and y are measured from the box min corner, then scaled by `width / extent.x` and
//!   `height / extent.y`.
//! * depth is measured from the box depth midpoint, then scaled by `depth / extent.z`.

use depthnorm_3d::bbox::BoundingBox;
use depthnorm_3d::label::{clip_label, resize_label, unclip_label, Label};
use depthnorm_image::{Image, ImageDtype, ImageSize};
use serde::{Deserialize, Serialize};

use crate::error::DepthNormError;
use crate::preprocess::{clip_image, resize_image};

/// The resolution and depth scale of a normalized sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetSize {
    /// Output width in pixels.
    pub width: usize,
    /// Output height in pixels.
    pub height: usize,
    /// Factor applied to normalized depth, which spans `[-0.5, 0.5]` before scaling.
    pub depth: f32,
}

impl TargetSize {
    /// Create a new target size.
    pub fn new(width: usize, height: usize, depth: f32) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    /// The spatial part of the target size.
    pub fn image_size(&self) -> ImageSize {
        ImageSize {
            width: self.width,
            height: self.height,
        }
    }

    /// The target extent on each label axis.
    pub fn extent(&self) -> [f32; 3] {
        [self.width as f32, self.height as f32, self.depth]
    }
}

/// Crop a depth image to `bounds`, normalize its depth and resample it to `size`.
///
/// # Example
///
/// ```
/// use depthnorm::image::{Image, ImageSize};
/// use depthnorm::k3d::bbox::bounding_box;
/// use depthnorm::normalize::{normalize_image, TargetSize};
///
/// let image = Image::<u16, 1>::from_size_val(ImageSize { width: 640, height: 480 }, 650).unwrap();
/// let bounds = bounding_box(&[320.0, 240.0, 600.0], 150.0, 588.0).unwrap();
///
/// let normalized = normalize_image(&image, &bounds, &TargetSize::new(128, 128, 1.0)).unwrap();
///
/// assert_eq!(normalized.size(), ImageSize { width: 128, height: 128 });
/// ```
pub fn normalize_image<T>(
    image: &Image<T, 1>,
    bounds: &BoundingBox,
    size: &TargetSize,
) -> Result<Image<f32, 1>, DepthNormError>
where
    T: ImageDtype,
{
    let clipped = clip_image(image, bounds)?;
    resize_image(&clipped, size)
}

/// Move label points into the frame produced by [`normalize_image`] with the same arguments.
///
/// The points are first expressed relative to the box, then rescaled from the box extent
/// to `size`.
pub fn normalize_label(
    label: &Label,
    bounds: &BoundingBox,
    size: &TargetSize,
) -> Result<Label, DepthNormError> {
    let clipped = clip_label(label, bounds)?;
    Ok(resize_label(&clipped, bounds.extent(), size.extent())?)
}

/// Map points from the normalized frame back to image space.
///
/// This is the inverse of [`normalize_label`] and turns network predictions back into
/// (pixel x, pixel y, depth) coordinates.
///
/// # Errors
///
/// Returns an error if `size` has a zero axis or the box is malformed.
pub fn denormalize_label(
    label: &Label,
    bounds: &BoundingBox,
    size: &TargetSize,
) -> Result<Label, DepthNormError> {
    let resized = resize_label(label, size.extent(), bounds.extent())?;
    Ok(unclip_label(&resized, bounds)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use depthnorm_3d::bbox::bounding_box;

    #[test]
    fn normalize_label_box_corners() -> Result<(), DepthNormError> {
        let bounds = BoundingBox::new([100.0, 60.0, 500.0], [164.0, 124.0, 700.0])?;
        let size = TargetSize::new(128, 128, 2.0);
        let label = Label::new(vec![bounds.min, bounds.max]);

        let normalized = normalize_label(&label, &bounds, &size)?;

        let expected: [[f32; 3]; 2] = [[0.0, 0.0, -1.0], [128.0, 128.0, 1.0]];
        for (a, b) in normalized.points().iter().zip(expected.iter()) {
            for k in 0..3 {
                assert_relative_eq!(a[k], b[k], epsilon = 1e-5);
            }
        }

        Ok(())
    }

    #[test]
    fn denormalize_label_roundtrip() -> Result<(), DepthNormError> {
        let bounds = bounding_box(&[300.0, 220.0, 800.0], 150.0, 588.0)?;
        let size = TargetSize::new(96, 96, 1.0);
        let label = Label::new(vec![[290.0, 230.0, 780.0], [310.5, 201.25, 840.0]]);

        let restored = denormalize_label(&normalize_label(&label, &bounds, &size)?, &bounds, &size)?;

        for (a, b) in restored.points().iter().zip(label.points()) {
            for k in 0..3 {
                assert_relative_eq!(a[k], b[k], epsilon = 1e-3);
            }
        }

        Ok(())
    }

    #[test]
    fn normalize_label_zero_extent() -> Result<(), DepthNormError> {
        let bounds = BoundingBox::new([0.0, 0.0, 0.0], [10.0, 0.0, 10.0])?;
        let label = Label::new(vec![[1.0, 1.0, 1.0]]);

        assert_eq!(
            normalize_label(&label, &bounds, &TargetSize::new(8, 8, 1.0)),
            Err(DepthNormError::Geometry(depthnorm_3d::Error::ZeroScale {
                axis: 1
            }))
        );

        Ok(())
    }

    #[test]
    fn normalize_image_depth_scale() -> Result<(), DepthNormError> {
        let image = Image::<f32, 1>::from_size_val(
            ImageSize {
                width: 32,
                height: 24,
            },
            550.0,
        )?;
        let bounds = BoundingBox::new([4.0, 2.0, 500.0], [20.0, 18.0, 700.0])?;
        let size = TargetSize::new(8, 8, 3.0);

        let normalized = normalize_image(&image, &bounds, &size)?;

        // (550 - 600) / 200 * 3
        for &v in normalized.as_slice() {
            assert_relative_eq!(v, -0.75, epsilon = 1e-5);
        }

        Ok(())
    }

    #[test]
    fn target_size_serde() -> Result<(), Box<dyn std::error::Error>> {
        let size: TargetSize =
            serde_json::from_str(r#"{"width": 128, "height": 96, "depth": 1.0}"#)?;
        assert_eq!(size, TargetSize::new(128, 96, 1.0));
        assert_eq!(size.extent(), [128.0, 96.0, 1.0]);

        Ok(())
    }
}
