use depthnorm_3d::bbox::{bounding_box, BoundingBox};
use depthnorm_3d::label::Label;
use depthnorm_image::{Image, ImageDtype};

use crate::error::DepthNormError;
use crate::normalize::{normalize_image, normalize_label, TargetSize};

/// A depth image paired with the joint label annotating it.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample<T> {
    /// The depth image.
    pub image: Image<T, 1>,
    /// The label points, in the image's (pixel x, pixel y, depth) frame.
    pub label: Label,
}

impl<T> Sample<T>
where
    T: ImageDtype,
{
    /// Create a new sample.
    pub fn new(image: Image<T, 1>, label: Label) -> Self {
        Self { image, label }
    }

    /// Normalize the image and the label with the same box and target size.
    ///
    /// # Example
    ///
    /// ```
    /// use depthnorm::image::{Image, ImageSize};
    /// use depthnorm::k3d::{bbox::BoundingBox, label::Label};
    /// use depthnorm::normalize::TargetSize;
    /// use depthnorm::sample::Sample;
    ///
    /// let image = Image::<u16, 1>::from_size_val(ImageSize { width: 64, height: 48 }, 700).unwrap();
    /// let label = Label::new(vec![[32.0, 24.0, 700.0]]);
    /// let sample = Sample::new(image, label);
    ///
    /// let bounds = BoundingBox::new([16.0, 8.0, 600.0], [48.0, 40.0, 800.0]).unwrap();
    /// let normalized = sample.normalize(&bounds, &TargetSize::new(64, 64, 1.0)).unwrap();
    ///
    /// assert_eq!(normalized.label.points(), &[[32.0, 32.0, 0.0]]);
    /// ```
    pub fn normalize(
        &self,
        bounds: &BoundingBox,
        size: &TargetSize,
    ) -> Result<Sample<f32>, DepthNormError> {
        Ok(Sample {
            image: normalize_image(&self.image, bounds, size)?,
            label: normalize_label(&self.label, bounds, size)?,
        })
    }

    /// Normalize the sample inside a cube of `cube_size` depth units around `center`.
    ///
    /// The box is built with [`bounding_box`] from the focal length `fx`, and returned with
    /// the normalized sample so predictions can be mapped back later.
    pub fn normalize_around(
        &self,
        center: &[f32; 3],
        cube_size: f32,
        fx: f32,
        size: &TargetSize,
    ) -> Result<(Sample<f32>, BoundingBox), DepthNormError> {
        let bounds = bounding_box(center, cube_size, fx)?;
        let normalized = self.normalize(&bounds, size)?;

        log::debug!(
            "normalized {} points around {:?} into {:?}",
            self.label.len(),
            center,
            bounds
        );

        Ok((normalized, bounds))
    }
}
