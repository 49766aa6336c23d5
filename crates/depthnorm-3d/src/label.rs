use serde::{Deserialize, Serialize};

use crate::bbox::BoundingBox;
use crate::error::Error;

/// An ordered set of 3D joint or landmark coordinates.
///
/// The points share the coordinate frame of the depth image they annotate: pixel x, pixel y
/// and depth.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Label {
    points: Vec<[f32; 3]>,
}

impl Label {
    /// Create a new label from its points.
    pub fn new(points: Vec<[f32; 3]>) -> Self {
        Self { points }
    }

    /// Get the number of points in the label.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the label is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Get as reference the points of the label.
    pub fn points(&self) -> &[[f32; 3]] {
        &self.points
    }

    /// Consume the label and return its points.
    pub fn into_points(self) -> Vec<[f32; 3]> {
        self.points
    }

    /// Apply `f` to every point, returning a new label.
    pub fn map(&self, f: impl Fn(&[f32; 3]) -> [f32; 3]) -> Self {
        Self {
            points: self.points.iter().map(f).collect(),
        }
    }
}

impl From<Vec<[f32; 3]>> for Label {
    fn from(points: Vec<[f32; 3]>) -> Self {
        Self::new(points)
    }
}

/// Move label points into the frame of the image cropped to `bbox`.
///
/// x and y become offsets from the box's min corner, matching the pixel origin of the
/// cropped image. z becomes an offset from the box's depth midpoint, the same zero as the
/// normalized image depth.
///
/// # Errors
///
/// Returns [`Error::InvalidBoundingBox`] if the box is malformed.
///
/// # Example
///
/// ```
/// use depthnorm_3d::bbox::BoundingBox;
/// use depthnorm_3d::label::{clip_label, Label};
///
/// let bbox = BoundingBox::new([100.0, 50.0, 500.0], [164.0, 114.0, 700.0]).unwrap();
/// let label = Label::new(vec![[100.0, 50.0, 500.0], [132.0, 82.0, 600.0]]);
///
/// let clipped = clip_label(&label, &bbox).unwrap();
///
/// assert_eq!(clipped.points(), &[[0.0, 0.0, -100.0], [32.0, 32.0, 0.0]]);
/// ```
pub fn clip_label(label: &Label, bbox: &BoundingBox) -> Result<Label, Error> {
    bbox.validate()?;

    let [x0, y0, _] = bbox.min;
    let z0 = bbox.depth_midpoint();

    Ok(label.map(|&[x, y, z]| [x - x0, y - y0, z - z0]))
}

/// Inverse of [`clip_label`]: move points from the cropped frame back to image space.
pub fn unclip_label(label: &Label, bbox: &BoundingBox) -> Result<Label, Error> {
    bbox.validate()?;

    let [x0, y0, _] = bbox.min;
    let z0 = bbox.depth_midpoint();

    Ok(label.map(|&[x, y, z]| [x + x0, y + y0, z + z0]))
}

/// Scale label points by `new_size / old_size` on each axis.
///
/// # Arguments
///
/// * `label` - The label to rescale.
/// * `old_size` - The extent of the frame the points are expressed in.
/// * `new_size` - The extent of the target frame.
///
/// # Errors
///
/// Returns [`Error::ZeroScale`] if an axis of `old_size` is zero.
///
/// # Example
///
/// ```
/// use depthnorm_3d::label::{resize_label, Label};
///
/// let label = Label::new(vec![[32.0, 16.0, -50.0]]);
///
/// let resized = resize_label(&label, [64.0, 64.0, 200.0], [128.0, 128.0, 1.0]).unwrap();
///
/// assert_eq!(resized.points(), &[[64.0, 32.0, -0.25]]);
/// ```
pub fn resize_label(label: &Label, old_size: [f32; 3], new_size: [f32; 3]) -> Result<Label, Error> {
    if let Some(axis) = old_size.iter().position(|&s| s == 0.0) {
        return Err(Error::ZeroScale { axis });
    }

    let scale = [
        new_size[0] / old_size[0],
        new_size[1] / old_size[1],
        new_size[2] / old_size[2],
    ];

    Ok(label.map(|&[x, y, z]| [x * scale[0], y * scale[1], z * scale[2]]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn clip_label_min_corner() -> Result<(), Error> {
        let bbox = BoundingBox::new([-10.0, 20.0, 300.0], [50.0, 80.0, 450.0])?;
        let label = Label::new(vec![bbox.min]);

        let clipped = clip_label(&label, &bbox)?;

        assert_eq!(clipped.points(), &[[0.0, 0.0, -75.0]]);

        Ok(())
    }

    #[test]
    fn clip_label_keeps_input() -> Result<(), Error> {
        let bbox = BoundingBox::new([0.0, 0.0, 0.0], [10.0, 10.0, 10.0])?;
        let label = Label::new(vec![[1.0, 2.0, 3.0]]);

        let clipped = clip_label(&label, &bbox)?;

        assert_eq!(label.points(), &[[1.0, 2.0, 3.0]]);
        assert_eq!(clipped.points(), &[[1.0, 2.0, -2.0]]);

        Ok(())
    }

    #[test]
    fn unclip_label_inverts_clip() -> Result<(), Error> {
        let bbox = BoundingBox::new([12.5, 40.0, 610.0], [140.5, 168.0, 760.0])?;
        let label = Label::new(vec![[20.0, 60.0, 650.0], [130.0, 150.0, 700.0]]);

        let restored = unclip_label(&clip_label(&label, &bbox)?, &bbox)?;

        for (a, b) in restored.points().iter().zip(label.points()) {
            for k in 0..3 {
                assert_relative_eq!(a[k], b[k], epsilon = 1e-4);
            }
        }

        Ok(())
    }

    #[test]
    fn clip_label_invalid_box() {
        let bbox = BoundingBox {
            min: [0.0, 0.0, 10.0],
            max: [1.0, 1.0, 5.0],
        };
        let label = Label::new(vec![[0.0; 3]]);

        assert_eq!(
            clip_label(&label, &bbox),
            Err(Error::InvalidBoundingBox {
                axis: 2,
                min: 10.0,
                max: 5.0
            })
        );
    }

    #[test]
    fn resize_label_inverse() -> Result<(), Error> {
        let label = Label::new(vec![[3.0, -7.5, 0.125], [64.0, 12.0, -0.4]]);
        let a = [150.0, 120.0, 200.0];
        let b = [128.0, 96.0, 1.0];

        let restored = resize_label(&resize_label(&label, a, b)?, b, a)?;

        for (p, q) in restored.points().iter().zip(label.points()) {
            for k in 0..3 {
                assert_relative_eq!(p[k], q[k], epsilon = 1e-5);
            }
        }

        Ok(())
    }

    #[test]
    fn resize_label_zero_scale() {
        let label = Label::new(vec![[1.0, 1.0, 1.0]]);
        assert_eq!(
            resize_label(&label, [1.0, 0.0, 1.0], [1.0, 1.0, 1.0]),
            Err(Error::ZeroScale { axis: 1 })
        );
    }

    #[test]
    fn label_serde() -> Result<(), Box<dyn std::error::Error>> {
        let label: Label = serde_json::from_str("[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]")?;
        assert_eq!(label.len(), 2);
        assert_eq!(label.points()[1], [4.0, 5.0, 6.0]);

        Ok(())
    }
}
