use serde::{Deserialize, Serialize};

use crate::error::Error;

/// An axis aligned cuboid in (pixel x, pixel y, depth) space.
///
/// `min` is the corner with the smallest coordinates and `max` the opposite one. The x and y
/// axes are measured in pixels of the depth image, the z axis in depth units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// The minimum corner (x_min, y_min, z_min).
    pub min: [f32; 3],
    /// The maximum corner (x_max, y_max, z_max).
    pub max: [f32; 3],
}

/// The integer pixel window covered by a [`BoundingBox`].
///
/// Bounds are half open, `[x0, x1) x [y0, y1)`, and may fall outside the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelWindow {
    /// First column.
    pub x0: i64,
    /// First row.
    pub y0: i64,
    /// One past the last column.
    pub x1: i64,
    /// One past the last row.
    pub y1: i64,
}

impl PixelWindow {
    /// Number of columns in the window.
    pub fn width(&self) -> usize {
        self.x1.saturating_sub(self.x0).max(0) as usize
    }

    /// Number of rows in the window.
    pub fn height(&self) -> usize {
        self.y1.saturating_sub(self.y0).max(0) as usize
    }
}

impl BoundingBox {
    /// Create a new bounding box from its two corners.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBoundingBox`] if a coordinate is not finite or `max < min` on
    /// any axis.
    ///
    /// # Example
    ///
    /// ```
    /// use depthnorm_3d::bbox::BoundingBox;
    ///
    /// let bbox = BoundingBox::new([10.0, 20.0, 500.0], [74.0, 84.0, 650.0]).unwrap();
    /// assert_eq!(bbox.extent(), [64.0, 64.0, 150.0]);
    ///
    /// assert!(BoundingBox::new([10.0, 20.0, 500.0], [0.0, 84.0, 650.0]).is_err());
    /// ```
    pub fn new(min: [f32; 3], max: [f32; 3]) -> Result<Self, Error> {
        let bbox = Self { min, max };
        bbox.validate()?;
        Ok(bbox)
    }

    /// Check that every coordinate is finite and `min <= max` on every axis.
    pub fn validate(&self) -> Result<(), Error> {
        for axis in 0..3 {
            let (min, max) = (self.min[axis], self.max[axis]);
            if !min.is_finite() || !max.is_finite() || max < min {
                return Err(Error::InvalidBoundingBox { axis, min, max });
            }
        }
        Ok(())
    }

    /// The size of the box along each axis, `max - min`.
    pub fn extent(&self) -> [f32; 3] {
        [
            self.max[0] - self.min[0],
            self.max[1] - self.min[1],
            self.max[2] - self.min[2],
        ]
    }

    /// The depth interval `(z_min, z_max)` of the box.
    pub fn depth_range(&self) -> (f32, f32) {
        (self.min[2], self.max[2])
    }

    /// The depth in the middle of the box, the zero of normalized depth.
    pub fn depth_midpoint(&self) -> f32 {
        (self.min[2] + self.max[2]) / 2.0
    }

    /// The x/y bounds of the box as pixel indices, truncated toward zero.
    pub fn pixel_window(&self) -> PixelWindow {
        PixelWindow {
            x0: self.min[0] as i64,
            y0: self.min[1] as i64,
            x1: self.max[0] as i64,
            y1: self.max[1] as i64,
        }
    }
}

/// Compute the box enclosing a physical cube centered on a point.
///
/// The cube `[-size / 2, size / 2]^3` is placed at the center depth. Its x and y extents are
/// projected to pixels with the pinhole factor `fx / center.z`, while the z extent stays in
/// depth units. The result is then translated by `center`.
///
/// # Arguments
///
/// * `center` - The cube center as (pixel x, pixel y, depth).
/// * `size` - The edge length of the cube in depth units.
/// * `fx` - The focal length of the camera in pixels.
///
/// # Errors
///
/// Returns an error if `size`, `fx` or the center depth is not a positive finite number.
///
/// # Example
///
/// ```
/// use depthnorm_3d::bbox::bounding_box;
///
/// let bbox = bounding_box(&[320.0, 240.0, 600.0], 150.0, 588.0).unwrap();
///
/// assert_eq!(bbox.min[2], 525.0);
/// assert_eq!(bbox.max[2], 675.0);
/// assert!((bbox.extent()[0] - 147.0).abs() < 1e-3);
/// ```
pub fn bounding_box(center: &[f32; 3], size: f32, fx: f32) -> Result<BoundingBox, Error> {
    if !(size.is_finite() && size > 0.0) {
        return Err(Error::InvalidCubeSize(size));
    }
    if !(fx.is_finite() && fx > 0.0) {
        return Err(Error::InvalidFocalLength(fx));
    }
    let depth = center[2];
    if !(depth.is_finite() && depth > 0.0) {
        return Err(Error::NonPositiveDepth(depth));
    }

    let half = 0.5 * size;
    let pixel_half = half * fx / depth;
    let half_extent = [pixel_half, pixel_half, half];

    let mut min = [0.0; 3];
    let mut max = [0.0; 3];
    for axis in 0..3 {
        min[axis] = center[axis] - half_extent[axis];
        max[axis] = center[axis] + half_extent[axis];
    }

    BoundingBox::new(min, max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn bounding_box_projects_xy_only() -> Result<(), Error> {
        let bbox = bounding_box(&[100.0, 50.0, 400.0], 200.0, 400.0)?;

        assert_relative_eq!(bbox.min[0], 0.0);
        assert_relative_eq!(bbox.max[0], 200.0);
        assert_relative_eq!(bbox.min[1], -50.0);
        assert_relative_eq!(bbox.max[1], 150.0);
        assert_relative_eq!(bbox.min[2], 300.0);
        assert_relative_eq!(bbox.max[2], 500.0);

        Ok(())
    }

    #[test]
    fn bounding_box_shrinks_with_depth() -> Result<(), Error> {
        let near = bounding_box(&[320.0, 240.0, 300.0], 150.0, 588.0)?;
        let far = bounding_box(&[320.0, 240.0, 900.0], 150.0, 588.0)?;

        assert!(near.extent()[0] > far.extent()[0]);
        assert_relative_eq!(near.extent()[2], far.extent()[2]);

        for bbox in [near, far] {
            for axis in 0..3 {
                assert!(bbox.max[axis] >= bbox.min[axis]);
            }
        }

        Ok(())
    }

    #[test]
    fn bounding_box_rejects_bad_input() {
        assert_eq!(
            bounding_box(&[0.0, 0.0, 0.0], 150.0, 588.0),
            Err(Error::NonPositiveDepth(0.0))
        );
        assert_eq!(
            bounding_box(&[0.0, 0.0, 500.0], -1.0, 588.0),
            Err(Error::InvalidCubeSize(-1.0))
        );
        assert_eq!(
            bounding_box(&[0.0, 0.0, 500.0], 150.0, 0.0),
            Err(Error::InvalidFocalLength(0.0))
        );
    }

    #[test]
    fn bounding_box_new_validates() {
        assert_eq!(
            BoundingBox::new([0.0, 5.0, 0.0], [1.0, 4.0, 1.0]),
            Err(Error::InvalidBoundingBox {
                axis: 1,
                min: 5.0,
                max: 4.0
            })
        );
        assert!(BoundingBox::new([0.0, 0.0, f32::NAN], [1.0, 1.0, 1.0]).is_err());
        assert!(BoundingBox::new([0.0; 3], [0.0; 3]).is_ok());
    }

    #[test]
    fn pixel_window_truncates() -> Result<(), Error> {
        let bbox = BoundingBox::new([-3.7, 2.9, 0.0], [10.2, 8.99, 1.0])?;
        let window = bbox.pixel_window();

        assert_eq!(
            window,
            PixelWindow {
                x0: -3,
                y0: 2,
                x1: 10,
                y1: 8
            }
        );
        assert_eq!(window.width(), 13);
        assert_eq!(window.height(), 6);

        Ok(())
    }

    #[test]
    fn pixel_window_saturates() -> Result<(), Error> {
        let bbox = BoundingBox::new([-3.0e38, 0.0, 0.0], [3.0e38, 1.0, 1.0])?;
        let window = bbox.pixel_window();

        assert_eq!(window.x0, i64::MIN);
        assert_eq!(window.x1, i64::MAX);
        assert_eq!(window.width(), i64::MAX as usize);
        assert_eq!(window.height(), 1);

        Ok(())
    }

    #[test]
    fn bounding_box_serde() -> Result<(), Box<dyn std::error::Error>> {
        let bbox = BoundingBox::new([1.0, 2.0, 3.0], [4.0, 5.0, 6.0])?;
        let json = serde_json::to_string(&bbox)?;
        assert_eq!(json, r#"{"min":[1.0,2.0,3.0],"max":[4.0,5.0,6.0]}"#);

        let parsed: BoundingBox = serde_json::from_str(&json)?;
        assert_eq!(parsed, bbox);

        Ok(())
    }
}
