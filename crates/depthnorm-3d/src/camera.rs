use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Field of view based intrinsics of a depth camera.
///
/// Pixel coordinates are normalized to `[-0.5, 0.5]` by the image size, then multiplied by
/// the depth and a per axis field of view factor (`2 * tan(fov / 2)`) to get camera space
/// coordinates. Camera y points up while pixel rows grow downward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraIntrinsics {
    /// Width of the depth image in pixels.
    pub width: u32,
    /// Height of the depth image in pixels.
    pub height: u32,
    /// Horizontal field of view factor.
    pub scale_x: f32,
    /// Vertical field of view factor.
    pub scale_y: f32,
}

impl Default for CameraIntrinsics {
    /// The 640x480 structured light sensor the hand datasets were recorded with.
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            scale_x: 1.088_367_1,
            scale_y: 0.817_612_65,
        }
    }
}

impl CameraIntrinsics {
    /// Create new intrinsics.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIntrinsics`] if the image size is zero or a scale is not a
    /// positive finite number.
    pub fn new(width: u32, height: u32, scale_x: f32, scale_y: f32) -> Result<Self, Error> {
        let intrinsics = Self {
            width,
            height,
            scale_x,
            scale_y,
        };
        intrinsics.validate()?;
        Ok(intrinsics)
    }

    /// Check that the intrinsics describe a usable camera.
    pub fn validate(&self) -> Result<(), Error> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidIntrinsics(format!(
                "image size must be non zero, got {}x{}",
                self.width, self.height
            )));
        }
        for (name, scale) in [("scale_x", self.scale_x), ("scale_y", self.scale_y)] {
            if !(scale.is_finite() && scale > 0.0) {
                return Err(Error::InvalidIntrinsics(format!(
                    "{name} must be positive, got {scale}"
                )));
            }
        }
        Ok(())
    }

    /// Unproject one (u, v, d) point to camera space.
    #[inline]
    pub fn unproject(&self, uvd: &[f32; 3]) -> [f32; 3] {
        let [u, v, d] = *uvd;
        let normalized_x = u / self.width as f32 - 0.5;
        let normalized_y = 0.5 - v / self.height as f32;

        [
            normalized_x * d * self.scale_x,
            normalized_y * d * self.scale_y,
            d,
        ]
    }

    /// Project one camera space point to (u, v, d).
    ///
    /// Returns `None` if the point has zero depth.
    #[inline]
    pub fn project(&self, xyz: &[f32; 3]) -> Option<[f32; 3]> {
        let [x, y, z] = *xyz;
        if z == 0.0 {
            return None;
        }

        let normalized_x = x / (z * self.scale_x);
        let normalized_y = y / (z * self.scale_y);

        Some([
            (normalized_x + 0.5) * self.width as f32,
            (0.5 - normalized_y) * self.height as f32,
            z,
        ])
    }
}

/// Convert (u, v, d) pixel and depth triples to camera space (x, y, z) coordinates.
///
/// # Arguments
///
/// * `uvd` - The points as (pixel column, pixel row, depth).
/// * `intrinsics` - The camera the points were captured with.
///
/// # Example
///
/// ```
/// use depthnorm_3d::camera::{uvd_to_xyz, CameraIntrinsics};
///
/// let xyz = uvd_to_xyz(&[[320.0, 240.0, 500.0]], &CameraIntrinsics::default()).unwrap();
///
/// assert_eq!(xyz, vec![[0.0, 0.0, 500.0]]);
/// ```
pub fn uvd_to_xyz(uvd: &[[f32; 3]], intrinsics: &CameraIntrinsics) -> Result<Vec<[f32; 3]>, Error> {
    intrinsics.validate()?;
    Ok(uvd.iter().map(|p| intrinsics.unproject(p)).collect())
}

/// Convert camera space (x, y, z) points to (u, v, d) pixel and depth triples.
///
/// # Errors
///
/// Returns [`Error::ZeroDepth`] with the index of the first point lying on the camera plane.
pub fn xyz_to_uvd(xyz: &[[f32; 3]], intrinsics: &CameraIntrinsics) -> Result<Vec<[f32; 3]>, Error> {
    intrinsics.validate()?;
    xyz.iter()
        .enumerate()
        .map(|(i, p)| intrinsics.project(p).ok_or(Error::ZeroDepth(i)))
        .collect()
}
