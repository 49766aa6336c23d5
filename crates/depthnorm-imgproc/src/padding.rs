use depthnorm_image::{Image, ImageError, ImageSize};
use rayon::prelude::*;

/// Represents 2D padding with top, bottom, left, and right values (in pixels).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Padding2D {
    /// Amount of padding to add on the top side.
    pub top: usize,
    /// Amount of padding to add on the bottom side.
    pub bottom: usize,
    /// Amount of padding to add on the left side.
    pub left: usize,
    /// Amount of padding to add on the right side.
    pub right: usize,
}

impl Padding2D {
    /// Whether the padding adds no pixel on any side.
    pub fn is_zero(&self) -> bool {
        *self == Padding2D::default()
    }

    /// The size of an image of `size` once this padding is applied.
    ///
    /// # Example
    /// ```rust
    /// use depthnorm_image::ImageSize;
    /// use depthnorm_imgproc::padding::Padding2D;
    ///
    /// let padding = Padding2D { top: 1, bottom: 1, left: 2, right: 2 };
    /// let padded = padding.padded_size(ImageSize { width: 4, height: 4 });
    ///
    /// assert_eq!(padded, ImageSize { width: 8, height: 6 });
    /// ```
    pub fn padded_size(&self, size: ImageSize) -> ImageSize {
        ImageSize {
            width: size.width + self.left + self.right,
            height: size.height + self.top + self.bottom,
        }
    }
}

/// Index into a source axis of `len` pixels for padded index `i`, clamped to the edge.
#[inline]
fn clamp_to_edge(i: usize, offset: usize, len: usize) -> usize {
    i.saturating_sub(offset).min(len - 1)
}

/// Pads an image on each side by repeating its outermost rows and columns.
///
/// # Arguments
///
/// * `src` - The source image to pad.
/// * `dst` - The destination image, of size `padding.padded_size(src.size())`.
/// * `padding` - The amount of padding (in pixels) for all four sides.
///
/// # Errors
///
/// Returns an error if the size of `dst` does not match the padded size of `src`, or if an
/// empty image is asked to grow.
///
/// # Example
///
/// ```rust
/// use depthnorm_image::{Image, ImageSize};
/// use depthnorm_imgproc::padding::{spatial_padding, Padding2D};
///
/// let src = Image::<f32, 1>::new(ImageSize { width: 2, height: 1 }, vec![1.0, 2.0]).unwrap();
/// let padding = Padding2D { top: 0, bottom: 0, left: 1, right: 2 };
///
/// let mut dst = Image::<f32, 1>::from_size_val(padding.padded_size(src.size()), 0.0).unwrap();
///
/// spatial_padding(&src, &mut dst, padding).unwrap();
///
/// assert_eq!(dst.as_slice(), &[1.0, 1.0, 2.0, 2.0, 2.0]);
/// ```
pub fn spatial_padding<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    padding: Padding2D,
) -> Result<(), ImageError>
where
    T: Copy + Send + Sync,
{
    let expected = padding.padded_size(src.size());
    if dst.size() != expected {
        return Err(ImageError::InvalidImageSize(
            dst.width(),
            dst.height(),
            expected.width,
            expected.height,
        ));
    }

    if src.size().is_empty() {
        if padding.is_zero() {
            return Ok(());
        }
        return Err(ImageError::EmptyImage(src.width(), src.height()));
    }

    let (src_cols, src_rows) = (src.cols(), src.rows());
    let src_stride = src_cols * C;
    let src_data = src.as_slice();

    let center_start = padding.left * C;
    let center_end = center_start + src_stride;

    dst.as_slice_mut()
        .par_chunks_exact_mut(expected.width * C)
        .enumerate()
        .for_each(|(y, dst_row)| {
            let src_y = clamp_to_edge(y, padding.top, src_rows);
            let src_row = &src_data[src_y * src_stride..(src_y + 1) * src_stride];

            let first = &src_row[..C];
            let last = &src_row[src_stride - C..];

            let (left, rest) = dst_row.split_at_mut(center_start);
            let (center, right) = rest.split_at_mut(center_end - center_start);

            center.copy_from_slice(src_row);
            left.chunks_exact_mut(C)
                .for_each(|pixel| pixel.copy_from_slice(first));
            right
                .chunks_exact_mut(C)
                .for_each(|pixel| pixel.copy_from_slice(last));
        });

    Ok(())
}
