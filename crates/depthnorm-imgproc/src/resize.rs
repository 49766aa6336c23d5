use depthnorm_image::{Image, ImageError};
use fast_image_resize as fr;

fn check_not_empty<T, const C: usize>(image: &Image<T, C>) -> Result<(), ImageError> {
    if image.size().is_empty() {
        return Err(ImageError::EmptyImage(image.width(), image.height()));
    }
    Ok(())
}

/// Resize a single channel float image using the [fast_image_resize](https://crates.io/crates/fast_image_resize) crate.
///
/// Bilinear resizing is a convolution with a triangle filter whose support grows with the
/// downscaling factor, so shrinking an image averages every covered source pixel. The
/// values stay in `f32` and are never quantized or clamped.
///
/// # Arguments
///
/// * `src` - The input image container.
/// * `dst` - The output image container, holding the target size.
///
/// # Example
///
/// ```
/// use depthnorm_image::{Image, ImageSize};
/// use depthnorm_imgproc::resize::resize_fast;
///
/// let image = Image::<_, 1>::new(
///    ImageSize {
///       width: 4,
///       height: 5,
///    },
///    vec![-0.25f32; 4 * 5],
/// )
/// .unwrap();
///
/// let new_size = ImageSize {
///   width: 8,
///   height: 3,
/// };
///
/// let mut image_resized = Image::<_, 1>::from_size_val(new_size, 0.0).unwrap();
///
/// resize_fast(&image, &mut image_resized).unwrap();
///
/// assert_eq!(image_resized.size(), new_size);
/// assert!(image_resized.as_slice().iter().all(|v| (v + 0.25).abs() < 1e-5));
/// ```
///
/// # Errors
///
/// The function returns an error if either image is empty or the image cannot be resized.
pub fn resize_fast(src: &Image<f32, 1>, dst: &mut Image<f32, 1>) -> Result<(), ImageError> {
    check_not_empty(src)?;
    check_not_empty(dst)?;

    let (src_width, src_height) = (src.width() as u32, src.height() as u32);
    let (dst_width, dst_height) = (dst.width() as u32, dst.height() as u32);

    log::debug!(
        "resizing {}x{} -> {}x{}",
        src_width,
        src_height,
        dst_width,
        dst_height
    );

    let src_image = fr::images::ImageRef::new(
        src_width,
        src_height,
        bytemuck::cast_slice(src.as_slice()),
        fr::PixelType::F32,
    )
    .map_err(|e| ImageError::ResizeError(e.to_string()))?;

    let mut dst_image = fr::images::Image::from_slice_u8(
        dst_width,
        dst_height,
        bytemuck::cast_slice_mut(dst.as_slice_mut()),
        fr::PixelType::F32,
    )
    .map_err(|e| ImageError::ResizeError(e.to_string()))?;

    let resize_alg = fr::ResizeAlg::Convolution(fr::FilterType::Bilinear);

    let mut resizer = fr::Resizer::new();
    resizer
        .resize(
            &src_image,
            &mut dst_image,
            &fr::ResizeOptions::new().resize_alg(resize_alg),
        )
        .map_err(|e| ImageError::ResizeError(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use depthnorm_image::ImageSize;

    #[test]
    fn resize_fast_constant() -> Result<(), ImageError> {
        let image = Image::<_, 1>::from_size_val(
            ImageSize {
                width: 37,
                height: 21,
            },
            0.375f32,
        )?;

        for (width, height) in [(128, 128), (9, 4), (1, 1)] {
            let mut image_resized =
                Image::<_, 1>::from_size_val(ImageSize { width, height }, 0.0)?;
            resize_fast(&image, &mut image_resized)?;

            for &v in image_resized.as_slice() {
                assert_relative_eq!(v, 0.375, epsilon = 1e-5);
            }
        }

        Ok(())
    }

    #[test]
    fn resize_fast_keeps_float_range() -> Result<(), ImageError> {
        let image = Image::<_, 1>::new(
            ImageSize {
                width: 2,
                height: 2,
            },
            vec![-0.5f32, 0.5, 0.5, -0.5],
        )?;

        let mut image_resized = Image::<_, 1>::from_size_val(
            ImageSize {
                width: 4,
                height: 4,
            },
            0.0,
        )?;
        resize_fast(&image, &mut image_resized)?;

        let data = image_resized.as_slice();
        assert!(data.iter().any(|&v| v < 0.0));
        assert!(data.iter().all(|&v| (-0.5..=0.5).contains(&v)));

        Ok(())
    }

    #[test]
    fn resize_fast_downscale_averages() -> Result<(), ImageError> {
        #[rustfmt::skip]
        let image = Image::<_, 1>::new(
            ImageSize {
                width: 4,
                height: 2,
            },
            vec![
                0.0f32, 1.0, 0.0, 1.0,
                1.0, 0.0, 1.0, 0.0,
            ],
        )?;

        let mut image_resized = Image::<_, 1>::from_size_val(
            ImageSize {
                width: 1,
                height: 1,
            },
            0.0,
        )?;
        resize_fast(&image, &mut image_resized)?;

        assert_relative_eq!(image_resized.as_slice()[0], 0.5, epsilon = 1e-5);

        Ok(())
    }

    #[test]
    fn resize_empty() -> Result<(), ImageError> {
        let image = Image::<f32, 1>::new(
            ImageSize {
                width: 0,
                height: 3,
            },
            vec![],
        )?;
        let mut image_resized = Image::<_, 1>::from_size_val(
            ImageSize {
                width: 2,
                height: 2,
            },
            0.0,
        )?;

        assert_eq!(
            resize_fast(&image, &mut image_resized),
            Err(ImageError::EmptyImage(0, 3))
        );

        Ok(())
    }
}
