use num_traits::Zero;
use std::cmp::PartialOrd;

use combseg_image::{Image, ImageError};

use crate::parallel;

/// Apply a binary threshold to an image.
///
/// Every pixel with intensity greater than or equal to `threshold` maps to
/// `max_value`; all others map to zero. The operation is pure and
/// deterministic.
///
/// # Arguments
///
/// * `src` - The input image of an arbitrary number of channels and type.
/// * `dst` - The output image of an arbitrary number of channels and type.
/// * `threshold` - The threshold value. Must be the same type as the image.
/// * `max_value` - The value assigned to pixels at or above the threshold.
///
/// # Examples
///
/// ```
/// use combseg_image::{Image, ImageSize};
/// use combseg_segment::threshold::threshold_binary;
///
/// let data = vec![100u8, 200, 50, 150, 200, 250];
/// let image = Image::<_, 1>::new(ImageSize { width: 2, height: 3 }, data).unwrap();
///
/// let mut mask = Image::<_, 1>::from_size_val(image.size(), 0).unwrap();
///
/// threshold_binary(&image, &mut mask, 150, 255).unwrap();
/// assert_eq!(mask.as_slice(), &[0, 255, 0, 255, 255, 255]);
/// ```
pub fn threshold_binary<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    threshold: T,
    max_value: T,
) -> Result<(), ImageError>
where
    T: Copy + Send + Sync + PartialOrd + Zero,
{
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    parallel::par_iter_rows_val(src, dst, |src_pixel, dst_pixel| {
        *dst_pixel = if *src_pixel >= threshold {
            max_value
        } else {
            T::zero()
        };
    });

    Ok(())
}
