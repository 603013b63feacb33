use framesieve_frame::{Frame, ValidityMask};

use crate::{error::FilterError, stencil::Stencil3};

/// Minimum number of valid neighbours a hole needs to be filled.
const MIN_VALID_NEIGHBORS: usize = 6;

/// Fill holes with the mean of their valid neighbours.
///
/// The output starts as a copy of `src`. Every interior pixel marked invalid
/// in `mask` that has more than 5 valid 8-neighbours is set to the mean of
/// those neighbours and marked valid. The image is scanned once in raster
/// order, so a hole filled earlier in the pass counts as a valid neighbour
/// for the holes after it. Holes with 5 or fewer valid neighbours stay
/// unresolved; call again to grow the fill further.
///
/// Neighbour values are read from the output, so a hole filled earlier in
/// the pass contributes its filled value. Implementations that read values
/// from the input contribute the stale hole value instead.
///
/// # Arguments
///
/// * `src` - The source frame.
/// * `dst` - The destination frame.
/// * `mask` - The validity of each pixel, `false` marks a hole.
///
/// # Returns
///
/// The destination frame.
///
/// # Examples
///
/// ```
/// use framesieve_frame::{Frame, ValidityMask};
/// use framesieve_filter::robust::hole_fill;
///
/// let src = Frame::new([3, 3].into(), (1..=9).map(|v| v as f32).collect()).unwrap();
/// let mut mask = ValidityMask::from_size_val(src.size(), true).unwrap();
/// mask.set_pixel(1, 1, false).unwrap();
///
/// let mut dst = Frame::from_size_val(src.size(), 0.0).unwrap();
/// hole_fill(&src, &mut dst, &mut mask).unwrap();
///
/// assert_eq!(dst.get_pixel(1, 1).unwrap(), 5.0);
/// assert!(mask.get_pixel(1, 1).unwrap());
/// ```
pub fn hole_fill<'a>(
    src: &Frame<f32>,
    dst: &'a mut Frame<f32>,
    mask: &mut ValidityMask,
) -> Result<&'a mut Frame<f32>, FilterError> {
    src.check_same_size(mask)?;
    src.check_same_size(dst)?;
    let stencil = Stencil3::new(src.size())?;

    dst.copy_from(src)?;
    fill_holes(&stencil, dst, mask);
    Ok(dst)
}

/// Fill holes with the mean of their valid neighbours, in place.
///
/// See [`hole_fill`]. Neighbour values are always read from `buf`, so no
/// delay line is needed.
pub fn hole_fill_inplace<'a>(
    buf: &'a mut Frame<f32>,
    mask: &mut ValidityMask,
) -> Result<&'a mut Frame<f32>, FilterError> {
    buf.check_same_size(mask)?;
    let stencil = Stencil3::new(buf.size())?;
    fill_holes(&stencil, buf, mask);
    Ok(buf)
}

/// Single raster pass over the interior. Sizes are checked by the caller.
fn fill_holes(stencil: &Stencil3, buf: &mut Frame<f32>, mask: &mut ValidityMask) {
    let w = buf.width();
    let h = buf.height();
    let offsets = *stencil.offsets();
    let values = buf.as_slice_mut();
    let valid = mask.as_slice_mut();

    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let i = y * w + x;
            if valid[i] {
                continue;
            }

            let top_left = i - w - 1;
            let mut count = 0;
            let mut sum = 0.0f32;
            for (k, &o) in offsets.iter().enumerate() {
                if k != 4 && valid[top_left + o] {
                    count += 1;
                    sum += values[top_left + o];
                }
            }

            if count >= MIN_VALID_NEIGHBORS {
                values[i] = sum / count as f32;
                valid[i] = true;
            }
        }
    }
}
