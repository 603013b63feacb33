use framesieve_frame::Frame;

use crate::{
    delay_line::DelayLine,
    error::FilterError,
    select::min8,
    spatial::cross_median,
    stencil::{Neighborhood, Stencil3},
};

/// Smallest absolute difference between the centre and its 8 neighbours.
#[inline]
pub(crate) fn nearest_difference(n: &Neighborhood) -> f32 {
    let c = n[4];
    min8([
        (n[0] - c).abs(),
        (n[1] - c).abs(),
        (n[2] - c).abs(),
        (n[3] - c).abs(),
        (n[5] - c).abs(),
        (n[6] - c).abs(),
        (n[7] - c).abs(),
        (n[8] - c).abs(),
    ])
}

#[inline]
fn nearest_select(n: &Neighborhood, threshold: f32) -> f32 {
    if nearest_difference(n) < threshold {
        n[4]
    } else {
        cross_median(n)
    }
}

/// Nearest-neighbour selection filter.
///
/// A pixel that lies within `threshold` of at least one of its 8
/// neighbours is kept. Otherwise it is isolated and gets replaced by the
/// median of the 5-pixel cross around it.
///
/// # Arguments
///
/// * `src` - The source frame.
/// * `dst` - The destination frame. Its 1-pixel border is left untouched.
/// * `threshold` - Pixels closer than this to some neighbour are kept.
///
/// # Examples
///
/// ```
/// use framesieve_frame::Frame;
/// use framesieve_filter::robust::nn_select;
///
/// let mut src = Frame::from_size_val([3, 3].into(), 1.0f32).unwrap();
/// src.set_pixel(1, 1, 50.0).unwrap();
///
/// let mut dst = src.clone();
/// nn_select(&src, &mut dst, 5.0).unwrap();
/// assert_eq!(dst.get_pixel(1, 1).unwrap(), 1.0);
/// ```
pub fn nn_select<'a>(
    src: &Frame<f32>,
    dst: &'a mut Frame<f32>,
    threshold: f32,
) -> Result<&'a mut Frame<f32>, FilterError> {
    src.check_same_size(dst)?;
    let stencil = Stencil3::new(src.size())?;
    stencil.apply(src.as_slice(), dst.as_slice_mut(), |_, n| {
        nearest_select(n, threshold)
    });
    Ok(dst)
}

/// Nearest-neighbour selection filter computed in place.
///
/// See [`nn_select`].
pub fn nn_select_inplace<'a>(
    buf: &'a mut Frame<f32>,
    threshold: f32,
    delay: &mut DelayLine<f32>,
) -> Result<&'a mut Frame<f32>, FilterError> {
    let stencil = Stencil3::new(buf.size())?;
    stencil.apply_inplace(buf.as_slice_mut(), delay, |_, n| {
        nearest_select(n, threshold)
    })?;
    Ok(buf)
}

/// Compute the nearest-neighbour distance of every interior pixel.
///
/// The output holds, per pixel, the smallest absolute difference to one of
/// its 8 neighbours. Large values flag isolated samples.
pub fn neighbor_difference<'a>(
    src: &Frame<f32>,
    dst: &'a mut Frame<f32>,
) -> Result<&'a mut Frame<f32>, FilterError> {
    src.check_same_size(dst)?;
    let stencil = Stencil3::new(src.size())?;
    stencil.apply(src.as_slice(), dst.as_slice_mut(), |_, n| {
        nearest_difference(n)
    });
    Ok(dst)
}
