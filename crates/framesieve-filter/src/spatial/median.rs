use framesieve_frame::Frame;

use crate::{
    delay_line::DelayLine,
    error::FilterError,
    select::med5,
    stencil::{Neighborhood, Stencil3},
};

#[inline]
pub(crate) fn cross_median(n: &Neighborhood) -> f32 {
    med5(n[1], n[3], n[4], n[5], n[7])
}

/// Median filter over the 5-pixel cross stencil.
///
/// # Arguments
///
/// * `src` - The source frame.
/// * `dst` - The destination frame. Its 1-pixel border is left untouched.
pub fn median_cross<'a>(
    src: &Frame<f32>,
    dst: &'a mut Frame<f32>,
) -> Result<&'a mut Frame<f32>, FilterError> {
    src.check_same_size(dst)?;
    let stencil = Stencil3::new(src.size())?;
    stencil.apply(src.as_slice(), dst.as_slice_mut(), |_, n| cross_median(n));
    Ok(dst)
}

/// Median filter over the 5-pixel cross stencil, computed in place.
///
/// # Arguments
///
/// * `buf` - The frame to filter.
/// * `delay` - A delay line of at least `W + 1` samples.
pub fn median_cross_inplace<'a>(
    buf: &'a mut Frame<f32>,
    delay: &mut DelayLine<f32>,
) -> Result<&'a mut Frame<f32>, FilterError> {
    let stencil = Stencil3::new(buf.size())?;
    stencil.apply_inplace(buf.as_slice_mut(), delay, |_, n| cross_median(n))?;
    Ok(buf)
}
