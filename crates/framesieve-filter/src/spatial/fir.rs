use framesieve_frame::Frame;

use crate::{
    delay_line::DelayLine,
    error::FilterError,
    stencil::{Neighborhood, Stencil3},
};

/// Weighted sum over the cross stencil, taps in N, W, C, E, S order.
#[inline]
fn cross_sum(n: &Neighborhood, c: &[f32; 5]) -> f32 {
    let mut s = n[1] * c[0];
    s += n[3] * c[1];
    s += n[4] * c[2];
    s += n[5] * c[3];
    s += n[7] * c[4];
    s
}

/// Weighted sum over the full 3x3 stencil, taps in row-major order.
#[inline]
fn square3_sum(n: &Neighborhood, c: &[f32; 9]) -> f32 {
    let mut s = n[0] * c[0];
    for k in 1..9 {
        s += n[k] * c[k];
    }
    s
}

/// Filter a frame with a 5-tap cross stencil.
///
/// ```text
///      0
///   1  2  3
///      4
/// ```
///
/// # Arguments
///
/// * `src` - The source frame.
/// * `dst` - The destination frame. Its 1-pixel border is left untouched.
/// * `coeffs` - The taps in north, west, centre, east, south order.
///
/// # Returns
///
/// The destination frame.
///
/// # Examples
///
/// ```
/// use framesieve_frame::Frame;
/// use framesieve_filter::spatial::{fir_cross, kernels};
///
/// let src = Frame::from_size_val([4, 4].into(), 2.0f32).unwrap();
/// let mut dst = Frame::from_size_val(src.size(), 0.0f32).unwrap();
///
/// fir_cross(&src, &mut dst, &kernels::laplacian_cross()).unwrap();
/// assert_eq!(dst.get_pixel(1, 1).unwrap(), 0.0);
/// assert_eq!(dst.get_pixel(0, 0).unwrap(), 0.0);
/// ```
pub fn fir_cross<'a>(
    src: &Frame<f32>,
    dst: &'a mut Frame<f32>,
    coeffs: &[f32; 5],
) -> Result<&'a mut Frame<f32>, FilterError> {
    src.check_same_size(dst)?;
    let stencil = Stencil3::new(src.size())?;
    stencil.apply(src.as_slice(), dst.as_slice_mut(), |_, n| {
        cross_sum(n, coeffs)
    });
    Ok(dst)
}

/// Filter a frame in place with a 5-tap cross stencil.
///
/// Same arithmetic as [`fir_cross`]; the results are staged in `delay`
/// before being written back into `buf`.
///
/// # Arguments
///
/// * `buf` - The frame to filter.
/// * `coeffs` - The taps in north, west, centre, east, south order.
/// * `delay` - A delay line of at least `W + 1` samples, usually `3 * W`.
pub fn fir_cross_inplace<'a>(
    buf: &'a mut Frame<f32>,
    coeffs: &[f32; 5],
    delay: &mut DelayLine<f32>,
) -> Result<&'a mut Frame<f32>, FilterError> {
    let stencil = Stencil3::new(buf.size())?;
    stencil.apply_inplace(buf.as_slice_mut(), delay, |_, n| cross_sum(n, coeffs))?;
    Ok(buf)
}

/// Filter a frame with a 9-tap square stencil.
///
/// ```text
/// 0 1 2
/// 3 4 5
/// 6 7 8
/// ```
///
/// # Arguments
///
/// * `src` - The source frame.
/// * `dst` - The destination frame. Its 1-pixel border is left untouched.
/// * `coeffs` - The taps in row-major order.
pub fn fir_square3<'a>(
    src: &Frame<f32>,
    dst: &'a mut Frame<f32>,
    coeffs: &[f32; 9],
) -> Result<&'a mut Frame<f32>, FilterError> {
    src.check_same_size(dst)?;
    let stencil = Stencil3::new(src.size())?;
    stencil.apply(src.as_slice(), dst.as_slice_mut(), |_, n| {
        square3_sum(n, coeffs)
    });
    Ok(dst)
}

/// Filter a frame in place with a 9-tap square stencil.
///
/// See [`fir_square3`] and [`fir_cross_inplace`].
pub fn fir_square3_inplace<'a>(
    buf: &'a mut Frame<f32>,
    coeffs: &[f32; 9],
    delay: &mut DelayLine<f32>,
) -> Result<&'a mut Frame<f32>, FilterError> {
    let stencil = Stencil3::new(buf.size())?;
    stencil.apply_inplace(buf.as_slice_mut(), delay, |_, n| square3_sum(n, coeffs))?;
    Ok(buf)
}
