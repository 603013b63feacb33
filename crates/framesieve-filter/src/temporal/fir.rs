use framesieve_frame::{Frame, FrameSize};

use crate::error::FilterError;

use super::{check_io, FrameHistory};

/// Three-tap FIR filter along the time axis.
///
/// The output is `c[0] * f0 + c[1] * f1 + c[2] * f2`, where `f0` is the
/// oldest and `f2` the current frame.
#[derive(Clone, Debug)]
pub struct TemporalFir3 {
    history: FrameHistory<2>,
    coeffs: [f32; 3],
}

impl TemporalFir3 {
    /// Create the filter with a zeroed history.
    ///
    /// # Arguments
    ///
    /// * `size` - The frame size.
    /// * `coeffs` - The taps from the oldest to the current frame.
    pub fn new(size: FrameSize, coeffs: [f32; 3]) -> Result<Self, FilterError> {
        log::debug!("temporal fir3 on {} frames, taps {:?}", size, coeffs);
        Ok(Self {
            history: FrameHistory::new(size)?,
            coeffs,
        })
    }

    /// The taps from the oldest to the current frame.
    pub fn coefficients(&self) -> &[f32; 3] {
        &self.coeffs
    }

    /// Mutable access to the history.
    pub fn history_mut(&mut self) -> &mut FrameHistory<2> {
        &mut self.history
    }

    /// Filter `src` against the two previous frames into `dst` and push `src`.
    pub fn process<'a>(
        &mut self,
        src: &Frame<f32>,
        dst: &'a mut Frame<f32>,
    ) -> Result<&'a mut Frame<f32>, FilterError> {
        check_io(self.history.size(), src, dst)?;

        let [c0, c1, c2] = self.coeffs;
        let [f0, f1] = self.history.oldest_first();
        dst.as_slice_mut()
            .iter_mut()
            .zip(f0.as_slice().iter().zip(f1.as_slice()))
            .zip(src.as_slice())
            .for_each(|((out, (&a, &b)), &c)| {
                let mut s = a * c0;
                s += b * c1;
                s += c * c2;
                *out = s;
            });

        self.history.push(src)?;
        Ok(dst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fir3_taps_follow_age() -> Result<(), FilterError> {
        let size = FrameSize {
            width: 2,
            height: 1,
        };
        let mut fir = TemporalFir3::new(size, [100.0, 10.0, 1.0])?;
        let mut dst = Frame::from_size_val(size, 0.0)?;

        let mut outputs = Vec::new();
        for v in [1.0, 2.0, 3.0, 4.0] {
            fir.process(&Frame::from_size_val(size, v)?, &mut dst)?;
            outputs.push(dst.get_pixel(1, 0)?);
        }
        assert_eq!(outputs, vec![1.0, 12.0, 123.0, 234.0]);

        Ok(())
    }

    #[test]
    fn test_fir3_primed_history() -> Result<(), FilterError> {
        let size = FrameSize {
            width: 3,
            height: 3,
        };
        let first = Frame::from_size_val(size, 6.0)?;
        let mut fir = TemporalFir3::new(size, [0.25, 0.5, 0.25])?;
        fir.history_mut().fill(&first)?;

        let mut dst = Frame::from_size_val(size, 0.0)?;
        fir.process(&first, &mut dst)?;
        assert_eq!(dst, first);

        Ok(())
    }
}
