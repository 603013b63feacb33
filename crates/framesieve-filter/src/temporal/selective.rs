use framesieve_frame::{Frame, FrameSize};

use crate::{
    error::FilterError,
    select::{med3, med5},
};

use super::{check_io, FrameHistory};

/// Forward/backward selective median over a window of 5 frames.
///
/// The window is centred on `f2`, the frame pushed two calls ago. For each
/// pixel the median of the three frames up to the centre and the median of
/// the three frames from the centre on are compared. If they differ by more
/// than `threshold` the pixel is taken as moving and the centre value passes
/// through, otherwise the median of all five frames is output.
///
/// The output therefore lags the input by two frames.
#[derive(Clone, Debug)]
pub struct ForwardBackwardMedian5 {
    history: FrameHistory<4>,
    threshold: f32,
}

impl ForwardBackwardMedian5 {
    /// Create the filter with a zeroed history.
    pub fn new(size: FrameSize, threshold: f32) -> Result<Self, FilterError> {
        log::debug!(
            "forward/backward median on {} frames, threshold {}",
            size,
            threshold
        );
        Ok(Self {
            history: FrameHistory::new(size)?,
            threshold,
        })
    }

    /// The motion threshold.
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Mutable access to the history.
    pub fn history_mut(&mut self) -> &mut FrameHistory<4> {
        &mut self.history
    }

    /// Filter the window ending with `src` into `dst` and push `src`.
    pub fn process<'a>(
        &mut self,
        src: &Frame<f32>,
        dst: &'a mut Frame<f32>,
    ) -> Result<&'a mut Frame<f32>, FilterError> {
        check_io(self.history.size(), src, dst)?;

        let th = self.threshold;
        let [f0, f1, f2, f3] = self.history.oldest_first().map(Frame::as_slice);
        let f4 = src.as_slice();
        for (i, out) in dst.as_slice_mut().iter_mut().enumerate() {
            let backward = med3(f0[i], f1[i], f2[i]);
            let forward = med3(f2[i], f3[i], f4[i]);
            *out = if (backward - forward).abs() > th {
                f2[i]
            } else {
                med5(f0[i], f1[i], f2[i], f3[i], f4[i])
            };
        }

        self.history.push(src)?;
        Ok(dst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(
        filter: &mut ForwardBackwardMedian5,
        values: [f32; 5],
    ) -> Result<f32, FilterError> {
        let size = FrameSize {
            width: 1,
            height: 1,
        };
        let mut dst = Frame::from_size_val(size, 0.0)?;
        for v in values {
            filter.process(&Frame::from_size_val(size, v)?, &mut dst)?;
        }
        Ok(dst.as_slice()[0])
    }

    #[test]
    fn test_monotonic_passes_center() -> Result<(), FilterError> {
        let mut filter = ForwardBackwardMedian5::new([1, 1].into(), 0.0)?;
        assert_eq!(window(&mut filter, [1.0, 2.0, 3.0, 4.0, 5.0])?, 3.0);
        assert_eq!(window(&mut filter, [10.0, 8.0, 7.5, -2.0, -3.0])?, 7.5);

        Ok(())
    }

    #[test]
    fn test_static_spike_is_removed() -> Result<(), FilterError> {
        let mut filter = ForwardBackwardMedian5::new([1, 1].into(), 3.0)?;
        assert_eq!(window(&mut filter, [5.0, 5.0, 50.0, 5.0, 5.0])?, 5.0);

        Ok(())
    }

    #[test]
    fn test_motion_keeps_center() -> Result<(), FilterError> {
        let mut filter = ForwardBackwardMedian5::new([1, 1].into(), 3.0)?;
        // the medians before and after the centre are 1 and 10
        assert_eq!(window(&mut filter, [0.0, 10.0, 1.0, 10.0, 10.0])?, 1.0);

        // with a large threshold the same window is smoothed
        let mut filter = ForwardBackwardMedian5::new([1, 1].into(), 20.0)?;
        assert_eq!(window(&mut filter, [0.0, 10.0, 1.0, 10.0, 10.0])?, 10.0);

        Ok(())
    }
}
