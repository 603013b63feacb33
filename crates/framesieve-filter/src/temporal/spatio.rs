use framesieve_frame::{Frame, FrameSize};

use crate::{
    error::FilterError,
    robust::nearest_difference,
    select::{med5, med7},
    stencil::Stencil3,
};

use super::{check_io, FrameHistory};

/// Nearest-neighbour test with a temporal median fallback.
///
/// Works on a window of 5 frames centred on `f2`, the frame pushed two calls
/// ago. A pixel of `f2` within `threshold` of one of its 8 neighbours is
/// kept. An isolated pixel is replaced by the median of the 5 frames at that
/// position.
///
/// The 1-pixel border of the output is left untouched.
#[derive(Clone, Debug)]
pub struct NnTemporalMedian5 {
    history: FrameHistory<4>,
    stencil: Stencil3,
    threshold: f32,
}

impl NnTemporalMedian5 {
    /// Create the filter with a zeroed history.
    ///
    /// # Errors
    ///
    /// If the frames are smaller than 3x3, an error is returned.
    pub fn new(size: FrameSize, threshold: f32) -> Result<Self, FilterError> {
        let stencil = Stencil3::new(size)?;
        log::debug!(
            "nn temporal median on {} frames, threshold {}",
            size,
            threshold
        );
        Ok(Self {
            history: FrameHistory::new(size)?,
            stencil,
            threshold,
        })
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
        self.stencil.apply(f2, dst.as_slice_mut(), |i, n| {
            if nearest_difference(n) < th {
                n[4]
            } else {
                med5(f0[i], f1[i], f2[i], f3[i], f4[i])
            }
        });

        self.history.push(src)?;
        Ok(dst)
    }
}

/// Median of 7 samples taken across space and time.
///
/// Works on a window of 3 frames centred on `f1`, the frame pushed on the
/// previous call. The samples are the 5-pixel cross of `f1` around the
/// pixel and the same pixel in the frames before and after it.
///
/// ```text
///        f1(N)
/// f1(W)  f1(C)  f1(E)      f0(C)  f2(C)
///        f1(S)
/// ```
///
/// The 1-pixel border of the output is left untouched.
#[derive(Clone, Debug)]
pub struct SpatioTemporalMedian7 {
    history: FrameHistory<2>,
    stencil: Stencil3,
}

impl SpatioTemporalMedian7 {
    /// Create the filter with a zeroed history.
    ///
    /// # Errors
    ///
    /// If the frames are smaller than 3x3, an error is returned.
    pub fn new(size: FrameSize) -> Result<Self, FilterError> {
        let stencil = Stencil3::new(size)?;
        log::debug!("spatio-temporal median of 7 on {} frames", size);
        Ok(Self {
            history: FrameHistory::new(size)?,
            stencil,
        })
    }

    /// Mutable access to the history.
    pub fn history_mut(&mut self) -> &mut FrameHistory<2> {
        &mut self.history
    }

    /// Filter the window ending with `src` into `dst` and push `src`.
    pub fn process<'a>(
        &mut self,
        src: &Frame<f32>,
        dst: &'a mut Frame<f32>,
    ) -> Result<&'a mut Frame<f32>, FilterError> {
        check_io(self.history.size(), src, dst)?;

        let [f0, f1] = self.history.oldest_first().map(Frame::as_slice);
        let f2 = src.as_slice();
        self.stencil.apply(f1, dst.as_slice_mut(), |i, n| {
            med7(n[1], n[3], n[4], n[5], n[7], f0[i], f2[i])
        });

        self.history.push(src)?;
        Ok(dst)
    }
}
