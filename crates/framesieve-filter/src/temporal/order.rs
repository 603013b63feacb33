use framesieve_frame::{Frame, FrameSize};

use crate::{
    error::FilterError,
    select::{max3, max5, med3, med5, min3, min5, trimmed_mean5},
};

use super::{check_io, FrameHistory};

/// Pixelwise statistic computed across the frames of a temporal window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TemporalStatistic {
    /// The median value.
    Median,
    /// The largest value.
    Max,
    /// The smallest value.
    Min,
    /// The mean after dropping one smallest and one largest value.
    TrimmedMean,
}

type Select3 = fn(f32, f32, f32) -> f32;
type Select5 = fn(f32, f32, f32, f32, f32) -> f32;

/// Order statistic over a sliding window of 3 frames.
///
/// Each call combines the two previous frames with `src`, then stores `src`
/// in place of the oldest one.
///
/// # Examples
///
/// ```
/// use framesieve_frame::Frame;
/// use framesieve_filter::temporal::{TemporalOrder3, TemporalStatistic};
///
/// let size = [1, 1].into();
/// let mut filter = TemporalOrder3::new(size, TemporalStatistic::Median).unwrap();
/// let mut dst = Frame::from_size_val(size, 0.0).unwrap();
///
/// for v in [3.0, 9.0, 5.0] {
///     let src = Frame::from_size_val(size, v).unwrap();
///     filter.process(&src, &mut dst).unwrap();
/// }
/// assert_eq!(dst.as_slice(), &[5.0]);
/// ```
#[derive(Clone, Debug)]
pub struct TemporalOrder3 {
    history: FrameHistory<2>,
    statistic: TemporalStatistic,
    select: Select3,
}

impl TemporalOrder3 {
    /// Create the filter with a zeroed history.
    ///
    /// # Errors
    ///
    /// [`TemporalStatistic::TrimmedMean`] needs 5 frames and is rejected.
    pub fn new(size: FrameSize, statistic: TemporalStatistic) -> Result<Self, FilterError> {
        let select: Select3 = match statistic {
            TemporalStatistic::Median => med3,
            TemporalStatistic::Max => max3,
            TemporalStatistic::Min => min3,
            TemporalStatistic::TrimmedMean => {
                return Err(FilterError::UnsupportedStatistic(statistic, 3))
            }
        };
        log::debug!("temporal {:?} of 3 on {} frames", statistic, size);

        Ok(Self {
            history: FrameHistory::new(size)?,
            statistic,
            select,
        })
    }

    /// The statistic computed by this filter.
    pub fn statistic(&self) -> TemporalStatistic {
        self.statistic
    }

    /// The two previous frames.
    pub fn history(&self) -> &FrameHistory<2> {
        &self.history
    }

    /// Mutable access to the history, e.g. to prime it with [`FrameHistory::fill`].
    pub fn history_mut(&mut self) -> &mut FrameHistory<2> {
        &mut self.history
    }

    /// Combine `src` with the history into `dst` and push `src`.
    pub fn process<'a>(
        &mut self,
        src: &Frame<f32>,
        dst: &'a mut Frame<f32>,
    ) -> Result<&'a mut Frame<f32>, FilterError> {
        check_io(self.history.size(), src, dst)?;

        let select = self.select;
        let [f0, f1] = self.history.oldest_first();
        dst.as_slice_mut()
            .iter_mut()
            .zip(f0.as_slice().iter().zip(f1.as_slice()))
            .zip(src.as_slice())
            .for_each(|((out, (&a, &b)), &c)| *out = select(a, b, c));

        self.history.push(src)?;
        Ok(dst)
    }
}

/// Order statistic over a sliding window of 5 frames.
///
/// See [`TemporalOrder3`].
#[derive(Clone, Debug)]
pub struct TemporalOrder5 {
    history: FrameHistory<4>,
    statistic: TemporalStatistic,
    select: Select5,
}

impl TemporalOrder5 {
    /// Create the filter with a zeroed history.
    pub fn new(size: FrameSize, statistic: TemporalStatistic) -> Result<Self, FilterError> {
        let select: Select5 = match statistic {
            TemporalStatistic::Median => med5,
            TemporalStatistic::Max => max5,
            TemporalStatistic::Min => min5,
            TemporalStatistic::TrimmedMean => trimmed_mean5,
        };
        log::debug!("temporal {:?} of 5 on {} frames", statistic, size);

        Ok(Self {
            history: FrameHistory::new(size)?,
            statistic,
            select,
        })
    }

    /// The statistic computed by this filter.
    pub fn statistic(&self) -> TemporalStatistic {
        self.statistic
    }

    /// The four previous frames.
    pub fn history(&self) -> &FrameHistory<4> {
        &self.history
    }

    /// Mutable access to the history.
    pub fn history_mut(&mut self) -> &mut FrameHistory<4> {
        &mut self.history
    }

    /// Combine `src` with the history into `dst` and push `src`.
    pub fn process<'a>(
        &mut self,
        src: &Frame<f32>,
        dst: &'a mut Frame<f32>,
    ) -> Result<&'a mut Frame<f32>, FilterError> {
        check_io(self.history.size(), src, dst)?;

        let select = self.select;
        let [f0, f1, f2, f3] = self.history.oldest_first().map(Frame::as_slice);
        let f4 = src.as_slice();
        for (i, out) in dst.as_slice_mut().iter_mut().enumerate() {
            *out = select(f0[i], f1[i], f2[i], f3[i], f4[i]);
        }

        self.history.push(src)?;
        Ok(dst)
    }
}
