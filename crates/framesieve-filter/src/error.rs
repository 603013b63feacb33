use framesieve_frame::FrameError;

use crate::temporal::TemporalStatistic;

/// An error type for the filter module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum FilterError {
    /// Error coming from the frame buffers.
    #[error(transparent)]
    Frame(#[from] FrameError),

    /// Error when the frame has no interior pixel for a 3x3 stencil.
    #[error("Frame of size {0}x{1} is too small for a 3x3 stencil")]
    FrameTooSmall(usize, usize),

    /// Error when a delay line or history is created without storage.
    #[error("Capacity must be greater than zero")]
    ZeroCapacity,

    /// Error when the delay line is shorter than the stencil dependency distance.
    #[error("Delay line capacity ({0}) must be at least {1} samples")]
    DelayLineTooShort(usize, usize),

    /// Error when a forgetting factor is outside of [0, 1].
    #[error("Forgetting factor must be in [0, 1], got {0}")]
    InvalidAlpha(f32),

    /// Error when a statistic is requested for a window that cannot provide it.
    #[error("Statistic {0:?} is not available for a {1}-frame window")]
    UnsupportedStatistic(TemporalStatistic, usize),
}
