use framesieve_frame::{Frame, FrameError, FrameSize};

use crate::error::FilterError;

mod fir;
pub use fir::*;

mod history;
pub use history::*;

mod iir;
pub use iir::*;

mod order;
pub use order::*;

mod selective;
pub use selective::*;

mod spatio;
pub use spatio::*;

/// Check the input and output frames of a windowed filter against its history.
fn check_io(size: FrameSize, src: &Frame<f32>, dst: &Frame<f32>) -> Result<(), FilterError> {
    for frame in [src, dst] {
        if frame.size() != size {
            return Err(FrameError::InvalidFrameSize(
                frame.width(),
                frame.height(),
                size.width,
                size.height,
            )
            .into());
        }
    }
    Ok(())
}
