/// An error type for the frame module.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum FrameError {
    /// Error when the data length does not match the frame size.
    #[error("Data length ({0}) does not match the frame size ({1})")]
    InvalidDataLength(usize, usize),

    /// Error when the frame has no pixels.
    #[error("Frame size must be non-zero, got {0}x{1}")]
    EmptyFrame(usize, usize),

    /// Error when two frames do not share the same size.
    #[error("Frame size ({0}x{1}) does not match the expected size ({2}x{3})")]
    InvalidFrameSize(usize, usize, usize, usize),

    /// Error when the pixel coordinates are out of bounds.
    #[error("Pixel index ({0}, {1}) is out of bounds ({2}x{3})")]
    PixelIndexOutOfBounds(usize, usize, usize, usize),
}
