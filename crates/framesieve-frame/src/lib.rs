#![deny(missing_docs)]
//! Frame types shared by the framesieve filters.

/// fixed-size frame representation.
pub mod frame;

/// Error types for the frame module.
pub mod error;

pub use crate::error::FrameError;
pub use crate::frame::{Frame, FrameSize, ValidityMask};
