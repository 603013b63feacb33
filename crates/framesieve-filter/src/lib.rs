#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// circular delay line used by the in-place stencil passes.
pub mod delay_line;

/// Error types for the filter module.
pub mod error;

/// robust spatial filters: outlier rejection, plane fitting and hole filling.
pub mod robust;

/// order statistics over small fixed sets of values.
pub mod select;

/// spatial smoothing filters.
pub mod spatial;

/// 3x3 neighbourhood iteration shared by the spatial filters.
pub mod stencil;

/// temporal filters over a stream of frames.
pub mod temporal;

pub use crate::delay_line::DelayLine;
pub use crate::error::FilterError;
