//! Spatial filters
//!
//! Linear and median filters over the cross-5 and square 3x3 stencils.
//! Every filter leaves the outermost 1-pixel ring of the output untouched
//! and has an in-place variant driven by a [`crate::DelayLine`].

/// Coefficient sets for the spatial FIR filters
pub mod kernels;

mod fir;
pub use fir::*;

mod median;
pub use median::*;
