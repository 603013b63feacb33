//! Robust spatial filters
//!
//! Outlier rejection against the 8-neighbourhood, plane-fit depth
//! correction and hole filling for depth frames.

mod hole_fill;
pub use hole_fill::*;

mod nearest;
pub use nearest::*;

mod plane_fit;
pub use plane_fit::*;
