#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use framesieve_frame as frame;

#[doc(inline)]
pub use framesieve_filter as filter;
