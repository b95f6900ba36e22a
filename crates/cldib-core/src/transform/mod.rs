//! Geometric transforms on bitmap buffers: flips and rectangular copies.
//!
//! In-place operations ([`flip_horizontal`], [`flip_vertical`],
//! [`toggle_orientation`], [`swap_red_blue`]) take `&mut Dib` and keep the
//! stride, palette size and pixel region size unchanged. [`crop_copy`] reads
//! its source through `&Dib` and returns an independent buffer.
//!
//! # Coordinate System
//!
//! - Crop coordinates are pixels, origin at the visual top-left corner
//! - Rectangles are half-open on the right and bottom edges

mod bits;
mod channels;
mod crop;
mod flip;

pub use channels::swap_red_blue;
pub use crop::{crop_copy, crop_rect, Rect};
pub use flip::{flip_horizontal, flip_vertical, toggle_orientation};

pub(crate) use bits::read_bits;
