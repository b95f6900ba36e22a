//! cldib Core - device-independent bitmap buffers
//!
//! This crate provides an in-memory DIB: a single contiguous block holding
//! a 40-byte info header, an optional palette and padded pixel rows, plus
//! the geometry needed to derive new buffers of the same shape.
//!
//! # Module Structure
//!
//! - `scalar` - clamp/reflect/wrap range helpers
//! - `color` - palette entry types and red/blue channel swaps
//! - `dib` - the buffer model, its accessors and lifecycle operations
//! - `transform` - horizontal/vertical flips, orientation toggle, crop
//! - `convert` - hand-off to and from `image` crate RGB(A) buffers
//!
//! # Example
//!
//! ```ignore
//! use cldib_core::{crop_copy, flip_horizontal, BitDepth, Dib};
//!
//! let mut dib = Dib::new(64, 32, BitDepth::Bpp4)?;
//! flip_horizontal(&mut dib);
//! let part = crop_copy(&dib, 3, 0, 40, 16, false)?;
//! assert_eq!(part.width(), 37);
//! ```

pub mod color;
pub mod convert;
pub mod dib;
pub mod scalar;
pub mod transform;

pub use color::{RgbQuad, RgbTriple};
pub use convert::{from_rgb_image, from_rgba_image, to_rgba_image};
pub use dib::{query_attributes, BitDepth, Dib, DibAttributes, DibError, Orientation};
pub use transform::{
    crop_copy, crop_rect, flip_horizontal, flip_vertical, swap_red_blue, toggle_orientation,
    Rect,
};
