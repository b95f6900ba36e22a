//! The DIB buffer model.
//!
//! A [`Dib`] is one owned byte block laid out exactly like a packed
//! device-independent bitmap:
//!
//! ```text
//! +----------------+---------------------+------------------------------+
//! | InfoHeader     | palette             | pixel rows                   |
//! | 40 bytes       | palette_len() * 4   | stride() * height()          |
//! +----------------+---------------------+------------------------------+
//! ```
//!
//! Orientation is kept as an explicit [`Orientation`] next to a positive
//! height and only folded into the sign of the header height when the
//! header bytes are written.
//!
//! # Row order
//!
//! Row accessors take indices in storage order. For a bottom-up buffer row 0
//! is the bottom scanline; callers wanting the visual top row go through
//! [`Dib::storage_row`].

mod buffer;
mod header;
mod types;

pub use buffer::{query_attributes, Dib};
pub use header::{InfoHeader, COMPRESSION_NONE, HEADER_SIZE, PALETTE_MAX, RGBQUAD_SIZE};
pub use types::{BitDepth, DibAttributes, DibError, Orientation};
