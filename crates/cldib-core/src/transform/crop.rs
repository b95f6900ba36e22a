//! Rectangular copy of part of a buffer into a new buffer.
//!
//! # Coordinate System
//!
//! - Coordinates are in pixels, origin at the visual top-left corner
//! - Rectangles are half-open: `[left, right) x [top, bottom)`
//! - Row order is corrected for orientation, so `top = 0` is always the
//!   top scanline whether the source is stored top-down or bottom-up
//!
//! The result keeps the source's bit depth, orientation, palette and
//! resolution. Its stride is recomputed for the new width; for 1 and 4 bpp
//! each row is repacked so the first copied pixel lands on bit 0.

use serde::{Deserialize, Serialize};

use super::bits::repack;
use crate::dib::{Dib, DibError};
use crate::scalar::clamp;

/// A half-open pixel rectangle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// Whether the rectangle is non-empty and lies inside a
    /// `width x height` image.
    pub fn is_within(&self, width: u32, height: u32) -> bool {
        self.left >= 0
            && self.top >= 0
            && self.left < self.right
            && self.top < self.bottom
            && i64::from(self.right) <= i64::from(width)
            && i64::from(self.bottom) <= i64::from(height)
    }

    /// Intersect with a `width x height` image, never producing an empty
    /// rectangle.
    ///
    /// Swapped edges are put back in order first. An edge pair that ends up
    /// empty or entirely outside is shrunk to the nearest single row or
    /// column inside the image.
    pub fn clipped(&self, width: u32, height: u32) -> Rect {
        let (left, right) = clip_span(self.left, self.right, width);
        let (top, bottom) = clip_span(self.top, self.bottom, height);
        Rect::new(left, top, right, bottom)
    }
}

fn clip_span(start: i32, end: i32, limit: u32) -> (i32, i32) {
    let limit = limit.min(i32::MAX as u32) as i32;
    let (start, end) = if start <= end { (start, end) } else { (end, start) };
    let start = clamp(start, 0, limit);
    let end = end.min(limit).max(start + 1);
    (start, end)
}

/// Copy the rectangle `[left, right) x [top, bottom)` of `src` into a new
/// buffer.
///
/// # Arguments
///
/// * `src` - Source buffer; it is only read
/// * `left`, `top`, `right`, `bottom` - Rectangle edges in visual coordinates
/// * `clip` - Clamp the rectangle to the source instead of failing
///
/// # Errors
///
/// - `InvalidRect` if `clip` is false and the rectangle is empty or not
///   entirely inside `src`
/// - `OutOfMemory` if the new buffer cannot be allocated
///
/// # Example
///
/// ```
/// use cldib_core::dib::{BitDepth, Dib};
/// use cldib_core::transform::crop_copy;
///
/// let src = Dib::new(100, 80, BitDepth::Bpp4).unwrap();
/// let part = crop_copy(&src, 3, 10, 50, 40, false).unwrap();
/// assert_eq!(part.width(), 47);
/// assert_eq!(part.height(), 30);
/// ```
pub fn crop_copy(
    src: &Dib,
    left: i32,
    top: i32,
    right: i32,
    bottom: i32,
    clip: bool,
) -> Result<Dib, DibError> {
    crop_rect(src, Rect::new(left, top, right, bottom), clip)
}

/// [`crop_copy`] taking a [`Rect`].
pub fn crop_rect(src: &Dib, rect: Rect, clip: bool) -> Result<Dib, DibError> {
    let rect = if clip {
        let clipped = rect.clipped(src.width(), src.height());
        if clipped != rect {
            log::debug!("crop rectangle {:?} clipped to {:?}", rect, clipped);
        }
        clipped
    } else if rect.is_within(src.width(), src.height()) {
        rect
    } else {
        return Err(DibError::InvalidRect {
            left: rect.left,
            top: rect.top,
            right: rect.right,
            bottom: rect.bottom,
        });
    };

    let out_width = rect.width() as u32;
    let out_height = rect.height() as u32;
    let left = rect.left as usize;
    let top = rect.top as u32;

    let mut dst = Dib::alloc(
        out_width,
        out_height,
        src.bit_depth(),
        None,
        src.orientation(),
    )?;
    dst.copy_palette_from(src);
    let (x_res, y_res) = src.resolution();
    dst.set_resolution(x_res, y_res);

    let bits = src.bpp() as usize;
    let full_rows = left == 0 && out_width == src.width();
    let row_bytes = (out_width as usize * bits).div_ceil(8);

    for y in 0..out_height {
        let src_row = src.row(src.storage_row(top + y));
        let dst_y = dst.storage_row(y);
        let dst_row = dst.row_mut(dst_y);

        if full_rows {
            dst_row.copy_from_slice(src_row);
        } else if bits.is_multiple_of(8) {
            let start = left * bits / 8;
            dst_row[..row_bytes].copy_from_slice(&src_row[start..start + row_bytes]);
        } else {
            repack(src_row, left * bits, dst_row, out_width as usize, bits as u32);
        }
    }

    Ok(dst)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
