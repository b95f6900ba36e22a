//! In-place mirror operations.
//!
//! - [`flip_horizontal`] reverses the pixels of every row
//! - [`flip_vertical`] physically exchanges rows; the header is unchanged
//! - [`toggle_orientation`] flips only the header sign, moving no pixels
//!
//! `toggle_orientation` is the cheap flip for consumers that honor the
//! orientation; `flip_vertical` is for those that do not.

use super::bits::{read_bits, write_bits};
use crate::dib::{Dib, Orientation};

/// Mirror every row left to right.
///
/// Sub-byte pixels are moved as whole bit fields, so a 4 bpp row `0x12 0x34`
/// of four pixels becomes `0x43 0x21`. Row padding, the header and the
/// palette are left alone.
pub fn flip_horizontal(dib: &mut Dib) {
    let width = dib.width() as usize;
    let bits = dib.bpp() as usize;
    let packed = dib.bit_depth().is_sub_byte();

    for y in 0..dib.height() {
        let row = dib.row_mut(y);
        if packed {
            reverse_packed(row, width, bits as u32);
        } else {
            reverse_pixels(&mut row[..width * bits / 8], bits / 8);
        }
    }
}

/// Reverse `width` sub-byte fields of `bits` each.
fn reverse_packed(row: &mut [u8], width: usize, bits: u32) {
    let step = bits as usize;
    for left in 0..width / 2 {
        let right = width - 1 - left;
        let a = read_bits(row, left * step, bits);
        let b = read_bits(row, right * step, bits);
        write_bits(row, left * step, bits, b);
        write_bits(row, right * step, bits, a);
    }
}

/// Reverse the order of `bytes_per_pixel`-sized pixels, keeping the byte
/// order inside each pixel.
fn reverse_pixels(row: &mut [u8], bytes_per_pixel: usize) {
    if bytes_per_pixel == 1 {
        row.reverse();
        return;
    }
    let count = row.len() / bytes_per_pixel;
    for left in 0..count / 2 {
        let right = count - 1 - left;
        let (head, tail) = row.split_at_mut(right * bytes_per_pixel);
        head[left * bytes_per_pixel..(left + 1) * bytes_per_pixel]
            .swap_with_slice(&mut tail[..bytes_per_pixel]);
    }
}

/// Exchange row `i` with row `height - 1 - i` in memory.
///
/// The orientation is kept, so the visible image turns upside down. Whole
/// strides are swapped, padding included.
pub fn flip_vertical(dib: &mut Dib) {
    let stride = dib.stride();
    let height = dib.height() as usize;
    let pixels = dib.pixels_mut();

    for top in 0..height / 2 {
        let bottom = height - 1 - top;
        let (upper, lower) = pixels.split_at_mut(bottom * stride);
        upper[top * stride..(top + 1) * stride].swap_with_slice(&mut lower[..stride]);
    }
}

/// Switch between top-down and bottom-up by negating the header height.
///
/// No pixel bytes move. Returns the new orientation.
pub fn toggle_orientation(dib: &mut Dib) -> Orientation {
    let flipped = dib.orientation().flipped();
    dib.set_orientation(flipped);
    flipped
}


// ============================================================================
// Property-Based Tests
// ============================================================================
