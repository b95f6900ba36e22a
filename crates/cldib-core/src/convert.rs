//! Conversion between bitmap buffers and `image` crate buffers.
//!
//! This is the hand-off point for codecs and display code that work with
//! plain RGB(A) images: [`to_rgba_image`] resolves palettes, 5:5:5 packing
//! and blue-first channel order into top-first RGBA, and
//! [`from_rgb_image`] / [`from_rgba_image`] go the other way.

use image::{RgbImage, Rgba, RgbaImage};

use crate::color::{swap_rgb24, swap_rgb32, RgbQuad, RgbTriple};
use crate::dib::{BitDepth, Dib, DibError, Orientation};
use crate::transform::read_bits;

/// Expand a 5-bit channel to 8 bits.
#[inline]
fn expand5(c: u16) -> u8 {
    let c = (c & 0x1F) as u8;
    (c << 3) | (c >> 2)
}

/// Render `dib` as an RGBA image with the visual top row first.
///
/// The reserved byte of 32-bit pixels and palette entries is not treated as
/// alpha; every output pixel is opaque. Indices past the end of the palette
/// render black.
pub fn to_rgba_image(dib: &Dib) -> RgbaImage {
    let bits = dib.bpp() as usize;
    let palette = dib.palette();

    RgbaImage::from_fn(dib.width(), dib.height(), |x, y| {
        let row = dib.row(dib.storage_row(y));
        let x = x as usize;
        let (r, g, b) = match dib.bit_depth() {
            BitDepth::Bpp1 | BitDepth::Bpp4 | BitDepth::Bpp8 => {
                let index = read_bits(row, x * bits, bits as u32) as usize;
                let entry = palette.get(index).copied().unwrap_or_default();
                (entry.red, entry.green, entry.blue)
            }
            BitDepth::Bpp16 => {
                let clr = u16::from_le_bytes([row[x * 2], row[x * 2 + 1]]);
                (expand5(clr >> 10), expand5(clr >> 5), expand5(clr))
            }
            BitDepth::Bpp24 => {
                let px: RgbTriple = *bytemuck::from_bytes(&row[x * 3..x * 3 + 3]);
                (px.red, px.green, px.blue)
            }
            BitDepth::Bpp32 => {
                let px: RgbQuad = *bytemuck::from_bytes(&row[x * 4..x * 4 + 4]);
                (px.red, px.green, px.blue)
            }
        };
        Rgba([r, g, b, 255])
    })
}

/// Build a 24 bpp buffer from an RGB image.
pub fn from_rgb_image(img: &RgbImage, orientation: Orientation) -> Result<Dib, DibError> {
    let mut dib = Dib::alloc(
        img.width(),
        img.height(),
        BitDepth::Bpp24,
        None,
        orientation,
    )?;
    for (y, src) in img.rows().enumerate() {
        let row = dib.storage_row(y as u32);
        let dst: &mut [RgbTriple] =
            bytemuck::cast_slice_mut(&mut dib.row_mut(row)[..img.width() as usize * 3]);
        for (out, px) in dst.iter_mut().zip(src) {
            // Red-first bytes read as a blue-first triple, then swapped.
            *out = swap_rgb24(*bytemuck::from_bytes::<RgbTriple>(&px.0));
        }
    }
    Ok(dib)
}

/// Build a 32 bpp buffer from an RGBA image, keeping alpha in the reserved
/// byte.
pub fn from_rgba_image(img: &RgbaImage, orientation: Orientation) -> Result<Dib, DibError> {
    let mut dib = Dib::alloc(
        img.width(),
        img.height(),
        BitDepth::Bpp32,
        None,
        orientation,
    )?;
    for (y, src) in img.rows().enumerate() {
        let row = dib.storage_row(y as u32);
        let dst: &mut [RgbQuad] =
            bytemuck::cast_slice_mut(&mut dib.row_mut(row)[..img.width() as usize * 4]);
        for (out, px) in dst.iter_mut().zip(src) {
            *out = swap_rgb32(*bytemuck::from_bytes::<RgbQuad>(&px.0));
        }
    }
    Ok(dib)
}
