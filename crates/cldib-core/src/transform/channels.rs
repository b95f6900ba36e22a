//! Red/blue channel exchange over a whole buffer.

use crate::color::{swap_rgb16, swap_rgb24, swap_rgb32, RgbQuad, RgbTriple};
use crate::dib::{BitDepth, Dib};

/// Exchange red and blue in every pixel of `dib`.
///
/// Direct-color buffers have each pixel rewritten; indexed buffers have
/// their palette rewritten instead and the indices left alone. Row padding
/// is not touched.
pub fn swap_red_blue(dib: &mut Dib) {
    let width = dib.width() as usize;
    match dib.bit_depth() {
        BitDepth::Bpp1 | BitDepth::Bpp4 | BitDepth::Bpp8 => {
            for entry in dib.palette_mut() {
                *entry = swap_rgb32(*entry);
            }
        }
        BitDepth::Bpp16 => {
            for y in 0..dib.height() {
                for px in dib.row_mut(y)[..width * 2].chunks_exact_mut(2) {
                    let clr = swap_rgb16(u16::from_le_bytes([px[0], px[1]]));
                    px.copy_from_slice(&clr.to_le_bytes());
                }
            }
        }
        BitDepth::Bpp24 => {
            for y in 0..dib.height() {
                let row: &mut [RgbTriple] =
                    bytemuck::cast_slice_mut(&mut dib.row_mut(y)[..width * 3]);
                for px in row {
                    *px = swap_rgb24(*px);
                }
            }
        }
        BitDepth::Bpp32 => {
            for y in 0..dib.height() {
                let row: &mut [RgbQuad] =
                    bytemuck::cast_slice_mut(&mut dib.row_mut(y)[..width * 4]);
                for px in row {
                    *px = swap_rgb32(*px);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dib::Orientation;

    #[test]
    fn test_swap_24bpp_pixels() {
        let data = [1, 2, 3, 4, 5, 6, 0, 0];
        let mut dib =
            Dib::alloc(2, 1, BitDepth::Bpp24, Some(&data), Orientation::TopDown).unwrap();
        swap_red_blue(&mut dib);
        assert_eq!(dib.row(0), &[3, 2, 1, 6, 5, 4, 0, 0]);
    }

    #[test]
    fn test_swap_32bpp_keeps_reserved() {
        let mut dib = Dib::new(1, 1, BitDepth::Bpp32).unwrap();
        dib.row_mut(0).copy_from_slice(&[10, 20, 30, 40]);
        swap_red_blue(&mut dib);
        assert_eq!(dib.row(0), &[30, 20, 10, 40]);
    }

    #[test]
    fn test_swap_16bpp() {
        let mut dib = Dib::new(2, 1, BitDepth::Bpp16).unwrap();
        dib.row_mut(0)[..4].copy_from_slice(&[0x00, 0x7C, 0x1F, 0x00]);
        swap_red_blue(&mut dib);
        assert_eq!(&dib.row(0)[..4], &[0x1F, 0x00, 0x00, 0x7C]);
    }

    #[test]
    fn test_swap_indexed_touches_only_palette() {
        let mut dib = Dib::new(4, 1, BitDepth::Bpp8).unwrap();
        dib.row_mut(0).copy_from_slice(&[1, 2, 3, 4]);
        dib.palette_mut()[1] = RgbQuad::new(255, 0, 7);

        swap_red_blue(&mut dib);
        assert_eq!(dib.palette()[1], RgbQuad::new(7, 0, 255));
        assert_eq!(dib.row(0), &[1, 2, 3, 4]);
    }

    #[test]
    fn test_swap_twice_restores() {
        let data: Vec<u8> = (0..16).collect();
        let original =
            Dib::alloc(2, 2, BitDepth::Bpp32, Some(&data), Orientation::BottomUp).unwrap();
        let mut dib = original.clone();
        swap_red_blue(&mut dib);
        assert_ne!(dib, original);
        swap_red_blue(&mut dib);
        assert_eq!(dib, original);
    }
}
