//! Core types for the DIB buffer model.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::scalar::align4;

/// Error types for buffer construction and transforms.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DibError {
    /// Width or height is zero or does not fit the signed 32-bit header fields.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// Bit depth outside the supported set.
    #[error("Unsupported bit depth: {0}")]
    UnsupportedBitDepth(u16),

    /// Caller-supplied pixel data has the wrong length.
    #[error("Invalid pixel data: expected {expected} bytes (stride * height), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Allocation of the buffer failed.
    #[error("Out of memory allocating bitmap buffer")]
    OutOfMemory,

    /// Crop rectangle is empty or exceeds the source bounds.
    #[error("Invalid rectangle: ({left}, {top}) - ({right}, {bottom})")]
    InvalidRect {
        left: i32,
        top: i32,
        right: i32,
        bottom: i32,
    },

    /// A packed DIB is shorter than its header says.
    #[error("Truncated bitmap data: expected {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },

    /// A packed DIB header uses a feature outside the uncompressed core.
    #[error("Invalid bitmap header: {0}")]
    InvalidHeader(String),
}

/// Supported bits per pixel.
///
/// Depths of 8 and below are palette indexed; 16 is 5:5:5 direct color,
/// 24 and 32 are blue-first direct color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
#[repr(u16)]
pub enum BitDepth {
    Bpp1 = 1,
    Bpp4 = 4,
    Bpp8 = 8,
    Bpp16 = 16,
    Bpp24 = 24,
    Bpp32 = 32,
}

impl BitDepth {
    /// Bits used by a single pixel.
    #[inline]
    pub fn bits(self) -> u16 {
        self as u16
    }

    /// Whether pixels are palette indices.
    #[inline]
    pub fn is_indexed(self) -> bool {
        self.bits() <= 8
    }

    /// Whether more than one pixel shares a byte.
    #[inline]
    pub fn is_sub_byte(self) -> bool {
        self.bits() < 8
    }

    /// Number of palette entries implied by the depth: `2^bpp` for indexed
    /// depths, zero otherwise.
    #[inline]
    pub fn palette_len(self) -> usize {
        if self.is_indexed() {
            1 << self.bits()
        } else {
            0
        }
    }

    /// Row stride in bytes for `width` pixels, padded to a 4-byte boundary.
    #[inline]
    pub fn stride(self, width: u32) -> usize {
        align4((width as usize * self.bits() as usize).div_ceil(8))
    }
}

impl TryFrom<u16> for BitDepth {
    type Error = DibError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(BitDepth::Bpp1),
            4 => Ok(BitDepth::Bpp4),
            8 => Ok(BitDepth::Bpp8),
            16 => Ok(BitDepth::Bpp16),
            24 => Ok(BitDepth::Bpp24),
            32 => Ok(BitDepth::Bpp32),
            other => Err(DibError::UnsupportedBitDepth(other)),
        }
    }
}

impl From<BitDepth> for u16 {
    fn from(depth: BitDepth) -> Self {
        depth.bits()
    }
}

/// Vertical storage order of the pixel rows.
///
/// On the wire this is folded into the sign of the header height: negative
/// for top-down, positive for bottom-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// Row 0 is the top scanline.
    TopDown,
    /// Row 0 is the bottom scanline.
    BottomUp,
}

impl Orientation {
    /// Decode from a signed header height.
    #[inline]
    pub fn from_signed_height(height: i32) -> Self {
        if height < 0 {
            Orientation::TopDown
        } else {
            Orientation::BottomUp
        }
    }

    /// Encode a positive height magnitude as a signed header height.
    #[inline]
    pub fn signed_height(self, height: u32) -> i32 {
        debug_assert!(
            height <= i32::MAX as u32,
            "height {height} does not fit a signed header field"
        );
        let height = height as i32;
        match self {
            Orientation::TopDown => -height,
            Orientation::BottomUp => height,
        }
    }

    /// The opposite orientation.
    #[inline]
    pub fn flipped(self) -> Self {
        match self {
            Orientation::TopDown => Orientation::BottomUp,
            Orientation::BottomUp => Orientation::TopDown,
        }
    }

    /// Map a row index between logical (top-first) and storage order.
    ///
    /// The mapping is its own inverse.
    #[inline]
    pub fn storage_row(self, row: u32, height: u32) -> u32 {
        match self {
            Orientation::TopDown => row,
            Orientation::BottomUp => height - 1 - row,
        }
    }
}

/// Width, height, bit depth and row stride of a buffer in one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DibAttributes {
    /// Width in pixels.
    pub width: u32,
    /// Height magnitude in scanlines.
    pub height: u32,
    /// Bits per pixel.
    pub bpp: u16,
    /// Bytes per row, including padding.
    pub stride: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_depth_from_u16() {
        assert_eq!(BitDepth::try_from(1), Ok(BitDepth::Bpp1));
        assert_eq!(BitDepth::try_from(24), Ok(BitDepth::Bpp24));
        assert_eq!(
            BitDepth::try_from(2),
            Err(DibError::UnsupportedBitDepth(2))
        );
        assert_eq!(
            BitDepth::try_from(0),
            Err(DibError::UnsupportedBitDepth(0))
        );
    }

    #[test]
    fn test_palette_len() {
        assert_eq!(BitDepth::Bpp1.palette_len(), 2);
        assert_eq!(BitDepth::Bpp4.palette_len(), 16);
        assert_eq!(BitDepth::Bpp8.palette_len(), 256);
        assert_eq!(BitDepth::Bpp16.palette_len(), 0);
        assert_eq!(BitDepth::Bpp24.palette_len(), 0);
        assert_eq!(BitDepth::Bpp32.palette_len(), 0);
    }

    #[test]
    fn test_stride() {
        // 8 pixels at 8 bpp = 64 bits = 8 bytes, already aligned
        assert_eq!(BitDepth::Bpp8.stride(8), 8);
        assert_eq!(BitDepth::Bpp8.stride(5), 8);
        assert_eq!(BitDepth::Bpp1.stride(1), 4);
        assert_eq!(BitDepth::Bpp1.stride(33), 8);
        assert_eq!(BitDepth::Bpp4.stride(9), 8);
        assert_eq!(BitDepth::Bpp24.stride(3), 12);
        assert_eq!(BitDepth::Bpp24.stride(1), 4);
        assert_eq!(BitDepth::Bpp32.stride(3), 12);
    }

    #[test]
    fn test_orientation_signed_height() {
        assert_eq!(Orientation::TopDown.signed_height(4), -4);
        assert_eq!(Orientation::BottomUp.signed_height(4), 4);
        assert_eq!(Orientation::from_signed_height(-4), Orientation::TopDown);
        assert_eq!(Orientation::from_signed_height(4), Orientation::BottomUp);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "does not fit a signed header field")]
    fn test_orientation_signed_height_rejects_oversized() {
        Orientation::TopDown.signed_height(1 << 31);
    }

    #[test]
    fn test_orientation_storage_row() {
        assert_eq!(Orientation::TopDown.storage_row(0, 4), 0);
        assert_eq!(Orientation::BottomUp.storage_row(0, 4), 3);
        assert_eq!(Orientation::BottomUp.storage_row(3, 4), 0);
    }

    #[test]
    fn test_bit_depth_into_u16() {
        let bits: u16 = BitDepth::Bpp24.into();
        assert_eq!(bits, 24);
    }

    #[test]
    fn test_error_display() {
        let err = DibError::InvalidPixelData {
            expected: 32,
            actual: 30,
        };
        assert_eq!(
            err.to_string(),
            "Invalid pixel data: expected 32 bytes (stride * height), got 30"
        );
        assert_eq!(
            DibError::UnsupportedBitDepth(7).to_string(),
            "Unsupported bit depth: 7"
        );
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn depth_strategy() -> impl Strategy<Value = BitDepth> {
        prop_oneof![
            Just(BitDepth::Bpp1),
            Just(BitDepth::Bpp4),
            Just(BitDepth::Bpp8),
            Just(BitDepth::Bpp16),
            Just(BitDepth::Bpp24),
            Just(BitDepth::Bpp32),
        ]
    }

    proptest! {
        /// Property: stride is a positive multiple of 4 covering every pixel bit.
        #[test]
        fn prop_stride_aligned_and_sufficient(width in 1u32..5000, depth in depth_strategy()) {
            let stride = depth.stride(width);
            let needed = (width as usize * depth.bits() as usize).div_ceil(8);
            prop_assert!(stride > 0);
            prop_assert_eq!(stride % 4, 0);
            prop_assert!(stride >= needed);
            prop_assert!(stride < needed + 4);
        }

        /// Property: the storage row mapping is an involution.
        #[test]
        fn prop_storage_row_involution(height in 1u32..1000, row in 0u32..1000, top_down in any::<bool>()) {
            let row = row % height;
            let orientation = if top_down { Orientation::TopDown } else { Orientation::BottomUp };
            let mapped = orientation.storage_row(row, height);
            prop_assert!(mapped < height);
            prop_assert_eq!(orientation.storage_row(mapped, height), row);
        }
    }
}
