//! Palette entry types and channel-order conversions.
//!
//! DIB colors are stored blue-first. [`RgbQuad`] is the 4-byte palette entry
//! and 32-bit pixel layout; [`RgbTriple`] is the 24-bit pixel layout. Both
//! are `#[repr(C)]` byte structs, so a palette region can be viewed in place
//! as `&[RgbQuad]`.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// A palette entry or 32-bit pixel: blue, green, red, reserved.
#[repr(C)]
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Pod, Zeroable, Serialize, Deserialize,
)]
pub struct RgbQuad {
    pub blue: u8,
    pub green: u8,
    pub red: u8,
    pub reserved: u8,
}

impl RgbQuad {
    /// Create an entry from red, green and blue. The reserved byte is zero.
    pub fn new(red: u8, green: u8, blue: u8) -> Self {
        Self {
            blue,
            green,
            red,
            reserved: 0,
        }
    }

    /// Pack into a `0x00BBGGRR` color reference.
    #[inline]
    pub fn to_colorref(self) -> u32 {
        u32::from(self.red) | u32::from(self.green) << 8 | u32::from(self.blue) << 16
    }

    /// Unpack a `0x00BBGGRR` color reference. The top byte is ignored.
    #[inline]
    pub fn from_colorref(clr: u32) -> Self {
        Self::new(clr as u8, (clr >> 8) as u8, (clr >> 16) as u8)
    }
}

/// A 24-bit pixel: blue, green, red.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct RgbTriple {
    pub blue: u8,
    pub green: u8,
    pub red: u8,
}

impl RgbTriple {
    pub fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { blue, green, red }
    }
}

/// Build a 16-bit `x rrrrr ggggg bbbbb` color.
///
/// The inputs are full 8-bit channels and are cut down to 5 bits.
#[inline]
pub fn rgb16(red: u8, green: u8, blue: u8) -> u16 {
    (u16::from(red) >> 3) << 10 | (u16::from(green) >> 3) << 5 | u16::from(blue) >> 3
}

/// Swap red and blue in a 16-bit 5:5:5 color. Green and the top bit stay.
#[inline]
pub fn swap_rgb16(clr: u16) -> u16 {
    let rb = u32::from(clr & 0x7C1F);
    ((u32::from(clr) & 0x83E0) | (rb << 10) & 0x7C00 | rb >> 10) as u16
}

/// Swap red and blue in a 24-bit pixel.
#[inline]
pub fn swap_rgb24(clr: RgbTriple) -> RgbTriple {
    RgbTriple {
        blue: clr.red,
        green: clr.green,
        red: clr.blue,
    }
}

/// Swap red and blue in a 32-bit pixel, keeping the reserved byte.
#[inline]
pub fn swap_rgb32(clr: RgbQuad) -> RgbQuad {
    RgbQuad {
        blue: clr.red,
        green: clr.green,
        red: clr.blue,
        reserved: clr.reserved,
    }
}
