//! The 40-byte info header at the front of every buffer.
//!
//! All fields are little-endian. The signed height carries the orientation;
//! it is only produced and consumed here and in [`Orientation`].
//!
//! ```text
//! offset  size  field
//!      0     4  header size (40)
//!      4     4  width (i32)
//!      8     4  height (i32, negative = top-down)
//!     12     2  planes (1)
//!     14     2  bits per pixel
//!     16     4  compression (0 = none)
//!     20     4  image byte count
//!     24     4  horizontal resolution (i32)
//!     28     4  vertical resolution (i32)
//!     32     4  palette entry count
//!     36     4  important colors
//! ```

use super::types::{DibError, Orientation};

/// Size in bytes of the info header.
pub const HEADER_SIZE: usize = 40;

/// Size in bytes of one palette entry.
pub const RGBQUAD_SIZE: usize = 4;

/// Largest palette an indexed buffer carries.
pub const PALETTE_MAX: usize = 256;

/// Compression tag for uncompressed rows.
pub const COMPRESSION_NONE: u32 = 0;

/// Decoded info header fields, in wire order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InfoHeader {
    pub size: u32,
    pub width: i32,
    pub height: i32,
    pub planes: u16,
    pub bit_count: u16,
    pub compression: u32,
    pub size_image: u32,
    pub x_pels_per_meter: i32,
    pub y_pels_per_meter: i32,
    pub clr_used: u32,
    pub clr_important: u32,
}

#[inline]
fn u16_le(bytes: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([bytes[at], bytes[at + 1]])
}

#[inline]
fn u32_le(bytes: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

#[inline]
fn i32_le(bytes: &[u8], at: usize) -> i32 {
    u32_le(bytes, at) as i32
}

impl InfoHeader {
    /// Decode a header from its wire bytes.
    pub fn read(bytes: &[u8; HEADER_SIZE]) -> Self {
        Self {
            size: u32_le(bytes, 0),
            width: i32_le(bytes, 4),
            height: i32_le(bytes, 8),
            planes: u16_le(bytes, 12),
            bit_count: u16_le(bytes, 14),
            compression: u32_le(bytes, 16),
            size_image: u32_le(bytes, 20),
            x_pels_per_meter: i32_le(bytes, 24),
            y_pels_per_meter: i32_le(bytes, 28),
            clr_used: u32_le(bytes, 32),
            clr_important: u32_le(bytes, 36),
        }
    }

    /// Decode a header from the front of `bytes`.
    pub fn parse(bytes: &[u8]) -> Result<Self, DibError> {
        let head: &[u8; HEADER_SIZE] = bytes
            .get(..HEADER_SIZE)
            .and_then(|head| head.try_into().ok())
            .ok_or(DibError::Truncated {
                expected: HEADER_SIZE,
                actual: bytes.len(),
            })?;
        Ok(Self::read(head))
    }

    /// Encode the header to its wire bytes.
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut out = [0u8; HEADER_SIZE];
        out[0..4].copy_from_slice(&self.size.to_le_bytes());
        out[4..8].copy_from_slice(&self.width.to_le_bytes());
        out[8..12].copy_from_slice(&self.height.to_le_bytes());
        out[12..14].copy_from_slice(&self.planes.to_le_bytes());
        out[14..16].copy_from_slice(&self.bit_count.to_le_bytes());
        out[16..20].copy_from_slice(&self.compression.to_le_bytes());
        out[20..24].copy_from_slice(&self.size_image.to_le_bytes());
        out[24..28].copy_from_slice(&self.x_pels_per_meter.to_le_bytes());
        out[28..32].copy_from_slice(&self.y_pels_per_meter.to_le_bytes());
        out[32..36].copy_from_slice(&self.clr_used.to_le_bytes());
        out[36..40].copy_from_slice(&self.clr_important.to_le_bytes());
        out
    }

    /// Orientation encoded in the height sign.
    #[inline]
    pub fn orientation(&self) -> Orientation {
        Orientation::from_signed_height(self.height)
    }

    /// Height magnitude.
    #[inline]
    pub fn height_magnitude(&self) -> u32 {
        self.height.unsigned_abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> InfoHeader {
        InfoHeader {
            size: HEADER_SIZE as u32,
            width: 8,
            height: -4,
            planes: 1,
            bit_count: 8,
            compression: COMPRESSION_NONE,
            size_image: 32,
            x_pels_per_meter: 2835,
            y_pels_per_meter: 2835,
            clr_used: 256,
            clr_important: 0,
        }
    }

    #[test]
    fn test_wire_layout() {
        let bytes = sample().to_bytes();
        assert_eq!(&bytes[0..4], &[40, 0, 0, 0]);
        assert_eq!(&bytes[4..8], &[8, 0, 0, 0]);
        // -4 as little-endian two's complement
        assert_eq!(&bytes[8..12], &[0xFC, 0xFF, 0xFF, 0xFF]);
        assert_eq!(&bytes[12..14], &[1, 0]);
        assert_eq!(&bytes[14..16], &[8, 0]);
        assert_eq!(&bytes[32..36], &[0, 1, 0, 0]);
    }

    #[test]
    fn test_read_back() {
        let header = sample();
        assert_eq!(InfoHeader::read(&header.to_bytes()), header);
    }

    #[test]
    fn test_orientation_from_sign() {
        let mut header = sample();
        assert_eq!(header.orientation(), Orientation::TopDown);
        assert_eq!(header.height_magnitude(), 4);
        header.height = 4;
        assert_eq!(header.orientation(), Orientation::BottomUp);
        assert_eq!(header.height_magnitude(), 4);
    }

    #[test]
    fn test_parse_truncated() {
        let bytes = [0u8; 12];
        assert_eq!(
            InfoHeader::parse(&bytes),
            Err(DibError::Truncated {
                expected: HEADER_SIZE,
                actual: 12
            })
        );
    }

    #[test]
    fn test_parse_ignores_trailing_bytes() {
        let mut bytes = sample().to_bytes().to_vec();
        bytes.extend_from_slice(&[0xAA; 16]);
        assert_eq!(InfoHeader::parse(&bytes), Ok(sample()));
    }
}
