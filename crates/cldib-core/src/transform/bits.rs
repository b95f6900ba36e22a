//! Bit-level reads and writes for packed pixel rows.
//!
//! Rows pack sub-byte pixels most significant bit first: at 1 bpp the
//! leftmost pixel is bit 7 of byte 0, at 4 bpp it is the high nibble.
//! Bit positions here count from that leftmost bit. Fields may straddle a
//! byte boundary.

/// Read `count` bits (at most 32) starting at bit `pos`.
pub(crate) fn read_bits(bytes: &[u8], mut pos: usize, count: u32) -> u32 {
    debug_assert!(count <= 32);
    let mut value = 0u32;
    let mut remaining = count;
    while remaining > 0 {
        let avail = 8 - (pos % 8) as u32;
        let take = avail.min(remaining);
        let shift = avail - take;
        let mask = ((1u16 << take) - 1) as u8;
        let bits = (bytes[pos / 8] >> shift) & mask;
        value = (value << take) | u32::from(bits);
        pos += take as usize;
        remaining -= take;
    }
    value
}

/// Write the low `count` bits (at most 32) of `value` starting at bit `pos`.
/// Bits outside the field are left untouched.
pub(crate) fn write_bits(bytes: &mut [u8], mut pos: usize, count: u32, value: u32) {
    debug_assert!(count <= 32);
    let mut remaining = count;
    while remaining > 0 {
        let avail = 8 - (pos % 8) as u32;
        let take = avail.min(remaining);
        let shift = avail - take;
        let mask = ((1u16 << take) - 1) as u8;
        let bits = (value >> (remaining - take)) as u8 & mask;
        let byte = &mut bytes[pos / 8];
        *byte = (*byte & !(mask << shift)) | (bits << shift);
        pos += take as usize;
        remaining -= take;
    }
}

/// Sequential reader over a packed row.
pub(crate) struct BitCursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> BitCursor<'a> {
    pub(crate) fn new(bytes: &'a [u8], pos: usize) -> Self {
        Self { bytes, pos }
    }

    pub(crate) fn read(&mut self, count: u32) -> u32 {
        let value = read_bits(self.bytes, self.pos, count);
        self.pos += count as usize;
        value
    }
}

/// Sequential writer over a packed row.
pub(crate) struct BitCursorMut<'a> {
    bytes: &'a mut [u8],
    pos: usize,
}

impl<'a> BitCursorMut<'a> {
    pub(crate) fn new(bytes: &'a mut [u8], pos: usize) -> Self {
        Self { bytes, pos }
    }

    pub(crate) fn write(&mut self, count: u32, value: u32) {
        write_bits(self.bytes, self.pos, count, value);
        self.pos += count as usize;
    }
}

/// Copy `pixels` fields of `bits` each from bit `src_pos` of `src` to the
/// start of `dst`.
pub(crate) fn repack(src: &[u8], src_pos: usize, dst: &mut [u8], pixels: usize, bits: u32) {
    let mut reader = BitCursor::new(src, src_pos);
    let mut writer = BitCursorMut::new(dst, 0);
    for _ in 0..pixels {
        writer.write(bits, reader.read(bits));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_msb_first() {
        let bytes = [0b1010_0000u8];
        assert_eq!(read_bits(&bytes, 0, 1), 1);
        assert_eq!(read_bits(&bytes, 1, 1), 0);
        assert_eq!(read_bits(&bytes, 2, 1), 1);
        assert_eq!(read_bits(&bytes, 0, 4), 0b1010);
    }

    #[test]
    fn test_read_nibbles() {
        let bytes = [0x12u8, 0x34];
        assert_eq!(read_bits(&bytes, 0, 4), 0x1);
        assert_eq!(read_bits(&bytes, 4, 4), 0x2);
        assert_eq!(read_bits(&bytes, 12, 4), 0x4);
    }

    #[test]
    fn test_read_straddling_byte_boundary() {
        let bytes = [0x12u8, 0x34];
        assert_eq!(read_bits(&bytes, 4, 8), 0x23);
        assert_eq!(read_bits(&bytes, 0, 16), 0x1234);
    }

    #[test]
    fn test_write_preserves_neighbours() {
        let mut bytes = [0xFFu8, 0xFF];
        write_bits(&mut bytes, 6, 4, 0);
        assert_eq!(bytes, [0b1111_1100, 0b0011_1111]);
    }

    #[test]
    fn test_write_nibble() {
        let mut bytes = [0x00u8];
        write_bits(&mut bytes, 4, 4, 0xA);
        assert_eq!(bytes, [0x0A]);
        write_bits(&mut bytes, 0, 4, 0x5);
        assert_eq!(bytes, [0x5A]);
    }

    #[test]
    fn test_write_truncates_value_to_field() {
        let mut bytes = [0x00u8];
        write_bits(&mut bytes, 0, 2, 0xFF);
        assert_eq!(bytes, [0b1100_0000]);
    }

    #[test]
    fn test_cursors_advance() {
        let src = [0b1011_0010u8];
        let mut reader = BitCursor::new(&src, 1);
        assert_eq!(reader.read(3), 0b011);
        assert_eq!(reader.read(2), 0b00);

        let mut dst = [0u8];
        let mut writer = BitCursorMut::new(&mut dst, 0);
        writer.write(1, 1);
        writer.write(3, 0b101);
        assert_eq!(dst, [0b1101_0000]);
    }

    #[test]
    fn test_repack_shifts_to_bit_zero() {
        // 1 bpp pixels 1,0,1,1,0,0,1,0 | 1,1,...
        let src = [0b1011_0010u8, 0b1100_0000];
        let mut dst = [0u8; 2];
        // Take 6 pixels starting at pixel 3
        repack(&src, 3, &mut dst, 6, 1);
        assert_eq!(dst, [0b1001_0100, 0]);
    }

    #[test]
    fn test_repack_odd_nibble_offset() {
        let src = [0x12u8, 0x34, 0x56];
        let mut dst = [0u8; 2];
        repack(&src, 4, &mut dst, 3, 4);
        assert_eq!(dst, [0x23, 0x40]);
    }
}
