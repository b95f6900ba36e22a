//! The bitmap buffer: one owned byte arena holding header, palette and rows.
//!
//! Every address and size is derived from the width, height and bit depth
//! by arithmetic, so all accessors are O(1) and never scan the data.

use std::fmt;

use super::header::{InfoHeader, COMPRESSION_NONE, HEADER_SIZE, PALETTE_MAX, RGBQUAD_SIZE};
use super::types::{BitDepth, DibAttributes, DibError, Orientation};
use crate::color::RgbQuad;

/// A device-independent bitmap stored as a single contiguous block.
///
/// The block is laid out as a 40-byte [`InfoHeader`], `palette_len()` palette
/// entries of 4 bytes each, then `height()` rows of `stride()` bytes. The
/// header bytes are rewritten whenever a header field changes, so
/// [`Dib::as_bytes`] is always a valid packed DIB.
///
/// Each buffer owns its storage outright. Cloning copies every byte.
#[derive(Clone, PartialEq, Eq)]
pub struct Dib {
    width: u32,
    height: u32,
    orientation: Orientation,
    bit_depth: BitDepth,
    palette_len: usize,
    resolution: (i32, i32),
    data: Vec<u8>,
}

/// Sizes implied by a width, height and bit depth.
struct Layout {
    palette_len: usize,
    image_size: usize,
    total: usize,
}

impl Layout {
    fn compute(width: u32, height: u32, bit_depth: BitDepth) -> Result<Self, DibError> {
        let invalid = || DibError::InvalidDimensions { width, height };
        if width == 0 || height == 0 || width > i32::MAX as u32 || height > i32::MAX as u32 {
            return Err(invalid());
        }

        let stride = (width as usize)
            .checked_mul(bit_depth.bits() as usize)
            .and_then(|bits| bits.checked_add(31))
            .map(|bits| bits / 32 * 4)
            .ok_or_else(invalid)?;
        let image_size = stride
            .checked_mul(height as usize)
            .filter(|&size| u32::try_from(size).is_ok())
            .ok_or_else(invalid)?;
        let palette_len = bit_depth.palette_len();
        let total = (HEADER_SIZE + palette_len * RGBQUAD_SIZE)
            .checked_add(image_size)
            .ok_or_else(invalid)?;

        Ok(Self {
            palette_len,
            image_size,
            total,
        })
    }
}

/// Reserve exactly `len` bytes, reporting failure instead of aborting.
fn try_reserve(len: usize) -> Result<Vec<u8>, DibError> {
    let mut data = Vec::new();
    data.try_reserve_exact(len).map_err(|e| {
        log::debug!("bitmap allocation of {} bytes failed: {}", len, e);
        DibError::OutOfMemory
    })?;
    Ok(data)
}

impl Dib {
    /// Allocate a buffer.
    ///
    /// The palette holds `2^bpp` zeroed entries for indexed depths and none
    /// otherwise. When `data` is given it must be exactly `stride * height`
    /// bytes and is copied into the pixel region in storage order; without
    /// it the rows are zeroed.
    ///
    /// # Errors
    ///
    /// - `InvalidDimensions` if either dimension is zero or too large for
    ///   the header fields
    /// - `InvalidPixelData` if `data` has the wrong length
    /// - `OutOfMemory` if the block cannot be allocated
    pub fn alloc(
        width: u32,
        height: u32,
        bit_depth: BitDepth,
        data: Option<&[u8]>,
        orientation: Orientation,
    ) -> Result<Self, DibError> {
        let layout = Layout::compute(width, height, bit_depth)?;
        if let Some(src) = data {
            if src.len() != layout.image_size {
                return Err(DibError::InvalidPixelData {
                    expected: layout.image_size,
                    actual: src.len(),
                });
            }
        }

        let mut buffer = try_reserve(layout.total)?;
        buffer.resize(layout.total - layout.image_size, 0);
        match data {
            Some(src) => buffer.extend_from_slice(src),
            None => buffer.resize(layout.total, 0),
        }

        let mut dib = Self {
            width,
            height,
            orientation,
            bit_depth,
            palette_len: layout.palette_len,
            resolution: (0, 0),
            data: buffer,
        };
        dib.write_header();
        log::trace!(
            "allocated {}x{} {}bpp bitmap ({} bytes)",
            width,
            height,
            bit_depth.bits(),
            layout.total
        );
        Ok(dib)
    }

    /// Allocate a zeroed top-down buffer.
    pub fn new(width: u32, height: u32, bit_depth: BitDepth) -> Result<Self, DibError> {
        Self::alloc(width, height, bit_depth, None, Orientation::TopDown)
    }

    /// Build a buffer from a packed DIB: header, palette, then rows.
    ///
    /// Only uncompressed, single-plane data is accepted. Headers longer than
    /// 40 bytes are skipped over. A palette count of zero on an indexed depth
    /// means a full `2^bpp` palette. The result is laid out afresh, with the
    /// palette count and image size recomputed from the geometry.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DibError> {
        let header = InfoHeader::parse(bytes)?;
        let header_size = header.size as usize;
        if header_size < HEADER_SIZE {
            return Err(DibError::InvalidHeader(format!(
                "header size {} is smaller than {}",
                header.size, HEADER_SIZE
            )));
        }
        if header.planes != 1 {
            return Err(DibError::InvalidHeader(format!("{} planes", header.planes)));
        }
        if header.compression != COMPRESSION_NONE {
            return Err(DibError::InvalidHeader(format!(
                "compression {} is not supported",
                header.compression
            )));
        }
        let bit_depth = BitDepth::try_from(header.bit_count)?;
        if header.width <= 0 {
            return Err(DibError::InvalidDimensions {
                width: header.width.unsigned_abs(),
                height: header.height_magnitude(),
            });
        }

        let declared_colors = match header.clr_used as usize {
            0 => bit_depth.palette_len(),
            n if n <= PALETTE_MAX => n,
            n => return Err(DibError::InvalidHeader(format!("{} palette entries", n))),
        };

        let width = header.width as u32;
        let height = header.height_magnitude();
        let layout = Layout::compute(width, height, bit_depth)?;
        let pixel_start = header_size.saturating_add(declared_colors * RGBQUAD_SIZE);
        let expected = pixel_start.saturating_add(layout.image_size);
        if bytes.len() < expected {
            return Err(DibError::Truncated {
                expected,
                actual: bytes.len(),
            });
        }

        let mut dib = Self::alloc(
            width,
            height,
            bit_depth,
            Some(&bytes[pixel_start..expected]),
            header.orientation(),
        )?;
        let copied = declared_colors.min(dib.palette_len) * RGBQUAD_SIZE;
        dib.palette_bytes_mut()[..copied]
            .copy_from_slice(&bytes[header_size..header_size + copied]);
        dib.set_resolution(header.x_pels_per_meter, header.y_pels_per_meter);
        log::trace!(
            "parsed packed bitmap: {}x{} {}bpp, {} declared colors",
            width,
            height,
            bit_depth.bits(),
            declared_colors
        );
        Ok(dib)
    }

    /// Duplicate the buffer, reporting allocation failure.
    ///
    /// The copy shares no storage with `self`.
    pub fn try_clone(&self) -> Result<Self, DibError> {
        let mut data = try_reserve(self.data.len())?;
        data.extend_from_slice(&self.data);
        Ok(Self { data, ..*self })
    }

    /// Release the buffer. Equivalent to dropping it.
    pub fn free(self) {}

    /// Take over the storage of `donor`, releasing the current storage.
    ///
    /// The donor is consumed; nothing is shared afterwards.
    pub fn alias(&mut self, donor: Dib) -> &mut Self {
        *self = donor;
        self
    }

    /// Copy palette entries from `src`.
    ///
    /// Copies `min(self.palette_len(), src.palette_len())` entries and
    /// leaves the rest untouched. Returns the number of entries copied.
    pub fn copy_palette_from(&mut self, src: &Dib) -> usize {
        let count = self.palette_len.min(src.palette_len);
        self.palette_mut()[..count].copy_from_slice(&src.palette()[..count]);
        count
    }

    /// Switch orientation by rewriting the header sign. No rows move.
    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
        self.write_header();
    }

    /// Set the informational resolution fields, in pixels per meter.
    pub fn set_resolution(&mut self, x: i32, y: i32) {
        self.resolution = (x, y);
        self.write_header();
    }

    fn write_header(&mut self) {
        let bytes = self.header().to_bytes();
        self.data[..HEADER_SIZE].copy_from_slice(&bytes);
    }

    // ---------------------------------------------------------------------
    // Attributes
    // ---------------------------------------------------------------------

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Number of scanlines, always positive.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Height as stored in the header: negative for top-down buffers.
    #[inline]
    pub fn signed_height(&self) -> i32 {
        self.orientation.signed_height(self.height)
    }

    #[inline]
    pub fn bit_depth(&self) -> BitDepth {
        self.bit_depth
    }

    /// Bits per pixel.
    #[inline]
    pub fn bpp(&self) -> u16 {
        self.bit_depth.bits()
    }

    #[inline]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    #[inline]
    pub fn is_top_down(&self) -> bool {
        self.signed_height() < 0
    }

    /// Number of palette entries.
    #[inline]
    pub fn palette_len(&self) -> usize {
        self.palette_len
    }

    /// Resolution in pixels per meter. Not interpreted by this crate.
    #[inline]
    pub fn resolution(&self) -> (i32, i32) {
        self.resolution
    }

    /// Bytes per row, padded to a multiple of four.
    #[inline]
    pub fn stride(&self) -> usize {
        self.bit_depth.stride(self.width)
    }

    /// Unused bytes at the end of each row.
    #[inline]
    pub fn padding(&self) -> usize {
        self.stride() - (self.width as usize * self.bpp() as usize).div_ceil(8)
    }

    /// Size in bytes of the pixel region.
    #[inline]
    pub fn image_size(&self) -> usize {
        self.stride() * self.height as usize
    }

    /// Image byte count as written in the header.
    #[inline]
    pub fn declared_image_size(&self) -> usize {
        self.header().size_image as usize
    }

    /// Size of the whole block: header, palette and pixel rows.
    #[inline]
    pub fn total_size(&self) -> usize {
        HEADER_SIZE + self.palette_len * RGBQUAD_SIZE + self.image_size()
    }

    /// Width, height, bit depth and stride together.
    pub fn attributes(&self) -> DibAttributes {
        DibAttributes {
            width: self.width,
            height: self.height,
            bpp: self.bpp(),
            stride: self.stride(),
        }
    }

    /// The header fields as stored at the front of the block.
    pub fn header(&self) -> InfoHeader {
        InfoHeader {
            size: HEADER_SIZE as u32,
            width: self.width as i32,
            height: self.signed_height(),
            planes: 1,
            bit_count: self.bpp(),
            compression: COMPRESSION_NONE,
            size_image: self.image_size() as u32,
            x_pels_per_meter: self.resolution.0,
            y_pels_per_meter: self.resolution.1,
            clr_used: self.palette_len as u32,
            clr_important: 0,
        }
    }

    // ---------------------------------------------------------------------
    // Regions
    // ---------------------------------------------------------------------

    /// Byte offset of the header. Always zero.
    #[inline]
    pub fn header_offset(&self) -> usize {
        0
    }

    /// Byte offset of the palette, directly after the header.
    #[inline]
    pub fn palette_offset(&self) -> usize {
        HEADER_SIZE
    }

    /// Byte offset of the pixel rows, directly after the palette.
    #[inline]
    pub fn pixel_offset(&self) -> usize {
        HEADER_SIZE + self.palette_len * RGBQUAD_SIZE
    }

    /// Byte offset of storage row `y`.
    ///
    /// `y` is in storage order; use [`Dib::storage_row`] to convert from a
    /// top-first row index.
    #[inline]
    pub fn row_offset(&self, y: u32) -> usize {
        debug_assert!(y < self.height, "row {} out of range for height {}", y, self.height);
        self.pixel_offset() + y as usize * self.stride()
    }

    /// Byte offset of the byte holding pixel `x` of storage row `y`.
    #[inline]
    pub fn pixel_offset_at(&self, x: u32, y: u32) -> usize {
        debug_assert!(x < self.width, "column {} out of range for width {}", x, self.width);
        self.row_offset(y) + x as usize * self.bpp() as usize / 8
    }

    /// Storage index of the row that is `logical_y` rows from the top.
    #[inline]
    pub fn storage_row(&self, logical_y: u32) -> u32 {
        self.orientation.storage_row(logical_y, self.height)
    }

    /// The header bytes.
    #[inline]
    pub fn header_bytes(&self) -> &[u8] {
        &self.data[..HEADER_SIZE]
    }

    /// The palette. Empty for direct-color depths.
    #[inline]
    pub fn palette(&self) -> &[RgbQuad] {
        bytemuck::cast_slice(&self.data[HEADER_SIZE..self.pixel_offset()])
    }

    #[inline]
    pub fn palette_mut(&mut self) -> &mut [RgbQuad] {
        let end = self.pixel_offset();
        bytemuck::cast_slice_mut(&mut self.data[HEADER_SIZE..end])
    }

    fn palette_bytes_mut(&mut self) -> &mut [u8] {
        let end = self.pixel_offset();
        &mut self.data[HEADER_SIZE..end]
    }

    /// All pixel rows in storage order, padding included.
    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.data[self.pixel_offset()..]
    }

    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [u8] {
        let start = self.pixel_offset();
        &mut self.data[start..]
    }

    /// Storage row `y`, padding included.
    #[inline]
    pub fn row(&self, y: u32) -> &[u8] {
        let start = self.row_offset(y);
        &self.data[start..start + self.stride()]
    }

    #[inline]
    pub fn row_mut(&mut self, y: u32) -> &mut [u8] {
        let start = self.row_offset(y);
        let end = start + self.stride();
        &mut self.data[start..end]
    }

    /// The whole block, ready to hand to a codec or display layer.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consume the buffer and return its block.
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}

impl fmt::Debug for Dib {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dib")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("orientation", &self.orientation)
            .field("bit_depth", &self.bit_depth)
            .field("palette_len", &self.palette_len)
            .field("bytes", &self.data.len())
            .finish()
    }
}

/// Attributes of an optional buffer; `None` only when there is no buffer.
pub fn query_attributes(dib: Option<&Dib>) -> Option<DibAttributes> {
    dib.map(Dib::attributes)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
