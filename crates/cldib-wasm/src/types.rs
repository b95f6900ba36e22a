//! WASM-compatible wrapper around the core bitmap buffer.
//!
//! This module provides a JavaScript-friendly handle over `cldib_core::Dib`,
//! handling the conversion between Rust and JavaScript data representations.

use cldib_core::{query_attributes, BitDepth, Dib, DibError, Orientation};
use wasm_bindgen::prelude::*;

/// Convert a core error into a JavaScript error value.
pub(crate) fn to_js_error(err: DibError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// A bitmap buffer handle for JavaScript.
///
/// # Memory Management
///
/// The buffer lives in WASM memory. `bytes()` and `pixels()` copy into
/// JavaScript memory as a `Uint8Array`.
///
/// The `free()` method can be called to explicitly release WASM memory, but this is
/// optional as wasm-bindgen's finalizer will handle cleanup automatically.
#[wasm_bindgen]
pub struct JsDib {
    inner: Dib,
}

#[wasm_bindgen]
impl JsDib {
    /// Allocate a buffer.
    ///
    /// # Arguments
    /// * `width` - Width in pixels
    /// * `height` - Height in scanlines
    /// * `bpp` - Bits per pixel: 1, 4, 8, 16, 24 or 32
    /// * `pixels` - Optional rows in storage order, `stride * height` bytes
    /// * `top_down` - Store the top scanline first
    #[wasm_bindgen(constructor)]
    pub fn new(
        width: u32,
        height: u32,
        bpp: u16,
        pixels: Option<Vec<u8>>,
        top_down: bool,
    ) -> Result<JsDib, JsValue> {
        let depth = BitDepth::try_from(bpp).map_err(to_js_error)?;
        let orientation = if top_down {
            Orientation::TopDown
        } else {
            Orientation::BottomUp
        };
        Dib::alloc(width, height, depth, pixels.as_deref(), orientation)
            .map(JsDib::from_dib)
            .map_err(to_js_error)
    }

    /// Parse a packed DIB (header, palette, rows).
    pub fn from_bytes(bytes: &[u8]) -> Result<JsDib, JsValue> {
        Dib::from_bytes(bytes)
            .map(JsDib::from_dib)
            .map_err(to_js_error)
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width()
    }

    /// Height magnitude in scanlines.
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height()
    }

    /// Header height; negative for top-down buffers.
    #[wasm_bindgen(getter)]
    pub fn signed_height(&self) -> i32 {
        self.inner.signed_height()
    }

    #[wasm_bindgen(getter)]
    pub fn bpp(&self) -> u16 {
        self.inner.bpp()
    }

    #[wasm_bindgen(getter)]
    pub fn stride(&self) -> usize {
        self.inner.stride()
    }

    #[wasm_bindgen(getter)]
    pub fn palette_len(&self) -> usize {
        self.inner.palette_len()
    }

    #[wasm_bindgen(getter)]
    pub fn is_top_down(&self) -> bool {
        self.inner.is_top_down()
    }

    /// Size of the whole block in bytes.
    #[wasm_bindgen(getter)]
    pub fn total_size(&self) -> usize {
        self.inner.total_size()
    }

    /// Byte offset of the pixel rows within `bytes()`.
    #[wasm_bindgen(getter)]
    pub fn pixel_offset(&self) -> usize {
        self.inner.pixel_offset()
    }

    /// Returns the whole block (header, palette, rows) as Uint8Array.
    pub fn bytes(&self) -> Vec<u8> {
        self.inner.as_bytes().to_vec()
    }

    /// Returns the pixel rows in storage order as Uint8Array.
    pub fn pixels(&self) -> Vec<u8> {
        self.inner.pixels().to_vec()
    }

    /// Returns the image as top-first RGBA bytes, 4 per pixel.
    pub fn to_rgba(&self) -> Vec<u8> {
        cldib_core::to_rgba_image(&self.inner).into_raw()
    }

    /// Returns `{ width, height, bpp, stride }` as a plain object.
    pub fn attributes(&self) -> Result<JsValue, JsValue> {
        let attrs = query_attributes(Some(&self.inner));
        serde_wasm_bindgen::to_value(&attrs).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Set palette entry `index` from red, green and blue.
    pub fn set_palette_entry(&mut self, index: usize, red: u8, green: u8, blue: u8) -> bool {
        match self.inner.palette_mut().get_mut(index) {
            Some(entry) => {
                *entry = cldib_core::RgbQuad::new(red, green, blue);
                true
            }
            None => false,
        }
    }

    /// Duplicate the buffer.
    pub fn clone_dib(&self) -> Result<JsDib, JsValue> {
        self.inner
            .try_clone()
            .map(JsDib::from_dib)
            .map_err(to_js_error)
    }

    /// Explicitly free WASM memory.
    ///
    /// This is optional - wasm-bindgen's finalizer will handle cleanup automatically.
    pub fn free(self) {
        self.inner.free()
    }
}

impl JsDib {
    pub(crate) fn from_dib(inner: Dib) -> Self {
        Self { inner }
    }

    pub(crate) fn dib(&self) -> &Dib {
        &self.inner
    }

    pub(crate) fn dib_mut(&mut self) -> &mut Dib {
        &mut self.inner
    }
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_invalid_bpp_is_js_error() {
        let err = JsDib::new(4, 4, 3, None, true).err().unwrap();
        assert_eq!(err.as_string().unwrap(), "Unsupported bit depth: 3");
    }

    #[wasm_bindgen_test]
    fn test_wrong_pixel_length_is_js_error() {
        let err = JsDib::new(4, 4, 8, Some(vec![0; 3]), true).err().unwrap();
        assert!(err.as_string().unwrap().starts_with("Invalid pixel data"));
    }
}
