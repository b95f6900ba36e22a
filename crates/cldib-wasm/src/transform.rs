//! WASM bindings for flip and crop operations.

use crate::types::{to_js_error, JsDib};
use cldib_core::transform::{
    crop_copy as core_crop, flip_horizontal as core_hflip, flip_vertical as core_vflip,
    swap_red_blue as core_swap, toggle_orientation as core_toggle, Rect,
};
use cldib_core::Orientation;
use wasm_bindgen::prelude::*;

/// Mirror every row left to right, in place.
#[wasm_bindgen]
pub fn flip_horizontal(image: &mut JsDib) {
    core_hflip(image.dib_mut());
}

/// Exchange the rows top to bottom in memory, keeping the orientation.
#[wasm_bindgen]
pub fn flip_vertical(image: &mut JsDib) {
    core_vflip(image.dib_mut());
}

/// Switch between top-down and bottom-up without moving pixels.
///
/// Returns true if the buffer is top-down afterwards.
#[wasm_bindgen]
pub fn toggle_orientation(image: &mut JsDib) -> bool {
    core_toggle(image.dib_mut()) == Orientation::TopDown
}

/// Exchange red and blue channels, in place.
#[wasm_bindgen]
pub fn swap_red_blue(image: &mut JsDib) {
    core_swap(image.dib_mut());
}

/// Copy a pixel rectangle into a new buffer.
///
/// # Arguments
///
/// * `image` - Source buffer
/// * `left`, `top`, `right`, `bottom` - Half-open rectangle, origin top-left
/// * `clip` - Clamp to the source bounds instead of failing
///
/// # Example (TypeScript)
///
/// ```typescript
/// // Copy the 16x16 tile at (32, 0)
/// const tile = crop_copy(sheet, 32, 0, 48, 16, false);
/// ```
#[wasm_bindgen]
pub fn crop_copy(
    image: &JsDib,
    left: i32,
    top: i32,
    right: i32,
    bottom: i32,
    clip: bool,
) -> Result<JsDib, JsValue> {
    core_crop(image.dib(), left, top, right, bottom, clip)
        .map(JsDib::from_dib)
        .map_err(to_js_error)
}

/// Copy a rectangle given as `{ left, top, right, bottom }`.
#[wasm_bindgen]
pub fn crop_rect(image: &JsDib, rect: JsValue, clip: bool) -> Result<JsDib, JsValue> {
    let rect: Rect = serde_wasm_bindgen::from_value(rect)
        .map_err(|e| JsValue::from_str(&format!("Invalid rectangle: {}", e)))?;
    cldib_core::crop_rect(image.dib(), rect, clip)
        .map(JsDib::from_dib)
        .map_err(to_js_error)
}
