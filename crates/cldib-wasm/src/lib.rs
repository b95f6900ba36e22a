//! cldib WASM - WebAssembly bindings for cldib
//!
//! This crate provides WASM bindings to expose the cldib-core bitmap buffer
//! model to JavaScript/TypeScript applications.
//!
//! # Module Structure
//!
//! - `types` - `JsDib`, the buffer handle and its accessors
//! - `transform` - flip, orientation toggle, channel swap and crop bindings
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsDib, crop_copy, flip_horizontal } from '@cldib/wasm';
//!
//! await init();
//!
//! const dib = new JsDib(64, 32, 8, undefined, true);
//! flip_horizontal(dib);
//! const tile = crop_copy(dib, 0, 0, 16, 16, false);
//! console.log(`${tile.width}x${tile.height}, stride ${tile.stride}`);
//! ```

use wasm_bindgen::prelude::*;

mod transform;
mod types;

// Re-export public types
pub use transform::{
    crop_copy, crop_rect, flip_horizontal, flip_vertical, swap_red_blue, toggle_orientation,
};
pub use types::JsDib;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
