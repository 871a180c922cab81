//! Rotscale WASM - WebAssembly bindings for rotscale
//!
//! Exposes orientation correction and fit-to-size scaling to JavaScript.
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsImage, rotate_and_scale_from_camera } from '@rotscale/wasm';
//!
//! await init();
//!
//! // RGBA pixels straight from the sensor, EXIF orientation 6
//! const photo = new JsImage(2000, 3000, 6, pixels);
//! const preview = rotate_and_scale_from_camera(photo, 600);
//! console.log(`${preview.width}x${preview.height}`); // 600x400
//! ```

use wasm_bindgen::prelude::*;

mod transform;
mod types;

pub use transform::{rotate, rotate_and_scale_from_camera, scale};
pub use types::{ImageInfo, JsImage};

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
