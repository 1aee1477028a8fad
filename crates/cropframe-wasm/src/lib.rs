//! Cropframe WASM - WebAssembly bindings for Cropframe
//!
//! This crate exposes the cropframe-core editing session to JavaScript/TypeScript.
//!
//! # Module Structure
//!
//! - `editor` - The stateful [`JsCropEditor`] handle (load, rotate, zoom, crop, export)
//! - `types` - WASM-compatible wrapper types for image data
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsCropEditor } from '@cropframe/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const editor = new JsCropEditor();
//! editor.load(new Uint8Array(await file.arrayBuffer()));
//! const frame = new ImageData(
//!   new Uint8ClampedArray(editor.workingPixels()),
//!   editor.canvasDimension,
//! );
//! ```

use wasm_bindgen::prelude::*;

mod editor;
mod types;

pub use editor::JsCropEditor;
pub use types::JsCropImage;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
