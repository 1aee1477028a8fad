//! WASM bindings for the editing session.
//!
//! The page owns the buttons, the crop widget and the download link; it
//! drives a [`JsCropEditor`] and pulls pixels back out after each call.
//!
//! # Example (TypeScript)
//!
//! ```typescript
//! const editor = JsCropEditor.withConfig({ canvasDimension: 1500 });
//! editor.load(new Uint8Array(await file.arrayBuffer()));
//! editor.rotate();
//! editor.zoomIn();
//!
//! const crop = editor.setCrop(pixelCrop.x, pixelCrop.y, pixelCrop.width, pixelCrop.height);
//! const png = editor.exportPng();
//! if (png) download(new Blob([png], { type: 'image/png' }), editor.exportFileName());
//! ```

use cropframe_core::{
    CanvasPhase, CropRegion, EditorConfig, RasterCanvas, SourceImage, EXPORT_FILE_NAME,
};
use wasm_bindgen::prelude::*;

use crate::types::JsCropImage;

fn to_js_error<E: std::fmt::Display>(err: E) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// A stateful editor handle for JavaScript.
///
/// Every method is a no-op until an image has been loaded.
#[wasm_bindgen]
pub struct JsCropEditor {
    canvas: RasterCanvas,
}

impl Default for JsCropEditor {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl JsCropEditor {
    /// Create an editor with the default configuration (1500px canvas, 5:6 crop).
    #[wasm_bindgen(constructor)]
    pub fn new() -> JsCropEditor {
        JsCropEditor {
            canvas: RasterCanvas::default(),
        }
    }

    /// Create an editor from a partial configuration object.
    ///
    /// Missing fields take their defaults.
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(config: JsValue) -> Result<JsCropEditor, JsValue> {
        let config: EditorConfig = serde_wasm_bindgen::from_value(config)
            .map_err(|e| JsValue::from_str(&format!("Invalid editor config: {}", e)))?;
        let canvas = RasterCanvas::new(config).map_err(to_js_error)?;
        Ok(JsCropEditor { canvas })
    }

    /// Decode PNG/JPEG bytes and start a new session.
    pub fn load(&mut self, bytes: &[u8]) -> Result<(), JsValue> {
        self.canvas.load(bytes).map_err(to_js_error)
    }

    /// Start a new session from RGBA pixels the page already decoded.
    #[wasm_bindgen(js_name = loadPixels)]
    pub fn load_pixels(&mut self, width: u32, height: u32, pixels: Vec<u8>) -> Result<(), JsValue> {
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(JsValue::from_str(&format!(
                "Expected {} bytes for {}x{} RGBA, got {}",
                expected,
                width,
                height,
                pixels.len()
            )));
        }
        self.canvas.initialize(SourceImage::new(width, height, pixels));
        Ok(())
    }

    /// Rotate 90° clockwise.
    pub fn rotate(&mut self) {
        self.canvas.rotate90();
    }

    #[wasm_bindgen(js_name = zoomIn)]
    pub fn zoom_in(&mut self) {
        self.canvas.zoom_in();
    }

    #[wasm_bindgen(js_name = zoomOut)]
    pub fn zoom_out(&mut self) {
        self.canvas.zoom_out();
    }

    /// Commit a crop rectangle from the selection widget.
    ///
    /// Returns the extracted pixels, or `undefined` if nothing was extracted.
    #[wasm_bindgen(js_name = setCrop)]
    pub fn set_crop(&mut self, x: i32, y: i32, width: u32, height: u32) -> Option<JsCropImage> {
        self.canvas
            .set_crop_region(CropRegion::new(x, y, width, height))
            .map(JsCropImage::from_output)
    }

    #[wasm_bindgen(js_name = clearCrop)]
    pub fn clear_crop(&mut self) {
        self.canvas.clear_crop();
    }

    /// RGBA pixels of the working buffer, or `undefined` before load.
    #[wasm_bindgen(js_name = workingPixels)]
    pub fn working_pixels(&self) -> Option<Vec<u8>> {
        self.canvas.buffer().map(|b| b.pixels().to_vec())
    }

    /// Side length of the working buffer in pixels.
    #[wasm_bindgen(getter, js_name = canvasDimension)]
    pub fn canvas_dimension(&self) -> u32 {
        self.canvas.config().canvas_dimension
    }

    /// The last extracted crop.
    #[wasm_bindgen(js_name = croppedImage)]
    pub fn cropped_image(&self) -> Option<JsCropImage> {
        self.canvas.output().map(JsCropImage::from_output)
    }

    /// PNG bytes of the current crop, or `undefined` if there is none.
    #[wasm_bindgen(js_name = exportPng)]
    pub fn export_png(&self) -> Result<Option<Vec<u8>>, JsValue> {
        self.canvas.export_png().map_err(to_js_error)
    }

    /// Download name for the exported crop.
    #[wasm_bindgen(js_name = exportFileName)]
    pub fn export_file_name(&self) -> String {
        EXPORT_FILE_NAME.to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn scale(&self) -> Option<f64> {
        self.canvas.state().map(|s| s.scale)
    }

    /// Rotation in degrees (0, 90, 180, 270).
    #[wasm_bindgen(getter)]
    pub fn rotation(&self) -> Option<u16> {
        self.canvas.state().map(|s| s.rotation.degrees())
    }

    /// `"uninitialized"`, `"ready"` or `"cropped"`.
    #[wasm_bindgen(getter)]
    pub fn phase(&self) -> String {
        phase_name(self.canvas.phase()).to_string()
    }

    /// Bounding box of the visible image as `{ x, y, width, height }`.
    #[wasm_bindgen(js_name = contentRect)]
    pub fn content_rect(&self) -> Result<JsValue, JsValue> {
        match self.canvas.content_rect() {
            Some(rect) => serde_wasm_bindgen::to_value(&rect).map_err(to_js_error),
            None => Ok(JsValue::UNDEFINED),
        }
    }
}

fn phase_name(phase: CanvasPhase) -> &'static str {
    match phase {
        CanvasPhase::Uninitialized => "uninitialized",
        CanvasPhase::Ready => "ready",
        CanvasPhase::Cropped => "cropped",
    }
}

/// Tests for editor bindings.
///
/// Error paths build a `JsValue` and only work on wasm32 targets, so the
/// native tests stick to the success paths.
#[cfg(test)]
mod tests {
    use super::*;

    fn load_gradient(editor: &mut JsCropEditor, width: u32, height: u32) {
        let pixels: Vec<u8> = (0..width * height)
            .flat_map(|i| [(i % 256) as u8, 0, 0, 255])
            .collect();
        editor.load_pixels(width, height, pixels).unwrap();
    }

    #[test]
    fn test_defaults_before_load() {
        let editor = JsCropEditor::new();
        assert_eq!(editor.canvas_dimension(), 1500);
        assert_eq!(editor.phase(), "uninitialized");
        assert!(editor.scale().is_none());
        assert!(editor.rotation().is_none());
        assert!(editor.working_pixels().is_none());
        assert_eq!(editor.export_file_name(), "croppedImg.png");
    }

    #[test]
    fn test_rotate_and_zoom() {
        let mut editor = JsCropEditor::new();
        load_gradient(&mut editor, 20, 24);

        editor.rotate();
        editor.zoom_in();
        editor.zoom_out();

        assert_eq!(editor.phase(), "ready");
        assert_eq!(editor.rotation(), Some(90));
        assert!((editor.scale().unwrap() - 1.0).abs() < 1e-9);
        assert_eq!(editor.working_pixels().unwrap().len(), 1500 * 1500 * 4);
    }

    #[test]
    fn test_crop_and_export() {
        let mut editor = JsCropEditor::new();
        load_gradient(&mut editor, 20, 24);

        let crop = editor.set_crop(0, 0, 10, 12).unwrap();
        assert_eq!((crop.width(), crop.height()), (10, 12));
        assert_eq!(editor.phase(), "cropped");
        assert!(editor.cropped_image().is_some());

        let png = editor.export_png().unwrap().unwrap();
        assert_eq!(&png[1..4], b"PNG");

        editor.clear_crop();
        assert_eq!(editor.phase(), "ready");
        assert!(editor.export_png().unwrap().is_none());
    }

    #[test]
    fn test_phase_names() {
        assert_eq!(phase_name(CanvasPhase::Uninitialized), "uninitialized");
        assert_eq!(phase_name(CanvasPhase::Ready), "ready");
        assert_eq!(phase_name(CanvasPhase::Cropped), "cropped");
    }
}

/// WASM-specific tests that require JsValue.
///
/// These tests can only run on wasm32 targets. Use `wasm-pack test` to run these.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_with_partial_config() {
        let config = partial_config(64);
        let editor = JsCropEditor::with_config(config).unwrap();
        assert_eq!(editor.canvas_dimension(), 64);
    }

    #[wasm_bindgen_test]
    fn test_with_invalid_config() {
        let config = partial_config(0);
        assert!(JsCropEditor::with_config(config).is_err());
    }

    #[wasm_bindgen_test]
    fn test_load_garbage_bytes() {
        let mut editor = JsCropEditor::new();
        assert!(editor.load(&[1, 2, 3]).is_err());
        assert_eq!(editor.phase(), "uninitialized");
    }

    #[wasm_bindgen_test]
    fn test_load_pixels_length_mismatch() {
        let mut editor = JsCropEditor::new();
        assert!(editor.load_pixels(4, 4, vec![0; 10]).is_err());
    }

    #[wasm_bindgen_test]
    fn test_content_rect_after_load() {
        let mut editor = JsCropEditor::new();
        assert!(editor.content_rect().unwrap().is_undefined());

        editor.load_pixels(10, 12, vec![255; 10 * 12 * 4]).unwrap();
        assert!(editor.content_rect().unwrap().is_object());
    }

    #[derive(serde::Serialize)]
    #[serde(rename_all = "camelCase")]
    struct PartialConfig {
        canvas_dimension: u32,
    }

    /// A plain JS object carrying only the canvas dimension.
    fn partial_config(canvas_dimension: u32) -> JsValue {
        serde_wasm_bindgen::to_value(&PartialConfig { canvas_dimension }).unwrap()
    }
}
