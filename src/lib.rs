use wasm_bindgen::prelude::*;

// ============================================================================
// ASCII HOME - Text plane rendered to a character grid
// ============================================================================
//
// The engine owns every per-frame buffer. The JS host drives tick() from
// requestAnimationFrame, reads the cell buffer out of wasm memory via
// output_ptr()/output_len(), pours it into a <pre>, and applies hue_deg()
// as a CSS hue-rotate. Teardown is free() on the exported handle.

mod engine;
pub mod filter;
pub mod render;
pub mod scene;
pub mod text;

pub use engine::{EngineConfig, EngineError, HomeEngine};

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("ascii-engine ready");
}

#[wasm_bindgen]
pub struct AsciiHome {
    inner: HomeEngine,
}

#[wasm_bindgen]
impl AsciiHome {
    /// Build the effect for a container of the given pixel size, with the
    /// home page defaults (12px cells, inverted classic ramp, 4s phrases).
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32) -> Result<AsciiHome, JsError> {
        let inner = HomeEngine::new(EngineConfig::default(), width, height)
            .map_err(|e| JsError::new(&e.to_string()))?;
        Ok(Self { inner })
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.inner.resize(width, height);
    }

    /// Pointer position relative to the container, in pixels.
    pub fn set_pointer(&mut self, x: f32, y: f32) {
        self.inner.set_pointer(x, y);
    }

    /// Advance one animation frame by the elapsed milliseconds.
    pub fn tick(&mut self, dt_ms: f32) {
        self.inner.tick(dt_ms);
    }

    pub fn output_ptr(&self) -> *const u8 {
        self.inner.output_ptr()
    }

    pub fn output_len(&self) -> usize {
        self.inner.output_len()
    }

    pub fn cols(&self) -> u32 {
        self.inner.cols() as u32
    }

    pub fn rows(&self) -> u32 {
        self.inner.rows() as u32
    }

    /// Current hue-rotation angle for the host's CSS filter, degrees.
    pub fn hue_deg(&self) -> f32 {
        self.inner.hue_deg()
    }

    pub fn phrase(&self) -> String {
        self.inner.phrase().to_string()
    }
}
