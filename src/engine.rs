// engine.rs - Frame loop glue
//
// HomeEngine wires the pieces: phrase rotation feeds the text texture,
// the eased pointer tilts the plane and drives the hue, the rasterizer
// fills the cell framebuffer, the filter quantizes it to ASCII bytes.
// The host calls tick once per animation frame with the frame delta;
// the engine owns no clock.

use thiserror::Error;

use crate::filter::{AsciiFilter, CharRamp, RampError, DEFAULT_RAMP};
use crate::render::Rasterizer;
use crate::scene::TextScene;
use crate::text::{Phrases, TextTexture, HOME_PHRASES};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Ramp(#[from] RampError),
    #[error("phrase list is empty")]
    NoPhrases,
    #[error("font size must be positive, got {0}")]
    BadFontSize(f32),
    #[error("char aspect must be positive, got {0}")]
    BadCharAspect(f32),
    #[error("phrase period must be positive, got {0}ms")]
    BadPhrasePeriod(f32),
}

#[derive(Debug, Clone)]
pub struct EngineConfig {
    font_size: f32,
    char_aspect: f32,
    ramp: String,
    invert: bool,
    phrases: Vec<String>,
    phrase_period_ms: f32,
    tilt_max: f32,
    pointer_ease: f32,
    supersample: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            font_size: 12.0,
            char_aspect: 0.6,
            ramp: DEFAULT_RAMP.to_string(),
            invert: true,
            phrases: HOME_PHRASES.iter().map(|s| s.to_string()).collect(),
            phrase_period_ms: 4000.0,
            tilt_max: 0.25,
            pointer_ease: 0.08,
            supersample: 4,
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn char_aspect(&self) -> f32 {
        self.char_aspect
    }

    pub fn phrase_period_ms(&self) -> f32 {
        self.phrase_period_ms
    }

    pub fn with_font_size(mut self, px: f32) -> Self {
        self.font_size = px;
        self
    }

    pub fn with_char_aspect(mut self, aspect: f32) -> Self {
        self.char_aspect = aspect;
        self
    }

    pub fn with_ramp(mut self, ramp: &str) -> Self {
        self.ramp = ramp.to_string();
        self
    }

    pub fn with_invert(mut self, invert: bool) -> Self {
        self.invert = invert;
        self
    }

    pub fn with_phrases(mut self, phrases: Vec<String>) -> Self {
        self.phrases = phrases;
        self
    }

    pub fn with_phrase_period_ms(mut self, ms: f32) -> Self {
        self.phrase_period_ms = ms;
        self
    }

    pub fn with_tilt_max(mut self, radians: f32) -> Self {
        self.tilt_max = radians;
        self
    }

    pub fn with_pointer_ease(mut self, factor: f32) -> Self {
        self.pointer_ease = factor;
        self
    }

    pub fn with_supersample(mut self, scale: usize) -> Self {
        self.supersample = scale;
        self
    }
}

pub struct HomeEngine {
    filter: AsciiFilter,
    scene: TextScene,
    raster: Rasterizer,
    texture: TextTexture,
    phrases: Phrases,

    width_px: f32,
    height_px: f32,

    tilt_max: f32,
    pointer_ease: f32,

    // Raw and eased pointer, container pixel coordinates.
    pointer: (f32, f32),
    eased: (f32, f32),
}

impl HomeEngine {
    pub fn new(config: EngineConfig, width_px: f32, height_px: f32) -> Result<Self, EngineError> {
        if !(config.font_size > 0.0 && config.font_size.is_finite()) {
            return Err(EngineError::BadFontSize(config.font_size));
        }
        if !(config.char_aspect > 0.0 && config.char_aspect.is_finite()) {
            return Err(EngineError::BadCharAspect(config.char_aspect));
        }
        if !(config.phrase_period_ms > 0.0 && config.phrase_period_ms.is_finite()) {
            return Err(EngineError::BadPhrasePeriod(config.phrase_period_ms));
        }
        if config.phrases.is_empty() {
            return Err(EngineError::NoPhrases);
        }
        let ramp = CharRamp::new(&config.ramp, config.invert)?;

        let phrases = Phrases::new(config.phrases, config.phrase_period_ms);
        let mut texture = TextTexture::new(config.supersample);
        texture.compose(phrases.current());

        let mut scene = TextScene::new();
        scene.set_plane_aspect(texture.aspect());

        let mut engine = Self {
            filter: AsciiFilter::new(ramp, config.font_size, config.char_aspect),
            scene,
            raster: Rasterizer::new(0, 0),
            texture,
            phrases,
            width_px: 0.0,
            height_px: 0.0,
            tilt_max: config.tilt_max,
            pointer_ease: config.pointer_ease,
            pointer: (width_px * 0.5, height_px * 0.5),
            eased: (width_px * 0.5, height_px * 0.5),
        };
        engine.resize(width_px, height_px);
        Ok(engine)
    }

    /// Re-derive the cell grid and render target from the container size.
    pub fn resize(&mut self, width_px: f32, height_px: f32) {
        self.width_px = width_px.max(0.0);
        self.height_px = height_px.max(0.0);
        self.filter.set_size(self.width_px, self.height_px);
        self.raster.resize(self.filter.cols(), self.filter.rows());
        if self.width_px > 0.0 && self.height_px > 0.0 {
            self.scene.set_viewport(self.width_px / self.height_px);
        }
        log::debug!(
            "resize {}x{}px -> {}x{} cells",
            self.width_px,
            self.height_px,
            self.filter.cols(),
            self.filter.rows()
        );
    }

    /// Pointer position in container pixel coordinates.
    pub fn set_pointer(&mut self, x: f32, y: f32) {
        self.pointer = (x, y);
    }

    /// One cooperative frame step.
    pub fn tick(&mut self, dt_ms: f32) {
        if let Some(phrase) = self.phrases.advance(dt_ms) {
            self.texture.compose(phrase);
            self.scene.set_plane_aspect(self.texture.aspect());
        }

        self.eased.0 += (self.pointer.0 - self.eased.0) * self.pointer_ease;
        self.eased.1 += (self.pointer.1 - self.eased.1) * self.pointer_ease;

        let (dx, dy) = self.center_offset();
        let (nx, ny) = self.normalized_offset(dx, dy);
        self.scene.set_tilt(-ny * self.tilt_max, nx * self.tilt_max);
        self.filter.set_hue_target(dx, dy);
        self.filter.ease_hue();

        self.raster.render(&self.scene, &self.texture);
        self.filter.apply(self.raster.framebuffer());
    }

    fn center_offset(&self) -> (f32, f32) {
        (
            self.eased.0 - self.width_px * 0.5,
            self.eased.1 - self.height_px * 0.5,
        )
    }

    fn normalized_offset(&self, dx: f32, dy: f32) -> (f32, f32) {
        let nx = if self.width_px > 0.0 { dx / (self.width_px * 0.5) } else { 0.0 };
        let ny = if self.height_px > 0.0 { dy / (self.height_px * 0.5) } else { 0.0 };
        (nx.clamp(-1.0, 1.0), ny.clamp(-1.0, 1.0))
    }

    pub fn cols(&self) -> usize {
        self.filter.cols()
    }

    pub fn rows(&self) -> usize {
        self.filter.rows()
    }

    pub fn output_ptr(&self) -> *const u8 {
        self.filter.ptr()
    }

    pub fn output_len(&self) -> usize {
        self.filter.len()
    }

    pub fn cells(&self) -> &[u8] {
        self.filter.cells()
    }

    pub fn hue_deg(&self) -> f32 {
        self.filter.hue_deg()
    }

    pub fn phrase(&self) -> &str {
        self.phrases.current()
    }

    /// Cell grid as newline-joined text. Debug/native convenience; the wasm
    /// host reads the raw buffer instead.
    pub fn to_text(&self) -> String {
        let cols = self.filter.cols();
        if cols == 0 {
            return String::new();
        }
        let mut out = String::with_capacity(self.filter.len() + self.filter.rows());
        for row in self.filter.cells().chunks(cols) {
            out.push_str(&String::from_utf8_lossy(row));
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> HomeEngine {
        HomeEngine::new(EngineConfig::default(), 480.0, 240.0).unwrap()
    }

    #[test]
    fn grid_matches_container_formula() {
        let e = engine();
        assert_eq!(e.cols(), 66); // floor(480 / (12 * 0.6))
        assert_eq!(e.rows(), 20); // floor(240 / 12)
        assert_eq!(e.output_len(), 66 * 20);
    }

    #[test]
    fn bad_configs_are_rejected() {
        let zero_font = EngineConfig::default().with_font_size(0.0);
        assert!(matches!(
            HomeEngine::new(zero_font, 100.0, 100.0),
            Err(EngineError::BadFontSize(_))
        ));

        let no_phrases = EngineConfig::default().with_phrases(Vec::new());
        assert!(matches!(
            HomeEngine::new(no_phrases, 100.0, 100.0),
            Err(EngineError::NoPhrases)
        ));

        let empty_ramp = EngineConfig::default().with_ramp("");
        assert!(matches!(
            HomeEngine::new(empty_ramp, 100.0, 100.0),
            Err(EngineError::Ramp(RampError::Empty))
        ));

        let zero_period = EngineConfig::default().with_phrase_period_ms(0.0);
        assert!(matches!(
            HomeEngine::new(zero_period, 100.0, 100.0),
            Err(EngineError::BadPhrasePeriod(_))
        ));
    }

    #[test]
    fn first_tick_produces_ink_and_blanks() {
        let mut e = engine();
        e.tick(16.0);
        let cells = e.cells();
        assert!(cells.iter().any(|&c| c != b' '), "no ink cells");
        assert!(cells.iter().any(|&c| c == b' '), "no blank cells");
    }

    #[test]
    fn phrase_rotation_wraps() {
        let mut e = engine();
        let first = e.phrase().to_owned();
        let n = HOME_PHRASES.len();
        for _ in 0..n {
            e.tick(4000.0);
        }
        assert_eq!(e.phrase(), first);
    }

    #[test]
    fn pointer_below_center_turns_hue_toward_90() {
        let mut e = engine();
        e.set_pointer(240.0, 240.0); // bottom center
        for _ in 0..500 {
            e.tick(16.0);
        }
        assert!((e.hue_deg() - 90.0).abs() < 1.0, "hue {}", e.hue_deg());
    }

    #[test]
    fn zero_sized_container_is_inert() {
        let mut e = HomeEngine::new(EngineConfig::default(), 0.0, 0.0).unwrap();
        e.tick(16.0);
        assert_eq!(e.output_len(), 0);
        assert!(e.to_text().is_empty());
    }

    #[test]
    fn resize_rederives_everything() {
        let mut e = engine();
        e.resize(72.0, 24.0);
        assert_eq!((e.cols(), e.rows()), (10, 2));
        e.tick(16.0);
        assert_eq!(e.output_len(), 20);
    }

    #[test]
    fn to_text_shapes_rows() {
        let mut e = engine();
        e.tick(16.0);
        let text = e.to_text();
        assert_eq!(text.lines().count(), e.rows());
        assert!(text.lines().all(|l| l.len() == e.cols()));
    }
}
