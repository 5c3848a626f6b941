// text/ - Phrase textures
//
// Composes the current phrase into a grayscale texture from the embedded
// glyph atlas: dark strokes on a lit background, sized from the monospace
// metrics (chars * advance) times a supersample factor so the plane has
// sub-cell detail for the filter to quantize.

pub mod atlas;
mod atlas_data;

const BACKGROUND: u8 = 255;
const INK: u8 = 0;

/// Phrases the home page cycles through.
pub const HOME_PHRASES: &[&str] = &[
    "WELCOME",
    "CREATIVE DEVELOPER",
    "SOFTWARE ENGINEER",
    "DESIGN + CODE",
    "BUILT WITH RUST",
];

pub struct TextTexture {
    pixels: Vec<u8>,
    w: usize,
    h: usize,
    scale: usize,
}

impl TextTexture {
    pub fn new(scale: usize) -> Self {
        let mut tex = Self {
            pixels: Vec::new(),
            w: 0,
            h: 0,
            scale: scale.max(1),
        };
        tex.compose("");
        tex
    }

    /// Rebuild the texture for a phrase. Characters the atlas doesn't cover
    /// occupy one blank advance, so layout stays stable.
    pub fn compose(&mut self, phrase: &str) {
        let adv = atlas::advance() * self.scale;
        self.h = atlas::line_height() * self.scale;
        self.w = (phrase.len() * adv).max(1);
        self.pixels.clear();
        self.pixels.resize(self.w * self.h, BACKGROUND);

        for (slot, code) in phrase.bytes().enumerate() {
            let Some(rows) = atlas::glyph_rows(code) else {
                continue;
            };
            let x0 = slot * adv;
            for gy in 0..atlas::line_height() {
                for gx in 0..atlas::advance() {
                    if !atlas::glyph_bit(rows, gx, gy) {
                        continue;
                    }
                    for sy in 0..self.scale {
                        let y = gy * self.scale + sy;
                        let row = y * self.w + x0 + gx * self.scale;
                        self.pixels[row..row + self.scale].fill(INK);
                    }
                }
            }
        }
    }

    /// Bilinear sample at normalized (u, v), 0 = dark ink, 1 = lit
    /// background. Out-of-range coordinates read as background.
    pub fn sample(&self, u: f32, v: f32) -> f32 {
        if !(0.0..=1.0).contains(&u) || !(0.0..=1.0).contains(&v) {
            return 1.0;
        }
        let fx = u * (self.w - 1) as f32;
        let fy = v * (self.h - 1) as f32;
        let x0 = fx as usize;
        let y0 = fy as usize;
        let x1 = (x0 + 1).min(self.w - 1);
        let y1 = (y0 + 1).min(self.h - 1);
        let tx = fx - x0 as f32;
        let ty = fy - y0 as f32;

        let p = |x: usize, y: usize| self.pixels[y * self.w + x] as f32 / 255.0;
        let top = p(x0, y0) * (1.0 - tx) + p(x1, y0) * tx;
        let bot = p(x0, y1) * (1.0 - tx) + p(x1, y1) * tx;
        top * (1.0 - ty) + bot * ty
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn height(&self) -> usize {
        self.h
    }

    pub fn aspect(&self) -> f32 {
        self.w as f32 / self.h as f32
    }
}

/// Fixed phrase list advanced on a timer; wraps back to the first phrase
/// after len * period of accumulated ticks.
pub struct Phrases {
    list: Vec<String>,
    period_ms: f32,
    clock_ms: f32,
    index: usize,
}

impl Phrases {
    pub fn new(list: Vec<String>, period_ms: f32) -> Self {
        debug_assert!(!list.is_empty());
        Self {
            list,
            period_ms,
            clock_ms: 0.0,
            index: 0,
        }
    }

    pub fn current(&self) -> &str {
        &self.list[self.index]
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Accumulate elapsed time; returns the new phrase when the timer rolls
    /// over. A dt spanning several periods advances several steps.
    pub fn advance(&mut self, dt_ms: f32) -> Option<&str> {
        self.clock_ms += dt_ms;
        let mut changed = false;
        while self.clock_ms >= self.period_ms {
            self.clock_ms -= self.period_ms;
            self.index = (self.index + 1) % self.list.len();
            changed = true;
        }
        if changed {
            log::debug!("phrase -> {:?}", self.current());
            Some(self.current())
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phrases() -> Phrases {
        Phrases::new(
            vec!["ONE".into(), "TWO".into(), "THREE".into()],
            4000.0,
        )
    }

    #[test]
    fn texture_size_follows_metrics() {
        let mut tex = TextTexture::new(2);
        tex.compose("ABC");
        assert_eq!(tex.width(), 3 * 8 * 2);
        assert_eq!(tex.height(), 8 * 2);
    }

    #[test]
    fn empty_phrase_yields_minimal_lit_texture() {
        let tex = TextTexture::new(2);
        assert_eq!(tex.width(), 1);
        assert_eq!(tex.height(), 16);
        assert!((tex.sample(0.5, 0.5) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn composed_phrase_contains_ink() {
        let mut tex = TextTexture::new(2);
        tex.compose("A");
        let mut darkest: f32 = 1.0;
        for i in 0..=100 {
            for j in 0..=100 {
                darkest = darkest.min(tex.sample(i as f32 / 100.0, j as f32 / 100.0));
            }
        }
        assert!(darkest < 0.5, "no ink found, darkest sample {darkest}");
    }

    #[test]
    fn uncovered_characters_stay_blank() {
        let mut tex = TextTexture::new(1);
        tex.compose("\x7f");
        assert_eq!(tex.width(), 8);
        assert!((tex.sample(0.5, 0.5) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn out_of_range_sample_reads_background() {
        let mut tex = TextTexture::new(1);
        tex.compose("W");
        assert!((tex.sample(-0.1, 0.5) - 1.0).abs() < 1e-6);
        assert!((tex.sample(0.5, 1.1) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn rotation_cycles_back_to_first() {
        let mut p = phrases();
        assert_eq!(p.current(), "ONE");
        for _ in 0..3 {
            p.advance(4000.0);
        }
        assert_eq!(p.current(), "ONE");
    }

    #[test]
    fn sub_period_ticks_accumulate() {
        let mut p = phrases();
        for _ in 0..249 {
            assert!(p.advance(16.0).is_none());
        }
        // 250 * 16ms = 4000ms
        assert_eq!(p.advance(16.0), Some("TWO"));
    }

    #[test]
    fn oversized_dt_advances_multiple_steps() {
        let mut p = phrases();
        assert_eq!(p.advance(8000.0), Some("THREE"));
    }

    #[test]
    fn home_phrases_fit_the_atlas() {
        for phrase in HOME_PHRASES {
            for code in phrase.bytes() {
                assert!(
                    atlas::glyph_rows(code).is_some(),
                    "{:?} missing from atlas",
                    code as char
                );
            }
        }
    }
}
