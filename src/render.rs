// render.rs - Cell-resolution rasterizer
//
// The render target: an RGBA framebuffer with one pixel per character
// cell. Each pixel unprojects through the inverse view-projection,
// intersects the text plane in model space, and samples the phrase
// texture at the hit UV. Rays that miss the plane keep the lit clear
// color, so the filter quantizes them to blanks.

use glam::{Mat4, Vec3, Vec4};

use crate::scene::TextScene;
use crate::text::TextTexture;

const CLEAR: u8 = 255;

pub struct Rasterizer {
    fb: Vec<u8>,
    w: usize,
    h: usize,
}

impl Rasterizer {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            fb: vec![CLEAR; w * h * 4],
            w,
            h,
        }
    }

    pub fn resize(&mut self, w: usize, h: usize) {
        self.w = w;
        self.h = h;
        self.fb.clear();
        self.fb.resize(w * h * 4, CLEAR);
    }

    pub fn clear(&mut self) {
        self.fb.fill(CLEAR);
    }

    pub fn framebuffer(&self) -> &[u8] {
        &self.fb
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn height(&self) -> usize {
        self.h
    }

    pub fn render(&mut self, scene: &TextScene, tex: &TextTexture) {
        self.clear();
        if self.w == 0 || self.h == 0 {
            return;
        }

        let inv_vp = scene.view_projection().inverse();
        let inv_model = scene.model().inverse();

        for y in 0..self.h {
            let ndc_y = 1.0 - (y as f32 + 0.5) / self.h as f32 * 2.0;
            for x in 0..self.w {
                let ndc_x = (x as f32 + 0.5) / self.w as f32 * 2.0 - 1.0;

                // Ray endpoints on the near/far planes, in model space.
                let near = inv_model * unproject(inv_vp, ndc_x, ndc_y, 0.0).extend(1.0);
                let far = inv_model * unproject(inv_vp, ndc_x, ndc_y, 1.0).extend(1.0);
                let origin = near.truncate();
                let dir = (far - near).truncate();

                if dir.z.abs() < 1e-6 {
                    continue; // edge-on, no stable intersection
                }
                let t = -origin.z / dir.z;
                if !(0.0..=1.0).contains(&t) {
                    continue;
                }

                let hit = origin + dir * t;
                if hit.x.abs() > 0.5 || hit.y.abs() > 0.5 {
                    continue;
                }

                let luma = tex.sample(hit.x + 0.5, 0.5 - hit.y);
                let v = (luma * 255.0) as u8;
                let i = (y * self.w + x) * 4;
                self.fb[i] = v;
                self.fb[i + 1] = v;
                self.fb[i + 2] = v;
                self.fb[i + 3] = 255;
            }
        }
    }
}

// NDC at a given depth back to world space.
#[inline]
fn unproject(inv_vp: Mat4, ndc_x: f32, ndc_y: f32, depth: f32) -> Vec3 {
    let p = inv_vp * Vec4::new(ndc_x, ndc_y, depth, 1.0);
    p.truncate() / p.w
}
