// scene/ - Text plane and camera
//
// One unit quad carrying the phrase texture, tilted by the eased pointer,
// viewed by a fixed perspective camera on +Z. The camera distance is
// re-derived whenever the viewport or plane aspect changes so the plane
// fits the view at rest.

use glam::Mat4;

const FOV_Y: f32 = std::f32::consts::FRAC_PI_4; // 45 degrees
const Z_NEAR: f32 = 0.1;
const Z_FAR: f32 = 100.0;

// Fraction of the viewport the plane fills at rest.
const FILL: f32 = 0.8;

// Hard cap on tilt, radians. Keeps the plane from ever going edge-on.
const MAX_TILT: f32 = 0.6;

pub struct TextScene {
    viewport_aspect: f32,
    plane_w: f32,
    plane_h: f32,
    tilt_x: f32,
    tilt_y: f32,
    camera_dist: f32,
}

impl TextScene {
    pub fn new() -> Self {
        let mut scene = Self {
            viewport_aspect: 1.0,
            plane_w: 1.0,
            plane_h: 1.0,
            tilt_x: 0.0,
            tilt_y: 0.0,
            camera_dist: 1.0,
        };
        scene.fit_camera();
        scene
    }

    pub fn set_viewport(&mut self, aspect: f32) {
        if aspect > 0.0 && aspect.is_finite() {
            self.viewport_aspect = aspect;
            self.fit_camera();
        }
    }

    /// Size the plane from the texture aspect, height fixed at one unit.
    pub fn set_plane_aspect(&mut self, aspect: f32) {
        if aspect > 0.0 && aspect.is_finite() {
            self.plane_w = aspect;
            self.plane_h = 1.0;
            self.fit_camera();
        }
    }

    /// Tilt around X (vertical pointer offset) and Y (horizontal).
    pub fn set_tilt(&mut self, rx: f32, ry: f32) {
        self.tilt_x = rx.clamp(-MAX_TILT, MAX_TILT);
        self.tilt_y = ry.clamp(-MAX_TILT, MAX_TILT);
    }

    pub fn tilt(&self) -> (f32, f32) {
        (self.tilt_x, self.tilt_y)
    }

    // Back the camera off until both plane extents fit FILL of the view.
    fn fit_camera(&mut self) {
        let half_tan = (FOV_Y * 0.5).tan();
        let for_height = self.plane_h / (2.0 * FILL * half_tan);
        let for_width = self.plane_w / (2.0 * FILL * half_tan * self.viewport_aspect);
        self.camera_dist = for_height.max(for_width).max(Z_NEAR * 2.0);
    }

    /// Model matrix: tilt rotations around a unit quad scaled to plane size.
    pub fn model(&self) -> Mat4 {
        Mat4::from_rotation_y(self.tilt_y)
            * Mat4::from_rotation_x(self.tilt_x)
            * Mat4::from_scale(glam::vec3(self.plane_w, self.plane_h, 1.0))
    }

    pub fn view_projection(&self) -> Mat4 {
        let view = Mat4::look_at_rh(
            glam::vec3(0.0, 0.0, self.camera_dist),
            glam::Vec3::ZERO,
            glam::Vec3::Y,
        );
        let proj = Mat4::perspective_rh(FOV_Y, self.viewport_aspect, Z_NEAR, Z_FAR);
        proj * view
    }
}

impl Default for TextScene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    #[test]
    fn tilt_is_clamped() {
        let mut s = TextScene::new();
        s.set_tilt(10.0, -10.0);
        assert_eq!(s.tilt(), (MAX_TILT, -MAX_TILT));
    }

    #[test]
    fn degenerate_aspects_are_ignored() {
        let mut s = TextScene::new();
        s.set_viewport(2.0);
        s.set_viewport(0.0);
        s.set_plane_aspect(f32::NAN);
        let vp = s.view_projection();
        assert!(vp.to_cols_array().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn plane_center_projects_to_view_center() {
        let mut s = TextScene::new();
        s.set_viewport(1.5);
        s.set_plane_aspect(4.0);
        let clip = s.view_projection() * s.model() * Vec4::new(0.0, 0.0, 0.0, 1.0);
        let ndc = clip / clip.w;
        assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
    }

    #[test]
    fn plane_edges_stay_inside_ndc_at_rest() {
        let mut s = TextScene::new();
        s.set_viewport(16.0 / 9.0);
        s.set_plane_aspect(6.0);
        for (x, y) in [(-0.5, -0.5), (0.5, -0.5), (-0.5, 0.5), (0.5, 0.5)] {
            let clip = s.view_projection() * s.model() * Vec4::new(x, y, 0.0, 1.0);
            let ndc = clip / clip.w;
            assert!(
                ndc.x.abs() <= 1.0 && ndc.y.abs() <= 1.0,
                "corner left ndc: {ndc:?}"
            );
        }
    }
}
