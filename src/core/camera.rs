// Perspective camera with pointer-driven parallax drift.
//
// The camera never takes direct input; each frame its eye eases toward a
// target derived from the normalized pointer so the scene appears to be
// looked at from slightly different angles.

use glam::{Mat4, Vec2, Vec3};

/// Static camera placement and drift response.
#[derive(Clone, Debug)]
pub struct CameraParams {
    pub start_eye: Vec3,
    pub look_at: Vec3,
    pub fovy_degrees: f32,
    pub znear: f32,
    pub zfar: f32,
    /// Pointer-to-target gain on X and Y.
    pub drift_gain: Vec2,
    /// Eye height the drift is centred on.
    pub drift_base_y: f32,
    /// Fraction of the remaining distance covered each frame.
    pub smoothing: f32,
}

impl Default for CameraParams {
    fn default() -> Self {
        Self {
            start_eye: Vec3::new(0.0, 15.0, 30.0),
            look_at: Vec3::new(0.0, 10.0, 0.0),
            fovy_degrees: 60.0,
            znear: 0.1,
            zfar: 1000.0,
            drift_gain: Vec2::new(2.0, 1.0),
            drift_base_y: 15.0,
            smoothing: 0.05,
        }
    }
}

/// Right-handed perspective camera whose eye drifts toward the pointer.
#[derive(Clone, Debug)]
pub struct CameraRig {
    pub eye: Vec3,
    pub aspect: f32,
    params: CameraParams,
}

impl CameraRig {
    pub fn new(params: CameraParams, aspect: f32) -> Self {
        Self {
            eye: params.start_eye,
            aspect: sanitize_aspect(aspect),
            params,
        }
    }

    /// Target eye position for a pointer in `[-1, 1]²` (y up).
    #[inline]
    pub fn drift_target(&self, pointer: Vec2) -> Vec2 {
        Vec2::new(
            pointer.x * self.params.drift_gain.x,
            pointer.y * self.params.drift_gain.y + self.params.drift_base_y,
        )
    }

    /// Ease the eye one frame toward the pointer target. Z is left alone.
    pub fn drift(&mut self, pointer: Vec2) {
        let target = self.drift_target(pointer);
        let k = self.params.smoothing;
        self.eye.x += (target.x - self.eye.x) * k;
        self.eye.y += (target.y - self.eye.y) * k;
    }

    /// Track a viewport size change.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.aspect = sanitize_aspect(width as f32 / height as f32);
    }

    #[inline]
    pub fn target(&self) -> Vec3 {
        self.params.look_at
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.params.fovy_degrees.to_radians(),
            self.aspect,
            self.params.znear,
            self.params.zfar,
        )
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.params.look_at, Vec3::Y)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn params(&self) -> &CameraParams {
        &self.params
    }
}

#[inline]
fn sanitize_aspect(aspect: f32) -> f32 {
    if aspect.is_finite() && aspect > 0.0 {
        aspect
    } else {
        1.0
    }
}
