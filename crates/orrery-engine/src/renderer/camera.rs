use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Quat, Vec3};
use serde::Deserialize;

use crate::api::game::GameConfig;
use crate::extensions::easing::lerp_vec3;

/// Who owns the camera pose this frame.
///
/// `Free`: user drag/zoom input moves the camera, automatic controllers stay out.
/// `Follow`: an automatic controller moves the camera, user input is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CameraMode {
    #[default]
    Free,
    Follow,
}

impl CameraMode {
    pub fn toggled(self) -> Self {
        match self {
            CameraMode::Free => CameraMode::Follow,
            CameraMode::Follow => CameraMode::Free,
        }
    }

    /// Wire encoding used by custom events: 0 = free, anything else = follow.
    pub fn from_wire(value: f32) -> Self {
        if value == 0.0 { CameraMode::Free } else { CameraMode::Follow }
    }

    pub fn to_wire(self) -> f32 {
        match self {
            CameraMode::Free => 0.0,
            CameraMode::Follow => 1.0,
        }
    }
}

/// Perspective camera with an explicit look target.
#[derive(Debug, Clone)]
pub struct Camera3D {
    /// Eye position in world space.
    pub position: Vec3,
    /// Point the camera looks at.
    pub target: Vec3,
    /// World up direction.
    pub up: Vec3,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    /// Viewport width / height.
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    mode: CameraMode,
    min_distance: f32,
    max_distance: f32,
}

/// GPU-side uniform data for the camera: view-projection plus eye position.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub eye: [f32; 4],
}

impl CameraUniform {
    pub const FLOATS: usize = 20;

    /// Raw pointer for reads from WASM memory.
    pub fn as_ptr(&self) -> *const f32 {
        self as *const Self as *const f32
    }
}

impl Camera3D {
    /// Elevation limit for user orbiting (~80°), keeps the view off the poles.
    const MAX_ELEVATION: f32 = 1.4;

    pub fn new(position: Vec3, target: Vec3) -> Self {
        Self {
            position,
            target,
            up: Vec3::Y,
            fov_y: 75f32.to_radians(),
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
            mode: CameraMode::Free,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
        }
    }

    /// Build the starting camera from the engine config, looking at the origin.
    pub fn from_config(config: &GameConfig) -> Self {
        let mut cam = Self::new(Vec3::from_array(config.camera_position), Vec3::ZERO);
        cam.fov_y = config.fov_y_degrees.to_radians();
        cam.near = config.near;
        cam.far = config.far;
        cam
    }

    pub fn mode(&self) -> CameraMode {
        self.mode
    }

    /// Switch ownership immediately. Returns true if the mode changed.
    pub fn set_mode(&mut self, mode: CameraMode) -> bool {
        let changed = self.mode != mode;
        self.mode = mode;
        changed
    }

    /// Limit the eye-to-target distance reachable through `user_zoom`.
    pub fn set_distance_limits(&mut self, min: f32, max: f32) {
        self.min_distance = min.max(0.0);
        self.max_distance = max.max(self.min_distance);
    }

    /// Resize the viewport (e.g. on window resize).
    pub fn resize(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }

    /// Aim the camera at a point.
    pub fn look_at(&mut self, target: Vec3) {
        self.target = target;
    }

    /// Move one exponential-smoothing step toward `ideal`.
    /// `alpha` is the fraction of the remaining gap closed this step, clamped to [0, 1].
    pub fn approach(&mut self, ideal: Vec3, alpha: f32) {
        self.position = lerp_vec3(self.position, ideal, alpha.clamp(0.0, 1.0));
    }

    /// Distance from eye to look target.
    pub fn distance(&self) -> f32 {
        (self.position - self.target).length()
    }

    /// Orbit around the look target (user drag). Ignored unless the mode is `Free`.
    pub fn user_orbit(&mut self, d_azimuth: f32, d_elevation: f32) {
        if self.mode != CameraMode::Free {
            return;
        }
        let offset = self.position - self.target;
        let radius = offset.length();
        if radius < 1e-6 {
            return;
        }
        let azimuth = offset.z.atan2(offset.x) + d_azimuth;
        let elevation = ((offset.y / radius).clamp(-1.0, 1.0).asin() + d_elevation)
            .clamp(-Self::MAX_ELEVATION, Self::MAX_ELEVATION);
        let dir = Vec3::new(
            elevation.cos() * azimuth.cos(),
            elevation.sin(),
            elevation.cos() * azimuth.sin(),
        );
        self.position = self.target + dir * radius;
    }

    /// Scale the eye-to-target distance (user wheel), clamped to the distance limits.
    /// Ignored unless the mode is `Free`.
    pub fn user_zoom(&mut self, factor: f32) {
        if self.mode != CameraMode::Free || !factor.is_finite() || factor <= 0.0 {
            return;
        }
        let offset = self.position - self.target;
        let radius = offset.length();
        if radius < 1e-6 {
            return;
        }
        let new_radius = (radius * factor).clamp(self.min_distance, self.max_distance);
        self.position = self.target + offset / radius * new_radius;
    }

    /// Unit vector from eye toward target. Falls back to -Z when they coincide.
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).try_normalize().unwrap_or(Vec3::NEG_Z)
    }

    /// Right-handed view matrix.
    pub fn view_matrix(&self) -> Mat4 {
        let forward = self.forward();
        let up = if forward.cross(self.up).length_squared() < 1e-8 {
            Vec3::Z
        } else {
            self.up
        };
        Mat4::look_to_rh(self.position, forward, up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }

    /// World-space orientation of the camera.
    pub fn orientation(&self) -> Quat {
        Quat::from_mat4(&self.view_matrix()).inverse()
    }

    pub fn uniform(&self) -> CameraUniform {
        CameraUniform {
            view_proj: (self.projection_matrix() * self.view_matrix()).to_cols_array_2d(),
            eye: [self.position.x, self.position.y, self.position.z, 1.0],
        }
    }
}
