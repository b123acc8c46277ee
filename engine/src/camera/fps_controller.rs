//! First-Person Camera Module
//!
//! The camera rig the movement integrator hands its displacement to.
//! Mouse movement rotates the camera directly while the pointer is locked;
//! walking moves along the horizontal plane only, so looking up or down never
//! changes walking speed or lifts the player off the floor.
//!
//! Key features:
//! - Direct mouse input → camera rotation (no button required)
//! - Configurable sensitivity (default: 0.002 rad/pixel)
//! - Pitch clamped to ±89 degrees to prevent gimbal lock
//! - `move_right` / `move_forward` in the horizontal plane

use glam::Vec3;

/// Pitch limit constant: -89 degrees in radians
const PITCH_LIMIT_MIN: f32 = -89.0 * std::f32::consts::PI / 180.0;
/// Pitch limit constant: +89 degrees in radians
const PITCH_LIMIT_MAX: f32 = 89.0 * std::f32::consts::PI / 180.0;

/// Standing eye height in meters
pub const DEFAULT_EYE_HEIGHT: f32 = 1.6;

/// Camera-control surface driven by the movement integrator.
///
/// `move_right` and `move_forward` take distances along the rig's own
/// horizontal axes; the rig decides what those axes are in world space.
pub trait CameraRig {
    fn position(&self) -> Vec3;

    fn position_mut(&mut self) -> &mut Vec3;

    /// Strafe along the horizontal right axis.
    fn move_right(&mut self, distance: f32);

    /// Walk along the horizontal forward axis.
    fn move_forward(&mut self, distance: f32);

    /// World-space offset that `move_right(move_x)` followed by
    /// `move_forward(move_z)` would apply, without applying it.
    fn planar_displacement(&self, move_x: f32, move_z: f32) -> Vec3;
}

/// First-person camera for walking around the room.
///
/// ## Usage
/// ```rust,ignore
/// let mut camera = FirstPersonCamera::new();
///
/// // While the pointer is locked, pass raw mouse delta (in pixels)
/// camera.handle_mouse_look(mouse_dx, mouse_dy);
///
/// // Walking goes through the CameraRig trait
/// camera.move_forward(0.5);
/// ```
#[derive(Clone, Debug)]
pub struct FirstPersonCamera {
    /// Camera position in world space
    pub position: Vec3,
    /// Horizontal angle (radians) - unrestricted, wraps around
    pub yaw: f32,
    /// Vertical angle (radians) - clamped to ±89°
    pub pitch: f32,
    /// Mouse sensitivity in radians per pixel (default: 0.002)
    pub sensitivity: f32,
}

impl Default for FirstPersonCamera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, DEFAULT_EYE_HEIGHT, 0.0),
            yaw: 0.0,
            pitch: 0.0,
            sensitivity: 0.002,
        }
    }
}

impl FirstPersonCamera {
    /// Create a camera at eye height above the origin, looking toward -Z.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a camera at a custom position
    pub fn with_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a camera with custom sensitivity
    pub fn with_sensitivity(sensitivity: f32) -> Self {
        Self {
            sensitivity,
            ..Default::default()
        }
    }

    /// Set the pitch angle directly (in radians, will be clamped to limits)
    #[inline]
    pub fn set_pitch(&mut self, pitch: f32) {
        self.pitch = pitch.clamp(PITCH_LIMIT_MIN, PITCH_LIMIT_MAX);
    }

    /// Rotate the camera from a raw mouse delta in pixels.
    ///
    /// Positive `dx` looks right, positive `dy` (mouse moved down) looks down.
    pub fn handle_mouse_look(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * self.sensitivity;
        self.pitch -= dy * self.sensitivity;
        self.pitch = self.pitch.clamp(PITCH_LIMIT_MIN, PITCH_LIMIT_MAX);
    }

    /// Look direction including pitch. At yaw=0, pitch=0 this is -Z.
    #[inline]
    pub fn get_forward(&self) -> Vec3 {
        Vec3::new(
            self.yaw.sin() * self.pitch.cos(),
            self.pitch.sin(),
            -self.yaw.cos() * self.pitch.cos(),
        )
        .normalize()
    }

    /// Unit walking direction in the XZ plane.
    #[inline]
    pub fn forward_horizontal(&self) -> Vec3 {
        Vec3::new(self.yaw.sin(), 0.0, -self.yaw.cos())
    }

    /// Unit strafe direction in the XZ plane.
    #[inline]
    pub fn right_horizontal(&self) -> Vec3 {
        Vec3::new(self.yaw.cos(), 0.0, self.yaw.sin())
    }

    /// Reset camera orientation to default (looking toward -Z)
    pub fn reset_orientation(&mut self) {
        self.yaw = 0.0;
        self.pitch = 0.0;
    }
}

impl CameraRig for FirstPersonCamera {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn position_mut(&mut self) -> &mut Vec3 {
        &mut self.position
    }

    fn move_right(&mut self, distance: f32) {
        self.position += self.right_horizontal() * distance;
    }

    fn move_forward(&mut self, distance: f32) {
        self.position += self.forward_horizontal() * distance;
    }

    fn planar_displacement(&self, move_x: f32, move_z: f32) -> Vec3 {
        self.right_horizontal() * move_x + self.forward_horizontal() * move_z
    }
}
