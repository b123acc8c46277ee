//! Player Movement Integrator
//!
//! Turns held walk keys into smoothed horizontal motion and hands the
//! resulting displacement to a [`CameraRig`].
//!
//! # Physics Model
//!
//! Per axis, every active frame:
//!
//! ```text
//! v -= v * friction * dt        (friction: 10.0 /s)
//! v += dir * acceleration * dt  (acceleration: 50.0 m/s^2)
//! move = v * dt
//! ```
//!
//! With a key held this settles at `acceleration / friction` = 5 m/s.
//! The direction is normalized, so walking diagonally is no faster than
//! walking straight.
//!
//! # Usage
//!
//! ```rust,ignore
//! use listening_room_engine::player::MovementIntegrator;
//!
//! let mut integrator = MovementIntegrator::new();
//!
//! // Each frame:
//! let outcome = integrator.tick(delta, &keys.movement, lock.is_active(), &mut camera, &obstacles);
//! ```

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::camera::CameraRig;
use crate::input::MovementKeys;
use crate::physics::{Aabb, ObstacleSet};

/// Per-second fractional velocity decay
pub const FRICTION: f32 = 10.0;

/// Velocity gain in the input direction, m/s^2
pub const ACCELERATION: f32 = 50.0;

/// Lowest allowed camera height in meters
pub const EYE_HEIGHT: f32 = 1.6;

/// Full extents of the player box (width, height, depth) in meters
pub const PLAYER_SIZE: Vec3 = Vec3::new(0.5, 1.6, 0.5);

/// Tunables for the integrator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    pub friction: f32,
    pub acceleration: f32,
    /// Camera y is never allowed below this
    pub eye_height: f32,
    /// Player bounding box extents used for the collision test
    pub player_size: Vec3,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            friction: FRICTION,
            acceleration: ACCELERATION,
            eye_height: EYE_HEIGHT,
            player_size: PLAYER_SIZE,
        }
    }
}

/// What one call to [`MovementIntegrator::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TickOutcome {
    /// Distance handed to `move_right` (0 when inactive or blocked)
    pub move_x: f32,
    /// Distance handed to `move_forward` (0 when inactive or blocked)
    pub move_z: f32,
    /// The candidate position hit an obstacle
    pub blocked: bool,
    /// `Some(floor)` when the camera had sunk below the floor and was raised
    pub clamped_y: Option<f32>,
}

impl TickOutcome {
    /// Nothing moved.
    pub const IDLE: TickOutcome = TickOutcome {
        move_x: 0.0,
        move_z: 0.0,
        blocked: false,
        clamped_y: None,
    };

    pub fn displacement(&self) -> Vec2 {
        Vec2::new(self.move_x, self.move_z)
    }
}

/// Unit walk direction from the held keys: x = right, y = forward.
///
/// Opposing keys cancel on their axis. Returns zero when nothing
/// (or only cancelling pairs) is held.
pub fn movement_direction(keys: &MovementKeys) -> Vec2 {
    let direction = Vec2::new(keys.right_axis() as f32, keys.forward_axis() as f32);
    // Only normalize if we have movement
    if direction.length_squared() > 0.0 {
        direction.normalize()
    } else {
        Vec2::ZERO
    }
}

/// Friction/acceleration integrator for first-person walking.
///
/// Owns the horizontal velocity between frames. Velocity is stored in the
/// rig's local frame (x = right, y = forward), matching `move_right` and
/// `move_forward`.
#[derive(Debug, Clone, Default)]
pub struct MovementIntegrator {
    config: MovementConfig,
    velocity: Vec2,
}

impl MovementIntegrator {
    /// Create an integrator at rest with the default tunables.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: MovementConfig) -> Self {
        Self {
            config,
            velocity: Vec2::ZERO,
        }
    }

    pub fn config(&self) -> &MovementConfig {
        &self.config
    }

    /// Current velocity (x = right, y = forward) in m/s.
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    /// Stop dead.
    pub fn reset(&mut self) {
        self.velocity = Vec2::ZERO;
    }

    /// Advance one frame.
    ///
    /// When `controller_active` is false nothing is read or written and
    /// [`TickOutcome::IDLE`] is returned. Negative or non-finite deltas are
    /// integrated as zero.
    pub fn tick<R, O>(
        &mut self,
        delta_seconds: f32,
        keys: &MovementKeys,
        controller_active: bool,
        rig: &mut R,
        obstacles: &O,
    ) -> TickOutcome
    where
        R: CameraRig + ?Sized,
        O: ObstacleSet + ?Sized,
    {
        if !controller_active {
            return TickOutcome::IDLE;
        }

        let dt = if delta_seconds.is_finite() {
            delta_seconds.max(0.0)
        } else {
            0.0
        };

        let direction = movement_direction(keys);

        // Friction
        self.velocity -= self.velocity * self.config.friction * dt;

        // Acceleration
        self.velocity += direction * self.config.acceleration * dt;

        let move_x = self.velocity.x * dt;
        let move_z = self.velocity.y * dt;

        let next_position = rig.position() + rig.planar_displacement(move_x, move_z);
        let player_box = Aabb::from_center_and_size(next_position, self.config.player_size);
        let blocked = obstacles.blocks(&player_box);

        let mut outcome = TickOutcome {
            blocked,
            ..TickOutcome::IDLE
        };

        if blocked {
            log::trace!("movement blocked at {next_position:?}");
        } else {
            rig.move_right(move_x);
            rig.move_forward(move_z);
            outcome.move_x = move_x;
            outcome.move_z = move_z;
        }

        // Prevent sinking
        let position = rig.position_mut();
        if position.y < self.config.eye_height {
            position.y = self.config.eye_height;
            outcome.clamped_y = Some(self.config.eye_height);
        }

        outcome
    }
}
