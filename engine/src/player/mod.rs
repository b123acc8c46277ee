//! Player Module
//!
//! First-person walking: the friction/acceleration integrator that drives
//! the camera rig each frame.

pub mod movement_integrator;

pub use movement_integrator::{
    ACCELERATION, EYE_HEIGHT, FRICTION, MovementConfig, MovementIntegrator, PLAYER_SIZE,
    TickOutcome, movement_direction,
};
