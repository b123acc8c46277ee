//! Listening Room Engine
//!
//! First-person walking for the music collection's 3D room view.
//! Held keys feed a friction/acceleration integrator that moves a
//! first-person camera while the pointer is locked.
//!
//! # Modules
//!
//! - [`input`] - Walk keys, pointer-lock state, and scoped listeners
//! - [`camera`] - First-person camera rig
//! - [`physics`] - Bounding boxes and the obstacle set
//! - [`player`] - The movement integrator
//! - [`runtime`] - Frame clock and cancellable frame loop
//! - [`config`] - JSON room configuration
//!
//! # Example
//!
//! ```ignore
//! use listening_room_engine::camera::FirstPersonCamera;
//! use listening_room_engine::input::{InputEvent, InputState, KeyCode};
//! use listening_room_engine::physics::StaticObstacles;
//! use listening_room_engine::player::MovementIntegrator;
//!
//! let mut input = InputState::new();
//! let mut camera = FirstPersonCamera::new();
//! let mut integrator = MovementIntegrator::new();
//! let obstacles = StaticObstacles::empty();
//!
//! input.apply(&InputEvent::Click);
//! input.apply(&InputEvent::KeyDown(KeyCode::W));
//!
//! // Once per frame
//! integrator.tick(
//!     delta,
//!     &input.keyboard.movement,
//!     input.pointer.is_active(),
//!     &mut camera,
//!     &obstacles,
//! );
//! ```

pub mod camera;
pub mod config;
pub mod input;
pub mod physics;
pub mod player;
pub mod runtime;
