//! Camera Module
//!
//! First-person camera rig for the room viewer.
//! This module is window-system agnostic - it only deals with camera state and math.

pub mod fps_controller;

pub use fps_controller::{CameraRig, DEFAULT_EYE_HEIGHT, FirstPersonCamera};
