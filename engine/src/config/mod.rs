//! Config Module
//!
//! JSON configuration for the room viewer.

pub mod room_config;

pub use room_config::{ConfigError, RoomConfig, WindowConfig};
