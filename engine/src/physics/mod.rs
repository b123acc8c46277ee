//! Physics module
//!
//! Collision volumes for walking around the room. Built without an external
//! physics library; the room only needs box overlap tests.
//!
//! # Unit System
//!
//! **1 unit = 1 meter** (SI units throughout)
//!
//! - Distances in meters
//! - Velocities in m/s
//!
//! # Submodules
//!
//! - [`collision`] - `Aabb` and the `ObstacleSet` seam

pub mod collision;

pub use collision::{Aabb, ObstacleSet, StaticObstacles};
