//! Collision detection module
//!
//! Axis-aligned boxes for the player volume and static room geometry,
//! and the [`ObstacleSet`] seam the movement integrator tests against.
//!
//! # Example
//!
//! ```ignore
//! use listening_room_engine::physics::collision::{Aabb, ObstacleSet, StaticObstacles};
//! use glam::Vec3;
//!
//! let mut walls = StaticObstacles::empty();
//! walls.push(Aabb::from_center_and_size(Vec3::new(0.0, 1.5, -5.0), Vec3::new(5.0, 3.0, 1.0)));
//!
//! let player = Aabb::from_center_and_size(Vec3::new(0.0, 1.6, -4.4), Vec3::new(0.5, 1.6, 0.5));
//! assert!(walls.blocks(&player));
//! ```

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box.
///
/// Deserialized boxes go through [`Aabb::new`], so corners written in
/// either order still give `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "AabbCorners")]
pub struct Aabb {
    /// Minimum corner
    pub min: Vec3,
    /// Maximum corner
    pub max: Vec3,
}

/// On-disk form of an [`Aabb`]: two opposite corners, any order.
#[derive(Deserialize)]
struct AabbCorners {
    min: Vec3,
    max: Vec3,
}

impl From<AabbCorners> for Aabb {
    fn from(corners: AabbCorners) -> Self {
        Aabb::new(corners.min, corners.max)
    }
}

impl Aabb {
    /// Build from two corners. Corners are sorted per axis.
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Build a box of full extents `size` centered on `center`.
    pub fn from_center_and_size(center: Vec3, size: Vec3) -> Self {
        let half = size.abs() * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Overlap test on closed intervals: boxes that only touch count as intersecting.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    pub fn contains_point(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }
}

/// Static scene geometry the player cannot walk into.
pub trait ObstacleSet {
    /// `true` if `volume` overlaps any obstacle.
    fn blocks(&self, volume: &Aabb) -> bool;
}

impl ObstacleSet for [Aabb] {
    fn blocks(&self, volume: &Aabb) -> bool {
        self.iter().any(|obstacle| obstacle.intersects(volume))
    }
}

/// Owned list of obstacle boxes. Empty by default, which never blocks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StaticObstacles {
    boxes: Vec<Aabb>,
}

impl StaticObstacles {
    pub fn new(boxes: Vec<Aabb>) -> Self {
        Self { boxes }
    }

    /// A room with no collision geometry.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn push(&mut self, obstacle: Aabb) {
        self.boxes.push(obstacle);
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Aabb> {
        self.boxes.iter()
    }
}

impl ObstacleSet for StaticObstacles {
    fn blocks(&self, volume: &Aabb) -> bool {
        self.boxes.as_slice().blocks(volume)
    }
}

impl From<Vec<Aabb>> for StaticObstacles {
    fn from(boxes: Vec<Aabb>) -> Self {
        Self::new(boxes)
    }
}
