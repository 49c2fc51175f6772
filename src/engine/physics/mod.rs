// Collision model: AABB tests shared by combat and level contact

pub mod aabb;
pub mod geometry;

pub use aabb::{check_collision, resolve_wall, Aabb, ResolveAxis, WallContact};
pub use geometry::{LevelGeometry, Rect};
