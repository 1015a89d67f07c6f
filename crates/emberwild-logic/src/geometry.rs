//! World-space geometry: vectors, ground-plane distance and the square
//! world boundary every moving thing is clamped to.

use serde::{Deserialize, Serialize};

/// 3D position vector. `y` is height; the ground plane is XZ.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0, z: 0.0 };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// A point on the ground plane.
    pub fn ground(x: f32, z: f32) -> Self {
        Self { x, y: 0.0, z }
    }

    /// Distance ignoring height. All proximity checks use this.
    pub fn distance_xz(&self, other: &Self) -> f32 {
        let dx = self.x - other.x;
        let dz = self.z - other.z;
        (dx * dx + dz * dz).sqrt()
    }

    /// Heading (radians) that faces from `self` toward `other` on the ground
    /// plane. Zero points along +Z, increasing toward +X.
    pub fn heading_to(&self, other: &Self) -> f32 {
        (other.x - self.x).atan2(other.z - self.z)
    }

    /// Step along a heading by `distance` on the ground plane. The result
    /// always sits at `y = 0`.
    pub fn step(&self, heading: f32, distance: f32) -> Self {
        Self {
            x: self.x + heading.sin() * distance,
            y: 0.0,
            z: self.z + heading.cos() * distance,
        }
    }
}

/// Square boundary centred on the origin, `half_extent` units each way on
/// X and Z.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldBounds {
    pub half_extent: f32,
}

impl WorldBounds {
    pub fn new(half_extent: f32) -> Self {
        Self { half_extent }
    }

    pub fn contains(&self, point: &Vec3) -> bool {
        point.x.abs() <= self.half_extent && point.z.abs() <= self.half_extent
    }

    /// Clamp X and Z into the boundary. Height is left alone.
    pub fn clamp(&self, point: Vec3) -> Vec3 {
        let h = self.half_extent;
        Vec3 {
            x: point.x.clamp(-h, h),
            y: point.y,
            z: point.z.clamp(-h, h),
        }
    }
}

impl Default for WorldBounds {
    fn default() -> Self {
        Self::new(crate::constants::WORLD_HALF_EXTENT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_xz_ignores_height() {
        let a = Vec3::new(0.0, 10.0, 0.0);
        let b = Vec3::new(3.0, -4.0, 4.0);
        assert!((a.distance_xz(&b) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_step_is_unit_length_per_distance() {
        let origin = Vec3::ground(1.0, 1.0);
        for i in 0..16 {
            let heading = i as f32 * 0.4;
            let next = origin.step(heading, 2.5);
            assert!((origin.distance_xz(&next) - 2.5).abs() < 1e-4);
        }
    }

    #[test]
    fn test_heading_to_points_at_target() {
        let from = Vec3::ground(0.0, 0.0);
        let to = Vec3::ground(3.0, 4.0);
        let heading = from.heading_to(&to);
        let moved = from.step(heading, 5.0);
        assert!(moved.distance_xz(&to) < 1e-4);
    }

    #[test]
    fn test_bounds_clamp() {
        let bounds = WorldBounds::new(45.0);
        let p = bounds.clamp(Vec3::new(50.0, 2.0, -60.0));
        assert_eq!(p, Vec3::new(45.0, 2.0, -45.0));
        assert!(bounds.contains(&p));
        assert!(!bounds.contains(&Vec3::ground(45.1, 0.0)));
    }
}
