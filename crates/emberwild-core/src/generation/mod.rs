//! Generation - procedural placement of wildlife and resource nodes

mod terrain;
mod wildlife;

pub use terrain::*;
pub use wildlife::*;

use std::f32::consts::TAU;

use emberwild_logic::geometry::Vec3;
use rand::Rng;

/// Random ground point within `half_extent` on X and Z, at least
/// `clearing` from the origin.
pub fn scatter_point(half_extent: f32, clearing: f32, rng: &mut impl Rng) -> Vec3 {
    for _ in 0..64 {
        let point = Vec3::ground(
            rng.gen_range(-half_extent..=half_extent),
            rng.gen_range(-half_extent..=half_extent),
        );
        if point.distance_xz(&Vec3::ZERO) >= clearing {
            return point;
        }
    }
    // Clearing covers nearly the whole square; fall back to its rim.
    Vec3::ZERO.step(rng.gen_range(0.0..TAU), clearing.min(half_extent))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_scatter_respects_extent_and_clearing() {
        let mut rng = StdRng::seed_from_u64(12);
        for _ in 0..500 {
            let p = scatter_point(40.0, 10.0, &mut rng);
            assert!(p.x.abs() <= 40.0 && p.z.abs() <= 40.0);
            assert!(p.distance_xz(&Vec3::ZERO) >= 10.0);
            assert_eq!(p.y, 0.0);
        }
    }
}
