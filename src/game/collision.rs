//! Collision Predicate
//!
//! Box-vs-box overlap on all three axes. The vertical test looks one frame
//! ahead using the FIRST box's y-velocity only, so argument order matters:
//! call sites always pass the moving box first (player vs ground, enemy vs
//! ground, player vs enemy).

use super::cuboid::Cuboid;

/// Do `moving` and `other` overlap, predicting `moving` one frame ahead
/// on the vertical axis?
///
/// Not symmetric when `moving.velocity.y != 0`.
pub fn collide(moving: &Cuboid, other: &Cuboid) -> bool {
    let a = moving.faces();
    let b = other.faces();

    let x_axis = a.right >= b.left && a.left <= b.right;
    let y_axis = a.bottom + moving.velocity.y <= b.top && a.top >= b.bottom;
    let z_axis = a.front >= b.back && a.back <= b.front;

    x_axis && y_axis && z_axis
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::cuboid::CuboidDesc;
    use macroquad::math::Vec3;

    fn ground() -> Cuboid {
        CuboidDesc::new(10.0, 0.5, 40.0)
            .with_position(Vec3::new(0.0, -2.0, 0.0))
            .build()
    }

    #[test]
    fn test_box_overlaps_itself() {
        let b = CuboidDesc::new(1.5, 2.0, 0.25)
            .with_position(Vec3::new(3.0, -1.0, 7.0))
            .build();
        assert!(collide(&b, &b));
    }

    #[test]
    fn test_separated_on_each_axis() {
        let a = CuboidDesc::cube(1.0).build();
        for offset in [Vec3::new(1.5, 0.0, 0.0), Vec3::new(0.0, 1.5, 0.0), Vec3::new(0.0, 0.0, -1.5)] {
            let b = CuboidDesc::cube(1.0).with_position(offset).build();
            assert!(!collide(&a, &b), "offset {:?} should not overlap", offset);
        }
    }

    #[test]
    fn test_touching_faces_overlap() {
        let a = CuboidDesc::cube(1.0).build();
        let b = CuboidDesc::cube(1.0).with_position(Vec3::new(1.0, 0.0, 0.0)).build();
        assert!(collide(&a, &b));
    }

    #[test]
    fn test_vertical_lookahead_is_order_sensitive() {
        let ground = ground();
        // Ground top is -1.75. Bottom sits just above it, but one frame of
        // velocity carries it through.
        let a = CuboidDesc::cube(1.0)
            .with_position(Vec3::new(0.0, -1.75 + 0.5 + 0.5, 0.0))
            .with_velocity(Vec3::new(0.0, -1.0, 0.0))
            .build();

        assert!(a.faces().bottom > ground.faces().top);
        assert!(a.faces().bottom - 1.0 <= ground.faces().top);

        assert!(collide(&a, &ground));
        assert!(!collide(&ground, &a));
    }

    #[test]
    fn test_without_velocity_above_ground_is_clear() {
        let ground = ground();
        let a = CuboidDesc::cube(1.0)
            .with_position(Vec3::new(0.0, -0.5, 0.0))
            .build();
        assert!(!collide(&a, &ground));
    }
}
