//! Per-frame Box Physics
//!
//! All quantities are per frame, not per second: the game advances one
//! step per display refresh and frame pacing is handled by the driver.
//!
//! Step order for one box:
//! 1. Refresh face planes from the current position
//! 2. Grow z-velocity if the box z-accelerates
//! 3. Integrate x and z (y is only integrated by gravity)
//! 4. Collide against the ground (predictive on y) -> `grounded`
//! 5. Apply gravity

use crate::settings::PhysicsSettings;
use super::collision::collide;
use super::cuboid::Cuboid;

/// Advance `body` by one frame against `ground`.
pub fn step(body: &mut Cuboid, ground: &Cuboid, physics: &PhysicsSettings) {
    body.update_face_planes();

    if body.z_acceleration {
        body.velocity.z += physics.enemy_z_acceleration;
    }

    body.position.x += body.velocity.x;
    body.position.z += body.velocity.z;

    body.grounded = collide(body, ground);
    apply_gravity(body, physics);
}

/// Gravity integration using the `grounded` flag from this frame.
///
/// Gravity is always subtracted first. A grounded box bounces (velocity
/// inverted and damped) and keeps its height this frame; an airborne box
/// falls by its velocity.
pub fn apply_gravity(body: &mut Cuboid, physics: &PhysicsSettings) {
    body.velocity.y -= physics.gravity;

    if body.grounded {
        body.velocity.y = -(body.velocity.y * physics.bounce_damping);
    } else {
        body.position.y += body.velocity.y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::cuboid::CuboidDesc;
    use macroquad::math::Vec3;

    const EPS: f32 = 1e-6;

    fn ground() -> Cuboid {
        CuboidDesc::new(10.0, 0.5, 40.0)
            .with_position(Vec3::new(0.0, -2.0, 0.0))
            .build()
    }

    #[test]
    fn test_free_fall_accumulates() {
        let physics = PhysicsSettings::default();
        let ground = ground();
        // High enough that the ground is out of reach for a few frames
        let mut body = CuboidDesc::cube(1.0)
            .with_position(Vec3::new(0.0, 10.0, 0.0))
            .build();

        step(&mut body, &ground, &physics);
        assert!(!body.grounded);
        assert!((body.velocity.y - -0.01).abs() < EPS);
        assert!((body.position.y - 9.99).abs() < 1e-5);

        step(&mut body, &ground, &physics);
        assert!((body.velocity.y - -0.02).abs() < EPS);
        assert!((body.position.y - 9.97).abs() < 1e-5);
    }

    #[test]
    fn test_bounce_on_ground() {
        let physics = PhysicsSettings::default();
        let ground = ground();
        // Resting exactly on the ground top (-1.75)
        let start_y = -1.75 + 0.5;
        let mut body = CuboidDesc::cube(1.0)
            .with_position(Vec3::new(0.0, start_y, 0.0))
            .with_velocity(Vec3::new(0.0, -0.05, 0.0))
            .build();

        step(&mut body, &ground, &physics);

        assert!(body.grounded);
        assert!((body.velocity.y - 0.03).abs() < EPS);
        assert_eq!(body.position.y, start_y);
    }

    #[test]
    fn test_grounded_branch_reflects_velocity_after_gravity() {
        let physics = PhysicsSettings::default();
        let mut body = CuboidDesc::cube(1.0)
            .with_velocity(Vec3::new(0.0, -0.05, 0.0))
            .build();
        body.grounded = true;
        let y = body.position.y;

        apply_gravity(&mut body, &physics);

        // -0.05 - 0.01 = -0.06, inverted and halved
        assert!((body.velocity.y - 0.03).abs() < EPS);
        assert_eq!(body.position.y, y);
    }

    #[test]
    fn test_horizontal_integration_skips_y() {
        let physics = PhysicsSettings::default();
        let ground = ground();
        let mut body = CuboidDesc::cube(1.0)
            .with_position(Vec3::new(0.0, 5.0, 0.0))
            .with_velocity(Vec3::new(0.1, 0.0, -0.1))
            .build();

        step(&mut body, &ground, &physics);

        assert!((body.position.x - 0.1).abs() < EPS);
        assert!((body.position.z - -0.1).abs() < EPS);
        // Only gravity moved y
        assert!((body.position.y - 4.99).abs() < 1e-5);
    }

    #[test]
    fn test_z_acceleration_is_linear_and_unbounded() {
        let physics = PhysicsSettings::default();
        let ground = ground();
        let mut enemy = CuboidDesc::cube(1.0)
            .with_position(Vec3::new(0.0, 0.0, -20.0))
            .with_velocity(Vec3::new(0.0, 0.0, 0.2))
            .with_z_acceleration(true)
            .build();

        let mut last = enemy.velocity.z;
        for n in 1..=500 {
            step(&mut enemy, &ground, &physics);
            let expected = 0.2 + 0.0003 * n as f32;
            assert!((enemy.velocity.z - expected).abs() < 1e-4);
            assert!(enemy.velocity.z > last);
            last = enemy.velocity.z;
        }
    }

    #[test]
    fn test_settles_into_damped_bounce() {
        let physics = PhysicsSettings::default();
        let ground = ground();
        let mut player = CuboidDesc::cube(1.0).build();

        let mut peaks = Vec::new();
        for _ in 0..600 {
            step(&mut player, &ground, &physics);
            assert!(player.velocity.y.is_finite());
            assert!(player.velocity.y.abs() < 1.0);
            if player.grounded {
                peaks.push(player.velocity.y.abs());
            }
        }

        // It reached the ground and the bounce never grows
        assert!(!peaks.is_empty());
        let first = peaks[0];
        assert!(peaks.iter().all(|&p| p <= first + EPS));
        // Sitting on (not sinking through) the ground
        assert!(player.position.y > -1.75 - 1.0);
        assert!(player.position.y < 0.0);
    }
}
