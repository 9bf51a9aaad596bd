//! Enemy Spawning
//!
//! One enemy every `spawn_interval_frames` frames, starting on frame 0.
//! Enemies are never removed; the live list only grows.

use macroquad::math::Vec3;
use crate::settings::EnemySettings;
use super::cuboid::{Cuboid, CuboidDesc};

/// Source of uniform samples in [0, 1) for spawn positions.
pub trait SpawnRng {
    fn next_unit(&mut self) -> f32;
}

/// macroquad's global generator (works on WASM)
#[derive(Debug, Clone, Copy, Default)]
pub struct QuadRng;

impl SpawnRng for QuadRng {
    fn next_unit(&mut self) -> f32 {
        macroquad::rand::gen_range(0.0, 1.0)
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl SpawnRng for rand::rngs::StdRng {
    fn next_unit(&mut self) -> f32 {
        rand::Rng::gen::<f32>(self)
    }
}

/// Is `frame` a spawn frame?
pub fn is_spawn_frame(frame: u64, interval: u32) -> bool {
    interval > 0 && frame % interval as u64 == 0
}

/// Build a new enemy with x drawn from `rng`.
pub fn spawn_enemy(settings: &EnemySettings, rng: &mut dyn SpawnRng) -> Cuboid {
    let x = (rng.next_unit() - 0.5) * settings.spawn_x_range;

    CuboidDesc::from_size(settings.size.into())
        .with_color(settings.color.into())
        .with_position(Vec3::new(x, settings.spawn_y, settings.spawn_z))
        .with_velocity(Vec3::new(0.0, 0.0, settings.initial_speed))
        .with_z_acceleration(true)
        .build()
}
