//! Game Module
//!
//! A player cube on a ground slab dodges boxes that spawn far away and
//! accelerate toward it. Everything is an axis-aligned box; physics is a
//! few per-frame integrations and overlap tests, not a general engine.
//!
//! Key pieces:
//! - Cuboid: box entity with cached face planes
//! - collision: order-sensitive, vertically predictive overlap test
//! - physics: per-frame step (z-acceleration, integration, gravity, bounce)
//! - Session: all game state plus the frame / key / clock entry points
//!
//! Nothing outside `renderer` (and `camera::to_camera3d`) needs a graphics
//! context, so the simulation runs headless in tests.

pub mod cuboid;
pub mod collision;
pub mod physics;
pub mod input;
pub mod spawner;
pub mod score;
pub mod event;
pub mod runtime;
pub mod camera;
pub mod renderer;

// Re-export main types
pub use camera::OrbitCamera;
pub use runtime::{Phase, Session};
pub use renderer::SceneRenderer;
