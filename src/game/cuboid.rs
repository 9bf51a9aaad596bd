//! Box Entity
//!
//! Every object in the game (player, ground, enemies) is an axis-aligned
//! cuboid. Position is the cuboid center; the six face planes are cached
//! scalars derived from position and the fixed dimensions.

use macroquad::color::Color;
use macroquad::math::Vec3;

/// Default tint for boxes created without an explicit color
pub const DEFAULT_COLOR: Color = Color::new(0.0, 1.0, 0.0, 1.0);

/// The six boundary planes of a cuboid, in world units.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FacePlanes {
    /// y + height / 2
    pub top: f32,
    /// y - height / 2
    pub bottom: f32,
    /// x - width / 2
    pub left: f32,
    /// x + width / 2
    pub right: f32,
    /// z + depth / 2
    pub front: f32,
    /// z - depth / 2
    pub back: f32,
}

impl FacePlanes {
    /// Compute face planes for a cuboid centered at `position`.
    pub fn from_center(position: Vec3, width: f32, height: f32, depth: f32) -> Self {
        Self {
            top: position.y + height / 2.0,
            bottom: position.y - height / 2.0,
            left: position.x - width / 2.0,
            right: position.x + width / 2.0,
            front: position.z + depth / 2.0,
            back: position.z - depth / 2.0,
        }
    }
}

/// Construction parameters for a [`Cuboid`].
///
/// Dimensions are required; everything else has a default
/// (zero velocity, origin position, no z-acceleration).
#[derive(Debug, Clone, Copy)]
pub struct CuboidDesc {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    pub color: Color,
    pub velocity: Vec3,
    pub position: Vec3,
    pub z_acceleration: bool,
}

impl CuboidDesc {
    pub fn new(width: f32, height: f32, depth: f32) -> Self {
        Self {
            width,
            height,
            depth,
            color: DEFAULT_COLOR,
            velocity: Vec3::ZERO,
            position: Vec3::ZERO,
            z_acceleration: false,
        }
    }

    /// Uniform cube of edge `size`
    pub fn cube(size: f32) -> Self {
        Self::new(size, size, size)
    }

    /// Build from a (width, height, depth) triple
    pub fn from_size(size: Vec3) -> Self {
        Self::new(size.x, size.y, size.z)
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn with_z_acceleration(mut self, enabled: bool) -> Self {
        self.z_acceleration = enabled;
        self
    }

    pub fn build(self) -> Cuboid {
        Cuboid::new(self)
    }
}

/// An axis-aligned box with velocity.
///
/// Dimensions are fixed at creation. `faces` is refreshed by
/// [`Cuboid::update_face_planes`]; [`Cuboid::set_position`] refreshes it
/// immediately, while [`physics::step`](super::physics::step) refreshes it
/// once at the start of the frame before integrating. Outside `game` the
/// position can only change through `set_position`.
#[derive(Debug, Clone)]
pub struct Cuboid {
    width: f32,
    height: f32,
    depth: f32,
    pub color: Color,
    /// Center. Writable only by the physics step, which integrates it
    /// against planes cached at the start of the frame.
    pub(super) position: Vec3,
    /// Units per frame
    pub velocity: Vec3,
    /// Enemies: z-velocity grows every frame
    pub z_acceleration: bool,
    /// Result of the last collision check against the ground
    pub grounded: bool,
    faces: FacePlanes,
}

impl Cuboid {
    pub fn new(desc: CuboidDesc) -> Self {
        Self {
            width: desc.width,
            height: desc.height,
            depth: desc.depth,
            color: desc.color,
            position: desc.position,
            velocity: desc.velocity,
            z_acceleration: desc.z_acceleration,
            grounded: false,
            faces: FacePlanes::from_center(desc.position, desc.width, desc.height, desc.depth),
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn depth(&self) -> f32 {
        self.depth
    }

    /// (width, height, depth)
    pub fn size(&self) -> Vec3 {
        Vec3::new(self.width, self.height, self.depth)
    }

    /// Center of the box
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Face planes as of the last refresh
    pub fn faces(&self) -> &FacePlanes {
        &self.faces
    }

    /// Recompute the six face planes from the current position.
    pub fn update_face_planes(&mut self) {
        self.faces = FacePlanes::from_center(self.position, self.width, self.height, self.depth);
    }

    /// Move the box and refresh its face planes.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.update_face_planes();
    }
}
