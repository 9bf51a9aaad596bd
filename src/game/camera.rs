//! Orbit Camera
//!
//! Spherical camera around a fixed target. Drag and wheel input is queued
//! as pending motion and applied a fraction at a time each frame, so the
//! camera eases to a stop instead of snapping.

use std::f32::consts::FRAC_PI_2;
use macroquad::camera::Camera3D;
use macroquad::math::Vec3;
use crate::settings::CameraSettings;

/// Keeps the camera off the poles where `up` would flip
const ELEVATION_LIMIT: f32 = FRAC_PI_2 - 0.01;

/// Pending motion below this is dropped
const SETTLE_EPSILON: f32 = 1e-5;

#[derive(Debug, Clone)]
pub struct OrbitCamera {
    target: Vec3,
    /// Rotation around +Y, 0 = looking down -Z from +Z
    azimuth: f32,
    /// Angle above the XZ plane
    elevation: f32,
    distance: f32,

    pending_azimuth: f32,
    pending_elevation: f32,
    /// Log-scale zoom
    pending_zoom: f32,

    settings: CameraSettings,
}

impl OrbitCamera {
    /// Camera at `settings.position` looking at the origin
    pub fn new(settings: CameraSettings) -> Self {
        let target = Vec3::ZERO;
        let offset = Vec3::from(settings.position) - target;
        let distance = offset.length().clamp(settings.min_distance, settings.max_distance);
        let (azimuth, elevation) = if offset.length() > 0.0 {
            let dir = offset.normalize();
            (dir.x.atan2(dir.z), dir.y.asin())
        } else {
            (0.0, 0.0)
        };

        Self {
            target,
            azimuth,
            elevation: elevation.clamp(-ELEVATION_LIMIT, ELEVATION_LIMIT),
            distance,
            pending_azimuth: 0.0,
            pending_elevation: 0.0,
            pending_zoom: 0.0,
            settings,
        }
    }

    /// Queue a drag of (dx, dy) pixels
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.pending_azimuth -= dx * self.settings.rotate_speed;
        self.pending_elevation += dy * self.settings.rotate_speed;
    }

    /// Queue a wheel movement; positive zooms in
    pub fn zoom(&mut self, wheel: f32) {
        self.pending_zoom -= wheel * self.settings.zoom_speed;
    }

    /// Apply one frame of damped motion.
    pub fn update(&mut self) {
        let k = self.settings.damping;

        self.azimuth += self.pending_azimuth * k;
        self.elevation = (self.elevation + self.pending_elevation * k)
            .clamp(-ELEVATION_LIMIT, ELEVATION_LIMIT);
        self.distance = (self.distance * (self.pending_zoom * k).exp())
            .clamp(self.settings.min_distance, self.settings.max_distance);

        for pending in [&mut self.pending_azimuth, &mut self.pending_elevation, &mut self.pending_zoom] {
            *pending *= 1.0 - k;
            if pending.abs() < SETTLE_EPSILON {
                *pending = 0.0;
            }
        }
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn elevation(&self) -> f32 {
        self.elevation
    }

    pub fn azimuth(&self) -> f32 {
        self.azimuth
    }

    /// World-space eye position
    pub fn position(&self) -> Vec3 {
        let horizontal = self.distance * self.elevation.cos();
        self.target
            + Vec3::new(
                horizontal * self.azimuth.sin(),
                self.distance * self.elevation.sin(),
                horizontal * self.azimuth.cos(),
            )
    }

    pub fn to_camera3d(&self) -> Camera3D {
        Camera3D {
            position: self.position(),
            target: self.target,
            up: Vec3::Y,
            fovy: self.settings.fov_degrees.to_radians(),
            ..Default::default()
        }
    }
}
