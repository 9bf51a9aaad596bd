//! Game Settings
//!
//! Every gameplay constant lives here, loaded from a RON file. Each field
//! is `#[serde(default)]`, so a file only needs the values it changes.
//! Defaults reproduce the classic tuning (per-frame units at 60 FPS).

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use macroquad::color::Color;
use serde::{Deserialize, Serialize};
use crate::game::input::KeyBindings;

/// Settings file name, both in the config dir and under assets/
pub const SETTINGS_FILE: &str = "settings.ron";

/// Directory under the user config dir
pub const CONFIG_DIR_NAME: &str = "cube-dodge";

/// Places to look for a settings file, most specific first: an explicit
/// path, the per-user config dir, then the bundled assets.
pub fn settings_search_path(explicit: Option<PathBuf>, config_dir: Option<PathBuf>) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    paths.extend(explicit);
    paths.extend(config_dir.map(|dir| dir.join(CONFIG_DIR_NAME).join(SETTINGS_FILE)));
    paths.push(Path::new("assets").join(SETTINGS_FILE));
    paths
}

/// Error type for settings loading
#[derive(Debug)]
pub enum SettingsError {
    IoError(std::io::Error),
    ParseError(ron::error::SpannedError),
    ValidationError(String),
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::IoError(e)
    }
}

impl From<ron::error::SpannedError> for SettingsError {
    fn from(e: ron::error::SpannedError) -> Self {
        SettingsError::ParseError(e)
    }
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::IoError(e) => write!(f, "IO error: {}", e),
            SettingsError::ParseError(e) => write!(f, "Parse error: {}", e),
            SettingsError::ValidationError(e) => write!(f, "Validation error: {}", e),
        }
    }
}

impl std::error::Error for SettingsError {}

/// 8-bit RGB color as written in settings files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl From<Rgb> for Color {
    fn from(c: Rgb) -> Self {
        Color::from_rgba(c.0, c.1, c.2, 255)
    }
}

/// Gravity and bounce constants (per frame)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsSettings {
    /// Subtracted from y-velocity every frame
    pub gravity: f32,
    /// Fraction of y-velocity kept on a bounce
    pub bounce_damping: f32,
    /// Added to z-velocity every frame for z-accelerating boxes
    pub enemy_z_acceleration: f32,
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        Self {
            gravity: 0.01,
            bounce_damping: 0.5,
            enemy_z_acceleration: 0.0003,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    /// (width, height, depth)
    pub size: [f32; 3],
    pub color: Rgb,
    /// Horizontal speed while a direction is held
    pub move_speed: f32,
    /// Y-velocity set by a jump
    pub jump_velocity: f32,
    /// Y-velocity the player starts with
    pub spawn_velocity_y: f32,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            size: [1.0, 1.0, 1.0],
            color: Rgb(0, 255, 0),
            move_speed: 0.1,
            jump_velocity: 0.2,
            spawn_velocity_y: -0.01,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundSettings {
    pub size: [f32; 3],
    pub position: [f32; 3],
    pub color: Rgb,
}

impl Default for GroundSettings {
    fn default() -> Self {
        Self {
            size: [10.0, 0.5, 40.0],
            position: [0.0, -2.0, 0.0],
            color: Rgb(255, 255, 255),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemySettings {
    pub size: [f32; 3],
    pub color: Rgb,
    /// One enemy every N frames, starting at frame 0
    pub spawn_interval_frames: u32,
    /// Spawn x is uniform in [-range/2, range/2)
    pub spawn_x_range: f32,
    pub spawn_y: f32,
    pub spawn_z: f32,
    /// Initial z-velocity toward the player
    pub initial_speed: f32,
}

impl Default for EnemySettings {
    fn default() -> Self {
        Self {
            size: [1.0, 1.0, 1.0],
            color: Rgb(255, 0, 0),
            spawn_interval_frames: 20,
            spawn_x_range: 10.0,
            spawn_y: 0.0,
            spawn_z: -20.0,
            initial_speed: 0.2,
        }
    }
}

/// Orbit camera parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Start position; the camera orbits the origin
    pub position: [f32; 3],
    pub fov_degrees: f32,
    /// Fraction of pending orbit motion applied per frame
    pub damping: f32,
    /// Radians per pixel of drag
    pub rotate_speed: f32,
    /// Distance scale per wheel notch
    pub zoom_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            position: [0.0, 2.0, 6.0],
            fov_degrees: 75.0,
            damping: 0.05,
            rotate_speed: 0.005,
            zoom_speed: 0.05,
            min_distance: 1.0,
            max_distance: 100.0,
        }
    }
}

/// One directional light plus ambient
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingSettings {
    /// Points from the scene toward the light
    pub direction: [f32; 3],
    pub intensity: f32,
    pub ambient: f32,
}

impl Default for LightingSettings {
    fn default() -> Self {
        Self {
            direction: [0.0, 1.0, 2.0],
            intensity: 1.0,
            ambient: 0.2,
        }
    }
}

/// FPS limit setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FpsLimit {
    /// 30 FPS (everything moves at half speed)
    Fps30,
    /// 60 FPS (the speed the constants are tuned for)
    #[default]
    Fps60,
    /// Unlocked (as fast as possible)
    Unlocked,
}

impl FpsLimit {
    /// Get the target frame time in seconds (None = unlocked)
    pub fn frame_time(&self) -> Option<f64> {
        match self {
            FpsLimit::Fps30 => Some(1.0 / 30.0),
            FpsLimit::Fps60 => Some(1.0 / 60.0),
            FpsLimit::Unlocked => None,
        }
    }
}

/// Top-level settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub physics: PhysicsSettings,
    pub player: PlayerSettings,
    pub ground: GroundSettings,
    pub enemies: EnemySettings,
    /// Seconds per score point
    pub score_interval_secs: f64,
    pub fps_limit: FpsLimit,
    pub bindings: KeyBindings,
    pub camera: CameraSettings,
    pub lighting: LightingSettings,
    /// Image applied to every box. `None` uses the generated checkerboard,
    /// which is also the fallback when the image fails to load.
    pub texture_path: Option<String>,
    /// Fixed seed for enemy spawn positions
    pub seed: Option<u64>,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            physics: PhysicsSettings::default(),
            player: PlayerSettings::default(),
            ground: GroundSettings::default(),
            enemies: EnemySettings::default(),
            score_interval_secs: 1.0,
            fps_limit: FpsLimit::default(),
            bindings: KeyBindings::default(),
            camera: CameraSettings::default(),
            lighting: LightingSettings::default(),
            texture_path: None,
            seed: None,
        }
    }
}

/// Check a float is finite
fn check_finite(value: f32, name: &str) -> Result<(), String> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(format!("{} must be finite (got {})", name, value))
    }
}

/// Check every component of a size is finite and strictly positive
fn check_size(size: [f32; 3], name: &str) -> Result<(), String> {
    for (axis, v) in ["width", "height", "depth"].iter().zip(size) {
        if !(v.is_finite() && v > 0.0) {
            return Err(format!("{} {} must be positive (got {})", name, axis, v));
        }
    }
    Ok(())
}

impl GameSettings {
    /// Reject values that would break the simulation.
    pub fn validate(&self) -> Result<(), SettingsError> {
        self.check().map_err(SettingsError::ValidationError)
    }

    fn check(&self) -> Result<(), String> {
        check_size(self.player.size, "player")?;
        check_size(self.ground.size, "ground")?;
        check_size(self.enemies.size, "enemy")?;

        let p = &self.physics;
        check_finite(p.gravity, "physics.gravity")?;
        check_finite(p.bounce_damping, "physics.bounce_damping")?;
        check_finite(p.enemy_z_acceleration, "physics.enemy_z_acceleration")?;

        check_finite(self.player.move_speed, "player.move_speed")?;
        check_finite(self.player.jump_velocity, "player.jump_velocity")?;
        check_finite(self.player.spawn_velocity_y, "player.spawn_velocity_y")?;
        for v in self.ground.position {
            check_finite(v, "ground.position")?;
        }

        let e = &self.enemies;
        if e.spawn_interval_frames == 0 {
            return Err("enemies.spawn_interval_frames must be at least 1".to_string());
        }
        check_finite(e.spawn_x_range, "enemies.spawn_x_range")?;
        check_finite(e.spawn_y, "enemies.spawn_y")?;
        check_finite(e.spawn_z, "enemies.spawn_z")?;
        check_finite(e.initial_speed, "enemies.initial_speed")?;

        if !(self.score_interval_secs.is_finite() && self.score_interval_secs > 0.0) {
            return Err(format!(
                "score_interval_secs must be positive (got {})",
                self.score_interval_secs
            ));
        }

        let c = &self.camera;
        if !(c.damping > 0.0 && c.damping <= 1.0) {
            return Err(format!("camera.damping must be in (0, 1] (got {})", c.damping));
        }
        if !(c.fov_degrees > 0.0 && c.fov_degrees < 180.0) {
            return Err(format!("camera.fov_degrees must be in (0, 180) (got {})", c.fov_degrees));
        }
        if !(c.min_distance > 0.0 && c.min_distance <= c.max_distance) {
            return Err("camera distance range is empty".to_string());
        }

        Ok(())
    }

    /// Parse and validate settings from RON text.
    pub fn from_ron_str(s: &str) -> Result<Self, SettingsError> {
        let settings: GameSettings = ron::from_str(s)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a RON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let contents = fs::read_to_string(path)?;
        Self::from_ron_str(&contents)
    }

    /// Pretty RON, the same format `load` reads
    pub fn to_ron_string(&self) -> Result<String, ron::Error> {
        let config = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .indentor("  ".to_string());
        ron::ser::to_string_pretty(self, config)
    }
}
