//! Scene Renderer
//!
//! Draws the session with macroquad: every box is a textured mesh with
//! flat per-face lighting (one directional light plus ambient), then the
//! score and the optional debug overlay in screen space.

use macroquad::prelude::*;
use crate::settings::LightingSettings;
use super::camera::OrbitCamera;
use super::cuboid::Cuboid;
use super::runtime::Session;

/// Edge length of the generated fallback texture, in pixels
pub const CHECKER_SIZE: u16 = 256;
/// Squares per row of the fallback texture
pub const CHECKER_CELLS: u16 = 8;

/// RGBA8 checkerboard, white and dark gray
pub fn checker_rgba(size: u16, cells: u16) -> Vec<u8> {
    let size = size as usize;
    let cell = (size / cells.max(1) as usize).max(1);
    let mut bytes = Vec::with_capacity(size * size * 4);
    for y in 0..size {
        for x in 0..size {
            let light = ((x / cell) + (y / cell)) % 2 == 0;
            let v = if light { 235 } else { 40 };
            bytes.extend_from_slice(&[v, v, v, 255]);
        }
    }
    bytes
}

fn checker_texture() -> Texture2D {
    let tex = Texture2D::from_rgba8(
        CHECKER_SIZE,
        CHECKER_SIZE,
        &checker_rgba(CHECKER_SIZE, CHECKER_CELLS),
    );
    tex.set_filter(FilterMode::Nearest);
    tex
}

/// Load the box texture. No path, or a path that fails to load, gives the
/// generated checkerboard.
pub async fn load_box_texture(path: Option<&str>) -> Texture2D {
    let Some(path) = path else {
        return checker_texture();
    };
    match load_texture(path).await {
        Ok(tex) => {
            tex.set_filter(FilterMode::Linear);
            tracing::info!("loaded texture {}", path);
            tex
        }
        Err(e) => {
            tracing::warn!("failed to load texture {}: {}, using checkerboard", path, e);
            checker_texture()
        }
    }
}

/// Brightness of a face with outward normal `normal`
pub fn face_shade(normal: Vec3, lighting: &LightingSettings) -> f32 {
    let to_light = Vec3::from(lighting.direction).normalize_or_zero();
    let diffuse = normal.dot(to_light).max(0.0) * lighting.intensity;
    (lighting.ambient + diffuse).clamp(0.0, 1.0)
}

fn scale_color(color: Color, factor: f32) -> Color {
    Color::new(color.r * factor, color.g * factor, color.b * factor, color.a)
}

/// Outward normal and corners (counter-clockwise seen from outside) of each face
/// of a unit cube centered on the origin.
const FACES: [([f32; 3], [[f32; 3]; 4]); 6] = [
    // +Y top
    ([0.0, 1.0, 0.0], [[-0.5, 0.5, 0.5], [0.5, 0.5, 0.5], [0.5, 0.5, -0.5], [-0.5, 0.5, -0.5]]),
    // -Y bottom
    ([0.0, -1.0, 0.0], [[-0.5, -0.5, -0.5], [0.5, -0.5, -0.5], [0.5, -0.5, 0.5], [-0.5, -0.5, 0.5]]),
    // +X right
    ([1.0, 0.0, 0.0], [[0.5, -0.5, 0.5], [0.5, -0.5, -0.5], [0.5, 0.5, -0.5], [0.5, 0.5, 0.5]]),
    // -X left
    ([-1.0, 0.0, 0.0], [[-0.5, -0.5, -0.5], [-0.5, -0.5, 0.5], [-0.5, 0.5, 0.5], [-0.5, 0.5, -0.5]]),
    // +Z front
    ([0.0, 0.0, 1.0], [[-0.5, -0.5, 0.5], [0.5, -0.5, 0.5], [0.5, 0.5, 0.5], [-0.5, 0.5, 0.5]]),
    // -Z back
    ([0.0, 0.0, -1.0], [[0.5, -0.5, -0.5], [-0.5, -0.5, -0.5], [-0.5, 0.5, -0.5], [0.5, 0.5, -0.5]]),
];

const FACE_UVS: [[f32; 2]; 4] = [[0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]];

/// Build a lit, textured mesh for one box.
pub fn cuboid_mesh(cuboid: &Cuboid, texture: Option<&Texture2D>, lighting: &LightingSettings) -> Mesh {
    let center = cuboid.position;
    let size = cuboid.size();

    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);

    for (normal, corners) in FACES.iter() {
        let color = scale_color(cuboid.color, face_shade(Vec3::from(*normal), lighting));
        let base = vertices.len() as u16;

        for (corner, uv) in corners.iter().zip(FACE_UVS.iter()) {
            let p = center + Vec3::from(*corner) * size;
            vertices.push(Vertex::new(p.x, p.y, p.z, uv[0], uv[1], color));
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    Mesh {
        vertices,
        indices,
        texture: texture.cloned(),
    }
}

/// Numbers shown by the F3 overlay
#[derive(Debug, Clone, Copy, Default)]
pub struct DebugInfo {
    pub fps: i32,
    pub frame: u64,
    pub enemies: usize,
    /// Resident memory in bytes, if the platform reports it
    pub memory: Option<usize>,
}

impl DebugInfo {
    pub fn collect(session: &Session) -> Self {
        Self {
            fps: get_fps(),
            frame: session.frame(),
            enemies: session.enemies().len(),
            memory: memory_stats::memory_stats().map(|m| m.physical_mem),
        }
    }

    pub fn lines(&self) -> Vec<String> {
        let memory = match self.memory {
            Some(bytes) => format!("MEM: {:.1} MB", bytes as f64 / (1024.0 * 1024.0)),
            None => "MEM: n/a".to_string(),
        };
        vec![
            format!("FPS: {}", self.fps),
            format!("FRAME: {}", self.frame),
            format!("ENEMIES: {}", self.enemies),
            memory,
        ]
    }
}

/// Draws a session: 3D scene, score, optional debug overlay.
pub struct SceneRenderer {
    texture: Option<Texture2D>,
    lighting: LightingSettings,
    pub show_debug_overlay: bool,
}

impl SceneRenderer {
    pub fn new(texture: Option<Texture2D>, lighting: LightingSettings) -> Self {
        Self {
            texture,
            lighting,
            show_debug_overlay: false,
        }
    }

    pub fn draw(&self, session: &Session, camera: &OrbitCamera) {
        clear_background(BLACK);

        set_camera(&camera.to_camera3d());
        self.draw_cuboid(session.ground());
        self.draw_cuboid(session.player());
        for enemy in session.enemies() {
            self.draw_cuboid(enemy);
        }

        set_default_camera();
        draw_score(session.score());

        if self.show_debug_overlay {
            draw_debug_overlay(&DebugInfo::collect(session));
        }
    }

    fn draw_cuboid(&self, cuboid: &Cuboid) {
        draw_mesh(&cuboid_mesh(cuboid, self.texture.as_ref(), &self.lighting));
    }
}

fn draw_score(score: u64) {
    draw_text(&score.to_string(), 20.0, 48.0, 48.0, WHITE);
}

fn draw_debug_overlay(info: &DebugInfo) {
    let lines = info.lines();
    let line_h = 18.0;
    let w = 180.0;
    let x = screen_width() - w - 10.0;
    let y = 10.0;

    draw_rectangle(x, y, w, line_h * lines.len() as f32 + 10.0, Color::from_rgba(0, 0, 0, 160));
    for (i, line) in lines.iter().enumerate() {
        draw_text(line, x + 8.0, y + 18.0 + i as f32 * line_h, 16.0, Color::from_rgba(200, 200, 210, 255));
    }
}
