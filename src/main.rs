//! Cube Dodge: steer a cube on a slab and dodge the boxes rushing at you
//!
//! Left/Right (or A/D) to move, Space to jump. Drag with the left mouse
//! button to orbit the camera, scroll to zoom, F3 for the debug overlay.
//! An optional settings file path may be passed as the first argument.

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod game;
mod keyboard;
mod logging;
mod settings;

use macroquad::prelude::*;
use game::spawner::SpawnRng;
use game::{OrbitCamera, SceneRenderer, Session};
use keyboard::KeyboardHook;
use settings::GameSettings;

fn window_conf() -> Conf {
    Conf {
        window_title: format!("Cube Dodge v{}", VERSION),
        window_width: 1280,
        window_height: 720,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

/// Try the settings search path; a broken file falls back to defaults.
#[cfg(not(target_arch = "wasm32"))]
async fn load_settings() -> GameSettings {
    let explicit = std::env::args().nth(1).map(std::path::PathBuf::from);
    let has_explicit = explicit.is_some();

    for path in settings::settings_search_path(explicit, dirs::config_dir()) {
        if !has_explicit && !path.exists() {
            continue;
        }
        return match GameSettings::load(&path) {
            Ok(settings) => {
                tracing::info!("loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                tracing::warn!("failed to load settings {}: {}, using defaults", path.display(), e);
                GameSettings::default()
            }
        };
    }

    tracing::info!("no settings file found, using defaults");
    GameSettings::default()
}

/// WASM: settings can only come bundled with the page.
#[cfg(target_arch = "wasm32")]
async fn load_settings() -> GameSettings {
    let path = format!("assets/{}", settings::SETTINGS_FILE);
    match macroquad::file::load_string(&path).await {
        Ok(text) => GameSettings::from_ron_str(&text).unwrap_or_else(|e| {
            tracing::warn!("failed to parse {}: {}, using defaults", path, e);
            GameSettings::default()
        }),
        Err(_) => GameSettings::default(),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn spawn_rng(seed: Option<u64>) -> Box<dyn SpawnRng> {
    // `::rand` is the crate; the prelude glob also brings `macroquad::rand`
    use ::rand::rngs::StdRng;
    use ::rand::SeedableRng;
    match seed {
        Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
        None => Box::new(StdRng::from_entropy()),
    }
}

#[cfg(target_arch = "wasm32")]
fn spawn_rng(seed: Option<u64>) -> Box<dyn SpawnRng> {
    let seed = seed.unwrap_or_else(|| (macroquad::miniquad::date::now() * 1000.0) as u64);
    macroquad::rand::srand(seed);
    Box::new(game::spawner::QuadRng)
}

/// Log and discard this frame's game events.
fn drain_events(session: &mut Session) {
    let score = session.score();
    for spawn in session.events.spawn.drain() {
        tracing::debug!(
            enemy = spawn.enemy,
            frame = spawn.frame,
            x = spawn.position.x,
            "enemy spawned"
        );
    }
    for change in session.events.score.drain() {
        tracing::debug!(score = change.score, "score increased");
    }
    for hit in session.events.collision.drain() {
        tracing::info!(enemy = hit.enemy, frame = hit.frame, score, "player hit, game over");
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    // Initialize crash logging FIRST (before any other code)
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    logging::init_logging();
    tracing::info!("Cube Dodge v{}", VERSION);

    let settings = load_settings().await;
    let texture = game::renderer::load_box_texture(settings.texture_path.as_deref()).await;

    let fps_limit = settings.fps_limit;
    let mut camera = OrbitCamera::new(settings.camera);
    let mut renderer = SceneRenderer::new(Some(texture), settings.lighting);
    let rng = spawn_rng(settings.seed);
    let mut session = Session::new(settings, rng);
    let mut keyboard = KeyboardHook::new();

    let mut last_mouse = mouse_position();
    let mut last_time = get_time();

    loop {
        let frame_start = get_time();

        // Score runs on wall-clock time, not frame count
        session.advance_clock(frame_start - last_time);
        last_time = frame_start;

        if is_key_pressed(KeyCode::F3) {
            renderer.show_debug_overlay = !renderer.show_debug_overlay;
        }

        for event in keyboard.poll() {
            session.handle_key(event);
        }

        // Orbit camera (left-drag, wheel); frozen with the rest of the scene
        let mouse_pos = mouse_position();
        if session.is_running() {
            if is_mouse_button_down(MouseButton::Left) {
                camera.rotate(mouse_pos.0 - last_mouse.0, mouse_pos.1 - last_mouse.1);
            }
            let scroll = mouse_wheel().1;
            if scroll.abs() > 0.1 {
                camera.zoom(scroll.signum());
            }
            camera.update();
        }
        last_mouse = mouse_pos;

        renderer.draw(&session, &camera);

        session.tick();
        drain_events(&mut session);

        // FPS limiting
        if let Some(target_frame_time) = fps_limit.frame_time() {
            let elapsed = get_time() - frame_start;
            let remaining = target_frame_time - elapsed;

            if remaining > 0.0 {
                // Native: use sleep for bulk, then spin-wait for precision
                #[cfg(not(target_arch = "wasm32"))]
                {
                    let spin_margin = 0.002; // 2ms
                    while get_time() - frame_start + spin_margin < target_frame_time {
                        std::thread::sleep(std::time::Duration::from_millis(1));
                    }
                    while get_time() - frame_start < target_frame_time {
                        std::hint::spin_loop();
                    }
                }
                // WASM: just spin-wait (no thread::sleep available)
                #[cfg(target_arch = "wasm32")]
                {
                    while get_time() - frame_start < target_frame_time {}
                }
            }
        }

        next_frame().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples(rng: &mut dyn SpawnRng) -> Vec<f32> {
        (0..8).map(|_| rng.next_unit()).collect()
    }

    #[test]
    fn test_seeded_spawn_rng_is_reproducible() {
        let a = samples(spawn_rng(Some(1234)).as_mut());
        let b = samples(spawn_rng(Some(1234)).as_mut());
        assert_eq!(a, b);
        assert!(a.iter().all(|&x| (0.0..1.0).contains(&x)));

        let c = samples(spawn_rng(Some(4321)).as_mut());
        assert_ne!(a, c);
    }

    #[test]
    fn test_unseeded_spawn_rng_stays_in_unit_range() {
        let mut rng = spawn_rng(None);
        for _ in 0..100 {
            let x = rng.next_unit();
            assert!((0.0..1.0).contains(&x));
        }
    }
}
