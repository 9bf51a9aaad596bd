//! Game Session
//!
//! All mutable game state lives in [`Session`], owned by the frame driver.
//! The host calls three entry points, in any interleaving:
//! - [`Session::handle_key`] for every key transition
//! - [`Session::tick`] once per display frame
//! - [`Session::advance_clock`] with elapsed wall-clock time (score)
//!
//! The run ends on the first player-enemy contact: the score timer is
//! cancelled and `tick` stops advancing. There is no restart.

use crate::settings::GameSettings;
use super::collision::collide;
use super::cuboid::{Cuboid, CuboidDesc};
use super::event::{CollisionEvent, Events, ScoreEvent, SpawnEvent};
use super::input::{Action, KeyEvent, Movement};
use super::physics;
use super::score::ScoreTimer;
use super::spawner::{is_spawn_frame, spawn_enemy, SpawnRng};
use macroquad::math::Vec3;

/// Where the run is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    /// Player touched `enemy` during `frame`
    Over { frame: u64, enemy: usize },
}

pub struct Session {
    settings: GameSettings,

    player: Cuboid,
    ground: Cuboid,
    /// Insertion-ordered, never shrinks
    enemies: Vec<Cuboid>,

    movement: Movement,
    /// Frames simulated so far (also the index of the next frame)
    frame: u64,
    score: ScoreTimer,
    phase: Phase,

    rng: Box<dyn SpawnRng>,

    /// Events produced since the driver last drained them
    pub events: Events,
}

impl Session {
    pub fn new(settings: GameSettings, rng: Box<dyn SpawnRng>) -> Self {
        let player = CuboidDesc::from_size(settings.player.size.into())
            .with_color(settings.player.color.into())
            .with_velocity(Vec3::new(0.0, settings.player.spawn_velocity_y, 0.0))
            .build();

        let ground = CuboidDesc::from_size(settings.ground.size.into())
            .with_color(settings.ground.color.into())
            .with_position(settings.ground.position.into())
            .build();

        let score = ScoreTimer::new(settings.score_interval_secs);

        Self {
            settings,
            player,
            ground,
            enemies: Vec::new(),
            movement: Movement::default(),
            frame: 0,
            score,
            phase: Phase::Running,
            rng,
            events: Events::new(),
        }
    }

    pub fn player(&self) -> &Cuboid {
        &self.player
    }

    pub fn ground(&self) -> &Cuboid {
        &self.ground
    }

    pub fn enemies(&self) -> &[Cuboid] {
        &self.enemies
    }

    pub fn movement(&self) -> Movement {
        self.movement
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn score(&self) -> u64 {
        self.score.score()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    /// Apply one key transition. Jumps take effect immediately, so host
    /// key-repeat re-triggers them.
    pub fn handle_key(&mut self, event: KeyEvent) {
        if !self.is_running() {
            return;
        }

        match event {
            KeyEvent::Down(key) => match self.settings.bindings.action_for(key) {
                Some(Action::Jump) => self.player.velocity.y = self.settings.player.jump_velocity,
                Some(action) => {
                    self.movement.set(action, true);
                }
                None => {}
            },
            KeyEvent::Up(key) => {
                if let Some(action) = self.settings.bindings.action_for(key) {
                    self.movement.set(action, false);
                }
            }
        }
    }

    /// Feed elapsed wall-clock seconds to the score timer.
    pub fn advance_clock(&mut self, elapsed: f64) -> u32 {
        let ticks = self.score.advance(elapsed);
        if ticks > 0 {
            self.events.score.send(ScoreEvent { score: self.score.score() });
        }
        ticks
    }

    /// Run one frame of game simulation.
    pub fn tick(&mut self) -> Phase {
        if !self.is_running() {
            return self.phase;
        }

        let physics = self.settings.physics;

        // Player movement is re-derived from the flags every frame
        let (vx, vz) = self.movement.velocity(self.settings.player.move_speed);
        self.player.velocity.x = vx;
        self.player.velocity.z = vz;

        physics::step(&mut self.player, &self.ground, &physics);

        let mut hit = None;
        for (index, enemy) in self.enemies.iter_mut().enumerate() {
            physics::step(enemy, &self.ground, &physics);
            if collide(&self.player, enemy) {
                hit = Some(index);
                break;
            }
        }

        if let Some(enemy) = hit {
            self.finish(enemy);
            return self.phase;
        }

        if is_spawn_frame(self.frame, self.settings.enemies.spawn_interval_frames) {
            let enemy = spawn_enemy(&self.settings.enemies, self.rng.as_mut());
            self.events.spawn.send(SpawnEvent {
                enemy: self.enemies.len(),
                frame: self.frame,
                position: enemy.position,
            });
            self.enemies.push(enemy);
        }

        self.frame += 1;
        self.phase
    }

    fn finish(&mut self, enemy: usize) {
        self.score.stop();
        self.phase = Phase::Over { frame: self.frame, enemy };
        self.events.collision.send(CollisionEvent {
            enemy,
            frame: self.frame,
            player_position: self.player.position,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::input::Key;
    use crate::game::spawner::tests::ScriptedRng;

    /// Enemies spawn at x = 4.5, clear of a player that stays at x = 0
    fn wide_session() -> Session {
        Session::new(GameSettings::default(), Box::new(ScriptedRng::new(&[0.95])))
    }

    /// Enemies spawn at x = 0, straight at the player
    fn head_on_session() -> Session {
        Session::new(GameSettings::default(), Box::new(ScriptedRng::new(&[0.5])))
    }

    #[test]
    fn test_spawn_cadence() {
        let mut s = wide_session();
        for _ in 0..100 {
            assert_eq!(s.tick(), Phase::Running);
        }

        assert_eq!(s.frame(), 100);
        assert_eq!(s.enemies().len(), 5);
        let frames: Vec<u64> = s.events.spawn.drain().map(|e| e.frame).collect();
        assert_eq!(frames, vec![0, 20, 40, 60, 80]);
    }

    #[test]
    fn test_spawned_enemies_advance() {
        let mut s = wide_session();
        s.tick();
        assert_eq!(s.enemies().len(), 1);
        assert_eq!(s.enemies()[0].position.z, -20.0);

        s.tick();
        let e = &s.enemies()[0];
        assert!(e.position.z > -20.0);
        assert!((e.velocity.z - (0.2 + 0.0003)).abs() < 1e-6);
    }

    #[test]
    fn test_movement_is_not_accumulated() {
        let mut s = wide_session();

        s.handle_key(KeyEvent::Down(Key::D));
        s.tick();
        s.tick();
        assert!((s.player().position.x - 0.2).abs() < 1e-5);

        s.handle_key(KeyEvent::Up(Key::D));
        s.tick();
        assert_eq!(s.player().velocity.x, 0.0);
        assert!((s.player().position.x - 0.2).abs() < 1e-5);

        s.handle_key(KeyEvent::Down(Key::Left));
        s.tick();
        assert!((s.player().position.x - 0.1).abs() < 1e-5);
    }

    #[test]
    fn test_unbound_keys_do_nothing() {
        let mut s = wide_session();
        s.handle_key(KeyEvent::Down(Key::W));
        s.handle_key(KeyEvent::Down(Key::S));
        assert_eq!(s.movement(), Movement::default());
        s.tick();
        assert_eq!(s.player().position.z, 0.0);
    }

    #[test]
    fn test_jump_retriggers_on_repeat() {
        let mut s = wide_session();

        s.handle_key(KeyEvent::Down(Key::Space));
        assert_eq!(s.player().velocity.y, 0.2);

        s.tick();
        assert!(s.player().velocity.y < 0.2);

        // Key-repeat while held: another key-down, another jump
        s.handle_key(KeyEvent::Down(Key::Space));
        assert_eq!(s.player().velocity.y, 0.2);

        s.handle_key(KeyEvent::Up(Key::Space));
        assert_eq!(s.player().velocity.y, 0.2);
    }

    #[test]
    fn test_score_follows_clock() {
        let mut s = wide_session();
        assert_eq!(s.advance_clock(0.5), 0);
        assert_eq!(s.advance_clock(0.5), 1);
        assert_eq!(s.score(), 1);
        assert_eq!(s.events.score.drain().next(), Some(ScoreEvent { score: 1 }));
    }

    #[test]
    fn test_head_on_enemy_ends_run() {
        let mut s = head_on_session();

        let mut over = None;
        for _ in 0..400 {
            s.advance_clock(1.0 / 60.0);
            if let Phase::Over { frame, enemy } = s.tick() {
                over = Some((frame, enemy));
                break;
            }
        }

        let (frame, enemy) = over.expect("head-on enemy should reach the player");
        assert_eq!(enemy, 0);
        assert_eq!(s.events.collision.len(), 1);

        // Terminal: nothing moves any more
        let score = s.score();
        let enemies = s.enemies().len();
        let z = s.enemies()[0].position.z;
        for _ in 0..50 {
            s.advance_clock(1.0);
            assert_eq!(s.tick(), Phase::Over { frame, enemy });
        }
        assert_eq!(s.score(), score);
        assert_eq!(s.enemies().len(), enemies);
        assert_eq!(s.enemies()[0].position.z, z);
        assert_eq!(s.frame(), frame);

        // Input is ignored too
        s.handle_key(KeyEvent::Down(Key::Space));
        assert_ne!(s.player().velocity.y, 0.2);
    }

    #[test]
    fn test_player_settles_on_ground() {
        let mut s = wide_session();
        for _ in 0..300 {
            s.tick();
        }
        let p = s.player();
        assert!(p.velocity.y.abs() < 0.05);
        assert!(p.position.y > -1.75);
        assert!(p.position.y < -1.0);
    }
}
