//! Event System
//!
//! Things that happened during a frame, collected by the session and
//! drained by the driver (logging, HUD). The simulation never reads them.

use macroquad::math::Vec3;

/// A queue for events of a single type.
/// Events are collected during the frame and drained at specific points.
#[derive(Debug)]
pub struct EventQueue<T> {
    events: Vec<T>,
}

impl<T> EventQueue<T> {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Send an event (add to queue)
    pub fn send(&mut self, event: T) {
        self.events.push(event);
    }

    /// Drain all events (returns iterator and clears queue)
    pub fn drain(&mut self) -> impl Iterator<Item = T> + '_ {
        self.events.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl<T> Default for EventQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Container for all game events.
#[derive(Debug, Default)]
pub struct Events {
    /// Enemy added to the live list
    pub spawn: EventQueue<SpawnEvent>,

    /// Player touched an enemy (ends the run)
    pub collision: EventQueue<CollisionEvent>,

    /// Score counter advanced
    pub score: EventQueue<ScoreEvent>,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }
}

// =============================================================================
// Event Types
// =============================================================================

/// An enemy was spawned
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnEvent {
    /// Index into the live enemy list
    pub enemy: usize,
    /// Frame it was spawned on
    pub frame: u64,
    pub position: Vec3,
}

/// The player hit an enemy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionEvent {
    pub enemy: usize,
    pub frame: u64,
    pub player_position: Vec3,
}

/// The score changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreEvent {
    pub score: u64,
}
