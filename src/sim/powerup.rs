//! Power-up pickups and their spawner

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Pickup collision radius
pub const POWERUP_RADIUS: f32 = 14.0;
/// Seconds a pickup stays on the field
pub const POWERUP_TTL: f32 = 10.0;
/// Most pickups on the field at once
pub const MAX_POWERUPS: usize = 2;
/// Spawn area half extents (center court)
pub const SPAWN_HALF_EXTENT: Vec2 = Vec2::new(200.0, 220.0);
/// Seconds between spawn attempts
pub const SPAWN_INTERVAL_MIN: f32 = 6.0;
pub const SPAWN_INTERVAL_MAX: f32 = 10.0;

/// Effect durations
pub const SPEED_SECS: f32 = 6.0;
pub const COMBO_SECS: f32 = 8.0;
pub const GROW_SECS: f32 = 8.0;
/// Balls spawned by one multi-ball pickup
pub const MULTI_EXTRA_BALLS: usize = 2;

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Ball moves faster for a while
    Speed,
    /// Splits off extra balls
    Multi,
    /// Goals by the ball count double
    Combo,
    /// Owner's paddle grows
    Grow,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 4] = [
        PowerUpKind::Speed,
        PowerUpKind::Multi,
        PowerUpKind::Combo,
        PowerUpKind::Grow,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PowerUpKind::Speed => "SPEED",
            PowerUpKind::Multi => "MULTI",
            PowerUpKind::Combo => "x2",
            PowerUpKind::Grow => "GROW",
        }
    }

    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// A pickup entity
#[derive(Debug, Clone)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    pub pos: Vec2,
    pub radius: f32,
    pub ttl: f32,
    /// Seconds since spawn (drives the pulse animation)
    pub age: f32,
}

impl PowerUp {
    pub fn new(id: u32, kind: PowerUpKind, pos: Vec2) -> Self {
        Self {
            id,
            kind,
            pos,
            radius: POWERUP_RADIUS,
            ttl: POWERUP_TTL,
            age: 0.0,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.age += dt;
        self.ttl -= dt;
    }

    pub fn expired(&self) -> bool {
        self.ttl <= 0.0
    }
}

/// Countdown to the next spawn attempt
#[derive(Debug, Clone)]
pub struct PowerUpSpawner {
    pub timer: f32,
}

impl PowerUpSpawner {
    pub fn new<R: Rng>(rng: &mut R) -> Self {
        Self {
            timer: Self::next_interval(rng),
        }
    }

    fn next_interval<R: Rng>(rng: &mut R) -> f32 {
        rng.random_range(SPAWN_INTERVAL_MIN..SPAWN_INTERVAL_MAX)
    }

    /// Advance the timer. Returns a kind and position when a pickup should appear.
    pub fn update<R: Rng>(&mut self, dt: f32, on_field: usize, rng: &mut R) -> Option<(PowerUpKind, Vec2)> {
        self.timer -= dt;
        if self.timer > 0.0 {
            return None;
        }
        self.timer = Self::next_interval(rng);
        if on_field >= MAX_POWERUPS {
            return None;
        }

        let pos = Vec2::new(
            rng.random_range(-SPAWN_HALF_EXTENT.x..=SPAWN_HALF_EXTENT.x),
            rng.random_range(-SPAWN_HALF_EXTENT.y..=SPAWN_HALF_EXTENT.y),
        );
        Some((PowerUpKind::random(rng), pos))
    }
}
