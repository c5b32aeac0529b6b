//! Paddle entity: smoothed movement, combo counter and energy meter

use glam::Vec2;

use super::collision::Aabb;
use super::state::Side;
use crate::consts::*;
use crate::smoothing_factor;

/// Height multiplier for the grow power-up
pub const GROW_FACTOR: f32 = 1.5;
/// Energy gained per hit before the combo bonus
const ENERGY_PER_HIT: f32 = 10.0;
/// Extra energy per combo step (capped at 10 steps)
const ENERGY_PER_COMBO: f32 = 2.0;

#[derive(Debug, Clone)]
pub struct Paddle {
    pub side: Side,
    /// Center x (fixed)
    pub x: f32,
    /// Center y
    pub y: f32,
    /// Where the paddle is heading
    pub target_y: f32,
    /// Measured vertical velocity (feeds spin)
    pub vel_y: f32,
    pub base_height: f32,
    pub height: f32,
    /// Seconds left on the grow power-up
    pub grow_secs: f32,
    /// Consecutive returns since this side last conceded
    pub combo: u32,
    /// Energy meter, 0..=PADDLE_MAX_ENERGY
    pub energy: f32,
    /// Hit flash intensity (0-1, decays)
    pub hit_flash: f32,
}

impl Paddle {
    pub fn new(side: Side) -> Self {
        let x = -side.outward() * (HALF_WIDTH - PADDLE_MARGIN);
        Self {
            side,
            x,
            y: 0.0,
            target_y: 0.0,
            vel_y: 0.0,
            base_height: PADDLE_HEIGHT,
            height: PADDLE_HEIGHT,
            grow_secs: 0.0,
            combo: 0,
            energy: 0.0,
            hit_flash: 0.0,
        }
    }

    /// x of the face the ball bounces off
    #[inline]
    pub fn face_x(&self) -> f32 {
        self.x + self.side.outward() * PADDLE_WIDTH / 2.0
    }

    pub fn rect(&self) -> Aabb {
        Aabb::new(Vec2::new(self.x, self.y), Vec2::new(PADDLE_WIDTH, self.height))
    }

    /// Whether `y` is within the paddle's vertical span
    pub fn contains_y(&self, y: f32) -> bool {
        (y - self.y).abs() <= self.height / 2.0
    }

    /// Largest |y| the paddle center may reach at its current height
    fn max_y(&self) -> f32 {
        HALF_HEIGHT - self.height / 2.0
    }

    /// Continuous key-driven movement: `direction` is +1 (up), -1 (down) or 0
    pub fn nudge(&mut self, direction: f32, dt: f32) {
        if direction != 0.0 {
            let limit = self.max_y();
            self.target_y = (self.target_y + direction.signum() * PADDLE_SPEED * dt).clamp(-limit, limit);
        }
    }

    /// Point the paddle at an absolute y (pointer or AI)
    pub fn set_target(&mut self, y: f32) {
        let limit = self.max_y();
        self.target_y = y.clamp(-limit, limit);
    }

    /// Smoothed follow toward the target plus timer decay
    pub fn update(&mut self, dt: f32) {
        if self.grow_secs > 0.0 {
            self.grow_secs = (self.grow_secs - dt).max(0.0);
            if self.grow_secs == 0.0 {
                self.height = self.base_height;
            }
        }

        let limit = self.max_y();
        self.target_y = self.target_y.clamp(-limit, limit);

        let prev = self.y;
        self.y += (self.target_y - self.y) * smoothing_factor(PADDLE_SMOOTHING, dt);
        self.y = self.y.clamp(-limit, limit);
        self.vel_y = if dt > 0.0 { (self.y - prev) / dt } else { 0.0 };

        self.hit_flash = (self.hit_flash - dt * 4.0).max(0.0);
    }

    /// Record a successful return. Returns true for a power hit (meter was full).
    pub fn register_hit(&mut self) -> bool {
        let power_hit = self.energy >= PADDLE_MAX_ENERGY;
        self.combo += 1;
        self.hit_flash = 1.0;
        if power_hit {
            self.energy = 0.0;
        } else {
            let gain = ENERGY_PER_HIT + ENERGY_PER_COMBO * self.combo.min(10) as f32;
            self.energy = (self.energy + gain).min(PADDLE_MAX_ENERGY);
        }
        power_hit
    }

    pub fn break_combo(&mut self) {
        self.combo = 0;
    }

    /// Grow power-up; refreshes the timer if already grown
    pub fn grow(&mut self, secs: f32) {
        self.height = self.base_height * GROW_FACTOR;
        self.grow_secs = secs;
        let limit = self.max_y();
        self.y = self.y.clamp(-limit, limit);
        self.target_y = self.target_y.clamp(-limit, limit);
    }

    /// Energy meter as 0-1
    pub fn energy_fraction(&self) -> f32 {
        self.energy / PADDLE_MAX_ENERGY
    }
}
