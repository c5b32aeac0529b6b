//! Decorative backdrop: drifting starfield and a pulsing grid
//!
//! Purely cosmetic. Has its own RNG so it never disturbs the match seed.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::{HALF_HEIGHT, HALF_WIDTH};

/// Grid cell size in world units
pub const GRID_SPACING: f32 = 50.0;
/// Grid scroll speed (units/s, leftward)
const GRID_SCROLL: f32 = 12.0;
/// Pulse frequency (rad/s)
const PULSE_RATE: f32 = 1.6;

#[derive(Debug, Clone)]
pub struct Star {
    pub pos: Vec2,
    /// Parallax depth 0 (far) .. 1 (near); scales speed, size and brightness
    pub depth: f32,
    pub twinkle_phase: f32,
}

impl Star {
    pub fn size(&self) -> f32 {
        0.8 + self.depth * 1.8
    }

    /// Current brightness 0-1
    pub fn brightness(&self) -> f32 {
        let base = 0.3 + self.depth * 0.5;
        (base * (0.75 + 0.25 * self.twinkle_phase.sin())).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone)]
pub struct BackgroundManager {
    stars: Vec<Star>,
    /// Horizontal grid offset (wraps at `GRID_SPACING`)
    grid_offset: f32,
    time: f32,
    /// Extra glow kicked by gameplay (goals), decays
    flash: f32,
    /// Calmer motion for reduced-motion users
    calm: bool,
    rng: Pcg32,
}

impl BackgroundManager {
    pub fn new(star_count: usize, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let stars = (0..star_count)
            .map(|_| Star {
                pos: Vec2::new(
                    rng.random_range(-HALF_WIDTH..HALF_WIDTH),
                    rng.random_range(-HALF_HEIGHT..HALF_HEIGHT),
                ),
                depth: rng.random_range(0.0f32..1.0),
                twinkle_phase: rng.random_range(0.0f32..std::f32::consts::TAU),
            })
            .collect();

        Self {
            stars,
            grid_offset: 0.0,
            time: 0.0,
            flash: 0.0,
            calm: false,
            rng,
        }
    }

    pub fn set_calm(&mut self, calm: bool) {
        self.calm = calm;
    }

    /// Brighten the grid briefly
    pub fn flash(&mut self, amount: f32) {
        self.flash = (self.flash + amount).min(1.0);
    }

    pub fn update(&mut self, dt: f32) {
        self.time += dt;
        let motion = if self.calm { 0.25 } else { 1.0 };

        for star in self.stars.iter_mut() {
            star.pos.x -= (8.0 + 40.0 * star.depth) * motion * dt;
            star.twinkle_phase += (1.5 + star.depth * 2.0) * dt;
            if star.pos.x < -HALF_WIDTH {
                // Re-enter on the right at a fresh height
                star.pos.x += 2.0 * HALF_WIDTH;
                star.pos.y = self.rng.random_range(-HALF_HEIGHT..HALF_HEIGHT);
            }
        }

        self.grid_offset = (self.grid_offset + GRID_SCROLL * motion * dt).rem_euclid(GRID_SPACING);
        self.flash = (self.flash - dt * 1.5).max(0.0);
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn grid_offset(&self) -> f32 {
        self.grid_offset
    }

    /// Grid line intensity 0-1 (slow sinusoidal pulse plus flash)
    pub fn grid_pulse(&self) -> f32 {
        let amplitude = if self.calm { 0.05 } else { 0.15 };
        let pulse = 0.5 + amplitude * (self.time * PULSE_RATE).sin();
        (pulse + self.flash * 0.5).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_star_count_from_preset() {
        let bg = BackgroundManager::new(90, 1);
        assert_eq!(bg.stars().len(), 90);
    }

    #[test]
    fn test_stars_wrap_inside_arena() {
        let mut bg = BackgroundManager::new(40, 2);
        for _ in 0..2000 {
            bg.update(1.0 / 30.0);
        }
        for star in bg.stars() {
            assert!(star.pos.x >= -HALF_WIDTH && star.pos.x <= HALF_WIDTH);
            assert!(star.pos.y.abs() <= HALF_HEIGHT);
            assert!((0.0..=1.0).contains(&star.brightness()));
        }
    }

    #[test]
    fn test_grid_offset_wraps() {
        let mut bg = BackgroundManager::new(0, 3);
        for _ in 0..500 {
            bg.update(0.1);
            assert!(bg.grid_offset() >= 0.0 && bg.grid_offset() < GRID_SPACING);
        }
    }

    #[test]
    fn test_flash_decays() {
        let mut bg = BackgroundManager::new(0, 4);
        let calm = bg.grid_pulse();
        bg.flash(1.0);
        assert!(bg.grid_pulse() > calm);
        for _ in 0..60 {
            bg.update(1.0 / 60.0);
        }
        assert!(bg.flash == 0.0);
    }
}
