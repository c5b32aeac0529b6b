//! Cosmetic particles and motion trails
//!
//! Nothing in here affects gameplay. Balls own their sparks and trail so the
//! effects disappear with the ball.

use glam::Vec2;
use rand::Rng;

/// Trail point for ball rendering
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailPoint {
    pub pos: Vec2,
    pub speed: f32,
}

/// Maximum number of trail points to store
pub const TRAIL_LENGTH: usize = 18;

/// Default per-ball particle cap (quality presets override it)
pub const MAX_BALL_PARTICLES: usize = 96;

/// Particle palette, resolved to colors by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleColor {
    /// Paddle hit sparks
    Spark,
    /// Full-energy power hit
    Power,
    /// Wall scrape
    Wall,
    /// Combo milestone burst
    Combo,
    /// Power-up collection
    Pickup,
}

/// A particle for visual effects
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: ParticleColor,
    /// 0-1, decreases over time
    pub life: f32,
    pub size: f32,
}

impl Particle {
    pub fn update(&mut self, dt: f32) {
        self.pos += self.vel * dt;
        self.vel *= 0.96;
        self.life -= dt * 1.8;
        self.size *= 0.992;
    }

    pub fn alive(&self) -> bool {
        self.life > 0.0
    }
}

/// Emit `count` particles in a cone of `spread` radians around `dir`
#[allow(clippy::too_many_arguments)]
pub fn burst<R: Rng>(
    out: &mut Vec<Particle>,
    rng: &mut R,
    origin: Vec2,
    dir: Vec2,
    spread: f32,
    count: usize,
    color: ParticleColor,
    cap: usize,
) {
    let base = dir.y.atan2(dir.x);
    for _ in 0..count {
        if out.len() >= cap {
            break;
        }
        let angle = base + rng.random_range(-0.5f32..0.5) * spread;
        let speed = rng.random_range(90.0f32..260.0);
        out.push(Particle {
            pos: origin,
            vel: Vec2::new(angle.cos(), angle.sin()) * speed,
            color,
            life: rng.random_range(0.35f32..0.7),
            size: rng.random_range(2.0f32..4.5),
        });
    }
}

/// Advance and cull a particle list
pub fn update_all(particles: &mut Vec<Particle>, dt: f32) {
    for p in particles.iter_mut() {
        p.update(dt);
    }
    particles.retain(Particle::alive);
}
