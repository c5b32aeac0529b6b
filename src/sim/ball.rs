//! Ball entity: motion, spin, bounce response and cosmetics

use glam::Vec2;
use rand::Rng;

use super::collision::{Wall, reflect_velocity};
use super::paddle::Paddle;
use super::particle::{self, MAX_BALL_PARTICLES, Particle, ParticleColor, TRAIL_LENGTH, TrailPoint};
use super::state::Side;
use crate::consts::*;
use crate::lerp;

/// Speed multiplier while the speed power-up is active
pub const SPEED_POWER_FACTOR: f32 = 1.35;
/// Largest rotation applied to multi-ball clones (25 degrees either way)
pub const SECONDARY_SPREAD: f32 = 25.0 * std::f32::consts::PI / 180.0;

/// Timed power-up state carried by a ball
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BallPower {
    /// Seconds of boosted speed left
    pub speed_secs: f32,
    /// Seconds during which a goal by this ball counts double
    pub combo_secs: f32,
}

impl BallPower {
    pub fn tick(&mut self, dt: f32) {
        self.speed_secs = (self.speed_secs - dt).max(0.0);
        self.combo_secs = (self.combo_secs - dt).max(0.0);
    }

    #[inline]
    pub fn speed_active(&self) -> bool {
        self.speed_secs > 0.0
    }

    #[inline]
    pub fn combo_active(&self) -> bool {
        self.combo_secs > 0.0
    }
}

/// A ball entity
#[derive(Debug, Clone)]
pub struct Ball {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Angular curve rate (rad/s); bends the path, decays over time
    pub spin: f32,
    pub power: BallPower,
    /// Spawned by the multi-ball power-up
    pub secondary: bool,
    /// Side of the paddle that touched this ball last
    pub last_hit: Option<Side>,
    /// Trail history for rendering (newest first)
    pub trail: Vec<TrailPoint>,
    /// Sparks emitted by this ball
    pub particles: Vec<Particle>,
    /// Particle cap (from the quality preset)
    pub particle_cap: usize,
}

impl Ball {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            radius: BALL_RADIUS,
            spin: 0.0,
            power: BallPower::default(),
            secondary: false,
            last_hit: None,
            trail: Vec::with_capacity(TRAIL_LENGTH),
            particles: Vec::new(),
            particle_cap: MAX_BALL_PARTICLES,
        }
    }

    /// Put the ball at center court moving toward `toward` at `angle` from horizontal
    pub fn serve(&mut self, toward: Side, angle: f32, speed: f32) {
        let angle = angle.clamp(-SERVE_MAX_ANGLE, SERVE_MAX_ANGLE);
        // Heading toward a side means moving against that side's outward direction
        let dir_x = -toward.outward();
        self.pos = Vec2::ZERO;
        self.vel = Vec2::new(dir_x * angle.cos(), angle.sin()) * speed;
        self.spin = 0.0;
        self.last_hit = None;
        self.power = BallPower::default();
        self.trail.clear();
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Effective multiplier on displacement (speed power-up)
    #[inline]
    pub fn speed_factor(&self) -> f32 {
        if self.power.speed_active() {
            SPEED_POWER_FACTOR
        } else {
            1.0
        }
    }

    /// Advance position, apply spin curve and tick timers
    pub fn integrate(&mut self, dt: f32) {
        if self.spin != 0.0 {
            // Spin bends the velocity without changing its magnitude
            let speed = self.vel.length();
            let perp = self.vel.perp();
            self.vel += perp * self.spin * SPIN_CURVE * dt;
            self.vel = clamp_heading(self.vel.normalize_or_zero() * speed);
            self.spin *= (-SPIN_DECAY * dt).exp();
            if self.spin.abs() < 1e-3 {
                self.spin = 0.0;
            }
        }

        self.pos += self.vel * self.speed_factor() * dt;
        self.power.tick(dt);
        self.record_trail();
    }

    /// Record current position to trail
    pub fn record_trail(&mut self) {
        let speed = self.vel.length() * self.speed_factor();
        self.trail.insert(0, TrailPoint { pos: self.pos, speed });
        self.trail.truncate(TRAIL_LENGTH);
    }

    /// Normalized hit offset against a paddle: -1 bottom edge, 0 center, +1 top edge
    pub fn hit_offset(&self, paddle: &Paddle) -> f32 {
        let reach = paddle.height / 2.0 + self.radius;
        ((self.pos.y - paddle.y) / reach).clamp(-1.0, 1.0)
    }

    /// Rebound off a paddle face.
    ///
    /// The outgoing angle is interpolated linearly from the hit offset across
    /// `[-MAX_BOUNCE_ANGLE, MAX_BOUNCE_ANGLE]`, the direction always points
    /// away from the paddle and the paddle's motion becomes spin.
    pub fn bounce_off_paddle(&mut self, paddle: &Paddle, power_hit: bool) {
        let offset = self.hit_offset(paddle);
        let angle = lerp(-MAX_BOUNCE_ANGLE, MAX_BOUNCE_ANGLE, (offset + 1.0) / 2.0);

        let mut speed = self.speed() * PADDLE_SPEEDUP;
        if power_hit {
            speed *= POWER_HIT_BOOST;
        }
        let speed = speed.min(BALL_MAX_SPEED);

        let dir_x = paddle.side.outward();
        self.vel = Vec2::new(dir_x * angle.cos(), angle.sin()) * speed;
        self.spin = paddle.vel_y * SPIN_TRANSFER;
        self.last_hit = Some(paddle.side);

        // Sit flush against the face so the next tick doesn't re-collide
        self.pos.x = paddle.face_x() + dir_x * (self.radius + 0.5);
    }

    /// Rebound off the top or bottom wall
    pub fn bounce_off_wall(&mut self, wall: Wall, half_height: f32) {
        let (y, normal) = match wall {
            Wall::Top => (half_height - self.radius, Vec2::NEG_Y),
            Wall::Bottom => (-half_height + self.radius, Vec2::Y),
        };
        self.pos.y = y;
        // Only reflect when still heading into the wall
        if self.vel.dot(normal) < 0.0 {
            self.vel = reflect_velocity(self.vel, normal);
        }
        self.spin *= -0.5;
    }

    /// Clone this ball for multi-ball, veering off at a random angle
    pub fn spawn_secondary<R: Rng>(&self, id: u32, rng: &mut R) -> Ball {
        let turn = rng.random_range(-SECONDARY_SPREAD..=SECONDARY_SPREAD);
        // Never let a clone travel (nearly) vertically
        let vel = clamp_heading(Vec2::from_angle(turn).rotate(self.vel));

        let mut ball = Ball::new(id);
        ball.pos = self.pos;
        ball.vel = vel;
        ball.secondary = true;
        ball.last_hit = self.last_hit;
        ball.particle_cap = self.particle_cap;
        ball
    }

    /// Sparks flying away from a contact along `normal`
    pub fn emit_sparks<R: Rng>(&mut self, rng: &mut R, normal: Vec2, count: usize, color: ParticleColor) {
        let cap = self.particle_cap;
        particle::burst(
            &mut self.particles,
            rng,
            self.pos,
            normal,
            std::f32::consts::FRAC_PI_2,
            count,
            color,
            cap,
        );
    }

    /// Ring burst (combo milestones, pickups)
    pub fn emit_ring<R: Rng>(&mut self, rng: &mut R, count: usize, color: ParticleColor) {
        let cap = self.particle_cap;
        particle::burst(
            &mut self.particles,
            rng,
            self.pos,
            Vec2::X,
            std::f32::consts::TAU,
            count,
            color,
            cap,
        );
    }

    pub fn update_cosmetics(&mut self, dt: f32) {
        particle::update_all(&mut self.particles, dt);
    }
}

/// Keep a velocity within `MAX_BOUNCE_ANGLE` of horizontal, preserving speed
/// and horizontal direction
pub fn clamp_heading(vel: Vec2) -> Vec2 {
    let speed = vel.length();
    if speed == 0.0 {
        return vel;
    }
    let dir_x = if vel.x < 0.0 { -1.0 } else { 1.0 };
    let angle = vel.y.atan2(vel.x.abs());
    if angle.abs() <= MAX_BOUNCE_ANGLE {
        return vel;
    }
    let angle = angle.clamp(-MAX_BOUNCE_ANGLE, MAX_BOUNCE_ANGLE);
    Vec2::new(dir_x * angle.cos(), angle.sin()) * speed
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn left_paddle() -> Paddle {
        Paddle::new(Side::Left)
    }

    #[test]
    fn test_serve_heads_toward_side() {
        let mut ball = Ball::new(1);
        ball.serve(Side::Right, 0.2, BALL_START_SPEED);
        assert!(ball.vel.x > 0.0);
        assert!((ball.speed() - BALL_START_SPEED).abs() < 0.01);

        ball.serve(Side::Left, -0.2, BALL_START_SPEED);
        assert!(ball.vel.x < 0.0);
        assert!(ball.vel.y < 0.0);
    }

    #[test]
    fn test_center_hit_goes_straight() {
        let paddle = left_paddle();
        let mut ball = Ball::new(1);
        ball.pos = Vec2::new(paddle.face_x() + 4.0, paddle.y);
        ball.vel = Vec2::new(-BALL_START_SPEED, 0.0);

        ball.bounce_off_paddle(&paddle, false);
        assert!(ball.vel.x > 0.0);
        assert!(ball.vel.y.abs() < 1e-3);
        assert!((ball.speed() - BALL_START_SPEED * PADDLE_SPEEDUP).abs() < 0.01);
        assert_eq!(ball.last_hit, Some(Side::Left));
    }

    #[test]
    fn test_edge_hit_uses_max_angle() {
        let paddle = left_paddle();
        let mut ball = Ball::new(1);
        ball.pos = Vec2::new(paddle.face_x() + 4.0, paddle.y + paddle.height);
        ball.vel = Vec2::new(-BALL_START_SPEED, 0.0);

        ball.bounce_off_paddle(&paddle, false);
        let angle = ball.vel.y.atan2(ball.vel.x);
        assert!((angle - MAX_BOUNCE_ANGLE).abs() < 1e-4);
    }

    #[test]
    fn test_power_hit_is_faster_but_capped() {
        let paddle = left_paddle();
        let mut normal = Ball::new(1);
        normal.vel = Vec2::new(-400.0, 0.0);
        let mut power = normal.clone();

        normal.bounce_off_paddle(&paddle, false);
        power.bounce_off_paddle(&paddle, true);
        assert!(power.speed() > normal.speed());

        let mut fast = Ball::new(2);
        fast.vel = Vec2::new(-BALL_MAX_SPEED, 0.0);
        fast.bounce_off_paddle(&paddle, true);
        assert!(fast.speed() <= BALL_MAX_SPEED + 0.01);
    }

    #[test]
    fn test_slow_ball_speeds_up_by_factor_only() {
        let paddle = left_paddle();
        let mut ball = Ball::new(1);
        ball.pos = Vec2::new(paddle.face_x() + 4.0, paddle.y);
        ball.vel = Vec2::new(-100.0, 0.0);

        ball.bounce_off_paddle(&paddle, false);
        assert!((ball.speed() - 100.0 * PADDLE_SPEEDUP).abs() < 0.01);
    }

    #[test]
    fn test_paddle_motion_becomes_spin() {
        let mut paddle = left_paddle();
        paddle.vel_y = 300.0;
        let mut ball = Ball::new(1);
        ball.vel = Vec2::new(-300.0, 0.0);
        ball.bounce_off_paddle(&paddle, false);
        assert!((ball.spin - 300.0 * SPIN_TRANSFER).abs() < 1e-6);
    }

    #[test]
    fn test_spin_curves_and_decays() {
        let mut ball = Ball::new(1);
        ball.vel = Vec2::new(300.0, 0.0);
        ball.spin = 1.0;
        ball.integrate(0.1);
        assert!(ball.vel.y > 0.0, "positive spin curves counter-clockwise");
        assert!((ball.speed() - 300.0).abs() < 0.01, "spin keeps speed");
        assert!(ball.spin < 1.0);
    }

    #[test]
    fn test_heavy_spin_never_turns_vertical() {
        let mut ball = Ball::new(1);
        ball.vel = Vec2::new(-300.0, 0.0);
        ball.spin = 25.0;
        for _ in 0..60 {
            ball.integrate(1.0 / 120.0);
            let angle = ball.vel.y.atan2(ball.vel.x.abs());
            assert!(angle.abs() <= MAX_BOUNCE_ANGLE + 1e-4);
            assert!(ball.vel.x < 0.0);
        }
    }

    #[test]
    fn test_wall_bounce_reflects_and_clamps() {
        let mut ball = Ball::new(1);
        ball.pos = Vec2::new(0.0, HALF_HEIGHT + 3.0);
        ball.vel = Vec2::new(100.0, 200.0);
        ball.spin = 0.5;
        ball.bounce_off_wall(Wall::Top, HALF_HEIGHT);
        assert_eq!(ball.pos.y, HALF_HEIGHT - ball.radius);
        assert!(ball.vel.y < 0.0);
        assert!((ball.spin + 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_speed_power_moves_further() {
        let mut plain = Ball::new(1);
        plain.vel = Vec2::new(100.0, 0.0);
        let mut boosted = plain.clone();
        boosted.power.speed_secs = 1.0;

        plain.integrate(0.1);
        boosted.integrate(0.1);
        assert!(boosted.pos.x > plain.pos.x);
        assert!((boosted.power.speed_secs - 0.9).abs() < 1e-5);
    }

    #[test]
    fn test_secondary_keeps_heading_sideways() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut ball = Ball::new(1);
        ball.vel = Vec2::new(300.0, 100.0);
        ball.last_hit = Some(Side::Left);
        for id in 2..20 {
            let clone = ball.spawn_secondary(id, &mut rng);
            assert!(clone.secondary);
            assert_eq!(clone.last_hit, Some(Side::Left));
            assert!(clone.vel.x > 0.0);
            assert!((clone.speed() - ball.speed()).abs() < 0.01);
        }
    }

    #[test]
    fn test_secondary_turn_stays_within_spread() {
        let mut rng = Pcg32::seed_from_u64(11);
        let mut ball = Ball::new(1);
        ball.vel = Vec2::new(-300.0, 0.0);
        let mut turns = Vec::new();
        for id in 2..200 {
            let clone = ball.spawn_secondary(id, &mut rng);
            let turn = ball.vel.angle_to(clone.vel);
            assert!(turn.abs() <= SECONDARY_SPREAD + 1e-4);
            turns.push(turn);
        }
        // Random magnitude, not just a random sign
        assert!(turns.iter().any(|t| t.abs() < SECONDARY_SPREAD * 0.5));
        assert!(turns.iter().any(|t| *t > 0.0) && turns.iter().any(|t| *t < 0.0));
    }

    #[test]
    fn test_trail_is_bounded() {
        let mut ball = Ball::new(1);
        ball.vel = Vec2::new(100.0, 0.0);
        for _ in 0..100 {
            ball.integrate(0.01);
        }
        assert_eq!(ball.trail.len(), TRAIL_LENGTH);
        assert!(ball.trail[0].pos.x > ball.trail[1].pos.x);
    }
}
