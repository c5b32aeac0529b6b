//! Computer opponent
//!
//! A proportional tracker: it picks the most urgent ball, predicts where the
//! ball will cross its face (folding the path across the walls), aims there
//! with some difficulty-dependent error, and steers the paddle target toward
//! that point at a capped speed. It only re-aims every `reaction` seconds,
//! which is what makes it beatable.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::paddle::Paddle;
use super::state::Side;
use crate::consts::*;

/// Proportional gain from position error to desired speed
const AI_GAIN: f32 = 6.0;
/// Errors smaller than this are ignored (stops jitter)
const AI_DEAD_ZONE: f32 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

/// Tuning for one difficulty level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AiParams {
    pub max_speed: f32,
    pub reaction: f32,
    pub aim_error: f32,
    pub predicts: bool,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" | "medium" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Next level (wraps), used by the options menu
    pub fn next(&self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Normal,
            Difficulty::Normal => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Easy,
        }
    }

    pub fn params(&self) -> AiParams {
        match self {
            Difficulty::Easy => AiParams {
                max_speed: 260.0,
                reaction: 0.35,
                aim_error: 45.0,
                predicts: false,
            },
            Difficulty::Normal => AiParams {
                max_speed: 380.0,
                reaction: 0.20,
                aim_error: 22.0,
                predicts: true,
            },
            Difficulty::Hard => AiParams {
                max_speed: 540.0,
                reaction: 0.08,
                aim_error: 8.0,
                predicts: true,
            },
        }
    }
}

/// Predict the y at which a ball reaches `target_x`.
///
/// The straight path is unfolded across the top and bottom walls (each wall
/// bounce mirrors the path), so the answer is exact for a spinless ball.
/// Returns `None` when the ball is not moving toward `target_x`.
pub fn predict_intercept(pos: glam::Vec2, vel: glam::Vec2, target_x: f32, half_height: f32, radius: f32) -> Option<f32> {
    let dx = target_x - pos.x;
    if vel.x == 0.0 || dx.signum() != vel.x.signum() {
        return None;
    }

    let t = dx / vel.x;
    let raw_y = pos.y + vel.y * t;

    // Fold into the band the ball center can occupy
    let lo = -half_height + radius;
    let span = 2.0 * (half_height - radius);
    if span <= 0.0 {
        return Some(0.0);
    }
    let period = 2.0 * span;
    let mut m = (raw_y - lo).rem_euclid(period);
    if m > span {
        m = period - m;
    }
    Some(lo + m)
}

#[derive(Debug, Clone)]
pub struct AiController {
    pub side: Side,
    pub difficulty: Difficulty,
    /// Current aim point
    pub aim_y: f32,
    /// Seconds until the next re-aim
    retarget_timer: f32,
}

impl AiController {
    pub fn new(side: Side, difficulty: Difficulty) -> Self {
        Self {
            side,
            difficulty,
            aim_y: 0.0,
            retarget_timer: 0.0,
        }
    }

    /// Time for a ball to reach this side's paddle face, if it is heading there
    fn time_to_face(&self, ball: &Ball, face_x: f32) -> Option<f32> {
        let toward = -self.side.outward();
        if ball.vel.x * toward <= 0.0 {
            return None;
        }
        let dist = (face_x - ball.pos.x) * toward;
        (dist >= 0.0).then(|| dist / ball.vel.x.abs())
    }

    /// Choose a new aim point from the current balls
    fn retarget<R: Rng>(&mut self, paddle: &Paddle, balls: &[Ball], rng: &mut R) {
        let params = self.difficulty.params();
        let face_x = paddle.face_x();

        let threat = balls
            .iter()
            .filter_map(|b| self.time_to_face(b, face_x).map(|t| (t, b)))
            .min_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(_, b)| b);

        self.aim_y = match threat {
            Some(ball) => {
                let base = if params.predicts {
                    predict_intercept(ball.pos, ball.vel, face_x, HALF_HEIGHT, ball.radius).unwrap_or(ball.pos.y)
                } else {
                    ball.pos.y
                };
                let error = if params.aim_error > 0.0 {
                    rng.random_range(-params.aim_error..=params.aim_error)
                } else {
                    0.0
                };
                base + error
            }
            // Nothing incoming: drift back to center
            None => 0.0,
        };
        log::debug!("AI {:?} aims at {:.1}", self.side, self.aim_y);
    }

    /// Steer `paddle` for one step
    pub fn update<R: Rng>(&mut self, dt: f32, paddle: &mut Paddle, balls: &[Ball], rng: &mut R) {
        self.retarget_timer -= dt;
        if self.retarget_timer <= 0.0 {
            self.retarget(paddle, balls, rng);
            self.retarget_timer = self.difficulty.params().reaction;
        }

        // Steer the target, the paddle's own smoothing does the rest
        let error = self.aim_y - paddle.target_y;
        if error.abs() < AI_DEAD_ZONE {
            return;
        }

        let max_speed = self.difficulty.params().max_speed;
        let velocity = (error * AI_GAIN).clamp(-max_speed, max_speed);
        paddle.set_target(paddle.target_y + velocity * dt);
    }
}
