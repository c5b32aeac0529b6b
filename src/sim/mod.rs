//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod ai;
pub mod ball;
pub mod collision;
pub mod paddle;
pub mod particle;
pub mod powerup;
pub mod state;
pub mod tick;

pub use ai::{AiController, Difficulty, predict_intercept};
pub use ball::{Ball, BallPower};
pub use collision::{Aabb, CollisionResult, Wall, circle_aabb};
pub use paddle::Paddle;
pub use particle::{Particle, ParticleColor, TrailPoint};
pub use powerup::{PowerUp, PowerUpKind};
pub use state::{Game, GameConfig, GameEvent, GamePhase, Mode, Side};
pub use tick::{PaddleControl, TickInput, tick};
