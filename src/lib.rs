//! Neon Pong - an arcade Pong with combos, power-ups and a predictive AI
//!
//! Core modules:
//! - `sim`: Simulation (paddles, balls, collisions, scoring, AI)
//! - `background`: Decorative star field and grid
//! - `menu`: Button layout, hit-testing and options
//! - `app`: Top-level UI state machine the host drives every frame
//! - `renderer`: WebGPU rendering pipeline and scene assembly
//! - `audio`: Procedural sound effects for gameplay events
//! - `settings`: JSON-backed configuration

pub mod app;
pub mod audio;
pub mod background;
pub mod menu;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use app::{App, Key, UiState};
pub use settings::{QualityPreset, Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz for smooth physics)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Largest frame delta accepted from the host
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Arena dimensions (centered on origin, +y up)
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;
    pub const HALF_WIDTH: f32 = ARENA_WIDTH / 2.0;
    pub const HALF_HEIGHT: f32 = ARENA_HEIGHT / 2.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 14.0;
    pub const PADDLE_HEIGHT: f32 = 90.0;
    /// Distance from the arena edge to the paddle center
    pub const PADDLE_MARGIN: f32 = 30.0;
    /// Key-driven target speed (units/s)
    pub const PADDLE_SPEED: f32 = 480.0;
    /// Exponential follow rate toward the target (1/s)
    pub const PADDLE_SMOOTHING: f32 = 18.0;
    pub const PADDLE_MAX_ENERGY: f32 = 100.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 8.0;
    pub const BALL_START_SPEED: f32 = 320.0;
    pub const BALL_MAX_SPEED: f32 = 760.0;
    /// Speed multiplier applied on every paddle hit
    pub const PADDLE_SPEEDUP: f32 = 1.05;
    /// Extra multiplier for a hit with a full energy meter
    pub const POWER_HIT_BOOST: f32 = 1.25;
    /// Largest deflection from horizontal (60 degrees)
    pub const MAX_BOUNCE_ANGLE: f32 = std::f32::consts::FRAC_PI_3;
    /// Largest serve angle from horizontal (30 degrees)
    pub const SERVE_MAX_ANGLE: f32 = std::f32::consts::FRAC_PI_6;
    pub const MAX_BALLS: usize = 4;

    /// Spin: paddle velocity to angular curve rate, curve strength, decay rate
    pub const SPIN_TRANSFER: f32 = 0.002;
    pub const SPIN_CURVE: f32 = 1.0;
    pub const SPIN_DECAY: f32 = 1.5;

    /// Rally flow
    pub const COUNTDOWN_SECS: f32 = 3.0;
    pub const DEFAULT_WIN_SCORE: u32 = 7;
    /// Consecutive hits needed for the scoring bonus (and milestone bursts)
    pub const COMBO_THRESHOLD: u32 = 5;
}

/// Linear interpolation between `a` and `b`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Frame-rate independent exponential approach factor
#[inline]
pub fn smoothing_factor(rate: f32, dt: f32) -> f32 {
    1.0 - (-rate * dt).exp()
}
