//! Game state and core simulation types

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ai::{AiController, Difficulty};
use super::ball::Ball;
use super::paddle::Paddle;
use super::powerup::{PowerUp, PowerUpKind, PowerUpSpawner};
use crate::consts::*;

/// Which end of the court
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }

    #[inline]
    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// x direction pointing from this side's goal into the court
    #[inline]
    pub fn outward(self) -> f32 {
        match self {
            Side::Left => 1.0,
            Side::Right => -1.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Side::Left => "Left",
            Side::Right => "Right",
        }
    }
}

/// Who controls the paddles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Mode {
    /// Human on the left, AI on the right
    #[default]
    OnePlayer,
    /// Two humans sharing the keyboard
    TwoPlayer,
    /// AI on both sides (attract mode)
    Demo,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::OnePlayer => "1 Player",
            Mode::TwoPlayer => "2 Players",
            Mode::Demo => "Demo",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Mode::OnePlayer => Mode::TwoPlayer,
            Mode::TwoPlayer => Mode::Demo,
            Mode::Demo => Mode::OnePlayer,
        }
    }

    /// Whether the computer drives this side
    pub fn is_ai(&self, side: Side) -> bool {
        match self {
            Mode::OnePlayer => side == Side::Right,
            Mode::TwoPlayer => false,
            Mode::Demo => true,
        }
    }
}

/// Match rules chosen in the options menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub mode: Mode,
    pub difficulty: Difficulty,
    pub win_score: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            mode: Mode::OnePlayer,
            difficulty: Difficulty::Normal,
            win_score: DEFAULT_WIN_SCORE,
        }
    }
}

/// Win scores offered by the options menu
pub const WIN_SCORE_CHOICES: [u32; 4] = [3, 5, 7, 11];

/// Next win score in the options cycle
pub fn next_win_score(current: u32) -> u32 {
    WIN_SCORE_CHOICES
        .iter()
        .copied()
        .find(|&s| s > current)
        .unwrap_or(WIN_SCORE_CHOICES[0])
}

/// Phase to return to when unpausing
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResumeTo {
    Countdown { remaining: f32 },
    Playing,
}

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GamePhase {
    /// Frozen before a rally starts
    Countdown { remaining: f32 },
    /// Ball in play
    Playing,
    /// Paused by the player
    Paused { resume: ResumeTo },
    /// Match decided
    GameOver { winner: Side },
}

/// Things that happened during a tick (drained by the host for audio/UI)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// Whole seconds left on the countdown changed
    CountdownTick(u32),
    RallyStart,
    PaddleHit { side: Side, combo: u32, power: bool },
    ComboMilestone { side: Side, combo: u32 },
    WallHit,
    PowerUpSpawned(PowerUpKind),
    PowerUpExpired(PowerUpKind),
    PowerUpCollected { kind: PowerUpKind, side: Side },
    PointScored { side: Side, points: u32 },
    GameOver { winner: Side },
    Paused,
    Resumed,
}

/// Complete match state
#[derive(Debug, Clone)]
pub struct Game {
    pub config: GameConfig,
    pub phase: GamePhase,
    /// Indexed by `Side::index`
    pub paddles: [Paddle; 2],
    pub scores: [u32; 2],
    /// Active balls (sorted by id)
    pub balls: Vec<Ball>,
    pub powerups: Vec<PowerUp>,
    pub spawner: PowerUpSpawner,
    /// AI controllers for computer-driven sides
    pub ai: [Option<AiController>; 2],
    /// Side the next serve travels toward
    pub serve_toward: Side,
    /// Events since the host last drained them
    pub events: Vec<GameEvent>,
    /// Camera shake intensity (0-1, cosmetic)
    pub screen_shake: f32,
    /// Seconds of simulated play
    pub elapsed: f32,
    /// Per-ball particle cap applied to new balls
    pub particle_cap: usize,
    pub seed: u64,
    pub(crate) rng: Pcg32,
    next_id: u32,
}

impl Game {
    /// Create a new match with the given rules and seed
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let serve_toward = if rng.random_bool(0.5) { Side::Left } else { Side::Right };
        let spawner = PowerUpSpawner::new(&mut rng);
        let ai = Side::BOTH.map(|side| {
            config
                .mode
                .is_ai(side)
                .then(|| AiController::new(side, config.difficulty))
        });

        log::info!(
            "New match: {} / {} / first to {} (seed {})",
            config.mode.as_str(),
            config.difficulty.as_str(),
            config.win_score,
            seed
        );

        Self {
            config,
            phase: GamePhase::Countdown {
                remaining: COUNTDOWN_SECS,
            },
            paddles: [Paddle::new(Side::Left), Paddle::new(Side::Right)],
            scores: [0, 0],
            balls: Vec::new(),
            powerups: Vec::new(),
            spawner,
            ai,
            serve_toward,
            events: Vec::new(),
            screen_shake: 0.0,
            elapsed: 0.0,
            particle_cap: super::particle::MAX_BALL_PARTICLES,
            seed,
            rng,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    #[inline]
    pub fn paddle(&self, side: Side) -> &Paddle {
        &self.paddles[side.index()]
    }

    #[inline]
    pub fn paddle_mut(&mut self, side: Side) -> &mut Paddle {
        &mut self.paddles[side.index()]
    }

    #[inline]
    pub fn score(&self, side: Side) -> u32 {
        self.scores[side.index()]
    }

    pub fn is_ai(&self, side: Side) -> bool {
        self.ai[side.index()].is_some()
    }

    /// Winner if the leading side reached the win score (Left on a tie)
    pub fn leader_at_win(&self) -> Option<Side> {
        let leader = if self.score(Side::Left) >= self.score(Side::Right) {
            Side::Left
        } else {
            Side::Right
        };
        (self.score(leader) >= self.config.win_score).then_some(leader)
    }

    /// Launch a fresh primary ball toward `serve_toward`
    pub fn serve(&mut self) {
        let id = self.next_entity_id();
        let angle = self.rng.random_range(-SERVE_MAX_ANGLE..=SERVE_MAX_ANGLE);
        let mut ball = Ball::new(id);
        ball.particle_cap = self.particle_cap;
        ball.serve(self.serve_toward, angle, BALL_START_SPEED);
        self.balls.push(ball);
    }

    /// Start the pre-rally countdown
    pub fn begin_countdown(&mut self) {
        self.phase = GamePhase::Countdown {
            remaining: COUNTDOWN_SECS,
        };
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Ensure balls are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.balls.sort_by_key(|b| b.id);
        self.powerups.sort_by_key(|p| p.id);
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, GamePhase::GameOver { .. })
    }

    pub fn is_paused(&self) -> bool {
        matches!(self.phase, GamePhase::Paused { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game_starts_in_countdown() {
        let game = Game::new(GameConfig::default(), 1);
        assert!(matches!(game.phase, GamePhase::Countdown { .. }));
        assert!(game.balls.is_empty());
        assert_eq!(game.scores, [0, 0]);
        assert!(!game.is_ai(Side::Left));
        assert!(game.is_ai(Side::Right));
    }

    #[test]
    fn test_mode_controls() {
        let demo = Game::new(
            GameConfig {
                mode: Mode::Demo,
                ..Default::default()
            },
            1,
        );
        assert!(demo.is_ai(Side::Left) && demo.is_ai(Side::Right));

        let versus = Game::new(
            GameConfig {
                mode: Mode::TwoPlayer,
                ..Default::default()
            },
            1,
        );
        assert!(!versus.is_ai(Side::Left) && !versus.is_ai(Side::Right));
    }

    #[test]
    fn test_win_score_cycle() {
        assert_eq!(next_win_score(3), 5);
        assert_eq!(next_win_score(7), 11);
        assert_eq!(next_win_score(11), 3);
        // Values outside the list snap to the next choice
        assert_eq!(next_win_score(6), 7);
    }

    #[test]
    fn test_side_helpers() {
        assert_eq!(Side::Left.opposite(), Side::Right);
        assert_eq!(Side::Right.index(), 1);
        assert_eq!(Side::Left.outward(), 1.0);
    }

    #[test]
    fn test_same_seed_same_serve() {
        let a = Game::new(GameConfig::default(), 77);
        let b = Game::new(GameConfig::default(), 77);
        assert_eq!(a.serve_toward, b.serve_toward);
    }
}
