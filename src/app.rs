//! Platform-free application shell
//!
//! Owns the menus, background and current match, turns raw key/pointer input
//! into `TickInput`s and steps the simulation on a fixed timestep. The wasm
//! entry point only forwards DOM events here and draws the result.

use std::collections::HashSet;

use glam::Vec2;

use crate::audio::SoundEffect;
use crate::background::BackgroundManager;
use crate::consts::*;
use crate::menu::{Menu, MenuAction, MenuScreen};
use crate::settings::Settings;
use crate::sim::state::next_win_score;
use crate::sim::{Game, GameConfig, GameEvent, GamePhase, Mode, PaddleControl, TickInput, tick};

/// Top-level screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiState {
    Menu,
    Options,
    Playing,
}

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    S,
    Up,
    Down,
    Enter,
    Space,
    Escape,
    R,
    Q,
    M,
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_dom(key: &str) -> Key {
        match key {
            "w" | "W" => Key::W,
            "s" | "S" => Key::S,
            "ArrowUp" => Key::Up,
            "ArrowDown" => Key::Down,
            "Enter" => Key::Enter,
            " " | "Spacebar" => Key::Space,
            "Escape" | "Esc" => Key::Escape,
            "r" | "R" => Key::R,
            "q" | "Q" => Key::Q,
            "m" | "M" => Key::M,
            _ => Key::Other,
        }
    }

    fn is_movement(self) -> bool {
        matches!(self, Key::W | Key::S | Key::Up | Key::Down)
    }
}

pub struct App {
    pub settings: Settings,
    pub ui: UiState,
    pub menu: Menu,
    pub background: BackgroundManager,
    pub game: Option<Game>,
    /// Rules for the next match (edited in the options menu)
    pub options: GameConfig,
    held: HashSet<Key>,
    /// Last pointer position (world y); steers the left paddle
    pointer_y: Option<f32>,
    /// One-shot pause request, cleared after a tick consumes it
    pause_requested: bool,
    accumulator: f32,
    sounds: Vec<SoundEffect>,
    muted: bool,
    next_seed: u64,
}

impl App {
    pub fn new(settings: Settings, seed: u64) -> Self {
        let options = settings.game_config();
        let stars = if settings.background {
            settings.quality.star_count()
        } else {
            0
        };
        let mut background = BackgroundManager::new(stars, seed ^ 0x5eed);
        background.set_calm(settings.reduced_motion);
        let muted = settings.muted;

        Self {
            menu: Menu::new(Vec2::new(ARENA_WIDTH, ARENA_HEIGHT), &options),
            settings,
            ui: UiState::Menu,
            background,
            game: None,
            options,
            held: HashSet::new(),
            pointer_y: None,
            pause_requested: false,
            accumulator: 0.0,
            sounds: Vec::new(),
            muted,
            next_seed: seed,
        }
    }

    /// Begin a match with the current options
    pub fn start_game(&mut self) {
        let seed = self.next_seed;
        self.next_seed = self.next_seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);

        let mut game = Game::new(self.options, seed);
        game.particle_cap = self.settings.max_particles();
        self.game = Some(game);
        self.ui = UiState::Playing;
        self.accumulator = 0.0;
        self.pause_requested = false;
    }

    pub fn return_to_menu(&mut self) {
        log::info!("Returning to menu");
        self.game = None;
        self.ui = UiState::Menu;
        self.menu.show(MenuScreen::Main, &self.options);
    }

    /// Advance by a frame's wall-clock delta
    pub fn update(&mut self, frame_dt: f32) {
        let dt = frame_dt.clamp(0.0, MAX_FRAME_DT);
        self.background.update(dt);

        if self.ui != UiState::Playing {
            return;
        }
        let input = self.tick_input();
        let Some(game) = self.game.as_mut() else {
            return;
        };

        self.accumulator += dt;
        let mut input = input;
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(game, &input, SIM_DT);
            // Clear one-shot inputs after processing
            input.pause = false;
            self.pause_requested = false;
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        if substeps == MAX_SUBSTEPS {
            // Too far behind: drop the backlog instead of spiraling
            self.accumulator = self.accumulator.min(SIM_DT);
        }

        for event in game.drain_events() {
            if let GameEvent::PointScored { .. } = event {
                self.background.flash(0.6);
            }
            if let Some(sound) = SoundEffect::for_event(&event) {
                self.sounds.push(sound);
            }
        }
    }

    /// Controls for both paddles from held keys and the pointer
    fn tick_input(&self) -> TickInput {
        let held = |k: Key| self.held.contains(&k);
        let mode = self.game.as_ref().map(|g| g.config.mode).unwrap_or(self.options.mode);

        let (left, right) = match mode {
            // Solo player may use either key set
            Mode::OnePlayer => (
                PaddleControl {
                    up: held(Key::W) || held(Key::Up),
                    down: held(Key::S) || held(Key::Down),
                    pointer_y: self.pointer_y,
                },
                PaddleControl::default(),
            ),
            Mode::TwoPlayer => (
                PaddleControl {
                    up: held(Key::W),
                    down: held(Key::S),
                    pointer_y: self.pointer_y,
                },
                PaddleControl {
                    up: held(Key::Up),
                    down: held(Key::Down),
                    pointer_y: None,
                },
            ),
            Mode::Demo => (PaddleControl::default(), PaddleControl::default()),
        };

        TickInput {
            left,
            right,
            pause: self.pause_requested,
        }
    }

    pub fn key_down(&mut self, key: Key) {
        // The help overlay swallows the first key, whatever it is
        if self.ui != UiState::Playing && self.menu.help_open {
            self.menu.key_down(key);
            return;
        }
        if key == Key::M {
            self.muted = !self.muted;
            log::info!("Audio {}", if self.muted { "muted" } else { "unmuted" });
            return;
        }
        if key.is_movement() {
            // Keys take over from the pointer
            self.pointer_y = None;
        }
        self.held.insert(key);

        match self.ui {
            UiState::Menu | UiState::Options => {
                if let Some(action) = self.menu.key_down(key) {
                    self.handle_action(action);
                }
            }
            UiState::Playing => {
                let Some(phase) = self.game.as_ref().map(|g| g.phase) else {
                    return;
                };
                match (phase, key) {
                    (GamePhase::GameOver { .. }, Key::Enter) => self.return_to_menu(),
                    (GamePhase::GameOver { .. }, Key::R) => self.start_game(),
                    (GamePhase::Paused { .. }, Key::Q) => self.return_to_menu(),
                    (GamePhase::GameOver { .. }, _) => {}
                    (_, Key::Escape) => self.pause_requested = true,
                    _ => {}
                }
            }
        }
    }

    /// Pause a running match (tab hidden, window blur)
    pub fn auto_pause(&mut self) {
        let running = self
            .game
            .as_ref()
            .is_some_and(|g| matches!(g.phase, GamePhase::Countdown { .. } | GamePhase::Playing));
        if self.ui == UiState::Playing && running {
            self.pause_requested = true;
            log::info!("Auto-paused");
        }
    }

    pub fn key_up(&mut self, key: Key) {
        self.held.remove(&key);
    }

    /// Pointer moved (world coordinates)
    pub fn pointer_move(&mut self, world: Vec2) {
        match self.ui {
            UiState::Menu | UiState::Options => self.menu.pointer_move(world),
            UiState::Playing => self.pointer_y = Some(world.y),
        }
    }

    /// Pointer pressed (world coordinates)
    pub fn pointer_down(&mut self, world: Vec2) {
        match self.ui {
            UiState::Menu | UiState::Options => {
                if let Some(action) = self.menu.pointer_down(world) {
                    self.handle_action(action);
                }
            }
            UiState::Playing => {
                if self.game.as_ref().is_some_and(|g| g.is_over()) {
                    self.return_to_menu();
                }
            }
        }
    }

    fn handle_action(&mut self, action: MenuAction) {
        self.sounds.push(SoundEffect::MenuClick);
        match action {
            MenuAction::Play => self.start_game(),
            MenuAction::Options => {
                self.ui = UiState::Options;
                self.menu.show(MenuScreen::Options, &self.options);
            }
            MenuAction::Help => {}
            MenuAction::CycleMode => {
                self.options.mode = self.options.mode.next();
                self.relayout();
            }
            MenuAction::CycleDifficulty => {
                self.options.difficulty = self.options.difficulty.next();
                self.relayout();
            }
            MenuAction::CycleWinScore => {
                self.options.win_score = next_win_score(self.options.win_score);
                self.relayout();
            }
            MenuAction::Back => {
                self.ui = UiState::Menu;
                self.menu.show(MenuScreen::Main, &self.options);
            }
        }
    }

    fn relayout(&mut self) {
        self.menu.layout(Vec2::new(ARENA_WIDTH, ARENA_HEIGHT), &self.options);
    }

    /// Sounds to play since the last call
    pub fn drain_sounds(&mut self) -> Vec<SoundEffect> {
        std::mem::take(&mut self.sounds)
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Camera shake to apply this frame (0 when disabled)
    pub fn screen_shake(&self) -> f32 {
        match &self.game {
            Some(game) if self.settings.effective_screen_shake() => game.screen_shake,
            _ => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Side;

    fn app() -> App {
        App::new(Settings::default(), 7)
    }

    #[test]
    fn test_enter_starts_game() {
        let mut app = app();
        app.key_down(Key::Enter);
        assert_eq!(app.ui, UiState::Playing);
        let game = app.game.as_ref().unwrap();
        assert_eq!(game.config, app.options);
        assert_eq!(app.drain_sounds(), vec![SoundEffect::MenuClick]);
    }

    #[test]
    fn test_options_cycle() {
        let mut app = app();
        app.key_down(Key::Down);
        app.key_down(Key::Enter);
        assert_eq!(app.ui, UiState::Options);

        // Mode is the first entry
        app.key_down(Key::Enter);
        assert_eq!(app.options.mode, Mode::TwoPlayer);
        assert_eq!(app.menu.buttons[0].label, "Mode: 2 Players");

        app.key_down(Key::Down);
        app.key_down(Key::Down);
        app.key_down(Key::Enter);
        assert_eq!(app.options.win_score, 11);

        app.key_down(Key::Escape);
        assert_eq!(app.ui, UiState::Menu);
    }

    #[test]
    fn test_fixed_step_accumulator() {
        let mut app = app();
        app.start_game();
        app.update(0.05);
        let elapsed = app.game.as_ref().unwrap().elapsed;
        assert!(elapsed > 0.0 && elapsed <= 6.0 * SIM_DT + 1e-5);

        // Huge frame deltas are clamped and capped
        app.update(5.0);
        let after = app.game.as_ref().unwrap().elapsed;
        assert!(after - elapsed <= MAX_SUBSTEPS as f32 * SIM_DT + 1e-5);
    }

    #[test]
    fn test_escape_pauses_and_q_quits() {
        let mut app = app();
        app.start_game();
        app.update(0.1);
        app.key_down(Key::Escape);
        app.update(0.02);
        assert!(app.game.as_ref().unwrap().is_paused());
        assert!(app.drain_sounds().contains(&SoundEffect::Pause));

        app.key_down(Key::Q);
        assert_eq!(app.ui, UiState::Menu);
        assert!(app.game.is_none());
    }

    #[test]
    fn test_keys_drive_left_paddle() {
        let mut app = app();
        app.start_game();
        app.key_down(Key::W);
        for _ in 0..30 {
            app.update(1.0 / 60.0);
        }
        assert!(app.game.as_ref().unwrap().paddle(Side::Left).y > 20.0);
        app.key_up(Key::W);
        assert_eq!(app.tick_input().left.direction(), 0.0);
    }

    #[test]
    fn test_pointer_steers_left_paddle() {
        let mut app = app();
        app.start_game();
        app.pointer_move(Vec2::new(-300.0, -150.0));
        for _ in 0..60 {
            app.update(1.0 / 60.0);
        }
        assert!((app.game.as_ref().unwrap().paddle(Side::Left).y + 150.0).abs() < 5.0);
    }

    #[test]
    fn test_game_over_restart_and_menu() {
        let mut app = app();
        app.start_game();
        let game = app.game.as_mut().unwrap();
        game.phase = GamePhase::GameOver { winner: Side::Left };

        app.key_down(Key::R);
        assert!(matches!(app.game.as_ref().unwrap().phase, GamePhase::Countdown { .. }));

        app.game.as_mut().unwrap().phase = GamePhase::GameOver { winner: Side::Right };
        app.pointer_down(Vec2::ZERO);
        assert_eq!(app.ui, UiState::Menu);
    }

    #[test]
    fn test_auto_pause_only_when_running() {
        let mut app = app();
        app.auto_pause();
        assert!(app.game.is_none());

        app.start_game();
        app.auto_pause();
        app.update(0.02);
        assert!(app.game.as_ref().unwrap().is_paused());

        // Already paused: a second request must not resume
        app.auto_pause();
        app.update(0.02);
        assert!(app.game.as_ref().unwrap().is_paused());
    }

    #[test]
    fn test_mute_toggle() {
        let mut app = app();
        assert!(!app.is_muted());
        app.key_down(Key::M);
        assert!(app.is_muted());
        assert_eq!(app.ui, UiState::Menu);
    }

    #[test]
    fn test_any_key_closes_help_before_muting() {
        let mut app = app();
        // Play, Options, Help
        app.key_down(Key::Down);
        app.key_down(Key::Down);
        app.key_down(Key::Enter);
        assert!(app.menu.help_open);

        app.key_down(Key::M);
        assert!(!app.menu.help_open);
        assert!(!app.is_muted());

        app.key_down(Key::M);
        assert!(app.is_muted());
    }

    #[test]
    fn test_key_from_dom() {
        assert_eq!(Key::from_dom("ArrowUp"), Key::Up);
        assert_eq!(Key::from_dom(" "), Key::Space);
        assert_eq!(Key::from_dom("x"), Key::Other);
    }
}
