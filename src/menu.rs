//! Title and options menus
//!
//! Buttons live in world coordinates (origin at screen center, +y up) so the
//! same viewport mapping serves both drawing and pointer hit-testing.

use glam::Vec2;

use crate::app::Key;
use crate::sim::GameConfig;

pub const BUTTON_WIDTH: f32 = 240.0;
pub const BUTTON_HEIGHT: f32 = 48.0;
pub const BUTTON_GAP: f32 = 16.0;

/// Axis-aligned rectangle given by its center and size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        (point.x - self.x).abs() <= self.w / 2.0 && (point.y - self.y).abs() <= self.h / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Play,
    Options,
    Help,
    CycleMode,
    CycleDifficulty,
    CycleWinScore,
    Back,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Button {
    pub label: String,
    pub rect: Rect,
    pub action: MenuAction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuScreen {
    Main,
    Options,
}

#[derive(Debug, Clone)]
pub struct Menu {
    pub screen: MenuScreen,
    pub buttons: Vec<Button>,
    /// Keyboard selection
    pub selected: usize,
    /// Button under the pointer
    pub hovered: Option<usize>,
    pub help_open: bool,
    /// Visible area in world units
    view: Vec2,
}

impl Menu {
    pub fn new(view: Vec2, options: &GameConfig) -> Self {
        let mut menu = Self {
            screen: MenuScreen::Main,
            buttons: Vec::new(),
            selected: 0,
            hovered: None,
            help_open: false,
            view,
        };
        menu.layout(view, options);
        menu
    }

    /// Rebuild buttons for the current screen, stacked and centered
    pub fn layout(&mut self, view: Vec2, options: &GameConfig) {
        self.view = view;
        let entries: Vec<(String, MenuAction)> = match self.screen {
            MenuScreen::Main => vec![
                ("Play".to_string(), MenuAction::Play),
                ("Options".to_string(), MenuAction::Options),
                ("Help".to_string(), MenuAction::Help),
            ],
            MenuScreen::Options => vec![
                (format!("Mode: {}", options.mode.as_str()), MenuAction::CycleMode),
                (
                    format!("Difficulty: {}", options.difficulty.as_str()),
                    MenuAction::CycleDifficulty,
                ),
                (format!("Points: {}", options.win_score), MenuAction::CycleWinScore),
                ("Back".to_string(), MenuAction::Back),
            ],
        };

        let count = entries.len() as f32;
        let stack = count * BUTTON_HEIGHT + (count - 1.0) * BUTTON_GAP;
        // Leave room for the title above the stack
        let top = (stack / 2.0 - BUTTON_HEIGHT / 2.0) - view.y * 0.08;

        self.buttons = entries
            .into_iter()
            .enumerate()
            .map(|(i, (label, action))| Button {
                label,
                rect: Rect::new(
                    0.0,
                    top - i as f32 * (BUTTON_HEIGHT + BUTTON_GAP),
                    BUTTON_WIDTH,
                    BUTTON_HEIGHT,
                ),
                action,
            })
            .collect();
        self.selected = self.selected.min(self.buttons.len().saturating_sub(1));
    }

    /// Switch screens, keeping the cursor on the first entry
    pub fn show(&mut self, screen: MenuScreen, options: &GameConfig) {
        self.screen = screen;
        self.selected = 0;
        self.hovered = None;
        self.help_open = false;
        self.layout(self.view, options);
    }

    pub fn hit_test(&self, point: Vec2) -> Option<usize> {
        self.buttons.iter().position(|b| b.rect.contains(point))
    }

    pub fn pointer_move(&mut self, point: Vec2) {
        if self.help_open {
            return;
        }
        self.hovered = self.hit_test(point);
        if let Some(i) = self.hovered {
            self.selected = i;
        }
    }

    /// Click: activates the button under the pointer
    pub fn pointer_down(&mut self, point: Vec2) -> Option<MenuAction> {
        if self.help_open {
            self.help_open = false;
            return None;
        }
        let index = self.hit_test(point)?;
        self.selected = index;
        self.activate(index)
    }

    /// Keyboard navigation
    pub fn key_down(&mut self, key: Key) -> Option<MenuAction> {
        if self.help_open {
            self.help_open = false;
            return None;
        }
        let len = self.buttons.len();
        if len == 0 {
            return None;
        }
        match key {
            Key::Up | Key::W => {
                self.selected = (self.selected + len - 1) % len;
                None
            }
            Key::Down | Key::S => {
                self.selected = (self.selected + 1) % len;
                None
            }
            Key::Enter | Key::Space => self.activate(self.selected),
            Key::Escape if self.screen == MenuScreen::Options => Some(MenuAction::Back),
            _ => None,
        }
    }

    fn activate(&mut self, index: usize) -> Option<MenuAction> {
        let action = self.buttons.get(index)?.action;
        if action == MenuAction::Help {
            self.help_open = true;
        }
        Some(action)
    }
}

/// Lines shown in the help overlay
pub const HELP_LINES: [&str; 8] = [
    "LEFT: W / S   RIGHT: UP / DOWN",
    "MOUSE MOVES THE LEFT PADDLE",
    "ESC PAUSES   M MUTES",
    "RETURNS BUILD COMBO AND ENERGY",
    "FULL ENERGY = POWER HIT",
    "COMBO 5+ GOALS SCORE DOUBLE",
    "GRAB PICKUPS AFTER A RETURN",
    "CLICK OR PRESS ANY KEY",
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Difficulty, Mode};

    fn main_menu() -> Menu {
        Menu::new(Vec2::new(800.0, 600.0), &GameConfig::default())
    }

    #[test]
    fn test_main_layout() {
        let menu = main_menu();
        let labels: Vec<&str> = menu.buttons.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, ["Play", "Options", "Help"]);

        let a = menu.buttons[0].rect;
        let b = menu.buttons[1].rect;
        assert_eq!(a.w, BUTTON_WIDTH);
        assert!((a.y - b.y - (BUTTON_HEIGHT + BUTTON_GAP)).abs() < 1e-4);
    }

    #[test]
    fn test_hit_test_and_click() {
        let mut menu = main_menu();
        let options = menu.buttons[1].rect;
        let point = Vec2::new(options.x + 100.0, options.y);
        assert_eq!(menu.hit_test(point), Some(1));
        assert_eq!(menu.hit_test(Vec2::new(options.x + 130.0, options.y)), None);

        menu.pointer_move(point);
        assert_eq!(menu.hovered, Some(1));
        assert_eq!(menu.pointer_down(point), Some(MenuAction::Options));
    }

    #[test]
    fn test_keyboard_wraps() {
        let mut menu = main_menu();
        assert_eq!(menu.key_down(Key::Up), None);
        assert_eq!(menu.selected, 2);
        menu.key_down(Key::Down);
        assert_eq!(menu.selected, 0);
        assert_eq!(menu.key_down(Key::Enter), Some(MenuAction::Play));
    }

    #[test]
    fn test_help_overlay_blocks_buttons() {
        let mut menu = main_menu();
        menu.selected = 2;
        assert_eq!(menu.key_down(Key::Enter), Some(MenuAction::Help));
        assert!(menu.help_open);

        let play = menu.buttons[0].rect;
        assert_eq!(menu.pointer_down(Vec2::new(play.x, play.y)), None);
        assert!(!menu.help_open);
        assert_eq!(menu.pointer_down(Vec2::new(play.x, play.y)), Some(MenuAction::Play));
    }

    #[test]
    fn test_options_labels_follow_config() {
        let config = GameConfig {
            mode: Mode::Demo,
            difficulty: Difficulty::Hard,
            win_score: 11,
        };
        let mut menu = Menu::new(Vec2::new(800.0, 600.0), &config);
        menu.show(MenuScreen::Options, &config);
        let labels: Vec<&str> = menu.buttons.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, ["Mode: Demo", "Difficulty: Hard", "Points: 11", "Back"]);
        assert_eq!(menu.key_down(Key::Escape), Some(MenuAction::Back));
    }
}
