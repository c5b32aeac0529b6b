//! Frame assembly: background, then gameplay, then UI overlay
//!
//! Produces one world-space triangle list per frame. The pipeline maps it to
//! NDC through the viewport.

use glam::Vec2;

use super::font::{self, Align};
use super::shapes;
use super::vertex::{Vertex, colors, mix, with_alpha};
use crate::app::{App, UiState};
use crate::background::{BackgroundManager, GRID_SPACING};
use crate::consts::*;
use crate::menu::{HELP_LINES, Menu, MenuScreen};
use crate::settings::Settings;
use crate::sim::{Ball, Game, GamePhase, Mode, Paddle, ParticleColor, PowerUp, PowerUpKind, Side};

/// Maximum camera offset at full shake (world units)
const SHAKE_AMPLITUDE: f32 = 8.0;

/// Build the full frame. `time` is wall-clock seconds (animation only).
pub fn build(app: &App, time: f32) -> Vec<Vertex> {
    let mut out = Vec::with_capacity(8192);

    if app.settings.background {
        background(&mut out, &app.background);
    }

    match app.ui {
        UiState::Menu | UiState::Options => {
            arena(&mut out);
            menu(&mut out, &app.menu);
        }
        UiState::Playing => {
            if let Some(game) = &app.game {
                let mut play = Vec::with_capacity(4096);
                arena(&mut play);
                gameplay(&mut play, game, &app.settings, time);

                let shake = app.screen_shake();
                if shake > 0.0 {
                    let offset = Vec2::new((time * 71.0).sin(), (time * 53.0).cos()) * shake * SHAKE_AMPLITUDE;
                    for v in play.iter_mut() {
                        v.position[0] += offset.x;
                        v.position[1] += offset.y;
                    }
                }
                out.extend(play);

                hud(&mut out, game);
                overlay(&mut out, game);
            }
        }
    }

    out
}

fn background(out: &mut Vec<Vertex>, bg: &BackgroundManager) {
    let grid = with_alpha(colors::GRID, 0.25 * bg.grid_pulse());
    let mut x = -HALF_WIDTH - bg.grid_offset() + GRID_SPACING;
    while x < HALF_WIDTH {
        shapes::line(out, Vec2::new(x, -HALF_HEIGHT), Vec2::new(x, HALF_HEIGHT), 1.0, grid);
        x += GRID_SPACING;
    }
    let mut y = -HALF_HEIGHT + GRID_SPACING;
    while y < HALF_HEIGHT {
        shapes::line(out, Vec2::new(-HALF_WIDTH, y), Vec2::new(HALF_WIDTH, y), 1.0, grid);
        y += GRID_SPACING;
    }

    for star in bg.stars() {
        shapes::rect(
            out,
            star.pos,
            Vec2::splat(star.size()),
            with_alpha(colors::STAR, star.brightness()),
        );
    }
}

fn arena(out: &mut Vec<Vertex>) {
    // Top and bottom walls
    shapes::rect(out, Vec2::new(0.0, HALF_HEIGHT + 3.0), Vec2::new(ARENA_WIDTH, 6.0), colors::ARENA_WALL);
    shapes::rect(out, Vec2::new(0.0, -HALF_HEIGHT - 3.0), Vec2::new(ARENA_WIDTH, 6.0), colors::ARENA_WALL);

    // Dashed center line
    let dash = 18.0;
    let mut y = -HALF_HEIGHT + dash / 2.0;
    while y < HALF_HEIGHT {
        shapes::rect(out, Vec2::new(0.0, y), Vec2::new(3.0, dash * 0.6), colors::CENTER_LINE);
        y += dash;
    }
}

fn side_color(side: Side) -> [f32; 4] {
    match side {
        Side::Left => colors::PADDLE_LEFT,
        Side::Right => colors::PADDLE_RIGHT,
    }
}

fn powerup_color(kind: PowerUpKind) -> [f32; 4] {
    match kind {
        PowerUpKind::Speed => colors::POWER_SPEED,
        PowerUpKind::Multi => colors::POWER_MULTI,
        PowerUpKind::Combo => colors::POWER_COMBO,
        PowerUpKind::Grow => colors::POWER_GROW,
    }
}

fn particle_color(color: ParticleColor) -> [f32; 4] {
    match color {
        ParticleColor::Spark => colors::SPARK,
        ParticleColor::Power => colors::POWER_SPEED,
        ParticleColor::Wall => colors::ARENA_WALL,
        ParticleColor::Combo => colors::BALL_COMBO,
        ParticleColor::Pickup => colors::POWER_GROW,
    }
}

fn gameplay(out: &mut Vec<Vertex>, game: &Game, settings: &Settings, time: f32) {
    for pickup in &game.powerups {
        draw_powerup(out, pickup, time);
    }
    for paddle in &game.paddles {
        draw_paddle(out, paddle);
    }
    for ball in &game.balls {
        draw_ball(out, ball, settings);
    }
}

fn draw_powerup(out: &mut Vec<Vertex>, pickup: &PowerUp, time: f32) {
    let color = powerup_color(pickup.kind);
    // Blink during the last two seconds
    let alpha = if pickup.ttl < 2.0 && (time * 10.0).sin() < 0.0 { 0.35 } else { 1.0 };
    let pulse = 1.0 + 0.12 * (pickup.age * 6.0).sin();
    let r = pickup.radius * pulse;

    shapes::circle(out, pickup.pos, r + 6.0, with_alpha(color, 0.15 * alpha), 24);
    shapes::ring(out, pickup.pos, r - 3.0, r, with_alpha(color, alpha), 24);
    shapes::circle(out, pickup.pos, r * 0.45, with_alpha(color, 0.8 * alpha), 16);
    font::text(
        out,
        pickup.kind.label(),
        pickup.pos + Vec2::new(0.0, r + 12.0),
        1.5,
        Align::Center,
        with_alpha(color, alpha),
    );
}

fn draw_paddle(out: &mut Vec<Vertex>, paddle: &Paddle) {
    let base = side_color(paddle.side);
    let color = mix(base, colors::BALL, paddle.hit_flash * 0.7);
    let center = Vec2::new(paddle.x, paddle.y);
    let size = Vec2::new(PADDLE_WIDTH, paddle.height);

    // Glow, brighter when the next hit is a power hit
    let glow = if paddle.energy >= PADDLE_MAX_ENERGY { 0.35 } else { 0.12 };
    shapes::rect(out, center, size + Vec2::splat(10.0), with_alpha(base, glow));
    shapes::rect(out, center, size, color);
}

fn draw_ball(out: &mut Vec<Vertex>, ball: &Ball, settings: &Settings) {
    let shown = settings.trail_points(ball.trail.len());
    shapes::ball_trail(out, &ball.trail[..shown], ball.radius);

    for p in &ball.particles {
        let color = with_alpha(particle_color(p.color), p.life.clamp(0.0, 1.0));
        shapes::rect(out, p.pos, Vec2::splat(p.size), color);
    }

    let color = if ball.power.combo_active() {
        colors::BALL_COMBO
    } else if ball.power.speed_active() {
        colors::BALL_SPEED
    } else {
        colors::BALL
    };
    shapes::circle(out, ball.pos, ball.radius + 4.0, with_alpha(color, 0.2), 20);
    shapes::circle(out, ball.pos, ball.radius, color, 20);
}

fn hud(out: &mut Vec<Vertex>, game: &Game) {
    let top = HALF_HEIGHT - 40.0;
    for side in Side::BOTH {
        let x = -side.outward() * 120.0;
        let color = side_color(side);
        font::text(out, &game.score(side).to_string(), Vec2::new(x, top), 6.0, Align::Center, color);

        // Energy meter
        let paddle = game.paddle(side);
        let meter = Vec2::new(x, top - 36.0);
        shapes::rect(out, meter, Vec2::new(100.0, 6.0), with_alpha(colors::TEXT_DIM, 0.3));
        let fill = 100.0 * paddle.energy_fraction();
        if fill > 0.0 {
            shapes::rect(
                out,
                Vec2::new(meter.x - 50.0 + fill / 2.0, meter.y),
                Vec2::new(fill, 6.0),
                colors::ENERGY,
            );
        }

        if paddle.combo >= 2 {
            let label = format!("COMBO {}", paddle.combo);
            let hot = if paddle.combo >= COMBO_THRESHOLD { colors::BALL_COMBO } else { colors::TEXT_DIM };
            font::text(out, &label, Vec2::new(x, top - 56.0), 2.0, Align::Center, hot);
        }
    }
}

fn winner_label(mode: Mode, winner: Side) -> &'static str {
    match (mode, winner) {
        (Mode::OnePlayer, Side::Left) => "YOU WIN!",
        (Mode::OnePlayer, Side::Right) => "CPU WINS",
        (_, Side::Left) => "LEFT WINS",
        (_, Side::Right) => "RIGHT WINS",
    }
}

fn overlay(out: &mut Vec<Vertex>, game: &Game) {
    match game.phase {
        GamePhase::Countdown { remaining } => {
            let n = remaining.ceil().max(1.0) as u32;
            font::text(out, &n.to_string(), Vec2::ZERO, 10.0, Align::Center, colors::TEXT);
        }
        GamePhase::Playing => {}
        GamePhase::Paused { .. } => {
            dim(out);
            font::text(out, "PAUSED", Vec2::new(0.0, 30.0), 8.0, Align::Center, colors::TEXT);
            font::text(out, "ESC RESUME   Q MENU", Vec2::new(0.0, -30.0), 2.5, Align::Center, colors::TEXT_DIM);
        }
        GamePhase::GameOver { winner } => {
            dim(out);
            let label = winner_label(game.config.mode, winner);
            font::text(out, label, Vec2::new(0.0, 40.0), 8.0, Align::Center, side_color(winner));
            let score = format!("{} - {}", game.score(Side::Left), game.score(Side::Right));
            font::text(out, &score, Vec2::new(0.0, -20.0), 4.0, Align::Center, colors::TEXT);
            font::text(out, "ENTER MENU   R REMATCH", Vec2::new(0.0, -70.0), 2.5, Align::Center, colors::TEXT_DIM);
        }
    }
}

fn dim(out: &mut Vec<Vertex>) {
    shapes::rect(out, Vec2::ZERO, Vec2::new(ARENA_WIDTH, ARENA_HEIGHT), colors::OVERLAY);
}

fn menu(out: &mut Vec<Vertex>, menu: &Menu) {
    let title = match menu.screen {
        MenuScreen::Main => "NEON PONG",
        MenuScreen::Options => "OPTIONS",
    };
    font::text(out, title, Vec2::new(0.0, HALF_HEIGHT - 90.0), 9.0, Align::Center, colors::PADDLE_LEFT);

    for (i, button) in menu.buttons.iter().enumerate() {
        let hot = i == menu.selected || menu.hovered == Some(i);
        let center = Vec2::new(button.rect.x, button.rect.y);
        let size = Vec2::new(button.rect.w, button.rect.h);
        shapes::rect(out, center, size, if hot { colors::BUTTON_HOT } else { colors::BUTTON });
        if hot {
            shapes::rect_outline(out, center, size, 2.0, colors::BUTTON_EDGE);
        }
        font::text(out, &button.label, center, 3.0, Align::Center, colors::TEXT);
    }

    if menu.help_open {
        shapes::rect(out, Vec2::ZERO, Vec2::new(ARENA_WIDTH * 0.8, ARENA_HEIGHT * 0.7), colors::OVERLAY);
        let spacing = 34.0;
        let first = spacing * (HELP_LINES.len() as f32 - 1.0) / 2.0;
        for (i, line) in HELP_LINES.iter().enumerate() {
            font::text(out, line, Vec2::new(0.0, first - i as f32 * spacing), 2.5, Align::Center, colors::TEXT);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Key;

    #[test]
    fn test_menu_frame() {
        let app = App::new(Settings::default(), 1);
        let frame = build(&app, 0.0);
        assert!(!frame.is_empty());
        assert_eq!(frame.len() % 3, 0);
    }

    #[test]
    fn test_help_overlay_adds_geometry() {
        let mut app = App::new(Settings::default(), 1);
        let closed = build(&app, 0.0).len();
        app.menu.help_open = true;
        assert!(build(&app, 0.0).len() > closed);
    }

    #[test]
    fn test_playing_frame_is_well_formed() {
        let mut app = App::new(Settings::default(), 3);
        app.key_down(Key::Enter);
        for _ in 0..300 {
            app.update(1.0 / 60.0);
        }
        let frame = build(&app, 1.0);
        assert_eq!(frame.len() % 3, 0);
        assert!(frame.iter().all(|v| v.position[0].is_finite() && v.position[1].is_finite()));
    }

    #[test]
    fn test_winner_labels() {
        assert_eq!(winner_label(Mode::OnePlayer, Side::Left), "YOU WIN!");
        assert_eq!(winner_label(Mode::Demo, Side::Right), "RIGHT WINS");
    }
}
