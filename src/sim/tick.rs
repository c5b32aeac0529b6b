//! Fixed timestep simulation tick
//!
//! Advances the match by one step: paddle control, countdown, ball physics,
//! collisions, power-ups and scoring.

use super::collision::{circle_aabb, circles_overlap, goal_side, swept_paddle_hit, wall_contact};
use super::particle::ParticleColor;
use super::powerup::{COMBO_SECS, GROW_SECS, MULTI_EXTRA_BALLS, PowerUp, PowerUpKind, SPEED_SECS};
use super::state::{Game, GameEvent, GamePhase, ResumeTo, Side};
use crate::consts::*;

/// Held controls for one paddle
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PaddleControl {
    pub up: bool,
    pub down: bool,
    /// Absolute target from the pointer (world y)
    pub pointer_y: Option<f32>,
}

impl PaddleControl {
    /// +1 up, -1 down, 0 when neither or both are held
    pub fn direction(&self) -> f32 {
        match (self.up, self.down) {
            (true, false) => 1.0,
            (false, true) => -1.0,
            _ => 0.0,
        }
    }
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub left: PaddleControl,
    pub right: PaddleControl,
    /// Pause toggle (one-shot)
    pub pause: bool,
}

impl TickInput {
    pub fn control(&self, side: Side) -> &PaddleControl {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }
}

/// Advance the game by one fixed timestep
pub fn tick(game: &mut Game, input: &TickInput, dt: f32) {
    // Handle pause toggle
    if input.pause {
        match game.phase {
            GamePhase::Countdown { remaining } => {
                game.phase = GamePhase::Paused {
                    resume: ResumeTo::Countdown { remaining },
                };
                game.events.push(GameEvent::Paused);
                return;
            }
            GamePhase::Playing => {
                game.phase = GamePhase::Paused {
                    resume: ResumeTo::Playing,
                };
                game.events.push(GameEvent::Paused);
                return;
            }
            GamePhase::Paused { resume } => {
                game.phase = match resume {
                    ResumeTo::Countdown { remaining } => GamePhase::Countdown { remaining },
                    ResumeTo::Playing => GamePhase::Playing,
                };
                game.events.push(GameEvent::Resumed);
            }
            GamePhase::GameOver { .. } => {}
        }
    }

    match game.phase {
        GamePhase::Paused { .. } => return,
        GamePhase::GameOver { .. } => {
            // Let the last sparks fade out
            update_cosmetics(game, dt);
            return;
        }
        _ => {}
    }

    game.elapsed += dt;
    drive_paddles(game, input, dt);

    match game.phase {
        GamePhase::Countdown { remaining } => {
            if remaining >= COUNTDOWN_SECS {
                game.events.push(GameEvent::CountdownTick(remaining.ceil() as u32));
            }
            let next = remaining - dt;
            if next <= 0.0 {
                game.serve();
                game.phase = GamePhase::Playing;
                game.events.push(GameEvent::RallyStart);
            } else {
                let shown = next.ceil() as u32;
                if shown != remaining.ceil() as u32 {
                    game.events.push(GameEvent::CountdownTick(shown));
                }
                game.phase = GamePhase::Countdown { remaining: next };
            }
        }
        GamePhase::Playing => step_rally(game, dt),
        _ => {}
    }

    update_cosmetics(game, dt);

    // Ensure deterministic ordering
    game.normalize_order();
}

/// Human input or AI for each paddle, then smoothing
fn drive_paddles(game: &mut Game, input: &TickInput, dt: f32) {
    for side in Side::BOTH {
        let i = side.index();
        if let Some(ai) = game.ai[i].as_mut() {
            ai.update(dt, &mut game.paddles[i], &game.balls, &mut game.rng);
        } else {
            let control = input.control(side);
            let paddle = &mut game.paddles[i];
            if let Some(y) = control.pointer_y {
                paddle.set_target(y);
            }
            paddle.nudge(control.direction(), dt);
        }
        game.paddles[i].update(dt);
    }
}

/// One step of live play
fn step_rally(game: &mut Game, dt: f32) {
    // Power-up spawns and expiry
    if let Some((kind, pos)) = game.spawner.update(dt, game.powerups.len(), &mut game.rng) {
        let id = game.next_entity_id();
        game.powerups.push(PowerUp::new(id, kind, pos));
        game.events.push(GameEvent::PowerUpSpawned(kind));
        log::debug!("Power-up {:?} spawned at ({:.0}, {:.0})", kind, pos.x, pos.y);
    }
    for pickup in game.powerups.iter_mut() {
        pickup.update(dt);
        if pickup.expired() {
            game.events.push(GameEvent::PowerUpExpired(pickup.kind));
        }
    }
    game.powerups.retain(|p| !p.expired());

    let mut multi_from: Vec<usize> = Vec::new();
    let mut goals: Vec<(usize, Side)> = Vec::new();

    for i in 0..game.balls.len() {
        let ball = &mut game.balls[i];
        let prev = ball.pos;
        ball.integrate(dt);

        // --- WALLS ---
        if let Some(wall) = wall_contact(ball.pos, ball.radius, HALF_HEIGHT) {
            ball.bounce_off_wall(wall, HALF_HEIGHT);
            let normal = glam::Vec2::new(0.0, ball.vel.y.signum());
            ball.emit_sparks(&mut game.rng, normal, 4, ParticleColor::Wall);
            game.events.push(GameEvent::WallHit);
        }

        // --- PADDLES ---
        for side in Side::BOTH {
            let paddle = &mut game.paddles[side.index()];
            let outward = side.outward();
            // Only a ball heading for this goal can be returned
            if ball.vel.x * outward >= 0.0 {
                continue;
            }

            let rect = paddle.rect();
            let in_front = (ball.pos.x - paddle.x) * outward >= 0.0;
            let contact = circle_aabb(ball.pos, ball.radius, &rect);
            let hit = if contact.hit && in_front {
                true
            } else if let Some(y) = swept_paddle_hit(prev, ball.pos, ball.radius, &rect, outward) {
                // Tunneled through the face this step: rewind to the crossing
                ball.pos.y = y;
                true
            } else {
                false
            };
            if !hit {
                continue;
            }

            let power = paddle.register_hit();
            ball.bounce_off_paddle(paddle, power);
            let normal = glam::Vec2::new(outward, 0.0);
            if power {
                ball.emit_sparks(&mut game.rng, normal, 24, ParticleColor::Power);
                game.screen_shake = (game.screen_shake + 0.35).min(1.0);
            } else {
                ball.emit_sparks(&mut game.rng, normal, 10, ParticleColor::Spark);
                game.screen_shake = (game.screen_shake + 0.08).min(1.0);
            }

            let combo = paddle.combo;
            game.events.push(GameEvent::PaddleHit { side, combo, power });
            if combo % COMBO_THRESHOLD == 0 {
                ball.emit_ring(&mut game.rng, 28, ParticleColor::Combo);
                game.events.push(GameEvent::ComboMilestone { side, combo });
            }
            break;
        }

        // --- PICKUPS ---
        if let Some(owner) = ball.last_hit {
            let found = game
                .powerups
                .iter()
                .position(|p| circles_overlap(ball.pos, ball.radius, p.pos, p.radius));
            if let Some(pi) = found {
                let kind = game.powerups.remove(pi).kind;
                match kind {
                    PowerUpKind::Speed => ball.power.speed_secs = SPEED_SECS,
                    PowerUpKind::Combo => ball.power.combo_secs = COMBO_SECS,
                    PowerUpKind::Grow => game.paddles[owner.index()].grow(GROW_SECS),
                    PowerUpKind::Multi => multi_from.push(i),
                }
                ball.emit_ring(&mut game.rng, 16, ParticleColor::Pickup);
                game.events.push(GameEvent::PowerUpCollected { kind, side: owner });
                log::debug!("{} collected {:?}", owner.as_str(), kind);
            }
        }

        // --- GOALS ---
        if let Some(scorer) = goal_side(ball.pos, ball.radius, HALF_WIDTH) {
            goals.push((i, scorer));
        }
    }

    // Multi-ball clones (appended, so goal indices stay valid)
    for source in multi_from {
        for _ in 0..MULTI_EXTRA_BALLS {
            if game.balls.len() >= MAX_BALLS {
                break;
            }
            let id = game.next_entity_id();
            let clone = game.balls[source].spawn_secondary(id, &mut game.rng);
            game.balls.push(clone);
        }
    }

    // Highest index first so removals don't shift pending ones
    goals.sort_by(|a, b| b.0.cmp(&a.0));
    for (index, scorer) in goals {
        let ball = game.balls.remove(index);
        award_point(game, scorer, ball.power.combo_active());
    }

    // The rally (and possibly the match) only ends when the last ball leaves
    if !game.balls.is_empty() {
        return;
    }
    game.powerups.clear();
    if let Some(winner) = game.leader_at_win() {
        game.phase = GamePhase::GameOver { winner };
        game.events.push(GameEvent::GameOver { winner });
        log::info!(
            "Game over: {} wins {}-{}",
            winner.as_str(),
            game.score(Side::Left),
            game.score(Side::Right)
        );
    } else {
        game.begin_countdown();
    }
}

/// Points for a goal: 1, +1 for a running combo, doubled by the combo power-up
pub fn points_for_goal(scorer_combo: u32, combo_power: bool) -> u32 {
    let mut points = 1;
    if scorer_combo >= COMBO_THRESHOLD {
        points += 1;
    }
    if combo_power {
        points *= 2;
    }
    points
}

fn award_point(game: &mut Game, scorer: Side, combo_power: bool) {
    let points = points_for_goal(game.paddle(scorer).combo, combo_power);
    game.scores[scorer.index()] += points;
    game.paddle_mut(scorer.opposite()).break_combo();
    // Next serve goes to whoever conceded
    game.serve_toward = scorer.opposite();
    game.screen_shake = (game.screen_shake + 0.5).min(1.0);
    game.events.push(GameEvent::PointScored { side: scorer, points });
    log::info!(
        "{} scores {} (now {}-{})",
        scorer.as_str(),
        points,
        game.score(Side::Left),
        game.score(Side::Right)
    );
}

/// Particles, trails and shake (never gameplay-affecting)
fn update_cosmetics(game: &mut Game, dt: f32) {
    for ball in game.balls.iter_mut() {
        ball.update_cosmetics(dt);
    }
    game.screen_shake = (game.screen_shake - dt * 2.5).max(0.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::ball::Ball;
    use crate::sim::state::{GameConfig, Mode};
    use glam::Vec2;
    use proptest::prelude::*;

    fn versus_game() -> Game {
        let mut game = Game::new(
            GameConfig {
                mode: Mode::TwoPlayer,
                ..Default::default()
            },
            12345,
        );
        game.spawner.timer = f32::MAX;
        game
    }

    fn playing_with_ball(pos: Vec2, vel: Vec2) -> Game {
        let mut game = versus_game();
        game.phase = GamePhase::Playing;
        let id = game.next_entity_id();
        let mut ball = Ball::new(id);
        ball.pos = pos;
        ball.vel = vel;
        game.balls.push(ball);
        game
    }

    fn run(game: &mut Game, ticks: usize) {
        let input = TickInput::default();
        for _ in 0..ticks {
            tick(game, &input, SIM_DT);
        }
    }

    #[test]
    fn test_countdown_then_serve() {
        let mut game = versus_game();
        let ticks = (COUNTDOWN_SECS / SIM_DT).ceil() as usize + 1;
        run(&mut game, ticks);

        assert_eq!(game.phase, GamePhase::Playing);
        assert_eq!(game.balls.len(), 1);
        let events = game.drain_events();
        let countdown: Vec<u32> = events
            .iter()
            .filter_map(|e| match e {
                GameEvent::CountdownTick(n) => Some(*n),
                _ => None,
            })
            .collect();
        assert_eq!(countdown, vec![3, 2, 1]);
        assert!(events.contains(&GameEvent::RallyStart));

        // Serve heads toward the chosen side
        let toward = game.serve_toward;
        assert!(game.balls[0].vel.x * toward.outward() < 0.0);
    }

    #[test]
    fn test_pause_freezes_countdown() {
        let mut game = versus_game();
        run(&mut game, 10);
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut game, &pause, SIM_DT);
        let frozen = game.phase;
        assert!(matches!(frozen, GamePhase::Paused { .. }));

        run(&mut game, 500);
        assert_eq!(game.phase, frozen);

        tick(&mut game, &pause, SIM_DT);
        assert!(matches!(game.phase, GamePhase::Countdown { .. }));
    }

    #[test]
    fn test_pause_during_play() {
        let mut game = playing_with_ball(Vec2::ZERO, Vec2::new(BALL_START_SPEED, 0.0));
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut game, &pause, SIM_DT);
        assert!(game.is_paused());
        let pos = game.balls[0].pos;
        run(&mut game, 50);
        assert_eq!(game.balls[0].pos, pos);

        tick(&mut game, &pause, SIM_DT);
        assert_eq!(game.phase, GamePhase::Playing);
        assert!(game.balls[0].pos.x > pos.x);
    }

    #[test]
    fn test_paddle_returns_ball() {
        let mut game = playing_with_ball(Vec2::new(-330.0, 0.0), Vec2::new(-BALL_START_SPEED, 0.0));
        run(&mut game, 40);

        assert!(game.balls[0].vel.x > 0.0);
        assert_eq!(game.paddle(Side::Left).combo, 1);
        assert_eq!(game.balls[0].last_hit, Some(Side::Left));
        let events = game.drain_events();
        assert!(events.iter().any(|e| matches!(e, GameEvent::PaddleHit { side: Side::Left, combo: 1, .. })));
    }

    #[test]
    fn test_fast_ball_does_not_tunnel() {
        // One step moves further than the paddle is thick
        let mut game = playing_with_ball(Vec2::new(-340.0, 10.0), Vec2::new(-BALL_MAX_SPEED, 0.0));
        for _ in 0..20 {
            tick(&mut game, &TickInput::default(), 1.0 / 30.0);
        }
        assert_eq!(game.scores, [0, 0]);
        assert!(game.balls[0].vel.x > 0.0);
    }

    #[test]
    fn test_ball_behind_paddle_is_a_goal() {
        let mut game = playing_with_ball(Vec2::new(395.0, 0.0), Vec2::new(BALL_START_SPEED, 0.0));
        run(&mut game, 20);
        assert_eq!(game.scores, [1, 0]);
        assert!(matches!(game.phase, GamePhase::Countdown { .. }));
        assert_eq!(game.serve_toward, Side::Right);
    }

    #[test]
    fn test_goal_scores_and_breaks_combo() {
        let mut game = playing_with_ball(Vec2::new(380.0, 200.0), Vec2::new(BALL_START_SPEED, 0.0));
        game.paddle_mut(Side::Right).combo = 3;
        run(&mut game, 30);

        assert_eq!(game.score(Side::Left), 1);
        assert_eq!(game.paddle(Side::Right).combo, 0);
        assert!(game.balls.is_empty());
        let events = game.drain_events();
        assert!(events.contains(&GameEvent::PointScored {
            side: Side::Left,
            points: 1
        }));
    }

    #[test]
    fn test_points_for_goal() {
        assert_eq!(points_for_goal(0, false), 1);
        assert_eq!(points_for_goal(COMBO_THRESHOLD, false), 2);
        assert_eq!(points_for_goal(0, true), 2);
        assert_eq!(points_for_goal(COMBO_THRESHOLD + 3, true), 4);
    }

    #[test]
    fn test_win_ends_match() {
        let mut game = playing_with_ball(Vec2::new(-380.0, -200.0), Vec2::new(-BALL_START_SPEED, 0.0));
        game.scores = [0, game.config.win_score - 1];
        run(&mut game, 30);

        assert_eq!(game.phase, GamePhase::GameOver { winner: Side::Right });
        assert!(game.drain_events().contains(&GameEvent::GameOver { winner: Side::Right }));

        // Pause is ignored once the match is decided
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut game, &pause, SIM_DT);
        assert!(game.is_over());
    }

    #[test]
    fn test_multi_ball_rally_continues_until_last_ball() {
        let mut game = playing_with_ball(Vec2::new(380.0, 200.0), Vec2::new(BALL_START_SPEED, 0.0));
        let id = game.next_entity_id();
        let mut other = Ball::new(id);
        other.vel = Vec2::new(BALL_START_SPEED, 0.0);
        other.secondary = true;
        game.balls.push(other);

        run(&mut game, 30);
        assert_eq!(game.score(Side::Left), 1);
        assert_eq!(game.phase, GamePhase::Playing);
        assert_eq!(game.balls.len(), 1);
    }

    #[test]
    fn test_match_point_waits_for_last_ball() {
        let mut game = playing_with_ball(Vec2::new(420.0, 200.0), Vec2::new(BALL_START_SPEED, 0.0));
        let win = game.config.win_score;
        game.scores = [win - 1, 0];
        let id = game.next_entity_id();
        let mut other = Ball::new(id);
        other.pos = Vec2::new(0.0, 250.0);
        other.vel = Vec2::new(-BALL_START_SPEED, 0.0);
        other.secondary = true;
        game.balls.push(other);

        run(&mut game, 1);
        assert_eq!(game.scores, [win, 0]);
        assert_eq!(game.phase, GamePhase::Playing);
        assert_eq!(game.balls.len(), 1);

        // The other ball still counts for the opponent
        run(&mut game, 200);
        assert_eq!(game.scores, [win, 1]);
        assert_eq!(game.phase, GamePhase::GameOver { winner: Side::Left });
        assert!(game.drain_events().contains(&GameEvent::GameOver { winner: Side::Left }));
    }

    #[test]
    fn test_fifth_hit_is_combo_milestone() {
        let mut game = playing_with_ball(Vec2::new(-330.0, 0.0), Vec2::new(-BALL_START_SPEED, 0.0));
        game.paddle_mut(Side::Left).combo = COMBO_THRESHOLD - 1;

        let mut events = Vec::new();
        for _ in 0..40 {
            run(&mut game, 1);
            events = game.drain_events();
            if events.iter().any(|e| matches!(e, GameEvent::PaddleHit { .. })) {
                break;
            }
        }
        assert!(events.contains(&GameEvent::ComboMilestone {
            side: Side::Left,
            combo: COMBO_THRESHOLD
        }));
        // Hit sparks plus the milestone ring
        let combo_particles = game.balls[0]
            .particles
            .iter()
            .filter(|p| p.color == ParticleColor::Combo)
            .count();
        assert!(combo_particles > 0);
        assert!(game.balls[0].particles.len() > 10);
    }

    #[test]
    fn test_speed_pickup_through_tick() {
        let mut game = playing_with_ball(Vec2::ZERO, Vec2::new(100.0, 0.0));
        game.balls[0].last_hit = Some(Side::Left);
        let id = game.next_entity_id();
        game.powerups.push(PowerUp::new(id, PowerUpKind::Speed, Vec2::new(5.0, 0.0)));

        run(&mut game, 1);
        assert!(game.powerups.is_empty());
        assert!((game.balls[0].power.speed_secs - SPEED_SECS).abs() < 1e-5);
        assert!(game.drain_events().contains(&GameEvent::PowerUpCollected {
            kind: PowerUpKind::Speed,
            side: Side::Left
        }));
    }

    #[test]
    fn test_combo_pickup_doubles_the_goal() {
        let mut game = playing_with_ball(Vec2::new(380.0, 200.0), Vec2::new(BALL_START_SPEED, 0.0));
        game.balls[0].last_hit = Some(Side::Left);
        let id = game.next_entity_id();
        game.powerups.push(PowerUp::new(id, PowerUpKind::Combo, Vec2::new(383.0, 200.0)));

        run(&mut game, 1);
        assert!(game.balls[0].power.combo_active());

        run(&mut game, 30);
        assert_eq!(game.scores, [2, 0]);
        assert!(game.drain_events().contains(&GameEvent::PointScored {
            side: Side::Left,
            points: 2
        }));
    }

    #[test]
    fn test_pickup_expires() {
        let mut game = playing_with_ball(Vec2::ZERO, Vec2::new(100.0, 0.0));
        let id = game.next_entity_id();
        let mut pickup = PowerUp::new(id, PowerUpKind::Grow, Vec2::new(0.0, 200.0));
        pickup.ttl = SIM_DT / 2.0;
        game.powerups.push(pickup);

        run(&mut game, 1);
        assert!(game.powerups.is_empty());
        assert!(game.drain_events().contains(&GameEvent::PowerUpExpired(PowerUpKind::Grow)));
    }

    #[test]
    fn test_multi_pickup_respects_ball_cap() {
        let mut game = playing_with_ball(Vec2::ZERO, Vec2::new(100.0, 20.0));
        game.balls[0].last_hit = Some(Side::Right);
        for y in [100.0, -100.0] {
            let id = game.next_entity_id();
            let mut extra = Ball::new(id);
            extra.pos = Vec2::new(-100.0, y);
            extra.vel = Vec2::new(50.0, 0.0);
            game.balls.push(extra);
        }
        let id = game.next_entity_id();
        game.powerups.push(PowerUp::new(id, PowerUpKind::Multi, Vec2::new(3.0, 0.0)));

        run(&mut game, 1);
        assert_eq!(game.balls.len(), MAX_BALLS);
        assert_eq!(game.balls.iter().filter(|b| b.secondary).count(), 1);

        // Already full: the pickup is used up without spawning
        let id = game.next_entity_id();
        let at = game.balls[0].pos + Vec2::new(2.0, 0.0);
        game.powerups.push(PowerUp::new(id, PowerUpKind::Multi, at));
        game.balls[0].last_hit = Some(Side::Right);
        run(&mut game, 1);
        assert!(game.powerups.is_empty());
        assert_eq!(game.balls.len(), MAX_BALLS);
    }

    #[test]
    fn test_wall_bounce() {
        let mut game = playing_with_ball(Vec2::new(0.0, 289.0), Vec2::new(100.0, 300.0));
        run(&mut game, 2);
        assert!(game.balls[0].vel.y < 0.0);
        assert!(game.drain_events().contains(&GameEvent::WallHit));
    }

    #[test]
    fn test_grow_pickup_goes_to_last_hitter() {
        let mut game = playing_with_ball(Vec2::ZERO, Vec2::new(100.0, 0.0));
        game.balls[0].last_hit = Some(Side::Left);
        let id = game.next_entity_id();
        game.powerups.push(PowerUp::new(id, PowerUpKind::Grow, Vec2::new(5.0, 0.0)));

        run(&mut game, 1);
        assert!(game.powerups.is_empty());
        assert!(game.paddle(Side::Left).height > PADDLE_HEIGHT);
        assert_eq!(game.paddle(Side::Right).height, PADDLE_HEIGHT);
        assert!(game.drain_events().contains(&GameEvent::PowerUpCollected {
            kind: PowerUpKind::Grow,
            side: Side::Left
        }));
    }

    #[test]
    fn test_unhit_serve_cannot_collect() {
        let mut game = playing_with_ball(Vec2::ZERO, Vec2::new(100.0, 0.0));
        let id = game.next_entity_id();
        game.powerups.push(PowerUp::new(id, PowerUpKind::Speed, Vec2::new(5.0, 0.0)));
        run(&mut game, 1);
        assert_eq!(game.powerups.len(), 1);
        assert!(!game.balls[0].power.speed_active());
    }

    #[test]
    fn test_multi_pickup_spawns_balls() {
        let mut game = playing_with_ball(Vec2::ZERO, Vec2::new(100.0, 20.0));
        game.balls[0].last_hit = Some(Side::Right);
        let id = game.next_entity_id();
        game.powerups.push(PowerUp::new(id, PowerUpKind::Multi, Vec2::new(3.0, 0.0)));

        run(&mut game, 1);
        assert_eq!(game.balls.len(), 1 + MULTI_EXTRA_BALLS);
        assert!(game.balls.iter().filter(|b| b.secondary).count() == MULTI_EXTRA_BALLS);
    }

    #[test]
    fn test_keyboard_moves_paddle() {
        let mut game = versus_game();
        let input = TickInput {
            left: PaddleControl {
                up: true,
                ..Default::default()
            },
            right: PaddleControl {
                down: true,
                ..Default::default()
            },
            ..Default::default()
        };
        for _ in 0..60 {
            tick(&mut game, &input, SIM_DT);
        }
        assert!(game.paddle(Side::Left).y > 50.0);
        assert!(game.paddle(Side::Right).y < -50.0);
    }

    #[test]
    fn test_determinism() {
        let config = GameConfig {
            mode: Mode::Demo,
            ..Default::default()
        };
        let mut a = Game::new(config, 99999);
        let mut b = Game::new(config, 99999);
        for _ in 0..2000 {
            tick(&mut a, &TickInput::default(), SIM_DT);
            tick(&mut b, &TickInput::default(), SIM_DT);
        }
        assert_eq!(a.scores, b.scores);
        assert_eq!(a.balls.len(), b.balls.len());
        assert!((a.paddle(Side::Left).y - b.paddle(Side::Left).y).abs() < 1e-4);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        #[test]
        fn prop_demo_match_invariants(seed in any::<u64>(), difficulty in 0usize..3) {
            use crate::sim::ai::Difficulty;
            let difficulty = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard][difficulty];
            let mut game = Game::new(
                GameConfig { mode: Mode::Demo, difficulty, win_score: 3 },
                seed,
            );
            let mut last_scores = game.scores;
            for _ in 0..6000 {
                tick(&mut game, &TickInput::default(), SIM_DT);

                prop_assert!(game.balls.len() <= MAX_BALLS);
                prop_assert!(game.scores[0] >= last_scores[0] && game.scores[1] >= last_scores[1]);
                last_scores = game.scores;

                for ball in &game.balls {
                    prop_assert!(ball.pos.y.abs() <= HALF_HEIGHT - ball.radius + 1e-3);
                    prop_assert!(ball.speed() <= BALL_MAX_SPEED + 1e-2);
                    let heading = ball.vel.y.atan2(ball.vel.x.abs());
                    prop_assert!(heading.abs() <= MAX_BOUNCE_ANGLE + 1e-3);
                }
                for paddle in &game.paddles {
                    prop_assert!(paddle.y.abs() + paddle.height / 2.0 <= HALF_HEIGHT + 1e-3);
                }
            }
        }
    }
}
