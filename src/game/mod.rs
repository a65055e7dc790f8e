pub mod ball;
pub mod mode;
pub mod paddle;

use std::time::Instant;

use crossterm::event::{KeyEvent, KeyEventKind};
use tracing::{debug, info};

use crate::audio::AudioManager;
use crate::config::{Config, Playfield, CANVAS_WIDTH, PADDLE_HEIGHT, PADDLE_INSET, PADDLE_WIDTH};
use crate::input::{self, FrameInput, KeyState};
use ball::Ball;
use mode::{Effect, GameMode, MenuOption};
use paddle::Paddle;

/// Axis-aligned box in canvas coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Aabb {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Strict overlap; boxes that only share an edge do not intersect.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.x < other.x + other.w
            && other.x < self.x + self.w
            && self.y < other.y + other.h
            && other.y < self.y + self.h
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Score {
    pub left: u32,
    pub right: u32,
}

pub struct Game {
    pub should_quit: bool,
    pub mode: GameMode,
    pub selected: MenuOption,
    pub left: Paddle,
    pub right: Paddle,
    pub ball: Ball,
    pub score: Score,
    pub audio: AudioManager,
    config: Config,
    keys: KeyState,
    last_frame: Option<Instant>,
    title_dirty: bool,
}

impl Game {
    pub fn new(config: Config, audio: AudioManager, release_aware: bool) -> Self {
        let playfield = config.playfield;
        let (left, right) = start_paddles(&config);
        Self {
            should_quit: false,
            mode: GameMode::Menu,
            selected: MenuOption::Multiplayer,
            left,
            right,
            ball: Ball::new(&playfield),
            score: Score::default(),
            audio,
            config,
            keys: KeyState::new(release_aware),
            last_frame: None,
            title_dirty: true,
        }
    }

    pub fn playfield(&self) -> &Playfield {
        &self.config.playfield
    }

    /// Returns the window title once after each change of mode.
    pub fn take_title_change(&mut self) -> Option<&'static str> {
        if self.title_dirty {
            self.title_dirty = false;
            Some(self.mode.title())
        } else {
            None
        }
    }

    pub fn on_key(&mut self, key: KeyEvent, now: Instant) {
        self.keys.record(&key, now);
        if key.kind == KeyEventKind::Release {
            return;
        }
        if let Some(command) = input::command_for(&key) {
            // In a match only volume steps repeat while held.
            if key.kind == KeyEventKind::Repeat && self.mode.in_match() && !command.repeats() {
                return;
            }
            let transition = self.mode.on_command(command, &mut self.selected);
            self.apply(transition.mode, transition.effect);
        }
    }

    pub fn on_tick(&mut self, now: Instant) {
        if !self.mode.in_match() {
            return;
        }
        let dt = match self.last_frame {
            Some(prev) => now.saturating_duration_since(prev).as_secs_f32(),
            None => 0.0,
        };
        self.last_frame = Some(now);
        let input = self.keys.sample(now);
        self.update(dt.min(self.config.max_frame_dt), &input);
    }

    /// Advances the match by `dt` seconds. Does nothing in the menu.
    pub fn update(&mut self, dt: f32, input: &FrameInput) {
        if !self.mode.in_match() {
            return;
        }

        self.left.update(dt, input.left_up, input.left_down);
        match self.mode {
            GameMode::SinglePlayer => {
                self.right.update_ai(dt, self.ball.center_y(), self.ball.vx);
            }
            GameMode::Multiplayer => {
                self.right.update(dt, input.right_up, input.right_down);
            }
            GameMode::Menu => {}
        }

        self.ball.update(dt);
        if self.ball.check_collision(&self.left) {
            debug!(vy = self.ball.vy, "left paddle hit");
        }
        if self.ball.check_collision(&self.right) {
            debug!(vy = self.ball.vy, "right paddle hit");
        }

        let playfield = self.config.playfield;
        if self.ball.x < playfield.left {
            self.score.right += 1;
            self.ball.reset();
            self.log_score();
        }
        if self.ball.x > playfield.right() {
            self.score.left += 1;
            self.ball.reset();
            self.log_score();
        }
    }

    fn apply(&mut self, mode: GameMode, effect: Effect) {
        if mode != self.mode {
            info!(from = ?self.mode, to = ?mode, "mode change");
            self.mode = mode;
            self.title_dirty = true;
        }
        match effect {
            Effect::None => {}
            Effect::StartMatch { vs_ai } => {
                self.right.is_ai = vs_ai;
                self.reset_match();
            }
            Effect::ReturnToMenu => {
                self.keys.clear();
            }
            Effect::Quit => self.should_quit = true,
            Effect::ToggleMusic => self.audio.toggle_music(),
            Effect::VolumeUp => self.audio.increase_volume(),
            Effect::VolumeDown => self.audio.decrease_volume(),
        }
    }

    fn reset_match(&mut self) {
        self.score = Score::default();
        let (left, right) = start_paddles(&self.config);
        self.left.x = left.x;
        self.left.y = left.y;
        self.right.x = right.x;
        self.right.y = right.y;
        self.ball.reset();
        self.keys.clear();
        self.last_frame = None;
    }

    fn log_score(&self) {
        let (left, right) = self.side_labels();
        info!("{left}: {} - {right}: {}", self.score.left, self.score.right);
    }

    /// Scoreboard names for the two sides in the current mode.
    pub fn side_labels(&self) -> (&'static str, &'static str) {
        match self.mode {
            GameMode::SinglePlayer => ("PLAYER", "AI"),
            _ => ("P1", "P2"),
        }
    }
}

fn start_paddles(config: &Config) -> (Paddle, Paddle) {
    let field = &config.playfield;
    let y = field.center_y() - PADDLE_HEIGHT / 2.0;
    let left = Paddle::new(field.left + PADDLE_INSET, y, field, config.ai, false);
    let right_x = CANVAS_WIDTH - field.left - PADDLE_INSET - PADDLE_WIDTH;
    let right = Paddle::new(right_x, y, field, config.ai, true);
    (left, right)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BALL_SIZE, BALL_SPEED, PADDLE_SPEED};
    use crossterm::event::{KeyCode, KeyModifiers};
    use std::time::Duration;

    fn game() -> Game {
        Game::new(Config::default(), AudioManager::silent(), true)
    }

    fn press(game: &mut Game, code: KeyCode) {
        game.on_key(KeyEvent::new(code, KeyModifiers::NONE), Instant::now());
    }

    #[test]
    fn starts_in_menu_with_first_option() {
        let mut g = game();
        assert_eq!(g.mode, GameMode::Menu);
        assert_eq!(g.selected, MenuOption::Multiplayer);
        assert_eq!(g.take_title_change(), Some("Pong - Main Menu"));
        assert_eq!(g.take_title_change(), None);
    }

    #[test]
    fn down_then_enter_starts_single_player() {
        let mut g = game();
        g.score = Score { left: 4, right: 2 };
        g.right.is_ai = false;
        press(&mut g, KeyCode::Down);
        press(&mut g, KeyCode::Enter);
        assert_eq!(g.mode, GameMode::SinglePlayer);
        assert_eq!(g.score, Score::default());
        assert!(g.right.is_ai);
        assert!(!g.left.is_ai);
        assert_eq!(g.take_title_change(), Some("Pong - Vs AI"));
    }

    #[test]
    fn enter_on_first_option_starts_multiplayer_without_ai() {
        let mut g = game();
        press(&mut g, KeyCode::Enter);
        assert_eq!(g.mode, GameMode::Multiplayer);
        assert!(!g.right.is_ai);
        assert_eq!(g.take_title_change(), Some("Pong - Multiplayer"));
        assert_eq!(g.take_title_change(), None);
    }

    #[test]
    fn escape_returns_to_menu_keeping_scores_then_new_match_resets() {
        let mut g = game();
        press(&mut g, KeyCode::Enter);
        g.score = Score { left: 3, right: 5 };
        g.left.y = 90.0;
        press(&mut g, KeyCode::Esc);
        assert_eq!(g.mode, GameMode::Menu);
        assert_eq!(g.score, Score { left: 3, right: 5 });
        assert!(!g.should_quit);

        press(&mut g, KeyCode::Enter);
        assert_eq!(g.score, Score::default());
        assert_eq!(g.left.y, g.playfield().center_y() - PADDLE_HEIGHT / 2.0);
    }

    #[test]
    fn escape_in_menu_quits() {
        let mut g = game();
        press(&mut g, KeyCode::Esc);
        assert!(g.should_quit);
    }

    #[test]
    fn ctrl_c_quits_from_a_match() {
        let mut g = game();
        press(&mut g, KeyCode::Enter);
        g.on_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL), Instant::now());
        assert!(g.should_quit);
    }

    #[test]
    fn ball_past_left_boundary_scores_for_right() {
        let mut g = game();
        press(&mut g, KeyCode::Enter);
        g.ball.x = g.playfield().left - 1.0;
        g.ball.vx = -1.0;
        g.ball.vy = 0.0;
        g.update(0.0, &FrameInput::default());
        assert_eq!(g.score, Score { left: 0, right: 1 });
        assert_eq!(g.ball.x, CANVAS_WIDTH / 2.0);
        assert_eq!(g.ball.y, g.playfield().center_y());
    }

    #[test]
    fn ball_past_right_boundary_scores_for_left() {
        let mut g = game();
        press(&mut g, KeyCode::Enter);
        g.ball.x = g.playfield().right() + 1.0;
        g.ball.vy = 0.0;
        g.update(0.0, &FrameInput::default());
        assert_eq!(g.score, Score { left: 1, right: 0 });
    }

    #[test]
    fn menu_does_not_simulate() {
        let mut g = game();
        let x = g.ball.x;
        g.update(1.0, &FrameInput::default());
        g.on_tick(Instant::now());
        assert_eq!(g.ball.x, x);
    }

    #[test]
    fn multiplayer_drives_both_paddles_from_keys() {
        let mut g = game();
        press(&mut g, KeyCode::Enter);
        let (l, r) = (g.left.y, g.right.y);
        let input = FrameInput {
            left_up: true,
            right_down: true,
            ..FrameInput::default()
        };
        g.update(0.1, &input);
        assert!((g.left.y - (l - PADDLE_SPEED * 0.1)).abs() < 1e-3);
        assert!((g.right.y - (r + PADDLE_SPEED * 0.1)).abs() < 1e-3);
    }

    #[test]
    fn single_player_ignores_right_paddle_keys() {
        let mut g = game();
        press(&mut g, KeyCode::Down);
        press(&mut g, KeyCode::Enter);
        g.ball.vx = -200.0;
        let r = g.right.y;
        let input = FrameInput {
            right_down: true,
            ..FrameInput::default()
        };
        g.update(0.1, &input);
        assert_eq!(g.right.y, r);
    }

    #[test]
    fn tick_measures_wall_clock_and_caps_long_frames() {
        let mut g = game();
        press(&mut g, KeyCode::Enter);
        g.ball.vy = 0.0;
        let t0 = Instant::now();
        g.on_tick(t0);
        let x0 = g.ball.x;
        g.on_tick(t0 + Duration::from_secs(5));
        let travelled = (g.ball.x - x0).abs();
        assert!((travelled - g.ball.speed * g.config.max_frame_dt).abs() < 1e-2);
    }

    #[test]
    fn held_keys_move_the_paddle_on_tick() {
        let mut g = game();
        press(&mut g, KeyCode::Enter);
        let t0 = Instant::now();
        g.on_tick(t0);
        g.on_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::NONE), t0);
        let y = g.left.y;
        g.on_tick(t0 + Duration::from_millis(16));
        assert!(g.left.y > y);
    }

    #[test]
    fn music_toggle_without_track_is_harmless() {
        let mut g = game();
        press(&mut g, KeyCode::Enter);
        press(&mut g, KeyCode::Char('m'));
        assert!(!g.audio.is_music_enabled());
        press(&mut g, KeyCode::Char('+'));
        assert_eq!(g.audio.volume(), 80);
    }

    #[test]
    fn held_volume_key_keeps_stepping_in_a_match() {
        let mut g = game();
        press(&mut g, KeyCode::Enter);
        let now = Instant::now();
        let up = KeyEvent::new(KeyCode::Char('+'), KeyModifiers::NONE);
        g.on_key(up, now);
        g.on_key(KeyEvent { kind: KeyEventKind::Repeat, ..up }, now);
        g.on_key(KeyEvent { kind: KeyEventKind::Repeat, ..up }, now);
        assert_eq!(g.audio.volume(), 112);

        let esc = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        g.on_key(KeyEvent { kind: KeyEventKind::Repeat, ..esc }, now);
        assert_eq!(g.mode, GameMode::Multiplayer);
    }

    #[test]
    fn press_only_terminal_keeps_paddle_moving_until_first_repeat() {
        let mut g = Game::new(Config::default(), AudioManager::silent(), false);
        press(&mut g, KeyCode::Enter);
        let t0 = Instant::now();
        g.on_tick(t0);
        g.on_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::NONE), t0);
        let mut y = g.left.y;
        for frame in 1..=20 {
            g.on_tick(t0 + Duration::from_millis(16 * frame));
            assert!(g.left.y > y, "paddle stalled at frame {frame}");
            y = g.left.y;
        }
    }

    #[test]
    fn collision_and_scoring_both_run_in_one_frame() {
        let mut g = game();
        press(&mut g, KeyCode::Enter);
        let right_edge = g.playfield().right();
        g.right.x = right_edge - 5.0;
        g.ball.x = right_edge + 1.0;
        g.ball.y = g.right.center_y() - BALL_SIZE / 2.0;
        g.ball.vx = BALL_SPEED;
        g.ball.vy = 0.0;
        g.update(0.0, &FrameInput::default());
        assert_eq!(g.score, Score { left: 1, right: 0 });
        // The hit flipped vx to negative before the reset served it back right.
        assert_eq!(g.ball.vx, BALL_SPEED);
        assert_eq!(g.ball.x, CANVAS_WIDTH / 2.0);
    }

    #[test]
    fn aabb_edges_do_not_count_as_overlap() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&Aabb::new(10.0, 0.0, 5.0, 5.0)));
        assert!(a.intersects(&Aabb::new(9.0, 9.0, 5.0, 5.0)));
    }
}
