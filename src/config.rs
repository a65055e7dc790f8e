use std::env;
use std::path::PathBuf;
use std::time::Duration;

use tracing::warn;

// Logical canvas the game is simulated and drawn in.
pub const CANVAS_WIDTH: f32 = 800.0;
pub const CANVAS_HEIGHT: f32 = 600.0;

pub const MARGIN_TOP: f32 = 80.0;
pub const MARGIN_BOTTOM: f32 = 60.0;
pub const MARGIN_SIDES: f32 = 40.0;

pub const PADDLE_WIDTH: f32 = 20.0;
pub const PADDLE_HEIGHT: f32 = 80.0;
pub const PADDLE_SPEED: f32 = 250.0;
/// Gap between the playfield's side edge and a paddle's outer face.
pub const PADDLE_INSET: f32 = 20.0;

pub const BALL_SIZE: f32 = 12.0;
pub const BALL_SPEED: f32 = 200.0;

pub const AI_DIFFICULTY: f32 = 0.8;
pub const AI_DEAD_ZONE: f32 = 10.0;

pub const FRAME_INTERVAL: Duration = Duration::from_millis(16); // ~60 FPS
pub const MAX_FRAME_DT: f32 = 0.25;

pub const VOLUME_MAX: i32 = 128;
pub const VOLUME_DEFAULT: i32 = 64;
pub const VOLUME_STEP: i32 = 16;

pub const DEFAULT_MUSIC_PATH: &str = "assets/Funk It - Dyalla.mp3";
pub const DEFAULT_LOG_FILE: &str = "pong.log";

/// The bounded region inside the canvas where the ball and paddles move.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Playfield {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Playfield {
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    pub fn center_y(&self) -> f32 {
        self.top + self.height / 2.0
    }
}

impl Default for Playfield {
    fn default() -> Self {
        Self {
            left: MARGIN_SIDES,
            top: MARGIN_TOP,
            width: CANVAS_WIDTH - MARGIN_SIDES * 2.0,
            height: CANVAS_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM,
        }
    }
}

/// How well the computer opponent tracks the ball.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AiTuning {
    /// Fraction of full paddle speed the AI moves at. 1.0 is perfect.
    pub difficulty: f32,
    /// Band around the target the AI will not correct inside of.
    pub dead_zone: f32,
}

impl Default for AiTuning {
    fn default() -> Self {
        Self {
            difficulty: AI_DIFFICULTY,
            dead_zone: AI_DEAD_ZONE,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub playfield: Playfield,
    pub ai: AiTuning,
    pub frame_interval: Duration,
    pub max_frame_dt: f32,
    pub music_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            playfield: Playfield::default(),
            ai: AiTuning::default(),
            frame_interval: FRAME_INTERVAL,
            max_frame_dt: MAX_FRAME_DT,
            music_path: PathBuf::from(DEFAULT_MUSIC_PATH),
        }
    }
}

impl Config {
    /// Defaults with overrides from `PONG_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Where logs go. Read on its own because logging starts before the rest
    /// of the configuration is parsed.
    pub fn log_file_from_env() -> PathBuf {
        env::var_os("PONG_LOG_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE))
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(path) = lookup("PONG_MUSIC") {
            config.music_path = PathBuf::from(path);
        }
        if let Some(v) = parse_unit(&lookup, "PONG_AI_DIFFICULTY") {
            config.ai.difficulty = v;
        }
        if let Some(v) = parse_non_negative(&lookup, "PONG_AI_DEAD_ZONE") {
            config.ai.dead_zone = v;
        }
        config
    }
}

fn parse_f32(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<f32> {
    let raw = lookup(key)?;
    match raw.trim().parse::<f32>() {
        Ok(v) if v.is_finite() => Some(v),
        _ => {
            warn!(key, value = %raw, "ignoring unparsable setting");
            None
        }
    }
}

fn parse_unit(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<f32> {
    let v = parse_f32(lookup, key)?;
    if (0.0..=1.0).contains(&v) {
        Some(v)
    } else {
        warn!(key, value = v, "setting must be within 0.0..=1.0, ignoring");
        None
    }
}

fn parse_non_negative(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<f32> {
    let v = parse_f32(lookup, key)?;
    if v >= 0.0 {
        Some(v)
    } else {
        warn!(key, value = v, "setting must not be negative, ignoring");
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup_from<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn default_playfield_is_inset_by_margins() {
        let field = Playfield::default();
        assert_eq!(field.left, 40.0);
        assert_eq!(field.top, 80.0);
        assert_eq!(field.right(), 760.0);
        assert_eq!(field.bottom(), 540.0);
        assert_eq!(field.center_y(), 310.0);
    }

    #[test]
    fn env_overrides_are_applied() {
        let config = Config::from_lookup(lookup_from(&[
            ("PONG_MUSIC", "/tmp/song.ogg"),
            ("PONG_AI_DIFFICULTY", "0.5"),
            ("PONG_AI_DEAD_ZONE", "4"),
        ]));
        assert_eq!(config.music_path, PathBuf::from("/tmp/song.ogg"));
        assert_eq!(config.ai.difficulty, 0.5);
        assert_eq!(config.ai.dead_zone, 4.0);
    }

    #[test]
    fn bad_values_fall_back_to_defaults() {
        let config = Config::from_lookup(lookup_from(&[
            ("PONG_AI_DIFFICULTY", "1.7"),
            ("PONG_AI_DEAD_ZONE", "wide"),
        ]));
        assert_eq!(config.ai, AiTuning::default());
    }
}
