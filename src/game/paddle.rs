use crate::config::{AiTuning, Playfield, PADDLE_HEIGHT, PADDLE_SPEED, PADDLE_WIDTH};
use crate::game::Aabb;

#[derive(Clone, Debug)]
pub struct Paddle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub is_ai: bool,
    top: f32,
    bottom_limit: f32,
    ai: AiTuning,
}

impl Paddle {
    pub fn new(x: f32, y: f32, playfield: &Playfield, ai: AiTuning, is_ai: bool) -> Self {
        Self {
            x,
            y,
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
            speed: PADDLE_SPEED,
            is_ai,
            top: playfield.top,
            bottom_limit: playfield.bottom() - PADDLE_HEIGHT,
            ai,
        }
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    pub fn rect(&self) -> Aabb {
        Aabb::new(self.x, self.y, self.width, self.height)
    }

    /// Human control. Both flags are honoured independently.
    pub fn update(&mut self, dt: f32, moving_up: bool, moving_down: bool) {
        if moving_up && self.y > self.top {
            self.y -= self.speed * dt;
            self.clamp();
        }
        if moving_down && self.y < self.bottom_limit {
            self.y += self.speed * dt;
            self.clamp();
        }
    }

    /// Chases `ball_y` while the ball travels toward this paddle.
    pub fn update_ai(&mut self, dt: f32, ball_y: f32, ball_velocity_x: f32) {
        if !self.is_ai || ball_velocity_x <= 0.0 {
            return;
        }

        let center = self.center_y();
        let step = self.speed * self.ai.difficulty * dt;
        if center < ball_y - self.ai.dead_zone {
            if self.y < self.bottom_limit {
                self.y += step;
            }
        } else if center > ball_y + self.ai.dead_zone && self.y > self.top {
            self.y -= step;
        }
        self.clamp();
    }

    fn clamp(&mut self) {
        self.y = self.y.clamp(self.top, self.bottom_limit);
    }
}
