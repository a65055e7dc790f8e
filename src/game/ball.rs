use crate::config::{Playfield, BALL_SIZE, BALL_SPEED, CANVAS_WIDTH};
use crate::game::paddle::Paddle;
use crate::game::Aabb;

#[derive(Clone, Debug)]
pub struct Ball {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub size: f32,
    pub speed: f32,
    playfield: Playfield,
}

impl Ball {
    pub fn new(playfield: &Playfield) -> Self {
        Self {
            x: CANVAS_WIDTH / 2.0,
            y: playfield.center_y(),
            vx: BALL_SPEED,
            vy: BALL_SPEED,
            size: BALL_SIZE,
            speed: BALL_SPEED,
            playfield: *playfield,
        }
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.size / 2.0
    }

    pub fn rect(&self) -> Aabb {
        Aabb::new(self.x, self.y, self.size, self.size)
    }

    /// Integrates one frame. Walls reflect the ball without pushing it back
    /// inside, so it can overshoot a wall by one frame of travel.
    pub fn update(&mut self, dt: f32) {
        self.x += self.vx * dt;
        self.y += self.vy * dt;

        let floor = self.playfield.bottom() - self.size;
        if self.y <= self.playfield.top || self.y >= floor {
            self.vy = -self.vy;
        }
    }

    /// Serves from the center, toward the side that did not receive last time.
    pub fn reset(&mut self) {
        self.x = CANVAS_WIDTH / 2.0;
        self.y = self.playfield.center_y();
        self.vx = if self.vx > 0.0 { -self.speed } else { self.speed };
        self.vy = self.speed;
    }

    /// Bounces off `paddle` if the two overlap, adding spin from the hit offset.
    pub fn check_collision(&mut self, paddle: &Paddle) -> bool {
        if !self.rect().intersects(&paddle.rect()) {
            return false;
        }

        self.vx = -self.vx;
        let hit = (self.center_y() - paddle.center_y()) / (paddle.height / 2.0);
        self.vy = self.speed * hit;
        true
    }
}
