use crate::config::CANVAS_WIDTH;
use crate::game::ball::Ball;
use crate::game::mode::GameMode;
use crate::game::paddle::Paddle;
use crate::game::{Aabb, Game};
use crate::ui::glyph;
use crate::ui::surface::{PixelRect, Rgba, Surface};

const BACKGROUND: Rgba = Rgba::rgb(0, 0, 0);
const FIELD: Rgba = Rgba::rgb(10, 10, 10);
const FRAME: Rgba = Rgba::rgb(100, 100, 100);
const WHITE: Rgba = Rgba::rgb(255, 255, 255);
const RIM: Rgba = Rgba::rgb(200, 200, 200);
const GROOVE: Rgba = Rgba::rgb(150, 150, 150);
const LEFT_SIDE: Rgba = Rgba::rgb(100, 255, 100);
const RIGHT_SIDE: Rgba = Rgba::rgb(255, 100, 100);
const LABEL: Rgba = Rgba::rgb(200, 200, 200);

fn pixels(r: Aabb) -> PixelRect {
    PixelRect::new(r.x as i32, r.y as i32, r.w as i32, r.h as i32)
}

pub fn draw_court(surface: &mut dyn Surface, game: &Game) {
    let field = game.playfield();
    let area = PixelRect::new(
        field.left as i32,
        field.top as i32,
        field.width as i32,
        field.height as i32,
    );

    surface.set_color(BACKGROUND);
    surface.clear();

    surface.set_color(FIELD);
    surface.fill_rect(area);
    surface.set_color(FRAME);
    surface.draw_rect(area);

    // Dashed divider
    surface.set_color(WHITE);
    let center_x = (CANVAS_WIDTH / 2.0) as i32;
    for y in (area.y..area.y + area.h).step_by(15) {
        surface.fill_rect(PixelRect::new(center_x - 1, y, 2, 8));
    }

    draw_paddle(surface, &game.left, true);
    draw_paddle(surface, &game.right, false);
    draw_ball(surface, &game.ball);
    draw_scoreboard(surface, game);

    if game.audio.is_music_enabled() && game.audio.is_music_playing() {
        draw_music_indicator(surface);
    }

    draw_instructions(surface, game.mode, area.y + area.h);
}

fn draw_paddle(surface: &mut dyn Surface, paddle: &Paddle, left_side: bool) {
    let r = pixels(paddle.rect());

    surface.set_color(WHITE);
    surface.fill_rect(r);
    surface.set_color(RIM);
    surface.draw_rect(r);

    surface.set_color(GROOVE);
    let center_y = r.y + r.h / 2;
    for i in -1..=1 {
        surface.fill_rect(PixelRect::new(r.x + 2, center_y + i * 6, r.w - 4, 1));
    }

    let (color, x) = if left_side {
        (LEFT_SIDE, r.x - 8)
    } else {
        (RIGHT_SIDE, r.x + r.w + 3)
    };
    surface.set_color(color);
    surface.fill_rect(PixelRect::new(x, center_y - 3, 5, 6));
}

fn draw_ball(surface: &mut dyn Surface, ball: &Ball) {
    let r = pixels(ball.rect());

    surface.set_color(WHITE);
    surface.fill_rect(r);
    surface.set_color(RIM);
    surface.draw_rect(r);

    surface.set_color(WHITE);
    surface.fill_rect(PixelRect::new(r.x + r.w / 2 - 1, r.y + r.h / 2 - 1, 2, 2));
}

fn draw_scoreboard(surface: &mut dyn Surface, game: &Game) {
    let center_x = (CANVAS_WIDTH / 2.0) as i32;
    let board = PixelRect::new(center_x - 100, 15, 200, 50);

    surface.set_color(Rgba::rgba(0, 0, 0, 200));
    surface.fill_rect(board);
    surface.set_color(FRAME);
    surface.draw_rect(board);

    surface.set_color(WHITE);
    surface.fill_rect(PixelRect::new(center_x - 1, 20, 2, 40));

    let (left, right) = game.side_labels();
    surface.set_color(LABEL);
    surface.draw_text(center_x - 90, 25, left);
    surface.draw_text(center_x + 50, 25, right);

    surface.set_color(LEFT_SIDE);
    glyph::draw_number(surface, game.score.left, center_x - 60, 35);
    surface.set_color(RIGHT_SIDE);
    glyph::draw_number(surface, game.score.right, center_x + 30, 35);
}

fn draw_music_indicator(surface: &mut dyn Surface) {
    let right = CANVAS_WIDTH as i32;
    surface.set_color(LEFT_SIDE);
    surface.draw_rect(PixelRect::new(right - 30, 10, 20, 15));
    surface.fill_rect(PixelRect::new(right - 28, 12, 3, 3));
    surface.fill_rect(PixelRect::new(right - 20, 15, 3, 3));
    surface.fill_rect(PixelRect::new(right - 12, 12, 3, 3));
}

fn draw_instructions(surface: &mut dyn Surface, mode: GameMode, field_bottom: i32) {
    let width = CANVAS_WIDTH as i32;
    let bar = PixelRect::new(10, field_bottom + 10, width - 20, 40);

    surface.set_color(Rgba::rgba(0, 0, 0, 180));
    surface.fill_rect(bar);
    surface.set_color(FRAME);
    surface.draw_rect(bar);

    let text = match mode {
        GameMode::SinglePlayer => "W/S: Move   M: Music   +/-: Volume   ESC: Menu",
        _ => "P1: W/S   P2: Arrows   M: Music   +/-: Volume   ESC: Menu",
    };
    surface.set_color(LABEL);
    surface.draw_text(20, field_bottom + 20, text);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::AudioManager;
    use crate::config::Config;
    use crate::game::Score;
    use crate::ui::surface::Recorder;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use std::time::Instant;

    fn game_in(mode_keys: &[KeyCode]) -> Game {
        let mut game = Game::new(Config::default(), AudioManager::silent(), true);
        for code in mode_keys {
            game.on_key(KeyEvent::new(*code, KeyModifiers::NONE), Instant::now());
        }
        game
    }

    #[test]
    fn single_player_labels_and_instructions() {
        let game = game_in(&[KeyCode::Down, KeyCode::Enter]);
        let mut rec = Recorder::default();
        draw_court(&mut rec, &game);
        assert!(rec.has_text("PLAYER"));
        assert!(rec.has_text("AI"));
        assert!(rec.has_text("W/S: Move"));
        assert!(!rec.has_text("P2"));
    }

    #[test]
    fn multiplayer_labels_and_instructions() {
        let game = game_in(&[KeyCode::Enter]);
        let mut rec = Recorder::default();
        draw_court(&mut rec, &game);
        assert!(rec.has_text("P1"));
        assert!(rec.has_text("P2: Arrows"));
    }

    #[test]
    fn paddles_carry_side_colored_indicators() {
        let game = game_in(&[KeyCode::Enter]);
        let mut rec = Recorder::default();
        draw_court(&mut rec, &game);

        let left_mark = PixelRect::new(game.left.x as i32 - 8, game.left.center_y() as i32 - 3, 5, 6);
        assert!(rec.fills.contains(&(LEFT_SIDE, left_mark)));
        let right_x = (game.right.x + game.right.width) as i32 + 3;
        let right_mark = PixelRect::new(right_x, game.right.center_y() as i32 - 3, 5, 6);
        assert!(rec.fills.contains(&(RIGHT_SIDE, right_mark)));
    }

    #[test]
    fn no_music_indicator_while_silent() {
        let game = game_in(&[KeyCode::Enter]);
        let mut rec = Recorder::default();
        draw_court(&mut rec, &game);
        let indicator = PixelRect::new(770, 10, 20, 15);
        assert!(!rec.outlines.iter().any(|(_, r)| *r == indicator));
    }

    #[test]
    fn scores_are_drawn_in_side_colors() {
        let mut game = game_in(&[KeyCode::Enter]);
        game.score = Score { left: 8, right: 1 };
        let mut rec = Recorder::default();
        draw_court(&mut rec, &game);
        // Each side colour is also used once by its paddle indicator.
        let green = rec.fills.iter().filter(|(c, _)| *c == LEFT_SIDE).count();
        let red = rec.fills.iter().filter(|(c, _)| *c == RIGHT_SIDE).count();
        assert_eq!(green, 7 + 1);
        assert_eq!(red, 2 + 1);
    }
}
