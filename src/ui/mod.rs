pub mod court;
pub mod glyph;
pub mod menu;
pub mod surface;

use ratatui::prelude::*;

use crate::game::mode::GameMode;
use crate::game::Game;
use surface::{Surface, TermSurface};

pub fn render(frame: &mut Frame, game: &Game) {
    let area = frame.area();
    let mut surface = TermSurface::new(frame.buffer_mut(), area);
    draw(&mut surface, game);
}

/// Draws the scene for the current mode onto any surface.
pub fn draw(surface: &mut dyn Surface, game: &Game) {
    match game.mode {
        GameMode::Menu => menu::draw_menu(surface, game.selected),
        GameMode::SinglePlayer | GameMode::Multiplayer => court::draw_court(surface, game),
    }
}
