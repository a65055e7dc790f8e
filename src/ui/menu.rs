use crate::config::{CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::game::mode::MenuOption;
use crate::ui::glyph;
use crate::ui::surface::{PixelRect, Rgba, Surface};

const BACKGROUND: Rgba = Rgba::rgb(0, 0, 0);
const TITLE: Rgba = Rgba::rgb(255, 255, 0);
const HIGHLIGHT: Rgba = Rgba::rgb(0, 100, 200);
const SELECTED_TEXT: Rgba = Rgba::rgb(255, 255, 255);
const IDLE_TEXT: Rgba = Rgba::rgb(180, 180, 180);
const HINT_TEXT: Rgba = Rgba::rgb(150, 150, 150);

const ROW_SPACING: i32 = 60;

pub fn draw_menu(surface: &mut dyn Surface, selected: MenuOption) {
    let center_x = (CANVAS_WIDTH / 2.0) as i32;
    let height = CANVAS_HEIGHT as i32;

    surface.set_color(BACKGROUND);
    surface.clear();

    surface.set_color(TITLE);
    glyph::draw_title(surface, center_x, 100);

    let x = center_x - 120;
    let start_y = height / 2 - 50;
    for option in MenuOption::all() {
        let y = start_y + option.index() as i32 * ROW_SPACING;
        draw_option(surface, option.label(), x, y, *option == selected);
    }

    surface.set_color(HINT_TEXT);
    surface.draw_text(center_x - 80, height - 80, "Arrows: Navigate");
    surface.draw_text(center_x - 80, height - 60, "ENTER: Select");
    surface.draw_text(center_x - 80, height - 40, "ESC: Quit");
}

fn draw_option(surface: &mut dyn Surface, label: &str, x: i32, y: i32, selected: bool) {
    if selected {
        surface.set_color(HIGHLIGHT);
        surface.fill_rect(PixelRect::new(x - 20, y - 10, 320, 40));

        surface.set_color(TITLE);
        surface.fill_rect(PixelRect::new(x - 15, y + 10, 10, 5));
    }

    surface.set_color(if selected { SELECTED_TEXT } else { IDLE_TEXT });
    surface.draw_text(x + 20, y + 10, label);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::surface::Recorder;

    #[test]
    fn highlights_only_the_selected_row() {
        let mut rec = Recorder::default();
        draw_menu(&mut rec, MenuOption::VersusAi);

        let highlights: Vec<_> = rec.fills.iter().filter(|(c, _)| *c == HIGHLIGHT).collect();
        assert_eq!(highlights.len(), 1);
        // Second row.
        assert_eq!(highlights[0].1.y, 600 / 2 - 50 + ROW_SPACING - 10);

        let bright: Vec<_> = rec.texts.iter().filter(|(c, _)| *c == SELECTED_TEXT).collect();
        assert_eq!(bright.len(), 1);
        assert_eq!(bright[0].1, "PLAY VS AI");
    }

    #[test]
    fn shows_title_and_controls() {
        let mut rec = Recorder::default();
        draw_menu(&mut rec, MenuOption::Multiplayer);
        assert_eq!(rec.clears, 1);
        assert!(rec.fills.iter().any(|(c, _)| *c == TITLE));
        assert!(rec.has_text("MULTIPLAYER"));
        assert!(rec.has_text("ENTER"));
        assert!(rec.has_text("ESC"));
    }
}
