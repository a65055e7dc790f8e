use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};

use crate::config::{CANVAS_HEIGHT, CANVAS_WIDTH};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Composites `self` over an opaque `under`.
    fn over(self, under: (u8, u8, u8)) -> (u8, u8, u8) {
        let a = self.a as u16;
        let mix = |top: u8, bottom: u8| ((top as u16 * a + bottom as u16 * (255 - a)) / 255) as u8;
        (mix(self.r, under.0), mix(self.g, under.1), mix(self.b, under.2))
    }
}

/// A rectangle in canvas pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl PixelRect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }
}

/// Everything the game needs from a renderer: a current draw color, filled
/// and outlined rectangles, and a line of text.
pub trait Surface {
    fn set_color(&mut self, color: Rgba);
    /// Paints the whole surface with the current color.
    fn clear(&mut self);
    fn fill_rect(&mut self, rect: PixelRect);
    fn draw_rect(&mut self, rect: PixelRect);
    fn draw_text(&mut self, x: i32, y: i32, text: &str);
}

/// Draws the 800x600 canvas scaled onto a region of a terminal buffer, one
/// cell per scaled pixel block.
pub struct TermSurface<'a> {
    buf: &'a mut Buffer,
    area: Rect,
    color: Rgba,
}

impl<'a> TermSurface<'a> {
    pub fn new(buf: &'a mut Buffer, area: Rect) -> Self {
        Self {
            buf,
            area,
            color: Rgba::rgb(0, 0, 0),
        }
    }

    fn col(&self, x: f32) -> i32 {
        (x * self.area.width as f32 / CANVAS_WIDTH).floor() as i32
    }

    fn row(&self, y: f32) -> i32 {
        (y * self.area.height as f32 / CANVAS_HEIGHT).floor() as i32
    }

    fn col_end(&self, x: f32) -> i32 {
        (x * self.area.width as f32 / CANVAS_WIDTH).ceil() as i32
    }

    fn row_end(&self, y: f32) -> i32 {
        (y * self.area.height as f32 / CANVAS_HEIGHT).ceil() as i32
    }

    /// Cell span covered by `rect`, at least one cell each way.
    fn cells(&self, rect: PixelRect) -> Option<(i32, i32, i32, i32)> {
        if rect.w <= 0 || rect.h <= 0 {
            return None;
        }
        let x0 = self.col(rect.x as f32);
        let y0 = self.row(rect.y as f32);
        let x1 = self.col_end((rect.x + rect.w) as f32).max(x0 + 1);
        let y1 = self.row_end((rect.y + rect.h) as f32).max(y0 + 1);
        Some((x0, y0, x1, y1))
    }

    fn paint(&mut self, col: i32, row: i32) {
        if col < 0 || row < 0 || col >= self.area.width as i32 || row >= self.area.height as i32 {
            return;
        }
        let x = self.area.x + col as u16;
        let y = self.area.y + row as u16;
        let color = self.color;
        if let Some(cell) = self.buf.cell_mut((x, y)) {
            let under = match cell.bg {
                Color::Rgb(r, g, b) => (r, g, b),
                _ => (0, 0, 0),
            };
            let (r, g, b) = color.over(under);
            cell.set_symbol(" ");
            cell.set_bg(Color::Rgb(r, g, b));
        }
    }
}

impl Surface for TermSurface<'_> {
    fn set_color(&mut self, color: Rgba) {
        self.color = color;
    }

    fn clear(&mut self) {
        for row in 0..self.area.height as i32 {
            for col in 0..self.area.width as i32 {
                self.paint(col, row);
            }
        }
    }

    fn fill_rect(&mut self, rect: PixelRect) {
        let Some((x0, y0, x1, y1)) = self.cells(rect) else { return };
        for row in y0..y1 {
            for col in x0..x1 {
                self.paint(col, row);
            }
        }
    }

    fn draw_rect(&mut self, rect: PixelRect) {
        let Some((x0, y0, x1, y1)) = self.cells(rect) else { return };
        for col in x0..x1 {
            self.paint(col, y0);
            self.paint(col, y1 - 1);
        }
        for row in y0..y1 {
            self.paint(x0, row);
            self.paint(x1 - 1, row);
        }
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str) {
        let col = self.col(x as f32);
        let row = self.row(y as f32);
        if col < 0 || row < 0 || col >= self.area.width as i32 || row >= self.area.height as i32 {
            return;
        }
        let max_width = (self.area.width as i32 - col) as usize;
        let style = Style::default().fg(Color::Rgb(self.color.r, self.color.g, self.color.b));
        self.buf.set_stringn(
            self.area.x + col as u16,
            self.area.y + row as u16,
            text,
            max_width,
            style,
        );
    }
}

/// Records draw calls so scenes can be checked without a terminal.
#[cfg(test)]
#[derive(Default)]
pub struct Recorder {
    pub color: Option<Rgba>,
    pub fills: Vec<(Rgba, PixelRect)>,
    pub outlines: Vec<(Rgba, PixelRect)>,
    pub texts: Vec<(Rgba, String)>,
    pub clears: usize,
}

#[cfg(test)]
impl Recorder {
    fn current(&self) -> Rgba {
        self.color.unwrap_or(Rgba::rgb(0, 0, 0))
    }

    pub fn has_text(&self, needle: &str) -> bool {
        self.texts.iter().any(|(_, t)| t.contains(needle))
    }
}

#[cfg(test)]
impl Surface for Recorder {
    fn set_color(&mut self, color: Rgba) {
        self.color = Some(color);
    }

    fn clear(&mut self) {
        self.clears += 1;
    }

    fn fill_rect(&mut self, rect: PixelRect) {
        let c = self.current();
        self.fills.push((c, rect));
    }

    fn draw_rect(&mut self, rect: PixelRect) {
        let c = self.current();
        self.outlines.push((c, rect));
    }

    fn draw_text(&mut self, _x: i32, _y: i32, text: &str) {
        let c = self.current();
        self.texts.push((c, text.to_string()));
    }
}
