use crate::ui::surface::{PixelRect, Surface};

const DIGIT_WIDTH: i32 = 15;
const DIGIT_GAP: i32 = 5;

// Segment order: top, top-right, bottom-right, bottom, bottom-left, top-left, middle.
const SEGMENTS: [[bool; 7]; 10] = [
    [true, true, true, true, true, true, false],
    [false, true, true, false, false, false, false],
    [true, true, false, true, true, false, true],
    [true, true, true, true, false, false, true],
    [false, true, true, false, false, true, true],
    [true, false, true, true, false, true, true],
    [true, false, true, true, true, true, true],
    [true, true, true, false, false, false, false],
    [true, true, true, true, true, true, true],
    [true, true, true, true, false, true, true],
];

fn segment_rect(segment: usize, x: i32, y: i32) -> PixelRect {
    match segment {
        0 => PixelRect::new(x, y, 15, 2),
        1 => PixelRect::new(x + 13, y, 2, 8),
        2 => PixelRect::new(x + 13, y + 10, 2, 8),
        3 => PixelRect::new(x, y + 16, 15, 2),
        4 => PixelRect::new(x, y + 10, 2, 8),
        5 => PixelRect::new(x, y, 2, 8),
        _ => PixelRect::new(x, y + 8, 15, 2),
    }
}

/// Draws one seven-segment digit with its top-left corner at (x, y).
pub fn draw_digit(surface: &mut dyn Surface, digit: u32, x: i32, y: i32) {
    let lit = SEGMENTS[(digit % 10) as usize];
    for (segment, on) in lit.iter().enumerate() {
        if *on {
            surface.fill_rect(segment_rect(segment, x, y));
        }
    }
}

/// Draws `number` at `x`. Multi-digit numbers start one glyph to the left,
/// with the last digit at `x + DIGIT_GAP`.
pub fn draw_number(surface: &mut dyn Surface, number: u32, x: i32, y: i32) {
    let digits: Vec<u32> = number
        .to_string()
        .chars()
        .filter_map(|c| c.to_digit(10))
        .collect();
    if let [digit] = digits.as_slice() {
        draw_digit(surface, *digit, x, y);
        return;
    }
    let count = digits.len() as i32;
    let last_x = x + DIGIT_GAP;
    for (i, digit) in digits.into_iter().enumerate() {
        let offset = (count - 1 - i as i32) * (DIGIT_WIDTH + DIGIT_GAP);
        draw_digit(surface, digit, last_x - offset, y);
    }
}

/// Block letters spelling PONG, centered on `center_x`.
pub fn draw_title(surface: &mut dyn Surface, center_x: i32, top: i32) {
    let x = center_x;
    let y = top;
    let bars = [
        // P
        PixelRect::new(x - 120, y, 25, 5),
        PixelRect::new(x - 120, y, 5, 60),
        PixelRect::new(x - 120, y + 25, 20, 5),
        PixelRect::new(x - 100, y, 5, 30),
        // O
        PixelRect::new(x - 80, y, 25, 5),
        PixelRect::new(x - 80, y + 55, 25, 5),
        PixelRect::new(x - 80, y, 5, 60),
        PixelRect::new(x - 60, y, 5, 60),
        // N
        PixelRect::new(x - 40, y, 5, 60),
        PixelRect::new(x - 20, y, 5, 60),
        PixelRect::new(x - 40, y + 10, 25, 5),
        // G
        PixelRect::new(x + 20, y, 25, 5),
        PixelRect::new(x + 20, y + 55, 25, 5),
        PixelRect::new(x + 20, y, 5, 60),
        PixelRect::new(x + 40, y + 25, 5, 35),
        PixelRect::new(x + 35, y + 25, 10, 5),
    ];
    for bar in bars {
        surface.fill_rect(bar);
    }
}
