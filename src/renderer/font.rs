//! Built-in 5x7 bitmap font
//!
//! Each glyph is seven rows of five bits (bit 4 is the leftmost column).
//! Text is emitted as one quad per lit pixel.

use glam::Vec2;

use super::shapes;
use super::vertex::Vertex;

pub const GLYPH_WIDTH: usize = 5;
pub const GLYPH_HEIGHT: usize = 7;
/// Columns advanced per character (glyph plus one blank column)
const ADVANCE: f32 = 6.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

/// Bitmap rows for a character; lowercase maps to uppercase
pub fn glyph(c: char) -> Option<[u8; GLYPH_HEIGHT]> {
    let rows = match c.to_ascii_uppercase() {
        'A' => [0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'B' => [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E],
        'C' => [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E],
        'D' => [0x1E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x1E],
        'E' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F],
        'F' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10],
        'G' => [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0F],
        'H' => [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'I' => [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E],
        'J' => [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0C],
        'K' => [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11],
        'L' => [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F],
        'M' => [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11],
        'N' => [0x11, 0x11, 0x19, 0x15, 0x13, 0x11, 0x11],
        'O' => [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'P' => [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10],
        'Q' => [0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D],
        'R' => [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11],
        'S' => [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E],
        'T' => [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04],
        'U' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'V' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04],
        'W' => [0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0A],
        'X' => [0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11],
        'Y' => [0x11, 0x11, 0x11, 0x0A, 0x04, 0x04, 0x04],
        'Z' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F],
        '0' => [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
        '1' => [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
        '2' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
        '3' => [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E],
        '4' => [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
        '5' => [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
        '6' => [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
        '7' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
        '8' => [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
        '9' => [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
        ':' => [0x00, 0x0C, 0x0C, 0x00, 0x0C, 0x0C, 0x00],
        '-' => [0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00],
        '/' => [0x01, 0x01, 0x02, 0x04, 0x08, 0x10, 0x10],
        '.' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x0C],
        '!' => [0x04, 0x04, 0x04, 0x04, 0x04, 0x00, 0x04],
        '=' => [0x00, 0x00, 0x1F, 0x00, 0x1F, 0x00, 0x00],
        '+' => [0x00, 0x04, 0x04, 0x1F, 0x04, 0x04, 0x00],
        '?' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x00, 0x04],
        ' ' => [0x00; GLYPH_HEIGHT],
        _ => return None,
    };
    Some(rows)
}

/// Width of `text` in world units at pixel size `px`
pub fn text_width(text: &str, px: f32) -> f32 {
    let n = text.chars().count() as f32;
    if n == 0.0 { 0.0 } else { (n * ADVANCE - 1.0) * px }
}

/// Emit `text` with its vertical center on `anchor.y`.
///
/// Unknown characters render as `?`.
pub fn text(out: &mut Vec<Vertex>, text: &str, anchor: Vec2, px: f32, align: Align, color: [f32; 4]) {
    let left = match align {
        Align::Left => anchor.x,
        Align::Center => anchor.x - text_width(text, px) / 2.0,
    };
    let top = anchor.y + GLYPH_HEIGHT as f32 * px / 2.0;
    let cell = Vec2::splat(px);

    for (i, c) in text.chars().enumerate() {
        let Some(rows) = glyph(c).or_else(|| glyph('?')) else {
            continue;
        };
        let origin_x = left + i as f32 * ADVANCE * px;
        for (row, bits) in rows.iter().enumerate() {
            for col in 0..GLYPH_WIDTH {
                if bits & (0x10 >> col) == 0 {
                    continue;
                }
                let center = Vec2::new(
                    origin_x + (col as f32 + 0.5) * px,
                    top - (row as f32 + 0.5) * px,
                );
                shapes::rect(out, center, cell, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(c: char) -> usize {
        glyph(c).unwrap().iter().map(|r| r.count_ones() as usize).sum()
    }

    #[test]
    fn test_lowercase_maps_to_uppercase() {
        assert_eq!(glyph('q'), glyph('Q'));
        assert!(glyph('~').is_none());
    }

    #[test]
    fn test_glyphs_fit_five_columns() {
        for c in ('A'..='Z').chain('0'..='9') {
            for row in glyph(c).unwrap() {
                assert!(row < 0x20, "{c} overflows");
            }
        }
    }

    #[test]
    fn test_one_quad_per_pixel() {
        let mut out = Vec::new();
        text(&mut out, "I1", Vec2::ZERO, 2.0, Align::Left, [1.0; 4]);
        assert_eq!(out.len(), 6 * (lit('I') + lit('1')));
    }

    #[test]
    fn test_centered_text_is_symmetric() {
        let mut out = Vec::new();
        text(&mut out, "HH", Vec2::new(100.0, 0.0), 3.0, Align::Center, [1.0; 4]);
        let min = out.iter().map(|v| v.position[0]).fold(f32::MAX, f32::min);
        let max = out.iter().map(|v| v.position[0]).fold(f32::MIN, f32::max);
        assert!(((min + max) / 2.0 - 100.0).abs() < 1e-3);
        assert!((max - min - text_width("HH", 3.0)).abs() < 1e-3);
    }

    #[test]
    fn test_unknown_char_falls_back() {
        let mut out = Vec::new();
        text(&mut out, "~", Vec2::ZERO, 1.0, Align::Left, [1.0; 4]);
        assert_eq!(out.len(), 6 * lit('?'));
    }
}
