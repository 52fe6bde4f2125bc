//! Shape generation for 2D primitives
//!
//! Everything is emitted in screen space (800x600, y down); the pipeline
//! maps to NDC at upload time.

use super::font::BitmapFont;
use super::vertex::Vertex;
use crate::sim::{Color, Rect};

/// Pixel size of one font cell on screen
pub const TEXT_SCALE: f32 = 2.5;

/// Two triangles covering `rect`
pub fn rect(rect: Rect, color: Color) -> [Vertex; 6] {
    let (x0, y0) = (rect.x, rect.y);
    let (x1, y1) = (rect.right(), rect.bottom());
    [
        Vertex::new(x0, y0, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x1, y1, color),
    ]
}

/// Rectangles for every lit run of `text`, top-left corner at (x, y)
///
/// Adjacent lit cells in a glyph row are merged into a single rectangle.
pub fn text_rects(font: &BitmapFont, text: &str, x: f32, y: f32, scale: f32) -> Vec<Rect> {
    let mut rects = Vec::new();
    let mut pen_x = x;

    for ch in text.chars() {
        if let Some(glyph) = font.glyph(ch) {
            for row in 0..font.height() {
                let mut col = 0;
                while col < font.width() {
                    if !glyph.lit(row, col) {
                        col += 1;
                        continue;
                    }
                    let start = col;
                    while col < font.width() && glyph.lit(row, col) {
                        col += 1;
                    }
                    rects.push(Rect::new(
                        pen_x + start as f32 * scale,
                        y + row as f32 * scale,
                        (col - start) as f32 * scale,
                        scale,
                    ));
                }
            }
        }
        pen_x += font.advance() as f32 * scale;
    }

    rects
}

/// Vertices for `text` in a single color
pub fn text(font: &BitmapFont, text: &str, x: f32, y: f32, color: Color) -> Vec<Vertex> {
    text_rects(font, text, x, y, TEXT_SCALE)
        .into_iter()
        .flat_map(|r| rect(r, color))
        .collect()
}
