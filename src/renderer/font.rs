//! Bitmap font loaded from a bundled text asset
//!
//! Asset format: a `glyph <char>` header (`glyph space` for ' ') followed by
//! one line per pixel row, `#` lit and `.` dark. Lines starting with `;` are
//! comments. Every glyph has the same width (at most 8) and height.

use std::collections::HashMap;

use thiserror::Error;

const BUNDLED_FONT: &str = include_str!("../../assets/font5x7.txt");
const MAX_GLYPH_WIDTH: usize = 8;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FontError {
    #[error("line {line}: {msg}")]
    Syntax { line: usize, msg: String },
    #[error("font defines no glyphs")]
    Empty,
}

fn syntax(line: usize, msg: impl Into<String>) -> FontError {
    FontError::Syntax {
        line,
        msg: msg.into(),
    }
}

/// One glyph; bit `col` of `rows[row]` is lit
#[derive(Debug, Clone, Default)]
pub struct Glyph {
    rows: Vec<u8>,
}

impl Glyph {
    #[inline]
    pub fn lit(&self, row: usize, col: usize) -> bool {
        self.rows.get(row).is_some_and(|bits| (bits >> col) & 1 == 1)
    }
}

#[derive(Debug, Clone)]
pub struct BitmapFont {
    width: usize,
    height: usize,
    glyphs: HashMap<char, Glyph>,
}

impl BitmapFont {
    /// The 5x7 font shipped with the game
    pub fn bundled() -> Result<Self, FontError> {
        Self::parse(BUNDLED_FONT)
    }

    pub fn parse(src: &str) -> Result<Self, FontError> {
        let mut width = 0;
        let mut height = 0;
        let mut glyphs = HashMap::new();
        let mut current: Option<(char, usize, Glyph)> = None;

        for (idx, raw) in src.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw.trim_end();
            if line.is_empty() || line.starts_with(';') {
                continue;
            }

            if let Some(name) = line.strip_prefix("glyph ") {
                if let Some((ch, header, glyph)) = current.take() {
                    finish_glyph(&mut glyphs, &mut height, ch, header, glyph)?;
                }
                let name = name.trim();
                let ch = if name == "space" {
                    ' '
                } else {
                    let mut chars = name.chars();
                    match (chars.next(), chars.next()) {
                        (Some(c), None) => c,
                        _ => return Err(syntax(line_no, format!("bad glyph name {name:?}"))),
                    }
                };
                if glyphs.contains_key(&ch) {
                    return Err(syntax(line_no, format!("duplicate glyph {ch:?}")));
                }
                current = Some((ch, line_no, Glyph::default()));
                continue;
            }

            let Some((_, _, glyph)) = current.as_mut() else {
                return Err(syntax(line_no, "pixel row before any glyph header"));
            };

            let row_width = line.chars().count();
            if width == 0 {
                if row_width > MAX_GLYPH_WIDTH {
                    return Err(syntax(line_no, format!("glyphs wider than {MAX_GLYPH_WIDTH}")));
                }
                width = row_width;
            } else if row_width != width {
                return Err(syntax(
                    line_no,
                    format!("row is {row_width} wide, expected {width}"),
                ));
            }

            let mut bits = 0u8;
            for (col, c) in line.chars().enumerate() {
                match c {
                    '#' => bits |= 1 << col,
                    '.' => {}
                    other => return Err(syntax(line_no, format!("unexpected {other:?}"))),
                }
            }
            glyph.rows.push(bits);
        }

        if let Some((ch, header, glyph)) = current.take() {
            finish_glyph(&mut glyphs, &mut height, ch, header, glyph)?;
        }
        if glyphs.is_empty() {
            return Err(FontError::Empty);
        }

        Ok(Self {
            width,
            height,
            glyphs,
        })
    }

    /// Glyph for `ch`; lower case maps to upper case
    pub fn glyph(&self, ch: char) -> Option<&Glyph> {
        self.glyphs.get(&ch.to_ascii_uppercase())
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Horizontal pen advance in font cells (one blank column between glyphs)
    pub fn advance(&self) -> usize {
        self.width + 1
    }
}

fn finish_glyph(
    glyphs: &mut HashMap<char, Glyph>,
    height: &mut usize,
    ch: char,
    header_line: usize,
    glyph: Glyph,
) -> Result<(), FontError> {
    let rows = glyph.rows.len();
    if rows == 0 {
        return Err(syntax(header_line, format!("glyph {ch:?} has no rows")));
    }
    if *height == 0 {
        *height = rows;
    } else if rows != *height {
        return Err(syntax(
            header_line,
            format!("glyph {ch:?} is {rows} rows tall, expected {height}"),
        ));
    }
    glyphs.insert(ch, glyph);
    Ok(())
}
