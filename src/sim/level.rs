//! Hand-authored level layouts
//!
//! Each level is a pure function of its number: a brick set plus the speed
//! the ball is served at. Positions are reproduced exactly, including the
//! level 2 pyramid overhanging both window edges.

use glam::Vec2;

use super::collision::Rect;
use super::state::{Color, GameObject};
use crate::consts::*;

/// Bricks and serve speed for one level
#[derive(Debug, Clone, PartialEq)]
pub struct LevelLayout {
    pub bricks: Vec<GameObject>,
    pub ball_speed: Vec2,
}

/// Serve speed for any level without its own
pub const DEFAULT_BALL_SPEED: Vec2 = Vec2::new(5.0, -5.0);

const GRID_PALETTE: [Color; 5] = [
    Color::RED,
    Color::GREEN,
    Color::BLUE,
    Color::YELLOW,
    Color::MAGENTA,
];
const PYRAMID_PALETTE: [Color; 3] = [Color::ORANGE, Color::PURPLE, Color::CYAN];
const CHECKER_PALETTE: [Color; 3] = [Color::RED, Color::WHITE, Color::BLUE];

/// Columns in the widest (first) row of the pyramid
const PYRAMID_COLUMNS: i32 = 12;

/// Layout for `level`; levels outside 1..=MAX_LEVELS have no bricks
pub fn level_layout(level: u32) -> LevelLayout {
    match level {
        1 => grid(),
        2 => pyramid(),
        3 => checkerboard(),
        _ => LevelLayout {
            bricks: Vec::new(),
            ball_speed: DEFAULT_BALL_SPEED,
        },
    }
}

/// Fresh, fully active brick set for `level`
pub fn create_bricks(level: u32) -> Vec<GameObject> {
    level_layout(level).bricks
}

fn brick(col: i32, row: i32, origin_x: f32, origin_y: f32, color: Color) -> GameObject {
    GameObject::with_color(
        Rect::new(
            col as f32 * (BRICK_WIDTH + BRICK_GAP) + origin_x,
            row as f32 * (BRICK_HEIGHT + BRICK_GAP) + origin_y,
            BRICK_WIDTH,
            BRICK_HEIGHT,
        ),
        color,
    )
}

/// Level 1: 5 rows of 8, one color per row
fn grid() -> LevelLayout {
    let mut bricks = Vec::with_capacity(40);
    for row in 0..5 {
        for col in 0..8 {
            bricks.push(brick(col, row, 60.0, 50.0, GRID_PALETTE[row as usize]));
        }
    }
    LevelLayout {
        bricks,
        ball_speed: DEFAULT_BALL_SPEED,
    }
}

/// Level 2: 6-row inverted pyramid, the full 12-column span centered
fn pyramid() -> LevelLayout {
    // Integer centering: (800 - 12 * 82) / 2 = -92
    let span = PYRAMID_COLUMNS * (BRICK_WIDTH + BRICK_GAP) as i32;
    let start_x = ((WINDOW_WIDTH as i32 - span) / 2) as f32;

    let mut bricks = Vec::with_capacity(42);
    for row in 0..6 {
        for col in row..PYRAMID_COLUMNS - row {
            let color = PYRAMID_PALETTE[(row % 3) as usize];
            bricks.push(brick(col, row, start_x, 50.0, color));
        }
    }
    LevelLayout {
        bricks,
        ball_speed: Vec2::new(6.0, -6.0),
    }
}

/// Level 3: 7x10 checkerboard
fn checkerboard() -> LevelLayout {
    let mut bricks = Vec::with_capacity(35);
    for row in 0..7 {
        for col in 0..10 {
            if (row + col) % 2 == 0 {
                let color = CHECKER_PALETTE[(row % 3) as usize];
                bricks.push(brick(col, row, 40.0, 30.0, color));
            }
        }
    }
    LevelLayout {
        bricks,
        ball_speed: Vec2::new(7.0, -7.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brick_counts() {
        assert_eq!(create_bricks(1).len(), 40);
        assert_eq!(create_bricks(2).len(), 42);
        assert_eq!(create_bricks(3).len(), 35);
    }

    #[test]
    fn test_all_bricks_start_active() {
        for level in 1..=MAX_LEVELS {
            assert!(create_bricks(level).iter().all(|b| b.active));
        }
    }

    #[test]
    fn test_ball_speeds() {
        assert_eq!(level_layout(1).ball_speed, Vec2::new(5.0, -5.0));
        assert_eq!(level_layout(2).ball_speed, Vec2::new(6.0, -6.0));
        assert_eq!(level_layout(3).ball_speed, Vec2::new(7.0, -7.0));
    }

    #[test]
    fn test_out_of_range_levels_are_empty() {
        assert!(create_bricks(0).is_empty());
        assert!(create_bricks(4).is_empty());
        assert_eq!(level_layout(4).ball_speed, DEFAULT_BALL_SPEED);
    }

    #[test]
    fn test_grid_positions() {
        let bricks = create_bricks(1);
        assert_eq!(bricks[0].rect, Rect::new(60.0, 50.0, 80.0, 30.0));
        // Last brick of the first row
        assert_eq!(bricks[7].rect, Rect::new(634.0, 50.0, 80.0, 30.0));
        // First brick of the last row
        assert_eq!(bricks[32].rect, Rect::new(60.0, 178.0, 80.0, 30.0));
        assert_eq!(bricks[0].color, Color::RED);
        assert_eq!(bricks[8].color, Color::GREEN);
        assert_eq!(bricks[39].color, Color::MAGENTA);
    }

    #[test]
    fn test_pyramid_positions() {
        let bricks = create_bricks(2);
        // Row 0 spans columns 0..12 starting at x = -92
        assert_eq!(bricks[0].rect, Rect::new(-92.0, 50.0, 80.0, 30.0));
        assert_eq!(bricks[11].rect.x, -92.0 + 11.0 * 82.0);
        // Row 1 starts at column 1
        assert_eq!(bricks[12].rect, Rect::new(-10.0, 82.0, 80.0, 30.0));
        // Row 5 has columns 5 and 6 only
        let last_row: Vec<_> = bricks.iter().filter(|b| b.rect.y == 50.0 + 5.0 * 32.0).collect();
        assert_eq!(last_row.len(), 2);
        assert_eq!(last_row[0].rect.x, -92.0 + 5.0 * 82.0);

        assert_eq!(bricks[0].color, Color::ORANGE);
        assert_eq!(bricks[12].color, Color::PURPLE);
        assert_eq!(last_row[0].color, Color::CYAN);
    }

    #[test]
    fn test_pyramid_rows() {
        let bricks = create_bricks(2);
        for row in 0..6 {
            let y = 50.0 + row as f32 * 32.0;
            let count = bricks.iter().filter(|b| b.rect.y == y).count();
            assert_eq!(count, 12 - 2 * row);
        }
    }

    #[test]
    fn test_checkerboard_positions() {
        let bricks = create_bricks(3);
        assert_eq!(bricks[0].rect, Rect::new(40.0, 30.0, 80.0, 30.0));
        // Row 1 starts at column 1
        assert_eq!(bricks[5].rect, Rect::new(122.0, 62.0, 80.0, 30.0));
        for b in &bricks {
            let col = ((b.rect.x - 40.0) / 82.0).round() as i32;
            let row = ((b.rect.y - 30.0) / 32.0).round() as i32;
            assert_eq!((row + col) % 2, 0);
        }
        assert_eq!(bricks[0].color, Color::RED);
        assert_eq!(bricks[5].color, Color::WHITE);
        assert_eq!(bricks[10].color, Color::BLUE);
    }
}
