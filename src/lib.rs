//! Maze Roll - steer a ball through a collapsing maze
//!
//! Core modules:
//! - `maze`: Deterministic maze generation (randomized depth-first carving)
//! - `scene`: Translation of the maze into physics bodies + game state machine
//! - `settings`: Grid/window/seed configuration, persisted as JSON

pub mod maze;
pub mod scene;
pub mod settings;

pub use maze::{Direction, Maze, MazeError};
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Thickness of an inner maze wall, in pixels
    pub const WALL_THICKNESS: f32 = 5.0;
    /// Thickness of the viewport border walls, in pixels
    pub const BORDER_THICKNESS: f32 = 2.0;
    /// Goal side length as a fraction of the cell size
    pub const GOAL_SCALE: f32 = 0.7;
    /// Ball radius as a fraction of the smaller cell dimension
    pub const BALL_RADIUS_RATIO: f32 = 0.25;

    /// Velocity added per steering key press (px/s).
    /// Equivalent to 5 px/frame at 60 fps.
    pub const STEER_DELTA: f32 = 300.0;
    /// Downward gravity applied once the goal is reached (px/s²)
    pub const GRAVITY_Y: f32 = 600.0;
    /// Damping on the ball so steering stays controllable
    pub const BALL_DAMPING: f32 = 0.6;
}

/// Center of cell `(row, col)` given the per-cell pixel size
#[inline]
pub fn cell_center(unit: Vec2, row: usize, col: usize) -> Vec2 {
    Vec2::new(
        col as f32 * unit.x + unit.x / 2.0,
        row as f32 * unit.y + unit.y / 2.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_center() {
        let unit = Vec2::new(40.0, 30.0);
        assert_eq!(cell_center(unit, 0, 0), Vec2::new(20.0, 15.0));
        assert_eq!(cell_center(unit, 2, 1), Vec2::new(60.0, 75.0));
    }
}
