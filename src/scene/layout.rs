//! Pure pixel geometry for a carved maze.
//!
//! Scales the maze's boolean matrices by the per-cell pixel size: one static
//! rectangle per closed edge, four border rectangles framing the viewport, a
//! goal at the bottom-right cell and the ball at the top-left cell. No engine
//! types here so the whole layer is testable without a physics world.

use glam::Vec2;

use super::BodyLabel;
use crate::cell_center;
use crate::consts::{BALL_RADIUS_RATIO, BORDER_THICKNESS, GOAL_SCALE, WALL_THICKNESS};
use crate::maze::Maze;

/// A static rectangle body (border or inner wall)
#[derive(Debug, Clone, Copy)]
pub struct WallSpec {
    pub center: Vec2,
    pub half_extents: Vec2,
    pub label: BodyLabel,
}

/// The goal rectangle at the bottom-right cell
#[derive(Debug, Clone, Copy)]
pub struct GoalSpec {
    pub center: Vec2,
    pub half_extents: Vec2,
}

/// The dynamic ball at the top-left cell
#[derive(Debug, Clone, Copy)]
pub struct BallSpec {
    pub center: Vec2,
    pub radius: f32,
}

/// All body specs for one maze in one viewport
#[derive(Debug, Clone)]
pub struct MazeLayout {
    pub walls: Vec<WallSpec>,
    pub goal: GoalSpec,
    pub ball: BallSpec,
    /// Per-cell pixel size: `(viewport_width / cols, viewport_height / rows)`
    pub unit: Vec2,
    pub viewport: Vec2,
}

impl MazeLayout {
    pub fn new(maze: &Maze, viewport: Vec2) -> Self {
        let unit = Vec2::new(
            viewport.x / maze.cols() as f32,
            viewport.y / maze.rows() as f32,
        );

        let mut walls = Vec::new();
        push_borders(&mut walls, viewport);
        push_inner_walls(&mut walls, maze, unit);

        let goal = GoalSpec {
            center: cell_center(unit, maze.rows() - 1, maze.cols() - 1),
            half_extents: unit * GOAL_SCALE / 2.0,
        };
        let ball = BallSpec {
            center: cell_center(unit, 0, 0),
            radius: unit.min_element() * BALL_RADIUS_RATIO,
        };

        Self {
            walls,
            goal,
            ball,
            unit,
            viewport,
        }
    }

    /// Number of inner (collapsible) walls
    pub fn inner_wall_count(&self) -> usize {
        self.walls
            .iter()
            .filter(|wall| wall.label == BodyLabel::Wall)
            .count()
    }
}

fn push_borders(walls: &mut Vec<WallSpec>, viewport: Vec2) {
    let half_thickness = BORDER_THICKNESS / 2.0;
    let centers_and_halves = [
        // top, bottom
        (
            Vec2::new(viewport.x / 2.0, 0.0),
            Vec2::new(viewport.x / 2.0, half_thickness),
        ),
        (
            Vec2::new(viewport.x / 2.0, viewport.y),
            Vec2::new(viewport.x / 2.0, half_thickness),
        ),
        // left, right
        (
            Vec2::new(0.0, viewport.y / 2.0),
            Vec2::new(half_thickness, viewport.y / 2.0),
        ),
        (
            Vec2::new(viewport.x, viewport.y / 2.0),
            Vec2::new(half_thickness, viewport.y / 2.0),
        ),
    ];
    for (center, half_extents) in centers_and_halves {
        walls.push(WallSpec {
            center,
            half_extents,
            label: BodyLabel::Border,
        });
    }
}

fn push_inner_walls(walls: &mut Vec<WallSpec>, maze: &Maze, unit: Vec2) {
    let half_thickness = WALL_THICKNESS / 2.0;

    // Closed horizontal edges: a wall segment below cell (row, col)
    for row in 0..maze.rows() - 1 {
        for col in 0..maze.cols() {
            if maze.is_horizontal_open(row, col) {
                continue;
            }
            walls.push(WallSpec {
                center: Vec2::new(
                    col as f32 * unit.x + unit.x / 2.0,
                    row as f32 * unit.y + unit.y,
                ),
                half_extents: Vec2::new(unit.x / 2.0, half_thickness),
                label: BodyLabel::Wall,
            });
        }
    }

    // Closed vertical edges: a wall segment right of cell (row, col)
    for row in 0..maze.rows() {
        for col in 0..maze.cols() - 1 {
            if maze.is_vertical_open(row, col) {
                continue;
            }
            walls.push(WallSpec {
                center: Vec2::new(
                    col as f32 * unit.x + unit.x,
                    row as f32 * unit.y + unit.y / 2.0,
                ),
                half_extents: Vec2::new(half_thickness, unit.y / 2.0),
                label: BodyLabel::Wall,
            });
        }
    }
}
