//! Randomized depth-first carving ("recursive backtracker").
//!
//! The traversal visits every cell exactly once, opening a wall only toward a
//! cell that has not been visited yet, so the open edges form a spanning
//! tree by construction. The recursion of the textbook algorithm is replaced
//! by an explicit stack; memory stays bounded on large grids and the visiting
//! order is unchanged.

use rand::Rng;
use rand::seq::SliceRandom;

use super::grid::Maze;

/// The four grid directions, also used for steering the ball.
///
/// Rows grow downward, matching screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// `(row delta, col delta)` of a step in this direction
    pub fn offset(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
        }
    }
}

/// An internal grid edge, addressed the way the wall matrices are indexed
#[derive(Debug, Clone, Copy)]
enum Edge {
    /// Between `(row, col)` and `(row, col + 1)`
    Vertical { row: usize, col: usize },
    /// Between `(row, col)` and `(row + 1, col)`
    Horizontal { row: usize, col: usize },
}

/// The edge crossed by stepping from `(row, col)` toward `direction`
fn edge_toward(row: usize, col: usize, direction: Direction) -> Edge {
    match direction {
        Direction::Up => Edge::Horizontal { row: row - 1, col },
        Direction::Down => Edge::Horizontal { row, col },
        Direction::Left => Edge::Vertical { row, col: col - 1 },
        Direction::Right => Edge::Vertical { row, col },
    }
}

/// Carve a spanning tree into `maze`, which must be all-walls and unvisited.
///
/// Equivalent to the recursive traversal: pick a random start cell, and at
/// each visited cell walk the four neighbors in uniformly shuffled order,
/// opening the connecting wall and descending whenever the neighbor is still
/// unvisited. Frames live on an explicit stack; each entry carries the edge
/// to open if its cell is still unvisited when popped, which is exactly the
/// revisit check the recursive version performs on entry.
pub(super) fn carve(maze: &mut Maze, rng: &mut impl Rng) {
    let rows = maze.rows();
    let cols = maze.cols();

    let start_row = rng.random_range(0..rows);
    let start_col = rng.random_range(0..cols);

    let mut stack: Vec<(usize, usize, Option<Edge>)> = vec![(start_row, start_col, None)];

    while let Some((row, col, entry_edge)) = stack.pop() {
        if maze.visited[row][col] {
            // Another branch got here first; leave its wall closed.
            continue;
        }
        maze.visited[row][col] = true;
        if let Some(edge) = entry_edge {
            open(maze, edge);
        }

        let mut directions = Direction::ALL;
        directions.shuffle(rng);

        // Push in reverse shuffled order so the first shuffled direction is
        // popped (and carved) first, preserving depth-first order.
        for &direction in directions.iter().rev() {
            let (row_delta, col_delta) = direction.offset();
            let next_row = row as isize + row_delta;
            let next_col = col as isize + col_delta;
            if next_row < 0 || next_row >= rows as isize || next_col < 0 || next_col >= cols as isize
            {
                continue;
            }
            let (next_row, next_col) = (next_row as usize, next_col as usize);
            if maze.visited[next_row][next_col] {
                continue;
            }
            let edge = edge_toward(row, col, direction);
            stack.push((next_row, next_col, Some(edge)));
        }
    }
}

fn open(maze: &mut Maze, edge: Edge) {
    match edge {
        Edge::Vertical { row, col } => maze.vertical_open[row][col] = true,
        Edge::Horizontal { row, col } => maze.horizontal_open[row][col] = true,
    }
}
