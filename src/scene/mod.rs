//! Scene assembly: maze topology -> physics bodies -> win detection
//!
//! - `layout`: pure pixel geometry derived from a carved maze
//! - `world`: rapier2d glue (bodies, stepping, steering, collision events)
//! - `state`: the Playing/Won state machine fed by collision label pairs

pub mod layout;
pub mod state;
pub mod world;

pub use layout::{BallSpec, GoalSpec, MazeLayout, WallSpec};
pub use state::{GamePhase, MatchState};
pub use world::PhysicsWorld;

/// Role of a body in the scene; collision pairs are matched on these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyLabel {
    /// Viewport frame; stays fixed even after the win
    Border,
    /// Inner maze wall; turns dynamic when the maze collapses
    Wall,
    /// Target at the bottom-right cell
    Goal,
    /// The player-steered ball
    Ball,
}
