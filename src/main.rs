//! Maze Roll entry point
//!
//! Builds the seeded maze and its physics world, then runs the game loop:
//! WASD steering, physics stepping, win detection, drawing.

use macroquad::prelude::*;

use maze_roll::maze::{Direction, Maze, MazeError};
use maze_roll::scene::{BodyLabel, MatchState, MazeLayout, PhysicsWorld};
use maze_roll::settings::Settings;

/// One maze run: the physics world plus the win-state tracker
struct Game {
    world: PhysicsWorld,
    state: MatchState,
}

impl Game {
    fn new(settings: &Settings, seed: u64) -> Result<Self, MazeError> {
        let maze = Maze::from_seed(settings.rows, settings.cols, seed)?;
        let viewport = ::glam::Vec2::new(
            settings.window_width as f32,
            settings.window_height as f32,
        );
        let layout = MazeLayout::new(&maze, viewport);
        log::info!(
            "Generated {}x{} maze with {} walls (seed {seed})",
            settings.rows,
            settings.cols,
            layout.inner_wall_count(),
        );
        Ok(Self {
            world: PhysicsWorld::new(&layout),
            state: MatchState::new(),
        })
    }
}

fn window_conf(settings: &Settings) -> Conf {
    Conf {
        window_title: "Maze Roll".to_string(),
        window_width: settings.window_width as i32,
        window_height: settings.window_height as i32,
        window_resizable: false,
        high_dpi: true,
        ..Default::default()
    }
}

fn main() {
    env_logger::init();
    let settings = Settings::load();
    let conf = window_conf(&settings);
    macroquad::Window::from_config(conf, run(settings));
}

async fn run(settings: Settings) {
    let seed = settings.resolve_seed();
    log::info!("Maze Roll starting with seed {seed}");

    let mut game = match Game::new(&settings, seed) {
        Ok(game) => game,
        Err(err) => {
            log::error!("Cannot start: {err}");
            return;
        }
    };

    loop {
        if is_key_pressed(KeyCode::R) {
            let seed = settings.resolve_seed();
            log::info!("Restarting with seed {seed}");
            match Game::new(&settings, seed) {
                Ok(next) => game = next,
                Err(err) => log::error!("Restart failed: {err}"),
            }
        }

        for direction in pressed_directions() {
            game.world.steer(direction);
        }

        for (a, b) in game.world.step() {
            if game.state.observe_contact(a, b) {
                log::info!("Goal reached, releasing the maze");
                game.world.set_gravity_down();
                game.world.release_walls();
            }
        }

        draw(&game);
        next_frame().await;
    }
}

/// Directional keys pressed this frame, as discrete key-down events
fn pressed_directions() -> Vec<Direction> {
    let mut directions = Vec::new();
    if is_key_pressed(KeyCode::W) {
        directions.push(Direction::Up);
    }
    if is_key_pressed(KeyCode::D) {
        directions.push(Direction::Right);
    }
    if is_key_pressed(KeyCode::S) {
        directions.push(Direction::Down);
    }
    if is_key_pressed(KeyCode::A) {
        directions.push(Direction::Left);
    }
    directions
}

fn draw(game: &Game) {
    clear_background(BLACK);

    // Draw every body at its physics position so the collapse animates
    // for free once the walls go dynamic.
    for (_, body) in game.world.bodies.iter() {
        let position = body.translation();
        let rotation = body.rotation().angle();

        for &collider_handle in body.colliders() {
            let Some(label) = game.world.label_of(collider_handle) else {
                continue;
            };
            let color = color_for(label);
            let shape = game.world.colliders[collider_handle].shape();

            if let Some(ball) = shape.as_ball() {
                draw_circle(position.x, position.y, ball.radius, color);
            } else if let Some(cuboid) = shape.as_cuboid() {
                let half = cuboid.half_extents;
                draw_rectangle_ex(
                    position.x,
                    position.y,
                    half.x * 2.0,
                    half.y * 2.0,
                    DrawRectangleParams {
                        offset: vec2(0.5, 0.5),
                        rotation,
                        color,
                    },
                );
            }
        }
    }

    if game.state.won() {
        draw_win_banner();
    }
}

fn color_for(label: BodyLabel) -> Color {
    match label {
        BodyLabel::Wall => RED,
        BodyLabel::Border => GRAY,
        BodyLabel::Goal => GREEN,
        BodyLabel::Ball => Color::from_rgba(0x6c, 0xb4, 0xee, 0xff),
    }
}

fn draw_win_banner() {
    let text = "WINNER";
    let dimensions = measure_text(text, None, 96, 1.0);
    draw_text(
        text,
        (screen_width() - dimensions.width) / 2.0,
        screen_height() / 2.0,
        96.0,
        GOLD,
    );
}
