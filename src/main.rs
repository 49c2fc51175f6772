use std::sync::Arc;

use anyhow::Result;
use glam::Vec2;
use log::{debug, info, trace};
use winit::{
    event::{Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::WindowBuilder,
};

use moonfall::config::{GameConfig, DEFAULT_CONFIG_PATH};
use moonfall::engine::game_loop::{GameLoop, FIXED_TIMESTEP};
use moonfall::engine::input::{Action, InputManager, InputSnapshot};
use moonfall::engine::physics::{LevelGeometry, Rect};
use moonfall::engine::renderer::{Camera, QuadDraw, RenderTarget, ViewProjection};
use moonfall::game::characters::{sprites, CharacterManager};

const PLAYERS: usize = 2;

/// Visible world height in units
const VIEW_HEIGHT: f32 = 2.0;

/// Render target that only logs what would be drawn
#[derive(Default)]
struct LogTarget {
    quads: usize,
}

impl RenderTarget for LogTarget {
    fn draw_quad(&mut self, quad: &QuadDraw, camera: &dyn ViewProjection) {
        let clip = camera.view_projection().project_point3(quad.position.extend(0.0));
        trace!(
            "{:?} quad from '{}' at ({:.2}, {:.2})",
            quad.layer,
            quad.sheet,
            clip.x,
            clip.y
        );
        self.quads += 1;
    }
}

/// Small test arena: two ledges, a crate to hop on and a ladder
fn arena() -> LevelGeometry {
    LevelGeometry::new(0.0)
        .with_platform(Rect::new(-1.2, 0.35, 0.6, 0.05))
        .with_platform(Rect::new(0.6, 0.35, 0.6, 0.05))
        .with_wall(Rect::new(-0.1, 0.0, 0.2, 0.12))
        .with_wall(Rect::new(-1.8, 0.0, 0.1, 1.5))
        .with_wall(Rect::new(1.7, 0.0, 0.1, 1.5))
        .with_ladder(Rect::new(0.9, 0.0, 0.08, 0.4))
}

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    info!("Starting Moonfall...");

    let config = GameConfig::load_or_default(DEFAULT_CONFIG_PATH)?;
    let library = Arc::new(sprites::builtin_library()?);
    info!("Animation library ready ({} animations)", library.len());

    let level = arena();
    let mut characters = CharacterManager::new(library, config.movement, config.combat, 0x6d6f6f6e);
    characters.spawn_character("Player 1", Some(0), Vec2::new(-0.8, 1.0), &level);
    characters.spawn_character("Player 2", Some(1), Vec2::new(0.8, 1.0), &level);

    let mut input = InputManager::new(PLAYERS);
    let mut game_loop = GameLoop::new();

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Moonfall")
        .with_inner_size(winit::dpi::LogicalSize::new(1280, 720))
        .with_resizable(true)
        .build(&event_loop)?;

    let size = window.inner_size();
    let mut camera = Camera::new(
        Vec2::new(0.0, VIEW_HEIGHT * 0.4),
        VIEW_HEIGHT,
        size.width as f32 / size.height.max(1) as f32,
    );

    info!("Window created successfully");

    // Main event loop
    event_loop.set_control_flow(ControlFlow::Poll);
    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                info!("Close requested, shutting down...");
                elwt.exit();
            }
            Event::WindowEvent {
                event: WindowEvent::Resized(physical_size),
                ..
            } => {
                camera.resize(physical_size.width, physical_size.height);
            }
            Event::WindowEvent {
                event: WindowEvent::KeyboardInput { event, .. },
                ..
            } => {
                input.process_keyboard_event(&event);
            }
            Event::WindowEvent {
                event: WindowEvent::RedrawRequested,
                ..
            } => {
                let mut target = LogTarget::default();
                characters.draw(&mut target, &camera);
                trace!("Frame {}: {} quads", game_loop.frame_count(), target.quads);
            }
            Event::AboutToWait => {
                if input.any_player_just_pressed(Action::Pause) {
                    game_loop.toggle_pause();
                    info!("Paused: {}", game_loop.is_paused());
                    input.end_tick();
                }

                let ticks = game_loop.begin_frame();
                for _ in 0..ticks {
                    let snapshots: Vec<InputSnapshot> =
                        (0..PLAYERS).map(|player| input.snapshot(player)).collect();
                    let report = characters.update(FIXED_TIMESTEP, &level, &snapshots);
                    input.end_tick();

                    for hit in &report.hits {
                        debug!("{} -> {}: {:?}", hit.attacker, hit.victim, hit.outcome);
                    }
                    for shot in &report.shots {
                        info!("{:?} fired at {:.0} degrees", shot.weapon, shot.angle);
                    }
                }
                if game_loop.is_paused() {
                    input.end_tick();
                }

                let alive: Vec<Vec2> = characters
                    .all()
                    .iter()
                    .filter(|c| c.is_alive())
                    .map(|c| c.position())
                    .collect();
                if !alive.is_empty() {
                    camera.follow(alive.iter().sum::<Vec2>() / alive.len() as f32);
                }

                window.request_redraw();
            }
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}
