use anyhow::Result;
use log::{debug, error, info, warn};
use std::sync::Arc;
use winit::{
    event::{Event, WindowEvent},
    event_loop::EventLoop,
    window::WindowBuilder,
};

mod core;
mod engine;
mod game;

use engine::assets::AssetLoader;
use engine::game_loop::GameLoop;
use engine::input::{Action, InputManager};
use engine::renderer::{Renderer, SpriteBatch};
use game::characters::{AnimationLibrary, BASE_STATS};
use game::Game;

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    info!("Starting Sprite Animator...");

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title("Sprite Animator")
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720))
            .with_resizable(true)
            .build(&event_loop)?,
    );

    info!("Window created successfully");

    let mut renderer = pollster::block_on(Renderer::new(window.clone()))?;

    // Sprite sheets must all load before the first frame
    let loader = AssetLoader::from_env();
    let library = AnimationLibrary::load(&loader, |name, image| {
        renderer.upload_texture(name, image)
    })?;
    info!("{} textures uploaded", renderer.texture_count());

    let size = renderer.size();
    let mut game = Game::new(library, BASE_STATS, size.width as f32, size.height as f32);
    let mut input = InputManager::default();
    let mut game_loop = GameLoop::new();
    let mut batch = SpriteBatch::new();

    // Main event loop
    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    info!("Close requested, shutting down...");
                    elwt.exit();
                }
                WindowEvent::KeyboardInput { event, .. } => {
                    match input.process_keyboard_event(&event) {
                        Some(Action::Quit) => {
                            info!("Quit pressed, shutting down...");
                            elwt.exit();
                        }
                        Some(action) => {
                            if !game.handle_action(action) && action == Action::Attack {
                                debug!("Attack ignored while airborne");
                            }
                        }
                        None => {}
                    }
                }
                WindowEvent::Focused(false) => {
                    // Keys released while unfocused never reach us
                    input.reset();
                }
                WindowEvent::Resized(physical_size) => {
                    info!("Window resized to {:?}", physical_size);
                    renderer.resize(physical_size);
                    if physical_size.width > 0 && physical_size.height > 0 {
                        game.resize(physical_size.width as f32, physical_size.height as f32);
                    }
                }
                WindowEvent::RedrawRequested => {
                    for _ in 0..game_loop.begin_frame() {
                        game.tick(&input);
                    }

                    batch.reset();
                    game.draw(&mut batch);

                    match renderer.render(&batch) {
                        Ok(()) => {}
                        Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                            warn!("Surface lost, reconfiguring");
                            renderer.reconfigure();
                        }
                        Err(wgpu::SurfaceError::OutOfMemory) => {
                            error!("Out of GPU memory, shutting down");
                            elwt.exit();
                        }
                        Err(e) => warn!("Dropped frame: {:?}", e),
                    }

                    if game_loop.frame_count() % 600 == 0 {
                        info!(
                            "{:.1} fps, tick {}",
                            game_loop.fps(),
                            game.current_tick()
                        );
                    }
                }
                _ => {}
            },
            Event::AboutToWait => {
                // Request redraw on next frame
                window.request_redraw();
            }
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}
