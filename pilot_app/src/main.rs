//! Headless Pilot Light demo
//!
//! Loads the triangle scene, drives the free-fly camera with a scripted input
//! sequence, resizes and hot-reloads halfway through, then shuts down.
//!
//! Usage: `pilot_app [config.toml|config.ron]`

use pilot_engine::prelude::*;
use thiserror::Error;

#[derive(Error, Debug)]
enum RunError {
    #[error(transparent)]
    App(#[from] AppError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

fn load_config() -> Result<EngineConfig, ConfigError> {
    match std::env::args().nth(1) {
        Some(path) => EngineConfig::load_from_file(&path),
        None => Ok(EngineConfig::default()),
    }
}

/// Feed the input a frame's worth of scripted events
fn script_input(io: &mut InputState, frame: u32) {
    io.frame_rate = 1.0 / io.delta_time;

    // Fly forward, strafe, climb, then look around with the mouse
    io.handle_key_input(KeyCode::W, frame < 30);
    io.handle_key_input(KeyCode::D, (30..45).contains(&frame));
    io.handle_key_input(KeyCode::R, (45..60).contains(&frame));

    match frame {
        60 => {
            io.handle_mouse_move(640.0, 360.0);
            io.handle_mouse_button(MouseButton::Left, true);
        }
        61..=89 => {
            let position = io.mouse_position();
            io.handle_mouse_move(position.x + 4.0, position.y + 1.0);
        }
        90 => io.handle_mouse_button(MouseButton::Left, false),
        _ => {}
    }
}

fn run() -> Result<(), RunError> {
    let config = load_config()?;
    pilot_engine::foundation::logging::init(&config.logging.filter);
    log::info!("Starting {}", config.window.title);

    let width = config.window.width as f32;
    let height = config.window.height as f32;

    let mut io = InputState::new(width, height);
    let mut app = App::load(Services::headless(width, height), &io, &config)?;

    let halfway = config.frames_to_run / 2;
    let mut skipped = 0u32;

    for frame in 0..config.frames_to_run {
        if frame == halfway {
            io.viewport_size = Vec2::new(width * 0.5, height);
            app.resize(&io)?;

            let (services, data) = app.detach();
            app = App::reload(services, data);

            // The surface is rebuilt after a resize, so the next frame is dropped
            if let Some(device) = app.services_mut().headless_device_mut() {
                device.skip_next_frames(1);
            }
        }

        script_input(&mut io, frame);
        if app.update(&mut io)? == FrameOutcome::Skipped {
            skipped += 1;
        }
    }

    let camera = app.camera().map_err(AppError::from)?;
    log::info!(
        "Camera finished at ({:.3}, {:.3}, {:.3}) pitch {:.3} yaw {:.3}",
        camera.position.x,
        camera.position.y,
        camera.position.z,
        camera.pitch,
        camera.yaw
    );
    log::info!("{} frames run, {} skipped", config.frames_to_run, skipped);

    app.shutdown();
    log::info!("{} finished successfully", config.window.title);
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        // No-op when the logger is already up
        pilot_engine::foundation::logging::init("info");
        log::error!("Application error: {}", e);
        std::process::exit(1);
    }
}
