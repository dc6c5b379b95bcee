//! # Pilot Engine
//!
//! Entity-component storage, a free-fly camera and a per-frame orchestrator
//! for the Pilot Light demo.
//!
//! ## Features
//!
//! - **ECS**: sparse entity handles with dense per-kind component storage
//! - **Camera**: pitch / yaw / roll perspective camera with cached matrices
//! - **Transforms**: scene hierarchy propagation with cycle detection
//! - **Frame orchestration**: input, UI and draw submission against
//!   injected capability traits, with a hot-reload hand-off
//! - **Headless backend**: an in-memory graphics device for tests and demos
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pilot_engine::prelude::*;
//!
//! fn main() -> Result<(), AppError> {
//!     let config = EngineConfig::default();
//!     let mut io = InputState::new(1280.0, 720.0);
//!     let mut app = App::load(Services::headless(1280.0, 720.0), &io, &config)?;
//!
//!     io.handle_key_input(KeyCode::W, true);
//!     app.update(&mut io)?;
//!
//!     app.shutdown();
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod app;
pub mod config;
pub mod ecs;
pub mod foundation;
pub mod input;
pub mod render;
pub mod services;
pub mod ui;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        app::{App, AppData, AppError, FrameOutcome},
        config::{Config, ConfigError, EngineConfig},
        ecs::{
            components::{CameraComponent, MaterialComponent, MeshComponent, ObjectComponent, TransformComponent},
            ComponentLibrary, ComponentManager, EcsError, Entity, System, TransformSystem,
        },
        foundation::math::{Mat4, Quat, Vec2, Vec3, Vec4},
        input::{InputState, KeyCode, MouseButton},
        render::{GraphicsDevice, HeadlessDevice, RenderError},
        services::Services,
    };
}
