//! Frame orchestrator
//!
//! [`App`] pairs the scene state ([`AppData`]) with the injected capability
//! objects ([`Services`]) and sequences one frame at a time: input, camera,
//! transforms, UI, then submission to the graphics device.
//!
//! Hot reload is a hand-off: [`App::detach`] splits the two halves and
//! [`App::reload`] joins them again without re-initialising anything. Both
//! halves are plain owned values, so they can be moved freely in between.

use thiserror::Error;

use crate::config::{CameraControlConfig, ConfigError, EngineConfig};
use crate::ecs::components::{CameraComponent, MaterialComponent, MeshError, SubMesh};
use crate::ecs::{ComponentLibrary, EcsError, EcsResult, Entity, System, TransformSystem};
use crate::foundation::math::{Mat4, Vec2, Vec3, Vec4};
use crate::input::{InputState, KeyCode, MouseButton};
use crate::render::{
    Draw, DrawArea, DrawList, DrawList3d, GlobalInfo, GraphicsDevice, LayerId, PipelineFlags, RenderError,
};
use crate::services::{DebugToolsState, Services};
use crate::ui::{LayoutRowType, UiCond};

/// Bytes per interleaved `xyz rgba` vertex
const VERTEX_STRIDE: u32 = 7 * std::mem::size_of::<f32>() as u32;

/// Application-level errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Entity or component lookup failed
    #[error("ECS error: {0}")]
    Ecs(#[from] EcsError),

    /// Graphics device call failed
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// Submesh data is inconsistent and cannot be uploaded
    #[error("Mesh error: {0}")]
    Mesh(#[from] MeshError),

    /// Configuration could not be loaded or saved
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// What happened to a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Everything was recorded and presented
    Rendered,
    /// The device was not ready; nothing was recorded
    Skipped,
}

/// Scene state that survives a reload
#[derive(Debug, Clone)]
pub struct AppData {
    /// Every entity and component in the scene
    pub library: ComponentLibrary,
    /// Camera the scene is viewed through
    pub main_camera: Entity,
    /// Material used by the demo triangle
    pub triangle_material: Entity,
    /// Demo triangle object (mesh + transform)
    pub triangle: Entity,

    /// Camera movement settings
    pub controls: CameraControlConfig,
    /// Hierarchy propagation
    pub transform_system: TransformSystem,

    /// UI demo window toggle
    pub show_ui_demo: bool,
    /// UI style editor toggle
    pub show_ui_style: bool,
    /// UI debug window toggle
    pub show_ui_debug: bool,
    /// Debug tool window toggles
    pub debug_tools: DebugToolsState,

    /// Application 2D draw list
    pub draw_list: DrawList,
    /// Layer painted first
    pub background_layer: LayerId,
    /// Layer painted over the background
    pub foreground_layer: LayerId,
    /// Application 3D debug draw list
    pub draw_list_3d: DrawList3d,

    /// Frames rendered so far
    pub frames_rendered: u64,
    /// Seconds of frame time accumulated over rendered frames
    pub elapsed_time: f32,
}

/// Running application: scene state plus capabilities
#[derive(Debug)]
pub struct App {
    services: Services,
    data: AppData,
}

impl App {
    /// Build the initial scene and upload its resources
    pub fn load(mut services: Services, io: &InputState, config: &EngineConfig) -> Result<Self, AppError> {
        log::info!("Loading application '{}'", config.window.title);
        let controls = config.camera.clone();
        let mut library = ComponentLibrary::new();

        let main_camera = library.create_camera(
            "main camera",
            controls.start_position(),
            controls.fov_radians(),
            io.aspect_ratio(),
            controls.near,
            controls.far,
        )?;
        let camera = library.cameras_mut().get_mut(main_camera)?;
        camera.set_pitch_yaw(controls.start_pitch, controls.start_yaw);
        camera.update();

        let triangle_material = library.create_material("triangle material")?;
        let triangle = library.create_object("triangle")?;
        let mesh_entity = library.objects().get(triangle)?.mesh;

        let mut submesh = triangle_submesh(triangle_material);
        upload_submesh(services.device.as_mut(), &mut submesh)?;
        library.meshes_mut().get_mut(mesh_entity)?.submeshes.push(submesh);

        let mut draw_list = DrawList::new();
        services.device.register_drawlist(&mut draw_list)?;
        let background_layer = draw_list.request_layer("Background Layer");
        let foreground_layer = draw_list.request_layer("Foreground Layer");

        let mut draw_list_3d = DrawList3d::new();
        services.device.register_3d_drawlist(&mut draw_list_3d)?;

        let data = AppData {
            library,
            main_camera,
            triangle_material,
            triangle,
            controls,
            transform_system: TransformSystem::new(),
            show_ui_demo: false,
            show_ui_style: false,
            show_ui_debug: false,
            debug_tools: DebugToolsState::default(),
            draw_list,
            background_layer,
            foreground_layer,
            draw_list_3d,
            frames_rendered: 0,
            elapsed_time: 0.0,
        };

        log::info!("Application loaded with {} entities", data.library.entity_count());
        Ok(Self { services, data })
    }

    /// Rejoin detached state with (possibly new) services
    pub fn reload(services: Services, data: AppData) -> Self {
        log::info!("Reloaded application after {} frames", data.frames_rendered);
        Self { services, data }
    }

    /// Split into services and state for a reload
    pub fn detach(self) -> (Services, AppData) {
        log::info!("Detaching application state");
        (self.services, self.data)
    }

    /// Match the camera and device to a new viewport size
    ///
    /// A minimized viewport keeps the camera's aspect; the device then
    /// reports "not ready" until the next real resize.
    pub fn resize(&mut self, io: &InputState) -> Result<(), AppError> {
        if io.is_minimized() {
            log::debug!("Viewport minimized, keeping camera aspect");
        } else {
            let camera = self.data.library.cameras_mut().get_mut(self.data.main_camera)?;
            camera.set_aspect(io.aspect_ratio());
            camera.update();
        }
        self.services.device.resize(io.viewport_size.x, io.viewport_size.y)?;
        Ok(())
    }

    /// Run one frame
    ///
    /// Returns [`FrameOutcome::Skipped`] without touching any state when the
    /// device is not ready. If the frame fails after it began, the device
    /// frame is aborted so the next call can start cleanly.
    pub fn update(&mut self, io: &mut InputState) -> Result<FrameOutcome, AppError> {
        if !self.services.device.begin_frame()? {
            log::debug!("Device not ready, skipping frame");
            return Ok(FrameOutcome::Skipped);
        }

        if let Err(err) = self.record_frame(io) {
            log::error!("Frame {} failed: {}", self.data.frames_rendered + 1, err);
            self.services.device.abort_frame();
            self.data.draw_list.reset();
            self.data.draw_list_3d.clear();
            return Err(err);
        }

        self.data.frames_rendered += 1;
        self.data.elapsed_time += io.delta_time;
        log::trace!("Rendered frame {}", self.data.frames_rendered);
        Ok(FrameOutcome::Rendered)
    }

    fn record_frame(&mut self, io: &mut InputState) -> Result<(), AppError> {
        self.services.stats.new_frame();
        self.services.stats.set_counter("framerate", f64::from(io.frame_rate));

        let ui_owns_mouse = self.services.ui.want_capture_mouse();
        io.want_capture_mouse = ui_owns_mouse;
        let camera = self.data.library.cameras_mut().get_mut(self.data.main_camera)?;
        drive_camera(camera, io, &self.data.controls, ui_owns_mouse);
        camera.update();

        self.data.transform_system.run(&mut self.data.library)?;

        self.services.device.begin_recording()?;

        let camera = self.data.library.cameras().get(self.data.main_camera)?;
        let global_info = GlobalInfo::new(
            Vec4::new(0.1, 0.1, 0.1, 1.0),
            camera.position,
            &camera.view,
            &camera.view_projection(),
            self.data.elapsed_time,
        );
        self.services.device.set_global_info(&global_info)?;

        self.declare_ui();

        let data = &mut self.data;
        data.draw_list.add_line(
            data.foreground_layer,
            Vec2::zeros(),
            Vec2::new(300.0, 500.0),
            Vec4::new(1.0, 0.0, 0.0, 1.0),
            1.0,
        );

        data.draw_list_3d.add_3d_transform(&Mat4::identity(), 10.0, 0.02);
        data.draw_list_3d.add_3d_triangle_filled(
            Vec3::zeros(),
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec4::new(1.0, 0.0, 0.0, 0.25),
        );

        let mvp = data.library.cameras().get(data.main_camera)?.view_projection();
        self.services.device.submit_3d_drawlist(
            &mut data.draw_list_3d,
            io.viewport_size.x,
            io.viewport_size.y,
            &mvp,
            PipelineFlags::DEPTH_TEST | PipelineFlags::DEPTH_WRITE,
        )?;

        data.draw_list.submit_layer(data.background_layer);
        data.draw_list.submit_layer(data.foreground_layer);

        self.services.ui.render();

        let draws = collect_draws(&data.library)?;
        let area = DrawArea {
            draw_offset: 0,
            draw_count: u32::try_from(draws.len()).unwrap_or(u32::MAX),
        };
        self.services.device.draw_areas(&[area], &draws)?;

        self.services.device.draw_lists(&[&data.draw_list])?;
        self.services.device.draw_lists(&[self.services.ui.draw_list()])?;
        self.services.device.draw_lists(&[self.services.ui.debug_draw_list()])?;
        data.draw_list.reset();

        self.services.device.end_recording()?;
        self.services.device.end_frame()?;
        Ok(())
    }

    fn declare_ui(&mut self) {
        let ui = self.services.ui.as_mut();
        let data = &mut self.data;

        ui.new_frame();
        ui.set_next_window_pos(Vec2::zeros(), UiCond::Once);

        if ui.begin_window("Pilot Light", None, false) {
            ui.layout_row(LayoutRowType::Dynamic, 0.0, &[1.0]);

            if ui.collapsing_header("Tools") {
                ui.checkbox("Memory Allocations", &mut data.debug_tools.show_memory_allocations);
                ui.checkbox("Profiling", &mut data.debug_tools.show_profiling);
                ui.checkbox("Statistics", &mut data.debug_tools.show_stats);
                ui.checkbox("Logging", &mut data.debug_tools.show_logging);
                ui.end_collapsing_header();
            }

            if ui.collapsing_header("User Interface") {
                ui.checkbox("UI Debug", &mut data.show_ui_debug);
                ui.checkbox("UI Demo", &mut data.show_ui_demo);
                ui.checkbox("UI Style", &mut data.show_ui_style);
                ui.end_collapsing_header();
            }
            ui.end_window();
        }

        self.services.debug.show_windows(&mut data.debug_tools);

        if data.show_ui_demo {
            ui.show_demo(&mut data.show_ui_demo);
        }
        if data.show_ui_style {
            ui.show_style(&mut data.show_ui_style);
        }
        if data.show_ui_debug {
            ui.show_debug(&mut data.show_ui_debug);
        }
    }

    /// Release device resources and end the application
    pub fn shutdown(mut self) {
        self.services.device.cleanup();
        log::info!(
            "Application shut down after {} frames ({} entities)",
            self.data.frames_rendered,
            self.data.library.entity_count()
        );
    }

    /// Scene state
    pub const fn data(&self) -> &AppData {
        &self.data
    }

    /// Mutable scene state
    pub fn data_mut(&mut self) -> &mut AppData {
        &mut self.data
    }

    /// Injected capabilities
    pub const fn services(&self) -> &Services {
        &self.services
    }

    /// Mutable injected capabilities
    pub fn services_mut(&mut self) -> &mut Services {
        &mut self.services
    }

    /// The main camera component
    pub fn camera(&self) -> EcsResult<&CameraComponent> {
        self.data.library.cameras().get(self.data.main_camera)
    }
}

/// Free-fly controls: WASD in camera space, R/F along world up, left-drag to look
fn drive_camera(camera: &mut CameraComponent, io: &mut InputState, controls: &CameraControlConfig, ui_owns_mouse: bool) {
    let step = controls.travel_speed * io.delta_time;

    if io.is_key_down(KeyCode::W) {
        camera.translate(0.0, 0.0, step);
    }
    if io.is_key_down(KeyCode::S) {
        camera.translate(0.0, 0.0, -step);
    }
    if io.is_key_down(KeyCode::A) {
        camera.translate(-step, 0.0, 0.0);
    }
    if io.is_key_down(KeyCode::D) {
        camera.translate(step, 0.0, 0.0);
    }

    if io.is_key_down(KeyCode::F) {
        camera.translate_world(0.0, -step, 0.0);
    }
    if io.is_key_down(KeyCode::R) {
        camera.translate_world(0.0, step, 0.0);
    }

    if !ui_owns_mouse && io.is_mouse_dragging(MouseButton::Left, controls.drag_threshold) {
        let delta = io.mouse_drag_delta(MouseButton::Left, controls.drag_threshold);
        let scale = controls.rotate_sensitivity * io.delta_time;
        camera.rotate(-delta.y * scale, -delta.x * scale);
        io.reset_mouse_drag_delta(MouseButton::Left);
    }
}

fn triangle_submesh(material: Entity) -> SubMesh {
    SubMesh {
        material,
        positions: vec![
            Vec3::new(-0.5, -0.5, 0.0),
            Vec3::new(0.5, -0.5, 0.0),
            Vec3::new(0.0, 0.5, 0.0),
        ],
        colors0: vec![
            Vec4::new(1.0, 0.0, 0.0, 1.0),
            Vec4::new(0.0, 1.0, 0.0, 1.0),
            Vec4::new(0.0, 0.0, 1.0, 1.0),
        ],
        indices: vec![0, 1, 2],
        ..SubMesh::default()
    }
}

fn upload_submesh(device: &mut dyn GraphicsDevice, submesh: &mut SubMesh) -> Result<(), AppError> {
    submesh.validate()?;

    let vertices = submesh.interleave_position_color();
    let vertex_buffer = device.create_vertex_buffer(bytemuck::cast_slice(&vertices), VERTEX_STRIDE, "vertex buffer")?;
    let index_buffer = device.create_index_buffer(&submesh.indices, "index buffer")?;

    submesh.buffers.vertex_buffer = Some(vertex_buffer);
    submesh.buffers.index_buffer = Some(index_buffer);
    submesh.buffers.vertex_count = u32::try_from(submesh.vertex_count()).unwrap_or(u32::MAX);
    submesh.buffers.index_count = u32::try_from(submesh.indices.len()).unwrap_or(u32::MAX);
    Ok(())
}

/// One draw per uploaded submesh of every object
///
/// A submesh without a material is drawn with the default one.
fn collect_draws(library: &ComponentLibrary) -> EcsResult<Vec<Draw>> {
    let mut draws = Vec::new();
    for (_, object) in library.objects().iter() {
        let mesh = library.meshes().get(object.mesh)?;
        for submesh in mesh.submeshes.iter().filter(|submesh| submesh.buffers.is_uploaded()) {
            draws.push(Draw {
                mesh: submesh.buffers,
                material: library
                    .materials()
                    .get(submesh.material)
                    .map_or_else(|_| MaterialComponent::new().info(), MaterialComponent::info),
            });
        }
    }
    Ok(draws)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{DeviceCall, DrawCommand, HeadlessDevice};
    use crate::services::{CounterStats, NullDebugTools};
    use crate::ui::Ui;
    use approx::assert_relative_eq;

    /// UI that can be told to grab the mouse
    #[derive(Default)]
    struct CapturingUi {
        capture: bool,
        draw_list: DrawList,
        debug_draw_list: DrawList,
    }

    impl Ui for CapturingUi {
        fn new_frame(&mut self) {}
        fn set_next_window_pos(&mut self, _pos: Vec2, _cond: UiCond) {}
        fn begin_window(&mut self, _name: &str, _open: Option<&mut bool>, _auto_size: bool) -> bool {
            false
        }
        fn layout_row(&mut self, _row_type: LayoutRowType, _height: f32, _ratios: &[f32]) {}
        fn collapsing_header(&mut self, _name: &str) -> bool {
            false
        }
        fn end_collapsing_header(&mut self) {}
        fn checkbox(&mut self, _label: &str, _value: &mut bool) -> bool {
            false
        }
        fn end_window(&mut self) {}
        fn show_demo(&mut self, _open: &mut bool) {}
        fn show_style(&mut self, _open: &mut bool) {}
        fn show_debug(&mut self, _open: &mut bool) {}
        fn want_capture_mouse(&self) -> bool {
            self.capture
        }
        fn render(&mut self) {}
        fn draw_list(&self) -> &DrawList {
            &self.draw_list
        }
        fn debug_draw_list(&self) -> &DrawList {
            &self.debug_draw_list
        }
    }

    fn load_headless() -> (App, InputState) {
        let io = InputState::new(1280.0, 720.0);
        let app = App::load(Services::headless(1280.0, 720.0), &io, &EngineConfig::default()).unwrap();
        (app, io)
    }

    fn device(app: &App) -> &HeadlessDevice {
        app.services().headless_device().unwrap()
    }

    fn start_drag(io: &mut InputState, dx: f32, dy: f32) {
        io.handle_mouse_move(100.0, 100.0);
        io.handle_mouse_button(MouseButton::Left, true);
        io.handle_mouse_move(100.0 + dx, 100.0 + dy);
    }

    #[test]
    fn test_load_builds_scene() {
        let (app, _io) = load_headless();
        let data = app.data();

        let camera = app.camera().unwrap();
        assert_relative_eq!(camera.position, Vec3::new(-6.211, 3.647, 0.827));
        assert_relative_eq!(camera.pitch, -0.244);
        assert_relative_eq!(camera.yaw, 1.488);
        assert_relative_eq!(camera.aspect, 1280.0 / 720.0);

        let object = data.library.objects().get(data.triangle).unwrap();
        let mesh = data.library.meshes().get(object.mesh).unwrap();
        assert_eq!(mesh.submeshes[0].material, data.triangle_material);
        assert!(mesh.submeshes[0].buffers.is_uploaded());

        let device = device(&app);
        assert_eq!(device.buffer_count(), 2);
        let vertex_buffer = device.buffer(mesh.submeshes[0].buffers.vertex_buffer.unwrap()).unwrap();
        assert_eq!(vertex_buffer.data.len(), 3 * VERTEX_STRIDE as usize);
        assert!(device.calls().contains(&DeviceCall::RegisterDrawList));
        assert!(device.calls().contains(&DeviceCall::Register3dDrawList));

        assert_eq!(data.draw_list.layer(data.background_layer).unwrap().name(), "Background Layer");
        assert_eq!(data.draw_list.layer(data.foreground_layer).unwrap().name(), "Foreground Layer");
    }

    #[test]
    fn test_frame_call_order() {
        let (mut app, mut io) = load_headless();
        app.services_mut().headless_device_mut().unwrap().clear_calls();

        assert_eq!(app.update(&mut io).unwrap(), FrameOutcome::Rendered);

        let calls = device(&app).calls();
        assert_eq!(calls.len(), 10);
        assert_eq!(calls[0], DeviceCall::BeginFrame { ready: true });
        assert_eq!(calls[1], DeviceCall::BeginRecording);
        assert_eq!(calls[2], DeviceCall::SetGlobalInfo);
        match &calls[3] {
            DeviceCall::Submit3dDrawList {
                lines,
                triangles,
                mvp,
                flags,
            } => {
                assert_eq!((*lines, *triangles), (3, 1));
                assert_eq!(*flags, PipelineFlags::DEPTH_TEST | PipelineFlags::DEPTH_WRITE);
                assert_eq!(*mvp, app.camera().unwrap().view_projection());
            }
            other => panic!("expected 3D submission, got {other:?}"),
        }
        assert_eq!(calls[4], DeviceCall::DrawAreas { areas: 1, draws: 1 });
        assert!(matches!(&calls[5], DeviceCall::DrawLists { commands } if commands.len() == 1));
        assert!(matches!(&calls[6], DeviceCall::DrawLists { .. }));
        assert!(matches!(&calls[7], DeviceCall::DrawLists { .. }));
        assert_eq!(calls[8], DeviceCall::EndRecording);
        assert_eq!(calls[9], DeviceCall::EndFrame);

        assert_eq!(app.services().stats.counter("framerate"), Some(60.0));
        assert!(app.data().draw_list.commands().is_empty());
        assert!(app.data().draw_list_3d.is_empty());
    }

    #[test]
    fn test_not_ready_device_skips_frame() {
        let (mut app, mut io) = load_headless();
        let device = app.services_mut().headless_device_mut().unwrap();
        device.skip_next_frames(1);
        device.clear_calls();

        io.handle_key_input(KeyCode::W, true);
        let before = app.camera().unwrap().position;

        assert_eq!(app.update(&mut io).unwrap(), FrameOutcome::Skipped);
        assert_eq!(self::device(&app).calls(), [DeviceCall::BeginFrame { ready: false }]);
        assert_eq!(app.camera().unwrap().position, before);
        assert_eq!(app.services().stats.counter("framerate"), None);
        assert_eq!(app.data().frames_rendered, 0);

        assert_eq!(app.update(&mut io).unwrap(), FrameOutcome::Rendered);
        assert_eq!(app.data().frames_rendered, 1);
    }

    #[test]
    fn test_background_painted_before_foreground() {
        let (mut app, mut io) = load_headless();
        let data = app.data_mut();
        data.draw_list.add_triangle_filled(
            data.background_layer,
            Vec2::zeros(),
            Vec2::new(50.0, 0.0),
            Vec2::new(0.0, 50.0),
            Vec4::new(0.0, 0.0, 0.0, 1.0),
        );

        app.update(&mut io).unwrap();

        let commands = device(&app)
            .calls()
            .iter()
            .find_map(|call| match call {
                DeviceCall::DrawLists { commands } if !commands.is_empty() => Some(commands.clone()),
                _ => None,
            })
            .unwrap();
        assert_eq!(commands.len(), 2);
        assert!(matches!(commands[0], DrawCommand::TriangleFilled { .. }));
        assert!(matches!(commands[1], DrawCommand::Line { p1, .. } if p1 == Vec2::new(300.0, 500.0)));
    }

    #[test]
    fn test_w_moves_camera_forward() {
        let (mut app, mut io) = load_headless();
        let start = app.camera().unwrap().position;
        let forward = app.camera().unwrap().forward;

        io.delta_time = 0.5;
        io.handle_key_input(KeyCode::W, true);
        app.update(&mut io).unwrap();

        assert_relative_eq!(app.camera().unwrap().position, start + forward * 4.0, epsilon = 1e-5);
    }

    #[test]
    fn test_r_moves_camera_along_world_up() {
        let (mut app, mut io) = load_headless();
        let start = app.camera().unwrap().position;

        io.delta_time = 0.25;
        io.handle_key_input(KeyCode::R, true);
        app.update(&mut io).unwrap();

        assert_relative_eq!(app.camera().unwrap().position, start + Vec3::new(0.0, 2.0, 0.0), epsilon = 1e-5);
    }

    #[test]
    fn test_drag_rotates_camera() {
        let (mut app, mut io) = load_headless();
        let yaw = app.camera().unwrap().yaw;
        let pitch = app.camera().unwrap().pitch;

        io.delta_time = 1.0;
        start_drag(&mut io, 10.0, 0.0);
        app.update(&mut io).unwrap();

        assert_relative_eq!(app.camera().unwrap().yaw, yaw - 1.0, epsilon = 1e-5);
        assert_relative_eq!(app.camera().unwrap().pitch, pitch);
        assert_eq!(io.mouse_drag_delta(MouseButton::Left, 0.0), Vec2::zeros());
    }

    #[test]
    fn test_ui_mouse_capture_blocks_camera_rotation() {
        let mut io = InputState::new(1280.0, 720.0);
        let services = Services::new(
            Box::new(HeadlessDevice::new(1280.0, 720.0)),
            Box::new(CapturingUi {
                capture: true,
                ..Default::default()
            }),
            Box::new(NullDebugTools),
            Box::new(CounterStats::new()),
        );
        let mut app = App::load(services, &io, &EngineConfig::default()).unwrap();
        let before = app.camera().unwrap().clone();

        io.delta_time = 1.0;
        start_drag(&mut io, 10.0, 10.0);
        app.update(&mut io).unwrap();

        let after = app.camera().unwrap();
        assert_eq!(after.yaw, before.yaw);
        assert_eq!(after.pitch, before.pitch);
        assert!(io.want_capture_mouse);
        // The drag is left intact for the UI
        assert_relative_eq!(io.mouse_drag_delta(MouseButton::Left, 1.0), Vec2::new(10.0, 10.0));
    }

    #[test]
    fn test_resize_updates_camera_and_device() {
        let (mut app, mut io) = load_headless();
        io.viewport_size = Vec2::new(1000.0, 500.0);

        app.resize(&io).unwrap();

        assert_relative_eq!(app.camera().unwrap().aspect, 2.0);
        assert_eq!(device(&app).viewport(), (1000.0, 500.0));
    }

    #[test]
    fn test_minimized_viewport_skips_frames() {
        let (mut app, mut io) = load_headless();
        let aspect = app.camera().unwrap().aspect;

        io.viewport_size = Vec2::new(800.0, 0.0);
        app.resize(&io).unwrap();
        assert_relative_eq!(app.camera().unwrap().aspect, aspect);
        assert_eq!(app.update(&mut io).unwrap(), FrameOutcome::Skipped);
        assert_eq!(app.update(&mut io).unwrap(), FrameOutcome::Skipped);
        assert_eq!(app.data().frames_rendered, 0);

        io.viewport_size = Vec2::new(800.0, 600.0);
        app.resize(&io).unwrap();
        assert_eq!(app.update(&mut io).unwrap(), FrameOutcome::Rendered);
        assert_relative_eq!(app.camera().unwrap().aspect, 800.0 / 600.0);
        assert_eq!(app.data().frames_rendered, 1);
    }

    #[test]
    fn test_hierarchy_cycle_aborts_frame_and_recovers() {
        let (mut app, mut io) = load_headless();
        let library = &mut app.data_mut().library;
        let a = library.create_transform("a").unwrap();
        let b = library.create_transform("b").unwrap();
        library.attach_component(a, b).unwrap();
        library.attach_component(b, a).unwrap();

        let err = app.update(&mut io).unwrap_err();
        assert!(matches!(err, AppError::Ecs(EcsError::HierarchyCycle { .. })));
        assert_eq!(device(&app).calls().last(), Some(&DeviceCall::AbortFrame));
        assert_eq!(app.data().frames_rendered, 0);
        assert!(app.data().draw_list_3d.is_empty());

        app.data_mut().library.deattach_component(b);
        assert_eq!(app.update(&mut io).unwrap(), FrameOutcome::Rendered);
        assert_eq!(app.data().frames_rendered, 1);
        assert_eq!(device(&app).frames_rendered(), 1);
    }

    #[test]
    fn test_global_info_tracks_camera() {
        let (mut app, mut io) = load_headless();
        io.delta_time = 0.5;
        app.update(&mut io).unwrap();
        app.update(&mut io).unwrap();

        let camera = app.camera().unwrap();
        let info = device(&app).global_info();
        let position = camera.position;
        assert_eq!(info.camera_pos, [position.x, position.y, position.z, 0.0]);
        assert_eq!(Mat4::from(info.camera_view), camera.view);
        assert_eq!(Mat4::from(info.camera_view_proj), camera.view_projection());
        assert_eq!(info.ambient_color, [0.1, 0.1, 0.1, 1.0]);
        // Time at the start of the second frame
        assert_relative_eq!(info.time, 0.5);
        assert_relative_eq!(app.data().elapsed_time, 1.0);
    }

    #[test]
    fn test_draws_carry_material_info() {
        let (mut app, _io) = load_headless();
        let draws = collect_draws(&app.data().library).unwrap();
        assert_eq!(draws.len(), 1);
        assert_eq!(draws[0].material.albedo, [1.0, 1.0, 1.0, 1.0]);

        let material = app.data().triangle_material;
        app.data_mut().library.materials_mut().get_mut(material).unwrap().albedo = Vec4::new(1.0, 0.0, 0.0, 1.0);
        let draws = collect_draws(&app.data().library).unwrap();
        assert_eq!(draws[0].material.albedo, [1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_invalid_submesh_is_not_uploaded() {
        let mut device = HeadlessDevice::new(640.0, 480.0);
        let mut submesh = triangle_submesh(Entity::INVALID);
        submesh.indices.push(7);

        let err = upload_submesh(&mut device, &mut submesh).unwrap_err();
        assert!(matches!(
            err,
            AppError::Mesh(MeshError::IndexOutOfRange {
                index: 7,
                vertex_count: 3
            })
        ));
        assert_eq!(device.buffer_count(), 0);
        assert!(!submesh.buffers.is_uploaded());
    }

    #[test]
    fn test_detach_and_reload_preserve_state() {
        let (mut app, mut io) = load_headless();
        io.handle_key_input(KeyCode::D, true);
        app.update(&mut io).unwrap();
        app.data_mut().show_ui_demo = true;

        let camera_before = app.camera().unwrap().clone();
        let (services, data) = app.detach();
        let moved = Box::new(data);
        let mut app = App::reload(services, *moved);

        assert_eq!(app.camera().unwrap(), &camera_before);
        assert_eq!(app.data().frames_rendered, 1);
        assert!(app.data().show_ui_demo);
        assert_eq!(app.data().library.name_of(app.data().triangle).unwrap(), "triangle");

        io.handle_key_input(KeyCode::D, false);
        assert_eq!(app.update(&mut io).unwrap(), FrameOutcome::Rendered);
        assert_eq!(app.data().frames_rendered, 2);
    }

    #[test]
    fn test_optional_ui_windows_render() {
        let (mut app, mut io) = load_headless();
        app.data_mut().show_ui_style = true;
        app.data_mut().show_ui_debug = true;
        assert_eq!(app.update(&mut io).unwrap(), FrameOutcome::Rendered);

        let ui = app.services().ui.as_ref();
        assert!(!ui.want_capture_mouse());
        assert!(ui.draw_list().commands().is_empty());
    }
}
