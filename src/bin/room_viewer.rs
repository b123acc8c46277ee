//! Listening Room - first-person room viewer
//!
//! Click to capture the mouse, WASD / arrows to walk, mouse to look,
//! ESC to let go. Close the window to quit.
//!
//! Usage: `room_viewer [room.json]`

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Instant;

use listening_room_engine::camera::FirstPersonCamera;
use listening_room_engine::config::{ConfigError, RoomConfig};
use listening_room_engine::input::{
    InputEvent, InputState, KeyCode, ListenerGuard, ListenerRegistry,
};
use listening_room_engine::player::MovementIntegrator;
use listening_room_engine::runtime::{FrameClock, FrameLoop};

use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::error::{EventLoopError, OsError};
use winit::event::{DeviceEvent, DeviceId, ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::window::{CursorGrabMode, Window, WindowAttributes, WindowId};

// ============================================================================
// ERROR TYPE
// ============================================================================

#[derive(Debug)]
enum ViewerError {
    Config(ConfigError),
    EventLoop(EventLoopError),
    Window(OsError),
}

impl std::fmt::Display for ViewerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewerError::Config(e) => write!(f, "config: {e}"),
            ViewerError::EventLoop(e) => write!(f, "event loop: {e}"),
            ViewerError::Window(e) => write!(f, "window creation failed: {e}"),
        }
    }
}

impl std::error::Error for ViewerError {}

impl From<ConfigError> for ViewerError {
    fn from(e: ConfigError) -> Self {
        ViewerError::Config(e)
    }
}

impl From<EventLoopError> for ViewerError {
    fn from(e: EventLoopError) -> Self {
        ViewerError::EventLoop(e)
    }
}

// ============================================================================
// APP
// ============================================================================

struct RoomViewerApp {
    config: RoomConfig,
    window: Option<Arc<Window>>,

    registry: ListenerRegistry,
    /// Live while the view is mounted; cleared on teardown
    listeners: Vec<ListenerGuard>,
    input: Rc<RefCell<InputState>>,

    camera: FirstPersonCamera,
    integrator: MovementIntegrator,
    clock: FrameClock,
    frame_loop: FrameLoop,

    last_title_update: Instant,
    error: Option<ViewerError>,
}

impl RoomViewerApp {
    fn new(config: RoomConfig) -> Self {
        let mut camera = FirstPersonCamera::with_position(config.spawn);
        camera.sensitivity = config.mouse_sensitivity;

        Self {
            integrator: MovementIntegrator::with_config(config.movement),
            clock: FrameClock::new(config.max_frame_delta),
            camera,
            config,
            window: None,
            registry: ListenerRegistry::new(),
            listeners: Vec::new(),
            input: Rc::new(RefCell::new(InputState::new())),
            frame_loop: FrameLoop::new(),
            last_title_update: Instant::now(),
            error: None,
        }
    }

    /// Attach input handlers for the lifetime of the view.
    fn mount(&mut self, window: Arc<Window>) {
        let input = Rc::clone(&self.input);
        self.listeners.push(self.registry.subscribe(move |event| {
            input.borrow_mut().apply(event);
        }));
        self.listeners
            .push(self.registry.subscribe(|event| log::trace!("input: {event:?}")));

        let blocking_spawn = self.config.obstacles_at_spawn();
        if !blocking_spawn.is_empty() {
            log::warn!(
                "{} obstacle(s) overlap the spawn point; walking may be blocked",
                blocking_spawn.len()
            );
        }

        window.set_title(&format!(
            "{} - {}",
            self.config.window.title,
            self.input.borrow().pointer.status_message()
        ));
        self.window = Some(window);
        log::info!("view mounted with {} listeners", self.registry.len());
    }

    /// Release handlers and stop the frame task.
    fn unmount(&mut self) {
        self.frame_loop.handle().cancel();
        self.listeners.clear();
        if let Some(window) = &self.window {
            release_cursor(window);
        }
        log::info!("view unmounted after {} frames", self.frame_loop.frames_run());
    }

    fn dispatch(&mut self, event: InputEvent) {
        self.registry.dispatch(&event);
        self.sync_cursor();
    }

    /// Push a pointer-lock change out to the window.
    fn sync_cursor(&mut self) {
        let mut input = self.input.borrow_mut();
        if !input.pointer.is_dirty() {
            return;
        }
        input.pointer.clear_dirty();

        if let Some(window) = &self.window {
            if input.pointer.should_cursor_be_grabbed() {
                grab_cursor(window);
            } else {
                release_cursor(window);
            }
            window.set_title(&format!(
                "{} - {}",
                self.config.window.title,
                input.pointer.status_message()
            ));
        }
    }

    fn update(&mut self, delta: f32) {
        let Self {
            frame_loop,
            integrator,
            camera,
            input,
            config,
            ..
        } = self;

        frame_loop.run_frame(delta, |dt| {
            let input = input.borrow();
            let outcome = integrator.tick(
                dt,
                &input.keyboard.movement,
                input.pointer.is_active(),
                camera,
                &config.obstacles,
            );
            if outcome.blocked {
                log::debug!("blocked at {:?}", camera.position);
            }
        });
    }

    fn update_title(&mut self) {
        let now = Instant::now();
        if now.duration_since(self.last_title_update).as_secs_f32() < 1.0 {
            return;
        }
        self.last_title_update = now;

        let input = self.input.borrow();
        if !input.pointer.is_active() {
            return;
        }
        if let Some(window) = &self.window {
            let p = self.camera.position;
            let v = self.integrator.velocity();
            log::debug!("pose {p:?} velocity {v:?} yaw {:.2}", self.camera.yaw);
            window.set_title(&format!(
                "{} - ({:.1}, {:.1}, {:.1}) {:.1} m/s",
                self.config.window.title,
                p.x,
                p.y,
                p.z,
                v.length()
            ));
        }
    }
}

fn grab_cursor(window: &Window) {
    if window.set_cursor_grab(CursorGrabMode::Locked).is_err()
        && let Err(e) = window.set_cursor_grab(CursorGrabMode::Confined)
    {
        log::warn!("cursor grab unavailable: {e}");
    }
    window.set_cursor_visible(false);
}

fn release_cursor(window: &Window) {
    if let Err(e) = window.set_cursor_grab(CursorGrabMode::None) {
        log::warn!("cursor release failed: {e}");
    }
    window.set_cursor_visible(true);
}

impl ApplicationHandler for RoomViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let attrs = WindowAttributes::default()
            .with_title(self.config.window.title.clone())
            .with_inner_size(PhysicalSize::new(
                self.config.window.width,
                self.config.window.height,
            ));
        match event_loop.create_window(attrs) {
            Ok(window) => self.mount(Arc::new(window)),
            Err(e) => {
                self.error = Some(ViewerError::Window(e));
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                self.unmount();
                event_loop.exit();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.repeat {
                    return;
                }
                if let PhysicalKey::Code(code) = event.physical_key {
                    let key = KeyCode::from_winit(code);
                    let pressed = event.state == ElementState::Pressed;
                    let input_event = match (key, pressed) {
                        (KeyCode::Escape, true) => InputEvent::Escape,
                        (KeyCode::Escape, false) | (KeyCode::Unknown, _) => return,
                        (key, true) => InputEvent::KeyDown(key),
                        (key, false) => InputEvent::KeyUp(key),
                    };
                    self.dispatch(input_event);
                }
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => self.dispatch(InputEvent::Click),
            WindowEvent::Focused(false) => self.dispatch(InputEvent::FocusLost),
            WindowEvent::RedrawRequested => {
                let delta = self.clock.tick();
                self.update(delta);
                self.update_title();
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _: &ActiveEventLoop) {
        if !self.frame_loop.is_live() {
            return;
        }
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn device_event(&mut self, _: &ActiveEventLoop, _: DeviceId, event: DeviceEvent) {
        if !self.input.borrow().pointer.is_active() {
            return;
        }
        if let DeviceEvent::MouseMotion { delta } = event {
            self.camera
                .handle_mouse_look(delta.0 as f32, delta.1 as f32);
        }
    }
}

fn run() -> Result<(), ViewerError> {
    let config = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => RoomConfig::load(&path)?,
        None => {
            log::info!("no config given, using defaults");
            RoomConfig::default()
        }
    };

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = RoomViewerApp::new(config);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Listening Room - click to walk, WASD/arrows move, ESC releases, close to quit");

    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}
