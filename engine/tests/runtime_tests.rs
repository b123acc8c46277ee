//! Runtime Tests - View Lifecycle
//!
//! Mounts a view the way the viewer does (listeners + frame loop), walks a
//! few frames, tears it down, and checks nothing keeps running.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use listening_room_engine::camera::FirstPersonCamera;
use listening_room_engine::config::RoomConfig;
use listening_room_engine::input::{
    InputEvent, InputState, KeyCode, ListenerGuard, ListenerRegistry,
};
use listening_room_engine::player::MovementIntegrator;
use listening_room_engine::runtime::{FrameClock, FrameLoop};

struct View {
    input: Rc<RefCell<InputState>>,
    listeners: Vec<ListenerGuard>,
    frame_loop: FrameLoop,
    camera: FirstPersonCamera,
    integrator: MovementIntegrator,
    config: RoomConfig,
}

impl View {
    fn mount(registry: &ListenerRegistry, config: RoomConfig) -> Self {
        let input = Rc::new(RefCell::new(InputState::new()));
        let shared = Rc::clone(&input);
        let listeners = vec![registry.subscribe(move |event| {
            shared.borrow_mut().apply(event);
        })];

        Self {
            input,
            listeners,
            frame_loop: FrameLoop::new(),
            camera: FirstPersonCamera::with_position(config.spawn),
            integrator: MovementIntegrator::with_config(config.movement),
            config,
        }
    }

    fn frame(&mut self, delta: f32) -> bool {
        let View {
            input,
            frame_loop,
            camera,
            integrator,
            config,
            ..
        } = self;
        frame_loop.run_frame(delta, |dt| {
            let input = input.borrow();
            integrator.tick(
                dt,
                &input.keyboard.movement,
                input.pointer.is_active(),
                camera,
                &config.obstacles,
            );
        })
    }

    fn unmount(mut self) -> u64 {
        self.frame_loop.handle().cancel();
        self.listeners.clear();
        self.frame_loop.frames_run()
    }
}

#[test]
fn test_mount_walk_unmount() {
    let registry = ListenerRegistry::new();
    let mut view = View::mount(&registry, RoomConfig::default());
    let mut clock = FrameClock::default();
    let start = Instant::now();
    clock.tick_at(start);

    registry.dispatch(&InputEvent::Click);
    registry.dispatch(&InputEvent::KeyDown(KeyCode::W));

    for frame in 1..=30u32 {
        let delta = clock.tick_at(start + Duration::from_millis(16 * frame as u64));
        assert!(view.frame(delta));
    }
    assert!(view.camera.position.z < -0.5);
    assert!(view.input.borrow().is_moving());

    let frames = view.unmount();
    assert_eq!(frames, 30);
    assert!(registry.is_empty());
}

#[test]
fn test_remount_has_single_listener() {
    let registry = ListenerRegistry::new();

    let first = View::mount(&registry, RoomConfig::default());
    first.unmount();
    let second = View::mount(&registry, RoomConfig::default());
    assert_eq!(registry.len(), 1);

    registry.dispatch(&InputEvent::Click);
    assert!(second.input.borrow().pointer.is_active());
}

#[test]
fn test_events_after_unmount_reach_nobody() {
    let registry = ListenerRegistry::new();
    let view = View::mount(&registry, RoomConfig::default());
    let input = Rc::clone(&view.input);
    view.unmount();

    registry.dispatch(&InputEvent::Click);
    assert!(!input.borrow().pointer.is_active());
}

#[test]
fn test_cancelled_loop_ignores_frames() {
    let registry = ListenerRegistry::new();
    let mut view = View::mount(&registry, RoomConfig::default());
    registry.dispatch(&InputEvent::Click);
    registry.dispatch(&InputEvent::KeyDown(KeyCode::D));

    assert!(view.frame(0.016));
    view.frame_loop.handle().cancel();
    let position = view.camera.position;

    assert!(!view.frame(0.016));
    assert_eq!(view.camera.position, position);
}

#[test]
fn test_hitch_does_not_reverse_velocity() {
    let registry = ListenerRegistry::new();
    let mut view = View::mount(&registry, RoomConfig::default());
    let mut clock = FrameClock::new(view.config.max_frame_delta);
    let start = Instant::now();
    clock.tick_at(start);

    registry.dispatch(&InputEvent::Click);
    registry.dispatch(&InputEvent::KeyDown(KeyCode::W));
    view.frame(clock.tick_at(start + Duration::from_millis(16)));
    registry.dispatch(&InputEvent::KeyUp(KeyCode::W));

    // A five second stall is fed to the integrator as 0.1 s
    view.frame(clock.tick_at(start + Duration::from_secs(5)));
    assert!(view.integrator.velocity().y > -1e-6);
}
