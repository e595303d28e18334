use std::sync::Arc;
use std::time::Instant;

use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::config::DemoConfig;
use crate::error::{Error, Result};
use crate::input::Input;
use crate::scene::SceneState;

/// Run the interactive demo until the window closes or quit is pressed.
///
/// The window has no GPU surface: it collects input, drives a
/// [`SceneState`] and shows [`SceneState::status_line`] in its title. A
/// renderer embeds `SceneState` directly and uploads
/// [`SceneState::uniforms`] itself.
///
/// # Example
/// ```no_run
/// sphereview::run(sphereview::DemoConfig::new().title("Orbit").size(1280, 720)).unwrap();
/// ```
pub fn run(config: DemoConfig) -> Result<()> {
    // Surface config errors before a window ever opens.
    let scene = SceneState::from_config(&config)?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = DemoApp {
        state: AppState::Pending { config, scene: Some(scene) },
        error: None,
    };
    event_loop.run_app(&mut app)?;

    match app.error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

struct DemoApp {
    state: AppState,
    /// First fatal error raised inside a callback, returned from [`run`].
    error: Option<Error>,
}

enum AppState {
    Pending {
        config: DemoConfig,
        scene: Option<SceneState>,
    },
    Running {
        window: Arc<Window>,
        scene: SceneState,
        input: Input,
        last_frame: Instant,
    },
}

impl DemoApp {
    fn fail(&mut self, event_loop: &ActiveEventLoop, error: Error) {
        log::error!("{error}");
        self.error.get_or_insert(error);
        event_loop.exit();
    }
}

impl ApplicationHandler for DemoApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let AppState::Pending { config, scene } = &mut self.state else {
            return;
        };
        let Some(scene) = scene.take() else {
            return;
        };

        let window_attrs = WindowAttributes::default()
            .with_title(&config.window.title)
            .with_inner_size(winit::dpi::LogicalSize::new(
                config.window.width,
                config.window.height,
            ));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => return self.fail(event_loop, e.into()),
        };
        let mut scene = scene;
        let size = window.inner_size();
        scene.resize(size.width, size.height);
        window.set_title(&scene.status_line());
        log::info!("window opened at {}x{}", size.width, size.height);

        self.state = AppState::Running {
            window,
            scene,
            input: Input::new(),
            last_frame: Instant::now(),
        };
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let AppState::Running {
            window,
            scene,
            input,
            last_frame,
        } = &mut self.state
        else {
            return;
        };

        input.handle_event(&event);

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                scene.resize(size.width, size.height);
            }
            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let dt = now.duration_since(*last_frame).as_secs_f32();
                *last_frame = now;

                let outcome = scene.update(input, dt);
                input.begin_frame();

                if outcome.quit {
                    event_loop.exit();
                    return;
                }
                if outcome.changed {
                    window.set_title(&scene.status_line());
                    log::trace!(
                        "camera at {:?}, light at {:?}",
                        scene.camera().position(),
                        scene.light().position()
                    );
                }

                window.request_redraw();
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let AppState::Running { window, .. } = &self.state {
            window.request_redraw();
        }
    }
}
