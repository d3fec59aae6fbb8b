#![deny(clippy::all)]
#![forbid(unsafe_code)]

use error_iter::ErrorIter as _;
use life_grid::World;
use log::error;
use pixels::wgpu::Color;
use pixels::{Pixels, PixelsBuilder, SurfaceTexture};
use std::sync::Arc;
use std::time::{Duration, Instant};
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::{ElementState, KeyEvent, StartCause, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

const BACKGROUND_COLOR: Color = Color::BLACK;

/// Runs the event loop until the window is closed. `build_world` receives the
/// physical size of the created window; the world's grid is rendered one cell
/// per texel, scaled to fill the viewport.
pub fn animate<W, F>(title: &str, window_size: LogicalSize<f64>, time_step: Duration, build_world: F)
where
    W: World,
    F: Fn(PhysicalSize<u32>) -> W,
{
    let event_loop = EventLoop::new().unwrap();
    event_loop.set_control_flow(ControlFlow::Wait);
    event_loop
        .run_app(&mut AppEventHandler::new(
            title,
            window_size,
            time_step,
            build_world,
        ))
        .unwrap();
}

struct App<W: World> {
    world: W,
    window: Arc<Window>,
    pixels: Pixels<'static>,
    time_step: Duration,
    next_update: Instant,
}

impl<W: World> App<W> {
    fn new<F>(event_loop: &ActiveEventLoop, config: &AppEventHandler<W, F>) -> Self
    where
        F: Fn(PhysicalSize<u32>) -> W,
    {
        let window = Arc::new(Self::build_window(
            event_loop,
            &config.title,
            config.window_size,
        ));
        let world = (config.build_world)(window.inner_size());
        let pixels = Self::build_pixels(&window, world.width(), world.height());
        Self {
            world,
            window,
            pixels,
            time_step: config.time_step,
            next_update: Instant::now(),
        }
    }

    fn build_window(event_loop: &ActiveEventLoop, title: &str, size: LogicalSize<f64>) -> Window {
        let window_attributes = Window::default_attributes()
            .with_title(title)
            .with_inner_size(size)
            .with_visible(false);
        event_loop.create_window(window_attributes).unwrap()
    }

    fn build_pixels(window: &Arc<Window>, width: u32, height: u32) -> Pixels<'static> {
        let window_size = window.inner_size();
        let surface_texture =
            SurfaceTexture::new(window_size.width, window_size.height, window.clone());
        PixelsBuilder::new(width, height, surface_texture)
            .clear_color(BACKGROUND_COLOR)
            .build()
            .unwrap()
    }

    fn on_create(&mut self) {
        self.window.request_redraw();
        self.window.set_visible(true);
    }

    fn on_time_step(&mut self) {
        self.world.update();
        self.window.request_redraw();

        while self.next_update < Instant::now() {
            self.next_update += self.time_step;
        }
    }

    fn on_randomize(&mut self) {
        self.world.randomize();
        self.window.request_redraw();
    }

    fn on_resize(&mut self, size: PhysicalSize<u32>) -> Result<(), pixels::TextureError> {
        self.pixels.resize_surface(size.width, size.height)
    }

    fn on_redraw(&mut self) -> Result<(), pixels::Error> {
        let frame = self.pixels.frame_mut();
        debug_assert_eq!(frame.len(), 4 * self.world.num_cells());

        for (color, pixel) in self.world.cell_colors().zip(frame.chunks_exact_mut(4)) {
            pixel.copy_from_slice(&color);
        }
        self.pixels.render()
    }
}

struct AppEventHandler<W, F>
where
    W: World,
    F: Fn(PhysicalSize<u32>) -> W,
{
    title: String,
    window_size: LogicalSize<f64>,
    time_step: Duration,
    build_world: F,
    app: Option<App<W>>,
}

impl<W, F> AppEventHandler<W, F>
where
    W: World,
    F: Fn(PhysicalSize<u32>) -> W,
{
    fn new(
        title: &str,
        window_size: LogicalSize<f64>,
        time_step: Duration,
        build_world: F,
    ) -> Self {
        Self {
            title: title.to_owned(),
            window_size,
            time_step,
            build_world,
            app: None,
        }
    }

    fn app(&mut self) -> &mut App<W> {
        self.app.as_mut().unwrap()
    }
}

impl<W, F> ApplicationHandler for AppEventHandler<W, F>
where
    W: World,
    F: Fn(PhysicalSize<u32>) -> W,
{
    fn new_events(&mut self, _event_loop: &ActiveEventLoop, cause: StartCause) {
        if let StartCause::ResumeTimeReached { .. } = cause {
            self.app().on_time_step();
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.app.is_none() {
            let app = App::new(event_loop, self);
            self.app = Some(app);
            self.app().on_create();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: ElementState::Released,
                        repeat: false,
                        ..
                    },
                ..
            } => match code {
                KeyCode::Space => {
                    self.app().on_randomize();
                }
                KeyCode::Escape | KeyCode::KeyQ | KeyCode::KeyX => {
                    event_loop.exit();
                }
                _ => (),
            },
            WindowEvent::Resized(size) => {
                if let Err(err) = self.app().on_resize(size) {
                    log_error("pixels.resize_surface", err);
                    event_loop.exit();
                }
            }
            WindowEvent::RedrawRequested => {
                if let Err(err) = self.app().on_redraw() {
                    log_error("pixels.render", err);
                    event_loop.exit();
                }
            }
            _ => (),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let wakeup_time = self.app().next_update;
        event_loop.set_control_flow(ControlFlow::WaitUntil(wakeup_time));
    }
}

fn log_error<E: std::error::Error + 'static>(method_name: &str, err: E) {
    error!("{method_name}() failed: {err}");
    for source in err.sources().skip(1) {
        error!("  Caused by: {source}");
    }
}
