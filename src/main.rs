use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use log::{error, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use orbit_particles::cli::Cli;
use orbit_particles::config::SceneConfig;
use orbit_particles::core::{DisplayContext, FpsCounter, GpuRenderer};
use orbit_particles::Display;

const FPS_UPDATE_INTERVAL: f32 = 1.0;

struct App {
    config: SceneConfig,
    seed: Option<u64>,
    window: Option<Arc<Window>>,
    display: Option<Display<GpuRenderer>>,
    fps: FpsCounter,
}

impl App {
    fn new(config: SceneConfig, seed: Option<u64>) -> Self {
        Self {
            config,
            seed,
            window: None,
            display: None,
            fps: FpsCounter::new(FPS_UPDATE_INTERVAL),
        }
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    fn redraw(&mut self) {
        let (Some(display), Some(window)) = (&mut self.display, &self.window) else {
            return;
        };

        let dt = display.update();
        if let Some(fps) = self.fps.tick(dt) {
            info!("FPS: {:.1}", fps);
        }

        if let Err(e) = display.render() {
            match e.downcast_ref::<wgpu::SurfaceError>() {
                Some(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    warn!("Surface lost, reconfiguring");
                    let size = window.inner_size();
                    display.resize(size.width, size.height);
                }
                _ => error!("Render error: {}", e),
            }
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match event_loop.create_window(
            Window::default_attributes()
                .with_title("Orbit Particles")
                .with_inner_size(winit::dpi::LogicalSize::new(
                    self.config.window_width,
                    self.config.window_height,
                )),
        ) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let renderer = match pollster::block_on(GpuRenderer::new(window.clone())) {
            Ok(renderer) => renderer,
            Err(e) => {
                error!("Failed to initialize renderer: {}", e);
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        let mut rng = self.rng();
        let display = Display::new(
            renderer,
            DisplayContext::new(size.width, size.height),
            &self.config,
            &mut rng,
        );

        self.window = Some(window);
        self.display = Some(display);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(display) = &mut self.display {
                    display.resize(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = cli.scene_config().context("Invalid scene configuration")?;
    info!(
        "Orbit Particles - {} particles, Escape to quit",
        config.particle_count
    );

    let event_loop = EventLoop::new()?;
    let mut app = App::new(config, cli.seed);
    event_loop.run_app(&mut app)?;

    Ok(())
}
