use std::{sync::Arc, time::Instant};

use anyhow::Context;
use glam::Vec2;
use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalSize},
    event::{KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowId},
};

use crate::{
    config,
    demo::DemoState,
    engine,
    frame_gate::FrameGate,
    input::InputHandler,
    rendering::{config::RenderConfig, renderer::Renderer},
};

struct App {
    renderer: Option<Renderer>,
    demo_state: DemoState,
    input: InputHandler,
    frame_gate: FrameGate,
    last_frame: Instant,
}

/// Camera viewport in logical pixels.
fn viewport(size: PhysicalSize<u32>, scale_factor: f64) -> Vec2 {
    let logical = size.to_logical::<f32>(scale_factor);
    Vec2::new(logical.width, logical.height)
}

impl App {
    fn from_demo_state(demo_state: DemoState) -> Self {
        Self {
            renderer: None,
            demo_state,
            input: InputHandler::new(),
            frame_gate: FrameGate::new(),
            last_frame: Instant::now(),
        }
    }

    fn create_renderer(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let (width, height) = config::INITIAL_WINDOW_SIZE;
        let window_attributes = Window::default_attributes()
            .with_title(config::WINDOW_TITLE)
            .with_inner_size(LogicalSize::new(width, height));
        let window = event_loop
            .create_window(window_attributes)
            .context("Failed to create window")?;
        let window = Arc::new(window);

        self.demo_state
            .cameras
            .set_viewport(viewport(window.inner_size(), window.scale_factor()));

        let mut renderer = pollster::block_on(Renderer::new(
            window,
            &self.demo_state,
            RenderConfig::default(),
        ))
        .context("Failed to create renderer")?;

        renderer
            .load_meshes(&mut self.demo_state)
            .context("Failed to upload meshes")?;

        renderer.window.request_redraw();
        self.renderer = Some(renderer);

        Ok(())
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let frame_delta = self.last_frame.elapsed();
        self.last_frame = Instant::now();

        let Some(renderer) = self.renderer.as_mut() else {
            return;
        };
        renderer.window.request_redraw();

        if let Err(e) = engine::update(&mut self.demo_state, &self.input.current()) {
            log::error!("Error during engine::update: {:?}", e);
            event_loop.exit();
            return;
        }

        let now = self.demo_state.start_time.elapsed();
        if !self.frame_gate.poll(now, frame_delta) {
            return;
        }

        match renderer.render(&self.demo_state) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                renderer.resize(renderer.size);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Out of memory");
                event_loop.exit();
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("Timeout");
            }
            Err(other) => {
                log::error!("Unexpected error: {:?}", other);
            }
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.renderer.is_some() {
            return;
        }

        if let Err(e) = self.create_renderer(event_loop) {
            log::error!("{:?}", e);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                log::debug!("Resized to {}x{}", new_size.width, new_size.height);

                if let Some(renderer) = self.renderer.as_mut() {
                    renderer.resize(new_size);

                    if new_size.width > 0 && new_size.height > 0 {
                        let scale_factor = renderer.window.scale_factor();
                        self.demo_state
                            .cameras
                            .set_viewport(viewport(new_size, scale_factor));
                    }
                }
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                log::debug!("Scale factor changed to {}", scale_factor);

                if let Some(renderer) = self.renderer.as_ref() {
                    if renderer.size.width > 0 && renderer.size.height > 0 {
                        self.demo_state
                            .cameras
                            .set_viewport(viewport(renderer.size, scale_factor));
                    }
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key,
                        state,
                        repeat,
                        ..
                    },
                ..
            } => {
                self.input.process_key(physical_key, state, repeat);
            }
            WindowEvent::Focused(false) => {
                self.input.release_all();
            }
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
            }
            _ => (),
        }
    }
}

pub async fn run() -> anyhow::Result<()> {
    let event_loop = EventLoop::new().context("Failed to create event loop")?;

    let (width, height) = config::INITIAL_WINDOW_SIZE;
    let demo_state = DemoState::new(Vec2::new(width as f32, height as f32));

    let mut app = App::from_demo_state(demo_state);
    event_loop.run_app(&mut app)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_is_measured_in_logical_pixels() {
        let size = PhysicalSize::new(2560, 1440);

        assert_eq!(viewport(size, 1.0), Vec2::new(2560.0, 1440.0));
        assert_eq!(viewport(size, 2.0), Vec2::new(1280.0, 720.0));
        assert!(viewport(size, 1.5).abs_diff_eq(Vec2::new(2560.0 / 1.5, 960.0), 1e-3));
    }
}
