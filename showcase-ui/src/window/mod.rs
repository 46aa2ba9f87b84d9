//! Showcase window creation and event handling
//!
//! A decorated tao window with a wgpu surface that egui paints into. Input
//! events are translated into an [`egui::RawInput`] that is handed to egui at
//! the next redraw.

mod config;

pub use config::WindowConfig;

use std::time::{Duration, Instant};

use egui_wgpu::ScreenDescriptor;
use tao::{
    dpi::LogicalSize,
    event::{ElementState, Event, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    keyboard::KeyCode,
    window::{Window, WindowBuilder, WindowId},
};
use thiserror::Error;
use wgpu::{Device, Queue, Surface, SurfaceConfiguration};

/// Points scrolled per wheel line.
const SCROLL_LINE: f32 = 50.0;

#[derive(Error, Debug)]
pub enum WindowError {
    #[error("Failed to create window: {0}")]
    WindowCreationFailed(#[from] tao::error::OsError),
    #[error("Failed to create surface: {0}")]
    SurfaceCreationFailed(#[from] wgpu::CreateSurfaceError),
    #[error("Failed to create wgpu adapter")]
    AdapterCreationFailed,
    #[error("Failed to request wgpu device: {0}")]
    DeviceRequestFailed(#[from] wgpu::RequestDeviceError),
    #[error("Surface reports no supported formats")]
    NoSurfaceFormat,
}

/// Application trait for drawing into a showcase window
pub trait ShowcaseApp {
    /// Build the UI for one frame.
    fn ui(&mut self, ctx: &egui::Context);

    /// Called once when the window is closed, before the loop exits.
    fn on_close(&mut self) {}

    /// Return true if the app wants to quit
    fn should_quit(&self) -> bool {
        false
    }
}

/// A window rendering an egui UI with wgpu.
pub struct ShowcaseWindow {
    surface: Surface<'static>,
    device: Device,
    queue: Queue,
    config: SurfaceConfiguration,
    egui_ctx: egui::Context,
    egui_renderer: egui_wgpu::Renderer,
    /// Input gathered since the last frame
    raw_input: egui::RawInput,
    clear_color: wgpu::Color,
    start_time: Instant,
    /// When egui next wants a frame, `None` while idle
    repaint_at: Option<Instant>,
    // Declared last so it is dropped after the surface.
    window: Box<Window>,
}

impl ShowcaseWindow {
    /// Create a new showcase window with the given configuration.
    pub fn new(event_loop: &EventLoop<()>, config: WindowConfig) -> Result<Self, WindowError> {
        let (width, height) = config.clamped_size();

        let window = Box::new(
            WindowBuilder::new()
                .with_inner_size(LogicalSize::new(width, height))
                .with_min_inner_size(LogicalSize::new(config.min_width, config.min_height))
                .with_title(&config.title)
                .with_decorations(true)
                .build(event_loop)?,
        );

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        // SAFETY: The window lives in the Box which won't move. We transmute the lifetime
        // to 'static because the Box is dropped after the surface.
        let surface = unsafe {
            let window_ref: &'static Window = std::mem::transmute(&*window);
            instance.create_surface(window_ref)?
        };

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::LowPower,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .ok_or(WindowError::AdapterCreationFailed)?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("Showcase Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
            },
            None,
        ))?;

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or(WindowError::NoSurfaceFormat)?;
        log::debug!("Surface format {:?}, adapter {:?}", format, adapter.get_info().name);

        let surface_config = SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: wgpu::CompositeAlphaMode::Auto,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &surface_config);

        let egui_ctx = egui::Context::default();
        let egui_renderer = egui_wgpu::Renderer::new(&device, format, None, 1);

        let [r, g, b, a] = config.clear_color;

        log::info!("Created window \"{}\" ({}x{})", config.title, width, height);

        Ok(Self {
            surface,
            device,
            queue,
            config: surface_config,
            egui_ctx,
            egui_renderer,
            raw_input: egui::RawInput::default(),
            clear_color: wgpu::Color { r, g, b, a },
            start_time: Instant::now(),
            repaint_at: Some(Instant::now()),
            window,
        })
    }

    /// Get the window ID for event routing
    pub fn id(&self) -> WindowId {
        self.window.id()
    }

    /// Get the underlying tao window.
    pub fn window(&self) -> &Window {
        &self.window
    }

    /// The egui context driving this window.
    pub fn context(&self) -> &egui::Context {
        &self.egui_ctx
    }

    pub fn request_redraw(&self) {
        self.window.request_redraw();
    }

    /// When egui asked for the next frame.
    pub fn repaint_at(&self) -> Option<Instant> {
        self.repaint_at
    }

    /// Whether a requested repaint time has passed.
    pub fn repaint_due(&self) -> bool {
        self.repaint_at.is_some_and(|at| at <= Instant::now())
    }

    /// Resize the surface (physical pixels).
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.repaint_at = Some(Instant::now());
    }

    /// Reconfigure the surface at the current window size.
    pub fn reconfigure(&mut self) {
        let size = self.window.inner_size();
        self.resize(size.width, size.height);
    }

    fn pointer_pos(&self, x: f64, y: f64) -> egui::Pos2 {
        // Physical pixels to logical points
        let scale_factor = self.window.scale_factor() as f32;
        egui::pos2(x as f32 / scale_factor, y as f32 / scale_factor)
    }

    /// Translate a window event into egui input.
    ///
    /// Returns true when the event should trigger a redraw.
    pub fn on_event(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::Resized(size) => {
                self.resize(size.width, size.height);
                true
            }
            WindowEvent::ScaleFactorChanged { new_inner_size, .. } => {
                self.resize(new_inner_size.width, new_inner_size.height);
                true
            }
            WindowEvent::KeyboardInput { event, .. } => {
                let pressed = event.state == ElementState::Pressed;
                let modifiers = self.raw_input.modifiers;

                if let Some(key) = translate_key(event.physical_key) {
                    self.raw_input.events.push(egui::Event::Key {
                        key,
                        physical_key: None,
                        pressed,
                        repeat: event.repeat,
                        modifiers,
                    });
                }

                // Text only on press, without control characters
                if pressed {
                    if let Some(text) = event.text {
                        if !text.chars().all(|c| c.is_control()) {
                            self.raw_input.events.push(egui::Event::Text(text.to_string()));
                        }
                    }
                }
                true
            }
            WindowEvent::ModifiersChanged(modifiers) => {
                let state = &mut self.raw_input.modifiers;
                state.alt = modifiers.alt_key();
                state.ctrl = modifiers.control_key();
                state.shift = modifiers.shift_key();
                state.mac_cmd = cfg!(target_os = "macos") && modifiers.super_key();
                state.command = if cfg!(target_os = "macos") {
                    modifiers.super_key()
                } else {
                    modifiers.control_key()
                };
                false
            }
            WindowEvent::CursorMoved { position, .. } => {
                let pos = self.pointer_pos(position.x, position.y);
                self.raw_input.events.push(egui::Event::PointerMoved(pos));
                true
            }
            WindowEvent::CursorLeft { .. } => {
                self.raw_input.events.push(egui::Event::PointerGone);
                true
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let button = match button {
                    MouseButton::Left => egui::PointerButton::Primary,
                    MouseButton::Right => egui::PointerButton::Secondary,
                    MouseButton::Middle => egui::PointerButton::Middle,
                    _ => return false,
                };
                let pos = self
                    .egui_ctx
                    .input(|i| i.pointer.latest_pos())
                    .unwrap_or_default();
                self.raw_input.events.push(egui::Event::PointerButton {
                    pos,
                    button,
                    pressed: *state == ElementState::Pressed,
                    modifiers: self.raw_input.modifiers,
                });
                true
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let delta = match delta {
                    MouseScrollDelta::LineDelta(x, y) => egui::vec2(*x, *y) * SCROLL_LINE,
                    MouseScrollDelta::PixelDelta(position) => {
                        let scale_factor = self.window.scale_factor() as f32;
                        egui::vec2(position.x as f32, position.y as f32) / scale_factor
                    }
                    _ => return false,
                };
                self.raw_input.events.push(egui::Event::Scroll(delta));
                true
            }
            WindowEvent::Focused(focused) => {
                self.raw_input.focused = *focused;
                true
            }
            _ => false,
        }
    }

    /// Run one egui frame for `app` and present it.
    pub fn render<A: ShowcaseApp + ?Sized>(&mut self, app: &mut A) -> Result<(), wgpu::SurfaceError> {
        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        // screen_rect is in logical points
        let scale_factor = self.window.scale_factor() as f32;
        self.egui_ctx.set_pixels_per_point(scale_factor);

        let mut raw_input = self.raw_input.take();
        raw_input.screen_rect = Some(egui::Rect::from_min_size(
            egui::Pos2::ZERO,
            egui::vec2(
                self.config.width as f32 / scale_factor,
                self.config.height as f32 / scale_factor,
            ),
        ));
        raw_input.time = Some(self.start_time.elapsed().as_secs_f64());
        raw_input.predicted_dt = 1.0 / 60.0;

        let full_output = self.egui_ctx.run(raw_input, |ctx| app.ui(ctx));

        let delay = full_output
            .viewport_output
            .get(&egui::ViewportId::ROOT)
            .map(|viewport| viewport.repaint_delay)
            .unwrap_or(Duration::MAX);
        self.repaint_at = Instant::now().checked_add(delay);

        let clipped_primitives = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        for (id, delta) in &full_output.textures_delta.set {
            self.egui_renderer
                .update_texture(&self.device, &self.queue, *id, delta);
        }

        let screen_descriptor = ScreenDescriptor {
            size_in_pixels: [self.config.width, self.config.height],
            pixels_per_point: scale_factor,
        };

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Showcase Encoder"),
            });

        self.egui_renderer.update_buffers(
            &self.device,
            &self.queue,
            &mut encoder,
            &clipped_primitives,
            &screen_descriptor,
        );

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Showcase Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            self.egui_renderer
                .render(&mut render_pass, &clipped_primitives, &screen_descriptor);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }

        Ok(())
    }
}

/// Map a physical key to the egui key used by text editing and shortcuts.
fn translate_key(key: KeyCode) -> Option<egui::Key> {
    let key = match key {
        KeyCode::Escape => egui::Key::Escape,
        KeyCode::Tab => egui::Key::Tab,
        KeyCode::Backspace => egui::Key::Backspace,
        KeyCode::Enter | KeyCode::NumpadEnter => egui::Key::Enter,
        KeyCode::Space => egui::Key::Space,
        KeyCode::Delete => egui::Key::Delete,
        KeyCode::ArrowDown => egui::Key::ArrowDown,
        KeyCode::ArrowLeft => egui::Key::ArrowLeft,
        KeyCode::ArrowRight => egui::Key::ArrowRight,
        KeyCode::ArrowUp => egui::Key::ArrowUp,
        KeyCode::Home => egui::Key::Home,
        KeyCode::End => egui::Key::End,
        KeyCode::PageUp => egui::Key::PageUp,
        KeyCode::PageDown => egui::Key::PageDown,
        KeyCode::KeyA => egui::Key::A,
        KeyCode::KeyC => egui::Key::C,
        KeyCode::KeyV => egui::Key::V,
        KeyCode::KeyX => egui::Key::X,
        KeyCode::KeyZ => egui::Key::Z,
        _ => return None,
    };
    Some(key)
}

/// Run the showcase window event loop with an app.
///
/// This takes ownership of the window and runs until it is closed.
pub fn run_with_app<A: ShowcaseApp + 'static>(
    mut window: ShowcaseWindow,
    event_loop: EventLoop<()>,
    mut app: A,
) {
    let mut exiting = false;

    event_loop.run(move |event, _, control_flow| {
        match event {
            Event::WindowEvent {
                window_id, event, ..
            } if window_id == window.id() => match event {
                WindowEvent::CloseRequested => {
                    log::info!("Window closed");
                    app.on_close();
                    exiting = true;
                }
                other => {
                    if window.on_event(&other) {
                        window.request_redraw();
                    }
                }
            },

            Event::MainEventsCleared => {
                if app.should_quit() {
                    app.on_close();
                    exiting = true;
                } else if window.repaint_due() {
                    window.request_redraw();
                }
            }

            Event::RedrawRequested(window_id) if window_id == window.id() => {
                if let Err(e) = window.render(&mut app) {
                    match e {
                        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => {
                            window.reconfigure();
                        }
                        wgpu::SurfaceError::OutOfMemory => {
                            log::error!("Render error: {:?}", e);
                            exiting = true;
                        }
                        _ => log::warn!("Render error: {:?}", e),
                    }
                }
            }

            _ => (),
        }

        *control_flow = if exiting {
            ControlFlow::Exit
        } else {
            match window.repaint_at() {
                Some(at) => ControlFlow::WaitUntil(at),
                None => ControlFlow::Wait,
            }
        };
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_key() {
        assert_eq!(translate_key(KeyCode::Backspace), Some(egui::Key::Backspace));
        assert_eq!(translate_key(KeyCode::NumpadEnter), Some(egui::Key::Enter));
        assert_eq!(translate_key(KeyCode::F13), None);
    }

    #[test]
    fn test_window_error_messages() {
        assert_eq!(
            WindowError::AdapterCreationFailed.to_string(),
            "Failed to create wgpu adapter"
        );
        assert_eq!(
            WindowError::NoSurfaceFormat.to_string(),
            "Surface reports no supported formats"
        );
    }
}
