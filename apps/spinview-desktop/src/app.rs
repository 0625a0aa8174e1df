use crate::state::AppState;
use egui::Context as EguiContext;
use spinview_input::Action;
use spinview_render::upload_frame;
use spinview_render_wgpu::{GpuContext, WgpuRenderer};
use std::sync::Arc;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{DeviceEvent, ElementState, KeyEvent, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::PhysicalKey;
use winit::window::{CursorGrabMode, Window, WindowId};

/// Lock (or failing that, confine) and hide the pointer.
fn grab_cursor(window: &Window) {
    let grab = window
        .set_cursor_grab(CursorGrabMode::Locked)
        .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined));
    if let Err(e) = grab {
        tracing::warn!("could not grab cursor: {e}");
    }
    window.set_cursor_visible(false);
}

fn release_cursor(window: &Window) {
    if let Err(e) = window.set_cursor_grab(CursorGrabMode::None) {
        tracing::warn!("could not release cursor: {e}");
    }
    window.set_cursor_visible(true);
}

/// Everything that only exists once the window is up.
struct Surface {
    window: Arc<Window>,
    gpu: GpuContext,
    renderer: WgpuRenderer,
    egui_winit: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
}

pub struct GpuApp {
    state: AppState,
    surface: Option<Surface>,
    egui_ctx: EguiContext,
}

impl GpuApp {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            surface: None,
            egui_ctx: EguiContext::default(),
        }
    }

    fn create_surface(&self, event_loop: &ActiveEventLoop) -> anyhow::Result<Surface> {
        let win = &self.state.config.window;
        let attrs = Window::default_attributes()
            .with_title(win.title.clone())
            .with_inner_size(PhysicalSize::new(win.width, win.height));
        let window = Arc::new(event_loop.create_window(attrs)?);

        grab_cursor(&window);

        let size = window.inner_size();
        let gpu = GpuContext::new(window.clone(), size.width, size.height)?;
        let renderer = WgpuRenderer::new(
            &gpu.device,
            gpu.surface_format(),
            gpu.config.width,
            gpu.config.height,
            self.state.config.clear_color,
        );

        let egui_winit = egui_winit::State::new(
            self.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer =
            egui_wgpu::Renderer::new(&gpu.device, gpu.surface_format(), None, 1, false);

        Ok(Surface {
            window,
            gpu,
            renderer,
            egui_winit,
            egui_renderer,
        })
    }

    fn handle_action(&mut self, event_loop: &ActiveEventLoop, action: Action) {
        match action {
            Action::Quit => event_loop.exit(),
            Action::ToggleWireframe => {
                let Some(surface) = &mut self.surface else {
                    return;
                };
                let enabled = !surface.renderer.wireframe();
                match surface.renderer.set_wireframe(enabled) {
                    Ok(()) => tracing::info!("wireframe {}", if enabled { "on" } else { "off" }),
                    Err(e) => tracing::warn!("{e}"),
                }
            }
            Action::ToggleOverlay => {
                tracing::debug!("overlay {}", if self.state.show_overlay { "shown" } else { "hidden" });
            }
        }
    }

    fn set_captured(&mut self, captured: bool) {
        if self.state.captured() == captured {
            return;
        }
        self.state.set_captured(captured);
        if let Some(surface) = &self.surface {
            if captured {
                grab_cursor(&surface.window);
            } else {
                release_cursor(&surface.window);
            }
        }
        tracing::debug!("pointer {}", if captured { "captured" } else { "released" });
    }

    fn redraw(&mut self) {
        let Some(surface) = &mut self.surface else {
            return;
        };

        let output = match surface.gpu.acquire() {
            Ok(Some(output)) => output,
            Ok(None) => return,
            Err(e) => {
                tracing::error!("{e}");
                return;
            }
        };

        let (width, height) = surface.gpu.size();
        let matrices = self.state.update(width as f32 / height as f32);
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let gpu = &surface.gpu;
        upload_frame(&mut surface.renderer.uploader(&gpu.queue), &matrices);
        surface.renderer.render(&gpu.device, &gpu.queue, &view);

        let raw_input = surface.egui_winit.take_egui_input(&surface.window);
        let wireframe = surface.renderer.wireframe();
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            self.state.draw_ui(ctx, wireframe);
        });
        surface
            .egui_winit
            .handle_platform_output(&surface.window, full_output.platform_output);

        let paint_jobs = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [width, height],
            pixels_per_point: full_output.pixels_per_point,
        };

        let egui_renderer = &mut surface.egui_renderer;
        for (id, image_delta) in &full_output.textures_delta.set {
            egui_renderer.update_texture(&gpu.device, &gpu.queue, *id, image_delta);
        }
        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("egui_encoder"),
            });
        egui_renderer.update_buffers(
            &gpu.device,
            &gpu.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();
            egui_renderer.render(&mut pass, &paint_jobs, &screen_descriptor);
        }
        gpu.queue.submit(std::iter::once(encoder.finish()));
        for id in &full_output.textures_delta.free {
            egui_renderer.free_texture(id);
        }

        output.present();
        surface.window.request_redraw();
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.surface.is_some() {
            return;
        }
        match self.create_surface(event_loop) {
            Ok(surface) => self.surface = Some(surface),
            Err(e) => {
                tracing::error!("failed to start renderer: {e:#}");
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let Some(surface) = &mut self.surface {
            let _ = surface.egui_winit.on_window_event(&surface.window, &event);
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(surface) = &mut self.surface {
                    surface.gpu.resize(new_size.width, new_size.height);
                    let (w, h) = surface.gpu.size();
                    surface.renderer.resize(&surface.gpu.device, w, h);
                }
            }
            WindowEvent::Focused(focused) => {
                self.set_captured(focused);
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                ..
            } => {
                self.set_captured(true);
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: key_state,
                        repeat: false,
                        ..
                    },
                ..
            } => {
                if let Some(action) = self.state.handle_key(key, key_state.is_pressed()) {
                    self.handle_action(event_loop, action);
                }
            }
            WindowEvent::RedrawRequested => {
                self.redraw();
            }
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.state.handle_mouse_motion(delta.0, delta.1);
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(surface) = &self.surface {
            surface.window.request_redraw();
        }
    }
}
