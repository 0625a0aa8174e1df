use egui::Context as EguiContext;
use glam::Vec2;
use spinview_camera::{FrameMatrices, ViewRig};
use spinview_common::ViewerConfig;
use spinview_input::{Action, InputState, Key};
use std::time::Instant;
use winit::keyboard::KeyCode;

/// Map a winit key code onto the viewer's key set.
pub fn map_key(code: KeyCode) -> Key {
    match code {
        KeyCode::KeyW => Key::W,
        KeyCode::KeyA => Key::A,
        KeyCode::KeyS => Key::S,
        KeyCode::KeyD => Key::D,
        KeyCode::KeyX => Key::X,
        KeyCode::Escape => Key::Escape,
        KeyCode::F1 => Key::F1,
        _ => Key::Other,
    }
}

/// Application state.
pub struct AppState {
    pub config: ViewerConfig,
    pub rig: ViewRig,
    pub input: InputState,
    pub show_overlay: bool,
    /// Whether the pointer is grabbed and drives the camera.
    captured: bool,
    /// Unbounded cursor position built from raw mouse motion while the
    /// pointer is grabbed.
    cursor: Vec2,
    started: Instant,
    last_dt: f32,
}

impl AppState {
    pub fn new(config: ViewerConfig) -> Self {
        let [cx, cy] = config.camera.initial_cursor;
        Self {
            rig: ViewRig::from_config(&config),
            input: InputState::new(),
            show_overlay: false,
            captured: true,
            cursor: Vec2::new(cx, cy),
            started: Instant::now(),
            last_dt: 0.0,
            config,
        }
    }

    pub fn handle_key(&mut self, code: KeyCode, pressed: bool) -> Option<Action> {
        let action = self.input.handle_key(map_key(code), pressed);
        if action == Some(Action::ToggleOverlay) {
            self.show_overlay = !self.show_overlay;
        }
        action
    }

    pub fn captured(&self) -> bool {
        self.captured
    }

    /// Pointer grabbed or released. Releasing also drops held keys.
    pub fn set_captured(&mut self, captured: bool) {
        if !captured {
            self.input.release_all();
        }
        self.captured = captured;
    }

    pub fn handle_mouse_motion(&mut self, dx: f64, dy: f64) {
        if !self.captured {
            return;
        }
        self.cursor += Vec2::new(dx as f32, dy as f32);
        self.rig.on_cursor(self.cursor.x, self.cursor.y);
    }

    /// Advance one frame and return the matrices to upload.
    pub fn update(&mut self, aspect: f32) -> FrameMatrices {
        let now = self.started.elapsed().as_secs_f32();
        let matrices = self.rig.frame(now, self.input.movement(), aspect);
        self.last_dt = self.rig.timing.delta();
        matrices
    }

    pub fn draw_ui(&self, ctx: &EguiContext, wireframe: bool) {
        if !self.show_overlay {
            return;
        }

        let cam = &self.rig.camera;
        egui::Window::new("spinview")
            .resizable(false)
            .default_pos([12.0, 12.0])
            .show(ctx, |ui| {
                ui.label(format!(
                    "Frame time: {:.2} ms ({:.0} fps)",
                    self.last_dt * 1000.0,
                    if self.last_dt > 0.0 { 1.0 / self.last_dt } else { 0.0 }
                ));
                ui.label(format!("Frames: {}", self.rig.frame_count()));
                ui.separator();
                ui.label(format!(
                    "Camera: ({:.2}, {:.2}, {:.2})",
                    cam.position.x, cam.position.y, cam.position.z
                ));
                ui.label(format!("Yaw: {:.1}  Pitch: {:.1}", cam.yaw, cam.pitch));
                let a = self.rig.model.angles;
                ui.label(format!("Spin: x={:.0} y={:.0} z={:.0}", a.x, a.y, a.z));
                ui.label(format!(
                    "Profile: {} (far {})",
                    self.config.profile,
                    self.rig.projection.far
                ));
                ui.label(format!("Wireframe: {}", if wireframe { "on" } else { "off" }));
                ui.separator();
                ui.small("WASD: Move | Mouse: Look | X: Wireframe | F1: Overlay | Esc: Quit");
            });
    }
}
