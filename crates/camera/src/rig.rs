use crate::camera::{CameraState, MovementKeys};
use crate::matrices::{FrameMatrices, Projection, build_matrices};
use crate::model::ModelTransform;
use crate::mouse::MouseState;
use crate::timing::FrameTiming;
use glam::{Vec2, Vec3};
use spinview_common::ViewerConfig;

/// All per-frame camera and model state, owned by the caller and advanced
/// explicitly.
#[derive(Debug, Clone)]
pub struct ViewRig {
    pub camera: CameraState,
    pub mouse: MouseState,
    pub timing: FrameTiming,
    pub model: ModelTransform,
    pub projection: Projection,
    /// Degrees per pixel of cursor motion.
    pub sensitivity: f32,
    frames: u64,
}

impl Default for ViewRig {
    fn default() -> Self {
        Self::from_config(&ViewerConfig::default())
    }
}

impl ViewRig {
    pub fn from_config(config: &ViewerConfig) -> Self {
        let [cx, cy] = config.camera.initial_cursor;
        Self {
            camera: CameraState::from_config(&config.camera),
            mouse: MouseState::new(Vec2::new(cx, cy)),
            timing: FrameTiming::new(),
            model: ModelTransform::from_config(&config.spin),
            projection: Projection::for_profile(config.profile),
            sensitivity: config.camera.sensitivity,
            frames: 0,
        }
    }

    /// Feed an absolute cursor position; returns the new look direction.
    pub fn on_cursor(&mut self, x: f32, y: f32) -> Vec3 {
        let delta = self.mouse.delta(x, y);
        self.camera.update_look_direction(delta, self.sensitivity)
    }

    /// Run one frame at time `now` (seconds): move, build the matrices from
    /// the current spin, then advance the spin for the next frame.
    pub fn frame(&mut self, now: f32, keys: MovementKeys, aspect: f32) -> FrameMatrices {
        let dt = self.timing.tick(now);
        self.camera.apply_movement(keys, dt);
        let matrices = build_matrices(&self.model, &self.camera, aspect, &self.projection);
        self.model.advance();
        self.frames += 1;
        if self.frames % 600 == 0 {
            tracing::debug!(
                frame = self.frames,
                dt,
                "camera at ({:.2}, {:.2}, {:.2}) yaw={:.1} pitch={:.1}",
                self.camera.position.x,
                self.camera.position.y,
                self.camera.position.z,
                self.camera.yaw,
                self.camera.pitch
            );
        }
        matrices
    }

    /// Frames run so far.
    pub fn frame_count(&self) -> u64 {
        self.frames
    }
}
