use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use spinview_common::CameraConfig;

/// Pitch is clamped to +/- this many degrees so the view never reaches a pole.
pub const PITCH_LIMIT: f32 = 89.0;

/// Movement keys currently held. Polled once per frame; several keys held at
/// once compose additively.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementKeys {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

impl MovementKeys {
    pub fn any(&self) -> bool {
        self.forward || self.backward || self.left || self.right
    }
}

/// Unit look direction for a yaw/pitch pair in degrees.
pub fn look_direction(yaw: f32, pitch: f32) -> Vec3 {
    let (yaw, pitch) = (yaw.to_radians(), pitch.to_radians());
    Vec3::new(
        yaw.cos() * pitch.cos(),
        pitch.sin(),
        yaw.sin() * pitch.cos(),
    )
    .normalize()
}

/// First-person camera. Angles are in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraState {
    pub position: Vec3,
    pub direction: Vec3,
    pub up: Vec3,
    /// Accumulates without wrapping.
    pub yaw: f32,
    pub pitch: f32,
    /// Units per second.
    pub speed: f32,
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 1.0, 5.0),
            direction: Vec3::NEG_Z,
            up: Vec3::Y,
            yaw: -90.0,
            pitch: 0.0,
            speed: 2.0,
        }
    }
}

impl CameraState {
    pub fn from_config(config: &CameraConfig) -> Self {
        let pitch = config.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        Self {
            position: config.position,
            direction: look_direction(config.yaw, pitch),
            up: Vec3::Y,
            yaw: config.yaw,
            pitch,
            speed: config.speed,
        }
    }

    /// Apply a raw cursor delta (screen space, y down) scaled by `sensitivity`
    /// degrees per pixel, and return the new look direction.
    ///
    /// Moving the cursor up (negative `delta.y`) raises the pitch.
    pub fn update_look_direction(&mut self, delta: Vec2, sensitivity: f32) -> Vec3 {
        self.yaw += delta.x * sensitivity;
        self.pitch -= delta.y * sensitivity;
        self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.direction = look_direction(self.yaw, self.pitch);
        self.direction
    }

    /// Strafe axis: `normalize(direction x up)`.
    ///
    /// Undefined (NaN) when the direction is parallel to `up`; the pitch clamp
    /// keeps look updates away from that case.
    pub fn right(&self) -> Vec3 {
        self.direction.cross(self.up).normalize()
    }

    /// Move for one frame with the held keys and return the new position.
    pub fn apply_movement(&mut self, keys: MovementKeys, dt: f32) -> Vec3 {
        let dist = self.speed * dt;
        if keys.forward {
            self.position += self.direction * dist;
        }
        if keys.backward {
            self.position -= self.direction * dist;
        }
        if keys.left {
            self.position -= self.right() * dist;
        }
        if keys.right {
            self.position += self.right() * dist;
        }
        self.position
    }
}
