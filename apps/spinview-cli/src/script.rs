//! Scripted input replay.
//!
//! A script is JSON:
//! ```json
//! {
//!   "aspect": 1.5,
//!   "frames": [
//!     { "dt": 0.016, "keys": ["w", "d"], "cursor": [410.0, 300.0] },
//!     { "dt": 0.016 }
//!   ]
//! }
//! ```
//! `keys` lists the keys held during the frame; `cursor` is an absolute
//! pointer sample delivered before the frame runs.

use serde::Deserialize;
use spinview_camera::{FrameMatrices, ViewRig};
use spinview_input::{InputState, Key};
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("frame {frame}: unknown key `{key}`")]
    UnknownKey { frame: usize, key: String },
    #[error("frame {frame}: dt must be a non-negative number, got {dt}")]
    InvalidDelta { frame: usize, dt: f32 },
    #[error("aspect ratio must be positive, got {0}")]
    InvalidAspect(f32),
}

fn default_aspect() -> f32 {
    1080.0 / 720.0
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScriptFrame {
    pub dt: f32,
    #[serde(default)]
    pub keys: Vec<String>,
    #[serde(default)]
    pub cursor: Option<[f32; 2]>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Script {
    #[serde(default = "default_aspect")]
    pub aspect: f32,
    pub frames: Vec<ScriptFrame>,
}

impl Script {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ReplayError> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self, ReplayError> {
        let script: Script = serde_json::from_str(text)?;
        if !(script.aspect.is_finite() && script.aspect > 0.0) {
            return Err(ReplayError::InvalidAspect(script.aspect));
        }
        for (i, frame) in script.frames.iter().enumerate() {
            if !(frame.dt.is_finite() && frame.dt >= 0.0) {
                return Err(ReplayError::InvalidDelta { frame: i, dt: frame.dt });
            }
            if let Some(key) = frame.keys.iter().find(|k| Key::from_name(k).is_none()) {
                return Err(ReplayError::UnknownKey {
                    frame: i,
                    key: key.clone(),
                });
            }
        }
        Ok(script)
    }

    /// Play the script against `rig`. Returns the last frame's matrices, or
    /// `None` for an empty script.
    pub fn run(&self, rig: &mut ViewRig) -> Option<FrameMatrices> {
        let mut input = InputState::new();
        let mut now = rig.timing.current();
        let mut last = None;

        for frame in &self.frames {
            if let Some([x, y]) = frame.cursor {
                rig.on_cursor(x, y);
            }
            input.release_all();
            for key in frame.keys.iter().filter_map(|k| Key::from_name(k)) {
                input.handle_key(key, true);
            }
            now += frame.dt;
            last = Some(rig.frame(now, input.movement(), self.aspect));
        }

        tracing::debug!("replayed {} frames", self.frames.len());
        last
    }
}
