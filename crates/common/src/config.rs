//! Viewer configuration.
//!
//! Loaded from YAML (`.yaml`, `.yml`) or JSON (`.json`). Missing fields fall
//! back to the defaults below, which reproduce the stock demo.

use crate::types::ProjectionProfile;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Errors from loading or validating a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported config format: {0}")]
    UnsupportedFormat(PathBuf),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "spinview".into(),
            width: 1080,
            height: 720,
        }
    }
}

impl WindowConfig {
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

/// Initial camera pose and input tuning. Angles are in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    /// Units per second.
    pub speed: f32,
    /// Degrees per pixel of cursor motion.
    pub sensitivity: f32,
    /// Cursor position assumed before the first motion event.
    pub initial_cursor: [f32; 2],
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 1.0, 5.0),
            yaw: -90.0,
            pitch: 0.0,
            speed: 2.0,
            sensitivity: 0.1,
            initial_cursor: [400.0, 300.0],
        }
    }
}

/// Model spin: pivot and per-frame increments in degrees.
///
/// Increments are applied once per rendered frame regardless of frame time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpinConfig {
    pub pivot: Vec3,
    /// (x, y, z) degrees added per frame.
    pub per_frame: Vec3,
}

impl Default for SpinConfig {
    fn default() -> Self {
        Self {
            pivot: Vec3::new(0.0, 0.0, -3.0),
            per_frame: Vec3::new(0.9, 1.2, 2.3),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub window: WindowConfig,
    pub profile: ProjectionProfile,
    pub camera: CameraConfig,
    pub spin: SpinConfig,
    pub clear_color: [f32; 4],
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            profile: ProjectionProfile::default(),
            camera: CameraConfig::default(),
            spin: SpinConfig::default(),
            clear_color: [100.0 / 255.0, 180.0 / 255.0, 1.0, 1.0],
        }
    }
}

impl ViewerConfig {
    /// Load a config file, picking the format from its extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config: ViewerConfig = match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => serde_yaml::from_str(&text)?,
            Some("json") => serde_json::from_str(&text)?,
            _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        };
        config.validate()?;
        tracing::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Load `path` if given, otherwise return the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "window size must be non-zero, got {}x{}",
                self.window.width, self.window.height
            )));
        }
        let cam = &self.camera;
        if !cam.position.is_finite() || !cam.yaw.is_finite() || !cam.pitch.is_finite() {
            return Err(ConfigError::Invalid(format!(
                "camera position, yaw and pitch must be finite, got {} yaw={} pitch={}",
                cam.position, cam.yaw, cam.pitch
            )));
        }
        if !self.camera.speed.is_finite() || self.camera.speed < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "camera speed must be a non-negative number, got {}",
                self.camera.speed
            )));
        }
        if !self.camera.sensitivity.is_finite() {
            return Err(ConfigError::Invalid("mouse sensitivity must be finite".into()));
        }
        if !self.spin.pivot.is_finite() || !self.spin.per_frame.is_finite() {
            return Err(ConfigError::Invalid("spin pivot and increments must be finite".into()));
        }
        Ok(())
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_match_stock_demo() {
        let cfg = ViewerConfig::default();
        assert_eq!(cfg.window.width, 1080);
        assert_eq!(cfg.window.height, 720);
        assert_eq!(cfg.camera.position, Vec3::new(0.0, 1.0, 5.0));
        assert_eq!(cfg.camera.yaw, -90.0);
        assert_eq!(cfg.camera.speed, 2.0);
        assert_eq!(cfg.spin.pivot, Vec3::new(0.0, 0.0, -3.0));
        assert_eq!(cfg.profile.far_plane(), 200.0);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn partial_yaml_fills_defaults() {
        let file = write_temp(".yaml", "profile: short\ncamera:\n  speed: 4.5\n");
        let cfg = ViewerConfig::load(file.path()).unwrap();
        assert_eq!(cfg.profile, ProjectionProfile::Short);
        assert_eq!(cfg.camera.speed, 4.5);
        assert_eq!(cfg.camera.sensitivity, 0.1);
        assert_eq!(cfg.window, WindowConfig::default());
    }

    #[test]
    fn json_config_loads() {
        let file = write_temp(".json", r#"{"window": {"width": 640, "height": 480}}"#);
        let cfg = ViewerConfig::load(file.path()).unwrap();
        assert_eq!(cfg.window.width, 640);
        assert!((cfg.window.aspect() - 640.0 / 480.0).abs() < 1e-6);
    }

    #[test]
    fn yaml_dump_reloads_to_same_config() {
        let cfg = ViewerConfig::default();
        let file = write_temp(".yml", &cfg.to_yaml().unwrap());
        assert_eq!(ViewerConfig::load(file.path()).unwrap(), cfg);
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let file = write_temp(".ini", "speed=1");
        let err = ViewerConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
    }

    #[test]
    fn zero_window_is_invalid() {
        let file = write_temp(".yaml", "window:\n  height: 0\n");
        let err = ViewerConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn negative_speed_is_invalid() {
        let mut cfg = ViewerConfig::default();
        cfg.camera.speed = -1.0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn non_finite_camera_pose_is_invalid() {
        let file = write_temp(".yaml", "camera:\n  pitch: .nan\n");
        let err = ViewerConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let mut cfg = ViewerConfig::default();
        cfg.camera.yaw = f32::INFINITY;
        assert!(cfg.validate().is_err());

        let mut cfg = ViewerConfig::default();
        cfg.camera.position.x = f32::NAN;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn out_of_range_pitch_is_accepted_and_clamped_later() {
        let mut cfg = ViewerConfig::default();
        cfg.camera.pitch = 120.0;
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = ViewerConfig::load("/nonexistent/spinview.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn load_or_default_without_path() {
        assert_eq!(ViewerConfig::load_or_default(None).unwrap(), ViewerConfig::default());
    }
}
