//! Shared types for the spinview workspace.
//!
//! # Invariants
//! - The scene mesh is fixed at compile time; nothing mutates it.
//! - Every configuration field has a default, so an empty config file is valid.

pub mod config;
pub mod scene;
pub mod types;

pub use config::{CameraConfig, ConfigError, SpinConfig, ViewerConfig, WindowConfig};
pub use scene::{DrawCommand, SCENE_INDICES, SCENE_VERTICES, draw_commands};
pub use types::{DrawVariant, ProjectionProfile, SceneVertex};
