use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A vertex of the fixed scene: position plus RGBA colour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SceneVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

impl SceneVertex {
    pub const fn new(position: [f32; 3], color: [f32; 4]) -> Self {
        Self { position, color }
    }
}

/// Which uniform binding a draw uses.
///
/// Transformed geometry sees the accumulated model matrix in slot 0; static
/// geometry always sees the identity there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DrawVariant {
    WithTransform,
    WithoutTransform,
}

impl DrawVariant {
    pub const ALL: [DrawVariant; 2] = [DrawVariant::WithTransform, DrawVariant::WithoutTransform];

    /// Stable index, used for per-variant GPU resources.
    pub const fn index(self) -> usize {
        match self {
            DrawVariant::WithTransform => 0,
            DrawVariant::WithoutTransform => 1,
        }
    }
}

/// Far-plane choice. The two demo builds differ only in this value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectionProfile {
    /// Far plane at 200 units.
    #[default]
    Standard,
    /// Far plane at 100 units.
    Short,
}

impl ProjectionProfile {
    pub const fn far_plane(self) -> f32 {
        match self {
            ProjectionProfile::Standard => 200.0,
            ProjectionProfile::Short => 100.0,
        }
    }
}

impl fmt::Display for ProjectionProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectionProfile::Standard => f.write_str("standard"),
            ProjectionProfile::Short => f.write_str("short"),
        }
    }
}

impl FromStr for ProjectionProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "standard" => Ok(ProjectionProfile::Standard),
            "short" => Ok(ProjectionProfile::Short),
            other => Err(format!(
                "unknown projection profile `{other}` (expected `standard` or `short`)"
            )),
        }
    }
}
