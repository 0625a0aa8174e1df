//! Camera/Transform Math: turns accumulated input into per-frame matrices.
//!
//! # Invariants
//! - Pitch stays within [-89, 89] degrees after every look update.
//! - The look direction is unit length after every look update.
//! - Model spin advances by fixed per-frame increments, independent of frame time.
//! - Nothing here touches a graphics API; matrices are plain `glam::Mat4`.

pub mod camera;
pub mod matrices;
pub mod model;
pub mod mouse;
pub mod rig;
pub mod timing;

pub use camera::{CameraState, MovementKeys, PITCH_LIMIT, look_direction};
pub use matrices::{FrameMatrices, Projection, build_matrices};
pub use model::ModelTransform;
pub use mouse::MouseState;
pub use rig::ViewRig;
pub use timing::FrameTiming;
