//! wgpu render backend for spinview.
//!
//! Draws the fixed scene in two passes over one index buffer: the spinning
//! pyramid with its model matrix and the ground with the identity.
//!
//! # Invariants
//! - Each draw variant owns its own model/view/projection uniforms at bindings 0/1/2.
//! - Projection matrices arrive with OpenGL depth and are remapped to wgpu's [0, 1] on upload.
//! - Surface loss is recovered by reconfiguring, never by panicking.

mod context;
mod gpu;
mod shaders;

pub use context::{GpuContext, GpuError};
pub use gpu::{QueueUploader, WgpuRenderer};
