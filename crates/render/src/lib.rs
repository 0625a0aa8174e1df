//! Rendering Adapter: renderer-agnostic matrix upload.
//!
//! # Invariants
//! - Every frame uploads all three slots for every draw variant.
//! - The static variant always sees the identity in the model slot.
//! - Backends receive column-major matrices; this crate never talks to a GPU.

mod debug;
mod uploader;

pub use debug::DebugTextRenderer;
pub use spinview_common::DrawVariant;
pub use uploader::{MatrixSlot, MatrixUploader, RecordingUploader, Upload, upload_frame};

pub fn crate_info() -> &'static str {
    concat!("spinview-render v", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("render"));
    }
}
