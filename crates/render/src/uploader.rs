use glam::Mat4;
use spinview_camera::FrameMatrices;
use spinview_common::DrawVariant;

/// Fixed uniform slot of each per-frame matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u32)]
pub enum MatrixSlot {
    Model = 0,
    View = 1,
    Projection = 2,
}

impl MatrixSlot {
    pub const ALL: [MatrixSlot; 3] = [MatrixSlot::Model, MatrixSlot::View, MatrixSlot::Projection];

    pub const fn binding(self) -> u32 {
        self as u32
    }
}

/// Sink for per-frame matrices. Implemented by each graphics backend.
pub trait MatrixUploader {
    /// Store `matrix` in `slot` of the uniforms bound for `variant` draws.
    fn upload(&mut self, variant: DrawVariant, slot: MatrixSlot, matrix: &Mat4);
}

/// Matrix a variant sees in a given slot.
fn matrix_for(frame: &FrameMatrices, variant: DrawVariant, slot: MatrixSlot) -> Mat4 {
    match (slot, variant) {
        (MatrixSlot::Model, DrawVariant::WithTransform) => frame.model,
        (MatrixSlot::Model, DrawVariant::WithoutTransform) => Mat4::IDENTITY,
        (MatrixSlot::View, _) => frame.view,
        (MatrixSlot::Projection, _) => frame.projection,
    }
}

/// Upload one frame's matrices for every draw variant.
pub fn upload_frame<U: MatrixUploader + ?Sized>(uploader: &mut U, frame: &FrameMatrices) {
    for variant in DrawVariant::ALL {
        for slot in MatrixSlot::ALL {
            uploader.upload(variant, slot, &matrix_for(frame, variant, slot));
        }
    }
    tracing::trace!("uploaded frame matrices for {} variants", DrawVariant::ALL.len());
}

/// One recorded upload, column-major.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Upload {
    pub variant: DrawVariant,
    pub slot: MatrixSlot,
    pub columns: [f32; 16],
}

/// Uploader that keeps every upload in memory. Used by tests and the CLI.
#[derive(Debug, Default)]
pub struct RecordingUploader {
    uploads: Vec<Upload>,
}

impl RecordingUploader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn uploads(&self) -> &[Upload] {
        &self.uploads
    }

    /// Most recent matrix uploaded to `slot` for `variant`.
    pub fn latest(&self, variant: DrawVariant, slot: MatrixSlot) -> Option<Mat4> {
        self.uploads
            .iter()
            .rev()
            .find(|u| u.variant == variant && u.slot == slot)
            .map(|u| Mat4::from_cols_array(&u.columns))
    }

    pub fn clear(&mut self) {
        self.uploads.clear();
    }
}

impl MatrixUploader for RecordingUploader {
    fn upload(&mut self, variant: DrawVariant, slot: MatrixSlot, matrix: &Mat4) {
        self.uploads.push(Upload {
            variant,
            slot,
            columns: matrix.to_cols_array(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spinview_camera::{MovementKeys, ViewRig};

    fn sample_frame() -> FrameMatrices {
        let mut rig = ViewRig::default();
        rig.frame(0.016, MovementKeys::default(), 1.5);
        rig.frame(0.032, MovementKeys::default(), 1.5)
    }

    #[test]
    fn slots_have_fixed_bindings() {
        assert_eq!(MatrixSlot::Model.binding(), 0);
        assert_eq!(MatrixSlot::View.binding(), 1);
        assert_eq!(MatrixSlot::Projection.binding(), 2);
    }

    #[test]
    fn frame_uploads_every_slot_for_every_variant() {
        let mut rec = RecordingUploader::new();
        upload_frame(&mut rec, &sample_frame());
        assert_eq!(rec.uploads().len(), DrawVariant::ALL.len() * MatrixSlot::ALL.len());
        for variant in DrawVariant::ALL {
            for slot in MatrixSlot::ALL {
                assert!(rec.latest(variant, slot).is_some());
            }
        }
    }

    #[test]
    fn static_variant_gets_identity_model() {
        let frame = sample_frame();
        assert_ne!(frame.model, Mat4::IDENTITY);

        let mut rec = RecordingUploader::new();
        upload_frame(&mut rec, &frame);
        assert_eq!(
            rec.latest(DrawVariant::WithoutTransform, MatrixSlot::Model),
            Some(Mat4::IDENTITY)
        );
        assert_eq!(
            rec.latest(DrawVariant::WithTransform, MatrixSlot::Model),
            Some(frame.model)
        );
    }

    #[test]
    fn view_and_projection_shared_between_variants() {
        let frame = sample_frame();
        let mut rec = RecordingUploader::new();
        upload_frame(&mut rec, &frame);
        for variant in DrawVariant::ALL {
            assert_eq!(rec.latest(variant, MatrixSlot::View), Some(frame.view));
            assert_eq!(rec.latest(variant, MatrixSlot::Projection), Some(frame.projection));
        }
    }

    #[test]
    fn uploads_are_column_major() {
        let frame = FrameMatrices {
            model: Mat4::from_translation(glam::Vec3::new(1.0, 2.0, 3.0)),
            ..FrameMatrices::default()
        };
        let mut rec = RecordingUploader::new();
        upload_frame(&mut rec, &frame);
        let model = rec
            .uploads()
            .iter()
            .find(|u| u.variant == DrawVariant::WithTransform && u.slot == MatrixSlot::Model)
            .unwrap();
        assert_eq!(&model.columns[12..15], &[1.0f32, 2.0, 3.0]);
    }

    #[test]
    fn works_through_trait_object() {
        let mut rec = RecordingUploader::new();
        {
            let dyn_uploader: &mut dyn MatrixUploader = &mut rec;
            upload_frame(dyn_uploader, &FrameMatrices::default());
        }
        assert_eq!(rec.uploads().len(), 6);
        rec.clear();
        assert!(rec.uploads().is_empty());
    }
}
