use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};
use spinview_common::SpinConfig;

/// Accumulated spin of the transformed geometry.
///
/// `angles` holds (x, y, z) rotations in degrees. `advance` adds
/// `per_frame` once per rendered frame; the increment does not depend on
/// frame time, so spin speed follows the frame rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelTransform {
    pub angles: Vec3,
    pub pivot: Vec3,
    pub per_frame: Vec3,
}

impl Default for ModelTransform {
    fn default() -> Self {
        Self::from_config(&SpinConfig::default())
    }
}

impl ModelTransform {
    pub fn from_config(config: &SpinConfig) -> Self {
        Self {
            angles: Vec3::ZERO,
            pivot: config.pivot,
            per_frame: config.per_frame,
        }
    }

    pub fn advance(&mut self) {
        self.angles += self.per_frame;
    }

    /// Rotate about `pivot`: y first, then x, then z.
    pub fn matrix(&self) -> Mat4 {
        let mut model = Mat4::from_scale(Vec3::splat(1.0));
        model *= self.about_pivot(Mat4::from_rotation_y(self.angles.y.to_radians()));
        model *= self.about_pivot(Mat4::from_rotation_x(self.angles.x.to_radians()));
        model *= self.about_pivot(Mat4::from_rotation_z(self.angles.z.to_radians()));
        model
    }

    fn about_pivot(&self, rotation: Mat4) -> Mat4 {
        Mat4::from_translation(self.pivot) * rotation * Mat4::from_translation(-self.pivot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    #[test]
    fn zero_angles_is_identity() {
        let model = ModelTransform::default();
        assert!(model.matrix().abs_diff_eq(Mat4::IDENTITY, EPS));
    }

    #[test]
    fn pivot_is_a_fixed_point() {
        let mut model = ModelTransform::default();
        for _ in 0..37 {
            model.advance();
        }
        let p = model.matrix().transform_point3(model.pivot);
        assert!(p.abs_diff_eq(model.pivot, EPS));
    }

    #[test]
    fn rotation_displaces_around_pivot() {
        let model = ModelTransform {
            angles: Vec3::new(0.0, 90.0, 0.0),
            ..ModelTransform::default()
        };
        let moved = model.matrix().transform_point3(Vec3::ZERO);
        assert!(moved.abs_diff_eq(Vec3::new(3.0, 0.0, -3.0), EPS), "{moved}");
    }

    #[test]
    fn advance_adds_fixed_increments() {
        let mut model = ModelTransform::default();
        model.advance();
        model.advance();
        model.advance();
        assert!(model.angles.abs_diff_eq(Vec3::new(2.7, 3.6, 6.9), EPS));
    }

    #[test]
    fn composes_y_then_x_then_z() {
        let model = ModelTransform {
            angles: Vec3::new(30.0, 45.0, 60.0),
            ..ModelTransform::default()
        };
        let p = model.pivot;
        let expected = Mat4::from_translation(p)
            * Mat4::from_rotation_y(45f32.to_radians())
            * Mat4::from_rotation_x(30f32.to_radians())
            * Mat4::from_rotation_z(60f32.to_radians())
            * Mat4::from_translation(-p);
        assert!(model.matrix().abs_diff_eq(expected, EPS));
    }
}
