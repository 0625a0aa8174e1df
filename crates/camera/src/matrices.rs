use crate::camera::CameraState;
use crate::model::ModelTransform;
use glam::Mat4;
use spinview_common::ProjectionProfile;

/// Perspective parameters. The field of view is vertical, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self::for_profile(ProjectionProfile::default())
    }
}

impl Projection {
    pub fn for_profile(profile: ProjectionProfile) -> Self {
        Self {
            fov_y_degrees: 90.0,
            near: 0.1,
            far: profile.far_plane(),
        }
    }

    /// Right-handed perspective with OpenGL clip depth in [-1, 1].
    pub fn matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_y_degrees.to_radians(), aspect, self.near, self.far)
    }
}

/// The three matrices uploaded each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameMatrices {
    pub model: Mat4,
    pub view: Mat4,
    pub projection: Mat4,
}

impl Default for FrameMatrices {
    fn default() -> Self {
        Self {
            model: Mat4::IDENTITY,
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
        }
    }
}

impl FrameMatrices {
    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }
}

/// Build model, view and projection for one frame.
///
/// The view looks along the camera's direction from its position, not at a
/// target point. Degenerate inputs (zero direction, zero aspect) propagate
/// NaN rather than failing.
pub fn build_matrices(
    model: &ModelTransform,
    camera: &CameraState,
    aspect: f32,
    projection: &Projection,
) -> FrameMatrices {
    FrameMatrices {
        model: model.matrix(),
        view: Mat4::look_to_rh(camera.position, camera.direction, camera.up),
        projection: projection.matrix(aspect),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Vec2, Vec3, Vec4};

    #[test]
    fn perspective_matches_reference_formula() {
        let (fov, aspect, near, far) = (90f32.to_radians(), 1080.0 / 720.0, 0.1f32, 200.0f32);
        let f = 1.0 / (fov * 0.5).tan();
        let expected = Mat4::from_cols(
            Vec4::new(f / aspect, 0.0, 0.0, 0.0),
            Vec4::new(0.0, f, 0.0, 0.0),
            Vec4::new(0.0, 0.0, (far + near) / (near - far), -1.0),
            Vec4::new(0.0, 0.0, 2.0 * far * near / (near - far), 0.0),
        );
        let actual = Projection::for_profile(ProjectionProfile::Standard).matrix(aspect);
        let (a, e) = (actual.to_cols_array(), expected.to_cols_array());
        for i in 0..16 {
            assert!((a[i] - e[i]).abs() < 1e-5, "element {i}: {} vs {}", a[i], e[i]);
        }
    }

    #[test]
    fn short_profile_changes_only_depth_terms() {
        let standard = Projection::for_profile(ProjectionProfile::Standard).matrix(1.5);
        let short = Projection::for_profile(ProjectionProfile::Short).matrix(1.5);
        assert_eq!(standard.x_axis, short.x_axis);
        assert_eq!(standard.y_axis, short.y_axis);
        assert_ne!(standard.z_axis, short.z_axis);
    }

    #[test]
    fn near_and_far_map_to_clip_bounds() {
        let proj = Projection::for_profile(ProjectionProfile::Short);
        let m = proj.matrix(1.0);
        let near = m.project_point3(Vec3::new(0.0, 0.0, -proj.near));
        let far = m.project_point3(Vec3::new(0.0, 0.0, -proj.far));
        assert!((near.z + 1.0).abs() < 1e-4);
        assert!((far.z - 1.0).abs() < 1e-4);
    }

    #[test]
    fn view_puts_camera_at_origin_looking_down_negative_z() {
        let mut cam = CameraState::default();
        cam.update_look_direction(Vec2::new(120.0, -45.0), 0.1);
        let m = build_matrices(&ModelTransform::default(), &cam, 1.5, &Projection::default());

        let eye = m.view.transform_point3(cam.position);
        assert!(eye.abs_diff_eq(Vec3::ZERO, 1e-4));

        let ahead = m.view.transform_point3(cam.position + cam.direction * 3.0);
        assert!(ahead.abs_diff_eq(Vec3::new(0.0, 0.0, -3.0), 1e-4), "{ahead}");
    }

    #[test]
    fn default_frame_centres_point_ahead() {
        let cam = CameraState::default();
        let m = build_matrices(&ModelTransform::default(), &cam, 1080.0 / 720.0, &Projection::default());
        let clip = m.view_projection().project_point3(cam.position + Vec3::NEG_Z * 10.0);
        assert!(clip.x.abs() < 1e-5 && clip.y.abs() < 1e-5);
        assert!(clip.z > -1.0 && clip.z < 1.0);
    }

    #[test]
    fn model_matrix_comes_from_spin_state() {
        let mut spin = ModelTransform::default();
        spin.advance();
        let m = build_matrices(&spin, &CameraState::default(), 1.0, &Projection::default());
        assert_eq!(m.model, spin.matrix());
        assert_ne!(m.model, Mat4::IDENTITY);
    }
}
