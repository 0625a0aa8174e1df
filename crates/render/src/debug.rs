use glam::Mat4;
use spinview_camera::{CameraState, FrameMatrices};
use std::fmt::Write;

/// Text backend: renders camera state and frame matrices as a report.
///
/// Matrices are printed row by row even though they upload column-major.
#[derive(Debug, Clone)]
pub struct DebugTextRenderer {
    precision: usize,
}

impl Default for DebugTextRenderer {
    fn default() -> Self {
        Self { precision: 4 }
    }
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_precision(precision: usize) -> Self {
        Self { precision }
    }

    pub fn render(&self, camera: &CameraState, frame: &FrameMatrices) -> String {
        let mut out = String::new();
        let p = camera.position;
        let d = camera.direction;
        let _ = writeln!(out, "=== Camera ===");
        let _ = writeln!(out, "position: ({:.3}, {:.3}, {:.3})", p.x, p.y, p.z);
        let _ = writeln!(out, "direction: ({:.3}, {:.3}, {:.3})", d.x, d.y, d.z);
        let _ = writeln!(out, "yaw={:.2} pitch={:.2} speed={:.2}", camera.yaw, camera.pitch, camera.speed);
        self.write_matrix(&mut out, "model", &frame.model);
        self.write_matrix(&mut out, "view", &frame.view);
        self.write_matrix(&mut out, "projection", &frame.projection);
        out
    }

    fn write_matrix(&self, out: &mut String, name: &str, m: &Mat4) {
        let _ = writeln!(out, "=== {name} ===");
        for r in 0..4 {
            let row = m.row(r);
            let prec = self.precision;
            let _ = writeln!(
                out,
                "[{:>w$.prec$} {:>w$.prec$} {:>w$.prec$} {:>w$.prec$}]",
                row.x,
                row.y,
                row.z,
                row.w,
                w = prec + 6,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_names_every_matrix() {
        let out = DebugTextRenderer::new().render(&CameraState::default(), &FrameMatrices::default());
        assert!(out.contains("=== model ==="));
        assert!(out.contains("=== view ==="));
        assert!(out.contains("=== projection ==="));
        assert!(out.contains("position: (0.000, 1.000, 5.000)"));
    }

    #[test]
    fn matrices_print_row_major() {
        let frame = FrameMatrices {
            model: Mat4::from_translation(glam::Vec3::new(7.0, 0.0, 0.0)),
            ..FrameMatrices::default()
        };
        let out = DebugTextRenderer::with_precision(1).render(&CameraState::default(), &frame);
        let first_row = out
            .lines()
            .skip_while(|l| *l != "=== model ===")
            .nth(1)
            .unwrap();
        assert!(first_row.trim_end().ends_with("7.0]"), "{first_row}");
    }
}
