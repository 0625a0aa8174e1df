//! The fixed scene: a small pyramid hovering over a large ground quad.

use crate::types::{DrawVariant, SceneVertex};
use std::ops::Range;

const GROUND: [f32; 4] = [0.2, 0.8, 0.2, 1.0];

#[rustfmt::skip]
pub const SCENE_VERTICES: [SceneVertex; 8] = [
    // pyramid
    SceneVertex::new([ 0.0, 2.0, -0.5], [1.0, 0.0, 0.0, 0.0]), // back
    SceneVertex::new([-0.5, 2.0,  0.5], [0.0, 1.0, 0.0, 1.0]), // left
    SceneVertex::new([ 0.5, 2.0,  0.5], [0.0, 0.0, 1.0, 1.0]), // right
    SceneVertex::new([ 0.0, 3.0,  0.0], [1.0, 1.0, 1.0, 0.0]), // top
    // ground
    SceneVertex::new([ 100.0, 0.0,  100.0], GROUND),
    SceneVertex::new([ 100.0, 0.0, -100.0], GROUND),
    SceneVertex::new([-100.0, 0.0,  100.0], GROUND),
    SceneVertex::new([-100.0, 0.0, -100.0], GROUND),
];

#[rustfmt::skip]
pub const SCENE_INDICES: [u32; 18] = [
    0, 2, 1,
    3, 0, 1,
    3, 2, 0,
    3, 1, 2,
    4, 5, 6,
    6, 5, 7,
];

const PYRAMID_INDICES: Range<u32> = 0..12;
const GROUND_INDICES: Range<u32> = 12..18;

/// One indexed draw over a slice of [`SCENE_INDICES`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawCommand {
    pub label: &'static str,
    pub variant: DrawVariant,
    pub indices: Range<u32>,
}

/// Draw calls for one frame, in submission order.
pub fn draw_commands() -> [DrawCommand; 2] {
    [
        DrawCommand {
            label: "pyramid",
            variant: DrawVariant::WithTransform,
            indices: PYRAMID_INDICES,
        },
        DrawCommand {
            label: "ground",
            variant: DrawVariant::WithoutTransform,
            indices: GROUND_INDICES,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_reference_existing_vertices() {
        assert!(SCENE_INDICES.iter().all(|&i| (i as usize) < SCENE_VERTICES.len()));
    }

    #[test]
    fn draw_commands_cover_every_index_once() {
        let cmds = draw_commands();
        let total: u32 = cmds.iter().map(|c| c.indices.end - c.indices.start).sum();
        assert_eq!(total as usize, SCENE_INDICES.len());
        assert_eq!(cmds[0].indices.end, cmds[1].indices.start);
    }

    #[test]
    fn ground_draw_only_touches_ground_vertices() {
        let ground = &draw_commands()[1];
        assert_eq!(ground.variant, DrawVariant::WithoutTransform);
        for &i in &SCENE_INDICES[ground.indices.start as usize..ground.indices.end as usize] {
            assert_eq!(SCENE_VERTICES[i as usize].color, GROUND);
        }
    }

    #[test]
    fn pyramid_draw_never_touches_ground_vertices() {
        let pyramid = &draw_commands()[0];
        for &i in &SCENE_INDICES[pyramid.indices.start as usize..pyramid.indices.end as usize] {
            assert!(i < 4);
        }
    }
}
