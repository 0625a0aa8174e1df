use crate::context::GpuError;
use crate::shaders;
use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec4};
use spinview_common::{DrawVariant, SCENE_INDICES, SCENE_VERTICES, SceneVertex, draw_commands};
use spinview_render::{MatrixSlot, MatrixUploader};
use wgpu::util::DeviceExt;

/// Remaps OpenGL clip depth [-1, 1] to wgpu's [0, 1].
const OPENGL_TO_WGPU: Mat4 = Mat4::from_cols(
    Vec4::new(1.0, 0.0, 0.0, 0.0),
    Vec4::new(0.0, 1.0, 0.0, 0.0),
    Vec4::new(0.0, 0.0, 0.5, 0.0),
    Vec4::new(0.0, 0.0, 0.5, 1.0),
);

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Vertex {
    position: [f32; 3],
    color: [f32; 4],
}

impl From<SceneVertex> for Vertex {
    fn from(v: SceneVertex) -> Self {
        Self {
            position: v.position,
            color: v.color,
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct MatrixUniform {
    matrix: [[f32; 4]; 4],
}

impl MatrixUniform {
    fn new(m: &Mat4) -> Self {
        Self {
            matrix: m.to_cols_array_2d(),
        }
    }
}

/// Uniform buffers and bind group for one draw variant.
struct VariantBindings {
    buffers: [wgpu::Buffer; 3],
    bind_group: wgpu::BindGroup,
}

/// wgpu renderer for the fixed scene.
pub struct WgpuRenderer {
    fill_pipeline: wgpu::RenderPipeline,
    line_pipeline: Option<wgpu::RenderPipeline>,
    bindings: [VariantBindings; 2],
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    depth_texture: wgpu::TextureView,
    surface_format: wgpu::TextureFormat,
    clear_color: wgpu::Color,
    wireframe: bool,
}

impl WgpuRenderer {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
        clear_color: [f32; 4],
    ) -> Self {
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("matrix_bind_group_layout"),
            entries: &MatrixSlot::ALL.map(|slot| wgpu::BindGroupLayoutEntry {
                binding: slot.binding(),
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }),
        });

        let bindings = DrawVariant::ALL.map(|variant| {
            let buffers = MatrixSlot::ALL.map(|slot| {
                device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some(&format!("{variant:?}_{slot:?}_uniform")),
                    contents: bytemuck::bytes_of(&MatrixUniform::new(&Mat4::IDENTITY)),
                    usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                })
            });
            let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some(&format!("{variant:?}_bind_group")),
                layout: &bind_group_layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: MatrixSlot::Model.binding(),
                        resource: buffers[0].as_entire_binding(),
                    },
                    wgpu::BindGroupEntry {
                        binding: MatrixSlot::View.binding(),
                        resource: buffers[1].as_entire_binding(),
                    },
                    wgpu::BindGroupEntry {
                        binding: MatrixSlot::Projection.binding(),
                        resource: buffers[2].as_entire_binding(),
                    },
                ],
            });
            VariantBindings {
                buffers,
                bind_group,
            }
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::SCENE_SHADER.into()),
        });

        let fill_pipeline = Self::create_pipeline(
            device,
            &pipeline_layout,
            &shader,
            surface_format,
            wgpu::PolygonMode::Fill,
        );
        let line_pipeline = device
            .features()
            .contains(wgpu::Features::POLYGON_MODE_LINE)
            .then(|| {
                Self::create_pipeline(
                    device,
                    &pipeline_layout,
                    &shader,
                    surface_format,
                    wgpu::PolygonMode::Line,
                )
            });

        let vertices: Vec<Vertex> = SCENE_VERTICES.iter().copied().map(Vertex::from).collect();
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("scene_vertex_buffer"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("scene_index_buffer"),
            contents: bytemuck::cast_slice(&SCENE_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });

        let depth_texture = Self::create_depth_texture(device, width, height);

        let [r, g, b, a] = clear_color.map(f64::from);
        Self {
            fill_pipeline,
            line_pipeline,
            bindings,
            vertex_buffer,
            index_buffer,
            depth_texture,
            surface_format,
            clear_color: wgpu::Color { r, g, b, a },
            wireframe: false,
        }
    }

    fn create_pipeline(
        device: &wgpu::Device,
        layout: &wgpu::PipelineLayout,
        shader: &wgpu::ShaderModule,
        surface_format: wgpu::TextureFormat,
        polygon_mode: wgpu::PolygonMode,
    ) -> wgpu::RenderPipeline {
        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(match polygon_mode {
                wgpu::PolygonMode::Line => "scene_line_pipeline",
                _ => "scene_fill_pipeline",
            }),
            layout: Some(layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<Vertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![
                        0 => Float32x3,
                        1 => Float32x4,
                    ],
                }],
            },
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                polygon_mode,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        })
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth_texture = Self::create_depth_texture(device, width, height);
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.surface_format
    }

    pub fn supports_wireframe(&self) -> bool {
        self.line_pipeline.is_some()
    }

    pub fn wireframe(&self) -> bool {
        self.wireframe
    }

    pub fn set_wireframe(&mut self, enabled: bool) -> Result<(), GpuError> {
        if enabled && !self.supports_wireframe() {
            return Err(GpuError::WireframeUnsupported);
        }
        self.wireframe = enabled;
        Ok(())
    }

    /// Uploader that writes matrices into this renderer's uniforms via `queue`.
    pub fn uploader<'a>(&'a self, queue: &'a wgpu::Queue) -> QueueUploader<'a> {
        QueueUploader {
            renderer: self,
            queue,
        }
    }

    /// Record and submit one frame: clear, then one indexed draw per scene
    /// draw command with that command's variant bindings.
    pub fn render(&self, device: &wgpu::Device, queue: &wgpu::Queue, view: &wgpu::TextureView) {
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("scene_encoder"),
        });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            let pipeline = match (&self.line_pipeline, self.wireframe) {
                (Some(line), true) => line,
                _ => &self.fill_pipeline,
            };
            pass.set_pipeline(pipeline);
            pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
            pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);

            for cmd in draw_commands() {
                pass.set_bind_group(0, &self.bindings[cmd.variant.index()].bind_group, &[]);
                pass.draw_indexed(cmd.indices, 0, 0..1);
            }
        }

        queue.submit(std::iter::once(encoder.finish()));
    }

    fn create_depth_texture(
        device: &wgpu::Device,
        width: u32,
        height: u32,
    ) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("depth_texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&Default::default())
    }
}

/// [`MatrixUploader`] writing into a [`WgpuRenderer`]'s uniform buffers.
pub struct QueueUploader<'a> {
    renderer: &'a WgpuRenderer,
    queue: &'a wgpu::Queue,
}

impl MatrixUploader for QueueUploader<'_> {
    fn upload(&mut self, variant: DrawVariant, slot: MatrixSlot, matrix: &Mat4) {
        let matrix = match slot {
            MatrixSlot::Projection => OPENGL_TO_WGPU * *matrix,
            _ => *matrix,
        };
        let buffer = &self.renderer.bindings[variant.index()].buffers[slot.binding() as usize];
        self.queue
            .write_buffer(buffer, 0, bytemuck::bytes_of(&MatrixUniform::new(&matrix)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn depth_remap_maps_gl_range_to_unit_range() {
        let proj = Mat4::perspective_rh_gl(90f32.to_radians(), 1.5, 0.1, 200.0);
        let remapped = OPENGL_TO_WGPU * proj;
        let near = remapped.project_point3(Vec3::new(0.0, 0.0, -0.1));
        let far = remapped.project_point3(Vec3::new(0.0, 0.0, -200.0));
        assert!(near.z.abs() < 1e-4, "{near}");
        assert!((far.z - 1.0).abs() < 1e-4, "{far}");
    }

    #[test]
    fn depth_remap_keeps_xy() {
        let proj = Mat4::perspective_rh_gl(90f32.to_radians(), 1.5, 0.1, 100.0);
        let p = Vec3::new(0.4, -0.3, -5.0);
        let a = proj.project_point3(p);
        let b = (OPENGL_TO_WGPU * proj).project_point3(p);
        assert!((a.x - b.x).abs() < 1e-6 && (a.y - b.y).abs() < 1e-6);
    }

    #[test]
    fn vertex_layout_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<Vertex>(), 7 * 4);
        assert_eq!(std::mem::size_of::<MatrixUniform>(), 64);
    }
}
