/// WGSL shader for the scene. The model matrix is whatever the draw's bind
/// group holds; static geometry is bound to an identity.
pub const SCENE_SHADER: &str = r#"
@group(0) @binding(0)
var<uniform> u_transform: mat4x4<f32>;
@group(0) @binding(1)
var<uniform> u_view: mat4x4<f32>;
@group(0) @binding(2)
var<uniform> u_projection: mat4x4<f32>;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) color: vec4<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec4<f32>,
};

@vertex
fn vs_main(vertex: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    out.clip_position = u_projection * u_view * (u_transform * vec4<f32>(vertex.position, 1.0));
    out.color = vertex.color;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return in.color;
}
"#;
