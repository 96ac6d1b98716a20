use anyhow::Result;
use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::math::Mat4;
use crate::mesh::{Mesh, Vertex};
use crate::render::{RenderCtx, RenderTarget};
use crate::shader::{ShaderProgram, TRANSFORM_BINDING, TRANSFORM_GROUP};

/// `transform` uniform block: one column-major `mat4x4<f32>`.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct TransformUniform {
    cols: [[f32; 4]; 4],
}

impl TransformUniform {
    fn from_mat(m: &Mat4) -> Self {
        Self { cols: m.to_cols_array() }
    }
}

/// Draws one static indexed mesh with a per-frame transform.
///
/// All GPU objects are created in [`CubeRenderer::new`]. Per frame, only the
/// transform uniform is rewritten. The pipeline is rebuilt if the surface
/// format changes.
pub struct CubeRenderer {
    program: ShaderProgram,

    pipeline_format: wgpu::TextureFormat,
    pipeline_depth: Option<wgpu::TextureFormat>,
    pipeline: wgpu::RenderPipeline,

    bind_group_layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
    transform_ubo: wgpu::Buffer,

    vbo: wgpu::Buffer,
    ibo: wgpu::Buffer,
    index_count: u32,
}

impl CubeRenderer {
    /// Creates the pipeline, uploads `mesh` and allocates the transform uniform.
    ///
    /// `program` must come from [`ShaderSources::compile`](crate::shader::ShaderSources::compile).
    pub fn new(ctx: &RenderCtx<'_>, program: ShaderProgram, mesh: Mesh) -> Result<Self> {
        mesh.validate()?;

        let bind_group_layout = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("cuboid transform bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: TRANSFORM_BINDING,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(
                        std::mem::size_of::<TransformUniform>() as u64,
                    ),
                },
                count: None,
            }],
        });

        let transform_ubo = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("cuboid transform ubo"),
            contents: bytemuck::bytes_of(&TransformUniform::from_mat(&Mat4::IDENTITY)),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("cuboid transform bind group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: TRANSFORM_BINDING,
                resource: transform_ubo.as_entire_binding(),
            }],
        });

        let vbo = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("cuboid mesh vbo"),
            contents: bytemuck::cast_slice(mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let ibo = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("cuboid mesh ibo"),
            contents: bytemuck::cast_slice(mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let pipeline = build_pipeline(ctx, &program, &bind_group_layout);

        log::debug!(
            "cube renderer ready: {} vertices, {} indices",
            mesh.vertices.len(),
            mesh.index_count()
        );

        Ok(Self {
            program,
            pipeline_format: ctx.surface_format,
            pipeline_depth: ctx.depth_format,
            pipeline,
            bind_group_layout,
            bind_group,
            transform_ubo,
            vbo,
            ibo,
            index_count: mesh.index_count(),
        })
    }

    /// Uploads `transform` and draws the whole mesh into `target`.
    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, transform: &Mat4) {
        self.ensure_pipeline(ctx);

        ctx.queue.write_buffer(
            &self.transform_ubo,
            0,
            bytemuck::bytes_of(&TransformUniform::from_mat(transform)),
        );

        let depth_stencil_attachment =
            target.depth_view.map(|view| wgpu::RenderPassDepthStencilAttachment {
                view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            });

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("cuboid cube pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(TRANSFORM_GROUP, &self.bind_group, &[]);
        rpass.set_vertex_buffer(0, self.vbo.slice(..));
        rpass.set_index_buffer(self.ibo.slice(..), wgpu::IndexFormat::Uint32);
        rpass.draw_indexed(0..self.index_count, 0, 0..1);
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == ctx.surface_format && self.pipeline_depth == ctx.depth_format {
            return;
        }

        log::debug!("surface format changed to {:?}; rebuilding cube pipeline", ctx.surface_format);
        self.pipeline = build_pipeline(ctx, &self.program, &self.bind_group_layout);
        self.pipeline_format = ctx.surface_format;
        self.pipeline_depth = ctx.depth_format;
    }
}

fn build_pipeline(
    ctx: &RenderCtx<'_>,
    program: &ShaderProgram,
    bind_group_layout: &wgpu::BindGroupLayout,
) -> wgpu::RenderPipeline {
    let vs = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("cuboid vertex shader"),
        source: wgpu::ShaderSource::Wgsl(program.sources.vertex.into()),
    });
    let fs = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("cuboid fragment shader"),
        source: wgpu::ShaderSource::Wgsl(program.sources.fragment.into()),
    });

    let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("cuboid pipeline layout"),
        bind_group_layouts: &[bind_group_layout],
        immediate_size: 0,
    });

    let depth_stencil = ctx.depth_format.map(|format| wgpu::DepthStencilState {
        format,
        depth_write_enabled: true,
        depth_compare: wgpu::CompareFunction::Less,
        stencil: wgpu::StencilState::default(),
        bias: wgpu::DepthBiasState::default(),
    });

    ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("cuboid pipeline"),
        layout: Some(&pipeline_layout),

        vertex: wgpu::VertexState {
            module: &vs,
            entry_point: Some(program.sources.vertex_entry),
            compilation_options: Default::default(),
            buffers: &[Vertex::layout()],
        },

        fragment: Some(wgpu::FragmentState {
            module: &fs,
            entry_point: Some(program.sources.fragment_entry),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format: ctx.surface_format,
                blend: None,
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),

        // Faces are not wound consistently outward, so nothing is culled.
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },

        depth_stencil,
        multisample: wgpu::MultisampleState::default(),

        multiview_mask: None,
        cache: None,
    })
}
