use id_arena::Arena;
use wgpu::{
    DepthBiasState, Device, MultisampleState, PipelineCompilationOptions, RenderPassDescriptor,
    ShaderSource, StencilState,
};

use crate::rendering::{
    instance::Instance,
    render_mesh::{render_mesh_instances, RenderMesh, RENDER_MESH_VBL},
    shader_loader::{PipelineCache, PipelineCacheBuilder, PipelineId, ShaderDefinition},
    texture::DepthTexture,
};

/// Unlit flat-colour pass. Meshes are drawn either filled or as their edges.
pub struct BasicPass {
    solid_pipeline_id: PipelineId,
    wireframe_pipeline_id: PipelineId,
    camera_bind_group: wgpu::BindGroup,
}

pub struct BasicPassTextureViews {
    pub color: wgpu::TextureView,
    pub depth: wgpu::TextureView,
}

const BASIC_SHADER: ShaderDefinition = ShaderDefinition {
    name: "Basic Shader",
    path: "basic.wgsl",
};

impl BasicPass {
    pub fn create(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        camera_uniform_buffer: &wgpu::Buffer,
        cache_builder: &mut PipelineCacheBuilder,
    ) -> Self {
        let camera_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("camera_bind_group_layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("camera_bind_group"),
            layout: &camera_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_uniform_buffer.as_entire_binding(),
            }],
        });

        let mut add_pipeline = |label: &'static str, topology: wgpu::PrimitiveTopology| {
            let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some(label),
                bind_group_layouts: &[&camera_bind_group_layout],
                push_constant_ranges: &[],
            });

            cache_builder.add_shader(
                BASIC_SHADER,
                Box::new(
                    move |device: &Device, shader_def: &ShaderDefinition, source: &str| {
                        Ok(create_pipeline(
                            device,
                            shader_def,
                            source,
                            label,
                            &layout,
                            surface_format,
                            topology,
                        ))
                    },
                ),
            )
        };

        let solid_pipeline_id = add_pipeline(
            "Basic solid pipeline",
            wgpu::PrimitiveTopology::TriangleList,
        );
        let wireframe_pipeline_id = add_pipeline(
            "Basic wireframe pipeline",
            wgpu::PrimitiveTopology::LineList,
        );

        BasicPass {
            solid_pipeline_id,
            wireframe_pipeline_id,
            camera_bind_group,
        }
    }

    pub fn render(
        &self,
        texture_views: &BasicPassTextureViews,
        encoder: &mut wgpu::CommandEncoder,
        pipeline_cache: &PipelineCache,
        clear_color: wgpu::Color,
        render_meshes: &Arena<RenderMesh>,
    ) {
        let mut render_pass = encoder.begin_render_pass(&RenderPassDescriptor {
            label: Some("Basic Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &texture_views.color,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear_color),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &texture_views.depth,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            occlusion_query_set: None,
            timestamp_writes: None,
        });

        render_pass.set_bind_group(0, &self.camera_bind_group, &[]);

        for (pipeline_id, lines) in [
            (self.solid_pipeline_id, false),
            (self.wireframe_pipeline_id, true),
        ] {
            let Some(pipeline) = pipeline_cache.get(pipeline_id) else {
                continue;
            };
            render_pass.set_pipeline(pipeline);

            for (_id, render_mesh) in render_meshes.iter() {
                if render_mesh.draw_lines != lines || !render_mesh.instances.should_render() {
                    continue;
                }

                if let Some(index_buffer) = render_mesh.indices(lines) {
                    render_mesh_instances(&mut render_pass, render_mesh, index_buffer);
                }
            }
        }
    }
}

fn create_pipeline(
    device: &Device,
    shader_def: &ShaderDefinition,
    source: &str,
    label: &str,
    layout: &wgpu::PipelineLayout,
    surface_format: wgpu::TextureFormat,
    topology: wgpu::PrimitiveTopology,
) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(shader_def.name),
        source: ShaderSource::Wgsl(source.into()),
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[RENDER_MESH_VBL, Instance::descriptor()],
            compilation_options: PipelineCompilationOptions::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: surface_format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: PipelineCompilationOptions::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            // Open shapes such as the tube are seen from both sides.
            cull_mode: None,
            unclipped_depth: false,
            polygon_mode: wgpu::PolygonMode::Fill,
            conservative: false,
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DepthTexture::DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: StencilState::default(),
            bias: DepthBiasState::default(),
        }),
        multisample: MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}
