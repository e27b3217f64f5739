use std::mem::offset_of;

use id_arena::Id;
use wgpu::util::DeviceExt;

use crate::{
    geometry::Vertex,
    rendering::instance::{InstanceBuffer, Instances},
    scene_graph::SceneMesh,
};

pub type RenderMeshId = Id<RenderMesh>;

pub struct IndexBuffer {
    pub buffer: wgpu::Buffer,
    pub num_indices: u32,
}

impl IndexBuffer {
    fn new(device: &wgpu::Device, label: &str, indices: &[u32]) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            buffer,
            num_indices: indices.len() as u32,
        }
    }
}

/// GPU buffers for one scene mesh.
pub struct RenderMesh {
    pub vertex_buffer: wgpu::Buffer,
    /// Filled faces, absent for line helpers
    pub triangles: Option<IndexBuffer>,
    pub edges: IndexBuffer,
    pub instances: Instances,
    pub instance_buffer: InstanceBuffer,
    /// Whether this frame draws the edges instead of the faces
    pub draw_lines: bool,
}

impl RenderMesh {
    pub fn from_scene_mesh(device: &wgpu::Device, mesh: &SceneMesh) -> Self {
        let geometry = &mesh.geometry;

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("Vertex buffer ({})", mesh.name)),
            contents: bytemuck::cast_slice(&geometry.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let triangles = (geometry.triangle_count() > 0).then(|| {
            IndexBuffer::new(
                device,
                &format!("Triangle index buffer ({})", mesh.name),
                &geometry.indices,
            )
        });

        let edges = IndexBuffer::new(
            device,
            &format!("Edge index buffer ({})", mesh.name),
            &geometry.edge_indices(),
        );

        Self {
            vertex_buffer,
            triangles,
            edges,
            instances: Instances::new(),
            instance_buffer: InstanceBuffer::new(device, &mesh.name),
            draw_lines: mesh.draws_lines(),
        }
    }

    pub fn write_instances(&self, queue: &wgpu::Queue) {
        if self.instances.should_render() {
            self.instances.write_to_buffer(queue, &self.instance_buffer);
        }
    }

    /// Index buffer for the given topology, if this mesh has one.
    pub fn indices(&self, lines: bool) -> Option<&IndexBuffer> {
        if lines {
            Some(&self.edges)
        } else {
            self.triangles.as_ref()
        }
    }
}

pub fn render_mesh_instances(
    render_pass: &mut wgpu::RenderPass<'_>,
    render_mesh: &RenderMesh,
    index_buffer: &IndexBuffer,
) {
    render_pass.set_vertex_buffer(0, render_mesh.vertex_buffer.slice(..));
    render_mesh.instance_buffer.bind(render_pass);
    render_pass.set_index_buffer(index_buffer.buffer.slice(..), wgpu::IndexFormat::Uint32);
    render_pass.draw_indexed(
        0..index_buffer.num_indices,
        0,
        0..render_mesh.instances.len() as u32,
    );
}

pub const RENDER_MESH_VBL: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
    array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
    step_mode: wgpu::VertexStepMode::Vertex,
    attributes: &[
        wgpu::VertexAttribute {
            offset: offset_of!(Vertex, position) as wgpu::BufferAddress,
            shader_location: 0,
            format: wgpu::VertexFormat::Float32x3,
        },
        wgpu::VertexAttribute {
            offset: offset_of!(Vertex, normal) as wgpu::BufferAddress,
            shader_location: 1,
            format: wgpu::VertexFormat::Float32x3,
        },
    ],
};
