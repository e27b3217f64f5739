use std::mem::size_of;

use glam::{Mat4, Vec4};
use id_arena::Arena;
use wgpu::BufferUsages;

use crate::{material::Color, rendering::render_mesh::RenderMesh, scene_graph::Scene};

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Instance {
    pub model: Mat4,
    /// Linear RGBA
    pub color: Vec4,
}

impl Instance {
    pub fn new(model: Mat4, color: Color) -> Self {
        Self {
            model,
            color: color.to_linear_rgba(),
        }
    }

    pub fn descriptor() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<Instance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 5,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: size_of::<[f32; 4]>() as wgpu::BufferAddress,
                    shader_location: 6,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: size_of::<[f32; 8]>() as wgpu::BufferAddress,
                    shader_location: 7,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: size_of::<[f32; 12]>() as wgpu::BufferAddress,
                    shader_location: 8,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: size_of::<Mat4>() as wgpu::BufferAddress,
                    shader_location: 9,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

#[derive(Debug, Default)]
pub struct Instances {
    instances: Vec<Instance>,
}

impl Instances {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, instance: Instance) {
        self.instances.push(instance);
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    pub fn write_to_buffer(&self, queue: &wgpu::Queue, instance_buffer: &InstanceBuffer) {
        let count = self.instances.len().min(InstanceBuffer::MAX_INSTANCES as usize);
        if count < self.instances.len() {
            log::warn!(
                "Dropping {} instances over the buffer capacity",
                self.instances.len() - count
            );
        }

        queue.write_buffer(
            instance_buffer.buffer(),
            0,
            bytemuck::cast_slice(&self.instances[..count]),
        );
    }

    pub fn should_render(&self) -> bool {
        !self.instances.is_empty()
    }

    pub fn len(&self) -> usize {
        self.instances.len().min(InstanceBuffer::MAX_INSTANCES as usize)
    }
}

pub struct InstanceBuffer(wgpu::Buffer);

impl InstanceBuffer {
    const MAX_INSTANCES: u64 = 16;

    pub fn new(device: &wgpu::Device, name: &str) -> Self {
        let label = format!("Instance buffer ({})", name);

        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&label),
            size: size_of::<Instance>() as u64 * Self::MAX_INSTANCES,
            usage: BufferUsages::VERTEX | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Self(buffer)
    }

    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.0
    }

    pub fn bind(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        render_pass.set_vertex_buffer(1, self.buffer().slice(..));
    }
}

/// Collects this frame's world matrices and colours into each mesh's instance list.
pub fn gather_instances(scene: &Scene, render_meshes: &mut Arena<RenderMesh>) {
    for (_id, render_mesh) in render_meshes.iter_mut() {
        render_mesh.instances.clear();
    }

    for (object, mesh) in scene.renderables() {
        let Some(render_mesh) = mesh
            .render_mesh
            .and_then(|render_mesh_id| render_meshes.get_mut(render_mesh_id))
        else {
            continue;
        };

        render_mesh.draw_lines = mesh.draws_lines();
        render_mesh.instances.add(Instance::new(
            *object.transform.get_world_matrix(),
            mesh.material.color,
        ));
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    #[test]
    fn instance_layout_matches_shader() {
        assert_eq!(size_of::<Instance>(), 80);
        assert_eq!(Instance::descriptor().attributes.len(), 5);
    }

    #[test]
    fn instances_carry_linear_color() {
        let instance = Instance::new(
            Mat4::from_translation(Vec3::X),
            Color::from_hex(0xffffff),
        );

        assert_eq!(instance.color, Vec4::ONE);
        assert_eq!(instance.model.w_axis, Vec4::new(1.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn instance_count_is_capped() {
        let mut instances = Instances::new();
        assert!(!instances.should_render());

        for _ in 0..InstanceBuffer::MAX_INSTANCES + 4 {
            instances.add(Instance::new(Mat4::IDENTITY, Color::from_hex(0)));
        }

        assert_eq!(instances.len(), InstanceBuffer::MAX_INSTANCES as usize);
    }
}
