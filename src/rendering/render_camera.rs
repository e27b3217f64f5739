use glam::Mat4;
use wgpu::util::DeviceExt;

use crate::camera::OrthographicCamera;

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable, Default)]
pub struct CameraUniform {
    view_proj: Mat4,
}

impl CameraUniform {
    pub fn from_camera(camera: &OrthographicCamera) -> Self {
        Self {
            view_proj: camera.get_vp_matrix(),
        }
    }
}

/// GPU copy of the active camera's view-projection matrix.
pub struct RenderCamera {
    uniform: CameraUniform,
    pub uniform_buffer: wgpu::Buffer,
}

impl RenderCamera {
    pub fn new(device: &wgpu::Device, camera: &OrthographicCamera) -> Self {
        let uniform = CameraUniform::from_camera(camera);

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Uniform Buffer"),
            contents: bytemuck::cast_slice(&[uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        Self {
            uniform,
            uniform_buffer,
        }
    }

    pub fn update(&mut self, queue: &wgpu::Queue, camera: &OrthographicCamera) {
        self.uniform = CameraUniform::from_camera(camera);
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[self.uniform]));
    }
}
