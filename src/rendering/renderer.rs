use std::sync::Arc;

use anyhow::Context;
use id_arena::Arena;
use wgpu::CommandEncoderDescriptor;
use winit::{dpi::PhysicalSize, window::Window};

use crate::{
    demo::DemoState,
    rendering::{
        config::RenderConfig,
        instance::gather_instances,
        passes::basic_pass::{BasicPass, BasicPassTextureViews},
        render_camera::RenderCamera,
        render_common::RenderCommon,
        render_mesh::RenderMesh,
        shader_loader::{PipelineCacheBuilder, ShaderLoader},
        texture::DepthTexture,
    },
};

pub struct Renderer {
    pub window: Arc<Window>,
    pub size: PhysicalSize<u32>,

    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,

    config: RenderConfig,
    common: RenderCommon,
    depth_texture: DepthTexture,
    render_meshes: Arena<RenderMesh>,

    camera: RenderCamera,

    shader_loader: ShaderLoader,

    basic_pass: BasicPass,
}

impl Renderer {
    pub async fn new(
        window: Arc<Window>,
        demo_state: &DemoState,
        config: RenderConfig,
    ) -> anyhow::Result<Renderer> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let surface = instance
            .create_surface(window.clone())
            .context("Failed to create surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("No suitable GPU adapter")?;

        let adapter_info = adapter.get_info();
        log::info!(
            "Using adapter {} ({:?})",
            adapter_info.name,
            adapter_info.backend
        );

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                label: None,
                memory_hints: Default::default(),
                trace: wgpu::Trace::Off,
            })
            .await
            .context("Failed to create device")?;

        let common = RenderCommon::new(&device, &adapter, &surface, size)?;

        let camera = RenderCamera::new(&device, demo_state.cameras.active());

        let depth_texture =
            DepthTexture::new(&device, &common.output_surface_config, "Depth Texture");

        let mut cache_builder = PipelineCacheBuilder::new();

        let basic_pass = BasicPass::create(
            &device,
            common.format(),
            &camera.uniform_buffer,
            &mut cache_builder,
        );

        let shader_loader =
            ShaderLoader::new(device.clone(), cache_builder, config.hot_reload_shaders)?;

        Ok(Self {
            window,
            size,
            surface,
            device,
            queue,
            config,
            common,
            depth_texture,
            render_meshes: Arena::new(),
            camera,
            shader_loader,
            basic_pass,
        })
    }

    /// Uploads every scene mesh that has no GPU copy yet.
    pub fn load_meshes(&mut self, demo_state: &mut DemoState) -> anyhow::Result<()> {
        for (_id, scene_mesh) in demo_state.scene.meshes.iter_mut() {
            if scene_mesh.render_mesh.is_some() {
                continue;
            }

            let render_mesh = RenderMesh::from_scene_mesh(&self.device, scene_mesh);
            scene_mesh.render_mesh = Some(self.render_meshes.alloc(render_mesh));

            log::info!(
                "Loaded mesh {} with {} vertices, {} triangles",
                scene_mesh.name,
                scene_mesh.geometry.vertices.len(),
                scene_mesh.geometry.triangle_count()
            );
        }

        Ok(())
    }

    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.common
                .reconfigure(&self.device, &self.surface, new_size);
            self.depth_texture
                .resize(&self.device, &self.common.output_surface_config);
        }
    }

    pub fn render(&mut self, demo_state: &DemoState) -> Result<(), wgpu::SurfaceError> {
        self.shader_loader.load_pending_shaders();

        self.camera.update(&self.queue, demo_state.cameras.active());

        gather_instances(&demo_state.scene, &mut self.render_meshes);
        for (_id, render_mesh) in self.render_meshes.iter() {
            render_mesh.write_instances(&self.queue);
        }

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        self.basic_pass.render(
            &BasicPassTextureViews {
                color: view,
                depth: self.depth_texture.view().clone(),
            },
            &mut encoder,
            &self.shader_loader.cache,
            self.config.clear_color,
            &self.render_meshes,
        );

        self.queue.submit([encoder.finish()]);

        output.present();

        Ok(())
    }
}
