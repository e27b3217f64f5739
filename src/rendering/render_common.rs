use anyhow::Context;
use wgpu::SurfaceConfiguration;
use winit::dpi::PhysicalSize;

pub struct RenderCommon {
    pub output_surface_config: SurfaceConfiguration,
}

impl RenderCommon {
    pub fn new(
        device: &wgpu::Device,
        adapter: &wgpu::Adapter,
        surface: &wgpu::Surface,
        size: PhysicalSize<u32>,
    ) -> anyhow::Result<Self> {
        let surface_caps = surface.get_capabilities(adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or(surface_caps.formats.first())
            .copied()
            .context("Surface reports no supported formats")?;

        let output_surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: surface_caps
                .present_modes
                .first()
                .copied()
                .unwrap_or(wgpu::PresentMode::Fifo),
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        surface.configure(device, &output_surface_config);

        log::info!(
            "Configured surface: {:?}, {}x{}",
            surface_format,
            output_surface_config.width,
            output_surface_config.height
        );

        Ok(Self {
            output_surface_config,
        })
    }

    pub fn format(&self) -> wgpu::TextureFormat {
        self.output_surface_config.format
    }

    pub fn reconfigure(
        &mut self,
        device: &wgpu::Device,
        surface: &wgpu::Surface,
        size: PhysicalSize<u32>,
    ) {
        self.output_surface_config.width = size.width;
        self.output_surface_config.height = size.height;
        surface.configure(device, &self.output_surface_config);
    }
}
