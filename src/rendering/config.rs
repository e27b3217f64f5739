#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub clear_color: wgpu::Color,
    /// Watch the shader folder and recompile edited shaders while running
    pub hot_reload_shaders: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            clear_color: wgpu::Color::BLACK,
            hot_reload_shaders: cfg!(debug_assertions),
        }
    }
}
