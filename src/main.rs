use anyhow::Result;

mod camera;
mod config;
mod controls;
mod demo;
mod engine;
mod frame_gate;
mod geometry;
mod input;
mod material;
mod rendering;
mod scene_graph;
mod sculpture;
mod window;

fn main() -> Result<()> {
    pretty_env_logger::init();

    pollster::block_on(window::run())?;

    Ok(())
}
