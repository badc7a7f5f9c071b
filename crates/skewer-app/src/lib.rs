//! skewer-app: wires config, window and scenes together.

use anyhow::Result;
use skewer_config::SkewerConfig;
use skewer_render::Viewport;
use skewer_window::SkewerWindow;

mod app;
pub mod scenes;

pub use app::App;
pub use scenes::{Scene, SceneChoice, build_scene, select_scene};

/// Initialize logging, load `skewer.toml`, open the window and run until quit.
pub fn run() -> Result<()> {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();

    let config = SkewerConfig::load();
    let choice = select_scene(std::env::args().skip(1), config.demo.scene.as_deref());
    log::info!(
        "starting {} scene in a {}x{} window",
        choice,
        config.window.width,
        config.window.height
    );

    let window = SkewerWindow::new(
        &config.window.title,
        config.window.width,
        config.window.height,
    )?;
    let size = window.window().inner_size();
    let scene = build_scene(
        choice,
        &config,
        Viewport {
            width: size.width,
            height: size.height,
        },
    )?;
    window.run(App::new(scene, config.render.tolerance))
}
