use std::fmt;
use std::str::FromStr;

use anyhow::Result;
use skewer_config::SkewerConfig;
use skewer_core::{Dispatch, InputEvent};
use skewer_render::{Renderer, Viewport};

pub mod static_shapes;
pub mod transform;

pub trait Scene {
    fn name(&self) -> &'static str;
    fn on_input(&mut self, event: InputEvent) -> Dispatch;
    fn draw(&self, renderer: &mut dyn Renderer);
    fn on_resize(&mut self, _viewport: Viewport) {}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SceneChoice {
    #[default]
    Transform,
    Static,
}

impl FromStr for SceneChoice {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "transform" | "transforms" | "pentagon" => Ok(Self::Transform),
            "static" | "shapes" => Ok(Self::Static),
            other => anyhow::bail!("unknown scene {other:?}"),
        }
    }
}

impl fmt::Display for SceneChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Transform => "transform",
            Self::Static => "static",
        })
    }
}

/// Pick a scene: `--scene=<name>` (or a bare `--static`/`--transform` flag) wins
/// over the configured name, which already carries `SKEWER_SCENE`.
pub fn select_scene<I, S>(args: I, configured: Option<&str>) -> SceneChoice
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let from_args = args.into_iter().find_map(|a| {
        let a = a.as_ref();
        if let Some(name) = a.strip_prefix("--scene=") {
            Some(name.to_string())
        } else if a == "--static" || a == "--transform" {
            Some(a.trim_start_matches("--").to_string())
        } else {
            None
        }
    });
    let Some(name) = from_args.as_deref().or(configured) else {
        return SceneChoice::default();
    };
    name.parse().unwrap_or_else(|e| {
        log::warn!("{e}; falling back to {}", SceneChoice::default());
        SceneChoice::default()
    })
}

pub fn build_scene(
    choice: SceneChoice,
    config: &SkewerConfig,
    viewport: Viewport,
) -> Result<Box<dyn Scene>> {
    Ok(match choice {
        SceneChoice::Transform => Box::new(transform::TransformScene::from_config(config, viewport)?),
        SceneChoice::Static => Box::new(static_shapes::StaticScene::new(viewport)),
    })
}
