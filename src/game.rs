use crate::assets::Assets;
use crate::browser;
use crate::config::GameConfig;
use crate::context::AppContext;
use crate::engine::input::Input;
use crate::engine::{Game, Renderer, Size};
use crate::scene::{self, Payload, SceneId, SceneStack, Transition};
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use futures::join;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// TABLE
/// ┌───────────────────── Game Architecture Overview ────────────────────────┐
/// │                                                                         │
/// │    ┌─────────────┐          ┌─────────────┐          ┌─────────────┐    │
/// │    │  engine.rs  │  update  │   game.rs   │  update  │  SceneStack │    │
/// │    │  GameLoop   ├─────────►│   Campus    ├─────────►│  top scene  │    │
/// │    └──────┬──────┘          └─────────────┘          └──────┬──────┘    │
/// │           │                                                 │           │
/// │     ┌─────┴──────┐                                   ┌──────┴──────┐    │
/// │     │   Input    │  keys + clicks                    │ Transition  │    │
/// │     │  channel   ├──────────────────────────────────►│ start/launch│    │
/// │     └────────────┘                                   │ /return     │    │
/// │                                                      └─────────────┘    │
/// ├──────────────────────── Call Sequence ──────────────────────────────────┤
/// │  1. GameLoop drains input events once per animation frame               │
/// │  2. Campus.update() hands the shared AppContext to the top scene        │
/// │  3. The scene returns a Transition, applied to the stack right away     │
/// │  4. Campus.draw() draws the top scene only                              │
/// └─────────────────────────────────────────────────────────────────────────┘
pub enum Campus {
    /// Config and textures are still loading
    Loading,
    Loaded(World),
}

pub struct World {
    context: AppContext,
    scenes: SceneStack,
}

impl Campus {
    pub fn new() -> Self {
        Campus::Loading
    }
}

impl Default for Campus {
    fn default() -> Self {
        Campus::new()
    }
}

#[async_trait(?Send)]
impl Game for Campus {
    async fn initialize(&self) -> Result<Box<dyn Game>> {
        match self {
            Campus::Loading => {
                let (width, height) =
                    browser::fit_canvas_to_window().context("Failed to size the canvas")?;
                // config and textures are independent, load them side by side
                let (config, assets) = join!(GameConfig::load(), Assets::load());
                let viewport = Size {
                    width: width as f32,
                    height: height as f32,
                };

                let mut context = AppContext::new(config, viewport, assets, StdRng::from_entropy());
                let mut scenes = SceneStack::new(scene::create);
                scenes.apply(Transition::Start(SceneId::Street, Payload::default()), &mut context);
                log!("Campus ready at {}x{}", width, height);

                Ok(Box::new(Campus::Loaded(World { context, scenes })))
            }
            Campus::Loaded(_) => Err(anyhow!("Game is already initialized")),
        }
    }

    fn update(&mut self, input: &Input, delta: f32) {
        if let Campus::Loaded(world) = self {
            world.scenes.update(&mut world.context, input, delta);
        }
    }

    fn draw(&self, renderer: &Renderer) {
        if let Campus::Loaded(world) = self {
            renderer.clear(&world.context.screen());
            world.scenes.draw(renderer, &world.context);
        }
    }
}
