use crate::assets::Assets;
use crate::config::GameConfig;
use crate::economy::Resources;
use crate::engine::{Point, Rect, Size};
use rand::rngs::StdRng;

/// Everything scenes share, built once when the game finishes loading
/// and handed to each scene update
#[derive(Debug)]
pub struct AppContext {
    pub config: GameConfig,
    pub viewport: Size,
    pub assets: Assets,
    pub resources: Resources,
    pub rng: StdRng,
}

impl AppContext {
    pub fn new(config: GameConfig, viewport: Size, assets: Assets, rng: StdRng) -> Self {
        AppContext {
            resources: Resources::new(config.economy),
            config,
            viewport,
            assets,
            rng,
        }
    }

    pub fn screen(&self) -> Rect {
        Rect::new(Point::default(), self.viewport)
    }

    /// A point given as fractions of the viewport
    pub fn at(&self, x: f32, y: f32) -> Point {
        Point {
            x: self.viewport.width * x,
            y: self.viewport.height * y,
        }
    }
}
