use super::{Payload, Scene, SceneId, Transition};
use crate::context::AppContext;
#[cfg(debug_assertions)]
use crate::engine::DebugDraw;
use crate::engine::input::{keys, Input};
use crate::engine::{Point, Rect, Renderer, Size, TextStyle};
use crate::minigame::{
    Controls, Height, Run, RunEvent, COLLECTIBLE_KEY, COLLECTIBLE_SCALE, ROAD_Y_RATIO,
};

const SCORE_STYLE: TextStyle = TextStyle::plain(32.0, "#000").bold();
const SUMMARY_STYLE: TextStyle = TextStyle::boxed(40.0, "#fff", "#000").with_padding(20.0, 10.0);
const FALLBACK_ENTITY: f32 = 40.0;

/// Endless-runner ride launched from the street
pub struct EscooterScene {
    run: Run,
}

impl EscooterScene {
    pub fn new(ctx: &mut AppContext) -> Self {
        EscooterScene {
            run: Run::new(ctx.config.scooter, &ctx.config.animation, ctx.viewport, &mut ctx.rng),
        }
    }

    fn draw_rider(&self, renderer: &Renderer, ctx: &AppContext) {
        let rider = self.run.rider();
        match ctx.assets.get(&rider.current_frame_name()) {
            Some(image) => renderer.draw_centered(image, rider.position(), rider.scale()),
            None => renderer.fill_rect(&rider.bounding_box(), "#ff6600"),
        }
        #[cfg(debug_assertions)]
        rider.bounding_box().draw_debug(renderer);
    }

    fn draw_entities(&self, renderer: &Renderer, ctx: &AppContext) {
        for obstacle in self.run.obstacles() {
            let kind = obstacle.kind;
            let half_height = match ctx.assets.get(kind.key) {
                Some(image) => {
                    renderer.draw_centered(image, obstacle.position, (kind.scale, kind.scale));
                    ctx.assets
                        .size(kind.key)
                        .map_or(FALLBACK_ENTITY, |size| size.height * kind.scale)
                        / 2.0
                }
                None => {
                    renderer.fill_rect(&fallback_box(obstacle.position), "#444");
                    FALLBACK_ENTITY / 2.0
                }
            };
            // red: slide under it, green: jump over it
            let marker = match kind.height {
                Height::High => "#ff0000",
                Height::Low => "#00ff00",
            };
            let above = Point {
                x: obstacle.position.x,
                y: obstacle.position.y - half_height - 10.0,
            };
            renderer.fill_circle(above, 6.0, marker);
        }

        for collectible in self.run.collectibles() {
            match ctx.assets.get(COLLECTIBLE_KEY) {
                Some(image) => {
                    renderer.draw_centered(image, *collectible, (COLLECTIBLE_SCALE, COLLECTIBLE_SCALE))
                }
                None => renderer.fill_rect(&fallback_box(*collectible), "#00aaff"),
            }
        }
    }
}

fn fallback_box(center: Point) -> Rect {
    Rect::centered_on(
        center,
        Size {
            width: FALLBACK_ENTITY,
            height: FALLBACK_ENTITY,
        },
    )
}

impl Scene for EscooterScene {
    fn id(&self) -> SceneId {
        SceneId::Escooter
    }

    fn update(&mut self, ctx: &mut AppContext, input: &Input, delta: f32) -> Transition {
        let controls = Controls {
            jump: input.keys.is_pressed(keys::UP) || input.keys.is_pressed(keys::SPACE),
            slide: input.keys.is_pressed(keys::DOWN),
            tapped: !input.clicks().is_empty(),
        };

        let mut transition = Transition::None;
        for event in self.run.update(controls, delta, &mut ctx.rng) {
            match event {
                RunEvent::Ended { score } => log!("Scooter run over, final score {}", score),
                RunEvent::Return => transition = Transition::Return(Payload::default()),
                RunEvent::Collision { .. } | RunEvent::Collected => {}
            }
        }
        transition
    }

    fn draw(&self, renderer: &Renderer, ctx: &AppContext) {
        let screen = ctx.screen();
        let road_top = ctx.viewport.height * ROAD_Y_RATIO;
        renderer.fill_rect(&screen, "#87ceeb");
        renderer.fill_rect(
            &Rect::from_xywh(0.0, road_top, screen.width(), screen.height() - road_top),
            "#555",
        );

        self.draw_entities(renderer, ctx);
        self.draw_rider(renderer, ctx);

        renderer.draw_text_left(
            &format!("Score: {}", self.run.score()),
            Point { x: 20.0, y: 20.0 },
            &SCORE_STYLE,
        );
        renderer.draw_text_left(
            &self.run.seconds_left().to_string(),
            Point {
                x: screen.width() - 80.0,
                y: 20.0,
            },
            &SCORE_STYLE,
        );
        #[cfg(debug_assertions)]
        renderer.draw_text_left(
            self.run.rider().state_name(),
            Point { x: 20.0, y: 60.0 },
            &TextStyle::plain(16.0, "#000"),
        );
        self.run.notices().draw(renderer);

        if !self.run.is_running() {
            let lines = [
                "GAME OVER".to_string(),
                format!("Final Score: {}", self.run.score()),
                "Tap to restart".to_string(),
            ];
            for (i, line) in lines.iter().enumerate() {
                renderer.draw_text(line, ctx.at(0.5, 0.35 + 0.1 * i as f32), &SUMMARY_STYLE);
            }
        }
    }
}
