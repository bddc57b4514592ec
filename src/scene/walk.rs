use super::catalog::{self, BUILDINGS, CLOUDS};
use super::food::{self, Food, FoodCounter};
use super::{Payload, Scene, SceneId, Transition};
use crate::context::AppContext;
use crate::economy::EconomyEvent;
use crate::engine::input::Input;
use crate::engine::{Point, Rect, Renderer, Size};
use crate::hint::IdleHint;
use crate::sprite::walker::{Walker, WalkerConfig, IDLE_TEXTURE};
use crate::ui::{self, styles, Button, Notices};
use crate::zone::{Zone, ZoneChange};

/// What a zone button does when clicked
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Action {
    Start(SceneId),
    Launch(SceneId),
}

/// How the exit button leaves the scene
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Exit {
    /// back to the paused scene beneath, handing over any held food
    Return,
    /// restart `id`, putting the player back where they came in
    StartBack(SceneId),
    /// restart `id` carrying the current position and held food
    StartWithFood(SceneId),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Backdrop {
    /// drawn sky, clouds, buildings and road
    Street,
    /// corridor texture, or a drawn corridor when it is missing
    Corridor,
    Texture {
        key: &'static str,
        caption: &'static str,
    },
}

/// Which rectangle zones are tested against
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Probe {
    /// 40×40 square around the position
    Square,
    /// the scaled sprite
    Sprite,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Feature {
    ScooterLauncher,
    Clouds,
    FoodCounter,
    HeldFood,
    EatButton,
}

#[derive(Debug, Clone)]
pub struct SceneConfig {
    pub id: SceneId,
    pub backdrop: Backdrop,
    pub walker: WalkerConfig,
    pub spawn: Point,
    /// spawn at the payload position when one is given
    pub spawn_from_payload: bool,
    pub zones: Vec<Zone<Action>>,
    pub probe: Probe,
    pub hints: &'static [&'static str],
    pub resource_decay: bool,
    pub hud: bool,
    pub exit: Option<Exit>,
    pub features: &'static [Feature],
}

impl SceneConfig {
    fn has(&self, feature: Feature) -> bool {
        self.features.contains(&feature)
    }
}

/// One walkable scene; the eight campus locations differ only in their
/// [`SceneConfig`]
pub struct WalkScene {
    config: SceneConfig,
    walker: Walker,
    hint: IdleHint,
    arrival: Payload,
    held_food: Option<Food>,
    counter: FoodCounter,
    notices: Notices,
    exit_button: Option<Button>,
    scooter_button: Option<Button>,
    eat_button: Option<Button>,
    clouds: Vec<Point>,
}

impl WalkScene {
    pub fn new(config: SceneConfig, payload: Payload, ctx: &mut AppContext) -> Self {
        let spawn = match payload.player_position {
            Some(position) if config.spawn_from_payload => position,
            _ => config.spawn,
        };
        let viewport = ctx.viewport;
        let walker = Walker::new(spawn, config.walker, ctx.assets.size(IDLE_TEXTURE), viewport);
        let held_food = payload.selected_food.filter(|_| config.has(Feature::HeldFood));
        let clouds = if config.has(Feature::Clouds) {
            CLOUDS.iter().map(|(x, y)| ctx.at(*x, *y)).collect()
        } else {
            vec![]
        };

        WalkScene {
            hint: IdleHint::new(config.hints, ctx.config.hint),
            exit_button: config.exit.map(|_| catalog::exit_button(viewport)),
            scooter_button: config
                .has(Feature::ScooterLauncher)
                .then(|| catalog::scooter_button(viewport)),
            eat_button: config
                .has(Feature::EatButton)
                .then(|| catalog::eat_button(viewport)),
            config,
            walker,
            arrival: payload,
            held_food,
            counter: FoodCounter::default(),
            notices: Notices::default(),
            clouds,
        }
    }

    fn probe(&self) -> Rect {
        match self.config.probe {
            Probe::Square => self.walker.probe(),
            Probe::Sprite => self.walker.bounds(),
        }
    }

    fn tick_economy(&mut self, ctx: &mut AppContext, delta: f32) {
        for event in ctx.resources.tick(delta) {
            match event {
                EconomyEvent::EatingLost | EconomyEvent::HeartLost => {}
                EconomyEvent::Restarted => self.notices.push(
                    "Игра перезапущена!",
                    ctx.at(0.5, 0.5),
                    styles::RESTART,
                    ctx.config.economy.restart_notice_ms,
                ),
            }
        }
    }

    fn drift_clouds(&mut self, viewport: Size, delta: f32) {
        for cloud in self.clouds.iter_mut() {
            cloud.x += catalog::CLOUD_SPEED * delta;
            if cloud.x > viewport.width + catalog::CLOUD_WRAP {
                cloud.x = -catalog::CLOUD_WRAP;
            }
        }
    }

    fn handle_clicks(&mut self, ctx: &mut AppContext, clicks: &[Point]) -> Transition {
        let position = self.walker.position();

        if let Some(action) = self.config.zones.iter().find_map(|zone| zone.activated(clicks)) {
            return match action {
                Action::Start(id) => Transition::Start(id, Payload::at(position)),
                Action::Launch(id) => Transition::Launch(id, Payload::at(position)),
            };
        }

        if self.scooter_button.as_ref().is_some_and(|button| button.is_hit(clicks)) {
            return Transition::Launch(SceneId::Escooter, Payload::default());
        }

        if self.config.has(Feature::FoodCounter) {
            if let Some(food) = self.counter.choose(clicks) {
                log!("Picked {:?} for {}₸", food, food.price());
                self.held_food = Some(food);
            }
        }

        if self.held_food.is_some() && self.eat_button.as_ref().is_some_and(|button| button.is_hit(clicks)) {
            log!("Ate {:?}", self.held_food);
            self.held_food = None;
            ctx.resources.eat();
            self.notices.push(
                "Вкусно!",
                ctx.at(0.5, 0.4),
                styles::SNACK,
                ctx.config.economy.snack_notice_ms,
            );
        }

        match (self.config.exit, &self.exit_button) {
            (Some(exit), Some(button)) if button.is_hit(clicks) => match exit {
                Exit::Return => Transition::Return(Payload::with_food(self.held_food)),
                Exit::StartBack(id) => Transition::Start(
                    id,
                    Payload {
                        player_position: self.arrival.player_position,
                        selected_food: None,
                    },
                ),
                Exit::StartWithFood(id) => Transition::Start(
                    id,
                    Payload {
                        player_position: Some(position),
                        selected_food: self.held_food,
                    },
                ),
            },
            _ => Transition::None,
        }
    }

    fn draw_backdrop(&self, renderer: &Renderer, ctx: &AppContext) {
        let screen = ctx.screen();
        match self.config.backdrop {
            Backdrop::Street => {
                renderer.fill_rect(&screen, "#87ceeb");
                for (cloud, key) in self.clouds.iter().zip(["cloud1", "cloud2", "cloud3"]) {
                    if let Some(image) = ctx.assets.get(key) {
                        renderer.draw_centered(image, *cloud, (catalog::CLOUD_SCALE, catalog::CLOUD_SCALE));
                    }
                }
                for building in BUILDINGS.iter() {
                    let base = ctx.at(building.x, catalog::BUILDING_BASE);
                    match ctx.assets.get(building.key) {
                        Some(image) => renderer.draw_standing(image, base, catalog::BUILDING_SCALE),
                        None => {
                            let width = catalog::building_width(building, ctx);
                            let rect = Rect::from_xywh(base.x - width / 2.0, base.y - width, width, width);
                            renderer.fill_rect(&rect, "#b0a18f");
                        }
                    }
                }
                let road_top = ctx.viewport.height * catalog::ROAD_TOP;
                renderer.fill_rect(
                    &Rect::from_xywh(0.0, road_top, screen.width(), screen.height() - road_top),
                    "#555",
                );
            }
            Backdrop::Corridor => match ctx.assets.get("coridor") {
                Some(image) => renderer.draw_image(image, &screen),
                None => {
                    renderer.fill_rect(&screen, "#87ceeb");
                    let floor = ctx.viewport.height * 0.7;
                    renderer.fill_rect(
                        &Rect::from_xywh(0.0, floor, screen.width(), screen.height() - floor),
                        "#8b5a2b",
                    );
                    let panel = screen.width() / 5.0;
                    for i in 0..5 {
                        let rect = Rect::from_xywh(i as f32 * panel + 20.0, floor * 0.2, panel - 40.0, floor * 0.7);
                        renderer.fill_rect(&rect, "#fff");
                    }
                    renderer.draw_text("Коридор Сатпаев", ctx.at(0.5, 0.1), &styles::CAPTION);
                }
            },
            Backdrop::Texture { key, caption } => match ctx.assets.get(key) {
                Some(image) => renderer.draw_image(image, &screen),
                None => {
                    renderer.fill_rect(&screen, "#ddd");
                    renderer.draw_text(caption, ctx.at(0.5, 0.1), &styles::CAPTION);
                }
            },
        }
    }
}

impl Scene for WalkScene {
    fn id(&self) -> SceneId {
        self.config.id
    }

    /// Movement and animation first, then zones and clicks, so buttons always
    /// reflect this tick's position
    fn update(&mut self, ctx: &mut AppContext, input: &Input, delta: f32) -> Transition {
        let moving = self.walker.update(&input.keys, delta);
        self.hint.update(moving, delta, &mut ctx.rng);

        let probe = self.probe();
        for zone in self.config.zones.iter_mut() {
            if zone.update(&probe) == ZoneChange::Entered {
                log!("{:?}: entered zone {:?}", self.config.id, zone.area());
            }
        }
        if self.config.has(Feature::FoodCounter) {
            self.counter.update(self.walker.position(), ctx.viewport);
        }

        if self.config.resource_decay {
            self.tick_economy(ctx, delta);
        }
        self.notices.tick(delta);
        self.drift_clouds(ctx.viewport, delta);

        if input.clicks().is_empty() {
            return Transition::None;
        }
        self.handle_clicks(ctx, input.clicks())
    }

    fn resume(&mut self, payload: Payload) {
        if let Some(food) = payload.selected_food.filter(|_| self.config.has(Feature::HeldFood)) {
            log!("{:?}: came back holding {:?}", self.config.id, food);
            self.held_food = Some(food);
        }
    }

    fn draw(&self, renderer: &Renderer, ctx: &AppContext) {
        self.draw_backdrop(renderer, ctx);

        for zone in &self.config.zones {
            zone.draw(renderer);
        }
        if let Some(button) = &self.scooter_button {
            button.draw(renderer);
        }
        self.counter.draw(renderer, &ctx.assets);

        self.walker.draw(renderer, &ctx.assets);
        if let Some(food) = self.held_food {
            food::draw_held(renderer, &ctx.assets, food, self.walker.position());
        }
        if let Some(text) = self.hint.bubble() {
            let above = Point {
                x: self.walker.position().x,
                y: self.walker.bounds().y() - 30.0,
            };
            renderer.draw_text(text, above, &styles::BUBBLE);
        }

        if let (Some(button), Some(_)) = (&self.eat_button, self.held_food) {
            button.draw(renderer);
        }
        if let Some(button) = &self.exit_button {
            button.draw(renderer);
        }
        if self.config.hud {
            ui::draw_hud(renderer, &ctx.assets, &ctx.resources, ctx.viewport);
        }
        self.notices.draw(renderer);
    }
}
