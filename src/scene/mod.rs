// ┌──────────────────────────────────────────────────────────────────────────┐
// │                       Scene module layout                                │
// ├───────────────────┬──────────────────────────────────────────────────────┤
// │ mod.rs            │ SceneId, Payload, Transition, Scene trait, SceneStack│
// │ catalog.rs        │ per-scene configuration (one table, eight scenes)    │
// │ walk.rs           │ WalkScene, the shared walking scene                  │
// │ food.rs           │ Food catalog + kitchen counter                       │
// │ escooter.rs       │ e-scooter minigame scene                             │
// └───────────────────┴──────────────────────────────────────────────────────┘
use crate::context::AppContext;
use crate::engine::input::Input;
use crate::engine::{Point, Renderer};
use serde::{Deserialize, Serialize};

pub mod catalog;
pub mod escooter;
pub mod food;
pub mod walk;

use food::Food;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SceneId {
    Street,
    Satbayev,
    LectureHall,
    UniHub,
    Cu,
    Kitchen,
    Cafeteria,
    Escooter,
}

/// Continuity data handed across a transition; either field may be absent
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Payload {
    pub player_position: Option<Point>,
    pub selected_food: Option<Food>,
}

impl Payload {
    pub fn at(position: Point) -> Self {
        Payload {
            player_position: Some(position),
            ..Payload::default()
        }
    }

    pub fn with_food(food: Option<Food>) -> Self {
        Payload {
            selected_food: food,
            ..Payload::default()
        }
    }
}

/// ┌──────────────────── Scene stack transitions ────────────────────┐
/// │  Start(id)   : drop the active scene (and any older `id`),      │
/// │                push a fresh `id`                                │
/// │  Launch(id)  : pause the active scene, push a fresh `id`        │
/// │  Return      : drop the active scene, resume the one beneath    │
/// └─────────────────────────────────────────────────────────────────┘
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    None,
    Start(SceneId, Payload),
    Launch(SceneId, Payload),
    Return(Payload),
}

pub trait Scene {
    fn id(&self) -> SceneId;
    fn update(&mut self, ctx: &mut AppContext, input: &Input, delta: f32) -> Transition;
    /// Called when the scene above this one returns
    fn resume(&mut self, _payload: Payload) {}
    fn draw(&self, renderer: &Renderer, ctx: &AppContext);
}

pub type SceneFactory = fn(SceneId, Payload, &mut AppContext) -> Box<dyn Scene>;

/// Creates the real scene for an id
pub fn create(id: SceneId, payload: Payload, ctx: &mut AppContext) -> Box<dyn Scene> {
    match catalog::scene_config(id, ctx) {
        Some(config) => Box::new(walk::WalkScene::new(config, payload, ctx)),
        None => Box::new(escooter::EscooterScene::new(ctx)),
    }
}

/// Paused scenes below, the active one on top
pub struct SceneStack {
    scenes: Vec<Box<dyn Scene>>,
    factory: SceneFactory,
}

impl SceneStack {
    pub fn new(factory: SceneFactory) -> Self {
        SceneStack {
            scenes: vec![],
            factory,
        }
    }

    pub fn active(&self) -> Option<SceneId> {
        self.scenes.last().map(|scene| scene.id())
    }

    /// Ids from the bottom of the stack to the top
    #[cfg(test)]
    pub fn ids(&self) -> Vec<SceneId> {
        self.scenes.iter().map(|scene| scene.id()).collect()
    }

    pub fn update(&mut self, ctx: &mut AppContext, input: &Input, delta: f32) {
        let transition = match self.scenes.last_mut() {
            Some(scene) => scene.update(ctx, input, delta),
            None => return,
        };
        self.apply(transition, ctx);
    }

    pub fn apply(&mut self, transition: Transition, ctx: &mut AppContext) {
        match transition {
            Transition::None => {}
            Transition::Start(id, payload) => {
                log!("Scene start {:?} -> {:?} with {:?}", self.active(), id, payload);
                self.scenes.pop();
                self.scenes.retain(|scene| scene.id() != id);
                let scene = (self.factory)(id, payload, ctx);
                self.scenes.push(scene);
            }
            Transition::Launch(id, payload) => {
                log!("Scene launch {:?} over {:?}", id, self.active());
                let scene = (self.factory)(id, payload, ctx);
                self.scenes.push(scene);
            }
            Transition::Return(payload) => {
                if self.scenes.len() < 2 {
                    warn!("Scene {:?} returned with nothing beneath it", self.active());
                    return;
                }
                let finished = self.scenes.pop().map(|scene| scene.id());
                if let Some(scene) = self.scenes.last_mut() {
                    log!("Scene {:?} returned to {:?} with {:?}", finished, scene.id(), payload);
                    scene.resume(payload);
                }
            }
        }
    }

    pub fn draw(&self, renderer: &Renderer, ctx: &AppContext) {
        if let Some(scene) = self.scenes.last() {
            scene.draw(renderer, ctx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::fixtures;
    use std::cell::RefCell;

    thread_local! {
        static RESUMED: RefCell<Vec<(SceneId, Payload)>> = RefCell::new(vec![]);
    }

    struct Stub(SceneId);

    impl Scene for Stub {
        fn id(&self) -> SceneId {
            self.0
        }

        fn update(&mut self, _ctx: &mut AppContext, _input: &Input, _delta: f32) -> Transition {
            Transition::None
        }

        fn resume(&mut self, payload: Payload) {
            RESUMED.with(|resumed| resumed.borrow_mut().push((self.0, payload)));
        }

        fn draw(&self, _renderer: &Renderer, _ctx: &AppContext) {}
    }

    fn stub(id: SceneId, _payload: Payload, _ctx: &mut AppContext) -> Box<dyn Scene> {
        Box::new(Stub(id))
    }

    fn stack(ctx: &mut AppContext) -> SceneStack {
        let mut stack = SceneStack::new(stub);
        stack.apply(Transition::Start(SceneId::Street, Payload::default()), ctx);
        stack
    }

    #[test]
    fn launch_pauses_and_return_resumes_with_payload() {
        let mut ctx = fixtures::context();
        let mut stack = stack(&mut ctx);
        stack.apply(Transition::Launch(SceneId::UniHub, Payload::default()), &mut ctx);
        assert_eq!(stack.ids(), vec![SceneId::Street, SceneId::UniHub]);

        RESUMED.with(|resumed| resumed.borrow_mut().clear());
        let payload = Payload::with_food(Some(Food::Plov));
        stack.apply(Transition::Return(payload), &mut ctx);
        assert_eq!(stack.ids(), vec![SceneId::Street]);
        let resumed = RESUMED.with(|resumed| resumed.borrow().clone());
        assert_eq!(resumed, vec![(SceneId::Street, payload)]);
    }

    #[test]
    fn start_replaces_the_active_scene_and_older_instances() {
        let mut ctx = fixtures::context();
        let mut stack = stack(&mut ctx);
        stack.apply(Transition::Start(SceneId::Satbayev, Payload::default()), &mut ctx);
        assert_eq!(stack.ids(), vec![SceneId::Satbayev]);

        stack.apply(Transition::Launch(SceneId::LectureHall, Payload::default()), &mut ctx);
        stack.apply(Transition::Return(Payload::default()), &mut ctx);
        stack.apply(Transition::Start(SceneId::Street, Payload::default()), &mut ctx);
        assert_eq!(stack.ids(), vec![SceneId::Street]);
    }

    #[test]
    fn kitchen_to_cafeteria_returns_to_the_hall() {
        let mut ctx = fixtures::context();
        let mut stack = stack(&mut ctx);
        stack.apply(Transition::Launch(SceneId::UniHub, Payload::default()), &mut ctx);
        stack.apply(Transition::Launch(SceneId::Kitchen, Payload::default()), &mut ctx);
        stack.apply(Transition::Start(SceneId::Cafeteria, Payload::default()), &mut ctx);
        assert_eq!(stack.ids(), vec![SceneId::Street, SceneId::UniHub, SceneId::Cafeteria]);
        stack.apply(Transition::Return(Payload::default()), &mut ctx);
        assert_eq!(stack.active(), Some(SceneId::UniHub));
    }

    #[test]
    fn return_from_the_last_scene_is_ignored() {
        let mut ctx = fixtures::context();
        let mut stack = stack(&mut ctx);
        stack.apply(Transition::Return(Payload::default()), &mut ctx);
        assert_eq!(stack.ids(), vec![SceneId::Street]);
    }

    #[test]
    fn payload_uses_camel_case_and_tolerates_missing_fields() {
        let payload: Payload = serde_json::from_str(r#"{"selectedFood":"manti"}"#).unwrap();
        assert_eq!(payload, Payload::with_food(Some(Food::Manti)));
        let empty: Payload = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, Payload::default());

        let json = serde_json::to_value(Payload::at(Point { x: 1.0, y: 2.0 })).unwrap();
        assert_eq!(json["playerPosition"]["x"], 1.0);
    }
}
