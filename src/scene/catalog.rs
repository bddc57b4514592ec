use super::walk::{Action, Backdrop, Exit, Feature, Probe, SceneConfig};
use super::SceneId;
use crate::context::AppContext;
use crate::engine::{Point, Rect, Size, TextStyle};
use crate::sprite::walker::{Axes, Scaling, WalkerConfig};
use crate::ui::{styles, Button};
use crate::zone::Zone;

// ==================== Street layout ====================
pub const ROAD_TOP: f32 = 0.85;
pub const BUILDING_BASE: f32 = 0.925;
pub const BUILDING_SCALE: f32 = 0.4;
const FALLBACK_BUILDING_WIDTH: f32 = 240.0;
const DOOR_DEPTH: f32 = 80.0;

pub const CLOUDS: [(f32, f32); 3] = [(0.15, 0.13), (0.5, 0.10), (0.85, 0.16)];
pub const CLOUD_SCALE: f32 = 0.25;
/// px per ms
pub const CLOUD_SPEED: f32 = 0.03;
pub const CLOUD_WRAP: f32 = 100.0;

pub struct Building {
    pub key: &'static str,
    /// centre, as a fraction of the viewport width
    pub x: f32,
    label: &'static str,
    style: TextStyle,
    action: Action,
}

pub static BUILDINGS: [Building; 3] = [
    Building {
        key: "satbayev",
        x: 0.18,
        label: "Зайти",
        style: TextStyle::boxed(32.0, "#fff", "#0077ff"),
        action: Action::Start(SceneId::Satbayev),
    },
    Building {
        key: "cu",
        x: 0.5,
        label: "Зайти в CU",
        style: TextStyle::boxed(32.0, "#fff", "#7e5cff"),
        action: Action::Launch(SceneId::Cu),
    },
    Building {
        key: "unihub",
        x: 0.82,
        label: "Зайти покушать",
        style: TextStyle::boxed(32.0, "#fff", "#ff5555"),
        action: Action::Launch(SceneId::UniHub),
    },
];

pub fn building_width(building: &Building, ctx: &AppContext) -> f32 {
    ctx.assets
        .size(building.key)
        .map_or(FALLBACK_BUILDING_WIDTH, |size| size.width * BUILDING_SCALE)
}

// ==================== Idle hints ====================
const STREET_HINTS: &[&str] = &["че встал", "чо там?", "двигайся уже", "заснул ?", "ты там?"];
const CORRIDOR_HINTS: &[&str] = &[
    "че встал",
    "что делаешь?",
    "двигайся уже",
    "заснул что ли?",
    "эй, ты там?",
];
const INDOOR_HINTS: &[&str] = &[
    "че встал",
    "что делаешь?",
    "пошли гулять",
    "скучно...",
    "может покушаем?",
];
const KITCHEN_HINTS: &[&str] = &["че встал", "что делаешь?", "пошли гулять", "скучно...", "может пож?"];

// ==================== Shared widgets ====================
const DOOR_STYLE: TextStyle = TextStyle::boxed(24.0, "#fff", "#4CAF50").with_padding(15.0, 8.0);
const ACTION_STYLE: TextStyle = TextStyle::boxed(28.0, "#fff", "#ff6600");
const SCOOTER_STYLE: TextStyle = TextStyle::boxed(24.0, "#fff", "#ff6600");

pub fn exit_button(viewport: Size) -> Button {
    Button::new(
        "Выйти",
        Point {
            x: viewport.width / 2.0,
            y: viewport.height - 60.0,
        },
        styles::EXIT,
    )
}

pub fn scooter_button(viewport: Size) -> Button {
    Button::new(
        "🚗 Play Escooter Mini-Game",
        Point {
            x: viewport.width / 2.0,
            y: viewport.height * 0.1,
        },
        SCOOTER_STYLE,
    )
}

/// Sits above the kitchen button so both can show at once
pub fn eat_button(viewport: Size) -> Button {
    Button::new(
        "Скушать",
        Point {
            x: viewport.width / 2.0,
            y: viewport.height - 180.0,
        },
        ACTION_STYLE,
    )
}

fn walker(ctx: &AppContext, axes: Axes, speed: f32, scaling: Scaling, bounds: Rect) -> WalkerConfig {
    WalkerConfig {
        axes,
        speed,
        scaling,
        frame_ms: ctx.config.animation.walk_frame_ms,
        bounds,
    }
}

const INDOOR_DEPTH: Scaling = Scaling::Depth {
    base: 0.5,
    span: 0.5,
    min: 0.15,
};

/// Horizontal band from x margin to width - margin, between two height fractions
fn band(ctx: &AppContext, margin: f32, top: f32, bottom: f32) -> Rect {
    let Size { width, height } = ctx.viewport;
    Rect::from_xywh(margin, height * top, width - 2.0 * margin, height * (bottom - top))
}

fn street_zones(ctx: &AppContext) -> Vec<Zone<Action>> {
    let base = ctx.viewport.height * BUILDING_BASE;
    BUILDINGS
        .iter()
        .map(|building| {
            let x = ctx.viewport.width * building.x;
            let width = building_width(building, ctx);
            Zone::new(
                Rect::from_xywh(x - width / 2.0, base - DOOR_DEPTH, width, DOOR_DEPTH),
                Point { x, y: base + 30.0 },
                building.label,
                building.style,
                building.action,
            )
        })
        .collect()
}

fn glass_door(ctx: &AppContext) -> Zone<Action> {
    let area = Rect::new(ctx.at(0.7, 0.4), Size { width: 120.0, height: 80.0 });
    Zone::new(
        area,
        Point {
            x: area.x() + 60.0,
            y: area.bottom() + 30.0,
        },
        "Войти в аудиторию",
        DOOR_STYLE,
        Action::Launch(SceneId::LectureHall),
    )
}

fn kitchen_counter(ctx: &AppContext) -> Zone<Action> {
    Zone::new(
        Rect::centered_on(ctx.at(0.6, 0.5), Size { width: 200.0, height: 100.0 }),
        Point {
            x: ctx.viewport.width / 2.0,
            y: ctx.viewport.height - 120.0,
        },
        "Взять хавчик",
        ACTION_STYLE,
        Action::Launch(SceneId::Kitchen),
    )
}

/// ┌──────────── Scene table ─────────────────────────────────────────────┐
/// │ Street     : left/right, 160 px/s, doors + scooter launcher, HUD     │
/// │ Satbayev   : 4-way, glass door to the lecture hall                   │
/// │ Lecture    : 4-way, narrow band, smaller depth scale                 │
/// │ UniHub     : 4-way, 240 px/s, kitchen counter + eating               │
/// │ CU         : 4-way, nothing to do                                    │
/// │ Kitchen    : left/right, 320 px/s, food counter, HUD                 │
/// │ Cafeteria  : left/right, 320 px/s, carries food back to the hall     │
/// └──────────────────────────────────────────────────────────────────────┘
/// The minigame is not a walking scene and has no config
pub fn scene_config(id: SceneId, ctx: &AppContext) -> Option<SceneConfig> {
    let world = ctx.screen();
    let indoor = |id: SceneId,
                  key: &'static str,
                  caption: &'static str,
                  speed: f32,
                  zones: Vec<Zone<Action>>,
                  features: &'static [Feature]| SceneConfig {
        id,
        backdrop: Backdrop::Texture { key, caption },
        walker: walker(ctx, Axes::Planar, speed, INDOOR_DEPTH, world),
        spawn: ctx.at(0.2, 0.7),
        spawn_from_payload: false,
        zones,
        probe: Probe::Square,
        hints: INDOOR_HINTS,
        resource_decay: false,
        hud: false,
        exit: Some(Exit::Return),
        features,
    };
    let food_hall = |id: SceneId,
                     key: &'static str,
                     caption: &'static str,
                     exit: Exit,
                     features: &'static [Feature],
                     decay: bool| SceneConfig {
        id,
        backdrop: Backdrop::Texture { key, caption },
        walker: walker(
            ctx,
            Axes::Horizontal,
            320.0,
            Scaling::Fixed(0.5),
            band(ctx, 100.0, 0.7, 0.85),
        ),
        spawn: ctx.at(0.8, 0.75),
        spawn_from_payload: true,
        zones: vec![],
        probe: Probe::Square,
        hints: KITCHEN_HINTS,
        resource_decay: decay,
        hud: decay,
        exit: Some(exit),
        features,
    };

    let config = match id {
        SceneId::Street => SceneConfig {
            id,
            backdrop: Backdrop::Street,
            walker: walker(ctx, Axes::Horizontal, 160.0, Scaling::Fixed(0.15), world),
            spawn: ctx.at(0.5, 0.88),
            spawn_from_payload: true,
            zones: street_zones(ctx),
            probe: Probe::Square,
            hints: STREET_HINTS,
            resource_decay: true,
            hud: true,
            exit: None,
            features: &[Feature::ScooterLauncher, Feature::Clouds],
        },
        SceneId::Satbayev => SceneConfig {
            backdrop: Backdrop::Corridor,
            hints: CORRIDOR_HINTS,
            exit: Some(Exit::StartBack(SceneId::Street)),
            ..indoor(id, "coridor", "Коридор Сатпаев", 160.0, vec![glass_door(ctx)], &[])
        },
        SceneId::LectureHall => SceneConfig {
            walker: walker(
                ctx,
                Axes::Planar,
                160.0,
                Scaling::Depth {
                    base: 0.4,
                    span: 0.3,
                    min: 0.1,
                },
                band(ctx, 50.0, 0.7, 0.95),
            ),
            spawn: ctx.at(0.5, 0.85),
            ..indoor(id, "lecture_hall", "Аудитория", 160.0, vec![], &[])
        },
        SceneId::UniHub => SceneConfig {
            probe: Probe::Sprite,
            ..indoor(
                id,
                "unihub_inside",
                "Внутри UniHub",
                240.0,
                vec![kitchen_counter(ctx)],
                &[Feature::HeldFood, Feature::EatButton],
            )
        },
        SceneId::Cu => indoor(id, "cu_inside", "Внутри CU", 160.0, vec![], &[]),
        SceneId::Kitchen => food_hall(
            id,
            "unihub_kitchen",
            "Кухня UniHub",
            Exit::StartWithFood(SceneId::Cafeteria),
            &[Feature::FoodCounter, Feature::HeldFood],
            true,
        ),
        SceneId::Cafeteria => food_hall(
            id,
            "unihub_cafeteria",
            "Столовая UniHub",
            Exit::Return,
            &[Feature::HeldFood],
            false,
        ),
        SceneId::Escooter => return None,
    };
    Some(config)
}
