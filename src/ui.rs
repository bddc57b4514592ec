use crate::assets::Assets;
use crate::economy::Resources;
use crate::engine::{text_box, Point, Rect, Renderer, Size, TextStyle, Timer};

/// Clickable text label
#[derive(Debug, Clone, PartialEq)]
pub struct Button {
    label: String,
    center: Point,
    style: TextStyle,
}

impl Button {
    pub fn new(label: impl Into<String>, center: Point, style: TextStyle) -> Self {
        Button {
            label: label.into(),
            center,
            style,
        }
    }

    #[cfg(test)]
    pub fn center(&self) -> Point {
        self.center
    }

    pub fn rect(&self) -> Rect {
        text_box(self.center, &self.label, &self.style)
    }

    pub fn is_hit(&self, clicks: &[Point]) -> bool {
        let rect = self.rect();
        clicks.iter().any(|click| rect.contains(click))
    }

    pub fn draw(&self, renderer: &Renderer) {
        renderer.draw_text(&self.label, self.center, &self.style);
    }
}

/// Transient text that removes itself once its timer fires
#[derive(Debug, Clone)]
pub struct Notice {
    text: String,
    center: Point,
    style: TextStyle,
    timer: Timer,
}

impl Notice {
    #[cfg(test)]
    pub fn text(&self) -> &str {
        &self.text
    }
}

#[derive(Debug, Clone, Default)]
pub struct Notices {
    active: Vec<Notice>,
}

impl Notices {
    pub fn push(&mut self, text: impl Into<String>, center: Point, style: TextStyle, duration_ms: f32) {
        self.active.push(Notice {
            text: text.into(),
            center,
            style,
            timer: Timer::new(duration_ms),
        });
    }

    pub fn tick(&mut self, delta: f32) {
        self.active.retain_mut(|notice| !notice.timer.tick(delta));
    }

    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = &Notice> {
        self.active.iter()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn draw(&self, renderer: &Renderer) {
        for notice in &self.active {
            renderer.draw_text(&notice.text, notice.center, &notice.style);
        }
    }
}

pub mod styles {
    use crate::engine::TextStyle;

    pub const EXIT: TextStyle = TextStyle::boxed(32.0, "#fff", "#0077ff");
    pub const BUBBLE: TextStyle = TextStyle::boxed(20.0, "#000", "#fff")
        .bold()
        .with_padding(10.0, 5.0);
    pub const RESTART: TextStyle = TextStyle::boxed(32.0, "#fff", "#ff0000");
    pub const SNACK: TextStyle = TextStyle::boxed(40.0, "#fff", "#00aa00");
    pub const SCOLD: TextStyle = TextStyle::plain(24.0, "#ff0000").bold();
    pub const CAPTION: TextStyle = TextStyle::plain(40.0, "#222").bold();
}

const HUD_ICON: f32 = 40.0;
const HUD_SPACING: f32 = 10.0;
const HUD_SMALL_ICON: f32 = 35.0;
const HUD_SMALL_SPACING: f32 = 8.0;

/// Hearts, eating and coding rows in the top right corner
/// - only the first `n` icons of each row are drawn
pub fn draw_hud(renderer: &Renderer, assets: &Assets, resources: &Resources, viewport: Size) {
    let start_x = viewport.width - 300.0;
    let config = resources.config();
    let rows = [
        ("heart", resources.hearts(), config.max_hearts, 50.0, HUD_ICON, HUD_SPACING, 0.1),
        ("eat", resources.eating(), config.max_eating, 120.0, HUD_SMALL_ICON, HUD_SMALL_SPACING, 0.08),
        ("code", resources.coding(), config.max_coding, 160.0, HUD_SMALL_ICON, HUD_SMALL_SPACING, 0.08),
    ];

    for (key, count, max, y, icon, spacing, scale) in rows {
        let visible = count.min(max);
        match assets.get(key) {
            Some(image) => {
                for i in 0..visible {
                    let center = Point {
                        x: start_x + i as f32 * (icon + spacing),
                        y,
                    };
                    renderer.draw_centered(image, center, (scale, scale));
                }
            }
            None => renderer.draw_text_left(
                &format!("{}: {}/{}", key, visible, max),
                Point { x: start_x, y: y - icon / 2.0 },
                &TextStyle::plain(20.0, "#fff").bold(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn button_is_hit_only_inside_its_box() {
        let button = Button::new("Выйти", Point { x: 400.0, y: 540.0 }, styles::EXIT);
        assert!(button.is_hit(&[Point { x: 400.0, y: 540.0 }]));
        assert!(!button.is_hit(&[Point { x: 10.0, y: 10.0 }]));
        assert!(!button.is_hit(&[]));
    }

    #[test]
    fn notices_expire_on_their_own_schedule() {
        let mut notices = Notices::default();
        notices.push("short", Point::default(), styles::SCOLD, 1000.0);
        notices.push("long", Point::default(), styles::RESTART, 3000.0);

        notices.tick(1000.0);
        let left: Vec<&str> = notices.iter().map(Notice::text).collect();
        assert_eq!(left, vec!["long"]);

        notices.tick(2000.0);
        assert!(notices.is_empty());
    }
}
