use crate::engine::{Point, Rect, Renderer, TextStyle};
use crate::ui::Button;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ZoneChange {
    Entered,
    Left,
    Unchanged,
}

/// Static rectangle that shows one contextual button while the player
/// overlaps it. The button slot doubles as the overlap flag
#[derive(Debug, Clone)]
pub struct Zone<A> {
    area: Rect,
    button_at: Point,
    label: &'static str,
    style: TextStyle,
    action: A,
    button: Option<Button>,
}

impl<A: Copy> Zone<A> {
    pub fn new(area: Rect, button_at: Point, label: &'static str, style: TextStyle, action: A) -> Self {
        Zone {
            area,
            button_at,
            label,
            style,
            action,
            button: None,
        }
    }

    /// Recompute overlap from scratch against this tick's player rectangle
    pub fn update(&mut self, player: &Rect) -> ZoneChange {
        let overlapping = self.area.intersects(player);
        match (overlapping, self.button.is_some()) {
            (true, false) => {
                self.button = Some(Button::new(self.label, self.button_at, self.style));
                ZoneChange::Entered
            }
            (false, true) => {
                self.button = None;
                ZoneChange::Left
            }
            _ => ZoneChange::Unchanged,
        }
    }

    /// The zone's action if its button exists and was clicked
    pub fn activated(&self, clicks: &[Point]) -> Option<A> {
        self.button
            .as_ref()
            .filter(|button| button.is_hit(clicks))
            .map(|_| self.action)
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    #[cfg(test)]
    pub fn button(&self) -> Option<&Button> {
        self.button.as_ref()
    }

    pub fn draw(&self, renderer: &Renderer) {
        if let Some(button) = &self.button {
            button.draw(renderer);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Size;

    fn zone() -> Zone<u8> {
        Zone::new(
            Rect::from_xywh(100.0, 100.0, 200.0, 80.0),
            Point { x: 200.0, y: 220.0 },
            "Зайти",
            TextStyle::boxed(32.0, "#fff", "#0077ff"),
            7,
        )
    }

    fn player_at(x: f32, y: f32) -> Rect {
        Rect::centered_on(
            Point { x, y },
            Size {
                width: 40.0,
                height: 40.0,
            },
        )
    }

    #[test]
    fn button_exists_exactly_while_overlapping() {
        let mut zone = zone();
        let path = [(0.0, 0.0), (150.0, 120.0), (200.0, 140.0), (400.0, 140.0), (290.0, 170.0)];
        for (x, y) in path {
            let player = player_at(x, y);
            zone.update(&player);
            assert_eq!(zone.button().is_some(), zone.area().intersects(&player), "at {x},{y}");
        }
    }

    #[test]
    fn enter_and_leave_are_reported_once() {
        let mut zone = zone();
        assert_eq!(zone.update(&player_at(150.0, 120.0)), ZoneChange::Entered);
        assert_eq!(zone.update(&player_at(160.0, 120.0)), ZoneChange::Unchanged);
        assert_eq!(zone.update(&player_at(500.0, 120.0)), ZoneChange::Left);
        assert_eq!(zone.update(&player_at(500.0, 120.0)), ZoneChange::Unchanged);
    }

    #[test]
    fn clicks_only_count_while_the_button_exists() {
        let mut zone = zone();
        let click = [Point { x: 200.0, y: 220.0 }];
        assert_eq!(zone.activated(&click), None);
        zone.update(&player_at(150.0, 120.0));
        assert_eq!(zone.activated(&click), Some(7));
        assert_eq!(zone.activated(&[Point { x: 0.0, y: 0.0 }]), None);
    }
}
