use crate::assets::Assets;
use crate::engine::{Point, Rect, Renderer, Size, TextStyle};
use crate::ui::Button;
use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Food {
    Lagman,
    Plov,
    Manti,
}

impl Food {
    pub fn key(self) -> &'static str {
        match self {
            Food::Lagman => "lagman",
            Food::Plov => "plov",
            Food::Manti => "manti",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Food::Lagman => "Лагман",
            Food::Plov => "Плов",
            Food::Manti => "Манты",
        }
    }

    /// Price in tenge
    pub fn price(self) -> u32 {
        match self {
            Food::Lagman => 150,
            Food::Plov => 200,
            Food::Manti => 180,
        }
    }

    /// Dish served at this part of the counter
    pub fn at_counter(x: f32, width: f32) -> Food {
        if x < width * 0.4 {
            Food::Manti
        } else if x < width * 0.7 {
            Food::Plov
        } else {
            Food::Lagman
        }
    }

    fn card_x(self, width: f32) -> f32 {
        match self {
            Food::Manti => width * 0.2,
            Food::Plov => width * 0.5,
            Food::Lagman => width * 0.8,
        }
    }
}

const COUNTER_FROM: f32 = 0.3;
const COUNTER_TO: f32 = 0.9;
/// the card is only re-evaluated after the player moved this far
const RECHECK_DISTANCE: f32 = 100.0;
const CARD_SIZE: Size = Size {
    width: 260.0,
    height: 300.0,
};
const CARD_STYLE: TextStyle = TextStyle::plain(28.0, "#222").bold();
const SELECT_STYLE: TextStyle = TextStyle::boxed(24.0, "#fff", "#4CAF50").with_padding(15.0, 8.0);
pub const HELD_OFFSET: Point = Point { x: 25.0, y: -10.0 };
pub const HELD_SCALE: f32 = 0.08;

#[derive(Debug, Clone, PartialEq)]
struct Card {
    food: Food,
    center: Point,
    select: Button,
}

/// Menu card along the kitchen counter
#[derive(Debug, Clone, Default)]
pub struct FoodCounter {
    card: Option<Card>,
    checked_at: Option<Point>,
}

impl FoodCounter {
    pub fn update(&mut self, player: Point, viewport: Size) {
        let in_range = player.x > viewport.width * COUNTER_FROM && player.x < viewport.width * COUNTER_TO;
        if !in_range {
            self.card = None;
            self.checked_at = None;
            return;
        }

        let due = self
            .checked_at
            .map_or(true, |last| last.distance(&player) > RECHECK_DISTANCE);
        if due {
            let food = Food::at_counter(player.x, viewport.width);
            let center = Point {
                x: food.card_x(viewport.width),
                y: (viewport.height - 500.0).max(CARD_SIZE.height / 2.0),
            };
            self.card = Some(Card {
                food,
                center,
                select: Button::new(
                    "Выбрать",
                    Point {
                        x: center.x,
                        y: center.y + CARD_SIZE.height / 2.0 - 30.0,
                    },
                    SELECT_STYLE,
                ),
            });
            self.checked_at = Some(player);
        }
    }

    /// The offered dish, if its select button was clicked. Choosing hides the
    /// card until the player walks on
    pub fn choose(&mut self, clicks: &[Point]) -> Option<Food> {
        let food = self
            .card
            .as_ref()
            .filter(|card| card.select.is_hit(clicks))
            .map(|card| card.food)?;
        self.card = None;
        Some(food)
    }

    #[cfg(test)]
    pub fn offer(&self) -> Option<Food> {
        self.card.as_ref().map(|card| card.food)
    }

    #[cfg(test)]
    pub fn select_button(&self) -> Option<&Button> {
        self.card.as_ref().map(|card| &card.select)
    }

    pub fn draw(&self, renderer: &Renderer, assets: &Assets) {
        let Some(card) = &self.card else {
            return;
        };
        let rect = Rect::centered_on(card.center, CARD_SIZE);
        renderer.fill_rect(&rect, "#fffbe8");
        renderer.stroke_rect(&rect, "#222");
        if let Some(image) = assets.get(card.food.key()) {
            renderer.draw_centered(
                image,
                Point {
                    x: card.center.x,
                    y: card.center.y - 50.0,
                },
                (0.15, 0.15),
            );
        }
        renderer.draw_text(
            &format!("{} - {}₸", card.food.title(), card.food.price()),
            Point {
                x: card.center.x,
                y: card.center.y + 50.0,
            },
            &CARD_STYLE,
        );
        card.select.draw(renderer);
    }
}

/// Food carried next to the player
pub fn draw_held(renderer: &Renderer, assets: &Assets, food: Food, player: Point) {
    if let Some(image) = assets.get(food.key()) {
        let at = Point {
            x: player.x + HELD_OFFSET.x,
            y: player.y + HELD_OFFSET.y,
        };
        renderer.draw_centered(image, at, (HELD_SCALE, HELD_SCALE));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Size = Size {
        width: 1000.0,
        height: 800.0,
    };

    #[test]
    fn dish_depends_on_counter_third() {
        assert_eq!(Food::at_counter(350.0, 1000.0), Food::Manti);
        assert_eq!(Food::at_counter(500.0, 1000.0), Food::Plov);
        assert_eq!(Food::at_counter(850.0, 1000.0), Food::Lagman);
    }

    #[test]
    fn card_only_shows_along_the_counter() {
        let mut counter = FoodCounter::default();
        counter.update(Point { x: 200.0, y: 600.0 }, VIEWPORT);
        assert_eq!(counter.offer(), None);
        counter.update(Point { x: 350.0, y: 600.0 }, VIEWPORT);
        assert_eq!(counter.offer(), Some(Food::Manti));
        counter.update(Point { x: 950.0, y: 600.0 }, VIEWPORT);
        assert_eq!(counter.offer(), None);
    }

    #[test]
    fn offer_is_rechecked_only_after_walking_away() {
        let mut counter = FoodCounter::default();
        counter.update(Point { x: 380.0, y: 600.0 }, VIEWPORT);
        // crossed into the plov third, but only by 40 px
        counter.update(Point { x: 420.0, y: 600.0 }, VIEWPORT);
        assert_eq!(counter.offer(), Some(Food::Manti));
        counter.update(Point { x: 500.0, y: 600.0 }, VIEWPORT);
        assert_eq!(counter.offer(), Some(Food::Plov));
    }

    #[test]
    fn choosing_hides_the_card_until_the_player_moves_on() {
        let mut counter = FoodCounter::default();
        counter.update(Point { x: 500.0, y: 600.0 }, VIEWPORT);
        let select = counter.select_button().map(Button::center).unwrap();

        assert_eq!(counter.choose(&[Point::default()]), None);
        assert_eq!(counter.choose(&[select]), Some(Food::Plov));
        assert_eq!(counter.offer(), None);

        counter.update(Point { x: 550.0, y: 600.0 }, VIEWPORT);
        assert_eq!(counter.offer(), None);
        counter.update(Point { x: 620.0, y: 600.0 }, VIEWPORT);
        assert_eq!(counter.offer(), Some(Food::Plov));
    }

    #[test]
    fn food_ids_are_lowercase() {
        assert_eq!(serde_json::to_string(&Food::Lagman).unwrap(), "\"lagman\"");
    }
}
