use crate::assets::Assets;
use crate::engine::input::{keys, KeyState};
use crate::engine::{Point, Rect, Renderer, Size};

pub const IDLE_TEXTURE: &str = "player_idle";

/// Side length of the square used to probe zones around the player
pub const PROBE_SIZE: f32 = 40.0;

// used when the idle texture failed to load
const FALLBACK_SPRITE: Size = Size {
    width: 300.0,
    height: 600.0,
};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    fn name(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    pub fn frame_count(self) -> u8 {
        match self {
            Direction::Up => 3,
            _ => 4,
        }
    }

    pub fn texture_key(self, frame: u8) -> String {
        format!("walk_{}{}", self.name(), frame % self.frame_count() + 1)
    }

    fn unit(self) -> (f32, f32) {
        match self {
            Direction::Up => (0.0, -1.0),
            Direction::Down => (0.0, 1.0),
            Direction::Left => (-1.0, 0.0),
            Direction::Right => (1.0, 0.0),
        }
    }
}

/// Which arrow keys a scene listens to
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Axes {
    /// left/right only, the street and the food hall
    Horizontal,
    /// all four directions; vertical wins the animation
    Planar,
}

/// ┌──────────── Animation states ────────────┐
/// │  Idle     : static image, no counters    │
/// │  Walking  : one direction owns the frame │
/// │             counter and its accumulator  │
/// └──────────────────────────────────────────┘
/// Only the active direction carries counters, so switching direction (or
/// stopping) always restarts at frame 0
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum WalkState {
    Idle,
    Walking {
        direction: Direction,
        frame: u8,
        elapsed: f32,
    },
}

impl WalkState {
    pub fn advance(self, direction: Option<Direction>, delta: f32, frame_ms: f32) -> Self {
        let Some(direction) = direction else {
            return WalkState::Idle;
        };

        let (frame, elapsed) = match self {
            WalkState::Walking {
                direction: current,
                frame,
                elapsed,
            } if current == direction => (frame, elapsed + delta),
            _ => (0, delta),
        };

        if elapsed > frame_ms {
            WalkState::Walking {
                direction,
                frame: (frame + 1) % direction.frame_count(),
                elapsed: 0.0,
            }
        } else {
            WalkState::Walking {
                direction,
                frame,
                elapsed,
            }
        }
    }

    pub fn texture_key(&self) -> String {
        match self {
            WalkState::Idle => IDLE_TEXTURE.to_string(),
            WalkState::Walking {
                direction, frame, ..
            } => direction.texture_key(*frame),
        }
    }
}

/// Display scale of the walker
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Scaling {
    Fixed(f32),
    /// Shrinks linearly towards the top of the screen, never below `min`
    Depth { base: f32, span: f32, min: f32 },
}

impl Scaling {
    pub fn at(&self, y: f32, height: f32) -> f32 {
        match *self {
            Scaling::Fixed(scale) => scale,
            Scaling::Depth { base, span, min } => {
                let distance = ((height - y) / height).clamp(0.0, 1.0);
                (base - distance * span).max(min)
            }
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct WalkerConfig {
    pub axes: Axes,
    /// pixels per second
    pub speed: f32,
    pub scaling: Scaling,
    pub frame_ms: f32,
    pub bounds: Rect,
}

/// The player character of every walkable scene
#[derive(Debug, Clone)]
pub struct Walker {
    position: Point,
    state: WalkState,
    scale: f32,
    sprite: Size,
    config: WalkerConfig,
    viewport: Size,
}

impl Walker {
    pub fn new(position: Point, config: WalkerConfig, sprite: Option<Size>, viewport: Size) -> Self {
        let position = config.bounds.clamp(position);
        Walker {
            position,
            state: WalkState::Idle,
            scale: config.scaling.at(position.y, viewport.height),
            sprite: sprite.unwrap_or(FALLBACK_SPRITE),
            config,
            viewport,
        }
    }

    /// Moves, then picks the animation, then rescales for depth.
    /// Returns whether any movement key was held
    pub fn update(&mut self, keystate: &KeyState, delta: f32) -> bool {
        let horizontal = if keystate.is_pressed(keys::LEFT) {
            Some(Direction::Left)
        } else if keystate.is_pressed(keys::RIGHT) {
            Some(Direction::Right)
        } else {
            None
        };
        let vertical = match self.config.axes {
            Axes::Horizontal => None,
            Axes::Planar if keystate.is_pressed(keys::UP) => Some(Direction::Up),
            Axes::Planar if keystate.is_pressed(keys::DOWN) => Some(Direction::Down),
            Axes::Planar => None,
        };

        let step = self.config.speed * delta / 1000.0;
        let (dx, dy) = [horizontal, vertical]
            .into_iter()
            .flatten()
            .map(Direction::unit)
            .fold((0.0, 0.0), |(x, y), (ux, uy)| (x + ux, y + uy));
        self.position = self.config.bounds.clamp(Point {
            x: self.position.x + dx * step,
            y: self.position.y + dy * step,
        });

        self.state = self
            .state
            .advance(vertical.or(horizontal), delta, self.config.frame_ms);
        self.scale = self.config.scaling.at(self.position.y, self.viewport.height);

        horizontal.is_some() || vertical.is_some()
    }

    pub fn position(&self) -> Point {
        self.position
    }

    #[cfg(test)]
    pub fn state(&self) -> WalkState {
        self.state
    }

    /// Fixed square around the player's position
    pub fn probe(&self) -> Rect {
        Rect::centered_on(
            self.position,
            Size {
                width: PROBE_SIZE,
                height: PROBE_SIZE,
            },
        )
    }

    /// Bounds of the scaled sprite, centred on the position
    pub fn bounds(&self) -> Rect {
        Rect::centered_on(self.position, self.sprite.scaled(self.scale, self.scale))
    }

    pub fn draw(&self, renderer: &Renderer, assets: &Assets) {
        let key = self.state.texture_key();
        match assets.get(&key).or_else(|| assets.get(IDLE_TEXTURE)) {
            Some(image) => renderer.draw_centered(image, self.position, (self.scale, self.scale)),
            None => renderer.fill_rect(&self.bounds(), "#3a6ea5"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const STEP: f32 = 1000.0 / 60.0;
    const VIEWPORT: Size = Size {
        width: 800.0,
        height: 600.0,
    };

    fn walker(axes: Axes) -> Walker {
        let config = WalkerConfig {
            axes,
            speed: 160.0,
            scaling: Scaling::Depth {
                base: 0.5,
                span: 0.5,
                min: 0.15,
            },
            frame_ms: 120.0,
            bounds: Rect::from_xywh(0.0, 0.0, VIEWPORT.width, VIEWPORT.height),
        };
        Walker::new(Point { x: 400.0, y: 400.0 }, config, None, VIEWPORT)
    }

    fn pressed(codes: &[&str]) -> KeyState {
        let mut keys = KeyState::default();
        for code in codes {
            keys.set_pressed(code);
        }
        keys
    }

    #[test]
    fn frame_advances_only_after_threshold() {
        let mut state = WalkState::Idle;
        for _ in 0..7 {
            state = state.advance(Some(Direction::Right), STEP, 120.0);
        }
        assert!(matches!(state, WalkState::Walking { frame: 0, .. }));
        state = state.advance(Some(Direction::Right), STEP, 120.0);
        assert!(matches!(state, WalkState::Walking { frame: 1, .. }));
    }

    #[test]
    fn switching_direction_restarts_counters() {
        let mut state = WalkState::Idle;
        for _ in 0..20 {
            state = state.advance(Some(Direction::Left), STEP, 120.0);
        }
        assert!(!matches!(state, WalkState::Walking { frame: 0, .. }));

        let state = state.advance(Some(Direction::Down), STEP, 120.0);
        assert_eq!(
            state,
            WalkState::Walking {
                direction: Direction::Down,
                frame: 0,
                elapsed: STEP
            }
        );
        assert_eq!(state.advance(None, STEP, 120.0), WalkState::Idle);
    }

    #[test]
    fn up_cycle_wraps_after_three_frames() {
        assert_eq!(Direction::Up.texture_key(2), "walk_up3");
        assert_eq!(Direction::Up.texture_key(3), "walk_up1");
        assert_eq!(Direction::Left.texture_key(3), "walk_left4");
        assert_eq!(WalkState::Idle.texture_key(), IDLE_TEXTURE);
    }

    #[test]
    fn vertical_animation_wins_on_planar_scenes() {
        let mut walker = walker(Axes::Planar);
        assert!(walker.update(&pressed(&[keys::UP, keys::RIGHT]), STEP));
        assert!(matches!(
            walker.state(),
            WalkState::Walking {
                direction: Direction::Up,
                ..
            }
        ));
        assert!(walker.position().x > 400.0);
        assert!(walker.position().y < 400.0);
    }

    #[test]
    fn horizontal_scenes_ignore_vertical_keys() {
        let mut walker = walker(Axes::Horizontal);
        assert!(!walker.update(&pressed(&[keys::UP]), STEP));
        assert_eq!(walker.state(), WalkState::Idle);
        assert_eq!(walker.position(), Point { x: 400.0, y: 400.0 });
    }

    #[test]
    fn left_beats_right() {
        let mut walker = walker(Axes::Horizontal);
        walker.update(&pressed(&[keys::LEFT, keys::RIGHT]), 1000.0);
        assert_relative_eq!(walker.position().x, 240.0);
    }

    #[test]
    fn position_stays_inside_bounds() {
        let mut walker = walker(Axes::Planar);
        walker.update(&pressed(&[keys::LEFT, keys::DOWN]), 10_000.0);
        assert_eq!(walker.position(), Point { x: 0.0, y: 600.0 });
    }

    #[test]
    fn depth_scale_shrinks_towards_the_top() {
        let scaling = Scaling::Depth {
            base: 0.5,
            span: 0.5,
            min: 0.15,
        };
        assert_relative_eq!(scaling.at(600.0, 600.0), 0.5);
        assert_relative_eq!(scaling.at(300.0, 600.0), 0.25);
        assert_relative_eq!(scaling.at(0.0, 600.0), 0.15);
        assert_relative_eq!(Scaling::Fixed(0.15).at(0.0, 600.0), 0.15);
    }

    #[test]
    fn probe_is_a_fixed_square() {
        let walker = walker(Axes::Planar);
        assert_eq!(walker.probe(), Rect::from_xywh(380.0, 380.0, 40.0, 40.0));
    }
}
