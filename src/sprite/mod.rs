// ┌──────────────────────────────────────────────────────────────────────────┐
// │                      Sprite module layout                                │
// ├───────────────────┬──────────────────────────────────────────────────────┤
// │ mod.rs            │ SpriteState trait + rider marker states              │
// │ state.rs          │ RiderState<S> typestates (Riding/Jumping/Sliding)    │
// │ rider.rs          │ RiderStateMachine + Rider (minigame player)          │
// │ walker.rs         │ Walker, the parametrised walking actor of every      │
// │                   │ walkable scene                                       │
// └───────────────────┴──────────────────────────────────────────────────────┘
pub mod rider;
pub mod state;
pub mod walker;

pub const SCOOTER_FRAMES: u8 = 3;

/// Per-state sprite metadata for the scooter rider
/// - all states share the scooter wheel cycle, they differ in squash
pub trait SpriteState {
    fn name() -> &'static str;

    /// (horizontal, vertical) multiplier applied on top of the base scale
    fn squash() -> (f32, f32) {
        (1.0, 1.0)
    }

    fn total_frames() -> u8 {
        SCOOTER_FRAMES
    }

    fn frame_key(frame: u8) -> String {
        format!("escooter-sprite-{}", frame % Self::total_frames() + 1)
    }
}

#[derive(Debug, Copy, Clone)]
pub struct Riding;

#[derive(Debug, Copy, Clone)]
pub struct Jumping;

#[derive(Debug, Copy, Clone)]
pub struct Sliding;

impl SpriteState for Riding {
    fn name() -> &'static str {
        "Riding"
    }
}

impl SpriteState for Jumping {
    fn name() -> &'static str {
        "Jumping"
    }
}

impl SpriteState for Sliding {
    fn name() -> &'static str {
        "Sliding"
    }

    fn squash() -> (f32, f32) {
        (1.0, 0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_keys_cycle_through_three_scooter_frames() {
        assert_eq!(Riding::frame_key(0), "escooter-sprite-1");
        assert_eq!(Riding::frame_key(2), "escooter-sprite-3");
        assert_eq!(Jumping::frame_key(3), "escooter-sprite-1");
    }

    #[test]
    fn only_sliding_is_squashed() {
        assert_eq!(Riding::squash(), (1.0, 1.0));
        assert_eq!(Sliding::squash(), (1.0, 0.5));
    }
}
