/// All code relating to individual rider states is behind this module and
/// enforces unrepresentable states: a transition can only be reached through
/// the methods provided
/// - PUBLIC  : RiderState and RiderContext are public
/// - PRIVATE : internal members are private
///
/// Riding → Jumping and Riding → Sliding are the only ways into an action,
/// so jump and slide can never overlap
use crate::config::{AnimationConfig, ScooterConfig};
use crate::engine::Point;
use crate::sprite::{Jumping, Riding, Sliding, SCOOTER_FRAMES};

pub enum IsJumping {
    Done(RiderState<Riding>),
    InProgress(RiderState<Jumping>),
}

pub enum IsSliding {
    Done(RiderState<Riding>),
    InProgress(RiderState<Sliding>),
}

/// Durations the states need, copied out of the config once
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Timing {
    pub frame_ms: f32,
    /// one way; the yoyo jump lasts twice this
    pub jump_ms: f32,
    pub jump_height: f32,
    pub slide_ms: f32,
}

impl Timing {
    pub fn new(animation: &AnimationConfig, scooter: &ScooterConfig) -> Self {
        Timing {
            frame_ms: animation.scooter_frame_ms,
            jump_ms: scooter.jump_ms,
            jump_height: scooter.jump_height,
            slide_ms: scooter.slide_ms,
        }
    }

    fn jump_total(&self) -> f32 {
        self.jump_ms * 2.0
    }
}

#[derive(Debug, Copy, Clone)]
/// Shared data for :
/// - placement : ground anchor + current lift
/// - display   : wheel frame + its timer
/// - action    : time spent in the current jump/slide
pub struct RiderContext {
    pub frame: u8,
    frame_elapsed: f32,
    pub anchor: Point,
    pub lift: f32,
    pub action_elapsed: f32,
    timing: Timing,
}

#[derive(Debug, Copy, Clone)]
pub struct RiderState<S> {
    context: RiderContext,
    // type-level tag only, never read
    _state: S,
}

impl<S> RiderState<S> {
    pub fn context(&self) -> &RiderContext {
        &self.context
    }
}

impl RiderState<Riding> {
    pub fn new(anchor: Point, timing: Timing) -> Self {
        RiderState {
            context: RiderContext {
                frame: 0,
                frame_elapsed: 0.0,
                anchor,
                lift: 0.0,
                action_elapsed: 0.0,
                timing,
            },
            _state: Riding,
        }
    }

    pub fn update(mut self, delta: f32) -> Self {
        self.context = self.context.animate(delta);
        self
    }

    pub fn jump(self) -> RiderState<Jumping> {
        RiderState {
            context: self.context.on_state_transition(),
            _state: Jumping,
        }
    }

    pub fn slide(self) -> RiderState<Sliding> {
        RiderState {
            context: self.context.on_state_transition(),
            _state: Sliding,
        }
    }
}

impl RiderState<Jumping> {
    /// Returns an enum because Jumping can:
    /// - End      (Done)
    /// - Continue (InProgress)
    pub fn update(mut self, delta: f32) -> IsJumping {
        self.context = self.context.animate(delta).advance_action(delta);
        if self.context.action_elapsed >= self.context.timing.jump_total() {
            IsJumping::Done(self.land())
        } else {
            self.context.lift = jump_lift(self.progress(), self.context.timing.jump_height);
            IsJumping::InProgress(self)
        }
    }

    /// 0.0 at take-off, 0.5 at the apex, 1.0 on landing
    pub fn progress(&self) -> f32 {
        (self.context.action_elapsed / self.context.timing.jump_total()).clamp(0.0, 1.0)
    }

    pub fn land(self) -> RiderState<Riding> {
        RiderState {
            context: self.context.on_state_transition(),
            _state: Riding,
        }
    }
}

impl RiderState<Sliding> {
    pub fn update(mut self, delta: f32) -> IsSliding {
        self.context = self.context.animate(delta).advance_action(delta);
        if self.context.action_elapsed >= self.context.timing.slide_ms {
            IsSliding::Done(self.stand())
        } else {
            IsSliding::InProgress(self)
        }
    }

    pub fn stand(self) -> RiderState<Riding> {
        RiderState {
            context: self.context.on_state_transition(),
            _state: Riding,
        }
    }
}

impl RiderContext {
    /// The wheel cycle keeps spinning through every state
    fn animate(mut self, delta: f32) -> Self {
        self.frame_elapsed += delta;
        if self.frame_elapsed >= self.timing.frame_ms {
            self.frame_elapsed = 0.0;
            self.frame = (self.frame + 1) % SCOOTER_FRAMES;
        }
        self
    }

    fn advance_action(mut self, delta: f32) -> Self {
        self.action_elapsed += delta;
        self
    }

    /// Entering or leaving an action starts its clock over and puts the
    /// rider back on the ground
    fn on_state_transition(mut self) -> Self {
        self.action_elapsed = 0.0;
        self.lift = 0.0;
        self
    }
}

/// Height above the ground for a yoyo jump with a cubic ease-out rise
/// - the fall replays the rise backwards
pub fn jump_lift(progress: f32, height: f32) -> f32 {
    let t = 1.0 - (2.0 * progress - 1.0).abs();
    height * ease_out_cubic(t.clamp(0.0, 1.0))
}

fn ease_out_cubic(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn riding() -> RiderState<Riding> {
        let timing = Timing::new(&AnimationConfig::default(), &ScooterConfig::default());
        RiderState::new(Point { x: 200.0, y: 490.0 }, timing)
    }

    #[test]
    fn jump_lasts_up_and_down() {
        let mut jumping = riding().jump();
        for _ in 0..59 {
            jumping = match jumping.update(20.0) {
                IsJumping::InProgress(state) => state,
                IsJumping::Done(_) => panic!("landed early"),
            };
        }
        assert_relative_eq!(jumping.progress(), 1180.0 / 1200.0, epsilon = 1e-4);
        assert!(matches!(jumping.update(20.0), IsJumping::Done(_)));
    }

    #[test]
    fn apex_is_half_way() {
        let jumping = match riding().jump().update(600.0) {
            IsJumping::InProgress(state) => state,
            IsJumping::Done(_) => panic!("landed early"),
        };
        assert_relative_eq!(jumping.progress(), 0.5);
        assert_relative_eq!(jumping.context().lift, 200.0);
    }

    #[test]
    fn lift_is_symmetric_and_grounded_at_ends() {
        assert_relative_eq!(jump_lift(0.0, 200.0), 0.0);
        assert_relative_eq!(jump_lift(1.0, 200.0), 0.0);
        assert_relative_eq!(jump_lift(0.2, 200.0), jump_lift(0.8, 200.0), epsilon = 1e-3);
    }

    #[test]
    fn slide_ends_after_its_duration() {
        let sliding = match riding().slide().update(499.0) {
            IsSliding::InProgress(state) => state,
            IsSliding::Done(_) => panic!("stood up early"),
        };
        assert!(matches!(sliding.update(1.0), IsSliding::Done(_)));
    }

    #[test]
    fn wheel_frame_advances_every_interval() {
        let state = riding().update(149.0);
        assert_eq!(state.context().frame, 0);
        let state = state.update(1.0);
        assert_eq!(state.context().frame, 1);
        let state = state.update(150.0).update(150.0);
        assert_eq!(state.context().frame, 0);
    }
}
