use crate::engine::{Point, Rect, Size};
use crate::sprite::state::{IsJumping, IsSliding, RiderContext, RiderState, Timing};
use crate::sprite::{Jumping, Riding, Sliding, SpriteState};

/// ┌──────────────── State Transition Flow ──────────────────┐
/// │  From State  →  Event   →  To State                     │
/// ├─────────────────────────────────────────────────────────┤
/// │  Riding      →  Jump    →  Jumping                      │
/// │  Riding      →  Slide   →  Sliding                      │
/// │  -------        ------                                  │
/// │  Jumping     →  Update  →  Riding (when landed)         │
/// │  Sliding     →  Update  →  Riding (when slide is over)  │
/// └─────────────────────────────────────────────────────────┘
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Event {
    Jump,
    Slide,
    Update(f32),
}

/// What the collision check needs to know about the rider
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Action {
    Riding,
    Jumping { progress: f32 },
    Sliding,
}

#[derive(Debug, Copy, Clone)]
enum RiderStateMachine {
    Riding(RiderState<Riding>),
    Jumping(RiderState<Jumping>),
    Sliding(RiderState<Sliding>),
}

impl From<RiderState<Riding>> for RiderStateMachine {
    fn from(state: RiderState<Riding>) -> Self {
        RiderStateMachine::Riding(state)
    }
}

impl From<RiderState<Jumping>> for RiderStateMachine {
    fn from(state: RiderState<Jumping>) -> Self {
        RiderStateMachine::Jumping(state)
    }
}

impl From<RiderState<Sliding>> for RiderStateMachine {
    fn from(state: RiderState<Sliding>) -> Self {
        RiderStateMachine::Sliding(state)
    }
}

impl From<IsJumping> for RiderStateMachine {
    fn from(is_jumping: IsJumping) -> Self {
        match is_jumping {
            IsJumping::Done(riding_state) => riding_state.into(),
            IsJumping::InProgress(jumping_state) => jumping_state.into(),
        }
    }
}

impl From<IsSliding> for RiderStateMachine {
    fn from(is_sliding: IsSliding) -> Self {
        match is_sliding {
            IsSliding::Done(riding_state) => riding_state.into(),
            IsSliding::InProgress(sliding_state) => sliding_state.into(),
        }
    }
}

impl RiderStateMachine {
    // consumes the current state and hands back the next one, so a stale
    // state can never be touched after a transition
    fn transition(self, event: Event) -> Self {
        use RiderStateMachine::*;
        match (self, event) {
            (Riding(state), Event::Jump) => state.jump().into(),
            (Riding(state), Event::Slide) => state.slide().into(),
            (Riding(state), Event::Update(delta)) => state.update(delta).into(),
            (Jumping(state), Event::Update(delta)) => state.update(delta).into(),
            (Sliding(state), Event::Update(delta)) => state.update(delta).into(),
            // a jump or slide is already running: the request is dropped
            _ => self,
        }
    }

    fn context(&self) -> &RiderContext {
        use RiderStateMachine::*;
        match self {
            Riding(state) => state.context(),
            Jumping(state) => state.context(),
            Sliding(state) => state.context(),
        }
    }
}

/// The e-scooter rider of the minigame
#[derive(Debug, Clone)]
pub struct Rider {
    state: RiderStateMachine,
    scale: f32,
    /// unscaled sprite box, used for collectible overlap
    size: Size,
}

impl Rider {
    pub fn new(anchor: Point, timing: Timing, scale: f32, size: Size) -> Self {
        Rider {
            state: RiderStateMachine::Riding(RiderState::new(anchor, timing)),
            scale,
            size,
        }
    }

    pub fn update(&mut self, delta: f32) {
        self.state = self.state.transition(Event::Update(delta));
    }

    pub fn jump(&mut self) {
        self.state = self.state.transition(Event::Jump);
    }

    pub fn slide(&mut self) {
        self.state = self.state.transition(Event::Slide);
    }

    pub fn action(&self) -> Action {
        match &self.state {
            RiderStateMachine::Riding(_) => Action::Riding,
            RiderStateMachine::Jumping(state) => Action::Jumping {
                progress: state.progress(),
            },
            RiderStateMachine::Sliding(_) => Action::Sliding,
        }
    }

    pub fn state_name(&self) -> &'static str {
        match self.state {
            RiderStateMachine::Riding(_) => Riding::name(),
            RiderStateMachine::Jumping(_) => Jumping::name(),
            RiderStateMachine::Sliding(_) => Sliding::name(),
        }
    }

    #[cfg(test)]
    pub fn is_jumping(&self) -> bool {
        matches!(self.state, RiderStateMachine::Jumping(_))
    }

    #[cfg(test)]
    pub fn is_sliding(&self) -> bool {
        matches!(self.state, RiderStateMachine::Sliding(_))
    }

    /// Ground anchor, unaffected by jumps
    pub fn anchor(&self) -> Point {
        self.state.context().anchor
    }

    /// Where the sprite is drawn, lifted while jumping
    pub fn position(&self) -> Point {
        let context = self.state.context();
        Point {
            x: context.anchor.x,
            y: context.anchor.y - context.lift,
        }
    }

    pub fn scale(&self) -> (f32, f32) {
        let (x, y) = match self.state {
            RiderStateMachine::Riding(_) => Riding::squash(),
            RiderStateMachine::Jumping(_) => Jumping::squash(),
            RiderStateMachine::Sliding(_) => Sliding::squash(),
        };
        (self.scale * x, self.scale * y)
    }

    pub fn bounding_box(&self) -> Rect {
        let (x, y) = match self.state {
            RiderStateMachine::Sliding(_) => Sliding::squash(),
            _ => Riding::squash(),
        };
        Rect::centered_on(self.position(), self.size.scaled(x, y))
    }

    pub fn current_frame_name(&self) -> String {
        use RiderStateMachine::*;
        let frame = self.state.context().frame;
        match self.state {
            Riding(_) => crate::sprite::Riding::frame_key(frame),
            Jumping(_) => crate::sprite::Jumping::frame_key(frame),
            Sliding(_) => crate::sprite::Sliding::frame_key(frame),
        }
    }
}
